use std::path::PathBuf;

use anyhow::{Context, Result};

use doe_viewer::data::model::{CellValue, Record};
use doe_viewer::data::request::{to_json_pretty, DesignResponse};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Run {
    temperature: f64,
    pressure: f64,
    catalyst: &'static str,
    response: f64,
}

/// Uniformly scattered runs with a yield peaking near 350 °C / 3 bar.
fn generate_runs(n: usize, rng: &mut SimpleRng) -> Vec<Run> {
    let catalysts = ["A", "B", "C"];
    (0..n)
        .map(|i| {
            let temperature = rng.uniform(200.0, 500.0);
            let pressure = rng.uniform(1.0, 5.0);
            let catalyst = catalysts[i % catalysts.len()];
            let boost = match catalyst {
                "A" => 1.0,
                "B" => 1.15,
                _ => 0.9,
            };
            let response = boost
                * gaussian(temperature, 350.0, 60.0, 80.0)
                * gaussian(pressure, 3.0, 1.5, 1.0)
                + rng.gauss(0.0, 1.5);
            Run {
                temperature,
                pressure,
                catalyst,
                response,
            }
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("samples"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let runs = generate_runs(20, &mut rng);

    // ---- Design matrix with responses (table / SPC input) ----
    let csv_path = out_dir.join("design_matrix.csv");
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("creating {}", csv_path.display()))?;
    writer.write_record(["Temperature", "Pressure", "Catalyst", "Response"])?;
    for run in &runs {
        writer.write_record([
            round2(run.temperature).to_string(),
            round2(run.pressure).to_string(),
            run.catalyst.to_string(),
            round2(run.response).to_string(),
        ])?;
    }
    writer.flush()?;

    // ---- Design response as the backend returns it ----
    let matrix: Vec<Record> = runs
        .iter()
        .map(|run| {
            [
                ("Temperature", CellValue::Number(round2(run.temperature))),
                ("Pressure", CellValue::Number(round2(run.pressure))),
                ("Catalyst", CellValue::Text(run.catalyst.to_string())),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
        })
        .collect();
    let response = DesignResponse {
        strategy: "random".to_string(),
        num_factors: 3,
        num_runs: matrix.len(),
        matrix,
    };
    let json_path = out_dir.join("design_response.json");
    std::fs::write(&json_path, to_json_pretty(&response)?)
        .with_context(|| format!("writing {}", json_path.display()))?;

    // ---- Drifting process signal (single-series input) ----
    let mut series = String::from("# reactor outlet temperature\n");
    for i in 0..120 {
        let drift = 0.05 * i as f64;
        series.push_str(&format!("{:.3}\n", 100.0 + drift + rng.gauss(0.0, 0.8)));
    }
    let txt_path = out_dir.join("process_series.txt");
    std::fs::write(&txt_path, series)
        .with_context(|| format!("writing {}", txt_path.display()))?;

    println!(
        "Wrote {} runs to {}, {} and 120 samples to {}",
        runs.len(),
        csv_path.display(),
        json_path.display(),
        txt_path.display()
    );
    Ok(())
}
