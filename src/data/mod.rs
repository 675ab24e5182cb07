/// Data layer: cell model, file ingestion, projection and request bodies.
///
/// Architecture:
/// ```text
///  .txt / .csv / .xlsx / .xls / .json
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  name + full bytes, extension sniffing
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sheet    │  first sheet → raw rows of CellValue
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  NumericSeries  /  TabularDataset  /  design matrix
///   └──────────┘
///        │                         │
///        ▼                         ▼
///   ┌────────────┐          ┌────────────┐
///   │ projection  │          │  request    │  backend JSON bodies
///   └────────────┘          └────────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod projection;
pub mod request;
pub mod sheet;
pub mod source;
