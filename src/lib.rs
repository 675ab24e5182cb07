//! Ingestion and projection of synthetic design-of-experiments data.
//!
//! The [`data`] module turns uploaded files into numeric series or tables,
//! projects design matrices for plotting, and builds the JSON bodies the
//! statistics backend expects. The `doe-viewer` binary wraps it in an egui
//! shell.

pub mod data;
