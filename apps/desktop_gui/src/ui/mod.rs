//! UI layer for the predictor window: app shell, outcome panels, and theme.

pub mod app;
pub mod panels;
pub mod theme;

pub use app::{PredictorApp, StartupConfig};
