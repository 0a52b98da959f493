//! Core building blocks shared by PassProbe surfaces.
//!
//! Configuration, the analysis data model, and the check history live here so
//! the client and UI crates can focus on transport and presentation instead of
//! reimplementing orchestration.

pub mod analysis;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;

pub use analysis::{radar_axes, AnalysisResult, Breakdown, HeatClass, StrengthClass, RADAR_MAX};
pub use config::{PassprobeConfig, CONFIG_PATH_ENV, DEFAULT_BASE_URL};
pub use error::{PassprobeError, PassprobeResult};
pub use history::{HistoryEntry, HistoryStore};
