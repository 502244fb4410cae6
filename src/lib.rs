//! labgen - synthetic lab measurement generator
//!
//! Evaluates linear and logistic models over a domain sequence, perturbs the
//! result with bounded uniform noise drawn from an injected random source, and
//! renders the generated series as tables in an HTML lab report.

pub mod config;
pub mod domain;
pub mod model;
pub mod noise;
pub mod params;
pub mod report;
pub mod sim;
pub mod telemetry;

use thiserror::Error;

// Re-export main types
pub use config::ReportConfig;
pub use domain::DomainSpec;
pub use model::{generate_linear, generate_logistic, ModelSpec, SampleGenerator};
pub use noise::NoiseFactor;
pub use params::{LinearParams, LogisticParams};
pub use report::{Document, Fragment, Table};
pub use sim::{run_measurements, MeasurementSeries, RunSummary};

#[derive(Debug, Error)]
pub enum LabgenError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{context} length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
