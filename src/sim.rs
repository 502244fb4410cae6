//! Measurement generation harness
//!
//! Runs every configured measurement through the sample generator and
//! assembles the resulting series into a report document

use tracing::info;

use crate::config::{MeasurementConfig, ReportConfig};
use crate::model::SampleGenerator;
use crate::report::{Document, Fragment, Table};
use crate::LabgenError;

/// Generated (x, y) series for one measurement
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSeries {
    pub heading: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// `y - model(x)`, the noise actually injected
    pub residuals: Vec<f64>,
}

/// Per-measurement noise statistics of one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub seed: u64,
    pub samples: usize,
    pub rms_residuals: Vec<(String, f64)>,
}

/// Generate one measurement, drawing domain jitter and noise from `generator`
pub fn run_measurement(
    measurement: &MeasurementConfig,
    generator: &mut SampleGenerator,
) -> MeasurementSeries {
    let x = measurement.domain.build(generator.rng_mut());
    let y = generator.generate(&x, &measurement.model, measurement.noise_factor);
    let residuals = x
        .iter()
        .zip(&y)
        .map(|(&xi, &yi)| yi - measurement.model.evaluate(xi))
        .collect();

    MeasurementSeries {
        heading: measurement.heading.clone(),
        x,
        y,
        residuals,
    }
}

/// Generate all measurements in configuration order from one seeded stream
pub fn run_measurements(config: &ReportConfig) -> Result<Vec<MeasurementSeries>, LabgenError> {
    config.validate()?;

    let mut generator = SampleGenerator::from_seed(config.seed);
    let series = config
        .measurements
        .iter()
        .map(|measurement| run_measurement(measurement, &mut generator))
        .collect::<Vec<_>>();

    info!(
        seed = config.seed,
        measurements = series.len(),
        "measurements generated"
    );
    Ok(series)
}

/// Assemble the report: title, assignment, apparatus, equipment, measurements
pub fn build_document(
    config: &ReportConfig,
    series: &[MeasurementSeries],
    date: &str,
) -> Result<Document, LabgenError> {
    if series.len() != config.measurements.len() {
        return Err(LabgenError::LengthMismatch {
            context: "measurement series",
            expected: config.measurements.len(),
            got: series.len(),
        });
    }

    let mut doc = Document::new();
    doc.push(Fragment::heading(1, format!("{} ({date})", config.title)));
    if !config.assignment.is_empty() {
        doc.push(Fragment::heading(2, config.assignment.as_str()));
    }

    if let Some(apparatus) = &config.apparatus {
        doc.push(Fragment::heading(3, apparatus.heading.as_str()));
        doc.push(Fragment::Figure {
            src: apparatus.image_src.clone(),
            alt: apparatus.image_alt.clone(),
        });
    }

    if let Some(equipment) = &config.equipment {
        let rows = equipment
            .items
            .iter()
            .map(|item| vec![item.device.clone(), item.error.clone()])
            .collect();
        let table = Table::from_text(
            vec![equipment.device_label.clone(), equipment.error_label.clone()],
            rows,
        )?;
        doc.push(Fragment::heading(3, equipment.heading.as_str()));
        doc.push(Fragment::Table(table));
    }

    for (measurement, data) in config.measurements.iter().zip(series) {
        let table =
            Table::from_series(&measurement.x_column, &measurement.y_column, &data.x, &data.y)?;
        doc.push(Fragment::heading(3, measurement.heading.as_str()));
        doc.push(Fragment::Table(table));
    }

    Ok(doc)
}

pub fn summarize(config: &ReportConfig, series: &[MeasurementSeries]) -> RunSummary {
    RunSummary {
        seed: config.seed,
        samples: series.iter().map(|s| s.y.len()).sum(),
        rms_residuals: series
            .iter()
            .map(|s| (s.heading.clone(), rms_error(&s.residuals)))
            .collect(),
    }
}

/// Calculate RMS error; zero for an empty slice
pub fn rms_error(errors: &[f64]) -> f64 {
    if errors.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = errors.iter().map(|&e| e * e).sum();
    (sum_sq / errors.len() as f64).sqrt()
}
