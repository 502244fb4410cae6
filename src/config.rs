use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::DomainSpec;
use crate::model::ModelSpec;
use crate::noise::NoiseFactor;
use crate::params::{LinearParams, LogisticParams};
use crate::report::Column;
use crate::LabgenError;

/// Complete description of one generated lab report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// RNG seed for reproducibility
    pub seed: u64,
    /// Report file, opened in append mode
    pub output: PathBuf,
    /// `<h1>` text; the generation date is appended in parentheses
    pub title: String,
    /// `<h2>` text naming the assignment
    pub assignment: String,
    pub apparatus: Option<ApparatusConfig>,
    pub equipment: Option<EquipmentConfig>,
    pub measurements: Vec<MeasurementConfig>,
}

/// Photo of the measurement setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApparatusConfig {
    pub heading: String,
    pub image_src: String,
    pub image_alt: String,
}

/// Instrument error table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentConfig {
    pub heading: String,
    pub device_label: String,
    pub error_label: String,
    pub items: Vec<EquipmentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub device: String,
    pub error: String,
}

/// One generated measurement series and its table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementConfig {
    pub heading: String,
    pub domain: DomainSpec,
    pub model: ModelSpec,
    #[serde(default)]
    pub noise_factor: NoiseFactor,
    pub x_column: Column,
    pub y_column: Column,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            output: PathBuf::from("poytakirja.html"),
            title: "Generoitu mittauspöytäkirja".to_string(),
            assignment: String::new(),
            apparatus: None,
            equipment: None,
            measurements: Vec::new(),
        }
    }
}

impl ReportConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, LabgenError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, LabgenError> {
        let config: ReportConfig = toml::from_str(raw)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LabgenError> {
        if self.measurements.is_empty() {
            return Err(LabgenError::InvalidConfig(
                "at least one measurement must be configured".to_string(),
            ));
        }

        if self.output.as_os_str().is_empty() {
            return Err(LabgenError::InvalidConfig(
                "output path must not be empty".to_string(),
            ));
        }

        for (idx, measurement) in self.measurements.iter().enumerate() {
            measurement
                .domain
                .validate()
                .and_then(|()| measurement.x_column.validate())
                .and_then(|()| measurement.y_column.validate())
                .map_err(|err| {
                    LabgenError::InvalidConfig(format!(
                        "measurement {} ({}): {err}",
                        idx + 1,
                        measurement.heading
                    ))
                })?;
        }

        if let Some(equipment) = &self.equipment {
            if equipment.items.is_empty() {
                return Err(LabgenError::InvalidConfig(
                    "equipment table must list at least one device".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// FYSA2010/1 Hall effect report: crystal voltage, Hall voltage against
/// current and field, and the temperature dependence of the Hall voltage
pub fn hall_effect_preset() -> ReportConfig {
    let current = || {
        DomainSpec::new(-30.0, 30.0, 15).with_jitter(NoiseFactor::from_literal(0.1))
    };

    ReportConfig {
        seed: 2010,
        output: PathBuf::from("poytakirja.html"),
        title: "Generoitu mittauspöytäkirja".to_string(),
        assignment: "FYSA2010/1 Hallin ilmiö".to_string(),
        apparatus: Some(ApparatusConfig {
            heading: "Mittalaitteisto".to_string(),
            image_src: "./assets/FYSA2010_1_laitteisto.jpg".to_string(),
            image_alt: "laitteisto".to_string(),
        }),
        equipment: Some(EquipmentConfig {
            heading: "Mittalaitteiston virheet".to_string(),
            device_label: "Laite".to_string(),
            error_label: "Virhe".to_string(),
            items: [
                ("Amprobe 35XP-A", "0.5% lu + 1 dig"),
                ("Teslametri", "2% lu"),
                ("Hall-moduuli, virrat", "1 dig"),
                ("Hall-moduuli, lämpötila", "1 dig"),
            ]
            .into_iter()
            .map(|(device, error)| EquipmentItem {
                device: device.to_string(),
                error: error.to_string(),
            })
            .collect(),
        }),
        measurements: vec![
            MeasurementConfig {
                heading: "Jännite germanium kiteen yli ohjausvirran funktiona".to_string(),
                domain: current(),
                model: ModelSpec::Linear(LinearParams::new(0.062, 0.090)),
                noise_factor: NoiseFactor::from_literal(0.1),
                x_column: Column::new("Ohjausvirta (mA)", 1),
                y_column: Column::new("Jännite kiteen yli (V)", 3),
            },
            MeasurementConfig {
                heading: "Mittaus 1: vakio magneettikenttä 75,8mT".to_string(),
                domain: current(),
                model: ModelSpec::Linear(LinearParams::new(0.742, -0.692)),
                noise_factor: NoiseFactor::from_literal(1.0),
                x_column: Column::new("Ohjausvirta (mA)", 1),
                y_column: Column::new("Hall-jännite (mV)", 1),
            },
            MeasurementConfig {
                heading: "Mittaus 2: vakio ohjausvirta 25mA".to_string(),
                domain: DomainSpec::new(50.0, 100.0, 15).integer(),
                model: ModelSpec::Linear(LinearParams::new(0.223, 0.785)),
                noise_factor: NoiseFactor::from_literal(0.5),
                x_column: Column::new("Magneettivuon tiheys (mT)", 1),
                y_column: Column::new("Hall-jännite (mV)", 1),
            },
            MeasurementConfig {
                heading: "Mittaus 3: Hall-jännite lämpötilan funktiona, magneettikenttä 72,5mT ja ohjausvirta 30mA".to_string(),
                domain: DomainSpec::new(50.0, 150.0, 20),
                model: ModelSpec::Logistic(LogisticParams::new(100.0, 22.0, -0.15)),
                noise_factor: NoiseFactor::from_literal(0.15),
                x_column: Column::integer("Lämpotila (°C)"),
                y_column: Column::new("Hall-jännite (mV)", 1),
            },
        ],
    }
}
