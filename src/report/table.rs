use serde::{Deserialize, Serialize};

use super::html::escape;
use crate::LabgenError;

/// Presentation of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub label: String,
    /// Fractional digits kept after rounding
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    /// Render without a fractional part
    #[serde(default)]
    pub integer: bool,
}

/// Beyond this a double carries no more decimal digits and `10^d` heads
/// toward overflow
pub const MAX_DECIMALS: u32 = 15;

fn default_decimals() -> u32 {
    1
}

impl Column {
    pub fn new(label: impl Into<String>, decimals: u32) -> Self {
        Self {
            label: label.into(),
            decimals,
            integer: false,
        }
    }

    pub fn integer(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            decimals: 0,
            integer: true,
        }
    }

    pub fn validate(&self) -> Result<(), LabgenError> {
        if self.decimals > MAX_DECIMALS {
            return Err(LabgenError::InvalidArgument(format!(
                "column '{}' decimals must be at most {MAX_DECIMALS}, got {}",
                self.label, self.decimals
            )));
        }
        Ok(())
    }

    pub fn format(&self, value: f64) -> String {
        let rounded = round_half_even(value, self.decimals);
        if self.integer {
            format!("{}", rounded.trunc() as i64)
        } else {
            format!("{:.*}", self.decimals as usize, rounded)
        }
    }
}

/// Round to `decimals` places, ties to even
pub fn round_half_even(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}

/// Labeled table with a 1-based row index
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Table of preformatted text cells; every row must match the header width
    pub fn from_text(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, LabgenError> {
        for row in &rows {
            ensure_len("table row", headers.len(), row.len())?;
        }
        Ok(Self { headers, rows })
    }

    /// Two-column table of a generated (x, y) series
    pub fn from_series(
        x_column: &Column,
        y_column: &Column,
        x: &[f64],
        y: &[f64],
    ) -> Result<Self, LabgenError> {
        ensure_len("series y", x.len(), y.len())?;

        let rows = x
            .iter()
            .zip(y)
            .map(|(&xi, &yi)| vec![x_column.format(xi), y_column.format(yi)])
            .collect();

        Ok(Self {
            headers: vec![x_column.label.clone(), y_column.label.clone()],
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<table border=\"1\" class=\"dataframe\">\n");
        out.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n      <th></th>\n");
        for header in &self.headers {
            out.push_str(&format!("      <th>{}</th>\n", escape(header)));
        }
        out.push_str("    </tr>\n  </thead>\n  <tbody>\n");

        for (idx, row) in self.rows.iter().enumerate() {
            out.push_str("    <tr>\n");
            out.push_str(&format!("      <th>{}</th>\n", idx + 1));
            for cell in row {
                out.push_str(&format!("      <td>{}</td>\n", escape(cell)));
            }
            out.push_str("    </tr>\n");
        }

        out.push_str("  </tbody>\n</table>\n");
        out
    }
}

fn ensure_len(context: &'static str, expected: usize, actual: usize) -> Result<(), LabgenError> {
    if expected == actual {
        return Ok(());
    }

    Err(LabgenError::LengthMismatch {
        context,
        expected,
        got: actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(0.5, 0), 0.0);
        assert_eq!(round_half_even(1.5, 0), 2.0);
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(-1.23456, 2), -1.23);
    }

    #[test]
    fn test_column_format() {
        assert_eq!(Column::new("V", 3).format(0.09), "0.090");
        assert_eq!(Column::new("mV", 1).format(-22.349), "-22.3");
        assert_eq!(Column::integer("T").format(57.8), "58");
    }

    #[test]
    fn test_column_decimals_bounded() {
        assert!(Column::new("V", MAX_DECIMALS).validate().is_ok());
        assert!(matches!(
            Column::new("V", MAX_DECIMALS + 1).validate(),
            Err(LabgenError::InvalidArgument(_))
        ));
        assert!(Column::new("V", u32::MAX).validate().is_err());
    }

    #[test]
    fn test_series_length_mismatch() {
        let err = Table::from_series(
            &Column::new("x", 1),
            &Column::new("y", 1),
            &[1.0, 2.0],
            &[1.0],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LabgenError::LengthMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_text_row_width_checked() {
        let headers = vec!["Laite".to_string(), "Virhe".to_string()];
        assert!(Table::from_text(headers.clone(), vec![vec!["a".to_string()]]).is_err());
        assert!(Table::from_text(headers, vec![vec!["a".to_string(), "b".to_string()]]).is_ok());
    }

    #[test]
    fn test_to_html_layout() {
        let table = Table::from_series(
            &Column::new("Ohjausvirta (mA)", 1),
            &Column::new("Hall-jännite <mV>", 1),
            &[-30.04, 0.0],
            &[-22.96, 0.25],
        )
        .unwrap();

        let html = table.to_html();
        assert!(html.starts_with("<table border=\"1\" class=\"dataframe\">\n"));
        assert!(html.contains("      <th>Hall-jännite &lt;mV&gt;</th>\n"));
        assert!(html.contains("      <th>1</th>\n      <td>-30.0</td>\n      <td>-23.0</td>\n"));
        assert!(html.contains("      <th>2</th>\n      <td>0.0</td>\n      <td>0.2</td>\n"));
        assert!(html.ends_with("  </tbody>\n</table>\n"));
    }
}
