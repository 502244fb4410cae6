use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::info;

use super::table::Table;
use crate::LabgenError;

/// Escape text for use in HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// One piece of the report, in document order
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// `<h1>`..`<h6>`; the level is clamped into that range
    Heading { level: u8, text: String },
    /// Full-width image
    Figure { src: String, alt: String },
    Table(Table),
    /// Inserted verbatim
    Raw(String),
}

impl Fragment {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Fragment::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Fragment::Heading { level, text } => {
                let level = (*level).clamp(1, 6);
                format!("<h{level}>{}</h{level}>\n", escape(text))
            }
            Fragment::Figure { src, alt } => format!(
                "<figure>\n  <img src=\"{}\" alt=\"{}\" style=\"width:100%\">\n</figure>\n",
                escape(src),
                escape(alt)
            ),
            Fragment::Table(table) => table.to_html(),
            Fragment::Raw(raw) => raw.clone(),
        }
    }
}

/// Ordered collection of report fragments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fragments: Vec<Fragment>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn render(&self) -> String {
        self.fragments.iter().map(Fragment::render).collect()
    }

    /// Append the rendered document to `path`, creating the file if needed
    ///
    /// Existing content is kept; repeated runs accumulate reports in one file.
    pub fn append_to(&self, path: &Path) -> Result<(), LabgenError> {
        let rendered = self.render();
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(rendered.as_bytes())?;
        file.flush()?;

        info!(
            path = %path.display(),
            bytes = rendered.len(),
            fragments = self.fragments.len(),
            "report appended"
        );
        Ok(())
    }
}
