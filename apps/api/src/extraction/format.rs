use std::fmt;
use std::path::Path;

/// Upload formats the extractor understands, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Case-insensitive extension lookup. `None` for anything but `.pdf` / `.docx`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => f.write_str("PDF"),
            DocumentFormat::Docx => f.write_str("DOCX"),
        }
    }
}
