//! Study-document metadata: upload status, accepted formats and the seeded library.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Largest accepted upload: 50 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_TEXT: &str = "text/plain";

/// Declared MIME types accepted at intake.
pub const ALLOWED_MIME_TYPES: &[&str] = &[MIME_PDF, MIME_DOCX, MIME_DOC, MIME_TEXT];

pub fn is_allowed_mime(declared: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&declared)
}

/// Lifecycle status of an uploaded document.
///
/// Accepted files move `Uploading → Processing → Processed`; `Rejected` is
/// terminal and only ever set at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UploadStatus {
    Uploading,
    Processing,
    Processed,
    Rejected,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploading => "Uploading",
            Self::Processing => "Processing",
            Self::Processed => "Processed",
            Self::Rejected => "Rejected",
        }
    }

    /// The status that follows this one, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Uploading => Some(Self::Processing),
            Self::Processing => Some(Self::Processed),
            Self::Processed | Self::Rejected => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uploading" => Ok(Self::Uploading),
            "processing" => Ok(Self::Processing),
            "processed" => Ok(Self::Processed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseError::Status(s.to_string())),
        }
    }
}

/// A row in the session document library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub name: String,
    pub status: UploadStatus,
    /// Human-readable size, e.g. `15.2 MB`.
    pub size: String,
    /// `YYYY-MM-DD`.
    pub upload_date: String,
    /// Lowercased file extension.
    pub kind: String,
}

impl DocumentEntry {
    /// Sample documents present at session start, most recent first.
    pub fn seeded() -> Vec<DocumentEntry> {
        let entry = |name: &str, status, size: &str, date: &str| DocumentEntry {
            name: name.to_string(),
            status,
            size: size.to_string(),
            upload_date: date.to_string(),
            kind: file_extension(name),
        };
        vec![
            entry(
                "Physics_NCERT_Class_11.pdf",
                UploadStatus::Processed,
                "15.2 MB",
                "2024-09-20",
            ),
            entry(
                "Chemistry_Previous_Years.pdf",
                UploadStatus::Processing,
                "8.7 MB",
                "2024-09-25",
            ),
            entry(
                "Biology_Notes.docx",
                UploadStatus::Processed,
                "2.1 MB",
                "2024-09-18",
            ),
            entry(
                "Mathematics_Formulas.txt",
                UploadStatus::Processed,
                "245 KB",
                "2024-09-15",
            ),
        ]
    }
}

/// Lowercased extension after the last `.`, or the whole name if there is none.
pub fn file_extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_ascii_lowercase()
}

/// Guess a MIME type from a file name's extension.
pub fn mime_for_name(name: &str) -> Option<&'static str> {
    match file_extension(name).as_str() {
        "pdf" => Some(MIME_PDF),
        "docx" => Some(MIME_DOCX),
        "doc" => Some(MIME_DOC),
        "txt" => Some(MIME_TEXT),
        _ => None,
    }
}

/// Format a byte count with binary units and at most one decimal,
/// e.g. `245 KB`, `15.2 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = (bytes as f64 / scale as f64 * 10.0).round() / 10.0;
    if value.fract() == 0.0 {
        format!("{} {}", value as u64, UNITS[unit])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_sequence_moves_forward() {
        assert_eq!(UploadStatus::Uploading.next(), Some(UploadStatus::Processing));
        assert_eq!(UploadStatus::Processing.next(), Some(UploadStatus::Processed));
        assert!(UploadStatus::Processed.is_terminal());
        assert!(UploadStatus::Rejected.is_terminal());
        assert!(UploadStatus::Uploading < UploadStatus::Processed);
    }

    #[test]
    fn allowed_mime_types() {
        assert!(is_allowed_mime("application/pdf"));
        assert!(is_allowed_mime("text/plain"));
        assert!(is_allowed_mime(MIME_DOCX));
        assert!(!is_allowed_mime("image/png"));
        assert!(!is_allowed_mime("APPLICATION/PDF"));
    }

    #[test]
    fn file_size_formatting() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(250_880), "245 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(15_938_355), "15.2 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn extension_and_mime_guess() {
        assert_eq!(file_extension("Biology_Notes.DOCX"), "docx");
        assert_eq!(file_extension("README"), "readme");
        assert_eq!(mime_for_name("notes.pdf"), Some(MIME_PDF));
        assert_eq!(mime_for_name("photo.png"), None);
    }

    #[test]
    fn seeded_library_order() {
        let docs = DocumentEntry::seeded();
        assert_eq!(docs.len(), 4);
        assert_eq!(docs[0].name, "Physics_NCERT_Class_11.pdf");
        assert_eq!(docs[1].status, UploadStatus::Processing);
        assert_eq!(docs[3].kind, "txt");
    }

    #[test]
    fn status_parses() {
        assert_eq!(
            "processed".parse::<UploadStatus>().unwrap(),
            UploadStatus::Processed
        );
        assert!("done".parse::<UploadStatus>().is_err());
    }
}
