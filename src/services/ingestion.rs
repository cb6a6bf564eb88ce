//! Converts uploaded files into classified plain-text documents.
//!
//! A file is treated as the resume if its lowercased name contains "resume",
//! and as the job description if it contains "job" or "jd". Anything else is
//! ignored, and the caller reports the corrective message when both roles do
//! not end up populated.

use tracing::warn;

use crate::error::AppError;

pub const MAX_FILES: usize = 2;
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// Fixed corrective message shown when classification fails.
pub const CLASSIFICATION_HINT: &str =
    "Please make sure one file is named with 'resume' and the other with 'job' or 'jd'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    JobDescription,
}

pub fn classify_filename(name: &str) -> Option<DocumentKind> {
    let lower = name.to_lowercase();
    if lower.contains("resume") {
        Some(DocumentKind::Resume)
    } else if lower.contains("job") || lower.contains("jd") {
        Some(DocumentKind::JobDescription)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct IngestedDocuments {
    pub resume_text: Option<String>,
    pub jd_text: Option<String>,
}

impl IngestedDocuments {
    /// Both texts, but only when both roles were classified and yielded
    /// non-empty content. Mirrors the retry contract: anything less sends
    /// the user the corrective message.
    pub fn into_texts(self) -> Option<(String, String)> {
        match (self.resume_text, self.jd_text) {
            (Some(resume), Some(jd)) if !resume.is_empty() && !jd.is_empty() => {
                Some((resume, jd))
            }
            _ => None,
        }
    }
}

/// Extract and classify every uploaded file.
pub fn ingest(files: &[UploadedFile]) -> Result<IngestedDocuments, AppError> {
    let mut docs = IngestedDocuments::default();
    for file in files {
        let Some(kind) = classify_filename(&file.name) else {
            continue;
        };
        let text = extract_text(&file.name, &file.bytes)?;
        match kind {
            DocumentKind::Resume => docs.resume_text = Some(text),
            DocumentKind::JobDescription => docs.jd_text = Some(text),
        }
    }
    Ok(docs)
}

/// Plain-text extraction: PDFs go through lopdf, everything else is UTF-8.
pub fn extract_text(name: &str, bytes: &[u8]) -> Result<String, AppError> {
    if name.to_lowercase().ends_with(".pdf") {
        extract_text_from_pdf(bytes)
    } else {
        String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::BadRequest(format!("'{name}' is not valid UTF-8 text")))
    }
}

/// Page-ordered text extraction. Pages that yield no text (or fail to
/// decode) are skipped, so a PDF with no extractable text yields an empty
/// string rather than an error.
fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, AppError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| AppError::BadRequest(format!("could not read PDF: {e}")))?;

    let mut pages_text = Vec::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(text) => {
                let text = text.trim_end().to_string();
                if !text.is_empty() {
                    pages_text.push(text);
                }
            }
            Err(e) => warn!("skipping page {page_num}: {e}"),
        }
    }
    Ok(pages_text.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt(name: &str, content: &str) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            bytes: content.as_bytes().to_vec(),
        }
    }

    /// A structurally valid PDF with a single page and no text content.
    fn empty_pdf_bytes() -> Vec<u8> {
        use printpdf::{Mm, PdfDocument};
        let (doc, _page, _layer) = PdfDocument::new("Empty", Mm(210.0), Mm(297.0), "Layer 1");
        let mut buf = std::io::BufWriter::new(Vec::new());
        doc.save(&mut buf).unwrap();
        buf.into_inner().unwrap()
    }

    #[test]
    fn classifies_by_filename_substring() {
        assert_eq!(classify_filename("My_Resume.pdf"), Some(DocumentKind::Resume));
        assert_eq!(
            classify_filename("job_description.txt"),
            Some(DocumentKind::JobDescription)
        );
        assert_eq!(classify_filename("JD.txt"), Some(DocumentKind::JobDescription));
        assert_eq!(classify_filename("a.pdf"), None);
        assert_eq!(classify_filename("notes.txt"), None);
    }

    #[test]
    fn plain_text_is_decoded_as_utf8() {
        let text = extract_text("resume.txt", "Experienced backend engineer".as_bytes()).unwrap();
        assert_eq!(text, "Experienced backend engineer");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = extract_text("resume.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn pdf_without_extractable_text_yields_empty_string() {
        let bytes = empty_pdf_bytes();
        let text = extract_text("empty_resume.pdf", &bytes).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn ingest_populates_both_roles_for_well_named_files() {
        let files = vec![
            txt("resume.txt", "Experienced backend engineer..."),
            txt("job_description.txt", "Seeking Go developer..."),
        ];
        let (resume, jd) = ingest(&files).unwrap().into_texts().unwrap();
        assert_eq!(resume, "Experienced backend engineer...");
        assert_eq!(jd, "Seeking Go developer...");
    }

    #[test]
    fn ingest_fails_classification_for_unrelated_names() {
        let files = vec![txt("a.txt", "text a"), txt("b.txt", "text b")];
        assert!(ingest(&files).unwrap().into_texts().is_none());
    }

    #[test]
    fn ingest_fails_classification_when_one_role_missing() {
        let files = vec![txt("resume.txt", "Experienced backend engineer...")];
        assert!(ingest(&files).unwrap().into_texts().is_none());
    }

    #[test]
    fn empty_extracted_text_counts_as_missing() {
        let files = vec![
            UploadedFile {
                name: "resume.pdf".to_string(),
                bytes: empty_pdf_bytes(),
            },
            txt("jd.txt", "Seeking Go developer..."),
        ];
        assert!(ingest(&files).unwrap().into_texts().is_none());
    }
}
