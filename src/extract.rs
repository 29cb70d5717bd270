use crate::{config::Config, util::sha256_hex};
use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use unicode_normalization::UnicodeNormalization;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_TEXT: &str = "text/plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    pub fn from_mime(mime: &str) -> Result<Self> {
        match mime {
            MIME_PDF => Ok(DocumentKind::Pdf),
            MIME_TEXT => Ok(DocumentKind::PlainText),
            other => Err(anyhow!("Unsupported file type: {other}")),
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => MIME_PDF,
            DocumentKind::PlainText => MIME_TEXT,
        }
    }
}

/// Extracted text of one loaded file. Never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub text: String,
    pub fingerprint: String,
}

impl Document {
    pub fn from_text(path: impl Into<PathBuf>, kind: DocumentKind, text: String) -> Self {
        let fingerprint = sha256_hex(text.as_bytes());
        Self {
            path: path.into(),
            kind,
            text,
            fingerprint,
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(MIME_PDF),
        "txt" => Some(MIME_TEXT),
        _ => None,
    }
}

pub fn extract_text(bytes: &[u8], mime: &str) -> Result<String> {
    match DocumentKind::from_mime(mime)? {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).context("Failed to extract text from PDF")
        }
        DocumentKind::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

pub fn extract_document(cfg: &Config, path: &Path) -> Result<Document> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    if !cfg.is_supported_extension(ext) {
        bail!(
            "Unsupported file type: {} (supported: {})",
            path.display(),
            cfg.document.supported_extensions.join(", ")
        );
    }
    let mime = mime_for_path(path)
        .ok_or_else(|| anyhow!("Unsupported file type: {}", path.display()))?;

    let meta = std::fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    if meta.len() > cfg.document.max_file_bytes {
        bail!(
            "input exceeds max_file_bytes: {} > {}",
            meta.len(),
            cfg.document.max_file_bytes
        );
    }

    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let raw = extract_text(&bytes, mime)
        .with_context(|| format!("Error processing file: {}", path.display()))?;
    let text = normalize(cfg, raw);

    if text.trim().is_empty() {
        warn!("no text extracted from {}", path.display());
        bail!("Failed to extract text from document");
    }

    let doc = Document::from_text(path, DocumentKind::from_mime(mime)?, text);
    info!(
        "extracted {} chars from {} kind={:?} fingerprint={}",
        doc.char_count(),
        path.display(),
        doc.kind,
        &doc.fingerprint[..12]
    );
    Ok(doc)
}

pub fn normalize(cfg: &Config, text: String) -> String {
    let mut s = text;

    if cfg.extraction.normalize_newlines {
        s = s.replace("\r\n", "\n");
    }

    if cfg.extraction.normalize_unicode {
        s = s.nfkc().collect::<String>();
    }

    if cfg.extraction.trim_trailing_whitespace {
        s = s
            .lines()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n");
    }

    s
}
