use doc_assistant::{
    config::Config,
    extract::{DocumentKind, extract_document, extract_text, mime_for_path, normalize},
};
use std::path::Path;

#[test]
fn maps_extensions_to_mime() {
    assert_eq!(mime_for_path(Path::new("a.pdf")), Some("application/pdf"));
    assert_eq!(mime_for_path(Path::new("a.TXT")), Some("text/plain"));
    assert_eq!(mime_for_path(Path::new("a.docx")), None);
    assert_eq!(mime_for_path(Path::new("noext")), None);
}

#[test]
fn rejects_unknown_mime() {
    let err = extract_text(b"hello", "application/msword").unwrap_err();
    assert!(err.to_string().contains("Unsupported file type"));
    assert!(DocumentKind::from_mime("image/png").is_err());
}

#[test]
fn plain_text_is_decoded_lossily() {
    let text = extract_text(b"caf\xc3\xa9 \xff ok", "text/plain").unwrap();
    assert!(text.starts_with("café"));
    assert!(text.ends_with("ok"));
}

#[test]
fn loads_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "First line   \r\nSecond line\r\n").unwrap();

    let doc = extract_document(&Config::default(), &path).unwrap();
    assert_eq!(doc.kind, DocumentKind::PlainText);
    assert_eq!(doc.text, "First line\nSecond line");
    assert_eq!(doc.fingerprint.len(), 64);
}

#[test]
fn rejects_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, "# hi").unwrap();

    let err = extract_document(&Config::default(), &path).unwrap_err();
    assert!(err.to_string().contains("Unsupported file type"));
}

#[test]
fn rejects_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.txt");
    std::fs::write(&path, "  \n\n ").unwrap();

    let err = extract_document(&Config::default(), &path).unwrap_err();
    assert!(err.to_string().contains("Failed to extract text"));
}

#[test]
fn rejects_oversized_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.txt");
    std::fs::write(&path, "0123456789").unwrap();

    let mut cfg = Config::default();
    cfg.document.max_file_bytes = 4;
    assert!(extract_document(&cfg, &path).is_err());
}

#[test]
fn invalid_pdf_is_an_extraction_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, "definitely not a pdf").unwrap();

    assert!(extract_document(&Config::default(), &path).is_err());
}

#[test]
fn normalization_can_be_disabled() {
    let mut cfg = Config::default();
    cfg.extraction.normalize_newlines = false;
    cfg.extraction.trim_trailing_whitespace = false;
    cfg.extraction.normalize_unicode = false;
    let raw = "ﬁne  \r\n".to_string();
    assert_eq!(normalize(&cfg, raw.clone()), raw);

    let cfg = Config::default();
    assert_eq!(normalize(&cfg, raw.clone()), "ﬁne");

    let mut cfg = Config::default();
    cfg.extraction.normalize_unicode = true;
    assert_eq!(normalize(&cfg, raw), "fine");
}

#[test]
fn default_keeps_compatibility_characters() {
    let cfg = Config::default();
    let raw = "x² = ½ of ①, ﬁnal".to_string();
    assert_eq!(normalize(&cfg, raw.clone()), raw);
}
