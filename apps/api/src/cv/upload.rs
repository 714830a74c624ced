//! Multipart parsing and request-scoped storage for CV uploads.
//!
//! An upload lives on disk only while its request is being handled:
//! `StoredUpload` owns a `NamedTempFile` inside `UPLOAD_DIR`, and the file is
//! unlinked when the guard is removed or dropped, including during a panic unwind.

use std::path::Path;

use anyhow::Context;
use axum::extract::multipart::{Multipart, MultipartError};
use tempfile::NamedTempFile;

use crate::errors::AppError;
use crate::extract::DocumentKind;

pub const CV_FILE_FIELD: &str = "cvFile";
pub const LANGUAGE_FIELD: &str = "language";
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub const NO_FILE_MESSAGE: &str = "No file uploaded.";
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Invalid file type. Only PDF and DOCX files are allowed.";
pub const TOO_LARGE_MESSAGE: &str = "File is too large. The maximum size is 5MB.";

#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub language: Option<String>,
}

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

fn malformed(err: MultipartError) -> AppError {
    AppError::InvalidInput(format!("Malformed upload: {}", err.body_text()))
}

/// Reads the `cvFile` and `language` fields. Other fields are ignored.
///
/// The file type is checked from the part's content type before any bytes are
/// buffered, and reading stops as soon as the size limit is crossed.
pub async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(mut field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(CV_FILE_FIELD) => {
                let file_name = field.file_name().map(str::to_owned);
                // Browsers send an empty, nameless part when no file was picked.
                if file_name.as_deref() == Some("") {
                    continue;
                }
                let kind = field
                    .content_type()
                    .and_then(DocumentKind::from_mime)
                    .ok_or_else(|| AppError::InvalidInput(UNSUPPORTED_TYPE_MESSAGE.to_string()))?;

                let mut bytes = Vec::new();
                while let Some(chunk) = field.chunk().await.map_err(malformed)? {
                    if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                        return Err(AppError::InvalidInput(TOO_LARGE_MESSAGE.to_string()));
                    }
                    bytes.extend_from_slice(&chunk);
                }

                form.file = (!bytes.is_empty()).then_some(UploadedFile {
                    file_name,
                    kind,
                    bytes,
                });
            }
            Some(LANGUAGE_FIELD) => {
                form.language = Some(field.text().await.map_err(malformed)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// An uploaded CV written to `UPLOAD_DIR` for the duration of one request.
#[derive(Debug)]
pub struct StoredUpload {
    file: NamedTempFile,
}

impl StoredUpload {
    pub async fn write(dir: &Path, upload: &UploadedFile) -> Result<Self, AppError> {
        let file = tempfile::Builder::new()
            .prefix("cv-")
            .suffix(upload.kind.extension())
            .tempfile_in(dir)
            .with_context(|| format!("failed to create upload file in {}", dir.display()))?;

        tokio::fs::write(file.path(), &upload.bytes)
            .await
            .with_context(|| format!("failed to write upload to {}", file.path().display()))?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Deletes the file now and reports failures instead of ignoring them on drop.
    pub fn remove(self) -> std::io::Result<()> {
        self.file.close()
    }
}
