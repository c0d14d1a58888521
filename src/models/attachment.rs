// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Payment screenshot attachment model and validation helpers (UI-agnostic).

use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose};
use thiserror::Error;

/// Largest accepted upload in bytes (5 MiB).
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// MIME types accepted for the payment screenshot.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/jpg"];

/// Why a selected file cannot be used as the screenshot.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FileRejection {
    #[error("Please upload a valid image file (JPG, PNG, or GIF)")]
    InvalidType,
    #[error("File size must be less than 5MB")]
    TooLarge,
}

/// The single file picked or dropped onto the upload area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileAttachment {
    /// Where the file was picked from.
    pub path: PathBuf,
    /// Original filename.
    pub name: String,
    /// Declared MIME type.
    pub mime: String,
    /// Size in bytes at selection time.
    pub size: u64,
    /// `data:` URL filled in once the preview read completes.
    pub data_url: Option<String>,
}

impl FileAttachment {
    pub fn new(path: PathBuf, mime: String, size: u64) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "screenshot".to_string());
        Self {
            path,
            name,
            mime,
            size,
            data_url: None,
        }
    }

    /// Run the type/size constraints against this attachment.
    pub fn validate(&self) -> Result<(), FileRejection> {
        validate_file(&self.mime, self.size)
    }
}

/// Check a file's declared MIME type and size against upload limits.
///
/// The type check runs first, so an oversized PDF reports the type problem.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_file("image/png", 1024).is_ok());
/// assert_eq!(validate_file("application/pdf", 1024), Err(FileRejection::InvalidType));
/// ```
pub fn validate_file(mime: &str, size: u64) -> Result<(), FileRejection> {
    if !ALLOWED_IMAGE_TYPES.contains(&mime) {
        return Err(FileRejection::InvalidType);
    }
    if size > MAX_FILE_SIZE {
        return Err(FileRejection::TooLarge);
    }
    Ok(())
}

/// Guess the declared MIME type of a file from its name.
pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Encode raw bytes as a `data:<mime>;base64,<payload>` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime};base64,{}",
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Drop the `data:...;base64,` prefix, keeping only the payload.
///
/// Input without a comma is returned unchanged.
pub fn strip_data_url_prefix(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map(|(_, payload)| payload)
        .unwrap_or(data_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_png_is_accepted() {
        assert_eq!(validate_file("image/png", 1024), Ok(()));
        assert_eq!(validate_file("image/jpg", MAX_FILE_SIZE), Ok(()));
    }

    #[test]
    fn non_image_is_rejected() {
        assert_eq!(
            validate_file("application/pdf", 1024),
            Err(FileRejection::InvalidType)
        );
        assert_eq!(
            validate_file("image/webp", 1024),
            Err(FileRejection::InvalidType)
        );
    }

    #[test]
    fn oversized_image_is_rejected() {
        let err = validate_file("image/png", 6 * 1024 * 1024).unwrap_err();
        assert_eq!(err, FileRejection::TooLarge);
        assert_eq!(err.to_string(), "File size must be less than 5MB");
    }

    #[test]
    fn attachment_name_comes_from_path() {
        let att = FileAttachment::new(PathBuf::from("/tmp/pay/receipt.PNG"), "image/png".into(), 10);
        assert_eq!(att.name, "receipt.PNG");
        assert!(att.data_url.is_none());
        assert!(att.validate().is_ok());
    }

    #[test]
    fn mime_is_guessed_from_extension() {
        assert_eq!(guess_mime(Path::new("shot.jpeg")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("shot.gif")), "image/gif");
        assert_eq!(guess_mime(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let url = encode_data_url("image/png", b"hi");
        assert_eq!(url, "data:image/png;base64,aGk=");
        assert_eq!(strip_data_url_prefix(&url), "aGk=");
        assert_eq!(strip_data_url_prefix("aGk="), "aGk=");
    }
}
