//! Upload validation: filename and extension gate, content type inference.

use crate::AppError;

/// Lower-cased extension of the final path component, including the leading dot.
///
/// Returns `None` when the name has no suffix. A leading dot alone (`.mp4`) marks a
/// hidden file rather than an extension, and a trailing dot yields no suffix.
pub fn file_extension(filename: &str) -> Option<String> {
    let name = filename.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(filename);
    let dot = name.rfind('.')?;
    if dot == 0 || dot + 1 == name.len() {
        return None;
    }
    Some(name[dot..].to_lowercase())
}

/// Whether `extension` is a dot followed by ASCII alphanumerics only.
///
/// Both the allow list in the configuration and stored blob names obey this rule.
pub fn is_valid_extension(extension: &str) -> bool {
    match extension.strip_prefix('.') {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()),
        None => false,
    }
}

/// Check a client-supplied filename against the extension allow list.
///
/// Returns the normalized extension to use for the stored blob.
pub fn validate_clip_filename(
    filename: Option<&str>,
    allowed_extensions: &[String],
) -> Result<String, AppError> {
    let filename = match filename {
        Some(name) if !name.is_empty() => name,
        _ => return Err(AppError::InvalidInput("No file selected".to_string())),
    };

    match file_extension(filename) {
        Some(ext) if allowed_extensions.iter().any(|a| a.eq_ignore_ascii_case(&ext)) => Ok(ext),
        _ => Err(AppError::InvalidInput(format!(
            "Invalid file type. Allowed: {}",
            allowed_extensions.join(", ")
        ))),
    }
}

/// MIME type served for a stored clip, inferred from its extension.
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        ".mp4" => "video/mp4",
        ".mov" => "video/quicktime",
        ".avi" => "video/x-msvideo",
        ".mkv" => "video/x-matroska",
        ".webm" => "video/webm",
        _ => "application/octet-stream",
    }
}
