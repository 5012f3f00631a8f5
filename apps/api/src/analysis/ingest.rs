//! Converts an uploaded resume file into the request input variant.
//!
//! Supported formats are an explicit allow-list: `.txt` and `.md` are read
//! as UTF-8 text, `.pdf` is forwarded to the provider as inline base64.
//! Anything else is rejected up front rather than guessed at as text.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::analysis::request::ResumeInput;
use crate::errors::AppError;

const PDF_MIME: &str = "application/pdf";

pub fn resume_input_from_upload(
    filename: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<ResumeInput, AppError> {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let is_pdf = extension.as_deref() == Some("pdf") || content_type == Some(PDF_MIME);
    let is_text = matches!(extension.as_deref(), Some("txt") | Some("md"))
        || content_type.is_some_and(|ct| ct.starts_with("text/"));

    if is_pdf {
        return Ok(ResumeInput::Document {
            data: BASE64.encode(bytes),
            mime_type: PDF_MIME.to_string(),
        });
    }

    if is_text {
        let text = String::from_utf8(bytes.to_vec()).map_err(|_| {
            AppError::Validation(format!("'{filename}' is not valid UTF-8 text"))
        })?;
        return Ok(ResumeInput::Text(text));
    }

    Err(AppError::Validation(format!(
        "Unsupported resume format '{filename}'. Upload a .txt, .md, or .pdf file."
    )))
}
