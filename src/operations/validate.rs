//! JSON validation gate for rendered documents

use crate::error::GenError;
use crate::operations::render::RenderedDocument;
use tracing::{debug, error};

/// Check that a rendered document parses as JSON
///
/// # Errors
///
/// Returns an error if:
/// - The document is not well-formed JSON
#[inline]
pub fn validate(document: &RenderedDocument) -> Result<(), GenError> {
    let kind = document.kind;
    match serde_json::from_str::<serde_json::Value>(&document.json) {
        Ok(_) => {
            debug!(document = %kind, json = %document.json, "JSON is valid");
            Ok(())
        }
        Err(err) => {
            error!(document = %kind, error = %err, json = %document.json, "Invalid {kind} JSON");
            Err(GenError::validation(format!(
                "Invalid {kind} JSON at line {}, column {}: {err}",
                err.line(),
                err.column()
            )))
        }
    }
}

/// Validate every document, reporting each failure before giving up
///
/// # Errors
///
/// Returns an error if:
/// - Any document is not well-formed JSON
#[inline]
pub fn validate_all(documents: &[RenderedDocument]) -> Result<(), GenError> {
    let invalid: Vec<String> = documents
        .iter()
        .filter(|document| validate(document).is_err())
        .map(|document| document.kind.to_string())
        .collect();

    if invalid.is_empty() {
        return Ok(());
    }

    Err(GenError::validation(format!(
        "Cannot continue until the JSON errors are resolved (invalid: {})",
        invalid.join(", ")
    )))
}
