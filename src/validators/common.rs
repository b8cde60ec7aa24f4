//! Common validation utilities and helpers.

use log::warn;
use validator::ValidationErrors;

use crate::constants::ERR_NAME_AND_EMAIL_REQUIRED;
use crate::errors::ApiError;

/// Convert validator errors on a user payload into the fixed bad request
/// response.
///
/// The per-field messages are logged; clients only ever see the single
/// required-fields message.
///
/// # Example
/// ```ignore
/// body.validate().map_err(required_fields_error)?;
/// ```
pub fn required_fields_error(e: ValidationErrors) -> ApiError {
    let errors: Vec<String> = e
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| {
            errs.iter()
                .map(|e| e.message.clone().unwrap_or_default().to_string())
        })
        .collect();
    warn!("Rejected user payload: {:?}", errors);
    ApiError::BadRequest(ERR_NAME_AND_EMAIL_REQUIRED.to_string())
}
