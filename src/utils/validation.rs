use crate::error::{Error, Result};
use validator::Validate;

/// Runs the derive-generated checks and flattens the first failure into
/// a field-prefixed `Validation` error, so the response body carries a
/// readable message instead of the raw error map.
pub fn validate<T: Validate>(payload: &T) -> Result<()> {
    payload.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| match &error.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: invalid value", field),
                })
            })
            .next()
            .unwrap_or_else(|| "invalid payload".to_string());
        Error::Validation(message)
    })
}
