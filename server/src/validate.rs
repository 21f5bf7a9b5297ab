use actix_web::web::{JsonConfig, QueryConfig};
use validator::{Validate, ValidationErrors};

use errors::Error;

fn collect_errors(errors: ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors.iter() {
            let message = match err.message {
                Some(ref message) => message.to_string(),
                None => format!("{} is invalid", field),
            };
            messages.push(message);
        }
    }
    messages.sort();

    messages
}

pub fn validate<T>(params: &T) -> Result<(), Error>
where
    T: Validate,
{
    params
        .validate()
        .map_err(|err| Error::ValidationError(collect_errors(err)))
}

/// Malformed query strings (unknown enum values, non-boolean flags) are
/// reported in the same shape as any other validation failure.
pub fn query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|err, req| {
        warn!("Rejected query for {} - {}", req.path(), err);
        Error::ValidationError(vec![err.to_string()]).into()
    })
}

pub fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, req| {
        warn!("Rejected body for {} - {}", req.path(), err);
        Error::ValidationError(vec![err.to_string()]).into()
    })
}
