use std::collections::BTreeMap;

use crate::types::DbId;

/// Field name -> violation message, one entry per failing field.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {}", summarize(.0))]
    Validation(FieldErrors),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a validation failure on a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), message.into());
        CoreError::Validation(errors)
    }
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_lists_every_field() {
        let mut errors = FieldErrors::new();
        errors.insert("title".into(), "title must not be blank".into());
        errors.insert("color".into(), "color must be at most 20 characters".into());

        let rendered = CoreError::Validation(errors).to_string();
        assert_eq!(
            rendered,
            "Validation failed: color: color must be at most 20 characters; \
             title: title must not be blank"
        );
    }

    #[test]
    fn not_found_display_names_entity_and_id() {
        let err = CoreError::NotFound { entity: "Card", id: 7 };
        assert_eq!(err.to_string(), "Entity not found: Card with id 7");
    }
}
