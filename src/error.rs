//! Error types for marketgen.
//!
//! Uses thiserror for derive macros. The two generation errors
//! (`TemplateNotFound`, `InvalidAttestationTime`) are terminal: generation is
//! deterministic, so retrying identical input reproduces the identical failure.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for marketgen operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// No template with the requested id exists in the catalog.
    #[error("template '{0}' not found")]
    TemplateNotFound(String),

    /// The attestation time was missing or could not be parsed as an instant.
    #[error("invalid attestation time: {0}")]
    InvalidAttestationTime(String),

    /// Strict mode only: a placeholder had no value in the binding context.
    #[error("unresolved placeholder '{token}' in {field}")]
    UnresolvedPlaceholder {
        /// The literal token, braces included (e.g. `{{coinId}}`).
        token: String,
        /// The field the token appeared in (e.g. `dataSources[1].endpoint`).
        field: String,
    },

    /// The catalog could not be built, loaded, or failed its consistency check.
    #[error("catalog error: {0}")]
    CatalogError(String),

    /// Invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),
}

impl MarketError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MarketError::TemplateNotFound(_) => exit_codes::NOT_FOUND,
            MarketError::InvalidAttestationTime(_) => exit_codes::BAD_REQUEST,
            MarketError::UnresolvedPlaceholder { .. } => exit_codes::BAD_REQUEST,
            MarketError::CatalogError(_) => exit_codes::CATALOG_FAILURE,
            MarketError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for marketgen operations.
pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_not_found_is_not_found_class() {
        let err = MarketError::TemplateNotFound("nope".to_string());
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
    }

    #[test]
    fn request_errors_are_bad_request_class() {
        let err = MarketError::InvalidAttestationTime("missing".to_string());
        assert_eq!(err.exit_code(), exit_codes::BAD_REQUEST);

        let err = MarketError::UnresolvedPlaceholder {
            token: "{{coinId}}".to_string(),
            field: "question".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::BAD_REQUEST);
    }

    #[test]
    fn catalog_and_user_errors_have_correct_exit_codes() {
        let err = MarketError::CatalogError("duplicate id".to_string());
        assert_eq!(err.exit_code(), exit_codes::CATALOG_FAILURE);

        let err = MarketError::UserError("bad flag".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = MarketError::TemplateNotFound("does-not-exist".to_string());
        assert_eq!(err.to_string(), "template 'does-not-exist' not found");

        let err = MarketError::UnresolvedPlaceholder {
            token: "{{coinId}}".to_string(),
            field: "dataSources[0].endpoint".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unresolved placeholder '{{coinId}}' in dataSources[0].endpoint"
        );
    }
}
