//! Error types for the Auto Scaling adapter.

use aws_sdk_autoscaling::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

use crate::retry::RetryError;

/// Result type alias for adapter operations.
pub type AsgResult<T> = Result<T, AsgError>;

/// Errors surfaced by the Auto Scaling adapter.
#[derive(Debug, Error)]
pub enum AsgError {
    /// The provider rejected the call for a reason other than throttling.
    /// The provider's error code and message are preserved.
    #[error("{operation}: {message}")]
    Api {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    /// Every attempt was throttled and the retry policy gave up.
    #[error("{operation}: still throttled after {attempts} attempts: {message}")]
    Throttled {
        operation: &'static str,
        attempts: u32,
        message: String,
    },
}

impl AsgError {
    /// Lift a retried SDK call's failure into an adapter error.
    pub(crate) fn from_sdk<E, R>(
        operation: &'static str,
        err: RetryError<SdkError<E, R>>,
    ) -> Self
    where
        E: ProvideErrorMetadata,
        SdkError<E, R>: std::error::Error,
    {
        match err {
            RetryError::Exhausted { attempts, source } => AsgError::Throttled {
                operation,
                attempts,
                message: render(&source),
            },
            RetryError::Fatal(source) => AsgError::Api {
                operation,
                code: source.code().map(str::to_owned),
                message: render(&source),
            },
        }
    }

    /// The operation the error came from.
    pub fn operation(&self) -> &'static str {
        match self {
            AsgError::Api { operation, .. } | AsgError::Throttled { operation, .. } => operation,
        }
    }
}

/// Prefer the provider's message; fall back to the full error chain.
fn render<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata,
    SdkError<E, R>: std::error::Error,
{
    match err.message() {
        Some(message) => message.to_owned(),
        None => format!("{}", DisplayErrorContext(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_names_the_operation() {
        let err = AsgError::Api {
            operation: "attach-load-balancers",
            code: Some("ValidationError".to_string()),
            message: "group not found".to_string(),
        };
        assert_eq!(err.to_string(), "attach-load-balancers: group not found");
        assert_eq!(err.operation(), "attach-load-balancers");
    }

    #[test]
    fn throttled_error_display_includes_attempts() {
        let err = AsgError::Throttled {
            operation: "describe-auto-scaling-groups",
            attempts: 8,
            message: "Rate exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "describe-auto-scaling-groups: still throttled after 8 attempts: Rate exceeded"
        );
    }
}
