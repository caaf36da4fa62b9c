use thiserror::Error;

pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Remote failure: {0}")]
    RemoteFailure(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Text shown to the user in an error toast.
    ///
    /// Server-provided messages pass through; transport and configuration
    /// failures collapse to a generic line.
    pub fn toast_message(&self) -> String {
        match self {
            AppError::RemoteFailure(msg)
            | AppError::NotAuthorized(msg)
            | AppError::InvalidState(msg)
            | AppError::Validation(msg)
                if !msg.trim().is_empty() =>
            {
                msg.clone()
            }
            AppError::MissingParameter(name) => format!("Missing {}", name),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_message_prefers_server_text() {
        let err = AppError::RemoteFailure("Class is in use".to_string());
        assert_eq!(err.toast_message(), "Class is in use");
    }

    #[test]
    fn test_toast_message_falls_back_when_blank() {
        let err = AppError::RemoteFailure("   ".to_string());
        assert_eq!(err.toast_message(), GENERIC_FAILURE_MESSAGE);

        let err = AppError::Config("PLAN_API_BASE_URL is not set".to_string());
        assert_eq!(err.toast_message(), GENERIC_FAILURE_MESSAGE);
    }
}
