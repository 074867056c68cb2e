use thiserror::Error;

/// Failures of a single generation or evaluation step.
///
/// None of these are fatal: the session keeps everything produced by
/// earlier stages and the user may retry the step that failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TutorError {
    #[error("Please fill in: {}", .0.join(", "))]
    Validation(Vec<&'static str>),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Could not understand the model's answer: {0}")]
    Format(String),
}

impl TutorError {
    pub fn format(message: impl Into<String>) -> Self {
        TutorError::Format(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_lists_missing_fields() {
        let err = TutorError::Validation(vec!["Subject", "Topic"]);
        assert_eq!(err.to_string(), "Please fill in: Subject, Topic");
    }

    #[test]
    fn test_transport_message() {
        let err = TutorError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
