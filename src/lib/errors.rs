use std::fmt;

/// Transport-level failures surfaced by the HTTP helpers. Setup failures
/// (request encoding, abort-controller initialization) fold into
/// `Serialization` and `Network`; the flow maps all of these to its own
/// user-facing copy.
#[derive(Clone, Debug)]
pub enum AppError {
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Serialization(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn display_prefixes_each_variant() {
        assert_eq!(
            AppError::Network("connection refused".to_string()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(
            AppError::Timeout("Request timed out. Please try again.".to_string()).to_string(),
            "Timeout: Request timed out. Please try again."
        );
        assert_eq!(
            AppError::Http {
                status: 502,
                message: "bad gateway".to_string(),
            }
            .to_string(),
            "Request failed (502): bad gateway"
        );
        assert_eq!(
            AppError::Serialization("invalid payload".to_string()).to_string(),
            "Request error: invalid payload"
        );
    }
}
