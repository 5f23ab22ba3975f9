use std::fmt;

/// Error type for Cloud Foundry client operations
#[derive(Debug)]
pub enum CfError {
    /// No HTTP response was obtained (DNS, TLS, connect, timeout)
    Connectivity(reqwest::Error),
    /// The token endpoint rejected a password or refresh grant
    Authentication {
        status: Option<u16>,
        message: String,
    },
    /// A resource endpoint answered with a non-2xx status
    InvalidStatusCode { status: u16, body: String },
    /// A resource endpoint answered 404, or a name did not resolve
    NotFound(String),
    /// A name was given for a domain that only accepts guids
    UnsupportedLookup { domain: String },
    /// Credentials were used before any initialization
    NotInitialized,
    /// Creation or deletion attempted on a domain that does not allow it
    UnsupportedOperation { domain: String, operation: String },
    /// A list filter the domain does not declare
    UnsupportedFilter { domain: String, field: String },
    /// JSON parsing error
    Json(String),
    /// Configuration error
    Config(String),
    /// Failed to read, write or restore the persisted session
    Session(String),
}

impl CfError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            CfError::InvalidStatusCode { status, .. } => Some(*status),
            CfError::NotFound(_) => Some(404),
            CfError::Authentication { status, .. } => *status,
            _ => None,
        }
    }

    /// True for failures where no HTTP response was obtained
    pub fn is_connectivity(&self) -> bool {
        matches!(self, CfError::Connectivity(_))
    }
}

impl fmt::Display for CfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CfError::Connectivity(e) => write!(f, "Connection failed: {}", e),
            CfError::Authentication {
                status: Some(status),
                message,
            } => write!(f, "Authentication failed (status {}): {}", status, message),
            CfError::Authentication {
                status: None,
                message,
            } => write!(f, "Authentication failed: {}", message),
            CfError::InvalidStatusCode { status, body } => {
                if body.is_empty() {
                    write!(f, "Invalid status code {}", status)
                } else {
                    write!(f, "Invalid status code {}: {}", status, body)
                }
            }
            CfError::NotFound(what) => write!(f, "{} not found", what),
            CfError::UnsupportedLookup { domain } => {
                write!(f, "{} does not allow retrieval by name, use a guid", domain)
            }
            CfError::NotInitialized => write!(
                f,
                "Credentials are not initialized (log in or restore a session first)"
            ),
            CfError::UnsupportedOperation { domain, operation } => {
                write!(f, "{} does not support {}", domain, operation)
            }
            CfError::UnsupportedFilter { domain, field } => {
                write!(f, "{} cannot be filtered by '{}'", domain, field)
            }
            CfError::Json(msg) => write!(f, "JSON error: {}", msg),
            CfError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CfError::Session(msg) => write!(f, "Session error: {}", msg),
        }
    }
}

impl std::error::Error for CfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CfError::Connectivity(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CfError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CfError::Json(err.to_string())
        } else if err.is_builder() {
            // Nothing was sent; the request itself could not be built
            CfError::Config(format!("Invalid request: {}", err))
        } else {
            CfError::Connectivity(err)
        }
    }
}

impl From<serde_json::Error> for CfError {
    fn from(err: serde_json::Error) -> Self {
        CfError::Json(err.to_string())
    }
}

impl From<std::io::Error> for CfError {
    fn from(err: std::io::Error) -> Self {
        CfError::Session(err.to_string())
    }
}

/// Result type alias for Cloud Foundry operations
pub type Result<T> = std::result::Result<T, CfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_status_display() {
        let err = CfError::InvalidStatusCode {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_invalid_status_display_empty_body() {
        let err = CfError::InvalidStatusCode {
            status: 502,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Invalid status code 502");
    }

    #[test]
    fn test_not_found_status() {
        let err = CfError::NotFound("application with name 'x'".to_string());
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_authentication_display() {
        let err = CfError::Authentication {
            status: Some(401),
            message: "Bad credentials".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Bad credentials"));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_contract_errors_have_no_status() {
        assert!(CfError::NotInitialized.status().is_none());
        let err = CfError::UnsupportedLookup {
            domain: "service_plan".to_string(),
        };
        assert!(err.status().is_none());
        assert!(err.to_string().contains("service_plan"));
    }

    #[test]
    fn test_unsupported_filter_display() {
        let err = CfError::UnsupportedFilter {
            domain: "space".to_string(),
            field: "label".to_string(),
        };
        assert!(err.to_string().contains("space"));
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CfError>();
    }

    #[test]
    fn test_from_reqwest_builder_error() {
        let builder_err = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        assert!(builder_err.is_builder());

        let err: CfError = builder_err.into();
        assert!(!err.is_connectivity());
        match err {
            CfError::Config(msg) => assert!(msg.contains("Invalid request")),
            other => panic!("Expected CfError::Config, got {:?}", other),
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: CfError = json_err.into();
        match err {
            CfError::Json(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected CfError::Json"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CfError = io_err.into();
        match err {
            CfError::Session(msg) => assert!(msg.contains("file not found")),
            _ => panic!("Expected CfError::Session"),
        }
    }
}
