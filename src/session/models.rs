//! Persisted session data model

use serde::{Deserialize, Serialize};

/// What a restart needs to resume without logging in again
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// API endpoint the tokens were issued for
    pub target_endpoint: String,
    #[serde(default)]
    pub skip_ssl_verification: bool,
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_field_names() {
        let session = Session {
            target_endpoint: "https://api.example.com".to_string(),
            skip_ssl_verification: true,
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
        };
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["target_endpoint"], "https://api.example.com");
        assert_eq!(value["skip_ssl_verification"], true);
        assert_eq!(value["access_token"], "at");
        assert_eq!(value["refresh_token"], "rt");
    }

    #[test]
    fn test_skip_ssl_defaults_to_false() {
        let session: Session = serde_json::from_str(
            r#"{"target_endpoint": "https://api.example.com", "access_token": "a", "refresh_token": "r"}"#,
        )
        .unwrap();
        assert!(!session.skip_ssl_verification);
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let result: Result<Session, _> =
            serde_json::from_str(r#"{"target_endpoint": "https://api.example.com"}"#);
        assert!(result.is_err());
    }
}
