/// Configuration constants for the Cloud Foundry v2 API
pub mod api {
    /// Discovery endpoint, relative to the target
    pub const INFO_PATH: &str = "/v2/info";

    /// Token path, relative to the token endpoint advertised by discovery
    pub const OAUTH_TOKEN_PATH: &str = "/oauth/token";

    /// Page size requested for collection endpoints
    pub const RESULTS_PER_PAGE: u32 = 100;
}

/// Configuration constants for OAuth2 credentials
pub mod credentials {
    /// Client ID used by the stock `cf` CLI
    pub const DEFAULT_CLIENT_ID: &str = "cf";

    /// The `cf` client has an empty secret
    pub const DEFAULT_CLIENT_SECRET: &str = "";
}

/// Configuration constants for the persisted session
pub mod session {
    /// Directory name under HOME
    pub const DIR_NAME: &str = ".cfctl";

    /// Session file name
    pub const FILE_NAME: &str = "session.json";

    /// Environment variable overriding the session file path
    pub const ENV_VAR: &str = "CFCTL_SESSION_FILE";
}

/// Configuration constants for the HTTP transport
pub mod transport {
    /// TCP connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Whole-request timeout in seconds (token exchanges included)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Environment variable for the target endpoint
    pub const TARGET_ENV_VAR: &str = "CF_TARGET";

    /// Environment variable for the proxy URL
    pub const PROXY_ENV_VAR: &str = "CF_PROXY";
}
