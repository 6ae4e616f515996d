use latchkey_core::RECOVERY_TOKEN_LIFETIME_MINUTES;

pub mod env {
    pub const ENVIRONMENT_ENV_VAR: &str = "LATCHKEY_ENVIRONMENT";
    pub const CONFIG_DIR_ENV_VAR: &str = "LATCHKEY_CONFIG_DIR";
    /// Prefix of overriding variables, e.g. `LATCHKEY__JWT__SECRET`.
    pub const ENV_PREFIX: &str = "LATCHKEY";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const DEFAULT_CONFIG_DIR: &str = "config";
pub const DEFAULT_ENVIRONMENT: &str = "local";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Bearer credentials must expire before a recovery token would.
pub const MAX_BEARER_TTL_SECONDS: i64 = RECOVERY_TOKEN_LIFETIME_MINUTES * 60;

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub const JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hs256";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
