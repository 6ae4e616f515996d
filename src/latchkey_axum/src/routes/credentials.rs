use latchkey_core::{Email, Password};
use secrecy::Secret;
use serde::Deserialize;

use crate::error::ApiError;

/// Body of `auth/login` and `auth/signup`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

impl CredentialsRequest {
    /// Validate both fields, reporting every violation at once.
    pub fn parse(self) -> Result<(Email, Password), ApiError> {
        match (Email::parse(self.email), Password::parse(self.password)) {
            (Ok(email), Ok(password)) => Ok((email, password)),
            (Err(email), Err(password)) => Err(ApiError::Validation(format!("{email} {password}"))),
            (Err(e), _) => Err(e.into()),
            (_, Err(e)) => Err(e.into()),
        }
    }
}
