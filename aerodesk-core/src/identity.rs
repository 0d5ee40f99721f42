use async_trait::async_trait;
use serde::Deserialize;
use aerodesk_shared::Masked;

use crate::validation::is_well_formed_email;
use crate::{CoreError, CoreResult};

/// Login or registration form as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: Masked<String>,
}

impl Credentials {
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    pub fn validate(&self) -> CoreResult<()> {
        let email = self.normalized_email();
        if !is_well_formed_email(&email) {
            return Err(CoreError::InvalidEmails(vec![self.email.clone()]));
        }
        if self.password.expose().is_empty() {
            return Err(CoreError::ValidationError("Password must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Stores and checks credential pairs keyed by email.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn register(&self, credentials: &Credentials) -> CoreResult<()>;

    /// `Ok(false)` for unknown users and wrong passwords alike.
    async fn verify(&self, credentials: &Credentials) -> CoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        let ok = Credentials {
            email: " Ana@Example.com ".to_string(),
            password: Masked("s3cret".to_string()),
        };
        assert!(ok.validate().is_ok());
        assert_eq!(ok.normalized_email(), "ana@example.com");

        let bad_email = Credentials {
            email: "ana".to_string(),
            password: Masked("s3cret".to_string()),
        };
        assert_eq!(bad_email.validate(), Err(CoreError::InvalidEmails(vec!["ana".to_string()])));

        let empty_password = Credentials {
            email: "ana@example.com".to_string(),
            password: Masked(String::new()),
        };
        assert!(matches!(empty_password.validate(), Err(CoreError::ValidationError(_))));
    }
}
