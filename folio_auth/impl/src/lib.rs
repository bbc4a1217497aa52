use chrono::Utc;
use folio_auth_contracts::{AuthService, AuthenticateError};
use folio_models::{
    auth::{AdminCredentials, AdminSession, AdminSessionId, AdminUsername},
    Sha256Hash,
};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

/// Checks credentials against a single configured admin account.
#[derive(Debug, Clone)]
pub struct AuthServiceImpl {
    config: AuthServiceConfig,
}

#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    pub username: AdminUsername,
    pub password_hash: Sha256Hash,
}

impl AuthServiceImpl {
    pub fn new(config: AuthServiceConfig) -> Self {
        Self { config }
    }
}

impl AuthService for AuthServiceImpl {
    #[tracing::instrument(skip_all, fields(username = %credentials.username))]
    async fn authenticate(
        &self,
        credentials: AdminCredentials,
    ) -> Result<AdminSession, AuthenticateError> {
        let username_matches = AdminUsername::try_new(credentials.username)
            .is_ok_and(|username| username == self.config.username);
        let password_matches =
            sha256(credentials.password.expose().as_bytes()) == self.config.password_hash;

        if !(username_matches && password_matches) {
            warn!("Admin login failed");
            return Err(AuthenticateError::InvalidCredentials);
        }

        info!("Admin logged in");
        Ok(AdminSession {
            id: AdminSessionId::random(),
            username: self.config.username.clone(),
            started_at: Utc::now(),
        })
    }
}

fn sha256(data: &[u8]) -> Sha256Hash {
    Sha256Hash(Sha256::new().chain_update(data).finalize().into())
}

#[cfg(test)]
mod tests {
    use folio_models::auth::AdminPassword;
    use folio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    const ADMIN123_SHA256: &str =
        "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9";

    fn sut() -> AuthServiceImpl {
        AuthServiceImpl::new(AuthServiceConfig {
            username: AdminUsername::try_new("admin").unwrap(),
            password_hash: ADMIN123_SHA256.parse().unwrap(),
        })
    }

    #[test]
    fn hash() {
        assert_eq!(sha256(b"admin123").to_string(), ADMIN123_SHA256);
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let sut = sut();

        // Act
        let result = sut
            .authenticate(AdminCredentials {
                username: " admin ".into(),
                password: AdminPassword::new("admin123"),
            })
            .await;

        // Assert
        let session = result.unwrap();
        assert_eq!(session.username.to_string(), "admin");
    }

    #[tokio::test]
    async fn wrong_password() {
        // Arrange
        let sut = sut();

        // Act
        let result = sut
            .authenticate(AdminCredentials {
                username: "admin".into(),
                password: AdminPassword::new("admin1234"),
            })
            .await;

        // Assert
        assert_matches!(result, Err(AuthenticateError::InvalidCredentials));
    }

    #[tokio::test]
    async fn wrong_username() {
        for username in ["root", "", "   "] {
            let result = sut()
                .authenticate(AdminCredentials {
                    username: username.into(),
                    password: AdminPassword::new("admin123"),
                })
                .await;

            assert_matches!(result, Err(AuthenticateError::InvalidCredentials));
        }
    }

    #[tokio::test]
    async fn sessions_are_distinct() {
        let sut = sut();
        let credentials = AdminCredentials {
            username: "admin".into(),
            password: AdminPassword::new("admin123"),
        };

        let a = sut.authenticate(credentials.clone()).await.unwrap();
        let b = sut.authenticate(credentials).await.unwrap();

        assert_ne!(a.id, b.id);
    }
}
