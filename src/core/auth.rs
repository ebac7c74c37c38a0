use crate::domain::model::User;
use crate::domain::ports::UserStore;
use crate::utils::error::{HealthError, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user_id: i64,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_secret: String,
    token_ttl_seconds: i64,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        jwt_secret: impl Into<String>,
        token_ttl_seconds: i64,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            jwt_secret: jwt_secret.into(),
            token_ttl_seconds,
            bcrypt_cost,
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        // bcrypt 是 CPU 密集運算，移出 async 執行緒
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| HealthError::storage(format!("hashing task failed: {}", e)))??;

        let user = self.users.insert_user(username, email, &password_hash).await?;
        tracing::info!("👤 Registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let user = self
            .users
            .find_user_by_email(email)
            .await?
            .ok_or(HealthError::InvalidCredentials)?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| HealthError::storage(format!("hashing task failed: {}", e)))??;

        if !verified {
            tracing::debug!("Password mismatch for user {}", user.id);
            return Err(HealthError::InvalidCredentials);
        }

        let token = self.issue_token(user.id)?;
        Ok(LoginOutcome {
            token,
            user_id: user.id,
        })
    }

    pub fn issue_token(&self, user_id: i64) -> Result<String> {
        let claims = Claims {
            id: user_id,
            exp: Utc::now().timestamp() + self.token_ttl_seconds,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?)
    }

    /// 驗證簽章與到期時間，回傳使用者 id
    pub fn verify_token(&self, token: &str) -> Result<i64> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ledger::LedgerStore;
    use crate::adapters::storage::MemoryStorage;

    async fn service() -> AuthService {
        let store = LedgerStore::open(MemoryStorage::new(), "ledger.json")
            .await
            .unwrap();
        AuthService::new(Arc::new(store), "test-secret", 3600, 4)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = service().await;
        let user = auth.register("ada", "ada@example.com", "hunter2").await.unwrap();
        assert_ne!(user.password_hash, "hunter2");

        let outcome = auth.login("ada@example.com", "hunter2").await.unwrap();
        assert_eq!(outcome.user_id, user.id);
        assert_eq!(auth.verify_token(&outcome.token).unwrap(), user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let auth = service().await;
        auth.register("ada", "ada@example.com", "pw").await.unwrap();
        let err = auth.register("ada2", "ada@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, HealthError::Conflict { .. }));
        assert_eq!(err.to_string(), "Email already in use");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let auth = service().await;
        auth.register("ada", "ada@example.com", "right").await.unwrap();

        assert!(matches!(
            auth.login("ada@example.com", "wrong").await,
            Err(HealthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody@example.com", "right").await,
            Err(HealthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_expired_or_foreign_token_rejected() {
        let auth = service().await;
        let expired = AuthService::new(
            Arc::new(LedgerStore::open(MemoryStorage::new(), "l.json").await.unwrap()),
            "test-secret",
            -3600,
            4,
        );
        let token = expired.issue_token(1).unwrap();
        assert!(matches!(auth.verify_token(&token), Err(HealthError::TokenError(_))));

        let other = AuthService::new(
            Arc::new(LedgerStore::open(MemoryStorage::new(), "l.json").await.unwrap()),
            "other-secret",
            3600,
            4,
        );
        let token = other.issue_token(1).unwrap();
        assert!(auth.verify_token(&token).is_err());
    }
}
