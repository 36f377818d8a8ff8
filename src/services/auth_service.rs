use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AuthConfig;
use crate::database::entities::users;
use crate::errors::{ApiResult, AuthError};

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// Expiry as seconds since the epoch
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

/// Registration, login and bearer token resolution
#[derive(Clone)]
pub struct AuthService {
    db: DatabaseConnection,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(db: DatabaseConnection, config: AuthConfig) -> Self {
        Self { db, config }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        Self::validate_password(password)?;
        hash(password, self.config.bcrypt_cost).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Verify a password against a hash
    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
        verify(password, password_hash).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Validate username format
    pub fn validate_username(username: &str) -> Result<(), AuthError> {
        if username.len() < 3 {
            return Err(AuthError::InvalidUsername(
                "must be at least 3 characters long".to_string(),
            ));
        }

        if username.len() > 50 {
            return Err(AuthError::InvalidUsername(
                "is too long (max 50 characters)".to_string(),
            ));
        }

        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AuthError::InvalidUsername(
                "can only contain letters, numbers, underscores, and hyphens".to_string(),
            ));
        }

        Ok(())
    }

    pub fn validate_password(password: &str) -> Result<(), AuthError> {
        if password.len() < 8 {
            return Err(AuthError::WeakPassword(
                "must be at least 8 characters long".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn find_user(&self, username: &str) -> ApiResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    pub async fn register(&self, username: &str, password: &str) -> ApiResult<users::Model> {
        Self::validate_username(username)?;
        let password_hash = self.hash_password(password)?;

        if self.find_user(username).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let user = users::ActiveModel::new(username.to_string(), password_hash)
            .insert(&self.db)
            .await?;

        info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Look up the user and check the password
    pub async fn authenticate(&self, username: &str, password: &str) -> ApiResult<users::Model> {
        let user = self
            .find_user(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_active || !Self::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<AccessToken> {
        let user = self.authenticate(username, password).await?;
        let access_token = self.issue_token(&user.username)?;
        debug!("Issued token for {}", user.username);

        Ok(AccessToken {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    pub fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        let claims = Claims {
            sub: username.to_string(),
            exp: (Utc::now() + Duration::minutes(self.config.token_ttl_minutes)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }

    /// Resolve a bearer token to its stored user
    pub async fn resolve_token(&self, token: &str) -> ApiResult<users::Model> {
        let claims = self.decode_token(token)?;
        let user = self
            .find_user(&claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(user)
    }

    #[cfg(test)]
    pub(crate) fn token_with_expiry(&self, username: &str, exp: i64) -> String {
        let claims = Claims {
            sub: username.to_string(),
            exp,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .unwrap()
    }
}
