//! Authentication service for login, token management and user accounts

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::{validate_email, validate_password, Token, UserCreate, UserPublic};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::ledger::{SharedLedger, UserRecord};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    ledger: SharedLedger,
    jwt_secret: String,
    access_token_expiry: i64,
    bcrypt_cost: u32,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub exp: i64,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(ledger: SharedLedger, config: &Config) -> Self {
        Self {
            ledger,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
            bcrypt_cost: config.security.bcrypt_cost,
        }
    }

    /// Create the configured superuser unless an account with that email exists
    pub async fn bootstrap_superuser(&self, email: &str, password: &str) -> AppResult<UserPublic> {
        if let Some(existing) = self.ledger.read().await.user_by_email(email) {
            return Ok(existing.user.clone());
        }

        let user = self
            .insert_user(UserCreate {
                email: email.to_string(),
                password: password.to_string(),
                full_name: None,
                is_active: true,
                is_superuser: true,
            })
            .await?;
        tracing::info!(user_id = user.id, email = %user.email, "Bootstrapped superuser");
        Ok(user)
    }

    /// Check email and password, returning the matching active account
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<UserPublic> {
        let record = self
            .ledger
            .read()
            .await
            .user_by_email(email)
            .cloned()
            .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(password, &record.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            tracing::warn!(email, "Failed login attempt");
            return Err(AppError::InvalidCredentials);
        }
        if !record.user.is_active {
            return Err(AppError::InactiveUser);
        }

        Ok(record.user)
    }

    /// Authenticate and issue an access token
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Token> {
        let user = self.authenticate(email, password).await?;
        tracing::info!(user_id = user.id, "User logged in");
        self.issue_token(user.id)
    }

    /// Sign an access token for `user_id`
    pub fn issue_token(&self, user_id: i64) -> AppResult<Token> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (Utc::now() + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(Token {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Validate a token and return the user id it was issued for
    pub fn decode_token(&self, token: &str) -> AppResult<i64> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;
        data.claims.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    /// Resolve a bearer token to an active user
    pub async fn current_user(&self, token: &str) -> AppResult<UserPublic> {
        let user_id = self.decode_token(token)?;
        let user = self
            .ledger
            .read()
            .await
            .users
            .get(&user_id)
            .map(|record| record.user.clone())
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(AppError::InactiveUser);
        }
        Ok(user)
    }

    /// Register a new account
    pub async fn create_user(&self, input: UserCreate) -> AppResult<UserPublic> {
        validate_email(&input.email).map_err(|e| AppError::invalid_field("email", e))?;
        validate_password(&input.password).map_err(|e| AppError::invalid_field("password", e))?;

        let user = self.insert_user(input).await?;
        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn insert_user(&self, input: UserCreate) -> AppResult<UserPublic> {
        let password_hash = hash(&input.password, self.bcrypt_cost)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let mut ledger = self.ledger.write().await;
        if ledger.user_by_email(&input.email).is_some() {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }

        let user = UserPublic {
            id: ledger.next_user_id(),
            email: input.email,
            full_name: input.full_name,
            is_active: input.is_active,
            is_superuser: input.is_superuser,
        };
        ledger.users.insert(
            user.id,
            UserRecord {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }
}
