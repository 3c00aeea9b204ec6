// src/auth/mod.rs
// Bearer-token identity boundary. Token issuance lives in a separate service;
// this side only verifies and extracts. Anonymous requests are valid - the
// extractor yields None instead of rejecting.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::env;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}

/// A resolved caller identity.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
}

fn jwt_secret() -> String {
    env::var("JWT_SECRET")
        .unwrap_or_else(|_| "gurukul-jwt-secret-change-in-production".to_string())
}

pub fn create_token(user_id: &str, username: &str) -> anyhow::Result<String> {
    let now = chrono::Utc::now();
    let expiration = now
        .checked_add_signed(chrono::Duration::days(30))
        .ok_or_else(|| anyhow::anyhow!("Failed to calculate expiration"))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: expiration,
        iat: now.timestamp() as usize,
    };

    let key = EncodingKey::from_secret(jwt_secret().as_bytes());
    encode(&Header::default(), &claims, &key)
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))
}

pub fn verify_token(token: &str) -> anyhow::Result<Claims> {
    let key = DecodingKey::from_secret(jwt_secret().as_bytes());
    decode::<Claims>(token, &key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))
}

fn bearer_identity(parts: &Parts) -> Option<AuthUser> {
    let header = parts.headers.get(axum::http::header::AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    let claims = verify_token(token).ok()?;
    Some(AuthUser {
        id: claims.sub,
        username: claims.username,
    })
}

/// Optional identity: chat accepts anonymous callers, so a missing or
/// invalid token degrades to None rather than failing the request.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(bearer_identity(parts)))
    }
}

/// Required identity for the conversation-management surface.
#[derive(Debug, Clone)]
pub struct RequireUser(pub AuthUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_identity(parts)
            .map(RequireUser)
            .ok_or(AppError::Unauthorized)
    }
}
