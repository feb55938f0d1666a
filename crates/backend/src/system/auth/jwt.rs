use anyhow::{Context, Result};
use contracts::enums::UserRole;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;

/// Секрет HS256, общий с внешней системой аутентификации
static JWT_SECRET: OnceCell<String> = OnceCell::new();

/// Запомнить секрет при старте (повторный вызов игнорируется)
pub fn initialize(secret: &str) {
    if JWT_SECRET.set(secret.to_string()).is_err() {
        tracing::warn!("JWT secret already initialized, keeping the first value");
    }
}

fn jwt_secret() -> Result<&'static str> {
    JWT_SECRET
        .get()
        .map(String::as_str)
        .context("JWT secret is not initialized")
}

/// Validate JWT token and extract claims
pub fn validate_token(token: &str) -> Result<TokenClaims> {
    validate_token_with_secret(token, jwt_secret()?)
}

pub fn validate_token_with_secret(token: &str, secret: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Выпустить токен (для интеграционных проверок и локального запуска)
pub fn issue_token(
    user_id: &str,
    role: UserRole,
    employee_id: Option<&str>,
    lifetime: chrono::Duration,
    secret: &str,
) -> Result<String> {
    let now = chrono::Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: user_id.to_string(),
        role,
        employee_id: employee_id.map(str::to_string),
        exp: (now + lifetime).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}
