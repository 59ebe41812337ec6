//! Middleware de autenticación JWT
//!
//! Este módulo maneja la extracción de tokens Bearer y la identidad del caller.
//! La autenticación es opcional: sin header Authorization la request sigue
//! como anónima; con un token inválido se responde 401. Qué puede hacer cada
//! caller lo decide `services::access_policy`.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::EnvironmentConfig, state::AppState, utils::errors::AppError};

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub role: CallerRole,
    pub exp: usize,
    pub iat: usize,
}

/// Rol del caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerRole {
    User,
    Admin,
}

/// Caller autenticado que se inyecta en las requests
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: CallerRole,
}

impl Caller {
    pub fn user(user_id: Uuid) -> Self {
        Self { user_id, role: CallerRole::User }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self { user_id, role: CallerRole::Admin }
    }

    pub fn is_admin(&self) -> bool {
        self.role == CallerRole::Admin
    }
}

/// Middleware opcional de autenticación
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match request.headers().get(header::AUTHORIZATION) {
        None => return Ok(next.run(request).await),
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Formato de Authorization inválido".to_string()))?
            .to_string(),
    };

    let caller = decode_jwt_token(&token, &state.config)?;
    log::debug!("🔑 Caller autenticado: {} ({:?})", caller.user_id, caller.role);

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}

/// Función para generar JWT token
pub fn generate_jwt_token(caller: &Caller, config: &EnvironmentConfig) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = Claims {
        sub: caller.user_id.to_string(),
        role: caller.role,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Error generando JWT: {}", e)))
}

/// Decodificar y validar un JWT, devolviendo el caller
pub fn decode_jwt_token(token: &str, config: &EnvironmentConfig) -> Result<Caller, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let claims = token_data.claims;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    Ok(Caller { user_id, role: claims.role })
}
