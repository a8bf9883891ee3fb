use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{validate_jwt, Claims, Role};

/// Signing material shared with the session middleware
#[derive(Clone)]
pub struct AuthKeys {
    secret: Arc<str>,
}

impl AuthKeys {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

/// Authenticated caller extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
    pub roles: Vec<Role>,
    pub xsrf: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.sub,
            roles: claims.roles,
            xsrf: claims.xsrf,
        }
    }
}

/// Attaches `AuthUser` to the request when a valid bearer token is present.
///
/// Requests without a usable token pass through unauthenticated; the guards
/// in `middleware::guard` reject them on protected routes.
pub async fn session_middleware(
    State(keys): State<AuthKeys>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    match extract_jwt_from_headers(&headers) {
        Ok(Some(token)) => match validate_jwt(&token, keys.secret()) {
            Ok(claims) => {
                let auth_user = AuthUser::from(claims);
                tracing::debug!("Authenticated {} with roles {:?}", auth_user.email, auth_user.roles);
                request.extensions_mut().insert(auth_user);
            }
            Err(e) => tracing::debug!("Ignoring session token: {}", e),
        },
        Ok(None) => {}
        Err(msg) => tracing::debug!("Ignoring Authorization header: {}", msg),
    }

    next.run(request).await
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<Option<String>, String> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(Some(token.trim().to_string()))
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
