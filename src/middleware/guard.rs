use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::auth::AuthUser;
use crate::auth::{authorize, Role};
use crate::error::ApiError;

/// Header carrying the anti-forgery token on mutating requests
pub const XSRF_HEADER: &str = "x-xsrf-token";

fn caller(parts: &Parts) -> Result<AuthUser, ApiError> {
    parts
        .extensions
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::forbidden("Access Denied"))
}

fn check_xsrf(parts: &Parts, user: &AuthUser) -> Result<(), ApiError> {
    let presented = parts
        .headers
        .get(XSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if presented.is_empty() || presented != user.xsrf {
        tracing::warn!("Rejected mutating request from {}: bad anti-forgery token", user.email);
        return Err(ApiError::forbidden("Invalid CSRF token"));
    }
    Ok(())
}

/// Admits any caller holding the USER role.
pub struct RequireUser(pub AuthUser);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = caller(parts)?;
        authorize(&user.roles, Role::User)?;
        Ok(Self(user))
    }
}

/// Admits ADMIN callers presenting their session's anti-forgery token.
pub struct RequireAdmin(pub AuthUser);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = caller(parts)?;
        authorize(&user.roles, Role::Admin)?;
        check_xsrf(parts, &user)?;
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(user: Option<AuthUser>, xsrf: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/articles?id=1");
        if let Some(token) = xsrf {
            builder = builder.header(XSRF_HEADER, token);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        if let Some(user) = user {
            parts.extensions.insert(user);
        }
        parts
    }

    fn user(roles: Vec<Role>) -> AuthUser {
        AuthUser {
            email: "someone@ucsb.edu".to_string(),
            roles,
            xsrf: "token-123".to_string(),
        }
    }

    #[tokio::test]
    async fn anonymous_callers_are_forbidden() {
        let mut p = parts(None, None);
        assert!(RequireUser::from_request_parts(&mut p, &()).await.is_err());
        assert!(RequireAdmin::from_request_parts(&mut p, &()).await.is_err());
    }

    #[tokio::test]
    async fn user_role_cannot_mutate() {
        let mut p = parts(Some(user(vec![Role::User])), Some("token-123"));
        assert!(RequireUser::from_request_parts(&mut p, &()).await.is_ok());
        assert!(RequireAdmin::from_request_parts(&mut p, &()).await.is_err());
    }

    #[tokio::test]
    async fn admin_needs_matching_xsrf_token() {
        let admin = user(vec![Role::Admin, Role::User]);

        let mut missing = parts(Some(admin.clone()), None);
        assert!(RequireAdmin::from_request_parts(&mut missing, &()).await.is_err());

        let mut wrong = parts(Some(admin.clone()), Some("token-456"));
        assert!(RequireAdmin::from_request_parts(&mut wrong, &()).await.is_err());

        let mut good = parts(Some(admin), Some("token-123"));
        assert!(RequireAdmin::from_request_parts(&mut good, &()).await.is_ok());
    }
}
