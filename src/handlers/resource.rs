// handlers/resource.rs - CRUD endpoints shared by every resource
//
// GET    /api/<resource>/all         list_all   (USER)
// GET    /api/<resource>?<key>=..    get_by_id  (USER)
// POST   /api/<resource>/post?...    create     (ADMIN + anti-forgery token)
// PUT    /api/<resource>?<key>=..    update     (ADMIN + anti-forgery token)
// DELETE /api/<resource>?<key>=..    delete     (ADMIN + anti-forgery token)
//
// Guards are the first extractor of every handler so that rejected callers
// never reach key parsing or the repository.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequestParts, Query, State,
    },
    http::request::Parts,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::database::Repository;
use crate::entities::Entity;
use crate::error::ApiError;
use crate::middleware::{RequireAdmin, RequireUser};

type Repo<E> = Arc<dyn Repository<E>>;

/// Key taken from the `E::KEY_PARAM` query parameter
pub struct EntityKey<E: Entity>(pub E::Key, PhantomData<fn() -> E>);

#[async_trait]
impl<E, S> FromRequestParts<S> for EntityKey<E>
where
    E: Entity,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let raw = params.get(E::KEY_PARAM).ok_or_else(|| {
            ApiError::bad_request(format!(
                "Required request parameter '{}' is not present",
                E::KEY_PARAM
            ))
        })?;

        let key = raw.parse::<E::Key>().map_err(|_| {
            ApiError::bad_request(format!(
                "Invalid value '{}' for parameter '{}'",
                raw,
                E::KEY_PARAM
            ))
        })?;

        Ok(Self(key, PhantomData))
    }
}

/// Routes for one resource, bound to its repository
pub fn resource_routes<E: Entity>(repo: Repo<E>) -> Router {
    let base = format!("/api/{}", E::RESOURCE);

    Router::new()
        .route(&format!("{}/all", base), get(list_all::<E>))
        .route(&format!("{}/post", base), post(create::<E>))
        .route(
            &base,
            get(get_by_id::<E>).put(update::<E>).delete(delete::<E>),
        )
        .with_state(repo)
}

pub async fn list_all<E: Entity>(
    RequireUser(_user): RequireUser,
    State(repo): State<Repo<E>>,
) -> Result<Json<Vec<E>>, ApiError> {
    let rows = repo.find_all().await?;
    Ok(Json(rows))
}

pub async fn get_by_id<E: Entity>(
    RequireUser(_user): RequireUser,
    State(repo): State<Repo<E>>,
    EntityKey(id, _): EntityKey<E>,
) -> Result<Json<E>, ApiError> {
    let row = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(E::NAME, &id))?;
    Ok(Json(row))
}

pub async fn create<E: Entity>(
    RequireAdmin(user): RequireAdmin,
    State(repo): State<Repo<E>>,
    params: Result<Query<E::Params>, QueryRejection>,
) -> Result<Json<E>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let saved = repo.save(E::from_params(params)).await?;
    tracing::info!(
        "{} created {} with id {:?}",
        user.email,
        E::NAME,
        saved.key()
    );
    Ok(Json(saved))
}

pub async fn update<E: Entity>(
    RequireAdmin(user): RequireAdmin,
    State(repo): State<Repo<E>>,
    EntityKey(id, _): EntityKey<E>,
    body: Result<Json<E>, JsonRejection>,
) -> Result<Json<E>, ApiError> {
    let Json(incoming) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(E::NAME, &id))?;

    let saved = repo.save(existing.replace_fields(incoming)).await?;
    tracing::info!("{} updated {} with id {}", user.email, E::NAME, id);
    Ok(Json(saved))
}

pub async fn delete<E: Entity>(
    RequireAdmin(user): RequireAdmin,
    State(repo): State<Repo<E>>,
    EntityKey(id, _): EntityKey<E>,
) -> Result<Json<Value>, ApiError> {
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(E::NAME, &id))?;

    repo.delete(&existing).await?;
    tracing::info!("{} deleted {} with id {}", user.email, E::NAME, id);
    Ok(Json(json!({
        "message": format!("{} with id {} deleted", E::NAME, id)
    })))
}
