use std::sync::Arc;

use axum::async_trait;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::faq::Language;
use crate::security;
use crate::service::{FaqService, ListParams};
use crate::validator::{CreateFaqRequest, UpdateFaqRequest};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FaqService>,
    pub api_token: String,
    pub operator_id: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/faqs", get(list_faqs).post(create_faq))
        .route(
            "/faqs/:id",
            get(get_faq).put(update_faq).delete(delete_faq),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Authenticated caller identity, resolved from the bearer token on
/// mutating endpoints. Token comparison is constant-time.
pub struct AuthUser {
    pub id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        if !security::constant_time_compare(token, &state.api_token) {
            return Err(ApiError::Unauthorized);
        }

        Ok(AuthUser {
            id: state.operator_id.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    lang: Option<String>,
    category: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
}

async fn health() -> impl IntoResponse {
    Json(json!({ "success": true, "status": "ok" }))
}

async fn list_faqs(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;

    let params = ListParams {
        lang: Language::resolve(query.lang.as_deref().unwrap_or("en")),
        category: query.category,
        page: query.page.unwrap_or(DEFAULT_PAGE),
        limit: query.limit.unwrap_or(DEFAULT_LIMIT),
    };

    let page = state.service.list(params).await?;

    Ok(Json(json!({
        "success": true,
        "data": page.data,
        "pagination": page.pagination,
    })))
}

async fn get_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let lang = Language::resolve(query.lang.as_deref().unwrap_or("en"));

    let faq = state.service.get(parse_id(&id)?, lang).await?;

    Ok(Json(json!({ "success": true, "data": faq })))
}

async fn create_faq(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateFaqRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let input = request.validate()?;

    let faq = state.service.create(input, &user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": faq })),
    ))
}

async fn update_faq(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateFaqRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let changes = request.validate()?;

    let faq = state.service.update(parse_id(&id)?, changes, &user.id).await?;

    Ok(Json(json!({ "success": true, "data": faq })))
}

async fn delete_faq(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete(parse_id(&id)?).await?;

    Ok(Json(json!({
        "success": true,
        "message": "FAQ deleted successfully",
    })))
}

/// A path segment that is not a numeric id cannot name any record, so it
/// maps to NotFound rather than a framework-level rejection.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}
