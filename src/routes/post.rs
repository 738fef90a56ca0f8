use crate::{
    AppState,
    dto::{AddPostRequest, ListPostsQuery, PostPage, UpdatePostRequest},
    errors::ApiError,
    models::Post,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

/// GET /posts?limit=50&cursor=<id>
pub async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<ListPostsQuery>, QueryRejection>,
) -> Result<Json<PostPage>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::ValidationError(e.body_text()))?;

    Ok(Json(state.posts.list(query).await?))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.by_id(&id).await?))
}

/// POST /posts
/// Body: { "id"?: "<uuid>", "title": "...", "text": "..." }
pub async fn add_post(
    State(state): State<AppState>,
    payload: Result<Json<AddPostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::ValidationError(e.body_text()))?;

    let post = state.posts.add(payload).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// PATCH /posts/{id}
/// Body: { "title"?: "...", "text"?: "..." }
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::ValidationError(e.body_text()))?;

    Ok(Json(state.posts.update(&id, payload).await?))
}
