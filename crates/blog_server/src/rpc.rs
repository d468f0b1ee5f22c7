//! HTTP/JSON transport for the blog RPC service.
//!
//! # Responsibility
//! - Route `CreateBlog` / `ReadBlog` calls to the blog service.
//! - Keep blocking store work off the async workers.
//! - Turn every failure into a classified status response.
//!
//! # Invariants
//! - Each call runs on its own task; the only shared state is the service.
//! - Blocking store work is tracked, so shutdown can wait for calls whose
//!   client already went away.
//! - Malformed request bodies answer `INVALID_ARGUMENT`, never a bare 4xx.

use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use blog_core::rpc::{
    CreateBlogRequest, CreateBlogResponse, ReadBlogRequest, ReadBlogResponse, CREATE_BLOG_PATH,
    READ_BLOG_PATH,
};
use blog_core::{BlogRepository, BlogService, ServiceResult, Status};
use log::{error, info};
use std::sync::Arc;
use tokio_util::task::TaskTracker;

/// Shared state handed to every handler.
pub struct AppState<R: BlogRepository> {
    service: Arc<BlogService<R>>,
    tasks: TaskTracker,
}

impl<R: BlogRepository> AppState<R> {
    pub fn new(service: BlogService<R>) -> Self {
        Self::with_tracker(Arc::new(service), TaskTracker::new())
    }

    /// Shares `service` and records every blocking call on `tasks`.
    pub fn with_tracker(service: Arc<BlogService<R>>, tasks: TaskTracker) -> Self {
        Self { service, tasks }
    }
}

impl<R: BlogRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            tasks: self.tasks.clone(),
        }
    }
}

/// Builds the router exposing every blog RPC method.
pub fn router<R>(state: AppState<R>) -> Router
where
    R: BlogRepository + Send + Sync + 'static,
{
    Router::new()
        .route(CREATE_BLOG_PATH, post(create_blog::<R>))
        .route(READ_BLOG_PATH, post(read_blog::<R>))
        .with_state(state)
}

async fn create_blog<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> Result<Json<CreateBlogResponse>, ApiError>
where
    R: BlogRepository + Send + Sync + 'static,
{
    info!("event=rpc_request module=rpc method=CreateBlog");
    let Json(request) = payload.map_err(rejection_status)?;

    let blog = run_blocking(state, move |service| {
        service.create_blog(request.author_id, request.title, request.content)
    })
    .await?;

    Ok(Json(CreateBlogResponse { blog }))
}

async fn read_blog<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<ReadBlogRequest>, JsonRejection>,
) -> Result<Json<ReadBlogResponse>, ApiError>
where
    R: BlogRepository + Send + Sync + 'static,
{
    info!("event=rpc_request module=rpc method=ReadBlog");
    let Json(request) = payload.map_err(rejection_status)?;

    let blog = run_blocking(state, move |service| service.read_blog(&request.blog_id)).await?;

    Ok(Json(ReadBlogResponse { blog }))
}

/// Runs one service call on the blocking pool.
///
/// The task outlives the handler if the client disconnects; it stays on the
/// state's tracker until it returns.
async fn run_blocking<R, T, F>(state: AppState<R>, call: F) -> ServiceResult<T>
where
    R: BlogRepository + Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&BlogService<R>) -> ServiceResult<T> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    match state.tasks.spawn_blocking(move || call(&service)).await {
        Ok(result) => result,
        Err(err) => {
            error!("event=rpc_task module=rpc status=error error={err}");
            Err(Status::internal(format!("Internal error: {err}")))
        }
    }
}

fn rejection_status(rejection: JsonRejection) -> ApiError {
    ApiError(Status::invalid_argument(format!(
        "Cannot decode request: {}",
        rejection.body_text()
    )))
}
