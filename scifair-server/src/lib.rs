//! scifair-server library - science fair project service
//!
//! JSON HTTP API over the project store, the AI advisor and the blob store.
//! Everything except `/health`, sign-up/sign-in and `/blobs` requires a
//! session token.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use scifair_common::{ProjectStore, SqliteStore};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod advisor;
pub mod api;
pub mod blobs;
pub mod error;
pub mod workspace;

use advisor::Advisor;
use blobs::{BlobStore, BLOB_ROUTE};

/// Upload limit used when the settings table has no value
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Connection pool (accounts and sessions)
    pub db: SqlitePool,
    /// Project rows, files and data points
    pub store: Arc<dyn ProjectStore>,
    pub advisor: Arc<dyn Advisor>,
    pub blobs: BlobStore,
    /// Static key clients must send in the `apikey` header, when set
    pub client_api_key: Option<String>,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create state backed by the SQLite store on `db`
    pub fn new(db: SqlitePool, advisor: Arc<dyn Advisor>, blobs: BlobStore) -> Self {
        let store: Arc<dyn ProjectStore> = Arc::new(SqliteStore::new(db.clone()));
        Self {
            db,
            store,
            advisor,
            blobs,
            client_api_key: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Replace the project store
    pub fn with_store(mut self, store: Arc<dyn ProjectStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_client_api_key(mut self, key: Option<String>) -> Self {
        self.client_api_key = key;
        self
    }

    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, post};

    // Protected routes (require a session)
    let protected = Router::new()
        .route("/auth/signout", post(api::sign_out))
        .route("/api/projects", get(api::list_projects))
        .route("/api/projects/generate", post(api::generate_project))
        .route(
            "/api/projects/:id",
            get(api::get_project).delete(api::delete_project),
        )
        .route("/api/projects/:id/detail", get(api::get_project_detail))
        .route("/api/projects/:id/status", post(api::advance_status))
        .route("/api/projects/:id/notes", post(api::add_note))
        .route("/api/projects/:id/notes/:index", delete(api::delete_note))
        .route("/api/projects/:id/results", post(api::add_result))
        .route("/api/projects/:id/results/:name", delete(api::delete_result))
        .route(
            "/api/projects/:id/data-points",
            get(api::list_data_points).post(api::add_data_point),
        )
        .route(
            "/api/projects/:id/files",
            get(api::list_files)
                .post(api::upload_file)
                .layer(DefaultBodyLimit::max(state.max_upload_bytes)),
        )
        .route("/api/projects/:id/guide", get(api::get_guide))
        .route("/api/projects/:id/slides", get(api::get_slides))
        .route("/api/projects/:id/presentation", get(api::get_presentation))
        .route("/api/projects/:id/export", get(api::export_project))
        .route("/api/projects/:id/analysis/data", post(api::analyze_data))
        .route("/api/projects/:id/analysis/plan", post(api::plan_experiment))
        .route("/api/projects/:id/analysis/project", post(api::analyze_project))
        .route("/api/projects/:id/analysis/research", post(api::research_question))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Account routes (client key only)
    let accounts = Router::new()
        .route("/auth/signup", post(api::sign_up))
        .route("/auth/signin", post(api::sign_in))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::client_key_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new().merge(api::health_routes());

    let blob_files = ServeDir::new(state.blobs.root());

    Router::new()
        .merge(protected)
        .merge(accounts)
        .merge(public)
        .nest_service(BLOB_ROUTE, blob_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
