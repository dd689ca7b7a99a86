use crate::config::app_config::{AppSettings, CorsOrigins};
use crate::handler::status_handler;
use crate::repository::sheet_repository::SheetRepositoryTrait;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::routes::{auth, call_list, progress};
use crate::state::auth_state::AuthState;
use crate::state::call_list_state::CallListState;
use crate::state::progress_state::ProgressState;
use axum::routing::{get, IntoMakeService};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origins {
        CorsOrigins::Any => {
            tracing::warn!("cors allows any origin, set CORS_ALLOWED_ORIGINS to restrict it");
            layer.allow_origin(Any)
        }
        CorsOrigins::List(list) => layer.allow_origin(AllowOrigin::list(list.clone())),
    }
}

pub fn build_router(
    user_repo: Arc<dyn UserRepositoryTrait>,
    sheet_repo: Option<Arc<dyn SheetRepositoryTrait>>,
    settings: &AppSettings,
) -> Router {
    let auth_state = AuthState::new(&user_repo, &sheet_repo, settings.password_scheme);
    let progress_state = ProgressState::new(&user_repo, &sheet_repo);
    let call_list_state = CallListState::new(&user_repo, &sheet_repo, settings.row_offsets);

    if sheet_repo.is_none() {
        tracing::warn!("spreadsheet not configured, call list routes will fail");
    }

    Router::new()
        .route("/", get(status_handler::root))
        .route("/health", get(status_handler::health))
        .merge(auth::routes().with_state(auth_state))
        .merge(progress::routes().with_state(progress_state))
        .merge(call_list::routes().with_state(call_list_state))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
}

pub fn routes(
    user_repo: Arc<dyn UserRepositoryTrait>,
    sheet_repo: Option<Arc<dyn SheetRepositoryTrait>>,
    settings: &AppSettings,
) -> IntoMakeService<Router> {
    build_router(user_repo, sheet_repo, settings).into_make_service()
}
