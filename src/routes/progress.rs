use crate::{handler::progress_handler, state::progress_state::ProgressState};
use axum::{
    routing::{get, post},
    Router,
};

pub fn routes() -> Router<ProgressState> {
    let router = Router::new()
        .route("/save_progress", post(progress_handler::save_progress))
        .route("/get_progress", get(progress_handler::get_progress));
    return router;
}
