use crate::{handler::auth_handler, state::auth_state::AuthState};
use axum::{routing::post, Router};

pub fn routes() -> Router<AuthState> {
    let router = Router::new().route("/login", post(auth_handler::login));
    return router;
}
