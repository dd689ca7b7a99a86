use crate::{handler::call_list_handler, state::call_list_state::CallListState};
use axum::{
    routing::{get, post},
    Router,
};

pub fn routes() -> Router<CallListState> {
    let router = Router::new()
        .route("/next", get(call_list_handler::next))
        .route("/next_number", get(call_list_handler::next_number))
        .route("/save", post(call_list_handler::save))
        .route("/mark_called", post(call_list_handler::mark_called))
        .route("/get_numbers", get(call_list_handler::get_numbers))
        .route("/sheet", get(call_list_handler::sheet));
    return router;
}
