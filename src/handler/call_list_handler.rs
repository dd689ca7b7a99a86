use crate::dto::call_list_dto::{
    MarkCalledQuery, NextNumber, NextRecord, NextRes, NumbersQuery, NumbersRes, RowQuery,
    SaveRemarkReq, SaveRemarkRes, SheetRowsRes,
};
use crate::dto::progress_dto::UserIdQuery;
use crate::error::api_error::ApiError;
use crate::error::request_error::{ValidatedQuery, ValidatedRequest};
use crate::response::api_response::StatusResponse;
use crate::state::call_list_state::CallListState;
use axum::{extract::State, Json};
use axum_macros::debug_handler;

pub async fn next(
    State(state): State<CallListState>,
    ValidatedQuery(query): ValidatedQuery<UserIdQuery>,
) -> Result<Json<NextRes<NextRecord>>, ApiError> {
    let res = state.call_list_service.next_for_user(query.user_id).await?;
    Ok(Json(res))
}

pub async fn next_number(
    State(state): State<CallListState>,
    ValidatedQuery(query): ValidatedQuery<RowQuery>,
) -> Result<Json<NextRes<NextNumber>>, ApiError> {
    let res = state.call_list_service.next_number(query.row).await?;
    Ok(Json(res))
}

#[debug_handler]
pub async fn save(
    State(state): State<CallListState>,
    ValidatedRequest(payload): ValidatedRequest<SaveRemarkReq>,
) -> Result<Json<SaveRemarkRes>, ApiError> {
    let progress = state
        .call_list_service
        .save_remark(payload.user_id, &payload.remark)
        .await?;
    Ok(Json(SaveRemarkRes {
        status: "saved".to_string(),
        progress,
    }))
}

pub async fn mark_called(
    State(state): State<CallListState>,
    ValidatedQuery(query): ValidatedQuery<MarkCalledQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .call_list_service
        .mark_called(query.row, query.remark.as_deref())
        .await?;
    Ok(Json(StatusResponse::new("updated")))
}

pub async fn get_numbers(
    State(state): State<CallListState>,
    ValidatedQuery(query): ValidatedQuery<NumbersQuery>,
) -> Result<Json<NumbersRes>, ApiError> {
    let numbers = state
        .call_list_service
        .numbers(query.start, query.limit)
        .await?;
    Ok(Json(NumbersRes { numbers }))
}

pub async fn sheet(State(state): State<CallListState>) -> Result<Json<SheetRowsRes>, ApiError> {
    let rows = state.call_list_service.sheet_rows().await?;
    Ok(Json(SheetRowsRes { rows }))
}
