//! Schedule slot REST API handlers

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::dto::{
    BookSlotRequest, CreateSlotRequest, ScheduleSlotResponse, SlotListParams, UpdateSlotRequest,
};
use crate::interfaces::http::common::{
    bad_request, domain_error, pagination_error, ApiError, ApiResponse, PageResponse,
    ValidatedJson,
};
use crate::interfaces::http::modules::AppState;
use crate::shared::{
    extract_params, Document, PageResult, Populate, Projection, RawPaginationQuery,
};

/// Slots are listed with their room expanded under this key.
const ROOM_PATH: &str = "room";

#[utoipa::path(
    get,
    path = "/api/v1/schedule-slots",
    tag = "Schedule Slots",
    params(RawPaginationQuery, SlotListParams),
    responses(
        (status = 200, description = "Page of slots, each with its room embedded", body = PageResponse),
        (status = 400, description = "Invalid filter or failed read")
    )
)]
pub async fn list_slots(
    State(state): State<AppState>,
    Query(paging): Query<RawPaginationQuery>,
    Query(params): Query<SlotListParams>,
) -> Result<Json<PageResult<Document>>, ApiError> {
    let filter = params.filter().map_err(domain_error)?;
    let mut options = extract_params(&paging).with_populate(Populate::from(ROOM_PATH));
    if let Some(select) = params.select {
        options = options.with_select(Projection::new(select));
    }

    state
        .slots
        .list_slots(&filter, options)
        .await
        .map(Json)
        .map_err(pagination_error)
}

#[utoipa::path(
    get,
    path = "/api/v1/schedule-slots/{id}",
    tag = "Schedule Slots",
    params(("id" = String, Path, description = "Slot ID")),
    responses(
        (status = 200, description = "Slot details", body = ApiResponse<ScheduleSlotResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ScheduleSlotResponse>>, ApiError> {
    let slot = state.slots.get_slot(&id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(slot.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/schedule-slots",
    tag = "Schedule Slots",
    request_body = CreateSlotRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<ScheduleSlotResponse>),
        (status = 400, description = "endTime not after startTime"),
        (status = 404, description = "Room not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_slot(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateSlotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ScheduleSlotResponse>>), ApiError> {
    let slot = state
        .slots
        .create_slot(req.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(slot.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/schedule-slots/{id}",
    tag = "Schedule Slots",
    params(("id" = String, Path, description = "Slot ID")),
    request_body = UpdateSlotRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<ScheduleSlotResponse>),
        (status = 400, description = "endTime not after startTime"),
        (status = 404, description = "Slot or room not found")
    )
)]
pub async fn update_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateSlotRequest>,
) -> Result<Json<ApiResponse<ScheduleSlotResponse>>, ApiError> {
    let slot = state
        .slots
        .update_slot(&id, req.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(slot.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/schedule-slots/{id}/book",
    tag = "Schedule Slots",
    params(("id" = String, Path, description = "Slot ID")),
    request_body(content = BookSlotRequest, description = "Optional; practitioner to assign"),
    responses(
        (status = 200, description = "Booked", body = ApiResponse<ScheduleSlotResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Slot is not available")
    )
)]
pub async fn book_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse<ScheduleSlotResponse>>, ApiError> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        BookSlotRequest::default()
    } else {
        serde_json::from_slice::<BookSlotRequest>(&body)
            .map_err(|e| bad_request(format!("Invalid JSON: {}", e)))?
    };
    req.validate().map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let slot = state
        .slots
        .book_slot(&id, req.practitioner)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(slot.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/schedule-slots/{id}",
    tag = "Schedule Slots",
    params(("id" = String, Path, description = "Slot ID")),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    state.slots.delete_slot(&id).await.map_err(domain_error)?;
    Ok(Json(
        ApiResponse::success(id).with_message("Schedule slot deleted"),
    ))
}
