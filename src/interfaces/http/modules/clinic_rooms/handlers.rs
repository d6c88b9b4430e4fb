//! Clinic room REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{ClinicRoomResponse, CreateRoomRequest, RoomListParams, UpdateRoomRequest};
use crate::application::SlotListError;
use crate::interfaces::http::common::{
    domain_error, pagination_error, ApiError, ApiResponse, PageResponse, ValidatedJson,
};
use crate::interfaces::http::modules::schedule_slots::SlotListParams;
use crate::interfaces::http::modules::AppState;
use crate::shared::{extract_params, Document, PageResult, Projection, RawPaginationQuery};

#[utoipa::path(
    get,
    path = "/api/v1/clinic-rooms",
    tag = "Clinic Rooms",
    params(RawPaginationQuery, RoomListParams),
    responses(
        (status = 200, description = "Page of clinic rooms", body = PageResponse),
        (status = 400, description = "Invalid filter or failed read")
    )
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(paging): Query<RawPaginationQuery>,
    Query(params): Query<RoomListParams>,
) -> Result<Json<PageResult<Document>>, ApiError> {
    let filter = params.filter().map_err(domain_error)?;
    let mut options = extract_params(&paging);
    if let Some(select) = params.select {
        options = options.with_select(Projection::new(select));
    }

    state
        .rooms
        .list_rooms(&filter, options)
        .await
        .map(Json)
        .map_err(pagination_error)
}

#[utoipa::path(
    get,
    path = "/api/v1/clinic-rooms/{id}",
    tag = "Clinic Rooms",
    params(("id" = String, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = ApiResponse<ClinicRoomResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ClinicRoomResponse>>, ApiError> {
    let room = state.rooms.get_room(&id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/clinic-rooms",
    tag = "Clinic Rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<ClinicRoomResponse>),
        (status = 409, description = "Room number already in use"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_room(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ClinicRoomResponse>>), ApiError> {
    let room = state
        .rooms
        .create_room(req.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(room.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/clinic-rooms/{id}",
    tag = "Clinic Rooms",
    params(("id" = String, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<ClinicRoomResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Room number already in use")
    )
)]
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateRoomRequest>,
) -> Result<Json<ApiResponse<ClinicRoomResponse>>, ApiError> {
    let room = state
        .rooms
        .update_room(&id, req.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/clinic-rooms/{id}",
    tag = "Clinic Rooms",
    params(("id" = String, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Deleted together with its slots", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    state.rooms.delete_room(&id).await.map_err(domain_error)?;
    Ok(Json(
        ApiResponse::success(id).with_message("Clinic room deleted"),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/clinic-rooms/{id}/slots",
    tag = "Clinic Rooms",
    params(
        ("id" = String, Path, description = "Room ID"),
        RawPaginationQuery,
        SlotListParams
    ),
    responses(
        (status = 200, description = "Page of the room's slots", body = PageResponse),
        (status = 404, description = "Room not found")
    )
)]
pub async fn list_room_slots(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(paging): Query<RawPaginationQuery>,
    Query(params): Query<SlotListParams>,
) -> Result<Json<PageResult<Document>>, ApiError> {
    let filter = params.filter().map_err(domain_error)?;
    let mut options = extract_params(&paging);
    if let Some(select) = params.select {
        options = options.with_select(Projection::new(select));
    }

    match state.slots.list_slots_for_room(&id, filter, options).await {
        Ok(page) => Ok(Json(page)),
        Err(SlotListError::Room(e)) => Err(domain_error(e)),
        Err(SlotListError::Page(e)) => Err(pagination_error(e)),
    }
}
