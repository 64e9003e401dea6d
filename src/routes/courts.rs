use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{Court, CourtInput, CourtUpdate, MessageResponse};

// GET /api/courts - List all courts
pub async fn get_courts(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Court>>, ApiError> {
    let courts = db::get_all_courts(&pool)
        .await
        .map_err(|e| ApiError::db("경기장 목록을 불러오는데 실패했습니다.", e))?;

    Ok(Json(courts))
}

// POST /api/courts - Register a new court
pub async fn create_court(
    State(pool): State<SqlitePool>,
    Json(input): Json<CourtInput>,
) -> Result<(StatusCode, Json<Court>), ApiError> {
    if input.name.is_empty() || input.address.is_empty() {
        return Err(ApiError::bad_request("이름과 주소는 필수 항목입니다."));
    }

    let court = db::insert_court(&pool, &input)
        .await
        .map_err(|e| ApiError::db("코트 생성 중 오류가 발생했습니다.", e))?;

    Ok((StatusCode::CREATED, Json(court)))
}

// GET /api/courts/:id - Get court by ID
pub async fn get_court(
    State(pool): State<SqlitePool>,
    Path(court_id): Path<i64>,
) -> Result<Json<Court>, ApiError> {
    let court = db::find_court_by_id(&pool, court_id)
        .await
        .map_err(|e| ApiError::db("경기장 정보를 불러오는데 실패했습니다.", e))?
        .ok_or_else(|| ApiError::not_found("경기장을 찾을 수 없습니다."))?;

    Ok(Json(court))
}

// PUT /api/courts/:id - Update a court; absent fields keep stored values
pub async fn update_court(
    State(pool): State<SqlitePool>,
    Path(court_id): Path<i64>,
    Json(input): Json<CourtUpdate>,
) -> Result<Json<Court>, ApiError> {
    let mut court = db::find_court_by_id(&pool, court_id)
        .await
        .map_err(|e| ApiError::db("코트 정보 수정 중 오류가 발생했습니다.", e))?
        .ok_or_else(|| ApiError::not_found("경기장을 찾을 수 없습니다."))?;

    if let Some(name) = input.name {
        court.name = name;
    }
    if let Some(address) = input.address {
        court.address = address;
    }
    if input.description.is_some() {
        court.description = input.description;
    }
    if input.image_url.is_some() {
        court.image_url = input.image_url;
    }
    if input.latitude.is_some() {
        court.latitude = input.latitude;
    }
    if input.longitude.is_some() {
        court.longitude = input.longitude;
    }
    if input.contact.is_some() {
        court.contact = input.contact;
    }
    if input.operating_hours.is_some() {
        court.operating_hours = input.operating_hours;
    }
    if input.price.is_some() {
        court.price = input.price;
    }
    if input.court_type.is_some() {
        court.court_type = input.court_type;
    }
    if input.floor_type.is_some() {
        court.floor_type = input.floor_type;
    }
    if let Some(wheelchair_access) = input.wheelchair_access {
        court.wheelchair_access = wheelchair_access;
    }
    if input.ramp_info.is_some() {
        court.ramp_info = input.ramp_info;
    }
    if input.elevator_info.is_some() {
        court.elevator_info = input.elevator_info;
    }
    if input.toilet_info.is_some() {
        court.toilet_info = input.toilet_info;
    }
    if input.parking_info.is_some() {
        court.parking_info = input.parking_info;
    }
    if input.shower_info.is_some() {
        court.shower_info = input.shower_info;
    }

    if court.name.is_empty() || court.address.is_empty() {
        return Err(ApiError::bad_request("이름과 주소는 필수 항목입니다."));
    }

    let court = db::update_court(&pool, &court)
        .await
        .map_err(|e| ApiError::db("코트 정보 수정 중 오류가 발생했습니다.", e))?;

    Ok(Json(court))
}

// DELETE /api/courts/:id - Remove a court
pub async fn delete_court(
    State(pool): State<SqlitePool>,
    Path(court_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = db::delete_court(&pool, court_id)
        .await
        .map_err(|e| ApiError::db("코트 삭제 중 오류가 발생했습니다.", e))?;

    if deleted == 0 {
        return Err(ApiError::not_found("경기장을 찾을 수 없습니다."));
    }

    Ok(Json(MessageResponse {
        message: "경기장이 성공적으로 삭제되었습니다.".to_string(),
    }))
}
