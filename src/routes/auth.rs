use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{LoginInput, SignupInput, User};

// POST /api/auth/signup - Register a new account
pub async fn signup(
    State(pool): State<SqlitePool>,
    Json(input): Json<SignupInput>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if input.email.is_empty() || input.password.is_empty() || input.name.is_empty() {
        return Err(ApiError::bad_request("이메일, 비밀번호, 이름을 모두 입력해주세요."));
    }

    let existing = db::find_user_by_email(&pool, &input.email)
        .await
        .map_err(|e| ApiError::db("회원가입에 실패했습니다.", e))?;

    if existing.is_some() {
        return Err(ApiError::bad_request("이미 사용 중인 이메일입니다."));
    }

    let user = db::insert_user(&pool, &input.email, &input.password, &input.name, "USER")
        .await
        .map_err(|e| ApiError::db("회원가입에 실패했습니다.", e))?;

    Ok((StatusCode::CREATED, Json(user.into_public())))
}

// POST /api/auth/login - Check credentials and return the account
//
// The stored password is compared literally. Unknown email and wrong
// password produce the same 401 so the response does not reveal which
// part failed.
pub async fn login(
    State(pool): State<SqlitePool>,
    Json(input): Json<LoginInput>,
) -> Result<Json<User>, ApiError> {
    if input.email.is_empty() || input.password.is_empty() {
        return Err(ApiError::bad_request("이메일과 비밀번호를 모두 입력해주세요."));
    }

    let user = db::find_user_by_email(&pool, &input.email)
        .await
        .map_err(|e| ApiError::db("로그인에 실패했습니다.", e))?
        .ok_or_else(|| ApiError::unauthorized("이메일 또는 비밀번호가 일치하지 않습니다."))?;

    if user.password != input.password {
        return Err(ApiError::unauthorized("이메일 또는 비밀번호가 일치하지 않습니다."));
    }

    Ok(Json(user.into_public()))
}
