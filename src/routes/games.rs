use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::db::seed::HOST_EMAIL;
use crate::error::ApiError;
use crate::models::{
    CreateGameInput, GameDetail, GameRecord, GameStatus, MessageResponse, NewGame, UpdateGameInput,
};

/// Parse a calendar day, either bare `YYYY-MM-DD` or the date part of a
/// full ISO datetime as browser clients send it.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Combine a day with a clock time. Accepts `HH:MM`, `HH:MM:SS`, or a full
/// ISO datetime (whose own date wins over `date`).
fn parse_instant(date: NaiveDate, raw: &str) -> Option<NaiveDateTime> {
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return Some(date.and_time(time));
    }
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M:%S") {
        return Some(date.and_time(time));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Eager-load a game's relations into the response shape every game
/// endpoint returns. `context` is the localized message used if a lookup
/// that should succeed does not.
async fn load_game_detail(
    pool: &SqlitePool,
    game: GameRecord,
    context: &str,
) -> Result<GameDetail, ApiError> {
    let court = db::find_court_by_id(pool, game.court_id)
        .await
        .map_err(|e| ApiError::db(context, e))?
        .ok_or_else(|| ApiError::internal(context))?;

    let host = db::find_user_by_id(pool, game.host_id)
        .await
        .map_err(|e| ApiError::db(context, e))?
        .ok_or_else(|| ApiError::internal(context))?
        .into_public();

    let home_team = match game.home_team_id {
        Some(team_id) => db::find_team_by_id(pool, team_id)
            .await
            .map_err(|e| ApiError::db(context, e))?,
        None => None,
    };

    let away_team = match game.away_team_id {
        Some(team_id) => db::find_team_by_id(pool, team_id)
            .await
            .map_err(|e| ApiError::db(context, e))?,
        None => None,
    };

    Ok(GameDetail {
        game,
        court,
        host,
        home_team,
        away_team,
    })
}

async fn check_court_exists(pool: &SqlitePool, court_id: i64, context: &str) -> Result<(), ApiError> {
    let court = db::find_court_by_id(pool, court_id)
        .await
        .map_err(|e| ApiError::db(context, e))?;

    if court.is_none() {
        return Err(ApiError::not_found(format!("코트 ID {}를 찾을 수 없습니다.", court_id)));
    }
    Ok(())
}

async fn check_team_exists(
    pool: &SqlitePool,
    team_id: i64,
    side: &str,
    context: &str,
) -> Result<(), ApiError> {
    let team = db::find_team_by_id(pool, team_id)
        .await
        .map_err(|e| ApiError::db(context, e))?;

    if team.is_none() {
        return Err(ApiError::not_found(format!("{} 팀 ID {}를 찾을 수 없습니다.", side, team_id)));
    }
    Ok(())
}

// GET /api/games - List all games with court, host and teams embedded
pub async fn get_games(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<GameDetail>>, ApiError> {
    let games = db::get_all_games(&pool)
        .await
        .map_err(|e| ApiError::db("경기 목록을 불러오는데 실패했습니다.", e))?;

    let mut details = Vec::with_capacity(games.len());
    for game in games {
        let detail = load_game_detail(&pool, game, "경기 목록을 불러오는데 실패했습니다.").await?;
        details.push(detail);
    }

    Ok(Json(details))
}

// POST /api/games - Create a game hosted by the seed demo account
pub async fn create_game(
    State(pool): State<SqlitePool>,
    Json(input): Json<CreateGameInput>,
) -> Result<(StatusCode, Json<GameDetail>), ApiError> {
    let court_id = match input.court_id {
        Some(court_id) if !input.date.is_empty()
            && !input.start_time.is_empty()
            && !input.end_time.is_empty() => court_id,
        _ => return Err(ApiError::bad_request("날짜/시간과 코트 ID는 필수입니다.")),
    };

    let date = parse_date(&input.date)
        .ok_or_else(|| ApiError::bad_request("잘못된 날짜/시간 형식입니다. ISO 형식을 사용해주세요."))?;
    let start_time = parse_instant(date, &input.start_time)
        .ok_or_else(|| ApiError::bad_request("잘못된 날짜/시간 형식입니다. ISO 형식을 사용해주세요."))?;
    let end_time = parse_instant(date, &input.end_time)
        .ok_or_else(|| ApiError::bad_request("잘못된 날짜/시간 형식입니다. ISO 형식을 사용해주세요."))?;

    // Games are attributed to the seeded demo account
    let host = db::find_user_by_email(&pool, HOST_EMAIL)
        .await
        .map_err(|e| ApiError::db("경기 생성에 실패했습니다.", e))?
        .ok_or_else(|| ApiError::not_found("호스트 사용자를 찾을 수 없습니다."))?;

    check_court_exists(&pool, court_id, "경기 생성에 실패했습니다.").await?;

    if let Some(team_id) = input.home_team_id {
        check_team_exists(&pool, team_id, "홈", "경기 생성에 실패했습니다.").await?;
    }
    if let Some(team_id) = input.away_team_id {
        check_team_exists(&pool, team_id, "어웨이", "경기 생성에 실패했습니다.").await?;
    }
    if let (Some(home), Some(away)) = (input.home_team_id, input.away_team_id) {
        if home == away {
            return Err(ApiError::bad_request("홈 팀과 어웨이 팀은 같을 수 없습니다."));
        }
    }

    let new_game = NewGame {
        title: input.title,
        date,
        start_time,
        end_time,
        status: GameStatus::Scheduled,
        skill_level: input.skill_level,
        max_players: input.max_players.unwrap_or(10),
        description: input.description,
        requirements: input.requirements,
        court_id,
        host_id: host.id,
        home_team_id: input.home_team_id,
        away_team_id: input.away_team_id,
    };

    let game = db::insert_game(&pool, &new_game)
        .await
        .map_err(|e| ApiError::db("경기 생성에 실패했습니다.", e))?;

    let detail = load_game_detail(&pool, game, "경기 생성에 실패했습니다.").await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /api/games/:id - Get one game with relations
pub async fn get_game(
    State(pool): State<SqlitePool>,
    Path(game_id): Path<i64>,
) -> Result<Json<GameDetail>, ApiError> {
    let game = db::find_game_by_id(&pool, game_id)
        .await
        .map_err(|e| ApiError::db("경기 정보를 불러오는데 실패했습니다.", e))?
        .ok_or_else(|| ApiError::not_found("경기를 찾을 수 없습니다."))?;

    let detail = load_game_detail(&pool, game, "경기 정보를 불러오는데 실패했습니다.").await?;

    Ok(Json(detail))
}

// PUT /api/games/:id - Update a game; absent fields keep stored values
pub async fn update_game(
    State(pool): State<SqlitePool>,
    Path(game_id): Path<i64>,
    Json(input): Json<UpdateGameInput>,
) -> Result<Json<GameDetail>, ApiError> {
    let mut game = db::find_game_by_id(&pool, game_id)
        .await
        .map_err(|e| ApiError::db("경기 수정에 실패했습니다.", e))?
        .ok_or_else(|| ApiError::not_found("경기를 찾을 수 없습니다."))?;

    let date = match &input.date {
        Some(raw) => parse_date(raw)
            .ok_or_else(|| ApiError::bad_request("잘못된 날짜/시간 형식입니다. ISO 형식을 사용해주세요."))?,
        None => game.date,
    };

    // Start and end instants are recombined from whichever of date and
    // clock time the request supplied; the stored value fills the gap.
    game.start_time = match &input.start_time {
        Some(raw) => parse_instant(date, raw)
            .ok_or_else(|| ApiError::bad_request("잘못된 날짜/시간 형식입니다. ISO 형식을 사용해주세요."))?,
        None => date.and_time(game.start_time.time()),
    };
    game.end_time = match &input.end_time {
        Some(raw) => parse_instant(date, raw)
            .ok_or_else(|| ApiError::bad_request("잘못된 날짜/시간 형식입니다. ISO 형식을 사용해주세요."))?,
        None => date.and_time(game.end_time.time()),
    };
    game.date = date;

    if input.title.is_some() {
        game.title = input.title;
    }
    if let Some(status) = input.status {
        game.status = status;
    }
    if input.skill_level.is_some() {
        game.skill_level = input.skill_level;
    }
    if let Some(max_players) = input.max_players {
        game.max_players = max_players;
    }
    if input.description.is_some() {
        game.description = input.description;
    }
    if input.requirements.is_some() {
        game.requirements = input.requirements;
    }

    if let Some(court_id) = input.court_id {
        check_court_exists(&pool, court_id, "경기 수정에 실패했습니다.").await?;
        game.court_id = court_id;
    }
    if let Some(host_id) = input.host_id {
        let host = db::find_user_by_id(&pool, host_id)
            .await
            .map_err(|e| ApiError::db("경기 수정에 실패했습니다.", e))?;
        if host.is_none() {
            return Err(ApiError::not_found(format!("사용자 ID {}를 찾을 수 없습니다.", host_id)));
        }
        game.host_id = host_id;
    }
    if let Some(team_id) = input.home_team_id {
        check_team_exists(&pool, team_id, "홈", "경기 수정에 실패했습니다.").await?;
        game.home_team_id = Some(team_id);
    }
    if let Some(team_id) = input.away_team_id {
        check_team_exists(&pool, team_id, "어웨이", "경기 수정에 실패했습니다.").await?;
        game.away_team_id = Some(team_id);
    }

    if let (Some(home), Some(away)) = (game.home_team_id, game.away_team_id) {
        if home == away {
            return Err(ApiError::bad_request("홈 팀과 어웨이 팀은 같을 수 없습니다."));
        }
    }

    let game = db::update_game(&pool, &game)
        .await
        .map_err(|e| ApiError::db("경기 수정에 실패했습니다.", e))?;

    let detail = load_game_detail(&pool, game, "경기 수정에 실패했습니다.").await?;

    Ok(Json(detail))
}

// DELETE /api/games/:id - Remove a game
pub async fn delete_game(
    State(pool): State<SqlitePool>,
    Path(game_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = db::delete_game(&pool, game_id)
        .await
        .map_err(|e| ApiError::db("게임 삭제 중 오류가 발생했습니다.", e))?;

    if deleted == 0 {
        return Err(ApiError::not_found("경기를 찾을 수 없습니다."));
    }

    Ok(Json(MessageResponse {
        message: "게임이 성공적으로 삭제되었습니다.".to_string(),
    }))
}
