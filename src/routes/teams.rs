use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{MessageResponse, Team, TeamDetail, TeamInput, TeamUpdate, TeamWithMembers, User};

async fn load_members(pool: &SqlitePool, team_id: i64, context: &str) -> Result<Vec<User>, ApiError> {
    let members = db::get_team_members(pool, team_id)
        .await
        .map_err(|e| ApiError::db(context, e))?;

    Ok(members.into_iter().map(|m| m.into_public()).collect())
}

// GET /api/teams - List all teams with their members
pub async fn get_teams(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<TeamWithMembers>>, ApiError> {
    let teams = db::get_all_teams(&pool)
        .await
        .map_err(|e| ApiError::db("팀 목록을 불러오는데 실패했습니다.", e))?;

    let mut with_members = Vec::with_capacity(teams.len());
    for team in teams {
        let members = load_members(&pool, team.id, "팀 목록을 불러오는데 실패했습니다.").await?;
        with_members.push(TeamWithMembers { team, members });
    }

    Ok(Json(with_members))
}

// POST /api/teams - Create a team, optionally enrolling initial members
pub async fn create_team(
    State(pool): State<SqlitePool>,
    Json(input): Json<TeamInput>,
) -> Result<(StatusCode, Json<TeamWithMembers>), ApiError> {
    if input.name.is_empty() {
        return Err(ApiError::bad_request("팀 이름은 필수 항목입니다."));
    }

    let duplicate = db::find_team_by_name(&pool, &input.name)
        .await
        .map_err(|e| ApiError::db("팀 생성 중 오류가 발생했습니다.", e))?;

    if duplicate.is_some() {
        return Err(ApiError::bad_request("이미 사용 중인 팀 이름입니다."));
    }

    let team = db::insert_team(&pool, &input.name, input.description.as_deref())
        .await
        .map_err(|e| ApiError::db("팀 생성 중 오류가 발생했습니다.", e))?;

    // Unknown member ids are skipped rather than failing the whole request
    for user_id in &input.member_ids {
        let user = db::find_user_by_id(&pool, *user_id)
            .await
            .map_err(|e| ApiError::db("팀 생성 중 오류가 발생했습니다.", e))?;

        match user {
            Some(user) => {
                db::add_team_member(&pool, team.id, user.id)
                    .await
                    .map_err(|e| ApiError::db("팀 생성 중 오류가 발생했습니다.", e))?;
            }
            None => {
                tracing::warn!("User id {} not found when creating team {}", user_id, team.name);
            }
        }
    }

    let members = load_members(&pool, team.id, "팀 생성 중 오류가 발생했습니다.").await?;

    Ok((StatusCode::CREATED, Json(TeamWithMembers { team, members })))
}

// GET /api/teams/:id - Get a team with members and the games it appears in
pub async fn get_team(
    State(pool): State<SqlitePool>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamDetail>, ApiError> {
    let team = db::find_team_by_id(&pool, team_id)
        .await
        .map_err(|e| ApiError::db("팀 정보를 불러오는데 실패했습니다.", e))?
        .ok_or_else(|| ApiError::not_found("팀을 찾을 수 없습니다."))?;

    let members = load_members(&pool, team.id, "팀 정보를 불러오는데 실패했습니다.").await?;

    let home_games = db::get_home_games_for_team(&pool, team.id)
        .await
        .map_err(|e| ApiError::db("팀 정보를 불러오는데 실패했습니다.", e))?;

    let away_games = db::get_away_games_for_team(&pool, team.id)
        .await
        .map_err(|e| ApiError::db("팀 정보를 불러오는데 실패했습니다.", e))?;

    Ok(Json(TeamDetail {
        team,
        members,
        home_games,
        away_games,
    }))
}

// PUT /api/teams/:id - Rename or re-describe a team
pub async fn update_team(
    State(pool): State<SqlitePool>,
    Path(team_id): Path<i64>,
    Json(input): Json<TeamUpdate>,
) -> Result<Json<TeamWithMembers>, ApiError> {
    let mut team = db::find_team_by_id(&pool, team_id)
        .await
        .map_err(|e| ApiError::db("팀 정보 수정 중 오류가 발생했습니다.", e))?
        .ok_or_else(|| ApiError::not_found("팀을 찾을 수 없습니다."))?;

    if let Some(name) = input.name {
        if name != team.name {
            let duplicate = db::find_other_team_by_name(&pool, &name, team.id)
                .await
                .map_err(|e| ApiError::db("팀 정보 수정 중 오류가 발생했습니다.", e))?;

            if duplicate.is_some() {
                return Err(ApiError::bad_request("이미 사용 중인 팀 이름입니다."));
            }
        }
        team.name = name;
    }
    if input.description.is_some() {
        team.description = input.description;
    }

    if team.name.is_empty() {
        return Err(ApiError::bad_request("팀 이름은 필수 항목입니다."));
    }

    let team = db::update_team(&pool, &team)
        .await
        .map_err(|e| ApiError::db("팀 정보 수정 중 오류가 발생했습니다.", e))?;

    let members = load_members(&pool, team.id, "팀 정보 수정 중 오류가 발생했습니다.").await?;

    Ok(Json(TeamWithMembers { team, members }))
}

// DELETE /api/teams/:id - Remove a team unless games still reference it
pub async fn delete_team(
    State(pool): State<SqlitePool>,
    Path(team_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let team: Team = db::find_team_by_id(&pool, team_id)
        .await
        .map_err(|e| ApiError::db("팀 삭제 중 오류가 발생했습니다.", e))?
        .ok_or_else(|| ApiError::not_found("팀을 찾을 수 없습니다."))?;

    let in_use = db::count_games_for_team(&pool, team.id)
        .await
        .map_err(|e| ApiError::db("팀 삭제 중 오류가 발생했습니다.", e))?;

    if in_use > 0 {
        return Err(ApiError::bad_request(
            "팀이 참여한 게임이 있어 삭제할 수 없습니다. 해당 게임을 먼저 처리해주세요.",
        ));
    }

    db::delete_team(&pool, team.id)
        .await
        .map_err(|e| ApiError::db("팀 삭제 중 오류가 발생했습니다.", e))?;

    Ok(Json(MessageResponse {
        message: "팀이 성공적으로 삭제되었습니다.".to_string(),
    }))
}
