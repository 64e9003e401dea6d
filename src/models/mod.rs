use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Deserialize};

/// User row as stored. Never serialized directly so the password column
/// cannot leak; convert with [`UserRow::into_public`] first.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// User info for API responses (password stripped)
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl UserRow {
    pub fn into_public(self) -> User {
        User {
            id: self.id,
            email: self.email,
            name: self.name,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// Request body for POST /api/auth/signup. Missing fields deserialize to
// empty strings and are rejected together with explicitly empty ones.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

// Request body for POST /api/auth/login
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Court with venue and accessibility metadata
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact: Option<String>,
    pub operating_hours: Option<String>,
    pub price: Option<String>,
    pub court_type: Option<String>,
    pub floor_type: Option<String>,
    pub wheelchair_access: bool,
    pub ramp_info: Option<String>,
    pub elevator_info: Option<String>,
    pub toilet_info: Option<String>,
    pub parking_info: Option<String>,
    pub shower_info: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Request body for POST /api/courts
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CourtInput {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact: Option<String>,
    pub operating_hours: Option<String>,
    pub price: Option<String>,
    pub court_type: Option<String>,
    pub floor_type: Option<String>,
    pub wheelchair_access: bool,
    pub ramp_info: Option<String>,
    pub elevator_info: Option<String>,
    pub toilet_info: Option<String>,
    pub parking_info: Option<String>,
    pub shower_info: Option<String>,
}

// Request body for PUT /api/courts/{id} - absent fields keep stored values
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CourtUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact: Option<String>,
    pub operating_hours: Option<String>,
    pub price: Option<String>,
    pub court_type: Option<String>,
    pub floor_type: Option<String>,
    pub wheelchair_access: Option<bool>,
    pub ramp_info: Option<String>,
    pub elevator_info: Option<String>,
    pub toilet_info: Option<String>,
    pub parking_info: Option<String>,
    pub shower_info: Option<String>,
}

/// Team from teams table
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Team with its enrolled members for list/create responses
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamWithMembers {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<User>,
}

/// Full team view with the games it appears in
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetail {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<User>,
    pub home_games: Vec<GameRecord>,
    pub away_games: Vec<GameRecord>,
}

// Request body for POST /api/teams
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamInput {
    pub name: String,
    pub description: Option<String>,
    pub member_ids: Vec<i64>,
}

// Request body for PUT /api/teams/{id}
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Lifecycle state of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// Game row from games table
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: i64,
    pub title: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: GameStatus,
    pub skill_level: Option<String>,
    pub max_players: i64,
    pub current_players: i64,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub court_id: i64,
    pub host_id: i64,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Game with its eager-loaded relations, the shape every game endpoint returns
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    #[serde(flatten)]
    pub game: GameRecord,
    pub court: Court,
    pub host: User,
    pub home_team: Option<Team>,
    pub away_team: Option<Team>,
}

/// Fields for inserting a new game once input validation has run
#[derive(Debug)]
pub struct NewGame {
    pub title: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: GameStatus,
    pub skill_level: Option<String>,
    pub max_players: i64,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub court_id: i64,
    pub host_id: i64,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
}

// Request body for POST /api/games. Date is YYYY-MM-DD; startTime/endTime
// are HH:MM clock times or full ISO datetimes, combined with the date.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateGameInput {
    pub title: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub court_id: Option<i64>,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub skill_level: Option<String>,
    pub max_players: Option<i64>,
    pub description: Option<String>,
    pub requirements: Option<String>,
}

// Request body for PUT /api/games/{id} - absent fields keep stored values
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateGameInput {
    pub title: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<GameStatus>,
    pub skill_level: Option<String>,
    pub max_players: Option<i64>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub court_id: Option<i64>,
    pub host_id: Option<i64>,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
}

/// Response body for delete endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
