use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use crate::models::*;

pub mod seed;

/// Create all tables if they do not exist yet. Runs at startup, mirroring
/// what the demo data loader expects to find.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS users (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               email TEXT NOT NULL UNIQUE,
               password TEXT NOT NULL,
               name TEXT NOT NULL,
               role TEXT NOT NULL DEFAULT 'USER',
               created_at TEXT NOT NULL,
               updated_at TEXT NOT NULL
           )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS courts (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               name TEXT NOT NULL,
               address TEXT NOT NULL,
               description TEXT,
               image_url TEXT,
               latitude REAL,
               longitude REAL,
               contact TEXT,
               operating_hours TEXT,
               price TEXT,
               court_type TEXT,
               floor_type TEXT,
               wheelchair_access INTEGER NOT NULL DEFAULT 0,
               ramp_info TEXT,
               elevator_info TEXT,
               toilet_info TEXT,
               parking_info TEXT,
               shower_info TEXT,
               created_at TEXT NOT NULL,
               updated_at TEXT NOT NULL
           )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS teams (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               name TEXT NOT NULL UNIQUE,
               description TEXT,
               created_at TEXT NOT NULL,
               updated_at TEXT NOT NULL
           )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS team_members (
               user_id INTEGER NOT NULL REFERENCES users (id),
               team_id INTEGER NOT NULL REFERENCES teams (id),
               PRIMARY KEY (user_id, team_id)
           )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS games (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               title TEXT,
               date TEXT NOT NULL,
               start_time TEXT NOT NULL,
               end_time TEXT NOT NULL,
               status TEXT NOT NULL DEFAULT 'SCHEDULED',
               skill_level TEXT,
               max_players INTEGER NOT NULL DEFAULT 10,
               current_players INTEGER NOT NULL DEFAULT 0,
               description TEXT,
               requirements TEXT,
               court_id INTEGER NOT NULL REFERENCES courts (id),
               host_id INTEGER NOT NULL REFERENCES users (id),
               home_team_id INTEGER REFERENCES teams (id),
               away_team_id INTEGER REFERENCES teams (id),
               created_at TEXT NOT NULL,
               updated_at TEXT NOT NULL
           )"#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

// User queries
pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"SELECT * FROM users WHERE email = ?"#
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"SELECT * FROM users WHERE id = ?"#
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_user(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    name: &str,
    role: &str,
) -> Result<UserRow, sqlx::Error> {
    let now = Utc::now().naive_utc();
    sqlx::query_as::<_, UserRow>(
        r#"INSERT INTO users (email, password, name, role, created_at, updated_at)
           VALUES (?, ?, ?, ?, ?, ?)
           RETURNING *"#,
    )
    .bind(email)
    .bind(password)
    .bind(name)
    .bind(role)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

// Court queries
pub async fn get_all_courts(pool: &SqlitePool) -> Result<Vec<Court>, sqlx::Error> {
    sqlx::query_as::<_, Court>(
        r#"SELECT * FROM courts ORDER BY name"#
    )
    .fetch_all(pool)
    .await
}

pub async fn find_court_by_id(pool: &SqlitePool, court_id: i64) -> Result<Option<Court>, sqlx::Error> {
    sqlx::query_as::<_, Court>(
        r#"SELECT * FROM courts WHERE id = ?"#
    )
    .bind(court_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_court_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Court>, sqlx::Error> {
    sqlx::query_as::<_, Court>(
        r#"SELECT * FROM courts WHERE name = ?"#
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn insert_court(pool: &SqlitePool, input: &CourtInput) -> Result<Court, sqlx::Error> {
    let now = Utc::now().naive_utc();
    sqlx::query_as::<_, Court>(
        r#"INSERT INTO courts (
               name, address, description, image_url, latitude, longitude,
               contact, operating_hours, price, court_type, floor_type,
               wheelchair_access, ramp_info, elevator_info, toilet_info,
               parking_info, shower_info, created_at, updated_at
           )
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
           RETURNING *"#,
    )
    .bind(&input.name)
    .bind(&input.address)
    .bind(&input.description)
    .bind(&input.image_url)
    .bind(input.latitude)
    .bind(input.longitude)
    .bind(&input.contact)
    .bind(&input.operating_hours)
    .bind(&input.price)
    .bind(&input.court_type)
    .bind(&input.floor_type)
    .bind(input.wheelchair_access)
    .bind(&input.ramp_info)
    .bind(&input.elevator_info)
    .bind(&input.toilet_info)
    .bind(&input.parking_info)
    .bind(&input.shower_info)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update_court(pool: &SqlitePool, court: &Court) -> Result<Court, sqlx::Error> {
    let now = Utc::now().naive_utc();
    sqlx::query_as::<_, Court>(
        r#"UPDATE courts SET
               name = ?, address = ?, description = ?, image_url = ?,
               latitude = ?, longitude = ?, contact = ?, operating_hours = ?,
               price = ?, court_type = ?, floor_type = ?, wheelchair_access = ?,
               ramp_info = ?, elevator_info = ?, toilet_info = ?,
               parking_info = ?, shower_info = ?, updated_at = ?
           WHERE id = ?
           RETURNING *"#,
    )
    .bind(&court.name)
    .bind(&court.address)
    .bind(&court.description)
    .bind(&court.image_url)
    .bind(court.latitude)
    .bind(court.longitude)
    .bind(&court.contact)
    .bind(&court.operating_hours)
    .bind(&court.price)
    .bind(&court.court_type)
    .bind(&court.floor_type)
    .bind(court.wheelchair_access)
    .bind(&court.ramp_info)
    .bind(&court.elevator_info)
    .bind(&court.toilet_info)
    .bind(&court.parking_info)
    .bind(&court.shower_info)
    .bind(now)
    .bind(court.id)
    .fetch_one(pool)
    .await
}

pub async fn delete_court(pool: &SqlitePool, court_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"DELETE FROM courts WHERE id = ?"#
    )
    .bind(court_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

// Team queries
pub async fn get_all_teams(pool: &SqlitePool) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"SELECT * FROM teams ORDER BY name"#
    )
    .fetch_all(pool)
    .await
}

pub async fn find_team_by_id(pool: &SqlitePool, team_id: i64) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"SELECT * FROM teams WHERE id = ?"#
    )
    .bind(team_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_team_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"SELECT * FROM teams WHERE name = ?"#
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// Duplicate-name lookup for renames, ignoring the team being renamed
pub async fn find_other_team_by_name(
    pool: &SqlitePool,
    name: &str,
    team_id: i64,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"SELECT * FROM teams WHERE name = ? AND id != ?"#
    )
    .bind(name)
    .bind(team_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_team(
    pool: &SqlitePool,
    name: &str,
    description: Option<&str>,
) -> Result<Team, sqlx::Error> {
    let now = Utc::now().naive_utc();
    sqlx::query_as::<_, Team>(
        r#"INSERT INTO teams (name, description, created_at, updated_at)
           VALUES (?, ?, ?, ?)
           RETURNING *"#,
    )
    .bind(name)
    .bind(description)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update_team(pool: &SqlitePool, team: &Team) -> Result<Team, sqlx::Error> {
    let now = Utc::now().naive_utc();
    sqlx::query_as::<_, Team>(
        r#"UPDATE teams SET name = ?, description = ?, updated_at = ?
           WHERE id = ?
           RETURNING *"#,
    )
    .bind(&team.name)
    .bind(&team.description)
    .bind(now)
    .bind(team.id)
    .fetch_one(pool)
    .await
}

pub async fn delete_team(pool: &SqlitePool, team_id: i64) -> Result<u64, sqlx::Error> {
    sqlx::query(
        r#"DELETE FROM team_members WHERE team_id = ?"#
    )
    .bind(team_id)
    .execute(pool)
    .await?;

    let result = sqlx::query(
        r#"DELETE FROM teams WHERE id = ?"#
    )
    .bind(team_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn get_team_members(pool: &SqlitePool, team_id: i64) -> Result<Vec<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"SELECT u.*
           FROM users u
           INNER JOIN team_members tm ON tm.user_id = u.id
           WHERE tm.team_id = ?
           ORDER BY u.name"#,
    )
    .bind(team_id)
    .fetch_all(pool)
    .await
}

pub async fn add_team_member(pool: &SqlitePool, team_id: i64, user_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT OR IGNORE INTO team_members (user_id, team_id) VALUES (?, ?)"#
    )
    .bind(user_id)
    .bind(team_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// How many games still reference this team as home or away side
pub async fn count_games_for_team(pool: &SqlitePool, team_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"SELECT COUNT(*) FROM games WHERE home_team_id = ? OR away_team_id = ?"#
    )
    .bind(team_id)
    .bind(team_id)
    .fetch_one(pool)
    .await
}

pub async fn get_home_games_for_team(pool: &SqlitePool, team_id: i64) -> Result<Vec<GameRecord>, sqlx::Error> {
    sqlx::query_as::<_, GameRecord>(
        r#"SELECT * FROM games WHERE home_team_id = ? ORDER BY start_time"#
    )
    .bind(team_id)
    .fetch_all(pool)
    .await
}

pub async fn get_away_games_for_team(pool: &SqlitePool, team_id: i64) -> Result<Vec<GameRecord>, sqlx::Error> {
    sqlx::query_as::<_, GameRecord>(
        r#"SELECT * FROM games WHERE away_team_id = ? ORDER BY start_time"#
    )
    .bind(team_id)
    .fetch_all(pool)
    .await
}

// Game queries
pub async fn get_all_games(pool: &SqlitePool) -> Result<Vec<GameRecord>, sqlx::Error> {
    sqlx::query_as::<_, GameRecord>(
        r#"SELECT * FROM games ORDER BY start_time"#
    )
    .fetch_all(pool)
    .await
}

pub async fn find_game_by_id(pool: &SqlitePool, game_id: i64) -> Result<Option<GameRecord>, sqlx::Error> {
    sqlx::query_as::<_, GameRecord>(
        r#"SELECT * FROM games WHERE id = ?"#
    )
    .bind(game_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_game(pool: &SqlitePool, game: &NewGame) -> Result<GameRecord, sqlx::Error> {
    let now = Utc::now().naive_utc();
    sqlx::query_as::<_, GameRecord>(
        r#"INSERT INTO games (
               title, date, start_time, end_time, status, skill_level,
               max_players, current_players, description, requirements,
               court_id, host_id, home_team_id, away_team_id,
               created_at, updated_at
           )
           VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?, ?, ?, ?)
           RETURNING *"#,
    )
    .bind(&game.title)
    .bind(game.date)
    .bind(game.start_time)
    .bind(game.end_time)
    .bind(game.status)
    .bind(&game.skill_level)
    .bind(game.max_players)
    .bind(&game.description)
    .bind(&game.requirements)
    .bind(game.court_id)
    .bind(game.host_id)
    .bind(game.home_team_id)
    .bind(game.away_team_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update_game(pool: &SqlitePool, game: &GameRecord) -> Result<GameRecord, sqlx::Error> {
    let now = Utc::now().naive_utc();
    sqlx::query_as::<_, GameRecord>(
        r#"UPDATE games SET
               title = ?, date = ?, start_time = ?, end_time = ?, status = ?,
               skill_level = ?, max_players = ?, current_players = ?,
               description = ?, requirements = ?, court_id = ?, host_id = ?,
               home_team_id = ?, away_team_id = ?, updated_at = ?
           WHERE id = ?
           RETURNING *"#,
    )
    .bind(&game.title)
    .bind(game.date)
    .bind(game.start_time)
    .bind(game.end_time)
    .bind(game.status)
    .bind(&game.skill_level)
    .bind(game.max_players)
    .bind(game.current_players)
    .bind(&game.description)
    .bind(&game.requirements)
    .bind(game.court_id)
    .bind(game.host_id)
    .bind(game.home_team_id)
    .bind(game.away_team_id)
    .bind(now)
    .bind(game.id)
    .fetch_one(pool)
    .await
}

pub async fn delete_game(pool: &SqlitePool, game_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"DELETE FROM games WHERE id = ?"#
    )
    .bind(game_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
