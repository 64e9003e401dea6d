use sqlx::sqlite::SqlitePool;
use crate::models::CourtInput;

/// Demo account every hosted game is attributed to
pub const HOST_EMAIL: &str = "user1@example.com";

/// Insert the demo rows the app ships with. Idempotent: rows are looked up
/// by their unique names first, so restarts do not duplicate them.
pub async fn ensure_seed_data(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let host = match super::find_user_by_email(pool, HOST_EMAIL).await? {
        Some(user) => user,
        None => super::insert_user(pool, HOST_EMAIL, "password123", "홍길동", "USER").await?,
    };

    if super::find_court_by_name(pool, "올림픽 체육관").await?.is_none() {
        let court = CourtInput {
            name: "올림픽 체육관".to_string(),
            address: "서울시 송파구 올림픽로 424".to_string(),
            description: Some("장애인 농구 전용 코트".to_string()),
            wheelchair_access: true,
            ..CourtInput::default()
        };
        super::insert_court(pool, &court).await?;
    }

    if super::find_court_by_name(pool, "체육문화회관").await?.is_none() {
        let court = CourtInput {
            name: "체육문화회관".to_string(),
            address: "서울시 강남구 삼성로 123".to_string(),
            description: Some("실내 농구장".to_string()),
            ..CourtInput::default()
        };
        super::insert_court(pool, &court).await?;
    }

    let dragons = match super::find_team_by_name(pool, "서울 드래곤즈").await? {
        Some(team) => team,
        None => {
            super::insert_team(pool, "서울 드래곤즈", Some("서울 연합 휠체어 농구팀")).await?
        }
    };
    super::add_team_member(pool, dragons.id, host.id).await?;

    if super::find_team_by_name(pool, "부산 씨걸스").await?.is_none() {
        super::insert_team(pool, "부산 씨걸스", Some("부산 연합 휠체어 농구팀")).await?;
    }

    tracing::info!("Seed data is in place.");

    Ok(())
}
