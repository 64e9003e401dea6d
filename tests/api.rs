use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use basket_match_api::{app, db};

/// Fresh app over its own in-memory database, seeded like production.
/// A single connection keeps every query on the same SQLite memory file.
async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");

    db::init_schema(&pool).await.expect("create schema");
    db::seed::ensure_seed_data(&pool).await.expect("seed demo data");

    app(pool)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response is not JSON")
    };
    (status, body)
}

fn find_by_name<'a>(items: &'a [Value], name: &str) -> &'a Value {
    items
        .iter()
        .find(|item| item["name"] == name)
        .unwrap_or_else(|| panic!("no row named {name}"))
}

async fn seeded_court_id(app: &Router) -> i64 {
    let (status, body) = send(app, get_request("/api/courts")).await;
    assert_eq!(status, StatusCode::OK);
    find_by_name(body.as_array().unwrap(), "올림픽 체육관")["id"]
        .as_i64()
        .unwrap()
}

async fn seeded_team_ids(app: &Router) -> (i64, i64) {
    let (status, body) = send(app, get_request("/api/teams")).await;
    assert_eq!(status, StatusCode::OK);
    let teams = body.as_array().unwrap();
    let dragons = find_by_name(teams, "서울 드래곤즈")["id"].as_i64().unwrap();
    let seagulls = find_by_name(teams, "부산 씨걸스")["id"].as_i64().unwrap();
    (dragons, seagulls)
}

fn valid_game_body(court_id: i64, home: i64, away: i64) -> Value {
    json!({
        "title": "주말 연습 경기",
        "date": "2030-08-20",
        "startTime": "18:00",
        "endTime": "20:00",
        "courtId": court_id,
        "homeTeamId": home,
        "awayTeamId": away,
        "skillLevel": "intermediate",
        "maxPlayers": 12,
    })
}

#[tokio::test]
async fn health_check_reports_ok() {
    let app = test_app().await;
    let (status, body) = send(&app, get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn signup_returns_user_without_password() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signup",
            json!({"email": "new@example.com", "password": "pw1234", "name": "김철수"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(body["name"], "김철수");
    assert_eq!(body["role"], "USER");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signup",
            json!({"email": "user1@example.com", "password": "pw", "name": "중복"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "이미 사용 중인 이메일입니다.");
}

#[tokio::test]
async fn signup_requires_all_fields() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signup",
            json!({"email": "partial@example.com", "password": "pw"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "이메일, 비밀번호, 이름을 모두 입력해주세요.");
}

#[tokio::test]
async fn login_returns_user_without_password() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({"email": "user1@example.com", "password": "password123"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "user1@example.com");
    assert_eq!(body["name"], "홍길동");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({"email": "user1@example.com", "password": "nope"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "이메일 또는 비밀번호가 일치하지 않습니다.");
}

#[tokio::test]
async fn login_rejects_unknown_email() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({"email": "ghost@example.com", "password": "password123"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "이메일 또는 비밀번호가 일치하지 않습니다.");
}

#[tokio::test]
async fn courts_list_returns_seeded_rows() {
    let app = test_app().await;
    let (status, body) = send(&app, get_request("/api/courts")).await;

    assert_eq!(status, StatusCode::OK);
    let courts = body.as_array().unwrap();
    assert_eq!(courts.len(), 2);

    let olympic = find_by_name(courts, "올림픽 체육관");
    assert_eq!(olympic["address"], "서울시 송파구 올림픽로 424");
    assert_eq!(olympic["wheelchairAccess"], true);
}

#[tokio::test]
async fn create_court_requires_name_and_address() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request("POST", "/api/courts", json!({"name": "주소 없는 코트"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "이름과 주소는 필수 항목입니다.");
}

#[tokio::test]
async fn court_crud_roundtrip() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/courts",
            json!({
                "name": "한강 야외 코트",
                "address": "서울시 영등포구 여의도동 84",
                "courtType": "야외",
                "wheelchairAccess": true,
                "parkingInfo": "공영 주차장 이용",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["wheelchairAccess"], true);

    let (status, fetched) = send(&app, get_request(&format!("/api/courts/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["courtType"], "야외");

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/courts/{id}"),
            json!({"contact": "02-1234-5678"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["contact"], "02-1234-5678");
    // untouched fields keep their stored values
    assert_eq!(updated["name"], "한강 야외 코트");
    assert_eq!(updated["parkingInfo"], "공영 주차장 이용");

    let (status, body) = send(&app, delete_request(&format!("/api/courts/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "경기장이 성공적으로 삭제되었습니다.");

    let (status, _) = send(&app, get_request(&format!("/api/courts/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn teams_list_includes_members_without_passwords() {
    let app = test_app().await;
    let (status, body) = send(&app, get_request("/api/teams")).await;

    assert_eq!(status, StatusCode::OK);
    let teams = body.as_array().unwrap();
    assert_eq!(teams.len(), 2);

    let dragons = find_by_name(teams, "서울 드래곤즈");
    let members = dragons["members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["email"], "user1@example.com");
    assert!(members[0].get("password").is_none());

    let seagulls = find_by_name(teams, "부산 씨걸스");
    assert_eq!(seagulls["members"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_team_rejects_duplicate_name() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request("POST", "/api/teams", json!({"name": "서울 드래곤즈"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "이미 사용 중인 팀 이름입니다.");
}

#[tokio::test]
async fn create_team_skips_unknown_member_ids() {
    let app = test_app().await;

    let (_, host) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({"email": "user1@example.com", "password": "password123"}),
        ),
    )
    .await;
    let host_id = host["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/teams",
            json!({"name": "인천 호크스", "memberIds": [host_id, 9999]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let members = body["members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["id"].as_i64().unwrap(), host_id);
}

#[tokio::test]
async fn update_team_checks_duplicate_name() {
    let app = test_app().await;
    let (dragons, _) = seeded_team_ids(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/teams/{dragons}"),
            json!({"name": "부산 씨걸스"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "이미 사용 중인 팀 이름입니다.");

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/teams/{dragons}"),
            json!({"description": "서울 연합 1군"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "서울 연합 1군");
    assert_eq!(body["name"], "서울 드래곤즈");
}

#[tokio::test]
async fn unknown_game_returns_404() {
    let app = test_app().await;
    let (status, body) = send(&app, get_request("/api/games/9999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "경기를 찾을 수 없습니다.");
}

#[tokio::test]
async fn create_game_returns_detail_and_appears_in_list() {
    let app = test_app().await;
    let court_id = seeded_court_id(&app).await;
    let (dragons, seagulls) = seeded_team_ids(&app).await;

    let (status, created) = send(
        &app,
        json_request("POST", "/api/games", valid_game_body(court_id, dragons, seagulls)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "SCHEDULED");
    assert_eq!(created["date"], "2030-08-20");
    assert_eq!(created["startTime"], "2030-08-20T18:00:00");
    assert_eq!(created["court"]["name"], "올림픽 체육관");
    assert_eq!(created["host"]["email"], "user1@example.com");
    assert!(created["host"].get("password").is_none());
    assert_eq!(created["homeTeam"]["name"], "서울 드래곤즈");
    assert_eq!(created["awayTeam"]["name"], "부산 씨걸스");

    let (status, listed) = send(&app, get_request("/api/games")).await;
    assert_eq!(status, StatusCode::OK);
    let games = listed.as_array().unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0]["id"], created["id"]);
}

#[tokio::test]
async fn create_game_rejects_identical_teams() {
    let app = test_app().await;
    let court_id = seeded_court_id(&app).await;
    let (dragons, _) = seeded_team_ids(&app).await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/games", valid_game_body(court_id, dragons, dragons)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "홈 팀과 어웨이 팀은 같을 수 없습니다.");
}

#[tokio::test]
async fn create_game_rejects_unknown_court() {
    let app = test_app().await;
    let (dragons, seagulls) = seeded_team_ids(&app).await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/games", valid_game_body(9999, dragons, seagulls)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "코트 ID 9999를 찾을 수 없습니다.");
}

#[tokio::test]
async fn create_game_rejects_bad_date() {
    let app = test_app().await;
    let court_id = seeded_court_id(&app).await;

    let mut body = valid_game_body(court_id, 0, 0);
    body["homeTeamId"] = Value::Null;
    body["awayTeamId"] = Value::Null;
    body["date"] = json!("2030년 8월 20일");

    let (status, response) = send(&app, json_request("POST", "/api/games", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "잘못된 날짜/시간 형식입니다. ISO 형식을 사용해주세요.");
}

#[tokio::test]
async fn update_game_persists_new_values() {
    let app = test_app().await;
    let court_id = seeded_court_id(&app).await;
    let (dragons, seagulls) = seeded_team_ids(&app).await;

    let (_, created) = send(
        &app,
        json_request("POST", "/api/games", valid_game_body(court_id, dragons, seagulls)),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/games/{id}"),
            json!({
                "title": "리그 결승전",
                "skillLevel": "advanced",
                "maxPlayers": 16,
                "status": "IN_PROGRESS",
                "startTime": "19:30",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "리그 결승전");
    assert_eq!(updated["startTime"], "2030-08-20T19:30:00");

    let (status, fetched) = send(&app, get_request(&format!("/api/games/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "리그 결승전");
    assert_eq!(fetched["skillLevel"], "advanced");
    assert_eq!(fetched["maxPlayers"], 16);
    assert_eq!(fetched["status"], "IN_PROGRESS");
    // untouched fields keep their stored values
    assert_eq!(fetched["endTime"], "2030-08-20T20:00:00");
    assert_eq!(fetched["awayTeam"]["name"], "부산 씨걸스");
}

#[tokio::test]
async fn update_game_rejects_identical_teams() {
    let app = test_app().await;
    let court_id = seeded_court_id(&app).await;
    let (dragons, seagulls) = seeded_team_ids(&app).await;

    let (_, created) = send(
        &app,
        json_request("POST", "/api/games", valid_game_body(court_id, dragons, seagulls)),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/games/{id}"),
            json!({"homeTeamId": seagulls}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "홈 팀과 어웨이 팀은 같을 수 없습니다.");
}

#[tokio::test]
async fn delete_game_then_get_returns_404() {
    let app = test_app().await;
    let court_id = seeded_court_id(&app).await;
    let (dragons, seagulls) = seeded_team_ids(&app).await;

    let (_, created) = send(
        &app,
        json_request("POST", "/api/games", valid_game_body(court_id, dragons, seagulls)),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, delete_request(&format!("/api/games/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "게임이 성공적으로 삭제되었습니다.");

    let (status, _) = send(&app, get_request(&format!("/api/games/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_team_referenced_by_game_is_blocked() {
    let app = test_app().await;
    let court_id = seeded_court_id(&app).await;
    let (dragons, seagulls) = seeded_team_ids(&app).await;

    let (_, created) = send(
        &app,
        json_request("POST", "/api/games", valid_game_body(court_id, dragons, seagulls)),
    )
    .await;
    let game_id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, delete_request(&format!("/api/teams/{dragons}"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "팀이 참여한 게임이 있어 삭제할 수 없습니다. 해당 게임을 먼저 처리해주세요."
    );

    // once the game is gone the team can be removed
    let (status, _) = send(&app, delete_request(&format!("/api/games/{game_id}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, delete_request(&format!("/api/teams/{dragons}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "팀이 성공적으로 삭제되었습니다.");
}
