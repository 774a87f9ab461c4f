use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, AUTHORIZATION, CONTENT_TYPE,
    ORIGIN,
};
use actix_web::http::{Method, StatusCode};
use actix_web::test::{self, TestRequest};
use actix_web::{web, App};
use records_api::{configure, cors, AppState, Config, ErrorBody, MessageBody};
use records_core::{Career, Category, Student};
use serde_json::json;
use tempfile::TempDir;

const BEARER: &str = "Bearer 12345ABCDEF";

fn state_for(dir: &TempDir) -> web::Data<AppState> {
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    web::Data::new(AppState::new(&config))
}

fn authed(req: TestRequest) -> TestRequest {
    req.insert_header((AUTHORIZATION, BEARER))
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(App::new().app_data($state.clone()).configure(configure)).await
    };
}

#[actix_rt::test]
async fn test_end_to_end_dependency_flow() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(&dir);
    let app = test_app!(state);

    let req = authed(TestRequest::post().uri("/api/categories"))
        .set_json(json!({"name": "Eng"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let eng: Category = test::read_body_json(resp).await;
    assert_eq!(eng.id, 1);

    let req = authed(TestRequest::post().uri("/api/careers"))
        .set_json(json!({"name": "CS", "category": "eng"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let cs: Career = test::read_body_json(resp).await;

    let req = authed(TestRequest::post().uri("/api/students"))
        .set_json(json!({"name": "Ana", "career": "cs"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let ana: Student = test::read_body_json(resp).await;

    let delete = |uri: String| authed(TestRequest::delete().uri(&uri)).to_request();

    let resp = test::call_service(&app, delete(format!("/api/categories/{}", eng.id))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.error.contains("Eng"));

    let resp = test::call_service(&app, delete(format!("/api/careers/{}", cs.id))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, delete(format!("/api/students/{}", ana.id))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: MessageBody = test::read_body_json(resp).await;
    assert_eq!(body.message, "Student deleted successfully.");

    let resp = test::call_service(&app, delete(format!("/api/careers/{}", cs.id))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, delete(format!("/api/categories/{}", eng.id))).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_missing_or_wrong_token_is_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(&dir);
    let app = test_app!(state);

    let req = TestRequest::get().uri("/api/categories").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "Unauthorized. Invalid API Key.");

    let req = TestRequest::post()
        .uri("/api/categories")
        .insert_header((AUTHORIZATION, "Bearer nope"))
        .set_json(json!({"name": "Eng"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Nothing was created by the rejected request
    assert!(state.registry().list_categories(None).is_empty());
}

#[actix_rt::test]
async fn test_student_validation_and_lookup_errors() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(&dir);
    let app = test_app!(state);

    let req = authed(TestRequest::post().uri("/api/students"))
        .set_json(json!({"name": "Ana"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "Missing required fields: name and career.");

    let req = authed(TestRequest::get().uri("/api/students")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    for uri in ["/api/students/99", "/api/students/abc"] {
        let req = authed(TestRequest::get().uri(uri)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }

    let req = authed(TestRequest::delete().uri("/api/students/1")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_students_filtered_by_career() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(&dir);
    let app = test_app!(state);

    for (name, career) in [("Ana", "CS"), ("Luis", "Law"), ("Eva", "cs")] {
        let req = authed(TestRequest::post().uri("/api/students"))
            .set_json(json!({"name": name, "career": career}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = authed(TestRequest::get().uri("/api/students?career=cS")).to_request();
    let students: Vec<Student> = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<u64> = students.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let req = authed(TestRequest::get().uri("/api/students/2")).to_request();
    let luis: Student = test::call_and_read_body_json(&app, req).await;
    assert_eq!(luis.career, "Law");
}

#[actix_rt::test]
async fn test_duplicate_names_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(&dir);
    let app = test_app!(state);

    let req = authed(TestRequest::post().uri("/api/careers"))
        .set_json(json!({"name": "Medicine", "emoji": "🩺", "duration": "6 years"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = authed(TestRequest::post().uri("/api/careers"))
        .set_json(json!({"name": "MEDICINE"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = authed(TestRequest::get().uri("/api/careers")).to_request();
    let careers: Vec<Career> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(careers.len(), 1);
    assert_eq!(careers[0].emoji.as_deref(), Some("🩺"));

    let req = authed(TestRequest::post().uri("/api/categories"))
        .set_json(json!({"name": "Health", "description": "Health sciences"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = authed(TestRequest::post().uri("/api/categories"))
        .set_json(json!({"name": "health"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_list_filters_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(&dir);
    let app = test_app!(state);

    for name in ["Eng", "Arts"] {
        let req = authed(TestRequest::post().uri("/api/categories"))
            .set_json(json!({"name": name}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = authed(TestRequest::get().uri("/api/categories?name=arts")).to_request();
    let categories: Vec<Category> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, 2);

    let req = authed(TestRequest::get().uri("/api/categories")).to_request();
    let categories: Vec<Category> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(categories.len(), 2);
}

#[actix_rt::test]
async fn test_malformed_body_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(&dir);
    let app = test_app!(state);

    let req = authed(TestRequest::post().uri("/api/categories"))
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.error.starts_with("Invalid request body"));
}

#[actix_rt::test]
async fn test_malformed_query_is_json_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(&dir);
    let app = test_app!(state);

    let req = authed(TestRequest::get().uri("/api/students?career=a&career=b")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers().get(CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.error.starts_with("Invalid query string"), "{}", body.error);
}

#[actix_rt::test]
async fn test_cors_preflight_skips_token_check() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(&dir);
    let app = test::init_service(
        App::new()
            .wrap(cors())
            .app_data(state.clone())
            .configure(configure),
    )
    .await;

    let req = TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/students")
        .insert_header((ORIGIN, "http://localhost:8080"))
        .insert_header((ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));

    // The actual request after the preflight still needs the token
    let req = TestRequest::get()
        .uri("/api/careers")
        .insert_header((ORIGIN, "http://localhost:8080"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_mutations_are_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(&dir);
    let app = test_app!(state);

    let req = authed(TestRequest::post().uri("/api/categories"))
        .set_json(json!({"name": "Eng"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let text = std::fs::read_to_string(dir.path().join("categories.json")).unwrap();
    let on_disk: Vec<Category> = serde_json::from_str(&text).unwrap();
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk[0].name, "Eng");
}

#[actix_rt::test]
async fn test_health_requires_token() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(&dir);
    let app = test_app!(state);

    let req = TestRequest::get().uri("/api/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = authed(TestRequest::get().uri("/api/health")).to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], records_core::get_version());
}
