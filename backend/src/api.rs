//! Web API Module
//!
//! RESTful endpoints for students, careers and categories under `/api`.
//! Every route requires the shared bearer token. Requests are served by a
//! single worker and the registry sits behind one mutex, so each request
//! runs to completion before the next touches the data files.

use crate::auth::require_bearer_token;
use crate::config::Config;
use crate::error::{ApiError, MessageBody};
use actix_cors::Cors;
use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpResponse, HttpServer};
use records_core::{CareerDraft, CategoryDraft, Record, RecordsError, Registry, StudentDraft};
use records_core::{Career, Category, Student};
use serde::Deserialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

// ============================================================
// APPLICATION STATE
// ============================================================

/// Shared application state
pub struct AppState {
    pub registry: Mutex<Registry>,
    /// Expected bearer token
    pub api_key: String,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            registry: Mutex::new(Registry::open(&config.data_dir)),
            api_key: config.api_key.clone(),
        }
    }

    /// Lock the registry, recovering from a poisoned lock
    pub fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================
// API REQUEST TYPES
// ============================================================

#[derive(Debug, Deserialize)]
pub struct StudentQuery {
    pub career: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

/// Parse a path id; anything that is not a valid id cannot name a record
fn parse_id<T: Record>(raw: &str) -> Result<u64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| RecordsError::NotFound(format!("{} not found.", T::KIND)).into())
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("Invalid query string: {}", err)).into()
    })
}

// ============================================================
// API HANDLERS
// ============================================================

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Academic Records API",
        "version": records_core::get_version()
    }))
}

// ---------- students ----------

async fn create_student(
    data: web::Data<AppState>,
    req: web::Json<StudentDraft>,
) -> Result<HttpResponse, ApiError> {
    let student = data.registry().create_student(req.into_inner())?;
    Ok(HttpResponse::Created().json(student))
}

async fn get_student(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id::<Student>(&path)?;
    let student = data.registry().get_student(id)?;
    Ok(HttpResponse::Ok().json(student))
}

/// Students of one career; the `career` filter is mandatory
async fn list_students(
    data: web::Data<AppState>,
    query: web::Query<StudentQuery>,
) -> Result<HttpResponse, ApiError> {
    let career = match query.career.as_deref() {
        Some(career) if !career.is_empty() => career,
        _ => return Err(ApiError::BadRequest("Career filter is required.".to_string())),
    };

    let students = data.registry().list_students(Some(career));
    Ok(HttpResponse::Ok().json(students))
}

async fn delete_student(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id::<Student>(&path)?;
    data.registry().delete_student(id)?;
    Ok(HttpResponse::Ok().json(MessageBody::new("Student deleted successfully.")))
}

// ---------- careers ----------

async fn create_career(
    data: web::Data<AppState>,
    req: web::Json<CareerDraft>,
) -> Result<HttpResponse, ApiError> {
    let career = data.registry().create_career(req.into_inner())?;
    Ok(HttpResponse::Created().json(career))
}

async fn get_career(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id::<Career>(&path)?;
    let career = data.registry().get_career(id)?;
    Ok(HttpResponse::Ok().json(career))
}

async fn list_careers(
    data: web::Data<AppState>,
    query: web::Query<NameQuery>,
) -> HttpResponse {
    let careers = data.registry().list_careers(query.name.as_deref());
    HttpResponse::Ok().json(careers)
}

async fn delete_career(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id::<Career>(&path)?;
    data.registry().delete_career(id)?;
    Ok(HttpResponse::Ok().json(MessageBody::new("Career deleted successfully.")))
}

// ---------- categories ----------

async fn create_category(
    data: web::Data<AppState>,
    req: web::Json<CategoryDraft>,
) -> Result<HttpResponse, ApiError> {
    let category = data.registry().create_category(req.into_inner())?;
    Ok(HttpResponse::Created().json(category))
}

async fn get_category(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id::<Category>(&path)?;
    let category = data.registry().get_category(id)?;
    Ok(HttpResponse::Ok().json(category))
}

async fn list_categories(
    data: web::Data<AppState>,
    query: web::Query<NameQuery>,
) -> HttpResponse {
    let categories = data.registry().list_categories(query.name.as_deref());
    HttpResponse::Ok().json(categories)
}

async fn delete_category(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id::<Category>(&path)?;
    data.registry().delete_category(id)?;
    Ok(HttpResponse::Ok().json(MessageBody::new("Category deleted successfully.")))
}

// ============================================================
// SERVER CONFIGURATION
// ============================================================

/// Register the `/api` scope. The app must provide `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(query_config()).service(
        web::scope("/api")
            .wrap(from_fn(require_bearer_token))
            .route("/health", web::get().to(health_check))
            .route("/students", web::post().to(create_student))
            .route("/students", web::get().to(list_students))
            .route("/students/{id}", web::get().to(get_student))
            .route("/students/{id}", web::delete().to(delete_student))
            .route("/careers", web::post().to(create_career))
            .route("/careers", web::get().to(list_careers))
            .route("/careers/{id}", web::get().to(get_career))
            .route("/careers/{id}", web::delete().to(delete_career))
            .route("/categories", web::post().to(create_category))
            .route("/categories", web::get().to(list_categories))
            .route("/categories/{id}", web::get().to(get_category))
            .route("/categories/{id}", web::delete().to(delete_category)),
    );
}

/// Permissive CORS; preflight requests are answered here, before the token check
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
}

/// Configure and run the API server
pub async fn run_server(config: Config) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(&config));

    log::info!(
        "Academic Records API starting at http://{}:{}",
        config.host,
        config.port
    );
    log::info!("API Endpoints:");
    log::info!("   GET    /api/health");
    log::info!("   POST   /api/students            - Register student");
    log::info!("   GET    /api/students?career=X   - Students by career");
    log::info!("   GET    /api/students/:id        - Get student");
    log::info!("   DELETE /api/students/:id        - Delete student");
    log::info!("   POST   /api/careers             - Create career");
    log::info!("   GET    /api/careers             - List careers");
    log::info!("   GET    /api/careers/:id         - Get career");
    log::info!("   DELETE /api/careers/:id         - Delete career");
    log::info!("   POST   /api/categories          - Create category");
    log::info!("   GET    /api/categories          - List categories");
    log::info!("   GET    /api/categories/:id      - Get category");
    log::info!("   DELETE /api/categories/:id      - Delete category");

    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .workers(1)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id::<Student>("42").unwrap(), 42);
        assert_eq!(parse_id::<Student>(" 7 ").unwrap(), 7);

        let err = parse_id::<Career>("abc").unwrap_err();
        assert_eq!(err.to_string(), "Career not found.");
        assert!(parse_id::<Category>("-1").is_err());
    }
}
