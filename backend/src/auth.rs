//! Static bearer-token check applied to every `/api` route.

use crate::api::AppState;
use crate::error::ApiError;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::middleware::Next;
use actix_web::{web, Error, ResponseError};

/// True when `header` is exactly `Bearer <api_key>`
pub fn is_authorized(header: Option<&str>, api_key: &str) -> bool {
    match header.and_then(|value| value.strip_prefix("Bearer ")) {
        Some(token) => token == api_key,
        None => false,
    }
}

/// Middleware rejecting requests without the shared bearer token with 401
pub async fn require_bearer_token(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let authorized = req
        .app_data::<web::Data<AppState>>()
        .is_some_and(|state| is_authorized(header, &state.api_key));

    if !authorized {
        log::warn!("Rejected unauthorized {} {}", req.method(), req.path());
        let response = ApiError::Unauthorized.error_response();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}
