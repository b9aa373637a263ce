pub mod auth_handlers;
pub mod complaint_handlers;

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, HttpResponse,
};

use crate::complaints::ComplaintService;
use crate::store::IdentityStore;

/// Shared handler state. Handlers resolve the caller's identity here and
/// pass it explicitly into the service — no ambient request state below
/// this layer.
pub struct AppState {
    pub service: ComplaintService,
    pub identities: Arc<dyn IdentityStore>,
}

/// CSRF protection for REST mutation endpoints.
///
/// Rejects POST/PUT/PATCH/DELETE requests that don't have Content-Type:
/// application/json. Browsers cannot send cross-origin JSON with cookies
/// via simple form POST — the Content-Type check acts as a CSRF guard
/// without requiring tokens. GET requests are exempt (read-only).
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::PATCH
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "Content-Type must be application/json for mutation requests"
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/register", web::post().to(auth_handlers::register))
            .route("/login", web::post().to(auth_handlers::login))
            .route("/logout", web::post().to(auth_handlers::logout))
            .route("/me", web::get().to(auth_handlers::me))
            .route("/users", web::get().to(auth_handlers::staff)),
    );
    cfg.service(
        web::scope("/complaints")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::post().to(complaint_handlers::create))
            .route("", web::get().to(complaint_handlers::list))
            // /export before /{id} to avoid routing conflict
            .route("/export", web::get().to(complaint_handlers::export))
            .route("/{id}", web::get().to(complaint_handlers::read))
            .route("/{id}", web::patch().to(complaint_handlers::update)),
    );
}
