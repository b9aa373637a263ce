use actix_session::Session;
use actix_web::{web, HttpResponse};

use super::AppState;
use crate::auth::session::{maybe_identity, require_identity};
use crate::errors::AppError;
use crate::models::complaint::filter::ListFilter;
use crate::models::complaint::types::{NewComplaintPayload, UpdatePayload};

/// POST /api/v1/complaints - Submit a complaint.
/// Auth optional: anonymous submission is allowed, but a logged-in
/// caller becomes the owner even when submitting anonymously.
pub async fn create(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<NewComplaintPayload>,
) -> Result<HttpResponse, AppError> {
    let identity = maybe_identity(&session, state.identities.as_ref()).await?;
    let created = state
        .service
        .create(identity.as_ref(), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/v1/complaints - Role-scoped listing.
/// Query params: id, from, to, dept, status, urgency, priority,
/// assigned, limit — all optional.
pub async fn list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListFilter>,
) -> Result<HttpResponse, AppError> {
    let identity = require_identity(&session, state.identities.as_ref()).await?;
    let result = state.service.list(&identity, &query).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /api/v1/complaints/export - Admin-only unredacted export rows.
pub async fn export(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListFilter>,
) -> Result<HttpResponse, AppError> {
    let identity = require_identity(&session, state.identities.as_ref()).await?;
    let rows = state.service.export(&identity, &query).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/v1/complaints/{id} - Single record, redacted for the viewer.
pub async fn read(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let identity = require_identity(&session, state.identities.as_ref()).await?;
    let complaint = state.service.get(&identity, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(complaint))
}

/// PATCH /api/v1/complaints/{id} - Role-scoped partial update.
pub async fn update(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    body: web::Json<UpdatePayload>,
) -> Result<HttpResponse, AppError> {
    let identity = require_identity(&session, state.identities.as_ref()).await?;
    let updated = state
        .service
        .update(&identity, &path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}
