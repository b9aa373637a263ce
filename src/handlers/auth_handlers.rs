use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;

use super::AppState;
use crate::auth::session::{clear, insert_identity, require_identity};
use crate::auth::{password, validate};
use crate::errors::AppError;
use crate::models::complaint::types::new_record_id;
use crate::models::identity::{
    Identity, LoginPayload, RegisterPayload, Role, DEFAULT_DEPARTMENT,
};

/// POST /api/v1/auth/register - Create a student identity and log it in.
/// Role is always student here; staff and admin identities come from
/// seeding or out-of-band promotion.
pub async fn register(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<RegisterPayload>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let mut errors = Vec::new();
    errors.extend(validate::validate_email(&body.email));
    errors.extend(validate::validate_password(&body.password));
    if let Some(dept) = body.department.as_deref() {
        errors.extend(validate::validate_department(dept));
    }
    if let Some(phone) = body.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        errors.extend(validate::validate_phone(phone));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let email = body.email.trim().to_string();
    if state.identities.find_by_email(&email).await?.is_some() {
        return Err(AppError::Validation(vec![
            "Email already registered".to_string(),
        ]));
    }

    let hash = password::hash_password(&body.password)
        .map_err(|e| AppError::Store(crate::store::StoreError(format!("password hash failed: {e}"))))?;
    let identity = Identity {
        id: new_record_id(),
        email,
        password_hash: hash,
        role: Role::Student,
        department: Some(
            body.department
                .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
        ),
        name: body.name,
        student_id: body.student_id,
        phone: body.phone,
        is_active: true,
        created_at: Utc::now(),
    };
    let identity = state.identities.insert(identity).await?;

    insert_identity(&session, &identity)?;
    log::info!("registered identity {}", identity.id);
    Ok(HttpResponse::Created().json(identity))
}

/// POST /api/v1/auth/login - Verify credentials and start a session.
/// Wrong email and wrong password are indistinguishable to the caller.
pub async fn login(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<LoginPayload>,
) -> Result<HttpResponse, AppError> {
    let identity = state
        .identities
        .find_by_email(body.email.trim())
        .await?
        .filter(|i| i.is_active)
        .ok_or(AppError::Unauthenticated)?;

    let verified = password::verify_password(&body.password, &identity.password_hash)
        .unwrap_or(false);
    if !verified {
        log::warn!("failed login for {}", identity.email);
        return Err(AppError::Unauthenticated);
    }

    insert_identity(&session, &identity)?;
    Ok(HttpResponse::Ok().json(identity))
}

/// POST /api/v1/auth/logout - Drop the session.
pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    clear(&session);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}

/// GET /api/v1/auth/me - The caller's own profile, freshly hydrated.
pub async fn me(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    let identity = require_identity(&session, state.identities.as_ref()).await?;
    Ok(HttpResponse::Ok().json(identity))
}

/// GET /api/v1/auth/users - Staff directory for assignment pickers.
/// Admin only.
pub async fn staff(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let identity = require_identity(&session, state.identities.as_ref()).await?;
    if identity.role != Role::Admin {
        return Err(AppError::AccessDenied("Admin access required".to_string()));
    }
    let staff = state.identities.list_staff().await?;
    Ok(HttpResponse::Ok().json(staff))
}
