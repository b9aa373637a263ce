use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, middleware, web, App, HttpServer};

use grievance::complaints::ComplaintService;
use grievance::handlers::{self, AppState};
use grievance::store::{seed_admin, MemoryStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let store = Arc::new(MemoryStore::new());

    // Seed the admin identity — the only path to the admin role.
    let admin_email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@campus.local".to_string());
    let admin_password = match std::env::var("ADMIN_PASSWORD") {
        Ok(pw) => pw,
        Err(_) => {
            log::warn!("No ADMIN_PASSWORD set — using default credentials");
            "admin123".to_string()
        }
    };
    seed_admin(store.as_ref(), &admin_email, &admin_password)
        .await
        .expect("Failed to seed admin identity");

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        let state = AppState {
            service: ComplaintService::new(store.clone(), store.clone()),
            identities: store.clone(),
        };

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").configure(handlers::configure))
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "Not found" }))
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
