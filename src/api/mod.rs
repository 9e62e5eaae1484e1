use actix_web::{error::InternalError, web, HttpResponse};

pub mod health;
pub mod swagger;
pub mod users;

/// Registra as rotas da API; usado pelo `main` e pelos testes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/users")
                .route("", web::post().to(users::create_user))
                .route("", web::get().to(users::get_all_users))
                .route("/{id}", web::get().to(users::get_user_by_id))
                .route("/{id}", web::put().to(users::update_user))
                .route("/{id}", web::delete().to(users::delete_user)),
        );
}

/// Corpo JSON inválido vira 400 no mesmo formato de erro da API
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::warn!("⚠️ Rejected JSON payload: {}", message);
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": message
            })),
        )
        .into()
    })
}
