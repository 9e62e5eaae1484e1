use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
    models::{User, UserRequest, UserResponse},
    services::UserService,
    utils::error::AppError,
};

pub const USER_DELETED: &str = "User deleted successfully";
pub const USER_NOT_DELETED: &str = "Unable to delete the user";

/// POST /api/users - Cria usuário
///
/// A checagem de email e o insert são duas operações; uma corrida entre
/// elas é barrada pelo índice único e também vira 409.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    service: web::Data<dyn UserService>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    request.validate()?;

    let email = request.email.as_deref().unwrap_or_default();
    if service.exists_by_email(email).await? {
        log::warn!("⚠️ POST /api/users - email {} already exists", email);
        return Err(AppError::Conflict);
    }

    let created = service.create(User::from(request)).await?;
    let response = UserResponse::from(created);

    log::info!("✅ User created: {}", response.id);
    Ok(HttpResponse::Created().json(response))
}

/// GET /api/users - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserResponse])
    )
)]
pub async fn get_all_users(service: web::Data<dyn UserService>) -> Result<HttpResponse, AppError> {
    let users: Vec<UserResponse> = service
        .list_all()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/users/{id} - Busca usuário
///
/// Sem ramo 404: usuário inexistente responde 200 com corpo `null`.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user, or null when absent", body = UserResponse)
    )
)]
pub async fn get_user_by_id(
    service: web::Data<dyn UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = service.find_by_id(&path).await?.map(UserResponse::from);
    Ok(HttpResponse::Ok().json(user))
}

/// PUT /api/users/{id} - Atualiza usuário
///
/// Sobrescreve os quatro campos (não é merge) e não passa pela validação.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    service: web::Data<dyn UserService>,
    path: web::Path<String>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    if service.find_by_id(&id).await?.is_none() {
        log::warn!("⚠️ PUT /api/users/{} - not found", id);
        return Err(AppError::NotFound);
    }

    // Se o documento sumir entre a checagem e o update, responde 200 com null
    let updated = service
        .update_by_id(&id, User::from(body.into_inner()))
        .await?
        .map(UserResponse::from);

    log::info!("✅ User updated: {}", id);
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/users/{id} - Remove usuário
///
/// Nada removido responde 500, não 404.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = String, content_type = "text/plain"),
        (status = 500, description = "Nothing was deleted", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_user(
    service: web::Data<dyn UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    if service.delete_by_id(&id).await? {
        log::info!("🗑️  User deleted: {}", id);
        Ok(HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(USER_DELETED))
    } else {
        log::warn!("⚠️ DELETE /api/users/{} - nothing deleted", id);
        Ok(HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body(USER_NOT_DELETED))
    }
}
