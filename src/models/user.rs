use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 100;

/// Usuário (armazenado no MongoDB, coleção `users`)
///
/// Todos os campos mutáveis são opcionais no documento: o update sobrescreve
/// os quatro campos e os que não vierem no request ficam `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: Option<String>,

    /// Único entre todos os usuários (índice `email_1`)
    pub email: Option<String>,

    pub age: Option<i32>,

    pub city: Option<String>,
}

/// Payload de POST e PUT /api/users
///
/// Um `id` enviado no corpo é ignorado: o identificador é imutável.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, utoipa::ToSchema)]
pub struct UserRequest {
    #[validate(
        required(message = "name is required"),
        custom(function = "not_blank", message = "name is required")
    )]
    #[schema(example = "Alice")]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        custom(function = "valid_email")
    )]
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,

    #[validate(custom(function = "adult_age"))]
    #[schema(example = 30, minimum = 18, maximum = 100)]
    pub age: Option<i32>,

    #[schema(example = "NYC")]
    pub city: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Email em branco só reporta "required"; o formato é checado depois
fn valid_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message("Email is required".into()));
    }
    if !value.validate_email() {
        return Err(ValidationError::new("email").with_message("Please provide a valid email".into()));
    }
    Ok(())
}

fn adult_age(age: i32) -> Result<(), ValidationError> {
    if age < MIN_AGE {
        return Err(ValidationError::new("min").with_message("Age should be at least 18".into()));
    }
    if age > MAX_AGE {
        return Err(ValidationError::new("max").with_message("Age should not exceed 100".into()));
    }
    Ok(())
}

impl From<UserRequest> for User {
    fn from(request: UserRequest) -> Self {
        User {
            id: None,
            name: request.name,
            email: request.email,
            age: request.age,
            city: request.city,
        }
    }
}

/// Representação de usuário devolvida pela API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = "665f1c2e9b1e8a3d4c5b6a79")]
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub city: Option<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: u.name,
            email: u.email,
            age: u.age,
            city: u.city,
        }
    }
}
