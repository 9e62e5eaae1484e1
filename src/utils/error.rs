use std::collections::BTreeMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::error::{ErrorKind, WriteFailure};
use validator::ValidationErrors;

/// Código de erro do MongoDB para violação de índice único
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Falhas da camada de acesso a dados
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Database error: {0}")]
    Database(mongodb::error::Error),

    #[error("Store returned no identifier for the inserted document")]
    MissingId,
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        if is_duplicate_key(&e) {
            StoreError::DuplicateKey(e.to_string())
        } else {
            StoreError::Database(e)
        }
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY_CODE
    )
}

/// Erros que os handlers HTTP transformam em resposta
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("Conflict")]
    Conflict,

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            // Corrida entre exists_by_email e create: o índice único rejeita
            StoreError::DuplicateKey(_) => AppError::Conflict,
            other => AppError::Store(other),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(errors) => HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": self.to_string(),
                "fields": field_messages(errors),
            })),
            AppError::Conflict | AppError::NotFound => HttpResponse::build(self.status_code()).finish(),
            AppError::Store(e) => {
                log::error!("❌ Store failure: {}", e);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "success": false,
                    "error": e.to_string(),
                }))
            }
        }
    }
}

/// Agrupa as mensagens de validação por campo
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Store(StoreError::MissingId).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_key_maps_to_conflict() {
        let err = AppError::from(StoreError::DuplicateKey("email_1".into()));
        assert!(matches!(err, AppError::Conflict));

        let err = AppError::from(StoreError::MissingId);
        assert!(matches!(err, AppError::Store(StoreError::MissingId)));
    }

    #[test]
    fn test_field_messages_falls_back_to_code() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("not_blank").with_message("name is required".into()));
        errors.add("age", ValidationError::new("min"));

        let fields = field_messages(&errors);
        assert_eq!(fields["name"], vec!["name is required"]);
        assert_eq!(fields["age"], vec!["min"]);
    }
}
