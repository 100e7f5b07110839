use crate::core::store::StoreError;
use crate::models::{ErrorResponse, Role};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use uuid::Uuid;

/// Errors surfaced by the matching engine.
///
/// A duplicate match insert is deliberately absent: the ledger absorbs it as
/// a benign no-op, never an error.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("user {0} not found")]
    UserNotFound(Uuid),

    #[error("project {0} not found")]
    ProjectNotFound(Uuid),

    #[error("user {id} does not have role {expected:?}")]
    RoleMismatch { id: Uuid, expected: Role },

    #[error("user {0} does not own project {1}")]
    NotProjectOwner(Uuid, Uuid),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl MatchError {
    fn kind(&self) -> &'static str {
        match self {
            MatchError::UserNotFound(_) | MatchError::ProjectNotFound(_) => "not_found",
            MatchError::RoleMismatch { .. } => "role_mismatch",
            MatchError::NotProjectOwner(_, _) => "forbidden",
            MatchError::Storage(_) => "storage_failure",
        }
    }
}

impl ResponseError for MatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            MatchError::UserNotFound(_) | MatchError::ProjectNotFound(_) => StatusCode::NOT_FOUND,
            MatchError::RoleMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            MatchError::NotProjectOwner(_, _) => StatusCode::FORBIDDEN,
            MatchError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self, MatchError::Storage(_)) {
            tracing::error!("Storage failure: {}", self);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: self.status_code().as_u16(),
        })
    }
}

/// Caller identity errors. Authentication itself happens upstream; this
/// only covers a missing or malformed injected identity.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing or invalid X-User-Id header")]
    Unauthorized,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: self.to_string(),
            status_code: self.status_code().as_u16(),
        })
    }
}
