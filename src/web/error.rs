use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::{
    auth::CryptError,
    error::log_error,
    exam::AnswerError,
    model::{DatabaseError, ResourceType},
};

pub type WebResult<T> = std::result::Result<T, WebError>;

/// Status and message a rejected request shows to the client.
trait ClientFacing {
    fn status_code(&self) -> StatusCode;
    fn client_display(&self) -> String;
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username already taken")]
    UsernameTaken,
    #[error("sign in required")]
    SignInRequired,
    #[error("bad credentials")]
    BadCredentials,
}

impl ClientFacing for AccountError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::SignInRequired | Self::BadCredentials => StatusCode::UNAUTHORIZED,
        }
    }

    fn client_display(&self) -> String {
        match self {
            Self::UsernameTaken => "User already exists.",
            Self::SignInRequired => "Authentication required.",
            Self::BadCredentials => "Invalid username or password.",
        }
        .to_string()
    }
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("{resource_type:?} not found")]
    NotFound { resource_type: ResourceType },

    #[error("{resource_type:?} storage failure: {error}")]
    Storage {
        resource_type: ResourceType,
        error: DatabaseError,
    },
}

impl ClientFacing for ResourceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_display(&self) -> String {
        match self {
            Self::NotFound { resource_type } => format!("{resource_type:?} not found."),
            Self::Storage { .. } => String::from("Unable to load data, try again later."),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExamError {
    #[error("rejected answers: {0}")]
    Answers(#[from] AnswerError),

    #[error("user is not enrolled in course {course_id}")]
    NotEnrolled { course_id: i64 },
}

impl ClientFacing for ExamError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Answers(_) => StatusCode::BAD_REQUEST,
            Self::NotEnrolled { .. } => StatusCode::FORBIDDEN,
        }
    }

    fn client_display(&self) -> String {
        match self {
            Self::Answers(e) => format!("Invalid exam submission, {e}."),
            Self::NotEnrolled { .. } => {
                String::from("You must be enrolled in this course to take its exam.")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("crypto failure: {0}")]
    Crypt(#[from] CryptError),
}

impl ClientFacing for ServerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn client_display(&self) -> String {
        String::from("Internal server error.")
    }
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("account: {0}")]
    Account(#[from] AccountError),
    #[error("resource: {0}")]
    Resource(#[from] ResourceError),
    #[error("exam: {0}")]
    Exam(#[from] ExamError),
    #[error("server: {0}")]
    Server(#[from] ServerError),
}

impl WebError {
    pub fn resource_not_found(resource_type: ResourceType) -> Self {
        ResourceError::NotFound { resource_type }.into()
    }

    pub fn resource_fetch_error(resource_type: ResourceType, error: DatabaseError) -> Self {
        ResourceError::Storage {
            resource_type,
            error,
        }
        .into()
    }

    pub fn auth_required() -> Self {
        AccountError::SignInRequired.into()
    }

    pub fn auth_invalid_credentials() -> Self {
        AccountError::BadCredentials.into()
    }

    pub fn registration_conflict() -> Self {
        AccountError::UsernameTaken.into()
    }

    pub fn invalid_answers(e: AnswerError) -> Self {
        ExamError::Answers(e).into()
    }

    pub fn not_enrolled(course_id: i64) -> Self {
        ExamError::NotEnrolled { course_id }.into()
    }

    pub fn server_crypt_error(e: CryptError) -> Self {
        ServerError::Crypt(e).into()
    }

    fn inner(&self) -> &dyn ClientFacing {
        match self {
            Self::Account(e) => e,
            Self::Resource(e) => e,
            Self::Exam(e) => e,
            Self::Server(e) => e,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.inner().status_code()
    }

    pub fn client_display(&self) -> String {
        self.inner().client_display()
    }
}

/// Body of every rejected request. Form pages show `message` next to the form.
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// HTTP status code (stringified)
    pub status_code: String,
    /// Internal error chain, debug builds only
    pub details: Option<String>,
}

impl IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            log_error(&self);
        } else {
            tracing::debug!("request rejected: {}", self);
        }

        let body = ErrorResponse {
            message: self.client_display(),
            status_code: status_code.as_str().to_string(),
            details: cfg!(debug_assertions).then(|| self.to_string()),
        };

        (status_code, Json(body)).into_response()
    }
}
