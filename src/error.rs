use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::flash::FlashRedirect;

/// Errors surfaced by the account and lesson-plan workflows.
///
/// Every variant renders as a redirect to a safe page with a flash message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Username already taken")]
    DuplicateUsername,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("You do not have access to that lesson plan")]
    AccessDenied,
    #[error("Lesson plan not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    fn safe_page(&self) -> &'static str {
        match self {
            AppError::DuplicateUsername | AppError::DuplicateEmail => "/register",
            AppError::InvalidCredentials => "/login",
            AppError::AccessDenied | AppError::NotFound => "/dashboard",
            AppError::Validation(_) | AppError::Internal(_) => "/",
        }
    }

    fn user_message(&self) -> String {
        match self {
            AppError::Internal(_) => "Something went wrong, please try again".into(),
            other => other.to_string(),
        }
    }

    /// Redirect to `to` instead of the variant's default page.
    pub fn redirect_to(self, to: &str) -> FlashRedirect {
        match &self {
            AppError::Internal(e) => error!(error = %format!("{e:#}"), "internal error"),
            other => warn!(error = %other, "request rejected"),
        }
        FlashRedirect::new(to, self.user_message())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        let mapped = match &e {
            sqlx::Error::RowNotFound => Some(AppError::NotFound),
            sqlx::Error::Database(db) if db.is_unique_violation() => match db.constraint() {
                Some(c) if c.contains("username") => Some(AppError::DuplicateUsername),
                Some(c) if c.contains("email") => Some(AppError::DuplicateEmail),
                _ => None,
            },
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => Some(AppError::NotFound),
            _ => None,
        };
        mapped.unwrap_or_else(|| AppError::Internal(e.into()))
    }
}

impl From<AppError> for FlashRedirect {
    fn from(e: AppError) -> Self {
        let page = e.safe_page();
        e.redirect_to(page)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        FlashRedirect::from(self).into_response()
    }
}
