use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::services::is_valid_email;
use crate::error::AppError;

/// Form body for registration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
}

impl RegisterForm {
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(AppError::validation("Username, email and password are required"));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::validation("Invalid email"));
        }
        if self.password.len() < 8 {
            return Err(AppError::validation("Password too short"));
        }
        if let Some(confirm) = &self.confirm_password {
            if confirm != &self.password {
                return Err(AppError::validation("Passwords do not match"));
            }
        }
        Ok(())
    }
}

/// Form body for login.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Describes which fields a form page expects.
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub form: &'static str,
    pub fields: &'static [&'static str],
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}
