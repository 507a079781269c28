//! Credential payloads and their field-level validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::config::{FIELD_PASSWORD, FIELD_USERNAME, MSG_FIELD_BLANK, MSG_FIELD_NULL};
use crate::errors::FieldErrors;

/// Letters, digits and `@ . + - _`
static USERNAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid username pattern"));

/// A username/password pair that passed validation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User registration request
///
/// Each field is `None` when absent and `Some(None)` when sent as `null`.
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Unique login name
    #[serde(default, deserialize_with = "nullable")]
    #[validate(
        required(message = "This field is required."),
        length(max = 150, message = "Ensure this field has no more than 150 characters."),
        regex(
            path = *USERNAME_CHARS,
            message = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
        )
    )]
    #[schema(value_type = Option<String>, example = "alice", max_length = 150)]
    pub username: Option<Option<String>>,
    /// Plaintext password (minimum 8 characters)
    #[serde(default, deserialize_with = "nullable")]
    #[validate(
        required(message = "This field is required."),
        length(min = 8, message = "Ensure this field has at least 8 characters.")
    )]
    #[schema(value_type = Option<String>, example = "SecurePass123!", min_length = 8)]
    pub password: Option<Option<String>>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RegisterRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(Some(username.into())),
            password: Some(Some(password.into())),
        }
    }

    /// Strip surrounding whitespace from both fields.
    pub fn trimmed(self) -> Self {
        let trim = |field: Option<Option<String>>| field.map(|v| v.map(|s| s.trim().to_string()));
        Self {
            username: trim(self.username),
            password: trim(self.password),
        }
    }

    /// The username, if one was sent.
    pub fn username(&self) -> Option<&str> {
        self.username.as_ref().and_then(|v| v.as_deref())
    }

    /// Field-shape errors; empty when every field is acceptable.
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(errors) => to_field_errors(&errors),
        };

        // Null and blank values report nothing else
        for (field, value) in [(FIELD_USERNAME, &self.username), (FIELD_PASSWORD, &self.password)] {
            match value {
                Some(None) => errors.replace(field, MSG_FIELD_NULL),
                Some(Some(v)) if v.is_empty() => errors.replace(field, MSG_FIELD_BLANK),
                _ => {}
            }
        }

        errors
    }

    /// Validate the request into credentials, or return every field error.
    pub fn into_credentials(self) -> Result<Credentials, FieldErrors> {
        let errors = self.field_errors();
        match (self.username.flatten(), self.password.flatten()) {
            (Some(username), Some(password)) if errors.is_empty() => {
                Ok(Credentials { username, password })
            }
            _ => Err(errors),
        }
    }
}

/// User login request
#[derive(Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "SecurePass123!")]
    pub password: Option<String>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Both fields, if both are present and non-empty.
    pub fn into_credentials(self) -> Option<Credentials> {
        let username = self.username.filter(|v| !v.is_empty())?;
        let password = self.password.filter(|v| !v.is_empty())?;
        Some(Credentials { username, password })
    }
}

fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn to_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::default();
    for (field, errs) in errors.field_errors() {
        for e in errs.iter() {
            let message = e
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            fields.add(field.to_string(), message);
        }
    }
    fields
}
