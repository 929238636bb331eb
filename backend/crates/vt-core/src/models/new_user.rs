use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Registration input. Holds the plaintext password until it is hashed.
#[derive(Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub avatar_url: Option<String>,
    pub cover_image_url: Option<String>,
}

impl NewUser {
    /// Every field is required and must not be blank. Usernames may not
    /// contain whitespace or `@`.
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        for (field, value) in [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("username", &self.username),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::Validation {
                    message: format!("{} is required", field),
                    field: Some(field.to_string()),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        validate_email(&self.email)?;

        if self.username.trim().chars().any(char::is_whitespace) {
            return Err(CoreError::Validation {
                message: "username cannot contain whitespace".to_string(),
                field: Some("username".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Login looks up usernames and emails in one namespace
        if self.username.contains('@') {
            return Err(CoreError::Validation {
                message: "username cannot contain '@'".to_string(),
                field: Some("username".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[track_caller]
pub fn validate_email(email: &str) -> CoreErrorResult<()> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };

    if !valid {
        return Err(CoreError::Validation {
            message: "email is not a valid address".to_string(),
            field: Some("email".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}
