//! User accounts and the signup form.

use crate::domain::validation::{FormErrors, max_chars, require};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum username length.
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Minimum password length accepted at signup.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Database identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw row id.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw row id.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered account.
///
/// The password hash never leaves the server; it is skipped when a user is
/// handed to a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    username: String,
    #[serde(skip)]
    password_hash: String,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

/// Returns true if `username` uses only letters, digits and `@.+-_`.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

/// Raw signup form input.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password1: String,
    #[serde(default, skip_serializing)]
    pub password2: String,
}

/// A signup request that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl SignupForm {
    /// Validates the form. Username uniqueness is checked by the store.
    pub fn clean(&self) -> Result<NewUser, FormErrors> {
        let mut errors = FormErrors::new();

        let username = require(&mut errors, "username", &self.username);
        if !username.is_empty() {
            max_chars(&mut errors, "username", username, USERNAME_MAX_LENGTH);
            if !is_valid_username(username) {
                errors.add(
                    "username",
                    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
                );
            }
        }

        if self.password1.is_empty() {
            errors.add("password1", crate::domain::validation::REQUIRED);
        }
        if self.password2.is_empty() {
            errors.add("password2", crate::domain::validation::REQUIRED);
        }
        if !self.password1.is_empty() && !self.password2.is_empty() {
            if self.password1 != self.password2 {
                errors.add("password2", "The two password fields didn't match.");
            } else {
                if self.password1.chars().count() < PASSWORD_MIN_LENGTH {
                    errors.add(
                        "password2",
                        format!(
                            "This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."
                        ),
                    );
                }
                if self.password1.chars().all(|c| c.is_ascii_digit()) {
                    errors.add("password2", "This password is entirely numeric.");
                }
            }
        }

        errors.into_result(NewUser {
            username: username.to_string(),
            password: self.password1.clone(),
        })
    }
}
