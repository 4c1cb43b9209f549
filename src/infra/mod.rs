//! Slug derivation and password hashing

mod password;
mod slug;

pub use password::{PasswordError, hash_password, verify_password, verify_password_or_dummy};
pub use slug::{SLUG_MAX_LENGTH, derive_slug, is_valid_slug, slugify};
