//! `create-user` command handler.

use anyhow::{Result, bail};
use std::path::PathBuf;
use tracing::info;

use super::open_store;
use crate::cli::CreateUserArgs;
use crate::cli::config::Config;
use crate::domain::{SignupForm, User};
use crate::infra::hash_password;
use crate::store::{StoreError, UserRepository};

/// Creates an account, applying the same rules as the signup page.
pub fn create_account(
    store: &mut impl UserRepository,
    username: &str,
    password: &str,
) -> Result<User> {
    let form = SignupForm {
        username: username.to_string(),
        password1: password.to_string(),
        password2: password.to_string(),
    };
    let new_user = match form.clean() {
        Ok(new_user) => new_user,
        Err(errors) => bail!("invalid account: {errors}"),
    };

    let hash = hash_password(&new_user.password)?;
    match store.create_user(&new_user.username, &hash) {
        Ok(user) => Ok(user),
        Err(StoreError::DuplicateUsername { username }) => {
            bail!("user '{username}' already exists")
        }
        Err(e) => Err(e.into()),
    }
}

pub fn handle_create_user(args: &CreateUserArgs, db: Option<&PathBuf>, config: &Config) -> Result<()> {
    let mut store = open_store(&config.db_path(args.site, db))?;
    let user = create_account(&mut store, &args.username, &args.password)?;

    info!(site = %args.site, username = user.username(), "account created");
    println!("Created user '{}' on {} (id {})", user.username(), args.site, user.id());
    Ok(())
}
