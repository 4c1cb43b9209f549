//! CLI command definitions and handlers

pub mod config;
pub mod handlers;

use crate::web::Site;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// yasite - a private notes site and a public news site with comments
#[derive(Parser, Debug)]
#[command(name = "yasite", version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides the config file's data_dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web server for one site
    Serve(ServeArgs),

    /// Create an account on a site
    CreateUser(CreateUserArgs),

    /// Publish a news item on the news site
    AddNews(AddNewsArgs),
}

/// Arguments for the `serve` command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Site to serve
    #[arg(value_enum)]
    pub site: Site,

    /// Listen address (default 127.0.0.1:8000)
    #[arg(long)]
    pub addr: Option<String>,
}

/// Arguments for the `create-user` command
#[derive(Parser, Debug)]
pub struct CreateUserArgs {
    /// Site whose database gets the account
    #[arg(value_enum)]
    pub site: Site,

    /// Login name
    pub username: String,

    /// Initial password
    #[arg(long)]
    pub password: String,
}

/// Arguments for the `add-news` command
#[derive(Parser, Debug)]
pub struct AddNewsArgs {
    /// Headline (up to 50 characters)
    #[arg(long)]
    pub title: String,

    /// Body text
    #[arg(long)]
    pub text: String,

    /// Publication date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}
