//! yasite - a private notes site and a public news site with comments

pub mod cli;
pub mod domain;
pub mod infra;
pub mod store;
pub mod web;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_add_news, handle_create_user, handle_serve, init_tracing},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;
    let db = cli.db.as_ref();

    match &cli.command {
        Command::Serve(args) => handle_serve(args, db, &config),
        Command::CreateUser(args) => handle_create_user(args, db, &config),
        Command::AddNews(args) => handle_add_news(args, db, &config),
    }
}
