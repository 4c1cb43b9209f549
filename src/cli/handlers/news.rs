//! `add-news` command handler.

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::info;

use super::open_store;
use crate::cli::AddNewsArgs;
use crate::cli::config::Config;
use crate::domain::{NewNews, News};
use crate::store::NewsRepository;
use crate::web::Site;

/// Validates and stores a news item dated `date`.
pub fn publish_news(
    store: &mut impl NewsRepository,
    title: &str,
    text: &str,
    date: NaiveDate,
) -> Result<News> {
    let news = match NewNews::new(title, text, date) {
        Ok(news) => news,
        Err(errors) => bail!("invalid news item: {errors}"),
    };
    Ok(store.insert_news(&news)?)
}

pub fn handle_add_news(args: &AddNewsArgs, db: Option<&PathBuf>, config: &Config) -> Result<()> {
    let mut store = open_store(&config.db_path(Site::News, db))?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let news = publish_news(&mut store, &args.title, &args.text, date)?;

    info!(id = %news.id, "news published");
    println!("Added news #{}: {} ({})", news.id, news.title, news.date);
    Ok(())
}
