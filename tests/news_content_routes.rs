//! News pages: what they show and who may open them.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use common::harness::TestApp;
use yasite::domain::CommentId;
use yasite::web::{Settings, Site, urls};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

// ===========================================
// Routes
// ===========================================

#[tokio::test]
async fn public_pages_are_available_to_anonymous_users() {
    let app = TestApp::news();
    let news = app.add_news("Open", day(1));
    let mut anon = app.client();

    for path in [
        urls::HOME.to_string(),
        urls::news_detail(news.id),
        urls::LOGIN.to_string(),
        urls::LOGOUT.to_string(),
        urls::SIGNUP.to_string(),
    ] {
        assert_eq!(anon.get(&path).await.status, StatusCode::OK, "GET {path}");
    }
}

#[tokio::test]
async fn comment_pages_answer_by_viewer() {
    let app = TestApp::news();
    let news = app.add_news("Open", day(1));
    let author = app.create_user("author");
    let reader = app.create_user("reader");
    let comment = app.add_comment(&news, &author, "Text", Utc::now());

    let mut as_author = app.login(&author).await;
    let mut as_reader = app.login(&reader).await;
    let mut anon = app.client();

    for path in [urls::comment_edit(comment.id), urls::comment_delete(comment.id)] {
        assert_eq!(as_author.get(&path).await.status, StatusCode::OK, "author GET {path}");
        as_reader.get(&path).await.assert_not_found();
        anon.get(&path).await.assert_login_redirect(&path);
    }
}

#[tokio::test]
async fn missing_or_malformed_ids_are_not_found() {
    let app = TestApp::news();
    let author = app.create_user("author");
    let mut client = app.login(&author).await;

    client.get("/news/404/").await.assert_not_found();
    client.get("/news/abc/").await.assert_not_found();
    client.get(&urls::comment_edit(CommentId::new(77))).await.assert_not_found();
    client.get("/delete_comment/x/").await.assert_not_found();
}

// ===========================================
// Home page
// ===========================================

#[tokio::test]
async fn home_shows_ten_newest_items() {
    let app = TestApp::news();
    for d in 1..=12 {
        app.add_news(&format!("Item {d:02}"), day(d));
    }

    let response = app.client().get(urls::HOME).await;
    response.assert_ok();
    assert_eq!(response.body.matches(r#"<article class="news">"#).count(), 10);
    assert!(!response.contains("Item 01"));
    assert!(!response.contains("Item 02"));

    let newest = response.body.find("Item 12").unwrap();
    let older = response.body.find("Item 11").unwrap();
    let oldest_shown = response.body.find("Item 03").unwrap();
    assert!(newest < older && older < oldest_shown);
}

#[tokio::test]
async fn home_honours_configured_page_size() {
    let settings = Settings {
        news_per_page: 3,
        ..Settings::default()
    };
    let app = TestApp::with_settings(Site::News, settings);
    for d in 1..=5 {
        app.add_news(&format!("Item {d:02}"), day(d));
    }

    let response = app.client().get(urls::HOME).await;
    assert_eq!(response.body.matches(r#"<article class="news">"#).count(), 3);
}

#[tokio::test]
async fn empty_home_says_so() {
    let app = TestApp::news();
    assert!(app.client().get(urls::HOME).await.contains("No news yet."));
}

// ===========================================
// Detail page
// ===========================================

#[tokio::test]
async fn comments_are_in_creation_order() {
    let app = TestApp::news();
    let news = app.add_news("Ordered", day(1));
    let author = app.create_user("author");
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

    // Inserted newest first; the page must still list oldest first.
    app.add_comment(&news, &author, "Third comment", start + Duration::hours(2));
    app.add_comment(&news, &author, "First comment", start);
    app.add_comment(&news, &author, "Second comment", start + Duration::hours(1));

    let body = app.client().get(&urls::news_detail(news.id)).await.body;
    let first = body.find("First comment").unwrap();
    let second = body.find("Second comment").unwrap();
    let third = body.find("Third comment").unwrap();
    assert!(first < second && second < third);
}

#[tokio::test]
async fn comment_form_only_for_signed_in_users() {
    let app = TestApp::news();
    let news = app.add_news("Discuss", day(1));
    let reader = app.create_user("reader");
    let path = urls::news_detail(news.id);

    let anon = app.client().get(&path).await;
    assert!(!anon.contains(r#"id="comment-form""#));

    let mut client = app.login(&reader).await;
    let signed_in = client.get(&path).await;
    assert!(signed_in.contains(r#"id="comment-form""#));
}

#[tokio::test]
async fn edit_links_only_on_own_comments() {
    let app = TestApp::news();
    let news = app.add_news("Discuss", day(1));
    let author = app.create_user("author");
    let reader = app.create_user("reader");
    let comment = app.add_comment(&news, &author, "Mine", Utc::now());
    let edit_link = format!(r#"href="{}""#, urls::comment_edit(comment.id));

    let mut as_author = app.login(&author).await;
    assert!(as_author.get(&urls::news_detail(news.id)).await.contains(&edit_link));

    let mut as_reader = app.login(&reader).await;
    let page = as_reader.get(&urls::news_detail(news.id)).await;
    assert!(page.contains("Mine"));
    assert!(!page.contains(&edit_link));
}
