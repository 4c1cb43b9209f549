//! Test harness for integration tests.
//!
//! Provides an in-process app driven through the router, a cookie-tracking
//! HTTP client, and CLI assertion helpers using `assert_cmd`.

mod app;
mod client;
mod command;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use app::{PASSWORD, TestApp};
#[allow(unused_imports)]
pub use client::{TestClient, TestResponse};
#[allow(unused_imports)]
pub use command::YasiteCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
