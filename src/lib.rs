//! # Flower Diary
//!
//! Terminal client for the Flower Diary service: write a diary entry, tag it
//! with a mood, and the backend grows an AI-generated flower from it.
//!
//! ## Modules
//!
//! - [`api`]: Typed REST client for the diary backend
//! - [`pages`]: User and admin pages rendered as text
//! - [`view`]: Loading/error/ready view state and page activations
//! - [`route`]: Page addresses
//! - [`mood`]: Mood enumeration and its emoji/label tables
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flower_diary::api::{ClientConfig, DiaryClient};
//! use flower_diary::pages::{show, DiaryListPage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DiaryClient::new(ClientConfig::default())?;
//!
//!     // One fetch, then render whichever state it settled in
//!     let page = show(DiaryListPage::new(0, 10), &client).await;
//!     print!("{}", page.text);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod format;
pub mod mood;
pub mod pages;
pub mod route;
pub mod view;

// Re-export top-level types for convenience
pub use api::{
    AdminDiary, AdminStats, ApiError, ApiResult, ClientConfig, CreateDiaryRequest, Diary,
    DiaryClient, DiaryWithImage, FlowerImage, User,
};

pub use config::{
    ApiConfig, Config, ConfigError, LoadedConfig, LogFormat, LoggingConfig, UiConfig,
};

pub use mood::{Mood, MoodTag};

pub use pages::{follow_redirect, render_route, show, NewDiaryForm, Page, RenderedPage};

pub use route::{Route, RouteError};

pub use view::{PageActivation, ViewState};
