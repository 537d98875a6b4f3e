//! Flower Diary API Client
//!
//! Typed access to the diary backend's REST API.
//!
//! ## Endpoints
//!
//! ### Diaries
//! - `POST /api/v1/diaries/` - Create a diary (and its flower)
//! - `GET /api/v1/diaries/` - List diaries
//! - `GET /api/v1/diaries/{id}` - Get one diary
//! - `POST /api/v1/flowers/generate` - Generate a flower for a diary
//!
//! ### Admin
//! - `GET /api/v1/admin/users` - List users
//! - `GET /api/v1/admin/users/{id}/diaries` - List one user's diaries
//! - `GET /api/v1/admin/diaries` - List all diaries
//! - `GET /api/v1/admin/stats` - Aggregate counts

mod client;
pub mod dto;
mod error;

pub use client::{
    ClientConfig, DiaryClient, DEFAULT_ALL_DIARY_LIMIT, DEFAULT_API_BASE, DEFAULT_DIARY_LIMIT,
    DEFAULT_USER_DIARY_LIMIT, DEFAULT_USER_LIMIT,
};
pub use dto::{AdminDiary, AdminStats, CreateDiaryRequest, Diary, DiaryWithImage, FlowerImage, User};
pub use error::{extract_error_message, ApiError, ApiResult, NETWORK_ERROR_MESSAGE};
