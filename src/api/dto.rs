//! Data Transfer Objects
//!
//! Request and response types exchanged with the diary backend.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::deserialize_timestamp;
use crate::mood::{Mood, MoodTag};

// ============================================
// USER DTOs
// ============================================

/// A registered user
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

// ============================================
// DIARY DTOs
// ============================================

/// A diary entry
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Diary {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(default)]
    pub mood: Option<MoodTag>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// A diary together with its generated flower, if one exists
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DiaryWithImage {
    #[serde(flatten)]
    pub diary: Diary,
    #[serde(default)]
    pub flower_image: Option<FlowerImage>,
}

/// Diary row as returned by the admin endpoints
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AdminDiary {
    #[serde(flatten)]
    pub diary: Diary,
    #[serde(default)]
    pub has_image: Option<bool>,
    #[serde(default)]
    pub flower_image: Option<FlowerImage>,
}

impl AdminDiary {
    /// Whether a flower exists, trusting the embedded image over the flag
    pub fn has_image(&self) -> bool {
        self.flower_image.is_some() || self.has_image.unwrap_or(false)
    }
}

/// Body of `POST /api/v1/diaries/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDiaryRequest {
    pub user_id: i64,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

// ============================================
// FLOWER DTOs
// ============================================

/// AI-generated image tied to one diary
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FlowerImage {
    pub id: i64,
    pub diary_id: i64,
    pub image_url: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/v1/flowers/generate`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateFlowerRequest {
    pub diary_id: i64,
}

// ============================================
// ADMIN DTOs
// ============================================

/// Backend-computed aggregate counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_diaries: u64,
    pub total_images: u64,
    pub monthly_diaries: u64,
    pub weekly_diaries: u64,
}
