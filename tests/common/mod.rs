//! In-process fake of the diary backend for client and page tests.

#![allow(dead_code)]

use axum::Router;
use flower_diary::{ClientConfig, DiaryClient};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

pub fn client_for(base_url: &str) -> DiaryClient {
    DiaryClient::new(ClientConfig {
        base_url: base_url.to_string(),
        ..ClientConfig::default()
    })
    .unwrap()
}

/// Shared log of what the fake backend received
#[derive(Clone, Default)]
pub struct Recorder {
    entries: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    pub fn record(&self, entry: Value) {
        self.entries.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<Value> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

pub fn diary_json(id: i64, mood: Option<&str>, content: &str) -> Value {
    json!({
        "id": id,
        "user_id": 1,
        "content": content,
        "mood": mood,
        "created_at": "2024-06-15T10:30:00.000000",
        "updated_at": "2024-06-15T10:30:00.000000",
    })
}

pub fn flower_json(diary_id: i64) -> Value {
    json!({
        "id": 100 + diary_id,
        "diary_id": diary_id,
        "image_url": format!("https://storage.example.com/flowers/{}.png", diary_id),
        "prompt": "a soft pink cherry blossom in morning light",
        "created_at": "2024-06-15T10:30:04.000000",
    })
}

pub fn with_flower(mut diary: Value, diary_id: i64) -> Value {
    diary["flower_image"] = flower_json(diary_id);
    diary
}

pub fn admin_diary_json(id: i64, user_id: i64, with_image: bool) -> Value {
    let mut diary = diary_json(id, Some("excited"), "文化祭の準備で遅くまで残った");
    diary["user_id"] = json!(user_id);
    diary["has_image"] = json!(with_image);
    if with_image {
        diary["flower_image"] = flower_json(id);
    }
    diary
}

pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "created_at": "2024-04-01T09:00:00",
    })
}
