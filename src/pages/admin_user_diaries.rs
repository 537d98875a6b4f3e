//! Admin: one user's diaries, as cards with their flower status.

use async_trait::async_trait;
use chrono::Local;
use std::fmt::Write;

use super::components::{empty_state, error_panel, link};
use super::Page;
use crate::api::{AdminDiary, ApiResult, DiaryClient};
use crate::format::{format_date_time, truncate, ADMIN_EXCERPT_CHARS};
use crate::mood::admin_emoji;
use crate::route::Route;

pub const EMPTY_MESSAGE: &str = "まだ日記が投稿されていません";

pub struct AdminUserDiariesPage {
    user_id: i64,
    skip: u32,
    limit: u32,
}

impl AdminUserDiariesPage {
    pub fn new(user_id: i64, skip: u32, limit: u32) -> Self {
        Self {
            user_id,
            skip,
            limit,
        }
    }
}

/// Card for one diary in the admin views
pub(crate) fn render_admin_diary(out: &mut String, diary: &AdminDiary, show_author: bool) {
    let entry = &diary.diary;

    let _ = write!(out, "{}  日記ID: {}", admin_emoji(entry.mood.as_ref()), entry.id);
    if show_author {
        let _ = write!(out, "  ユーザー #{}", entry.user_id);
    }
    if let Some(mood) = &entry.mood {
        let _ = write!(out, "  [{}]", mood.as_str());
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "    {}",
        format_date_time(&entry.created_at.with_timezone(&Local))
    );
    let _ = writeln!(out, "    {}", truncate(&entry.content, ADMIN_EXCERPT_CHARS));

    if let Some(image) = &diary.flower_image {
        let _ = writeln!(out, "    🖼  {}", image.image_url);
        let _ = writeln!(out, "    プロンプト: {}", image.prompt);
    }
    let _ = writeln!(
        out,
        "    {}",
        if diary.has_image() { "画像あり" } else { "画像なし" }
    );
}

#[async_trait]
impl Page for AdminUserDiariesPage {
    type Data = Vec<AdminDiary>;

    fn route(&self) -> Route {
        Route::AdminUserDiaries(self.user_id)
    }

    async fn load(&self, client: &DiaryClient) -> ApiResult<Vec<AdminDiary>> {
        client
            .get_user_diaries(self.user_id, self.skip, self.limit)
            .await
    }

    fn render_error(&self, message: &str) -> String {
        error_panel(message, Some(("← ユーザー一覧に戻る", Route::AdminUsers)))
    }

    fn render_ready(&self, diaries: &Vec<AdminDiary>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}\n", link("← ユーザー一覧に戻る", Route::AdminUsers));
        let _ = writeln!(out, "ユーザー #{} の日記", self.user_id);
        let _ = writeln!(out, "総日記数: {}\n", diaries.len());

        if diaries.is_empty() {
            out.push_str(&empty_state("📝", EMPTY_MESSAGE, &[]));
            return out;
        }

        for diary in diaries {
            render_admin_diary(&mut out, diary, false);
            out.push('\n');
        }

        out
    }
}
