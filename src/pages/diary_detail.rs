//! Diary Detail Page

use async_trait::async_trait;
use chrono::Local;
use std::fmt::Write;

use super::components::{divider, error_panel, link};
use super::Page;
use crate::api::{ApiResult, DiaryClient, DiaryWithImage};
use crate::format::format_date_time;
use crate::mood::{detail_emoji, detail_label};
use crate::route::Route;

pub const NOT_FOUND_MESSAGE: &str = "日記が見つかりません";

pub struct DiaryDetailPage {
    diary_id: i64,
}

impl DiaryDetailPage {
    pub fn new(diary_id: i64) -> Self {
        Self { diary_id }
    }
}

#[async_trait]
impl Page for DiaryDetailPage {
    type Data = DiaryWithImage;

    fn route(&self) -> Route {
        Route::DiaryDetail(self.diary_id)
    }

    async fn load(&self, client: &DiaryClient) -> ApiResult<DiaryWithImage> {
        client.get_diary(self.diary_id).await
    }

    fn render_error(&self, message: &str) -> String {
        let message = if message.is_empty() {
            NOT_FOUND_MESSAGE
        } else {
            message
        };
        error_panel(message, Some(("📖 一覧に戻る", Route::DiaryList)))
    }

    fn render_ready(&self, entry: &DiaryWithImage) -> String {
        let diary = &entry.diary;
        let mut out = String::new();
        let _ = writeln!(out, "{}\n", link("← 一覧に戻る", Route::DiaryList));

        if let Some(image) = &entry.flower_image {
            let _ = writeln!(out, "🌸 {}", image.image_url);
            if !image.prompt.is_empty() {
                let _ = writeln!(out, "“{}”", image.prompt);
            }
            out.push('\n');
        }

        let _ = write!(
            out,
            "{}  {}",
            detail_emoji(diary.mood.as_ref()),
            format_date_time(&diary.created_at.with_timezone(&Local))
        );
        if diary.mood.is_some() {
            let _ = write!(out, "  {}", detail_label(diary.mood.as_ref()));
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", divider());
        let _ = writeln!(out, "{}", diary.content);

        out
    }
}
