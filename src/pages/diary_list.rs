//! Diary List Page
//!
//! The acting user's diaries, newest first, each with its mood emoji, date
//! and a short excerpt.

use async_trait::async_trait;
use chrono::Local;
use std::fmt::Write;

use super::components::{empty_state, error_panel, link};
use super::Page;
use crate::api::{ApiResult, Diary, DiaryClient};
use crate::format::{format_date, truncate, LIST_EXCERPT_CHARS};
use crate::mood::list_emoji;
use crate::route::Route;

pub const EMPTY_MESSAGE: &str = "まだ日記がありません";

pub const LOAD_FAILED_MESSAGE: &str = "日記の読み込みに失敗しました";

pub struct DiaryListPage {
    skip: u32,
    limit: u32,
}

impl DiaryListPage {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}

fn render_entry(out: &mut String, diary: &Diary) {
    let date = format_date(&diary.created_at.with_timezone(&Local));
    let _ = write!(out, "{}  {}", list_emoji(diary.mood.as_ref()), date);
    if let Some(mood) = &diary.mood {
        let _ = write!(out, "  [{}]", mood.as_str());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "    {}", truncate(&diary.content, LIST_EXCERPT_CHARS));
    let _ = writeln!(out, "    {}", link("›", Route::DiaryDetail(diary.id)));
}

#[async_trait]
impl Page for DiaryListPage {
    type Data = Vec<Diary>;

    fn route(&self) -> Route {
        Route::DiaryList
    }

    async fn load(&self, client: &DiaryClient) -> ApiResult<Vec<Diary>> {
        client.get_diaries(self.skip, self.limit).await
    }

    fn render_error(&self, message: &str) -> String {
        let message = if message.is_empty() {
            LOAD_FAILED_MESSAGE
        } else {
            message
        };
        error_panel(message, Some(("✏️ 新しい日記", Route::NewDiary)))
    }

    fn render_ready(&self, diaries: &Vec<Diary>) -> String {
        let mut out = String::from("📖 あなたの日記\n");

        if diaries.is_empty() {
            out.push_str("まだお花がありません\n\n");
            out.push_str(&empty_state(
                "🌱",
                EMPTY_MESSAGE,
                &["最初の日記を書いて、あなただけのお花を咲かせましょう！"],
            ));
            out.push_str(&link("🌸 はじめての日記を書く", Route::NewDiary));
            out.push('\n');
            return out;
        }

        let _ = writeln!(out, "{}件のお花が咲いています", diaries.len());
        let _ = writeln!(out, "{}\n", link("✏️ 新しい日記", Route::NewDiary));

        for diary in diaries {
            render_entry(&mut out, diary);
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse_timestamp;
    use crate::mood::MoodTag;
    use crate::view::ViewState;

    fn diary(id: i64, mood: Option<MoodTag>) -> Diary {
        let ts = parse_timestamp("2024-03-05T09:07:00Z").unwrap();
        Diary {
            id,
            user_id: 1,
            content: "公園を散歩した".to_string(),
            mood,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_mood_fallback_emoji() {
        let page = DiaryListPage::new(0, 10);
        let view = page.render(&ViewState::Ready(vec![
            diary(3, Some(MoodTag::Unknown("sleepy".to_string()))),
            diary(2, None),
        ]));

        assert!(view.contains("📝"));
        assert!(view.contains("[sleepy]"));
        assert!(view.contains("🌸  "));
        assert!(view.contains("› → /user/diary/3"));
    }

    #[test]
    fn test_error_fallback() {
        let page = DiaryListPage::new(0, 10);
        assert!(page
            .render(&ViewState::Error(String::new()))
            .starts_with("⚠️ 日記の読み込みに失敗しました"));
        assert!(page
            .render(&ViewState::Error("ネットワークエラーが発生しました".to_string()))
            .contains("✏️ 新しい日記 → /user/diary/new"));
    }
}
