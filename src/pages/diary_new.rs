//! New Diary Form
//!
//! The one multi-step interaction in the client:
//!
//! ```text
//! Editing ──submit──> Submitting ──ok──> Success ──(delay)──> diary list
//!    ^                    │
//!    └──────err───────────┘   (message shown, inputs kept)
//! ```
//!
//! The flower is only revealed once the create call resolves; there is no
//! separate "generating" step and no way to cancel a submission.

use std::fmt::Write;
use std::time::Duration;
use thiserror::Error;

use super::components::{divider, link};
use crate::api::{ApiResult, CreateDiaryRequest, DiaryClient, DiaryWithImage};
use crate::mood::Mood;
use crate::route::Route;

pub const CONTENT_PLACEHOLDER: &str = "今日あったこと、感じたことを自由に書いてね...";

/// Where the form currently is
#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase {
    Editing { error: Option<String> },
    Submitting,
    Success { diary: Box<DiaryWithImage> },
}

/// Why a submit did not go out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRefused {
    #[error("日記の内容を入力してください")]
    EmptyContent,

    #[error("送信中です")]
    InFlight,

    #[error("日記はすでに保存されています")]
    AlreadySaved,
}

/// Pending navigation after a successful save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub after: Duration,
}

/// Diary creation form state
#[derive(Debug, Clone)]
pub struct NewDiaryForm {
    user_id: i64,
    content: String,
    mood: Option<Mood>,
    phase: FormPhase,
}

impl NewDiaryForm {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            content: String::new(),
            mood: None,
            phase: FormPhase::Editing { error: None },
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    fn is_editing(&self) -> bool {
        matches!(self.phase, FormPhase::Editing { .. })
    }

    /// Replace the content. Inputs are frozen outside of editing.
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.content = content.into();
        true
    }

    /// Select `mood`, or clear it if it is already selected
    pub fn toggle_mood(&mut self, mood: Mood) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.mood = if self.mood == Some(mood) {
            None
        } else {
            Some(mood)
        };
        true
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.is_editing() && !self.content.trim().is_empty()
    }

    /// Move to `Submitting` and produce the request to send.
    ///
    /// Clears any previous error. Refused without a state change when the
    /// content is blank or the form is not editable.
    pub fn begin_submit(&mut self) -> Result<CreateDiaryRequest, SubmitRefused> {
        match self.phase {
            FormPhase::Submitting => return Err(SubmitRefused::InFlight),
            FormPhase::Success { .. } => return Err(SubmitRefused::AlreadySaved),
            FormPhase::Editing { .. } => {}
        }
        if self.content.trim().is_empty() {
            return Err(SubmitRefused::EmptyContent);
        }

        self.phase = FormPhase::Submitting;
        Ok(CreateDiaryRequest {
            user_id: self.user_id,
            content: self.content.clone(),
            mood: self.mood,
        })
    }

    /// Apply the outcome of the create call
    pub fn finish_submit(&mut self, result: ApiResult<DiaryWithImage>) {
        if !matches!(self.phase, FormPhase::Submitting) {
            tracing::warn!("Ignoring submit result outside of a submission");
            return;
        }

        self.phase = match result {
            Ok(diary) => FormPhase::Success {
                diary: Box::new(diary),
            },
            Err(e) => FormPhase::Editing {
                error: Some(e.to_string()),
            },
        };
    }

    /// Submit the form and wait for the backend to answer
    pub async fn submit(&mut self, client: &DiaryClient) -> Result<&FormPhase, SubmitRefused> {
        let request = self.begin_submit()?;
        let result = client.create_diary(&request).await;
        self.finish_submit(result);
        Ok(&self.phase)
    }

    /// Generated flower, once saved
    pub fn image_url(&self) -> Option<&str> {
        match &self.phase {
            FormPhase::Success { diary } => diary
                .flower_image
                .as_ref()
                .map(|image| image.image_url.as_str()),
            _ => None,
        }
    }

    /// Navigation to schedule after a save
    pub fn redirect(&self, delay: Duration) -> Option<Redirect> {
        match self.phase {
            FormPhase::Success { .. } => Some(Redirect {
                to: Route::DiaryList,
                after: delay,
            }),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        match &self.phase {
            FormPhase::Success { .. } => self.render_success(),
            FormPhase::Editing { error } => self.render_form(error.as_deref(), false),
            FormPhase::Submitting => self.render_form(None, true),
        }
    }

    fn render_success(&self) -> String {
        let mut out = String::new();
        if let Some(url) = self.image_url() {
            let _ = writeln!(out, "✨\nお花が咲きました！\n");
            let _ = writeln!(out, "🖼  {}\n", url);
        }
        let _ = writeln!(out, "🌸 日記を保存しました！");
        if self.image_url().is_some() {
            let _ = writeln!(out, "あなたの気持ちから、素敵なお花が咲きました");
        }
        let _ = writeln!(out, "まもなく一覧ページへ移動します...");
        out
    }

    fn render_form(&self, error: Option<&str>, submitting: bool) -> String {
        let mut out = String::new();

        if let Some(message) = error {
            let _ = writeln!(out, "⚠️ {}\n", message);
        }

        let _ = writeln!(out, "✏️ 今日のきもち");
        let _ = writeln!(out, "あなたの日記からお花が咲きます\n");

        let _ = writeln!(out, "🎨 今日の気分は？");
        for mood in Mood::ALL {
            let mark = if self.mood == Some(mood) { "x" } else { " " };
            let _ = writeln!(out, "  [{}] {} {} ({})", mark, mood.emoji(), mood.label(), mood);
        }
        out.push('\n');

        let _ = writeln!(out, "📝 日記を書こう");
        let _ = writeln!(out, "{}", divider());
        if self.content.is_empty() {
            let _ = writeln!(out, "{}", CONTENT_PLACEHOLDER);
        } else {
            let _ = writeln!(out, "{}", self.content);
        }
        let _ = writeln!(out, "{}", divider());
        let _ = writeln!(out, "🌸 日記の内容からAIがお花を選びます\n");

        if submitting {
            let _ = writeln!(out, "🌸 お花を咲かせています...");
        } else if self.can_submit() {
            let _ = writeln!(out, "🌷 保存してお花を咲かせる");
            let _ = writeln!(out, "{}", link("戻る", Route::DiaryList));
        } else {
            let _ = writeln!(out, "🌷 保存してお花を咲かせる (本文を入力してください)");
            let _ = writeln!(out, "{}", link("戻る", Route::DiaryList));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Diary, FlowerImage};
    use crate::format::parse_timestamp;

    fn saved(with_image: bool) -> DiaryWithImage {
        let ts = parse_timestamp("2024-05-10T12:00:00").unwrap();
        DiaryWithImage {
            diary: Diary {
                id: 5,
                user_id: 1,
                content: "散歩した".to_string(),
                mood: Some(Mood::Calm.into()),
                created_at: ts,
                updated_at: ts,
            },
            flower_image: with_image.then(|| FlowerImage {
                id: 9,
                diary_id: 5,
                image_url: "https://img.example.com/5.png".to_string(),
                prompt: "a quiet lily".to_string(),
                created_at: ts,
            }),
        }
    }

    #[test]
    fn test_blank_content_cannot_submit() {
        let mut form = NewDiaryForm::new(1);
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), Err(SubmitRefused::EmptyContent));

        form.set_content("   \n\t");
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), Err(SubmitRefused::EmptyContent));
        assert_eq!(form.phase(), &FormPhase::Editing { error: None });
    }

    #[test]
    fn test_mood_toggles_off() {
        let mut form = NewDiaryForm::new(1);
        form.toggle_mood(Mood::Happy);
        assert_eq!(form.mood(), Some(Mood::Happy));
        form.toggle_mood(Mood::Sad);
        assert_eq!(form.mood(), Some(Mood::Sad));
        form.toggle_mood(Mood::Sad);
        assert_eq!(form.mood(), None);
    }

    #[test]
    fn test_submit_builds_request_and_freezes_inputs() {
        let mut form = NewDiaryForm::new(3);
        form.set_content("友達と話した");
        form.toggle_mood(Mood::Grateful);

        let request = form.begin_submit().unwrap();
        assert_eq!(request.user_id, 3);
        assert_eq!(request.content, "友達と話した");
        assert_eq!(request.mood, Some(Mood::Grateful));

        assert_eq!(form.phase(), &FormPhase::Submitting);
        assert!(!form.can_submit());
        assert!(!form.set_content("changed"));
        assert!(!form.toggle_mood(Mood::Happy));
        assert_eq!(form.begin_submit(), Err(SubmitRefused::InFlight));
        assert!(form.render().contains("お花を咲かせています..."));
    }

    #[test]
    fn test_failure_returns_to_form_with_message() {
        let mut form = NewDiaryForm::new(1);
        form.set_content("text");
        form.begin_submit().unwrap();

        form.finish_submit(Err(ApiError::Status {
            status: 404,
            message: "ユーザーが見つかりません".to_string(),
        }));

        assert_eq!(
            form.phase(),
            &FormPhase::Editing {
                error: Some("ユーザーが見つかりません".to_string())
            }
        );
        assert_eq!(form.content(), "text");
        assert!(form.render().starts_with("⚠️ ユーザーが見つかりません"));
        assert!(form.redirect(Duration::from_millis(4000)).is_none());

        // Resubmission clears the banner
        form.begin_submit().unwrap();
        assert_eq!(form.phase(), &FormPhase::Submitting);
    }

    #[test]
    fn test_success_shows_image_and_redirects() {
        let mut form = NewDiaryForm::new(1);
        form.set_content("text");
        form.begin_submit().unwrap();
        form.finish_submit(Ok(saved(true)));

        assert_eq!(form.image_url(), Some("https://img.example.com/5.png"));
        let view = form.render();
        assert!(view.contains("お花が咲きました！"));
        assert!(view.contains("https://img.example.com/5.png"));

        let redirect = form.redirect(Duration::from_millis(4000)).unwrap();
        assert_eq!(redirect.to, Route::DiaryList);
        assert_eq!(redirect.after, Duration::from_millis(4000));
        assert_eq!(form.begin_submit(), Err(SubmitRefused::AlreadySaved));
    }

    #[test]
    fn test_success_without_image_still_redirects() {
        let mut form = NewDiaryForm::new(1);
        form.set_content("text");
        form.begin_submit().unwrap();
        form.finish_submit(Ok(saved(false)));

        assert!(form.image_url().is_none());
        assert!(form.render().contains("日記を保存しました！"));
        assert!(form.redirect(Duration::from_millis(4000)).is_some());
    }

    #[test]
    fn test_empty_form_render() {
        let form = NewDiaryForm::new(1);
        let view = form.render();
        assert!(view.contains(CONTENT_PLACEHOLDER));
        assert!(view.contains("(本文を入力してください)"));
        assert!(view.contains("[ ] 😊 嬉しい (happy)"));
    }
}
