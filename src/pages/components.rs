//! Shared page pieces: loading indicator, error panel, empty state, links.

use crate::route::Route;

pub const LOADING_TEXT: &str = "読み込み中...";

/// Horizontal rule between page sections
pub fn divider() -> String {
    "─".repeat(40)
}

pub fn loading() -> String {
    format!("🌸 {}\n", LOADING_TEXT)
}

/// `label → /path`
pub fn link(label: &str, route: Route) -> String {
    format!("{} → {}", label, route)
}

/// Error banner, optionally followed by a way back
pub fn error_panel(message: &str, back: Option<(&str, Route)>) -> String {
    let mut out = format!("⚠️ {}\n", message);
    if let Some((label, route)) = back {
        out.push('\n');
        out.push_str(&link(label, route));
        out.push('\n');
    }
    out
}

/// Centered-ish empty state: icon, headline, optional hint lines
pub fn empty_state(icon: &str, headline: &str, hints: &[&str]) -> String {
    let mut out = format!("{}\n{}\n", icon, headline);
    for hint in hints {
        out.push_str(hint);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_panel_with_back_link() {
        let panel = error_panel("日記が見つかりません", Some(("📖 一覧に戻る", Route::DiaryList)));
        assert!(panel.starts_with("⚠️ 日記が見つかりません"));
        assert!(panel.contains("📖 一覧に戻る → /user/diary"));
    }
}
