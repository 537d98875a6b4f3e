//! Layout Chrome
//!
//! Header and navigation wrapped around every page body.

use super::components::{divider, link};
use crate::route::Route;

/// Which section a page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    User,
    Admin,
}

impl Layout {
    pub fn for_route(route: Route) -> Self {
        if route.is_admin() {
            Layout::Admin
        } else {
            Layout::User
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Layout::User => "🌸 Flower Diary",
            Layout::Admin => "管理画面 - Flower Diary",
        }
    }

    fn nav(&self) -> Vec<String> {
        match self {
            Layout::User => vec![
                link("📖 日記一覧", Route::DiaryList),
                link("✏️ 日記を書く", Route::NewDiary),
            ],
            Layout::Admin => vec![
                link("ダッシュボード", Route::AdminDashboard),
                link("ユーザー管理", Route::AdminUsers),
                "設定 (準備中)".to_string(),
            ],
        }
    }

    /// Header, nav, then the page body
    pub fn wrap(&self, body: &str) -> String {
        let mut out = String::new();
        out.push_str(self.title());
        out.push('\n');
        out.push_str(&self.nav().join("  |  "));
        out.push('\n');
        out.push_str(&divider());
        out.push_str("\n\n");
        out.push_str(body);
        if !body.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_for_route() {
        assert_eq!(Layout::for_route(Route::AdminUsers), Layout::Admin);
        assert_eq!(Layout::for_route(Route::DiaryDetail(1)), Layout::User);
    }

    #[test]
    fn test_admin_chrome() {
        let page = Layout::Admin.wrap("body");
        assert!(page.starts_with("管理画面 - Flower Diary\n"));
        assert!(page.contains("ユーザー管理 → /admin/users"));
        assert!(page.ends_with("body\n"));
    }
}
