//! Admin Dashboard
//!
//! Stat cards over the backend's aggregate counts plus quick links.

use async_trait::async_trait;
use std::fmt::Write;

use super::components::{divider, error_panel, link};
use super::Page;
use crate::api::{AdminStats, ApiResult, DiaryClient};
use crate::route::Route;

pub const LOAD_FAILED_MESSAGE: &str = "データの読み込みに失敗しました";

pub struct AdminDashboardPage;

#[async_trait]
impl Page for AdminDashboardPage {
    type Data = AdminStats;

    fn route(&self) -> Route {
        Route::AdminDashboard
    }

    async fn load(&self, client: &DiaryClient) -> ApiResult<AdminStats> {
        client.get_admin_stats().await
    }

    fn render_error(&self, message: &str) -> String {
        let message = if message.is_empty() {
            LOAD_FAILED_MESSAGE
        } else {
            message
        };
        error_panel(message, None)
    }

    fn render_ready(&self, stats: &AdminStats) -> String {
        let mut out = String::from("📊 ダッシュボード\n\n");

        let _ = writeln!(out, "👥 総ユーザー数    {:>8}", stats.total_users);
        let _ = writeln!(out, "📖 総日記数        {:>8}", stats.total_diaries);
        let _ = writeln!(out, "🖼  生成画像数      {:>8}", stats.total_images);
        out.push('\n');
        let _ = writeln!(out, "📅 今月の日記投稿  {:>8}", stats.monthly_diaries);
        let _ = writeln!(out, "   今月投稿された日記の数");
        let _ = writeln!(out, "📈 最近7日間の投稿 {:>8}", stats.weekly_diaries);
        let _ = writeln!(out, "   過去1週間の投稿数");
        out.push('\n');

        let _ = writeln!(out, "{}", divider());
        let _ = writeln!(out, "クイックアクション");
        let _ = writeln!(out, "  {}", link("ユーザー一覧を確認", Route::AdminUsers));
        let _ = writeln!(out, "  {}", link("全日記一覧", Route::AdminDiaries));
        let _ = writeln!(out, "  システム設定 (準備中)");

        out
    }
}
