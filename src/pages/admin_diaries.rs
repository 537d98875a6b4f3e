//! Admin: every diary across all users.

use async_trait::async_trait;
use std::fmt::Write;

use super::admin_user_diaries::render_admin_diary;
use super::components::{empty_state, link};
use super::Page;
use crate::api::{AdminDiary, ApiResult, DiaryClient};
use crate::route::Route;

pub const EMPTY_MESSAGE: &str = "まだ日記が投稿されていません";

pub struct AdminDiariesPage {
    skip: u32,
    limit: u32,
}

impl AdminDiariesPage {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}

#[async_trait]
impl Page for AdminDiariesPage {
    type Data = Vec<AdminDiary>;

    fn route(&self) -> Route {
        Route::AdminDiaries
    }

    async fn load(&self, client: &DiaryClient) -> ApiResult<Vec<AdminDiary>> {
        client.get_all_diaries(self.skip, self.limit).await
    }

    fn render_ready(&self, diaries: &Vec<AdminDiary>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}\n", link("← ダッシュボード", Route::AdminDashboard));
        let _ = writeln!(out, "📖 全日記一覧");
        let _ = writeln!(out, "総日記数: {}\n", diaries.len());

        if diaries.is_empty() {
            out.push_str(&empty_state("📝", EMPTY_MESSAGE, &[]));
            return out;
        }

        for diary in diaries {
            render_admin_diary(&mut out, diary, true);
            let _ = writeln!(
                out,
                "    {}",
                link("ユーザーの日記", Route::AdminUserDiaries(diary.diary.user_id))
            );
            out.push('\n');
        }

        out
    }
}
