//! Admin User List

use async_trait::async_trait;
use chrono::Local;
use std::fmt::Write;

use super::components::{divider, empty_state};
use super::Page;
use crate::api::{ApiResult, DiaryClient, User};
use crate::format::format_date_time;
use crate::route::Route;

pub const EMPTY_MESSAGE: &str = "まだユーザーが登録されていません";

pub struct AdminUsersPage {
    skip: u32,
    limit: u32,
}

impl AdminUsersPage {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}

#[async_trait]
impl Page for AdminUsersPage {
    type Data = Vec<User>;

    fn route(&self) -> Route {
        Route::AdminUsers
    }

    async fn load(&self, client: &DiaryClient) -> ApiResult<Vec<User>> {
        client.get_all_users(self.skip, self.limit).await
    }

    fn render_ready(&self, users: &Vec<User>) -> String {
        let mut out = String::from("👥 ユーザー管理\n");
        let _ = writeln!(out, "総ユーザー数: {}\n", users.len());

        if users.is_empty() {
            out.push_str(&empty_state("👥", EMPTY_MESSAGE, &[]));
            return out;
        }

        let _ = writeln!(out, "ID | ユーザー名 | メールアドレス | 登録日時 | 操作");
        let _ = writeln!(out, "{}", divider());
        for user in users {
            let _ = writeln!(
                out,
                "{} | {} | {} | {} | 詳細を見る → {}",
                user.id,
                user.username,
                user.email,
                format_date_time(&user.created_at.with_timezone(&Local)),
                Route::AdminUserDiaries(user.id)
            );
        }

        out
    }
}
