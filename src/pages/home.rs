//! Landing page with the two entry points of the user section.

use async_trait::async_trait;

use super::components::link;
use super::Page;
use crate::api::{ApiResult, DiaryClient};
use crate::route::Route;

pub struct HomePage;

#[async_trait]
impl Page for HomePage {
    type Data = ();

    fn route(&self) -> Route {
        Route::Home
    }

    async fn load(&self, _client: &DiaryClient) -> ApiResult<()> {
        Ok(())
    }

    fn render_ready(&self, _data: &()) -> String {
        [
            "🌸 Flower Diary".to_string(),
            "あなたの気持ちを花に変える日記アプリ".to_string(),
            String::new(),
            link("日記を見る", Route::DiaryList),
            link("日記を書く", Route::NewDiary),
        ]
        .join("\n")
            + "\n"
    }
}
