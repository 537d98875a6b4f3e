//! Pages
//!
//! Each page fetches its data once per activation and renders one of four
//! views: loading, error, empty, or populated.
//!
//! ## Pages
//!
//! - [`HomePage`]: static landing links
//! - [`DiaryListPage`]: the acting user's diaries
//! - [`DiaryDetailPage`]: one diary with its flower
//! - [`NewDiaryForm`]: diary creation flow (form, not a fetch)
//! - [`AdminDashboardPage`]: aggregate counts
//! - [`AdminUsersPage`]: all users
//! - [`AdminUserDiariesPage`]: one user's diaries
//! - [`AdminDiariesPage`]: every diary

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::{ApiResult, DiaryClient};
use crate::config::UiConfig;
use crate::route::Route;
use crate::view::{PageActivation, ViewState};

mod admin_dashboard;
mod admin_diaries;
mod admin_user_diaries;
mod admin_users;
pub mod components;
mod diary_detail;
mod diary_list;
mod diary_new;
mod home;
pub mod layout;

pub use admin_dashboard::AdminDashboardPage;
pub use admin_diaries::AdminDiariesPage;
pub use admin_user_diaries::AdminUserDiariesPage;
pub use admin_users::AdminUsersPage;
pub use diary_detail::DiaryDetailPage;
pub use diary_list::DiaryListPage;
pub use diary_new::{FormPhase, NewDiaryForm, Redirect, SubmitRefused};
pub use home::HomePage;
pub use layout::Layout;

/// A page that loads data from the backend and renders it as text
#[async_trait]
pub trait Page: Send + Sync + 'static {
    type Data: Clone + Send + Sync + 'static;

    fn route(&self) -> Route;

    /// The single fetch issued per activation
    async fn load(&self, client: &DiaryClient) -> ApiResult<Self::Data>;

    fn render_ready(&self, data: &Self::Data) -> String;

    fn render_error(&self, message: &str) -> String {
        components::error_panel(message, None)
    }

    fn render_loading(&self) -> String {
        components::loading()
    }

    fn render(&self, state: &ViewState<Self::Data>) -> String {
        match state {
            ViewState::Loading => self.render_loading(),
            ViewState::Error(message) => self.render_error(message),
            ViewState::Ready(data) => self.render_ready(data),
        }
    }
}

/// Mount `page`: spawn its fetch and hand back the activation
pub fn activate<P: Page>(page: Arc<P>, client: DiaryClient) -> PageActivation<P::Data> {
    PageActivation::spawn(async move { page.load(&client).await })
}

/// A fully rendered page, chrome included
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub route: Route,
    pub text: String,
    /// The page settled in its error state
    pub failed: bool,
}

/// Activate `page`, wait for it to settle and render it inside its layout
pub async fn show<P: Page>(page: P, client: &DiaryClient) -> RenderedPage {
    let page = Arc::new(page);
    let route = page.route();

    let mut activation = activate(Arc::clone(&page), client.clone());
    let state = activation.settled().await;
    tracing::debug!(route = %route, failed = state.error().is_some(), "Page settled");

    RenderedPage {
        route,
        text: Layout::for_route(route).wrap(&page.render(&state)),
        failed: state.error().is_some(),
    }
}

/// Wait out `redirect`, then render the page it points at
pub async fn follow_redirect(
    redirect: Redirect,
    client: &DiaryClient,
    ui: &UiConfig,
) -> RenderedPage {
    tracing::debug!(to = %redirect.to, after = ?redirect.after, "Redirect scheduled");
    tokio::time::sleep(redirect.after).await;
    render_route(redirect.to, client, ui).await
}

/// Render whatever page lives at `route`
pub async fn render_route(route: Route, client: &DiaryClient, ui: &UiConfig) -> RenderedPage {
    match route {
        Route::Home => show(HomePage, client).await,
        Route::DiaryList => show(DiaryListPage::new(0, ui.diary_page_size), client).await,
        Route::DiaryDetail(id) => show(DiaryDetailPage::new(id), client).await,
        Route::NewDiary => {
            let form = NewDiaryForm::new(client.config().user_id);
            RenderedPage {
                route,
                text: Layout::User.wrap(&form.render()),
                failed: false,
            }
        }
        Route::AdminDashboard => show(AdminDashboardPage, client).await,
        Route::AdminUsers => show(AdminUsersPage::new(0, ui.admin_user_page_size), client).await,
        Route::AdminUserDiaries(user_id) => {
            show(
                AdminUserDiariesPage::new(user_id, 0, ui.admin_user_diary_page_size),
                client,
            )
            .await
        }
        Route::AdminDiaries => {
            show(AdminDiariesPage::new(0, ui.admin_diary_page_size), client).await
        }
    }
}
