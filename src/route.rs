//! Routes
//!
//! Every page the client can show, addressed by a `/user/...` or
//! `/admin/...` path.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A navigable page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    DiaryList,
    DiaryDetail(i64),
    NewDiary,
    AdminDashboard,
    AdminUsers,
    AdminUserDiaries(i64),
    AdminDiaries,
}

/// Path that doesn't name a page
#[derive(Debug, Error, PartialEq, Eq)]
#[error("No page at '{0}'")]
pub struct RouteError(pub String);

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/user".to_string(),
            Route::DiaryList => "/user/diary".to_string(),
            Route::DiaryDetail(id) => format!("/user/diary/{}", id),
            Route::NewDiary => "/user/diary/new".to_string(),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
            Route::AdminUsers => "/admin/users".to_string(),
            Route::AdminUserDiaries(id) => format!("/admin/users/{}", id),
            Route::AdminDiaries => "/admin/diaries".to_string(),
        }
    }

    /// Whether the page lives under the admin layout
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Route::AdminDashboard
                | Route::AdminUsers
                | Route::AdminUserDiaries(_)
                | Route::AdminDiaries
        )
    }

    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] | ["user"] => Route::Home,
            ["user", "diary"] => Route::DiaryList,
            ["user", "diary", "new"] => Route::NewDiary,
            ["user", "diary", id] => Route::DiaryDetail(parse_id(id, path)?),
            ["admin"] | ["admin", "dashboard"] => Route::AdminDashboard,
            ["admin", "users"] => Route::AdminUsers,
            ["admin", "users", id] => Route::AdminUserDiaries(parse_id(id, path)?),
            ["admin", "diaries"] => Route::AdminDiaries,
            _ => return Err(RouteError(path.to_string())),
        };

        Ok(route)
    }
}

fn parse_id(segment: &str, path: &str) -> Result<i64, RouteError> {
    // Ids must be positive
    match segment.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(RouteError(path.to_string())),
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}
