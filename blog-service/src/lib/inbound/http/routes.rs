use std::collections::HashMap;

use auth::AccessPolicy;
use auth::Visibility;
use axum::routing::any;
use axum::routing::MethodRouter;
use thiserror::Error;

use super::handlers::add_article::add_article;
use super::handlers::delete_article_by_title::delete_article_by_title;
use super::handlers::delete_user_by_id::delete_user_by_id;
use super::handlers::get_articles::get_articles;
use super::handlers::get_articles_by_title::get_articles_by_title;
use super::handlers::get_user_by_id::get_user_by_id;
use super::handlers::get_users::get_users;
use super::handlers::login::login;
use super::handlers::register::register;
use super::router::AppState;

/// Every operation the service exposes.
///
/// Each route is served at `/<name>` and accepts any HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    AddArticle,
    GetUsers,
    GetArticles,
    GetUserById,
    DeleteUserById,
    DeleteArticleByTitle,
    GetArticlesByTitle,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown route in access configuration: {0}")]
pub struct UnknownRouteError(pub String);

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Login,
        Route::Register,
        Route::AddArticle,
        Route::GetUsers,
        Route::GetArticles,
        Route::GetUserById,
        Route::DeleteUserById,
        Route::DeleteArticleByTitle,
        Route::GetArticlesByTitle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Route::Login => "login",
            Route::Register => "register",
            Route::AddArticle => "addArticle",
            Route::GetUsers => "getUsers",
            Route::GetArticles => "getArticles",
            Route::GetUserById => "getUserById",
            Route::DeleteUserById => "deleteUserById",
            Route::DeleteArticleByTitle => "deleteArticleByTitle",
            Route::GetArticlesByTitle => "getArticlesByTitle",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::AddArticle => "/addArticle",
            Route::GetUsers => "/getUsers",
            Route::GetArticles => "/getArticles",
            Route::GetUserById => "/getUserById",
            Route::DeleteUserById => "/deleteUserById",
            Route::DeleteArticleByTitle => "/deleteArticleByTitle",
            Route::GetArticlesByTitle => "/getArticlesByTitle",
        }
    }

    /// Case-insensitive lookup by route name.
    ///
    /// Configuration keys arrive lowercased, so `getuserbyid` resolves too.
    pub fn from_name(name: &str) -> Option<Route> {
        Self::ALL
            .into_iter()
            .find(|route| route.name().eq_ignore_ascii_case(name))
    }

    pub fn default_visibility(self) -> Visibility {
        match self {
            Route::Login
            | Route::Register
            | Route::GetArticles
            | Route::GetArticlesByTitle
            | Route::GetUserById => Visibility::Public,
            Route::AddArticle
            | Route::GetUsers
            | Route::DeleteUserById
            | Route::DeleteArticleByTitle => Visibility::Protected,
        }
    }

    pub(super) fn handler(self) -> MethodRouter<AppState> {
        match self {
            Route::Login => any(login),
            Route::Register => any(register),
            Route::AddArticle => any(add_article),
            Route::GetUsers => any(get_users),
            Route::GetArticles => any(get_articles),
            Route::GetUserById => any(get_user_by_id),
            Route::DeleteUserById => any(delete_user_by_id),
            Route::DeleteArticleByTitle => any(delete_article_by_title),
            Route::GetArticlesByTitle => any(get_articles_by_title),
        }
    }
}

/// Build the access policy: defaults for every route, then overrides by name.
///
/// # Errors
/// * `UnknownRouteError` - An override names a route that does not exist
pub fn access_policy(
    overrides: &HashMap<String, Visibility>,
) -> Result<AccessPolicy<Route>, UnknownRouteError> {
    let defaults = Route::ALL
        .into_iter()
        .map(|route| (route, route.default_visibility()));

    let configured = overrides
        .iter()
        .map(|(name, visibility)| {
            Route::from_name(name)
                .map(|route| (route, *visibility))
                .ok_or_else(|| UnknownRouteError(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(defaults.chain(configured).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_names() {
        for route in Route::ALL {
            assert_eq!(route.path(), format!("/{}", route.name()));
            assert_eq!(Route::from_name(route.name()), Some(route));
        }
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(Route::from_name("getuserbyid"), Some(Route::GetUserById));
        assert_eq!(Route::from_name("ADDARTICLE"), Some(Route::AddArticle));
        assert_eq!(Route::from_name("updateUser"), None);
    }

    #[test]
    fn test_default_policy() {
        let policy = access_policy(&HashMap::new()).unwrap();

        assert_eq!(policy.visibility(Route::Login), Visibility::Public);
        assert_eq!(policy.visibility(Route::Register), Visibility::Public);
        assert_eq!(policy.visibility(Route::AddArticle), Visibility::Protected);
        assert_eq!(policy.visibility(Route::GetUsers), Visibility::Protected);
        assert_eq!(policy.visibility(Route::DeleteUserById), Visibility::Protected);
        assert_eq!(
            policy.visibility(Route::DeleteArticleByTitle),
            Visibility::Protected
        );
        assert_eq!(policy.visibility(Route::GetArticlesByTitle), Visibility::Public);
    }

    #[test]
    fn test_overrides_apply() {
        let overrides = HashMap::from([
            ("getuserbyid".to_string(), Visibility::Protected),
            ("getArticles".to_string(), Visibility::Protected),
        ]);

        let policy = access_policy(&overrides).unwrap();

        assert_eq!(policy.visibility(Route::GetUserById), Visibility::Protected);
        assert_eq!(policy.visibility(Route::GetArticles), Visibility::Protected);
        assert_eq!(policy.visibility(Route::Login), Visibility::Public);
    }

    #[test]
    fn test_unknown_override_is_rejected() {
        let overrides = HashMap::from([("updateUser".to_string(), Visibility::Public)]);

        assert_eq!(
            access_policy(&overrides).unwrap_err(),
            UnknownRouteError("updateUser".to_string())
        );
    }
}
