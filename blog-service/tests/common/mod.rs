#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::AuthorizationGate;
use auth::PasswordHasher;
use auth::TokenService;
use auth::Visibility;
use auth::WorkFactor;
use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use blog_service::domain::article::errors::ArticleError;
use blog_service::domain::article::models::Article;
use blog_service::domain::article::ports::ArticleRepository;
use blog_service::domain::article::service::ArticleService;
use blog_service::domain::user::errors::UserError;
use blog_service::domain::user::models::User;
use blog_service::domain::user::models::UserId;
use blog_service::domain::user::ports::UserRepository;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::inbound::http::routes::access_policy;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store double keyed by email, like the real table's unique constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == *id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != *id);
        if users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryArticleRepository {
    articles: Mutex<Vec<Article>>,
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn create(&self, article: Article) -> Result<Article, ArticleError> {
        self.articles.lock().unwrap().push(article.clone());
        Ok(article)
    }

    async fn list_all(&self) -> Result<Vec<Article>, ArticleError> {
        Ok(self.articles.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Article>, ArticleError> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.title == title)
            .cloned()
            .collect())
    }

    async fn delete_one_by_title(&self, title: &str) -> Result<u64, ArticleError> {
        let mut articles = self.articles.lock().unwrap();
        match articles.iter().position(|a| a.title == title) {
            Some(index) => {
                articles.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Test application driving the full router in-process
pub struct TestApp {
    pub router: Router,
    pub tokens: Arc<TokenService>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Router backed by in-memory stores and the default access policy
    pub fn spawn() -> Self {
        Self::with_repositories(
            InMemoryUserRepository::default(),
            InMemoryArticleRepository::default(),
            HashMap::new(),
        )
    }

    /// Router backed by in-memory stores with access overrides
    pub fn with_access(overrides: HashMap<String, Visibility>) -> Self {
        Self::with_repositories(
            InMemoryUserRepository::default(),
            InMemoryArticleRepository::default(),
            overrides,
        )
    }

    pub fn with_repositories<UR, AR>(
        user_repository: UR,
        article_repository: AR,
        overrides: HashMap<String, Visibility>,
    ) -> Self
    where
        UR: UserRepository,
        AR: ArticleRepository,
    {
        let tokens = Arc::new(TokenService::new(JWT_SECRET));
        let hasher = PasswordHasher::with_work_factor(WorkFactor {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build password hasher");
        let authenticator = Arc::new(Authenticator::new(hasher, Arc::clone(&tokens)));
        let gate = Arc::new(AuthorizationGate::new(
            access_policy(&overrides).expect("Invalid access overrides"),
            Arc::clone(&tokens),
        ));

        let user_service = Arc::new(UserService::new(
            Arc::new(user_repository),
            authenticator,
            chrono::Duration::hours(24),
        ));
        let article_service = Arc::new(ArticleService::new(Arc::new(article_repository)));

        let router = create_router(user_service, article_service, gate, Duration::from_secs(5));

        Self { router, tokens }
    }

    /// Send a request; `token` goes into the Authorization header verbatim
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", token);
        }
        let body = match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        TestResponse { status, body }
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send("POST", uri, None, Some(body)).await
    }

    pub async fn post_authenticated(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send("POST", uri, Some(token), Some(body)).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, None, None).await
    }

    pub async fn get_authenticated(&self, uri: &str, token: &str) -> TestResponse {
        self.send("GET", uri, Some(token), None).await
    }

    /// Register a user and return a token from a real login
    pub async fn register_and_login(&self, username: &str, email: &str, password: &str) -> String {
        let registered = self
            .post(
                "/register",
                serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password
                }),
            )
            .await;
        assert_eq!(registered.status, StatusCode::CREATED);

        let login = self
            .post(
                "/login",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK);

        login.body["data"]["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }
}
