//! HTTP tests for the likes crate over an in-memory store.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use chrono::Utc;
use identity::{DeploymentMode, IdentityConfig, IdentityState, SigningKey, visitors_router};
use kernel::id::{BlogId, BlogLikeId, VisitorId};
use tower::ServiceExt;

use crate::domain::entities::BlogLike;
use crate::domain::repository::BlogLikeRepository;
use crate::error::{LikesError, LikesResult};
use crate::presentation::router::likes_router_generic;

#[derive(Clone, Default)]
struct InMemoryBlogLikeRepository {
    likes: Arc<Mutex<Vec<BlogLike>>>,
}

impl BlogLikeRepository for InMemoryBlogLikeRepository {
    async fn list_by_visitor(&self, visit_id: &VisitorId) -> LikesResult<Vec<BlogLike>> {
        let likes = self.likes.lock().unwrap();
        Ok(likes.iter().filter(|l| &l.visit_id == visit_id).cloned().collect())
    }

    async fn exists(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<bool> {
        let likes = self.likes.lock().unwrap();
        Ok(likes
            .iter()
            .any(|l| &l.blog_id == blog_id && &l.visit_id == visit_id))
    }

    async fn create(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<BlogLike> {
        let mut likes = self.likes.lock().unwrap();
        if likes
            .iter()
            .any(|l| &l.blog_id == blog_id && &l.visit_id == visit_id)
        {
            return Err(LikesError::AlreadyLiked);
        }
        let now = Utc::now();
        let like = BlogLike {
            id: BlogLikeId::new(),
            blog_id: *blog_id,
            visit_id: *visit_id,
            created_at: now,
            updated_at: now,
        };
        likes.push(like.clone());
        Ok(like)
    }

    async fn delete(&self, blog_id: &BlogId, visit_id: &VisitorId) -> LikesResult<bool> {
        let mut likes = self.likes.lock().unwrap();
        let before = likes.len();
        likes.retain(|l| !(&l.blog_id == blog_id && &l.visit_id == visit_id));
        Ok(likes.len() < before)
    }
}

fn app() -> Router {
    let identity = IdentityState::from_config(&IdentityConfig::new(
        SigningKey::new("likes-test-secret").unwrap(),
        DeploymentMode::Development,
    ));

    Router::new()
        .nest("/api/visitors", visitors_router(identity.clone()))
        .nest(
            "/api/blog-likes",
            likes_router_generic(InMemoryBlogLikeRepository::default(), identity),
        )
}

fn request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, headers, json)
}

/// Visitor cookie from the generate endpoint, as a `Cookie` header value
async fn visitor_cookie(app: &Router) -> String {
    let (_, headers, _) = send(app, request(Method::POST, "/api/visitors", None)).await;
    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

#[cfg(test)]
mod like_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_like_lifecycle() {
        let app = app();
        let cookie = visitor_cookie(&app).await;
        let blog_id = BlogId::new();
        let uri = format!("/api/blog-likes/{blog_id}");

        let (status, _, body) = send(&app, request(Method::GET, &uri, Some(&cookie))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "isLiked": false }));

        let (status, _, body) = send(&app, request(Method::POST, &uri, Some(&cookie))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blog_id"], blog_id.to_string());
        assert!(body["id"].is_string());

        let (_, _, body) = send(&app, request(Method::GET, &uri, Some(&cookie))).await;
        assert_eq!(body, serde_json::json!({ "isLiked": true }));

        let (status, _, body) = send(&app, request(Method::POST, &uri, Some(&cookie))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Blog is already liked");

        let (status, _, body) = send(&app, request(Method::DELETE, &uri, Some(&cookie))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Blog like deleted successfully");

        let (_, _, body) = send(&app, request(Method::GET, &uri, Some(&cookie))).await;
        assert_eq!(body, serde_json::json!({ "isLiked": false }));
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_visitor_and_not_cached() {
        let app = app();
        let alice = visitor_cookie(&app).await;
        let bob = visitor_cookie(&app).await;
        let blog_id = BlogId::new();

        send(
            &app,
            request(Method::POST, &format!("/api/blog-likes/{blog_id}"), Some(&alice)),
        )
        .await;

        let (status, headers, body) =
            send(&app, request(Method::GET, "/api/blog-likes", Some(&alice))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["blog_id"], blog_id.to_string());

        let (_, _, body) = send(&app, request(Method::GET, "/api/blog-likes", Some(&bob))).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_delete_missing_like_succeeds() {
        let app = app();
        let cookie = visitor_cookie(&app).await;

        let (status, _, _) = send(
            &app,
            request(
                Method::DELETE,
                &format!("/api/blog-likes/{}", BlogId::new()),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[cfg(test)]
mod visitor_required_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_or_invalid_visitor_cookie_is_unauthorized() {
        let app = app();
        let uri = format!("/api/blog-likes/{}", BlogId::new());

        for cookie in [None, Some("visit-id-token=forged"), Some("token=whatever")] {
            for method in [Method::GET, Method::POST, Method::DELETE] {
                let (status, headers, body) =
                    send(&app, request(method.clone(), &uri, cookie)).await;
                assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {cookie:?}");
                assert_eq!(body, serde_json::json!({ "error": "Unauthenticated" }));
                // likes never create a visitor session
                assert!(headers.get(header::SET_COOKIE).is_none());
            }
        }

        let (status, _, _) = send(&app, request(Method::GET, "/api/blog-likes", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_blog_id_is_bad_request() {
        let app = app();
        let cookie = visitor_cookie(&app).await;

        let (status, _, _) = send(
            &app,
            request(Method::GET, "/api/blog-likes/not-a-uuid", Some(&cookie)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
