//! Router-level tests for the resume endpoints
//!
//! Ownership is checked per request: another user's resume is never
//! listed, read, changed, or deleted.

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::repositories::MemoryStore;
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::{
        body::Body,
        http::{header, Request, Response, StatusCode},
        Router,
    };
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::collections::HashSet;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let mut config = AppConfig::default();
        config.database.url = "memory:".to_string();
        config.auth.jwt_secret = "resume-route-secret".to_string();
        config.auth.bcrypt_cost = 4;
        create_router(AppState::new(Arc::new(MemoryStore::new()), config))
    }

    fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response: Response<Body> = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Sign up and sign in; returns the `name=value` cookie pair.
    async fn session(app: &Router, email: &str, name: &str) -> String {
        let sign_up = json!({
            "email": email,
            "password": "secret",
            "passwordConfirmation": "secret",
            "name": name
        });
        let (status, _) = send(app, json_request("POST", "/api/sign-up", None, Some(sign_up))).await;
        assert_eq!(status, StatusCode::CREATED);

        let sign_in = json!({"email": email, "password": "secret"});
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/sign-in", None, Some(sign_in)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn resume_body(title: &str, intro_len: usize) -> Value {
        json!({"title": title, "introduce": "x".repeat(intro_len)})
    }

    async fn create(app: &Router, cookie: &str, title: &str) -> i64 {
        let (status, body) = send(
            app,
            json_request("POST", "/api/resume", Some(cookie), Some(resume_body(title, 200))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["resumeId"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list_returns_exactly_it() {
        let app = test_app();
        let ann = session(&app, "ann@b.com", "Ann").await;

        let (status, body) = send(
            &app,
            json_request("POST", "/api/resume", Some(&ann), Some(resume_body("Backend", 200))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["status"], "APPLY");
        assert_eq!(body["data"]["name"], "Ann");
        let resume_id = body["data"]["resumeId"].as_i64().unwrap();

        let (status, body) = send(&app, json_request("GET", "/api/resume", Some(&ann), None)).await;
        assert_eq!(status, StatusCode::OK);
        let list = body["data"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["resumeId"], resume_id);
    }

    #[tokio::test]
    async fn test_empty_list_is_ok() {
        let app = test_app();
        let ann = session(&app, "ann@b.com", "Ann").await;

        let (status, body) = send(&app, json_request("GET", "/api/resume", Some(&ann), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_introduction_boundary() {
        let app = test_app();
        let ann = session(&app, "ann@b.com", "Ann").await;

        let (status, body) = send(
            &app,
            json_request("POST", "/api/resume", Some(&ann), Some(resume_body("t", 149))),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            json_request("POST", "/api/resume", Some(&ann), Some(resume_body("t", 150))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_missing_title_is_409() {
        let app = test_app();
        let ann = session(&app, "ann@b.com", "Ann").await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/resume",
                Some(&ann),
                Some(json!({"introduce": "x".repeat(200)})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Please enter title.");
    }

    #[tokio::test]
    async fn test_other_user_delete_is_not_owner_and_resume_survives() {
        let app = test_app();
        let ann = session(&app, "ann@b.com", "Ann").await;
        let bob = session(&app, "bob@b.com", "Bob").await;
        let resume_id = create(&app, &ann, "Backend").await;
        let uri = format!("/api/resume/{}", resume_id);

        let (status, body) = send(&app, json_request("DELETE", &uri, Some(&bob), None)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "NOT_OWNER");

        let (status, body) = send(
            &app,
            json_request("PUT", &uri, Some(&bob), Some(resume_body("Stolen", 200))),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "NOT_OWNER");

        let (status, _) = send(&app, json_request("GET", &uri, Some(&bob), None)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(&app, json_request("GET", &uri, Some(&ann), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "Backend");
    }

    #[tokio::test]
    async fn test_update_and_delete_by_owner() {
        let app = test_app();
        let ann = session(&app, "ann@b.com", "Ann").await;
        let resume_id = create(&app, &ann, "Backend").await;
        let uri = format!("/api/resume/{}", resume_id);

        let (status, body) = send(
            &app,
            json_request("PUT", &uri, Some(&ann), Some(resume_body("Platform", 160))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "Platform");

        let (status, body) = send(&app, json_request("DELETE", &uri, Some(&ann), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], resume_id);

        let (status, body) = send(&app, json_request("GET", &uri, Some(&ann), None)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "RESOURCE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let app = test_app();
        let ann = session(&app, "ann@b.com", "Ann").await;

        let (status, body) =
            send(&app, json_request("GET", "/api/resume/abc", Some(&ann), None)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "RESOURCE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_sort_by_title() {
        let app = test_app();
        let ann = session(&app, "ann@b.com", "Ann").await;
        for title in ["beta", "alpha", "gamma"] {
            create(&app, &ann, title).await;
        }

        let (_, body) = send(
            &app,
            json_request("GET", "/api/resume?sortBy=title&sort=ASC", Some(&ann), None),
        )
        .await;
        let titles: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn test_bad_list_query_is_json_bad_request() {
        let app = test_app();
        let ann = session(&app, "ann@b.com", "Ann").await;

        let (status, body) = send(
            &app,
            json_request("GET", "/api/resume?sort=asc&sort=desc", Some(&ann), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["message"].as_str().unwrap().contains("sort"));
    }

    fn sort_by_strategy() -> impl Strategy<Value = Option<&'static str>> {
        prop_oneof![
            Just(None),
            Just(Some("createdAt")),
            Just(Some("updatedAt")),
            Just(Some("title")),
            Just(Some("status")),
            Just(Some("resumeId")),
            Just(Some("userId")),
        ]
    }

    fn sort_strategy() -> impl Strategy<Value = Option<&'static str>> {
        prop_oneof![
            Just(None),
            Just(Some("asc")),
            Just(Some("DESC")),
            Just(Some("sideways")),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_list_never_leaks_across_users(
            sort_by in sort_by_strategy(),
            sort in sort_strategy(),
            ann_count in 0usize..4,
            bob_count in 0usize..4,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let app = test_app();
                let ann = session(&app, "ann@b.com", "Ann").await;
                let bob = session(&app, "bob@b.com", "Bob").await;

                let mut ann_ids = HashSet::new();
                for i in 0..ann_count {
                    ann_ids.insert(create(&app, &ann, &format!("ann-{}", i)).await);
                }
                for i in 0..bob_count {
                    create(&app, &bob, &format!("bob-{}", i)).await;
                }

                let mut query = Vec::new();
                if let Some(sort_by) = sort_by {
                    query.push(format!("sortBy={}", sort_by));
                }
                if let Some(sort) = sort {
                    query.push(format!("sort={}", sort));
                }
                let uri = format!("/api/resume?{}", query.join("&"));

                let (status, body) = send(&app, json_request("GET", &uri, Some(&ann), None)).await;
                prop_assert_eq!(status, StatusCode::OK);

                let listed: HashSet<i64> = body["data"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|r| r["resumeId"].as_i64().unwrap())
                    .collect();
                prop_assert_eq!(listed, ann_ids);
                Ok(())
            })?;
        }
    }
}
