mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

mod when_there_is_initially_one_user {
    use super::*;

    #[tokio::test]
    async fn creation_succeeds_with_a_fresh_username() {
        let app = TestApp::new().await;
        app.add_root_user().await;
        let users_at_start = app.users_in_db().await;

        let response = app
            .request(
                Method::POST,
                "/api/users",
                None,
                Some(json!({
                    "username": "veerplaying",
                    "name": "Veerpratap Singh",
                    "password": "testpass123",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.is_json());
        assert_eq!(response.body["username"], json!("veerplaying"));
        assert_eq!(response.body["name"], json!("Veerpratap Singh"));
        assert!(response.body.get("password_hash").is_none());
        assert!(response.body.get("passwordHash").is_none());

        let users_at_end = app.users_in_db().await;
        assert_eq!(users_at_end.len(), users_at_start.len() + 1);
        assert!(users_at_end.iter().any(|u| u.username == "veerplaying"));
    }

    #[tokio::test]
    async fn creation_fails_if_username_is_already_taken() {
        let app = TestApp::new().await;
        app.add_root_user().await;
        let users_at_start = app.users_in_db().await;

        let response = app
            .request(
                Method::POST,
                "/api/users",
                None,
                Some(json!({
                    "username": "root",
                    "name": "rootuser",
                    "password": "testpass123",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.is_json());
        assert!(response.body["error"]
            .as_str()
            .unwrap()
            .contains("`username` to be unique"));

        assert_eq!(app.users_in_db().await.len(), users_at_start.len());
    }

    #[tokio::test]
    async fn creation_fails_without_password() {
        let app = TestApp::new().await;
        app.add_root_user().await;

        let response = app
            .request(
                Method::POST,
                "/api/users",
                None,
                Some(json!({ "username": "nopass" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(app.users_in_db().await.len(), 1);
    }

    #[tokio::test]
    async fn users_are_listed_with_their_notes() {
        let app = TestApp::new().await;
        app.add_root_user().await;
        let token = app.login("root", "sekret").await;
        let created = app
            .request(
                Method::POST,
                "/api/notes",
                Some(token.as_str()),
                Some(json!({ "content": "owned by root" })),
            )
            .await;

        let response = app.get("/api/users").await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.is_json());
        let users = response.body.as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["username"], json!("root"));
        assert_eq!(users[0]["notes"], json!([created.body["id"]]));
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn succeeds_with_correct_credentials() {
        let app = TestApp::new().await;
        app.add_root_user().await;

        let token = app.login("root", "sekret").await;
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn fails_with_401_on_wrong_password() {
        let app = TestApp::new().await;
        app.add_root_user().await;

        let response = app
            .request(
                Method::POST,
                "/api/login",
                None,
                Some(json!({ "username": "root", "password": "wrong" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.body,
            json!({ "error": "invalid username or password" })
        );
    }

    #[tokio::test]
    async fn fails_with_401_for_unknown_user() {
        let app = TestApp::new().await;

        let response = app
            .request(
                Method::POST,
                "/api/login",
                None,
                Some(json!({ "username": "nobody", "password": "sekret" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(response.body.get("token").is_none());
    }
}
