#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use notes_api::{auth::password::hash_password, auth::TokenAuthority, router, AppState};
use notes_store::{MemoryStore, NewNote, NewUser, Note, NoteStore, User, UserStore};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const INITIAL_NOTES: [(&str, bool); 2] = [
    ("HTML is easy", false),
    ("Browser can execute only Javascript", true),
];

pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Response {
    pub fn is_json(&self) -> bool {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"))
    }
}

pub struct TestApp {
    pub store: MemoryStore,
    pub router: Router,
}

impl TestApp {
    /// A fresh app whose store holds only the initial notes.
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        for (content, important) in INITIAL_NOTES {
            store.insert(NewNote::new(content, important)).await.unwrap();
        }
        let state = AppState::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            TokenAuthority::new("test secret", 3600),
        );
        Self::with_state(store, state)
    }

    pub fn with_state(store: MemoryStore, state: AppState) -> Self {
        Self {
            store,
            router: router(state),
        }
    }

    /// Adds the `root` user with password `sekret`.
    pub async fn add_root_user(&self) -> User {
        self.store
            .create(NewUser {
                username: "root".into(),
                name: None,
                password_hash: hash_password("sekret").unwrap(),
            })
            .await
            .unwrap()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        Response {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/api/login",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.is_json());
        response.body["token"].as_str().unwrap().to_string()
    }

    pub async fn notes_in_db(&self) -> Vec<Note> {
        NoteStore::list(&self.store).await.unwrap()
    }

    pub async fn users_in_db(&self) -> Vec<User> {
        UserStore::list(&self.store).await.unwrap()
    }

    /// A well-formed id that no note has.
    pub async fn non_existing_id(&self) -> Uuid {
        let note = self
            .store
            .insert(NewNote::new("willremovethissoon", false))
            .await
            .unwrap();
        self.store.delete(note.id).await.unwrap();
        note.id
    }
}

pub fn contents(notes: &[Note]) -> Vec<String> {
    notes.iter().map(|n| n.content.clone()).collect()
}
