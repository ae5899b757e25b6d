//! Helpers for driving the router against the in-memory store

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tower::ServiceExt;

use crate::{
    models::{Address, Contact, NewAddress, NewContact, NewUser, User},
    password::hash_password,
    repositories::{AddressStore, ContactStore, UserStore, memory::MemoryStore},
    routes::create_router,
    state::AppState,
};

/// Password of every seeded user
pub const PASSWORD: &str = "test";

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_user_store(store.clone(), store)
    }

    /// Serve users from `users` while contacts and addresses stay in `store`
    pub fn with_user_store(users: Arc<dyn UserStore>, store: Arc<MemoryStore>) -> Self {
        let state = AppState {
            user_repository: users,
            contact_repository: store.clone(),
            address_repository: store.clone(),
        };

        Self {
            store,
            router: create_router(state),
        }
    }

    /// Insert a user that is already logged in with `token`
    pub async fn seed_user(&self, username: &str, token: &str) -> User {
        static PASSWORD_HASH: OnceLock<String> = OnceLock::new();
        let password_hash =
            PASSWORD_HASH.get_or_init(|| hash_password(PASSWORD).expect("hash test password"));

        let user = UserStore::create(
            self.store.as_ref(),
            &NewUser {
                username: username.to_string(),
                password_hash: password_hash.clone(),
                name: username.to_string(),
            },
        )
        .await
        .expect("seed user")
        .expect("username is free");

        self.store
            .set_token(user.id, Some(token))
            .await
            .expect("seed token");

        User {
            token: Some(token.to_string()),
            ..user
        }
    }

    pub async fn seed_contact(&self, owner: &User) -> Contact {
        self.seed_contact_with(
            owner,
            NewContact {
                first_name: "test".to_string(),
                last_name: Some("test".to_string()),
                email: Some("test@mail.com".to_string()),
                phone: Some("123456".to_string()),
            },
        )
        .await
    }

    pub async fn seed_contact_with(&self, owner: &User, contact: NewContact) -> Contact {
        ContactStore::create(self.store.as_ref(), owner.id, &contact)
            .await
            .expect("seed contact")
    }

    /// Twenty contacts named `first N` / `last N`
    pub async fn seed_search_contacts(&self, owner: &User) {
        for i in 0..20 {
            self.seed_contact_with(
                owner,
                NewContact {
                    first_name: format!("first {i}"),
                    last_name: Some(format!("last {i}")),
                    email: Some(format!("test{i}@mail.com")),
                    phone: Some(format!("11111{i}")),
                },
            )
            .await;
        }
    }

    pub async fn seed_address(&self, contact: &Contact) -> Address {
        AddressStore::create(
            self.store.as_ref(),
            contact.id,
            &NewAddress {
                street: "test".to_string(),
                city: "test".to_string(),
                province: "test".to_string(),
                country: "test".to_string(),
                postal_code: "12345".to_string(),
            },
        )
        .await
        .expect("seed address")
    }

    /// Send a request and decode the JSON response body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };

        (status, value)
    }
}
