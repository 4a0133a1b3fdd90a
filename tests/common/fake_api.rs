//! In-process stand-in for the user-management API.
//!
//! A single catch-all wiremock mock routes every request into a shared store, so state
//! changes (create, delete) are visible to later calls in the same scenario.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use userapi_e2e::ApiConfig;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Respond, ResponseTemplate};

const ADMIN_ID: &str = "admin0000000000001";
const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Clone)]
struct StoredUser {
    id: String,
    username: String,
    email: String,
    created_at: String,
    is_admin: bool,
}

impl StoredUser {
    fn to_json(&self) -> Value {
        json!({
            "_id": self.id,
            "username": self.username,
            "createdAt": self.created_at,
            "emails": [{ "address": self.email, "verified": false }],
            "isAdmin": self.is_admin,
        })
    }
}

#[derive(Debug)]
struct Store {
    admin_email: String,
    admin_password: String,
    tokens: HashSet<String>,
    users: Vec<StoredUser>,
    next_id: u64,
}

/// Shared handle to the fake; clones see the same store.
#[derive(Debug, Clone)]
pub struct FakeUserApi {
    store: Arc<Mutex<Store>>,
}

impl FakeUserApi {
    pub fn new(admin_email: &str, admin_password: &str) -> Self {
        let admin = StoredUser {
            id: ADMIN_ID.to_string(),
            username: ADMIN_USERNAME.to_string(),
            email: admin_email.to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            is_admin: true,
        };
        Self {
            store: Arc::new(Mutex::new(Store {
                admin_email: admin_email.to_string(),
                admin_password: admin_password.to_string(),
                tokens: HashSet::new(),
                users: vec![admin],
                next_id: 1,
            })),
        }
    }

    /// Starts a mock server backed by a fresh fake and returns a config pointing at it.
    pub async fn start() -> (MockServer, FakeUserApi, ApiConfig) {
        let server = MockServer::start().await;
        let config = ApiConfig::new(server.uri()).expect("mock server uri is a valid base url");
        let fake = FakeUserApi::new(&config.admin_email, &config.admin_password);
        Mock::given(any())
            .respond_with(fake.clone())
            .mount(&server)
            .await;
        (server, fake, config)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.store
            .lock()
            .expect("fake store poisoned")
            .users
            .iter()
            .any(|user| user.id == id)
    }

    pub fn user_count(&self) -> usize {
        self.store.lock().expect("fake store poisoned").users.len()
    }
}

impl Respond for FakeUserApi {
    fn respond(&self, request: &wiremock::Request) -> ResponseTemplate {
        let mut store = self.store.lock().expect("fake store poisoned");
        store.handle(request)
    }
}

impl Store {
    fn handle(&mut self, request: &wiremock::Request) -> ResponseTemplate {
        let path = request.url.path().trim_end_matches('/').to_string();
        let method = request.method.as_str();

        if method == "POST" && path == "/users/login" {
            return self.login(request);
        }

        if !path.starts_with("/api/") {
            return ResponseTemplate::new(404).set_body_string("Not Found");
        }
        if !self.is_authorized(request) {
            return unauthorized();
        }

        match (method, path.as_str()) {
            ("POST", "/api/users") => self.create(request),
            ("GET", "/api/users") => self.list(),
            ("GET", "/api/user") => self.current(),
            (method, other) => match other.strip_prefix("/api/users/") {
                Some(id) if method == "GET" => self.get(id),
                Some(id) if method == "DELETE" => self.delete(id),
                _ => ResponseTemplate::new(404).set_body_string("Not Found"),
            },
        }
    }

    fn is_authorized(&self, request: &wiremock::Request) -> bool {
        request
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .is_some_and(|token| self.tokens.contains(token))
    }

    fn login(&mut self, request: &wiremock::Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let email = body.get("email").and_then(Value::as_str);
        let password = body.get("password").and_then(Value::as_str);

        if email != Some(self.admin_email.as_str()) || password != Some(self.admin_password.as_str()) {
            return ResponseTemplate::new(401).set_body_json(json!({
                "error": "Unauthorized",
                "errorType": "Meteor.Error",
                "reason": "Incorrect email or password",
            }));
        }

        let token = format!("token-{}", self.tokens.len() + 1);
        self.tokens.insert(token.clone());
        ResponseTemplate::new(200).set_body_json(json!({ "token": token }))
    }

    fn create(&mut self, request: &wiremock::Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let (Some(username), Some(email), Some(_password)) =
            (field("username"), field("email"), field("password"))
        else {
            return ResponseTemplate::new(400).set_body_json(json!({
                "error": "Bad Request",
                "errorType": "Match.Error",
                "reason": "username, email and password are required",
            }));
        };

        if self.users.iter().any(|user| user.email == email) {
            return ResponseTemplate::new(400).set_body_json(json!({
                "error": "Email already exists",
                "errorType": "Meteor.Error",
                "reason": "Email already exists",
            }));
        }

        let user = StoredUser {
            id: format!("user{:014}", self.next_id),
            username,
            email,
            created_at: format!("2026-01-01T00:00:{:02}.000Z", self.next_id % 60),
            is_admin: false,
        };
        self.next_id += 1;
        let body = user.to_json();
        self.users.push(user);
        ResponseTemplate::new(200).set_body_json(body)
    }

    fn list(&self) -> ResponseTemplate {
        let listing: Vec<Value> = self
            .users
            .iter()
            .map(|user| json!({ "_id": user.id, "username": user.username }))
            .collect();
        ResponseTemplate::new(200).set_body_json(listing)
    }

    fn current(&self) -> ResponseTemplate {
        match self.users.iter().find(|user| user.id == ADMIN_ID) {
            Some(admin) => ResponseTemplate::new(200).set_body_json(admin.to_json()),
            None => ResponseTemplate::new(404),
        }
    }

    fn get(&self, id: &str) -> ResponseTemplate {
        match self.users.iter().find(|user| user.id == id) {
            Some(user) => ResponseTemplate::new(200).set_body_json(user.to_json()),
            None => ResponseTemplate::new(404),
        }
    }

    fn delete(&mut self, id: &str) -> ResponseTemplate {
        match self.users.iter().position(|user| user.id == id) {
            Some(index) => {
                let user = self.users.remove(index);
                ResponseTemplate::new(200).set_body_json(json!({ "_id": user.id }))
            }
            None => ResponseTemplate::new(404).set_body_json(json!({
                "error": "Not Found",
                "errorType": "Meteor.Error",
                "reason": "User not found",
            })),
        }
    }
}

fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({
        "error": "Unauthorized",
        "errorType": "Meteor.Error",
        "message": "You must be logged in to do this. [Unauthorized]",
        "reason": "You must be logged in to do this.",
    }))
}
