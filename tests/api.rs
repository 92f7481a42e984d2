use std::sync::Arc;
use std::time::Duration;

use poem::{endpoint::BoxEndpoint, http::StatusCode, test::TestClient};
use serde_json::json;

use contact_desk::{
    application::services::jwt::{JwtService, JwtServiceConfig, Role},
    infrastructure::repositories::InMemoryMessageRepository,
    presentation::http::{build_app, endpoints::root::ApiState},
};

struct Harness {
    client: TestClient<BoxEndpoint<'static>>,
    jwt: JwtService,
}

impl Harness {
    fn new() -> Self {
        let jwt = JwtService::new(JwtServiceConfig {
            secret: "integration-secret".to_string(),
            expiration: Duration::from_secs(600),
        });
        let state = Arc::new(ApiState::new(
            Arc::new(InMemoryMessageRepository::new()),
            jwt.clone(),
            100,
        ));
        Self {
            client: TestClient::new(build_app(state, "http://localhost:3000")),
            jwt,
        }
    }

    fn bearer(&self, subject: &str, roles: &[Role]) -> String {
        format!("Bearer {}", self.jwt.issue(subject, roles).unwrap())
    }

    async fn submit(&self, subject: &str) -> String {
        let resp = self
            .client
            .post("/api/messages")
            .body_json(&json!({
                "name": "Bob Lee",
                "email": "bob@example.com",
                "subject": subject,
                "body": "My account is locked, please assist."
            }))
            .send()
            .await;
        resp.assert_status(StatusCode::CREATED);
        resp.json()
            .await
            .value()
            .object()
            .get("id")
            .string()
            .to_string()
    }
}

#[tokio::test]
async fn health_is_public() {
    let harness = Harness::new();

    let resp = harness.client.get("/api/health").send().await;

    resp.assert_status_is_ok();
    resp.assert_text("OK").await;
}

#[tokio::test]
async fn invalid_submission_lists_violations() {
    let harness = Harness::new();

    let resp = harness
        .client
        .post("/api/messages")
        .body_json(&json!({
            "name": "Al",
            "email": "bad-email",
            "subject": "Hi",
            "body": "short"
        }))
        .send()
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let json = resp.json().await;
    let violations = json.value().object().get("violations").array();
    violations.assert_len(4);
    violations.get(0).object().get("field").assert_string("name");
    violations.get(1).object().get("field").assert_string("email");
    violations.get(2).object().get("field").assert_string("subject");
    violations.get(3).object().get("field").assert_string("body");
}

#[tokio::test]
async fn moderation_requires_moderator_token() {
    let harness = Harness::new();

    harness
        .client
        .get("/api/messages")
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    harness
        .client
        .get("/api/messages")
        .header("Authorization", "Bearer not-a-token")
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    harness
        .client
        .get("/api/messages")
        .header("Authorization", harness.bearer("visitor", &[]))
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn token_with_only_foreign_roles_is_forbidden() {
    let harness = Harness::new();
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({
            "sub": "viewer",
            "roles": ["viewer"],
            "exp": 4_102_444_800u64,
            "iat": 0,
        }),
        &jsonwebtoken::EncodingKey::from_secret(b"integration-secret"),
    )
    .unwrap();

    harness
        .client
        .get("/api/messages")
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn submitted_message_is_listed_and_closed_once() {
    let harness = Harness::new();
    let token = harness.bearer("alice", &[Role::Moderator]);
    let id = harness.submit("Need help today").await;

    let resp = harness
        .client
        .get("/api/messages")
        .header("Authorization", token.clone())
        .query("page", &1)
        .query("page_size", &5)
        .query("sort_field", &"createdAt")
        .query("sort_dir", &"desc")
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let listed = json.value().object();
    listed.get("has_more").assert_bool(false);
    let messages = listed.get("messages").array();
    messages.assert_len(1);
    messages.get(0).object().get("id").assert_string(&id);
    messages.get(0).object().get("status").assert_string("open");

    let resp = harness
        .client
        .post(format!("/api/messages/{id}/close"))
        .header("Authorization", token.clone())
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let closed = json.value().object();
    closed.get("status").assert_string("closed");
    closed.get("updated_by").assert_string("alice");

    harness
        .client
        .post(format!("/api/messages/{id}/close"))
        .header("Authorization", token.clone())
        .send()
        .await
        .assert_status(StatusCode::CONFLICT);

    let resp = harness
        .client
        .get("/api/messages")
        .header("Authorization", token)
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.json()
        .await
        .value()
        .object()
        .get("messages")
        .array()
        .assert_len(0);
}

#[tokio::test]
async fn unknown_message_maps_to_not_found() {
    let harness = Harness::new();
    let token = harness.bearer("alice", &[Role::Moderator]);
    let unknown = uuid::Uuid::new_v4();

    harness
        .client
        .post(format!("/api/messages/{unknown}/close"))
        .header("Authorization", token.clone())
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    harness
        .client
        .get(format!("/api/messages/{unknown}"))
        .header("Authorization", token)
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_paging_maps_to_bad_request() {
    let harness = Harness::new();
    let token = harness.bearer("alice", &[Role::Moderator]);

    harness
        .client
        .get("/api/messages")
        .header("Authorization", token.clone())
        .query("page", &0)
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    harness
        .client
        .get("/api/messages")
        .header("Authorization", token)
        .query("sort_field", &"body")
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
