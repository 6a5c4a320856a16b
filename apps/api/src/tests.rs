//! Integration tests for the HireWrite generation gateway.
//!
//! Each test spins up a full server on a random port, with the dispatcher
//! pointed back at that same server's function routes and the agent
//! platform replaced by a local stub. Requests then travel the real wire
//! path: editor endpoint, dispatcher, function route, stub platform.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::dispatch::{DispatchError, Dispatcher};
use crate::forwarder::LyzrClient;
use crate::instrument::{ApiCallLog, CallStatus, UsageMetrics};
use crate::models::{GenerationRequest, ModelKind};
use crate::providers::{PLATFORM_USER_ID, PROVIDERS};
use crate::routes::build_router;
use crate::settings::SettingsStore;
use crate::state::AppState;

const SERVICE_TOKEN: &str = "test-service-token";

/// Serves `app` on a random loopback port and returns its address.
async fn spawn_app(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    addr
}

/// Stand-in for the agent platform: answers every inference call with a
/// fixed status and body, and keeps the envelopes it received.
struct LyzrStub {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl LyzrStub {
    fn envelopes(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

async fn spawn_lyzr_stub(status: u16, reply: Value) -> LyzrStub {
    let requests: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&requests);
    let app = Router::new().route(
        "/v3/inference/chat/",
        post(move |Json(envelope): Json<Value>| {
            let captured = Arc::clone(&captured);
            let reply = reply.clone();
            async move {
                captured.lock().unwrap().push(envelope);
                (StatusCode::from_u16(status).unwrap(), Json(reply))
            }
        }),
    );
    let addr = spawn_app(app).await;
    LyzrStub { addr, requests }
}

/// Test fixture for integration tests. Keeps the `AppState` so tests can
/// assert directly against the instrumentation stores.
struct TestFixture {
    client: Client,
    base_url: String,
    state: AppState,
    _settings_dir: TempDir,
}

impl TestFixture {
    /// Full server plus a stub platform that always succeeds.
    async fn new() -> (Self, LyzrStub) {
        let stub = spawn_lyzr_stub(200, json!({ "response": "Generated section content." })).await;
        let fixture = Self::with_lyzr(stub.addr).await;
        (fixture, stub)
    }

    /// Full server wired to an already-running stub platform.
    async fn with_lyzr(lyzr_addr: SocketAddr) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        let settings_dir = TempDir::new().expect("Failed to create temp dir");

        // The dispatcher targets this same server, so a generate call makes
        // the full two-hop trip.
        let config = Config {
            lyzr_api_url: format!("http://{}/v3/inference/chat/", lyzr_addr),
            lyzr_api_key: "test-lyzr-key".to_string(),
            service_auth_token: SERVICE_TOKEN.to_string(),
            forwarder_base_url: base_url.clone(),
            upstream_timeout_secs: 5,
            dispatch_timeout_secs: None,
            settings_path: Some(settings_dir.path().join("settings.json")),
            port: addr.port(),
            rust_log: "warn".to_string(),
        };

        let call_log = Arc::new(ApiCallLog::new());
        let metrics = Arc::new(UsageMetrics::new());
        let lyzr = LyzrClient::new(
            config.lyzr_api_url.clone(),
            config.lyzr_api_key.clone(),
            std::time::Duration::from_secs(config.upstream_timeout_secs),
        );
        let dispatcher = Dispatcher::new(
            &config.forwarder_base_url,
            config.service_auth_token.clone(),
            Arc::clone(&call_log),
            Arc::clone(&metrics),
        );
        let settings = Arc::new(
            SettingsStore::open(config.settings_path.clone()).expect("Failed to open settings"),
        );

        let state = AppState {
            config,
            lyzr,
            dispatcher: Arc::new(dispatcher),
            call_log,
            metrics,
            settings,
        };

        let app = build_router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            state,
            _settings_dir: settings_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn function_url(&self, slug: &str) -> String {
        self.url(&format!("/functions/v1/{slug}"))
    }
}

fn generation_body() -> Value {
    json!({
        "jobTitle": "Backend Engineer",
        "seniority": "Senior",
        "employmentType": "Full-Time",
        "remoteOption": "Remote",
        "section": "summary",
        "tone": "Professional"
    })
}

fn generation_request() -> GenerationRequest {
    serde_json::from_value(generation_body()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (fixture, _stub) = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "hirewrite-api");
}

#[tokio::test]
async fn test_function_routes_require_a_service_token() {
    let (fixture, stub) = TestFixture::new().await;

    // No credentials at all
    let resp = fixture
        .client
        .post(fixture.function_url("claude-sonnet-jd-generator"))
        .json(&generation_body())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    // Wrong bearer token
    let resp = fixture
        .client
        .post(fixture.function_url("claude-sonnet-jd-generator"))
        .bearer_auth("wrong-token")
        .json(&generation_body())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    assert!(stub.envelopes().is_empty(), "rejected calls must not reach the platform");
}

#[tokio::test]
async fn test_function_routes_accept_bearer_or_api_key() {
    let (fixture, _stub) = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.function_url("claude-sonnet-jd-generator"))
        .bearer_auth(SERVICE_TOKEN)
        .json(&generation_body())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .post(fixture.function_url("claude-sonnet-jd-generator"))
        .header("x-api-key", SERVICE_TOKEN)
        .json(&generation_body())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_forward_unknown_slug_is_not_found() {
    let (fixture, _stub) = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.function_url("mistral-jd-generator"))
        .bearer_auth(SERVICE_TOKEN)
        .json(&generation_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("mistral-jd-generator"));
}

#[tokio::test]
async fn test_forward_rejects_a_blank_job_title() {
    let (fixture, stub) = TestFixture::new().await;

    let mut body = generation_body();
    body["jobTitle"] = json!("   ");
    let resp = fixture
        .client
        .post(fixture.function_url("gpt-4o-jd-generator"))
        .bearer_auth(SERVICE_TOKEN)
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Job title is required");
    assert!(stub.envelopes().is_empty());
}

#[tokio::test]
async fn test_forward_builds_the_platform_envelope() {
    let (fixture, stub) = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.function_url("claude-sonnet-jd-generator"))
        .bearer_auth(SERVICE_TOKEN)
        .json(&generation_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["content"], "Generated section content.");
    assert_eq!(
        body["raw"]["response"], "Generated section content.",
        "the untouched platform reply rides along"
    );

    let envelopes = stub.envelopes();
    assert_eq!(envelopes.len(), 1);
    let envelope = &envelopes[0];
    assert_eq!(envelope["user_id"], PLATFORM_USER_ID);
    assert_eq!(envelope["agent_id"], PROVIDERS[0].agent_id);
    assert_eq!(envelope["session_id"], PROVIDERS[0].agent_id);

    let message = envelope["message"].as_str().unwrap();
    assert!(message.starts_with(
        "Please write a professional Role Summary section for a job description"
    ));
    assert!(message.contains("Job Title: Backend Engineer"));
    assert!(message.contains("The content should have a professional tone."));
}

#[tokio::test]
async fn test_forward_honors_caller_identity_overrides() {
    let (fixture, stub) = TestFixture::new().await;

    let mut body = generation_body();
    body["user_id"] = json!("reviewer@example.com");
    body["agent_id"] = json!("agent-override");
    let resp = fixture
        .client
        .post(fixture.function_url("claude-sonnet-jd-generator"))
        .bearer_auth(SERVICE_TOKEN)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let envelope = &stub.envelopes()[0];
    assert_eq!(envelope["user_id"], "reviewer@example.com");
    assert_eq!(envelope["agent_id"], "agent-override");
    assert_eq!(
        envelope["session_id"], "agent-override",
        "the default session follows the overridden agent"
    );
}

#[tokio::test]
async fn test_forward_relays_upstream_failures() {
    let stub = spawn_lyzr_stub(503, json!({ "error": "temporarily down" })).await;
    let fixture = TestFixture::with_lyzr(stub.addr).await;

    let resp = fixture
        .client
        .post(fixture.function_url("claude-sonnet-jd-generator"))
        .bearer_auth(SERVICE_TOKEN)
        .json(&generation_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 503, "the platform status is relayed as-is");
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Error from Claude 3.5 Sonnet service:"));
}

#[tokio::test]
async fn test_forward_flags_replies_without_text() {
    let stub = spawn_lyzr_stub(200, json!({ "ok": true })).await;
    let fixture = TestFixture::with_lyzr(stub.addr).await;

    let resp = fixture
        .client
        .post(fixture.function_url("grok-llama-jd-generator"))
        .bearer_auth(SERVICE_TOKEN)
        .json(&generation_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("no response text"));
}

#[tokio::test]
async fn test_generate_round_trip_instruments_once() {
    let (fixture, _stub) = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/v1/generate"))
        .json(&generation_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["model"], "claude");
    assert_eq!(body["content"], "Generated section content.");

    // Exactly one use, counted as a success
    let report: Value = fixture
        .client
        .get(fixture.url("/api/v1/metrics/usage"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(report["totalCalls"], 1);
    assert_eq!(report["models"][0]["model"], "claude");
    assert_eq!(report["models"][0]["count"], 1);
    assert_eq!(report["models"][0]["share"].as_f64().unwrap(), 1.0);
    assert_eq!(report["models"][0]["successRate"].as_f64().unwrap(), 100.0);
    assert_eq!(report["models"][1]["count"], 0);
    assert_eq!(report["models"][2]["count"], 0);

    // Exactly one settled call record
    let calls = fixture.state.call_log.snapshot();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].status, CallStatus::Success);
    assert!(calls[0].duration_ms.is_some());
    assert!(calls[0].endpoint.ends_with("/functions/v1/claude-sonnet-jd-generator"));
    assert_eq!(calls[0].request["jobTitle"], "Backend Engineer");
    assert_eq!(calls[0].request["user_id"], PLATFORM_USER_ID);
    assert_eq!(calls[0].response.as_ref().unwrap()["success"], true);

    // And DevTools sees the same thing over HTTP
    let devtools: Value = fixture
        .client
        .get(fixture.url("/api/v1/devtools/calls"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(devtools["capacity"], 50);
    assert_eq!(devtools["calls"].as_array().unwrap().len(), 1);
    assert_eq!(devtools["calls"][0]["status"], "success");
}

#[tokio::test]
async fn test_generate_rejects_a_blank_title_before_the_wire() {
    let (fixture, stub) = TestFixture::new().await;

    let mut body = generation_body();
    body["jobTitle"] = json!("");
    let resp = fixture
        .client
        .post(fixture.url("/api/v1/generate"))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["message"],
        "Job title is required to generate content"
    );

    assert!(stub.envelopes().is_empty(), "nothing may leave the process");
    assert!(fixture.state.call_log.is_empty(), "no pending record for a rejected call");
    let counts = fixture.state.metrics.usage_counts();
    assert!(counts.iter().all(|(_, n)| *n == 0));
}

#[tokio::test]
async fn test_generate_surfaces_upstream_errors() {
    let stub = spawn_lyzr_stub(401, json!({ "message": "Invalid JWT" })).await;
    let fixture = TestFixture::with_lyzr(stub.addr).await;

    let resp = fixture
        .client
        .post(fixture.url("/api/v1/generate"))
        .json(&generation_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "DISPATCH_ERROR");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("AI service error: 401"));
    assert!(message.contains("Invalid JWT"));

    // The failure is one use and zero successes, not a success plus a failure
    let counts = fixture.state.metrics.usage_counts();
    assert_eq!(counts[ModelKind::Claude.index()].1, 1);
    assert_eq!(fixture.state.metrics.success_rate(ModelKind::Claude), 0.0);

    let calls = fixture.state.call_log.snapshot();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].status, CallStatus::Error);
    assert_eq!(calls[0].error.as_ref().unwrap()["status"], 401);
}

#[tokio::test]
async fn test_enhance_and_rewrite_pin_their_actions() {
    let (fixture, stub) = TestFixture::new().await;

    let mut body = generation_body();
    body["currentContent"] = json!("Own the billing pipeline.");

    let resp = fixture
        .client
        .post(fixture.url("/api/v1/enhance"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .post(fixture.url("/api/v1/rewrite"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let envelopes = stub.envelopes();
    assert_eq!(envelopes.len(), 2);
    let enhance = envelopes[0]["message"].as_str().unwrap();
    assert!(enhance.starts_with("Please enhance the following Role Summary section"));
    assert!(enhance.contains("Current content:\nOwn the billing pipeline."));
    let rewrite = envelopes[1]["message"].as_str().unwrap();
    assert!(rewrite.starts_with("Please rewrite the following Role Summary section"));
}

#[tokio::test]
async fn test_compare_runs_every_backend() {
    let (fixture, stub) = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/v1/compare"))
        .json(&generation_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    for (result, expected) in results.iter().zip(["claude", "gpt4o", "llama"]) {
        assert_eq!(result["model"], expected);
        assert_eq!(result["content"], "Generated section content.");
        assert!(result["durationMs"].is_number());
        assert!(result.get("error").is_none());
    }

    // One envelope per backend, each under its own agent
    let mut agents: Vec<String> = stub
        .envelopes()
        .iter()
        .map(|e| e["agent_id"].as_str().unwrap().to_string())
        .collect();
    agents.sort();
    let mut expected: Vec<String> = PROVIDERS.iter().map(|p| p.agent_id.to_string()).collect();
    expected.sort();
    assert_eq!(agents, expected);

    let counts = fixture.state.metrics.usage_counts();
    assert!(counts.iter().all(|(_, n)| *n == 1));
}

#[tokio::test]
async fn test_compare_keeps_arms_independent() {
    // Fails only the GPT-4o arm, by agent id
    let app = Router::new().route(
        "/v3/inference/chat/",
        post(|Json(envelope): Json<Value>| async move {
            if envelope["agent_id"] == PROVIDERS[ModelKind::Gpt4o.index()].agent_id {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "overloaded" })),
                )
            } else {
                (StatusCode::OK, Json(json!({ "response": "Generated section content." })))
            }
        }),
    );
    let lyzr_addr = spawn_app(app).await;
    let fixture = TestFixture::with_lyzr(lyzr_addr).await;

    let resp = fixture
        .client
        .post(fixture.url("/api/v1/compare"))
        .json(&generation_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200, "one failing arm must not fail the comparison");
    let body: Value = resp.json().await.unwrap();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["content"], "Generated section content.");
    assert!(results[1].get("content").is_none());
    assert!(results[1]["error"]
        .as_str()
        .unwrap()
        .starts_with("AI service error: 500"));
    assert_eq!(results[2]["content"], "Generated section content.");

    assert_eq!(fixture.state.metrics.success_rate(ModelKind::Claude), 100.0);
    assert_eq!(fixture.state.metrics.success_rate(ModelKind::Gpt4o), 0.0);
    assert_eq!(fixture.state.metrics.success_rate(ModelKind::Llama), 100.0);
}

#[tokio::test]
async fn test_comparison_winner_feeds_the_usage_report() {
    let (fixture, _stub) = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/v1/compare/winner"))
        .json(&json!({ "winner": "llama", "section": "benefits" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let report: Value = fixture
        .client
        .get(fixture.url("/api/v1/metrics/usage"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(report["mostPreferredModel"], "llama");
    assert_eq!(report["comparisonTotal"], 1);
    assert_eq!(report["recentComparisons"][0]["winner"], "llama");
    assert_eq!(report["recentComparisons"][0]["section"], "benefits");
}

#[tokio::test]
async fn test_usage_report_starts_empty() {
    let (fixture, _stub) = TestFixture::new().await;

    let report: Value = fixture
        .client
        .get(fixture.url("/api/v1/metrics/usage"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(report["totalCalls"], 0);
    for stat in report["models"].as_array().unwrap() {
        assert_eq!(stat["count"], 0);
        assert_eq!(stat["share"].as_f64().unwrap(), 0.0);
        assert_eq!(stat["averageLatencyMs"].as_f64().unwrap(), 0.0);
        assert_eq!(stat["successRate"].as_f64().unwrap(), 0.0);
    }
    assert_eq!(report["mostPopularModel"], "claude", "ties resolve to catalog order");
    assert!(report.get("mostPreferredModel").is_none());
    assert_eq!(report["comparisonTotal"], 0);
}

#[tokio::test]
async fn test_clear_endpoints_reset_the_stores() {
    let (fixture, _stub) = TestFixture::new().await;

    fixture
        .client
        .post(fixture.url("/api/v1/generate"))
        .json(&generation_body())
        .send()
        .await
        .unwrap();
    fixture
        .client
        .post(fixture.url("/api/v1/compare/winner"))
        .json(&json!({ "winner": "claude", "section": "summary" }))
        .send()
        .await
        .unwrap();

    let resp = fixture
        .client
        .delete(fixture.url("/api/v1/metrics"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let report: Value = fixture
        .client
        .get(fixture.url("/api/v1/metrics/usage"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(report["totalCalls"], 0);
    assert_eq!(report["comparisonTotal"], 0);

    let resp = fixture
        .client
        .delete(fixture.url("/api/v1/devtools/calls"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    assert!(fixture.state.call_log.is_empty());
}

#[tokio::test]
async fn test_models_catalog_lists_all_backends() {
    let (fixture, _stub) = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/v1/models"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let models = body["models"].as_array().unwrap();
    assert_eq!(models.len(), 3);
    assert_eq!(models[0]["id"], "claude");
    assert_eq!(models[0]["name"], "Claude 3.5 Sonnet");
    assert_eq!(models[0]["provider"], "Anthropic");
    assert_eq!(models[1]["id"], "gpt4o");
    assert_eq!(models[2]["id"], "llama");
    assert_eq!(models[2]["provider"], "Groq");
}

#[tokio::test]
async fn test_template_catalog_and_lookup() {
    let (fixture, _stub) = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/v1/templates"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["templates"].as_array().unwrap().len(), 3);

    let resp = fixture
        .client
        .get(fixture.url("/api/v1/templates/software-engineer"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let template: Value = resp.json().await.unwrap();
    assert_eq!(template["jobDescription"]["title"], "Software Engineer");
    assert!(!template["jobDescription"]["sections"]["summary"]
        .as_str()
        .unwrap()
        .is_empty());

    let resp = fixture
        .client
        .get(fixture.url("/api/v1/templates/chief-vibes-officer"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_settings_round_trip() {
    let (fixture, _stub) = TestFixture::new().await;

    let flags: Value = fixture
        .client
        .get(fixture.url("/api/v1/settings"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(flags["devtoolsEnabled"], false);
    assert_eq!(flags["introSeen"], false);

    let updated: Value = fixture
        .client
        .put(fixture.url("/api/v1/settings"))
        .json(&json!({ "devtoolsEnabled": true, "introSeen": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["devtoolsEnabled"], true);

    let flags: Value = fixture
        .client
        .get(fixture.url("/api/v1/settings"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(flags["devtoolsEnabled"], true);
    assert_eq!(flags["introSeen"], true);
}

#[tokio::test]
async fn test_diagnostics_probes_every_function_route() {
    let (fixture, stub) = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/v1/diagnostics"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let endpoints = body["endpoints"].as_array().unwrap();
    assert_eq!(endpoints.len(), 3);
    for (probe, provider) in endpoints.iter().zip(&PROVIDERS) {
        assert_eq!(probe["model"], provider.model.as_str());
        assert_eq!(probe["reachable"], true);
        assert_eq!(probe["status"], 204);
        assert!(probe["endpoint"]
            .as_str()
            .unwrap()
            .ends_with(&format!("/functions/v1/{}", provider.slug)));
    }

    assert!(stub.envelopes().is_empty(), "probes never reach the platform");
    assert!(fixture.state.call_log.is_empty(), "probes are not logged as calls");
}

#[tokio::test]
async fn test_dispatch_counts_a_logical_failure_once() {
    // A function route that answers 200 but flags the generation as failed
    let app = Router::new().route(
        "/functions/v1/:slug",
        post(|| async { Json(json!({ "success": false, "content": "The model is overloaded" })) }),
    );
    let addr = spawn_app(app).await;

    let call_log = Arc::new(ApiCallLog::new());
    let metrics = Arc::new(UsageMetrics::new());
    let dispatcher = Dispatcher::new(
        &format!("http://{addr}"),
        SERVICE_TOKEN.to_string(),
        Arc::clone(&call_log),
        Arc::clone(&metrics),
    );

    let result = dispatcher.dispatch(&generation_request()).await;
    match result {
        Err(DispatchError::Failure(message)) => {
            assert_eq!(message, "The model is overloaded");
        }
        other => panic!("expected a generation failure, got {other:?}"),
    }

    let counts = metrics.usage_counts();
    assert_eq!(counts[ModelKind::Claude.index()].1, 1, "counted exactly once");
    assert_eq!(metrics.success_rate(ModelKind::Claude), 0.0);

    let calls = call_log.snapshot();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].status, CallStatus::Error);
    assert_eq!(calls[0].error.as_ref().unwrap()["message"], "The model is overloaded");
}

#[tokio::test]
async fn test_dispatch_network_failure_settles_the_record() {
    // Grab a port and release it so the connection is refused
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let call_log = Arc::new(ApiCallLog::new());
    let metrics = Arc::new(UsageMetrics::new());
    let dispatcher = Dispatcher::new(
        &format!("http://{addr}"),
        SERVICE_TOKEN.to_string(),
        Arc::clone(&call_log),
        Arc::clone(&metrics),
    );

    let result = dispatcher.dispatch(&generation_request()).await;
    assert!(matches!(result, Err(DispatchError::Network(_))));

    let calls = call_log.snapshot();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].status, CallStatus::Error, "the pending record settles on failure");
    assert!(calls[0].duration_ms.is_some());
    assert_eq!(metrics.usage_counts()[ModelKind::Claude.index()].1, 1);
}
