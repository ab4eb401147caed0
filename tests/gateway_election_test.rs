// ============================================================================
// Election Endpoint Tests
// ============================================================================
//
// - GET /check_election - gateway vs. domain status axes
// - POST /vote - identity branching and validation
// - POST /register_candidate - identity branching
// - GET /my_voice, GET /vote_statistic, GET /candidates
//
// ============================================================================

use serde_json::{json, Value};
use std::sync::atomic::Ordering;

use test_utils::spawn_app;

#[tokio::test]
async fn check_election_wraps_domain_status_in_success_envelope() {
    let app = spawn_app().await;
    *app.election.election_status.lock().unwrap() = 1;

    let client = reqwest::Client::new();
    let response = client.get(app.url("/check_election")).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    // The envelope reflects the gateway call, the domain status rides in data
    assert_eq!(body["status"], "Success");
    assert_eq!(body["status_code"], 0);
    assert_eq!(body["description"], "Success");
    assert_eq!(body["data"]["election_status"], 1);
}

#[tokio::test]
async fn vote_prefers_registered_path_when_both_cookies_present() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/vote"))
        .header("Cookie", "anonymous-token=tmp123; registered-token=perm456")
        .json(&json!({"id": "cand-7"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(app.election.vote_calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.election.vote_anonymous_calls.load(Ordering::SeqCst), 0);

    let seen = app.election.last_vote.lock().unwrap().clone().unwrap();
    assert_eq!(seen.token, "perm456");
    assert_eq!(seen.candidate_id, "cand-7");
}

#[tokio::test]
async fn vote_with_anonymous_cookie_takes_anonymous_path() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/vote"))
        .header("Cookie", "anonymous-token=tmp123")
        .json(&json!({"id": "cand-7"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(app.election.vote_calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.election.vote_anonymous_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn vote_without_identity_or_candidate_never_reaches_backend() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // No identity
    let response = client
        .post(app.url("/vote"))
        .json(&json!({"id": "cand-7"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Identity but no candidate id
    let response = client
        .post(app.url("/vote"))
        .header("Cookie", "registered-token=perm456")
        .json(&json!({"id": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    assert_eq!(app.election.vote_calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.election.vote_anonymous_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn vote_rejected_by_backend_passes_description_through() {
    let app = spawn_app().await;
    {
        let mut reply = app.election.verdict_reply.lock().unwrap();
        reply.status = 9;
        reply.description = "already voted".to_string();
    }

    let client = reqwest::Client::new();
    let response = client
        .post(app.url("/vote"))
        .header("Cookie", "registered-token=perm456")
        .json(&json!({"id": "cand-7"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["description"], "already voted");
}

#[tokio::test]
async fn register_candidate_branches_on_identity() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/register_candidate"))
        .header("Cookie", "anonymous-token=tmp123")
        .json(&json!({"about": "for the people"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .post(app.url("/register_candidate"))
        .header("Cookie", "registered-token=perm456")
        .json(&json!({"about": "for the people"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    assert_eq!(app.election.register_anonymous_calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.election.register_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn register_candidate_requires_about() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/register_candidate"))
        .header("Cookie", "registered-token=perm456")
        .json(&json!({"about": ""}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(app.election.register_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn candidates_listing_is_open_and_mirrors_backend() {
    let app = spawn_app().await;
    {
        let mut reply = app.election.candidates_reply.lock().unwrap();
        reply.status = 0;
        reply.candidates = vec![test_utils::candidate("c1", "https://a/1.png", "hi", "alice")];
    }

    let client = reqwest::Client::new();
    let response = client.get(app.url("/candidates")).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["candidates"][0]["id"], "c1");
    assert_eq!(body["data"]["candidates"][0]["login"], "alice");
}

#[tokio::test]
async fn my_voice_uses_the_anonymous_flavour_for_anonymous_identity() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(app.url("/my_voice"))
        .header("Cookie", "anonymous-token=tmp123")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(app.election.my_votes_anonymous_calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.election.my_votes_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn vote_statistic_is_gated_but_identity_agnostic() {
    let app = spawn_app().await;
    {
        let mut reply = app.election.statistic_reply.lock().unwrap();
        reply.status = 0;
        reply.candidates = vec![proto_votes("c1", "alice", 10)];
        reply.total = 10;
    }

    let client = reqwest::Client::new();

    // Without identity: gated
    let response = client.get(app.url("/vote_statistic")).send().await.unwrap();
    assert_eq!(response.status(), 401);
    assert_eq!(app.election.statistic_calls.load(Ordering::SeqCst), 0);

    // Either identity opens it
    let response = client
        .get(app.url("/vote_statistic"))
        .header("Cookie", "anonymous-token=tmp123")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["total"], 10);
    assert_eq!(body["data"]["candidates"][0]["count"], 10);
}

#[tokio::test]
async fn unreachable_backend_maps_to_502_without_internal_detail() {
    let app = test_utils::spawn_app_with_dead_election().await;
    let client = reqwest::Client::new();

    let response = client.get(app.url("/check_election")).send().await.unwrap();

    assert_eq!(response.status(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "FAIL");
    assert_eq!(body["description"], "Backend unavailable");
}

fn proto_votes(id: &str, login: &str, count: i64) -> election_gateway::proto::services::v1::CandidateVotes {
    election_gateway::proto::services::v1::CandidateVotes {
        id: id.to_string(),
        login: login.to_string(),
        count,
    }
}
