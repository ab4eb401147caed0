// ============================================================================
// Election Routes
// ============================================================================
//
// Endpoints:
// - GET /check_election - Election state, open to everyone
// - GET /candidates - Candidate listing, open to everyone
// - POST /register_candidate - Candidacy registration, either identity
// - GET /check_register - Candidacy status, either identity
// - POST /vote - Cast a vote, either identity
// - GET /my_voice - Votes cast by the caller, either identity
// - GET /vote_statistic - Aggregated counts, any identity as access gate
//
// Identity-bearing calls branch on the Identity sum type: the registered
// flavour of the backend method for a registered token, the anonymous flavour
// otherwise. The branch is picked once by the resolver, so both-cookies
// requests deterministically take the registered path.
//
// ============================================================================

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::context::AppContext;
use crate::envelope::Envelope;
use crate::error::AppError;
use crate::identity::{Identity, RequiredIdentity};
use crate::proto::services::v1 as proto;
use crate::routes::{identity_cookie_kind, verdict_response};

/// GET /check_election
///
/// The backend's election status is domain data, not a failure code: a closed
/// election still yields a success envelope, with the state inside `data`.
pub async fn check_election(State(ctx): State<Arc<AppContext>>) -> Result<Response, AppError> {
    let election = ctx
        .clients
        .election
        .election()
        .get_election(proto::ElectionRequest {})
        .await?
        .into_inner();

    let data = json!({ "election_status": election.status });
    Ok((StatusCode::OK, Json(Envelope::success(data))).into_response())
}

fn candidates_json(candidates: &[proto::Candidate]) -> Value {
    let items: Vec<Value> = candidates
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "avatar_url": c.avatar_url,
                "about": c.about,
                "login": c.login,
            })
        })
        .collect();
    json!({ "candidates": items, "count": candidates.len() })
}

/// GET /candidates
pub async fn candidates(State(ctx): State<Arc<AppContext>>) -> Result<Response, AppError> {
    let reply = ctx
        .clients
        .election
        .election()
        .get_candidates(proto::ElectionRequest {})
        .await?
        .into_inner();

    let data = candidates_json(&reply.candidates);
    Ok(verdict_response(reply.status, reply.description, data, None))
}

#[derive(Debug, Deserialize)]
pub struct RegisterCandidateRequest {
    #[serde(default)]
    pub about: String,
}

/// POST /register_candidate
pub async fn register_candidate(
    State(ctx): State<Arc<AppContext>>,
    RequiredIdentity(identity): RequiredIdentity,
    Json(request): Json<RegisterCandidateRequest>,
) -> Result<Response, AppError> {
    if request.about.is_empty() {
        return Err(AppError::validation("Field `about` is required"));
    }

    let mut client = ctx.clients.election.election();
    let grpc_request = proto::CandidacyRequest {
        token: identity.token().to_string(),
        about: request.about,
    };
    let verdict = match &identity {
        Identity::Registered(_) => client.register_candidate(grpc_request).await?,
        Identity::Anonymous(_) => client.register_candidate_anonymous(grpc_request).await?,
    }
    .into_inner();

    Ok(verdict_response(
        verdict.status,
        verdict.description,
        json!({}),
        Some(identity_cookie_kind(&identity)),
    ))
}

/// GET /check_register
pub async fn check_register(
    State(ctx): State<Arc<AppContext>>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response, AppError> {
    let mut client = ctx.clients.election.election();
    let grpc_request = proto::IdentityRequest {
        token: identity.token().to_string(),
    };
    let verdict = match &identity {
        Identity::Registered(_) => client.check_register(grpc_request).await?,
        Identity::Anonymous(_) => client.check_register_anonymous(grpc_request).await?,
    }
    .into_inner();

    Ok(verdict_response(
        verdict.status,
        verdict.description,
        json!({}),
        Some(identity_cookie_kind(&identity)),
    ))
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub id: String,
}

/// POST /vote
pub async fn vote(
    State(ctx): State<Arc<AppContext>>,
    RequiredIdentity(identity): RequiredIdentity,
    Json(request): Json<VoteRequest>,
) -> Result<Response, AppError> {
    if request.id.is_empty() {
        return Err(AppError::validation("Candidate id is required"));
    }

    let mut client = ctx.clients.election.election();
    let grpc_request = proto::VoteRequest {
        token: identity.token().to_string(),
        candidate_id: request.id,
    };
    let verdict = match &identity {
        Identity::Registered(_) => client.vote(grpc_request).await?,
        Identity::Anonymous(_) => client.vote_anonymous(grpc_request).await?,
    }
    .into_inner();

    Ok(verdict_response(
        verdict.status,
        verdict.description,
        json!({}),
        Some(identity_cookie_kind(&identity)),
    ))
}

/// GET /my_voice
pub async fn my_voice(
    State(ctx): State<Arc<AppContext>>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response, AppError> {
    let mut client = ctx.clients.election.election();
    let grpc_request = proto::IdentityRequest {
        token: identity.token().to_string(),
    };
    let reply = match &identity {
        Identity::Registered(_) => client.my_votes(grpc_request).await?,
        Identity::Anonymous(_) => client.my_votes_anonymous(grpc_request).await?,
    }
    .into_inner();

    let data = candidates_json(&reply.candidates);
    Ok(verdict_response(
        reply.status,
        reply.description,
        data,
        Some(identity_cookie_kind(&identity)),
    ))
}

/// GET /vote_statistic
///
/// The identity is purely an access gate here; its value is not forwarded.
pub async fn vote_statistic(
    State(ctx): State<Arc<AppContext>>,
    RequiredIdentity(_identity): RequiredIdentity,
) -> Result<Response, AppError> {
    let reply = ctx
        .clients
        .election
        .election()
        .vote_statistic(proto::ElectionRequest {})
        .await?
        .into_inner();

    let per_candidate: Vec<Value> = reply
        .candidates
        .iter()
        .map(|c| json!({ "id": c.id, "login": c.login, "count": c.count }))
        .collect();
    let data = json!({ "candidates": per_candidate, "total": reply.total });

    Ok(verdict_response(reply.status, reply.description, data, None))
}
