//! `POST /brainstorm`: one persona turn per request.
//!
//! The client sends the hypothesis (first request), a human message, or a
//! reset flag, plus the session token from the previous response. The
//! server answers with the reply of the persona that was due; the client
//! keeps posting until `conversation_complete` is true.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brainstorm_types::error::BrainstormError;
use brainstorm_types::turn::Submission;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authorized;
use crate::state::AppState;

/// Request body for `POST /brainstorm`.
#[derive(Debug, Default, Deserialize)]
pub struct BrainstormRequest {
    #[serde(default)]
    pub hypothesis: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reset: bool,
    /// Token returned by an earlier response; absent on the first request.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for `POST /brainstorm`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BrainstormResponse {
    Turn {
        success: bool,
        agent: String,
        text: String,
        timestamp: String,
        next_agent_index: usize,
        conversation_complete: bool,
        session_id: Uuid,
    },
    Failed {
        success: bool,
        error: String,
        session_id: Uuid,
    },
}

/// POST /brainstorm
///
/// A body that is not valid JSON for [`BrainstormRequest`] is answered with
/// 400 and the usual `{success: false, error}` shape.
pub async fn brainstorm(
    _auth: Authorized,
    State(state): State<AppState>,
    payload: Result<Json<BrainstormRequest>, JsonRejection>,
) -> Result<Json<BrainstormResponse>, AppError> {
    let Json(body) = payload?;
    let requested = parse_session_id(body.session_id.as_deref())?;
    let (session_id, handle) = state.sessions.open(requested);

    let submission = Submission {
        hypothesis: body.hypothesis,
        message: body.message,
        reset: body.reset,
    };

    let mut session = handle.lock().await;
    let outcome = state.service.submit(&mut session, submission).await;
    drop(session);

    let response = match outcome {
        Ok(reply) => BrainstormResponse::Turn {
            success: true,
            agent: reply.agent().to_string(),
            timestamp: reply.timestamp(),
            text: reply.text,
            next_agent_index: reply.position.next_agent_index,
            conversation_complete: reply.position.round_complete,
            session_id,
        },
        Err(e) => {
            if !matches!(e, BrainstormError::RoundComplete) {
                tracing::warn!(%session_id, error = %e, "brainstorm turn failed");
            }
            BrainstormResponse::Failed {
                success: false,
                error: e.to_string(),
                session_id,
            }
        }
    };

    Ok(Json(response))
}

fn parse_session_id(raw: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => Uuid::parse_str(s)
            .map(Some)
            .map_err(|_| AppError::Validation(format!("Invalid session_id: '{s}'"))),
    }
}
