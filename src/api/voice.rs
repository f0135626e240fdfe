//! Voice command endpoint.
//!
//! Accepts a transcript produced by the speech collaborator and returns the
//! matched structured action, or null when nothing matched.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::voice::{parse_transcript, VoiceAction};
use crate::AppState;

/// Request body carrying the raw transcript.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCommandRequest {
    pub transcript: String,
}

/// The matched action, if any.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCommandResponse {
    pub action: Option<VoiceAction>,
}

/// POST /api/voice-command - Match a transcript against the command table.
pub async fn voice_command(
    State(_state): State<AppState>,
    Json(request): Json<VoiceCommandRequest>,
) -> ApiResult<VoiceCommandResponse> {
    if request.transcript.trim().is_empty() {
        return error(AppError::Validation("Transcript is required".to_string()));
    }

    success(VoiceCommandResponse {
        action: parse_transcript(&request.transcript),
    })
}
