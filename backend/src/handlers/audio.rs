use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// Formats browsers actually produce from MediaRecorder, plus plain
/// mp3/wav. Chrome labels its recordings `video/webm` even when they
/// are audio-only.
const ALLOWED_AUDIO_TYPES: &[(&str, &str)] = &[
    ("audio/webm", "webm"),
    ("audio/ogg", "ogg"),
    ("audio/mpeg", "mp3"),
    ("audio/wav", "wav"),
    ("video/webm", "webm"),
];

const MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

/// Stores a voice note and answers with its public URL.
pub async fn upload_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Solicitud inválida".to_string()))?
    {
        if field.name() != Some("audio") {
            continue;
        }

        let mimetype = field
            .content_type()
            .map(|m| m.split(';').next().unwrap_or(m).trim().to_string())
            .unwrap_or_default();

        let Some(extension) = allowed_extension(&mimetype) else {
            return Err(AppError::BadRequest(
                "Tipo de archivo no permitido".to_string(),
            ));
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|_| AppError::BadRequest("Archivo demasiado grande".to_string()))?;
        if bytes.len() > MAX_AUDIO_BYTES {
            return Err(AppError::BadRequest(
                "Archivo demasiado grande".to_string(),
            ));
        }

        let stored = state.audio.save(extension, bytes.to_vec()).await.map_err(|err| {
            tracing::error!(error = %err, "audio upload failed");
            AppError::Upstream {
                message: "Error subiendo audio".to_string(),
                details: None,
            }
        })?;

        return Ok(Json(json!({
            "url": stored.url,
            "size": stored.size,
            "mimetype": mimetype,
        })));
    }

    Err(AppError::BadRequest(
        "Archivo de audio requerido".to_string(),
    ))
}

fn allowed_extension(mimetype: &str) -> Option<&'static str> {
    ALLOWED_AUDIO_TYPES
        .iter()
        .find(|(allowed, _)| *allowed == mimetype)
        .map(|(_, extension)| *extension)
}
