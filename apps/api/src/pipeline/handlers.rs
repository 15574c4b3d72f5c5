//! Axum route handler for the transform endpoint.

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::Response;
use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::extract_document;
use crate::pipeline::{run_pipeline, transform::TransformOptions, PipelineInputs};
use crate::render::{render_resume, OutputFormat};
use crate::state::AppState;

#[derive(Debug, Default)]
struct TransformForm {
    resume_file: Option<Bytes>,
    job_description: String,
    target_job_title: String,
    time_in_weeks: Option<i64>,
    ai_multiplier: Option<i64>,
    model: Option<String>,
    format: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<TransformForm, AppError> {
    let mut form = TransformForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(String::from) else {
            continue;
        };
        match name.as_str() {
            "resume_file" => {
                form.resume_file = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("could not read resume_file: {e}"))
                })?);
            }
            "job_description" => form.job_description = read_text(field, &name).await?,
            "target_job_title" => form.target_job_title = read_text(field, &name).await?,
            "time_in_weeks" => {
                form.time_in_weeks = read_text(field, &name).await?.trim().parse().ok();
            }
            "ai_multiplier" => {
                form.ai_multiplier = read_text(field, &name).await?.trim().parse().ok();
            }
            "model" => {
                let model = read_text(field, &name).await?.trim().to_string();
                if !model.is_empty() {
                    form.model = Some(model);
                }
            }
            "format" => {
                let format = read_text(field, &name).await?.trim().to_string();
                if !format.is_empty() {
                    form.format = Some(format);
                }
            }
            other => {
                warn!(field = other, "ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("could not read {name}: {e}")))
}

/// POST /api/v1/resumes/transform
///
/// Multipart in, document attachment out (editable DOCX by default, PDF on
/// request). Fatal stage errors surface as JSON error bodies; degraded
/// stages are logged and absorbed upstream.
pub async fn handle_transform(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_form(multipart).await?;

    let resume_bytes = form
        .resume_file
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation("resume_file is required".to_string()))?;
    if form.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    if form.target_job_title.trim().is_empty() {
        return Err(AppError::Validation(
            "target_job_title cannot be empty".to_string(),
        ));
    }
    let format = match form.format.as_deref() {
        Some(raw) => OutputFormat::parse(raw)
            .ok_or_else(|| AppError::Validation(format!("unsupported output format: {raw}")))?,
        None => OutputFormat::default(),
    };

    info!(
        upload_bytes = resume_bytes.len(),
        job_title = %form.target_job_title,
        "transform request accepted"
    );

    // Extraction is sync CPU work; keep it off the async workers.
    let document = tokio::task::spawn_blocking(move || {
        extract_document(&resume_bytes).map_err(|e| AppError::UnreadableDocument(e.to_string()))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task panicked: {e}")))??;

    info!(
        text_len = document.text.len(),
        links = document.links.len(),
        "document extracted"
    );

    let options = TransformOptions::from_raw(form.time_in_weeks, form.ai_multiplier);
    let envelope = run_pipeline(
        &state.llm,
        PipelineInputs {
            resume_text: &document.text,
            job_description: &form.job_description,
            target_job_title: &form.target_job_title,
            options,
            model_override: form.model.as_deref(),
        },
    )
    .await
    .map_err(|e| AppError::Llm(e.to_string()))?;

    // Score blocks are illustrative model output; log them, never validate.
    tracing::debug!(
        initial_scores = %envelope.initial_scores,
        final_scores = %envelope.final_scores,
        summary = %envelope.transformation_summary,
        "transformation summary"
    );

    let filename = format!("{}.{}", envelope.base_filename(), format.extension());
    let resume = envelope
        .transformed_resume
        .resume_object
        .ok_or_else(|| AppError::Llm("pipeline produced no resume object".to_string()))?;

    let rendered = tokio::task::spawn_blocking(move || render_resume(&resume, format))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("render task panicked: {e}")))?
        .map_err(|e| AppError::Render(e.to_string()))?;

    info!(filename = %filename, rendered_bytes = rendered.len(), "transform complete");

    Response::builder()
        .header(header::CONTENT_TYPE, format.media_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(rendered.into())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("response build failed: {e}")))
}
