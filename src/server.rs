use crate::config::Config;
use crate::enhance::params::{AdjustParams, EnhanceParams};
use crate::enhance::{estimator, pipeline, profiles};
use crate::error::EnhanceError;
use crate::storage::{self, Storage};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::header,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub config: Arc<Config>,
}

/// Upload response: artifact URLs, the estimator's suggestion and one
/// preview URL per built-in profile (plus "Manual" for the processed file)
#[derive(Serialize)]
pub struct UploadResponse {
    pub original: String,
    pub processed: String,
    pub filename: String,
    pub suggested: EnhanceParams,
    pub previews: BTreeMap<String, String>,
}

#[derive(Deserialize)]
pub struct AdjustRequest {
    pub filename: String,
    #[serde(flatten)]
    pub params: AdjustParams,
}

#[derive(Deserialize)]
pub struct ApplyProfileRequest {
    pub filename: String,
    pub profile: String,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub profiles: Vec<&'static str>,
    pub max_file_size_bytes: usize,
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    // Folder setup (and the preview purge) must finish before the listener
    // binds; requests never see a half-initialized data directory.
    let storage = Storage::init(&config.data_dir)?;

    let addr = format!("{}:{}", config.host, config.port);
    let max_file_size = config.max_file_size;

    let state = AppState {
        storage: Arc::new(storage),
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/upload", post(handle_upload))
        .route("/adjust", post(handle_adjust))
        .route("/apply_profile", post(handle_apply_profile))
        .route("/uploads/:filename", get(serve_upload))
        .route("/processed/:filename", get(serve_processed))
        .route("/previews/:filename", get(serve_preview))
        .route("/health", get(handle_health))
        .route("/info", get(handle_info))
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Handle an image upload: store the original, estimate parameters, produce
/// the auto-enhanced output and one ephemeral preview per profile
async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, EnhanceError> {
    let start = Instant::now();

    let mut file_data: Option<Bytes> = None;
    let mut file_name: Option<String> = None;

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| EnhanceError::InvalidRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            file_name = field.file_name().map(|s| s.to_string());
            file_data = Some(field.bytes().await.map_err(|e| {
                EnhanceError::InvalidRequest(format!("Failed to read file data: {}", e))
            })?);
        }
        // Ignore unknown fields
    }

    let data = file_data.ok_or(EnhanceError::MissingFile)?;
    if data.is_empty() {
        return Err(EnhanceError::MissingFile);
    }
    if data.len() > state.config.max_file_size {
        return Err(EnhanceError::ImageTooLarge {
            size: data.len(),
            max: state.config.max_file_size,
        });
    }

    let filename = storage::sanitize_filename(&file_name.ok_or(EnhanceError::MissingFile)?)?;

    let input_path = state.storage.upload_path(&filename);
    let output_path = state.storage.processed_path(&filename);
    storage::write_bytes_atomic(&input_path, &data)?;

    // Decode once for the estimator; the pipeline re-reads from disk so
    // every run starts from the stored original.
    let decoded = image::open(&input_path)?.to_rgb8();
    let suggested = estimator::estimate(&decoded);
    drop(decoded);

    pipeline::enhance(&input_path, &output_path, &suggested)?;

    let mut previews = BTreeMap::new();
    previews.insert("Manual".to_string(), format!("/processed/{}", filename));
    for (profile, params) in profiles::PROFILES.iter() {
        let preview_path = state.storage.preview_path(profile, &filename);
        pipeline::enhance(&input_path, &preview_path, params)?;
        previews.insert(
            profile.to_string(),
            format!("/previews/{}_{}", profile, filename),
        );
    }

    tracing::info!(
        filename = %filename,
        time_ms = start.elapsed().as_millis() as u64,
        "Upload processed"
    );

    Ok(Json(UploadResponse {
        original: format!("/uploads/{}", filename),
        processed: format!("/processed/{}", filename),
        filename,
        suggested,
        previews,
    }))
}

/// Handle a manual slider adjustment: merge the partial parameters over the
/// adjust-time defaults, re-run the pipeline from the stored original and
/// return the encoded result
async fn handle_adjust(
    State(state): State<AppState>,
    Json(request): Json<AdjustRequest>,
) -> Result<Response, EnhanceError> {
    let filename = storage::sanitize_filename(&request.filename)?;

    let input_path = state.storage.upload_path(&filename);
    if !input_path.exists() {
        return Err(EnhanceError::NotFound(format!("upload {}", filename)));
    }

    let output_path = state.storage.processed_path(&filename);
    let params = request.params.merge();
    pipeline::enhance(&input_path, &output_path, &params)?;

    serve_file(&output_path).await
}

/// Handle a profile application. "Manual" returns the current processed
/// bytes without a pipeline run; any catalog profile re-enhances from the
/// stored original, never from the previous processed output.
async fn handle_apply_profile(
    State(state): State<AppState>,
    Json(request): Json<ApplyProfileRequest>,
) -> Result<Response, EnhanceError> {
    let filename = storage::sanitize_filename(&request.filename)?;
    let output_path = state.storage.processed_path(&filename);

    if request.profile == "Manual" {
        return serve_file(&output_path).await;
    }

    let params = profiles::lookup(&request.profile)
        .ok_or_else(|| EnhanceError::UnknownProfile(request.profile.clone()))?;

    let input_path = state.storage.upload_path(&filename);
    if !input_path.exists() {
        return Err(EnhanceError::NotFound(format!("upload {}", filename)));
    }

    pipeline::enhance(&input_path, &output_path, &params)?;
    serve_file(&output_path).await
}

async fn serve_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, EnhanceError> {
    let filename = storage::sanitize_filename(&filename)?;
    serve_file(&state.storage.upload_path(&filename)).await
}

async fn serve_processed(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, EnhanceError> {
    let filename = storage::sanitize_filename(&filename)?;
    serve_file(&state.storage.processed_path(&filename)).await
}

async fn serve_preview(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, EnhanceError> {
    let filename = storage::sanitize_filename(&filename)?;
    serve_file(&state.storage.preview_file(&filename)).await
}

/// Read a stored artifact and respond with its bytes and extension-derived
/// content type
async fn serve_file(path: &std::path::Path) -> Result<Response, EnhanceError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnhanceError::NotFound(path.display().to_string())
        } else {
            EnhanceError::Io(e.to_string())
        }
    })?;

    let mime = storage::mime_for_path(path);
    Ok(([(header::CONTENT_TYPE, mime)], bytes).into_response())
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle info requests
async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        profiles: profiles::names(),
        max_file_size_bytes: state.config.max_file_size,
    })
}
