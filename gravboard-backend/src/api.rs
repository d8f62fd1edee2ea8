use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use gravboard_core::csv::parse_csv;
use gravboard_core::markdown::{generate_markdown, parse_markdown, EXPORT_FILENAME};
use gravboard_core::{Board, ColumnKind};

use crate::state::AppState;
use crate::vault::{self, VaultError};

/// Axum REST API routes.
///
///   GET  /status        -> health check + effective config
///   GET  /board         -> full board with counts (+ ETag / If-None-Match)
///   POST /board/move    -> move one item: {"itemId": "...", "target": "..."}
///   POST /board/ingest  -> replace the board from a CSV body
///   GET  /board/export  -> note-format text with download headers
///   POST /board/import  -> replace the board from a note-format body
///   POST /vault/push    -> write the export to the configured vault file
///   POST /vault/pull    -> replace the board from the configured vault file
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/status", get(status))
        .route("/board", get(get_board))
        .route("/board/move", post(move_item))
        .route("/board/ingest", post(ingest_catalog))
        .route("/board/export", get(export_board))
        .route("/board/import", post(import_board))
        .route("/vault/push", post(vault_push))
        .route("/vault/pull", post(vault_pull))
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveBody {
    item_id: String,
    target: ColumnKind,
}

pub async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let board = state.board.read().unwrap();
    Json(serde_json::json!({
        "status": "running",
        "port": state.port,
        "bindAddress": state.bind_address,
        "vaultFile": state.vault_file.as_ref().map(|p| p.display().to_string()),
        "items": board.total(),
        "version": state.current_version(),
    }))
}

pub async fn get_board(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, HeaderMap, Json<serde_json::Value>) {
    let board = state.board.read().unwrap();
    let version = state.current_version();
    let etag = format!("\"{}\"", version);

    let mut resp_headers = HeaderMap::new();
    insert_header_safe(&mut resp_headers, "etag", &etag);

    // Conditional response when the caller already has this version
    if let Some(if_none_match) = headers.get("if-none-match") {
        if let Ok(value) = if_none_match.to_str() {
            if value == etag {
                return (
                    StatusCode::NOT_MODIFIED,
                    resp_headers,
                    Json(serde_json::json!({})),
                );
            }
        }
    }

    (
        StatusCode::OK,
        resp_headers,
        Json(serde_json::json!({
            "board": &*board,
            "counts": board.counts(),
            "total": board.total(),
            "version": version,
        })),
    )
}

pub async fn move_item(
    State(state): State<AppState>,
    Json(body): Json<MoveBody>,
) -> Json<serde_json::Value> {
    let mut board = state.board.write().unwrap();
    let moved = board.move_item(&body.item_id, body.target);
    let version = if moved {
        state.bump_version()
    } else {
        state.current_version()
    };

    Json(serde_json::json!({
        "moved": moved,
        "counts": board.counts(),
        "version": version,
    }))
}

pub async fn ingest_catalog(State(state): State<AppState>, body: String) -> Json<serde_json::Value> {
    let items = parse_csv(&body);
    let mut board = state.board.write().unwrap();
    *board = Board::from_catalog(items);
    let version = state.bump_version();

    log::info!(
        "[gravboard.api.ingest] board replaced with {} catalog item(s)",
        board.total()
    );

    Json(serde_json::json!({
        "counts": board.counts(),
        "total": board.total(),
        "version": version,
    }))
}

pub async fn export_board(State(state): State<AppState>) -> (StatusCode, HeaderMap, String) {
    let board = state.board.read().unwrap();
    let markdown = generate_markdown(&board);

    let mut resp_headers = HeaderMap::new();
    insert_header_safe(&mut resp_headers, "content-type", "text/markdown; charset=utf-8");
    insert_header_safe(
        &mut resp_headers,
        "content-disposition",
        &format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
    );

    (StatusCode::OK, resp_headers, markdown)
}

/// The replace is unconditional; issuing the POST is the caller's
/// confirmation step.
pub async fn import_board(State(state): State<AppState>, body: String) -> Json<serde_json::Value> {
    let imported = parse_markdown(&body);
    let mut board = state.board.write().unwrap();
    *board = imported;
    let version = state.bump_version();

    log::info!(
        "[gravboard.api.import] board replaced with {} imported item(s)",
        board.total()
    );

    Json(serde_json::json!({
        "counts": board.counts(),
        "total": board.total(),
        "version": version,
    }))
}

pub async fn vault_push(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let board = state.board.read().unwrap();
    let bytes = vault::push(state.vault_file.as_deref(), &board)
        .map_err(|e| vault_error_response("gravboard.api.vault_push", e))?;

    Ok(Json(serde_json::json!({
        "pushed": true,
        "bytes": bytes,
        "vaultFile": state.vault_file.as_ref().map(|p| p.display().to_string()),
    })))
}

pub async fn vault_pull(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let pulled = vault::pull(state.vault_file.as_deref())
        .map_err(|e| vault_error_response("gravboard.api.vault_pull", e))?;

    let mut board = state.board.write().unwrap();
    *board = pulled;
    let version = state.bump_version();

    Ok(Json(serde_json::json!({
        "counts": board.counts(),
        "total": board.total(),
        "version": version,
    })))
}

fn vault_error_response(target: &'static str, e: VaultError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        VaultError::NotConfigured => StatusCode::BAD_REQUEST,
        VaultError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND,
        VaultError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let error = e.to_string();
    log_api_issue(status, target, &error);
    (status, Json(ErrorResponse { error }))
}

fn insert_header_safe(headers: &mut HeaderMap, name: &'static str, value: &str) {
    match value.parse() {
        Ok(parsed) => {
            headers.insert(name, parsed);
        }
        Err(e) => {
            log::warn!("Failed to set header {}={} ({})", name, value, e);
        }
    }
}

fn log_api_issue(status: StatusCode, target: &'static str, message: impl AsRef<str>) {
    let message = message.as_ref();
    if status.is_server_error() {
        log::error!(target: target, "{}", message);
    } else {
        log::warn!(target: target, "{}", message);
    }
}
