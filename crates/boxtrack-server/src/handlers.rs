// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the Boxtrack REST API.
//!
//! Required-field validation happens here, before any write is attempted;
//! the storage layer only ever sees well-formed inputs.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use boxtrack_core::BoxtrackError;
use boxtrack_core::types::{
    ActionInput, ActionKind, Alert, BoxRecord, BoxStatus, BoxUpdate, DashboardStats, HistoryEntry,
    NewBox, User, UserRole,
};

use crate::error::ApiError;
use crate::qr;
use crate::server::AppState;

// --- Request/response bodies ---

/// Request body for POST /api/auth/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// Response body for POST /api/auth/login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
}

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
}

/// Paging query parameters for GET /api/boxes.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Request body for POST /api/boxes.
///
/// Required fields are `Option` so their absence maps to a 400, not a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateBoxRequest {
    #[serde(default)]
    pub box_id: Option<String>,
    #[serde(rename = "type", default)]
    pub box_type: Option<String>,
    #[serde(default)]
    pub manufacture_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub thickness: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub serial_code: Option<String>,
}

impl CreateBoxRequest {
    fn into_new_box(self) -> Result<NewBox, BoxtrackError> {
        let box_id = self
            .box_id
            .ok_or_else(|| BoxtrackError::InvalidInput("box_id is required".to_string()))?;
        let box_type = self
            .box_type
            .ok_or_else(|| BoxtrackError::InvalidInput("type is required".to_string()))?;
        let manufacture_date = self.manufacture_date.ok_or_else(|| {
            BoxtrackError::InvalidInput("manufacture_date is required".to_string())
        })?;
        let box_type = boxtrack_core::BoxType::from_str(&box_type)
            .map_err(|_| BoxtrackError::InvalidInput(format!("unknown box type `{box_type}`")))?;
        Ok(NewBox {
            box_id,
            box_type,
            manufacture_date,
            location: self.location,
            thickness: self.thickness,
            supplier: self.supplier,
            dimensions: self.dimensions,
            material: self.material,
            serial_code: self.serial_code,
        })
    }
}

/// Request body for POST /api/scan.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub box_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Response body for POST /api/scan and POST /api/boxes/{box_id}/retire.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub message: String,
    pub status: BoxStatus,
    pub entry: HistoryEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
}

/// Optional body for POST /api/boxes/{box_id}/retire.
#[derive(Debug, Default, Deserialize)]
pub struct RetireRequest {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Optional body for POST /api/boxes/{box_id}/qr.
#[derive(Debug, Default, Deserialize)]
pub struct QrRequest {
    /// Location entered at print time, overriding the stored one.
    #[serde(default)]
    pub location: Option<String>,
}

/// Response body for POST /api/boxes/{box_id}/qr.
#[derive(Debug, Serialize)]
pub struct QrResponse {
    /// SVG data URL.
    pub qr: String,
    /// The encoded payload, for display next to the code.
    pub data: String,
}

/// Response body for GET /api/track/{box_id}.
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    #[serde(rename = "box")]
    pub box_record: BoxRecord,
    pub history: Vec<HistoryEntry>,
}

/// Request body for POST /api/settings.
#[derive(Debug, Deserialize)]
pub struct PutSettingRequest {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Generic acknowledgment body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// --- Handlers ---

/// POST /api/auth/login
///
/// Stateless credential check. The password is digested here so plaintext
/// never crosses the store boundary.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(username), Some(password), Some(role)) = (body.username, body.password, body.role)
    else {
        return Err(BoxtrackError::InvalidInput("missing credentials".to_string()).into());
    };
    let digest = hex::encode(Sha256::digest(password.as_bytes()));
    let user = state
        .store
        .verify_login(&username, &digest, role)
        .await?
        .ok_or(BoxtrackError::Unauthorized)?;
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user,
    }))
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /api/boxes
pub async fn list_boxes(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<BoxRecord>>, ApiError> {
    let boxes = state.store.list_boxes(page.limit, page.offset).await?;
    Ok(Json(boxes))
}

/// POST /api/boxes
pub async fn create_box(
    State(state): State<AppState>,
    Json(body): Json<CreateBoxRequest>,
) -> Result<Response, ApiError> {
    let new_box = body.into_new_box()?;
    let created = state.store.create_box(&new_box).await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// GET /api/boxes/{box_id}
pub async fn get_box(
    State(state): State<AppState>,
    Path(box_id): Path<String>,
) -> Result<Json<BoxRecord>, ApiError> {
    let record = state
        .store
        .get_box(&box_id)
        .await?
        .ok_or_else(|| BoxtrackError::box_not_found(&box_id))?;
    Ok(Json(record))
}

/// PUT /api/boxes/{box_id}
pub async fn update_box(
    State(state): State<AppState>,
    Path(box_id): Path<String>,
    Json(update): Json<BoxUpdate>,
) -> Result<Json<BoxRecord>, ApiError> {
    let updated = state.store.update_box(&box_id, &update).await?;
    Ok(Json(updated))
}

/// POST /api/boxes/{box_id}/retire
///
/// Shortcut for recording a `retire` action: it goes through the same
/// transactional record-action path as a scan, so the ledger stays
/// consistent.
pub async fn retire_box(
    State(state): State<AppState>,
    Path(box_id): Path<String>,
    body: Option<Json<RetireRequest>>,
) -> Result<Json<ScanResponse>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let input = ActionInput {
        box_id,
        action: ActionKind::Retire,
        location: body.location,
        actor_id: body.actor_id,
        note: body.note,
    };
    let outcome = state.store.record_action(&input).await?;
    Ok(Json(ScanResponse {
        message: "Box retired".to_string(),
        status: outcome.status,
        entry: outcome.entry,
        alert: outcome.alert,
    }))
}

/// GET /api/boxes/{box_id}/history
pub async fn box_history(
    State(state): State<AppState>,
    Path(box_id): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let entries = state.store.history_for(&box_id).await?;
    Ok(Json(entries))
}

/// POST /api/boxes/{box_id}/qr
pub async fn generate_qr(
    State(state): State<AppState>,
    Path(box_id): Path<String>,
    body: Option<Json<QrRequest>>,
) -> Result<Json<QrResponse>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let record = state
        .store
        .get_box(&box_id)
        .await?
        .ok_or_else(|| BoxtrackError::box_not_found(&box_id))?;
    let data = qr::qr_payload(&record, body.location.as_deref());
    let qr = qr::qr_svg_data_url(&data)?;
    Ok(Json(QrResponse { qr, data }))
}

/// POST /api/scan
///
/// The record-action entry point for scan devices. Unknown action kinds are
/// accepted and recorded; unknown boxes are a 404 and record nothing.
pub async fn scan(
    State(state): State<AppState>,
    Json(body): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    let (Some(box_id), Some(action)) = (body.box_id, body.action) else {
        return Err(BoxtrackError::InvalidInput("box_id and action are required".to_string()).into());
    };
    let input = ActionInput {
        box_id,
        action: ActionKind::from(action.as_str()),
        location: body.location,
        actor_id: body.actor_id,
        note: body.note,
    };
    let outcome = state.store.record_action(&input).await?;
    Ok(Json(ScanResponse {
        message: "Scan processed".to_string(),
        status: outcome.status,
        entry: outcome.entry,
        alert: outcome.alert,
    }))
}

/// GET /api/track/{box_id}
pub async fn track(
    State(state): State<AppState>,
    Path(box_id): Path<String>,
) -> Result<Json<TrackResponse>, ApiError> {
    let record = state
        .store
        .get_box(&box_id)
        .await?
        .ok_or_else(|| BoxtrackError::box_not_found(&box_id))?;
    let history = state.store.history_for(&box_id).await?;
    Ok(Json(TrackResponse {
        box_record: record,
        history,
    }))
}

/// GET /api/alerts
pub async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<Alert>>, ApiError> {
    let alerts = state.store.list_alerts().await?;
    Ok(Json(alerts))
}

/// POST /api/alerts/{id}/read
pub async fn mark_alert_read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.mark_alert_read(id).await?;
    Ok(Json(MessageResponse {
        message: "Alert acknowledged".to_string(),
    }))
}

/// GET /api/settings
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, String>>, ApiError> {
    let settings = state.store.settings().await?;
    Ok(Json(settings))
}

/// POST /api/settings
pub async fn put_setting(
    State(state): State<AppState>,
    Json(body): Json<PutSettingRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Some(key) = body.key else {
        return Err(BoxtrackError::InvalidInput("key is required".to_string()).into());
    };
    state
        .store
        .put_setting(&key, body.value.as_deref().unwrap_or(""))
        .await?;
    Ok(Json(MessageResponse {
        message: "Setting updated".to_string(),
    }))
}

/// GET /api/dashboard/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = state.store.dashboard_stats().await?;
    Ok(Json(stats))
}
