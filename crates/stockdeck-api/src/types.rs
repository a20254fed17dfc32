// Wire types for the Stockdeck service API.
//
// Every response body is wrapped in the `{ success, message, data }`
// envelope; `ApiClient` strips it before callers see the payload. Movement
// fields are camelCase on the wire (`productId`, `in`, `out`) — `in` is a
// Rust keyword, hence the `inbound`/`outbound` field names here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Response envelope ───────────────────────────────────────────────

/// The uniform response envelope used by every endpoint.
///
/// A `false` success flag is treated identically to an HTTP error status.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

// ── Users & auth ────────────────────────────────────────────────────

/// A user record as returned by the auth and profile endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Payload of a successful sign-in or sign-up: the bearer token plus the
/// authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserDto,
}

/// Body for `POST /auth/sign-in`.
#[derive(Debug, Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body for `POST /auth/sign-up`.
#[derive(Debug, Serialize)]
pub struct SignUpRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Body for `PATCH /users/profile/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProfileUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Body for `PATCH /users/change-password/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

/// Body for `PATCH /users/change-role/{id}`.
#[derive(Debug, Serialize)]
pub struct RoleChangeRequest<'a> {
    pub role: &'a str,
}

// ── Stocks ──────────────────────────────────────────────────────────

/// A product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDto {
    pub id: String,
    pub name: String,
    pub quantity: u64,
    pub price: f64,
}

/// Body for stock create and update calls. The service assigns ids; the
/// client never sends one.
#[derive(Debug, Clone, Serialize)]
pub struct StockInput {
    pub name: String,
    pub quantity: u64,
    pub price: f64,
}

// ── Movements ───────────────────────────────────────────────────────

/// A stock movement record. `createdAt` is assigned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementDto {
    pub id: String,
    pub product_id: String,
    #[serde(rename = "in")]
    pub inbound: u64,
    #[serde(rename = "out")]
    pub outbound: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for `POST /stocks/movement`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementCreateRequest {
    pub product_id: String,
    #[serde(rename = "in")]
    pub inbound: u64,
    #[serde(rename = "out")]
    pub outbound: u64,
}

/// Body for `PATCH /stocks/movement/{id}`. The product reference is
/// immutable for the lifetime of a movement, so updates carry amounts only.
#[derive(Debug, Clone, Serialize)]
pub struct MovementUpdateRequest {
    #[serde(rename = "in")]
    pub inbound: u64,
    #[serde(rename = "out")]
    pub outbound: u64,
}
