//! Domain transport types
//!
//! These mirror the upstream API's OpenAPI contract; the gateway owns none of
//! this data and only models its wire shape. All fields travel camelCase.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Auth & session

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

/// Payload of `GET /auth/me` and `POST /auth/login`. Fetched on app load,
/// discarded on 401 or logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub user: User,
    pub tenant: Tenant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of `GET /auth/csrf`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfResponse {
    pub csrf_token: String,
}

// ---------------------------------------------------------------------------
// Estimates

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    Draft,
    Converted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub estimate_number: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub primary_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_phone: Option<String>,
    pub email: String,
    pub status: EstimateStatus,
    pub origin_address_line1: String,
    pub origin_city: String,
    pub origin_state: String,
    pub origin_postal_code: String,
    pub destination_address_line1: String,
    pub destination_city: String,
    pub destination_state: String,
    pub destination_postal_code: String,
    pub move_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_total_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Set once the estimate has been converted; links to the created job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_job_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEstimateRequest {
    pub customer_name: String,
    pub primary_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_phone: Option<String>,
    pub email: String,
    pub origin_address_line1: String,
    pub origin_city: String,
    pub origin_state: String,
    pub origin_postal_code: String,
    pub destination_address_line1: String,
    pub destination_city: String,
    pub destination_state: String,
    pub destination_postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_total_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update; absent fields are left untouched upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEstimateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_total_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub estimate: Estimate,
    pub request_id: String,
}

// ---------------------------------------------------------------------------
// Jobs & calendar

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Booked,
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub job_number: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub primary_phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_id: Option<Uuid>,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub job: Job,
    pub request_id: String,
}

/// Lifecycle filter for the calendar range query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarPhase {
    Booked,
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarJobType {
    Local,
    LongDistance,
    Other,
}

/// One card on the scheduling calendar. Jobs without a scheduled date are
/// omitted upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarJobCard {
    pub job_id: Uuid,
    pub job_number: String,
    pub scheduled_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_short: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_short: Option<String>,
    pub status: JobStatus,
    pub has_storage: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_due_cents: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub jobs: Vec<CalendarJobCard>,
    pub request_id: String,
}

// ---------------------------------------------------------------------------
// Storage

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageStatus {
    InStorage,
    Sit,
    Out,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageListItem {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub facility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StorageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_in: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_out: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    pub vaults: i32,
    pub pads: i32,
    pub items: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_rate_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_balance_cents: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageRecord {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_short: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_short: Option<String>,
    pub facility: String,
    pub status: StorageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_in: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_out: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_bill_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_label: Option<String>,
    pub vaults: i32,
    pub pads: i32,
    pub items: i32,
    pub oversize_items: i32,
    pub volume: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_rate_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_balance_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_balance_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStorageRecordRequest {
    pub facility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StorageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_in: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_out: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_bill_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaults: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pads: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oversize_items: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_rate_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Same field set as create; every field optional on update as well, so the
/// create shape is reused upstream.
pub type UpdateStorageRecordRequest = CreateStorageRecordRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageListResponse {
    pub items: Vec<StorageListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageRecordResponse {
    pub record: StorageRecord,
    pub request_id: String,
}

// ---------------------------------------------------------------------------
// Import / export

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportTemplate {
    Customers,
    Estimates,
    Jobs,
    Storage,
    Combined,
}

impl ImportTemplate {
    /// Path segment used by template download endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportTemplate::Customers => "customers",
            ImportTemplate::Estimates => "estimates",
            ImportTemplate::Jobs => "jobs",
            ImportTemplate::Storage => "storage",
            ImportTemplate::Combined => "combined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportSource {
    Granot,
    Generic,
}

/// Options part of the multipart dry-run/apply request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    pub source: ImportSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_header: Option<bool>,
    /// Target field -> source column header.
    pub mapping: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportRunStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowMessage {
    pub row_number: i64,
    pub severity: String,
    pub entity_type: String,
    pub result: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEntitySummary {
    pub created: i64,
    pub updated: i64,
    pub skipped: i64,
    pub errors: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDownloadUrls {
    pub errors_csv_url: String,
    pub report_json_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRunResponse {
    pub id: Uuid,
    pub status: ImportRunStatus,
    pub source: ImportSource,
    pub dry_run: bool,
    #[serde(default)]
    pub summary: HashMap<String, ImportEntitySummary>,
    #[serde(default)]
    pub top_warnings: Vec<ImportRowMessage>,
    #[serde(default)]
    pub top_errors: Vec<ImportRowMessage>,
    pub downloads: ImportDownloadUrls,
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRunReportResponse {
    pub run: ImportRunResponse,
    #[serde(default)]
    pub warnings: Vec<ImportRowMessage>,
    #[serde(default)]
    pub errors: Vec<ImportRowMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_payload_wire_shape() {
        let json = r#"{
            "user": {"id":"5f0d2a5e-15a8-4cd3-9d44-1d481cbd7d2c","email":"ops@example.com","fullName":"Dana Ops"},
            "tenant": {"id":"7a7ff338-3a1d-44a6-8a52-8e2bbcb2f5b9","slug":"acme-moving","name":"Acme Moving"}
        }"#;
        let payload: SessionPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.user.full_name, "Dana Ops");
        assert_eq!(payload.tenant.slug, "acme-moving");
    }

    #[test]
    fn test_update_job_request_omits_absent_fields() {
        let req = UpdateJobRequest {
            status: Some(JobStatus::Scheduled),
            ..Default::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"status":"scheduled"}"#);
    }

    #[test]
    fn test_calendar_card_deserializes_camel_case() {
        let json = r#"{
            "jobId":"5f0d2a5e-15a8-4cd3-9d44-1d481cbd7d2c",
            "jobNumber":"J-1042",
            "scheduledDate":"2025-06-14",
            "customerName":"R. Alvarez",
            "status":"booked",
            "hasStorage":true,
            "balanceDueCents":125000
        }"#;
        let card: CalendarJobCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.job_number, "J-1042");
        assert_eq!(card.status, JobStatus::Booked);
        assert!(card.has_storage);
        assert_eq!(card.balance_due_cents, Some(125_000));
    }

    #[test]
    fn test_import_options_round_trip() {
        let mut mapping = HashMap::new();
        mapping.insert("customerName".to_string(), "Customer".to_string());
        let options = ImportOptions {
            source: ImportSource::Granot,
            has_header: Some(true),
            mapping,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains(r#""source":"granot""#));
        assert!(json.contains(r#""hasHeader":true"#));
    }

    #[test]
    fn test_import_template_path_segments() {
        assert_eq!(ImportTemplate::Customers.as_str(), "customers");
        assert_eq!(ImportTemplate::Combined.as_str(), "combined");
    }
}
