//! Storage record operations

use moveops_client::{ApiClient, RequestOptions, Result};
use moveops_core::types::{
    CreateStorageRecordRequest, StorageListResponse, StorageRecordResponse, StorageStatus,
    UpdateStorageRecordRequest,
};
use reqwest::Method;
use serde::Serialize;
use uuid::Uuid;

/// Filterable list query. `facility` is the one required axis; everything
/// else narrows the result set. `cursor` pages through large facilities.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageQuery {
    pub facility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StorageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_date_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_due: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_due_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_containers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl StorageQuery {
    pub fn facility(facility: impl Into<String>) -> Self {
        Self {
            facility: facility.into(),
            q: None,
            status: None,
            has_date_out: None,
            balance_due: None,
            past_due_days: None,
            has_containers: None,
            limit: None,
            cursor: None,
        }
    }

    fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).expect("storage query serializes")
    }
}

pub async fn list(client: &ApiClient, query: &StorageQuery) -> Result<StorageListResponse> {
    client
        .get_json(
            &format!("/storage?{}", query.to_query_string()),
            RequestOptions::default(),
        )
        .await
}

pub async fn get(client: &ApiClient, storage_record_id: Uuid) -> Result<StorageRecordResponse> {
    client
        .get_json(
            &format!("/storage/{}", storage_record_id),
            RequestOptions::default(),
        )
        .await
}

/// Storage records hang off a job; creation is scoped under it.
pub async fn create(
    client: &ApiClient,
    job_id: Uuid,
    payload: &CreateStorageRecordRequest,
) -> Result<StorageRecordResponse> {
    client
        .request_json(
            Method::POST,
            &format!("/jobs/{}/storage", job_id),
            Some(payload),
            RequestOptions::default(),
        )
        .await
}

pub async fn update(
    client: &ApiClient,
    storage_record_id: Uuid,
    payload: &UpdateStorageRecordRequest,
) -> Result<StorageRecordResponse> {
    client
        .request_json(
            Method::PUT,
            &format!("/storage/{}", storage_record_id),
            Some(payload),
            RequestOptions::default(),
        )
        .await
}
