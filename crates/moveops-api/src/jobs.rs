//! Job operations

use moveops_client::{ApiClient, RequestOptions, Result};
use moveops_core::types::{JobResponse, UpdateJobRequest};
use reqwest::Method;
use uuid::Uuid;

pub async fn get(client: &ApiClient, job_id: Uuid) -> Result<JobResponse> {
    client
        .get_json(&format!("/jobs/{}", job_id), RequestOptions::default())
        .await
}

/// Reschedule or change status. Absent fields stay untouched upstream.
pub async fn update(
    client: &ApiClient,
    job_id: Uuid,
    payload: &UpdateJobRequest,
) -> Result<JobResponse> {
    client
        .request_json(
            Method::PATCH,
            &format!("/jobs/{}", job_id),
            Some(payload),
            RequestOptions::default(),
        )
        .await
}
