//! Estimate operations

use moveops_client::{ApiClient, RequestOptions, Result};
use moveops_core::IdempotencyKey;
use moveops_core::types::{
    CreateEstimateRequest, EstimateResponse, JobResponse, UpdateEstimateRequest,
};
use reqwest::Method;
use uuid::Uuid;

/// Fresh key for one create-estimate action. Generate immediately before the
/// call and reuse it for every delivery of that action only.
pub fn new_create_key() -> IdempotencyKey {
    IdempotencyKey::generate("estimate")
}

/// Fresh key for one convert action.
pub fn new_convert_key() -> IdempotencyKey {
    IdempotencyKey::generate("convert")
}

pub async fn create(
    client: &ApiClient,
    payload: &CreateEstimateRequest,
    key: IdempotencyKey,
) -> Result<EstimateResponse> {
    client
        .request_json(
            Method::POST,
            "/estimates",
            Some(payload),
            RequestOptions::with_idempotency_key(key),
        )
        .await
}

pub async fn get(client: &ApiClient, estimate_id: Uuid) -> Result<EstimateResponse> {
    client
        .get_json(
            &format!("/estimates/{}", estimate_id),
            RequestOptions::default(),
        )
        .await
}

pub async fn update(
    client: &ApiClient,
    estimate_id: Uuid,
    payload: &UpdateEstimateRequest,
) -> Result<EstimateResponse> {
    client
        .request_json(
            Method::PATCH,
            &format!("/estimates/{}", estimate_id),
            Some(payload),
            RequestOptions::default(),
        )
        .await
}

/// Convert an estimate into a job. Re-delivery with the same key returns the
/// already-created job instead of a duplicate.
pub async fn convert(
    client: &ApiClient,
    estimate_id: Uuid,
    key: IdempotencyKey,
) -> Result<JobResponse> {
    client
        .request_json::<JobResponse, ()>(
            Method::POST,
            &format!("/estimates/{}/convert", estimate_id),
            None,
            RequestOptions::with_idempotency_key(key),
        )
        .await
}
