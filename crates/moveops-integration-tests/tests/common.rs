//! Shared fixtures for the end-to-end tests

#![allow(dead_code)]

use serde_json::{Value, json};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CSRF_TOKEN: &str = "e2e-csrf-token";

/// Mount the CSRF endpoint. `expected_fetches` pins how many times the token
/// may actually be fetched; cached reuse must keep this low.
pub async fn mount_csrf(server: &MockServer, expected_fetches: u64) {
    Mock::given(method("GET"))
        .and(path("/auth/csrf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "csrfToken": CSRF_TOKEN })),
        )
        .expect(expected_fetches)
        .mount(server)
        .await;
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "moveops_session=e2e; HttpOnly; Path=/")
                .set_body_json(session_body()),
        )
        .expect(1)
        .mount(server)
        .await;
}

pub fn session_body() -> Value {
    json!({
        "user": {
            "id": Uuid::new_v4(),
            "email": "dispatcher@acme-moving.example",
            "fullName": "Dana Dispatcher"
        },
        "tenant": {
            "id": Uuid::new_v4(),
            "slug": "acme-moving",
            "name": "Acme Moving & Storage"
        }
    })
}

pub fn estimate_body(estimate_id: Uuid, status: &str, converted_job_id: Option<Uuid>) -> Value {
    let mut estimate = json!({
        "id": estimate_id,
        "tenantId": Uuid::new_v4(),
        "estimateNumber": "E-2041",
        "customerId": Uuid::new_v4(),
        "customerName": "R. Alvarez",
        "primaryPhone": "555-0101",
        "email": "r.alvarez@example.com",
        "status": status,
        "originAddressLine1": "12 Oak St",
        "originCity": "Springfield",
        "originState": "IL",
        "originPostalCode": "62701",
        "destinationAddressLine1": "99 Elm Ave",
        "destinationCity": "Chicago",
        "destinationState": "IL",
        "destinationPostalCode": "60601",
        "moveDate": "2025-06-14",
        "estimatedTotalCents": 185000,
        "createdAt": "2025-05-01T12:00:00Z",
        "updatedAt": "2025-05-01T12:00:00Z"
    });
    if let Some(job_id) = converted_job_id {
        estimate["convertedJobId"] = json!(job_id);
    }
    json!({ "estimate": estimate, "requestId": "req-est" })
}

pub fn job_body(job_id: Uuid, status: &str) -> Value {
    json!({
        "job": {
            "id": job_id,
            "tenantId": Uuid::new_v4(),
            "jobNumber": "J-1042",
            "customerId": Uuid::new_v4(),
            "customerName": "R. Alvarez",
            "primaryPhone": "555-0101",
            "email": "r.alvarez@example.com",
            "status": status,
            "scheduledDate": "2025-06-14",
            "createdAt": "2025-05-01T12:00:00Z",
            "updatedAt": "2025-05-02T09:30:00Z"
        },
        "requestId": "req-job"
    })
}

pub fn storage_record_body(record_id: Uuid, status: &str) -> Value {
    json!({
        "record": {
            "id": record_id,
            "facility": "main",
            "status": status,
            "dateIn": "2025-06-15",
            "vaults": 3,
            "pads": 12,
            "items": 40,
            "oversizeItems": 2,
            "volume": 1100,
            "monthlyRateCents": 22500,
            "storageBalanceCents": 0,
            "createdAt": "2025-06-15T10:00:00Z",
            "updatedAt": "2025-06-15T10:00:00Z"
        },
        "requestId": "req-storage"
    })
}
