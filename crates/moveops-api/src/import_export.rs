//! Bulk import/export operations
//!
//! Imports are a two-step multipart flow: a dry-run (validation only, nothing
//! written) and an apply. Both carry the CSV file plus a JSON options part.
//! Reports and templates come back as file downloads.

use crate::download::{self, Download};
use moveops_client::{ApiClient, RequestOptions, Result};
use moveops_core::types::{ImportOptions, ImportRunReportResponse, ImportRunResponse, ImportTemplate};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use uuid::Uuid;

/// Entities that can be exported as CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportEntity {
    Customers,
    Estimates,
    Jobs,
    Storage,
}

impl ExportEntity {
    fn as_str(&self) -> &'static str {
        match self {
            ExportEntity::Customers => "customers",
            ExportEntity::Estimates => "estimates",
            ExportEntity::Jobs => "jobs",
            ExportEntity::Storage => "storage",
        }
    }
}

fn import_form(file_name: &str, file_bytes: Vec<u8>, options: &ImportOptions) -> Result<Form> {
    let file_part = Part::bytes(file_bytes)
        .file_name(file_name.to_string())
        .mime_str("text/csv")
        .map_err(moveops_client::ApiError::from)?;
    let options_part = Part::text(serde_json::to_string(options)?)
        .mime_str("application/json")
        .map_err(moveops_client::ApiError::from)?;
    Ok(Form::new()
        .part("file", file_part)
        .part("options", options_part))
}

/// Simulate an import without writing records.
pub async fn dry_run(
    client: &ApiClient,
    file_name: &str,
    file_bytes: Vec<u8>,
    options: &ImportOptions,
) -> Result<ImportRunResponse> {
    let form = import_form(file_name, file_bytes, options)?;
    client
        .request_multipart(
            Method::POST,
            "/imports/dry-run",
            form,
            RequestOptions::default(),
        )
        .await
}

/// Run the import for real.
pub async fn apply(
    client: &ApiClient,
    file_name: &str,
    file_bytes: Vec<u8>,
    options: &ImportOptions,
) -> Result<ImportRunResponse> {
    let form = import_form(file_name, file_bytes, options)?;
    client
        .request_multipart(Method::POST, "/imports/apply", form, RequestOptions::default())
        .await
}

pub async fn get_run(client: &ApiClient, import_run_id: Uuid) -> Result<ImportRunResponse> {
    client
        .get_json(
            &format!("/imports/{}", import_run_id),
            RequestOptions::default(),
        )
        .await
}

pub async fn get_report(
    client: &ApiClient,
    import_run_id: Uuid,
) -> Result<ImportRunReportResponse> {
    client
        .get_json(
            &format!("/imports/{}/report.json", import_run_id),
            RequestOptions::default(),
        )
        .await
}

/// Probe whether the signed-in user may use the import wizard. A 403 means
/// "no", not an error; anything else non-2xx propagates.
pub async fn check_access(client: &ApiClient) -> Result<bool> {
    match client
        .request_raw(
            Method::GET,
            "/imports/templates/customers.csv",
            RequestOptions::default(),
        )
        .await
    {
        Ok(_) => Ok(true),
        Err(err) if err.is_forbidden() => Ok(false),
        Err(err) => Err(err),
    }
}

pub async fn download_errors_csv(client: &ApiClient, import_run_id: Uuid) -> Result<Download> {
    download::fetch(
        client,
        &format!("/imports/{}/errors.csv", import_run_id),
        &format!("import-{}-errors.csv", import_run_id),
    )
    .await
}

pub async fn download_report_json(client: &ApiClient, import_run_id: Uuid) -> Result<Download> {
    download::fetch(
        client,
        &format!("/imports/{}/report.json", import_run_id),
        &format!("import-{}-report.json", import_run_id),
    )
    .await
}

pub async fn download_template_csv(
    client: &ApiClient,
    template: ImportTemplate,
) -> Result<Download> {
    download::fetch(
        client,
        &format!("/imports/templates/{}.csv", template.as_str()),
        &format!("import-template-{}.csv", template.as_str()),
    )
    .await
}

pub async fn download_export_csv(client: &ApiClient, entity: ExportEntity) -> Result<Download> {
    download::fetch(
        client,
        &format!("/exports/{}.csv", entity.as_str()),
        &format!("{}.csv", entity.as_str()),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_entity_path_segments() {
        assert_eq!(ExportEntity::Customers.as_str(), "customers");
        assert_eq!(ExportEntity::Storage.as_str(), "storage");
    }
}
