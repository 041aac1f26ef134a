//! Calendar range query

use chrono::NaiveDate;
use moveops_client::{ApiClient, RequestOptions, Result};
use moveops_core::types::{CalendarJobType, CalendarPhase, CalendarResponse};
use serde::Serialize;

/// Query for one calendar view, typically a month: `[from, to)`, with
/// optional phase and job-type filters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<CalendarPhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<CalendarJobType>,
}

impl CalendarQuery {
    pub fn range(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to,
            phase: None,
            job_type: None,
        }
    }

    pub fn with_phase(mut self, phase: CalendarPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_job_type(mut self, job_type: CalendarJobType) -> Self {
        self.job_type = Some(job_type);
        self
    }

    fn to_query_string(&self) -> String {
        // Dates and enums always serialize cleanly; a panic here would mean
        // the query type itself is broken.
        serde_urlencoded::to_string(self).expect("calendar query serializes")
    }
}

pub async fn query(client: &ApiClient, query: &CalendarQuery) -> Result<CalendarResponse> {
    client
        .get_json(
            &format!("/calendar?{}", query.to_query_string()),
            RequestOptions::default(),
        )
        .await
}
