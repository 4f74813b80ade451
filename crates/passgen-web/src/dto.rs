use serde::{Deserialize, Serialize};

/// Raw query parameters of `GET /api/generate`.
///
/// Everything arrives as text so malformed numbers can be reported with a
/// specific reason instead of a generic extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuery {
    pub length: Option<String>,
    pub count: Option<String>,
    pub upper: Option<String>,
    pub numbers: Option<String>,
    pub special: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub passwords: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_requests: u64,
    pub total_passwords_generated: u64,
    pub last_request_ts: Option<f64>,
}
