use serde::{Deserialize, Serialize};

pub fn health_route() -> &'static str {
    "/"
}

pub fn summarise_route() -> &'static str {
    "/summarise"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummariseRequest {
    pub youtubeurl: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}
