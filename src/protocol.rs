//! Public protocol structs for HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{AssignmentContext, HintLevel};

/// Body of `POST /api/hints`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintIn {
    pub assignment_context: AssignmentContext,
    #[serde(default)]
    pub user_query: Option<String>,
    #[serde(default)]
    pub hint_level: HintLevel,
}

/// Body of `POST /api/hints/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateHintIn {
    pub hint: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}
