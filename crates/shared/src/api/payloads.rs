use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Uuid;

// Request payloads. Required fields are Options so a missing field is a
// fall-through to the not-found handler rather than an extractor rejection.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserPayload {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExercisePayload {
    pub user_id: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogParams {
    pub user_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

// Response shapes. `_id` on new-user versus `id` in the listing is a quirk
// of the public API and is kept as-is.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddExerciseResponse {
    pub user: String,
    pub description: String,
    pub duration: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogResponse {
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}
