use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct CallLog {
    pub id: i64,
    pub driver_name: String,
    pub phone_number: String,
    pub load_number: String,
    pub transcript: Option<String>,
    pub structured_summary: Option<Value>,
    pub external_call_id: Option<String>,
    pub config_id: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewCallLog {
    pub driver_name: String,
    pub phone_number: String,
    pub load_number: String,
    pub external_call_id: Option<String>,
    pub config_id: i64,
}
