use serde::Deserialize;

use sms_db::models::{NewParent, ParentQueryFilter};

/// Parent types accepted by the API.
pub const PARENT_TYPES: &[&str] = &["Primary", "Secondary", "Guardian"];

#[derive(Debug, Deserialize)]
pub struct ParentPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(default = "default_parent_type")]
    pub parent_type: String,
}

fn default_parent_type() -> String {
    "Primary".to_string()
}

impl From<ParentPayload> for NewParent {
    fn from(payload: ParentPayload) -> Self {
        Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            occupation: payload.occupation,
            address: payload.address,
            city: payload.city,
            state: payload.state,
            parent_type: payload.parent_type,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ParentListQuery {
    pub parent_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

impl From<ParentListQuery> for ParentQueryFilter {
    fn from(query: ParentListQuery) -> Self {
        Self {
            parent_type: query.parent_type,
            city: query.city,
            state: query.state,
            limit: query.limit,
            offset: query.offset,
        }
    }
}
