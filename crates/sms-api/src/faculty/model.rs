use serde::Deserialize;

use sms_db::models::{FacultyQueryFilter, NewFaculty};

#[derive(Debug, Deserialize)]
pub struct FacultyPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub subject: String,
}

impl From<FacultyPayload> for NewFaculty {
    fn from(payload: FacultyPayload) -> Self {
        Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            department: payload.department,
            subject: payload.subject,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FacultyListQuery {
    pub department: Option<String>,
    pub subject: Option<String>,
    #[serde(default)]
    pub active_only: bool,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

impl From<FacultyListQuery> for FacultyQueryFilter {
    fn from(query: FacultyListQuery) -> Self {
        Self {
            department: query.department,
            subject: query.subject,
            active_only: query.active_only,
            limit: query.limit,
            offset: query.offset,
        }
    }
}
