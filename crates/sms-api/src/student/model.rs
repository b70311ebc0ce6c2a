use chrono::NaiveDate;
use serde::Deserialize;

use sms_db::models::{NewStudent, StudentQueryFilter};

/// Student statuses accepted by the API.
pub const STUDENT_STATUSES: &[&str] = &["Active", "Inactive", "Graduated", "Suspended"];

#[derive(Debug, Deserialize)]
pub struct StudentPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub enrollment_date: Option<NaiveDate>,
}

impl From<StudentPayload> for NewStudent {
    fn from(payload: StudentPayload) -> Self {
        Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            city: payload.city,
            state: payload.state,
            date_of_birth: payload.date_of_birth,
            enrollment_date: payload.enrollment_date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

/// Listing query parameters, mapped onto the repository filter.
#[derive(Debug, Default, Deserialize)]
pub struct StudentListQuery {
    pub status: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

impl From<StudentListQuery> for StudentQueryFilter {
    fn from(query: StudentListQuery) -> Self {
        Self {
            status: query.status,
            city: query.city,
            state: query.state,
            search: query.search,
            limit: query.limit,
            offset: query.offset,
        }
    }
}
