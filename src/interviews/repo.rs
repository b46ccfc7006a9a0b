use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::scoped::OwnedRecord;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Interview {
    pub id: Uuid,
    pub user_id: Uuid,
    pub application_id: Uuid,
    pub interview_type: Option<String>, // phone, video, onsite...
    #[serde(with = "time::serde::rfc3339")]
    pub scheduled_at: OffsetDateTime,
    pub location: Option<String>,
    pub interviewer_name: Option<String>,
    pub interviewer_email: Option<String>,
    pub notes: Option<String>,
    pub feedback: Option<String>,
    pub result: Option<String>, // passed, failed, pending
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl OwnedRecord for Interview {
    const TABLE: &'static str = "interviews";
    const COLUMNS: &'static str = "id, user_id, application_id, interview_type, scheduled_at, \
                                   location, interviewer_name, interviewer_email, notes, \
                                   feedback, result, created_at, updated_at";
    const ORDER_BY: &'static str = "scheduled_at ASC, id ASC";
    const NAME: &'static str = "Interview";
}
