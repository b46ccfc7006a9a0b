use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::status::ApplicationStatus;
use crate::scoped::OwnedRecord;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub job_title: String,
    pub job_description: Option<String>,
    pub job_url: Option<String>,
    pub status: ApplicationStatus,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_currency: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub applied_date: Option<OffsetDateTime>,
    pub notes: Option<String>,
    pub resume_version: Option<String>,
    pub cover_letter_version: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl OwnedRecord for Application {
    const TABLE: &'static str = "applications";
    const COLUMNS: &'static str = "id, user_id, company_id, job_title, job_description, job_url, \
                                   status, salary_min, salary_max, salary_currency, applied_date, \
                                   notes, resume_version, cover_letter_version, created_at, \
                                   updated_at";
    const ORDER_BY: &'static str = "created_at DESC, id DESC";
    const NAME: &'static str = "Application";
}
