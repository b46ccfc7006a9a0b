use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::scoped::OwnedRecord;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Option<Uuid>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub linkedin: Option<String>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl OwnedRecord for Contact {
    const TABLE: &'static str = "contacts";
    const COLUMNS: &'static str = "id, user_id, company_id, name, email, phone, title, \
                                   linkedin, notes, created_at, updated_at";
    const ORDER_BY: &'static str = "name ASC, id ASC";
    const NAME: &'static str = "Contact";
}
