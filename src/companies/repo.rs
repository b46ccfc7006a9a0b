use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::scoped::OwnedRecord;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl OwnedRecord for Company {
    const TABLE: &'static str = "companies";
    const COLUMNS: &'static str = "id, user_id, name, website, industry, size, location, \
                                   description, notes, created_at, updated_at";
    const ORDER_BY: &'static str = "name ASC, id ASC";
    const NAME: &'static str = "Company";
}
