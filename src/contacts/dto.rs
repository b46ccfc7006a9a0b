use serde::Deserialize;
use sqlx::{query_builder::Separated, Postgres, QueryBuilder};
use uuid::Uuid;

use super::repo::Contact;
use crate::{
    error::AppResult,
    extract::{blank_as_none, nullable, present, require_non_blank},
    scoped::{assign, default_limit, ListQuery, NewRecord, Page, Patch},
};

#[derive(Debug, Deserialize)]
pub struct CreateContact {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub company_id: Option<Uuid>,
}

impl CreateContact {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("name", &self.name)
    }
}

impl NewRecord for CreateContact {
    type Record = Contact;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "email",
        "phone",
        "title",
        "linkedin",
        "notes",
        "company_id",
    ];

    fn push_values(self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values.push_bind(self.name);
        values.push_bind(self.email);
        values.push_bind(self.phone);
        values.push_bind(self.title);
        values.push_bind(self.linkedin);
        values.push_bind(self.notes);
        values.push_bind(self.company_id);
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateContact {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub linkedin: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub company_id: Option<Option<Uuid>>,
}

impl UpdateContact {
    pub fn validate(&self) -> AppResult<()> {
        match &self.name {
            Some(name) => require_non_blank("name", name),
            None => Ok(()),
        }
    }

    /// The company this patch points the contact at, if any.
    pub fn new_company(&self) -> Option<Uuid> {
        self.company_id.flatten()
    }
}

impl Patch for UpdateContact {
    type Record = Contact;

    fn push_assignments(self, set: &mut Separated<'_, '_, Postgres, &'static str>) {
        assign(set, "name", self.name);
        assign(set, "email", self.email);
        assign(set, "phone", self.phone);
        assign(set, "title", self.title);
        assign(set, "linkedin", self.linkedin);
        assign(set, "notes", self.notes);
        assign(set, "company_id", self.company_id);
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub company_id: Option<Uuid>,
}

impl ListQuery for ContactQuery {
    type Record = Contact;

    fn page(&self) -> Page {
        Page {
            skip: self.skip,
            limit: self.limit,
        }
    }

    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(company_id) = self.company_id {
            qb.push(" AND company_id = ").push_bind(company_id);
        }
    }
}
