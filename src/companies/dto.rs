use serde::Deserialize;
use sqlx::{query_builder::Separated, Postgres, QueryBuilder};

use super::repo::Company;
use crate::{
    error::AppResult,
    extract::{nullable, present, require_non_blank},
    scoped::{assign, default_limit, ListQuery, NewRecord, Page, Patch},
};

#[derive(Debug, Deserialize)]
pub struct CreateCompany {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateCompany {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("name", &self.name)
    }
}

impl NewRecord for CreateCompany {
    type Record = Company;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "website",
        "industry",
        "size",
        "location",
        "description",
        "notes",
    ];

    fn push_values(self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values.push_bind(self.name);
        values.push_bind(self.website);
        values.push_bind(self.industry);
        values.push_bind(self.size);
        values.push_bind(self.location);
        values.push_bind(self.description);
        values.push_bind(self.notes);
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCompany {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub industry: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub size: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

impl UpdateCompany {
    pub fn validate(&self) -> AppResult<()> {
        match &self.name {
            Some(name) => require_non_blank("name", name),
            None => Ok(()),
        }
    }
}

impl Patch for UpdateCompany {
    type Record = Company;

    fn push_assignments(self, set: &mut Separated<'_, '_, Postgres, &'static str>) {
        assign(set, "name", self.name);
        assign(set, "website", self.website);
        assign(set, "industry", self.industry);
        assign(set, "size", self.size);
        assign(set, "location", self.location);
        assign(set, "description", self.description);
        assign(set, "notes", self.notes);
    }
}

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub search: Option<String>,
}

impl ListQuery for CompanyQuery {
    type Record = Company;

    fn page(&self) -> Page {
        Page {
            skip: self.skip,
            limit: self.limit,
        }
    }

    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(term) = self.search.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND name ILIKE ")
                .push_bind(contains_pattern(term))
                .push(r" ESCAPE '\'");
        }
    }
}

/// `%term%` with the LIKE wildcards in `term` escaped.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
