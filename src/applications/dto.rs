use serde::Deserialize;
use sqlx::{query_builder::Separated, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{repo::Application, status::ApplicationStatus};
use crate::{
    error::{AppError, AppResult, FieldError},
    extract::{blank_as_none, nullable, nullable_rfc3339, present, require_non_blank},
    scoped::{assign, default_limit, ListQuery, NewRecord, Page, Patch},
};

fn default_currency() -> String {
    "USD".into()
}

#[derive(Debug, Deserialize)]
pub struct CreateApplication {
    pub job_title: String,
    pub company_id: Uuid,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub job_url: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default = "default_currency")]
    pub salary_currency: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub applied_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub resume_version: Option<String>,
    #[serde(default)]
    pub cover_letter_version: Option<String>,
}

impl CreateApplication {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("job_title", &self.job_title)?;
        check_salaries(self.salary_min, self.salary_max)
    }
}

fn check_salaries(min: Option<f64>, max: Option<f64>) -> AppResult<()> {
    let mut problems = Vec::new();
    for (field, value) in [("salary_min", min), ("salary_max", max)] {
        if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
            problems.push(FieldError::new(field, "must be a non-negative number"));
        }
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems))
    }
}

impl NewRecord for CreateApplication {
    type Record = Application;
    const COLUMNS: &'static [&'static str] = &[
        "company_id",
        "job_title",
        "job_description",
        "job_url",
        "status",
        "salary_min",
        "salary_max",
        "salary_currency",
        "applied_date",
        "notes",
        "resume_version",
        "cover_letter_version",
    ];

    fn push_values(self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values.push_bind(self.company_id);
        values.push_bind(self.job_title);
        values.push_bind(self.job_description);
        values.push_bind(self.job_url);
        values.push_bind(self.status);
        values.push_bind(self.salary_min);
        values.push_bind(self.salary_max);
        values.push_bind(self.salary_currency);
        values.push_bind(self.applied_date);
        values.push_bind(self.notes);
        values.push_bind(self.resume_version);
        values.push_bind(self.cover_letter_version);
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateApplication {
    #[serde(default, deserialize_with = "present")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub company_id: Option<Uuid>,
    #[serde(default, deserialize_with = "nullable")]
    pub job_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub job_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub status: Option<ApplicationStatus>,
    #[serde(default, deserialize_with = "nullable")]
    pub salary_min: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub salary_max: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub salary_currency: Option<String>,
    #[serde(default, deserialize_with = "nullable_rfc3339")]
    pub applied_date: Option<Option<OffsetDateTime>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub resume_version: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub cover_letter_version: Option<Option<String>>,
}

impl UpdateApplication {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.job_title {
            require_non_blank("job_title", title)?;
        }
        check_salaries(self.salary_min.flatten(), self.salary_max.flatten())
    }
}

impl Patch for UpdateApplication {
    type Record = Application;

    fn push_assignments(self, set: &mut Separated<'_, '_, Postgres, &'static str>) {
        assign(set, "job_title", self.job_title);
        assign(set, "company_id", self.company_id);
        assign(set, "job_description", self.job_description);
        assign(set, "job_url", self.job_url);
        assign(set, "status", self.status);
        assign(set, "salary_min", self.salary_min);
        assign(set, "salary_max", self.salary_max);
        assign(set, "salary_currency", self.salary_currency);
        assign(set, "applied_date", self.applied_date);
        assign(set, "notes", self.notes);
        assign(set, "resume_version", self.resume_version);
        assign(set, "cover_letter_version", self.cover_letter_version);
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub company_id: Option<Uuid>,
}

impl ListQuery for ApplicationQuery {
    type Record = Application;

    fn page(&self) -> Page {
        Page {
            skip: self.skip,
            limit: self.limit,
        }
    }

    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(status) = self.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(company_id) = self.company_id {
            qb.push(" AND company_id = ").push_bind(company_id);
        }
    }
}
