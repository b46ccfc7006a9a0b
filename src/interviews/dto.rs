use serde::Deserialize;
use sqlx::{query_builder::Separated, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::Interview;
use crate::{
    extract::{blank_as_none, flag, nullable, present, present_rfc3339},
    scoped::{assign, default_limit, ListQuery, NewRecord, Page, Patch},
};

#[derive(Debug, Deserialize)]
pub struct CreateInterview {
    pub application_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub scheduled_at: OffsetDateTime,
    #[serde(default)]
    pub interview_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub interviewer_name: Option<String>,
    #[serde(default)]
    pub interviewer_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

impl NewRecord for CreateInterview {
    type Record = Interview;
    const COLUMNS: &'static [&'static str] = &[
        "application_id",
        "scheduled_at",
        "interview_type",
        "location",
        "interviewer_name",
        "interviewer_email",
        "notes",
        "feedback",
        "result",
    ];

    fn push_values(self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values.push_bind(self.application_id);
        values.push_bind(self.scheduled_at);
        values.push_bind(self.interview_type);
        values.push_bind(self.location);
        values.push_bind(self.interviewer_name);
        values.push_bind(self.interviewer_email);
        values.push_bind(self.notes);
        values.push_bind(self.feedback);
        values.push_bind(self.result);
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateInterview {
    #[serde(default, deserialize_with = "present")]
    pub application_id: Option<Uuid>,
    #[serde(default, deserialize_with = "present_rfc3339")]
    pub scheduled_at: Option<OffsetDateTime>,
    #[serde(default, deserialize_with = "nullable")]
    pub interview_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub interviewer_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub interviewer_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub feedback: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub result: Option<Option<String>>,
}

impl Patch for UpdateInterview {
    type Record = Interview;

    fn push_assignments(self, set: &mut Separated<'_, '_, Postgres, &'static str>) {
        assign(set, "application_id", self.application_id);
        assign(set, "scheduled_at", self.scheduled_at);
        assign(set, "interview_type", self.interview_type);
        assign(set, "location", self.location);
        assign(set, "interviewer_name", self.interviewer_name);
        assign(set, "interviewer_email", self.interviewer_email);
        assign(set, "notes", self.notes);
        assign(set, "feedback", self.feedback);
        assign(set, "result", self.result);
    }
}

#[derive(Debug, Deserialize)]
pub struct InterviewQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub application_id: Option<Uuid>,
    #[serde(default, deserialize_with = "flag")]
    pub upcoming_only: bool,
}

impl ListQuery for InterviewQuery {
    type Record = Interview;

    fn page(&self) -> Page {
        Page {
            skip: self.skip,
            limit: self.limit,
        }
    }

    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(application_id) = self.application_id {
            qb.push(" AND application_id = ").push_bind(application_id);
        }
        if self.upcoming_only {
            qb.push(" AND scheduled_at >= now()");
        }
    }
}
