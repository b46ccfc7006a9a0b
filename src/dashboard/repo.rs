use sqlx::{PgPool, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{fill_status_counts, upcoming_window, DashboardStats, RECENT_LIMIT};
use crate::{
    applications::{Application, ApplicationStatus},
    companies::Company,
    contacts::Contact,
    interviews::Interview,
    scoped::{ListQuery, Page, Scoped},
};

/// Newest applications first.
struct RecentApplications;

impl ListQuery for RecentApplications {
    type Record = Application;

    fn page(&self) -> Page {
        Page {
            skip: 0,
            limit: RECENT_LIMIT,
        }
    }

    fn push_conditions(&self, _qb: &mut QueryBuilder<'_, Postgres>) {}
}

/// Interviews scheduled at or after `from`, and at or before `until` if set.
struct InterviewsFrom {
    from: OffsetDateTime,
    until: Option<OffsetDateTime>,
}

impl ListQuery for InterviewsFrom {
    type Record = Interview;

    fn page(&self) -> Page {
        Page {
            skip: 0,
            limit: RECENT_LIMIT,
        }
    }

    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" AND scheduled_at >= ").push_bind(self.from);
        if let Some(until) = self.until {
            qb.push(" AND scheduled_at <= ").push_bind(until);
        }
    }
}

/// Reads every figure from one snapshot so the numbers agree with each other.
pub async fn load_stats(
    db: &PgPool,
    owner: Uuid,
    now: OffsetDateTime,
) -> Result<DashboardStats, sqlx::Error> {
    let mut tx = db.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
        .execute(&mut *tx)
        .await?;

    let rows = Scoped::new(&mut *tx, owner)
        .count_by::<Application, ApplicationStatus>("status")
        .await?;
    let (total_applications, applications_by_status) = fill_status_counts(rows);

    let (from, to) = upcoming_window(now);
    let upcoming_interviews = Scoped::new(&mut *tx, owner)
        .count_matching(&InterviewsFrom {
            from,
            until: Some(to),
        })
        .await?;

    let total_companies = Scoped::new(&mut *tx, owner).count::<Company>().await?;
    let total_contacts = Scoped::new(&mut *tx, owner).count::<Contact>().await?;

    let recent_applications = Scoped::new(&mut *tx, owner)
        .list(&RecentApplications)
        .await?;
    let recent_interviews = Scoped::new(&mut *tx, owner)
        .list(&InterviewsFrom {
            from: now,
            until: None,
        })
        .await?;

    tx.commit().await?;

    Ok(DashboardStats {
        total_applications,
        applications_by_status,
        upcoming_interviews,
        total_companies,
        total_contacts,
        recent_applications,
        recent_interviews,
    })
}
