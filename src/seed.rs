//! Demo data for local development.
//!
//! Everything is matched on natural keys before it is inserted, so running
//! the seed twice leaves the database unchanged.

use anyhow::Context;
use sqlx::{PgConnection, PgPool};
use time::{Duration, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use crate::{
    applications::ApplicationStatus,
    auth::{password::hash_password, User},
};

pub const DEMO_EMAIL: &str = "student@example.com";
pub const DEMO_PASSWORD: &str = "password123";
const DEMO_NAME: &str = "Test Student";

struct SeedCompany {
    name: &'static str,
    website: &'static str,
    industry: &'static str,
    size: &'static str,
    location: &'static str,
    description: &'static str,
}

struct SeedApplication {
    company: usize,
    job_title: &'static str,
    status: ApplicationStatus,
    job_url: &'static str,
    salary: (f64, f64),
    applied_days_ago: Option<i64>,
    notes: &'static str,
}

struct SeedContact {
    company: usize,
    name: &'static str,
    email: &'static str,
    phone: Option<&'static str>,
    title: &'static str,
    linkedin: &'static str,
    notes: &'static str,
}

struct SeedInterview {
    application: usize,
    interview_type: &'static str,
    /// Days and hours from now; negative for past interviews.
    offset: (i64, i64),
    location: &'static str,
    interviewer_name: &'static str,
    interviewer_email: Option<&'static str>,
    notes: &'static str,
    result: Option<&'static str>,
}

const COMPANIES: &[SeedCompany] = &[
    SeedCompany {
        name: "TechCorp Inc.",
        website: "https://techcorp.com",
        industry: "Technology",
        size: "500-1000 employees",
        location: "San Francisco, CA",
        description: "Leading technology company specializing in cloud solutions",
    },
    SeedCompany {
        name: "DataSystems Ltd",
        website: "https://datasystems.io",
        industry: "Data Analytics",
        size: "100-500 employees",
        location: "New York, NY",
        description: "Data analytics and business intelligence solutions",
    },
    SeedCompany {
        name: "StartupXYZ",
        website: "https://startupxyz.com",
        industry: "FinTech",
        size: "50-100 employees",
        location: "Austin, TX",
        description: "Innovative fintech startup disrupting payment solutions",
    },
    SeedCompany {
        name: "GlobalSoft",
        website: "https://globalsoft.com",
        industry: "Software Development",
        size: "1000+ employees",
        location: "Seattle, WA",
        description: "Enterprise software solutions provider",
    },
];

const APPLICATIONS: &[SeedApplication] = &[
    SeedApplication {
        company: 0,
        job_title: "Senior Software Engineer",
        status: ApplicationStatus::Applied,
        job_url: "https://techcorp.com/careers/senior-software-engineer",
        salary: (120_000.0, 160_000.0),
        applied_days_ago: Some(5),
        notes: "Great company culture, interesting projects",
    },
    SeedApplication {
        company: 1,
        job_title: "Data Scientist",
        status: ApplicationStatus::Interview,
        job_url: "https://datasystems.io/careers/data-scientist",
        salary: (110_000.0, 140_000.0),
        applied_days_ago: Some(10),
        notes: "Second round interview scheduled",
    },
    SeedApplication {
        company: 2,
        job_title: "Full Stack Developer",
        status: ApplicationStatus::PhoneScreen,
        job_url: "https://startupxyz.com/jobs/full-stack",
        salary: (90_000.0, 120_000.0),
        applied_days_ago: Some(3),
        notes: "Phone screen completed, waiting for next steps",
    },
    SeedApplication {
        company: 0,
        job_title: "Backend Engineer",
        status: ApplicationStatus::Saved,
        job_url: "https://techcorp.com/careers/backend-engineer",
        salary: (100_000.0, 130_000.0),
        applied_days_ago: None,
        notes: "Planning to apply next week",
    },
    SeedApplication {
        company: 3,
        job_title: "Machine Learning Engineer",
        status: ApplicationStatus::Offer,
        job_url: "https://globalsoft.com/careers/ml-engineer",
        salary: (130_000.0, 170_000.0),
        applied_days_ago: Some(20),
        notes: "Received offer! Negotiating terms.",
    },
    SeedApplication {
        company: 1,
        job_title: "Product Manager",
        status: ApplicationStatus::Rejected,
        job_url: "https://datasystems.io/careers/product-manager",
        salary: (115_000.0, 145_000.0),
        applied_days_ago: Some(15),
        notes: "Not selected, but received positive feedback",
    },
];

const CONTACTS: &[SeedContact] = &[
    SeedContact {
        company: 0,
        name: "Sarah Johnson",
        email: "sarah.johnson@techcorp.com",
        phone: Some("+1-555-0101"),
        title: "Senior Recruiter",
        linkedin: "https://linkedin.com/in/sarahjohnson",
        notes: "Very responsive, helpful throughout the process",
    },
    SeedContact {
        company: 1,
        name: "Michael Chen",
        email: "mchen@datasystems.io",
        phone: Some("+1-555-0102"),
        title: "Hiring Manager",
        linkedin: "https://linkedin.com/in/michaelchen",
        notes: "Conducted the technical interview",
    },
    SeedContact {
        company: 2,
        name: "Emily Rodriguez",
        email: "emily@startupxyz.com",
        phone: None,
        title: "Talent Acquisition",
        linkedin: "https://linkedin.com/in/emilyrodriguez",
        notes: "Initial point of contact",
    },
    SeedContact {
        company: 3,
        name: "David Kim",
        email: "david.kim@globalsoft.com",
        phone: None,
        title: "Engineering Manager",
        linkedin: "https://linkedin.com/in/davidkim",
        notes: "Made the offer, great to work with",
    },
];

const INTERVIEWS: &[SeedInterview] = &[
    SeedInterview {
        application: 1,
        interview_type: "Video Call",
        offset: (2, 14),
        location: "Zoom",
        interviewer_name: "Michael Chen",
        interviewer_email: Some("mchen@datasystems.io"),
        notes: "Technical interview focusing on ML algorithms",
        result: None,
    },
    SeedInterview {
        application: 1,
        interview_type: "Onsite",
        offset: (7, 10),
        location: "New York Office",
        interviewer_name: "Team Lead",
        interviewer_email: None,
        notes: "Final round with the team",
        result: None,
    },
    SeedInterview {
        application: 2,
        interview_type: "Phone Screen",
        offset: (-1, -2),
        location: "Phone",
        interviewer_name: "Emily Rodriguez",
        interviewer_email: None,
        notes: "Initial screening call",
        result: Some("passed"),
    },
    SeedInterview {
        application: 4,
        interview_type: "Video Call",
        offset: (-5, -15),
        location: "Microsoft Teams",
        interviewer_name: "David Kim",
        interviewer_email: Some("david.kim@globalsoft.com"),
        notes: "Technical deep dive, went very well",
        result: Some("passed"),
    },
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub companies: usize,
    pub applications: usize,
    pub contacts: usize,
    pub interviews: usize,
    /// Rows actually inserted on this run.
    pub inserted: usize,
}

/// Seeds the demo account in one transaction. On error the transaction is
/// dropped, which rolls it back.
pub async fn run(db: &PgPool) -> anyhow::Result<SeedSummary> {
    let now = OffsetDateTime::now_utc();
    let mut summary = SeedSummary::default();
    let mut tx = db.begin().await.context("begin seed transaction")?;

    let user_id = demo_user(&mut tx, &mut summary).await?;

    let mut company_ids = Vec::with_capacity(COMPANIES.len());
    for company in COMPANIES {
        company_ids.push(seed_company(&mut tx, user_id, company, &mut summary).await?);
    }
    summary.companies = company_ids.len();

    let mut application_ids = Vec::with_capacity(APPLICATIONS.len());
    for application in APPLICATIONS {
        let company_id = company_ids[application.company];
        application_ids.push(
            seed_application(&mut tx, user_id, company_id, application, now, &mut summary)
                .await?,
        );
    }
    summary.applications = application_ids.len();

    for contact in CONTACTS {
        let company_id = company_ids[contact.company];
        seed_contact(&mut tx, user_id, company_id, contact, &mut summary).await?;
        summary.contacts += 1;
    }

    for interview in INTERVIEWS {
        let application_id = application_ids[interview.application];
        seed_interview(&mut tx, user_id, application_id, interview, now, &mut summary).await?;
        summary.interviews += 1;
    }

    tx.commit().await.context("commit seed transaction")?;
    info!(?summary, "seed complete");
    Ok(summary)
}

async fn demo_user(conn: &mut PgConnection, summary: &mut SeedSummary) -> anyhow::Result<Uuid> {
    if let Some(user) = User::find_by_email(&mut *conn, DEMO_EMAIL).await? {
        info!(email = DEMO_EMAIL, "using existing demo user");
        return Ok(user.id);
    }
    let hash = hash_password(DEMO_PASSWORD)?;
    let user = User::create(&mut *conn, DEMO_EMAIL, &hash, Some(DEMO_NAME))
        .await
        .context("create demo user")?;
    summary.inserted += 1;
    info!(email = DEMO_EMAIL, "created demo user");
    Ok(user.id)
}

async fn seed_company(
    conn: &mut PgConnection,
    user_id: Uuid,
    c: &SeedCompany,
    summary: &mut SeedSummary,
) -> anyhow::Result<Uuid> {
    let existing = sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM companies WHERE user_id = $1 AND name = $2",
    )
    .bind(user_id)
    .bind(c.name)
    .fetch_optional(&mut *conn)
    .await?;
    if let Some(id) = existing {
        return Ok(id);
    }

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO companies (id, user_id, name, website, industry, size, location, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(c.name)
    .bind(c.website)
    .bind(c.industry)
    .bind(c.size)
    .bind(c.location)
    .bind(c.description)
    .fetch_one(&mut *conn)
    .await
    .with_context(|| format!("insert company {}", c.name))?;
    summary.inserted += 1;
    Ok(id)
}

async fn seed_application(
    conn: &mut PgConnection,
    user_id: Uuid,
    company_id: Uuid,
    a: &SeedApplication,
    now: OffsetDateTime,
    summary: &mut SeedSummary,
) -> anyhow::Result<Uuid> {
    let existing = sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM applications WHERE user_id = $1 AND company_id = $2 AND job_title = $3",
    )
    .bind(user_id)
    .bind(company_id)
    .bind(a.job_title)
    .fetch_optional(&mut *conn)
    .await?;
    if let Some(id) = existing {
        return Ok(id);
    }

    let applied_date = a.applied_days_ago.map(|days| now - Duration::days(days));
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO applications
            (id, user_id, company_id, job_title, job_url, status,
             salary_min, salary_max, applied_date, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(company_id)
    .bind(a.job_title)
    .bind(a.job_url)
    .bind(a.status)
    .bind(a.salary.0)
    .bind(a.salary.1)
    .bind(applied_date)
    .bind(a.notes)
    .fetch_one(&mut *conn)
    .await
    .with_context(|| format!("insert application {}", a.job_title))?;
    summary.inserted += 1;
    Ok(id)
}

async fn seed_contact(
    conn: &mut PgConnection,
    user_id: Uuid,
    company_id: Uuid,
    c: &SeedContact,
    summary: &mut SeedSummary,
) -> anyhow::Result<()> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM contacts WHERE user_id = $1 AND name = $2 AND email = $3)",
    )
    .bind(user_id)
    .bind(c.name)
    .bind(c.email)
    .fetch_one(&mut *conn)
    .await?;
    if exists {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO contacts (id, user_id, company_id, name, email, phone, title, linkedin, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(company_id)
    .bind(c.name)
    .bind(c.email)
    .bind(c.phone)
    .bind(c.title)
    .bind(c.linkedin)
    .bind(c.notes)
    .execute(&mut *conn)
    .await
    .with_context(|| format!("insert contact {}", c.name))?;
    summary.inserted += 1;
    Ok(())
}

async fn seed_interview(
    conn: &mut PgConnection,
    user_id: Uuid,
    application_id: Uuid,
    i: &SeedInterview,
    now: OffsetDateTime,
    summary: &mut SeedSummary,
) -> anyhow::Result<()> {
    // scheduled_at moves with the clock, so it cannot be part of the key
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM interviews
            WHERE user_id = $1 AND application_id = $2
              AND interview_type = $3 AND interviewer_name = $4
        )
        "#,
    )
    .bind(user_id)
    .bind(application_id)
    .bind(i.interview_type)
    .bind(i.interviewer_name)
    .fetch_one(&mut *conn)
    .await?;
    if exists {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO interviews
            (id, user_id, application_id, interview_type, scheduled_at, location,
             interviewer_name, interviewer_email, notes, result)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(application_id)
    .bind(i.interview_type)
    .bind(scheduled_at(now, i.offset))
    .bind(i.location)
    .bind(i.interviewer_name)
    .bind(i.interviewer_email)
    .bind(i.notes)
    .bind(i.result)
    .execute(&mut *conn)
    .await
    .with_context(|| format!("insert {} interview", i.interview_type))?;
    summary.inserted += 1;
    Ok(())
}

fn scheduled_at(now: OffsetDateTime, (days, hours): (i64, i64)) -> OffsetDateTime {
    now + Duration::days(days) + Duration::hours(hours)
}
