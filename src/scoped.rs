//! Owner-scoped persistence shared by every resource router.
//!
//! Every statement built here carries `user_id = <owner>`, so a record that
//! belongs to someone else behaves exactly like one that does not exist.

use serde::Deserialize;
use sqlx::{
    postgres::PgRow, query_builder::Separated, Encode, FromRow, PgExecutor, Postgres,
    QueryBuilder, Type,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A table whose rows carry an `id` and an owning `user_id`.
pub trait OwnedRecord: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    /// Column list selected and returned by every statement.
    const COLUMNS: &'static str;
    const ORDER_BY: &'static str;
    /// Used in the not-found message.
    const NAME: &'static str;
}

/// An insert payload for `Record`. `id` and `user_id` are supplied by the
/// repository.
pub trait NewRecord: Send {
    type Record: OwnedRecord;
    const COLUMNS: &'static [&'static str];

    /// Binds one value per entry of `COLUMNS`, in order.
    fn push_values(self, values: &mut Separated<'_, '_, Postgres, &'static str>);
}

/// A partial update for `Record`: only the fields that are set are written.
pub trait Patch: Send {
    type Record: OwnedRecord;

    fn push_assignments(self, set: &mut Separated<'_, '_, Postgres, &'static str>);
}

/// Query-string filters for a list endpoint.
pub trait ListQuery {
    type Record: OwnedRecord;

    fn page(&self) -> Page;
    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

pub const DEFAULT_LIMIT: u32 = 100;

pub fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Writes `column = $n` when `value` is set.
pub fn assign<'args, T>(
    set: &mut Separated<'_, 'args, Postgres, &'static str>,
    column: &'static str,
    value: Option<T>,
) where
    T: 'args + Encode<'args, Postgres> + Send + Type<Postgres>,
{
    if let Some(value) = value {
        set.push(column)
            .push_unseparated(" = ")
            .push_bind_unseparated(value);
    }
}

/// Owner-scoped view of the database over any executor: `&PgPool` in the
/// handlers, `&mut PgConnection` inside a transaction. Methods take `self`,
/// so a pool-backed view is reused freely while a connection-backed one is
/// rebuilt per statement.
#[derive(Clone, Copy)]
pub struct Scoped<E> {
    db: E,
    owner: Uuid,
}

impl<'e, E> Scoped<E>
where
    E: PgExecutor<'e>,
{
    pub fn new(db: E, owner: Uuid) -> Self {
        Self { db, owner }
    }

    pub async fn find<R: OwnedRecord>(self, id: Uuid) -> Result<Option<R>, sqlx::Error> {
        select_by_id::<R>(id, self.owner)
            .build_query_as::<R>()
            .fetch_optional(self.db)
            .await
    }

    /// Like [`Scoped::find`] but a miss is a 404.
    pub async fn get<R: OwnedRecord>(self, id: Uuid) -> AppResult<R> {
        self.find::<R>(id)
            .await?
            .ok_or(AppError::NotFound(R::NAME))
    }

    pub async fn exists<R: OwnedRecord>(self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT EXISTS (SELECT 1 FROM ");
        qb.push(R::TABLE)
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND user_id = ")
            .push_bind(self.owner)
            .push(")");
        qb.build_query_scalar::<bool>().fetch_one(self.db).await
    }

    /// Fails with a 422 on `field` unless `id` names one of the owner's rows.
    pub async fn require<R: OwnedRecord>(self, field: &'static str, id: Uuid) -> AppResult<()> {
        if self.exists::<R>(id).await? {
            Ok(())
        } else {
            Err(AppError::invalid(
                field,
                format!("{} not found", R::NAME),
            ))
        }
    }

    pub async fn list<Q: ListQuery>(self, query: &Q) -> Result<Vec<Q::Record>, sqlx::Error> {
        select_list(query, self.owner)
            .build_query_as::<Q::Record>()
            .fetch_all(self.db)
            .await
    }

    pub async fn count<R: OwnedRecord>(self) -> Result<i64, sqlx::Error> {
        count_statement::<R>(self.owner)
            .build_query_scalar::<i64>()
            .fetch_one(self.db)
            .await
    }

    /// Counts the rows `query` would list, ignoring its page.
    pub async fn count_matching<Q: ListQuery>(self, query: &Q) -> Result<i64, sqlx::Error> {
        let mut qb = count_statement::<Q::Record>(self.owner);
        query.push_conditions(&mut qb);
        qb.build_query_scalar::<i64>().fetch_one(self.db).await
    }

    /// Row counts of the owner's rows grouped by `column`.
    pub async fn count_by<R, K>(self, column: &'static str) -> Result<Vec<(K, i64)>, sqlx::Error>
    where
        R: OwnedRecord,
        (K, i64): for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        grouped_count_statement::<R>(column, self.owner)
            .build_query_as::<(K, i64)>()
            .fetch_all(self.db)
            .await
    }

    pub async fn insert<N: NewRecord>(self, new: N) -> Result<N::Record, sqlx::Error> {
        insert_statement(new, Uuid::new_v4(), self.owner)
            .build_query_as::<N::Record>()
            .fetch_one(self.db)
            .await
    }

    /// Applies `patch` if the row exists and is owned; the ownership check
    /// and the write are one statement.
    pub async fn update<P: Patch>(self, id: Uuid, patch: P) -> AppResult<P::Record> {
        update_statement(patch, id, self.owner)
            .build_query_as::<P::Record>()
            .fetch_optional(self.db)
            .await?
            .ok_or(AppError::NotFound(P::Record::NAME))
    }

    pub async fn delete<R: OwnedRecord>(self, id: Uuid) -> AppResult<()> {
        let mut qb = QueryBuilder::<Postgres>::new("DELETE FROM ");
        qb.push(R::TABLE)
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND user_id = ")
            .push_bind(self.owner);
        let done = qb.build().execute(self.db).await?;
        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(R::NAME));
        }
        Ok(())
    }
}

fn count_statement<R: OwnedRecord>(owner: Uuid) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
    qb.push(R::TABLE)
        .push(" WHERE user_id = ")
        .push_bind(owner);
    qb
}

fn grouped_count_statement<R: OwnedRecord>(
    column: &'static str,
    owner: Uuid,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
    qb.push(column)
        .push(", COUNT(*) FROM ")
        .push(R::TABLE)
        .push(" WHERE user_id = ")
        .push_bind(owner)
        .push(" GROUP BY ")
        .push(column);
    qb
}

fn select_by_id<R: OwnedRecord>(id: Uuid, owner: Uuid) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
    qb.push(R::COLUMNS)
        .push(" FROM ")
        .push(R::TABLE)
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND user_id = ")
        .push_bind(owner);
    qb
}

fn select_list<Q: ListQuery>(query: &Q, owner: Uuid) -> QueryBuilder<'static, Postgres> {
    let page = query.page();
    let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
    qb.push(Q::Record::COLUMNS)
        .push(" FROM ")
        .push(Q::Record::TABLE)
        .push(" WHERE user_id = ")
        .push_bind(owner);
    query.push_conditions(&mut qb);
    qb.push(" ORDER BY ")
        .push(Q::Record::ORDER_BY)
        .push(" LIMIT ")
        .push_bind(i64::from(page.limit))
        .push(" OFFSET ")
        .push_bind(i64::from(page.skip));
    qb
}

fn insert_statement<N: NewRecord>(new: N, id: Uuid, owner: Uuid) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("INSERT INTO ");
    qb.push(N::Record::TABLE).push(" (id, user_id");
    for column in N::COLUMNS {
        qb.push(", ").push(*column);
    }
    qb.push(") VALUES (")
        .push_bind(id)
        .push(", ")
        .push_bind(owner);
    if !N::COLUMNS.is_empty() {
        qb.push(", ");
        let mut values = qb.separated(", ");
        new.push_values(&mut values);
    }
    qb.push(") RETURNING ").push(N::Record::COLUMNS);
    qb
}

fn update_statement<P: Patch>(patch: P, id: Uuid, owner: Uuid) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE ");
    qb.push(P::Record::TABLE).push(" SET ");
    {
        let mut set = qb.separated(", ");
        patch.push_assignments(&mut set);
        set.push("updated_at = now()");
    }
    qb.push(" WHERE id = ")
        .push_bind(id)
        .push(" AND user_id = ")
        .push_bind(owner)
        .push(" RETURNING ")
        .push(P::Record::COLUMNS);
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, FromRow)]
    struct Widget {
        #[allow(dead_code)]
        id: Uuid,
    }

    impl OwnedRecord for Widget {
        const TABLE: &'static str = "widgets";
        const COLUMNS: &'static str = "id, name";
        const ORDER_BY: &'static str = "name ASC";
        const NAME: &'static str = "Widget";
    }

    struct NewWidget {
        name: String,
        color: Option<String>,
    }

    impl NewRecord for NewWidget {
        type Record = Widget;
        const COLUMNS: &'static [&'static str] = &["name", "color"];

        fn push_values(self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
            values.push_bind(self.name);
            values.push_bind(self.color);
        }
    }

    #[derive(Default)]
    struct WidgetPatch {
        name: Option<String>,
        color: Option<Option<String>>,
    }

    impl Patch for WidgetPatch {
        type Record = Widget;

        fn push_assignments(self, set: &mut Separated<'_, '_, Postgres, &'static str>) {
            assign(set, "name", self.name);
            assign(set, "color", self.color);
        }
    }

    struct WidgetQuery {
        page: Page,
        color: Option<String>,
    }

    impl ListQuery for WidgetQuery {
        type Record = Widget;

        fn page(&self) -> Page {
            self.page
        }

        fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
            if let Some(color) = &self.color {
                qb.push(" AND color = ").push_bind(color.clone());
            }
        }
    }

    #[test]
    fn update_only_touches_supplied_columns() {
        let patch = WidgetPatch {
            color: Some(None),
            ..Default::default()
        };
        let qb = update_statement(patch, Uuid::nil(), Uuid::nil());
        assert_eq!(
            qb.sql(),
            "UPDATE widgets SET color = $1, updated_at = now() WHERE id = $2 AND user_id = $3 RETURNING id, name"
        );
    }

    #[test]
    fn empty_patch_still_scopes_by_owner() {
        let qb = update_statement(WidgetPatch::default(), Uuid::nil(), Uuid::nil());
        assert_eq!(
            qb.sql(),
            "UPDATE widgets SET updated_at = now() WHERE id = $1 AND user_id = $2 RETURNING id, name"
        );
    }

    #[test]
    fn insert_binds_id_owner_then_columns() {
        let new = NewWidget {
            name: "gear".into(),
            color: None,
        };
        let qb = insert_statement(new, Uuid::nil(), Uuid::nil());
        assert_eq!(
            qb.sql(),
            "INSERT INTO widgets (id, user_id, name, color) VALUES ($1, $2, $3, $4) RETURNING id, name"
        );
    }

    #[test]
    fn list_applies_filters_between_owner_and_order() {
        let query = WidgetQuery {
            page: Page::default(),
            color: Some("red".into()),
        };
        let qb = select_list(&query, Uuid::nil());
        assert_eq!(
            qb.sql(),
            "SELECT id, name FROM widgets WHERE user_id = $1 AND color = $2 ORDER BY name ASC LIMIT $3 OFFSET $4"
        );
    }

    #[test]
    fn filtered_count_reuses_list_conditions() {
        let query = WidgetQuery {
            page: Page::default(),
            color: Some("red".into()),
        };
        let mut qb = count_statement::<Widget>(Uuid::nil());
        query.push_conditions(&mut qb);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM widgets WHERE user_id = $1 AND color = $2"
        );
    }

    #[test]
    fn grouped_count_is_owner_scoped() {
        let qb = grouped_count_statement::<Widget>("color", Uuid::nil());
        assert_eq!(
            qb.sql(),
            "SELECT color, COUNT(*) FROM widgets WHERE user_id = $1 GROUP BY color"
        );
    }

    #[test]
    fn get_by_id_is_owner_scoped() {
        let qb = select_by_id::<Widget>(Uuid::nil(), Uuid::nil());
        assert_eq!(
            qb.sql(),
            "SELECT id, name FROM widgets WHERE id = $1 AND user_id = $2"
        );
    }
}
