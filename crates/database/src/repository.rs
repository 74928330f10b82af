use crate::DbError;
use crate::store::EntryStore;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{DateRange, EntryUpdate, FinancialEntry, NewEntry, SortDirective};
use sqlx::FromRow;
use sqlx::postgres::PgPool;

const ENTRY_COLUMNS: &str = "id, type, amount, date, category, created_at";

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// Database-specific entry struct that matches the entries table schema.
#[derive(Debug, Clone, FromRow)]
pub struct DbEntry {
    pub id: i64,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbEntry> for FinancialEntry {
    type Error = DbError;

    fn try_from(row: DbEntry) -> Result<Self, Self::Error> {
        Ok(FinancialEntry {
            id: row.id,
            kind: row.kind.parse()?,
            amount: row.amount,
            date: row.date,
            category: row.category,
            created_at: row.created_at,
        })
    }
}

fn into_entries(rows: Vec<DbEntry>) -> Result<Vec<FinancialEntry>, DbError> {
    rows.into_iter().map(FinancialEntry::try_from).collect()
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for DbRepository {
    async fn create_entry(&self, entry: NewEntry) -> Result<FinancialEntry, DbError> {
        let query = format!(
            "INSERT INTO entries (type, amount, date, category) VALUES ($1, $2, $3, $4) RETURNING {ENTRY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, DbEntry>(&query)
            .bind(entry.kind.as_str())
            .bind(entry.amount)
            .bind(entry.date)
            .bind(&entry.category)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(id = row.id, "Inserted entry.");
        row.try_into()
    }

    /// The `ORDER BY` clause comes from the directive's fixed column expressions,
    /// never from request text.
    async fn fetch_entries(&self, sort: &SortDirective) -> Result<Vec<FinancialEntry>, DbError> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM entries{}", sort.order_by_clause());
        let rows = sqlx::query_as::<_, DbEntry>(&query)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(rows = rows.len(), "Fetched entries.");
        into_entries(rows)
    }

    async fn fetch_entries_in_range(&self, range: &DateRange) -> Result<Vec<FinancialEntry>, DbError> {
        let query = format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM entries
            WHERE ($1::date IS NULL OR date >= $1) AND ($2::date IS NULL OR date <= $2)
            ORDER BY id ASC
            "#
        );
        let rows = sqlx::query_as::<_, DbEntry>(&query)
            .bind(range.from)
            .bind(range.to)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(rows = rows.len(), from = ?range.from, to = ?range.to, "Fetched entries in range.");
        into_entries(rows)
    }

    /// Fields left as `None` keep their stored value through `COALESCE`.
    async fn update_entry(&self, id: i64, update: EntryUpdate) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE entries
            SET type = COALESCE($1, type),
                amount = COALESCE($2, amount),
                date = COALESCE($3, date),
                category = COALESCE($4, category)
            WHERE id = $5
            "#,
        )
        .bind(update.kind.map(|kind| kind.as_str()))
        .bind(update.amount)
        .bind(update.date)
        .bind(update.category)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    async fn delete_entry(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}
