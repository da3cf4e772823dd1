use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use sqlx::{Row, SqlitePool};

use crate::domain::{CategoryTotal, Cents, Statistics, Transaction, TransactionId, TransactionKind};

use super::MIGRATION_001_INITIAL;

/// Number of days covered by the rolling statistics window.
const STATS_WINDOW_DAYS: i64 = 30;

/// How many expense categories `statistics` reports.
const TOP_CATEGORY_LIMIT: i64 = 5;

/// Durable store for the transaction ledger.
///
/// Mutating operations (`add`, `delete`) catch storage faults, log them, and
/// report a boolean result. Read operations propagate faults to the caller.
pub struct LedgerStore {
    pool: SqlitePool,
}

impl LedgerStore {
    /// Create a new store over the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Idempotent, safe to call on every startup.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let store = Self::connect(database_url).await?;
        store.migrate().await?;
        Ok(store)
    }

    /// Record a transaction with both timestamps set to now.
    ///
    /// The store does not validate kind, category, or amount range - that is
    /// the caller's contract. Returns false (and logs) on a storage fault.
    pub async fn add(
        &self,
        kind: TransactionKind,
        category: &str,
        amount_cents: Cents,
        description: Option<&str>,
    ) -> bool {
        self.add_at(kind, category, amount_cents, description, Utc::now())
            .await
    }

    /// Record a transaction with an explicit business date.
    pub async fn add_at(
        &self,
        kind: TransactionKind,
        category: &str,
        amount_cents: Cents,
        description: Option<&str>,
        occurred_at: DateTime<Utc>,
    ) -> bool {
        match self
            .insert(kind, category, amount_cents, description, occurred_at)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "failed to add transaction");
                false
            }
        }
    }

    async fn insert(
        &self,
        kind: TransactionKind,
        category: &str,
        amount_cents: Cents,
        description: Option<&str>,
        occurred_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (kind, category, amount_cents, description, occurred_at, recorded_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(kind.as_str())
        .bind(category)
        .bind(amount_cents)
        .bind(description)
        .bind(occurred_at.to_rfc3339())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to insert transaction")?;
        Ok(())
    }

    /// List up to `limit` most-recent transactions, ordered by business date
    /// descending. Returns an empty vec when the ledger is empty.
    pub async fn list(&self, limit: i64) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, kind, category, amount_cents, description, occurred_at, recorded_at
            FROM transactions
            ORDER BY occurred_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list transactions")?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    /// Running balance over all transactions: income minus expense.
    /// Returns 0 when the ledger is empty.
    pub async fn balance(&self) -> Result<Cents> {
        let row = sqlx::query(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN kind = 'income' THEN amount_cents ELSE 0 END), 0) -
                COALESCE(SUM(CASE WHEN kind = 'expense' THEN amount_cents ELSE 0 END), 0) as balance
            FROM transactions
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .context("Failed to compute balance")?;

        Ok(row.get("balance"))
    }

    /// Rolling 30-day statistics: income/expense sums and the top expense
    /// categories, all restricted to business dates inside the window.
    pub async fn statistics(&self) -> Result<Statistics> {
        let cutoff = (Utc::now() - Duration::days(STATS_WINDOW_DAYS)).to_rfc3339();

        let sums = sqlx::query(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN kind = 'income' THEN amount_cents ELSE 0 END), 0) as monthly_income,
                COALESCE(SUM(CASE WHEN kind = 'expense' THEN amount_cents ELSE 0 END), 0) as monthly_expense
            FROM transactions
            WHERE occurred_at >= ?
            "#,
        )
        .bind(&cutoff)
        .fetch_one(&self.pool)
        .await
        .context("Failed to compute monthly sums")?;

        let category_rows = sqlx::query(
            r#"
            SELECT category, SUM(amount_cents) as total
            FROM transactions
            WHERE kind = 'expense' AND occurred_at >= ?
            GROUP BY category
            ORDER BY total DESC
            LIMIT ?
            "#,
        )
        .bind(&cutoff)
        .bind(TOP_CATEGORY_LIMIT)
        .fetch_all(&self.pool)
        .await
        .context("Failed to compute top categories")?;

        let top_categories = category_rows
            .iter()
            .map(|row| CategoryTotal {
                category: row.get("category"),
                total: row.get("total"),
            })
            .collect();

        Ok(Statistics {
            monthly_income: sums.get("monthly_income"),
            monthly_expense: sums.get("monthly_expense"),
            top_categories,
        })
    }

    /// Delete the transaction with the given id.
    ///
    /// Deleting a non-existent id is not an error: DELETE affecting 0 rows is
    /// still success. Returns false (and logs) only on a storage fault.
    pub async fn delete(&self, id: TransactionId) -> bool {
        match self.delete_row(id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, id, "failed to delete transaction");
                false
            }
        }
    }

    async fn delete_row(&self, id: TransactionId) -> Result<()> {
        sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete transaction")?;
        Ok(())
    }

    fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Result<Transaction> {
        let kind_str: String = row.get("kind");
        let occurred_at_str: String = row.get("occurred_at");
        let recorded_at_str: String = row.get("recorded_at");

        Ok(Transaction {
            id: row.get("id"),
            kind: TransactionKind::from_str(&kind_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid transaction kind: {}", kind_str))?,
            category: row.get("category"),
            amount_cents: row.get("amount_cents"),
            description: row.get("description"),
            occurred_at: DateTime::parse_from_rfc3339(&occurred_at_str)
                .context("Invalid occurred_at timestamp")?
                .with_timezone(&Utc),
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
                .context("Invalid recorded_at timestamp")?
                .with_timezone(&Utc),
        })
    }
}
