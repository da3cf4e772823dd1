use chrono::{DateTime, Utc};

use crate::domain::{
    Cents, Statistics, Transaction, TransactionId, TransactionKind, is_known_category,
};
use crate::storage::LedgerStore;

use super::AppError;

/// Maximum length of a transaction description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// High-level operations over the ledger. This is the caller-side contract
/// the store leaves open: the service validates amount, category, and
/// description before anything reaches storage.
pub struct TrackerService {
    store: LedgerStore,
}

impl TrackerService {
    /// Create a new service with the given store.
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let store = LedgerStore::init(&db_url).await?;
        Ok(Self::new(store))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let store = LedgerStore::connect(&db_url).await?;
        Ok(Self::new(store))
    }

    /// Record a transaction dated now.
    pub async fn add_transaction(
        &self,
        kind: TransactionKind,
        category: &str,
        amount_cents: Cents,
        description: Option<&str>,
    ) -> Result<(), AppError> {
        self.add_transaction_at(kind, category, amount_cents, description, Utc::now())
            .await
    }

    /// Record a transaction with an explicit business date.
    pub async fn add_transaction_at(
        &self,
        kind: TransactionKind,
        category: &str,
        amount_cents: Cents,
        description: Option<&str>,
        occurred_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(amount_cents));
        }
        if !is_known_category(category) {
            return Err(AppError::UnknownCategory(category.to_string()));
        }
        if let Some(desc) = description {
            if desc.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(AppError::DescriptionTooLong {
                    len: desc.chars().count(),
                    max: MAX_DESCRIPTION_LEN,
                });
            }
        }

        if self
            .store
            .add_at(kind, category, amount_cents, description, occurred_at)
            .await
        {
            Ok(())
        } else {
            Err(AppError::StoreRejected)
        }
    }

    /// The most recent transactions, newest business date first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<Transaction>, AppError> {
        Ok(self.store.list(limit).await?)
    }

    /// Running balance over all transactions.
    pub async fn balance(&self) -> Result<Cents, AppError> {
        Ok(self.store.balance().await?)
    }

    /// Rolling 30-day statistics.
    pub async fn statistics(&self) -> Result<Statistics, AppError> {
        Ok(self.store.statistics().await?)
    }

    /// Delete a transaction. Idempotent: deleting an absent id is success.
    pub async fn delete_transaction(&self, id: TransactionId) -> bool {
        self.store.delete(id).await
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }
}
