use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::economy::{EconomyError, LedgerService};

/// Balance ledger stored in SQLite
pub struct SqliteLedger {
    pool: SqlitePool,
    /// Balance for accounts opened on first charge
    starting_balance: i64,
}

impl SqliteLedger {
    pub async fn new(database_url: &str, starting_balance: u64) -> Result<Self, sqlx::Error> {
        // Every connection to an in-memory database is a separate database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        // Run migrations
        Self::migrate(&pool).await?;

        Ok(Self {
            pool,
            starting_balance: i64::try_from(starting_balance).unwrap_or(i64::MAX),
        })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS balances (
                player TEXT PRIMARY KEY NOT NULL,
                balance INTEGER NOT NULL DEFAULT 0 CHECK (balance >= 0),
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        tracing::info!("Ledger migrations complete");
        Ok(())
    }

    async fn open_account(&self, player: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT OR IGNORE INTO balances (player, balance) VALUES (?, ?)")
            .bind(player)
            .bind(self.starting_balance)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Current balance, None if the player has never been charged or credited
    pub async fn balance(&self, player: &str) -> Result<Option<i64>, sqlx::Error> {
        let row = sqlx::query("SELECT balance FROM balances WHERE player = ?")
            .bind(player)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("balance")))
    }

    pub async fn set_balance(&self, player: &str, balance: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO balances (player, balance) VALUES (?, ?)
            ON CONFLICT(player) DO UPDATE SET
                balance = excluded.balance,
                updated_at = CURRENT_TIMESTAMP"#,
        )
        .bind(player)
        .bind(balance)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn to_sql_amount(amount: u64) -> Result<i64, EconomyError> {
    i64::try_from(amount).map_err(|_| EconomyError::AmountOutOfRange(amount))
}

#[async_trait]
impl LedgerService for SqliteLedger {
    async fn subtract_from_balance(&self, player_id: &str, amount: u64) -> Result<bool, EconomyError> {
        let amount = match to_sql_amount(amount) {
            Ok(amount) => amount,
            // No balance can cover it
            Err(_) => return Ok(false),
        };
        self.open_account(player_id).await?;

        // Check and debit in one statement
        let result = sqlx::query(
            r#"UPDATE balances SET
                balance = balance - ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE player = ? AND balance >= ?"#,
        )
        .bind(amount)
        .bind(player_id)
        .bind(amount)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn add_to_balance(&self, player_id: &str, amount: u64) -> Result<(), EconomyError> {
        let amount = to_sql_amount(amount)?;
        sqlx::query(
            r#"INSERT INTO balances (player, balance) VALUES (?, ?)
            ON CONFLICT(player) DO UPDATE SET
                balance = balance + excluded.balance,
                updated_at = CURRENT_TIMESTAMP"#,
        )
        .bind(player_id)
        .bind(amount)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
