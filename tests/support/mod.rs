#![allow(dead_code)]

use std::path::PathBuf;

use diesel::connection::SimpleConnection;
use tempfile::TempDir;
use tradedesk::adapter::inbound::web::state::{Auth, Crud};
use tradedesk::adapter::inbound::web::WebState;
use tradedesk::adapter::outbound::hash::BcryptHasher;
use tradedesk::adapter::outbound::sqlite::{init_schema, DbPool};
use tradedesk::domain::FormFields;
use tradedesk::infrastructure::bootstrap;
use tradedesk::infrastructure::config::settings::Config;

/// Temporary SQLite database for integration tests, removed on drop.
pub struct TempDb {
    _dir: TempDir,
    config: Config,
    pool: DbPool,
}

impl TempDb {
    /// Database built from the bundled trading schema.
    pub fn create() -> Self {
        let db = Self::empty(Config::default());
        init_schema(&db.pool).expect("init schema");
        db
    }

    /// Database built from `sql`, serving only `tables`, with no field hooks.
    pub fn with_schema(sql: &str, tables: &[&str]) -> Self {
        let mut config = Config::default();
        config.tables.allow = tables.iter().map(|t| t.to_string()).collect();
        config.tables.hashed_fields.clear();

        let db = Self::empty(config);
        db.execute(sql);
        db
    }

    fn empty(mut config: Config) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        config.database.path = dir.path().join("instance").join("trading.sqlite");
        config.auth.bcrypt_cost = BcryptHasher::MIN_COST;
        config.auth.secret_key = "test-secret".into();

        let pool = bootstrap::open_pool(&config.database).expect("open sqlite pool");
        Self {
            _dir: dir,
            config,
            pool,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn path(&self) -> PathBuf {
        self.config.database.path.clone()
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn execute(&self, sql: &str) {
        let mut conn = self.pool.get().expect("get sqlite connection");
        conn.batch_execute(sql).expect("execute sql");
    }

    pub fn services(&self) -> (Crud, Auth) {
        bootstrap::build_services(&self.config).expect("build services")
    }

    pub fn crud(&self) -> Crud {
        self.services().0
    }

    pub fn web_state(&self) -> WebState {
        bootstrap::build_web_state(&self.config).expect("build web state")
    }

    /// One trader (id 1) and one stock (id 1).
    pub fn seed_trader_and_stock(&self) {
        self.execute(
            "INSERT INTO Traders (TraderID, Name, Email, Password, Balance) \
             VALUES (1, 'Ann', 'ann@example.com', 'x', 100.0); \
             INSERT INTO Stocks (StockID, Symbol, CompanyName, Sector, CurrentPrice) \
             VALUES (1, 'AAPL', 'Apple Inc.', 'Tech', 190.5);",
        );
    }
}

pub fn form(pairs: &[(&str, &str)]) -> FormFields {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

/// Schema with a three-column `Stocks` table.
pub const STOCKS_SQL: &str = "CREATE TABLE Stocks (\
    id INTEGER PRIMARY KEY AUTOINCREMENT, \
    symbol TEXT NOT NULL, \
    name TEXT);";
