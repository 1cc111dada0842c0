//! Testing utilities
//!
//! [`TestDatabase`] gives each test its own in-memory SQLite database with a
//! migrator applied, so tests never share rows and can run in parallel.
//!
//! # Example
//!
//! ```rust,ignore
//! use modelkit::testing::TestDatabase;
//!
//! #[tokio::test]
//! async fn creates_a_user() {
//!     let db = TestDatabase::fresh::<Migrator>().await.unwrap();
//!     let user = users::Entity::insert_one(db.conn(), new_user(), Options::new())
//!         .await
//!         .unwrap();
//!     assert_eq!(user["email"], "ada@example.com");
//! }
//! ```

use std::ops::Deref;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::config::DatabaseConfig;
use crate::database;
use crate::error::ModelError;

/// An isolated in-memory database for one test
pub struct TestDatabase {
    conn: DatabaseConnection,
}

impl TestDatabase {
    /// Connect to a fresh in-memory database and run every migration of `M`
    pub async fn fresh<M: MigratorTrait>() -> Result<Self, ModelError> {
        let db = Self::empty().await?;
        M::up(&db.conn, None).await?;
        Ok(db)
    }

    /// Connect to a fresh in-memory database with no tables
    pub async fn empty() -> Result<Self, ModelError> {
        let config = DatabaseConfig::builder()
            .url("sqlite::memory:")
            .logging(false)
            .build();
        let conn = database::connect(&config).await?;
        Ok(Self { conn })
    }

    /// The underlying connection
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }
}

impl Deref for TestDatabase {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}
