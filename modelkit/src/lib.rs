//! Plain-record helper operations for SeaORM entities
//!
//! - [`Model`] / [`ModelMut`]: eight helper operations attached to any
//!   entity with an empty `impl`, returning plain records by default or the
//!   entity's own `Model` values in raw mode.
//! - [`extend`](extend::extend): layered, non-mutating object extension.
//! - [`config`] and [`database`]: env-driven configuration and connection
//!   bootstrap.
//! - [`testing`]: in-memory databases for tests.

pub mod config;
pub mod database;
pub mod error;
pub mod extend;
pub mod model;
pub mod testing;

pub use config::{CountOnly, DatabaseConfig, FacadeConfig};
pub use error::{ExtendError, ModelError};
pub use model::{
    FindOptions, FindOrCreateOptions, Model, ModelMut, Options, Plain, PlainRecord, Raw, Shape,
    ToPlain, UpdateOptions, UpsertOptions,
};

// Re-export the ORM so downstream crates build against the same version
pub use sea_orm;
pub use sea_orm_migration;
