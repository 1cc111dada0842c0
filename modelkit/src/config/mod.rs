//! Configuration
//!
//! Typed config structs built from environment variables, with `.env` file
//! support. Each struct has a `from_env()` constructor and a builder whose
//! unset fields fall back to the environment.
//!
//! # Example
//!
//! ```rust,no_run
//! use modelkit::config::{load_dotenv, DatabaseConfig, FacadeConfig};
//!
//! load_dotenv(std::path::Path::new("."));
//! FacadeConfig::install(FacadeConfig::from_env());
//!
//! let db = DatabaseConfig::from_env();
//! println!("connecting to {}", db.url);
//! ```

pub mod database;
pub mod env;
pub mod facade;

pub use database::{DatabaseConfig, DatabaseConfigBuilder, DatabaseType};
pub use env::{env, env_optional, load_dotenv};
pub use facade::{CountOnly, FacadeConfig};
