//! Demo for the modelkit facade
//!
//! Usage:
//!   app                                  - in-memory SQLite, `.env` from the current directory
//!   app --database-url sqlite://demo.db  - use a file database
//!   app --env-dir ./config               - read `.env` files from another directory
//!
//! Set `RUST_LOG=modelkit=debug` to see every facade call.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use modelkit::config::load_dotenv;
use modelkit::extend::{extend, Members, Object};
use modelkit::{
    database, DatabaseConfig, FacadeConfig, FindOptions, FindOrCreateOptions, Model, ModelMut,
    Options, UpdateOptions, UpsertOptions,
};
use sea_orm::{ActiveValue::Set, ColumnTrait, Order};
use sea_orm_migration::MigratorTrait;
use serde_json::json;
use tracing_subscriber::EnvFilter;

mod migrations;
mod models;

use migrations::Migrator;
use models::users;

#[derive(Parser, Debug)]
#[command(name = "app", about = "Run every modelkit operation against a users table")]
struct Args {
    /// Overrides DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    /// Directory holding the .env files
    #[arg(long, default_value = ".")]
    env_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let app_env = load_dotenv(&args.env_dir);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    FacadeConfig::install(FacadeConfig::from_env());

    let mut config = DatabaseConfig::from_env();
    if let Some(url) = args.database_url {
        config.url = url;
    }
    tracing::info!(env = %app_env, url = %config.url, "starting");

    let db = database::connect(&config).await?;
    Migrator::up(&db, None).await?;

    run_facade(&db).await?;
    run_extend()?;

    Ok(())
}

async fn run_facade(db: &sea_orm::DatabaseConnection) -> Result<(), Box<dyn Error>> {
    let inserted = users::Entity::bulk_insert(
        db,
        vec![
            users::ActiveModel::new_user("Ada", "Lovelace", "ada@example.com"),
            users::ActiveModel::new_user("Grace", "Hopper", "grace@example.com"),
            users::ActiveModel::new_user("Alan", "Turing", "alan@example.com"),
        ],
        Options::new(),
    )
    .await?;
    tracing::info!(count = inserted.len(), "bulk_insert");

    let all = users::Entity::get_all(
        db,
        FindOptions::new().order_by(users::Column::FirstName, Order::Asc),
    )
    .await?;
    tracing::info!(users = %json!(all), "get_all");

    let first = users::Entity::get_by_pk(db, 1, Options::new().raw()).await?;
    tracing::info!(user = ?first, "get_by_pk (raw)");

    let grace = users::Entity::get_one(
        db,
        FindOptions::new().filter(users::Column::Email.eq("grace@example.com")),
    )
    .await?;
    tracing::info!(user = ?grace, "get_one");

    let search = users::ActiveModel {
        email: Set("barbara@example.com".to_string()),
        ..Default::default()
    };
    let barbara = users::Entity::get_or_create(
        db,
        FindOrCreateOptions::new(search).defaults(users::ActiveModel::new_user(
            "Barbara",
            "Liskov",
            "barbara@example.com",
        )),
    )
    .await?;
    tracing::info!(user = %barbara, "get_or_create");

    let edsger = users::Entity::insert_one(
        db,
        users::ActiveModel::new_user("Edsger", "Dijkstra", "edsger@example.com"),
        Options::new(),
    )
    .await?;
    tracing::info!(user = %edsger, "insert_one");

    let patched = users::Entity::patch(
        db,
        users::ActiveModel {
            last_name: Set("Murray Hopper".to_string()),
            ..Default::default()
        },
        UpdateOptions::new(users::Column::Email.eq("grace@example.com")),
    )
    .await?;
    tracing::info!(users = %json!(patched), "patch");

    let upserted = users::Entity::up_patch(
        db,
        users::ActiveModel::new_user("Ada", "King", "ada@example.com"),
        UpsertOptions::new().on(users::Column::Email),
    )
    .await?;
    tracing::info!(user = %upserted, "up_patch");

    Ok(())
}

fn run_extend() -> Result<(), Box<dyn Error>> {
    let person = Object::from_members(
        Members::new()
            .value("name", json!("Peter"))
            .method("greet", |this, _| {
                let name = this.value("name").cloned().unwrap_or_default();
                Ok(json!(format!("Hello, I am {}", name.as_str().unwrap_or("nobody"))))
            }),
    );

    let mut hero = extend(
        &person,
        Members::new()
            .value("power", json!("web slinging"))
            .method("usePower", |this, _| {
                let power = this.value("power").cloned().unwrap_or_default();
                Ok(json!(format!("Using {}", power.as_str().unwrap_or("nothing"))))
            }),
    );
    hero.set("name", json!("Spider-Man"));

    tracing::info!(greeting = %hero.call("greet", &[])?, "extend");
    tracing::info!(power = %hero.call("usePower", &[])?, "extend");
    tracing::info!(name = ?person.value("name"), "base unchanged");

    Ok(())
}
