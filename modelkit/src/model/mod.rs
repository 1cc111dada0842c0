//! Model facade
//!
//! Extension traits that give any SeaORM entity a set of helper operations
//! returning plain records. Opt in per entity:
//!
//! ```rust,ignore
//! use sea_orm::entity::prelude::*;
//!
//! impl ActiveModelBehavior for ActiveModel {}
//!
//! impl modelkit::Model for Entity {}
//! impl modelkit::ModelMut for Entity {}
//! impl modelkit::ToPlain for Model {}
//! ```
//!
//! Then, anywhere with a connection or transaction:
//!
//! ```rust,ignore
//! use modelkit::{FindOptions, Model, ModelMut, Options};
//!
//! let users = users::Entity::get_all(&db, FindOptions::new()).await?;
//! let raw = users::Entity::get_by_pk(&db, 1, Options::new().raw()).await?;
//! ```
//!
//! Errors from SeaORM come back unchanged inside `ModelError::Database`.

pub mod options;
pub mod shape;


use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityName, EntityTrait,
    IdenStatic, IntoActiveModel, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter,
    TransactionTrait,
};

use crate::config::CountOnly;
use crate::error::ModelError;

pub use options::{FindOptions, FindOrCreateOptions, Options, UpdateOptions, UpsertOptions};
pub use shape::{Plain, PlainRecord, Raw, Shape, ToPlain};

/// Read operations
#[async_trait]
pub trait Model: EntityTrait {
    /// Fetch every record matching the options (all records by default)
    async fn get_all<C, S>(db: &C, options: FindOptions<Self, S>) -> Result<Vec<S::Output>, ModelError>
    where
        C: ConnectionTrait,
        S: Shape<Self::Model>,
    {
        let records = options.apply(Self::find()).all(db).await?;
        tracing::debug!(table = %table_name::<Self>(), count = records.len(), "get_all");
        S::many(records)
    }

    /// Fetch a record by primary key
    ///
    /// A key that matches nothing gives `Ok(None)`, never an error.
    async fn get_by_pk<C, K, S>(db: &C, key: K, _options: Options<S>) -> Result<Option<S::Output>, ModelError>
    where
        C: ConnectionTrait,
        K: Into<<Self::PrimaryKey as PrimaryKeyTrait>::ValueType> + Send,
        S: Shape<Self::Model>,
    {
        let record = Self::find_by_id(key).one(db).await?;
        tracing::debug!(table = %table_name::<Self>(), found = record.is_some(), "get_by_pk");
        S::optional(record)
    }

    /// Fetch the first record matching the options
    ///
    /// No match gives `Ok(None)`, never an error.
    async fn get_one<C, S>(db: &C, options: FindOptions<Self, S>) -> Result<Option<S::Output>, ModelError>
    where
        C: ConnectionTrait,
        S: Shape<Self::Model>,
    {
        let record = options.apply(Self::find()).one(db).await?;
        tracing::debug!(table = %table_name::<Self>(), found = record.is_some(), "get_one");
        S::optional(record)
    }
}

/// Write operations
///
/// Writes take the entity's `ActiveModel`: only `Set` fields are written.
#[async_trait]
pub trait ModelMut: Model
where
    Self::Model: IntoActiveModel<Self::ActiveModel>,
    Self::ActiveModel: Send + Sync,
{
    /// Insert every record, in order, inside one transaction
    ///
    /// Returns one record per input, in input order. If any insert fails
    /// nothing from the batch is kept.
    async fn bulk_insert<C, S>(
        db: &C,
        records: Vec<Self::ActiveModel>,
        _options: Options<S>,
    ) -> Result<Vec<S::Output>, ModelError>
    where
        C: ConnectionTrait + TransactionTrait,
        S: Shape<Self::Model>,
    {
        let txn = db.begin().await?;
        let mut inserted = Vec::with_capacity(records.len());
        for record in records {
            inserted.push(record.insert(&txn).await?);
        }
        txn.commit().await?;

        tracing::debug!(table = %table_name::<Self>(), count = inserted.len(), "bulk_insert");
        S::many(inserted)
    }

    /// Find the record matching `options.values`, creating it if absent
    ///
    /// The lookup and the insert share one transaction.
    async fn get_or_create<C, S>(db: &C, options: FindOrCreateOptions<Self, S>) -> Result<S::Output, ModelError>
    where
        C: ConnectionTrait + TransactionTrait,
        S: Shape<Self::Model>,
    {
        let txn = db.begin().await?;
        let found = Self::find()
            .filter(set_columns_condition::<Self>(&options.values))
            .one(&txn)
            .await?;

        let (record, created) = match found {
            Some(record) => (record, false),
            None => (options.creation_values().insert(&txn).await?, true),
        };
        txn.commit().await?;

        tracing::debug!(table = %table_name::<Self>(), created, "get_or_create");
        S::one(record)
    }

    /// Insert a single record
    async fn insert_one<C, S>(db: &C, values: Self::ActiveModel, _options: Options<S>) -> Result<S::Output, ModelError>
    where
        C: ConnectionTrait,
        S: Shape<Self::Model>,
    {
        let record = values.insert(db).await?;
        tracing::debug!(table = %table_name::<Self>(), "insert_one");
        S::one(record)
    }

    /// Update the records matching the filter and return them as updated
    ///
    /// Only the fields set on `values` change. On backends that cannot
    /// return updated rows the result follows `options.count_only`.
    async fn patch<C, S>(
        db: &C,
        values: Self::ActiveModel,
        options: UpdateOptions<S>,
    ) -> Result<Vec<S::Output>, ModelError>
    where
        C: ConnectionTrait,
        S: Shape<Self::Model>,
    {
        let update = Self::update_many().set(values).filter(options.filter);

        if db.support_returning() {
            let records = update.exec_with_returning(db).await?;
            tracing::debug!(table = %table_name::<Self>(), count = records.len(), "patch");
            return S::many(records);
        }

        let result = update.exec(db).await?;
        let table = table_name::<Self>();
        match options.count_only {
            CountOnly::Empty => Ok(Vec::new()),
            CountOnly::Warn => {
                tracing::warn!(
                    table = %table,
                    rows_affected = result.rows_affected,
                    "backend cannot return updated records; patch result is empty"
                );
                Ok(Vec::new())
            }
            CountOnly::Error => Err(ModelError::returning_unsupported(table, result.rows_affected)),
        }
    }

    /// Insert the record, or update it when it conflicts with an existing row
    ///
    /// Always returns the affected record.
    async fn up_patch<C, S>(db: &C, values: Self::ActiveModel, options: UpsertOptions<Self, S>) -> Result<S::Output, ModelError>
    where
        C: ConnectionTrait,
        S: Shape<Self::Model>,
    {
        let conflict: Vec<Self::Column> = if options.conflict.is_empty() {
            Self::PrimaryKey::iter().map(|key| key.into_column()).collect()
        } else {
            options.conflict
        };

        let mut updates: Vec<Self::Column> = Self::Column::iter()
            .filter(|column| values.get(*column).is_set())
            .filter(|column| !conflict.iter().any(|c| c.as_str() == column.as_str()))
            .collect();
        if updates.is_empty() {
            // Re-assign the target so the row still comes back
            updates = conflict.clone();
        }

        let on_conflict = OnConflict::columns(conflict)
            .update_columns(updates)
            .to_owned();

        let record = Self::insert(values)
            .on_conflict(on_conflict)
            .exec_with_returning(db)
            .await?;

        tracing::debug!(table = %table_name::<Self>(), "up_patch");
        S::one(record)
    }
}

/// `column = value` for every column set on the active model
fn set_columns_condition<E: EntityTrait>(values: &E::ActiveModel) -> Condition {
    E::Column::iter().fold(Condition::all(), |condition, column| match values.get(column) {
        ActiveValue::Set(value) | ActiveValue::Unchanged(value) => condition.add(column.eq(value)),
        ActiveValue::NotSet => condition,
    })
}

fn table_name<E: EntityName>() -> String {
    E::default().table_name().to_string()
}
