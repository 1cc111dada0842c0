//! Per-call options for the facade operations
//!
//! Every builder starts in plain mode. Calling `.raw()` switches the shape
//! marker to [`Raw`], which changes the operation's return type to the
//! entity's own `Model`.

use std::fmt;
use std::marker::PhantomData;

use sea_orm::sea_query::IntoCondition;
use sea_orm::{ActiveModelTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select};

use crate::config::{CountOnly, FacadeConfig};
use crate::model::shape::{Plain, Raw};

/// Options for operations that only choose the result shape
///
/// Used by `get_by_pk`, `insert_one` and `bulk_insert`.
pub struct Options<S = Plain> {
    _shape: PhantomData<fn() -> S>,
}

impl Options<Plain> {
    pub fn new() -> Self {
        Self {
            _shape: PhantomData,
        }
    }
}

impl Default for Options<Plain> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Options<S> {
    /// Return SeaORM's values unchanged
    pub fn raw(self) -> Options<Raw> {
        Options {
            _shape: PhantomData,
        }
    }
}

impl<S> fmt::Debug for Options<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("shape", &std::any::type_name::<S>())
            .finish()
    }
}

/// Query options for `get_all` and `get_one`
///
/// Filters added with [`filter`](FindOptions::filter) are combined with AND.
/// No filter matches every row.
pub struct FindOptions<E: EntityTrait, S = Plain> {
    filter: Condition,
    order: Vec<(E::Column, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
    _shape: PhantomData<fn() -> S>,
}

impl<E: EntityTrait> FindOptions<E, Plain> {
    pub fn new() -> Self {
        Self {
            filter: Condition::all(),
            order: Vec::new(),
            limit: None,
            offset: None,
            _shape: PhantomData,
        }
    }
}

impl<E: EntityTrait> Default for FindOptions<E, Plain> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait, S> FindOptions<E, S> {
    /// Add a condition, e.g. `users::Column::FirstName.eq("Ada")`
    pub fn filter(mut self, condition: impl IntoCondition) -> Self {
        self.filter = self.filter.add(condition.into_condition());
        self
    }

    pub fn order_by(mut self, column: E::Column, order: Order) -> Self {
        self.order.push((column, order));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Return SeaORM's values unchanged
    pub fn raw(self) -> FindOptions<E, Raw> {
        FindOptions {
            filter: self.filter,
            order: self.order,
            limit: self.limit,
            offset: self.offset,
            _shape: PhantomData,
        }
    }

    pub(crate) fn apply(self, select: Select<E>) -> Select<E> {
        let mut select = select.filter(self.filter);
        for (column, order) in self.order {
            select = select.order_by(column, order);
        }
        if let Some(limit) = self.limit {
            select = select.limit(limit);
        }
        if let Some(offset) = self.offset {
            select = select.offset(offset);
        }
        select
    }
}

impl<E: EntityTrait, S> fmt::Debug for FindOptions<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindOptions")
            .field("filter", &self.filter)
            .field("order", &self.order)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("shape", &std::any::type_name::<S>())
            .finish()
    }
}

/// Options for `get_or_create`
///
/// Every column set on `values` is part of the search; when nothing
/// matches, `values` merged with `defaults` is inserted.
pub struct FindOrCreateOptions<E: EntityTrait, S = Plain> {
    pub(crate) values: E::ActiveModel,
    pub(crate) defaults: Option<E::ActiveModel>,
    _shape: PhantomData<fn() -> S>,
}

impl<E: EntityTrait> FindOrCreateOptions<E, Plain> {
    pub fn new(values: E::ActiveModel) -> Self {
        Self {
            values,
            defaults: None,
            _shape: PhantomData,
        }
    }
}

impl<E: EntityTrait, S> FindOrCreateOptions<E, S> {
    /// Extra values written only when the record has to be created
    pub fn defaults(mut self, defaults: E::ActiveModel) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Return SeaORM's value unchanged
    pub fn raw(self) -> FindOrCreateOptions<E, Raw> {
        FindOrCreateOptions {
            values: self.values,
            defaults: self.defaults,
            _shape: PhantomData,
        }
    }

    /// Values to insert when nothing matches: `values` wins over `defaults`
    pub(crate) fn creation_values(&self) -> E::ActiveModel {
        let mut values = self.values.clone();
        if let Some(defaults) = &self.defaults {
            for column in <E::Column as sea_orm::Iterable>::iter() {
                if values.get(column).is_set() {
                    continue;
                }
                if let sea_orm::ActiveValue::Set(value) = defaults.get(column) {
                    values.set(column, value);
                }
            }
        }
        values
    }
}

impl<E: EntityTrait, S> fmt::Debug for FindOrCreateOptions<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindOrCreateOptions")
            .field("values", &self.values)
            .field("defaults", &self.defaults)
            .field("shape", &std::any::type_name::<S>())
            .finish()
    }
}

/// Options for `patch`
///
/// A filter is required; pass `Condition::all()` to update every row.
pub struct UpdateOptions<S = Plain> {
    pub(crate) filter: Condition,
    pub(crate) count_only: CountOnly,
    _shape: PhantomData<fn() -> S>,
}

impl UpdateOptions<Plain> {
    /// Update the rows matching `filter`
    ///
    /// The count-only policy starts from [`FacadeConfig::current`].
    pub fn new(filter: impl IntoCondition) -> Self {
        Self {
            filter: filter.into_condition(),
            count_only: FacadeConfig::current().count_only,
            _shape: PhantomData,
        }
    }
}

impl<S> UpdateOptions<S> {
    /// What to do when the backend only reports a row count
    pub fn count_only(mut self, policy: CountOnly) -> Self {
        self.count_only = policy;
        self
    }

    /// Return SeaORM's values unchanged
    pub fn raw(self) -> UpdateOptions<Raw> {
        UpdateOptions {
            filter: self.filter,
            count_only: self.count_only,
            _shape: PhantomData,
        }
    }
}

impl<S> fmt::Debug for UpdateOptions<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateOptions")
            .field("filter", &self.filter)
            .field("count_only", &self.count_only)
            .field("shape", &std::any::type_name::<S>())
            .finish()
    }
}

/// Options for `up_patch`
///
/// The conflict target is the primary key unless columns are given with
/// [`on`](UpsertOptions::on).
pub struct UpsertOptions<E: EntityTrait, S = Plain> {
    pub(crate) conflict: Vec<E::Column>,
    _shape: PhantomData<fn() -> S>,
}

impl<E: EntityTrait> UpsertOptions<E, Plain> {
    pub fn new() -> Self {
        Self {
            conflict: Vec::new(),
            _shape: PhantomData,
        }
    }
}

impl<E: EntityTrait> Default for UpsertOptions<E, Plain> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait, S> UpsertOptions<E, S> {
    /// Add a column to the conflict target (must be covered by a unique index)
    pub fn on(mut self, column: E::Column) -> Self {
        self.conflict.push(column);
        self
    }

    /// Return SeaORM's value unchanged
    pub fn raw(self) -> UpsertOptions<E, Raw> {
        UpsertOptions {
            conflict: self.conflict,
            _shape: PhantomData,
        }
    }
}

impl<E: EntityTrait, S> fmt::Debug for UpsertOptions<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpsertOptions")
            .field("conflict", &self.conflict)
            .field("shape", &std::any::type_name::<S>())
            .finish()
    }
}
