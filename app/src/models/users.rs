//! Users model
//!
//! Opts into the modelkit facade and exposes `fullName` as a virtual field
//! on every plain record.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl modelkit::Model for Entity {}
impl modelkit::ModelMut for Entity {}

impl modelkit::ToPlain for Model {
    fn virtual_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("fullName".to_string(), Value::String(self.full_name()));
        fields
    }
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl ActiveModel {
    /// A new user with every column but the id set
    pub fn new_user(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            email: Set(email.to_string()),
            ..Default::default()
        }
    }
}
