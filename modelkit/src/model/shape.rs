//! Result normalization
//!
//! Facade operations return either plain records or the ORM's own values.
//! Which one is decided per call by a type-level marker carried in the
//! options: [`Plain`] (the default) or [`Raw`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ModelError;

/// An inert record: field values plus virtual fields, no behavior
pub type PlainRecord = Value;

/// Conversion of a hydrated record into its plain shape
///
/// The default conversion serializes the model with `serde` and then merges
/// in [`virtual_fields`](ToPlain::virtual_fields). Opt in with an empty impl,
/// or override `virtual_fields` to expose computed values.
///
/// # Example
///
/// ```rust,ignore
/// impl modelkit::ToPlain for Model {
///     fn virtual_fields(&self) -> serde_json::Map<String, serde_json::Value> {
///         let mut fields = serde_json::Map::new();
///         fields.insert(
///             "fullName".into(),
///             format!("{} {}", self.first_name, self.last_name).into(),
///         );
///         fields
///     }
/// }
/// ```
pub trait ToPlain: Serialize + Send {
    /// Convert to a plain record
    fn to_plain(&self) -> Result<PlainRecord, ModelError> {
        let mut plain = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut plain {
            fields.extend(self.virtual_fields());
        }
        Ok(plain)
    }

    /// Computed fields added to the plain shape
    fn virtual_fields(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// How a facade operation shapes the records it got back from SeaORM
pub trait Shape<M>: Send + Sync + 'static {
    /// What a single record becomes
    type Output: Send;

    /// Shape one record
    fn one(record: M) -> Result<Self::Output, ModelError>;

    /// Shape a record that may be absent; `None` stays `None`
    fn optional(record: Option<M>) -> Result<Option<Self::Output>, ModelError> {
        record.map(Self::one).transpose()
    }

    /// Shape a collection, preserving order and cardinality
    fn many(records: Vec<M>) -> Result<Vec<Self::Output>, ModelError> {
        records.into_iter().map(Self::one).collect()
    }
}

/// Convert every record with [`ToPlain`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plain;

/// Return SeaORM's values unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Raw;

impl<M: ToPlain + 'static> Shape<M> for Plain {
    type Output = PlainRecord;

    fn one(record: M) -> Result<PlainRecord, ModelError> {
        record.to_plain()
    }
}

impl<M: Send + 'static> Shape<M> for Raw {
    type Output = M;

    fn one(record: M) -> Result<M, ModelError> {
        Ok(record)
    }

    fn many(records: Vec<M>) -> Result<Vec<M>, ModelError> {
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Person {
        first_name: String,
        last_name: String,
    }

    impl ToPlain for Person {
        fn virtual_fields(&self) -> Map<String, Value> {
            let mut fields = Map::new();
            fields.insert(
                "fullName".to_string(),
                json!(format!("{} {}", self.first_name, self.last_name)),
            );
            fields
        }
    }

    #[derive(Debug, Serialize)]
    struct Tag(String);

    impl ToPlain for Tag {}

    fn person(first: &str, last: &str) -> Person {
        Person {
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    #[test]
    fn test_plain_merges_virtual_fields() {
        let plain = <Plain as Shape<Person>>::one(person("Shikuvule", "Indaba")).unwrap();
        assert_eq!(
            plain,
            json!({
                "firstName": "Shikuvule",
                "lastName": "Indaba",
                "fullName": "Shikuvule Indaba",
            })
        );
    }

    #[test]
    fn test_plain_non_object_ignores_virtual_fields() {
        let plain = <Plain as Shape<Tag>>::one(Tag("admin".to_string())).unwrap();
        assert_eq!(plain, json!("admin"));
    }

    #[test]
    fn test_many_preserves_order() {
        let people = vec![person("A", "One"), person("B", "Two"), person("C", "Three")];
        let plain = <Plain as Shape<Person>>::many(people).unwrap();

        let names: Vec<_> = plain.iter().map(|p| p["fullName"].clone()).collect();
        assert_eq!(names, vec![json!("A One"), json!("B Two"), json!("C Three")]);
        assert!(<Plain as Shape<Person>>::many(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_optional_none_stays_none() {
        assert_eq!(<Plain as Shape<Person>>::optional(None).unwrap(), None);
        assert_eq!(<Raw as Shape<Person>>::optional(None).unwrap(), None);
    }

    #[test]
    fn test_raw_passes_through() {
        let people = vec![person("A", "One"), person("B", "Two")];
        let raw = <Raw as Shape<Person>>::many(people.clone()).unwrap();
        assert_eq!(raw, people);

        let one = <Raw as Shape<Person>>::optional(Some(person("C", "Three"))).unwrap();
        assert_eq!(one, Some(person("C", "Three")));
    }
}
