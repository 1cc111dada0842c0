//! Layered object extension
//!
//! [`extend`] builds a new [`Object`] on top of an existing one without
//! touching it. The result has a fresh own layer holding the additions, in
//! front of a frozen snapshot of the base's own members, in front of the
//! base's original prototype chain. Writes only ever land in the own layer
//! of the object they are made on.
//!
//! # Example
//!
//! ```rust
//! use modelkit::extend::{extend, Members, Object};
//! use serde_json::json;
//!
//! let person = Object::from_members(
//!     Members::new()
//!         .value("name", json!("Ada"))
//!         .method("greet", |this, _| {
//!             let name = this.value("name").cloned().unwrap_or_default();
//!             Ok(json!(format!("hi {}", name.as_str().unwrap_or(""))))
//!         }),
//! );
//!
//! let mut admin = extend(&person, Members::new().value("role", json!("admin")));
//! admin.set("name", json!("Grace"));
//!
//! assert_eq!(admin.call("greet", &[]).unwrap(), json!("hi Grace"));
//! assert_eq!(person.value("name"), Some(&json!("Ada")));
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ExtendError;

/// A callable member. `this` is the object the call was made on.
pub type Method = Arc<dyn Fn(&mut Object, &[Value]) -> Result<Value, ExtendError> + Send + Sync>;

/// A named member of an object layer
#[derive(Clone)]
pub enum Member {
    /// Plain data
    Value(Value),
    /// Behavior resolved against the invoking object
    Method(Method),
}

impl Member {
    /// The data held by this member, if it is not a method
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Method(_) => None,
        }
    }

    /// Check if this member is callable
    pub fn is_method(&self) -> bool {
        matches!(self, Self::Method(_))
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Method(_) => f.write_str("Method(..)"),
        }
    }
}

/// Ordered set of named members used to build or extend an object
///
/// Defining the same name twice keeps the last definition.
#[derive(Clone, Debug, Default)]
pub struct Members {
    entries: Vec<(String, Member)>,
}

impl Members {
    /// Create an empty set of members
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a data member
    pub fn value(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.member(name, Member::Value(value.into()))
    }

    /// Add a method member
    pub fn method<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Object, &[Value]) -> Result<Value, ExtendError> + Send + Sync + 'static,
    {
        self.member(name, Member::Method(Arc::new(f)))
    }

    /// Add an already-built member
    pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
        let name = name.into();
        self.entries.retain(|(n, _)| *n != name);
        self.entries.push((name, member));
        self
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no members
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A capability record: an own layer of members plus a frozen prototype
#[derive(Clone, Debug, Default)]
pub struct Object {
    own: Vec<(String, Member)>,
    prototype: Option<Arc<Object>>,
}

impl Object {
    /// Create an object with no members and no prototype
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an object whose own layer holds `members`
    pub fn from_members(members: Members) -> Self {
        Self {
            own: members.entries,
            prototype: None,
        }
    }

    /// Create an empty object that falls back to `prototype` for lookups
    pub fn with_prototype(prototype: Object) -> Self {
        Self {
            own: Vec::new(),
            prototype: Some(Arc::new(prototype)),
        }
    }

    /// Resolve a member, newest layer first
    pub fn get(&self, name: &str) -> Option<&Member> {
        let mut layer = Some(self);
        while let Some(object) = layer {
            if let Some(member) = object.own_member(name) {
                return Some(member);
            }
            layer = object.prototype.as_deref();
        }
        None
    }

    /// Resolve a data member
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Member::as_value)
    }

    /// Check if any layer defines `name`
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Check if the own layer defines `name`
    pub fn has_own(&self, name: &str) -> bool {
        self.own_member(name).is_some()
    }

    /// All reachable member names, newest layer first, each listed once
    pub fn names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut names = Vec::new();
        let mut layer = Some(self);
        while let Some(object) = layer {
            for (name, _) in &object.own {
                if seen.insert(name.as_str()) {
                    names.push(name.clone());
                }
            }
            layer = object.prototype.as_deref();
        }
        names
    }

    /// Write a data member into the own layer
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.define(name, Member::Value(value.into()));
    }

    /// Write any member into the own layer, shadowing inherited ones
    pub fn define(&mut self, name: impl Into<String>, member: Member) {
        let name = name.into();
        match self.own.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = member,
            None => self.own.push((name, member)),
        }
    }

    /// Invoke a method with `this` bound to this object
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, ExtendError> {
        let method = match self.get(name) {
            Some(Member::Method(m)) => Arc::clone(m),
            Some(Member::Value(_)) => return Err(ExtendError::NotCallable(name.to_string())),
            None => return Err(ExtendError::Missing(name.to_string())),
        };
        method(self, args)
    }

    fn own_member(&self, name: &str) -> Option<&Member> {
        self.own.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }
}

/// Derive a new object from `base` with `additions` layered on top
///
/// `base` is not modified, and later writes to the result are never
/// visible through `base`. The result can itself be passed back in as a
/// base.
pub fn extend(base: &Object, additions: Members) -> Object {
    let snapshot = Object {
        own: base.own.clone(),
        prototype: base.prototype.clone(),
    };

    Object {
        own: additions.entries,
        prototype: Some(Arc::new(snapshot)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn string_arg(name: &str, args: &[Value]) -> Result<Value, ExtendError> {
        match args.first() {
            Some(Value::String(s)) => Ok(Value::String(s.clone())),
            _ => Err(ExtendError::invalid_argument(name, "expected a string")),
        }
    }

    fn full_name(this: &mut Object, _: &[Value]) -> Result<Value, ExtendError> {
        let part = |key: &str| {
            this.value(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Ok(json!(format!("{} {}", part("name"), part("surname"))))
    }

    /// A person whose behavior lives on a shared prototype layer
    fn person(surname: &str) -> Object {
        let prototype = Object::from_members(
            Members::new()
                .method("getFullName", full_name)
                .method("setName", |this, args| {
                    let name = string_arg("setName", args)?;
                    this.set("name", name);
                    Ok(Value::Null)
                }),
        );

        let mut person = Object::with_prototype(prototype);
        person.set("name", "Shikuvlue");
        person.set("surname", surname);
        person
    }

    #[test]
    fn test_extend_clones_and_isolates() {
        let person = person("Tomanga");
        let mut person_pro = extend(&person, Members::new());

        assert_eq!(
            person.clone().call("getFullName", &[]).unwrap(),
            person_pro.call("getFullName", &[]).unwrap()
        );

        person_pro.call("setName", &[json!("Jonas")]).unwrap();
        assert_eq!(person_pro.call("getFullName", &[]).unwrap(), json!("Jonas Tomanga"));
        assert_eq!(
            person.clone().call("getFullName", &[]).unwrap(),
            json!("Shikuvlue Tomanga")
        );
        assert!(!person.has_own("role"));
    }

    #[test]
    fn test_extend_layers_compose() {
        let person = person("Tomanga");
        let mut person_pro = extend(&person, Members::new());
        person_pro.call("setName", &[json!("Jonas")]).unwrap();

        let mut super_hero = extend(
            &person_pro,
            Members::new().method("setLastName", |this, args| {
                let surname = string_arg("setLastName", args)?;
                this.set("surname", surname);
                Ok(Value::Null)
            }),
        );

        assert_eq!(super_hero.value("name"), person_pro.value("name"));
        super_hero.call("setLastName", &[json!("Kapindo")]).unwrap();
        assert_eq!(super_hero.call("getFullName", &[]).unwrap(), json!("Jonas Kapindo"));
        assert_eq!(person_pro.call("getFullName", &[]).unwrap(), json!("Jonas Tomanga"));
        assert!(!person_pro.has("setLastName"));
    }

    #[test]
    fn test_newest_layer_wins() {
        let base = Object::from_members(Members::new().value("level", 0).value("kind", "base"));
        let first = extend(&base, Members::new().value("level", 1));
        let second = extend(&first, Members::new().value("level", 2).value("extra", true));

        assert_eq!(second.value("level"), Some(&json!(2)));
        assert_eq!(first.value("level"), Some(&json!(1)));
        assert_eq!(base.value("level"), Some(&json!(0)));
        assert_eq!(second.value("kind"), Some(&json!("base")));
        assert_eq!(second.names(), vec!["level", "extra", "kind"]);
    }

    #[test]
    fn test_additions_shadow_methods() {
        let base = Object::from_members(
            Members::new().method("describe", |_, _| Ok(json!("base"))),
        );
        let mut derived = extend(
            &base,
            Members::new().method("describe", |_, _| Ok(json!("derived"))),
        );

        assert_eq!(derived.call("describe", &[]).unwrap(), json!("derived"));
        assert_eq!(base.clone().call("describe", &[]).unwrap(), json!("base"));
    }

    #[test]
    fn test_base_writes_after_extend_stay_out_of_the_snapshot() {
        let mut base = Object::from_members(Members::new().value("count", 1));
        let derived = extend(&base, Members::new());

        base.set("count", 5);
        assert_eq!(derived.value("count"), Some(&json!(1)));
    }

    #[test]
    fn test_call_errors() {
        let mut object = person("Tomanga");

        assert_eq!(
            object.call("fly", &[]),
            Err(ExtendError::Missing("fly".to_string()))
        );
        assert_eq!(
            object.call("name", &[]),
            Err(ExtendError::NotCallable("name".to_string()))
        );
        assert_eq!(
            object.call("setName", &[json!(42)]),
            Err(ExtendError::invalid_argument("setName", "expected a string"))
        );
    }

    #[test]
    fn test_members_keep_last_definition() {
        let members = Members::new().value("a", 1).value("b", 2).value("a", 3);
        assert_eq!(members.len(), 2);

        let object = Object::from_members(members);
        assert_eq!(object.value("a"), Some(&json!(3)));
        assert_eq!(object.names(), vec!["b", "a"]);
    }
}
