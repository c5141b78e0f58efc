/// Dynamic property bag
///
/// An ordered string-keyed store of `Value`s. It is both the backing store of
/// schema-shaped types generated by `#[graphql_object]` and a stand-alone
/// container for ad-hoc argument objects. Reads of absent keys return `None`.

use indexmap::map::{IndexMap, IntoIter};

use crate::error::{QueryError, QueryResult};
use crate::value::{FromValue, Object, ToObject, ToValue, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bag {
    properties: IndexMap<String, Value>,
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the properties of an object into a new bag
    ///
    /// Record properties that are absent are copied as `Value::Null`.
    pub fn from_object(object: &impl ToObject) -> Self {
        match object.to_object() {
            Object::Bag(bag) => bag,
            Object::Record(record) => record
                .properties()
                .map(|(name, value)| (name, value.clone()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Typed read; `Ok(None)` when the key is absent
    pub fn get_property<T: FromValue>(&self, key: &str) -> QueryResult<Option<T>> {
        match self.properties.get(key) {
            None => Ok(None),
            Some(value) => T::from_value(value).map(Some).ok_or_else(|| {
                QueryError::TypeMismatch {
                    key: key.to_string(),
                    expected: std::any::type_name::<T>(),
                    actual: value.kind(),
                }
            }),
        }
    }

    /// Insert or overwrite; an existing key keeps its position
    pub fn set(&mut self, key: impl Into<String>, value: impl ToValue) {
        self.properties.insert(key.into(), value.to_value());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.properties.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn to_map(&self) -> IndexMap<String, Value> {
        self.properties.clone()
    }

    pub fn into_map(self) -> IndexMap<String, Value> {
        self.properties
    }
}

impl<K: Into<String>, V: ToValue> FromIterator<(K, V)> for Bag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Bag::new();
        for (key, value) in iter {
            bag.set(key, value);
        }
        bag
    }
}

impl From<IndexMap<String, Value>> for Bag {
    fn from(properties: IndexMap<String, Value>) -> Self {
        Self { properties }
    }
}

impl IntoIterator for Bag {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Record;

    #[test]
    fn test_absent_key_is_none() {
        let bag = Bag::new().with("from", 1);
        assert!(bag.get("to").is_none());
        assert_eq!(bag.get_property::<i32>("to").unwrap(), None);
    }

    #[test]
    fn test_typed_read() {
        let bag = Bag::new().with("from", 1).with("name", "Bee");
        assert_eq!(bag.get_property::<i64>("from").unwrap(), Some(1));
        assert_eq!(bag.get_property::<String>("name").unwrap(), Some("Bee".to_string()));

        let err = bag.get_property::<bool>("name").unwrap_err();
        match err {
            QueryError::TypeMismatch { key, actual, .. } => {
                assert_eq!(key, "name");
                assert_eq!(actual, "string");
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_insertion_order_survives_overwrite() {
        let mut bag = Bag::new().with("to", 100).with("from", 1);
        bag.set("to", 200);

        let keys: Vec<&str> = bag.keys().collect();
        assert_eq!(keys, vec!["to", "from"]);
        assert_eq!(bag.get("to"), Some(&Value::Int(200)));
    }

    #[test]
    fn test_from_object() {
        let record = Record::new("Page").with("from", 1).with("to", 100);
        let bag = Bag::from_object(&record);
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.get_property::<i32>("to").unwrap(), Some(100));

        let copy = Bag::from_object(&bag);
        assert_eq!(copy, bag);
    }
}
