/// Argument values
///
/// `Value` is the closed set of kinds the serializer knows how to render.
/// Application types opt in through `ToValue` (explicit serialization into a
/// `Value`) and, for typed bag reads, `FromValue` (checked conversion back).

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::bag::Bag;

/// A value attached to a query argument
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    String(String),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// Enumerated value, rendered by its bare symbolic name
    Enum(String),
    /// Reference to an operation variable, rendered as `$name`
    Variable(String),
    DateTime(DateTime<FixedOffset>),
    /// Single key/value pair, rendered as `key:value`
    Pair(String, Box<Value>),
    /// Ordered mapping with verbatim keys
    Map(IndexMap<String, Value>),
    List(Vec<Value>),
    /// Bag-backed object, keys pass through the naming strategy
    Bag(Bag),
    /// Plain object, keys pass through the formatter and are sorted
    Record(Record),
}

impl Value {
    /// Short name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Char(_) => "char",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Enum(_) => "enum",
            Value::Variable(_) => "variable",
            Value::DateTime(_) => "date-time",
            Value::Pair(_, _) => "pair",
            Value::Map(_) => "map",
            Value::List(_) => "list",
            Value::Bag(_) => "bag",
            Value::Record(_) => "record",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Enumerated value from its symbolic name
    pub fn enumeration(name: impl Into<String>) -> Self {
        Value::Enum(name.into())
    }

    /// Reference to the operation variable `name`
    pub fn variable(name: impl Into<String>) -> Self {
        Value::Variable(name.into())
    }

    pub fn pair(key: impl Into<String>, value: impl ToValue) -> Self {
        Value::Pair(key.into(), Box::new(value.to_value()))
    }
}

/// Explicit serialization of a plain object
///
/// Properties keep declaration order here; ordering on the wire is decided
/// by the serializer, which sorts records by their formatted keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: &'static str,
    properties: Vec<(&'static str, Value)>,
}

impl Record {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            properties: Vec::new(),
        }
    }

    pub fn with(mut self, name: &'static str, value: impl ToValue) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: &'static str, value: impl ToValue) {
        self.properties.push((name, value.to_value()));
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn properties(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.properties.iter().map(|(name, value)| (*name, value))
    }

    /// Properties holding a value, in declaration order
    pub fn present_properties(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.properties().filter(|(_, value)| !value.is_null())
    }
}

/// An argument-eligible object
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Bag(Bag),
    Record(Record),
}

/// Conversion of an application value into an argument `Value`
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Conversion of application objects into an `Object`
pub trait ToObject {
    fn to_object(&self) -> Object;
}

/// Checked conversion back from a stored `Value`
///
/// Returns `None` when the stored kind is incompatible with `Self`.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::Char(*self)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! signed_to_value {
    ($($ty:ty),*) => {
        $(impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::Int(*self as i64)
            }
        })*
    };
}

macro_rules! unsigned_to_value {
    ($($ty:ty),*) => {
        $(impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::UInt(*self as u64)
            }
        })*
    };
}

signed_to_value!(i8, i16, i32, i64, isize);
unsigned_to_value!(u8, u16, u32, u64, usize);

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        // Widen through the shortest decimal form so 0.1f32 stays 0.1
        let widened = self.to_string().parse::<f64>().unwrap_or(*self as f64);
        Value::Float(widened)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, S> ToValue for HashSet<T, S> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<K: AsRef<str>, V: ToValue> ToValue for (K, V) {
    fn to_value(&self) -> Value {
        Value::Pair(self.0.as_ref().to_string(), Box::new(self.1.to_value()))
    }
}

impl<K: AsRef<str>, V: ToValue, S> ToValue for IndexMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(key, value)| (key.as_ref().to_string(), value.to_value()))
                .collect(),
        )
    }
}

impl<K: AsRef<str>, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(key, value)| (key.as_ref().to_string(), value.to_value()))
                .collect(),
        )
    }
}

impl<K: AsRef<str>, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        // Hash order is unstable, pin it by key
        let mut entries: Vec<(String, Value)> = self
            .iter()
            .map(|(key, value)| (key.as_ref().to_string(), value.to_value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Value::Map(entries.into_iter().collect())
    }
}

impl<Tz: TimeZone> ToValue for DateTime<Tz> {
    fn to_value(&self) -> Value {
        Value::DateTime(self.with_timezone(&self.offset().fix()))
    }
}

impl ToValue for JsonValue {
    fn to_value(&self) -> Value {
        match self {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Array(items) => Value::List(items.iter().map(ToValue::to_value).collect()),
            JsonValue::Object(map) => Value::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_value()))
                    .collect(),
            ),
        }
    }
}

impl ToValue for Bag {
    fn to_value(&self) -> Value {
        Value::Bag(self.clone())
    }
}

impl ToValue for Record {
    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl ToValue for Object {
    fn to_value(&self) -> Value {
        match self {
            Object::Bag(bag) => Value::Bag(bag.clone()),
            Object::Record(record) => Value::Record(record.clone()),
        }
    }
}

impl ToObject for Bag {
    fn to_object(&self) -> Object {
        Object::Bag(self.clone())
    }
}

impl ToObject for Record {
    fn to_object(&self) -> Object {
        Object::Record(self.clone())
    }
}

impl<T: ToObject + ?Sized> ToObject for &T {
    fn to_object(&self) -> Object {
        (**self).to_object()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Char(c) => Some(c.to_string()),
            _ => None,
        }
    }
}

impl FromValue for char {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Char(c) => Some(*c),
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

macro_rules! integer_from_value {
    ($($ty:ty),*) => {
        $(impl FromValue for $ty {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Int(i) => <$ty>::try_from(*i).ok(),
                    Value::UInt(u) => <$ty>::try_from(*u).ok(),
                    _ => None,
                }
            }
        })*
    };
}

integer_from_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::UInt(u) => Some(*u as f64),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for IndexMap<String, T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Map(map) => map
                .iter()
                .map(|(key, value)| T::from_value(value).map(|v| (key.clone(), v)))
                .collect(),
            Value::Bag(bag) => bag
                .iter()
                .map(|(key, value)| T::from_value(value).map(|v| (key.to_string(), v)))
                .collect(),
            _ => None,
        }
    }
}

impl FromValue for Bag {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bag(bag) => Some(bag.clone()),
            Value::Map(map) => Some(map.iter().collect()),
            _ => None,
        }
    }
}

impl FromValue for DateTime<FixedOffset> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::DateTime(dt) => Some(*dt),
            Value::String(s) => DateTime::parse_from_rfc3339(s).ok(),
            _ => None,
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Option<Self> {
        DateTime::<FixedOffset>::from_value(value).map(|dt| dt.with_timezone(&Utc))
    }
}
