/// Naming strategies and per-builder options
///
/// A query node turns declared member names into wire names through two
/// optional hooks: a `Formatter`, which sees the full field descriptor
/// (name and owning type), and a `NamingStrategy`, a plain string transform.
/// The formatter wins when both are configured. Options are plain values
/// handed to the root node and cloned into every sub-node it creates.

use std::fmt;
use std::sync::Arc;

use crate::schema::FieldDescriptor;

/// Shared `string -> string` key transform
pub type NamingStrategy = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Shared `(name, owner) -> string` field transform
pub type Formatter = Arc<dyn Fn(&FieldDescriptor) -> String + Send + Sync>;

/// Lowercase the first character, keep the rest
pub fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first character, keep the rest
pub fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builder configuration inherited by sub-nodes
#[derive(Clone, Default)]
pub struct QueryOptions {
    pub formatter: Option<Formatter>,
    pub naming_strategy: Option<NamingStrategy>,
}

impl QueryOptions {
    /// Options that keep declared names unchanged
    pub fn new() -> Self {
        Self::default()
    }

    /// Options using `camel_case` as naming strategy
    pub fn camel_case() -> Self {
        Self::new().with_naming_strategy(camel_case)
    }

    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&FieldDescriptor) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    pub fn with_naming_strategy<F>(mut self, strategy: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.naming_strategy = Some(Arc::new(strategy));
        self
    }

    /// Wire name of a declared field: formatter, then naming strategy, then identity
    pub fn format_field(&self, field: &FieldDescriptor) -> String {
        match (&self.formatter, &self.naming_strategy) {
            (Some(formatter), _) => formatter(field),
            (None, Some(strategy)) => strategy(field.name),
            (None, None) => field.name.to_string(),
        }
    }

    /// Wire name of a bag key: naming strategy, then identity
    pub fn format_key(&self, key: &str) -> String {
        match &self.naming_strategy {
            Some(strategy) => strategy(key),
            None => key.to_string(),
        }
    }
}

impl fmt::Debug for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("formatter", &self.formatter.is_some())
            .field("naming_strategy", &self.naming_strategy.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("Name"), "name");
        assert_eq!(camel_case("URL"), "uRL");
        assert_eq!(camel_case("already"), "already");
        assert_eq!(camel_case(""), "");
        assert_eq!(pascal_case("color"), "Color");
    }

    #[test]
    fn test_format_field_precedence() {
        let field = FieldDescriptor::new("Price", "Car");

        assert_eq!(QueryOptions::new().format_field(&field), "Price");
        assert_eq!(QueryOptions::camel_case().format_field(&field), "price");

        let options = QueryOptions::camel_case()
            .with_formatter(|field| format!("{}_{}", field.owner.to_lowercase(), field.name));
        assert_eq!(options.format_field(&field), "car_Price");
    }

    #[test]
    fn test_format_key_ignores_formatter() {
        let options = QueryOptions::new().with_formatter(|_| "ignored".to_string());
        assert_eq!(options.format_key("From"), "From");

        let options = options.with_naming_strategy(camel_case);
        assert_eq!(options.format_key("From"), "from");
    }
}
