/// Builder configuration
///
/// Serializable description of `QueryOptions`, so an application can keep its
/// naming rules in a TOML file:
///
/// ```toml
/// naming = "camel_case"
/// field_prefix = "app_"
/// ```

use serde::{Deserialize, Serialize};

use crate::error::QueryResult;
use crate::naming::{camel_case, pascal_case, QueryOptions};

/// Naming convention applied to declared member names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    #[default]
    Identity,
    CamelCase,
    PascalCase,
}

impl NamingConvention {
    pub fn apply(self, name: &str) -> String {
        match self {
            NamingConvention::Identity => name.to_string(),
            NamingConvention::CamelCase => camel_case(name),
            NamingConvention::PascalCase => pascal_case(name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    pub naming: NamingConvention,
    /// Prepended to every field selected through a typed selector
    pub field_prefix: Option<String>,
}

impl BuilderConfig {
    pub fn from_toml_str(source: &str) -> QueryResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Build the options this configuration describes
    ///
    /// The prefix applies to declared fields only; bag keys get the naming
    /// convention alone.
    pub fn into_options(self) -> QueryOptions {
        let naming = self.naming;
        let mut options = QueryOptions::new();

        if naming != NamingConvention::Identity {
            options = options.with_naming_strategy(move |name| naming.apply(name));
        }

        if let Some(prefix) = self.field_prefix {
            options = options.with_formatter(move |field| format!("{}{}", prefix, naming.apply(field.name)));
        }

        options
    }
}
