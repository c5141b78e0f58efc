/// Query serializer
///
/// Renders a `QueryNode` tree into query text:
///
/// ```text
/// [alias:]name[(key:value,...)][{field sub{...} ... on Type{...}}]
/// ```
///
/// Every node renders to its own `String`; parents concatenate the text of
/// their children, so no buffer is shared across a render.

use chrono::SecondsFormat;
use tracing::{debug, trace};

use crate::error::{QueryError, QueryResult};
use crate::naming::QueryOptions;
use crate::query::{QueryNode, Selection};
use crate::schema::FieldDescriptor;
use crate::value::{Record, Value};

pub struct QuerySerializer<'a> {
    options: &'a QueryOptions,
}

impl<'a> QuerySerializer<'a> {
    pub fn new(options: &'a QueryOptions) -> Self {
        Self { options }
    }

    /// Render one node and its descendants
    pub fn render(&self, node: &QueryNode) -> QueryResult<String> {
        trace!(name = node.name(), type_name = node.type_name(), "rendering query node");

        let mut text = String::new();

        if let Some(alias) = node.alias_name() {
            text.push_str(alias);
            text.push(':');
        }

        text.push_str(node.name());

        if let Some(arguments) = self.render_arguments(node)? {
            text.push('(');
            text.push_str(&arguments);
            text.push(')');
        }

        if !node.select_list().is_empty() || !node.possible_types_list().is_empty() {
            text.push('{');
            text.push_str(&self.render_fields(node.select_list())?);
            text.push_str(&self.render_possible_types(node.possible_types_list())?);
            text.push('}');
        }

        Ok(text)
    }

    /// `None` when no argument holds a value
    ///
    /// Absent arguments are skipped, so a node whose arguments are all absent
    /// renders without `()` rather than with an empty list.
    fn render_arguments(&self, node: &QueryNode) -> QueryResult<Option<String>> {
        let mut rendered = Vec::with_capacity(node.arguments().len());

        for (key, value) in node.arguments() {
            if value.is_null() {
                continue;
            }
            rendered.push(format!("{}:{}", key, self.format_value(value)?));
        }

        if rendered.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rendered.join(",")))
        }
    }

    fn render_fields(&self, select_list: &[Selection]) -> QueryResult<String> {
        let fields = select_list
            .iter()
            .map(|selection| match selection {
                Selection::Field(name) => Ok(name.clone()),
                Selection::Node(child) => render_child(child),
            })
            .collect::<QueryResult<Vec<_>>>()?;

        Ok(fields.join(" "))
    }

    fn render_possible_types(&self, possible_types: &[Selection]) -> QueryResult<String> {
        let mut text = String::new();

        for selection in possible_types {
            match selection {
                Selection::Field(type_name) => {
                    text.push_str(" ... on ");
                    text.push_str(type_name);
                    text.push(' ');
                }
                Selection::Node(child) => {
                    text.push_str(" ... on ");
                    text.push_str(&render_child(child)?);
                }
            }
        }

        Ok(text)
    }

    /// Render an argument value
    ///
    /// Records are rendered with their present properties sorted by formatted
    /// key; bags keep insertion order.
    pub fn format_value(&self, value: &Value) -> QueryResult<String> {
        match value {
            Value::Null => {
                debug!("absent value reached the value formatter");
                Err(QueryError::ArgumentValueRequired)
            }
            Value::String(s) => Ok(quote(s)),
            Value::Char(c) => Ok(quote(&c.to_string())),
            Value::Int(i) => Ok(i.to_string()),
            Value::UInt(u) => Ok(u.to_string()),
            Value::Float(f) => {
                if f.is_finite() {
                    Ok(f.to_string())
                } else {
                    Err(QueryError::unsupported_value(format!("non-finite float {}", f)))
                }
            }
            Value::Bool(b) => Ok(if *b { "true" } else { "false" }.to_string()),
            Value::Enum(name) => Ok(name.clone()),
            Value::Variable(name) => Ok(format!("${}", name)),
            Value::DateTime(dt) => {
                let text = dt.to_rfc3339_opts(SecondsFormat::AutoSi, true);
                self.format_value(&Value::String(text))
            }
            Value::Pair(key, value) => Ok(format!("{}:{}", key, self.format_value(value)?)),
            Value::Map(map) => self.format_entries(map.iter().map(|(key, value)| (key.clone(), value))),
            Value::List(items) => {
                let items = items
                    .iter()
                    .map(|item| self.format_value(item))
                    .collect::<QueryResult<Vec<_>>>()?;
                Ok(format!("[{}]", items.join(",")))
            }
            Value::Bag(bag) => {
                self.format_entries(bag.iter().map(|(key, value)| (self.options.format_key(key), value)))
            }
            Value::Record(record) => self.format_entries(self.record_entries(record)),
        }
    }

    fn record_entries<'v>(&self, record: &'v Record) -> Vec<(String, &'v Value)> {
        let mut entries: Vec<(String, &Value)> = record
            .present_properties()
            .map(|(name, value)| {
                let key = match &self.options.formatter {
                    Some(formatter) => formatter(&FieldDescriptor::new(name, record.type_name())),
                    None => name.to_string(),
                };
                (key, value)
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    fn format_entries<'v>(
        &self,
        entries: impl IntoIterator<Item = (String, &'v Value)>,
    ) -> QueryResult<String> {
        let entries = entries
            .into_iter()
            .map(|(key, value)| Ok(format!("{}:{}", key, self.format_value(value)?)))
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(format!("{{{}}}", entries.join(",")))
    }
}

fn render_child(child: &QueryNode) -> QueryResult<String> {
    QuerySerializer::new(child.options()).render(child)
}

/// Quote a string literal; backslashes are escaped before quotes
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
