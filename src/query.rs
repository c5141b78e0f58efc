/// Query node - the fluent builder
///
/// A `Query<T>` describes one selection level of a request against the
/// schema-shaped type `T`: its name and optional alias, the ordered selection
/// list, the ordered possible-type fragments and the ordered argument map.
/// Builder calls consume and return the node so they chain; calls that can
/// fail (selector resolution, sub-query construction) return `QueryResult`.
///
/// Nested levels are stored type-erased as `QueryNode`s, which is also what
/// the serializer walks.

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use tracing::debug;

use crate::collection::CollectionQuery;
use crate::error::{QueryError, QueryResult};
use crate::naming::QueryOptions;
use crate::resolver;
use crate::schema::{BagBacked, Collection, Field, FieldDescriptor, Schema};
use crate::serializer::QuerySerializer;
use crate::value::{Object, ToObject, ToValue, Value};

/// One entry of a selection or possible-types list
#[derive(Debug, Clone)]
pub enum Selection {
    /// Scalar field, or possible type without sub-selection
    Field(String),
    /// Nested selection level
    Node(QueryNode),
}

impl Selection {
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Selection::Field(name) => Some(name),
            Selection::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&QueryNode> {
        match self {
            Selection::Field(_) => None,
            Selection::Node(node) => Some(node),
        }
    }
}

impl PartialEq<&str> for Selection {
    fn eq(&self, other: &&str) -> bool {
        self.as_field() == Some(*other)
    }
}

/// Type-erased selection level
#[derive(Debug, Clone)]
pub struct QueryNode {
    name: String,
    type_name: &'static str,
    alias: Option<String>,
    select_list: Vec<Selection>,
    possible_types: Vec<Selection>,
    arguments: IndexMap<String, Value>,
    options: QueryOptions,
}

impl QueryNode {
    fn new(name: String, type_name: &'static str, options: QueryOptions) -> QueryResult<Self> {
        if name.trim().is_empty() {
            debug!(type_name, "rejected empty query name");
            return Err(QueryError::invalid_name("query name must not be empty"));
        }

        Ok(Self {
            name,
            type_name,
            alias: None,
            select_list: Vec::new(),
            possible_types: Vec::new(),
            arguments: IndexMap::new(),
            options,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema type this level selects from
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn select_list(&self) -> &[Selection] {
        &self.select_list
    }

    pub fn possible_types_list(&self) -> &[Selection] {
        &self.possible_types
    }

    pub fn arguments(&self) -> &IndexMap<String, Value> {
        &self.arguments
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Render this level and everything below it
    pub fn build(&self) -> QueryResult<String> {
        QuerySerializer::new(&self.options).render(self)
    }
}

/// Fluent builder over the schema-shaped type `T`
pub struct Query<T: Schema> {
    node: QueryNode,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Schema> Query<T> {
    pub fn new(name: impl Into<String>) -> QueryResult<Self> {
        Self::with_options(name, QueryOptions::default())
    }

    pub fn with_options(name: impl Into<String>, options: QueryOptions) -> QueryResult<Self> {
        Ok(Self {
            node: QueryNode::new(name.into(), T::TYPE_NAME, options)?,
            _marker: PhantomData,
        })
    }

    pub fn name(&self) -> &str {
        self.node.name()
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.node.alias_name()
    }

    pub fn select_list(&self) -> &[Selection] {
        self.node.select_list()
    }

    pub fn possible_types_list(&self) -> &[Selection] {
        self.node.possible_types_list()
    }

    pub fn arguments(&self) -> &IndexMap<String, Value> {
        self.node.arguments()
    }

    pub fn options(&self) -> &QueryOptions {
        self.node.options()
    }

    pub fn node(&self) -> &QueryNode {
        &self.node
    }

    pub fn into_node(self) -> QueryNode {
        self.node
    }

    /// Rename the result of this level
    pub fn alias(mut self, alias: impl Into<String>) -> QueryResult<Self> {
        let alias = alias.into();
        if alias.trim().is_empty() {
            return Err(QueryError::invalid_name("alias must not be empty"));
        }
        self.node.alias = Some(alias);
        Ok(self)
    }

    /// Select a field by its literal wire name
    pub fn add_field(mut self, field: impl Into<String>) -> Self {
        self.node.select_list.push(Selection::Field(field.into()));
        self
    }

    /// Select a scalar field through a typed selector
    pub fn add_field_by<D, P>(self, selector: impl FnOnce(T::Fields) -> Field<D, P>) -> QueryResult<Self>
    where
        D: Schema,
    {
        let name = self.selected_name(selector)?;
        Ok(self.add_field(name))
    }

    /// Select an object-valued field and its sub-selection
    pub fn add_sub_field<D, S, F>(
        self,
        selector: impl FnOnce(T::Fields) -> Field<D, S>,
        build: F,
    ) -> QueryResult<Self>
    where
        D: Schema,
        S: Schema,
        F: FnOnce(Query<S>) -> QueryResult<Query<S>>,
    {
        let name = self.selected_name(selector)?;
        self.add_field_with(name, build)
    }

    /// Select a collection-valued field and the sub-selection of its elements
    pub fn add_collection_field<D, P, F>(
        mut self,
        selector: impl FnOnce(T::Fields) -> Field<D, P>,
        build: F,
    ) -> QueryResult<Self>
    where
        D: Schema,
        P: Collection,
        P::Element: BagBacked,
        F: FnOnce(CollectionQuery<P::Element>) -> QueryResult<CollectionQuery<P::Element>>,
    {
        let name = self.selected_name(selector)?;
        let sub = CollectionQuery::with_options(name, self.node.options.clone())?;
        let sub = build(sub)?;
        self.node.select_list.push(Selection::Node(sub.into_query().into_node()));
        Ok(self)
    }

    /// Select a field of type `S` by its literal wire name, with a sub-selection
    pub fn add_field_with<S, F>(mut self, field: impl Into<String>, build: F) -> QueryResult<Self>
    where
        S: Schema,
        F: FnOnce(Query<S>) -> QueryResult<Query<S>>,
    {
        let sub = Query::<S>::with_options(field, self.node.options.clone())?;
        let sub = build(sub)?;
        self.node.select_list.push(Selection::Node(sub.into_node()));
        Ok(self)
    }

    /// Set an argument, replacing any previous value for the key
    pub fn add_argument(mut self, key: impl Into<String>, value: impl ToValue) -> Self {
        self.node.arguments.insert(key.into(), value.to_value());
        self
    }

    /// Merge the entries of a mapping into the arguments
    pub fn add_arguments<K, V>(mut self, arguments: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: ToValue,
    {
        for (key, value) in arguments {
            self.node.arguments.insert(key.into(), value.to_value());
        }
        self
    }

    /// Merge the properties of an object into the arguments
    ///
    /// Record properties go through the formatter (falling back to the naming
    /// strategy) and absent ones are skipped; bag keys go through the naming
    /// strategy only.
    pub fn add_arguments_from(mut self, object: &impl ToObject) -> Self {
        match object.to_object() {
            Object::Record(record) => {
                for (name, value) in record.present_properties() {
                    let key = self
                        .node
                        .options
                        .format_field(&FieldDescriptor::new(name, record.type_name()));
                    self.node.arguments.insert(key, value.clone());
                }
            }
            Object::Bag(bag) => {
                for (key, value) in bag {
                    let key = self.node.options.format_key(&key);
                    self.node.arguments.insert(key, value);
                }
            }
        }
        self
    }

    /// Add a type fragment with no sub-selection
    pub fn add_possible_type(mut self, type_name: impl Into<String>) -> Self {
        self.node.possible_types.push(Selection::Field(type_name.into()));
        self
    }

    /// Add a type fragment for `S`, named after its schema type
    pub fn add_possible_type_with<S, F>(self, build: F) -> QueryResult<Self>
    where
        S: Schema,
        F: FnOnce(Query<S>) -> QueryResult<Query<S>>,
    {
        self.add_possible_type_named(S::TYPE_NAME, build)
    }

    /// Add a type fragment for `S` under an explicit type name
    pub fn add_possible_type_named<S, F>(mut self, type_name: impl Into<String>, build: F) -> QueryResult<Self>
    where
        S: Schema,
        F: FnOnce(Query<S>) -> QueryResult<Query<S>>,
    {
        let sub = Query::<S>::with_options(type_name, self.node.options.clone())?;
        let sub = build(sub)?;
        self.node.possible_types.push(Selection::Node(sub.into_node()));
        Ok(self)
    }

    /// Render the query text
    pub fn build(&self) -> QueryResult<String> {
        self.node.build()
    }

    fn selected_name<D, P>(&self, selector: impl FnOnce(T::Fields) -> Field<D, P>) -> QueryResult<String>
    where
        D: Schema,
    {
        let field = selector(T::fields());
        let descriptor = resolver::resolve::<T, D, P>(&field)?;
        Ok(self.node.options.format_field(&descriptor))
    }
}

impl<T: Schema> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Schema> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Query").field(&self.node).finish()
    }
}
