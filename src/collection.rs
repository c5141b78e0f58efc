/// Collection query node
///
/// Selection level for a field whose value is a collection of `T`. It offers
/// the builder surface of `Query<T>`, but sub-queries built under it must
/// select from bag-backed types so that every element of the result can be
/// read back through a `Bag`.

use std::fmt;
use std::ops::Deref;

use crate::error::QueryResult;
use crate::naming::QueryOptions;
use crate::query::Query;
use crate::schema::{BagBacked, Collection, Field, Schema};
use crate::value::{ToObject, ToValue};

pub struct CollectionQuery<T: BagBacked> {
    inner: Query<T>,
}

impl<T: BagBacked> CollectionQuery<T> {
    pub fn new(name: impl Into<String>) -> QueryResult<Self> {
        Self::with_options(name, QueryOptions::default())
    }

    pub fn with_options(name: impl Into<String>, options: QueryOptions) -> QueryResult<Self> {
        Ok(Self {
            inner: Query::with_options(name, options)?,
        })
    }

    pub fn into_query(self) -> Query<T> {
        self.inner
    }

    pub fn alias(self, alias: impl Into<String>) -> QueryResult<Self> {
        Ok(Self {
            inner: self.inner.alias(alias)?,
        })
    }

    pub fn add_field(self, field: impl Into<String>) -> Self {
        Self {
            inner: self.inner.add_field(field),
        }
    }

    pub fn add_field_by<D, P>(self, selector: impl FnOnce(T::Fields) -> Field<D, P>) -> QueryResult<Self>
    where
        D: Schema,
    {
        Ok(Self {
            inner: self.inner.add_field_by(selector)?,
        })
    }

    /// Select an object-valued field; the sub-type must be bag-backed
    pub fn add_sub_field<D, S, F>(
        self,
        selector: impl FnOnce(T::Fields) -> Field<D, S>,
        build: F,
    ) -> QueryResult<Self>
    where
        D: Schema,
        S: BagBacked,
        F: FnOnce(Query<S>) -> QueryResult<Query<S>>,
    {
        Ok(Self {
            inner: self.inner.add_sub_field(selector, build)?,
        })
    }

    pub fn add_collection_field<D, P, F>(
        self,
        selector: impl FnOnce(T::Fields) -> Field<D, P>,
        build: F,
    ) -> QueryResult<Self>
    where
        D: Schema,
        P: Collection,
        P::Element: BagBacked,
        F: FnOnce(CollectionQuery<P::Element>) -> QueryResult<CollectionQuery<P::Element>>,
    {
        Ok(Self {
            inner: self.inner.add_collection_field(selector, build)?,
        })
    }

    /// Select a field by its literal wire name, with a bag-backed sub-selection
    pub fn add_field_with<S, F>(self, field: impl Into<String>, build: F) -> QueryResult<Self>
    where
        S: BagBacked,
        F: FnOnce(Query<S>) -> QueryResult<Query<S>>,
    {
        Ok(Self {
            inner: self.inner.add_field_with(field, build)?,
        })
    }

    pub fn add_argument(self, key: impl Into<String>, value: impl ToValue) -> Self {
        Self {
            inner: self.inner.add_argument(key, value),
        }
    }

    pub fn add_arguments<K, V>(self, arguments: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: ToValue,
    {
        Self {
            inner: self.inner.add_arguments(arguments),
        }
    }

    pub fn add_arguments_from(self, object: &impl ToObject) -> Self {
        Self {
            inner: self.inner.add_arguments_from(object),
        }
    }

    pub fn add_possible_type(self, type_name: impl Into<String>) -> Self {
        Self {
            inner: self.inner.add_possible_type(type_name),
        }
    }

    pub fn add_possible_type_with<S, F>(self, build: F) -> QueryResult<Self>
    where
        S: BagBacked,
        F: FnOnce(Query<S>) -> QueryResult<Query<S>>,
    {
        Ok(Self {
            inner: self.inner.add_possible_type_with(build)?,
        })
    }

    pub fn add_possible_type_named<S, F>(self, type_name: impl Into<String>, build: F) -> QueryResult<Self>
    where
        S: BagBacked,
        F: FnOnce(Query<S>) -> QueryResult<Query<S>>,
    {
        Ok(Self {
            inner: self.inner.add_possible_type_named(type_name, build)?,
        })
    }
}

impl<T: BagBacked> Clone for CollectionQuery<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: BagBacked> fmt::Debug for CollectionQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CollectionQuery").field(self.inner.node()).finish()
    }
}

impl<T: BagBacked> Deref for CollectionQuery<T> {
    type Target = Query<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag::Bag;

    #[test]
    fn test_collection_root() {
        let query = CollectionQuery::<Bag>::new("pokemons")
            .unwrap()
            .add_argument("first", 10)
            .add_field("name")
            .add_field("number");

        assert_eq!(query.name(), "pokemons");
        assert_eq!(query.build().unwrap(), "pokemons(first:10){name number}");
    }

    struct Garage;

    #[derive(Clone, Copy)]
    struct GarageFields {
        cars: Field<Garage, Vec<Bag>>,
    }

    impl Schema for Garage {
        const TYPE_NAME: &'static str = "Garage";
        type Fields = GarageFields;

        fn fields() -> Self::Fields {
            GarageFields {
                cars: Field::property("cars"),
            }
        }
    }

    #[test]
    fn test_literal_sub_selections_inside_collection_field() {
        let query = Query::<Garage>::new("garage")
            .unwrap()
            .add_collection_field(
                |garage| garage.cars,
                |cars| {
                    cars.add_field("id")
                        .add_field_with::<Bag, _>("owner", |owner| Ok(owner.add_field("name")))?
                        .add_possible_type_named::<Bag, _>("Truck", |truck| Ok(truck.add_field("payload")))
                },
            )
            .unwrap();

        assert_eq!(
            query.build().unwrap(),
            "garage{cars{id owner{name} ... on Truck{payload}}}"
        );
    }

    #[test]
    fn test_into_query_keeps_node() {
        let query = CollectionQuery::<Bag>::new("items")
            .unwrap()
            .alias("all")
            .unwrap()
            .add_possible_type("Book")
            .into_query();

        assert_eq!(query.alias_name(), Some("all"));
        assert_eq!(query.possible_types_list(), ["Book"]);
    }
}
