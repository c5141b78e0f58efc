/// Schema-shaped types and typed field selectors
///
/// A schema-shaped type describes one object type of the remote schema. It
/// exposes a table of typed `Field` selectors, one per declared member, which
/// query builders resolve into wire names without hand-typing them. Types are
/// usually declared with `#[graphql_object]`, which backs them with a `Bag`.

use std::any::TypeId;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::marker::PhantomData;

use crate::bag::Bag;

/// Declared name of a member and the type declaring it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub owner: &'static str,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, owner: &'static str) -> Self {
        Self { name, owner }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

/// How a selector reaches its member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Direct access to a stored property
    Property,
    /// Computed member, not a stored property
    Method,
    /// Element of a collection-valued member
    Indexed(usize),
    /// Member reached through another member
    Chained(&'static str),
}

/// Typed selector for a member declared on `D` holding values of type `P`
pub struct Field<D, P> {
    name: &'static str,
    access: Access,
    _marker: PhantomData<fn() -> (D, P)>,
}

impl<D, P> Field<D, P> {
    pub const fn property(name: &'static str) -> Self {
        Self {
            name,
            access: Access::Property,
            _marker: PhantomData,
        }
    }

    pub const fn method(name: &'static str) -> Self {
        Self {
            name,
            access: Access::Method,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn access(&self) -> Access {
        self.access
    }

    /// Continue the access into a member of this member's type
    pub fn then<Q>(self, next: Field<P, Q>) -> Field<D, Q> {
        Field {
            name: next.name,
            access: Access::Chained(self.name),
            _marker: PhantomData,
        }
    }
}

impl<D, P: Collection> Field<D, P> {
    /// Access one element of a collection-valued member
    pub fn at(self, index: usize) -> Field<D, P::Element> {
        Field {
            name: self.name,
            access: Access::Indexed(index),
            _marker: PhantomData,
        }
    }
}

impl<D, P> Clone for Field<D, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, P> Copy for Field<D, P> {}

impl<D, P> fmt::Debug for Field<D, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("access", &self.access)
            .finish()
    }
}

/// A type describing one object type of the remote schema
pub trait Schema: 'static {
    /// Type name on the wire, used for possible-type fragments
    const TYPE_NAME: &'static str;

    /// Table of typed selectors
    type Fields;

    fn fields() -> Self::Fields;

    /// Whether a value of this type is also a `D`
    ///
    /// Selectors for members declared on `D` are accepted on queries of this
    /// type. Types declared with `extends` also answer for every supertype,
    /// transitively.
    fn is_assignable_to<D: Schema>() -> bool {
        TypeId::of::<Self>() == TypeId::of::<D>()
    }
}

/// A schema-shaped type whose state lives in a `Bag`
pub trait BagBacked: Schema {
    fn bag(&self) -> &Bag;

    fn bag_mut(&mut self) -> &mut Bag;

    fn from_bag(bag: Bag) -> Self;

    fn into_bag(self) -> Bag;
}

/// Type with no declared members, for queries addressed by literal names
#[derive(Debug, Clone, Copy, Default)]
pub struct Untyped;

impl Schema for Untyped {
    const TYPE_NAME: &'static str = "Object";

    type Fields = ();

    fn fields() -> Self::Fields {}
}

impl Schema for Bag {
    const TYPE_NAME: &'static str = "Object";

    type Fields = ();

    fn fields() -> Self::Fields {}
}

impl BagBacked for Bag {
    fn bag(&self) -> &Bag {
        self
    }

    fn bag_mut(&mut self) -> &mut Bag {
        self
    }

    fn from_bag(bag: Bag) -> Self {
        bag
    }

    fn into_bag(self) -> Bag {
        self
    }
}

/// A collection-valued member type and its element type
pub trait Collection {
    type Element;
}

impl<T> Collection for Vec<T> {
    type Element = T;
}

impl<T> Collection for VecDeque<T> {
    type Element = T;
}

impl<T> Collection for Box<[T]> {
    type Element = T;
}

impl<T, const N: usize> Collection for [T; N] {
    type Element = T;
}

impl<T> Collection for BTreeSet<T> {
    type Element = T;
}

impl<T, S> Collection for HashSet<T, S> {
    type Element = T;
}

impl<T: Collection> Collection for Option<T> {
    type Element = T::Element;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Wheel;
    struct Car;

    #[test]
    fn test_field_access_kinds() {
        let wheels: Field<Car, Vec<Wheel>> = Field::property("wheels");
        assert_eq!(wheels.access(), Access::Property);

        let first = wheels.at(0);
        assert_eq!(first.name(), "wheels");
        assert_eq!(first.access(), Access::Indexed(0));

        let size: Field<Wheel, u32> = Field::property("size");
        let chained = wheels.at(0).then(size);
        assert_eq!(chained.name(), "size");
        assert_eq!(chained.access(), Access::Chained("wheels"));
    }

    #[test]
    fn test_assignable_to_self_only_by_default() {
        assert!(Untyped::is_assignable_to::<Untyped>());
        assert!(Bag::is_assignable_to::<Bag>());

        // same wire name, distinct types
        assert!(!Untyped::is_assignable_to::<Bag>());
        assert!(!Bag::is_assignable_to::<Untyped>());
    }

    #[test]
    fn test_descriptor_display() {
        assert_eq!(FieldDescriptor::new("Name", "Car").to_string(), "Car.Name");
    }
}
