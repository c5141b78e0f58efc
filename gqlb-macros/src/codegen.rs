//! Code generation for the gqlb macros

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_macro_input, DeriveInput, ItemStruct};

use crate::{
    error::{validate_input_struct, validate_object_struct, validate_unit_enum},
    parsing::{graphql_name, strip_graphql_attrs, ObjectConfig},
    utils::{declared_name, fields_ident, setter_ident, with_ident},
};

/// One field of an object or input struct after attribute parsing
struct DeclaredField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    attrs: Vec<syn::Attribute>,
    key: String,
}

fn declared_fields(fields: &syn::FieldsNamed) -> syn::Result<Vec<DeclaredField<'_>>> {
    fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref().map(|ident| (ident, field)))
        .map(|(ident, field)| {
            let key = graphql_name(&field.attrs)?.unwrap_or_else(|| declared_name(ident));
            Ok(DeclaredField {
                ident,
                ty: &field.ty,
                attrs: strip_graphql_attrs(&field.attrs),
                key,
            })
        })
        .collect()
}

//
// Object Types
//

pub fn graphql_object_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemStruct);
    let config = if args.is_empty() {
        ObjectConfig::default()
    } else {
        match syn::parse::<ObjectConfig>(args) {
            Ok(config) => config,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    if let Err(e) = validate_object_struct(&item) {
        return e.to_compile_error(item.ident.span()).into();
    }

    match expand_object(&item, &config) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand_object(item: &ItemStruct, config: &ObjectConfig) -> syn::Result<TokenStream2> {
    let syn::Fields::Named(named) = &item.fields else {
        return Err(syn::Error::new(Span::call_site(), "expected named fields"));
    };

    let name = &item.ident;
    let vis = &item.vis;
    let attrs = &item.attrs;
    let fields_name = fields_ident(name);
    let type_name = config.name.clone().unwrap_or_else(|| declared_name(name));
    let fields = declared_fields(named)?;

    let accessors = fields.iter().map(|field| {
        let DeclaredField { ident, ty, attrs, key } = field;
        let setter = setter_ident(ident);
        let with = with_ident(ident);
        quote! {
            #(#attrs)*
            pub fn #ident(&self) -> ::gqlb::QueryResult<::core::option::Option<#ty>> {
                self.bag.get_property::<#ty>(#key)
            }

            pub fn #setter(&mut self, value: #ty) {
                self.bag.set(#key, value);
            }

            pub fn #with(mut self, value: #ty) -> Self {
                self.bag.set(#key, value);
                self
            }
        }
    });

    let selector_decls = fields.iter().map(|DeclaredField { ident, ty, .. }| {
        quote! { pub #ident: ::gqlb::Field<#name, #ty> }
    });
    let selector_inits = fields.iter().map(|DeclaredField { ident, key, .. }| {
        quote! { #ident: ::gqlb::Field::property(#key) }
    });

    // Members of the first supertype stay reachable through `Deref`
    let (base_decl, base_init, base_deref) = match config.extends.first() {
        Some(base) => (
            quote! { __base: <#base as ::gqlb::Schema>::Fields, },
            quote! { __base: <#base as ::gqlb::Schema>::fields(), },
            quote! {
                impl ::core::ops::Deref for #fields_name {
                    type Target = <#base as ::gqlb::Schema>::Fields;

                    fn deref(&self) -> &Self::Target {
                        &self.__base
                    }
                }
            },
        ),
        None => (quote! {}, quote! {}, quote! {}),
    };
    let supertypes = config.extends.iter();

    Ok(quote! {
        #(#attrs)*
        #[derive(Debug, Clone, Default, PartialEq)]
        #vis struct #name {
            bag: ::gqlb::Bag,
        }

        impl #name {
            pub fn new() -> Self {
                Self::default()
            }

            #(#accessors)*
        }

        /// Property selectors of the type
        #[derive(Clone, Copy)]
        #vis struct #fields_name {
            #(#selector_decls,)*
            #base_decl
        }

        #base_deref

        impl ::gqlb::Schema for #name {
            const TYPE_NAME: &'static str = #type_name;
            type Fields = #fields_name;

            fn fields() -> Self::Fields {
                #fields_name {
                    #(#selector_inits,)*
                    #base_init
                }
            }

            fn is_assignable_to<__D: ::gqlb::Schema>() -> bool {
                ::core::any::TypeId::of::<Self>() == ::core::any::TypeId::of::<__D>()
                    #(|| <#supertypes as ::gqlb::Schema>::is_assignable_to::<__D>())*
            }
        }

        impl ::gqlb::BagBacked for #name {
            fn bag(&self) -> &::gqlb::Bag {
                &self.bag
            }

            fn bag_mut(&mut self) -> &mut ::gqlb::Bag {
                &mut self.bag
            }

            fn from_bag(bag: ::gqlb::Bag) -> Self {
                Self { bag }
            }

            fn into_bag(self) -> ::gqlb::Bag {
                self.bag
            }
        }

        impl ::gqlb::ToValue for #name {
            fn to_value(&self) -> ::gqlb::Value {
                ::gqlb::Value::Bag(self.bag.clone())
            }
        }

        impl ::gqlb::ToObject for #name {
            fn to_object(&self) -> ::gqlb::Object {
                ::gqlb::Object::Bag(self.bag.clone())
            }
        }

        impl ::gqlb::FromValue for #name {
            fn from_value(value: &::gqlb::Value) -> ::core::option::Option<Self> {
                <::gqlb::Bag as ::gqlb::FromValue>::from_value(value).map(|bag| Self { bag })
            }
        }
    })
}

//
// Input Objects
//

pub fn graphql_input_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let named = match validate_input_struct(&input.data) {
        Ok(named) => named,
        Err(e) => return e.to_compile_error(input.ident.span()).into(),
    };

    let expanded = graphql_name(&input.attrs).and_then(|type_name| {
        let fields = declared_fields(named)?;
        let name = &input.ident;
        let type_name = type_name.unwrap_or_else(|| declared_name(name));
        let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

        let properties = fields.iter().map(|DeclaredField { ident, key, .. }| {
            quote! { .with(#key, &self.#ident) }
        });

        Ok(quote! {
            impl #impl_generics ::gqlb::ToObject for #name #ty_generics #where_clause {
                fn to_object(&self) -> ::gqlb::Object {
                    ::gqlb::Object::Record(::gqlb::Record::new(#type_name) #(#properties)*)
                }
            }

            impl #impl_generics ::gqlb::ToValue for #name #ty_generics #where_clause {
                fn to_value(&self) -> ::gqlb::Value {
                    match ::gqlb::ToObject::to_object(self) {
                        ::gqlb::Object::Record(record) => ::gqlb::Value::Record(record),
                        ::gqlb::Object::Bag(bag) => ::gqlb::Value::Bag(bag),
                    }
                }
            }
        })
    });

    match expanded {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

//
// Enums
//

pub fn graphql_enum_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let variants = match validate_unit_enum(&input.data) {
        Ok(variants) => variants,
        Err(e) => return e.to_compile_error(input.ident.span()).into(),
    };

    let symbols = variants
        .iter()
        .map(|variant| {
            graphql_name(&variant.attrs)
                .map(|name| (&variant.ident, name.unwrap_or_else(|| declared_name(&variant.ident))))
        })
        .collect::<syn::Result<Vec<_>>>();

    let symbols = match symbols {
        Ok(symbols) => symbols,
        Err(e) => return e.to_compile_error().into(),
    };

    let name = &input.ident;
    let to_arms = symbols.iter().map(|(ident, symbol)| quote! { Self::#ident => #symbol });
    let from_arms = symbols.iter().map(|(ident, symbol)| quote! { #symbol => Some(Self::#ident) });

    let expanded = quote! {
        impl ::gqlb::ToValue for #name {
            fn to_value(&self) -> ::gqlb::Value {
                ::gqlb::Value::Enum(::std::string::String::from(match self {
                    #(#to_arms,)*
                }))
            }
        }

        impl ::gqlb::FromValue for #name {
            fn from_value(value: &::gqlb::Value) -> ::core::option::Option<Self> {
                match value {
                    ::gqlb::Value::Enum(symbol) | ::gqlb::Value::String(symbol) => match symbol.as_str() {
                        #(#from_arms,)*
                        _ => None,
                    },
                    _ => None,
                }
            }
        }
    };

    TokenStream::from(expanded)
}
