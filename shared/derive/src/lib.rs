//! # Axon Derive
//! Procedural macros that generate the schema side of axon types: the
//! record shape a value is mapped through, and the numeric type id it is
//! registered and replicated under.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

mod describe;
mod serde_names;
mod shared;
mod variant;

use describe::describe_impl;
use variant::variant_impl;

/// Derives `Describe` for a struct.
///
/// Named-field structs become a `Shape::Record` named after the struct, one
/// field per struct field, in declaration order. Mark a field with
/// `#[describe(required)]` when decoding must fail if the field is absent
/// instead of falling back to the field's default. Field names follow
/// `#[serde(rename)]` and `#[serde(rename_all)]`, so they match the keys the
/// serde bridge writes. Single-field tuple structs take the shape of their
/// inner type.
#[proc_macro_derive(Describe, attributes(describe))]
pub fn describe_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    into_output(describe_impl(&input, &shared_crate_name()))
}

/// Derives `Variant`, assigning the type's wire type id.
///
/// `#[type_id = 1000]` pins the id. Without it the id is a hash of the
/// type's full path, computed at compile time with `type_id_from_name`.
#[proc_macro_derive(Variant, attributes(type_id))]
pub fn variant_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    into_output(variant_impl(&input, &shared_crate_name()))
}

fn shared_crate_name() -> TokenStream {
    quote! { ::axon_shared }
}

fn into_output(result: syn::Result<TokenStream>) -> proc_macro::TokenStream {
    match result {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}
