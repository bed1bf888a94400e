use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, DeriveInput, Generics};

/// Adds `bound` to every type parameter of the input.
pub fn add_trait_bounds(input: &DeriveInput, bound: TokenStream) -> Generics {
    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#bound));
    }
    generics
}

pub fn type_name_literal(input: &DeriveInput) -> TokenStream {
    let name = input.ident.to_string();
    quote! { #name }
}
