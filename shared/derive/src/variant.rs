use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Expr, ExprLit, Lit, Meta};

pub fn variant_impl(input: &DeriveInput, shared_crate_name: &TokenStream) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let type_id = match explicit_type_id(input)? {
        Some(type_id) => quote! { #type_id },
        None => quote! {
            #shared_crate_name::type_id_from_name(
                concat!(module_path!(), "::", stringify!(#name))
            )
        },
    };

    Ok(quote! {
        impl #impl_generics #shared_crate_name::Variant for #name #ty_generics #where_clause {
            const TYPE_ID: u32 = #type_id;
        }
    })
}

fn explicit_type_id(input: &DeriveInput) -> syn::Result<Option<u32>> {
    let Some(attr) = input.attrs.iter().find(|attr| attr.path().is_ident("type_id")) else {
        return Ok(None);
    };
    let Meta::NameValue(name_value) = &attr.meta else {
        return Err(syn::Error::new_spanned(
            attr,
            "expected `#[type_id = <u32>]`",
        ));
    };
    match &name_value.value {
        Expr::Lit(ExprLit {
            lit: Lit::Int(value),
            ..
        }) => value.base10_parse::<u32>().map(Some),
        other => Err(syn::Error::new_spanned(other, "type_id must be a u32 literal")),
    }
}
