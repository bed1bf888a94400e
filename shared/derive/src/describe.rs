use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Field, Fields};

use crate::{
    serde_names::{container_rule, field_name, RenameRule},
    shared::{add_trait_bounds, type_name_literal},
};

pub fn describe_impl(input: &DeriveInput, shared_crate_name: &TokenStream) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "Describe can only be derived for structs",
        ));
    };

    let shape = match &data.fields {
        Fields::Named(fields) => {
            let record_name = type_name_literal(input);
            let rule = container_rule(&input.attrs)?;
            let mut field_tokens = Vec::new();
            for field in &fields.named {
                field_tokens.push(field_entry(field, rule, shared_crate_name)?);
            }
            quote! {
                #shared_crate_name::Shape::Record(
                    #shared_crate_name::Descriptor::new(#record_name)
                        #(#field_tokens)*
                )
            }
        }
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            let inner = &fields.unnamed[0].ty;
            quote! { <#inner as #shared_crate_name::Describe>::shape() }
        }
        Fields::Unit => quote! { #shared_crate_name::Shape::Nil },
        Fields::Unnamed(fields) => {
            return Err(syn::Error::new(
                fields.span(),
                "Describe supports tuple structs with exactly one field",
            ));
        }
    };

    let name = &input.ident;
    let generics = add_trait_bounds(input, quote! { #shared_crate_name::Describe });
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #shared_crate_name::Describe for #name #ty_generics #where_clause {
            fn shape() -> #shared_crate_name::Shape {
                #shape
            }
        }
    })
}

fn field_entry(
    field: &Field,
    rule: Option<RenameRule>,
    shared_crate_name: &TokenStream,
) -> syn::Result<TokenStream> {
    // must match the key the serde bridge writes
    let field_name = field_name(field, rule)?;
    let field_type = &field.ty;
    let required = is_required(field)?;

    Ok(if required {
        quote! {
            .with_required_field(#field_name, <#field_type as #shared_crate_name::Describe>::shape())
        }
    } else {
        quote! {
            .with_field(#field_name, <#field_type as #shared_crate_name::Describe>::shape())
        }
    })
}

fn is_required(field: &Field) -> syn::Result<bool> {
    let mut required = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("describe") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("required") {
                required = true;
                Ok(())
            } else {
                Err(meta.error("unknown describe attribute, expected `required`"))
            }
        })?;
    }
    Ok(required)
}
