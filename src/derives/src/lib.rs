use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DataStruct, DeriveInput, Fields};

// TODO possibly use [darling](https://lib.rs/crates/darling) to make these fields configurable
#[proc_macro_derive(DbTable)]
pub fn derive_db_table(input: TokenStream) -> TokenStream {
    let DeriveInput { ident, .. } = parse_macro_input!(input);
    let singular = ident.to_string().to_lowercase();
    let plural = singular.clone() + "s";
    quote! {
        impl DbTable for #ident {
            const NAME_SINGULAR: &'static str = #singular;
            const NAME_PLURAL: &'static str = #plural;
        }
    }
    .into()
}

/// Collects every field marked `#[deduplication_field]` into
/// `DeduplicationFields::DEDUPLICATION_FIELDS`, in declaration order.
#[proc_macro_derive(DeduplicationFields, attributes(deduplication_field))]
pub fn derive_deduplication_fields(input: TokenStream) -> TokenStream {
    let DeriveInput { ident, data, .. } = parse_macro_input!(input);
    let fields = match data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => fields.named,
        _ => {
            return syn::Error::new(
                ident.span(),
                "DeduplicationFields can only be derived for structs with named fields",
            )
            .to_compile_error()
            .into()
        }
    };
    let names = fields
        .iter()
        .filter(|field| {
            field
                .attrs
                .iter()
                .any(|attr| attr.path.is_ident("deduplication_field"))
        })
        .filter_map(|field| field.ident.as_ref())
        .map(|name| name.to_string())
        .collect::<Vec<String>>();
    quote! {
        impl DeduplicationFields for #ident {
            const DEDUPLICATION_FIELDS: &'static [&'static str] = &[#(#names),*];
        }
    }
    .into()
}
