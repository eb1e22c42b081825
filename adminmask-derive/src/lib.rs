//! Derive macro for `adminmask`.
//!
//! This crate generates the code behind `#[derive(Maskable)]`. It:
//! - reads `#[mask(...)]` attributes on the struct and its fields
//! - emits a `Maskable` implementation and a masked `Debug` implementation
//!
//! It does **not** define maskers or policies. Those live in the main
//! `adminmask` crate and are applied at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::redundant_pub_crate
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Generics, Result, WherePredicate, parse_macro_input};

mod derive_struct;
mod strategy;

use derive_struct::derive_struct;
use strategy::parse_container_options;

/// Derives `adminmask::Maskable` (and a masked `Debug`) for structs.
///
/// # Container Attributes
///
/// - `#[mask(skip_debug)]` - Opt out of `Debug` impl generation, e.g. when the
///   type already derives `Debug`.
///
/// # Field Attributes
///
/// - **No annotation**: the field is kept as it is.
///
/// - `#[mask(Policy)]`: masks the field with a `MaskPolicy` marker such as
///   `Email`, `Name`, `Identifier` or `IpAddress`. Works for `String`,
///   `Option<String>` and `Vec<String>`; a `None` becomes the policy's sentinel.
///
/// - `#[mask(nested)]`: the field is itself `Maskable` (a derived row,
///   `Option`/`Vec`/`Box` of one, or `serde_json::Value`).
///
/// Enums and unions are rejected at compile time.
///
/// # Generated Impls
///
/// - `Maskable`: `masked(self)` applies each field's strategy.
/// - `Debug`: annotated fields are printed in masked form, so a row can be
///   logged without leaking PII. Requires `Clone` on annotated field types.
#[proc_macro_derive(Maskable, attributes(mask))]
pub fn derive_maskable(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let options = parse_container_options(&attrs)?;
    let data = match data {
        Data::Struct(data) => data,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "`Maskable` cannot be derived for enums",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "`Maskable` cannot be derived for unions",
            ));
        }
    };

    let crate_root = crate_root();
    let output = derive_struct(&ident, data, &crate_root)?;

    let masked_generics = with_predicates(&generics, output.masked_predicates);
    let (impl_generics, ty_generics, where_clause) = masked_generics.split_for_impl();
    let masked_body = output.masked_body;
    let maskable_impl = quote! {
        impl #impl_generics #crate_root::Maskable for #ident #ty_generics #where_clause {
            fn masked(self) -> Self {
                #masked_body
            }
        }
    };

    let debug_impl = if options.skip_debug {
        quote! {}
    } else {
        let debug_generics = with_predicates(&generics, output.debug_predicates);
        let (impl_generics, ty_generics, where_clause) = debug_generics.split_for_impl();
        let debug_body = output.debug_body;
        quote! {
            impl #impl_generics ::core::fmt::Debug for #ident #ty_generics #where_clause {
                fn fmt(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_body
                }
            }
        }
    };

    Ok(quote! {
        #maskable_impl
        #debug_impl
    })
}

/// Adds field-type bounds to generic structs. Concrete structs need none and
/// are left alone so private field types never appear in a public bound.
fn with_predicates(generics: &Generics, predicates: Vec<WherePredicate>) -> Generics {
    let mut generics = generics.clone();
    if !generics.params.is_empty() {
        generics.make_where_clause().predicates.extend(predicates);
    }
    generics
}

/// Returns the token stream to reference the adminmask crate root.
///
/// Handles crate renaming (e.g., `masking = { package = "adminmask", ... }`).
/// Inside `adminmask` itself the path still works through its
/// `extern crate self as adminmask`.
fn crate_root() -> TokenStream {
    match crate_name("adminmask") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::adminmask },
    }
}
