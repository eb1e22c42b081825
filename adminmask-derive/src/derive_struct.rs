//! Struct-specific `Maskable` derivation.
//!
//! This module generates the `masked` body and the masked `Debug` body for
//! struct fields, and collects the where-clause predicates generic structs need.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{
    DataStruct, Fields, Index, Member, Result, Type, WherePredicate, parse_quote, spanned::Spanned,
};

use crate::strategy::{Strategy, parse_field_strategy};

pub(crate) struct DeriveOutput {
    pub(crate) masked_body: TokenStream,
    pub(crate) debug_body: TokenStream,
    /// Bounds on field types, applied only when the struct is generic.
    pub(crate) masked_predicates: Vec<WherePredicate>,
    pub(crate) debug_predicates: Vec<WherePredicate>,
}

struct FieldPlan {
    binding: Ident,
    member: Member,
    label: String,
    ty: Type,
    strategy: Strategy,
    span: Span,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: DataStruct,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    let named = matches!(data.fields, Fields::Named(_));
    let unit = matches!(data.fields, Fields::Unit);

    let mut plans = Vec::new();
    for (index, field) in data.fields.into_iter().enumerate() {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let (binding, member, label) = match field.ident {
            Some(ident) => (ident.clone(), Member::Named(ident.clone()), ident.to_string()),
            None => (
                format_ident!("field_{}", index),
                Member::Unnamed(Index::from(index)),
                index.to_string(),
            ),
        };
        plans.push(FieldPlan {
            binding,
            member,
            label,
            ty: field.ty,
            strategy,
            span,
        });
    }

    if unit {
        return Ok(DeriveOutput {
            masked_body: quote! { self },
            debug_body: quote! { formatter.write_str(stringify!(#name)) },
            masked_predicates: Vec::new(),
            debug_predicates: Vec::new(),
        });
    }

    let bindings: Vec<&Ident> = plans.iter().map(|plan| &plan.binding).collect();
    let transforms = plans.iter().map(|plan| field_transform(plan, crate_root));
    let debug_fields = plans.iter().map(|plan| debug_field(plan, crate_root, named));
    let masked_predicates = plans
        .iter()
        .filter_map(|plan| masked_predicate(plan, crate_root))
        .collect();
    let debug_predicates = plans
        .iter()
        .map(|plan| debug_predicate(plan, crate_root))
        .collect();

    let (destructure, rebuild, debug_builder) = if named {
        (
            quote! { let Self { #(#bindings),* } = self; },
            quote! { Self { #(#bindings),* } },
            quote! { formatter.debug_struct(stringify!(#name)) },
        )
    } else {
        (
            quote! { let Self( #(#bindings),* ) = self; },
            quote! { Self( #(#bindings),* ) },
            quote! { formatter.debug_tuple(stringify!(#name)) },
        )
    };

    Ok(DeriveOutput {
        masked_body: quote! {
            #destructure
            #(#transforms)*
            #rebuild
        },
        debug_body: quote! {
            let mut debug = #debug_builder;
            #(#debug_fields)*
            debug.finish()
        },
        masked_predicates,
        debug_predicates,
    })
}

fn field_transform(plan: &FieldPlan, crate_root: &TokenStream) -> TokenStream {
    let FieldPlan {
        binding, ty, span, ..
    } = plan;
    match &plan.strategy {
        Strategy::Passthrough => quote! {},
        Strategy::Policy(policy) => quote_spanned! { *span =>
            let #binding = <#ty as #crate_root::MaskField<#policy>>::mask_field(#binding);
        },
        Strategy::Nested => quote_spanned! { *span =>
            let #binding = <#ty as #crate_root::Maskable>::masked(#binding);
        },
    }
}

fn debug_field(plan: &FieldPlan, crate_root: &TokenStream, named: bool) -> TokenStream {
    let FieldPlan {
        member,
        label,
        ty,
        span,
        ..
    } = plan;
    let value = match &plan.strategy {
        Strategy::Passthrough => quote_spanned! { *span => &self.#member },
        Strategy::Policy(policy) => quote_spanned! { *span =>
            &<#ty as #crate_root::MaskField<#policy>>::mask_field(
                ::core::clone::Clone::clone(&self.#member)
            )
        },
        Strategy::Nested => quote_spanned! { *span =>
            &<#ty as #crate_root::Maskable>::masked(::core::clone::Clone::clone(&self.#member))
        },
    };
    if named {
        quote! { debug.field(#label, #value); }
    } else {
        quote! { debug.field(#value); }
    }
}

fn masked_predicate(plan: &FieldPlan, crate_root: &TokenStream) -> Option<WherePredicate> {
    let ty = &plan.ty;
    match &plan.strategy {
        Strategy::Passthrough => None,
        Strategy::Policy(policy) => Some(parse_quote!(#ty: #crate_root::MaskField<#policy>)),
        Strategy::Nested => Some(parse_quote!(#ty: #crate_root::Maskable)),
    }
}

fn debug_predicate(plan: &FieldPlan, crate_root: &TokenStream) -> WherePredicate {
    let ty = &plan.ty;
    match &plan.strategy {
        Strategy::Passthrough => parse_quote!(#ty: ::core::fmt::Debug),
        Strategy::Policy(policy) => parse_quote!(
            #ty: #crate_root::MaskField<#policy> + ::core::clone::Clone + ::core::fmt::Debug
        ),
        Strategy::Nested => parse_quote!(
            #ty: #crate_root::Maskable + ::core::clone::Clone + ::core::fmt::Debug
        ),
    }
}
