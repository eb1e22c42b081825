//! Parsing of `#[mask(...)]` field and container attributes.
//!
//! This module maps attribute syntax to masking decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{Attribute, Meta, Result, spanned::Spanned};

/// Field masking strategy based on `#[mask(...)]` attributes.
///
/// ## Strategy Mapping
///
/// | Attribute          | Strategy              | Behavior                           |
/// |--------------------|-----------------------|------------------------------------|
/// | None               | `Passthrough`         | Field is left as it is             |
/// | `#[mask(Policy)]`  | `Policy(policy_path)` | `MaskField<Policy>::mask_field`    |
/// | `#[mask(nested)]`  | `Nested`              | `Maskable::masked` on the field    |
#[derive(Clone, Debug)]
pub(crate) enum Strategy {
    /// No annotation: the value is kept unchanged.
    Passthrough,
    /// `#[mask(Policy)]`: mask the value with a `MaskPolicy` marker
    /// (e.g., `Email`, `Name`, `Identifier`, `IpAddress`).
    Policy(syn::Path),
    /// `#[mask(nested)]`: the field is itself `Maskable`.
    Nested,
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[mask] attributes on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs {
        if !attr.path().is_ident("mask") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "missing policy: use #[mask(Policy)] \
                     (e.g., #[mask(Email)], #[mask(Identifier)]) or #[mask(nested)]",
                ));
            }
            Meta::List(list) => match syn::parse2::<syn::Path>(list.tokens.clone()) {
                Ok(path) if path.is_ident("nested") => {
                    set_strategy(&mut strategy, Strategy::Nested, attr.span())?;
                }
                Ok(path) => {
                    set_strategy(&mut strategy, Strategy::Policy(path), attr.span())?;
                }
                Err(_) => {
                    return Err(syn::Error::new(
                        attr.span(),
                        "expected a policy type (e.g., #[mask(Email)])",
                    ));
                }
            },
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected #[mask(Policy)] syntax (e.g., #[mask(Email)], #[mask(Name)])",
                ));
            }
        }
    }

    Ok(strategy.unwrap_or(Strategy::Passthrough))
}

/// Options set on the struct itself.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// `#[mask(skip_debug)]`: do not generate a masked `Debug` impl.
    pub(crate) skip_debug: bool,
}

pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("mask") {
            continue;
        }

        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new(
                attr.span(),
                "expected #[mask(skip_debug)] on the container",
            ));
        };
        let option = syn::parse2::<syn::Ident>(list.tokens.clone()).map_err(|_| {
            syn::Error::new(attr.span(), "expected #[mask(skip_debug)] on the container")
        })?;
        if option != "skip_debug" {
            return Err(syn::Error::new(
                option.span(),
                format!("unknown container option `{option}`; expected `skip_debug`"),
            ));
        }
        options.skip_debug = true;
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_passthrough() {
        let attrs = parse_attrs(quote! {});
        let strategy = parse_field_strategy(&attrs).unwrap();
        assert!(matches!(strategy, Strategy::Passthrough));
    }

    #[test]
    fn bare_mask_errors_with_missing_policy() {
        let attrs = parse_attrs(quote! { #[mask] });
        let result = parse_field_strategy(&attrs);
        assert!(result.unwrap_err().to_string().contains("missing policy"));
    }

    #[test]
    fn mask_with_policy_returns_policy() {
        let attrs = parse_attrs(quote! { #[mask(Email)] });
        match parse_field_strategy(&attrs).unwrap() {
            Strategy::Policy(path) => assert!(path.is_ident("Email")),
            other => panic!("expected Policy, got {other:?}"),
        }
    }

    #[test]
    fn mask_with_path_policy() {
        let attrs = parse_attrs(quote! { #[mask(adminmask::Identifier)] });
        match parse_field_strategy(&attrs).unwrap() {
            Strategy::Policy(path) => assert_eq!(path.segments.len(), 2),
            other => panic!("expected Policy, got {other:?}"),
        }
    }

    #[test]
    fn nested_keyword_returns_nested() {
        let attrs = parse_attrs(quote! { #[mask(nested)] });
        let strategy = parse_field_strategy(&attrs).unwrap();
        assert!(matches!(strategy, Strategy::Nested));
    }

    #[test]
    fn multiple_mask_attributes_error() {
        let attrs = parse_attrs(quote! {
            #[mask(Email)]
            #[mask(nested)]
        });
        let result = parse_field_strategy(&attrs);
        assert!(result.unwrap_err().to_string().contains("multiple"));
    }

    #[test]
    fn name_value_syntax_error() {
        let attrs = parse_attrs(quote! { #[mask = "Email"] });
        let result = parse_field_strategy(&attrs);
        assert!(result.unwrap_err().to_string().contains("#[mask(Policy)]"));
    }

    #[test]
    fn invalid_policy_syntax_error() {
        let attrs = parse_attrs(quote! { #[mask(123)] });
        let result = parse_field_strategy(&attrs);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("expected a policy type")
        );
    }

    #[test]
    fn other_attributes_ignored() {
        let attrs = parse_attrs(quote! {
            #[derive(Clone)]
            #[serde(rename = "id")]
        });
        let strategy = parse_field_strategy(&attrs).unwrap();
        assert!(matches!(strategy, Strategy::Passthrough));
    }

    #[test]
    fn container_skip_debug_is_recognised() {
        let attrs = parse_attrs(quote! { #[mask(skip_debug)] });
        assert!(parse_container_options(&attrs).unwrap().skip_debug);
        assert!(!parse_container_options(&[]).unwrap().skip_debug);
    }

    #[test]
    fn container_unknown_option_errors() {
        let attrs = parse_attrs(quote! { #[mask(verbose)] });
        let result = parse_container_options(&attrs);
        assert!(result.unwrap_err().to_string().contains("unknown container option"));
    }
}
