use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, ImplItem, ItemImpl, Lit, Meta, Token};

/// Periodic task macro that fills in a task's scheduling configuration
///
/// Apply it to an `impl Task for ...` or `impl SecondsTask for ...` block. It
/// generates the `tardiness_compensation` method so the configuration sits
/// next to the task instead of inside its body.
///
/// # Examples
///
/// ```rust,ignore
/// use tickset::{periodic, SecondsTask};
///
/// struct Physics {
///     steps: u64,
/// }
///
/// // catch up after late updates so the step rate averages out to 60 Hz
/// #[periodic(compensate_tardiness)]
/// impl SecondsTask for Physics {
///     fn execute(&mut self, _elapsed: f64) -> f64 {
///         self.steps += 1;
///         1.0 / 60.0
///     }
/// }
/// ```
///
/// # Parameters
///
/// - `compensate_tardiness`: subtract lateness from the next delay. Accepts a
///   bare flag or `compensate_tardiness = true | false`. Absent means `false`.
#[proc_macro_attribute]
pub fn periodic(args: TokenStream, input: TokenStream) -> TokenStream {
    let attr_args =
        syn::parse_macro_input!(args with Punctuated::<Meta, Token![,]>::parse_terminated);
    let mut item_impl = syn::parse_macro_input!(input as ItemImpl);

    match expand(&attr_args, &mut item_impl) {
        Ok(()) => quote!(#item_impl).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: &Punctuated<Meta, Token![,]>, item_impl: &mut ItemImpl) -> syn::Result<()> {
    if item_impl.trait_.is_none() {
        return Err(syn::Error::new_spanned(
            &item_impl.self_ty,
            "#[periodic] can only be applied to `impl Task for ...` or `impl SecondsTask for ...` blocks",
        ));
    }

    let mut compensate = false;
    for meta in args {
        if meta.path().is_ident("compensate_tardiness") {
            compensate = parse_flag(meta)?;
        } else {
            return Err(syn::Error::new_spanned(
                meta.path(),
                "unknown #[periodic] option, expected `compensate_tardiness`",
            ));
        }
    }

    let already_defined = item_impl.items.iter().any(|item| {
        matches!(item, ImplItem::Fn(method) if method.sig.ident == "tardiness_compensation")
    });
    if already_defined {
        return Err(syn::Error::new_spanned(
            &item_impl.self_ty,
            "`tardiness_compensation` is defined by hand; remove it or drop #[periodic]",
        ));
    }

    let method: ImplItem = syn::parse_quote! {
        fn tardiness_compensation(&self) -> bool {
            #compensate
        }
    };
    item_impl.items.push(method);

    Ok(())
}

fn parse_flag(meta: &Meta) -> syn::Result<bool> {
    match meta {
        Meta::Path(_) => Ok(true),
        Meta::NameValue(name_value) => match &name_value.value {
            Expr::Lit(ExprLit {
                lit: Lit::Bool(value),
                ..
            }) => Ok(value.value),
            other => Err(syn::Error::new_spanned(other, "expected `true` or `false`")),
        },
        Meta::List(list) => Err(syn::Error::new_spanned(
            list,
            "expected `compensate_tardiness` or `compensate_tardiness = <bool>`",
        )),
    }
}
