use proc_macro::TokenStream;
use quote::quote;
use syn::{Ident, ItemFn, parse_macro_input};

/// Multiversions a per-pixel hot loop for the CPU targets coverhue cares about.
///
/// Expands to `#[multiversion::multiversion(targets(...))]`. Passing `baseline`
/// restricts the target set to the x86_64/aarch64 baselines regardless of
/// build profile, which keeps small helpers cheap to compile.
///
/// # Example
///
/// ```
/// use coverhue_macros::simd_targets;
///
/// #[simd_targets]
/// pub fn luma(r: f32, g: f32, b: f32) -> f32 {
///     0.2126 * r + 0.7152 * g + 0.0722 * b
/// }
/// ```
#[proc_macro_attribute]
pub fn simd_targets(attr: TokenStream, input: TokenStream) -> TokenStream {
    let func = parse_macro_input!(input as ItemFn);

    let baseline_only = if attr.is_empty() {
        false
    } else {
        let ident = parse_macro_input!(attr as Ident);
        if ident != "baseline" {
            return syn::Error::new(ident.span(), "expected `baseline` or no argument")
                .to_compile_error()
                .into();
        }
        true
    };

    let expanded = if baseline_only || cfg!(debug_assertions) {
        quote! {
            #[multiversion::multiversion(targets(
                "x86_64+sse2",
                "aarch64+neon",
            ))]
            #func
        }
    } else {
        quote! {
            #[multiversion::multiversion(targets(
                "x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
                "x86_64+avx2+fma",
                "x86_64+sse4.2",
                "x86_64+sse2",
                "aarch64+neon",
            ))]
            #func
        }
    };

    TokenStream::from(expanded)
}
