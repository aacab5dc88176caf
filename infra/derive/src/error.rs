use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Field, Fields, FieldsNamed, Ident, Type, Variant};

struct VariantInfo<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    message_only: bool,
}

pub fn expand(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let ext = format_ident!("{}Ext", name);

    let Data::Enum(data) = &input.data else {
        return quote! { compile_error!("brk_error can only be applied to enums"); };
    };

    let variants = match data.variants.iter().map(inspect_variant).collect::<Result<Vec<_>, _>>() {
        Ok(variants) => variants,
        Err(err) => return err,
    };
    if let Some(err) = duplicate_sources(&variants) {
        return err;
    }

    let derives = missing_derives(&input);
    let context_trait = context_trait(name, &ext, &variants);
    let from_impls = variants.iter().filter_map(|info| source_impls(name, &ext, info));
    let constructors = constructors(name, &variants);
    let cow = cow();

    quote! {
        #derives
        #input

        #context_trait
        #(#from_impls)*
        #constructors

        #[allow(dead_code)]
        fn format_context(context: &Option<#cow>) -> #cow {
            context.as_ref().map_or(::std::borrow::Cow::Borrowed(""), |c| format!(" ({c})").into())
        }
    }
}

fn inspect_variant(v: &Variant) -> Result<VariantInfo<'_>, TokenStream> {
    let Fields::Named(fields) = &v.fields else {
        return Err(syn::Error::new_spanned(v, "brk_error requires variants with named fields")
            .to_compile_error());
    };

    let Some(context) = named(fields, "context") else {
        return Err(syn::Error::new_spanned(
            &v.ident,
            "brk_error requires a `context: Option<Cow<'static, str>>` field on every variant",
        )
        .to_compile_error());
    };
    if !is_optional_cow(&context.ty) {
        return Err(syn::Error::new_spanned(
            &context.ty,
            "context field must be Option<Cow<'static, str>>",
        )
        .to_compile_error());
    }

    let source = fields
        .named
        .iter()
        .find(|f| {
            f.ident.as_ref().is_some_and(|i| i == "source")
                || f.attrs.iter().any(|a| a.path().is_ident("source") || a.path().is_ident("from"))
        })
        .and_then(|f| f.ident.as_ref().map(|ident| (ident, &f.ty)));

    let message_only = fields.named.len() == 2 && named(fields, "message").is_some();

    Ok(VariantInfo { ident: &v.ident, source, message_only })
}

fn named<'a>(fields: &'a FieldsNamed, name: &str) -> Option<&'a Field> {
    fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|i| i == name))
}

fn duplicate_sources(variants: &[VariantInfo<'_>]) -> Option<TokenStream> {
    let mut seen = FxHashSet::default();
    for info in variants {
        let Some((_, ty)) = info.source else { continue };
        if !seen.insert(quote!(#ty).to_string()) {
            return Some(
                syn::Error::new_spanned(
                    info.ident,
                    "brk_error allows each source type to be wrapped by a single variant",
                )
                .to_compile_error(),
            );
        }
    }
    None
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(seg) = meta.path.segments.last() {
                present.insert(seg.ident.to_string());
            }
            Ok(())
        });
    }

    let mut tokens = Vec::new();
    if !present.contains("Debug") {
        tokens.push(quote! { Debug });
    }
    if !present.contains("Error") {
        tokens.push(quote! { ::thiserror::Error });
    }
    if tokens.is_empty() { quote! {} } else { quote! { #[derive(#(#tokens),*)] } }
}

fn context_trait(name: &Ident, ext: &Ident, variants: &[VariantInfo<'_>]) -> TokenStream {
    let arms = variants.iter().map(|info| {
        let ident = info.ident;
        quote! { #name::#ident { context: c, .. } => *c = Some(context.into()), }
    });
    let cow = cow();

    quote! {
        pub trait #ext<T> {
            fn context(self, context: impl Into<#cow>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<#cow>) -> Self {
                self.map_err(|mut e| {
                    match &mut e {
                        #( #arms )*
                    }
                    e
                })
            }
        }
    }
}

fn source_impls(name: &Ident, ext: &Ident, info: &VariantInfo<'_>) -> Option<TokenStream> {
    let (field, ty) = info.source?;
    let variant = info.ident;
    let cow = cow();

    Some(quote! {
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self { Self::#variant { #field, context: None } }
        }

        #[automatically_derived]
        impl<T> #ext<T> for std::result::Result<T, #ty> {
            #[inline]
            fn context(self, context: impl Into<#cow>) -> std::result::Result<T, #name> {
                self.map_err(|#field| #name::#variant { #field, context: Some(context.into()) })
            }
        }
    })
}

fn constructors(name: &Ident, variants: &[VariantInfo<'_>]) -> TokenStream {
    let fns = variants.iter().filter(|info| info.message_only).map(|info| {
        let variant = info.ident;
        let ctor = format_ident!("{}", snake_case(&variant.to_string()));
        let cow = cow();
        quote! {
            #[must_use]
            pub fn #ctor(message: impl Into<#cow>) -> Self {
                Self::#variant { message: message.into(), context: None }
            }
        }
    });

    quote! {
        #[automatically_derived]
        #[allow(dead_code)]
        impl #name {
            #(#fns)*
        }
    }
}

fn cow() -> TokenStream {
    quote! { ::std::borrow::Cow<'static, str> }
}

fn snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn is_optional_cow(ty: &Type) -> bool {
    let Some(option) = last_segment(ty) else { return false };
    if option.ident != "Option" {
        return false;
    }
    let syn::PathArguments::AngleBracketed(args) = &option.arguments else {
        return false;
    };
    let Some(syn::GenericArgument::Type(inner)) = args.args.first() else {
        return false;
    };
    let Some(cow) = last_segment(inner) else { return false };
    if cow.ident != "Cow" {
        return false;
    }
    let syn::PathArguments::AngleBracketed(cow_args) = &cow.arguments else {
        return false;
    };
    let mut cow_args = cow_args.args.iter();
    let Some(syn::GenericArgument::Lifetime(lt)) = cow_args.next() else {
        return false;
    };
    let Some(syn::GenericArgument::Type(target)) = cow_args.next() else {
        return false;
    };
    lt.ident == "static" && last_segment(target).is_some_and(|seg| seg.ident == "str")
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    let Type::Path(path) = ty else { return None };
    path.path.segments.last()
}

#[cfg(test)]
mod tests {
    use super::snake_case;

    #[test]
    fn snake_case_splits_on_capitals() {
        assert_eq!(snake_case("Setup"), "setup");
        assert_eq!(snake_case("NotFound"), "not_found");
        assert_eq!(snake_case("InvalidConfiguration"), "invalid_configuration");
    }
}
