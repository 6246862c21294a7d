use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    ext::IdentExt, parenthesized, parse_macro_input, punctuated::Punctuated, Data, DeriveInput,
    Fields, Ident, Result as SynResult, Token, Type, Visibility,
};

/// How a field value is wrapped before it is normalized.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Wrap {
    Plain,
    Backed,
    Text,
    Nested,
    Serialized,
}

struct FieldOptions {
    skip: bool,
    wrap: Wrap,
}

fn field_options(field: &syn::Field) -> SynResult<FieldOptions> {
    let mut options = FieldOptions {
        skip: false,
        wrap: Wrap::Plain,
    };
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("plain_dto")) {
        attr.parse_nested_meta(|meta| {
            let wrap = if meta.path.is_ident("skip") {
                options.skip = true;
                return Ok(());
            } else if meta.path.is_ident("backed") {
                Wrap::Backed
            } else if meta.path.is_ident("text") {
                Wrap::Text
            } else if meta.path.is_ident("nested") {
                Wrap::Nested
            } else if meta.path.is_ident("serialize") {
                Wrap::Serialized
            } else {
                return Err(meta.error("expected one of `skip`, `backed`, `text`, `nested`, `serialize`"));
            };
            if options.wrap != Wrap::Plain {
                return Err(meta.error("only one value wrapper per field"));
            }
            options.wrap = wrap;
            Ok(())
        })?;
    }
    Ok(options)
}

fn accessors(input: &DeriveInput) -> SynResult<Vec<Ident>> {
    let mut names = Vec::new();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("plain_dto")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("accessors") {
                let content;
                parenthesized!(content in meta.input);
                let listed = Punctuated::<Ident, Token![,]>::parse_terminated(&content)?;
                names.extend(listed);
                Ok(())
            } else {
                Err(meta.error("expected `accessors(...)`"))
            }
        })?;
    }
    Ok(names)
}

fn is_vec(ty: &Type) -> bool {
    if let Type::Path(p) = ty {
        if let Some(seg) = p.path.segments.last() {
            return seg.ident == "Vec";
        }
    }
    false
}

fn field_value(ident: &Ident, ty: &Type, wrap: Wrap) -> TokenStream2 {
    let target = if is_vec(ty) {
        quote! { self.#ident.as_slice() }
    } else {
        quote! { &self.#ident }
    };
    match wrap {
        Wrap::Plain => quote! { &self.#ident },
        Wrap::Backed => quote! { &::usecase_http::dto::Backed(#target) },
        Wrap::Nested => quote! { &::usecase_http::dto::Nested(#target) },
        Wrap::Text => quote! { &::usecase_http::dto::Text(&self.#ident) },
        Wrap::Serialized => quote! { &::usecase_http::dto::Serialized(&self.#ident) },
    }
}

fn expand(input: DeriveInput) -> SynResult<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "PlainDto requires named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "PlainDto can only be derived for structs",
            ))
        }
    };

    let mut field_calls = Vec::new();
    for field in fields {
        let options = field_options(field)?;
        if options.skip || !matches!(field.vis, Visibility::Public(_)) {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let name = ident.unraw().to_string();
        let value = field_value(ident, &field.ty, options.wrap);
        field_calls.push(quote! { projection.field(#name, #value); });
    }

    let accessor_calls = accessors(&input)?.into_iter().map(|method| {
        let name = method.unraw().to_string();
        quote! { projection.accessor(#name, &self.#method()); }
    });

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::usecase_http::dto::PlainDto for #ident #ty_generics #where_clause {
            fn describe(&self, projection: &mut ::usecase_http::dto::Projection) {
                #(#field_calls)*
                #(#accessor_calls)*
            }
        }
    })
}

/// Derive `usecase_http::dto::PlainDto` for a struct with named fields.
///
/// Public fields are projected in declaration order, followed by the
/// accessors listed in `#[plain_dto(accessors(...))]`.
#[proc_macro_derive(PlainDto, attributes(plain_dto))]
pub fn derive_plain_dto(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}
