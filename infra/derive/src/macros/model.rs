use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Field, Fields, Ident, LitStr};

#[derive(Default)]
struct FieldOptions {
    read_only: bool,
    skip: bool,
    rename: Option<LitStr>,
}

struct MappedField<'a> {
    ident: &'a Ident,
    external: String,
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(name, "Model can only be derived for structs"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(name, "Model requires a struct with named fields"));
    };

    let model_name = container_name(&input.attrs)?.unwrap_or_else(|| name.to_string());

    let mut read_only: Option<&Ident> = None;
    let mut mapped = Vec::new();

    for field in &fields.named {
        let Some(ident) = field.ident.as_ref() else { continue };
        let options = field_options(field)?;

        if options.read_only {
            if read_only.is_some() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "Model allows exactly one #[model(read_only)] field",
                ));
            }
            read_only = Some(ident);
            continue;
        }
        if options.skip {
            continue;
        }

        let external = options.rename.map_or_else(|| ident.to_string(), |lit| lit.value());
        if mapped.iter().any(|m: &MappedField<'_>| m.external == external) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate external field name `{external}`"),
            ));
        }
        mapped.push(MappedField { ident, external });
    }

    let Some(read_only) = read_only else {
        return Err(syn::Error::new_spanned(
            name,
            "Model requires a `bool` field marked #[model(read_only)]",
        ));
    };

    let external_names: Vec<&str> = mapped.iter().map(|m| m.external.as_str()).collect();
    let arms = mapped.iter().map(|m| {
        let ident = m.ident;
        let external = &m.external;
        quote! {
            #external => {
                self.#ident = ::h2m_mapping::model::convert(field, value)?;
            }
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::h2m_mapping::Model for #name #ty_generics #where_clause {
            fn model_name(&self) -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed(#model_name)
            }

            fn mark_read_only(&mut self) {
                self.#read_only = true;
            }

            fn is_read_only(&self) -> bool {
                self.#read_only
            }

            fn field_names(&self) -> ::std::vec::Vec<::std::borrow::Cow<'static, str>> {
                ::std::vec![#(::std::borrow::Cow::Borrowed(#external_names)),*]
            }

            fn set_field(
                &mut self,
                field: &str,
                value: ::h2m_mapping::Value,
            ) -> ::std::result::Result<(), ::h2m_mapping::FieldError> {
                match field {
                    #(#arms)*
                    _ => return ::std::result::Result::Err(::h2m_mapping::FieldError::unknown(field)),
                }
                ::std::result::Result::Ok(())
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }
    })
}

fn container_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("model")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                if name.replace(lit.value()).is_some() {
                    return Err(meta.error("Duplicate argument"));
                }
                return Ok(());
            }
            Err(meta.error("Unsupported container argument; expected `name = \"...\"`"))
        })?;
    }

    Ok(name)
}

fn field_options(field: &Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("model")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("read_only") {
                options.read_only = true;
                return Ok(());
            }
            if meta.path.is_ident("skip") {
                options.skip = true;
                return Ok(());
            }
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                if options.rename.replace(lit).is_some() {
                    return Err(meta.error("Duplicate argument"));
                }
                return Ok(());
            }
            Err(meta.error("Unsupported field argument; expected read_only, skip or rename"))
        })?;
    }

    if options.read_only && (options.skip || options.rename.is_some()) {
        return Err(syn::Error::new_spanned(
            field,
            "#[model(read_only)] cannot be combined with skip or rename",
        ));
    }

    Ok(options)
}
