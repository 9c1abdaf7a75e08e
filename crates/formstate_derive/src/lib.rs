use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

#[proc_macro_derive(FormModel)]
pub fn derive_form_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            input.ident,
            "FormModel derive currently supports only non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    let vis = input.vis;
    let model_ident = input.ident;
    let fields_struct_ident = format_ident!("{model_ident}Fields");

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new(
                    Span::call_site(),
                    "FormModel derive requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new(
                Span::call_site(),
                "FormModel derive is only supported on structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let form = form_path();
    let mut lens_defs = Vec::new();
    let mut fields_methods = Vec::new();
    let mut keys = Vec::new();
    let mut read_arms = Vec::new();
    let mut write_arms = Vec::new();

    for field in named_fields {
        let Some(field_ident) = field.ident else {
            continue;
        };
        let field_ty = field.ty;
        let field_name = field_ident.unraw().to_string();
        let lens_ident = format_ident!("{model_ident}{}Lens", to_pascal_case(&field_name));

        lens_defs.push(quote! {
            #[derive(Clone, Copy, Debug, Default)]
            #vis struct #lens_ident;

            impl #form::FieldLens<#model_ident> for #lens_ident {
                type Value = #field_ty;

                fn key(self) -> #form::FieldKey {
                    #form::FieldKey::new(#field_name)
                }

                fn get<'a>(self, model: &'a #model_ident) -> &'a Self::Value {
                    &model.#field_ident
                }

                fn set(self, model: &mut #model_ident, value: Self::Value) {
                    model.#field_ident = value;
                }
            }
        });

        fields_methods.push(quote! {
            #vis const fn #field_ident(&self) -> #lens_ident {
                #lens_ident
            }
        });

        keys.push(quote! { #form::FieldKey::new(#field_name) });

        read_arms.push(quote! {
            #field_name => ::core::option::Option::Some(
                #form::FieldType::into_field_value(::core::clone::Clone::clone(&self.#field_ident)),
            ),
        });

        write_arms.push(quote! {
            #field_name => {
                self.#field_ident = <#field_ty as #form::FieldType>::decode(key, value)?;
                ::core::result::Result::Ok(())
            }
        });
    }

    quote! {
        #[derive(Clone, Copy, Debug, Default)]
        #vis struct #fields_struct_ident;

        impl #fields_struct_ident {
            #(#fields_methods)*
        }

        impl #form::FormModel for #model_ident {
            type Fields = #fields_struct_ident;

            fn fields() -> Self::Fields {
                #fields_struct_ident
            }

            fn field_keys() -> &'static [#form::FieldKey] {
                const KEYS: &[#form::FieldKey] = &[#(#keys),*];
                KEYS
            }

            fn read_field(
                &self,
                key: #form::FieldKey,
            ) -> ::core::option::Option<#form::FieldValue> {
                match key.as_str() {
                    #(#read_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn write_field(
                &mut self,
                key: #form::FieldKey,
                value: #form::FieldValue,
            ) -> #form::FormResult<()> {
                match key.as_str() {
                    #(#write_arms)*
                    _ => ::core::result::Result::Err(#form::FormError::UnknownField(
                        ::std::string::String::from(key.as_str()),
                    )),
                }
            }
        }

        #(#lens_defs)*
    }
    .into()
}

fn form_path() -> TokenStream2 {
    match crate_name("formstate") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident::form)
        }
        Ok(FoundCrate::Itself) => quote!(crate::form),
        Err(_) => quote!(::formstate::form),
    }
}

fn to_pascal_case(input: &str) -> String {
    let mut out = String::new();
    for segment in input.split('_') {
        if segment.is_empty() {
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
