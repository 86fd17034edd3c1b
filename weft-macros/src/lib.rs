extern crate proc_macro;

mod types;

use proc_macro::TokenStream;
use quote::quote;
use types::InjectionType;

/////////////////////////////////////////////////////////////////////////////////////////

/// Derives `weft::Buildable` for a struct whose fields are all `Arc<T>`,
/// deducing its [`weft::Signature`] from the field types and generating a
/// `construct` body that pulls each field from the injector passed in.
///
/// ```ignore
/// #[derive(Buildable)]
/// struct Greeter {
///     logger: Arc<dyn Logger>,
/// }
/// ```
///
/// Fields that aren't `Arc<T>` aren't injectable this way — bind them with
/// `Partial::bind_instance` instead, or hand-write the `Buildable` impl.
#[proc_macro_derive(Buildable)]
pub fn derive_buildable(item: TokenStream) -> TokenStream {
    let ast: syn::ItemStruct = syn::parse(item).expect("#[derive(Buildable)] only supports structs");
    derive_buildable_struct(ast)
}

/////////////////////////////////////////////////////////////////////////////////////////

fn derive_buildable_struct(ast: syn::ItemStruct) -> TokenStream {
    let struct_name = &ast.ident;

    let fields: Vec<(syn::Ident, syn::Type)> = ast
        .fields
        .iter()
        .map(|f| {
            (
                f.ident.clone().expect("#[derive(Buildable)] does not support tuple structs"),
                f.ty.clone(),
            )
        })
        .collect();

    let mut param_infos = Vec::new();
    let mut field_ctors = Vec::new();

    for (name, typ) in &fields {
        match types::deduce_injection_type(typ) {
            InjectionType::Injected { inner } => {
                param_infos.push(quote! {
                    ::weft::ParamInfo::injected(::weft::TypeInfo::of::<#inner>())
                });
                field_ctors.push(quote! {
                    #name: injector.get::<#inner>()?
                });
            }
            InjectionType::Value { typ } => {
                panic!(
                    "#[derive(Buildable)] field `{}` has type `{}`, which isn't `Arc<T>` and so \
                     can't be resolved from the container. Bind it with Partial::bind_instance \
                     or write the Buildable impl by hand.",
                    name,
                    quote! { #typ },
                );
            }
        }
    }

    let gen = quote! {
        impl ::weft::Buildable for #struct_name {
            fn signature() -> ::weft::Signature {
                ::weft::Signature::new(
                    ::weft::TypeInfo::of::<#struct_name>(),
                    vec![ #( #param_infos, )* ],
                )
            }

            fn construct(injector: &::weft::Injector) -> ::std::result::Result<Self, ::weft::InjectionError> {
                ::std::result::Result::Ok(Self {
                    #( #field_ctors, )*
                })
            }
        }
    };

    gen.into()
}
