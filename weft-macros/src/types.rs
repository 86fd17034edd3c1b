use quote::ToTokens;

/////////////////////////////////////////////////////////////////////////////////////////

/// How a `#[derive(Buildable)]` field should be filled in. Only `Arc<T>`
/// fields are injectable — everything else is left for the host to supply
/// through `Partial::bind_instance` or a hand-written `Buildable` impl.
pub(crate) enum InjectionType {
    Injected { inner: syn::Type },
    Value { typ: syn::Type },
}

pub(crate) fn deduce_injection_type(typ: &syn::Type) -> InjectionType {
    if is_arc(typ) {
        InjectionType::Injected { inner: strip_arc(typ) }
    } else {
        InjectionType::Value { typ: typ.clone() }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn is_arc(typ: &syn::Type) -> bool {
    let syn::Type::Path(typepath) = typ else {
        return false;
    };

    if typepath.qself.is_some() || typepath.path.segments.len() != 1 {
        return false;
    }

    &typepath.path.segments[0].ident == "Arc"
}

pub(crate) fn strip_arc(typ: &syn::Type) -> syn::Type {
    match typ {
        syn::Type::Path(typepath) if typepath.qself.is_none() => match typepath.path.segments.first() {
            Some(seg) if seg.ident == "Arc" => match seg.arguments {
                syn::PathArguments::AngleBracketed(ref args) => syn::parse2(args.args.to_token_stream()).unwrap(),
                _ => typ.clone(),
            },
            _ => typ.clone(),
        },
        _ => typ.clone(),
    }
}
