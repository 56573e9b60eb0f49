use crate::utils::{AttrArgs, apply_derives, ensure_leading_field, item_span, take_marker};
use proc_macro::TokenStream;
use quote::quote;
use syn::{Item, Type, parse_macro_input};

/// #[entity_dto] 宏实现
/// - 若缺失则追加公开字段 `pub id: Uuid`，并置于字段最前
/// - 合并派生：Debug, Clone, Default, PartialEq, Serialize, Deserialize，
///   并追加 `#[serde(rename_all = "camelCase", default)]`
/// - 收集标注 `#[reference]` 的字段，生成 `references()`
/// - 参数：`#[entity_dto(entity = Xxx, tag = "...")]`，`tag` 默认为结构体名
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as AttrArgs);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(item_span(&other), "#[entity_dto] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let parsed = args
        .only(&["entity", "tag"])
        .and_then(|_| Ok((args.ty("entity")?, args.str("tag")?)));
    let (entity_ty, tag) = match parsed {
        Ok((Some(entity_ty), tag)) => (entity_ty, tag),
        Ok((None, _)) => {
            return syn::Error::new(
                st.ident.span(),
                "#[entity_dto] requires `entity = <EntityType>`",
            )
            .to_compile_error()
            .into();
        }
        Err(err) => return err.to_compile_error().into(),
    };
    let tag = tag.unwrap_or_else(|| syn::LitStr::new(&st.ident.to_string(), st.ident.span()));

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.ident.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let uuid_ty: Type = syn::parse_quote! { ::uidsm_model::uuid::Uuid };
    ensure_leading_field(fields_named, "id", &uuid_ty, &syn::parse_quote!(pub));

    let mut references: Vec<syn::Ident> = Vec::new();
    for field in fields_named.named.iter_mut() {
        if take_marker(field, "reference") {
            references.extend(field.ident.clone());
        }
    }

    apply_derives(
        &mut st.attrs,
        vec![
            syn::parse_quote!(Debug),
            syn::parse_quote!(Clone),
            syn::parse_quote!(Default),
            syn::parse_quote!(PartialEq),
            syn::parse_quote!(serde::Serialize),
            syn::parse_quote!(serde::Deserialize),
        ],
    );
    st.attrs
        .push(syn::parse_quote!(#[serde(rename_all = "camelCase", default)]));

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics ::uidsm_model::dto::EntityDto for #ident #ty_generics #where_clause {
            const TAG: &'static str = #tag;
            type Entity = #entity_ty;

            fn id(&self) -> ::uidsm_model::uuid::Uuid { self.id }

            fn references(&self) -> ::std::vec::Vec<::uidsm_model::uuid::Uuid> {
                #[allow(unused_mut)]
                let mut out = ::std::vec::Vec::new();
                #( ::uidsm_model::dto::ReferenceIds::collect_ids(&self.#references, &mut out); )*
                out
            }
        }
    };

    TokenStream::from(expanded)
}
