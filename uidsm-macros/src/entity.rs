use crate::utils::{AttrArgs, apply_derives, ensure_leading_field, item_span};
use proc_macro::TokenStream;
use quote::quote;
use syn::{Item, Type, parse_macro_input};

/// #[entity] 宏实现
/// - 若缺失则追加私有字段 `id: Uuid`，并置于字段最前
/// - 合并派生：Debug, Clone, Default, PartialEq
/// - 实现 `::uidsm_model::entity::Entity`（NAME/Dto/new/id）
/// - 参数：`#[entity(dto = XxxDto)]`（必填）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as AttrArgs);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(item_span(&other), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let dto_ty = match args.only(&["dto"]).and_then(|_| args.ty("dto")) {
        Ok(Some(ty)) => ty,
        Ok(None) => {
            return syn::Error::new(st.ident.span(), "#[entity] requires `dto = <DtoType>`")
                .to_compile_error()
                .into();
        }
        Err(err) => return err.to_compile_error().into(),
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.ident.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let uuid_ty: Type = syn::parse_quote! { ::uidsm_model::uuid::Uuid };
    ensure_leading_field(fields_named, "id", &uuid_ty, &syn::Visibility::Inherited);

    apply_derives(
        &mut st.attrs,
        vec![
            syn::parse_quote!(Debug),
            syn::parse_quote!(Clone),
            syn::parse_quote!(Default),
            syn::parse_quote!(PartialEq),
        ],
    );

    let ident = &st.ident;
    let name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics ::uidsm_model::entity::Entity for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
            type Dto = #dto_ty;

            fn new(id: ::uidsm_model::uuid::Uuid) -> Self {
                Self { id, ..::core::default::Default::default() }
            }

            fn id(&self) -> ::uidsm_model::uuid::Uuid { self.id }
        }
    };

    TokenStream::from(expanded)
}
