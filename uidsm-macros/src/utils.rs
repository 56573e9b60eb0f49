use quote::ToTokens;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, Field, FieldsNamed, Ident, Item, Token, Type, Visibility};

// 归一化 derive 的 key，避免 Serialize/serde::Serialize 重复
fn derive_key(p: &syn::Path) -> String {
    match p.segments.last() {
        Some(last) => {
            let ident = last.ident.to_string();
            match ident.as_str() {
                "Serialize" | "Deserialize" => format!("serde::{ident}"),
                _ => ident,
            }
        }
        None => p.to_token_stream().to_string(),
    }
}

/// 合并宏要求的 derive 与用户已写的 derive，结果放在属性列表最前
/// （serde 等 helper 属性必须出现在 derive 之后）。
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<syn::Path>) {
    let mut retained = Vec::new();
    let mut existing = Vec::new();
    for attr in attrs.drain(..) {
        if !attr.path().is_ident("derive") {
            retained.push(attr);
            continue;
        }
        if let Ok(list) = attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
        {
            existing.extend(list);
        }
    }

    let mut seen = std::collections::HashSet::<String>::new();
    let merged: Vec<syn::Path> = required
        .into_iter()
        .chain(existing)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    attrs.push(syn::parse_quote!(#[derive(#(#merged),*)]));
    attrs.extend(retained);
}

/// 确保 `name: ty` 位于具名字段的最前面：已存在则移动，缺失则以给定可见性新增
pub(crate) fn ensure_leading_field(
    fields: &mut FieldsNamed,
    name: &str,
    ty: &Type,
    vis: &Visibility,
) {
    let ident = Ident::new(name, proc_macro2::Span::call_site());
    let old = std::mem::take(&mut fields.named);

    let (mut leading, rest): (Vec<Field>, Vec<Field>) = old
        .into_iter()
        .partition(|f| f.ident.as_ref().is_some_and(|i| i == name));

    let lead = leading
        .pop()
        .unwrap_or_else(|| syn::parse_quote! { #vis #ident: #ty });

    fields.named.push(lead);
    fields.named.extend(rest);
}

/// 移除字段上的标记属性（例如 `#[reference]`），返回是否曾存在
pub(crate) fn take_marker(field: &mut Field, marker: &str) -> bool {
    let before = field.attrs.len();
    field.attrs.retain(|a| !a.path().is_ident(marker));
    field.attrs.len() != before
}

/// 报错位置：有名字的条目取其标识符，否则取整个条目
pub(crate) fn item_span(item: &Item) -> proc_macro2::Span {
    match item {
        Item::Enum(e) => e.ident.span(),
        Item::Union(u) => u.ident.span(),
        Item::Fn(f) => f.sig.ident.span(),
        Item::Trait(t) => t.ident.span(),
        Item::Type(t) => t.ident.span(),
        other => other.span(),
    }
}

/// 键值形式的属性参数：`key = value, ...`
pub(crate) struct AttrArgs {
    pairs: Vec<(Ident, Expr)>,
}

impl Parse for AttrArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let assigns = Punctuated::<syn::ExprAssign, Token![,]>::parse_terminated(input)?;
        let mut pairs: Vec<(Ident, Expr)> = Vec::new();
        for assign in assigns {
            let key = match *assign.left {
                Expr::Path(p) if p.path.segments.len() == 1 => p.path.segments[0].ident.clone(),
                other => return Err(syn::Error::new(other.span(), "invalid attribute key")),
            };
            if pairs.iter().any(|(k, _)| *k == key) {
                return Err(syn::Error::new(
                    key.span(),
                    format!("duplicate key '{key}' in attribute"),
                ));
            }
            pairs.push((key, *assign.right));
        }
        Ok(Self { pairs })
    }
}

impl AttrArgs {
    /// 拒绝不在 `allowed` 中的键
    pub(crate) fn only(&self, allowed: &[&str]) -> syn::Result<()> {
        match self.pairs.iter().find(|(k, _)| !allowed.iter().any(|a| k == a)) {
            Some((key, _)) => Err(syn::Error::new(
                key.span(),
                format!("unknown key '{key}'; expected one of: {}", allowed.join(", ")),
            )),
            None => Ok(()),
        }
    }

    fn get(&self, key: &str) -> Option<&Expr> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// 读取类型参数，例如 `dto = ProjectDto`
    pub(crate) fn ty(&self, key: &str) -> syn::Result<Option<Type>> {
        self.get(key)
            .map(|expr| syn::parse2::<Type>(expr.to_token_stream()))
            .transpose()
    }

    /// 读取字符串字面量参数，例如 `tag = "ProjectDto"`
    pub(crate) fn str(&self, key: &str) -> syn::Result<Option<syn::LitStr>> {
        match self.get(key) {
            None => Ok(None),
            Some(Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(lit),
                ..
            })) => Ok(Some(lit.clone())),
            Some(other) => Err(syn::Error::new(
                other.span(),
                format!("expected string literal for '{key}'"),
            )),
        }
    }
}
