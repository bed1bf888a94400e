use syn::{ext::IdentExt, meta::ParseNestedMeta, Attribute, Field, LitStr, Token};

/// The case conversions `#[serde(rename_all = "...")]` accepts.
#[derive(Clone, Copy)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn from_literal(literal: &LitStr) -> syn::Result<Self> {
        Ok(match literal.value().as_str() {
            "lowercase" => RenameRule::Lower,
            "UPPERCASE" => RenameRule::Upper,
            "PascalCase" => RenameRule::Pascal,
            "camelCase" => RenameRule::Camel,
            "snake_case" => RenameRule::Snake,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnake,
            "kebab-case" => RenameRule::Kebab,
            "SCREAMING-KEBAB-CASE" => RenameRule::ScreamingKebab,
            other => {
                return Err(syn::Error::new(
                    literal.span(),
                    format!("unknown rename rule `{}`", other),
                ))
            }
        })
    }

    /// Rename a snake_case field name.
    pub fn apply(self, field: &str) -> String {
        match self {
            RenameRule::Lower | RenameRule::Snake => field.to_owned(),
            RenameRule::Upper | RenameRule::ScreamingSnake => field.to_ascii_uppercase(),
            RenameRule::Pascal => {
                let mut pascal = String::with_capacity(field.len());
                let mut capitalize = true;
                for ch in field.chars() {
                    if ch == '_' {
                        capitalize = true;
                    } else if capitalize {
                        pascal.push(ch.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        pascal.push(ch);
                    }
                }
                pascal
            }
            RenameRule::Camel => {
                let pascal = RenameRule::Pascal.apply(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => pascal,
                }
            }
            RenameRule::Kebab => field.replace('_', "-"),
            RenameRule::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

/// `rename_all` on the container, if any.
pub fn container_rule(attrs: &[Attribute]) -> syn::Result<Option<RenameRule>> {
    let mut rule = None;
    for attr in serde_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                rule = Some(RenameRule::from_literal(&single_name(&meta, "rename_all")?)?);
                Ok(())
            } else {
                skip(&meta)
            }
        })?;
    }
    Ok(rule)
}

/// The name serde writes for `field`: an explicit `rename`, else the
/// container rule applied to the field name.
pub fn field_name(field: &Field, rule: Option<RenameRule>) -> syn::Result<String> {
    let Some(ident) = &field.ident else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };

    let mut renamed = None;
    for attr in serde_attrs(&field.attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                renamed = Some(single_name(&meta, "rename")?.value());
                Ok(())
            } else {
                skip(&meta)
            }
        })?;
    }

    let name = ident.unraw().to_string();
    Ok(match (renamed, rule) {
        (Some(renamed), _) => renamed,
        (None, Some(rule)) => rule.apply(&name),
        (None, None) => name,
    })
}

fn serde_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("serde"))
}

/// `key = "name"`, or `key(serialize = "a", deserialize = "a")` when both
/// directions agree. A record field has a single name on the wire.
fn single_name(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    if meta.input.peek(Token![=]) {
        return meta.value()?.parse();
    }

    let mut serialize: Option<LitStr> = None;
    let mut deserialize: Option<LitStr> = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            serialize = Some(inner.value()?.parse()?);
            Ok(())
        } else if inner.path.is_ident("deserialize") {
            deserialize = Some(inner.value()?.parse()?);
            Ok(())
        } else {
            Err(inner.error("expected `serialize` or `deserialize`"))
        }
    })?;

    match (serialize, deserialize) {
        (Some(ser), Some(de)) if ser.value() == de.value() => Ok(ser),
        _ => Err(meta.error(format!(
            "Describe needs `{}` to give the same name for serialize and deserialize",
            key
        ))),
    }
}

/// Consume a serde option this derive does not read.
fn skip(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip(&inner))?;
    }
    Ok(())
}
