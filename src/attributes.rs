use swc_core::{common::Spanned, ecma::ast::*};
use tracing::{debug, trace};

use crate::locator::SelectedElement;
use crate::parser::SourceDocument;
use crate::text::TextRange;

pub const STYLE_ATTRIBUTE: &str = "style";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Property {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StyleAttribute {
    pub range: TextRange,
    pub properties: Vec<Property>,
}

/// `name={...}` on the element, other than `style`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NamedAttribute {
    pub name: String,
    /// Where a hover lookup for the attribute should point.
    pub offset: usize,
}

/// `{...name}` on the element.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SpreadAttribute {
    pub name: String,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct AttributeSet {
    pub attributes: Vec<NamedAttribute>,
    pub spreads: Vec<SpreadAttribute>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub style: Option<StyleAttribute>,
    /// `None` when there is nothing to build a props type from.
    pub attributes: Option<AttributeSet>,
}

pub fn classify(element: &SelectedElement, doc: &SourceDocument) -> Classification {
    let style = style_attribute(&element.attrs, doc);
    let attributes = other_attributes(&element.attrs, doc);
    debug!(
        style_properties = style.as_ref().map(|s| s.properties.len()),
        attributes = attributes.as_ref().map(|a| a.attributes.len()),
        spreads = attributes.as_ref().map(|a| a.spreads.len()),
        "classified attributes"
    );
    Classification { style, attributes }
}

fn attr_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(n) => format!("{}:{}", n.ns.sym, n.name.sym),
    }
}

fn is_style(attr: &JSXAttr) -> bool {
    matches!(&attr.name, JSXAttrName::Ident(ident) if ident.sym.as_ref() == STYLE_ATTRIBUTE)
}

// -----------------------------------------------------------------------------
// style={{ ... }}
// -----------------------------------------------------------------------------

fn style_attribute(attrs: &[JSXAttrOrSpread], doc: &SourceDocument) -> Option<StyleAttribute> {
    let attr = attrs.iter().find_map(|a| match a {
        JSXAttrOrSpread::JSXAttr(attr) if is_style(attr) => Some(attr),
        _ => None,
    })?;

    let object = match &attr.value {
        Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
            expr: JSXExpr::Expr(expr),
            ..
        })) => match &**expr {
            Expr::Object(object) => object,
            _ => return None,
        },
        _ => return None,
    };

    let properties = object.props.iter().filter_map(style_property).collect();

    Some(StyleAttribute {
        range: doc.range_of(attr.span),
        properties,
    })
}

fn style_property(prop: &PropOrSpread) -> Option<Property> {
    let PropOrSpread::Prop(prop) = prop else {
        trace!("dropping spread in style object");
        return None;
    };
    let Prop::KeyValue(kv) = &**prop else {
        trace!("dropping non key/value style property");
        return None;
    };

    let key = match &kv.key {
        PropName::Ident(i) => i.sym.to_string(),
        PropName::Str(s) => s.value.to_string(),
        _ => {
            trace!("dropping style property with unsupported key");
            return None;
        }
    };

    let value = match &*kv.value {
        Expr::Lit(Lit::Str(s)) => s.value.to_string(),
        Expr::Lit(Lit::Num(n)) => n
            .raw
            .as_ref()
            .map(|raw| raw.to_string())
            .unwrap_or_else(|| n.value.to_string()),
        // Cooked text, so escapes are decoded the same way string literals are.
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .iter()
            .map(|q| q.cooked.as_deref())
            .collect::<Option<String>>()?,
        _ => {
            trace!(key, "dropping style property with dynamic value");
            return None;
        }
    };

    Some(Property { key, value })
}

// -----------------------------------------------------------------------------
// Everything else
// -----------------------------------------------------------------------------

fn other_attributes(attrs: &[JSXAttrOrSpread], doc: &SourceDocument) -> Option<AttributeSet> {
    let mut set = AttributeSet::default();

    for attr in attrs {
        match attr {
            JSXAttrOrSpread::JSXAttr(attr) => {
                if is_style(attr) {
                    continue;
                }
                set.attributes.push(NamedAttribute {
                    name: attr_name(&attr.name),
                    offset: doc.offset_of(attr.span.lo),
                });
            }
            JSXAttrOrSpread::SpreadElement(spread) => {
                let Some(name) = spread_name(&spread.expr) else {
                    debug!("skipping spread attribute without a usable name");
                    continue;
                };
                set.spreads.push(SpreadAttribute {
                    name,
                    offset: doc.offset_of(spread.expr.span().lo),
                });
            }
        }
    }

    if set.attributes.is_empty() && set.spreads.is_empty() {
        None
    } else {
        Some(set)
    }
}

fn spread_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(i) => Some(i.sym.to_string()),
        Expr::Member(m) => match &m.prop {
            MemberProp::Ident(p) => Some(p.sym.to_string()),
            _ => None,
        },
        Expr::Paren(p) => spread_name(&p.expr),
        _ => None,
    }
}
