use futures::future::join_all;
use tracing::debug;

use crate::attributes::AttributeSet;
use crate::hover::{lookup_member_type, HoverLookup, HoverTarget, MemberType};
use crate::text::is_identifier;

/// `name` or `"aria-label"`, whichever a type literal key needs.
fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        serde_json::to_string(name).unwrap_or_else(|_| format!("\"{name}\""))
    }
}

fn signature(name: &str, member: Option<MemberType>, fallback: &str) -> String {
    let key = property_key(name);
    match member {
        Some(MemberType { optional, ty }) => {
            format!("  {key}{}: {ty};", if optional { "?" } else { "" })
        }
        None => {
            debug!(member = name, "no hover type, falling back to {fallback}");
            format!("  {key}: {fallback};")
        }
    }
}

/// `type NameProps = { ... }` for the element's non-style attributes, or an
/// empty string when there are none.
pub async fn synthesize_typedef(
    lookup: &dyn HoverLookup,
    component_name: &str,
    attributes: Option<&AttributeSet>,
) -> String {
    let Some(attributes) = attributes else {
        return String::new();
    };

    let named = attributes.attributes.iter().map(|a| async move {
        let member =
            lookup_member_type(lookup, a.offset, &a.name, HoverTarget::Attribute).await;
        signature(&a.name, member, "unknown")
    });
    let spreads = attributes.spreads.iter().map(|s| async move {
        let member = lookup_member_type(lookup, s.offset, &s.name, HoverTarget::Spread).await;
        signature(&s.name, member, "unknown[]")
    });

    let (named, spreads) = futures::join!(join_all(named), join_all(spreads));
    let members: Vec<String> = named.into_iter().chain(spreads).collect();

    format!("type {component_name}Props = {{\n{}\n}}", members.join("\n"))
}
