use crate::attributes::{Property, StyleAttribute};
use crate::locator::TagName;

/// `marginTop` -> `margin-top`. Keys without uppercase letters pass through.
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_uppercase() {
            out.push('-');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Escapes decoded text so the template literal cooks back to exactly `value`.
fn escape_template(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

pub fn style_block(properties: &[Property]) -> String {
    if properties.is_empty() {
        return "\n".to_string();
    }
    let lines: Vec<String> = properties
        .iter()
        .map(|p| format!("  {}: {}", kebab_case(&p.key), escape_template(&p.value)))
        .collect();
    format!("\n{};\n", lines.join(";\n"))
}

/// `const Name = styled.tag`...`;` or `const Name = styled(Tag)`...`;`.
pub fn synthesize_component(
    tag: &TagName,
    component_name: &str,
    style: Option<&StyleAttribute>,
    has_type_param: bool,
    helper: &str,
) -> String {
    let tag_expr = match tag {
        TagName::Intrinsic(name) => format!("{helper}.{name}"),
        TagName::Component(name) => format!("{helper}({name})"),
    };
    let type_arg = if has_type_param {
        format!("<{component_name}Props>")
    } else {
        String::new()
    };
    let block = style
        .map(|s| style_block(&s.properties))
        .unwrap_or_default();

    format!("const {component_name} = {tag_expr}{type_arg}`{block}`;")
}
