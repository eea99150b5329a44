use async_trait::async_trait;
use regex::Regex;

/// One hover result from the host, as a list of markdown fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Hover {
    pub contents: Vec<String>,
}

impl Hover {
    pub fn new<S: Into<String>>(contents: impl IntoIterator<Item = S>) -> Self {
        Self {
            contents: contents.into_iter().map(Into::into).collect(),
        }
    }
}

/// Editor hover information at a byte offset of the document being edited.
///
/// Lookups are best effort: an empty result only costs type precision.
#[async_trait]
pub trait HoverLookup: Send + Sync {
    async fn hover(&self, offset: usize) -> Vec<Hover>;
}

/// Host without hover support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHover;

#[async_trait]
impl HoverLookup for NoHover {
    async fn hover(&self, _offset: usize) -> Vec<Hover> {
        Vec::new()
    }
}

/// A member type recovered from hover text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberType {
    pub optional: bool,
    pub ty: String,
}

/// Where the hover was requested, which decides how its text is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    /// `(property) Owner.name?: Type`
    Attribute,
    /// `const name: Type`
    Spread,
}

pub async fn lookup_member_type(
    lookup: &dyn HoverLookup,
    offset: usize,
    name: &str,
    target: HoverTarget,
) -> Option<MemberType> {
    let hovers = lookup.hover(offset).await;
    let fragment = typescript_fragment(&hovers)?;
    member_type(fragment, name, target)
}

fn typescript_fragment(hovers: &[Hover]) -> Option<&str> {
    hovers
        .iter()
        .flat_map(|h| h.contents.iter())
        .map(String::as_str)
        .find(|c| c.contains("typescript"))
}

pub fn member_type(fragment: &str, name: &str, target: HoverTarget) -> Option<MemberType> {
    let signature = match target {
        HoverTarget::Attribute => &fragment[fragment.find(')')? + 1..],
        HoverTarget::Spread => fragment,
    };
    let clean = signature.replace('`', "");

    let pattern = format!(r#"(?s)(?:^|[^\w$])['"]?{}['"]?(\?)?:\s*(.*)"#, regex::escape(name));
    let caps = Regex::new(&pattern).ok()?.captures(&clean)?;

    let ty = caps.get(2)?.as_str().trim_end().replace('\n', "\n  ");
    if ty.is_empty() {
        return None;
    }
    Some(MemberType {
        optional: caps.get(1).is_some(),
        ty,
    })
}
