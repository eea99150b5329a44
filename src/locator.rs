use swc_core::{
    common::Spanned,
    ecma::{
        ast::*,
        visit::{Visit, VisitWith},
    },
};
use tracing::{debug, trace};

use crate::error::{ExtractError, Result};
use crate::parser::SourceDocument;
use crate::text::TextRange;

// -----------------------------------------------------------------------------
// Selected element
// -----------------------------------------------------------------------------

/// The markup element the extraction operates on, detached from the tree.
#[derive(Debug, Clone)]
pub struct SelectedElement {
    pub range: TextRange,
    pub name: JSXElementName,
    pub name_range: TextRange,
    pub closing_name_range: Option<TextRange>,
    pub attrs: Vec<JSXAttrOrSpread>,
}

impl SelectedElement {
    fn from_node(doc: &SourceDocument, node: &JSXElement) -> Self {
        Self {
            range: doc.range_of(node.span),
            name: node.opening.name.clone(),
            name_range: doc.range_of(node.opening.name.span()),
            closing_name_range: node.closing.as_ref().map(|c| doc.range_of(c.name.span())),
            attrs: node.opening.attrs.clone(),
        }
    }

    pub fn tag_name(&self) -> Result<TagName> {
        TagName::from_element_name(&self.name)
    }
}

/// How the styling helper has to wrap the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagName {
    /// Host element such as `div`: `styled.div`.
    Intrinsic(String),
    /// Another component (`Button`, `motion.div`): `styled(Button)`.
    Component(String),
}

impl TagName {
    pub fn from_element_name(name: &JSXElementName) -> Result<Self> {
        match name {
            JSXElementName::Ident(ident) => {
                let name = ident.sym.to_string();
                let custom = name
                    .chars()
                    .next()
                    .map(|c| c.is_uppercase())
                    .unwrap_or(false);
                if custom {
                    Ok(TagName::Component(name))
                } else {
                    Ok(TagName::Intrinsic(name))
                }
            }
            JSXElementName::JSXMemberExpr(m) => {
                fn object_path(obj: &JSXObject) -> String {
                    match obj {
                        JSXObject::Ident(i) => i.sym.to_string(),
                        JSXObject::JSXMemberExpr(inner) => {
                            format!("{}.{}", object_path(&inner.obj), inner.prop.sym)
                        }
                    }
                }
                Ok(TagName::Component(format!(
                    "{}.{}",
                    object_path(&m.obj),
                    m.prop.sym
                )))
            }
            JSXElementName::JSXNamespacedName(n) => Err(ExtractError::UnsupportedElementName(
                format!("{}:{}", n.ns.sym, n.name.sym),
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TagName::Intrinsic(s) | TagName::Component(s) => s,
        }
    }
}

// -----------------------------------------------------------------------------
// Locator
// -----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Location {
    pub element: SelectedElement,
    /// Start of the module-level declaration that contains the element.
    pub enclosing_declaration: Option<usize>,
    /// End of the last import, or 0.
    pub insert_position: usize,
    pub helper_imported: bool,
}

pub fn locate(doc: &SourceDocument, cursor: usize, helper: &str) -> Result<Location> {
    let mut locator = ElementLocator {
        doc,
        cursor,
        helper,
        anchor: None,
        selected: None,
        enclosing_declaration: None,
        insert_position: 0,
        helper_imported: false,
    };
    doc.module.visit_with(&mut locator);

    let ElementLocator {
        selected,
        enclosing_declaration,
        insert_position,
        helper_imported,
        ..
    } = locator;

    let element = selected.ok_or(ExtractError::ElementNotFound { offset: cursor })?;
    debug!(
        start = element.range.start,
        ?enclosing_declaration,
        insert_position,
        helper_imported,
        "located element"
    );

    Ok(Location {
        element,
        enclosing_declaration,
        insert_position,
        helper_imported,
    })
}

struct ElementLocator<'a> {
    doc: &'a SourceDocument,
    cursor: usize,
    helper: &'a str,

    // Module-level declaration currently being walked
    anchor: Option<usize>,

    selected: Option<SelectedElement>,
    enclosing_declaration: Option<usize>,
    insert_position: usize,
    helper_imported: bool,
}

impl ElementLocator<'_> {
    fn declaration_anchor(&self, item: &ModuleItem) -> Option<usize> {
        let is_declaration = match item {
            ModuleItem::Stmt(Stmt::Decl(Decl::Fn(_) | Decl::Var(_))) => true,
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(e)) => {
                matches!(e.decl, Decl::Fn(_) | Decl::Var(_))
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(e)) => {
                matches!(e.decl, DefaultDecl::Fn(_))
            }
            _ => false,
        };
        is_declaration.then(|| self.doc.offset_of(item.span().lo))
    }
}

impl Visit for ElementLocator<'_> {
    fn visit_module_item(&mut self, item: &ModuleItem) {
        // Items nested in namespaces keep the outermost anchor.
        let outer = self.anchor;
        if outer.is_none() {
            self.anchor = self.declaration_anchor(item);
        }
        item.visit_children_with(self);
        self.anchor = outer;
    }

    fn visit_import_decl(&mut self, n: &ImportDecl) {
        if !n.span.is_dummy() {
            self.insert_position = self.doc.offset_of(n.span.hi);
        }

        let binds_helper = n.specifiers.iter().any(|s| {
            let local = match s {
                ImportSpecifier::Named(s) => &s.local,
                ImportSpecifier::Default(s) => &s.local,
                ImportSpecifier::Namespace(s) => &s.local,
            };
            local.sym.as_ref() == self.helper
        });
        if binds_helper {
            self.helper_imported = true;
        }
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        if !node.span.is_dummy() {
            let start = self.doc.offset_of(node.span.lo);
            let is_better = start <= self.cursor
                && self
                    .selected
                    .as_ref()
                    .map_or(true, |current| start > current.range.start);
            if is_better {
                trace!(start, "selecting element");
                self.selected = Some(SelectedElement::from_node(self.doc, node));
                self.enclosing_declaration = self.anchor;
            }
        }
        node.visit_children_with(self);
    }
}
