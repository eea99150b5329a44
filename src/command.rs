use async_trait::async_trait;
use tracing::{debug, info};

use crate::attributes::{classify, AttributeSet, StyleAttribute};
use crate::component::synthesize_component;
use crate::edits::{plan_edits, EditOperation, EditPlan};
use crate::error::{ExtractError, Result};
use crate::hover::HoverLookup;
use crate::locator::{locate, SelectedElement, TagName};
use crate::options::ExtractOptions;
use crate::parser::{parse, Dialect};
use crate::text::is_identifier;
use crate::typedef::synthesize_typedef;

pub const COMMAND_NAME: &str = "extension.exstyled";
pub const EXTENSION_NAME: &str = "ExStyled";
pub const CODE_ACTION_TITLE: &str = "✨ Extract styled component";
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["javascriptreact", "typescriptreact"];

// -----------------------------------------------------------------------------
// Host-facing helpers
// -----------------------------------------------------------------------------

/// Whether the extraction is worth offering for a line: it opens or closes a tag.
pub fn offers_extraction(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('<') || line.ends_with('>')
}

pub fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `div` -> `StyledDiv`, `motion.div` -> `StyledMotionDiv`.
pub fn suggested_component_name(tag: &TagName, prefix: &str) -> String {
    let body: String = tag
        .as_str()
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .map(capitalize_first)
        .collect();
    format!("{prefix}{body}")
}

/// Turns what the user typed into the component name, or aborts.
pub fn accept_component_name(input: Option<String>) -> Result<String> {
    let name = input
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ExtractError::NameAborted)?;
    let name = capitalize_first(&name);
    if !is_identifier(&name) {
        return Err(ExtractError::InvalidComponentName(name));
    }
    Ok(name)
}

/// Asks the user for the new component's name. `None` means dismissed.
#[async_trait]
pub trait NamePrompt: Send + Sync {
    async fn prompt_name(&self, suggested: &str) -> Option<String>;
}

// -----------------------------------------------------------------------------
// Pipeline
// -----------------------------------------------------------------------------

/// Everything known about the document before the user picks a name.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub element: SelectedElement,
    pub tag: TagName,
    pub enclosing_declaration: Option<usize>,
    pub insert_position: usize,
    pub helper_imported: bool,
    pub style: Option<StyleAttribute>,
    pub attributes: Option<AttributeSet>,
}

impl Analysis {
    pub fn element_name(&self) -> &str {
        self.tag.as_str()
    }
}

/// Parse, locate and classify. Errors here are fatal to the command.
pub fn analyze(text: &str, cursor: usize, dialect: Dialect, options: &ExtractOptions) -> Result<Analysis> {
    let doc = parse(text, dialect)?;
    let location = locate(&doc, cursor, &options.helper)?;
    let tag = location.element.tag_name()?;
    let classification = classify(&location.element, &doc);

    Ok(Analysis {
        tag,
        enclosing_declaration: location.enclosing_declaration,
        insert_position: location.insert_position,
        helper_imported: location.helper_imported,
        style: classification.style,
        attributes: classification.attributes,
        element: location.element,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Extraction {
    pub component_name: String,
    pub edits: Vec<EditOperation>,
}

/// Builds the edit batch for an analysed document and a chosen name.
pub async fn build_edits(
    analysis: &Analysis,
    component_name: &str,
    options: &ExtractOptions,
    hover: &dyn HoverLookup,
) -> Vec<EditOperation> {
    let typedef = synthesize_typedef(hover, component_name, analysis.attributes.as_ref()).await;
    let component = synthesize_component(
        &analysis.tag,
        component_name,
        analysis.style.as_ref(),
        !typedef.is_empty(),
        &options.helper,
    );
    let import_statement = (!analysis.helper_imported).then(|| options.import_statement());

    plan_edits(&EditPlan {
        import_statement: import_statement.as_deref(),
        typedef: &typedef,
        component: &component,
        component_name,
        insert_position: analysis.insert_position,
        enclosing_declaration: analysis.enclosing_declaration,
        style_range: analysis.style.as_ref().map(|s| s.range),
        opening_name: analysis.element.name_range,
        closing_name: analysis.element.closing_name_range,
    })
}

/// The whole command: analyse, ask for a name, synthesize, plan.
pub async fn extract_styled_component(
    text: &str,
    cursor: usize,
    dialect: Dialect,
    options: &ExtractOptions,
    prompt: &dyn NamePrompt,
    hover: &dyn HoverLookup,
) -> Result<Extraction> {
    let analysis = analyze(text, cursor, dialect, options)?;
    debug!(element = analysis.element_name(), cursor, "extracting styled component");

    let suggested = suggested_component_name(&analysis.tag, &options.name_prefix);
    let component_name = match accept_component_name(prompt.prompt_name(&suggested).await) {
        Ok(name) => name,
        Err(ExtractError::NameAborted) => {
            info!("component name prompt dismissed");
            return Err(ExtractError::NameAborted);
        }
        Err(e) => return Err(e),
    };

    let edits = build_edits(&analysis, &component_name, options, hover).await;
    Ok(Extraction {
        component_name,
        edits,
    })
}
