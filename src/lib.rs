//! Extract an inline `style={{ ... }}` object from a JSX element into a
//! `styled` component declared at module level.
//!
//! The pipeline runs on a snapshot of the document and a cursor offset:
//! [`parser::parse`] builds the tree, [`locator::locate`] finds the element,
//! [`attributes::classify`] splits its attributes, [`component`] and
//! [`typedef`] synthesize the new declarations, and [`edits::plan_edits`]
//! produces a batch of edits against the original text for the host to
//! apply in one transaction.

pub mod attributes;
pub mod command;
pub mod component;
pub mod edits;
pub mod error;
pub mod hover;
pub mod locator;
pub mod options;
pub mod parser;
pub mod text;
pub mod typedef;

pub use command::{
    analyze, extract_styled_component, offers_extraction, Analysis, Extraction, NamePrompt,
    CODE_ACTION_TITLE, COMMAND_NAME, EXTENSION_NAME, SUPPORTED_LANGUAGES,
};
pub use edits::{apply_edits, EditOperation};
pub use error::{ExtractError, Result};
pub use hover::{Hover, HoverLookup, NoHover};
pub use options::ExtractOptions;
pub use parser::Dialect;
pub use text::{LineIndex, Position, TextRange};
