use swc_core::{
    common::{sync::Lrc, BytePos, FileName, SourceFile, SourceMap, Span, Spanned, GLOBALS},
    ecma::{
        ast::{EsVersion, Module},
        parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax, TsSyntax},
    },
};
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::text::TextRange;

/// Markup-capable source dialects the extraction runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    Jsx,
    #[default]
    Tsx,
}

impl Dialect {
    pub fn from_language_id(id: &str) -> Option<Self> {
        match id {
            "javascriptreact" => Some(Dialect::Jsx),
            "typescriptreact" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jsx" | "js" | "mjs" | "cjs" => Some(Dialect::Jsx),
            "tsx" | "ts" | "mts" | "cts" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    fn syntax(self) -> Syntax {
        match self {
            Dialect::Jsx => Syntax::Es(EsSyntax {
                jsx: true,
                decorators: true,
                decorators_before_export: true,
                ..Default::default()
            }),
            Dialect::Tsx => Syntax::Typescript(TsSyntax {
                tsx: true,
                decorators: true,
                ..Default::default()
            }),
        }
    }
}

/// A parsed module together with what is needed to map its spans back onto
/// the original text.
#[derive(Debug)]
pub struct SourceDocument {
    pub module: Module,
    base: BytePos,
    len: usize,
}

impl SourceDocument {
    pub fn offset_of(&self, pos: BytePos) -> usize {
        (pos.0.saturating_sub(self.base.0) as usize).min(self.len)
    }

    pub fn range_of(&self, span: Span) -> TextRange {
        TextRange::new(self.offset_of(span.lo), self.offset_of(span.hi))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Parses `text` as a module.
///
/// `Jsx` documents are tried as plain JavaScript first and then under the
/// TSX grammar, so annotated (Flow-style) React code is still accepted. When
/// both attempts fail the JavaScript error is reported.
pub fn parse(text: &str, dialect: Dialect) -> Result<SourceDocument> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Anon.into(), text.to_string());

    GLOBALS.set(&Default::default(), || {
        let module = match parse_module(&fm, dialect.syntax()) {
            Ok(module) => module,
            Err(err) if dialect == Dialect::Jsx => {
                debug!(%err, "retrying document under the tsx grammar");
                parse_module(&fm, Dialect::Tsx.syntax()).map_err(|_| err)?
            }
            Err(err) => return Err(err),
        };

        debug!(items = module.body.len(), ?dialect, "parsed document");
        Ok(SourceDocument {
            module,
            base: fm.start_pos,
            len: text.len(),
        })
    })
}

fn parse_module(fm: &SourceFile, syntax: Syntax) -> Result<Module> {
    let base = fm.start_pos;
    let len = fm.src.len();
    let syntax_error = |err: swc_core::ecma::parser::error::Error| ExtractError::Syntax {
        message: err.kind().msg().to_string(),
        offset: (err.span().lo.0.saturating_sub(base.0) as usize).min(len),
    };

    let lexer = Lexer::new(syntax, EsVersion::EsNext, StringInput::from(fm), None);
    let mut parser = Parser::new_from(lexer);
    let module = parser.parse_module().map_err(syntax_error)?;

    // Recovered errors still mean the text is not valid source.
    if let Some(err) = parser.take_errors().into_iter().next() {
        return Err(syntax_error(err));
    }
    Ok(module)
}
