use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use exstyled::{
    apply_edits, extract_styled_component, Dialect, ExtractError, ExtractOptions, LineIndex,
    NamePrompt, NoHover, Position,
};

/// Extract the inline style of the JSX element under a cursor into a styled component.
#[derive(Parser, Debug)]
#[command(name = "exstyled", version)]
struct Args {
    /// Source file to rewrite.
    file: PathBuf,

    /// Byte offset of the cursor.
    #[arg(long, conflicts_with_all = ["line", "column"])]
    offset: Option<usize>,

    /// 1-based cursor line.
    #[arg(long, requires = "column")]
    line: Option<u32>,

    /// 1-based cursor column, in UTF-16 units.
    #[arg(long, requires = "line")]
    column: Option<u32>,

    /// Component name. Defaults to the suggested `Styled<Tag>`.
    #[arg(long)]
    name: Option<String>,

    /// Host language id (`javascriptreact` or `typescriptreact`).
    #[arg(long)]
    language: Option<String>,

    /// JSON object of options, e.g. `{"import_source": "@emotion/styled"}`.
    #[arg(long)]
    config: Option<String>,

    /// Print the edit batch as JSON instead of the rewritten file.
    #[arg(long, conflicts_with = "write")]
    json: bool,

    /// Rewrite the file in place.
    #[arg(long)]
    write: bool,
}

/// Non-interactive prompt: the `--name` argument, or the suggestion.
struct FixedName(Option<String>);

#[async_trait]
impl NamePrompt for FixedName {
    async fn prompt_name(&self, suggested: &str) -> Option<String> {
        Some(self.0.clone().unwrap_or_else(|| suggested.to_string()))
    }
}

fn dialect_for(args: &Args) -> anyhow::Result<Dialect> {
    if let Some(id) = &args.language {
        return Dialect::from_language_id(id)
            .ok_or_else(|| anyhow!("unsupported language id `{id}`"));
    }
    Ok(args
        .file
        .extension()
        .and_then(|e| e.to_str())
        .and_then(Dialect::from_extension)
        .unwrap_or_default())
}

fn cursor_for(args: &Args, text: &str) -> anyhow::Result<usize> {
    match (args.offset, args.line, args.column) {
        (Some(offset), _, _) => {
            if offset > text.len() {
                bail!("offset {offset} is past the end of the file");
            }
            Ok(offset)
        }
        (None, Some(line), Some(column)) if line > 0 && column > 0 => LineIndex::new(text)
            .offset_at(Position::new(line - 1, column - 1))
            .ok_or_else(|| anyhow!("{line}:{column} is outside the file")),
        _ => bail!("pass either --offset or --line and --column (1-based)"),
    }
}

fn options_for(args: &Args) -> anyhow::Result<ExtractOptions> {
    let Some(raw) = &args.config else {
        return Ok(ExtractOptions::default());
    };
    let config: HashMap<String, serde_json::Value> =
        serde_json::from_str(raw).context("--config must be a JSON object")?;
    Ok(ExtractOptions::from_config(config))
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("exstyled=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let dialect = dialect_for(&args)?;
    let cursor = cursor_for(&args, &text)?;
    let options = options_for(&args)?;
    debug!(?dialect, cursor, ?options, "running extraction");

    let prompt = FixedName(args.name.clone());
    let extraction = match futures::executor::block_on(extract_styled_component(
        &text, cursor, dialect, &options, &prompt, &NoHover,
    )) {
        Ok(extraction) => extraction,
        Err(ExtractError::NameAborted) => {
            eprintln!("Please enter a name");
            return Ok(());
        }
        Err(e) => return Err(e).context("extraction failed"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
        return Ok(());
    }

    let rewritten = apply_edits(&text, &extraction.edits)?;
    if args.write {
        std::fs::write(&args.file, rewritten)
            .with_context(|| format!("writing {}", args.file.display()))?;
    } else {
        print!("{rewritten}");
    }
    Ok(())
}
