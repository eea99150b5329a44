use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use exstyled::{
    apply_edits, extract_styled_component, Dialect, EditOperation, ExtractError, ExtractOptions,
    Hover, HoverLookup, NamePrompt, NoHover,
};

struct Answer(Option<&'static str>);

#[async_trait]
impl NamePrompt for Answer {
    async fn prompt_name(&self, _suggested: &str) -> Option<String> {
        self.0.map(str::to_string)
    }
}

struct AcceptSuggestion;

#[async_trait]
impl NamePrompt for AcceptSuggestion {
    async fn prompt_name(&self, suggested: &str) -> Option<String> {
        Some(suggested.to_string())
    }
}

#[derive(Default)]
struct CountingHover {
    canned: HashMap<usize, Vec<Hover>>,
    calls: AtomicUsize,
}

#[async_trait]
impl HoverLookup for CountingHover {
    async fn hover(&self, offset: usize) -> Vec<Hover> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.canned.get(&offset).cloned().unwrap_or_default()
    }
}

async fn rewrite(text: &str, cursor: usize, prompt: &dyn NamePrompt, hover: &dyn HoverLookup) -> String {
    let extraction = extract_styled_component(
        text,
        cursor,
        Dialect::Tsx,
        &ExtractOptions::default(),
        prompt,
        hover,
    )
    .await
    .unwrap();
    apply_edits(text, &extraction.edits).unwrap()
}

#[tokio::test]
async fn extracts_style_and_props_type_above_the_component() {
    let text = r#"import React from 'react';

export function App() {
  return (
    <div className="app" style={{ marginTop: '12px', color: 'red' }}>
      hello
    </div>
  );
}
"#;
    let cursor = text.find("<div").unwrap() + 1;
    let out = rewrite(text, cursor, &Answer(Some("card")), &NoHover).await;

    assert_eq!(
        out,
        r#"import React from 'react';
import styled from "styled-components";

type CardProps = {
  className: unknown;
}

const Card = styled.div<CardProps>`
  margin-top: 12px;
  color: red;
`;

export function App() {
  return (
    <Card className="app" >
      hello
    </Card>
  );
}
"#
    );
}

#[tokio::test]
async fn reuses_an_existing_helper_import() {
    let text = "import styled from 'styled-components';\n\nconst Title = () => <h1 style={{ fontWeight: 'bold' }}>Hi</h1>;\n";
    let cursor = text.find("<h1").unwrap() + 2;

    let extraction = extract_styled_component(
        text,
        cursor,
        Dialect::Tsx,
        &ExtractOptions::default(),
        &AcceptSuggestion,
        &NoHover,
    )
    .await
    .unwrap();

    assert_eq!(extraction.component_name, "StyledH1");
    let inserts = extraction
        .edits
        .iter()
        .filter(|e| matches!(e, EditOperation::Insert { .. }))
        .count();
    assert_eq!(inserts, 1);

    assert_eq!(
        apply_edits(text, &extraction.edits).unwrap(),
        "import styled from 'styled-components';\n\nconst StyledH1 = styled.h1`\n  font-weight: bold;\n`;\n\nconst Title = () => <StyledH1 >Hi</StyledH1>;\n"
    );
}

#[tokio::test]
async fn wraps_components_and_types_spreads_from_hover() {
    let text = "function Toolbar(rest: { id: string }) {\n  return <Button {...rest} style={{ padding: `4px` }} />;\n}\n";
    let cursor = text.find("<Button").unwrap() + 3;
    let spread_at = text.find("rest}").unwrap();

    let hover = CountingHover {
        canned: HashMap::from([(
            spread_at,
            vec![Hover::new(["```typescript\n(parameter) rest: {\n    id: string;\n}\n```"])],
        )]),
        ..Default::default()
    };
    let out = rewrite(text, cursor, &AcceptSuggestion, &hover).await;

    assert_eq!(hover.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        out,
        "import styled from \"styled-components\";\n\ntype StyledButtonProps = {\n  rest: {\n      id: string;\n  };\n}\n\nconst StyledButton = styled(Button)<StyledButtonProps>`\n  padding: 4px;\n`;\n\nfunction Toolbar(rest: { id: string }) {\n  return <StyledButton {...rest}  />;\n}\n"
    );
}

#[tokio::test]
async fn dynamic_styles_are_left_in_place() {
    let text = "const s = { color: 'red' };\nexport default function Box() {\n  return <div style={s}></div>;\n}\n";
    let cursor = text.find("<div").unwrap() + 1;

    let extraction = extract_styled_component(
        text,
        cursor,
        Dialect::Jsx,
        &ExtractOptions::default(),
        &AcceptSuggestion,
        &NoHover,
    )
    .await
    .unwrap();

    assert!(!extraction
        .edits
        .iter()
        .any(|e| matches!(e, EditOperation::Delete { .. })));

    let out = apply_edits(text, &extraction.edits).unwrap();
    assert!(out.contains("const StyledDiv = styled.div``;\n\nexport default function Box()"));
    assert!(out.contains("<StyledDiv style={s}></StyledDiv>"));
}

#[tokio::test]
async fn dismissing_the_prompt_aborts_before_hover_lookups() {
    let text = "const a = <div title=\"x\" style={{ color: 'red' }} />;";
    let hover = CountingHover::default();

    for answer in [None, Some(""), Some("   ")] {
        let result = extract_styled_component(
            text,
            12,
            Dialect::Tsx,
            &ExtractOptions::default(),
            &Answer(answer),
            &hover,
        )
        .await;
        assert_eq!(result, Err(ExtractError::NameAborted));
    }
    assert_eq!(hover.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn no_element_at_the_cursor_is_an_error() {
    let result = extract_styled_component(
        "const a = 1;\n",
        4,
        Dialect::Tsx,
        &ExtractOptions::default(),
        &AcceptSuggestion,
        &NoHover,
    )
    .await;
    assert_eq!(result, Err(ExtractError::ElementNotFound { offset: 4 }));
}

#[tokio::test]
async fn invalid_source_is_a_syntax_error() {
    let result = extract_styled_component(
        "const a = <div style={{ color: 'red' }};",
        12,
        Dialect::Tsx,
        &ExtractOptions::default(),
        &AcceptSuggestion,
        &NoHover,
    )
    .await;
    assert!(matches!(result, Err(ExtractError::Syntax { .. })));
}

#[tokio::test]
async fn configured_helper_is_used_for_import_and_declaration() {
    let text = "<span style={{ lineHeight: 1.5 }} />";
    let options = ExtractOptions {
        helper: "styledEmotion".into(),
        import_source: "@emotion/styled".into(),
        ..Default::default()
    };
    let extraction = extract_styled_component(
        text,
        1,
        Dialect::Jsx,
        &options,
        &Answer(Some("Line")),
        &NoHover,
    )
    .await
    .unwrap();

    assert_eq!(
        apply_edits(text, &extraction.edits).unwrap(),
        "import styledEmotion from \"@emotion/styled\";\n\nconst Line = styledEmotion.span`\n  line-height: 1.5;\n`;\n\n<Line  />"
    );
}

#[tokio::test]
async fn escaped_template_values_survive_the_rewrite() {
    let text = r"const a = <div style={{ content: `a\`b`, quotes: `\${x}` }}/>;";
    let out = rewrite(text, 11, &Answer(Some("Quote")), &NoHover).await;

    assert!(out.contains("const Quote = styled.div`\n  content: a\\`b;\n  quotes: \\${x};\n`;"));
    assert!(exstyled::parser::parse(&out, Dialect::Tsx).is_ok());
}
