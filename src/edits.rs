use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::text::TextRange;

/// One change against the original, unmodified document text.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditOperation {
    Insert { offset: usize, text: String },
    Replace { range: TextRange, text: String },
    Delete { range: TextRange },
}

impl EditOperation {
    pub fn range(&self) -> TextRange {
        match self {
            EditOperation::Insert { offset, .. } => TextRange::new(*offset, *offset),
            EditOperation::Replace { range, .. } | EditOperation::Delete { range } => *range,
        }
    }

    fn text(&self) -> &str {
        match self {
            EditOperation::Insert { text, .. } | EditOperation::Replace { text, .. } => text,
            EditOperation::Delete { .. } => "",
        }
    }
}

/// Everything the rewrite needs, with offsets into the original text.
#[derive(Debug, Clone)]
pub struct EditPlan<'a> {
    /// `None` when the helper is already imported.
    pub import_statement: Option<&'a str>,
    /// Empty when no props type is generated.
    pub typedef: &'a str,
    pub component: &'a str,
    pub component_name: &'a str,
    pub insert_position: usize,
    pub enclosing_declaration: Option<usize>,
    pub style_range: Option<TextRange>,
    pub opening_name: TextRange,
    pub closing_name: Option<TextRange>,
}

pub fn plan_edits(plan: &EditPlan<'_>) -> Vec<EditOperation> {
    let at = plan.insert_position;
    let mut edits = Vec::with_capacity(6);

    // Something was already inserted at `at` and ended with a newline.
    let mut inserted_at_position = false;

    if let Some(import) = plan.import_statement {
        let lead = if at > 0 { "\n" } else { "" };
        edits.push(EditOperation::Insert {
            offset: at,
            text: format!("{lead}{import}\n"),
        });
        inserted_at_position = true;
    }

    let component_offset = plan.enclosing_declaration.unwrap_or(at);
    let component_follows = component_offset == at;

    if !plan.typedef.is_empty() {
        let lead = if inserted_at_position {
            "\n"
        } else if at > 0 {
            "\n\n"
        } else {
            ""
        };
        let trail = if component_follows {
            "\n"
        } else if at == 0 {
            "\n\n"
        } else {
            ""
        };
        edits.push(EditOperation::Insert {
            offset: at,
            text: format!("{lead}{}{trail}", plan.typedef),
        });
        inserted_at_position = true;
    }

    let lead = if !component_follows {
        ""
    } else if inserted_at_position {
        "\n"
    } else if at > 0 {
        "\n\n"
    } else {
        ""
    };
    edits.push(EditOperation::Insert {
        offset: component_offset,
        text: format!("{lead}{}\n\n", plan.component),
    });

    if let Some(range) = plan.style_range {
        edits.push(EditOperation::Delete { range });
    }

    edits.push(EditOperation::Replace {
        range: plan.opening_name,
        text: plan.component_name.to_string(),
    });

    if let Some(range) = plan.closing_name {
        edits.push(EditOperation::Replace {
            range,
            text: plan.component_name.to_string(),
        });
    }

    debug!(count = edits.len(), component_offset, "planned edits");
    edits
}

/// Applies a batch computed against `text` in one pass, the way an editor
/// transaction does. Inserts at the same offset land in batch order.
pub fn apply_edits(text: &str, edits: &[EditOperation]) -> Result<String> {
    for edit in edits {
        let range = edit.range();
        if range.start > range.end || range.end > text.len() {
            return Err(ExtractError::EditApplication(format!(
                "range {}..{} is outside the document",
                range.start, range.end
            )));
        }
        if !text.is_char_boundary(range.start) || !text.is_char_boundary(range.end) {
            return Err(ExtractError::EditApplication(format!(
                "range {}..{} splits a character",
                range.start, range.end
            )));
        }
    }

    let mut ordered: Vec<&EditOperation> = edits.iter().collect();
    // Inserts go before a replacement starting at the same offset.
    ordered.sort_by_key(|e| (e.range().start, !matches!(e, EditOperation::Insert { .. })));

    let grown: usize = edits.iter().map(|e| e.text().len()).sum();
    let mut out = String::with_capacity(text.len() + grown);
    let mut cursor = 0usize;
    for edit in ordered {
        let range = edit.range();
        if range.start < cursor {
            return Err(ExtractError::EditApplication(format!(
                "edit at {}..{} overlaps a previous edit",
                range.start, range.end
            )));
        }
        out.push_str(&text[cursor..range.start]);
        out.push_str(edit.text());
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMPORT: &str = "import styled from \"styled-components\";";
    const COMPONENT: &str = "const StyledDiv = styled.div``;";

    fn plan<'a>(
        import_statement: Option<&'a str>,
        typedef: &'a str,
        insert_position: usize,
        enclosing_declaration: Option<usize>,
    ) -> EditPlan<'a> {
        EditPlan {
            import_statement,
            typedef,
            component: COMPONENT,
            component_name: "StyledDiv",
            insert_position,
            enclosing_declaration,
            style_range: None,
            opening_name: TextRange::new(0, 0),
            closing_name: None,
        }
    }

    fn inserted(edits: &[EditOperation]) -> Vec<(usize, &str)> {
        edits
            .iter()
            .filter_map(|e| match e {
                EditOperation::Insert { offset, text } => Some((*offset, text.as_str())),
                _ => None,
            })
            .collect()
    }

    fn apply_inserts(text: &str, edits: &[EditOperation]) -> String {
        let inserts: Vec<_> = edits
            .iter()
            .filter(|e| matches!(e, EditOperation::Insert { .. }))
            .cloned()
            .collect();
        apply_edits(text, &inserts).unwrap()
    }

    #[test]
    fn import_at_document_start_has_no_leading_newline() {
        let edits = plan_edits(&plan(Some(IMPORT), "", 0, None));
        assert_eq!(
            inserted(&edits),
            [
                (0, "import styled from \"styled-components\";\n"),
                (0, "\nconst StyledDiv = styled.div``;\n\n"),
            ]
        );
    }

    #[test]
    fn no_import_is_planned_when_the_helper_exists() {
        let edits = plan_edits(&plan(None, "", 30, Some(32)));
        assert_eq!(
            inserted(&edits),
            [(32, "const StyledDiv = styled.div``;\n\n")]
        );
    }

    #[test]
    fn import_typedef_and_component_are_separated_by_one_blank_line() {
        let text = "import React from 'react';\n<div/>;";
        let at = text.find('\n').unwrap();
        let edits = plan_edits(&plan(Some(IMPORT), "type StyledDivProps = {\n}", at, None));
        let out = apply_inserts(text, &edits);
        assert_eq!(
            out,
            "import React from 'react';\nimport styled from \"styled-components\";\n\ntype StyledDivProps = {\n}\n\nconst StyledDiv = styled.div``;\n\n\n<div/>;"
        );
    }

    #[test]
    fn typedef_after_existing_imports_without_a_new_import() {
        let text = "import styled from 'x';\n\nfunction App() {}";
        let at = text.find('\n').unwrap();
        let decl = text.find("function").unwrap();
        let edits = plan_edits(&plan(None, "type P = {\n}", at, Some(decl)));
        let out = apply_inserts(text, &edits);
        assert_eq!(
            out,
            "import styled from 'x';\n\ntype P = {\n}\n\nconst StyledDiv = styled.div``;\n\nfunction App() {}"
        );
    }

    #[test]
    fn component_after_existing_imports_starts_on_its_own_line() {
        let text = "import styled from 'x';\n<div/>;";
        let at = text.find('\n').unwrap();
        let edits = plan_edits(&plan(None, "", at, None));
        let out = apply_inserts(text, &edits);
        assert_eq!(
            out,
            "import styled from 'x';\n\nconst StyledDiv = styled.div``;\n\n\n<div/>;"
        );
    }

    #[test]
    fn typedef_at_document_start_is_followed_by_a_blank_line() {
        let text = "// app\nfunction App() {}";
        let decl = text.find("function").unwrap();
        let edits = plan_edits(&plan(Some(IMPORT), "type P = {\n}", 0, Some(decl)));
        let out = apply_inserts(text, &edits);
        assert_eq!(
            out,
            "import styled from \"styled-components\";\n\ntype P = {\n}\n\n// app\nconst StyledDiv = styled.div``;\n\nfunction App() {}"
        );
    }

    #[test]
    fn plans_the_fixed_operation_order() {
        let mut p = plan(Some(IMPORT), "type P = {\n}", 0, Some(10));
        p.style_range = Some(TextRange::new(20, 30));
        p.opening_name = TextRange::new(15, 18);
        p.closing_name = Some(TextRange::new(40, 43));
        let edits = plan_edits(&p);

        let kinds: Vec<_> = edits
            .iter()
            .map(|e| match e {
                EditOperation::Insert { offset, .. } => format!("insert@{offset}"),
                EditOperation::Delete { range } => format!("delete@{}", range.start),
                EditOperation::Replace { range, .. } => format!("replace@{}", range.start),
            })
            .collect();
        assert_eq!(
            kinds,
            ["insert@0", "insert@0", "insert@10", "delete@20", "replace@15", "replace@40"]
        );
    }

    #[test]
    fn apply_rejects_overlapping_edits() {
        let edits = [
            EditOperation::Delete { range: TextRange::new(0, 4) },
            EditOperation::Replace { range: TextRange::new(2, 3), text: "x".into() },
        ];
        assert!(matches!(
            apply_edits("abcdef", &edits),
            Err(ExtractError::EditApplication(_))
        ));
    }

    #[test]
    fn apply_rejects_ranges_outside_the_text() {
        let edits = [EditOperation::Insert { offset: 7, text: "x".into() }];
        assert!(apply_edits("abc", &edits).is_err());

        let edits = [EditOperation::Delete { range: TextRange::new(1, 2) }];
        assert!(apply_edits("é", &edits).is_err());
    }

    #[test]
    fn serializes_with_a_kind_tag() {
        let edit = EditOperation::Delete { range: TextRange::new(1, 2) };
        assert_eq!(
            serde_json::to_value(&edit).unwrap(),
            serde_json::json!({ "kind": "delete", "range": { "start": 1, "end": 2 } })
        );
    }
}
