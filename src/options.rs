use std::collections::HashMap;

pub const DEFAULT_HELPER: &str = "styled";
pub const DEFAULT_IMPORT_SOURCE: &str = "styled-components";
pub const DEFAULT_NAME_PREFIX: &str = "Styled";

/// Knobs for the generated code. Built from the host's loose JSON config map.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ExtractOptions {
    /// Local name the styling helper is bound to (`styled`).
    pub helper: String,
    /// Module the helper is imported from when missing.
    pub import_source: String,
    /// Prefix of the suggested component name (`Styled` + `Div`).
    pub name_prefix: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            helper: DEFAULT_HELPER.to_string(),
            import_source: DEFAULT_IMPORT_SOURCE.to_string(),
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
        }
    }
}

impl ExtractOptions {
    pub fn from_config(mut config: HashMap<String, serde_json::Value>) -> Self {
        let mut take = |key: &str| {
            config
                .remove(key)
                .and_then(|v| v.as_str().map(|s| s.trim().to_string()))
                .filter(|s| !s.is_empty())
        };

        let defaults = Self::default();
        Self {
            helper: take("helper").unwrap_or(defaults.helper),
            import_source: take("import_source").unwrap_or(defaults.import_source),
            name_prefix: take("name_prefix").unwrap_or(defaults.name_prefix),
        }
    }

    pub fn import_statement(&self) -> String {
        format!(
            "import {} from {};",
            self.helper,
            serde_json::to_string(&self.import_source).unwrap_or_else(|_| "\"\"".into())
        )
    }
}
