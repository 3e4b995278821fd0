use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Prompt sheets loaded from markdown files on disk. Reloaded per
/// request so editors can tweak them without restarting the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptCatalog {
    pub system: String,
    pub style: String,
    pub tools: String,
    pub safety: String,
    pub examples: String,
    pub combined: String,
}

impl PromptCatalog {
    pub fn load(dir: &Path) -> Self {
        let system = read_sheet(dir, "system.es.md");
        let style = read_sheet(dir, "style.es.md");
        let tools = read_sheet(dir, "tools.es.md");
        let safety = read_sheet(dir, "safety.es.md");
        let examples = read_sheet(dir, "examples.es.md");

        let combined = [&system, &style, &safety, &tools]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        Self {
            system,
            style,
            tools,
            safety,
            examples,
            combined,
        }
    }
}

fn read_sheet(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join(file))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
