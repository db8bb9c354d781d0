//! skill_load tool - the LLM-facing surface over SkillRegistry
//!
//! The tool description is rendered from a template at construction time so
//! the model sees every registered skill inline, the same way it would see
//! a static tool description.

use std::sync::Arc;

use async_trait::async_trait;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use toolbase::{Tool, ToolResult};

use crate::registry::SkillRegistry;

/// Tool name for loading skill content
pub const SKILL_LOAD: &str = "skill_load";

const DESCRIPTION_TEMPLATE: &str = "\
Load skill documentation and artifacts to help answer user questions.

SKILL SYSTEM:
Skills are curated knowledge resources containing best practices, documentation,
and implementation guides. Use them to provide accurate, contextual assistance.

AVAILABLE SKILLS:
{{#if skills}}
{{#each skills}}
  - name: {{name}}
    description: {{description}}
{{#if license}}
    license: {{license}}
{{/if}}
{{/each}}
{{else}}
  (No skills registered yet)
{{/if}}

USAGE INSTRUCTIONS:
1. When a user asks a question, identify if any registered skill is relevant
2. Load the appropriate skill using skill_load(skill_name=\"<name>\")
3. Read and understand the skill content
4. If the skill.md references other files (examples, cheatsheets, etc.),
   you can use this same tool again with artifact_path to load those files
5. Use the loaded information to provide a comprehensive answer

EXAMPLES:
- skill_load(skill_name=\"python-best-practices\")
- skill_load(skill_name=\"python-best-practices\", artifact_path=\"examples.py\")

Always load relevant skills BEFORE answering questions that fall within their domain.";

#[derive(Debug, Serialize)]
struct SkillEntry {
    name: String,
    description: String,
    license: Option<String>,
}

#[derive(Debug, Serialize)]
struct DescriptionContext {
    skills: Vec<SkillEntry>,
}

/// Render the skill_load tool description for a registry
pub fn describe_all(registry: &SkillRegistry) -> String {
    let context = DescriptionContext {
        skills: registry
            .iter()
            .map(|meta| SkillEntry {
                name: meta.name.clone(),
                description: meta.description.clone(),
                license: meta.license.clone(),
            })
            .collect(),
    };

    match Handlebars::new().render_template(DESCRIPTION_TEMPLATE, &context) {
        Ok(rendered) => rendered,
        Err(e) => {
            warn!("describe_all: template rendering failed: {}", e);
            "Load skill documentation and artifacts to help answer user questions.".to_string()
        }
    }
}

/// Load skill documentation on demand
pub struct SkillLoadTool {
    registry: Arc<SkillRegistry>,
    description: String,
}

impl SkillLoadTool {
    /// Create the tool over a frozen registry
    ///
    /// The description is rendered once here; register skills before
    /// constructing the tool.
    pub fn new(registry: Arc<SkillRegistry>) -> Self {
        let description = describe_all(&registry);
        Self { registry, description }
    }
}

#[async_trait]
impl Tool for SkillLoadTool {
    fn name(&self) -> &'static str {
        SKILL_LOAD
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn input_schema(&self) -> Value {
        let mut skill_name_description = "Name of the skill to load".to_string();
        let names = self.registry.names();
        if !names.is_empty() {
            skill_name_description.push_str(&format!(". Available: {}", names.join(", ")));
        }

        serde_json::json!({
            "type": "object",
            "properties": {
                "skill_name": {
                    "type": "string",
                    "description": skill_name_description,
                },
                "artifact_path": {
                    "type": ["string", "null"],
                    "description": "Optional path to a specific artifact file within the skill folder. If omitted or empty, loads skill.md.",
                }
            },
            "required": ["skill_name"]
        })
    }

    async fn execute(&self, input: Value) -> ToolResult {
        let skill_name = match input["skill_name"].as_str() {
            Some(name) => name,
            None => return ToolResult::error("skill_name is required"),
        };
        let artifact_path = input["artifact_path"].as_str();

        let content = self.registry.skill_load(skill_name, artifact_path);
        if content.starts_with("Error:") {
            ToolResult::error(content)
        } else {
            ToolResult::success(content)
        }
    }
}
