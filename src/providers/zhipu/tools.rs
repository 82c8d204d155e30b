//! Tool declaration mapping and tool-choice policy

use serde_json::json;

use crate::types::{Tool, ToolChoice, Warning};

/// Outcome of preparing tool declarations for a request
#[derive(Debug, Clone, Default)]
pub struct PreparedTools {
    /// Tool declarations in provider format, `None` when nothing survives
    pub tools: Option<Vec<serde_json::Value>>,
    /// Provider tool-choice mode; Zhipu only understands "auto"
    pub tool_choice: Option<&'static str>,
    /// Dropped tools and downgraded choices
    pub warnings: Vec<Warning>,
}

/// Maps tool declarations and the tool-choice policy to the provider schema.
///
/// Provider-defined tools are dropped with a warning. A `Tool { name }`
/// choice is emulated by filtering the declarations down to the named tool
/// and letting the model pick among what remains.
pub fn prepare_tools(tools: Option<&[Tool]>, choice: Option<&ToolChoice>) -> PreparedTools {
    let tools = tools.unwrap_or(&[]);
    if tools.is_empty() {
        return PreparedTools::default();
    }

    let mut warnings = Vec::new();
    let mut declarations = Vec::new();

    for tool in tools {
        match tool {
            Tool::Function { function } => declarations.push(json!({
                "type": "function",
                "function": {
                    "name": function.name,
                    "description": function.description,
                    "parameters": function.parameters,
                },
            })),
            Tool::ProviderDefined { name, .. } => {
                warnings.push(Warning::unsupported_tool(name.clone(), None::<String>));
            }
        }
    }

    let (declarations, tool_choice) = match choice {
        None => (declarations, None),
        Some(ToolChoice::Auto) | Some(ToolChoice::Required) => (declarations, Some("auto")),
        Some(ToolChoice::None) => (declarations, None),
        Some(ToolChoice::Tool { name }) => {
            let filtered: Vec<_> = declarations
                .into_iter()
                .filter(|decl| decl["function"]["name"] == name.as_str())
                .collect();
            (filtered, Some("auto"))
        }
    };

    PreparedTools {
        tools: if declarations.is_empty() {
            None
        } else {
            Some(declarations)
        },
        tool_choice,
        warnings,
    }
}
