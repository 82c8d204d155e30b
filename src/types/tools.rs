//! Tool declaration and tool-choice types

use serde::{Deserialize, Serialize};

/// Function tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema for the parameters, passed through verbatim
    pub parameters: serde_json::Value,
}

/// A tool the model may invoke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Tool {
    /// User-defined function tool
    Function { function: ToolFunction },

    /// Provider-defined built-in tool (web search, code execution, ...).
    /// Zhipu has no wire representation for these; they are dropped with a
    /// warning.
    ProviderDefined {
        /// Tool identifier, e.g. "openai.web_search"
        name: String,
        /// Provider-specific arguments
        #[serde(default)]
        args: serde_json::Value,
    },
}

impl Tool {
    /// Create a function tool
    pub fn function(
        name: impl Into<String>,
        description: Option<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self::Function {
            function: ToolFunction {
                name: name.into(),
                description,
                parameters,
            },
        }
    }

    /// Name of the tool as the model sees it
    pub fn name(&self) -> &str {
        match self {
            Self::Function { function } => &function.name,
            Self::ProviderDefined { name, .. } => name,
        }
    }
}

/// Caller-specified constraint on tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolChoice {
    /// Model decides whether to call tools
    Auto,
    /// Model must call at least one tool
    Required,
    /// Model must not call tools
    None,
    /// Model must call the named tool
    Tool { name: String },
}

impl ToolChoice {
    /// Pin the choice to a specific tool
    pub fn tool(name: impl Into<String>) -> Self {
        Self::Tool { name: name.into() }
    }
}

/// Warning from the model provider
///
/// Warnings indicate non-fatal issues during generation, such as unsupported
/// settings or dropped tools. The generation continues despite warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Warning {
    /// An unsupported setting was provided
    UnsupportedSetting {
        setting: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    /// An unsupported tool was provided
    UnsupportedTool {
        tool_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    /// Other warning types
    Other { message: String },
}

impl Warning {
    /// Create an unsupported setting warning
    pub fn unsupported_setting(
        setting: impl Into<String>,
        details: Option<impl Into<String>>,
    ) -> Self {
        Self::UnsupportedSetting {
            setting: setting.into(),
            details: details.map(|d| d.into()),
        }
    }

    /// Create an unsupported tool warning
    pub fn unsupported_tool(
        tool_name: impl Into<String>,
        details: Option<impl Into<String>>,
    ) -> Self {
        Self::UnsupportedTool {
            tool_name: tool_name.into(),
            details: details.map(|d| d.into()),
        }
    }

    /// Create a generic warning
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}
