use serde::Serialize;
use std::collections::BTreeMap;

/// A tool the agent runtime can hand to the model.
///
/// Built-in tools are executed server-side by the model provider; function
/// declarations are executed by us through a `FunctionCallHandler`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AiTool {
    /// Google Search grounding (provider built-in).
    GoogleSearch,
    /// A custom function the model may call.
    FunctionDeclaration(FunctionDef),
    /// Delegation to another agent, exposed to the model as a tool.
    Agent { name: String },
}

/// Declaration of one callable function, in JSON-schema terms.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: FunctionParameters,
    /// Whether the runtime must inject a Google access token before calling.
    pub requires_auth: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionParameters {
    #[serde(rename = "type")]
    pub param_type: String,
    pub properties: BTreeMap<String, PropertyDef>,
    pub required: Vec<String>,
}

impl FunctionParameters {
    /// An object schema whose properties are all required strings.
    pub fn required_strings(props: &[(&str, &str)]) -> Self {
        let properties = props
            .iter()
            .map(|(name, description)| {
                (
                    name.to_string(),
                    PropertyDef {
                        prop_type: "string".to_string(),
                        description: Some(description.to_string()),
                    },
                )
            })
            .collect();

        Self {
            param_type: "object".to_string(),
            properties,
            required: props.iter().map(|(name, _)| name.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyDef {
    #[serde(rename = "type")]
    pub prop_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OAuth 2.0 authorization-code flow the runtime runs before calling
/// authenticated tools. The client secret is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct OAuthDescriptor {
    pub authorization_url: String,
    pub token_url: String,
    /// Scope -> human readable description shown on the consent screen.
    pub scopes: BTreeMap<String, String>,
    pub client_id: String,
}

/// Everything the agent runtime needs to instantiate one agent.
#[derive(Debug, Clone, Serialize)]
pub struct AgentDefinition {
    pub name: String,
    pub model: String,
    pub description: String,
    pub instruction: String,
    pub tools: Vec<AiTool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_agents: Vec<AgentDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<OAuthDescriptor>,
}

impl AgentDefinition {
    /// Names of the function declarations this agent exposes.
    pub fn function_names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .filter_map(|tool| match tool {
                AiTool::FunctionDeclaration(def) => Some(def.name.as_str()),
                _ => None,
            })
            .collect()
    }
}
