// The agent definitions handed to the agent runtime.
//
// The runtime owns the reasoning loop: it reads the instruction below, lets
// the model pick tools, runs the OAuth flow described by `OAuthDescriptor`,
// and calls back into `SlideToolHandler` with the resulting token.

use std::collections::BTreeMap;

use crate::config::{AgentConfig, AUTHORIZATION_URL, TOKEN_URL};
use crate::core::ai::models::{AgentDefinition, AiTool, OAuthDescriptor};
use crate::core::ai::FunctionCallHandler;

use super::slide_tools::{CREATE_PRESENTATION, CREATE_SLIDE, READ_GOOGLE_DOC, READ_PUBLIC_URL};

pub const ROOT_AGENT_NAME: &str = "slide_generator_agent";
pub const SEARCH_AGENT_NAME: &str = "search_agent";

fn slide_generator_instruction() -> String {
    format!(
        r#"**Persona & Tone:** Professional, concise, data-driven, and direct.
**Goal:** Understand what the user needs and produce a useful first draft of the presentation.

**Workflow:**
1. **Understand & Clarify:** Greet the user. Ask for the presentation's topic, purpose, and audience. Ask whether they have source content (a Google Doc link, a public Google Cloud Storage URL, or pasted text), the desired tone and slide count, and whether Google Search may be used for extra material.
2. **Gather & Plan:** Once clarified, call `{create}` with a suitable title. For source URLs pick the right reader: `{read_doc}` for 'docs.google.com' links, `{read_url}` for anything else (such as 'storage.googleapis.com'). Combine everything into a slide plan.
3. **Structure & Generate:** Give the deck a logical flow (e.g. Intro, Problem, Solution, Conclusion). For every slide write a short title and scannable body text, then call `{slide}` once per slide.
4. **Research:** If the user approved external research, delegate queries to `{search}` for supporting facts and figures.
5. **Deliver & Refine:** Share the presentation URL, say it is a first draft, and ask what should change. Wait for their reply."#,
        create = CREATE_PRESENTATION,
        read_doc = READ_GOOGLE_DOC,
        read_url = READ_PUBLIC_URL,
        slide = CREATE_SLIDE,
        search = SEARCH_AGENT_NAME,
    )
}

/// Sub-agent that only has the provider's built-in Google Search.
pub fn search_agent(model: &str) -> AgentDefinition {
    AgentDefinition {
        name: SEARCH_AGENT_NAME.to_string(),
        model: model.to_string(),
        description: "An AI agent to search for content using Google Search.".to_string(),
        instruction: "You are an expert at using Google Search to find relevant information \
                      for presentations."
            .to_string(),
        tools: vec![AiTool::GoogleSearch],
        sub_agents: Vec::new(),
        auth: None,
    }
}

pub fn oauth_descriptor(config: &AgentConfig) -> OAuthDescriptor {
    let scopes: BTreeMap<String, String> = config
        .scopes
        .iter()
        .map(|scope| (scope.clone(), "Access Google APIs".to_string()))
        .collect();

    OAuthDescriptor {
        authorization_url: AUTHORIZATION_URL.to_string(),
        token_url: TOKEN_URL.to_string(),
        scopes,
        client_id: config.oauth.client_id.clone(),
    }
}

/// The root agent: the handler's function tools plus the search sub-agent.
pub fn root_agent(config: &AgentConfig, handler: &dyn FunctionCallHandler) -> AgentDefinition {
    let mut tools: Vec<AiTool> = handler
        .declarations()
        .into_iter()
        .map(AiTool::FunctionDeclaration)
        .collect();
    tools.push(AiTool::Agent {
        name: SEARCH_AGENT_NAME.to_string(),
    });

    AgentDefinition {
        name: ROOT_AGENT_NAME.to_string(),
        model: config.model.clone(),
        description: "An AI agent to create presentations from text or documents.".to_string(),
        instruction: slide_generator_instruction(),
        tools,
        sub_agents: vec![search_agent(&config.model)],
        auth: Some(oauth_descriptor(config)),
    }
}
