// Slide generator agent: the tools an external agent runtime calls to build
// Google Slides decks.
//
// **Architecture Overview:**
// - `core/` = Business logic (layout discovery, text extraction, typed errors)
// - `infra/` = Implementations of core traits (Google REST APIs, plain HTTP)
// - `agent/` = Adapter to the agent runtime (tool surface, agent definitions)
// - `config` = Startup configuration, loaded once and passed to components

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
pub mod core;
#[path = "infra/infra_layer.rs"]
pub mod infra;
#[path = "agent/agent_layer.rs"]
pub mod agent;

pub mod config;
