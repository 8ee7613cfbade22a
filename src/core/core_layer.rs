// The core module contains all business logic.
// Each feature gets its own submodule; none of them know about HTTP.

#[path = "tools/tool_models.rs"]
pub mod tools;

#[path = "slides/mod.rs"]
pub mod slides;

#[path = "content/mod.rs"]
pub mod content;

#[path = "ai/mod.rs"]
pub mod ai;
