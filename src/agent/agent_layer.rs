// Agent layer - the adapter between the core services and the agent runtime.
// `slide_tools` is the callable tool surface, `slide_generator` the agent
// definitions (prompt, model, tool list) the runtime instantiates.

#[path = "slide_tools.rs"]
pub mod slide_tools;

#[path = "slide_generator.rs"]
pub mod slide_generator;

pub use slide_generator::root_agent;
pub use slide_tools::SlideToolHandler;
