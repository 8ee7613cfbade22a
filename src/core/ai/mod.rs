pub mod function_handler;
pub mod models;

pub use function_handler::FunctionCallHandler;
pub use models::{AgentDefinition, AiTool, FunctionDef, FunctionParameters, OAuthDescriptor};
