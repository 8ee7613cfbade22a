use async_trait::async_trait;

use super::models::FunctionDef;
use crate::core::tools::AccessToken;

/// Executes function calls requested by the model.
///
/// Every call returns plain text: success messages and error messages alike.
/// The agent runtime only understands textual tool results, so the handler is
/// the last place any failure can surface.
#[async_trait]
pub trait FunctionCallHandler: Send + Sync {
    /// Runs `name` with JSON `args`. `credential` is the access token the
    /// runtime injected for authenticated tools, if any.
    async fn handle_function_call(
        &self,
        name: &str,
        args: &serde_json::Value,
        credential: Option<&AccessToken>,
    ) -> String;

    /// Declarations for every function this handler can run.
    fn declarations(&self) -> Vec<FunctionDef>;

    fn supported_functions(&self) -> Vec<String> {
        self.declarations().into_iter().map(|d| d.name).collect()
    }
}

// Lets the agent layer hold handlers as trait objects.
#[async_trait]
impl FunctionCallHandler for Box<dyn FunctionCallHandler> {
    async fn handle_function_call(
        &self,
        name: &str,
        args: &serde_json::Value,
        credential: Option<&AccessToken>,
    ) -> String {
        (**self).handle_function_call(name, args, credential).await
    }

    fn declarations(&self) -> Vec<FunctionDef> {
        (**self).declarations()
    }
}
