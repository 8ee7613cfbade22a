// Google REST API clients.
// - `google_api.rs` holds the shared request/error plumbing.
// - One file per API: Drive (template copy), Docs (read), Slides (compose).

pub mod docs_client;
pub mod drive_client;
pub mod google_api;
pub mod slides_client;

pub use docs_client::GoogleDocsClient;
pub use drive_client::GoogleDriveClient;
pub use slides_client::GoogleSlidesClient;
