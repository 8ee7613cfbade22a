pub mod content_models;
pub mod content_service;

pub use content_models::{Document, ParagraphElement, StructuralElement};
pub use content_service::{
    extract_document_id, ContentFetcher, DocsApi, GoogleDocReader, PageFetcher, PublicUrlReader,
};
