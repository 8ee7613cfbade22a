pub mod slides_models;
pub mod slides_service;

pub use slides_models::{
    presentation_url, ComposedSlide, CreatedPresentation, Layout, PageElement, PlaceholderRole,
    TextInsertion,
};
pub use slides_service::{DriveApi, PresentationInitializer, SlideComposer, SlidesApi};
