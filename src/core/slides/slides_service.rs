// Presentation initializer and slide composer.
//
// Both services talk to Google through the `DriveApi` / `SlidesApi` ports so
// the layout-discovery logic can be tested without a network. Every remote
// failure becomes a `ToolError`; nothing is rolled back on failure, so a slide
// created before a later step fails stays in the deck.

use async_trait::async_trait;

use super::slides_models::{
    find_title_and_body_layout, locate_placeholders, new_slide_id, ComposedSlide,
    CreatedPresentation, Layout, PageElement, TextInsertion,
};
use crate::core::tools::{AccessToken, ApiError, ToolError, ToolResult};

/// Value shipped in sample configs that must be replaced before use.
pub const TEMPLATE_ID_PLACEHOLDER: &str = "YOUR_PRESENTATION_ID_HERE";

// ============================================================================
// PORTS
// ============================================================================

/// The single Drive call we need.
#[async_trait]
pub trait DriveApi: Send + Sync {
    /// Copies `file_id` under a new name and returns the copy's id.
    async fn copy_file(
        &self,
        token: &AccessToken,
        file_id: &str,
        name: &str,
    ) -> Result<String, ApiError>;
}

/// The Slides calls the composer needs.
#[async_trait]
pub trait SlidesApi: Send + Sync {
    /// Layouts of the presentation, in the order the service returns them.
    async fn list_layouts(
        &self,
        token: &AccessToken,
        presentation_id: &str,
    ) -> Result<Vec<Layout>, ApiError>;

    /// Creates a slide with `slide_id` from `layout_id`; returns the id the
    /// service reports for it.
    async fn create_slide(
        &self,
        token: &AccessToken,
        presentation_id: &str,
        slide_id: &str,
        layout_id: &str,
    ) -> Result<String, ApiError>;

    /// Page elements of one slide. `None` when the slide cannot be found.
    async fn get_slide_elements(
        &self,
        token: &AccessToken,
        presentation_id: &str,
        slide_id: &str,
    ) -> Result<Option<Vec<PageElement>>, ApiError>;

    /// Applies all insertions in a single batch request.
    async fn insert_text(
        &self,
        token: &AccessToken,
        presentation_id: &str,
        insertions: &[TextInsertion],
    ) -> Result<(), ApiError>;
}

// ============================================================================
// PRESENTATION INITIALIZER
// ============================================================================

pub struct PresentationInitializer<D: DriveApi> {
    drive: D,
    template_id: String,
}

impl<D: DriveApi> PresentationInitializer<D> {
    pub fn new(drive: D, template_id: impl Into<String>) -> Self {
        Self {
            drive,
            template_id: template_id.into(),
        }
    }

    pub fn is_template_configured(&self) -> bool {
        let id = self.template_id.trim();
        !id.is_empty() && !id.contains(TEMPLATE_ID_PLACEHOLDER)
    }

    /// Copies the template into a new presentation called `title`.
    pub async fn create_from_template(
        &self,
        title: &str,
        token: &AccessToken,
    ) -> ToolResult<CreatedPresentation> {
        if !self.is_template_configured() {
            tracing::warn!("create_presentation_from_template called without a template id");
            return Err(ToolError::TemplateNotConfigured);
        }

        let id = self
            .drive
            .copy_file(token, &self.template_id, title)
            .await
            .map_err(ToolError::Remote)?;

        tracing::info!("Created presentation '{}' ({})", title, id);
        Ok(CreatedPresentation::new(id))
    }
}

// ============================================================================
// SLIDE COMPOSER
// ============================================================================

pub struct SlideComposer<S: SlidesApi> {
    slides: S,
}

impl<S: SlidesApi> SlideComposer<S> {
    pub fn new(slides: S) -> Self {
        Self { slides }
    }

    /// Adds one slide with `title` and `body` to the presentation.
    ///
    /// Steps: pick the first layout with title+body placeholders, create the
    /// slide, re-read its elements (the create reply carries no placeholder
    /// ids), then write both texts in one batch.
    pub async fn create_slide(
        &self,
        presentation_id: &str,
        title: &str,
        body: &str,
        token: &AccessToken,
    ) -> ToolResult<ComposedSlide> {
        let layouts = self
            .slides
            .list_layouts(token, presentation_id)
            .await
            .map_err(ToolError::Unexpected)?;

        let layout_id = match find_title_and_body_layout(&layouts) {
            Some(layout) => layout.object_id.clone(),
            None => {
                tracing::warn!(
                    "No title+body layout among {} layouts of {}",
                    layouts.len(),
                    presentation_id
                );
                return Err(ToolError::NoSuitableLayout);
            }
        };

        let requested_id = new_slide_id();
        let slide_id = self
            .slides
            .create_slide(token, presentation_id, &requested_id, &layout_id)
            .await
            .map_err(ToolError::Unexpected)?;

        tracing::debug!("Created slide {} from layout {}", slide_id, layout_id);

        let elements = self
            .slides
            .get_slide_elements(token, presentation_id, &slide_id)
            .await
            .map_err(ToolError::Unexpected)?
            .unwrap_or_default();

        if elements.is_empty() {
            return Err(ToolError::SlideHasNoElements { slide_id });
        }

        let placeholders = locate_placeholders(&elements).ok_or_else(|| {
            ToolError::MissingPlaceholders {
                layout_id: layout_id.clone(),
            }
        })?;

        let insertions = [
            TextInsertion {
                object_id: placeholders.title,
                text: title.to_string(),
            },
            TextInsertion {
                object_id: placeholders.body,
                text: body.to_string(),
            },
        ];

        self.slides
            .insert_text(token, presentation_id, &insertions)
            .await
            .map_err(ToolError::Unexpected)?;

        tracing::info!("Slide '{}' added to {}", title, presentation_id);

        Ok(ComposedSlide {
            slide_id,
            layout_id,
            title: title.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slides::slides_models::PlaceholderRole;
    use crate::core::tools::ErrorKind;
    use std::sync::Mutex;

    // ------------------------------------------------------------------------
    // Mock Drive
    // ------------------------------------------------------------------------

    struct MockDrive {
        copies: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl MockDrive {
        fn new() -> Self {
            Self {
                copies: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl DriveApi for MockDrive {
        async fn copy_file(
            &self,
            _token: &AccessToken,
            file_id: &str,
            name: &str,
        ) -> Result<String, ApiError> {
            self.copies
                .lock()
                .unwrap()
                .push((file_id.to_string(), name.to_string()));
            if self.fail {
                return Err(ApiError::Status {
                    status: 404,
                    url: "https://www.googleapis.com/drive/v3/files/tmpl/copy".to_string(),
                    message: "File not found: tmpl.".to_string(),
                });
            }
            Ok("copy123".to_string())
        }
    }

    // ------------------------------------------------------------------------
    // Mock Slides
    // ------------------------------------------------------------------------

    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Step {
        ListLayouts,
        CreateSlide,
        GetElements,
        InsertText,
    }

    struct MockSlides {
        layouts: Vec<Layout>,
        slide_elements: Option<Vec<PageElement>>,
        fail_at: Option<Step>,
        created: Mutex<Vec<(String, String)>>,
        fetched: Mutex<Vec<String>>,
        inserted: Mutex<Vec<Vec<TextInsertion>>>,
    }

    impl MockSlides {
        fn new(layouts: Vec<Layout>, slide_elements: Option<Vec<PageElement>>) -> Self {
            Self {
                layouts,
                slide_elements,
                fail_at: None,
                created: Mutex::new(Vec::new()),
                fetched: Mutex::new(Vec::new()),
                inserted: Mutex::new(Vec::new()),
            }
        }

        fn failing_at(step: Step) -> Self {
            Self {
                fail_at: Some(step),
                ..Self::new(
                    vec![layout("tb", &[PlaceholderRole::Title, PlaceholderRole::Body])],
                    Some(filled_slide()),
                )
            }
        }

        fn check(&self, step: Step) -> Result<(), ApiError> {
            match (self.fail_at, step) {
                (Some(Step::ListLayouts), Step::ListLayouts) => Err(ApiError::Status {
                    status: 404,
                    url: "https://slides.googleapis.com/v1/presentations/pres1".to_string(),
                    message: "Requested entity was not found.".to_string(),
                }),
                (Some(Step::CreateSlide), Step::CreateSlide) => Err(ApiError::Status {
                    status: 400,
                    url: "https://slides.googleapis.com/v1/presentations/pres1:batchUpdate"
                        .to_string(),
                    message: "Invalid requests[0].createSlide".to_string(),
                }),
                (Some(Step::GetElements), Step::GetElements) => {
                    Err(ApiError::Decode("missing field `objectId`".to_string()))
                }
                (Some(Step::InsertText), Step::InsertText) => {
                    Err(ApiError::Transport("connection reset by peer".to_string()))
                }
                _ => Ok(()),
            }
        }
    }

    #[async_trait]
    impl SlidesApi for MockSlides {
        async fn list_layouts(
            &self,
            _token: &AccessToken,
            _presentation_id: &str,
        ) -> Result<Vec<Layout>, ApiError> {
            self.check(Step::ListLayouts)?;
            Ok(self.layouts.clone())
        }

        async fn create_slide(
            &self,
            _token: &AccessToken,
            _presentation_id: &str,
            slide_id: &str,
            layout_id: &str,
        ) -> Result<String, ApiError> {
            self.created
                .lock()
                .unwrap()
                .push((slide_id.to_string(), layout_id.to_string()));
            self.check(Step::CreateSlide)?;
            Ok(slide_id.to_string())
        }

        async fn get_slide_elements(
            &self,
            _token: &AccessToken,
            _presentation_id: &str,
            slide_id: &str,
        ) -> Result<Option<Vec<PageElement>>, ApiError> {
            self.fetched.lock().unwrap().push(slide_id.to_string());
            self.check(Step::GetElements)?;
            Ok(self.slide_elements.clone())
        }

        async fn insert_text(
            &self,
            _token: &AccessToken,
            _presentation_id: &str,
            insertions: &[TextInsertion],
        ) -> Result<(), ApiError> {
            self.check(Step::InsertText)?;
            self.inserted.lock().unwrap().push(insertions.to_vec());
            Ok(())
        }
    }

    fn token() -> AccessToken {
        AccessToken::new("test-token")
    }

    fn layout(id: &str, roles: &[PlaceholderRole]) -> Layout {
        Layout {
            object_id: id.to_string(),
            elements: roles
                .iter()
                .enumerate()
                .map(|(i, role)| PageElement::new(format!("{}_{}", id, i), Some(*role)))
                .collect(),
        }
    }

    fn filled_slide() -> Vec<PageElement> {
        vec![
            PageElement::new("slide_title", Some(PlaceholderRole::Title)),
            PageElement::new("slide_body", Some(PlaceholderRole::Body)),
        ]
    }

    // ------------------------------------------------------------------------
    // Presentation initializer
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_presentation_message() {
        let initializer = PresentationInitializer::new(MockDrive::new(), "template-1");

        let created = initializer
            .create_from_template("Q3 Report", &token())
            .await
            .unwrap();

        assert_eq!(created.id, "copy123");
        let message = created.to_string();
        assert!(message.contains("copy123"));
        assert!(message.contains("https://docs.google.com/presentation/d/copy123/"));

        let copies = initializer.drive.copies.lock().unwrap();
        assert_eq!(
            copies.as_slice(),
            &[("template-1".to_string(), "Q3 Report".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unconfigured_template_skips_drive() {
        for template in ["", "   ", "YOUR_PRESENTATION_ID_HERE"] {
            let initializer = PresentationInitializer::new(MockDrive::new(), template);

            let err = initializer
                .create_from_template("Deck", &token())
                .await
                .unwrap_err();

            assert!(matches!(err, ToolError::TemplateNotConfigured));
            assert_eq!(err.kind(), ErrorKind::Configuration);
            assert!(initializer.drive.copies.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_drive_failure_is_formatted() {
        let initializer = PresentationInitializer::new(MockDrive::failing(), "tmpl");

        let err = initializer
            .create_from_template("Deck", &token())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Remote);
        assert!(err.to_string().starts_with("Error: HTTP 404"));
    }

    // ------------------------------------------------------------------------
    // Slide composer
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_no_suitable_layout_skips_create() {
        let slides = MockSlides::new(
            vec![
                layout("title_only", &[PlaceholderRole::Title]),
                layout("body_only", &[PlaceholderRole::Body, PlaceholderRole::Other]),
            ],
            Some(filled_slide()),
        );
        let composer = SlideComposer::new(slides);

        let err = composer
            .create_slide("pres1", "Intro", "Hello", &token())
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::NoSuitableLayout));
        assert!(composer.slides.created.lock().unwrap().is_empty());
        assert!(composer.slides.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_layout_selected_when_first_to_qualify() {
        let slides = MockSlides::new(
            vec![
                layout("section_header", &[PlaceholderRole::Title]),
                layout(
                    "title_and_body",
                    &[PlaceholderRole::Title, PlaceholderRole::Body],
                ),
                layout(
                    "two_columns",
                    &[
                        PlaceholderRole::Title,
                        PlaceholderRole::Body,
                        PlaceholderRole::Body,
                    ],
                ),
            ],
            Some(filled_slide()),
        );
        let composer = SlideComposer::new(slides);

        let slide = composer
            .create_slide("pres1", "Intro", "Hello", &token())
            .await
            .unwrap();

        assert_eq!(slide.layout_id, "title_and_body");
        let created = composer.slides.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].1, "title_and_body");
        assert!(created[0].0.starts_with("new_slide_"));
    }

    #[tokio::test]
    async fn test_success_message_and_single_batch() {
        let slides = MockSlides::new(
            vec![layout(
                "title_and_body",
                &[PlaceholderRole::Title, PlaceholderRole::Body],
            )],
            Some(filled_slide()),
        );
        let composer = SlideComposer::new(slides);

        let slide = composer
            .create_slide("pres1", "Market Size", "- $4B TAM\n- 12% CAGR", &token())
            .await
            .unwrap();

        assert_eq!(slide.to_string(), "Slide 'Market Size' created successfully.");

        let inserted = composer.slides.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(
            inserted[0],
            vec![
                TextInsertion {
                    object_id: "slide_title".to_string(),
                    text: "Market Size".to_string(),
                },
                TextInsertion {
                    object_id: "slide_body".to_string(),
                    text: "- $4B TAM\n- 12% CAGR".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_slide_without_elements() {
        for elements in [None, Some(Vec::new())] {
            let slides = MockSlides::new(
                vec![layout("tb", &[PlaceholderRole::Title, PlaceholderRole::Body])],
                elements,
            );
            let composer = SlideComposer::new(slides);

            let err = composer
                .create_slide("pres1", "Intro", "Hello", &token())
                .await
                .unwrap_err();

            match &err {
                ToolError::SlideHasNoElements { slide_id } => {
                    assert!(slide_id.starts_with("new_slide_"));
                    assert!(err.to_string().contains(slide_id.as_str()));
                }
                other => panic!("unexpected error: {:?}", other),
            }
            assert!(composer.slides.inserted.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_slide_missing_body_placeholder() {
        let slides = MockSlides::new(
            vec![layout("tb", &[PlaceholderRole::Title, PlaceholderRole::Body])],
            Some(vec![PageElement::new(
                "slide_title",
                Some(PlaceholderRole::Title),
            )]),
        );
        let composer = SlideComposer::new(slides);

        let err = composer
            .create_slide("pres1", "Intro", "Hello", &token())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Logical);
        assert_eq!(
            err.to_string(),
            "Error: Could not find title or body placeholders on the new slide using layout 'tb'."
        );
        // The slide itself was created and is left in place.
        assert_eq!(composer.slides.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_failure_keeps_created_slide() {
        let composer = SlideComposer::new(MockSlides::failing_at(Step::InsertText));

        let err = composer
            .create_slide("pres1", "Intro", "Hello", &token())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "An unexpected error occurred: connection reset by peer"
        );
        assert_eq!(composer.slides.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_layout_listing_failure_skips_create() {
        let composer = SlideComposer::new(MockSlides::failing_at(Step::ListLayouts));

        let err = composer
            .create_slide("pres1", "Intro", "Hello", &token())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(
            err.to_string(),
            "An unexpected error occurred: HTTP 404 when requesting \
             https://slides.googleapis.com/v1/presentations/pres1: Requested entity was not found."
        );
        assert!(composer.slides.created.lock().unwrap().is_empty());
        assert!(composer.slides.fetched.lock().unwrap().is_empty());
        assert!(composer.slides.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_skips_fetch_and_insert() {
        let composer = SlideComposer::new(MockSlides::failing_at(Step::CreateSlide));

        let err = composer
            .create_slide("pres1", "Intro", "Hello", &token())
            .await
            .unwrap_err();

        assert!(err
            .to_string()
            .starts_with("An unexpected error occurred: HTTP 400"));
        assert_eq!(composer.slides.created.lock().unwrap().len(), 1);
        assert!(composer.slides.fetched.lock().unwrap().is_empty());
        assert!(composer.slides.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_element_fetch_failure_skips_insert() {
        let composer = SlideComposer::new(MockSlides::failing_at(Step::GetElements));

        let err = composer
            .create_slide("pres1", "Intro", "Hello", &token())
            .await
            .unwrap_err();

        assert!(err
            .to_string()
            .starts_with("An unexpected error occurred: "));
        let created = composer.slides.created.lock().unwrap();
        let fetched = composer.slides.fetched.lock().unwrap();
        assert_eq!(fetched.as_slice(), &[created[0].0.clone()]);
        assert!(composer.slides.inserted.lock().unwrap().is_empty());
    }
}
