// Slides domain models. Nothing here knows about HTTP or JSON field names;
// the infra layer maps Google's wire format into these types.

use std::fmt;

/// Base of the shareable viewer link for a presentation.
pub const PRESENTATION_URL_BASE: &str = "https://docs.google.com/presentation/d/";

/// Role of a placeholder region inside a layout or slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderRole {
    Title,
    Body,
    /// Any other role (`CENTERED_TITLE`, `SUBTITLE`, `SLIDE_NUMBER`...).
    Other,
}

impl PlaceholderRole {
    /// Maps the Slides API placeholder `type` string. Only the exact `TITLE`
    /// and `BODY` types count; `CENTERED_TITLE` is deliberately `Other`.
    pub fn from_api(kind: &str) -> Self {
        match kind {
            "TITLE" => PlaceholderRole::Title,
            "BODY" => PlaceholderRole::Body,
            _ => PlaceholderRole::Other,
        }
    }
}

/// A shape, image, table... on a page. Only the placeholder role matters here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
    pub object_id: String,
    pub placeholder: Option<PlaceholderRole>,
}

impl PageElement {
    pub fn new(object_id: impl Into<String>, placeholder: Option<PlaceholderRole>) -> Self {
        Self {
            object_id: object_id.into(),
            placeholder,
        }
    }

    pub fn has_role(&self, role: PlaceholderRole) -> bool {
        self.placeholder == Some(role)
    }
}

/// A reusable slide skeleton from the presentation's master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub object_id: String,
    pub elements: Vec<PageElement>,
}

impl Layout {
    /// True once at least one title and one body placeholder have been seen.
    pub fn has_title_and_body(&self) -> bool {
        let mut has_title = false;
        let mut has_body = false;

        for element in &self.elements {
            match element.placeholder {
                Some(PlaceholderRole::Title) => has_title = true,
                Some(PlaceholderRole::Body) => has_body = true,
                Some(PlaceholderRole::Other) | None => {}
            }
            if has_title && has_body {
                return true;
            }
        }

        false
    }
}

/// First layout (in service order) with both a title and a body placeholder.
/// There is no scoring between several qualifying layouts.
pub fn find_title_and_body_layout(layouts: &[Layout]) -> Option<&Layout> {
    layouts.iter().find(|layout| layout.has_title_and_body())
}

/// Object ids of the placeholders text gets written into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderIds {
    pub title: String,
    pub body: String,
}

/// Finds the first title and first body placeholder among a slide's elements.
pub fn locate_placeholders(elements: &[PageElement]) -> Option<PlaceholderIds> {
    let title = elements
        .iter()
        .find(|e| e.has_role(PlaceholderRole::Title))?;
    let body = elements
        .iter()
        .find(|e| e.has_role(PlaceholderRole::Body))?;

    Some(PlaceholderIds {
        title: title.object_id.clone(),
        body: body.object_id.clone(),
    })
}

/// One `insertText` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInsertion {
    pub object_id: String,
    pub text: String,
}

/// Fresh, collision-free object id for a new slide.
///
/// Slides object ids must be 5-50 characters; the prefix plus a hyphenated
/// UUID is 46.
pub fn new_slide_id() -> String {
    format!("new_slide_{}", uuid::Uuid::new_v4())
}

pub fn presentation_url(presentation_id: &str) -> String {
    format!("{}{}/", PRESENTATION_URL_BASE, presentation_id)
}

/// Result of copying the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPresentation {
    pub id: String,
    pub url: String,
}

impl CreatedPresentation {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let url = presentation_url(&id);
        Self { id, url }
    }
}

impl fmt::Display for CreatedPresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Presentation created. ID: {}. URL: {}", self.id, self.url)
    }
}

/// Success payload of the slide composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedSlide {
    pub slide_id: String,
    pub layout_id: String,
    pub title: String,
}

impl fmt::Display for ComposedSlide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slide '{}' created successfully.", self.title)
    }
}
