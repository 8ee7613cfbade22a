// =============================================================================
// GOOGLE SLIDES CLIENT
// =============================================================================
//
// Implements the `SlidesApi` port over the Slides REST API (v1):
//
// - `presentations.get` with a field mask, to list layouts and their
//   placeholder types without downloading the whole deck
// - `presentations.pages.get`, to read a single slide's elements
// - `presentations.batchUpdate`, for `createSlide` and `insertText`
//
// Requires the `presentations` scope.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::google_api::{path_segment, GoogleApi};
use crate::core::slides::{Layout, PageElement, PlaceholderRole, SlidesApi, TextInsertion};
use crate::core::tools::{AccessToken, ApiError};

pub const DEFAULT_SLIDES_API_BASE: &str = "https://slides.googleapis.com";

const LAYOUT_FIELDS: &str = "layouts(objectId,pageElements(objectId,shape(placeholder(type))))";
const PAGE_FIELDS: &str = "objectId,pageElements(objectId,shape(placeholder(type)))";

// =============================================================================
// REQUEST STRUCTURES
// =============================================================================

#[derive(Debug, Serialize)]
struct BatchUpdateRequest<'a> {
    requests: Vec<SlidesRequest<'a>>,
}

/// One entry of a batchUpdate. Serializes as `{"createSlide": {...}}` etc.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum SlidesRequest<'a> {
    CreateSlide(CreateSlideRequest<'a>),
    InsertText(InsertTextRequest<'a>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSlideRequest<'a> {
    object_id: &'a str,
    slide_layout_reference: LayoutReference<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutReference<'a> {
    layout_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertTextRequest<'a> {
    object_id: &'a str,
    text: &'a str,
}

// =============================================================================
// RESPONSE STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPresentation {
    #[serde(default)]
    layouts: Vec<ApiPage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPage {
    object_id: String,
    #[serde(default)]
    page_elements: Vec<ApiPageElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPageElement {
    object_id: String,
    shape: Option<ApiShape>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiShape {
    placeholder: Option<ApiPlaceholder>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPlaceholder {
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateResponse {
    #[serde(default)]
    replies: Vec<ApiReply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiReply {
    create_slide: Option<CreateSlideReply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSlideReply {
    object_id: String,
}

impl From<ApiPageElement> for PageElement {
    fn from(api: ApiPageElement) -> Self {
        let placeholder = api
            .shape
            .and_then(|shape| shape.placeholder)
            .map(|p| PlaceholderRole::from_api(p.kind.as_deref().unwrap_or_default()));

        PageElement {
            object_id: api.object_id,
            placeholder,
        }
    }
}

fn map_elements(elements: Vec<ApiPageElement>) -> Vec<PageElement> {
    elements.into_iter().map(PageElement::from).collect()
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct GoogleSlidesClient {
    api: GoogleApi,
}

impl GoogleSlidesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: GoogleApi::new(base_url),
        }
    }

    async fn batch_update(
        &self,
        token: &AccessToken,
        presentation_id: &str,
        requests: Vec<SlidesRequest<'_>>,
    ) -> Result<BatchUpdateResponse, ApiError> {
        self.api
            .post_json(
                token,
                &format!(
                    "/v1/presentations/{}:batchUpdate",
                    path_segment(presentation_id)
                ),
                &[],
                &BatchUpdateRequest { requests },
            )
            .await
    }
}

impl Default for GoogleSlidesClient {
    fn default() -> Self {
        Self::new(DEFAULT_SLIDES_API_BASE)
    }
}

#[async_trait]
impl SlidesApi for GoogleSlidesClient {
    async fn list_layouts(
        &self,
        token: &AccessToken,
        presentation_id: &str,
    ) -> Result<Vec<Layout>, ApiError> {
        let presentation: ApiPresentation = self
            .api
            .get_json(
                token,
                &format!("/v1/presentations/{}", path_segment(presentation_id)),
                &[("fields", LAYOUT_FIELDS)],
            )
            .await?;

        tracing::debug!(
            "Presentation {} has {} layouts",
            presentation_id,
            presentation.layouts.len()
        );

        Ok(presentation
            .layouts
            .into_iter()
            .map(|page| Layout {
                object_id: page.object_id,
                elements: map_elements(page.page_elements),
            })
            .collect())
    }

    async fn create_slide(
        &self,
        token: &AccessToken,
        presentation_id: &str,
        slide_id: &str,
        layout_id: &str,
    ) -> Result<String, ApiError> {
        let request = SlidesRequest::CreateSlide(CreateSlideRequest {
            object_id: slide_id,
            slide_layout_reference: LayoutReference { layout_id },
        });

        let response = self
            .batch_update(token, presentation_id, vec![request])
            .await?;

        response
            .replies
            .into_iter()
            .next()
            .and_then(|reply| reply.create_slide)
            .map(|reply| reply.object_id)
            .ok_or_else(|| ApiError::Decode("createSlide reply is missing".to_string()))
    }

    async fn get_slide_elements(
        &self,
        token: &AccessToken,
        presentation_id: &str,
        slide_id: &str,
    ) -> Result<Option<Vec<PageElement>>, ApiError> {
        let page: Option<ApiPage> = self
            .api
            .get_json_optional(
                token,
                &format!(
                    "/v1/presentations/{}/pages/{}",
                    path_segment(presentation_id),
                    path_segment(slide_id)
                ),
                &[("fields", PAGE_FIELDS)],
            )
            .await?;

        Ok(page.map(|p| map_elements(p.page_elements)))
    }

    async fn insert_text(
        &self,
        token: &AccessToken,
        presentation_id: &str,
        insertions: &[TextInsertion],
    ) -> Result<(), ApiError> {
        let requests = insertions
            .iter()
            .map(|insertion| {
                SlidesRequest::InsertText(InsertTextRequest {
                    object_id: &insertion.object_id,
                    text: &insertion.text,
                })
            })
            .collect();

        self.batch_update(token, presentation_id, requests).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token() -> AccessToken {
        AccessToken::new("tok")
    }

    #[tokio::test]
    async fn test_list_layouts_maps_placeholder_roles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/presentations/pres1"))
            .and(query_param("fields", LAYOUT_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "layouts": [
                    {
                        "objectId": "title_layout",
                        "pageElements": [
                            { "objectId": "t1", "shape": { "placeholder": { "type": "CENTERED_TITLE" } } },
                            { "objectId": "pic", "image": {} }
                        ]
                    },
                    {
                        "objectId": "title_body",
                        "pageElements": [
                            { "objectId": "t2", "shape": { "placeholder": { "type": "TITLE" } } },
                            { "objectId": "b2", "shape": { "placeholder": { "type": "BODY", "index": 0 } } },
                            { "objectId": "box", "shape": {} }
                        ]
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = GoogleSlidesClient::new(server.uri());
        let layouts = client.list_layouts(&token(), "pres1").await.unwrap();

        assert_eq!(layouts.len(), 2);
        assert_eq!(
            layouts[0].elements,
            vec![
                PageElement::new("t1", Some(PlaceholderRole::Other)),
                PageElement::new("pic", None),
            ]
        );
        assert_eq!(
            layouts[1].elements,
            vec![
                PageElement::new("t2", Some(PlaceholderRole::Title)),
                PageElement::new("b2", Some(PlaceholderRole::Body)),
                PageElement::new("box", None),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_slide_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/presentations/pres1:batchUpdate"))
            .and(body_json(serde_json::json!({
                "requests": [{
                    "createSlide": {
                        "objectId": "new_slide_abc",
                        "slideLayoutReference": { "layoutId": "title_body" }
                    }
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "presentationId": "pres1",
                "replies": [{ "createSlide": { "objectId": "new_slide_abc" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleSlidesClient::new(server.uri());
        let id = client
            .create_slide(&token(), "pres1", "new_slide_abc", "title_body")
            .await
            .unwrap();

        assert_eq!(id, "new_slide_abc");
    }

    #[tokio::test]
    async fn test_insert_text_is_one_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/presentations/pres1:batchUpdate"))
            .and(body_json(serde_json::json!({
                "requests": [
                    { "insertText": { "objectId": "t2", "text": "Intro" } },
                    { "insertText": { "objectId": "b2", "text": "Why now" } }
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "replies": [{}, {}] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleSlidesClient::new(server.uri());
        client
            .insert_text(
                &token(),
                "pres1",
                &[
                    TextInsertion {
                        object_id: "t2".to_string(),
                        text: "Intro".to_string(),
                    },
                    TextInsertion {
                        object_id: "b2".to_string(),
                        text: "Why now".to_string(),
                    },
                ],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_missing_slide_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/presentations/pres1/pages/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": { "code": 404, "message": "Page not found", "status": "NOT_FOUND" }
            })))
            .mount(&server)
            .await;

        let client = GoogleSlidesClient::new(server.uri());
        let elements = client
            .get_slide_elements(&token(), "pres1", "gone")
            .await
            .unwrap();

        assert!(elements.is_none());
    }

    #[tokio::test]
    async fn test_slide_elements_are_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/presentations/pres1/pages/s1"))
            .and(query_param("fields", PAGE_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objectId": "s1",
                "pageElements": [
                    { "objectId": "s1_t", "shape": { "placeholder": { "type": "TITLE" } } },
                    { "objectId": "s1_b", "shape": { "placeholder": { "type": "BODY" } } }
                ]
            })))
            .mount(&server)
            .await;

        let client = GoogleSlidesClient::new(server.uri());
        let elements = client
            .get_slide_elements(&token(), "pres1", "s1")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(elements.len(), 2);
        assert!(elements[0].has_role(PlaceholderRole::Title));
        assert!(elements[1].has_role(PlaceholderRole::Body));
    }

    #[tokio::test]
    async fn test_layout_without_object_id_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/presentations/pres1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "layouts": [
                    { "pageElements": [
                        { "objectId": "t", "shape": { "placeholder": { "type": "TITLE" } } },
                        { "objectId": "b", "shape": { "placeholder": { "type": "BODY" } } }
                    ] }
                ]
            })))
            .mount(&server)
            .await;

        let client = GoogleSlidesClient::new(server.uri());
        let err = client.list_layouts(&token(), "pres1").await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_ids_are_escaped_in_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/presentations/other-deck%2Fpages%2Fp1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "layouts": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/presentations/pres1%23x:batchUpdate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "replies": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/presentations/pres1/pages/s1%3Ffields%3D"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "objectId": "s1?fields=" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleSlidesClient::new(server.uri());

        let layouts = client
            .list_layouts(&token(), "other-deck/pages/p1")
            .await
            .unwrap();
        assert!(layouts.is_empty());

        client.insert_text(&token(), "pres1#x", &[]).await.unwrap();

        let elements = client
            .get_slide_elements(&token(), "pres1", "s1?fields=")
            .await
            .unwrap();
        assert_eq!(elements, Some(Vec::new()));
    }
}
