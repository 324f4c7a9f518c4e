//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every course endpoint, the health probes, the error
//! schema wrappers and the session cookie security scheme. The document is
//! served by Swagger UI in debug builds and exported by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::courses::{
    AddAnswerBody, AddQuestionBody, AddReviewBody, AddReviewReplyBody, ContentEnvelope,
    ContentItemBody, ContentLinkBody, CourseDetailsBody, CourseEnvelope, CoursesEnvelope,
    MessageEnvelope, PublishCourseBody, ThumbnailBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie carrying the authenticated user id.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Course content API",
        description = "Course previews, gated lesson content, Q&A and reviews."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::courses::list_previews,
        crate::inbound::http::courses::get_preview,
        crate::inbound::http::courses::get_content,
        crate::inbound::http::courses::list_all,
        crate::inbound::http::courses::publish_course,
        crate::inbound::http::courses::edit_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::courses::add_question,
        crate::inbound::http::courses::add_answer,
        crate::inbound::http::courses::add_review,
        crate::inbound::http::courses::add_review_reply,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CourseEnvelope,
        CoursesEnvelope,
        ContentEnvelope,
        MessageEnvelope,
        AddQuestionBody,
        AddAnswerBody,
        AddReviewBody,
        AddReviewReplyBody,
        CourseDetailsBody,
        ContentItemBody,
        ContentLinkBody,
        ThumbnailBody,
        PublishCourseBody,
    )),
    tags(
        (name = "courses", description = "Course previews, content, questions and reviews"),
        (name = "admin", description = "Administrator course management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[rstest]
    #[case("/api/v1/courses")]
    #[case("/api/v1/courses/{id}")]
    #[case("/api/v1/courses/{id}/content")]
    #[case("/api/v1/admin/courses")]
    #[case("/api/v1/courses/{id}/reviews/replies")]
    #[case("/health/ready")]
    fn document_registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn review_body_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let review = schemas.get("AddReviewBody").expect("AddReviewBody schema");
        assert_object_schema_has_field(review, "rating");
    }
}
