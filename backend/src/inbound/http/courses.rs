//! Course HTTP handlers.
//!
//! ```text
//! GET    /api/v1/courses
//! GET    /api/v1/courses/{id}
//! GET    /api/v1/courses/{id}/content
//! GET    /api/v1/admin/courses
//! POST   /api/v1/courses
//! PUT    /api/v1/courses/{id}
//! DELETE /api/v1/courses/{id}
//! PUT    /api/v1/courses/{id}/questions
//! PUT    /api/v1/courses/{id}/answers
//! PUT    /api/v1/courses/{id}/reviews
//! PUT    /api/v1/courses/{id}/reviews/replies
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::course::{
    ContentItem, ContentItemDraft, ContentLink, Course, CourseDetails, CourseDraft, CourseId,
    Thumbnail,
};
use crate::domain::ports::{
    AddAnswerRequest, AddQuestionRequest, AddReviewReplyRequest, AddReviewRequest,
    DeleteCourseRequest, EditCourseRequest, PublishCourseRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::resolve_caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Single course response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseEnvelope {
    pub success: bool,
    #[schema(value_type = Object)]
    pub course: Course,
}

/// Course list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CoursesEnvelope {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub courses: Vec<Course>,
}

/// Lesson sequence response for entitled callers.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContentEnvelope {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub content: Vec<ContentItem>,
}

/// Acknowledgement without a payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}

fn course_envelope(course: Course) -> CourseEnvelope {
    CourseEnvelope {
        success: true,
        course,
    }
}

/// Request payload for asking a question on a lesson.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionBody {
    pub question: String,
    #[schema(format = "uuid")]
    pub content_id: String,
}

/// Request payload for answering a question.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddAnswerBody {
    pub answer: String,
    #[schema(format = "uuid")]
    pub content_id: String,
    #[schema(format = "uuid")]
    pub question_id: String,
}

/// Request payload for reviewing a course.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewBody {
    pub review: String,
    #[schema(minimum = 1, maximum = 5)]
    pub rating: u8,
}

/// Request payload for replying beneath a review.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewReplyBody {
    pub comment: String,
    #[schema(format = "uuid")]
    pub review_id: String,
}

/// Hosted thumbnail reference.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailBody {
    pub public_id: String,
    pub url: String,
}

/// External link attached to a lesson.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentLinkBody {
    pub title: String,
    pub url: String,
}

/// Editable catalogue fields.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailsBody {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub estimated_price: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<ThumbnailBody>,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub demo_url: String,
}

/// Lesson supplied when publishing a course.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemBody {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub video_section: String,
    #[serde(default)]
    pub video_length: u32,
    #[serde(default)]
    pub links: Vec<ContentLinkBody>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// Request payload for publishing a course.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishCourseBody {
    #[serde(flatten)]
    pub details: CourseDetailsBody,
    #[serde(default)]
    pub course_data: Vec<ContentItemBody>,
}

impl From<CourseDetailsBody> for CourseDetails {
    fn from(body: CourseDetailsBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            price: body.price,
            estimated_price: body.estimated_price,
            thumbnail: body.thumbnail.map(|thumbnail| Thumbnail {
                public_id: thumbnail.public_id,
                url: thumbnail.url,
            }),
            tags: body.tags,
            level: body.level,
            demo_url: body.demo_url,
        }
    }
}

impl From<ContentItemBody> for ContentItemDraft {
    fn from(body: ContentItemBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            video_url: body.video_url,
            video_section: body.video_section,
            video_length: body.video_length,
            links: body
                .links
                .into_iter()
                .map(|link| ContentLink {
                    title: link.title,
                    url: link.url,
                })
                .collect(),
            suggestion: body.suggestion,
        }
    }
}

impl From<PublishCourseBody> for CourseDraft {
    fn from(body: PublishCourseBody) -> Self {
        Self {
            details: body.details.into(),
            content: body.course_data.into_iter().map(Into::into).collect(),
        }
    }
}

fn course_id_from_path(path: web::Path<String>) -> ApiResult<CourseId> {
    parse_id(path.as_str(), FieldName::new("courseId"))
}

/// Preview of every course.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (status = 200, description = "Course previews", body = CoursesEnvelope),
        (status = 502, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCoursePreviews",
    security([])
)]
#[get("/courses")]
pub async fn list_previews(state: web::Data<HttpState>) -> ApiResult<web::Json<CoursesEnvelope>> {
    let courses = state.courses_query.list_previews().await?;
    Ok(web::Json(CoursesEnvelope {
        success: true,
        courses,
    }))
}

/// Preview of one course.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course preview", body = CourseEnvelope),
        (status = 400, description = "Malformed course id", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 502, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCoursePreview",
    security([])
)]
#[get("/courses/{id}")]
pub async fn get_preview(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseEnvelope>> {
    let course_id = course_id_from_path(path)?;
    let course = state.courses_query.get_preview(&course_id).await?;
    Ok(web::Json(course_envelope(course)))
}

/// Full lesson sequence for an entitled caller.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/content",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course content", body = ContentEnvelope),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not entitled", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourseContent"
)]
#[get("/courses/{id}/content")]
pub async fn get_content(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ContentEnvelope>> {
    let course_id = course_id_from_path(path)?;
    let caller = resolve_caller(&state, &session).await?;
    let content = state
        .courses_query
        .get_content_for_entitled_user(&caller, &course_id)
        .await?;
    Ok(web::Json(ContentEnvelope {
        success: true,
        content,
    }))
}

/// Every course in full, for administrators.
#[utoipa::path(
    get,
    path = "/api/v1/admin/courses",
    responses(
        (status = 200, description = "All courses", body = CoursesEnvelope),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Administrators only", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listAllCourses"
)]
#[get("/admin/courses")]
pub async fn list_all(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CoursesEnvelope>> {
    let caller = resolve_caller(&state, &session).await?;
    let courses = state.courses_query.list_all_courses(&caller).await?;
    Ok(web::Json(CoursesEnvelope {
        success: true,
        courses,
    }))
}

/// Publish a new course.
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = PublishCourseBody,
    responses(
        (status = 201, description = "Course created", body = CourseEnvelope),
        (status = 400, description = "Invalid course", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Administrators only", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "publishCourse"
)]
#[post("/courses")]
pub async fn publish_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PublishCourseBody>,
) -> ApiResult<HttpResponse> {
    let caller = resolve_caller(&state, &session).await?;
    let course = state
        .courses
        .publish_course(PublishCourseRequest {
            caller,
            draft: payload.into_inner().into(),
        })
        .await?;
    Ok(HttpResponse::Created().json(course_envelope(course)))
}

/// Replace the catalogue fields of a course.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    request_body = CourseDetailsBody,
    responses(
        (status = 200, description = "Course updated", body = CourseEnvelope),
        (status = 400, description = "Invalid details", body = ErrorSchema),
        (status = 403, description = "Administrators only", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "editCourse"
)]
#[put("/courses/{id}")]
pub async fn edit_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CourseDetailsBody>,
) -> ApiResult<web::Json<CourseEnvelope>> {
    let course_id = course_id_from_path(path)?;
    let caller = resolve_caller(&state, &session).await?;
    let course = state
        .courses
        .edit_course(EditCourseRequest {
            caller,
            course_id,
            details: payload.into_inner().into(),
        })
        .await?;
    Ok(web::Json(course_envelope(course)))
}

/// Delete a course with its lessons and reviews.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course deleted", body = MessageEnvelope),
        (status = 403, description = "Administrators only", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageEnvelope>> {
    let course_id = course_id_from_path(path)?;
    let caller = resolve_caller(&state, &session).await?;
    state
        .courses
        .delete_course(DeleteCourseRequest { caller, course_id })
        .await?;
    Ok(web::Json(MessageEnvelope {
        success: true,
        message: "Course deleted successfully".to_owned(),
    }))
}

/// Ask a question on a lesson.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}/questions",
    params(("id" = String, Path, description = "Course identifier")),
    request_body = AddQuestionBody,
    responses(
        (status = 200, description = "Question added", body = CourseEnvelope),
        (status = 400, description = "Invalid content id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "addQuestion"
)]
#[put("/courses/{id}/questions")]
pub async fn add_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddQuestionBody>,
) -> ApiResult<web::Json<CourseEnvelope>> {
    let course_id = course_id_from_path(path)?;
    let body = payload.into_inner();
    let content_id = parse_id(&body.content_id, FieldName::new("contentId"))?;
    let caller = resolve_caller(&state, &session).await?;
    let course = state
        .courses
        .add_question(AddQuestionRequest {
            caller,
            course_id,
            content_id,
            question: body.question,
        })
        .await?;
    Ok(web::Json(course_envelope(course)))
}

/// Answer a question on a lesson.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}/answers",
    params(("id" = String, Path, description = "Course identifier")),
    request_body = AddAnswerBody,
    responses(
        (status = 200, description = "Answer added", body = CourseEnvelope),
        (status = 400, description = "Invalid content or question id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 502, description = "Mail relay failed", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "addAnswer"
)]
#[put("/courses/{id}/answers")]
pub async fn add_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddAnswerBody>,
) -> ApiResult<web::Json<CourseEnvelope>> {
    let course_id = course_id_from_path(path)?;
    let body = payload.into_inner();
    let content_id = parse_id(&body.content_id, FieldName::new("contentId"))?;
    let question_id = parse_id(&body.question_id, FieldName::new("questionId"))?;
    let caller = resolve_caller(&state, &session).await?;
    let course = state
        .courses
        .add_answer(AddAnswerRequest {
            caller,
            course_id,
            content_id,
            question_id,
            answer: body.answer,
        })
        .await?;
    Ok(web::Json(course_envelope(course)))
}

/// Review a course the caller is entitled to.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}/reviews",
    params(("id" = String, Path, description = "Course identifier")),
    request_body = AddReviewBody,
    responses(
        (status = 200, description = "Review added", body = CourseEnvelope),
        (status = 400, description = "Rating out of range", body = ErrorSchema),
        (status = 403, description = "Not entitled", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "addReview"
)]
#[put("/courses/{id}/reviews")]
pub async fn add_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddReviewBody>,
) -> ApiResult<web::Json<CourseEnvelope>> {
    let course_id = course_id_from_path(path)?;
    let body = payload.into_inner();
    let caller = resolve_caller(&state, &session).await?;
    let course = state
        .courses
        .add_review(AddReviewRequest {
            caller,
            course_id,
            rating: body.rating,
            comment: body.review,
        })
        .await?;
    Ok(web::Json(course_envelope(course)))
}

/// Reply beneath a review.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}/reviews/replies",
    params(("id" = String, Path, description = "Course identifier")),
    request_body = AddReviewReplyBody,
    responses(
        (status = 200, description = "Reply added", body = CourseEnvelope),
        (status = 400, description = "Malformed review id", body = ErrorSchema),
        (status = 404, description = "Course or review not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "addReviewReply"
)]
#[put("/courses/{id}/reviews/replies")]
pub async fn add_review_reply(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddReviewReplyBody>,
) -> ApiResult<web::Json<CourseEnvelope>> {
    let course_id = course_id_from_path(path)?;
    let body = payload.into_inner();
    let review_id = parse_id(&body.review_id, FieldName::new("reviewId"))?;
    let caller = resolve_caller(&state, &session).await?;
    let course = state
        .courses
        .add_review_reply(AddReviewReplyRequest {
            caller,
            course_id,
            review_id,
            comment: body.comment,
        })
        .await?;
    Ok(web::Json(course_envelope(course)))
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
