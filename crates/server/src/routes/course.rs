use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::course::CourseService;
use models::course::CourseDocument;
use mongodb::{Collection, bson::oid::ObjectId};

use crate::{
    dtos::course::{
        CourseQueryParams, CourseResponse, CreateCourseRequest, MessageResponse,
        PaginatedCoursesResponse, UpdateCourseRequest,
    },
    error::ApiError,
};

/// Add a new course
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid course payload"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(courses): State<Collection<CourseDocument>>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    validate_price(Some(payload.price))?;

    // A concurrent feed refresh can wipe the document between the insert
    // and the re-read; that surfaces as not-found.
    let created = CourseService::insert_course(&courses, payload.into_document())
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get paginated list of courses with optional search
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses retrieved successfully", body = PaginatedCoursesResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(courses): State<Collection<CourseDocument>>,
    Query(params): Query<CourseQueryParams>,
) -> Result<Json<PaginatedCoursesResponse>, ApiError> {
    validate_pagination(params.page, params.limit)?;

    let (page_docs, total) =
        CourseService::list_courses(&courses, params.search.as_deref(), params.page, params.limit)
            .await?;

    Ok(Json(PaginatedCoursesResponse {
        total,
        page: params.page,
        limit: params.limit,
        courses: page_docs.into_iter().map(CourseResponse::from).collect(),
    }))
}

/// Get a single course by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 400, description = "Invalid course ID"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(
    State(courses): State<Collection<CourseDocument>>,
    Path(id): Path<String>,
) -> Result<Json<CourseResponse>, ApiError> {
    let id = parse_course_id(&id)?;

    let course = CourseService::find_course(&courses, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(course.into()))
}

/// Update a course, applying only the fields provided
#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Invalid course ID or payload"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(courses): State<Collection<CourseDocument>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    // Identifier syntax is checked before anything touches the payload.
    let id = parse_course_id(&id)?;
    validate_price(payload.price)?;

    let fields = payload.as_set_document()?;
    if fields.is_empty() {
        return Err(ApiError::Validation(
            "update payload contains no fields".to_string(),
        ));
    }

    let updated = CourseService::update_course(&courses, id, fields)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(updated.into()))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 400, description = "Invalid course ID"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(courses): State<Collection<CourseDocument>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_course_id(&id)?;

    if !CourseService::delete_course(&courses, id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(Json(MessageResponse {
        message: "Course deleted successfully".to_string(),
    }))
}

/// Parses a path id, rejecting anything that is not a well-formed ObjectId
fn parse_course_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::InvalidId)
}

fn validate_pagination(page: u64, limit: i64) -> Result<(), ApiError> {
    if page < 1 {
        return Err(ApiError::Validation("page must be at least 1".to_string()));
    }

    if !(1..=100).contains(&limit) {
        return Err(ApiError::Validation(
            "limit must be between 1 and 100".to_string(),
        ));
    }

    Ok(())
}

/// Rejects negative prices on create and update
fn validate_price(price: Option<f64>) -> Result<(), ApiError> {
    match price {
        Some(price) if price < 0.0 => Err(ApiError::Validation(
            "price must be non-negative".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_course_ids() {
        assert!(parse_course_id("not-an-id").is_err());
        assert!(parse_course_id("abc123").is_err());
        assert!(parse_course_id("").is_err());
    }

    #[test]
    fn accepts_well_formed_object_ids() {
        assert!(parse_course_id("65f2a1b3c4d5e6f7a8b9c0d1").is_ok());
    }

    #[test]
    fn pagination_bounds() {
        assert!(validate_pagination(1, 10).is_ok());
        assert!(validate_pagination(7, 100).is_ok());
        assert!(validate_pagination(1, 1).is_ok());
        assert!(validate_pagination(0, 10).is_err());
        assert!(validate_pagination(1, 0).is_err());
        assert!(validate_pagination(1, 101).is_err());
    }

    #[test]
    fn negative_prices_are_rejected() {
        assert!(validate_price(Some(-1.0)).is_err());
        assert!(validate_price(Some(0.0)).is_ok());
        assert!(validate_price(Some(100.0)).is_ok());
        assert!(validate_price(None).is_ok());
    }
}
