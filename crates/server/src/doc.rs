use crate::routes::{course, health, root};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        course::create_course,
        course::get_courses,
        course::get_course_by_id,
        course::update_course,
        course::delete_course
    ),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Courses", description = "Course catalog endpoints"),
    ),
    info(
        title = "Course Catalog API",
        version = "1.0.0",
        description = "CRUD API over the course catalog, refreshed periodically from the course feed",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
