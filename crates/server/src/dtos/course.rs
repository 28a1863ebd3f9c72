use models::course::CourseDocument;
use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A course as returned to API clients, with the store id stringified
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub university: String,
    pub city: String,
    pub country: String,
    pub course_name: String,
    pub course_description: String,
    pub start_date: String,
    pub end_date: String,
    pub price: f64,
    pub currency: String,
}

impl From<CourseDocument> for CourseResponse {
    fn from(course: CourseDocument) -> Self {
        Self {
            id: course.id.map(|id| id.to_hex()).unwrap_or_default(),
            university: course.university,
            city: course.city,
            country: course.country,
            course_name: course.course_name,
            course_description: course.course_description,
            start_date: course.start_date,
            end_date: course.end_date,
            price: course.price,
            currency: course.currency,
        }
    }
}

/// Payload for creating a course; every field is required
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub university: String,
    pub city: String,
    pub country: String,
    pub course_name: String,
    pub course_description: String,
    pub start_date: String,
    pub end_date: String,
    pub price: f64,
    pub currency: String,
}

impl CreateCourseRequest {
    /// Builds the document to insert, identifier left for the store
    pub fn into_document(self) -> CourseDocument {
        CourseDocument {
            id: None,
            university: self.university,
            city: self.city,
            country: self.country,
            course_name: self.course_name,
            course_description: self.course_description,
            start_date: self.start_date,
            end_date: self.end_date,
            price: self.price,
            currency: self.currency,
        }
    }
}

/// Payload for updating a course; only the fields present are applied
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl UpdateCourseRequest {
    /// Collects the present fields into the `$set` document for the store
    pub fn as_set_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CourseQueryParams {
    /// Case-insensitive match against university or city
    pub search: Option<String>,

    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub total: u64,
    pub page: u64,
    pub limit: i64,
    pub courses: Vec<CourseResponse>,
}

/// Confirmation envelope for operations without a resource body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn sample_document(id: Option<ObjectId>) -> CourseDocument {
        CourseDocument {
            id,
            university: "MIT".to_string(),
            city: "Cambridge".to_string(),
            country: "US".to_string(),
            course_name: "Algo".to_string(),
            course_description: "d".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-02-01".to_string(),
            price: 100.0,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn response_stringifies_the_store_id() {
        let id = ObjectId::new();
        let response = CourseResponse::from(sample_document(Some(id)));

        assert_eq!(response.id, id.to_hex());
        assert_eq!(response.university, "MIT");
        assert_eq!(response.city, "Cambridge");
        assert_eq!(response.course_name, "Algo");
        assert_eq!(response.price, 100.0);
        assert_eq!(response.currency, "USD");
    }

    #[test]
    fn set_document_contains_exactly_the_present_fields() {
        let update = UpdateCourseRequest {
            city: Some("Boston".to_string()),
            price: Some(250.0),
            ..Default::default()
        };

        let set = update.as_set_document().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str("city").unwrap(), "Boston");
        assert_eq!(set.get_f64("price").unwrap(), 250.0);
    }

    #[test]
    fn set_document_uses_wire_field_names() {
        let update = UpdateCourseRequest {
            course_name: Some("Systems".to_string()),
            ..Default::default()
        };

        let set = update.as_set_document().unwrap();
        assert_eq!(set.get_str("courseName").unwrap(), "Systems");
    }

    #[test]
    fn empty_update_serializes_to_an_empty_document() {
        let set = UpdateCourseRequest::default().as_set_document().unwrap();
        assert!(set.is_empty());
    }
}
