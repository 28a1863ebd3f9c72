use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A course as stored in the `courses` collection.
///
/// The identifier is assigned by the store on insert; documents built from
/// request payloads or feed rows carry `None` until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
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
