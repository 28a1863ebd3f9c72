use futures::TryStreamExt;
use models::course::CourseDocument;
use mongodb::{
    Collection,
    bson::{Document, doc, oid::ObjectId},
    error::Error,
};

pub struct CourseService;

impl CourseService {
    /// Builds the filter for a list query.
    ///
    /// A search term matches case-insensitively against the university or
    /// city fields only; without one the query scans the whole collection.
    pub fn search_filter(search: Option<&str>) -> Document {
        match search {
            Some(term) if !term.is_empty() => {
                let regex = doc! { "$regex": term, "$options": "i" };

                doc! {
                    "$or": [
                        { "university": regex.clone() },
                        { "city": regex },
                    ]
                }
            }
            _ => Document::new(),
        }
    }

    /// Query courses with pagination and filtering.
    ///
    /// Returns one page of documents in store-native scan order together
    /// with the total match count, which ignores pagination.
    pub async fn list_courses(
        collection: &Collection<CourseDocument>,
        search: Option<&str>,
        page: u64,
        limit: i64,
    ) -> Result<(Vec<CourseDocument>, u64), Error> {
        let filter = Self::search_filter(search);
        let total = collection.count_documents(filter.clone()).await?;

        let skip = (page - 1) * limit as u64;
        let courses = collection
            .find(filter)
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((courses, total))
    }

    /// Get a single course by id
    pub async fn find_course(
        collection: &Collection<CourseDocument>,
        id: ObjectId,
    ) -> Result<Option<CourseDocument>, Error> {
        collection.find_one(doc! { "_id": id }).await
    }

    /// Insert a course and read back the stored document
    pub async fn insert_course(
        collection: &Collection<CourseDocument>,
        course: CourseDocument,
    ) -> Result<Option<CourseDocument>, Error> {
        let result = collection.insert_one(course).await?;

        collection
            .find_one(doc! { "_id": result.inserted_id })
            .await
    }

    /// Apply a `$set` merge to a course and read back the updated document.
    ///
    /// Returns `Ok(None)` when no document matched the id. The caller is
    /// responsible for never passing an empty field set.
    pub async fn update_course(
        collection: &Collection<CourseDocument>,
        id: ObjectId,
        fields: Document,
    ) -> Result<Option<CourseDocument>, Error> {
        let result = collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        collection.find_one(doc! { "_id": id }).await
    }

    /// Delete a course by id, reporting whether a document was removed
    pub async fn delete_course(
        collection: &Collection<CourseDocument>,
        id: ObjectId,
    ) -> Result<bool, Error> {
        let result = collection.delete_one(doc! { "_id": id }).await?;

        Ok(result.deleted_count == 1)
    }

    /// Replace the whole collection with a new set of documents.
    ///
    /// The wipe is unconditional, so an empty input leaves the collection
    /// empty. Not transactional: concurrent readers can observe the window
    /// between the delete and the insert.
    pub async fn replace_all(
        collection: &Collection<CourseDocument>,
        courses: Vec<CourseDocument>,
    ) -> Result<usize, Error> {
        collection.delete_many(Document::new()).await?;

        if courses.is_empty() {
            return Ok(0);
        }

        let result = collection.insert_many(courses).await?;

        Ok(result.inserted_ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_filter_matches_university_or_city_case_insensitively() {
        let filter = CourseService::search_filter(Some("cambridge"));
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 2);

        let university = clauses[0].as_document().unwrap();
        let regex = university.get_document("university").unwrap();
        assert_eq!(regex.get_str("$regex").unwrap(), "cambridge");
        assert_eq!(regex.get_str("$options").unwrap(), "i");

        let city = clauses[1].as_document().unwrap();
        assert!(city.contains_key("city"));
    }

    #[test]
    fn search_filter_ignores_other_fields() {
        let filter = CourseService::search_filter(Some("algorithms"));
        let rendered = filter.to_string();

        assert!(!rendered.contains("courseName"));
        assert!(!rendered.contains("courseDescription"));
        assert!(!rendered.contains("country"));
    }

    #[test]
    fn search_filter_without_term_scans_everything() {
        assert!(CourseService::search_filter(None).is_empty());
        assert!(CourseService::search_filter(Some("")).is_empty());
    }
}
