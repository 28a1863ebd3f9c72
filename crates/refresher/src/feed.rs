use models::course::CourseDocument;
use serde::Deserialize;

use crate::error::FeedError;

/// One data row of the course feed, keyed by the feed's header names
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FeedRecord {
    university: String,
    city: String,
    country: String,
    course_name: String,
    course_description: String,
    start_date: String,
    end_date: String,
    price: f64,
    currency: String,
}

impl From<FeedRecord> for CourseDocument {
    fn from(record: FeedRecord) -> Self {
        CourseDocument {
            id: None,
            university: record.university,
            city: record.city,
            country: record.country,
            course_name: record.course_name,
            course_description: record.course_description,
            start_date: record.start_date,
            end_date: record.end_date,
            price: record.price,
            currency: record.currency,
        }
    }
}

/// Downloads the feed body from the configured URL.
///
/// A non-success status is an error; there is no retry within a cycle.
pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<String, FeedError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(body)
}

/// Decodes the feed CSV (header row required) into course documents.
///
/// Any undecodable row fails the whole batch, so a cycle never inserts a
/// partial feed. A header-only payload is an empty batch, not an error.
pub fn parse_feed(csv_text: &str) -> Result<Vec<CourseDocument>, FeedError> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());

    let mut courses = Vec::new();
    for record in reader.deserialize::<FeedRecord>() {
        courses.push(record?.into());
    }

    Ok(courses)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_HEADER: &str =
        "University,City,Country,CourseName,CourseDescription,StartDate,EndDate,Price,Currency";

    #[test]
    fn parses_rows_into_unassigned_documents() {
        let body = format!(
            "{FEED_HEADER}\nMIT,Cambridge,US,Algo,Intro to algorithms,2024-01-01,2024-02-01,100.5,USD\n"
        );

        let courses = parse_feed(&body).unwrap();
        assert_eq!(courses.len(), 1);

        let course = &courses[0];
        assert!(course.id.is_none());
        assert_eq!(course.university, "MIT");
        assert_eq!(course.city, "Cambridge");
        assert_eq!(course.course_name, "Algo");
        assert_eq!(course.start_date, "2024-01-01");
        assert_eq!(course.price, 100.5);
        assert_eq!(course.currency, "USD");
    }

    #[test]
    fn header_only_feed_is_an_empty_batch() {
        let courses = parse_feed(&format!("{FEED_HEADER}\n")).unwrap();
        assert!(courses.is_empty());
    }

    #[test]
    fn rejects_rows_with_missing_columns() {
        let body = format!("{FEED_HEADER}\nMIT,Cambridge,US\n");
        assert!(matches!(parse_feed(&body), Err(FeedError::Parse(_))));
    }

    #[test]
    fn rejects_non_numeric_prices() {
        let body = format!(
            "{FEED_HEADER}\nMIT,Cambridge,US,Algo,desc,2024-01-01,2024-02-01,free,USD\n"
        );
        assert!(matches!(parse_feed(&body), Err(FeedError::Parse(_))));
    }

    #[test]
    fn quoted_fields_keep_embedded_commas() {
        let body = format!(
            "{FEED_HEADER}\nMIT,Cambridge,US,Algo,\"Sorting, searching, graphs\",2024-01-01,2024-02-01,0,USD\n"
        );

        let courses = parse_feed(&body).unwrap();
        assert_eq!(courses[0].course_description, "Sorting, searching, graphs");
    }
}
