use models::course::CourseDocument;
use mongodb::{
    Client, Collection,
    error::Error,
    options::{ClientOptions, ServerApi, ServerApiVersion},
};

/// Name of the collection holding course documents
pub const COURSE_COLLECTION: &str = "courses";

/// Creates a store client with the Stable API pinned to v1
pub async fn create_client(url: &str) -> Result<Client, Error> {
    let mut options = ClientOptions::parse(url).await?;
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

    Client::with_options(options)
}

/// Returns the typed course collection handle for a database
pub fn course_collection(client: &Client, database: &str) -> Collection<CourseDocument> {
    client.database(database).collection(COURSE_COLLECTION)
}
