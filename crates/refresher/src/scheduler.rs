use std::time::Duration;

use database::services::course::CourseService;
use log::{error, info, warn};
use models::course::CourseDocument;
use mongodb::Collection;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant},
};

use crate::{error::FeedError, feed};

/// Background job that periodically replaces the course collection with the
/// contents of the external feed.
pub struct RefreshScheduler {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Spawns the refresh loop.
    ///
    /// The first cycle runs one full interval after startup. Shutdown is
    /// checked between cycles only; an in-flight cycle always runs to
    /// completion so the wipe-and-reload is never interrupted midway.
    pub fn start(
        collection: Collection<CourseDocument>,
        feed_url: String,
        interval: Duration,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let client = reqwest::Client::new();
            let mut ticker = time::interval_at(Instant::now() + interval, interval);

            info!(
                "course feed refresh scheduled every {}s from {feed_url}",
                interval.as_secs()
            );

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        if let Err(err) = run_cycle(&client, &collection, &feed_url).await {
                            error!("course feed refresh failed: {err}");
                        }
                    }
                }
            }

            info!("course feed refresh stopped");
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stops the loop and waits for it to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.handle.await;
    }
}

/// One fetch, parse, replace cycle
async fn run_cycle(
    client: &reqwest::Client,
    collection: &Collection<CourseDocument>,
    feed_url: &str,
) -> Result<(), FeedError> {
    let body = feed::fetch_feed(client, feed_url).await?;
    let courses = feed::parse_feed(&body)?;

    if courses.is_empty() {
        // The replace below still wipes, leaving the collection empty.
        warn!("course feed returned no rows");
    }

    let inserted = CourseService::replace_all(collection, courses).await?;
    info!("course collection refreshed with {inserted} documents");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Client construction is lazy, so no live store is needed here.
    #[tokio::test]
    async fn shutdown_stops_an_idle_scheduler() {
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let collection = client.database("scheduler_test").collection("courses");

        let scheduler = RefreshScheduler::start(
            collection,
            "http://localhost:9/feed.csv".to_string(),
            Duration::from_secs(3600),
        );

        scheduler.shutdown().await;
    }
}
