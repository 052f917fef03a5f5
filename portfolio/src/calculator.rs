use crate::aggregator::{assemble, repo_stats, UserReport};
use crate::api::{Client, Error, LanguageMap, Result};
use futures::{stream, Stream, StreamExt, TryStreamExt};
use log::{debug, error};
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::JoinError;

/// Report of a single user, or the reason it could not be built.
#[derive(Debug)]
pub enum UserOutcome {
    Report(UserReport),
    Failed { user: String, error: Error },
}

impl UserOutcome {
    pub fn is_report(&self) -> bool {
        matches!(self, UserOutcome::Report(_))
    }
}

pub type PortfolioStream = Pin<Box<dyn Stream<Item = UserOutcome> + std::marker::Send>>;

pub struct PortfolioCalculator<CLIENT>
where
    CLIENT: 'static + Client,
{
    client: Arc<CLIENT>,
    top_languages: usize,
}

impl<CLIENT> PortfolioCalculator<CLIENT>
where
    CLIENT: 'static + Client,
    CLIENT::REPO: 'static,
{
    pub fn new(client: CLIENT, top_languages: usize) -> Self {
        PortfolioCalculator {
            client: Arc::new(client),
            top_languages,
        }
    }

    /// Streams one `UserOutcome` per user, in order of `users`.
    ///
    /// # Arguments
    /// * `users` - Logins of users to report on
    /// * `max_user_requests` - Maximal number of users processed in parallel, must be positive
    /// * `max_language_requests` - Maximal parallel repository languages requests of a single user, must be positive
    pub fn calculate(
        self,
        users: Vec<String>,
        max_user_requests: usize,
        max_language_requests: usize,
    ) -> PortfolioStream {
        let client = self.client;
        let top_languages = self.top_languages;
        stream::iter(users)
            .map(move |user| {
                let report = tokio::spawn(Self::user_report(
                    client.clone(),
                    user.clone(),
                    top_languages,
                    max_language_requests,
                ));
                async move { map_user_result(user, report.await) }
            })
            .buffered(max_user_requests)
            .boxed()
    }

    async fn user_report(
        client: Arc<CLIENT>,
        user: String,
        top_languages: usize,
        max_language_requests: usize,
    ) -> Result<UserReport> {
        let (profile, repos) = futures::try_join!(client.user(&user), client.user_repos(&user))?;
        debug!("Found {} repositories of {}", repos.len(), user);
        let repos: Vec<Arc<CLIENT::REPO>> = repos.into_iter().map(Arc::new).collect();
        let language_maps: Vec<LanguageMap> = stream::iter(repos.clone())
            .map(|repo| {
                let client = client.clone();
                async move { client.repo_languages(&repo).await }
            })
            .buffered(max_language_requests)
            .try_collect()
            .await?;
        assemble(profile, repo_stats(user, &repos, language_maps, top_languages)?)
    }
}

/// Utility functions

fn map_user_result(user: String, report: std::result::Result<Result<UserReport>, JoinError>) -> UserOutcome {
    match report {
        Ok(Ok(report)) => {
            debug!("Report of {} ready", user);
            UserOutcome::Report(report)
        }
        Ok(Err(error)) => {
            error!("Failed to build report of {}: {}", user, error);
            UserOutcome::Failed { user, error }
        }
        Err(err) => {
            error!("Report task of {} failed: {}", user, err);
            UserOutcome::Failed {
                user,
                error: Error::Other(err.into()),
            }
        }
    }
}

/// Tests
