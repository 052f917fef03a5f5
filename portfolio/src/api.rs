use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use derive_more::Constructor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error: {0}")]
    Error(&'static str),
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Profile of '{profile}' assembled with repositories of '{repos}'")]
    MisalignedInput { profile: String, repos: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Bytes of code per language in a single repository.
pub type LanguageMap = HashMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Profile {
    pub login: String,
    pub public_repos: u32,
    pub followers: u32,
}

pub trait Repo: Send + Sync {
    fn name(&self) -> &str;
    fn owner(&self) -> &str;
    fn forks(&self) -> u64;
}

impl<R: Repo> Repo for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn owner(&self) -> &str {
        (**self).owner()
    }

    fn forks(&self) -> u64 {
        (**self).forks()
    }
}

#[async_trait]
pub trait Client: Send + Sync {
    type REPO: Repo;

    async fn user(&self, user: &str) -> Result<Profile>;

    async fn user_repos(&self, user: &str) -> Result<Vec<Self::REPO>>;

    async fn repo_languages(&self, repo: &Self::REPO) -> Result<LanguageMap>;
}
