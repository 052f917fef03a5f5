mod builder;
mod payload;

pub use builder::GithubClientBuilder;
pub use builder::DEFAULT_GITHUB_URL;

use async_trait::async_trait;
use log::debug;
use portfolio::api::{Client, Error, LanguageMap, Profile, Result};
use reqwest::Response;
use serde::de::DeserializeOwned;
use url::Url;

pub struct GithubClient {
    client: reqwest::Client,
    github_url: Url,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GithubRepo {
    name: String,
    owner: String,
    forks: u64,
}

impl portfolio::api::Repo for GithubRepo {
    fn name(&self) -> &str {
        &self.name
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn forks(&self) -> u64 {
        self.forks
    }
}

impl GithubClient {
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.github_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Error("GitHub URL cannot be a base URL."))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Ok(read_response::<T>(response).await?)
    }
}

pub(crate) async fn read_response<T: DeserializeOwned>(response: Response) -> reqwest::Result<T> {
    response.error_for_status()?.json::<T>().await
}

#[async_trait]
impl Client for GithubClient {
    type REPO = GithubRepo;

    async fn user(&self, user: &str) -> Result<Profile> {
        let url = self.endpoint(&["users", user])?;
        let user = self.get::<payload::User>(url).await?;
        Ok(user.into())
    }

    async fn user_repos(&self, user: &str) -> Result<Vec<Self::REPO>> {
        let url = self.endpoint(&["users", user, "repos"])?;
        let repos = self.get::<Vec<payload::Repo>>(url).await?;
        Ok(repos.into_iter().map(GithubRepo::from).collect())
    }

    async fn repo_languages(&self, repo: &Self::REPO) -> Result<LanguageMap> {
        let url = self.endpoint(&["repos", repo.owner.as_str(), repo.name.as_str(), "languages"])?;
        self.get::<LanguageMap>(url).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{GithubClientBuilder, GithubRepo};
    use portfolio::api::{Client, Error, Profile};
    use secrecy::SecretString;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_get(server: &MockServer, url_path: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(url_path))
            .and(header("Accept", "application/vnd.github.v3+json"))
            .respond_with(ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json"))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn user_test() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/users/octocat",
            200,
            r#"{ "login": "octocat", "id": 583231, "public_repos": 8, "followers": 9001, "following": 9 }"#,
        )
        .await;

        let client = GithubClientBuilder::default().with_github_url(server.uri()).build()?;
        let profile = client.user("octocat").await?;
        assert_eq!(profile, Profile::new("octocat".to_string(), 8, 9001));
        Ok(())
    }

    #[tokio::test]
    async fn user_repos_and_languages_test() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/users/octocat/repos",
            200,
            r#"[
                { "name": "hello-world", "forks": 3, "stargazers_count": 10, "owner": { "login": "octocat" } },
                { "name": "linguist", "forks": 0, "owner": { "login": "octocat" } }
            ]"#,
        )
        .await;
        mock_get(
            &server,
            "/repos/octocat/linguist/languages",
            200,
            r#"{ "Ruby": 1000, "Shell": 20 }"#,
        )
        .await;

        let client = GithubClientBuilder::default().with_github_url(server.uri()).build()?;
        let repos = client.user_repos("octocat").await?;
        assert_eq!(
            repos,
            vec![
                GithubRepo {
                    name: "hello-world".to_string(),
                    owner: "octocat".to_string(),
                    forks: 3
                },
                GithubRepo {
                    name: "linguist".to_string(),
                    owner: "octocat".to_string(),
                    forks: 0
                },
            ]
        );

        let languages = client.repo_languages(&repos[1]).await?;
        assert_eq!(languages.len(), 2);
        assert_eq!(languages.get("Ruby"), Some(&1000));
        assert_eq!(languages.get("Shell"), Some(&20));
        Ok(())
    }

    #[tokio::test]
    async fn not_found_test() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        mock_get(&server, "/users/ghost", 404, r#"{ "message": "Not Found" }"#).await;

        let client = GithubClientBuilder::default().with_github_url(server.uri()).build()?;
        match client.user("ghost").await {
            Err(Error::RequestError(err)) => assert_eq!(err.status().map(|s| s.as_u16()), Some(404)),
            other => panic!("Expected request error, got {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn token_test() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .and(header("Authorization", "token secret"))
            .and(header("User-Agent", "portfolio"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{ "login": "octocat", "public_repos": 1, "followers": 2 }"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let client = GithubClientBuilder::default()
            .with_github_url(server.uri())
            .try_with_token(SecretString::new("secret".to_string()))?
            .try_with_user_agent("portfolio")?
            .build()?;
        let profile = client.user("octocat").await?;
        assert_eq!(profile.followers, 2);
        Ok(())
    }
}
