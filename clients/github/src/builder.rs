use crate::GithubClient;
use portfolio::api::Result;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use url::Url;

pub const DEFAULT_GITHUB_URL: &str = "https://api.github.com";

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl"));
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        Self {
            client_builder: ClientBuilder::default(),
            github_url: DEFAULT_GITHUB_URL.to_string(),
            headers,
        }
    }
}

impl GithubClientBuilder {
    pub fn try_with_token(self, token: secrecy::SecretString) -> Result<GithubClientBuilder> {
        let token = format!("token {}", token.expose_secret());
        Ok(self.try_with_header(header::AUTHORIZATION, token, true)?)
    }

    pub fn try_with_user_agent<STR: AsRef<str>>(self, user_agent: STR) -> Result<GithubClientBuilder> {
        Ok(self.try_with_header(header::USER_AGENT, user_agent, false)?)
    }

    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().to_string();
        self
    }

    fn try_with_header(
        mut self,
        key: HeaderName,
        val: impl AsRef<str>,
        sensitive: bool,
    ) -> anyhow::Result<GithubClientBuilder> {
        let mut val = HeaderValue::from_str(val.as_ref())?;
        val.set_sensitive(sensitive);
        self.headers.insert(key, val);
        Ok(self)
    }

    pub fn build(self) -> Result<GithubClient> {
        let github_url = Url::parse(&self.github_url)
            .map_err(|err| anyhow::anyhow!("Invalid GitHub URL '{}': {}", self.github_url, err))?;
        if github_url.cannot_be_a_base() {
            return Err(portfolio::api::Error::Error("GitHub URL cannot be a base URL."));
        }
        let client = self.client_builder.default_headers(self.headers).build()?;
        Ok(GithubClient { client, github_url })
    }
}

#[test]
fn build_invalid_url_test() {
    let client = GithubClientBuilder::default().with_github_url("not a url").build();
    assert!(client.is_err());
}

#[test]
fn build_not_base_url_test() {
    let client = GithubClientBuilder::default().with_github_url("mailto:octocat@github.com").build();
    assert!(matches!(client, Err(portfolio::api::Error::Error(_))));
}
