use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct User {
    pub login: String,
    pub public_repos: u32,
    pub followers: u32,
}

impl From<User> for portfolio::api::Profile {
    fn from(user: User) -> Self {
        portfolio::api::Profile::new(user.login, user.public_repos, user.followers)
    }
}

#[derive(Deserialize, Debug)]
pub struct Repo {
    pub name: String,
    pub forks: u64,
    pub owner: RepoOwner,
}

#[derive(Deserialize, Debug)]
pub struct RepoOwner {
    pub login: String,
}

impl From<Repo> for crate::GithubRepo {
    fn from(repo: Repo) -> Self {
        crate::GithubRepo {
            name: repo.name,
            owner: repo.owner.login,
            forks: repo.forks,
        }
    }
}
