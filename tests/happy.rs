use dev_portfolio_app::calculate_portfolio;
use dev_portfolio_app::table;
use dev_portfolio_app::Args;
use futures::StreamExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPOS_COUNT: u32 = 40;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn happy_path() {
    let server = MockServer::start().await;

    mock_json(&server, "/users/alice", user_body("alice", 2, 10)).await;
    mock_json(
        &server,
        "/users/alice/repos",
        format!("[{}, {}]", repo_body("alice", "compiler", 2), repo_body("alice", "dotfiles", 1)),
    )
    .await;
    mock_json(&server, "/repos/alice/compiler/languages", r#"{ "Rust": 300, "Go": 100 }"#.to_string()).await;
    mock_json(&server, "/repos/alice/dotfiles/languages", r#"{ "Rust": 100, "C": 0 }"#.to_string()).await;

    mock_json(&server, "/users/Bob", user_body("bob", 0, 1)).await;
    mock_json(&server, "/users/Bob/repos", "[]".to_string()).await;

    let args = args(server.uri());
    let users = vec!["alice".to_string(), "ghost".to_string(), "Bob".to_string()];
    let rows: Vec<String> = calculate_portfolio(args, users)
        .unwrap()
        .map(|outcome| table::row(&outcome))
        .collect()
        .await;

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], "alice\t2\t[Rust: 80.00%, Go: 20.00%, C: 0.00%, Other: 0.00%]\t10\t3");
    assert!(rows[1].starts_with("ghost\tfailed: "), "Unexpected row: {}", rows[1]);
    assert_eq!(rows[2], "bob\t0\t[no language data]\t1\t0");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_repos_top_languages() {
    let server = MockServer::start().await;

    // Repository `repo_i` has i+1 bytes of `lang_i`, so `lang_39` .. `lang_35` make the top 5
    let mut repos = Vec::new();
    for repo_index in 0..REPOS_COUNT {
        let repo = format!("repo_{}", repo_index);
        repos.push(repo_body("carol", &repo, repo_index));
        mock_json(
            &server,
            &format!("/repos/carol/{}/languages", repo),
            format!(r#"{{ "lang_{}": {} }}"#, repo_index, repo_index + 1),
        )
        .await;
    }
    mock_json(&server, "/users/carol", user_body("carol", REPOS_COUNT, 0)).await;
    mock_json(&server, "/users/carol/repos", format!("[{}]", repos.join(","))).await;

    let rows: Vec<String> = calculate_portfolio(args(server.uri()), vec!["carol".to_string()])
        .unwrap()
        .map(|outcome| table::row(&outcome))
        .collect()
        .await;

    // 820 bytes in total, top 5 have 40 + 39 + 38 + 37 + 36 = 190
    let expected = "carol\t40\t[lang_39: 4.88%, lang_38: 4.76%, lang_37: 4.63%, lang_36: 4.51%, lang_35: 4.39%, Other: 76.83%]\t0\t780";
    assert_eq!(rows, vec![expected.to_string()]);
}

fn args(api_url: String) -> Args {
    Args {
        users_file: None,
        api_token: None,
        api_url,
        top_languages: 5,
        max_user_req: 2,
        max_lang_req: 10,
    }
}

async fn mock_json(server: &MockServer, url_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

fn user_body(login: &str, public_repos: u32, followers: u32) -> String {
    format!(
        r#"{{ "login": "{}", "public_repos": {}, "followers": {} }}"#,
        login, public_repos, followers
    )
}

fn repo_body(owner: &str, name: &str, forks: u32) -> String {
    format!(
        r#"{{ "name": "{}", "forks": {}, "owner": {{ "login": "{}" }} }}"#,
        name, forks, owner
    )
}
