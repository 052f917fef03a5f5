pub mod args;
pub mod table;

pub use args::Args;

use anyhow::Context;
use github_client::GithubClientBuilder;
use log::info;
use portfolio::api::Result;
use portfolio::{PortfolioCalculator, PortfolioStream};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Reads user logins, one per line. Blank lines are skipped.
pub fn read_users<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read users file {}", path.display()))?;
    let users = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    Ok(users)
}

pub fn prompt_users_file() -> Result<PathBuf> {
    print!("Enter file name (with .txt): ");
    io::stdout().flush().context("Failed to write prompt")?;
    let mut file_name = String::new();
    io::stdin()
        .lock()
        .read_line(&mut file_name)
        .context("Failed to read users file name")?;
    Ok(PathBuf::from(file_name.trim()))
}

pub fn calculate_portfolio(args: Args, users: Vec<String>) -> Result<PortfolioStream> {
    let mut client = GithubClientBuilder::default().with_github_url(args.api_url);
    if let Some(token) = args.api_token {
        client = client.try_with_token(token)?;
    }
    let client = client.build()?;

    info!("Building portfolio of {} users", users.len());
    let calculator = PortfolioCalculator::new(client, args.top_languages as usize);
    let outcomes = calculator.calculate(users, args.max_user_req as usize, args.max_lang_req as usize);

    Ok(outcomes)
}

#[test]
fn read_users_test() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, " octocat \n\nhubot\r\n")?;
    assert_eq!(read_users(file.path())?, vec!["octocat".to_string(), "hubot".to_string()]);
    Ok(())
}

#[test]
fn read_users_missing_file_test() {
    assert!(read_users("/nonexistent/users.txt").is_err());
}
