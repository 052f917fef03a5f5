use portfolio::{DistributionEntry, UserOutcome, UserReport};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

#[derive(Display, EnumIter, Debug, Clone, Copy, PartialEq)]
pub enum Column {
    Name,
    NofRepos,
    DistofLang,
    Followers,
    Forks,
}

pub fn header() -> String {
    Column::iter()
        .map(|column| column.to_string())
        .collect::<Vec<_>>()
        .join("\t")
}

/// Tab separated row of a user, in `Column` order.
pub fn row(outcome: &UserOutcome) -> String {
    match outcome {
        UserOutcome::Report(report) => Column::iter()
            .map(|column| cell(report, column))
            .collect::<Vec<_>>()
            .join("\t"),
        UserOutcome::Failed { user, error } => format!("{}\tfailed: {}", user, error),
    }
}

fn cell(report: &UserReport, column: Column) -> String {
    match column {
        Column::Name => report.login.clone(),
        Column::NofRepos => report.public_repos.to_string(),
        Column::DistofLang => distribution(&report.distribution),
        Column::Followers => report.followers.to_string(),
        Column::Forks => report.forks.to_string(),
    }
}

pub fn distribution(entries: &[DistributionEntry]) -> String {
    let entries: Vec<String> = entries.iter().map(ToString::to_string).collect();
    format!("[{}]", entries.join(", "))
}

#[test]
fn header_test() {
    assert_eq!(header(), "Name\tNofRepos\tDistofLang\tFollowers\tForks");
}

#[test]
fn report_row_test() {
    let report = UserReport {
        login: "octocat".to_string(),
        public_repos: 8,
        followers: 9001,
        forks: 12,
        distribution: vec![
            DistributionEntry::Language {
                name: "Ruby".to_string(),
                percentage: 87.5,
            },
            DistributionEntry::Other { percentage: 12.5 },
        ],
    };
    assert_eq!(
        row(&UserOutcome::Report(report)),
        "octocat\t8\t[Ruby: 87.50%, Other: 12.50%]\t9001\t12"
    );
}

#[test]
fn failed_row_test() {
    let outcome = UserOutcome::Failed {
        user: "ghost".to_string(),
        error: portfolio::api::Error::Error("Not Found"),
    };
    assert_eq!(row(&outcome), "ghost\tfailed: Error: Not Found");
}
