use crate::api::{Error, LanguageMap, Profile, Repo, Result};
use derive_more::Constructor;
use std::collections::HashMap;
use std::fmt::Display;

/// Number of languages listed by name before the rest is folded into `Other`.
pub const DEFAULT_TOP_LANGUAGES: usize = 5;

/// Bytes of code per language summed over all repositories of a user.
pub type LanguageTally = HashMap<String, u64>;

#[derive(Debug, Clone, PartialEq)]
pub enum DistributionEntry {
    Language { name: String, percentage: f64 },
    Other { percentage: f64 },
    /// User has no repositories or none of them reports any language bytes.
    NoData,
}

impl DistributionEntry {
    pub fn label(&self) -> &str {
        match self {
            DistributionEntry::Language { name, .. } => name,
            DistributionEntry::Other { .. } => "Other",
            DistributionEntry::NoData => "no language data",
        }
    }

    pub fn percentage(&self) -> Option<f64> {
        match self {
            DistributionEntry::Language { percentage, .. } | DistributionEntry::Other { percentage } => {
                Some(*percentage)
            }
            DistributionEntry::NoData => None,
        }
    }
}

impl Display for DistributionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.percentage() {
            Some(percentage) => write!(f, "{}: {:.2}%", self.label(), percentage),
            None => f.write_str(self.label()),
        }
    }
}

/// Forks and language distribution of all repositories of `owner`.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct RepoStats {
    pub owner: String,
    pub forks: u64,
    pub distribution: Vec<DistributionEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserReport {
    pub login: String,
    pub public_repos: u32,
    pub followers: u32,
    pub forks: u64,
    pub distribution: Vec<DistributionEntry>,
}

#[derive(Constructor)]
struct RankedLanguage<'a> {
    name: &'a str,
    bytes: u64,
}

/// Merges per repository language maps into a single tally.
/// Returns the tally together with the total number of bytes in all languages.
pub fn accumulate<I>(language_maps: I) -> (LanguageTally, u64)
where
    I: IntoIterator<Item = LanguageMap>,
{
    language_maps
        .into_iter()
        .flatten()
        .fold((LanguageTally::new(), 0), |(mut tally, total_bytes), (language, bytes)| {
            *tally.entry(language).or_insert(0) += bytes;
            (tally, total_bytes + bytes)
        })
}

/// Returns shares of the `k` most used languages followed by the share of all remaining ones.
///
/// Languages are ranked by byte count in desc order, languages with equal byte count by name.
/// With `total_bytes` equal to 0 the only returned entry is `DistributionEntry::NoData`.
///
/// # Arguments
/// * `tally` - Bytes per language
/// * `total_bytes` - Sum of bytes in `tally`
/// * `k` - Maximal number of languages listed by name
pub fn reduce(tally: &LanguageTally, total_bytes: u64, k: usize) -> Vec<DistributionEntry> {
    if total_bytes == 0 {
        return vec![DistributionEntry::NoData];
    }
    let ranked = rank(tally);
    let top = &ranked[..k.min(ranked.len())];
    let top_bytes: u64 = top.iter().map(|language| language.bytes).sum();

    let mut distribution: Vec<DistributionEntry> = top
        .iter()
        .map(|language| DistributionEntry::Language {
            name: language.name.to_string(),
            percentage: percentage(language.bytes, total_bytes),
        })
        .collect();
    distribution.push(DistributionEntry::Other {
        percentage: percentage(total_bytes.saturating_sub(top_bytes), total_bytes),
    });
    distribution
}

fn rank(tally: &LanguageTally) -> Vec<RankedLanguage<'_>> {
    let mut ranked: Vec<RankedLanguage> = tally
        .iter()
        .map(|(name, bytes)| RankedLanguage::new(name, *bytes))
        .collect();
    ranked.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(b.name)));
    ranked
}

fn percentage(bytes: u64, total_bytes: u64) -> f64 {
    bytes as f64 * 100.0 / total_bytes as f64
}

pub fn sum_forks<I>(forks: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    forks.into_iter().fold(0, |acc, f| acc + f)
}

/// Reduces repositories of `owner` and their language maps to `RepoStats`.
///
/// Fails with `Error::MisalignedInput` when any of `repos` is owned by someone else than `owner`.
pub fn repo_stats<REPO: Repo>(
    owner: impl Into<String>,
    repos: &[REPO],
    language_maps: Vec<LanguageMap>,
    top_languages: usize,
) -> Result<RepoStats> {
    let owner = owner.into();
    if let Some(repo) = repos.iter().find(|repo| !repo.owner().eq_ignore_ascii_case(&owner)) {
        return Err(Error::MisalignedInput {
            profile: owner,
            repos: repo.owner().to_string(),
        });
    }
    let forks = sum_forks(repos.iter().map(Repo::forks));
    let (tally, total_bytes) = accumulate(language_maps);
    Ok(RepoStats::new(owner, forks, reduce(&tally, total_bytes, top_languages)))
}

/// Joins user profile with statistics of the user's repositories.
///
/// Fails with `Error::MisalignedInput` when `stats` belong to a different user than `profile`.
pub fn assemble(profile: Profile, stats: RepoStats) -> Result<UserReport> {
    if !profile.login.eq_ignore_ascii_case(&stats.owner) {
        return Err(Error::MisalignedInput {
            profile: profile.login,
            repos: stats.owner,
        });
    }
    Ok(UserReport {
        login: profile.login,
        public_repos: profile.public_repos,
        followers: profile.followers,
        forks: stats.forks,
        distribution: stats.distribution,
    })
}

/// Tests

#[cfg(test)]
fn tally(languages: &[(&str, u64)]) -> LanguageTally {
    languages
        .iter()
        .map(|(name, bytes)| (name.to_string(), *bytes))
        .collect()
}

#[cfg(test)]
fn rendered(distribution: &[DistributionEntry]) -> Vec<String> {
    distribution.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
struct TestRepo(&'static str, u64);

#[cfg(test)]
impl Repo for TestRepo {
    fn name(&self) -> &str {
        "repo"
    }

    fn owner(&self) -> &str {
        self.0
    }

    fn forks(&self) -> u64 {
        self.1
    }
}

#[test]
fn accumulate_order_independent_test() {
    let maps = vec![tally(&[("Go", 10)]), tally(&[("Go", 5)]), tally(&[("Rust", 3)])];
    let mut reversed = maps.clone();
    reversed.reverse();

    let expected = (tally(&[("Go", 15), ("Rust", 3)]), 18);
    assert_eq!(accumulate(maps), expected);
    assert_eq!(accumulate(reversed), expected);
}

#[test]
fn accumulate_empty_test() {
    assert_eq!(accumulate(Vec::new()), (LanguageTally::new(), 0));
    assert_eq!(accumulate(vec![LanguageMap::new(), LanguageMap::new()]), (LanguageTally::new(), 0));
}

#[test]
fn reduce_fewer_than_k_test() {
    let distribution = reduce(&tally(&[("Go", 70), ("Rust", 20), ("Python", 10)]), 100, 5);
    assert_eq!(
        rendered(&distribution),
        vec!["Go: 70.00%", "Rust: 20.00%", "Python: 10.00%", "Other: 0.00%"]
    );
    assert_eq!(distribution.last(), Some(&DistributionEntry::Other { percentage: 0.0 }));
}

#[test]
fn reduce_more_than_k_test() {
    let languages = tally(&[("A", 50), ("B", 30), ("C", 10), ("D", 5), ("E", 3), ("F", 2)]);
    let distribution = reduce(&languages, 100, 5);
    assert_eq!(
        rendered(&distribution),
        vec!["A: 50.00%", "B: 30.00%", "C: 10.00%", "D: 5.00%", "E: 3.00%", "Other: 2.00%"]
    );
}

#[test]
fn reduce_no_data_test() {
    let distribution = reduce(&LanguageTally::new(), 0, DEFAULT_TOP_LANGUAGES);
    assert_eq!(distribution, vec![DistributionEntry::NoData]);
    assert_eq!(rendered(&distribution), vec!["no language data"]);
}

#[test]
fn reduce_sums_to_hundred_test() {
    let languages = tally(&[("C", 7), ("Go", 13), ("Rust", 29), ("Shell", 1), ("Lua", 3), ("Nix", 11), ("Zig", 2)]);
    let total_bytes = languages.values().sum();
    for k in 0..=8 {
        let sum: f64 = reduce(&languages, total_bytes, k)
            .iter()
            .filter_map(DistributionEntry::percentage)
            .sum();
        assert!((sum - 100.0).abs() <= 0.01, "k = {}, sum = {}", k, sum);
    }
}

#[test]
fn reduce_other_from_residual_bytes_test() {
    let languages = tally(&[("A", 1), ("B", 1), ("C", 1)]);
    let distribution = reduce(&languages, 3, 2);
    assert_eq!(rendered(&distribution), vec!["A: 33.33%", "B: 33.33%", "Other: 33.33%"]);
}

#[test]
fn reduce_tie_break_test() {
    let mut languages = vec![("Rust", 10), ("Go", 10), ("C", 10), ("Zig", 20)];
    let expected = vec!["Zig: 40.00%", "C: 20.00%", "Go: 20.00%", "Other: 20.00%"];
    for run in 0..12 {
        // fresh map each run, so both insertion order and hasher seed change
        languages.rotate_left(1);
        if run % 2 == 1 {
            languages.swap(0, 2);
        }
        assert_eq!(rendered(&reduce(&tally(&languages), 50, 3)), expected, "run {}", run);
    }
}

#[test]
fn sum_forks_test() {
    assert_eq!(sum_forks(Vec::new()), 0);
    assert_eq!(sum_forks(vec![3, 0, 7]), 10);
}

#[test]
fn repo_stats_test() -> anyhow::Result<()> {
    let repos = vec![TestRepo("owner", 3), TestRepo("Owner", 0), TestRepo("owner", 7)];
    let maps = vec![tally(&[("Go", 10)]), tally(&[("Go", 5)]), tally(&[("Rust", 5)])];
    let stats = repo_stats("owner", &repos, maps, 1)?;
    assert_eq!(stats.forks, 10);
    assert_eq!(rendered(&stats.distribution), vec!["Go: 75.00%", "Other: 25.00%"]);
    Ok(())
}

#[test]
fn repo_stats_foreign_repo_test() {
    let repos = vec![TestRepo("octocat", 1), TestRepo("hubot", 99)];
    let maps = vec![tally(&[("Ruby", 10)]), tally(&[("Go", 10)])];
    match repo_stats("octocat", &repos, maps, 5) {
        Err(Error::MisalignedInput { profile, repos }) => {
            assert_eq!(profile, "octocat");
            assert_eq!(repos, "hubot");
        }
        other => panic!("Expected misaligned input error, got {:?}", other),
    }
}

#[test]
fn assemble_test() -> anyhow::Result<()> {
    let profile = Profile::new("Octocat".to_string(), 8, 42);
    let stats = RepoStats::new("octocat".to_string(), 10, vec![DistributionEntry::NoData]);
    let report = assemble(profile, stats)?;
    assert_eq!(
        report,
        UserReport {
            login: "Octocat".to_string(),
            public_repos: 8,
            followers: 42,
            forks: 10,
            distribution: vec![DistributionEntry::NoData],
        }
    );
    Ok(())
}

#[test]
fn assemble_misaligned_test() {
    let profile = Profile::new("octocat".to_string(), 8, 42);
    let stats = RepoStats::new("hubot".to_string(), 10, vec![DistributionEntry::NoData]);
    match assemble(profile, stats) {
        Err(Error::MisalignedInput { profile, repos }) => {
            assert_eq!(profile, "octocat");
            assert_eq!(repos, "hubot");
        }
        other => panic!("Expected misaligned input error, got {:?}", other),
    }
}
