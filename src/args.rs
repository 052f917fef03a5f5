use clap::Parser;
use github_client::DEFAULT_GITHUB_URL;
use portfolio::aggregator::DEFAULT_TOP_LANGUAGES;
use secrecy::SecretString;
use std::{
    fmt::Display,
    path::PathBuf,
    str::FromStr,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// File with one user login per line. Asked for on stdin when missing
    #[clap(short, long, env, parse(from_os_str))]
    pub users_file: Option<PathBuf>,

    /// API OAuth access token
    #[clap(short, long, env)]
    pub api_token: Option<SecretString>,

    /// Repository API URL
    #[clap(long, env, default_value = DEFAULT_GITHUB_URL)]
    pub api_url: String,

    /// Number of languages listed by name, the rest is reported as Other
    #[clap(short, long, env, default_value_t = DEFAULT_TOP_LANGUAGES as u32, parse(try_from_str=top_languages_in_range))]
    pub top_languages: u32,

    /// Maximal number of users processed in parallel
    #[clap(long, env, default_value_t = 4, parse(try_from_str=max_user_req_in_range))]
    pub max_user_req: u32,

    /// Maximal parallel repository languages requests of a single user
    #[clap(long, env, default_value_t = 10, parse(try_from_str=max_lang_req_in_range))]
    pub max_lang_req: u32,
}

fn top_languages_in_range(value: &str) -> clap::Result<u32, String> {
    number_in_range(value, 1, u32::MAX, "top_languages".to_string())
}

fn max_user_req_in_range(value: &str) -> clap::Result<u32, String> {
    number_in_range(value, 1, u32::MAX, "max_user_req".to_string())
}

fn max_lang_req_in_range(value: &str) -> clap::Result<u32, String> {
    number_in_range(value, 1, u32::MAX, "max_lang_req".to_string())
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> clap::Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}

#[test]
fn number_in_range_test() {
    assert_eq!(number_in_range("3", 1, 5, "n".to_string()), Ok(3));
    assert_eq!(
        number_in_range("0", 1, 5, "n".to_string()),
        Err("n is not in range 1 .. 5.".to_string())
    );
    assert!(number_in_range::<u32>("three", 1, 5, "n".to_string()).is_err());
}

// Only flags given on the command line are asserted, those take precedence over env variables
#[test]
fn args_test() {
    let args = Args::try_parse_from([
        "portfolio",
        "--users-file",
        "users.txt",
        "--top-languages",
        "3",
        "--max-user-req",
        "2",
        "--api-url",
        "http://localhost:8080",
    ])
    .unwrap();
    assert_eq!(args.users_file, Some(PathBuf::from("users.txt")));
    assert_eq!(args.top_languages, 3);
    assert_eq!(args.max_user_req, 2);
    assert_eq!(args.api_url, "http://localhost:8080");
}

#[test]
fn args_zero_top_languages_test() {
    let err = Args::try_parse_from(["portfolio", "--top-languages", "0", "--max-user-req", "1", "--max-lang-req", "1"])
        .unwrap_err();
    assert!(err.to_string().contains("top_languages is not in range"), "{}", err);
}
