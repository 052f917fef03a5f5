use clap::Parser;
use dev_portfolio_app::{table, Args};
use futures::StreamExt;
use portfolio::api::Error;

/// Prints a portfolio row of every user listed in the users file

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let users_file = match &args.users_file {
        Some(users_file) => users_file.clone(),
        None => dev_portfolio_app::prompt_users_file()?,
    };
    let users = dev_portfolio_app::read_users(users_file)?;

    let portfolio_stream = dev_portfolio_app::calculate_portfolio(args, users)?;

    println!("{}", table::header());
    portfolio_stream
        .for_each(|outcome| async move {
            println!("{}", table::row(&outcome));
        })
        .await;

    Ok(())
}
