//! Issue a personal access token for an existing user.
//!
//! Prints the plaintext once; only its SHA-256 digest is stored.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use office_listings::domain::ports::AccessTokenRepository;
use office_listings::domain::{Ability, NewAccessToken, PlainToken, UserId};
use office_listings::outbound::persistence::{DbPool, DieselAccessTokenRepository, PoolConfig};
use tokio::runtime::Builder;

/// `issue-token` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "issue-token",
    about = "Issue a personal access token for a user",
    version
)]
struct CliArgs {
    /// Owner of the new token.
    #[arg(long = "user-id", value_name = "id")]
    user_id: i64,
    /// Label for the token, such as the device it is used from.
    #[arg(long, value_name = "name", default_value = "cli")]
    name: String,
    /// Granted ability. Repeat for several; `*` grants all.
    #[arg(long = "ability", value_name = "ability")]
    abilities: Vec<String>,
    /// Database connection URL.
    #[arg(long = "database-url", env = "OFFICES_DATABASE_URL", value_name = "url")]
    database_url: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(issue(args))
}

async fn issue(args: CliArgs) -> Result<()> {
    let abilities = if args.abilities.is_empty() {
        vec![Ability::OfficeCreate.as_str().to_owned()]
    } else {
        args.abilities
    };

    let pool = DbPool::new(PoolConfig::new(&args.database_url).with_max_size(1))
        .await
        .wrap_err("create database pool")?;
    let tokens = DieselAccessTokenRepository::new(pool);

    let token = PlainToken::generate();
    tokens
        .store(&NewAccessToken {
            user_id: UserId::new(args.user_id),
            name: args.name,
            hash: token.hash(),
            abilities,
        })
        .await
        .map_err(|error| eyre!("store token: {error}"))?;

    println!("{}", token.expose());
    Ok(())
}
