use std::env;

use anyhow::Result;
use clap::ArgMatches;
use tracing::{debug, info, warn};

mod command_parser;

use tomesearch::{
    catalog::PgCatalog,
    config::Config,
    search::{self, format::format_search_result, SearchOptions},
    types::{edition::Edition, id::UserId, isbn::has_valid_check_digit},
};

fn print_results(editions: &[Edition], config: &Config) -> Result<()> {
    for edition in editions {
        debug!("Found {}", edition);
        let result = format_search_result(edition, &config.media_full_url);
        println!("{}", serde_json::to_string(&result.json()?)?);
    }
    Ok(())
}

async fn handle_search(matches: &ArgMatches, catalog: &PgCatalog, config: &Config) -> Result<()> {
    let query = matches
        .get_many::<String>("query")
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<&str>>()
        .join(" ");
    let options = SearchOptions {
        min_confidence: matches
            .get_one::<f32>("min-confidence")
            .copied()
            .unwrap_or(config.min_confidence),
        return_first: matches.get_flag("first"),
        ..SearchOptions::default()
    };
    let results = match matches.get_one::<i32>("user") {
        Some(user) => search::search_user_shelves(catalog, &query, UserId(*user), options).await?,
        None => search::search(catalog, &query, options).await?,
    };
    info!("{} results for {:?}", results.len(), query);
    print_results(&results, config)
}

async fn handle_isbn(matches: &ArgMatches, catalog: &PgCatalog, config: &Config) -> Result<()> {
    let isbn = matches
        .get_one::<String>("isbn")
        .map(String::as_str)
        .unwrap_or_default();
    if !has_valid_check_digit(isbn) {
        warn!("{} is not a valid isbn, searching anyway.", isbn);
    }
    let results = search::isbn_search(catalog, isbn).await?;
    info!("{} results for isbn {}", results.len(), isbn);
    print_results(&results, config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = command_parser::arg_parser().get_matches_from(env::args_os());

    if let Some(("config", _)) = args.subcommand() {
        print!("{}", Config::default_as_string()?);
        return Ok(());
    }

    dotenvy::dotenv().ok();
    let config =
        Config::read_config()?.with_fallback_database_url(dotenvy::var("DATABASE_URL").ok());

    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_writer(std::io::stderr)
        .init();

    let catalog = PgCatalog::connect(&config).await?;

    match args.subcommand() {
        Some(("search", matches)) => handle_search(matches, &catalog, &config).await?,
        Some(("isbn", matches)) => handle_isbn(matches, &catalog, &config).await?,
        Some((name, _)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }
    Ok(())
}
