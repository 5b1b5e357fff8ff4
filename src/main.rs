use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use whatif::application::service::ScenarioService;
use whatif::config::EngineConfig;
use whatif::domain::ports::{AccountStore, AccountStoreBox};
use whatif::engine::ScenarioEngine;
use whatif::infrastructure::in_memory::InMemoryAccountStore;
use whatif::interfaces::csv::account_reader::AccountReader;
use whatif::interfaces::json::{read_request, write_result};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario request JSON file: {"scenario_type": ..., "params": {...}}
    request: PathBuf,

    /// Accounts CSV file; requests may then name accounts by `account_id`.
    #[arg(long)]
    accounts: Option<PathBuf>,

    /// Engine config JSON file. Missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the result.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => EngineConfig::from_path(path).into_diagnostic()?,
        None => EngineConfig::default(),
    };

    let store = InMemoryAccountStore::new();
    if let Some(path) = cli.accounts {
        let file = File::open(path).into_diagnostic()?;
        for account in AccountReader::new(file).accounts() {
            match account {
                Ok(account) => {
                    log::debug!("loaded account {:?}", account.account_id);
                    store.store(account).await.into_diagnostic()?;
                }
                Err(e) => log::warn!("skipping account row: {e}"),
            }
        }
    }
    let accounts: AccountStoreBox = Box::new(store);
    let service = ScenarioService::new(accounts, ScenarioEngine::new(config));

    let file = File::open(cli.request).into_diagnostic()?;
    let request = read_request(BufReader::new(file)).into_diagnostic()?;
    let result = service.run(request).await.into_diagnostic()?;

    let stdout = io::stdout();
    write_result(stdout.lock(), &result, cli.pretty).into_diagnostic()?;
    Ok(())
}
