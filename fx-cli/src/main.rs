//! FX CLI
//!
//! Command-line interface for the currency exchange API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use fx_client::FxClient;
use fx_types::{CodePair, CurrencyCode};

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Currency exchange API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the exchange API
    #[arg(long, env = "FX_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Currency operations
    Currency {
        #[command(subcommand)]
        action: CurrencyCommands,
    },
    /// Exchange rate operations
    Rate {
        #[command(subcommand)]
        action: RateCommands,
    },
    /// Convert an amount between two currencies
    Convert {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: f64,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum CurrencyCommands {
    /// List all currencies
    List,
    /// Get a currency by code
    Get {
        /// Three uppercase letters, e.g. EUR
        code: String,
    },
    /// Add a currency
    Add {
        /// Three uppercase letters, e.g. EUR
        code: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Display symbol
        #[arg(long)]
        sign: String,
    },
}

#[derive(Subcommand)]
enum RateCommands {
    /// List all exchange rates
    List,
    /// Get the stored rate of a code pair
    Get {
        /// Base and target codes, e.g. USDEUR
        pair: String,
    },
    /// Add an exchange rate
    Add {
        #[arg(long)]
        base: String,
        #[arg(long)]
        target: String,
        /// Units of target per 1 unit of base
        #[arg(long)]
        rate: f64,
    },
    /// Replace the rate of an existing exchange rate
    Update {
        /// Base and target codes, e.g. USDEUR
        pair: String,
        #[arg(long)]
        rate: f64,
    },
}

fn parse_code(s: &str) -> Result<CurrencyCode> {
    CurrencyCode::parse(s).map_err(|e| anyhow::anyhow!("Invalid currency code: {}", e))
}

fn parse_pair(s: &str) -> Result<CodePair> {
    CodePair::parse(s).map_err(|e| anyhow::anyhow!("Invalid code pair: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = FxClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Currency { action } => match action {
            CurrencyCommands::List => {
                let currencies = client.list_currencies().await?;
                println!("{}", serde_json::to_string_pretty(&currencies)?);
            }
            CurrencyCommands::Get { code } => {
                let code = parse_code(&code)?;
                let currency = client.get_currency(code.as_str()).await?;
                println!("{}", serde_json::to_string_pretty(&currency)?);
            }
            CurrencyCommands::Add { code, name, sign } => {
                let code = parse_code(&code)?;
                let currency = client.add_currency(&name, code.as_str(), &sign).await?;
                println!("{}", serde_json::to_string_pretty(&currency)?);
            }
        },

        Commands::Rate { action } => match action {
            RateCommands::List => {
                let rates = client.list_exchange_rates().await?;
                println!("{}", serde_json::to_string_pretty(&rates)?);
            }
            RateCommands::Get { pair } => {
                let pair = parse_pair(&pair)?;
                let rate = client.get_exchange_rate(&pair.to_string()).await?;
                println!("{}", serde_json::to_string_pretty(&rate)?);
            }
            RateCommands::Add { base, target, rate } => {
                let base = parse_code(&base)?;
                let target = parse_code(&target)?;
                let rate = client
                    .add_exchange_rate(base.as_str(), target.as_str(), rate)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&rate)?);
            }
            RateCommands::Update { pair, rate } => {
                let pair = parse_pair(&pair)?;
                let rate = client.update_exchange_rate(&pair.to_string(), rate).await?;
                println!("{}", serde_json::to_string_pretty(&rate)?);
            }
        },

        Commands::Convert { from, to, amount } => {
            let from = parse_code(&from)?;
            let to = parse_code(&to)?;
            let result = client.convert(from.as_str(), to.as_str(), amount).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "fx", "--api-url", "http://fx:3000", "convert", "--from", "RUB", "--to", "EUR",
            "--amount", "1000",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://fx:3000");
        assert!(matches!(
            cli.command,
            Commands::Convert { ref from, amount, .. } if from == "RUB" && amount == 1000.0
        ));
    }

    #[test]
    fn test_rejects_malformed_pair() {
        assert!(parse_pair("USDEU").is_err());
        assert!(parse_code("usd").is_err());
    }
}
