use std::{fs, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use paypal_payments::{
    frontend::{
        cli::{decode, query, refund, Commands},
        logging, Cli, Config,
    },
    paypal, Payment, PaymentList, Refund, Sale,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::install();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or(PathBuf::from("config.toml"));

    match cli.command {
        Commands::Query(args) => list_url(&Config::load(&config_path)?, &args)?,
        Commands::Decode(args) => decode(&args)?,
        Commands::RefundBody(args) => refund_body(&args)?,
    }

    Ok(())
}

fn list_url(config: &Config, args: &query::Args) -> Result<()> {
    let url = paypal::payment_list_url(&config.paypal.base_url, &args.to_params())
        .wrap_err("failed to build payment list url")?;
    println!("{url}");
    Ok(())
}

fn decode(args: &decode::Args) -> Result<()> {
    let payload = fs::read_to_string(&args.path)
        .wrap_err_with(|| format!("failed to read `{}`", args.path.to_string_lossy()))?;

    let canonical = match args.kind {
        decode::Kind::Payment => reencode::<Payment>(&payload)?,
        decode::Kind::PaymentList => reencode::<PaymentList>(&payload)?,
        decode::Kind::Sale => reencode::<Sale>(&payload)?,
        decode::Kind::Refund => reencode::<Refund>(&payload)?,
    };
    info!("decoded {:?} from `{}`", args.kind, args.path.to_string_lossy());
    println!("{canonical}");
    Ok(())
}

fn reencode<T: DeserializeOwned + Serialize>(payload: &str) -> Result<String> {
    let value = serde_json::from_str::<T>(payload).wrap_err("failed to decode payload")?;
    serde_json::to_string_pretty(&value).wrap_err("failed to encode payload")
}

fn refund_body(args: &refund::Args) -> Result<()> {
    let params = args.to_params();
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}
