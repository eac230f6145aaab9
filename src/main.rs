use std::{fs::File, sync::Mutex, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, fmt::writer::BoxMakeWriter, prelude::*};

use portfolio_goal_tracker::{
    api::{PriceFileSource, PriceSource, YahooPriceSource},
    app::{App, Portfolio, report},
    config::Args,
    services::PriceService,
};

fn init_tracing(args: &Args) -> Result<()> {
    // The dashboard owns the terminal, so logs go to a file unless printing once.
    let writer = if args.once {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        let file = File::create(&args.log_file)
            .with_context(|| format!("Failed to create log file {}", args.log_file.display()))?;
        BoxMakeWriter::new(Mutex::new(file))
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(fmt::layer().with_writer(writer).with_ansi(args.once))
        .init();

    Ok(())
}

fn price_source(args: &Args) -> Result<Box<dyn PriceSource>> {
    match &args.prices_file {
        Some(path) => Ok(Box::new(PriceFileSource::new(path.clone()))),
        None => Ok(Box::new(
            YahooPriceSource::new().context("Failed to set up Yahoo Finance")?,
        )),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args)?;

    let mut portfolio = Portfolio::new(
        args.sheet_source(),
        args.columns(),
        args.goal,
        PriceService::new(price_source(&args)?),
        args.refresh_policy(),
    );

    if args.once {
        return match portfolio.refresh(Instant::now()).await {
            Ok(dashboard) if args.json => {
                println!("{}", serde_json::to_string_pretty(dashboard)?);
                Ok(())
            }
            Ok(dashboard) => {
                print!(
                    "{}",
                    report::render_text(dashboard, &args.title, &args.currency_symbol)
                );
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!(report::failure_hint(e))),
        };
    }

    let mut app = App::new(portfolio, args.display_options());
    app.run().await
}
