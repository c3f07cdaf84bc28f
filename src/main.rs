use std::time::Duration;

use tokio::time;
use tracing::{error, info, Level};

use otpyrc::{
    build_view_with,
    configuration::{get_configuration, set_configuration, Config},
    error::Error,
    CycleOptions, ViewInput, HTTP,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = match init() {
        Ok(config) => config,
        Err(e) => return Err(Error::ConfigurationError(e.to_string())),
    };

    let http = HTTP::new(config.clone())?;
    let input = ViewInput::new(
        config.coins.to_owned(),
        config.currencies.to_owned(),
        config.selected_currency.to_owned(),
    );

    if config.refresh_interval == 0 {
        return run_cycle(&http, &input, &config).await;
    }

    let mut interval =
        time::interval(Duration::from_secs(config.refresh_interval));
    loop {
        tokio::select! {
            _ = interval.tick() => {},
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                return Ok(());
            }
        }

        match run_cycle(&http, &input, &config).await {
            Ok(()) => {},
            Err(Error::Cancelled) => return Ok(()),
            // the next tick retries
            Err(e) => error!("{}", e),
        }
    }
}

fn init() -> Result<Config, Error> {
    set_configuration()?;
    get_configuration()
}

async fn run_cycle(
    http: &HTTP,
    input: &ViewInput,
    config: &Config,
) -> Result<(), Error> {
    let options = CycleOptions::new()
        .trend_currency(config.trend_currency.to_owned())
        .cancel_on(async {
            let _ = tokio::signal::ctrl_c().await;
        });

    let view = build_view_with(http, input, options)
        .await
        .map_err(|e| e.error)?;

    for quote in view.selected() {
        info!(
            "{} {} {} ({})",
            quote.asset,
            quote.price,
            view.selected_currency(),
            quote.change.formatted()
        );
    }

    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
