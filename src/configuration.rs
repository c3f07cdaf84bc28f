use std::{env, fs, path::Path};

use url::Url;

use crate::error::Error;

pub const DEFAULT_QUOTE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price";
pub const DEFAULT_TREND_URL: &str =
    "https://api.coingecko.com/api/v3/coins/markets";

#[derive(Debug, Clone)]
pub struct Config {
    pub quote_url: Url,
    pub trend_url: Url,
    pub trend_currency: String,
    pub timeout: u64,
    pub api_key: Option<String>,
    pub coins: String,
    pub currencies: String,
    pub selected_currency: String,
    pub refresh_interval: u64,
}

impl Config {
    pub fn new(quote_url: Url, trend_url: Url) -> Self {
        Config {
            quote_url,
            trend_url,
            trend_currency: String::from("usd"),
            timeout: 10,
            api_key: None,
            coins: String::from("bitcoin,ethereum,dogecoin"),
            currencies: String::from("usd,inr,eur"),
            selected_currency: String::new(),
            refresh_interval: 0,
        }
    }
}

fn var_or<F>(lookup: &F, key: &str, default: &str) -> Result<String, Error>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match lookup(key) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.to_owned()),
        Err(e) => Err(Error::VAR(e)),
    }
}

fn parse_url<F>(lookup: &F, key: &str, default: &str) -> Result<Url, Error>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    let value = var_or(lookup, key, default)?;
    Url::parse(value.trim()).map_err(|e| {
        Error::ConfigurationError(format!("{} is not a valid url: {}", key, e))
    })
}

pub fn get_configuration() -> Result<Config, Error> {
    read_configuration(|key| env::var(key))
}

fn read_configuration<F>(lookup: F) -> Result<Config, Error>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    let lookup = &lookup;
    let quote_url = parse_url(lookup, "QUOTE_URL", DEFAULT_QUOTE_URL)?;
    let trend_url = parse_url(lookup, "TREND_URL", DEFAULT_TREND_URL)?;
    let defaults = Config::new(quote_url, trend_url);

    let trend_currency =
        var_or(lookup, "TREND_CURRENCY", &defaults.trend_currency)?
            .trim()
            .to_lowercase();
    if trend_currency.is_empty() {
        return Err(Error::ConfigurationError(String::from(
            "TREND_CURRENCY must not be empty",
        )));
    }

    let timeout: u64 = var_or(lookup, "TIMEOUT", "10")?.trim().parse()?;
    if timeout == 0 {
        return Err(Error::ConfigurationError(String::from(
            "TIMEOUT must be at least one second",
        )));
    }

    let api_key = match var_or(lookup, "API_KEY", "")?.trim() {
        "" => None,
        key => Some(key.to_owned()),
    };

    let coins = var_or(lookup, "COINS", &defaults.coins)?;
    let currencies = var_or(lookup, "CURRENCIES", &defaults.currencies)?;
    let selected_currency = var_or(lookup, "SELECTED_CURRENCY", "")?;
    let refresh_interval: u64 =
        var_or(lookup, "REFRESH_INTERVAL_IN_SEC", "0")?.trim().parse()?;

    let config = Config {
        trend_currency,
        timeout,
        api_key,
        coins,
        currencies,
        selected_currency,
        refresh_interval,
        ..defaults
    };

    Ok(config)
}

/// Loads `otpyrc.conf` from the manifest directory into the environment,
/// if the file exists. Variables already set in the environment win.
pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = "otpyrc.conf";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);

    if !Path::new(&path).exists() {
        return Ok(());
    }

    let config_string = fs::read_to_string(path)?;
    let unset = pending_variables(&config_string, |key| {
        env::var_os(key).is_some()
    });

    for (key, value) in unset {
        env::set_var(key, value);
    }

    Ok(())
}

/// Entries of the config file whose keys are not already set.
fn pending_variables<F>(config: &str, is_set: F) -> Vec<(String, String)>
where
    F: Fn(&str) -> bool,
{
    parse_config_string(config)
        .into_iter()
        .filter(|(key, _)| !is_set(key.as_str()))
        .collect()
}

fn parse_config_string(config: &str) -> Vec<(String, String)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}
