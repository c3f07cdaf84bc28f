use std::{str::FromStr, time::Duration};

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

use crate::{
    configuration::Config,
    error::{Endpoint, Error},
    types::{CoinGeckoMarkets, CoinGeckoPrice, QuoteQuery, TrendQuery},
};

use super::PriceSource;

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
    pub http: Client,
    headers: HeaderMap,
}

impl HTTP {
    pub fn new(config: Config) -> Result<HTTP, Error> {
        let http = match Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                return Err(Error::ReqwestError(e));
            },
        };

        Self::with_client(config, http)
    }

    /// Uses a caller supplied client. The configured timeout is not applied.
    pub fn with_client(config: Config, http: Client) -> Result<HTTP, Error> {
        let mut headers = HeaderMap::new();

        headers.insert(
            HeaderName::from_str("User-Agent")?,
            HeaderValue::from_str("otpyrc")?,
        );

        if let Some(key) = &config.api_key {
            headers.insert(
                HeaderName::from_static(API_KEY_HEADER),
                HeaderValue::from_str(key)?,
            );
        }

        Ok(HTTP {
            config,
            http,
            headers,
        })
    }

    async fn get_json<Q, T>(
        &self,
        endpoint: Endpoint,
        url: &Url,
        query: &Q,
    ) -> Result<T, Error>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("GET {} ({})", url, endpoint);

        let response = self
            .http
            .get(url.clone())
            .headers(self.headers.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| Error::from_transport(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(
                endpoint,
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            Error::fetch(endpoint, Some(status.as_u16()), e.to_string())
        })
    }

    pub async fn get_coingecko_prices(
        &self,
        query: &QuoteQuery,
    ) -> Result<CoinGeckoPrice, Error> {
        self.get_json(Endpoint::Quote, &self.config.quote_url, query)
            .await
    }

    pub async fn get_coingecko_markets(
        &self,
        query: &TrendQuery,
    ) -> Result<CoinGeckoMarkets, Error> {
        self.get_json(Endpoint::Trend, &self.config.trend_url, query)
            .await
    }
}

impl PriceSource for HTTP {
    async fn fetch_quotes(
        &self,
        query: &QuoteQuery,
    ) -> Result<CoinGeckoPrice, Error> {
        self.get_coingecko_prices(query).await
    }

    async fn fetch_trends(
        &self,
        query: &TrendQuery,
    ) -> Result<CoinGeckoMarkets, Error> {
        self.get_coingecko_markets(query).await
    }
}
