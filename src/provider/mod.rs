use std::future::Future;

use crate::{
    error::Error,
    types::{CoinGeckoMarkets, CoinGeckoPrice, QuoteQuery, TrendQuery},
};

pub use self::http::HTTP;

mod http;

/// The two independent upstream calls a fetch cycle depends on.
pub trait PriceSource {
    fn fetch_quotes(
        &self,
        query: &QuoteQuery,
    ) -> impl Future<Output = Result<CoinGeckoPrice, Error>> + Send;

    fn fetch_trends(
        &self,
        query: &TrendQuery,
    ) -> impl Future<Output = Result<CoinGeckoMarkets, Error>> + Send;
}
