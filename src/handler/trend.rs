use serde_json::Value;
use tracing::debug;

use crate::{
    helpers::coerce_number, model::TrendSeries, types::CoinGeckoMarkets,
};

/// Maps every market record onto its sparkline. Null or unparseable samples
/// are dropped and a record without a sparkline keeps an empty series.
pub fn normalize_trends(response: &CoinGeckoMarkets) -> TrendSeries {
    let mut series = TrendSeries::new();

    for market in response {
        let asset = market.id.trim().to_lowercase();
        let samples: &[Value] = market
            .sparkline_in_7d
            .as_ref()
            .and_then(|sparkline| sparkline.price.as_deref())
            .unwrap_or_default();

        let prices: Vec<f64> =
            samples.iter().filter_map(coerce_number).collect();

        if prices.len() != samples.len() {
            debug!(
                "{}: dropped {} unusable trend samples",
                asset,
                samples.len() - prices.len()
            );
        }

        if !series.insert(asset.to_owned(), prices) {
            debug!("{}: duplicate trend record ignored", asset);
        }
    }

    series
}
