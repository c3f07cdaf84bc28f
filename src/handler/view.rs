use std::{future::Future, time::Duration};

use chrono::Utc;
use futures::future::{self, Pending};
use tokio::time;
use tracing::{info, warn};

use crate::{
    error::{CycleError, Endpoint, Error},
    handler::{
        build_request, normalize_quotes, normalize_trends,
        quote::selected_quotes,
    },
    model::{Notice, TrendSeries, ViewInput, ViewModel, ViewRequest},
    provider::PriceSource,
    types::{CoinGeckoMarkets, CoinGeckoPrice},
};

/// Per-cycle knobs a presentation layer may pass alongside its input.
#[derive(Debug)]
pub struct CycleOptions<C> {
    pub trend_currency: String,
    pub timeout: Option<Duration>,
    pub cancel: C,
}

impl CycleOptions<Pending<()>> {
    pub fn new() -> Self {
        CycleOptions {
            trend_currency: String::from("usd"),
            timeout: None,
            cancel: future::pending(),
        }
    }
}

impl Default for CycleOptions<Pending<()>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CycleOptions<C> {
    pub fn trend_currency(mut self, currency: impl Into<String>) -> Self {
        self.trend_currency = currency.into();
        self
    }

    /// Upper bound for each of the two fetches.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The cycle is abandoned as soon as `cancel` resolves.
    pub fn cancel_on<F>(self, cancel: F) -> CycleOptions<F>
    where
        F: Future<Output = ()>,
    {
        CycleOptions {
            trend_currency: self.trend_currency,
            timeout: self.timeout,
            cancel,
        }
    }
}

pub async fn build_view<S>(
    source: &S,
    input: &ViewInput,
) -> Result<ViewModel, CycleError>
where
    S: PriceSource,
{
    build_view_with(source, input, CycleOptions::new()).await
}

/// Runs one fetch cycle: validate, fetch quotes and trends concurrently,
/// normalize, assemble. Dropping the fetches on cancellation aborts the
/// in-flight requests and no view is produced.
pub async fn build_view_with<S, C>(
    source: &S,
    input: &ViewInput,
    options: CycleOptions<C>,
) -> Result<ViewModel, CycleError>
where
    S: PriceSource,
    C: Future<Output = ()>,
{
    let CycleOptions {
        trend_currency,
        timeout,
        cancel,
    } = options;

    let request = build_request(input, &trend_currency)
        .map_err(|e| CycleError::new(input, e))?;

    info!(
        "Fetching {} assets in {} currencies",
        request.assets.len(),
        request.currencies.len()
    );

    let fetches = future::join(
        with_timeout(
            Endpoint::Quote,
            timeout,
            source.fetch_quotes(&request.quote_query),
        ),
        with_timeout(
            Endpoint::Trend,
            timeout,
            source.fetch_trends(&request.trend_query),
        ),
    );

    let (quotes, trends) = tokio::select! {
        results = fetches => results,
        _ = cancel => {
            warn!("Fetch cycle cancelled");
            return Err(CycleError::new(input, Error::Cancelled));
        }
    };

    build_view_model(request, quotes, trends)
        .map_err(|e| CycleError::new(input, e))
}

async fn with_timeout<T, F>(
    endpoint: Endpoint,
    timeout: Option<Duration>,
    fetch: F,
) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    let Some(limit) = timeout else {
        return fetch.await;
    };

    match time::timeout(limit, fetch).await {
        Ok(result) => result,
        Err(_) => Err(Error::fetch(
            endpoint,
            None,
            format!("timed out after {}ms", limit.as_millis()),
        )),
    }
}

/// Joins the two fetch results. The quote side is mandatory; a failed trend
/// fetch degrades to an empty series plus a notice.
pub fn build_view_model(
    request: ViewRequest,
    quotes: Result<CoinGeckoPrice, Error>,
    trends: Result<CoinGeckoMarkets, Error>,
) -> Result<ViewModel, Error> {
    let quotes = quotes?;
    let table = normalize_quotes(
        &quotes,
        &request.assets,
        &request.currencies,
        &request.selected_currency,
    )?;
    drop(quotes);

    let mut notices: Vec<Notice> = request
        .assets
        .iter()
        .filter(|asset| table.row(asset).is_none())
        .map(|asset| Notice::MissingQuote {
            asset: asset.to_string(),
        })
        .collect();

    let trends = match trends {
        Ok(markets) => {
            let series = normalize_trends(&markets);
            notices.extend(
                request
                    .assets
                    .iter()
                    .filter(|asset| !series.contains(asset))
                    .map(|asset| Notice::MissingTrend {
                        asset: asset.to_string(),
                    }),
            );
            series
        },
        Err(e) => {
            warn!("Trend data unavailable: {}", e);
            notices.push(Notice::TrendUnavailable {
                reason: e.to_string(),
            });
            TrendSeries::new()
        },
    };

    let selected = selected_quotes(&table);

    info!(
        "Built view with {} rows, {} trend series, {} notices",
        table.len(),
        trends.len(),
        notices.len()
    );

    Ok(ViewModel::new(
        request,
        table,
        selected,
        trends,
        notices,
        Utc::now(),
    ))
}
