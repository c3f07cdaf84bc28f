use serde::Deserialize;
use serde_json::Value;

pub type CoinGeckoMarkets = Vec<CoinGeckoMarket>;

#[derive(Debug, Deserialize)]
pub struct CoinGeckoMarket {
    pub id: String,
    #[serde(default)]
    pub sparkline_in_7d: Option<Sparkline>,
}

/// Samples stay untyped; a null series or a bad sample only affects its
/// own asset.
#[derive(Debug, Deserialize)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Option<Vec<Value>>,
}
