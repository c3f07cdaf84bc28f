pub use self::{
    coin_gecko_market::{CoinGeckoMarket, CoinGeckoMarkets, Sparkline},
    coin_gecko_price::{CoinGeckoPrice, CoinGeckoPriceFields},
    query::{QuoteQuery, TrendQuery},
};

mod coin_gecko_market;
mod coin_gecko_price;
mod query;
