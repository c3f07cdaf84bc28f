use std::collections::HashMap;

use serde_json::{Map, Value};

/// Field key → raw value for one asset.
pub type CoinGeckoPriceFields = Map<String, Value>;

/// Asset id → raw entry. Entries stay untyped so that a null or malformed
/// asset degrades to an empty row instead of failing the body.
pub type CoinGeckoPrice = HashMap<String, Value>;
