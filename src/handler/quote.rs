use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::Error,
    helpers::{coerce_number, coerce_timestamp},
    model::{Cell, QuoteRow, QuoteTable, SelectedQuote},
    types::{CoinGeckoPrice, CoinGeckoPriceFields},
};

const CHANGE_SUFFIX: &str = "_24h_change";
const LAST_UPDATED_SUFFIX: &str = "_last_updated_at";
const LAST_UPDATED_KEY: &str = "last_updated_at";

/// Reshapes the asset → field map into one row per asset.
///
/// Rows follow `assets` for the ids it names, then any other ids present in
/// the response in lexicographic order. Missing or unparseable fields become
/// [`Cell::NoData`]; only an empty response or an unrequested selection fail.
pub fn normalize_quotes(
    response: &CoinGeckoPrice,
    assets: &[String],
    currencies: &[String],
    selected_currency: &str,
) -> Result<QuoteTable, Error> {
    if !currencies.iter().any(|c| c == selected_currency) {
        return Err(Error::UnknownCurrency(selected_currency.to_owned()));
    }

    if response.is_empty() {
        return Err(Error::EmptyResponse);
    }

    let change_column = format!("{}{}", selected_currency, CHANGE_SUFFIX);
    let rows = row_order(response, assets)
        .into_iter()
        .map(|(asset, entry)| {
            let fields = entry.as_object();
            if fields.is_none() {
                debug!("{}: quote entry is not an object: {}", asset, entry);
            }

            QuoteRow {
                asset: asset.to_owned(),
                prices: currencies
                    .iter()
                    .map(|currency| read_cell(asset, fields, currency))
                    .collect(),
                change: read_cell(asset, fields, &change_column),
                last_updated_at: last_updated_at(fields, selected_currency),
            }
        })
        .collect();

    Ok(QuoteTable {
        currencies: currencies.to_vec(),
        selected_currency: selected_currency.to_owned(),
        change_column,
        rows,
    })
}

/// Derived (price, change) of the selected currency, one entry per row.
pub fn selected_quotes(table: &QuoteTable) -> Vec<SelectedQuote> {
    let index = table
        .currencies
        .iter()
        .position(|c| *c == table.selected_currency);

    table
        .rows
        .iter()
        .map(|row| SelectedQuote {
            asset: row.asset.to_owned(),
            price: index.map_or(Cell::NoData, |i| row.cell(i)),
            change: row.change.into(),
            last_updated_at: row.last_updated_at,
        })
        .collect()
}

fn row_order<'a>(
    response: &'a CoinGeckoPrice,
    assets: &[String],
) -> Vec<(&'a str, &'a Value)> {
    let mut rows: Vec<(&str, &Value)> = assets
        .iter()
        .filter_map(|asset| response.get_key_value(asset))
        .map(|(asset, entry)| (asset.as_str(), entry))
        .collect();

    let mut extra: Vec<(&str, &Value)> = response
        .iter()
        .filter(|(asset, _)| !assets.contains(*asset))
        .map(|(asset, entry)| (asset.as_str(), entry))
        .collect();
    extra.sort_by(|a, b| a.0.cmp(b.0));

    rows.append(&mut extra);
    rows
}

fn read_cell(
    asset: &str,
    fields: Option<&CoinGeckoPriceFields>,
    key: &str,
) -> Cell {
    let Some(value) = fields.and_then(|f| f.get(key)) else {
        return Cell::NoData;
    };

    let number = coerce_number(value);
    if number.is_none() && !value.is_null() {
        debug!("{}: unparseable {} value {}", asset, key, value);
    }

    number.into()
}

fn last_updated_at(
    fields: Option<&CoinGeckoPriceFields>,
    selected_currency: &str,
) -> Option<DateTime<Utc>> {
    let fields = fields?;
    let key = format!("{}{}", selected_currency, LAST_UPDATED_SUFFIX);

    fields
        .get(&key)
        .and_then(coerce_timestamp)
        .or_else(|| fields.get(LAST_UPDATED_KEY).and_then(coerce_timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChangeTag;
    use serde_json::json;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn response(value: serde_json::Value) -> CoinGeckoPrice {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> CoinGeckoPrice {
        response(json!({
            "bitcoin": {"usd": 50000, "usd_24h_change": 2.5, "eur": 46000},
            "ethereum": {"usd": 3000, "eur": 2800}
        }))
    }

    #[test]
    fn test_normalize_quotes_example() {
        let table = normalize_quotes(
            &sample(),
            &ids(&["bitcoin", "ethereum"]),
            &ids(&["usd", "eur"]),
            "usd",
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.change_column, "usd_24h_change");
        assert_eq!(table.rows[0].asset, "bitcoin");
        assert_eq!(
            table.rows[0].prices,
            vec![Cell::Value(50000.0), Cell::Value(46000.0)]
        );
        assert_eq!(table.rows[1].asset, "ethereum");
        assert_eq!(
            table.rows[1].prices,
            vec![Cell::Value(3000.0), Cell::Value(2800.0)]
        );

        let selected = selected_quotes(&table);
        assert_eq!(selected[0].price, Cell::Value(50000.0));
        assert_eq!(selected[0].change.tag, ChangeTag::Positive);
        assert_eq!(selected[0].change.value, Some(2.5));
        assert_eq!(selected[1].price, Cell::Value(3000.0));
        assert_eq!(selected[1].change.tag, ChangeTag::NoData);
        assert_eq!(selected[1].change.value, None);
    }

    #[test]
    fn test_missing_currency_is_no_data_not_zero() {
        let table = normalize_quotes(
            &sample(),
            &ids(&["bitcoin", "ethereum"]),
            &ids(&["usd", "eur", "inr"]),
            "inr",
        )
        .unwrap();

        for row in &table.rows {
            assert_eq!(row.prices.len(), 3);
            assert_eq!(row.prices[2], Cell::NoData);
            assert_eq!(row.change, Cell::NoData);
        }
    }

    #[test]
    fn test_unparseable_values_become_no_data() {
        let raw = response(json!({
            "dogecoin": {
                "usd": "0.071",
                "usd_24h_change": "n/a",
                "eur": null
            }
        }));
        let table =
            normalize_quotes(&raw, &[], &ids(&["usd", "eur"]), "usd").unwrap();
        let row = table.row("dogecoin").unwrap();

        assert_eq!(row.prices, vec![Cell::Value(0.071), Cell::NoData]);
        assert_eq!(row.change, Cell::NoData);
    }

    #[test]
    fn test_negative_and_zero_change() {
        let raw = response(json!({
            "bitcoin": {"usd": 1, "usd_24h_change": -3.75},
            "ethereum": {"usd": 1, "usd_24h_change": 0}
        }));
        let table =
            normalize_quotes(&raw, &[], &ids(&["usd"]), "usd").unwrap();
        let selected = selected_quotes(&table);

        assert_eq!(selected[0].change.tag, ChangeTag::Negative);
        assert_eq!(selected[0].change.value, Some(-3.75));
        assert_eq!(selected[1].change.tag, ChangeTag::Positive);
    }

    #[test]
    fn test_row_per_asset_in_request_order() {
        let raw = response(json!({
            "solana": {"usd": 150},
            "bitcoin": {"usd": 50000},
            "cardano": {"usd": 0.4},
            "ethereum": {"usd": 3000}
        }));
        let table = normalize_quotes(
            &raw,
            &ids(&["ethereum", "bitcoin", "ripple"]),
            &ids(&["usd"]),
            "usd",
        )
        .unwrap();
        let order: Vec<&str> =
            table.rows.iter().map(|r| r.asset.as_str()).collect();

        assert_eq!(order, vec!["ethereum", "bitcoin", "cardano", "solana"]);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = sample();
        let assets = ids(&["ethereum"]);
        let currencies = ids(&["eur", "usd"]);

        let first = normalize_quotes(&raw, &assets, &currencies, "eur").unwrap();
        let second =
            normalize_quotes(&raw, &assets, &currencies, "eur").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_auxiliary_keys_stay_out_of_price_columns() {
        let raw = response(json!({
            "bitcoin": {
                "usd": 50000,
                "usd_24h_change": 1.0,
                "usd_last_updated_at": 1_700_000_000,
                "gbp": 39000
            }
        }));
        let table =
            normalize_quotes(&raw, &[], &ids(&["usd"]), "usd").unwrap();
        let row = table.row("bitcoin").unwrap();

        assert_eq!(table.currencies, vec!["usd"]);
        assert_eq!(row.prices, vec![Cell::Value(50000.0)]);
        assert_eq!(row.last_updated_at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_shared_last_updated_at() {
        let raw = response(json!({
            "bitcoin": {"usd": 50000, "last_updated_at": 1_650_000_000}
        }));
        let table =
            normalize_quotes(&raw, &[], &ids(&["usd"]), "usd").unwrap();

        assert_eq!(
            table.rows[0].last_updated_at.unwrap().timestamp(),
            1_650_000_000
        );
    }

    #[test]
    fn test_malformed_entry_is_an_empty_row() {
        let raw = response(json!({
            "bitcoin": {"usd": 50000, "usd_24h_change": 1.5},
            "ethereum": null,
            "dogecoin": [0.07]
        }));
        let table = normalize_quotes(
            &raw,
            &ids(&["bitcoin", "ethereum", "dogecoin"]),
            &ids(&["usd", "eur"]),
            "usd",
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0].prices[0], Cell::Value(50000.0));
        for row in &table.rows[1..] {
            assert_eq!(row.prices, vec![Cell::NoData, Cell::NoData]);
            assert_eq!(row.change, Cell::NoData);
            assert!(row.last_updated_at.is_none());
        }

        let selected = selected_quotes(&table);
        assert_eq!(selected[1].change.tag, ChangeTag::NoData);
    }

    #[test]
    fn test_selected_quotes_tolerate_short_rows() {
        let table = QuoteTable {
            currencies: ids(&["usd", "eur"]),
            selected_currency: String::from("eur"),
            change_column: String::from("eur_24h_change"),
            rows: vec![QuoteRow {
                asset: String::from("bitcoin"),
                prices: vec![Cell::Value(50000.0)],
                change: Cell::NoData,
                last_updated_at: None,
            }],
        };

        assert_eq!(selected_quotes(&table)[0].price, Cell::NoData);
    }

    #[test]
    fn test_empty_response() {
        let err = normalize_quotes(
            &CoinGeckoPrice::new(),
            &ids(&["bitcoin"]),
            &ids(&["usd"]),
            "usd",
        )
        .unwrap_err();

        assert!(matches!(err, Error::EmptyResponse));
    }

    #[test]
    fn test_selected_currency_must_be_requested() {
        let err = normalize_quotes(&sample(), &[], &ids(&["usd"]), "eur")
            .unwrap_err();

        assert!(matches!(err, Error::UnknownCurrency(c) if c == "eur"));
    }
}
