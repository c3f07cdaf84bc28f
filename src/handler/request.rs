use crate::{
    error::Error,
    helpers::parse_list,
    model::{ViewInput, ViewRequest},
    types::{QuoteQuery, TrendQuery},
};

/// Validates the raw input and derives the query parameters of both
/// endpoints. Fails before any network call is made.
pub fn build_request(
    input: &ViewInput,
    trend_currency: &str,
) -> Result<ViewRequest, Error> {
    let assets = parse_list(&input.assets);
    if assets.is_empty() {
        return Err(Error::InvalidInput(String::from(
            "asset list is empty",
        )));
    }

    let currencies = parse_list(&input.currencies);
    if currencies.is_empty() {
        return Err(Error::InvalidInput(String::from(
            "currency list is empty",
        )));
    }

    let selected_currency =
        match input.selected_currency.trim().to_lowercase() {
            selected if selected.is_empty() => currencies[0].to_owned(),
            selected if currencies.contains(&selected) => selected,
            selected => return Err(Error::UnknownCurrency(selected)),
        };

    let quote_query = QuoteQuery {
        ids: assets.join(","),
        vs_currencies: currencies.join(","),
        include_24hr_change: true,
        include_last_updated_at: true,
    };

    let trend_query = TrendQuery {
        vs_currency: trend_currency.trim().to_lowercase(),
        ids: assets.join(","),
        sparkline: true,
    };

    Ok(ViewRequest {
        assets,
        currencies,
        selected_currency,
        quote_query,
        trend_query,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_normalizes_lists() {
        let input = ViewInput::new(
            " Bitcoin ,ethereum,, bitcoin",
            "USD, eur ",
            " EUR ",
        );
        let request = build_request(&input, "usd").unwrap();

        assert_eq!(request.assets, vec!["bitcoin", "ethereum"]);
        assert_eq!(request.currencies, vec!["usd", "eur"]);
        assert_eq!(request.selected_currency, "eur");
        assert_eq!(
            request.quote_query,
            QuoteQuery {
                ids: String::from("bitcoin,ethereum"),
                vs_currencies: String::from("usd,eur"),
                include_24hr_change: true,
                include_last_updated_at: true,
            }
        );
        assert_eq!(
            request.trend_query,
            TrendQuery {
                vs_currency: String::from("usd"),
                ids: String::from("bitcoin,ethereum"),
                sparkline: true,
            }
        );
    }

    #[test]
    fn test_empty_selection_defaults_to_first_currency() {
        let input = ViewInput::new("bitcoin", "inr,usd", "  ");
        let request = build_request(&input, "usd").unwrap();

        assert_eq!(request.selected_currency, "inr");
    }

    #[test]
    fn test_empty_lists_are_invalid() {
        let err =
            build_request(&ViewInput::new("", "usd", "usd"), "usd").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = build_request(&ViewInput::new("bitcoin", " , ", "usd"), "usd")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_unrequested_selection_is_unknown_currency() {
        let err = build_request(&ViewInput::new("bitcoin", "usd,eur", "GBP"), "usd")
            .unwrap_err();

        match err {
            Error::UnknownCurrency(currency) => assert_eq!(currency, "gbp"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
