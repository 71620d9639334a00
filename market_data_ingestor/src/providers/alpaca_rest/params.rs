use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::ProviderError,
};

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    #[default]
    Raw,
    Split,
    Dividend,
    All,
}

/// Specifies the source feed for stock data.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    #[default]
    Sip,
    Iex,
    Otc,
}

/// Specifies the sort order for the bars.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

/// Alpaca-specific parameters for a bars request.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AlpacaBarsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<Feed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

/// Checks that Alpaca serves bars at the requested interval.
///
/// Alpaca accepts 1-59 minutes, 1-23 hours, a single day or week, and
/// 1, 2, 3, 6 or 12 months.
pub fn validate_timeframe(tf: &TimeFrame) -> Result<(), ProviderError> {
    let ok = match tf.unit {
        TimeFrameUnit::Minute => (1..=59).contains(&tf.amount),
        TimeFrameUnit::Hour => (1..=23).contains(&tf.amount),
        TimeFrameUnit::Day | TimeFrameUnit::Week => tf.amount == 1,
        TimeFrameUnit::Month => matches!(tf.amount, 1 | 2 | 3 | 6 | 12),
    };
    if ok {
        Ok(())
    } else {
        Err(ProviderError::Validation(format!(
            "Alpaca does not serve {tf} bars"
        )))
    }
}

/// Alpaca's wire form of a timeframe, e.g. `15Min`, `1Day`.
pub fn timeframe_param(tf: &TimeFrame) -> String {
    let unit = match tf.unit {
        TimeFrameUnit::Minute => "Min",
        TimeFrameUnit::Hour => "Hour",
        TimeFrameUnit::Day => "Day",
        TimeFrameUnit::Week => "Week",
        TimeFrameUnit::Month => "Month",
    };
    format!("{}{unit}", tf.amount)
}

/// Builds the query string for `/v2/stocks/bars` (without the page token).
pub fn construct_params(params: &BarsRequestParams) -> Vec<(String, String)> {
    let mut query = vec![
        ("symbols".to_string(), params.symbols.join(",")),
        ("timeframe".to_string(), timeframe_param(&params.timeframe)),
        ("start".to_string(), params.start.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ("end".to_string(), params.end.to_rfc3339_opts(SecondsFormat::Secs, true)),
    ];

    if let ProviderParams::Alpaca(extra) = &params.provider_specific {
        if let Some(adjustment) = &extra.adjustment {
            query.push(("adjustment".to_string(), enum_token(adjustment)));
        }
        if let Some(feed) = &extra.feed {
            query.push(("feed".to_string(), enum_token(feed)));
        }
        if let Some(currency) = &extra.currency {
            query.push(("currency".to_string(), currency.clone()));
        }
        if let Some(limit) = extra.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(sort) = &extra.sort {
            query.push(("sort".to_string(), enum_token(sort)));
        }
    }

    query
}

// snake_case unit variants serialize to a bare JSON string
fn enum_token<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn request(provider_specific: ProviderParams) -> BarsRequestParams {
        BarsRequestParams {
            symbols: vec!["AAPL".into(), "MSFT".into()],
            timeframe: TimeFrame::day(),
            start: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            provider_specific,
        }
    }

    #[test]
    fn accepts_supported_timeframes() {
        for tf in ["1m", "59m", "1h", "23h", "1D", "1W", "1M", "6M", "12M"] {
            let tf: TimeFrame = tf.parse().unwrap();
            assert!(validate_timeframe(&tf).is_ok(), "{tf} should be accepted");
        }
    }

    #[test]
    fn rejects_unsupported_timeframes() {
        for tf in ["60m", "24h", "2D", "2W", "4M"] {
            let tf: TimeFrame = tf.parse().unwrap();
            assert!(
                matches!(validate_timeframe(&tf), Err(ProviderError::Validation(_))),
                "{tf} should be rejected"
            );
        }
    }

    #[test]
    fn builds_base_query() {
        let query = construct_params(&request(ProviderParams::None));
        assert_eq!(
            query,
            vec![
                ("symbols".to_string(), "AAPL,MSFT".to_string()),
                ("timeframe".to_string(), "1Day".to_string()),
                ("start".to_string(), "2025-01-01T00:00:00Z".to_string()),
                ("end".to_string(), "2025-02-01T00:00:00Z".to_string()),
            ]
        );
    }

    #[test]
    fn appends_alpaca_specific_options() {
        let query = construct_params(&request(ProviderParams::Alpaca(AlpacaBarsParams {
            adjustment: Some(Adjustment::Split),
            feed: Some(Feed::Iex),
            limit: Some(5),
            sort: Some(Sort::Desc),
            ..Default::default()
        })));
        assert!(query.contains(&("adjustment".to_string(), "split".to_string())));
        assert!(query.contains(&("feed".to_string(), "iex".to_string())));
        assert!(query.contains(&("limit".to_string(), "5".to_string())));
        assert!(query.contains(&("sort".to_string(), "desc".to_string())));
        assert!(!query.iter().any(|(k, _)| k == "currency"));
    }
}
