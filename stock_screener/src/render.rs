//! Plain-text rendering of a [`RecommendationSet`] for terminals.

use std::fmt::Write;

use crate::recommender::RecommendationSet;

pub fn render_text(set: &RecommendationSet) -> String {
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "== Intraday (most volatile first) ==");
    for (band, picks) in &set.intraday {
        let _ = writeln!(out, "\n{band}");
        if picks.is_empty() {
            let _ = writeln!(out, "  (no candidates)");
            continue;
        }
        let _ = writeln!(
            out,
            "  {:<16} {:>10} {:>11} {:>11}",
            "Ticker", "Price", "Volatility", "Mean Ret %"
        );
        for p in picks {
            let _ = writeln!(
                out,
                "  {:<16} {:>10.2} {:>11.3} {:>11.3}",
                p.ticker, p.price, p.volatility, p.mean_daily_return
            );
        }
    }

    let _ = writeln!(out, "\n== Delivery (least volatile first) ==");
    for (band, picks) in &set.delivery {
        let _ = writeln!(out, "\n{band}");
        if picks.is_empty() {
            let _ = writeln!(out, "  (no candidates)");
            continue;
        }
        let _ = writeln!(
            out,
            "  {:<16} {:>10} {:>11} {:>11}",
            "Ticker", "Price", "Cum Ret %", "Mean Ret %"
        );
        for p in picks {
            let _ = writeln!(
                out,
                "  {:<16} {:>10.2} {:>11.3} {:>11.3}",
                p.ticker, p.price, p.cumulative_return, p.mean_daily_return
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{recommender::recommend, scanner::SummaryRow};

    #[test]
    fn lists_every_band_and_pick() {
        let rows = vec![SummaryRow {
            ticker: "TCS.NS".into(),
            volatility: 1.25,
            mean_daily_return: 0.2,
            cumulative_return: 4.5,
            last_signal: None,
            price: Some(3500.0),
        }];
        let text = render_text(&recommend(&rows));
        assert_eq!(text.matches("Price Range 2000-inf").count(), 2);
        assert_eq!(text.matches("(no candidates)").count(), 8);
        assert!(text.contains("TCS.NS"));
        assert!(text.contains("3500.00"));
        assert!(text.contains("4.500"));
    }
}
