use chrono::DateTime;
use chrono_tz::Tz;

use crate::config::Asset;
use crate::data::calendar;
use crate::data::fetcher::{PriceFetcher, PriceMap};

const OPENING: &str = "بسم الله الرحمن الرحیم";
const DATE_PREFIX: &str = "\u{1f4c5} تاریخ امروز:";
const TITLE: &str = "\u{1f4cc} *قیمت ارز دیجیتال (به افغانی)*";
const PLACEHOLDER: &str = "\u{2014}";

/// Builds the periodic price update. The asset table and the fetcher
/// come in through the constructor so tests can inject fakes.
pub struct UpdateBuilder {
    assets: &'static [Asset],
    fetcher: PriceFetcher,
}

impl UpdateBuilder {
    pub fn new(assets: &'static [Asset], fetcher: PriceFetcher) -> Self {
        Self { assets, fetcher }
    }

    pub async fn build(&self, include_header: bool, now: DateTime<Tz>) -> String {
        let ids: Vec<&str> = self.assets.iter().map(|a| a.id).collect();
        let prices = self.fetcher.fetch(&ids).await;
        render_update(
            self.assets,
            &prices,
            include_header,
            &calendar::format_today(now),
        )
    }
}

/// Assemble the update text. Blocks followed by a blank line carry a
/// trailing newline; the final join supplies the line breaks.
pub fn render_update(
    assets: &[Asset],
    prices: &PriceMap,
    include_header: bool,
    date_line: &str,
) -> String {
    let mut lines = Vec::new();

    if include_header {
        lines.push(format!("{OPENING}\n"));
        lines.push(format!("{DATE_PREFIX} {date_line}\n"));
    }

    lines.push(format!("{TITLE}\n"));

    for asset in assets {
        lines.push(format!("{} *{}*", asset.emoji, asset.symbol));
        lines.push(format!(
            "قیمت: {} AFN\n",
            fmt_price(prices.get(asset.id).copied())
        ));
    }

    lines.join("\n")
}

/// Price display: at or above 100 AFN the decimals are dropped, below
/// that two are kept. Unknown quotes render as a dash.
pub fn fmt_price(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if v >= 100.0 {
                group_thousands(&format!("{:.0}", v.trunc()))
            } else {
                group_thousands(&format!("{v:.2}"))
            }
        }
        _ => PLACEHOLDER.into(),
    }
}

/// Insert `,` separators into the integer part of an already formatted
/// number ("1234567.89" -> "1,234,567.89").
fn group_thousands(number: &str) -> String {
    let (sign, rest) = match number.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", number),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ASSETS;
    use crate::data::calendar::KABUL;
    use crate::data::fetcher::mock::serve;
    use chrono::TimeZone;
    use std::time::Duration;

    #[test]
    fn unknown_quotes_render_as_dash() {
        assert_eq!(fmt_price(None), "\u{2014}");
        assert_eq!(fmt_price(Some(f64::NAN)), "\u{2014}");
        assert_eq!(fmt_price(Some(f64::INFINITY)), "\u{2014}");
    }

    #[test]
    fn large_values_drop_decimals() {
        assert_eq!(fmt_price(Some(100.0)), "100");
        assert_eq!(fmt_price(Some(150.9)), "150");
        assert_eq!(fmt_price(Some(1234.0)), "1,234");
        assert_eq!(fmt_price(Some(123456.0)), "123,456");
        assert_eq!(fmt_price(Some(7_654_321.0)), "7,654,321");
    }

    #[test]
    fn small_values_keep_two_decimals() {
        assert_eq!(fmt_price(Some(45.6)), "45.60");
        assert_eq!(fmt_price(Some(99.999)), "100.00");
        assert_eq!(fmt_price(Some(0.0234)), "0.02");
    }

    #[test]
    fn header_blocks_in_order() {
        let mut prices = PriceMap::new();
        prices.insert("bitcoin".into(), 123456.0);
        let text = render_update(ASSETS, &prices, true, "1405/05/15 \u{2014} پنجشنبه");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], OPENING);
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "\u{1f4c5} تاریخ امروز: 1405/05/15 \u{2014} پنجشنبه");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], TITLE);
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "\u{1f171}\u{fe0f} *BTC*");
        assert_eq!(lines[7], "قیمت: 123,456 AFN");
        assert_eq!(lines[8], "");

        // One price block per configured asset, in table order.
        let mut last = 0;
        for asset in ASSETS {
            let label = format!("{} *{}*", asset.emoji, asset.symbol);
            let pos = text.find(&label).expect("asset block missing");
            assert!(pos >= last, "asset {} out of order", asset.symbol);
            last = pos;
        }

        // Every asset except bitcoin is unknown here.
        assert_eq!(
            text.matches("قیمت: \u{2014} AFN").count(),
            ASSETS.len() - 1
        );
    }

    #[test]
    fn no_header_starts_with_title() {
        let text = render_update(ASSETS, &PriceMap::new(), false, "unused");
        assert!(text.starts_with(TITLE));
        assert!(!text.contains(OPENING));
        assert!(!text.contains(DATE_PREFIX));
    }

    #[tokio::test]
    async fn build_fetches_and_renders() {
        let (url, _) = serve(vec![(200, r#"{"bitcoin":{"afn":123456.0}}"#)]).await;
        let fetcher =
            PriceFetcher::with_endpoint(&url, "afn", Duration::from_millis(5)).unwrap();
        let builder = UpdateBuilder::new(ASSETS, fetcher);

        let now = KABUL.with_ymd_and_hms(2026, 8, 6, 7, 0, 0).unwrap();
        let text = builder.build(true, now).await;

        assert!(text.contains("1405/05/15"));
        assert!(text.contains("قیمت: 123,456 AFN"));
        assert!(text.contains("قیمت: \u{2014} AFN"));
    }
}
