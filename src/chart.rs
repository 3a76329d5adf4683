//! Price history chart projection
//!
//! Turns a raw history series into labelled chart data that a front end can
//! hand to its charting widget, plus a small text sparkline for terminals.

use crate::types::{Currency, PricePoint};
use serde::{Deserialize, Serialize};

/// Visual settings for the price line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    pub fill: bool,
    pub tension: f64,
    pub grid_color: String,
    pub text_color: String,
    pub show_legend: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            border_color: "#3b82f6".to_string(),
            background_color: "rgba(59, 130, 246, 0.1)".to_string(),
            border_width: 2,
            fill: true,
            tension: 0.4,
            grid_color: "rgba(148, 163, 184, 0.1)".to_string(),
            text_color: "#94a3b8".to_string(),
            show_legend: false,
        }
    }
}

/// Line chart data for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub asset_id: String,
    /// Currency the prices are quoted in
    pub currency: Currency,
    pub dataset_label: String,
    /// One date label per point (`M/D/YYYY`, UTC)
    pub labels: Vec<String>,
    pub prices: Vec<f64>,
    pub style: ChartStyle,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.prices.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.prices.iter().copied().reduce(f64::max)
    }

    /// Percent change from the first to the last point
    pub fn change_percent(&self) -> Option<f64> {
        let first = *self.prices.first()?;
        let last = *self.prices.last()?;
        if first == 0.0 {
            return None;
        }
        Some((last - first) / first * 100.0)
    }

    /// Renders the series as a row of block characters, `width` wide at most
    ///
    /// Points are bucketed by averaging when the series is longer than `width`.
    pub fn sparkline(&self, width: usize) -> String {
        const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

        if self.prices.is_empty() || width == 0 {
            return String::new();
        }

        let buckets = width.min(self.prices.len());
        let values: Vec<f64> = (0..buckets)
            .map(|i| {
                let start = i * self.prices.len() / buckets;
                let end = ((i + 1) * self.prices.len() / buckets).max(start + 1);
                let slice = &self.prices[start..end];
                slice.iter().sum::<f64>() / slice.len() as f64
            })
            .collect();

        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = hi - lo;

        values
            .iter()
            .map(|v| {
                if span <= 0.0 || !span.is_finite() {
                    BARS[BARS.len() / 2]
                } else {
                    let idx = ((v - lo) / span * (BARS.len() - 1) as f64).round() as usize;
                    BARS[idx.min(BARS.len() - 1)]
                }
            })
            .collect()
    }
}

/// Projects price histories into chart series
#[derive(Debug, Clone, Default)]
pub struct ChartPresenter {
    style: ChartStyle,
}

impl ChartPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: ChartStyle) -> Self {
        Self { style }
    }

    /// Builds the chart series for `asset_id` from its history in `currency`
    pub fn present(
        &self,
        asset_id: &str,
        currency: &Currency,
        history: &[PricePoint],
    ) -> ChartSeries {
        let labels = history
            .iter()
            .map(|point| {
                point
                    .time()
                    .map(|t| t.format("%-m/%-d/%Y").to_string())
                    .unwrap_or_default()
            })
            .collect();

        ChartSeries {
            asset_id: asset_id.to_string(),
            currency: currency.clone(),
            dataset_label: "Price".to_string(),
            labels,
            prices: history.iter().map(|point| point.price).collect(),
            style: self.style.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;
    // 2024-01-02T00:00:00Z
    const JAN_2: i64 = 1_704_153_600_000;

    fn history() -> Vec<PricePoint> {
        vec![
            PricePoint::new(JAN_2, 100.0),
            PricePoint::new(JAN_2 + DAY_MS, 110.0),
            PricePoint::new(JAN_2 + 2 * DAY_MS, 90.0),
            PricePoint::new(JAN_2 + 3 * DAY_MS, 120.0),
        ]
    }

    #[test]
    fn test_present_labels_and_prices() {
        let series = ChartPresenter::new().present("bitcoin", &Currency::usd(), &history());

        assert_eq!(series.asset_id, "bitcoin");
        assert_eq!(series.currency, Currency::usd());
        assert_eq!(series.dataset_label, "Price");
        assert_eq!(series.labels, vec!["1/2/2024", "1/3/2024", "1/4/2024", "1/5/2024"]);
        assert_eq!(series.prices, vec![100.0, 110.0, 90.0, 120.0]);
        assert_eq!(series.style, ChartStyle::default());
    }

    #[test]
    fn test_summaries() {
        let series = ChartPresenter::new().present("bitcoin", &Currency::usd(), &history());
        assert_eq!(series.min(), Some(90.0));
        assert_eq!(series.max(), Some(120.0));
        assert!((series.change_percent().unwrap() - 20.0).abs() < 1e-9);

        let empty = ChartPresenter::new().present("bitcoin", &Currency::usd(), &[]);
        assert!(empty.is_empty());
        assert_eq!(empty.min(), None);
        assert_eq!(empty.change_percent(), None);
        assert_eq!(empty.sparkline(10), "");
    }

    #[test]
    fn test_sparkline() {
        let series = ChartPresenter::new().present("bitcoin", &Currency::usd(), &history());
        assert_eq!(series.sparkline(4), "▃▆▁█");
        assert_eq!(series.sparkline(2).chars().count(), 2);

        let flat = ChartPresenter::new().present(
            "tether",
            &Currency::usd(),
            &[PricePoint::new(JAN_2, 1.0), PricePoint::new(JAN_2 + DAY_MS, 1.0)],
        );
        assert_eq!(flat.sparkline(8), "▅▅");
    }

    #[test]
    fn test_series_serializes_camel_case() {
        let series = ChartPresenter::new().present("bitcoin", &Currency::usd(), &history()[..1]);
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["datasetLabel"], "Price");
        assert_eq!(json["currency"], "usd");
        assert_eq!(json["style"]["borderColor"], "#3b82f6");
        assert_eq!(json["style"]["showLegend"], false);
    }
}
