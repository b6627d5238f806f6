use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

/// Daily closing prices keyed by trading date, one entry per day, ascending.
///
/// A series is never patched in place; a new fetch produces a new series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    closes: BTreeMap<NaiveDate, f64>,
}

impl PriceSeries {
    /// Later points win when the same date appears twice.
    pub fn from_points(points: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        Self {
            symbol: String::new(),
            closes: points.into_iter().collect(),
        }
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = symbol.to_string();
        self
    }

    pub fn closes(&self) -> Vec<f64> {
        self.closes.values().copied().collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.closes.keys().copied().collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.closes.keys().next().copied()
    }

    pub fn get(&self, date: &NaiveDate) -> Option<f64> {
        self.closes.get(date).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&NaiveDate, &f64)> {
        self.closes.iter()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.closes.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Entries with `from <= date <= to`
    pub fn range(&self, from: NaiveDate, to: NaiveDate) -> Self {
        if from > to {
            return Self::default().with_symbol(&self.symbol);
        }

        Self {
            symbol: self.symbol.clone(),
            closes: self
                .closes
                .range(from..=to)
                .map(|(d, v)| (*d, *v))
                .collect(),
        }
    }

    /// Distinct years present, most recent first
    pub fn year_options(&self) -> Vec<String> {
        self.closes
            .keys()
            .rev()
            .map(|d| d.year())
            .dedup()
            .map(|y| y.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_points_sorts_dates() {
        let series = PriceSeries::from_points(vec![
            (date(2024, 1, 3), 3.0),
            (date(2023, 12, 29), 1.0),
            (date(2024, 1, 2), 2.0),
        ]);

        assert_eq!(
            series.dates(),
            vec![date(2023, 12, 29), date(2024, 1, 2), date(2024, 1, 3)]
        );
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first_date(), Some(date(2023, 12, 29)));
        assert_eq!(series.last_date(), Some(date(2024, 1, 3)));
    }

    #[test]
    fn test_year_options() {
        let series = PriceSeries::from_points(vec![
            (date(2022, 6, 1), 1.0),
            (date(2023, 1, 3), 1.0),
            (date(2023, 12, 29), 1.0),
            (date(2024, 1, 2), 1.0),
        ]);

        assert_eq!(series.year_options(), vec!["2024", "2023", "2022"]);
        assert!(PriceSeries::default().year_options().is_empty());
    }

    #[test]
    fn test_range() {
        let series = PriceSeries::from_points(vec![
            (date(2024, 1, 2), 1.0),
            (date(2024, 1, 3), 2.0),
            (date(2024, 1, 4), 3.0),
        ]);

        let series = series.with_symbol("AMZN");
        let january = series.range(date(2024, 1, 3), date(2024, 1, 31));
        assert_eq!(january.len(), 2);
        assert_eq!(january.symbol(), "AMZN");
        assert!(series.range(date(2024, 2, 1), date(2024, 1, 1)).is_empty());
    }
}
