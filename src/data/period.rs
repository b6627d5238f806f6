//! Year/month slicing of a [`PriceSeries`].
//!
//! Options are always re-derived from the full series and never cached beside it.

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

use crate::{
    data::series::PriceSeries,
    error::{VtError, VtResult},
    utils::datetime::{date_to_month_name, month_from_name, year_from_str},
};

/// Month names with data in `year`, latest month first
pub fn months_in_year(series: &PriceSeries, year: &str) -> Vec<String> {
    let Some(year) = year_from_str(year) else {
        return vec![];
    };

    series
        .iter()
        .rev()
        .map(|(date, _)| *date)
        .filter(|date| date.year() == year)
        .map(|date| date.month())
        .dedup()
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|date| date_to_month_name(&date).to_string())
        .collect()
}

/// All closes whose date falls in (`year`, `month`)
pub fn extract_month(series: &PriceSeries, month: &str, year: &str) -> VtResult<PriceSeries> {
    let no_data = || VtError::no_data(series.symbol(), month, year);

    let (Some(y), Some(m)) = (year_from_str(year), month_from_name(month)) else {
        return Err(no_data());
    };
    let Some(first_day) = NaiveDate::from_ymd_opt(y, m, 1) else {
        return Err(no_data());
    };
    let Some(last_day) = first_day
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
    else {
        return Err(no_data());
    };

    let closings = series.range(first_day, last_day);
    if closings.is_empty() {
        Err(no_data())
    } else {
        Ok(closings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_series() -> PriceSeries {
        PriceSeries::from_points(vec![
            (date(2022, 12, 30), 84.0),
            (date(2023, 1, 3), 85.8),
            (date(2023, 1, 4), 85.1),
            (date(2023, 3, 1), 92.2),
            (date(2023, 12, 1), 147.0),
            (date(2023, 12, 28), 153.3),
            (date(2023, 12, 29), 151.9),
            (date(2024, 1, 2), 149.9),
        ])
    }

    #[test]
    fn test_months_in_year() {
        let series = sample_series();

        assert_eq!(
            months_in_year(&series, "2023"),
            vec!["December", "March", "January"]
        );
        assert_eq!(months_in_year(&series, "2024"), vec!["January"]);
        assert!(months_in_year(&series, "2019").is_empty());
        assert!(months_in_year(&series, "not-a-year").is_empty());
    }

    #[test]
    fn test_months_in_year_have_data() {
        let series = sample_series();

        for year in series.year_options() {
            for month in months_in_year(&series, &year) {
                assert!(!extract_month(&series, &month, &year).unwrap().is_empty());
            }
        }
    }

    #[test]
    fn test_extract_month() {
        let series = sample_series();

        let december = extract_month(&series, "December", "2023").unwrap();
        assert_eq!(
            december.dates(),
            vec![date(2023, 12, 1), date(2023, 12, 28), date(2023, 12, 29)]
        );
        assert_eq!(december.closes(), vec![147.0, 153.3, 151.9]);
    }

    #[test]
    fn test_extract_month_no_data() {
        let series = sample_series().with_symbol("AMZN");

        let err = extract_month(&series, "February", "2023").unwrap_err();
        assert!(matches!(err, VtError::NoDataForPeriod { .. }));
        assert_eq!(err.to_string(), "No data for AMZN in February of 2023");

        assert!(extract_month(&series, "Smarch", "2023").is_err());
        assert!(extract_month(&PriceSeries::default(), "January", "2024").is_err());
    }
}
