use chrono::NaiveDate;
use log::debug;

use crate::{
    data::{
        period::{extract_month, months_in_year},
        series::PriceSeries,
    },
    error::{VtError, VtResult},
    utils::stats::pearson,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Slot {
    #[default]
    Primary,
    Comparison,
}

#[derive(Clone, Debug, Default)]
pub struct SlotData {
    pub symbol: String,
    pub series: Option<PriceSeries>,
}

/// Period shared by both slots, `month` is a full month name
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    pub year: String,
    pub month: String,
}

/// What the chart draws. `y1` and `y2` always have the same length as `x`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotData {
    pub x: Vec<NaiveDate>,
    pub y1: Vec<f64>,
    pub y2: Option<Vec<f64>>,
}

#[derive(Clone, Debug, Default)]
pub struct DashboardSnapshot {
    pub primary_symbol: String,
    pub comparison_symbol: String,
    pub active_slot: Slot,
    pub year_options: Vec<String>,
    pub month_options: Vec<String>,
    pub selection: Selection,
    pub plot_data: PlotData,
    pub comparison_visible: bool,
    pub message: String,
}

pub struct DashboardState {
    primary: SlotData,
    comparison: SlotData,
    active_slot: Slot,
    selection: Selection,
    plot_data: PlotData,
    comparison_visible: bool,
    message: String,
}

impl Slot {
    pub fn index(&self) -> usize {
        match self {
            Slot::Primary => 0,
            Slot::Comparison => 1,
        }
    }

    pub fn label(&self, symbol: &str) -> String {
        format!("{}: {symbol}", self.index() + 1)
    }
}

impl PlotData {
    pub fn correlation(&self) -> Option<f64> {
        self.y2.as_ref().and_then(|y2| pearson(&self.y1, y2))
    }

    pub fn has_comparison(&self) -> bool {
        self.y2.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

impl DashboardSnapshot {
    pub fn active_symbol(&self) -> &str {
        self.slot_symbol(self.active_slot)
    }

    pub fn slot_symbol(&self, slot: Slot) -> &str {
        match slot {
            Slot::Primary => &self.primary_symbol,
            Slot::Comparison => &self.comparison_symbol,
        }
    }
}

impl DashboardState {
    pub fn new(primary_symbol: &str, comparison_symbol: &str) -> Self {
        Self {
            primary: SlotData {
                symbol: primary_symbol.to_string(),
                series: None,
            },
            comparison: SlotData {
                symbol: comparison_symbol.to_string(),
                series: None,
            },
            active_slot: Slot::Primary,
            selection: Selection::default(),
            plot_data: PlotData::default(),
            comparison_visible: false,
            message: String::new(),
        }
    }

    pub fn active_slot(&self) -> Slot {
        self.active_slot
    }

    pub fn comparison_visible(&self) -> bool {
        self.comparison_visible
    }

    pub fn current_plot_data(&self) -> &PlotData {
        &self.plot_data
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn slot(&self, slot: Slot) -> &SlotData {
        match slot {
            Slot::Primary => &self.primary,
            Slot::Comparison => &self.comparison,
        }
    }

    /// Years of the primary series, most recent first
    pub fn year_options(&self) -> Vec<String> {
        self.primary
            .series
            .as_ref()
            .map(|s| s.year_options())
            .unwrap_or_default()
    }

    /// Months of the primary series in the selected year, most recent first
    pub fn month_options(&self) -> Vec<String> {
        self.primary
            .series
            .as_ref()
            .map(|s| months_in_year(s, &self.selection.year))
            .unwrap_or_default()
    }

    pub fn clear_message(&mut self) {
        self.message.clear();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn set_active_slot(&mut self, slot: Slot) {
        self.active_slot = slot;
        self.comparison_visible = slot == Slot::Comparison;
    }

    /// Relabels `slot` and replaces its series, only call after a successful fetch
    pub fn set_slot_ticker(&mut self, slot: Slot, symbol: &str, series: PriceSeries) {
        let slot_data = match slot {
            Slot::Primary => &mut self.primary,
            Slot::Comparison => &mut self.comparison,
        };

        slot_data.symbol = symbol.to_string();
        slot_data.series = Some(series.with_symbol(symbol));
    }

    /// Keeps `year` when the primary series has it, otherwise the most recent year.
    /// The month is then kept when still available in that year, otherwise the
    /// most recent month.
    pub fn set_year(&mut self, year: &str) {
        if let Some(year) = resolve_option(&self.year_options(), year) {
            self.selection.year = year;
        }

        if let Some(month) = resolve_option(&self.month_options(), &self.selection.month) {
            self.selection.month = month;
        }
    }

    pub fn set_month(&mut self, month: &str) -> VtResult<()> {
        if self.month_options().iter().any(|m| m == month) {
            self.selection.month = month.to_string();
            Ok(())
        } else {
            Err(VtError::no_data(
                &self.primary.symbol,
                month,
                &self.selection.year,
            ))
        }
    }

    /// Re-slices both series for the current selection and replaces the plot data
    /// in one write. Returns whether the comparison series made it into the plot.
    ///
    /// Leaves the plot untouched when the primary series has nothing to show.
    pub fn refresh_plot(&mut self) -> VtResult<bool> {
        let Selection { year, month } = &self.selection;

        let Some(primary_series) = &self.primary.series else {
            return Err(VtError::no_data(&self.primary.symbol, month, year));
        };
        let primary_closings = extract_month(primary_series, month, year)?;

        let x = primary_closings.dates();
        let y1 = primary_closings.closes();
        let y2 = self.comparison_closings(&x);

        debug!(
            "[Plot] {} {month} {year} x={} y2={}",
            self.primary.symbol,
            x.len(),
            y2.is_some()
        );

        self.plot_data = PlotData { x, y1, y2 };

        Ok(self.plot_data.has_comparison())
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            primary_symbol: self.primary.symbol.clone(),
            comparison_symbol: self.comparison.symbol.clone(),
            active_slot: self.active_slot,
            year_options: self.year_options(),
            month_options: self.month_options(),
            selection: self.selection.clone(),
            plot_data: self.plot_data.clone(),
            comparison_visible: self.comparison_visible,
            message: self.message.clone(),
        }
    }

    /// Comparison closes aligned to `x`, `None` unless every date in `x` has one
    fn comparison_closings(&self, x: &[NaiveDate]) -> Option<Vec<f64>> {
        let Selection { year, month } = &self.selection;
        let series = self.comparison.series.as_ref()?;
        let closings = extract_month(series, month, year).ok()?;

        x.iter().map(|date| closings.get(date)).collect()
    }
}

/// `preferred` when present in `options`, otherwise the first (most recent) option
pub fn resolve_option(options: &[String], preferred: &str) -> Option<String> {
    if options.iter().any(|o| o == preferred) {
        Some(preferred.to_string())
    } else {
        options.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::memory::weekday_series;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loaded_state() -> DashboardState {
        let mut state = DashboardState::new("AMZN", "GOOG");
        state.set_slot_ticker(
            Slot::Primary,
            "AMZN",
            weekday_series(date(2023, 10, 2), date(2024, 3, 28), |i| 120.0 + i as f64),
        );
        state.set_slot_ticker(
            Slot::Comparison,
            "GOOG",
            weekday_series(date(2023, 11, 1), date(2024, 3, 28), |i| 130.0 - i as f64),
        );
        state
    }

    #[test]
    fn test_resolve_option() {
        let options = vec!["2024".to_string(), "2023".to_string()];

        assert_eq!(resolve_option(&options, "2023"), Some("2023".to_string()));
        assert_eq!(resolve_option(&options, "1999"), Some("2024".to_string()));
        assert_eq!(resolve_option(&[], "1999"), None);
    }

    #[test]
    fn test_set_year_falls_back_to_most_recent() {
        let mut state = loaded_state();

        state.set_year("");
        assert_eq!(state.selection().year, "2024");
        assert_eq!(state.selection().month, "March");

        state.set_year("2023");
        assert_eq!(state.selection().year, "2023");
        assert_eq!(state.selection().month, "December");
        assert_eq!(
            state.month_options(),
            vec!["December", "November", "October"]
        );

        state.set_month("October").unwrap();
        state.set_year("2023");
        assert_eq!(state.selection().month, "October");

        state.set_year("1999");
        assert_eq!(state.selection().year, "2024");
        assert_eq!(state.selection().month, "March");
    }

    #[test]
    fn test_set_month_rejects_unknown() {
        let mut state = loaded_state();
        state.set_year("2024");

        assert!(state.set_month("July").is_err());
        assert_eq!(state.selection().month, "March");
    }

    #[test]
    fn test_refresh_plot_aligns_comparison() {
        let mut state = loaded_state();
        state.set_year("2024");

        assert!(state.refresh_plot().unwrap());
        let plot = state.current_plot_data();
        assert_eq!(plot.x.first(), Some(&date(2024, 3, 1)));
        assert_eq!(plot.x.len(), plot.y1.len());
        assert_eq!(plot.y2.as_ref().map(|y2| y2.len()), Some(plot.x.len()));
        assert_eq!(
            plot.correlation().map(|r| format!("{r:.2}")),
            Some("-1.00".to_string())
        );
    }

    #[test]
    fn test_refresh_plot_without_comparison_data() {
        let mut state = loaded_state();
        state.set_year("2023");
        state.set_month("October").unwrap();

        assert!(!state.refresh_plot().unwrap());
        let plot = state.current_plot_data();
        assert!(!plot.is_empty());
        assert!(plot.y2.is_none());
        assert!(plot.correlation().is_none());
    }

    #[test]
    fn test_refresh_plot_drops_partially_covered_comparison() {
        let mut state = loaded_state();
        state.set_slot_ticker(
            Slot::Comparison,
            "NEWCO",
            weekday_series(date(2024, 3, 18), date(2024, 3, 28), |i| 10.0 + i as f64),
        );
        state.set_year("2024");

        assert!(!state.refresh_plot().unwrap());
        let plot = state.current_plot_data();
        assert_eq!(plot.x.first(), Some(&date(2024, 3, 1)));
        assert_eq!(plot.x.len(), plot.y1.len());
        assert!(plot.y2.is_none());

        state.set_slot_ticker(
            Slot::Comparison,
            "GOOG",
            weekday_series(date(2024, 3, 1), date(2024, 3, 28), |i| 10.0 + i as f64),
        );
        assert!(state.refresh_plot().unwrap());
    }

    #[test]
    fn test_set_month_error_names_primary() {
        let mut state = loaded_state();
        state.set_year("2024");

        let err = state.set_month("July").unwrap_err();
        assert_eq!(err.to_string(), "No data for AMZN in July of 2024");
    }

    #[test]
    fn test_refresh_plot_without_primary_keeps_plot() {
        let mut state = DashboardState::new("AMZN", "GOOG");

        assert!(state.refresh_plot().is_err());
        assert!(state.current_plot_data().is_empty());
    }

    #[test]
    fn test_slot_label() {
        assert_eq!(Slot::Primary.label("AMZN"), "1: AMZN");
        assert_eq!(Slot::Comparison.label("GOOG"), "2: GOOG");
    }
}
