use log::{debug, info};

use crate::{
    dashboard::state::{DashboardSnapshot, DashboardState, Selection, Slot},
    ds::SeriesFetcher,
    error::VtError,
};

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    TickerChanged(String),
    YearChanged(String),
    MonthChanged(String),
    ActiveSlotChanged(Slot),
}

/// Turns input events into dashboard state transitions.
///
/// Each call to [`handle`](Self::handle) runs to completion, fetch included, and
/// leaves the state consistent before returning.
pub struct ReactiveController {
    state: DashboardState,
    fetcher: Box<dyn SeriesFetcher>,
}

impl ReactiveController {
    pub fn new(
        fetcher: Box<dyn SeriesFetcher>,
        primary_symbol: &str,
        comparison_symbol: &str,
    ) -> Self {
        Self {
            state: DashboardState::new(primary_symbol, comparison_symbol),
            fetcher,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.state.snapshot()
    }

    /// Loads both initial tickers and selects the most recent month of the primary
    pub async fn start(&mut self) {
        let mut failures: Vec<String> = vec![];

        for slot in [Slot::Primary, Slot::Comparison] {
            let symbol = self.state.slot(slot).symbol.clone();

            match self.fetcher.fetch(&symbol).await {
                Ok(series) => self.state.set_slot_ticker(slot, &symbol, series),
                Err(_) => failures.push(VtError::unrecognized(&symbol).to_string()),
            }
        }

        self.state.set_year("");
        if let Err(err) = self.state.refresh_plot() {
            debug!("[Start] {err}");
        }

        info!(
            "[Start] {} / {} {} {}",
            self.state.slot(Slot::Primary).symbol,
            self.state.slot(Slot::Comparison).symbol,
            self.state.selection().month,
            self.state.selection().year
        );

        if let Some(message) = failures.into_iter().next() {
            self.state.set_message(message);
        }
    }

    pub async fn handle(&mut self, event: InputEvent) {
        debug!("[Event] {event:?}");

        match event {
            InputEvent::TickerChanged(symbol) => self.on_ticker_changed(&symbol).await,
            InputEvent::YearChanged(year) => self.on_year_changed(&year),
            InputEvent::MonthChanged(month) => self.on_month_changed(&month),
            InputEvent::ActiveSlotChanged(slot) => self.on_active_slot_changed(slot),
        }
    }

    async fn on_ticker_changed(&mut self, symbol: &str) {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return;
        }

        let slot = self.state.active_slot();
        let current = self.state.slot(slot);
        if current.symbol == symbol && current.series.is_some() {
            return;
        }

        match slot {
            Slot::Primary => self.on_primary_ticker_changed(symbol).await,
            Slot::Comparison => self.on_comparison_ticker_changed(symbol).await,
        }
    }

    async fn on_primary_ticker_changed(&mut self, symbol: &str) {
        let series = match self.fetcher.fetch(symbol).await {
            Ok(series) => series,
            Err(_) => {
                info!("[Ticker] {} {symbol} not recognized", Slot::Primary);
                self.state
                    .set_message(VtError::unrecognized(symbol).to_string());
                return;
            }
        };

        self.state.set_slot_ticker(Slot::Primary, symbol, series);

        let year = self.state.selection().year.clone();
        self.state.set_year(&year);

        match self.state.refresh_plot() {
            Ok(with_comparison) => debug!("[Ticker] {symbol} comparison={with_comparison}"),
            Err(err) => debug!("[Ticker] {symbol} {err}"),
        }

        self.state.clear_message();
    }

    async fn on_comparison_ticker_changed(&mut self, symbol: &str) {
        let series = match self.fetcher.fetch(symbol).await {
            Ok(series) => series,
            Err(_) => {
                info!("[Ticker] {} {symbol} not recognized", Slot::Comparison);
                self.state
                    .set_message(VtError::unrecognized(symbol).to_string());
                return;
            }
        };

        self.state.set_slot_ticker(Slot::Comparison, symbol, series);

        if let Err(err) = self.state.refresh_plot() {
            debug!("[Ticker] {symbol} {err}");
        }

        let message = self.comparison_message();
        self.state.set_message(message);
    }

    fn on_year_changed(&mut self, year: &str) {
        if self.state.slot(Slot::Primary).series.is_none() {
            debug!("[Year] {year} ignored without primary data");
            return;
        }

        self.state.set_year(year);

        if let Err(err) = self.state.refresh_plot() {
            debug!("[Year] {err}");
        }
    }

    fn on_month_changed(&mut self, month: &str) {
        if let Err(err) = self.state.set_month(month) {
            debug!("[Month] {err}");
            return;
        }

        if let Err(err) = self.state.refresh_plot() {
            debug!("[Month] {err}");
        }
    }

    fn on_active_slot_changed(&mut self, slot: Slot) {
        self.state.set_active_slot(slot);

        match slot {
            Slot::Primary => self.state.clear_message(),
            Slot::Comparison => {
                let message = self.comparison_message();
                self.state.set_message(message);
            }
        }
    }

    /// A primary slot that never loaded has no period to compare against, its
    /// unrecognized message stays in place
    fn comparison_message(&self) -> String {
        let primary = self.state.slot(Slot::Primary);
        if primary.series.is_none() {
            return VtError::unrecognized(&primary.symbol).to_string();
        }

        let plot_data = self.state.current_plot_data();
        if plot_data.has_comparison() {
            match plot_data.correlation() {
                Some(r) => format!("Correlation: {r:.2}"),
                None => "Correlation: n/a".to_string(),
            }
        } else {
            let Selection { year, month } = self.state.selection();
            VtError::no_data(&self.state.slot(Slot::Comparison).symbol, month, year).to_string()
        }
    }
}
