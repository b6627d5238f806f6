use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::settings::{
    Alignment, Color,
    object::{Columns, Object, Rows},
};
use tokio::time::Duration;
use vticker::{
    api::{self, MonthQuery},
    dashboard::state::Slot,
    utils::datetime::date_to_str,
};

#[derive(clap::Args)]
pub struct ShowCommand {
    #[arg(help = "Ticker symbol, e.g. AMZN")]
    ticker: String,

    #[arg(
        short = 'c',
        long = "compare",
        help = "Ticker to compare with, e.g. -c GOOG"
    )]
    comparison: Option<String>,

    #[arg(short = 'y', long = "year", help = "Year, defaults to the most recent")]
    year: Option<String>,

    #[arg(
        short = 'm',
        long = "month",
        help = "Full month name, defaults to the most recent month of the year"
    )]
    month: Option<String>,
}

impl ShowCommand {
    pub async fn exec(&self) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{msg}[{elapsed}] {spinner:.cyan}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));

        let query = MonthQuery {
            primary: self.ticker.trim().to_uppercase(),
            comparison: self.comparison.as_ref().map(|s| s.trim().to_uppercase()),
            year: self.year.clone(),
            month: self.month.clone(),
        };
        let snapshot = api::month_closings(&query).await;

        spinner.finish_and_clear();

        let plot_data = &snapshot.plot_data;
        if plot_data.is_empty() {
            println!("[!] {}", snapshot.message.red());
            return;
        }

        let with_comparison = query.comparison.is_some();

        let mut header = vec![
            format!("{} {}", snapshot.selection.month, snapshot.selection.year),
            Slot::Primary.label(&snapshot.primary_symbol),
        ];
        if with_comparison {
            header.push(Slot::Comparison.label(&snapshot.comparison_symbol));
        }

        let mut table_data: Vec<Vec<String>> = vec![header];
        for (i, date) in plot_data.x.iter().enumerate() {
            let mut row = vec![date_to_str(date), format!("{:.2}", plot_data.y1[i])];
            if with_comparison {
                row.push(
                    plot_data
                        .y2
                        .as_ref()
                        .and_then(|y2| y2.get(i))
                        .map(|v| format!("{v:.2}"))
                        .unwrap_or("-".to_string()),
                );
            }
            table_data.push(row);
        }

        let mut table = tabled::builder::Builder::from_iter(&table_data).build();
        table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
        table.modify(Columns::first().not(Rows::first()), Color::FG_CYAN);
        table.modify(Columns::new(1..), Alignment::right());
        println!("\n{table}");

        if with_comparison && !snapshot.message.is_empty() {
            println!("{}", snapshot.message.yellow());
        }
    }
}
