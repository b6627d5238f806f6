use eframe::egui;
use vticker::{VERSION, api, gui::dashboard_viewer::DashboardViewer};

#[derive(clap::Args)]
pub struct GuiCommand {
    #[arg(short = 'p', long = "primary", help = "Ticker of slot 1, e.g. -p AMZN")]
    primary: Option<String>,

    #[arg(short = 'c', long = "comparison", help = "Ticker of slot 2, e.g. -c GOOG")]
    comparison: Option<String>,
}

impl GuiCommand {
    pub async fn exec(&self) {
        let config = api::get_config().await;
        let primary = self
            .primary
            .as_deref()
            .unwrap_or(&config.primary_ticker)
            .to_uppercase();
        let comparison = self
            .comparison
            .as_deref()
            .unwrap_or(&config.comparison_ticker)
            .to_uppercase();

        let controller = api::new_controller(&primary, &comparison).await;

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 640.0]),
            ..Default::default()
        };

        if let Err(err) = eframe::run_native(
            &format!("Vticker {VERSION}"),
            options,
            Box::new(|cc| Ok(Box::new(DashboardViewer::new(cc, controller)))),
        ) {
            log::error!("[GUI] {err}");
        }
    }
}
