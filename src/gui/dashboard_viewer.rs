use chrono::{Days, NaiveDate};
use eframe::egui;
use egui_plot::{AxisHints, Corner, Legend, Line, Plot};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

use crate::{
    CHANNEL_BUFFER_DEFAULT,
    dashboard::{
        controller::{InputEvent, ReactiveController},
        state::{DashboardSnapshot, Slot},
    },
    gui::slot_color,
    utils::datetime::date_to_str,
};

pub struct DashboardViewer {
    event_sender: mpsc::Sender<InputEvent>,
    snapshot_receiver: mpsc::Receiver<DashboardSnapshot>,

    snapshot: DashboardSnapshot,
    received_first: bool,
    pending_events: usize,

    ticker_input: String,
}

impl DashboardViewer {
    /// Spawns the worker that owns `controller`. Events are handled one at a time
    /// in arrival order and every finished transition sends back one snapshot.
    pub fn new(cc: &eframe::CreationContext, controller: ReactiveController) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let (event_sender, mut event_receiver) =
            mpsc::channel::<InputEvent>(CHANNEL_BUFFER_DEFAULT);
        let (snapshot_sender, snapshot_receiver) =
            mpsc::channel::<DashboardSnapshot>(CHANNEL_BUFFER_DEFAULT);

        let ctx = cc.egui_ctx.clone();
        tokio::spawn(async move {
            let mut controller = controller;

            controller.start().await;
            if snapshot_sender.send(controller.snapshot()).await.is_err() {
                return;
            }
            ctx.request_repaint();

            while let Some(event) = event_receiver.recv().await {
                controller.handle(event).await;

                if snapshot_sender.send(controller.snapshot()).await.is_err() {
                    break;
                }
                ctx.request_repaint();
            }
        });

        Self {
            event_sender,
            snapshot_receiver,

            snapshot: DashboardSnapshot::default(),
            received_first: false,
            pending_events: 1,

            ticker_input: String::new(),
        }
    }

    fn send_event(&mut self, event: InputEvent) {
        match self.event_sender.try_send(event) {
            Ok(_) => self.pending_events += 1,
            Err(err) => log::warn!("[GUI] {err}"),
        }
    }

    fn on_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.pending_events = self.pending_events.saturating_sub(1);

        if !self.received_first || snapshot.active_slot != self.snapshot.active_slot {
            self.ticker_input = snapshot.active_symbol().to_string();
        }

        self.received_first = true;
        self.snapshot = snapshot;
    }

    fn show_inputs(&mut self, ui: &mut egui::Ui, events: &mut Vec<InputEvent>) {
        ui.horizontal(|ui| {
            for slot in Slot::iter() {
                let label = slot.label(self.snapshot.slot_symbol(slot));
                if ui.radio(self.snapshot.active_slot == slot, label).clicked()
                    && self.snapshot.active_slot != slot
                {
                    events.push(InputEvent::ActiveSlotChanged(slot));
                }
            }
        });

        ui.add_space(8.0);
        ui.label("Enter stock ticker symbol:");
        let response =
            ui.add(egui::TextEdit::singleline(&mut self.ticker_input).hint_text("AMZN"));
        let switching_slot = events
            .iter()
            .any(|e| matches!(e, InputEvent::ActiveSlotChanged(_)));
        if response.lost_focus() && !switching_slot {
            let symbol = self.ticker_input.trim().to_uppercase();
            if !symbol.is_empty() {
                self.ticker_input = symbol.clone();
                events.push(InputEvent::TickerChanged(symbol));
            }
        }

        // Year and month always describe slot 1, they stay usable while slot 2 is active
        ui.add_space(8.0);
        let mut year = self.snapshot.selection.year.clone();
        egui::ComboBox::from_label("Year")
            .selected_text(year.clone())
            .show_ui(ui, |ui| {
                for option in &self.snapshot.year_options {
                    ui.selectable_value(&mut year, option.clone(), option.as_str());
                }
            });
        if year != self.snapshot.selection.year {
            events.push(InputEvent::YearChanged(year));
        }

        let mut month = self.snapshot.selection.month.clone();
        egui::ComboBox::from_label("Month")
            .selected_text(month.clone())
            .show_ui(ui, |ui| {
                for option in &self.snapshot.month_options {
                    ui.selectable_value(&mut month, option.clone(), option.as_str());
                }
            });
        if month != self.snapshot.selection.month {
            events.push(InputEvent::MonthChanged(month));
        }

        if self.snapshot.active_slot == Slot::Comparison {
            ui.label(
                egui::RichText::new(format!(
                    "Period follows {}",
                    Slot::Primary.label(&self.snapshot.primary_symbol)
                ))
                .color(egui::Color32::DARK_GRAY)
                .size(12.0),
            );
        }

        ui.add_space(12.0);
        ui.label(self.snapshot.message.as_str());

        if self.pending_events > 0 {
            ui.add_space(8.0);
            ui.spinner();
        }
    }

    fn show_plot(&self, ui: &mut egui::Ui) {
        let plot_data = &self.snapshot.plot_data;
        let Some(first_date) = plot_data.x.first().copied() else {
            return;
        };

        let to_points = |ys: &[f64]| -> Vec<[f64; 2]> {
            plot_data
                .x
                .iter()
                .zip(ys)
                .map(|(date, y)| [(*date - first_date).num_days() as f64, *y])
                .collect()
        };

        let x_axis = AxisHints::new_x()
            .label("Date")
            .formatter(move |grid_mark, _range| {
                offset_to_date(first_date, grid_mark.value)
                    .map(|d| d.format("%m/%d").to_string())
                    .unwrap_or_default()
            });
        let y_axis = AxisHints::new_y().label("USD");

        Plot::new("closing_prices")
            .custom_x_axes(vec![x_axis])
            .custom_y_axes(vec![y_axis])
            .label_formatter(move |name, point| {
                if name.is_empty() {
                    "".to_string()
                } else {
                    format!(
                        "[{}] {} ${:.2}",
                        offset_to_date(first_date, point.x)
                            .map(|d| date_to_str(&d))
                            .unwrap_or_default(),
                        name,
                        point.y
                    )
                }
            })
            .legend(Legend::default().position(Corner::LeftTop))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(
                        Slot::Primary.label(&self.snapshot.primary_symbol),
                        to_points(&plot_data.y1),
                    )
                    .width(1.5)
                    .color(slot_color(Slot::Primary)),
                );

                if self.snapshot.comparison_visible {
                    if let Some(y2) = &plot_data.y2 {
                        plot_ui.line(
                            Line::new(
                                Slot::Comparison.label(&self.snapshot.comparison_symbol),
                                to_points(y2),
                            )
                            .width(1.5)
                            .color(slot_color(Slot::Comparison)),
                        );
                    }
                }
            });
    }
}

impl eframe::App for DashboardViewer {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        while let Ok(snapshot) = self.snapshot_receiver.try_recv() {
            self.on_snapshot(snapshot);
        }

        let mut events: Vec<InputEvent> = vec![];

        egui::SidePanel::left("inputs_panel")
            .resizable(false)
            .min_width(220.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                self.show_inputs(ui, &mut events);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_plot(ui);
        });

        for event in events {
            self.send_event(event);
        }
    }
}

fn offset_to_date(first_date: NaiveDate, offset: f64) -> Option<NaiveDate> {
    if offset < 0.0 || !offset.is_finite() {
        return None;
    }

    first_date.checked_add_days(Days::new(offset.round() as u64))
}
