use eframe::egui::Color32;

use crate::dashboard::state::Slot;

pub mod dashboard_viewer;

pub fn slot_color(slot: Slot) -> Color32 {
    match slot {
        Slot::Primary => Color32::from_rgb(230, 80, 70),
        Slot::Comparison => Color32::from_rgb(80, 140, 240),
    }
}
