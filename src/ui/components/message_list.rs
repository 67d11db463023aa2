use eframe::egui;

use crate::common::types::{ChatMessage, Role};
use crate::ui::state::{PanelMode, PanelState};

use super::source_list;

const BUBBLE_MAX_WIDTH: f32 = 480.0;

pub fn render(ui: &mut egui::Ui, state: &PanelState) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if state.messages.is_empty() && !state.pending {
                render_intro(ui, &state.mode);
                return;
            }

            for message in &state.messages {
                render_message(ui, message, &state.mode);
                ui.add_space(8.0);
            }

            if state.pending {
                render_thinking(ui, &state.mode);
            }
        });
}

fn render_intro(ui: &mut egui::Ui, mode: &PanelMode) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(egui::RichText::new(mode.title).heading().strong());
        ui.add_space(4.0);
        ui.label(mode.intro);
        ui.label(egui::RichText::new(mode.example).weak());
    });
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage, mode: &PanelMode) {
    let (align, fill) = match message.role {
        Role::User => (egui::Align::Max, ui.visuals().faint_bg_color),
        Role::Bot => (egui::Align::Min, ui.visuals().extreme_bg_color),
    };

    ui.with_layout(egui::Layout::top_down(align), |ui| {
        egui::Frame::group(ui.style())
            .fill(fill)
            .corner_radius(egui::CornerRadius::same(8))
            .show(ui, |ui| {
                ui.set_max_width(BUBBLE_MAX_WIDTH);
                if message.role == Role::Bot {
                    ui.colored_label(mode.accent, "●");
                }
                ui.label(&message.content);
                if message.role == Role::Bot {
                    source_list::render(ui, &message.sources, mode.kind);
                }
            });
    });
}

fn render_thinking(ui: &mut egui::Ui, mode: &PanelMode) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(egui::RichText::new(mode.thinking_label).weak());
    });
}
