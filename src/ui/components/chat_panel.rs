use eframe::egui;

use crate::ui::state::{GeoStatus, PanelState};

use super::{input_bar, message_list};

/// Render một panel chat; trả về prompt khi có lần submit hợp lệ.
///
/// Panel bản đồ gate toàn bộ bề mặt chat sau trạng thái vị trí: spinner khi
/// đang tra cứu, màn hình lỗi khi thất bại, chat chỉ khi đã có toạ độ.
pub fn render(ui: &mut egui::Ui, state: &mut PanelState) -> Option<String> {
    match state.geo.clone() {
        GeoStatus::Resolving => {
            render_locating(ui);
            return None;
        }
        GeoStatus::Failed(message) => {
            render_location_error(ui, &message);
            return None;
        }
        GeoStatus::NotNeeded | GeoStatus::Ready(_) => {}
    }

    let mut submitted = None;

    egui::TopBottomPanel::bottom(egui::Id::new(("chat_input", state.mode.kind)))
        .show_inside(ui, |ui| {
            ui.add_space(4.0);
            let requested = input_bar::render(
                ui,
                &mut state.input_text,
                state.mode.placeholder,
                !state.pending,
            );
            ui.add_space(4.0);
            if requested {
                submitted = state.submit();
            }
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        message_list::render(ui, state);
    });

    submitted
}

fn render_locating(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.spinner();
        ui.label("Getting your location...");
    });
}

fn render_location_error(ui: &mut egui::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(
            egui::RichText::new("Location Error")
                .heading()
                .color(egui::Color32::LIGHT_RED),
        );
        ui.add_space(8.0);
        ui.label(format!("Could not get your location: {message}"));
        ui.label(
            egui::RichText::new(
                "Please check your network and location settings, then switch back to this tab to retry.",
            )
            .weak(),
        );
    });
}
