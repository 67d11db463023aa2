use eframe::egui;

/// Render thanh nhập liệu; trả về true khi người dùng yêu cầu gửi (Enter
/// hoặc nút Send). Việc trim/validate do PanelState::submit quyết định.
pub fn render(
    ui: &mut egui::Ui,
    input_text: &mut String,
    placeholder: &str,
    enabled: bool,
) -> bool {
    let mut send = false;

    ui.horizontal(|ui| {
        let button = egui::Button::new("Send");
        // Vẽ nút trước ở mép phải để ô nhập chiếm hết phần còn lại.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(enabled && !input_text.trim().is_empty(), button)
                .clicked()
            {
                send = true;
            }

            let response = ui.add_enabled(
                enabled,
                egui::TextEdit::singleline(input_text)
                    .hint_text(placeholder)
                    .desired_width(ui.available_width()),
            );

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                send = true;
                response.request_focus();
            }
        });
    });

    send && enabled
}
