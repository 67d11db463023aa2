use eframe::egui;

use crate::common::types::{GroundingChunk, PanelKind, Source};

/// Chiếu danh sách chunk xuống các nguồn khớp với panel đang mở; chunk
/// không có slot tương ứng bị bỏ qua. Không khử trùng lặp.
pub fn sources_for(chunks: &[GroundingChunk], kind: PanelKind) -> Vec<&Source> {
    chunks
        .iter()
        .filter_map(|chunk| match kind {
            PanelKind::Web => chunk.web.as_ref(),
            PanelKind::Map => chunk.maps.as_ref(),
        })
        .collect()
}

/// Nhãn hiển thị của một nguồn: title, fallback hostname, fallback URI thô.
pub fn label_for(source: &Source) -> String {
    if !source.title.trim().is_empty() {
        return source.title.clone();
    }
    url::Url::parse(&source.uri)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
        .unwrap_or_else(|| source.uri.clone())
}

/// Render danh sách nguồn dưới một tin nhắn bot; không có gì thì im lặng.
pub fn render(ui: &mut egui::Ui, chunks: &[GroundingChunk], kind: PanelKind) {
    let sources = sources_for(chunks, kind);
    if sources.is_empty() {
        return;
    }

    ui.separator();
    ui.label(egui::RichText::new("Sources:").small().weak());
    ui.horizontal_wrapped(|ui| {
        for source in sources {
            ui.hyperlink_to(
                egui::RichText::new(label_for(source)).small(),
                &source.uri,
            );
        }
    });
}
