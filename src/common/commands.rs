use crate::common::types::{Location, PanelKind};

/// Lệnh UI gửi xuống worker Gemini.
#[derive(Debug, Clone)]
pub enum ChatCommand {
    /// Gửi prompt đến model với grounding tool của panel tương ứng.
    /// - generation: tem của panel lúc gửi, để loại bỏ reply đến trễ
    Prompt {
        panel: PanelKind,
        generation: u64,
        prompt: String,
        location: Option<Location>,
    },
    /// Yêu cầu xác định vị trí hiện tại (panel bản đồ, một lần mỗi lần mount).
    ResolveLocation { generation: u64 },
}
