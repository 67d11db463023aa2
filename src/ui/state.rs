use eframe::egui;

use crate::common::types::{ChatMessage, GroundedReply, Location, PanelKind};

/// Mô tả tĩnh của một panel chat; hai panel chỉ khác nhau ở descriptor này.
#[derive(Debug, Clone, Copy)]
pub struct PanelMode {
    pub kind: PanelKind,
    pub title: &'static str,
    pub intro: &'static str,
    pub example: &'static str,
    pub placeholder: &'static str,
    pub thinking_label: &'static str,
    pub accent: egui::Color32,
    pub requires_location: bool,
}

pub const WEB_MODE: PanelMode = PanelMode {
    kind: PanelKind::Web,
    title: "Web-Grounded Chat",
    intro: "Ask me anything! I'll use Google Search to find the latest information.",
    example: "(e.g., \"Who won the latest F1 race?\")",
    placeholder: "Ask a question...",
    thinking_label: "Thinking...",
    accent: egui::Color32::from_rgb(99, 102, 241),
    requires_location: false,
};

pub const MAP_MODE: PanelMode = PanelMode {
    kind: PanelKind::Map,
    title: "Map-Grounded Chat",
    intro: "Your location is set. Ask me about nearby places!",
    example: "(e.g., \"Any good coffee shops near me?\")",
    placeholder: "Ask about nearby places...",
    thinking_label: "Searching maps...",
    accent: egui::Color32::from_rgb(20, 184, 166),
    requires_location: true,
};

pub fn mode_for(kind: PanelKind) -> PanelMode {
    match kind {
        PanelKind::Web => WEB_MODE,
        PanelKind::Map => MAP_MODE,
    }
}

/// Trạng thái lấy vị trí của panel.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoStatus {
    /// Panel web không cần vị trí.
    NotNeeded,
    Resolving,
    Ready(Location),
    Failed(String),
}

/// Trạng thái cục bộ của một panel chat.
///
/// `generation` là tem của lần mount hiện tại: lệnh gửi đi mang tem này và
/// sự kiện trả về chỉ được áp dụng khi tem còn khớp, nên kết quả của một
/// panel đã bị huỷ (chuyển view) rơi vào no-op.
pub struct PanelState {
    pub mode: PanelMode,
    pub messages: Vec<ChatMessage>,
    pub input_text: String,
    pub pending: bool,
    pub generation: u64,
    pub geo: GeoStatus,
}

impl PanelState {
    pub fn new(mode: PanelMode, generation: u64) -> Self {
        let geo = if mode.requires_location {
            GeoStatus::Resolving
        } else {
            GeoStatus::NotNeeded
        };
        Self {
            mode,
            messages: Vec::new(),
            input_text: String::new(),
            pending: false,
            generation,
            geo,
        }
    }

    pub fn location(&self) -> Option<Location> {
        match &self.geo {
            GeoStatus::Ready(location) => Some(*location),
            _ => None,
        }
    }

    /// Xử lý một lần submit. Trả về prompt cần gửi nếu hợp lệ; ngược lại
    /// (input trắng, đang chờ reply, chưa có vị trí) là no-op im lặng.
    pub fn submit(&mut self) -> Option<String> {
        let prompt = self.input_text.trim().to_string();
        if prompt.is_empty() || self.pending {
            return None;
        }
        if self.mode.requires_location && self.location().is_none() {
            return None;
        }

        self.messages.push(ChatMessage::user(prompt.clone()));
        self.input_text.clear();
        self.pending = true;
        Some(prompt)
    }

    /// Áp dụng reply từ worker; tem lệch nghĩa là panel đã được mount lại.
    pub fn apply_reply(&mut self, generation: u64, reply: GroundedReply) {
        if generation != self.generation {
            log::debug!("Dropping reply for stale panel generation {generation}");
            return;
        }
        self.messages.push(ChatMessage::bot(reply.text, reply.sources));
        self.pending = false;
    }

    pub fn apply_location(&mut self, generation: u64, result: Result<Location, String>) {
        if generation != self.generation {
            log::debug!("Dropping location result for stale generation {generation}");
            return;
        }
        self.geo = match result {
            Ok(location) => GeoStatus::Ready(location),
            Err(message) => GeoStatus::Failed(message),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::Role;

    fn location() -> Location {
        Location {
            latitude: 48.85,
            longitude: 2.35,
        }
    }

    #[test]
    fn submit_appends_user_message_and_clears_input_synchronously() {
        let mut panel = PanelState::new(WEB_MODE, 1);
        panel.input_text = "Who won the latest F1 race?".to_string();

        let prompt = panel.submit();

        assert_eq!(prompt.as_deref(), Some("Who won the latest F1 race?"));
        assert_eq!(panel.messages.len(), 1);
        assert_eq!(panel.messages[0].role, Role::User);
        assert_eq!(panel.messages[0].content, "Who won the latest F1 race?");
        assert!(panel.input_text.is_empty());
        assert!(panel.pending);
    }

    #[test]
    fn whitespace_only_input_is_a_silent_no_op() {
        let mut panel = PanelState::new(WEB_MODE, 1);
        panel.input_text = "   \n".to_string();

        assert!(panel.submit().is_none());
        assert!(panel.messages.is_empty());
        assert!(!panel.pending);
    }

    #[test]
    fn submit_while_pending_appends_nothing() {
        let mut panel = PanelState::new(WEB_MODE, 1);
        panel.input_text = "first".to_string();
        panel.submit().unwrap();

        panel.input_text = "second".to_string();
        assert!(panel.submit().is_none());
        assert_eq!(panel.messages.len(), 1);
        // Input của lần submit bị từ chối vẫn giữ nguyên.
        assert_eq!(panel.input_text, "second");
    }

    #[test]
    fn map_submit_before_location_resolves_is_a_no_op() {
        let mut panel = PanelState::new(MAP_MODE, 1);
        panel.input_text = "coffee nearby".to_string();

        assert!(panel.submit().is_none());
        assert!(panel.messages.is_empty());
    }

    #[test]
    fn map_submit_works_once_location_is_ready() {
        let mut panel = PanelState::new(MAP_MODE, 1);
        panel.apply_location(1, Ok(location()));
        panel.input_text = "coffee nearby".to_string();

        assert!(panel.submit().is_some());
        assert_eq!(panel.location(), Some(location()));
    }

    #[test]
    fn reply_appends_bot_message_and_returns_to_idle() {
        let mut panel = PanelState::new(WEB_MODE, 7);
        panel.input_text = "hello".to_string();
        panel.submit().unwrap();

        panel.apply_reply(
            7,
            GroundedReply {
                text: "hi there".to_string(),
                sources: Vec::new(),
            },
        );

        assert_eq!(panel.messages.len(), 2);
        assert_eq!(panel.messages[1].role, Role::Bot);
        assert!(!panel.pending);
    }

    #[test]
    fn stale_generation_reply_is_discarded() {
        let mut panel = PanelState::new(WEB_MODE, 2);
        panel.apply_reply(1, GroundedReply::apology("too late"));

        assert!(panel.messages.is_empty());
        assert!(!panel.pending);
    }

    #[test]
    fn stale_location_result_is_discarded() {
        let mut panel = PanelState::new(MAP_MODE, 2);
        panel.apply_location(1, Err("Location permission denied.".to_string()));

        assert_eq!(panel.geo, GeoStatus::Resolving);
    }

    #[test]
    fn location_failure_blocks_the_panel() {
        let mut panel = PanelState::new(MAP_MODE, 1);
        panel.apply_location(1, Err("Location permission denied.".to_string()));

        assert_eq!(
            panel.geo,
            GeoStatus::Failed("Location permission denied.".to_string())
        );
        panel.input_text = "coffee".to_string();
        assert!(panel.submit().is_none());
    }
}
