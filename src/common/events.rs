use crate::common::types::{GroundedReply, Location, PanelKind};

/// Sự kiện từ worker gửi lên UI.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    ReplyArrived {
        panel: PanelKind,
        generation: u64,
        reply: GroundedReply,
    },
    LocationResolved {
        generation: u64,
        location: Location,
    },
    LocationFailed {
        generation: u64,
        message: String,
    },
}
