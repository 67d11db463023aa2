use uuid::Uuid;

/// Bên tham gia hội thoại.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// Panel chat đang hoạt động, quyết định grounding tool được dùng.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Web,
    Map,
}

/// Domain model đại diện một tin nhắn chat.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Citations kèm theo câu trả lời của bot; rỗng với tin nhắn của user.
    pub sources: Vec<GroundingChunk>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            sources: Vec::new(),
        }
    }

    pub fn bot(content: impl Into<String>, sources: Vec<GroundingChunk>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Bot,
            content: content.into(),
            sources,
        }
    }
}

/// Một citation: trang web hoặc địa điểm mà model đã dựa vào.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub uri: String,
    /// Có thể rỗng; khi render sẽ fallback về hostname của URI.
    pub title: String,
}

/// Grounding chunk từ API: tối đa một trong hai slot được điền.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundingChunk {
    pub web: Option<Source>,
    pub maps: Option<Source>,
}

/// Toạ độ hiện tại của người dùng.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Kết quả đã chuẩn hoá của một lượt gọi grounding; không bao giờ là lỗi.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundedReply {
    pub text: String,
    pub sources: Vec<GroundingChunk>,
}

impl GroundedReply {
    /// Reply thay thế khi request thất bại: câu xin lỗi, không có nguồn.
    pub fn apology(text: &str) -> Self {
        Self {
            text: text.to_string(),
            sources: Vec::new(),
        }
    }
}
