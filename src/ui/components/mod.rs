pub mod chat_panel;
pub mod input_bar;
pub mod message_list;
pub mod source_list;
