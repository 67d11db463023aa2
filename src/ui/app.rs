use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ChatCommand, ChatEvent, PanelKind};

use super::components::chat_panel;
use super::state::{mode_for, PanelState};

/// Shell của app: giữ đúng một panel đang hiển thị và toggle giữa hai mode.
///
/// Chuyển view là huỷ hoàn toàn: panel cũ bị thay bằng panel mới tinh (hội
/// thoại mất, generation tăng), nên kết quả đang bay của panel cũ bị loại
/// khi về đến nơi.
pub struct ChatApp {
    panel: PanelState,
    next_generation: u64,
    command_sender: mpsc::Sender<ChatCommand>,
    event_receiver: mpsc::Receiver<ChatEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<ChatCommand>,
        event_receiver: mpsc::Receiver<ChatEvent>,
    ) -> Self {
        let mut app = Self {
            panel: PanelState::new(mode_for(PanelKind::Web), 0),
            next_generation: 0,
            command_sender,
            event_receiver,
        };
        app.mount_panel(PanelKind::Web);
        app
    }

    /// Thay panel hiện tại bằng một panel mới tinh của mode đã cho.
    fn mount_panel(&mut self, kind: PanelKind) {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.panel = PanelState::new(mode_for(kind), generation);

        if self.panel.mode.requires_location {
            self.send_command(ChatCommand::ResolveLocation { generation });
        }
    }

    fn switch_to(&mut self, kind: PanelKind) {
        if self.panel.mode.kind != kind {
            self.mount_panel(kind);
        }
    }

    fn handle_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ChatEvent::ReplyArrived {
                    panel,
                    generation,
                    reply,
                } => {
                    if panel == self.panel.mode.kind {
                        self.panel.apply_reply(generation, reply);
                    } else {
                        log::debug!("Dropping reply addressed to hidden {panel:?} panel");
                    }
                }
                ChatEvent::LocationResolved {
                    generation,
                    location,
                } => self.panel.apply_location(generation, Ok(location)),
                ChatEvent::LocationFailed {
                    generation,
                    message,
                } => self.panel.apply_location(generation, Err(message)),
            }
        }
    }

    fn send_command(&mut self, command: ChatCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to Gemini worker: {err}");
        }
    }

    fn submit_prompt(&mut self, prompt: String) {
        let command = ChatCommand::Prompt {
            panel: self.panel.mode.kind,
            generation: self.panel.generation,
            prompt,
            location: self.panel.location(),
        };
        self.send_command(command);
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Grounded AI Chat");
                ui.separator();
                let mut target = self.panel.mode.kind;
                ui.selectable_value(&mut target, PanelKind::Web, "Web Chat");
                ui.selectable_value(&mut target, PanelKind::Map, "Map Chat");
                self.switch_to(target);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(prompt) = chat_panel::render(ui, &mut self.panel) {
                self.submit_prompt(prompt);
            }
        });

        ctx.request_repaint();
    }
}
