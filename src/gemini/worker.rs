use tokio::sync::mpsc;

use crate::common::{ChatCommand, ChatEvent, PanelKind};
use crate::geo::Locator;

use super::GroundingService;

/// Worker chạy nền: nhận lệnh từ UI, gọi Gemini / geolocation, đẩy sự kiện
/// ngược lên. Mỗi lệnh chạy trong task riêng để một lượt generate chậm không
/// chặn tra cứu vị trí.
pub struct GeminiWorker {
    service: GroundingService,
    locator: Locator,
    event_sender: mpsc::Sender<ChatEvent>,
    command_receiver: mpsc::Receiver<ChatCommand>,
}

impl GeminiWorker {
    pub fn new(
        service: GroundingService,
        locator: Locator,
        event_sender: mpsc::Sender<ChatEvent>,
        command_receiver: mpsc::Receiver<ChatCommand>,
    ) -> Self {
        Self {
            service,
            locator,
            event_sender,
            command_receiver,
        }
    }

    pub async fn run(mut self) {
        log::info!("Gemini worker started");

        while let Some(command) = self.command_receiver.recv().await {
            let service = self.service.clone();
            let locator = self.locator.clone();
            let events = self.event_sender.clone();
            tokio::spawn(async move {
                handle_command(command, service, locator, events).await;
            });
        }

        log::info!("Command channel closed; Gemini worker shutting down");
    }
}

async fn handle_command(
    command: ChatCommand,
    service: GroundingService,
    locator: Locator,
    events: mpsc::Sender<ChatEvent>,
) {
    match command {
        ChatCommand::Prompt {
            panel,
            generation,
            prompt,
            location,
        } => {
            let reply = match panel {
                PanelKind::Web => service.search_grounded(&prompt).await,
                PanelKind::Map => match location {
                    Some(location) => service.map_grounded(&prompt, location).await,
                    None => {
                        // UI đã chặn trường hợp này; phòng khi lệnh lọt qua.
                        log::warn!("Map prompt without a resolved location; dropping");
                        return;
                    }
                },
            };

            if events
                .send(ChatEvent::ReplyArrived {
                    panel,
                    generation,
                    reply,
                })
                .await
                .is_err()
            {
                log::warn!("UI gone; dropping grounded reply");
            }
        }
        ChatCommand::ResolveLocation { generation } => {
            let event = match locator.resolve().await {
                Ok(location) => ChatEvent::LocationResolved {
                    generation,
                    location,
                },
                Err(err) => {
                    log::warn!("Location lookup failed: {err}");
                    ChatEvent::LocationFailed {
                        generation,
                        message: err.to_string(),
                    }
                }
            };

            if events.send(event).await.is_err() {
                log::warn!("UI gone; dropping location result");
            }
        }
    }
}
