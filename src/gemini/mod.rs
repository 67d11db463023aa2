pub mod models;
pub mod service;
pub mod worker;

pub use service::GroundingService;
pub use worker::GeminiWorker;
