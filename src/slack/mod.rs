pub mod api;
pub mod events;
pub mod server;

pub use api::{SlackApiClient, SlackError, SlackStepSignaler};
pub use server::{router, serve, AppState};
