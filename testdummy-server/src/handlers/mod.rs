pub mod chat;
pub mod lifecycle;
pub mod probes;

pub use chat::chat;
pub use lifecycle::{exit, healthcheck};
pub use probes::{echo, env, health, ping, status, version};
