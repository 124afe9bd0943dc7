pub mod events;
pub mod health;
pub mod orchestrate;
pub mod sessions;
