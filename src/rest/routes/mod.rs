pub mod gamification;
pub mod health;
pub mod progress;
pub mod sessions;
pub mod stats;
