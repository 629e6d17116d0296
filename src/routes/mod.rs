pub mod candidates;
pub mod health;
pub mod scheduler;
pub mod webhook;
