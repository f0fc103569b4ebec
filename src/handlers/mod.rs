pub mod calls;
pub mod configs;
pub mod health;
pub mod webhook;
