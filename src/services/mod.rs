pub mod ai;
pub mod classifier;
pub mod conversation;
pub mod extraction;
pub mod prompt;
pub mod sessions;
pub mod telephony;
