//! Concrete sink implementations

pub mod telegram;

pub use telegram::TelegramSink;
