pub mod fixtures;
pub mod journal_receiver;

pub use journal_receiver::JournalReceiver;
