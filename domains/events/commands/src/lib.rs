pub mod record_event;

pub use record_event::*;
