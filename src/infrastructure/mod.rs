pub mod ticker;

pub use ticker::{TickEvent, TickScheduler};
