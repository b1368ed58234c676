pub mod profile;
pub mod schedule;
pub mod task;
#[cfg(test)]
mod tests;

/// Reason given when a stored id counter cannot advance.
pub(crate) const ID_OVERFLOW: &str = "id counter exceeds the largest supported id";

pub use profile::ProfileStore;
pub use schedule::ScheduleStore;
pub use task::{TaskBook, TaskStore};
