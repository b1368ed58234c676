pub mod cli;
pub mod clock;
pub mod context;
pub mod models;
pub mod persist;
pub mod repository;
#[cfg(test)]
mod tests;
pub mod types;
