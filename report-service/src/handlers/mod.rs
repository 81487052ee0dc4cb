pub mod health;
pub mod process;
pub mod reports;
pub mod stats;
pub mod upload;
