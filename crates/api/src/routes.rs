pub mod availability;
pub mod health;
