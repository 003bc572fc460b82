pub mod health;
pub mod predict;
