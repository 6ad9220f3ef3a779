pub mod charts;
pub mod directories;
pub mod health;
