pub mod action;
pub mod admins;
pub mod health;
pub mod session;
pub mod status;
pub mod students;
