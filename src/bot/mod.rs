pub mod bridge;
pub mod callback_data;
pub mod commands;
pub mod handlers;
pub mod views;
