pub mod agenda;
pub mod bridge;
pub mod health;
pub mod roster;
pub mod schedule;
pub mod statistics;
