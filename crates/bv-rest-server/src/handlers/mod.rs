//! Request handlers

pub mod browse;
pub mod compare;
pub mod health;
pub mod repositories;
