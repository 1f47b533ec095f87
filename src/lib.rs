pub mod auth;
pub mod bot;
pub mod calendar;
pub mod config;
pub mod error;
pub mod startup;
