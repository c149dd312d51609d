pub mod chat_exchange;
pub mod config;
pub mod constants;
pub mod controller;
pub mod farm_services;
pub mod language;
pub mod message;
pub mod session;
