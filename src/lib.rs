extern crate chrono;
extern crate tokio;

pub mod config;
pub mod controllers;
pub mod display;
pub mod filters;
pub mod logger;
pub mod models;
pub mod store;
pub mod web;
