//! Zeitaufzeichnung Frontend Entry Point

mod app;
mod cache;
mod calendar;
mod components;
mod config;
mod context;
mod controller;
mod error;
mod fields;
mod keys;
mod list_store;
mod models;
mod ports;
mod store;
mod sync;
mod timer;
mod web;

#[cfg(test)]
mod testing;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match web::load_config() {
        Ok(config) => (config, None),
        Err(e) => (config::AppConfig::default(), Some(e)),
    };
    if let Err(e) = rolling_logger::init_logger(config.log_buffer_lines, rolling_logger::LevelFilter::DEBUG) {
        web_sys::console::warn_1(&format!("logger not installed: {}", e).into());
    }
    if let Some(e) = config_error {
        log::warn!("[CONFIG] Using defaults: {}", e);
    }
    log::info!("[APP] Starting, api base {}", config.api_base);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
