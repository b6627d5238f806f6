//! # vticker lib

use std::{env, sync::LazyLock};

use tokio::sync::RwLock;

use crate::config::VtConfig;

pub mod api;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod ds;
pub mod error;
pub mod gui;
pub mod utils;

pub static CHANNEL_BUFFER_DEFAULT: usize = 64;

pub static VERSION: &str = env!("CARGO_PKG_VERSION");

static CONFIG: LazyLock<RwLock<VtConfig>> = LazyLock::new(|| RwLock::new(VtConfig::default()));

pub async fn init() {
    env_logger::Builder::new()
        .parse_filters(env::var("LOG").as_deref().unwrap_or("off"))
        .init();

    match VtConfig::load() {
        Ok(config) => {
            *CONFIG.write().await = config;
        }
        Err(err) => {
            log::warn!("[Config] {err}, using defaults");
        }
    }
}
