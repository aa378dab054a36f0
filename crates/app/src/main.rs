//! Screenshot List - keep a list of screenshots while playing a game in
//! another window

#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]
#![cfg_attr(not(windows), allow(dead_code))]

mod commands;
mod config;
#[cfg(windows)]
mod gdi_canvas;
mod logging;
#[cfg(windows)]
mod menu;
#[cfg(windows)]
mod window;

use crate::config::AppConfig;
use tracing::{debug, error};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::init(config.tracing_level());
    debug!(?config, "starting");

    if let Err(err) = run(&config) {
        error!(%err, "fatal error");
        return Err(err);
    }
    Ok(())
}

#[cfg(windows)]
fn run(config: &AppConfig) -> anyhow::Result<()> {
    let code = window::run(config)?;
    debug!(code, "message loop finished");
    Ok(())
}

#[cfg(not(windows))]
fn run(_config: &AppConfig) -> anyhow::Result<()> {
    anyhow::bail!("Screenshot List needs a Windows desktop")
}
