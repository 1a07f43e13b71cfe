use std::process::Command;
use tracing::{info, warn};

/// Log system information for debugging purposes
pub fn log_system_info() {
    info!("=== System Information ===");
    info!("{} v{}", crate::constants::app::NAME, env!("CARGO_PKG_VERSION"));

    if let Ok(kernel) = get_command_output("uname", &["-sr"]) {
        info!("Kernel: {}", kernel);
    }

    if let Ok(os_release) = std::fs::read_to_string("/etc/os-release")
        && let Some(name) = os_release
            .lines()
            .find_map(|line| line.strip_prefix("PRETTY_NAME="))
    {
        info!("OS: {}", name.trim_matches('"'));
    }

    // The overlay is an X11 window; under Wayland it only works through XWayland
    match std::env::var("XDG_SESSION_TYPE") {
        Ok(session) if session == "wayland" => {
            warn!(session = %session, "Wayland session detected, overlay runs through XWayland")
        }
        Ok(session) => info!("Session Type: {}", session),
        Err(_) => {}
    }
    if let Ok(desktop) = std::env::var("XDG_CURRENT_DESKTOP") {
        info!("Desktop Environment: {}", desktop);
    }
    match std::env::var("DISPLAY") {
        Ok(display_var) => info!("X11 Display: {}", display_var),
        Err(_) => warn!("DISPLAY is not set, connecting to the X server will likely fail"),
    }

    info!("==========================");
}

fn get_command_output(cmd: &str, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new(cmd).args(args).output()?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
