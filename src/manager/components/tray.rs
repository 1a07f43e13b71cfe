use eframe::egui;
use ksni::TrayMethods;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use tokio::sync::Notify;
use tracing::{error, info, warn};

use crate::constants::{app, tray};

/// Requests from the tray thread to the UI thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    ShowControls,
    /// Icon activated (primary or double click, depending on the host)
    Activate,
    ToggleOverlay,
    Exit,
}

/// System tray icon; every action is forwarded to the UI thread
pub struct AppTray {
    pub sender: Sender<TrayCommand>,
    pub ctx: egui::Context,
    pub icon: ksni::Icon,
}

impl AppTray {
    fn send(&self, command: TrayCommand) {
        if let Err(err) = self.sender.send(command) {
            warn!(?command, error = %err, "UI thread gone, dropping tray command");
            return;
        }
        self.ctx.request_repaint();
    }
}

impl ksni::Tray for AppTray {
    fn id(&self) -> String {
        app::ID.into()
    }

    fn title(&self) -> String {
        app::NAME.into()
    }

    fn icon_pixmap(&self) -> Vec<ksni::Icon> {
        vec![self.icon.clone()]
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        ksni::ToolTip {
            title: tray::TOOLTIP.into(),
            ..Default::default()
        }
    }

    fn activate(&mut self, _x: i32, _y: i32) {
        self.send(TrayCommand::Activate);
    }

    fn menu(&self) -> Vec<ksni::MenuItem<Self>> {
        use ksni::menu::*;

        vec![
            StandardItem {
                label: tray::MENU_SHOW_CONTROLS.into(),
                activate: Box::new(|this: &mut AppTray| this.send(TrayCommand::ShowControls)),
                ..Default::default()
            }
            .into(),
            StandardItem {
                label: tray::MENU_TOGGLE_CROSSHAIR.into(),
                activate: Box::new(|this: &mut AppTray| this.send(TrayCommand::ToggleOverlay)),
                ..Default::default()
            }
            .into(),
            MenuItem::Separator,
            StandardItem {
                label: tray::MENU_EXIT.into(),
                activate: Box::new(|this: &mut AppTray| this.send(TrayCommand::Exit)),
                ..Default::default()
            }
            .into(),
        ]
    }
}

/// Run the tray on its own thread until `shutdown` is notified.
/// A missing D-Bus session only costs the tray icon.
pub fn spawn_tray(tray: AppTray, shutdown: Arc<Notify>) {
    let spawned = std::thread::Builder::new()
        .name("tray".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!(error = ?err, "Failed to build Tokio runtime for tray");
                    return;
                }
            };

            runtime.block_on(async move {
                match tray.spawn().await {
                    Ok(handle) => {
                        info!("Tray icon created via ksni/D-Bus");
                        shutdown.notified().await;
                        handle.shutdown().await;
                        info!("Tray icon removed");
                    }
                    Err(err) => {
                        error!(error = ?err, "Failed to create tray icon (D-Bus unavailable?)");
                    }
                }
            });
        });

    if let Err(err) = spawned {
        error!(error = ?err, "Failed to spawn tray thread");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksni::Tray;
    use std::sync::mpsc;

    fn tray() -> (AppTray, mpsc::Receiver<TrayCommand>) {
        let (sender, receiver) = mpsc::channel();
        let tray = AppTray {
            sender,
            ctx: egui::Context::default(),
            icon: ksni::Icon {
                width: 1,
                height: 1,
                data: vec![0xFF, 0x00, 0xFF, 0xFF],
            },
        };
        (tray, receiver)
    }

    fn labels(items: &[ksni::MenuItem<AppTray>]) -> Vec<Option<String>> {
        items
            .iter()
            .map(|item| match item {
                ksni::MenuItem::Standard(standard) => Some(standard.label.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_menu_layout() {
        let (tray, _rx) = tray();
        assert_eq!(
            labels(&tray.menu()),
            vec![
                Some("Show Controls".to_string()),
                Some("Toggle Crosshair".to_string()),
                None,
                Some("Exit".to_string()),
            ]
        );
        assert_eq!(tray.tool_tip().title, "Aim Dot");
        assert_eq!(tray.icon_pixmap().len(), 1);
    }

    #[test]
    fn test_menu_items_send_commands() {
        let (mut tray, rx) = tray();
        let menu = tray.menu();
        for item in &menu {
            if let ksni::MenuItem::Standard(standard) = item {
                (standard.activate)(&mut tray);
            }
        }
        let sent: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            sent,
            vec![
                TrayCommand::ShowControls,
                TrayCommand::ToggleOverlay,
                TrayCommand::Exit
            ]
        );
    }

    #[test]
    fn test_activation_requests_show() {
        let (mut tray, rx) = tray();
        tray.activate(0, 0);
        assert_eq!(rx.try_recv(), Ok(TrayCommand::Activate));
    }

    #[test]
    fn test_closed_channel_is_ignored() {
        let (tray, rx) = tray();
        drop(rx);
        tray.send(TrayCommand::Exit);
    }
}
