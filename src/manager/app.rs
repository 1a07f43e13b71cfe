//! eframe application tying the control panel, overlay and tray together

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Result, anyhow};
use eframe::{NativeOptions, egui};
use tokio::sync::Notify;
use tracing::{debug, info};

use super::components::color_dialog::ColorDialog;
use super::components::controls::{self, ControlAction};
use super::components::tray::{AppTray, TrayCommand, spawn_tray};
use super::lifecycle::PanelState;
use super::panel::ControlPanel;
use super::utils::{DesktopNotifier, load_tray_icon_pixmap, load_window_icon, pick_image_file};
use crate::common::types::DotConfig;
use crate::config::SettingsStore;
use crate::constants::gui::*;
use crate::overlay::{OverlayBackend, OverlayWindow};
use crate::resources::ResourcePaths;
use crate::x11::X11Overlay;

struct AimDotApp<B: OverlayBackend> {
    overlay: OverlayWindow<B>,
    panel: ControlPanel,
    color_dialog: ColorDialog,
    tray_commands: Receiver<TrayCommand>,
    shutdown_signal: Arc<Notify>,
    /// Panel state last pushed to the viewport
    synced_state: PanelState,
}

impl<B: OverlayBackend> AimDotApp<B> {
    fn new(
        overlay: OverlayWindow<B>,
        panel: ControlPanel,
        tray_commands: Receiver<TrayCommand>,
        shutdown_signal: Arc<Notify>,
    ) -> Self {
        let synced_state = panel.state();
        Self {
            overlay,
            panel,
            color_dialog: ColorDialog::default(),
            tray_commands,
            shutdown_signal,
            synced_state,
        }
    }

    fn handle_tray_command(&mut self, command: TrayCommand) {
        debug!(?command, "Tray command");
        match command {
            TrayCommand::ShowControls => self.panel.show(),
            TrayCommand::Activate => self.panel.show_if_hidden(),
            TrayCommand::ToggleOverlay => self.panel.toggle_overlay(&mut self.overlay),
            TrayCommand::Exit => self.panel.exit(&self.overlay),
        }
    }

    fn drain_tray_commands(&mut self) {
        while let Ok(command) = self.tray_commands.try_recv() {
            self.handle_tray_command(command);
        }
    }

    fn handle_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::None => {}
            ControlAction::Resize(size) => self.panel.set_size(size, &mut self.overlay),
            ControlAction::SelectShape(shape) => self.panel.select_shape(shape, &mut self.overlay),
            ControlAction::OpenColorDialog => self.color_dialog.open(self.overlay.config().color),
            ControlAction::PickImage => {
                let picked = pick_image_file();
                self.panel.choose_image(picked, &mut self.overlay);
            }
            ControlAction::Minimize => self.panel.minimize(&self.overlay),
        }
    }

    /// Window close requests and the Ctrl+H shortcut
    fn handle_input(&mut self, ctx: &egui::Context) {
        // Closing the window only minimizes; exit goes through the tray
        if ctx.input(|i| i.viewport().close_requested())
            && self.panel.state() != PanelState::Terminated
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.panel.request_close(&self.overlay);
        }

        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::CTRL, egui::Key::H)) {
            self.panel.toggle_overlay(&mut self.overlay);
        }
    }

    /// Translate panel state changes into window commands
    fn sync_viewport(&mut self, ctx: &egui::Context) {
        let state = self.panel.state();
        if state == self.synced_state {
            return;
        }
        match state {
            PanelState::Visible => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            }
            PanelState::Minimized => ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false)),
            PanelState::Terminated => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
        self.synced_state = state;
    }
}

impl<B: OverlayBackend> eframe::App for AimDotApp<B> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.overlay.process_events();
        self.drain_tray_commands();

        self.handle_input(ctx);

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| controls::ui(ui, &self.panel))
            .inner;
        self.handle_action(action);

        if let Some(outcome) = self.color_dialog.show(ctx) {
            self.panel.apply_color(outcome.color(), &mut self.overlay);
        }

        self.sync_viewport(ctx);
        ctx.request_repaint_after(Duration::from_millis(EVENT_POLL_INTERVAL_MS));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // No-op when the tray already saved
        self.panel.exit(&self.overlay);

        self.shutdown_signal.notify_one();
        info!("Signaled tray thread to shutdown");
        info!("Aim Dot exiting");
    }
}

pub fn run_gui(resources: &ResourcePaths) -> Result<()> {
    let window_icon = load_window_icon(&resources.icon);
    let tray_icon = load_tray_icon_pixmap(&resources.icon);

    let backend = X11Overlay::connect()?;
    let mut overlay = OverlayWindow::new(backend, DotConfig::default());
    let panel = ControlPanel::new(
        SettingsStore::open_default(),
        Box::new(DesktopNotifier),
        &mut overlay,
    );
    overlay.show();

    let viewport_builder = egui::ViewportBuilder::default()
        .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
        .with_title(WINDOW_TITLE)
        .with_icon(window_icon);

    let options = NativeOptions {
        viewport: viewport_builder,
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            let (sender, receiver) = mpsc::channel();
            let shutdown_signal = Arc::new(Notify::new());
            spawn_tray(
                AppTray {
                    sender,
                    ctx: cc.egui_ctx.clone(),
                    icon: tray_icon,
                },
                shutdown_signal.clone(),
            );
            info!("Initializing control panel");
            Ok(Box::new(AimDotApp::new(
                overlay,
                panel,
                receiver,
                shutdown_signal,
            )))
        }),
    )
    .map_err(|err| anyhow!("Failed to launch control panel: {err}"))
}
