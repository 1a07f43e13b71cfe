//! Control panel window lifecycle
//!
//! Closing the panel is not a way out of the program: a close request only
//! minimizes to the tray. `Exit` (tray menu) is the single transition into
//! `Terminated`, which is absorbing.

/// Visibility state of the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Visible,
    Minimized,
    Terminated,
}

/// Things that can happen to the control panel window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// "Minimize to Tray" button
    Minimize,
    /// Window manager close button / Alt+F4
    CloseRequested,
    /// Tray "Show Controls" or tray activation
    Show,
    /// Tray "Exit"
    Exit,
}

impl PanelState {
    pub fn transition(self, event: PanelEvent) -> PanelState {
        match (self, event) {
            (PanelState::Terminated, _) => PanelState::Terminated,
            (_, PanelEvent::Exit) => PanelState::Terminated,
            (_, PanelEvent::Minimize | PanelEvent::CloseRequested) => PanelState::Minimized,
            (_, PanelEvent::Show) => PanelState::Visible,
        }
    }

    pub fn is_visible(self) -> bool {
        self == PanelState::Visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_minimizes_instead_of_terminating() {
        assert_eq!(
            PanelState::Visible.transition(PanelEvent::CloseRequested),
            PanelState::Minimized
        );
        assert_eq!(
            PanelState::Minimized.transition(PanelEvent::CloseRequested),
            PanelState::Minimized
        );
    }

    #[test]
    fn test_show_restores() {
        assert_eq!(PanelState::Minimized.transition(PanelEvent::Show), PanelState::Visible);
        assert_eq!(PanelState::Visible.transition(PanelEvent::Show), PanelState::Visible);
    }

    #[test]
    fn test_only_exit_terminates() {
        for state in [PanelState::Visible, PanelState::Minimized] {
            for event in [PanelEvent::Minimize, PanelEvent::CloseRequested, PanelEvent::Show] {
                assert_ne!(state.transition(event), PanelState::Terminated);
            }
            assert_eq!(state.transition(PanelEvent::Exit), PanelState::Terminated);
        }
    }

    #[test]
    fn test_terminated_is_absorbing() {
        for event in [
            PanelEvent::Minimize,
            PanelEvent::CloseRequested,
            PanelEvent::Show,
            PanelEvent::Exit,
        ] {
            assert_eq!(PanelState::Terminated.transition(event), PanelState::Terminated);
        }
    }
}
