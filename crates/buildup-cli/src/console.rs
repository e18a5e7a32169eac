//! Line-oriented stand-in for the form and tooltip overlay.

use buildup::{SelectionField, Status, Tooltip, UiSurface};

/// Prints UI changes to stdout. Repeated identical updates are dropped so a
/// replayed script only shows what actually changed on screen.
#[derive(Debug, Default)]
pub struct ConsoleUi {
    quiet: bool,
    steps: [Option<bool>; 5],
    status: Option<Status>,
    tooltip: Option<Tooltip>,
}

impl ConsoleUi {
    /// A surface that prints.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that only tracks state.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    fn emit(&self, line: String) {
        if !self.quiet {
            println!("{line}");
        }
    }
}

impl UiSurface for ConsoleUi {
    fn set_step_visible(&mut self, field: SelectionField, visible: bool) {
        let slot = &mut self.steps[usize::from(field.step() - 1)];
        if *slot != Some(visible) {
            *slot = Some(visible);
            let verb = if visible { "show" } else { "hide" };
            self.emit(format!("step {} ({field}): {verb}", field.step()));
        }
    }

    fn set_status(&mut self, status: Status) {
        if self.status != Some(status) {
            self.status = Some(status);
            self.emit(format!("status: {status}"));
        }
    }

    fn set_tooltip(&mut self, tooltip: &Tooltip) {
        if self.tooltip.as_ref() == Some(tooltip) {
            return;
        }
        self.tooltip = Some(tooltip.clone());
        if tooltip.visible {
            self.emit(format!(
                "tooltip: {} at ({:.0}, {:.0})",
                tooltip.label, tooltip.position.x, tooltip.position.y
            ));
        } else {
            self.emit("tooltip: hidden".to_string());
        }
    }
}
