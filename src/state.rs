use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui::{Pos2, Rect};

use crate::charts::paired::PairedSide;
use crate::charts::scatter::AxisChoice;
use crate::config::AppConfig;
use crate::data::loader;
use crate::link::LinkController;
use crate::scene::Binding;
use crate::ui::canvas::BrushDrag;

// ---------------------------------------------------------------------------
// Hover tracking
// ---------------------------------------------------------------------------

/// Which drawing surface a pointer event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartId {
    Bar,
    Scatter,
    Line,
    Paired(PairedSide),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hovered {
    pub chart: ChartId,
    pub bind: Binding,
}

/// Turns per-frame hit tests into enter/leave events.
///
/// Only a change of hovered shape produces an event, so a pointer resting on
/// a point does not re-fire its hover handler every frame.
#[derive(Debug, Default)]
pub struct HoverTracker {
    current: Option<Hovered>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChange {
    pub left: Option<Hovered>,
    pub entered: Option<Hovered>,
}

impl HoverTracker {
    pub fn update(&mut self, next: Option<Hovered>) -> Option<HoverChange> {
        if next == self.current {
            return None;
        }
        let left = std::mem::replace(&mut self.current, next);
        Some(HoverChange {
            left,
            entered: next,
        })
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// File the current charts were built from.
    pub data_path: Option<PathBuf>,

    /// Charts and their links (None until a file loads).
    pub controller: Option<LinkController>,

    /// Current dropdown value.
    pub axis: AxisChoice,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub hover: HoverTracker,

    /// Scatterplot brush gesture in progress.
    pub brush: BrushDrag,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            data_path: None,
            controller: None,
            axis: AxisChoice::default(),
            status_message: None,
            hover: HoverTracker::default(),
            brush: BrushDrag::default(),
        }
    }

    /// Load `path` and rebuild every chart from it.
    ///
    /// A failed load leaves the previous charts in place and reports the
    /// error in the status line.
    pub fn load(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} days from {}", dataset.len(), path.display());
                let mut controller = LinkController::build(Arc::new(dataset), &self.config);
                if self.axis != AxisChoice::default() {
                    controller.set_axis(self.axis);
                }
                self.controller = Some(controller);
                self.data_path = Some(path.to_path_buf());
                self.hover.reset();
                self.brush.cancel();
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("{}: {e}", e.title()));
            }
        }
    }

    pub fn set_axis(&mut self, choice: AxisChoice) {
        if choice == self.axis {
            return;
        }
        self.axis = choice;
        if let Some(ctl) = &mut self.controller {
            ctl.set_axis(choice);
        }
    }

    /// Route a hover change to the charts. `at` is the pointer in screen
    /// coordinates and anchors any tooltip shown.
    pub fn apply_hover(&mut self, next: Option<Hovered>, at: Pos2) {
        let Some(change) = self.hover.update(next) else {
            return;
        };
        let Some(ctl) = &mut self.controller else {
            return;
        };

        if let Some(left) = change.left {
            match left.chart {
                ChartId::Bar => ctl.unhover_bar(),
                ChartId::Scatter => ctl.unhover_scatter(),
                ChartId::Line => ctl.unhover_line(),
                ChartId::Paired(_) => ctl.unhover_paired(),
            }
        }

        if let Some(entered) = change.entered {
            match (entered.chart, entered.bind) {
                (ChartId::Bar, Binding::Band(i)) => {
                    ctl.hover_bar(i, at);
                }
                (ChartId::Scatter, Binding::Day(key)) => {
                    ctl.hover_scatter(key, at);
                }
                (ChartId::Line, Binding::Day(key)) => {
                    ctl.hover_line(key, at);
                }
                (ChartId::Paired(_), Binding::Day(key)) => {
                    ctl.hover_paired(key, at);
                }
                (chart, bind) => log::warn!("Ignoring hover on {chart:?} bound to {bind:?}"),
            }
        }
    }

    /// Finish a scatterplot brush; `None` clears it.
    pub fn apply_brush(&mut self, brush: Option<Rect>) {
        if let Some(ctl) = &mut self.controller {
            ctl.brush_end_px(brush);
        }
    }
}
