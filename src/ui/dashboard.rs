use eframe::egui::{self, Frame, Id, Order, Pos2, Rect, ScrollArea, Ui};

use super::canvas::{self, BrushDrag, Canvas};
use crate::charts::paired::PairedSide;
use crate::charts::scatter::ScatterChart;
use crate::scene::{Role, Scene};
use crate::state::{AppState, ChartId, Hovered};
use crate::tooltip::Tooltip;

// ---------------------------------------------------------------------------
// Central panel: every chart, stacked
// ---------------------------------------------------------------------------

/// What the pointer did this frame, applied after painting.
#[derive(Default)]
struct FrameInput {
    hovered: Option<Hovered>,
    pointer: Option<Pos2>,
    brush_end: Option<Option<Rect>>,
}

impl FrameInput {
    fn track(&mut self, canvas: &Canvas, chart: ChartId, scene: &Scene, role: Role) {
        if self.hovered.is_some() {
            return;
        }
        if let Some(bind) = canvas.hovered(scene, role) {
            self.hovered = Some(Hovered { chart, bind });
            self.pointer = canvas.response.hover_pos();
        }
    }
}

/// Render the dashboard in the central panel.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        controller, brush, ..
    } = &mut *state;
    let Some(ctl) = controller.as_ref() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a weather CSV to view charts  (File → Open…)");
        });
        return;
    };

    let mut input = FrameInput::default();

    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                let scene = ctl.bar().scene();
                let c = canvas::show_scene(ui, scene);
                input.track(&c, ChartId::Bar, scene, Role::Bar);

                let scene = ctl.scatter().scene();
                let c = canvas::show_scene(ui, scene);
                input.brush_end = scatter_brush(ui, &c, ctl.scatter(), brush);
                if !brush.is_active() {
                    input.track(&c, ChartId::Scatter, scene, Role::DataPoint);
                }
            });

            let scene = ctl.line().scene();
            let c = canvas::show_scene(ui, scene);
            input.track(&c, ChartId::Line, scene, Role::DataPoint);

            ui.horizontal(|ui: &mut Ui| {
                for side in [PairedSide::Dewpoint, PairedSide::Temperature] {
                    let scene = ctl.paired().chart(side);
                    let c = canvas::show_scene(ui, scene);
                    input.track(&c, ChartId::Paired(side), scene, Role::DataPoint);
                }
            });
        });

    let ctx = ui.ctx();
    tooltip_area(ctx, "bar_tooltip", ctl.bar().tooltip());
    tooltip_area(ctx, "line_tooltip", ctl.line().tooltip());
    tooltip_area(ctx, "paired_tooltip", ctl.paired().tooltip());

    if let Some(brush) = input.brush_end {
        state.apply_brush(brush);
    }
    let at = input.pointer.unwrap_or(Pos2::ZERO);
    state.apply_hover(input.hovered, at);
}

/// Drive the brush gesture on the scatterplot and paint the current
/// rectangle. Returns `Some` when a brush ends, `Some(None)` for a click.
fn scatter_brush(ui: &Ui, c: &Canvas, scatter: &ScatterChart, brush: &mut BrushDrag) -> Option<Option<Rect>> {
    let extent = scatter.brush_extent();
    let response = &c.response;

    if response.drag_started() {
        if let Some(at) = c.local_drag_pointer().filter(|p| extent.contains(*p)) {
            brush.begin(at);
        }
    } else if response.dragged() {
        if let Some(at) = c.local_drag_pointer() {
            brush.update(at);
        }
    }

    let finished = if response.drag_stopped() && brush.is_active() {
        Some(brush.take_final())
    } else if response.clicked() {
        Some(None)
    } else {
        None
    };

    let shown = brush.rect().or_else(|| scatter.selection());
    if let Some(rect) = shown.map(|r| r.intersect(extent)) {
        canvas::paint_brush(&ui.painter_at(response.rect), c, rect);
    }
    finished
}

/// Fade a chart tooltip in or out at its anchor.
fn tooltip_area(ctx: &egui::Context, id: &str, tip: &Tooltip) {
    let id = Id::new(id);
    let opacity = ctx.animate_value_with_time(id, tip.target_opacity(), tip.fade_seconds());
    if opacity <= 0.0 || tip.lines().is_empty() {
        return;
    }

    egui::Area::new(id.with("area"))
        .order(Order::Tooltip)
        .fixed_pos(tip.position())
        .interactable(false)
        .show(ctx, |ui: &mut Ui| {
            ui.set_opacity(opacity);
            Frame::popup(ui.style()).show(ui, |ui: &mut Ui| {
                for line in tip.lines() {
                    ui.label(line);
                }
            });
        });
}
