//! Cross-chart linking.
//!
//! The [`LinkController`] owns the four chart views and turns UI events into
//! restyles and redraws:
//!
//! * brush end on the scatterplot → filter → redraw line-graph curves
//! * hover on a scatterplot point → outline it, dim the rest, line-graph tooltip
//! * hover on a line-graph dot → line-graph tooltip, outline the scatter point
//! * hover on either paired chart → highlight the day in both
//! * hover on a bar → orange bar, precipitation tooltip
//! * dropdown change → rescale the scatterplot's y axis
//!
//! Every handler is a synchronous recomputation from the dataset and the
//! event; calling one twice with the same input gives the same result.

pub mod hover;

use std::sync::Arc;

use eframe::egui::{Pos2, Rect};

use crate::charts::bar::{BarChart, MonthTotal};
use crate::charts::line::LineChart;
use crate::charts::paired::{self, PairedCharts};
use crate::charts::scatter::{self, AxisChoice, ScatterChart};
use crate::config::AppConfig;
use crate::data::filter::{filter_rect, DataRect};
use crate::data::model::{DataSet, DayKey, Record};
use crate::scene::{Binding, Role};

pub use hover::HighlightSet;

/// The last non-empty brush and the days it selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub rect: DataRect,
    pub days: Vec<DayKey>,
}

pub struct LinkController {
    dataset: Arc<DataSet>,
    bar: BarChart,
    scatter: ScatterChart,
    line: LineChart,
    paired: PairedCharts,
    selection: Option<Selection>,
    /// Scatter point outlined from the line graph.
    outlined: Option<DayKey>,
}

impl LinkController {
    /// Wire already-built charts together.
    pub fn new(
        dataset: Arc<DataSet>,
        bar: BarChart,
        scatter: ScatterChart,
        line: LineChart,
        paired: PairedCharts,
    ) -> Self {
        LinkController {
            dataset,
            bar,
            scatter,
            line,
            paired,
            selection: None,
            outlined: None,
        }
    }

    /// Build every chart from `dataset` using the configured layouts.
    pub fn build(dataset: Arc<DataSet>, config: &AppConfig) -> Self {
        let bar = BarChart::new(&dataset, &config.bar);
        let scatter = ScatterChart::new(&dataset, &config.scatter, AxisChoice::default());
        let line = LineChart::new(&dataset, &config.line);
        let paired = PairedCharts::new(&dataset, &config.paired);
        Self::new(dataset, bar, scatter, line, paired)
    }

    // -- Brush → filter → redraw ------------------------------------------

    /// Apply a finished brush given in data space.
    ///
    /// `None` leaves the line graph showing whatever it last drew and clears
    /// the selection. Otherwise the line graph's curves are redrawn through
    /// exactly the records inside `rect`, which may have zero width or height
    /// when an axis domain is a single value.
    pub fn brush_end(&mut self, rect: Option<DataRect>) -> Option<&Selection> {
        let Some(rect) = rect else {
            log::debug!("Brush cleared; line graph keeps its last subset");
            self.selection = None;
            return None;
        };

        let subset = filter_rect(&self.dataset, &rect, self.scatter.x_field(), self.scatter.y_field());
        log::debug!("Brush selected {} of {} days", subset.len(), self.dataset.len());
        self.line.redraw_curves(subset.iter().copied());

        let days = subset.iter().map(|r| r.key()).collect();
        self.selection = Some(Selection { rect, days });
        self.selection.as_ref()
    }

    /// Apply a finished brush given in scatterplot pixels.
    pub fn brush_end_px(&mut self, brush: Option<Rect>) -> Option<&Selection> {
        let rect = brush.and_then(|px| self.scatter.brush_to_data(px));
        self.scatter.set_selection(rect.and(brush));
        self.brush_end(rect)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    // -- Scatter ↔ line graph -----------------------------------------------

    /// Hover a scatterplot point: outline it, dim the others and show the
    /// line graph's tooltip for the same day.
    pub fn hover_scatter(&mut self, key: DayKey, at: Pos2) -> Option<&Record> {
        log::trace!("scatter hover {key}");
        hover::repartition(self.scatter.scene_mut(), Some(key), scatter::mark_focused, scatter::mark_dimmed);

        let record = self.dataset.get(key)?;
        self.line.show_tooltip(record, at);
        Some(record)
    }

    pub fn unhover_scatter(&mut self) {
        hover::repartition(self.scatter.scene_mut(), None, scatter::mark_default, scatter::mark_default);
        self.outlined = None;
        self.line.hide_tooltip();
    }

    /// Hover a line-graph dot: tooltip for that day and outline the matching
    /// scatterplot point.
    pub fn hover_line(&mut self, key: DayKey, at: Pos2) -> Option<&Record> {
        log::trace!("line hover {key}");
        self.clear_outline();
        if let Some(point) = self
            .scatter
            .scene_mut()
            .find_bound_mut(Role::DataPoint, Binding::Day(key))
        {
            scatter::mark_outlined(point);
            self.outlined = Some(key);
        }

        let record = self.dataset.get(key)?;
        self.line.show_tooltip(record, at);
        Some(record)
    }

    pub fn unhover_line(&mut self) {
        self.clear_outline();
        self.line.hide_tooltip();
    }

    fn clear_outline(&mut self) {
        if let Some(key) = self.outlined.take() {
            if let Some(point) = self
                .scatter
                .scene_mut()
                .find_bound_mut(Role::DataPoint, Binding::Day(key))
            {
                point.style.stroke = None;
            }
        }
    }

    // -- Paired charts --------------------------------------------------------

    /// Hover a dot in either paired chart; both charts highlight that day.
    pub fn hover_paired(&mut self, key: DayKey, at: Pos2) -> HighlightSet {
        log::trace!("paired hover {key}");
        let set = hover::repartition_all(
            &mut self.paired.scenes_mut(),
            Some(key),
            paired::mark_highlighted,
            paired::mark_default,
        );
        if let Some(record) = self.dataset.get(key) {
            self.paired.show_tooltip(record, at);
        }
        set
    }

    pub fn unhover_paired(&mut self) {
        hover::repartition_all(&mut self.paired.scenes_mut(), None, paired::mark_default, paired::mark_default);
        self.paired.hide_tooltip();
    }

    // -- Bar chart --------------------------------------------------------------

    pub fn hover_bar(&mut self, band: usize, at: Pos2) -> Option<&MonthTotal> {
        self.bar.hover(band, at)
    }

    pub fn unhover_bar(&mut self) {
        self.bar.unhover();
    }

    // -- Dropdown ---------------------------------------------------------------

    pub fn set_axis(&mut self, choice: AxisChoice) {
        log::debug!("Scatterplot y axis → {}", choice.field().label());
        self.scatter.set_axis(&self.dataset, choice);
    }

    // -- Accessors ----------------------------------------------------------------

    pub fn dataset(&self) -> &DataSet {
        &self.dataset
    }

    pub fn bar(&self) -> &BarChart {
        &self.bar
    }

    pub fn scatter(&self) -> &ScatterChart {
        &self.scatter
    }

    pub fn line(&self) -> &LineChart {
        &self.line
    }

    pub fn paired(&self) -> &PairedCharts {
        &self.paired
    }
}
