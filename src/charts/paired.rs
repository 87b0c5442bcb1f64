use eframe::egui::{pos2, vec2, Pos2};

use super::{axis_style, day_extent, field_extent, linear_axis, temperature_extent, time_axis};
use crate::color::{HIGHLIGHT_RED, STEELBLUE};
use crate::config::ChartLayout;
use crate::data::model::{DataSet, Field, Record};
use crate::scale::{LinearScale, TimeScale};
use crate::scene::{
    Anchor, AxisSlot, Binding, Geometry, Label, LegendKind, Orient, Role, Scene, Shape, Style,
};
use crate::tooltip::Tooltip;

const DOT_RADIUS: f32 = 3.0;
const HIGHLIGHT_RADIUS: f32 = 10.0;

/// Which of the two linked charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairedSide {
    Dewpoint,
    Temperature,
}

pub fn mark_highlighted(shape: &mut Shape) {
    shape.highlighted = true;
    shape.set_radius(HIGHLIGHT_RADIUS);
    shape.style.fill = Some(HIGHLIGHT_RED);
}

pub fn mark_default(shape: &mut Shape) {
    shape.highlighted = false;
    shape.set_radius(DOT_RADIUS);
    shape.style.fill = Some(STEELBLUE);
}

pub fn tooltip_lines(record: &Record) -> Vec<String> {
    vec![
        format!("Date: {}", record.date.format("%Y-%m-%d")),
        format!("Dewpoint: {}", record.dewpoint),
        format!("Min Temperature: {}", record.temp_min),
        format!("Max Temperature: {}", record.temp_max),
    ]
}

/// Dewpoint-over-time and temperature-over-time, sharing one time axis.
pub struct PairedCharts {
    dewpoint: Scene,
    temperature: Scene,
    tooltip: Tooltip,
}

impl PairedCharts {
    pub fn new(dataset: &DataSet, layout: &ChartLayout) -> Self {
        let plot = layout.plot_rect();
        let x = TimeScale::new(day_extent(dataset), (plot.left(), plot.right()));
        let (_, max_dewpoint) = field_extent(dataset, Field::Dewpoint);
        let y1 = LinearScale::new((0.0, max_dewpoint), (plot.bottom(), plot.top()));
        let y2 = LinearScale::new(temperature_extent(dataset), (plot.bottom(), plot.top()));

        let mut dewpoint = Scene::new(layout.width, layout.height);
        let mut temperature = Scene::new(layout.width, layout.height);
        add_dots(&mut dewpoint, dataset, |r| pos2(x.map(r.key()), y1.map(r.dewpoint)));
        add_dots(&mut temperature, dataset, |r| pos2(x.map(r.key()), y2.map(r.temp_max)));

        let date_title = pos2(plot.center().x, plot.bottom() + layout.margin.bottom - 10.0);
        for scene in [&mut dewpoint, &mut temperature] {
            scene.add(Role::Axis(AxisSlot::X), time_axis(&x, Orient::Bottom, plot.bottom()), axis_style());
            scene.add(
                Role::AxisTitle(AxisSlot::X),
                Geometry::Text(Label::new(date_title, "Date").anchor(Anchor::Middle)),
                Style::default(),
            );
        }

        dewpoint.add(Role::Axis(AxisSlot::Y), linear_axis(&y1, Orient::Left, plot.left()), axis_style());
        dewpoint.add(
            Role::AxisTitle(AxisSlot::Y),
            Geometry::Text(
                Label::new(pos2(plot.left() - 36.0, plot.center().y), "Dewpoint")
                    .anchor(Anchor::Middle)
                    .vertical(),
            ),
            Style::default(),
        );
        temperature.add(Role::Axis(AxisSlot::Y), linear_axis(&y2, Orient::Right, plot.right()), axis_style());
        temperature.add(
            Role::AxisTitle(AxisSlot::Y),
            Geometry::Text(
                Label::new(pos2(plot.right() - 20.0, plot.center().y), "Temperature")
                    .anchor(Anchor::Middle)
                    .vertical(),
            ),
            Style::default(),
        );

        let title_pos = pos2(plot.center().x, layout.margin.top / 2.0);
        for (scene, title) in [
            (&mut dewpoint, "Dewpoint over Time"),
            (&mut temperature, "Temperature Range over Time"),
        ] {
            scene.add(
                Role::Title,
                Geometry::Text(Label::new(title_pos, title).anchor(Anchor::Middle).size(16.0)),
                Style::default(),
            );
        }

        let legend = pos2(plot.right() - 100.0, plot.top() + 10.0);
        for (row, color, text) in [(0.0, STEELBLUE, "Data"), (20.0, HIGHLIGHT_RED, "Selected")] {
            let center = legend + vec2(0.0, row);
            dewpoint.add(
                Role::Legend(LegendKind::Series),
                Geometry::Circle { center, radius: 5.0 },
                Style::filled(color),
            );
            dewpoint.add(
                Role::Legend(LegendKind::Series),
                Geometry::Text(Label::new(center + vec2(10.0, 5.0), text)),
                Style::default(),
            );
        }

        PairedCharts {
            dewpoint,
            temperature,
            tooltip: Tooltip::new(vec2(10.0, -28.0)),
        }
    }

    pub fn chart(&self, side: PairedSide) -> &Scene {
        match side {
            PairedSide::Dewpoint => &self.dewpoint,
            PairedSide::Temperature => &self.temperature,
        }
    }

    /// Both scenes at once, for cross-chart restyling.
    pub(crate) fn scenes_mut(&mut self) -> [&mut Scene; 2] {
        [&mut self.dewpoint, &mut self.temperature]
    }

    pub fn show_tooltip(&mut self, record: &Record, at: Pos2) {
        self.tooltip.show(tooltip_lines(record), at);
    }

    pub fn hide_tooltip(&mut self) {
        self.tooltip.hide();
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }
}

fn add_dots(scene: &mut Scene, dataset: &DataSet, place: impl Fn(&Record) -> Pos2) {
    for record in dataset.records() {
        scene.add_bound(
            Role::DataPoint,
            Binding::Day(record.key()),
            Geometry::Circle {
                center: place(record),
                radius: DOT_RADIUS,
            },
            Style::filled(STEELBLUE),
        );
    }
}
