use eframe::egui::{pos2, vec2, Color32, Rect, Stroke};

use super::{axis_style, field_extent, linear_axis};
use crate::color::SequentialScale;
use crate::config::ChartLayout;
use crate::data::filter::DataRect;
use crate::data::model::{DataSet, Field, Record};
use crate::scale::LinearScale;
use crate::scene::{
    Anchor, AxisSlot, Binding, Geometry, Label, LegendKind, Orient, Role, Scene, Shape, Style,
};

/// The scatterplot always plots pressure horizontally.
pub const X_FIELD: Field = Field::Pressure;

const RADIUS_RANGE: (f32, f32) = (3.0, 20.0);
const POINT_OPACITY: f32 = 0.8;
const DIMMED_FILL_OPACITY: f32 = 0.2;
const FOCUS_STROKE_WIDTH: f32 = 3.0;
/// Precipitation values drawn in the size legend.
const SIZE_LEGEND_VALUES: [f64; 3] = [1.0, 3.0, 5.0];

/// Which field the dropdown puts on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisChoice {
    #[default]
    Dewpoint,
    Visibility,
}

impl AxisChoice {
    pub const ALL: [AxisChoice; 2] = [AxisChoice::Dewpoint, AxisChoice::Visibility];

    pub fn field(self) -> Field {
        match self {
            AxisChoice::Dewpoint => Field::Dewpoint,
            AxisChoice::Visibility => Field::Visibility,
        }
    }

    /// Dropdown option text.
    pub fn label(self) -> &'static str {
        match self {
            AxisChoice::Dewpoint => "Pressure vs Dewpoint",
            AxisChoice::Visibility => "Pressure vs Visibility",
        }
    }
}

// ---------------------------------------------------------------------------
// Point restyling used by the hover links
// ---------------------------------------------------------------------------

/// Hovered point: black outline, full fill.
pub fn mark_focused(shape: &mut Shape) {
    shape.style.stroke = Some(Stroke::new(FOCUS_STROKE_WIDTH, Color32::BLACK));
    shape.style.fill_opacity = 1.0;
}

/// Every other point while one is hovered.
pub fn mark_dimmed(shape: &mut Shape) {
    shape.style.stroke = None;
    shape.style.fill_opacity = DIMMED_FILL_OPACITY;
}

pub fn mark_default(shape: &mut Shape) {
    shape.style.stroke = None;
    shape.style.fill_opacity = 1.0;
}

/// Outline only, leaving opacity alone (linked from the line graph).
pub fn mark_outlined(shape: &mut Shape) {
    shape.style.stroke = Some(Stroke::new(FOCUS_STROKE_WIDTH, Color32::BLACK));
}

// ---------------------------------------------------------------------------
// Scatterplot
// ---------------------------------------------------------------------------

pub struct ScatterChart {
    scene: Scene,
    layout: ChartLayout,
    axis: AxisChoice,
    x: LinearScale,
    y: LinearScale,
    radius: LinearScale,
    color: SequentialScale,
    /// Current brush rectangle in chart pixels.
    selection: Option<Rect>,
}

impl ScatterChart {
    pub fn new(dataset: &DataSet, layout: &ChartLayout, axis: AxisChoice) -> Self {
        let plot = layout.plot_rect();
        let x = LinearScale::new(field_extent(dataset, X_FIELD), (plot.left(), plot.right()));
        let y = LinearScale::new(field_extent(dataset, axis.field()), (plot.bottom(), plot.top()));
        let radius = LinearScale::new(field_extent(dataset, Field::Precipitation), RADIUS_RANGE);
        let color = SequentialScale::new(field_extent(dataset, Field::TempDiff));

        let mut chart = ScatterChart {
            scene: Scene::new(layout.width, layout.height),
            layout: *layout,
            axis,
            x,
            y,
            radius,
            color,
            selection: None,
        };

        for record in dataset.records() {
            let center = pos2(chart.x.map(record.value(X_FIELD)), chart.point_y(record));
            chart.scene.add_bound(
                Role::DataPoint,
                Binding::Day(record.key()),
                Geometry::Circle {
                    center,
                    radius: chart.radius.map(record.precipitation),
                },
                Style {
                    fill: Some(chart.color.color_for(record.temp_diff())),
                    opacity: POINT_OPACITY,
                    ..Style::default()
                },
            );
        }

        chart.add_size_legend();
        chart.add_axes();
        chart.add_color_legend();
        chart
    }

    fn add_axes(&mut self) {
        let layout = self.layout;
        let plot = layout.plot_rect();
        self.scene.add(Role::Axis(AxisSlot::X), linear_axis(&self.x, Orient::Bottom, plot.bottom()), axis_style());
        self.scene.add(
            Role::AxisTitle(AxisSlot::X),
            Geometry::Text(
                Label::new(pos2(layout.width / 2.0, layout.height - 5.0), X_FIELD.label()).anchor(Anchor::Middle),
            ),
            Style::default(),
        );
        self.scene.add(Role::Axis(AxisSlot::Y), linear_axis(&self.y, Orient::Left, plot.left()), axis_style());
        self.scene.add(
            Role::AxisTitle(AxisSlot::Y),
            Geometry::Text(
                Label::new(pos2(layout.margin.left - 40.0, layout.height / 2.0), self.axis.field().label())
                    .anchor(Anchor::Middle)
                    .vertical(),
            ),
            Style::default(),
        );
    }

    fn add_size_legend(&mut self) {
        let role = Role::Legend(LegendKind::Size);
        let origin = pos2(
            self.layout.width - self.layout.margin.right - 70.0,
            self.layout.height - self.layout.margin.bottom - 10.0,
        );

        self.scene.add(
            role,
            Geometry::Text(Label::new(origin + vec2(5.0, -130.0), "Precipitation").size(10.0).bold()),
            Style::default(),
        );
        for (i, value) in SIZE_LEGEND_VALUES.iter().enumerate() {
            let step = i as f32 * 40.0;
            self.scene.add(
                role,
                Geometry::Circle {
                    center: origin + vec2(30.0, -15.0 - step),
                    radius: self.radius.map(*value),
                },
                Style::stroked(Color32::BLACK, 1.0),
            );
            self.scene.add(
                role,
                Geometry::Text(Label::new(origin + vec2(65.0, -10.0 - step), format!(" {value:.1}"))),
                Style::default(),
            );
        }
    }

    fn add_color_legend(&mut self) {
        let role = Role::Legend(LegendKind::Color);
        let origin = pos2(self.layout.width - 100.0, 20.0);

        self.scene.add(
            role,
            Geometry::Gradient {
                rect: Rect::from_min_size(origin, vec2(20.0, 100.0)),
                stops: SequentialScale::legend_stops(11),
            },
            Style::default(),
        );
        self.scene.add(
            role,
            Geometry::Text(Label::new(origin + vec2(-160.0, -10.0), "Difference in Max and Min Temperatures").bold()),
            Style::default(),
        );
        self.scene.add(
            role,
            Geometry::Text(Label::new(origin + vec2(30.0, 10.0), "Low").size(10.0)),
            Style::default(),
        );
        self.scene.add(
            role,
            Geometry::Text(Label::new(origin + vec2(30.0, 95.0), "High").size(10.0)),
            Style::default(),
        );
    }

    /// Rebind the vertical axis to `choice`.
    ///
    /// The y domain is recomputed over the whole dataset, every point moves and
    /// is recoloured from `temp_diff`, the y axis and title are redrawn, and the
    /// size legend is rebuilt.
    pub fn set_axis(&mut self, dataset: &DataSet, choice: AxisChoice) {
        self.axis = choice;
        self.y.set_domain(field_extent(dataset, choice.field()));

        let (y, color) = (self.y, self.color);
        for shape in self.scene.select_mut(Role::DataPoint) {
            let Some(record) = shape.day().and_then(|key| dataset.get(key)) else {
                continue;
            };
            shape.set_center_y(y.map(record.value(choice.field())));
            shape.style.fill = Some(color.color_for(record.temp_diff()));
            shape.style.stroke = None;
        }

        let plot = self.layout.plot_rect();
        self.scene.remove_role(Role::Axis(AxisSlot::Y));
        self.scene.add(Role::Axis(AxisSlot::Y), linear_axis(&self.y, Orient::Left, plot.left()), axis_style());
        for title in self.scene.select_mut(Role::AxisTitle(AxisSlot::Y)) {
            if let Geometry::Text(label) = &mut title.geometry {
                label.text = choice.field().label().to_string();
            }
        }

        self.scene.remove_role(Role::Legend(LegendKind::Size));
        self.add_size_legend();
    }

    /// Convert a pixel brush into a data rectangle.
    ///
    /// The brush is clipped to the plot area; a brush with no width or no
    /// height (a plain click) yields `None`.
    pub fn brush_to_data(&self, brush: Rect) -> Option<DataRect> {
        let clipped = brush.intersect(self.brush_extent());
        if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
            return None;
        }
        Some(DataRect::from_corners(
            self.x.invert(clipped.left()),
            self.y.invert(clipped.top()),
            self.x.invert(clipped.right()),
            self.y.invert(clipped.bottom()),
        ))
    }

    pub fn brush_extent(&self) -> Rect {
        self.layout.plot_rect()
    }

    pub fn set_selection(&mut self, selection: Option<Rect>) {
        self.selection = selection.map(|r| r.intersect(self.brush_extent()));
    }

    pub fn selection(&self) -> Option<Rect> {
        self.selection
    }

    pub fn point_y(&self, record: &Record) -> f32 {
        self.y.map(record.value(self.axis.field()))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub(crate) fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn axis(&self) -> AxisChoice {
        self.axis
    }

    pub fn x_field(&self) -> Field {
        X_FIELD
    }

    pub fn y_field(&self) -> Field {
        self.axis.field()
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::data::model::fixtures::*;

    fn chart(ds: &DataSet) -> ScatterChart {
        ScatterChart::new(ds, &AppConfig::default().scatter, AxisChoice::Dewpoint)
    }

    #[test]
    fn points_follow_scales() {
        let ds = five_days();
        let chart = chart(&ds);
        let plot = AppConfig::default().scatter.plot_rect();
        let points: Vec<_> = chart.scene().select(Role::DataPoint).collect();
        assert_eq!(points.len(), 5);

        let first = points[0].center().unwrap();
        assert_eq!(first, pos2(plot.left(), plot.bottom()));
        let last = points[4].center().unwrap();
        assert_eq!(last, pos2(plot.right(), plot.top()));
        assert_eq!(points[0].style.opacity, POINT_OPACITY);
        // 2021-03-05 has the smallest precipitation in the fixture
        assert_eq!(points[4].radius(), Some(RADIUS_RANGE.0));
    }

    #[test]
    fn click_brush_is_empty() {
        let ds = five_days();
        let chart = chart(&ds);
        let click = Rect::from_min_max(pos2(100.0, 100.0), pos2(100.0, 100.0));
        assert!(chart.brush_to_data(click).is_none());
        let outside = Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0));
        assert!(chart.brush_to_data(outside).is_none());
    }

    #[test]
    fn brush_inverts_through_scales() {
        let ds = five_days();
        let chart = chart(&ds);
        let whole = chart.brush_extent();
        let rect = chart.brush_to_data(whole).unwrap();
        assert!((rect.x_min - 29.8).abs() < 1e-6);
        assert!((rect.x_max - 30.5).abs() < 1e-6);
        assert!((rect.y_min - 30.0).abs() < 1e-6);
        assert!((rect.y_max - 60.0).abs() < 1e-6);
    }

    #[test]
    fn size_legend_has_three_circles_and_labels() {
        let ds = five_days();
        let chart = chart(&ds);
        let legend: Vec<_> = chart.scene().select(Role::Legend(LegendKind::Size)).collect();
        assert_eq!(legend.iter().filter(|s| s.radius().is_some()).count(), 3);
        let labels: Vec<_> = legend
            .iter()
            .filter_map(|s| match &s.geometry {
                Geometry::Text(l) => Some(l.text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Precipitation", " 1.0", " 3.0", " 5.0"]);
    }

    #[test]
    fn axis_choice_maps_to_field() {
        assert_eq!(AxisChoice::default(), AxisChoice::Dewpoint);
        assert_eq!(AxisChoice::Visibility.field(), Field::Visibility);
        assert_eq!(AxisChoice::Dewpoint.label(), "Pressure vs Dewpoint");
    }
}
