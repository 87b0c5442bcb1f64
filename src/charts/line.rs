use eframe::egui::{pos2, vec2, Color32, Pos2, Stroke};

use super::{axis_style, day_extent, linear_axis, temperature_extent, time_axis};
use crate::color::{ORANGE, STEELBLUE};
use crate::config::ChartLayout;
use crate::data::model::{DataSet, Record};
use crate::scale::{LinearScale, TimeScale};
use crate::scene::{
    Anchor, AxisSlot, Binding, Curve, Geometry, Label, LegendKind, Orient, Role, Scene, Style,
};
use crate::tooltip::Tooltip;

const CURVE_WIDTH: f32 = 1.5;
const DOT_RADIUS: f32 = 5.0;

impl Curve {
    fn color(self) -> Color32 {
        match self {
            Curve::TempMax => STEELBLUE,
            Curve::TempMin => ORANGE,
        }
    }

    fn value(self, record: &Record) -> f64 {
        match self {
            Curve::TempMax => record.temp_max,
            Curve::TempMin => record.temp_min,
        }
    }
}

/// Tooltip text for one day of the line graph.
pub fn tooltip_lines(record: &Record) -> Vec<String> {
    vec![
        format!("Date: {}", record.date.format("%a %b %d %Y")),
        format!("Max Temperature: {}°F", record.temp_max),
        format!("Min Temperature: {}°F", record.temp_min),
    ]
}

/// Daily max/min temperature curves over the full date range.
pub struct LineChart {
    scene: Scene,
    x: TimeScale,
    y: LinearScale,
    tooltip: Tooltip,
}

impl LineChart {
    pub fn new(dataset: &DataSet, layout: &ChartLayout) -> Self {
        let plot = layout.plot_rect();
        let x = TimeScale::new(day_extent(dataset), (plot.left(), plot.right()));
        let y = LinearScale::new(temperature_extent(dataset), (plot.bottom(), plot.top()));

        let mut chart = LineChart {
            scene: Scene::new(layout.width, layout.height),
            x,
            y,
            tooltip: Tooltip::new(vec2(10.0, -20.0)),
        };
        chart.redraw_curves(dataset.records());

        let scene = &mut chart.scene;
        scene.add(Role::Axis(AxisSlot::X), time_axis(&x, Orient::Bottom, plot.bottom()), axis_style());
        scene.add(Role::Axis(AxisSlot::Y), linear_axis(&y, Orient::Left, plot.left()), axis_style());
        scene.add(
            Role::AxisTitle(AxisSlot::X),
            Geometry::Text(
                Label::new(pos2(plot.center().x, plot.bottom() + layout.margin.top + 25.0), "Date")
                    .anchor(Anchor::Middle),
            ),
            Style::default(),
        );
        scene.add(
            Role::AxisTitle(AxisSlot::Y),
            Geometry::Text(
                Label::new(pos2(20.0, plot.center().y), "Temperature (°F)")
                    .anchor(Anchor::Middle)
                    .vertical(),
            ),
            Style::default(),
        );

        // invisible hover targets at the daily midpoint
        for record in dataset.records() {
            scene.add_bound(
                Role::DataPoint,
                Binding::Day(record.key()),
                Geometry::Circle {
                    center: pos2(x.map(record.key()), y.map(record.mean_temp())),
                    radius: DOT_RADIUS,
                },
                Style {
                    fill: Some(Color32::WHITE),
                    fill_opacity: 0.0,
                    ..Style::default()
                },
            );
        }

        let origin = pos2(plot.right() - layout.margin.right, plot.top() + layout.margin.top);
        for (row, curve, text) in [
            (0.0, Curve::TempMax, "Max Temperature"),
            (20.0, Curve::TempMin, "Min Temperature"),
        ] {
            let y_line = origin.y + 5.0 + row;
            scene.add(
                Role::Legend(LegendKind::Series),
                Geometry::Path(vec![pos2(origin.x, y_line), pos2(origin.x + 30.0, y_line)]),
                Style::stroked(curve.color(), CURVE_WIDTH),
            );
            scene.add(
                Role::Legend(LegendKind::Series),
                Geometry::Text(Label::new(pos2(origin.x + 35.0, y_line + 4.0), text)),
                Style::default(),
            );
        }

        chart
    }

    /// Drop both temperature curves and draw them again through `records`.
    ///
    /// The scales stay as built from the full dataset, so a filtered redraw
    /// lines up with the unfiltered one.
    pub fn redraw_curves<'a>(&mut self, records: impl IntoIterator<Item = &'a Record>) {
        let records: Vec<&Record> = records.into_iter().collect();
        for curve in [Curve::TempMax, Curve::TempMin] {
            self.scene.remove_role(Role::Curve(curve));
            let points = records
                .iter()
                .map(|r| pos2(self.x.map(r.key()), self.y.map(curve.value(r))))
                .collect();
            self.scene.add(
                Role::Curve(curve),
                Geometry::Path(points),
                Style {
                    stroke: Some(Stroke::new(CURVE_WIDTH, curve.color())),
                    ..Style::default()
                },
            );
        }
    }

    /// Vertices of one curve as currently drawn.
    pub fn curve(&self, curve: Curve) -> Option<&[Pos2]> {
        self.scene
            .select(Role::Curve(curve))
            .find_map(|shape| match &shape.geometry {
                Geometry::Path(points) => Some(points.as_slice()),
                _ => None,
            })
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

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn x_scale(&self) -> &TimeScale {
        &self.x
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

    fn three_days() -> DataSet {
        dataset(vec![
            weather("2022-01-01", 30.0, 30.0, 50.0, 40.0),
            weather("2022-01-02", 30.1, 35.0, 60.0, 45.0),
            weather("2022-01-03", 30.2, 40.0, 55.0, 42.0),
        ])
    }

    #[test]
    fn full_dataset_curves_pass_through_every_day() {
        let ds = three_days();
        let chart = LineChart::new(&ds, &AppConfig::default().line);
        let (x, y) = (chart.x_scale(), chart.y_scale());

        let expected_max: Vec<Pos2> = ds
            .records()
            .iter()
            .map(|r| pos2(x.map(r.key()), y.map(r.temp_max)))
            .collect();
        assert_eq!(chart.curve(Curve::TempMax).unwrap(), expected_max.as_slice());

        let min_ys: Vec<f64> = chart
            .curve(Curve::TempMin)
            .unwrap()
            .iter()
            .map(|p| y.invert(p.y))
            .collect();
        for (got, want) in min_ys.iter().zip([40.0, 45.0, 42.0]) {
            assert!((got - want).abs() < 1e-3, "{got} vs {want}");
        }
        assert_eq!(y.domain(), (40.0, 60.0));
    }

    #[test]
    fn redraw_keeps_scales_and_replaces_curves() {
        let ds = three_days();
        let mut chart = LineChart::new(&ds, &AppConfig::default().line);
        let scales = (*chart.x_scale(), *chart.y_scale());

        chart.redraw_curves(ds.records().iter().skip(1).take(1));
        assert_eq!(chart.scene().select(Role::Curve(Curve::TempMax)).count(), 1);
        assert_eq!(chart.curve(Curve::TempMax).unwrap().len(), 1);
        assert_eq!(chart.curve(Curve::TempMin).unwrap().len(), 1);
        assert_eq!((*chart.x_scale(), *chart.y_scale()), scales);

        chart.redraw_curves(std::iter::empty());
        assert!(chart.curve(Curve::TempMax).unwrap().is_empty());
    }

    #[test]
    fn tooltip_uses_calendar_date() {
        let r = weather("2020-01-01", 30.0, 30.0, 50.0, 40.5);
        assert_eq!(
            tooltip_lines(&r),
            vec![
                "Date: Wed Jan 01 2020".to_string(),
                "Max Temperature: 50°F".to_string(),
                "Min Temperature: 40.5°F".to_string(),
            ]
        );
    }

    #[test]
    fn hover_dots_are_invisible() {
        let ds = three_days();
        let chart = LineChart::new(&ds, &AppConfig::default().line);
        let dots: Vec<_> = chart.scene().select(Role::DataPoint).collect();
        assert_eq!(dots.len(), 3);
        assert!(dots.iter().all(|d| d.style.fill_opacity == 0.0));
    }
}
