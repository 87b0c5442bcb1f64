use eframe::egui::{pos2, vec2, Pos2, Rect};

use super::{axis_style, band_axis, linear_axis};
use crate::color::{ORANGE, STEELBLUE};
use crate::config::ChartLayout;
use crate::data::model::DataSet;
use crate::scale::{BandScale, LinearScale};
use crate::scene::{Anchor, AxisSlot, Binding, Geometry, Label, LegendKind, Orient, Role, Scene, Style};
use crate::tooltip::Tooltip;

const BAND_PADDING: f32 = 0.1;

/// Total precipitation for one month name.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    pub month: String,
    pub total: f64,
}

/// Sum precipitation per month name, in first-appearance order.
///
/// Months from different years share a bucket ("January" collects every
/// January in the table).
pub fn monthly_precipitation(dataset: &DataSet) -> Vec<MonthTotal> {
    let mut totals: Vec<MonthTotal> = Vec::new();
    for record in dataset.records() {
        let month = record.date.format("%B").to_string();
        match totals.iter_mut().find(|m| m.month == month) {
            Some(entry) => entry.total += record.precipitation,
            None => totals.push(MonthTotal {
                month,
                total: record.precipitation,
            }),
        }
    }
    totals
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

pub struct BarChart {
    scene: Scene,
    months: Vec<MonthTotal>,
    tooltip: Tooltip,
}

impl BarChart {
    pub fn new(dataset: &DataSet, layout: &ChartLayout) -> Self {
        let months = monthly_precipitation(dataset);
        let plot = layout.plot_rect();
        let mut scene = Scene::new(layout.width, layout.height);

        let x = BandScale::new(months.len(), (plot.left(), plot.right()), BAND_PADDING);
        let max_total = months.iter().map(|m| m.total).fold(0.0, f64::max);
        let y = LinearScale::new((0.0, max_total), (plot.bottom(), plot.top()));

        for (i, m) in months.iter().enumerate() {
            let Some(left) = x.band_start(i) else {
                continue;
            };
            let rect = Rect::from_min_max(
                pos2(left, y.map(m.total)),
                pos2(left + x.band_width(), plot.bottom()),
            );
            scene.add_bound(Role::Bar, Binding::Band(i), Geometry::Rect(rect), Style::filled(STEELBLUE));
        }

        let labels: Vec<String> = months.iter().map(|m| m.month.clone()).collect();
        scene.add(
            Role::Axis(AxisSlot::X),
            band_axis(&x, &labels, (plot.left(), plot.right()), plot.bottom()),
            axis_style(),
        );
        scene.add(
            Role::AxisTitle(AxisSlot::X),
            Geometry::Text(Label::new(pos2(layout.width / 2.0, layout.height - 5.0), "Month").anchor(Anchor::Middle)),
            Style::default(),
        );
        scene.add(Role::Axis(AxisSlot::Y), linear_axis(&y, Orient::Left, plot.left()), axis_style());
        scene.add(
            Role::AxisTitle(AxisSlot::Y),
            Geometry::Text(
                Label::new(pos2(layout.margin.left - 40.0, layout.height / 2.0), "Total Precipitation")
                    .anchor(Anchor::Middle)
                    .vertical(),
            ),
            Style::default(),
        );

        let origin = pos2(layout.width - layout.margin.right, layout.margin.top);
        scene.add(
            Role::Legend(LegendKind::Series),
            Geometry::Rect(Rect::from_min_size(origin + vec2(0.0, -10.0), vec2(18.0, 18.0))),
            Style::filled(STEELBLUE),
        );
        scene.add(
            Role::Legend(LegendKind::Series),
            Geometry::Text(Label::new(origin + vec2(-80.0, -30.0), "Monthly Precipitation").bold()),
            Style::default(),
        );

        BarChart {
            scene,
            months,
            tooltip: Tooltip::new(vec2(0.0, -28.0)),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Turn the hovered bar orange and describe its month.
    pub fn hover(&mut self, band: usize, at: Pos2) -> Option<&MonthTotal> {
        let month = self.months.get(band)?;
        if let Some(bar) = self.scene.find_bound_mut(Role::Bar, Binding::Band(band)) {
            bar.style.fill = Some(ORANGE);
        }
        self.tooltip.show(
            vec![
                format!("Month: {}", month.month),
                format!("Total Precipitation: {:.2}", month.total),
            ],
            at,
        );
        Some(month)
    }

    pub fn unhover(&mut self) {
        for bar in self.scene.select_mut(Role::Bar) {
            bar.style.fill = Some(STEELBLUE);
        }
        self.tooltip.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::data::model::fixtures::*;
    use crate::data::model::Record;

    fn rainy(date: &str, precipitation: f64) -> Record {
        Record {
            precipitation,
            ..record(date)
        }
    }

    #[test]
    fn months_are_summed_across_years_in_first_seen_order() {
        let ds = dataset(vec![
            rainy("2020-11-03", 1.0),
            rainy("2020-12-01", 0.5),
            rainy("2021-11-20", 2.25),
        ]);
        let months = monthly_precipitation(&ds);
        assert_eq!(
            months,
            vec![
                MonthTotal { month: "November".into(), total: 3.25 },
                MonthTotal { month: "December".into(), total: 0.5 },
            ]
        );
    }

    #[test]
    fn tallest_bar_reaches_top_of_plot() {
        let ds = dataset(vec![rainy("2020-01-01", 2.0), rainy("2020-02-01", 4.0)]);
        let layout = AppConfig::default().bar;
        let chart = BarChart::new(&ds, &layout);
        let bars: Vec<_> = chart.scene().select(Role::Bar).collect();
        assert_eq!(bars.len(), 2);
        let Geometry::Rect(tall) = bars[1].geometry else {
            panic!("bar is not a rect");
        };
        assert_eq!(tall.top(), layout.plot_rect().top());
        assert_eq!(tall.bottom(), layout.plot_rect().bottom());
    }

    #[test]
    fn hover_highlights_and_unhover_restores() {
        let ds = dataset(vec![rainy("2020-01-01", 1.234), rainy("2020-02-01", 4.0)]);
        let mut chart = BarChart::new(&ds, &AppConfig::default().bar);
        let before = chart.scene().fingerprint();

        let month = chart.hover(0, pos2(10.0, 50.0)).cloned().unwrap();
        assert_eq!(month.month, "January");
        let bar = chart.scene().find_bound(Role::Bar, Binding::Band(0)).unwrap();
        assert_eq!(bar.style.fill, Some(ORANGE));
        assert_eq!(chart.tooltip().lines()[1], "Total Precipitation: 1.23");
        assert_eq!(chart.tooltip().position(), pos2(10.0, 22.0));

        chart.unhover();
        assert!(!chart.tooltip().is_visible());
        assert_eq!(chart.scene().fingerprint(), before);
        assert!(chart.hover(7, Pos2::ZERO).is_none());
    }
}
