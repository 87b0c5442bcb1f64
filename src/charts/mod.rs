/// Chart views: each turns the [`DataSet`] into a [`Scene`](crate::scene::Scene).
///
/// ```text
///   DataSet ──┬── bar      monthly precipitation totals
///             ├── scatter  pressure vs AxisChoice, brushable
///             ├── line     daily max/min temperature curves
///             └── paired   dewpoint + temperature, hover-linked
/// ```
///
/// Charts own their scales and know how to restyle their own shapes; the
/// cross-chart wiring lives in [`crate::link`].
use chrono::NaiveDate;
use eframe::egui::Stroke;

use crate::color::AXIS_GRAY;
use crate::data::model::{DataSet, DayKey, Field};
use crate::scale::{BandScale, LinearScale, TimeScale};
use crate::scene::{Geometry, Orient, Style, Tick};

pub mod bar;
pub mod line;
pub mod paired;
pub mod scatter;

/// Tick count requested from linear scales.
const LINEAR_TICKS: usize = 10;
/// Upper bound on month ticks along a time axis.
const TIME_TICKS: usize = 12;

pub(crate) fn axis_style() -> Style {
    Style {
        stroke: Some(Stroke::new(1.0, AXIS_GRAY)),
        ..Style::default()
    }
}

fn ordered_span((a, b): (f32, f32)) -> (f32, f32) {
    (a.min(b), a.max(b))
}

pub(crate) fn linear_axis(scale: &LinearScale, orient: Orient, offset: f32) -> Geometry {
    let ticks = scale
        .tick_labels(LINEAR_TICKS)
        .into_iter()
        .map(|(v, label)| Tick {
            pos: scale.map(v),
            label,
        })
        .collect();
    Geometry::Axis {
        orient,
        offset,
        span: ordered_span(scale.range()),
        ticks,
    }
}

pub(crate) fn time_axis(scale: &TimeScale, orient: Orient, offset: f32) -> Geometry {
    let ticks = scale
        .ticks(TIME_TICKS)
        .into_iter()
        .map(|(pos, label)| Tick { pos, label })
        .collect();
    Geometry::Axis {
        orient,
        offset,
        span: ordered_span(scale.range()),
        ticks,
    }
}

pub(crate) fn band_axis(scale: &BandScale, labels: &[String], span: (f32, f32), offset: f32) -> Geometry {
    let ticks = labels
        .iter()
        .enumerate()
        .filter_map(|(i, label)| {
            scale.center(i).map(|pos| Tick {
                pos,
                label: label.clone(),
            })
        })
        .collect();
    Geometry::Axis {
        orient: Orient::Bottom,
        offset,
        span,
        ticks,
    }
}

/// `[min, max]` of a field, `(0, 1)` if the field has no finite values.
pub(crate) fn field_extent(dataset: &DataSet, field: Field) -> (f64, f64) {
    dataset.extent(field).unwrap_or((0.0, 1.0))
}

/// `[min TempMin, max TempMax]`, the shared temperature domain.
pub(crate) fn temperature_extent(dataset: &DataSet) -> (f64, f64) {
    let (lo, _) = field_extent(dataset, Field::TempMin);
    let (_, hi) = field_extent(dataset, Field::TempMax);
    (lo, hi)
}

pub(crate) fn day_extent(dataset: &DataSet) -> (DayKey, DayKey) {
    dataset.date_extent().unwrap_or_else(|| {
        let epoch = DayKey::from_date(NaiveDate::default());
        (epoch, epoch)
    })
}
