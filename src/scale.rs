//! Data → pixel scales used by every chart.

use chrono::{Datelike, Months, NaiveDate};

use crate::data::model::DayKey;

/// `[min, max]` of a sequence, ignoring NaN. `None` when nothing finite remains.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

// ---------------------------------------------------------------------------
// Linear
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// A degenerate domain maps everything to the middle of the range.
    pub fn map(&self, value: f64) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let d = d1 - d0;
        let t = if d.abs() < 1e-12 { 0.5 } else { (value - d0) / d };
        r0 + (t as f32) * (r1 - r0)
    }

    pub fn invert(&self, px: f32) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let r = r1 - r0;
        if r.abs() < 1e-6 {
            return d0;
        }
        let t = f64::from((px - r0) / r);
        // exact at both ends of the range
        d0 * (1.0 - t) + d1 * t
    }

    /// Round tick values (1, 2 or 5 × 10ⁿ steps), roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        if lo == hi {
            return vec![lo];
        }
        let step = tick_step(lo, hi, count);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }

    /// Ticks paired with labels carrying just enough decimals for the step.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let (lo, hi) = ordered(self.domain);
        let decimals = if lo == hi {
            0
        } else {
            let step = tick_step(lo, hi, count);
            // nudge so 0.1 is not read as 0.0999…
            (-(step.log10() + 1e-9).floor()).max(0.0) as usize
        };
        self.ticks(count)
            .into_iter()
            .map(|v| (v, format!("{v:.decimals$}")))
            .collect()
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count.max(1) as f64;
    let mut step = 10f64.powf(raw.log10().floor());
    let error = raw / step;
    if error >= 50f64.sqrt() {
        step *= 10.0;
    } else if error >= 10f64.sqrt() {
        step *= 5.0;
    } else if error >= 2f64.sqrt() {
        step *= 2.0;
    }
    step
}

// ---------------------------------------------------------------------------
// Time (calendar days)
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (DayKey, DayKey), range: (f32, f32)) -> Self {
        let domain = (f64::from(domain.0.days()), f64::from(domain.1.days()));
        Self {
            inner: LinearScale::new(domain, range),
        }
    }

    pub fn range(&self) -> (f32, f32) {
        self.inner.range()
    }

    pub fn map(&self, key: DayKey) -> f32 {
        self.inner.map(f64::from(key.days()))
    }

    /// Fractional day number under a pixel.
    pub fn invert(&self, px: f32) -> f64 {
        self.inner.invert(px)
    }

    /// Month-start ticks: year on January, month name otherwise.
    pub fn ticks(&self, max_count: usize) -> Vec<(f32, String)> {
        let (lo, hi) = ordered(self.inner.domain());
        let (Some(start), Some(end)) = (day_to_date(lo.ceil()), day_to_date(hi.floor())) else {
            return Vec::new();
        };

        let span_months =
            (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32 + 1;
        let step = [1u32, 2, 3, 6, 12]
            .into_iter()
            .find(|&s| span_months as usize / s as usize <= max_count.max(1))
            .unwrap_or(12);

        let mut out = Vec::new();
        let mut month = NaiveDate::from_ymd_opt(start.year(), start.month(), 1);
        while let Some(date) = month {
            if date > end {
                break;
            }
            if date >= start && (date.month0() % step) == 0 {
                let label = if date.month() == 1 {
                    date.format("%Y").to_string()
                } else {
                    date.format("%B").to_string()
                };
                out.push((self.map(DayKey::from_date(date)), label));
            }
            month = date.checked_add_months(Months::new(1));
        }
        out
    }
}

fn day_to_date(day: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(day as i32)
}

// ---------------------------------------------------------------------------
// Band (categorical)
// ---------------------------------------------------------------------------

/// Evenly spaced bands with the same inner and outer padding fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f32,
    step: f32,
    band_width: f32,
}

impl BandScale {
    pub fn new(count: usize, range: (f32, f32), padding: f32) -> Self {
        if count == 0 {
            return Self {
                count: 0,
                start: range.0,
                step: 0.0,
                band_width: 0.0,
            };
        }
        let span = (range.1 - range.0).max(0.0);
        let step = span / (count as f32 + padding).max(1e-6);
        Self {
            count,
            start: range.0 + step * padding,
            step,
            band_width: step * (1.0 - padding).max(0.0),
        }
    }

    pub fn band_width(&self) -> f32 {
        self.band_width
    }

    pub fn band_start(&self, idx: usize) -> Option<f32> {
        if idx >= self.count {
            return None;
        }
        Some(self.start + self.step * idx as f32)
    }

    pub fn center(&self, idx: usize) -> Option<f32> {
        self.band_start(idx).map(|x| x + self.band_width * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(y: i32, m: u32, d: u32) -> DayKey {
        DayKey::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn extent_skips_nan() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(extent(Vec::<f64>::new()), None);
    }

    #[test]
    fn linear_map_and_invert() {
        let s = LinearScale::new((30.0, 70.0), (350.0, 50.0));
        assert_eq!(s.map(30.0), 350.0);
        assert_eq!(s.map(70.0), 50.0);
        assert_eq!(s.map(50.0), 200.0);
        assert!((s.invert(200.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_maps_to_middle() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.map(5.0), 50.0);
        assert_eq!(s.ticks(10), vec![5.0]);
    }

    #[test]
    fn ticks_are_round() {
        let s = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        assert_eq!(s.ticks(5).len(), 6);

        let s = LinearScale::new((29.71, 30.52), (0.0, 100.0));
        let labels = s.tick_labels(10);
        assert_eq!(labels.first().map(|(_, l)| l.as_str()), Some("29.8"));
        assert_eq!(labels.last().map(|(_, l)| l.as_str()), Some("30.5"));
    }

    #[test]
    fn time_scale_month_ticks() {
        let s = TimeScale::new((key(2020, 1, 1), key(2020, 12, 31)), (0.0, 1000.0));
        assert_eq!(s.map(key(2020, 1, 1)), 0.0);
        assert_eq!(s.map(key(2020, 12, 31)), 1000.0);

        let ticks = s.ticks(12);
        assert_eq!(ticks.len(), 12);
        assert_eq!(ticks[0].1, "2020");
        assert_eq!(ticks[1].1, "February");

        let multi_year = TimeScale::new((key(2020, 1, 1), key(2022, 12, 31)), (0.0, 1000.0));
        let ticks = multi_year.ticks(10);
        assert!(ticks.len() <= 12);
        assert!(ticks.iter().any(|(_, l)| l == "2021"));
    }

    #[test]
    fn band_scale_bounds_indices() {
        let b = BandScale::new(3, (0.0, 300.0), 0.1);
        assert!(b.band_start(2).is_some());
        assert!(b.band_start(3).is_none());
        let last_end = b.band_start(2).unwrap() + b.band_width();
        assert!((300.0 - last_end - b.band_start(0).unwrap()).abs() < 1e-3);
    }
}
