use crate::data::model::DayKey;
use crate::scene::{Role, Scene, Shape, ShapeId};

/// Shapes marked as matching a hovered day, per chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    pub charts: Vec<Vec<ShapeId>>,
}

impl HighlightSet {
    pub fn is_empty(&self) -> bool {
        self.charts.iter().all(Vec::is_empty)
    }

    /// Matched shapes in chart `i`.
    pub fn in_chart(&self, i: usize) -> &[ShapeId] {
        self.charts.get(i).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Split the data points of `scene` into those bound to `key` and the rest.
///
/// Every data point is restyled, matched or not; `key = None` sends all of
/// them through `unmatched`. Returns the ids of matched points.
pub fn repartition(
    scene: &mut Scene,
    key: Option<DayKey>,
    matched: impl Fn(&mut Shape),
    unmatched: impl Fn(&mut Shape),
) -> Vec<ShapeId> {
    let mut hits = Vec::new();
    for shape in scene.select_mut(Role::DataPoint) {
        if key.is_some() && shape.day() == key {
            hits.push(shape.id);
            matched(shape);
        } else {
            unmatched(shape);
        }
    }
    hits
}

/// [`repartition`] across several scenes with the same key.
pub fn repartition_all(
    scenes: &mut [&mut Scene],
    key: Option<DayKey>,
    matched: impl Fn(&mut Shape),
    unmatched: impl Fn(&mut Shape),
) -> HighlightSet {
    let charts = scenes
        .iter_mut()
        .map(|scene| repartition(scene, key, &matched, &unmatched))
        .collect();
    HighlightSet { charts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::paired::{mark_default, mark_highlighted, PairedCharts};
    use crate::config::AppConfig;
    use crate::data::model::fixtures::*;

    fn key(s: &str) -> DayKey {
        DayKey::from_date(day(s))
    }

    #[test]
    fn only_matching_days_highlight_across_charts() {
        // chart two lacks 2021-03-01
        let left = five_days();
        let right = dataset(left.records()[1..].to_vec());
        let layout = AppConfig::default().paired;
        let mut a = PairedCharts::new(&left, &layout);
        let mut b = PairedCharts::new(&right, &layout);

        let [a_scene, _] = a.scenes_mut();
        let [b_scene, _] = b.scenes_mut();
        let mut scenes = [a_scene, b_scene];

        let set = repartition_all(&mut scenes, Some(key("2021-03-02")), mark_highlighted, mark_default);
        assert_eq!(set.in_chart(0).len(), 1);
        assert_eq!(set.in_chart(1).len(), 1);

        let set = repartition_all(&mut scenes, Some(key("2021-03-01")), mark_highlighted, mark_default);
        assert_eq!(set.in_chart(0).len(), 1);
        assert!(set.in_chart(1).is_empty());
        assert_eq!(scenes[1].select(Role::DataPoint).filter(|s| s.highlighted).count(), 0);

        // distinct days never co-highlight
        assert_eq!(scenes[0].select(Role::DataPoint).filter(|s| s.highlighted).count(), 1);
    }

    #[test]
    fn none_clears_everything() {
        let ds = five_days();
        let mut charts = PairedCharts::new(&ds, &AppConfig::default().paired);
        let mut scenes = charts.scenes_mut();

        repartition_all(&mut scenes, Some(key("2021-03-04")), mark_highlighted, mark_default);
        let set = repartition_all(&mut scenes, None, mark_highlighted, mark_default);
        assert!(set.is_empty());
        for scene in scenes.iter() {
            assert!(scene.select(Role::DataPoint).all(|s| !s.highlighted));
        }
    }
}
