//! Retained drawing surface for one chart.
//!
//! A [`Scene`] is a flat, ordered list of styled shapes in chart-local pixel
//! coordinates. Charts add, restyle and remove shapes; the UI layer paints the
//! list each frame and hit-tests it for pointer events. Nothing here knows
//! about egui's painter.

use eframe::egui::{Color32, Pos2, Rect, Stroke, Vec2};

use crate::data::model::DayKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    TempMax,
    TempMin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSlot {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegendKind {
    Size,
    Color,
    Series,
}

/// What a shape is for; the unit of selection when restyling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// One per record; hover target.
    DataPoint,
    /// One per category; hover target.
    Bar,
    Curve(Curve),
    Axis(AxisSlot),
    AxisTitle(AxisSlot),
    Title,
    Legend(LegendKind),
}

/// The datum a shape is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Day(DayKey),
    Band(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub pos: f32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub pos: Pos2,
    pub text: String,
    pub anchor: Anchor,
    pub size: f32,
    pub bold: bool,
    /// Rotation in radians; `-FRAC_PI_2` for vertical axis titles.
    pub angle: f32,
}

impl Label {
    pub fn new(pos: Pos2, text: impl Into<String>) -> Self {
        Label {
            pos,
            text: text.into(),
            anchor: Anchor::Start,
            size: 12.0,
            bold: false,
            angle: 0.0,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.angle = -std::f32::consts::FRAC_PI_2;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Circle { center: Pos2, radius: f32 },
    Rect(Rect),
    Path(Vec<Pos2>),
    Text(Label),
    Axis {
        orient: Orient,
        /// y of a bottom axis, x of a left/right axis.
        offset: f32,
        span: (f32, f32),
        ticks: Vec<Tick>,
    },
    /// Vertical gradient, first stop at the top.
    Gradient { rect: Rect, stops: Vec<Color32> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<Color32>,
    pub fill_opacity: f32,
    pub opacity: f32,
    pub stroke: Option<Stroke>,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            fill: None,
            fill_opacity: 1.0,
            opacity: 1.0,
            stroke: None,
        }
    }
}

impl Style {
    pub fn filled(color: Color32) -> Self {
        Style {
            fill: Some(color),
            ..Style::default()
        }
    }

    pub fn stroked(color: Color32, width: f32) -> Self {
        Style {
            stroke: Some(Stroke::new(width, color)),
            ..Style::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub role: Role,
    pub bind: Option<Binding>,
    pub geometry: Geometry,
    pub style: Style,
    pub highlighted: bool,
}

impl Shape {
    pub fn day(&self) -> Option<DayKey> {
        match self.bind {
            Some(Binding::Day(key)) => Some(key),
            _ => None,
        }
    }

    pub fn radius(&self) -> Option<f32> {
        match self.geometry {
            Geometry::Circle { radius, .. } => Some(radius),
            _ => None,
        }
    }

    pub fn set_radius(&mut self, r: f32) {
        if let Geometry::Circle { radius, .. } = &mut self.geometry {
            *radius = r;
        }
    }

    pub fn center(&self) -> Option<Pos2> {
        match self.geometry {
            Geometry::Circle { center, .. } => Some(center),
            _ => None,
        }
    }

    pub fn set_center_y(&mut self, y: f32) {
        if let Geometry::Circle { center, .. } = &mut self.geometry {
            center.y = y;
        }
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        match &self.geometry {
            Geometry::Circle { center, radius } => center.distance(pos) <= *radius,
            Geometry::Rect(rect) | Geometry::Gradient { rect, .. } => rect.contains(pos),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    size: Vec2,
    shapes: Vec<Shape>,
    next_id: u32,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Scene {
            size: Vec2::new(width, height),
            shapes: Vec::new(),
            next_id: 0,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn add(&mut self, role: Role, geometry: Geometry, style: Style) -> ShapeId {
        self.push(role, None, geometry, style)
    }

    pub fn add_bound(&mut self, role: Role, bind: Binding, geometry: Geometry, style: Style) -> ShapeId {
        self.push(role, Some(bind), geometry, style)
    }

    fn push(&mut self, role: Role, bind: Option<Binding>, geometry: Geometry, style: Style) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.push(Shape {
            id,
            role,
            bind,
            geometry,
            style,
            highlighted: false,
        });
        id
    }

    /// Remove every shape with `role`; returns how many went.
    pub fn remove_role(&mut self, role: Role) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| s.role != role);
        before - self.shapes.len()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn select(&self, role: Role) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes.iter().filter(move |s| s.role == role)
    }

    pub fn select_mut(&mut self, role: Role) -> impl Iterator<Item = &mut Shape> + '_ {
        self.shapes.iter_mut().filter(move |s| s.role == role)
    }

    pub fn find_bound(&self, role: Role, bind: Binding) -> Option<&Shape> {
        self.shapes
            .iter()
            .find(|s| s.role == role && s.bind == Some(bind))
    }

    pub fn find_bound_mut(&mut self, role: Role, bind: Binding) -> Option<&mut Shape> {
        self.shapes
            .iter_mut()
            .find(|s| s.role == role && s.bind == Some(bind))
    }

    /// Topmost shape of `role` under `pos`.
    pub fn hit_test(&self, role: Role, pos: Pos2) -> Option<&Shape> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.role == role && s.contains(pos))
    }

    /// Visual content independent of shape ids and draw order.
    ///
    /// Two scenes with equal fingerprints paint the same pixels as long as
    /// none of their shapes overlap differently.
    pub fn fingerprint(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .shapes
            .iter()
            .map(|s| {
                format!(
                    "{:?}|{:?}|{:?}|{:?}|{}",
                    s.role, s.bind, s.geometry, s.style, s.highlighted
                )
            })
            .collect();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn dot(scene: &mut Scene, day: i32, x: f32) -> ShapeId {
        let key = DayKey::from_date(
            chrono::NaiveDate::from_num_days_from_ce_opt(737_000 + day).unwrap(),
        );
        scene.add_bound(
            Role::DataPoint,
            Binding::Day(key),
            Geometry::Circle {
                center: pos2(x, 10.0),
                radius: 5.0,
            },
            Style::filled(Color32::BLACK),
        )
    }

    #[test]
    fn add_select_remove() {
        let mut scene = Scene::new(100.0, 50.0);
        dot(&mut scene, 0, 10.0);
        dot(&mut scene, 1, 20.0);
        scene.add(Role::Curve(Curve::TempMax), Geometry::Path(vec![]), Style::default());

        assert_eq!(scene.select(Role::DataPoint).count(), 2);
        assert_eq!(scene.remove_role(Role::Curve(Curve::TempMax)), 1);
        assert_eq!(scene.remove_role(Role::Curve(Curve::TempMax)), 0);
        assert_eq!(scene.shapes().len(), 2);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut scene = Scene::new(10.0, 10.0);
        let a = dot(&mut scene, 0, 1.0);
        scene.remove_role(Role::DataPoint);
        let b = dot(&mut scene, 0, 1.0);
        assert_ne!(a, b);
        assert!(scene.get(a).is_none());
        assert!(scene.get(b).is_some());
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut scene = Scene::new(100.0, 50.0);
        let _under = dot(&mut scene, 0, 10.0);
        let over = dot(&mut scene, 1, 12.0);
        let hit = scene.hit_test(Role::DataPoint, pos2(11.0, 10.0)).unwrap();
        assert_eq!(hit.id, over);
        assert!(scene.hit_test(Role::DataPoint, pos2(80.0, 40.0)).is_none());
        assert!(scene.hit_test(Role::Bar, pos2(11.0, 10.0)).is_none());
    }

    #[test]
    fn fingerprint_ignores_ids_and_order() {
        let mut a = Scene::new(10.0, 10.0);
        dot(&mut a, 0, 1.0);
        dot(&mut a, 1, 2.0);

        let mut b = Scene::new(10.0, 10.0);
        b.add(Role::Title, Geometry::Path(vec![]), Style::default());
        b.remove_role(Role::Title);
        dot(&mut b, 1, 2.0);
        dot(&mut b, 0, 1.0);

        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn circle_helpers() {
        let mut scene = Scene::new(10.0, 10.0);
        let id = dot(&mut scene, 0, 1.0);
        let shape = scene.select_mut(Role::DataPoint).next().unwrap();
        shape.set_radius(9.0);
        shape.set_center_y(3.0);
        let shape = scene.get(id).unwrap();
        assert_eq!(shape.radius(), Some(9.0));
        assert_eq!(shape.center(), Some(pos2(1.0, 3.0)));
    }
}
