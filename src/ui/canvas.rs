use eframe::egui::{
    self, epaint::TextShape, pos2, vec2, Align2, Color32, CornerRadius, FontId, Mesh, Painter,
    Pos2, Rect, Response, Sense, Shape as PaintShape, Stroke, Ui, Vec2,
};

use crate::color::AXIS_GRAY;
use crate::scene::{Anchor, Binding, Geometry, Label, Orient, Role, Scene, Shape, Style, Tick};

const TICK_SIZE: f32 = 6.0;
const TICK_FONT: f32 = 10.0;
const TEXT_COLOR: Color32 = Color32::from_gray(40);
const BRUSH_FILL: Color32 = Color32::from_rgba_premultiplied(30, 30, 30, 30);
const BRUSH_STROKE: Color32 = Color32::from_gray(90);

// ---------------------------------------------------------------------------
// Brush gesture
// ---------------------------------------------------------------------------

/// Rectangle drag in chart-local pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrushDrag {
    active: bool,
    start: Pos2,
    current: Pos2,
}

impl BrushDrag {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn begin(&mut self, at: Pos2) {
        self.active = true;
        self.start = at;
        self.current = at;
    }

    pub fn update(&mut self, at: Pos2) {
        if self.active {
            self.current = at;
        }
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn rect(&self) -> Option<Rect> {
        self.active
            .then(|| Rect::from_two_pos(self.start, self.current))
    }

    /// End the drag and return the final rectangle.
    pub fn take_final(&mut self) -> Option<Rect> {
        let r = self.rect();
        self.active = false;
        r
    }
}

// ---------------------------------------------------------------------------
// Canvas: allocate, paint, pointer
// ---------------------------------------------------------------------------

/// A painted scene and where it landed on screen.
pub struct Canvas {
    pub response: Response,
    /// Screen position of the scene's (0, 0).
    pub origin: Pos2,
}

impl Canvas {
    /// Pointer position in scene coordinates, if it is over the canvas.
    pub fn local_pointer(&self) -> Option<Pos2> {
        self.response
            .hover_pos()
            .map(|p| pos2(p.x - self.origin.x, p.y - self.origin.y))
    }

    /// Pointer position in scene coordinates while a drag is in progress.
    pub fn local_drag_pointer(&self) -> Option<Pos2> {
        self.response
            .interact_pointer_pos()
            .map(|p| pos2(p.x - self.origin.x, p.y - self.origin.y))
    }

    pub fn screen_rect(&self, local: Rect) -> Rect {
        local.translate(self.origin.to_vec2())
    }

    /// Binding of the topmost `role` shape under the pointer.
    pub fn hovered(&self, scene: &Scene, role: Role) -> Option<Binding> {
        let at = self.local_pointer()?;
        scene.hit_test(role, at).and_then(|shape| shape.bind)
    }
}

/// Reserve room for `scene` and paint it.
pub fn show_scene(ui: &mut Ui, scene: &Scene) -> Canvas {
    let (response, painter) = ui.allocate_painter(scene.size(), Sense::click_and_drag());
    let origin = response.rect.min;
    paint_scene(&painter, origin.to_vec2(), scene);
    Canvas { response, origin }
}

pub fn paint_brush(painter: &Painter, canvas: &Canvas, local: Rect) {
    let rect = canvas.screen_rect(local);
    painter.rect_filled(rect, CornerRadius::ZERO, BRUSH_FILL);
    painter.add(PaintShape::closed_line(
        vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()],
        Stroke::new(1.0, BRUSH_STROKE),
    ));
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

pub fn paint_scene(painter: &Painter, offset: Vec2, scene: &Scene) {
    for shape in scene.shapes() {
        paint_shape(painter, offset, shape);
    }
}

fn fill_color(style: &Style) -> Color32 {
    style
        .fill
        .map(|c| c.gamma_multiply(style.opacity * style.fill_opacity))
        .unwrap_or(Color32::TRANSPARENT)
}

fn stroke(style: &Style) -> Stroke {
    style
        .stroke
        .map(|s| Stroke::new(s.width, s.color.gamma_multiply(style.opacity)))
        .unwrap_or(Stroke::NONE)
}

fn paint_shape(painter: &Painter, offset: Vec2, shape: &Shape) {
    let style = &shape.style;
    match &shape.geometry {
        Geometry::Circle { center, radius } => {
            painter.circle(*center + offset, *radius, fill_color(style), stroke(style));
        }
        Geometry::Rect(rect) => {
            painter.rect_filled(rect.translate(offset), CornerRadius::ZERO, fill_color(style));
        }
        Geometry::Path(points) => {
            if points.len() > 1 {
                let points = points.iter().map(|p| *p + offset).collect();
                painter.add(PaintShape::line(points, stroke(style)));
            }
        }
        Geometry::Text(label) => paint_label(painter, offset, label, TEXT_COLOR.gamma_multiply(style.opacity)),
        Geometry::Axis {
            orient,
            offset: at,
            span,
            ticks,
        } => paint_axis(painter, offset, *orient, *at, *span, ticks, stroke(style)),
        Geometry::Gradient { rect, stops } => paint_gradient(painter, rect.translate(offset), stops),
    }
}

fn align(anchor: Anchor) -> Align2 {
    match anchor {
        Anchor::Start => Align2::LEFT_BOTTOM,
        Anchor::Middle => Align2::CENTER_BOTTOM,
        Anchor::End => Align2::RIGHT_BOTTOM,
    }
}

/// Labels are positioned by their baseline, like SVG text.
fn paint_label(painter: &Painter, offset: Vec2, label: &Label, color: Color32) {
    let color = if label.bold { Color32::BLACK } else { color };
    let font = FontId::proportional(label.size);
    let pos = label.pos + offset;

    if label.angle == 0.0 {
        painter.text(pos, align(label.anchor), &label.text, font, color);
        return;
    }

    let galley = painter.layout_no_wrap(label.text.clone(), font, color);
    let size = galley.size();
    let along = match label.anchor {
        Anchor::Start => 0.0,
        Anchor::Middle => -size.x / 2.0,
        Anchor::End => -size.x,
    };
    // rotate the galley's top-left corner about the anchor point
    let (sin, cos) = label.angle.sin_cos();
    let corner = vec2(along, -size.y);
    let rotated = vec2(corner.x * cos - corner.y * sin, corner.x * sin + corner.y * cos);
    painter.add(TextShape::new(pos + rotated, galley, color).with_angle(label.angle));
}

fn paint_axis(
    painter: &Painter,
    offset: Vec2,
    orient: Orient,
    at: f32,
    span: (f32, f32),
    ticks: &[Tick],
    stroke: Stroke,
) {
    let stroke = if stroke == Stroke::NONE {
        Stroke::new(1.0, AXIS_GRAY)
    } else {
        stroke
    };
    let font = FontId::proportional(TICK_FONT);

    match orient {
        Orient::Bottom => {
            painter.line_segment([pos2(span.0, at) + offset, pos2(span.1, at) + offset], stroke);
            for tick in ticks {
                let base = pos2(tick.pos, at) + offset;
                painter.line_segment([base, base + vec2(0.0, TICK_SIZE)], stroke);
                painter.text(
                    base + vec2(0.0, TICK_SIZE + 2.0),
                    Align2::CENTER_TOP,
                    &tick.label,
                    font.clone(),
                    TEXT_COLOR,
                );
            }
        }
        Orient::Left | Orient::Right => {
            let dir = if orient == Orient::Left { -1.0 } else { 1.0 };
            let text_align = if orient == Orient::Left {
                Align2::RIGHT_CENTER
            } else {
                Align2::LEFT_CENTER
            };
            painter.line_segment([pos2(at, span.0) + offset, pos2(at, span.1) + offset], stroke);
            for tick in ticks {
                let base = pos2(at, tick.pos) + offset;
                painter.line_segment([base, base + vec2(dir * TICK_SIZE, 0.0)], stroke);
                painter.text(
                    base + vec2(dir * (TICK_SIZE + 3.0), 0.0),
                    text_align,
                    &tick.label,
                    font.clone(),
                    TEXT_COLOR,
                );
            }
        }
    }
}

/// Vertical colour ramp, first stop at the top.
fn paint_gradient(painter: &Painter, rect: Rect, stops: &[Color32]) {
    match stops {
        [] => {}
        [only] => {
            painter.rect_filled(rect, CornerRadius::ZERO, *only);
        }
        _ => {
            painter.add(PaintShape::mesh(gradient_mesh(rect, stops)));
        }
    }
}

fn gradient_mesh(rect: Rect, stops: &[Color32]) -> Mesh {
    let mut mesh = Mesh::default();
    let last = (stops.len() - 1) as f32;
    for (i, color) in stops.iter().enumerate() {
        let y = egui::lerp(rect.top()..=rect.bottom(), i as f32 / last);
        mesh.colored_vertex(pos2(rect.left(), y), *color);
        mesh.colored_vertex(pos2(rect.right(), y), *color);
    }
    for i in 0..(stops.len() as u32 - 1) {
        let top = 2 * i;
        mesh.add_triangle(top, top + 1, top + 2);
        mesh.add_triangle(top + 1, top + 3, top + 2);
    }
    mesh
}
