use eframe::egui::{Pos2, Vec2};

/// Opacity of a shown tooltip.
pub const SHOWN_OPACITY: f32 = 0.9;
/// Fade-in time in seconds.
pub const FADE_IN: f32 = 0.2;
/// Fade-out time in seconds.
pub const FADE_OUT: f32 = 0.5;

/// Floating text box anchored near the pointer.
///
/// Hiding keeps the last content so it can fade out in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    lines: Vec<String>,
    anchor: Pos2,
    offset: Vec2,
    visible: bool,
}

impl Tooltip {
    pub fn new(offset: Vec2) -> Self {
        Tooltip {
            lines: Vec::new(),
            anchor: Pos2::ZERO,
            offset,
            visible: false,
        }
    }

    pub fn show(&mut self, lines: Vec<String>, at: Pos2) {
        self.lines = lines;
        self.anchor = at;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Top-left corner in screen coordinates.
    pub fn position(&self) -> Pos2 {
        self.anchor + self.offset
    }

    pub fn target_opacity(&self) -> f32 {
        if self.visible {
            SHOWN_OPACITY
        } else {
            0.0
        }
    }

    pub fn fade_seconds(&self) -> f32 {
        if self.visible {
            FADE_IN
        } else {
            FADE_OUT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    #[test]
    fn show_then_hide_keeps_content() {
        let mut tip = Tooltip::new(vec2(10.0, -20.0));
        assert!(!tip.is_visible());
        assert_eq!(tip.target_opacity(), 0.0);

        tip.show(vec!["Date: x".into()], pos2(100.0, 100.0));
        assert!(tip.is_visible());
        assert_eq!(tip.position(), pos2(110.0, 80.0));
        assert_eq!(tip.target_opacity(), SHOWN_OPACITY);
        assert_eq!(tip.fade_seconds(), FADE_IN);

        tip.hide();
        assert_eq!(tip.lines(), ["Date: x".to_string()]);
        assert_eq!(tip.fade_seconds(), FADE_OUT);
    }
}
