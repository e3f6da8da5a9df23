#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
        }
    }

    /// Converts a top-down y (origin top-left) into PDF user space (origin bottom-left).
    pub fn flip_y(&self, y: f32) -> f32 {
        self.height - y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_y_reflects_against_page_height() {
        let size = Size::letter();
        assert_eq!(size.flip_y(0.0), 792.0);
        assert_eq!(size.flip_y(168.0), 624.0);
        assert_eq!(size.flip_y(792.0), 0.0);
    }

    #[test]
    fn flip_y_is_a_reflection_not_a_toggle() {
        let size = Size::new(612.0, 800.0);
        let once = size.flip_y(100.0);
        assert_eq!(once, 700.0);
        assert_ne!(size.flip_y(once), once);
        assert_eq!(size.flip_y(once), 100.0);
    }
}
