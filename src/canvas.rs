use crate::signature::SignatureImage;
use crate::types::{Color, Size};

// Control-point factor for approximating a quarter circle with one cubic Bézier.
const KAPPA: f32 = 0.552_284_75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRef {
    Helvetica,
    CheckMark,
}

/// Overlay drawing operations. Positions are top-down (origin top-left, y grows
/// downward); the PDF encoder reflects them against the page height.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SaveState,
    RestoreState,
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(f32),
    SetFont {
        font: FontRef,
        size: f32,
    },
    MoveTo {
        x: f32,
        y: f32,
    },
    CurveTo {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x: f32,
        y: f32,
    },
    ClosePath,
    Stroke,
    // Baseline starts at (x, y).
    DrawString {
        x: f32,
        y: f32,
        text: String,
    },
    DrawGlyph {
        x: f32,
        y: f32,
        glyph_id: u16,
    },
    // (x, y) is the top-left corner of the footprint.
    DrawImage {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: usize,
    },
}

#[derive(Debug, Clone)]
struct GraphicsState {
    fill_color: Color,
    stroke_color: Color,
    line_width: f32,
    font: Option<(FontRef, f32)>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            line_width: 1.0,
            font: None,
        }
    }
}

#[derive(Debug)]
pub struct PageCanvas {
    page_index: usize,
    size: Size,
    commands: Vec<Command>,
    images: Vec<SignatureImage>,
    state_stack: Vec<GraphicsState>,
    current_state: GraphicsState,
}

impl PageCanvas {
    pub fn new(page_index: usize, size: Size) -> Self {
        Self {
            page_index,
            size,
            commands: Vec::new(),
            images: Vec::new(),
            state_stack: Vec::new(),
            current_state: GraphicsState::default(),
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn images(&self) -> &[SignatureImage] {
        &self.images
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn uses_font(&self, font: FontRef) -> bool {
        self.commands
            .iter()
            .any(|cmd| matches!(cmd, Command::SetFont { font: used, .. } if *used == font))
    }

    pub fn save_state(&mut self) {
        self.state_stack.push(self.current_state.clone());
        self.commands.push(Command::SaveState);
    }

    pub fn restore_state(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.current_state = state;
            self.commands.push(Command::RestoreState);
        }
    }

    pub fn set_fill_color(&mut self, color: Color) {
        if self.current_state.fill_color == color {
            return;
        }
        self.current_state.fill_color = color;
        self.commands.push(Command::SetFillColor(color));
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        if self.current_state.stroke_color == color {
            return;
        }
        self.current_state.stroke_color = color;
        self.commands.push(Command::SetStrokeColor(color));
    }

    pub fn set_line_width(&mut self, width: f32) {
        let width = width.max(0.0);
        if self.current_state.line_width == width {
            return;
        }
        self.current_state.line_width = width;
        self.commands.push(Command::SetLineWidth(width));
    }

    pub fn set_font(&mut self, font: FontRef, size: f32) {
        if self.current_state.font == Some((font, size)) {
            return;
        }
        self.current_state.font = Some((font, size));
        self.commands.push(Command::SetFont { font, size });
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(Command::MoveTo { x, y });
    }

    pub fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands.push(Command::CurveTo {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        });
    }

    pub fn close_path(&mut self) {
        self.commands.push(Command::ClosePath);
    }

    pub fn stroke(&mut self) {
        self.commands.push(Command::Stroke);
    }

    pub fn draw_string(&mut self, x: f32, y: f32, text: impl Into<String>) {
        self.commands.push(Command::DrawString {
            x,
            y,
            text: text.into(),
        });
    }

    pub fn draw_glyph(&mut self, x: f32, y: f32, glyph_id: u16) {
        self.commands.push(Command::DrawGlyph { x, y, glyph_id });
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        let k = radius * KAPPA;
        self.move_to(cx + radius, cy);
        self.curve_to(cx + radius, cy + k, cx + k, cy + radius, cx, cy + radius);
        self.curve_to(cx - k, cy + radius, cx - radius, cy + k, cx - radius, cy);
        self.curve_to(cx - radius, cy - k, cx - k, cy - radius, cx, cy - radius);
        self.curve_to(cx + k, cy - radius, cx + radius, cy - k, cx + radius, cy);
        self.close_path();
        self.stroke();
    }

    pub fn draw_image(&mut self, x: f32, y: f32, width: f32, height: f32, image: SignatureImage) {
        let index = self.images.len();
        self.images.push(image);
        self.commands.push(Command::DrawImage {
            x,
            y,
            width,
            height,
            image: index,
        });
    }
}
