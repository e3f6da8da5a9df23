use crate::canvas::{FontRef, PageCanvas};
use crate::metrics::FillMetrics;
use crate::normalize::{FieldValue, NormalizedBag};
use crate::registry::{FieldDescriptor, FieldKind, FieldRegistry};
use crate::signature::SignatureImage;
use crate::template::Template;
use crate::types::Color;

pub const DEFAULT_FONT_SIZE: f32 = crate::coordinates::DEFAULT_FONT_SIZE;
pub const CHECK_MARK_SIZE: f32 = 14.0;
pub const CIRCLE_RADIUS: f32 = 14.0;
pub const CIRCLE_LINE_WIDTH: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignatureFootprint {
    pub width: f32,
    pub height: f32,
}

impl Default for SignatureFootprint {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 30.0,
        }
    }
}

#[derive(Debug)]
pub struct Overlay {
    canvases: Vec<PageCanvas>,
}

impl Overlay {
    pub fn for_template(template: &Template) -> Self {
        let canvases = (0..template.page_count())
            .map(|index| PageCanvas::new(index, template.page_size(index)))
            .collect();
        Self { canvases }
    }

    pub fn page_count(&self) -> usize {
        self.canvases.len()
    }

    pub fn page_mut(&mut self, page_index: usize) -> Option<&mut PageCanvas> {
        self.canvases.get_mut(page_index)
    }

    pub fn canvases(&self) -> &[PageCanvas] {
        &self.canvases
    }
}

pub struct FieldRenderer<'a> {
    registry: &'a FieldRegistry,
    check_glyph: u16,
    footprint: SignatureFootprint,
}

impl<'a> FieldRenderer<'a> {
    pub fn new(registry: &'a FieldRegistry, check_glyph: u16, footprint: SignatureFootprint) -> Self {
        Self {
            registry,
            check_glyph,
            footprint,
        }
    }

    pub fn draw_checkmarks(
        &self,
        bag: &NormalizedBag,
        overlay: &mut Overlay,
        metrics: &mut FillMetrics,
    ) {
        for field in self.registry.checkboxes() {
            match bag.value(field.page(), field.slot) {
                Some(FieldValue::Flag(true)) => {}
                Some(_) => {
                    tracing::debug!(page = field.page() + 1, slot = field.slot, "checkbox left blank");
                    continue;
                }
                None => continue,
            }
            let Some(canvas) = overlay.page_mut(field.page()) else {
                metrics.out_of_range_fields += 1;
                continue;
            };
            canvas.set_fill_color(Color::BLACK);
            canvas.set_font(FontRef::CheckMark, CHECK_MARK_SIZE);
            canvas.draw_glyph(field.coordinate.x, field.coordinate.y, self.check_glyph);
            metrics.page_mut(field.page()).checkmarks += 1;
            tracing::debug!(page = field.page() + 1, slot = field.slot, "checkbox ticked");
        }
    }

    pub fn draw_text_pages(
        &self,
        bag: &NormalizedBag,
        overlay: &mut Overlay,
        metrics: &mut FillMetrics,
    ) {
        for &page in self.registry.text_pages() {
            let Some(page_bag) = bag.page(page) else {
                continue;
            };
            let Some(canvas) = overlay.page_mut(page) else {
                metrics.out_of_range_fields += page_bag.len();
                continue;
            };
            for (slot, value) in page_bag.iter() {
                let Some(field) = self.registry.get(page, slot) else {
                    continue;
                };
                self.draw_field(field, value, canvas, metrics);
            }
        }
    }

    fn draw_field(
        &self,
        field: &FieldDescriptor,
        value: &FieldValue,
        canvas: &mut PageCanvas,
        metrics: &mut FillMetrics,
    ) {
        let page = field.page();
        let (x, y) = (field.coordinate.x, field.coordinate.y);
        match (field.kind(), value) {
            (FieldKind::Text, FieldValue::Text(text)) if !text.is_empty() => {
                let size = field.coordinate.font_size.unwrap_or(DEFAULT_FONT_SIZE);
                canvas.set_fill_color(Color::BLACK);
                canvas.set_font(FontRef::Helvetica, size);
                canvas.draw_string(x, y, text.as_str());
                metrics.page_mut(page).text_fields += 1;
                tracing::debug!(page = page + 1, slot = field.slot, "text drawn");
            }
            (FieldKind::Circle, value) if value.is_set() => {
                canvas.save_state();
                canvas.set_stroke_color(Color::BLACK);
                canvas.set_line_width(CIRCLE_LINE_WIDTH);
                canvas.stroke_circle(x, y, CIRCLE_RADIUS);
                canvas.restore_state();
                metrics.page_mut(page).circles += 1;
                tracing::debug!(page = page + 1, slot = field.slot, "circle drawn");
            }
            (FieldKind::Signature, FieldValue::Signature(uri)) => {
                match SignatureImage::from_data_uri(uri) {
                    Ok(image) => {
                        canvas.draw_image(x, y, self.footprint.width, self.footprint.height, image);
                        metrics.page_mut(page).signatures_embedded += 1;
                        tracing::debug!(page = page + 1, slot = field.slot, "signature embedded");
                    }
                    Err(reason) => {
                        metrics.page_mut(page).signatures_skipped += 1;
                        tracing::warn!(
                            page = page + 1,
                            slot = field.slot,
                            %reason,
                            "signature skipped"
                        );
                    }
                }
            }
            // Checkbox marks are drawn by `draw_checkmarks`.
            _ => {}
        }
    }
}
