use crate::config::FillConfig;
use crate::error::FillError;
use crate::finalize::{serialize, stamp_overlays};
use crate::font::CheckMarkFont;
use crate::medication::TableLayout;
use crate::metrics::FillMetrics;
use crate::normalize::{FillRequest, MedicationRow, normalize};
use crate::registry::FieldRegistry;
use crate::render::{FieldRenderer, Overlay};
use crate::template::Template;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct FilledPdf {
    pub bytes: Vec<u8>,
    pub metrics: FillMetrics,
}

#[derive(Debug)]
pub struct FormFiller {
    config: FillConfig,
    registry: &'static FieldRegistry,
    medication: TableLayout,
}

impl FormFiller {
    pub fn new(config: FillConfig) -> Result<Self, FillError> {
        let registry = FieldRegistry::builtin()?;
        let medication = TableLayout::esoc(config.medication_page)?;
        Ok(Self {
            config,
            registry,
            medication,
        })
    }

    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    pub fn fill_json(&self, body: &[u8]) -> Result<FilledPdf, FillError> {
        let request = FillRequest::from_slice(body)?;
        self.fill(&request)
    }

    pub fn fill(&self, request: &FillRequest) -> Result<FilledPdf, FillError> {
        let started = Instant::now();
        let mut template = Template::load(&self.config.template_path, &self.config.template_checks())?;
        let font = CheckMarkFont::from_path(&self.config.font_path)?;
        tracing::info!(
            pages = template.page_count(),
            font = font.name(),
            "template loaded"
        );

        let mut metrics = FillMetrics {
            template_pages: template.page_count(),
            ..FillMetrics::default()
        };
        let bag = normalize(&request.patient_data, self.registry);
        metrics.rejected_dates = bag.rejected_dates.len();
        metrics.ignored_keys = bag.ignored_keys;
        if !bag.rejected_dates.is_empty() {
            tracing::debug!(fields = ?bag.rejected_dates, "unparseable dates left blank");
        }

        let renderer = FieldRenderer::new(self.registry, font.glyph_id(), self.config.signature_footprint);
        let mut overlay = Overlay::for_template(&template);
        renderer.draw_checkmarks(&bag, &mut overlay, &mut metrics);
        tracing::info!(checkmarks = metrics.checkmarks(), "marks filled");

        renderer.draw_text_pages(&bag, &mut overlay, &mut metrics);
        tracing::info!(
            text = metrics.text_fields(),
            circles = metrics.circles(),
            signatures = metrics.signatures_embedded(),
            "text and signatures filled"
        );

        if !request.medication_rows.is_empty() {
            self.fill_medications(&request.medication_rows, &mut overlay, &mut metrics);
        }

        let summary = stamp_overlays(&mut template, overlay.canvases(), Some(&font))?;
        for page in &summary.pages {
            let entry = metrics.page_mut(page.page_index);
            entry.content_bytes = page.content_bytes;
            entry.replaced_chars = page.replaced_chars;
        }
        if metrics.replaced_chars() > 0 {
            tracing::warn!(
                replaced = metrics.replaced_chars(),
                "characters outside WinAnsi were replaced with '?'"
            );
        }

        let bytes = serialize(template)?;
        metrics.total_bytes = bytes.len();
        metrics.render_ms = started.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(
            bytes = metrics.total_bytes,
            pages_touched = metrics.pages_touched(),
            signatures_skipped = metrics.signatures_skipped(),
            rejected_dates = metrics.rejected_dates,
            ignored_keys = metrics.ignored_keys,
            render_ms = metrics.render_ms,
            "document serialized"
        );
        Ok(FilledPdf { bytes, metrics })
    }

    fn fill_medications(&self, rows: &[MedicationRow], overlay: &mut Overlay, metrics: &mut FillMetrics) {
        let page = self.medication.page();
        let Some(canvas) = overlay.page_mut(page) else {
            metrics.out_of_range_fields += rows.len();
            tracing::warn!(page = page + 1, "medication page missing from template");
            return;
        };
        let rows: Vec<MedicationRow> = rows.iter().map(MedicationRow::normalized).collect();
        let cells = self.medication.render(canvas, &rows);
        metrics.medication_rows = rows.len();
        metrics.page_mut(page).medication_cells += cells;
        tracing::info!(rows = rows.len(), cells, "medication table filled");
    }
}
