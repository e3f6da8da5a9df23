use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetrics {
    pub page_number: usize,
    pub text_fields: usize,
    pub checkmarks: usize,
    pub circles: usize,
    pub signatures_embedded: usize,
    pub signatures_skipped: usize,
    pub medication_cells: usize,
    pub replaced_chars: usize,
    pub content_bytes: usize,
}

impl PageMetrics {
    pub fn marks(&self) -> usize {
        self.text_fields
            + self.checkmarks
            + self.circles
            + self.signatures_embedded
            + self.medication_cells
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillMetrics {
    pub pages: BTreeMap<usize, PageMetrics>,
    pub template_pages: usize,
    pub medication_rows: usize,
    pub rejected_dates: usize,
    pub ignored_keys: usize,
    pub out_of_range_fields: usize,
    pub render_ms: f64,
    pub total_bytes: usize,
}

impl FillMetrics {
    pub fn page_mut(&mut self, page_index: usize) -> &mut PageMetrics {
        self.pages.entry(page_index).or_insert_with(|| PageMetrics {
            page_number: page_index + 1,
            ..PageMetrics::default()
        })
    }

    pub fn text_fields(&self) -> usize {
        self.pages.values().map(|p| p.text_fields).sum()
    }

    pub fn checkmarks(&self) -> usize {
        self.pages.values().map(|p| p.checkmarks).sum()
    }

    pub fn circles(&self) -> usize {
        self.pages.values().map(|p| p.circles).sum()
    }

    pub fn signatures_embedded(&self) -> usize {
        self.pages.values().map(|p| p.signatures_embedded).sum()
    }

    pub fn signatures_skipped(&self) -> usize {
        self.pages.values().map(|p| p.signatures_skipped).sum()
    }

    pub fn replaced_chars(&self) -> usize {
        self.pages.values().map(|p| p.replaced_chars).sum()
    }

    pub fn pages_touched(&self) -> usize {
        self.pages.values().filter(|p| p.marks() > 0).count()
    }
}
