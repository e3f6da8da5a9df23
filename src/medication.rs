use crate::canvas::{FontRef, PageCanvas};
use crate::error::FillError;
use crate::normalize::MedicationRow;
use crate::types::Color;

// Average glyph width as a fraction of the font size, used to budget characters.
const AVG_CHAR_WIDTH: f32 = 0.6;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    StartDate,
    ChangeCode,
    Medication,
    DoseRoute,
    Frequency,
    Purpose,
    StopDate,
}

impl TableColumn {
    pub const ALL: [TableColumn; 7] = [
        TableColumn::StartDate,
        TableColumn::ChangeCode,
        TableColumn::Medication,
        TableColumn::DoseRoute,
        TableColumn::Frequency,
        TableColumn::Purpose,
        TableColumn::StopDate,
    ];

    pub fn cell(self, row: &MedicationRow) -> Option<&str> {
        let cell = match self {
            TableColumn::StartDate => &row.start_date,
            TableColumn::ChangeCode => &row.change_code,
            TableColumn::Medication => &row.medication,
            TableColumn::DoseRoute => &row.dose_route,
            TableColumn::Frequency => &row.frequency,
            TableColumn::Purpose => &row.purpose,
            TableColumn::StopDate => &row.stop_date,
        };
        cell.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    page: usize,
    columns: Vec<(TableColumn, f32)>,
    start_y: f32,
    row_height: f32,
    gutter: f32,
    last_column_width: f32,
    font_size: f32,
}

impl TableLayout {
    pub const GUTTER: f32 = 5.0;
    pub const LAST_COLUMN_WIDTH: f32 = 80.0;
    pub const FONT_SIZE: f32 = 9.0;

    pub fn new(
        page: usize,
        columns: &[(TableColumn, f32)],
        start_y: f32,
        row_height: f32,
    ) -> Result<Self, FillError> {
        if columns.is_empty() {
            return Err(FillError::Registry(
                "medication table needs at least one column".to_string(),
            ));
        }
        if !start_y.is_finite() || !row_height.is_finite() || row_height <= 0.0 {
            return Err(FillError::Registry(format!(
                "invalid medication table geometry: start_y {start_y}, row_height {row_height}"
            )));
        }
        for pair in columns.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            if !(right.1 > left.1) {
                return Err(FillError::Registry(format!(
                    "medication column {:?} at x={} must sit right of {:?} at x={}",
                    right.0, right.1, left.0, left.1
                )));
            }
        }
        Ok(Self {
            page,
            columns: columns.to_vec(),
            start_y,
            row_height,
            gutter: Self::GUTTER,
            last_column_width: Self::LAST_COLUMN_WIDTH,
            font_size: Self::FONT_SIZE,
        })
    }

    pub fn esoc(page: usize) -> Result<Self, FillError> {
        Self::new(
            page,
            &[
                (TableColumn::StartDate, 40.0),
                (TableColumn::ChangeCode, 116.0),
                (TableColumn::Medication, 141.0),
                (TableColumn::DoseRoute, 272.0),
                (TableColumn::Frequency, 345.0),
                (TableColumn::Purpose, 423.0),
                (TableColumn::StopDate, 519.0),
            ],
            213.0,
            15.0,
        )
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn columns(&self) -> &[(TableColumn, f32)] {
        &self.columns
    }

    pub fn column_width(&self, index: usize) -> f32 {
        match (self.columns.get(index), self.columns.get(index + 1)) {
            (Some((_, x)), Some((_, next))) => next - x - self.gutter,
            _ => self.last_column_width,
        }
    }

    pub fn row_y(&self, index: usize) -> f32 {
        self.start_y + index as f32 * self.row_height
    }

    pub fn render(&self, canvas: &mut PageCanvas, rows: &[MedicationRow]) -> usize {
        let mut drawn = 0usize;
        if rows.is_empty() {
            return drawn;
        }
        canvas.set_fill_color(Color::BLACK);
        canvas.set_font(FontRef::Helvetica, self.font_size);
        for (row_index, row) in rows.iter().enumerate() {
            let y = self.row_y(row_index);
            for (col_index, (column, x)) in self.columns.iter().enumerate() {
                let Some(text) = column.cell(row).filter(|text| !text.is_empty()) else {
                    continue;
                };
                let fitted = fit_text_to_column(text, self.column_width(col_index), self.font_size);
                if fitted.is_empty() {
                    continue;
                }
                canvas.draw_string(*x, y, fitted);
                drawn += 1;
            }
        }
        drawn
    }
}

pub fn column_char_budget(width: f32, font_size: f32) -> usize {
    if width <= 0.0 || font_size <= 0.0 {
        return 0;
    }
    (width / (font_size * AVG_CHAR_WIDTH)).floor() as usize
}

pub fn fit_text_to_column(text: &str, width: f32, font_size: f32) -> String {
    let budget = column_char_budget(width, font_size);
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let mut out: String = text.chars().take(budget.saturating_sub(ELLIPSIS.len())).collect();
    out.push_str(ELLIPSIS);
    out
}
