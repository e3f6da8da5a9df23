use crate::coordinates;
use crate::error::FillError;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Checkbox,
    Circle,
    Signature,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Circle => "circle",
            FieldKind::Signature => "signature",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRule {
    Text,
    Date,
    Flag,
    FlagText(&'static str),
    DataUri,
}

impl ValueRule {
    fn accepts(&self, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Text => matches!(
                self,
                ValueRule::Text | ValueRule::Date | ValueRule::FlagText(_)
            ),
            FieldKind::Checkbox | FieldKind::Circle => matches!(self, ValueRule::Flag),
            FieldKind::Signature => matches!(self, ValueRule::DataUri),
        }
    }
}

/// Position of one slot. `x`/`y` are top-down: origin at the top-left corner of
/// the printed page, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldCoordinate {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub font_size: Option<f32>,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    pub slot: &'static str,
    pub source: &'static str,
    pub coordinate: FieldCoordinate,
    pub rule: ValueRule,
}

impl FieldDescriptor {
    const fn new(
        page: usize,
        slot: &'static str,
        x: f32,
        y: f32,
        kind: FieldKind,
        rule: ValueRule,
    ) -> Self {
        Self {
            slot,
            source: slot,
            coordinate: FieldCoordinate {
                page,
                x,
                y,
                font_size: None,
                kind,
            },
            rule,
        }
    }

    pub const fn text(page: usize, slot: &'static str, x: f32, y: f32) -> Self {
        Self::new(page, slot, x, y, FieldKind::Text, ValueRule::Text)
    }

    pub const fn date(page: usize, slot: &'static str, x: f32, y: f32) -> Self {
        Self::new(page, slot, x, y, FieldKind::Text, ValueRule::Date)
    }

    pub const fn checkbox(page: usize, slot: &'static str, x: f32, y: f32) -> Self {
        Self::new(page, slot, x, y, FieldKind::Checkbox, ValueRule::Flag)
    }

    pub const fn circle(page: usize, slot: &'static str, x: f32, y: f32) -> Self {
        Self::new(page, slot, x, y, FieldKind::Circle, ValueRule::Flag)
    }

    pub const fn signature(page: usize, slot: &'static str, x: f32, y: f32) -> Self {
        Self::new(page, slot, x, y, FieldKind::Signature, ValueRule::DataUri)
    }

    pub const fn size(self, font_size: f32) -> Self {
        Self {
            coordinate: FieldCoordinate {
                font_size: Some(font_size),
                ..self.coordinate
            },
            ..self
        }
    }

    pub const fn from(self, source: &'static str) -> Self {
        Self { source, ..self }
    }

    pub const fn flag_text(self, source: &'static str, literal: &'static str) -> Self {
        Self {
            source,
            rule: ValueRule::FlagText(literal),
            ..self
        }
    }

    pub fn page(&self) -> usize {
        self.coordinate.page
    }

    pub fn kind(&self) -> FieldKind {
        self.coordinate.kind
    }
}

#[derive(Debug)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
    by_page: BTreeMap<usize, Vec<usize>>,
    text_pages: Vec<usize>,
}

impl FieldRegistry {
    pub fn new(fields: &[FieldDescriptor]) -> Result<Self, FillError> {
        Self::build(fields).map_err(FillError::Registry)
    }

    pub fn builtin() -> Result<&'static FieldRegistry, FillError> {
        static BUILTIN: OnceLock<Result<FieldRegistry, String>> = OnceLock::new();
        match BUILTIN.get_or_init(|| Self::build(coordinates::FIELDS)) {
            Ok(registry) => Ok(registry),
            Err(message) => Err(FillError::Registry(message.clone())),
        }
    }

    fn build(fields: &[FieldDescriptor]) -> Result<Self, String> {
        let mut seen: BTreeSet<(usize, &str)> = BTreeSet::new();
        let mut by_page: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        let mut text_pages: BTreeSet<usize> = BTreeSet::new();

        for (idx, field) in fields.iter().enumerate() {
            let coord = &field.coordinate;
            if field.slot.trim().is_empty() || field.source.trim().is_empty() {
                return Err(format!("entry {} has an empty slot or source name", idx));
            }
            if !seen.insert((coord.page, field.slot)) {
                return Err(format!(
                    "duplicate slot `{}` on page {}",
                    field.slot,
                    coord.page + 1
                ));
            }
            if !coord.x.is_finite() || !coord.y.is_finite() || coord.x < 0.0 || coord.y < 0.0 {
                return Err(format!(
                    "slot `{}` on page {} has an invalid position ({}, {})",
                    field.slot,
                    coord.page + 1,
                    coord.x,
                    coord.y
                ));
            }
            if let Some(size) = coord.font_size {
                if !size.is_finite() || size <= 0.0 {
                    return Err(format!(
                        "slot `{}` on page {} has an invalid font size {}",
                        field.slot,
                        coord.page + 1,
                        size
                    ));
                }
            }
            if !field.rule.accepts(coord.kind) {
                return Err(format!(
                    "slot `{}` on page {} pairs kind {} with rule {:?}",
                    field.slot,
                    coord.page + 1,
                    coord.kind.as_str(),
                    field.rule
                ));
            }
            by_page.entry(coord.page).or_default().push(idx);
            if coord.kind != FieldKind::Checkbox {
                text_pages.insert(coord.page);
            }
        }

        Ok(Self {
            fields: fields.to_vec(),
            by_page,
            text_pages: text_pages.into_iter().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn page_fields(&self, page: usize) -> impl Iterator<Item = &FieldDescriptor> {
        self.by_page
            .get(&page)
            .into_iter()
            .flatten()
            .map(|idx| &self.fields[*idx])
    }

    pub fn get(&self, page: usize, slot: &str) -> Option<&FieldDescriptor> {
        self.page_fields(page).find(|field| field.slot == slot)
    }

    pub fn checkboxes(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(|field| field.kind() == FieldKind::Checkbox)
    }

    pub fn text_pages(&self) -> &[usize] {
        &self.text_pages
    }

    pub fn pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_page.keys().copied()
    }

    pub fn source_keys(&self) -> BTreeSet<&'static str> {
        self.fields.iter().map(|field| field.source).collect()
    }

    pub fn signature_sources(&self) -> BTreeSet<&'static str> {
        self.fields
            .iter()
            .filter(|field| field.kind() == FieldKind::Signature)
            .map(|field| field.source)
            .collect()
    }
}
