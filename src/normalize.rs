use crate::error::FillError;
use crate::registry::{FieldDescriptor, FieldRegistry, ValueRule};
use crate::signature::DATA_URI_PREFIX;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRow {
    #[serde(default, deserialize_with = "scalar_cell")]
    pub start_date: Option<String>,
    #[serde(default, alias = "cN", deserialize_with = "scalar_cell")]
    pub change_code: Option<String>,
    #[serde(default, deserialize_with = "scalar_cell")]
    pub medication: Option<String>,
    #[serde(default, deserialize_with = "scalar_cell")]
    pub dose_route: Option<String>,
    #[serde(default, deserialize_with = "scalar_cell")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "scalar_cell")]
    pub purpose: Option<String>,
    #[serde(default, alias = "cdcDate", deserialize_with = "scalar_cell")]
    pub stop_date: Option<String>,
}

fn scalar_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

impl MedicationRow {
    pub fn normalized(&self) -> MedicationRow {
        let reformat = |cell: &Option<String>| {
            cell.as_ref()
                .map(|raw| format_date(raw).unwrap_or_else(|| raw.clone()))
        };
        MedicationRow {
            start_date: reformat(&self.start_date),
            stop_date: reformat(&self.stop_date),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillRequest {
    pub patient_data: Map<String, Value>,
    pub medication_rows: Vec<MedicationRow>,
}

impl FillRequest {
    pub fn new(patient_data: Map<String, Value>) -> Self {
        Self {
            patient_data,
            medication_rows: Vec::new(),
        }
    }

    pub fn with_medication_rows(mut self, rows: Vec<MedicationRow>) -> Self {
        self.medication_rows = rows;
        self
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, FillError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|err| FillError::Validation(format!("malformed JSON body: {err}")))?;
        Self::from_json(&value)
    }

    pub fn from_json(value: &Value) -> Result<Self, FillError> {
        let Some(body) = value.as_object() else {
            return Err(FillError::Validation(
                "request body must be a JSON object".to_string(),
            ));
        };

        let patient_data = match body.get("patientData") {
            None | Some(Value::Null) => {
                return Err(FillError::Validation("Patient data is required".to_string()));
            }
            Some(Value::Object(map)) => map.clone(),
            Some(_) => {
                return Err(FillError::Validation(
                    "patientData must be a JSON object".to_string(),
                ));
            }
        };

        let medication_rows = match body.get("medicationRows") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    if !item.is_object() {
                        return Err(FillError::Validation(format!(
                            "medicationRows[{idx}] must be an object"
                        )));
                    }
                    MedicationRow::deserialize(item).map_err(|err| {
                        FillError::Validation(format!("medicationRows[{idx}]: {err}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(FillError::Validation(
                    "medicationRows must be an array".to_string(),
                ));
            }
        };

        Ok(Self {
            patient_data,
            medication_rows,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Signature(String),
}

impl FieldValue {
    pub fn is_set(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Flag(flag) => *flag,
            FieldValue::Signature(uri) => !uri.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBag {
    values: BTreeMap<&'static str, FieldValue>,
}

impl PageBag {
    pub fn get(&self, slot: &str) -> Option<&FieldValue> {
        self.values.get(slot)
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.values.contains_key(slot)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(slot, value)| (*slot, value))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBag {
    pages: BTreeMap<usize, PageBag>,
    pub rejected_dates: Vec<&'static str>,
    pub ignored_keys: usize,
}

impl NormalizedBag {
    pub fn page(&self, page: usize) -> Option<&PageBag> {
        self.pages.get(&page)
    }

    pub fn value(&self, page: usize, slot: &str) -> Option<&FieldValue> {
        self.page(page).and_then(|bag| bag.get(slot))
    }

    pub fn len(&self) -> usize {
        self.pages.values().map(PageBag::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reshapes the raw bag into per-page slot values. Never fails: values that do
/// not satisfy their rule are left out.
pub fn normalize(patient_data: &Map<String, Value>, registry: &FieldRegistry) -> NormalizedBag {
    let mut bag = NormalizedBag::default();
    for field in registry.fields() {
        let raw = patient_data.get(field.source);
        if let Some(value) = coerce(field, raw, &mut bag.rejected_dates) {
            bag.pages
                .entry(field.page())
                .or_default()
                .values
                .insert(field.slot, value);
        }
    }
    let known = registry.source_keys();
    bag.ignored_keys = patient_data
        .keys()
        .filter(|key| !known.contains(key.as_str()))
        .count();
    bag
}

fn coerce(
    field: &FieldDescriptor,
    raw: Option<&Value>,
    rejected_dates: &mut Vec<&'static str>,
) -> Option<FieldValue> {
    match field.rule {
        ValueRule::Flag => raw.map(|value| FieldValue::Flag(is_truthy(value))),
        ValueRule::FlagText(literal) => raw
            .filter(|value| is_truthy(value))
            .map(|_| FieldValue::Text(literal.to_string())),
        ValueRule::Text => match raw? {
            Value::String(text) if !text.is_empty() => Some(FieldValue::Text(text.clone())),
            Value::Number(number) => Some(FieldValue::Text(number.to_string())),
            Value::Bool(flag) => Some(FieldValue::Text(flag.to_string())),
            _ => None,
        },
        ValueRule::Date => {
            let text = raw?.as_str().filter(|text| !text.trim().is_empty())?;
            let formatted = format_date(text);
            if formatted.is_none() && !rejected_dates.contains(&field.source) {
                rejected_dates.push(field.source);
            }
            formatted.map(FieldValue::Text)
        }
        ValueRule::DataUri => raw?
            .as_str()
            .filter(|text| text.starts_with(DATA_URI_PREFIX))
            .map(|text| FieldValue::Signature(text.to_string())),
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(input) {
        return Some(date_time.date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(date_time.date());
        }
    }
    for pattern in ["%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, pattern) {
            return Some(date);
        }
    }
    None
}

pub fn format_date(input: &str) -> Option<String> {
    parse_date(input).map(|date| date.format("%m/%d/%Y").to_string())
}
