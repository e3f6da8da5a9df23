mod assets;
mod canvas;
mod config;
mod coordinates;
mod error;
mod fill;
mod finalize;
mod font;
mod medication;
mod metrics;
mod normalize;
mod pdf;
mod registry;
mod render;
pub mod server;
mod signature;
mod template;
mod types;

#[cfg(test)]
mod test_support;

pub use assets::{Asset, AssetKind, sha256_hex};
pub use canvas::{Command, FontRef, PageCanvas};
pub use config::{
    DEFAULT_ADDR, DEFAULT_FONT_PATH, DEFAULT_MEDICATION_PAGE, DEFAULT_TEMPLATE_PATH, FillConfig,
};
pub use error::FillError;
pub use fill::{FilledPdf, FormFiller};
pub use finalize::{StampSummary, StampedPage, serialize, stamp_overlays};
pub use font::{CHECK_MARK, CheckMarkFont};
pub use medication::{TableColumn, TableLayout, column_char_budget, fit_text_to_column};
pub use metrics::{FillMetrics, PageMetrics};
pub use normalize::{
    FieldValue, FillRequest, MedicationRow, NormalizedBag, PageBag, format_date, is_truthy,
    normalize, parse_date,
};
pub use pdf::{EncodedContent, ResourceNames, encode_page};
pub use registry::{FieldCoordinate, FieldDescriptor, FieldKind, FieldRegistry, ValueRule};
pub use render::{FieldRenderer, Overlay, SignatureFootprint};
pub use signature::{SignatureFormat, SignatureImage, SignatureSkip, data_uri_payload};
pub use template::{Template, TemplateChecks};
pub use types::{Color, Size};
