use crate::assets::{Asset, AssetKind};
use crate::error::FillError;
use crate::types::Size;
use lopdf::{Dictionary as LoDictionary, Document as LoDocument, Object as LoObject, ObjectId as LoObjectId};
use std::path::Path;

// Page tree nesting deeper than this is treated as a cycle.
const MAX_PAGE_TREE_DEPTH: usize = 32;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateChecks {
    pub sha256: Option<String>,
    pub expected_pages: Option<usize>,
}

#[derive(Debug)]
pub struct Template {
    doc: LoDocument,
    page_ids: Vec<LoObjectId>,
    page_sizes: Vec<Size>,
}

impl Template {
    pub fn load(path: &Path, checks: &TemplateChecks) -> Result<Self, FillError> {
        let asset = Asset::load(AssetKind::Template, path)?;
        asset.verify_sha256(checks.sha256.as_deref())?;
        let template = Self::from_bytes(&asset.data)?;
        if let Some(expected) = checks.expected_pages {
            template.expect_page_count(expected)?;
        }
        tracing::debug!(
            path = %path.display(),
            pages = template.page_count(),
            "template loaded"
        );
        Ok(template)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FillError> {
        let doc = LoDocument::load_mem(bytes)
            .map_err(|err| FillError::Template(format!("template PDF could not be parsed: {err}")))?;
        if doc.is_encrypted() {
            return Err(FillError::Template("template PDF is encrypted".to_string()));
        }
        let page_ids: Vec<LoObjectId> = doc.get_pages().values().copied().collect();
        if page_ids.is_empty() {
            return Err(FillError::Template("template PDF has no pages".to_string()));
        }
        let page_sizes = page_ids
            .iter()
            .map(|id| media_box_size(&doc, *id).unwrap_or_else(Size::letter))
            .collect();
        Ok(Self {
            doc,
            page_ids,
            page_sizes,
        })
    }

    pub fn expect_page_count(&self, expected: usize) -> Result<(), FillError> {
        if self.page_count() == expected {
            return Ok(());
        }
        Err(FillError::Template(format!(
            "template has {} pages, expected {}",
            self.page_count(),
            expected
        )))
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn page_id(&self, page_index: usize) -> Option<LoObjectId> {
        self.page_ids.get(page_index).copied()
    }

    pub fn page_size(&self, page_index: usize) -> Size {
        self.page_sizes
            .get(page_index)
            .copied()
            .unwrap_or_else(Size::letter)
    }

    pub fn document(&self) -> &LoDocument {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut LoDocument {
        &mut self.doc
    }

    pub fn into_document(self) -> LoDocument {
        self.doc
    }
}

/// Looks up a page attribute, walking `Parent` links for inheritable keys
/// such as `MediaBox` and `Resources`.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a LoDocument,
    page_id: LoObjectId,
    key: &[u8],
) -> Option<&'a LoObject> {
    let mut node = doc.get_object(page_id).and_then(LoObject::as_dict).ok()?;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(resolve(doc, value));
        }
        let parent = node.get(b"Parent").and_then(LoObject::as_reference).ok()?;
        node = doc.get_object(parent).and_then(LoObject::as_dict).ok()?;
    }
    None
}

pub(crate) fn resolve<'a>(doc: &'a LoDocument, object: &'a LoObject) -> &'a LoObject {
    match object {
        LoObject::Reference(id) => doc.get_object(*id).unwrap_or(object),
        other => other,
    }
}

pub(crate) fn resolved_dict(doc: &LoDocument, object: Option<&LoObject>) -> LoDictionary {
    object
        .map(|object| resolve(doc, object))
        .and_then(|object| object.as_dict().ok())
        .cloned()
        .unwrap_or_default()
}

fn media_box_size(doc: &LoDocument, page_id: LoObjectId) -> Option<Size> {
    let values = inherited_attribute(doc, page_id, b"MediaBox")?
        .as_array()
        .ok()?
        .iter()
        .map(|value| resolve(doc, value).as_float().ok())
        .collect::<Option<Vec<f32>>>()?;
    let &[x0, y0, x1, y1] = values.as_slice() else {
        return None;
    };
    let size = Size::new((x1 - x0).abs(), (y1 - y0).abs());
    (size.width > 0.0 && size.height > 0.0).then_some(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, TempDir};

    #[test]
    fn reads_pages_and_media_box() {
        let template =
            Template::from_bytes(&test_support::template_pdf_bytes(3, false)).expect("template");
        assert_eq!(template.page_count(), 3);
        assert_eq!(template.page_size(2), Size::new(612.0, 792.0));
        assert!(template.page_id(2).is_some());
        assert!(template.page_id(3).is_none());
    }

    #[test]
    fn media_box_is_inherited_from_page_tree() {
        let template =
            Template::from_bytes(&test_support::template_pdf_bytes(2, true)).expect("template");
        let page_id = template.page_id(0).expect("page");
        let page = template
            .document()
            .get_object(page_id)
            .and_then(LoObject::as_dict)
            .expect("page dict");
        assert!(page.get(b"MediaBox").is_err());
        assert_eq!(template.page_size(1), Size::new(612.0, 792.0));
    }

    #[test]
    fn malformed_bytes_are_a_template_error() {
        let err = Template::from_bytes(b"not a pdf document").expect_err("malformed");
        assert_eq!(err.code(), "TemplateError");
    }

    #[test]
    fn page_count_pin_is_enforced() {
        let fixture = test_support::AssetFixture::new("template_pages", 2);
        let checks = TemplateChecks {
            expected_pages: Some(18),
            ..TemplateChecks::default()
        };
        let err = Template::load(&fixture.template_path, &checks).expect_err("page count");
        assert_eq!(err.code(), "TemplateError");
        assert!(err.to_string().contains("expected 18"));

        let checks = TemplateChecks {
            expected_pages: Some(2),
            ..TemplateChecks::default()
        };
        assert!(Template::load(&fixture.template_path, &checks).is_ok());
    }

    #[test]
    fn sha_pin_mismatch_is_an_asset_error() {
        let fixture = test_support::AssetFixture::new("template_sha", 1);
        let checks = TemplateChecks {
            sha256: Some("00".repeat(32)),
            ..TemplateChecks::default()
        };
        let err = Template::load(&fixture.template_path, &checks).expect_err("sha");
        assert_eq!(err.code(), "AssetError");
    }

    #[test]
    fn missing_template_is_not_found() {
        let dir = TempDir::new("template_missing");
        let err = Template::load(&dir.path().join("absent.pdf"), &TemplateChecks::default())
            .expect_err("missing");
        assert_eq!(err.code(), "TemplateNotFoundError");
    }
}
