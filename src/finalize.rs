use crate::canvas::{FontRef, PageCanvas};
use crate::error::FillError;
use crate::font::CheckMarkFont;
use crate::pdf::{ResourceNames, encode_page};
use crate::template::{Template, inherited_attribute, resolved_dict};
use lopdf::{Document as LoDocument, Object as LoObject, ObjectId as LoObjectId, Stream as LoStream, dictionary};

pub const HELVETICA_RESOURCE: &str = "EsocHelv";
pub const CHECK_MARK_RESOURCE: &str = "EsocCheck";
const IMAGE_RESOURCE_PREFIX: &str = "EsocSig";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedPage {
    pub page_index: usize,
    pub content_bytes: usize,
    pub replaced_chars: usize,
    pub skipped_glyphs: usize,
    pub images: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StampSummary {
    pub pages: Vec<StampedPage>,
    pub check_font_embedded: bool,
}

impl StampSummary {
    pub fn pages_written(&self) -> usize {
        self.pages.len()
    }
}

fn lopdf_err(err: lopdf::Error) -> FillError {
    FillError::Template(format!("pdf stamp error: {err}"))
}

/// Appends each non-empty canvas to its template page. The template content is
/// isolated in `q`/`Q` so its graphics state cannot leak into the overlay.
pub fn stamp_overlays(
    template: &mut Template,
    canvases: &[PageCanvas],
    check_font: Option<&CheckMarkFont>,
) -> Result<StampSummary, FillError> {
    let mut summary = StampSummary::default();
    let mut helvetica_id: Option<LoObjectId> = None;
    let mut check_font_id: Option<LoObjectId> = None;
    let mut image_counter = 0usize;

    for canvas in canvases.iter().filter(|canvas| !canvas.is_empty()) {
        let page_index = canvas.page_index();
        let page_id = template.page_id(page_index).ok_or_else(|| {
            FillError::Template(format!(
                "overlay targets page {} but the template has {}",
                page_index + 1,
                template.page_count()
            ))
        })?;
        let doc = template.document_mut();

        let mut fonts = Vec::new();
        if canvas.uses_font(FontRef::Helvetica) {
            let id = *helvetica_id.get_or_insert_with(|| add_helvetica(doc));
            fonts.push((HELVETICA_RESOURCE, id));
        }
        let mut check_mark = None;
        if canvas.uses_font(FontRef::CheckMark) {
            if let Some(font) = check_font {
                let id = *check_font_id.get_or_insert_with(|| font.embed(doc));
                fonts.push((CHECK_MARK_RESOURCE, id));
                check_mark = Some(CHECK_MARK_RESOURCE.to_string());
            }
        }

        let mut images = Vec::with_capacity(canvas.images().len());
        for image in canvas.images() {
            image_counter += 1;
            let name = format!("{IMAGE_RESOURCE_PREFIX}{image_counter}");
            images.push((name, image.embed(doc)));
        }

        let names = ResourceNames {
            helvetica: HELVETICA_RESOURCE.to_string(),
            check_mark,
            images: images.iter().map(|(name, _)| name.clone()).collect(),
        };
        let encoded = encode_page(canvas, &names);
        if encoded.skipped_glyphs > 0 {
            tracing::warn!(
                page = page_index + 1,
                skipped = encoded.skipped_glyphs,
                "check marks dropped, no check mark font available"
            );
        }

        merge_resources(doc, page_id, &fonts, &images)?;
        wrap_page_contents(doc, page_id, encoded.bytes.clone())?;

        summary.pages.push(StampedPage {
            page_index,
            content_bytes: encoded.bytes.len(),
            replaced_chars: encoded.replaced_chars,
            skipped_glyphs: encoded.skipped_glyphs,
            images: images.len(),
        });
    }

    summary.check_font_embedded = check_font_id.is_some();
    Ok(summary)
}

pub fn serialize(template: Template) -> Result<Vec<u8>, FillError> {
    let mut doc = template.into_document();
    doc.prune_objects();
    doc.renumber_objects();
    doc.compress();
    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|err| FillError::Serialization(err.to_string()))?;
    Ok(out)
}

fn add_helvetica(doc: &mut LoDocument) -> LoObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    })
}

fn merge_resources(
    doc: &mut LoDocument,
    page_id: LoObjectId,
    fonts: &[(&str, LoObjectId)],
    images: &[(String, LoObjectId)],
) -> Result<(), FillError> {
    let mut resources = resolved_dict(doc, inherited_attribute(doc, page_id, b"Resources"));
    if !fonts.is_empty() {
        let mut font_dict = resolved_dict(doc, resources.get(b"Font").ok());
        for (name, id) in fonts {
            font_dict.set(name.as_bytes().to_vec(), LoObject::Reference(*id));
        }
        resources.set("Font", LoObject::Dictionary(font_dict));
    }
    if !images.is_empty() {
        let mut xobjects = resolved_dict(doc, resources.get(b"XObject").ok());
        for (name, id) in images {
            xobjects.set(name.as_bytes().to_vec(), LoObject::Reference(*id));
        }
        resources.set("XObject", LoObject::Dictionary(xobjects));
    }

    let page = doc
        .get_object_mut(page_id)
        .and_then(LoObject::as_dict_mut)
        .map_err(lopdf_err)?;
    page.set("Resources", LoObject::Dictionary(resources));
    Ok(())
}

fn wrap_page_contents(
    doc: &mut LoDocument,
    page_id: LoObjectId,
    overlay: Vec<u8>,
) -> Result<(), FillError> {
    let existing: Vec<LoObject> = {
        let page = doc
            .get_object(page_id)
            .and_then(LoObject::as_dict)
            .map_err(lopdf_err)?;
        match page.get(b"Contents") {
            Ok(LoObject::Reference(id)) => match doc.get_object(*id) {
                Ok(LoObject::Array(items)) => items.clone(),
                _ => vec![LoObject::Reference(*id)],
            },
            Ok(LoObject::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    };

    let mut contents = Vec::with_capacity(existing.len() + 2);
    let mut tail = Vec::with_capacity(overlay.len() + 3);
    if !existing.is_empty() {
        contents.push(LoObject::Reference(
            doc.add_object(LoStream::new(dictionary! {}, b"q\n".to_vec())),
        ));
        contents.extend(existing);
        tail.extend_from_slice(b"\nQ\n");
    }
    tail.extend_from_slice(&overlay);
    contents.push(LoObject::Reference(
        doc.add_object(LoStream::new(dictionary! {}, tail)),
    ));

    let page = doc
        .get_object_mut(page_id)
        .and_then(LoObject::as_dict_mut)
        .map_err(lopdf_err)?;
    page.set("Contents", LoObject::Array(contents));
    Ok(())
}
