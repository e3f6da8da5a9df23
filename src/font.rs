use crate::error::FillError;
use crate::pdf::to_unicode_cmap;
use lopdf::{Document as LoDocument, ObjectId as LoObjectId, Stream as LoStream, dictionary};
use std::collections::BTreeMap;
use std::path::Path;

pub const CHECK_MARK: char = '\u{2714}';

#[derive(Debug, Clone)]
struct FontMetrics {
    ascent: i16,
    descent: i16,
    cap_height: i16,
    italic_angle: i16,
    bbox: (i16, i16, i16, i16),
    is_fixed_pitch: bool,
    symbolic: bool,
}

impl FontMetrics {
    fn from_face(face: &ttf_parser::Face<'_>, symbolic: bool) -> Self {
        let units_per_em = face.units_per_em().max(1);
        let scale = 1000.0 / units_per_em as f32;
        let ascent = scale_i16(face.ascender(), scale);
        let bbox = face.global_bounding_box();
        Self {
            ascent,
            descent: scale_i16(face.descender(), scale),
            cap_height: face
                .capital_height()
                .map(|value| scale_i16(value, scale))
                .unwrap_or(ascent),
            italic_angle: face
                .italic_angle()
                .map(|value| value.round() as i16)
                .unwrap_or(0),
            bbox: (
                scale_i16(bbox.x_min, scale),
                scale_i16(bbox.y_min, scale),
                scale_i16(bbox.x_max, scale),
                scale_i16(bbox.y_max, scale),
            ),
            is_fixed_pitch: face.is_monospaced(),
            symbolic,
        }
    }

    fn flags(&self) -> i64 {
        let mut flags = if self.symbolic { 4 } else { 32 };
        if self.is_fixed_pitch {
            flags |= 1;
        }
        flags
    }
}

/// TrueType face used only for the check mark glyph. Embedded as a Type0 /
/// Identity-H font the first time a page draws a tick.
#[derive(Debug, Clone)]
pub struct CheckMarkFont {
    name: String,
    data: Vec<u8>,
    glyph_id: u16,
    advance: u16,
    metrics: FontMetrics,
}

impl CheckMarkFont {
    pub fn from_bytes(data: Vec<u8>, source: &Path) -> Result<Self, FillError> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|err| {
            FillError::Asset(format!("invalid font data for {}: {err}", source.display()))
        })?;
        if face.tables().cff.is_some() {
            return Err(FillError::Asset(format!(
                "{} is a CFF-flavoured OpenType font; a TrueType outline font is required",
                source.display()
            )));
        }

        let name = font_name(&face, source);
        let (symbolic, fallback) = select_symbol_subtable(&face);
        let glyph = glyph_index_for_codepoint(&face, CHECK_MARK as u32, fallback).ok_or_else(|| {
            FillError::Asset(format!(
                "font {} has no glyph for U+{:04X}",
                name, CHECK_MARK as u32
            ))
        })?;
        let scale = 1000.0 / face.units_per_em().max(1) as f32;
        let advance = face
            .glyph_hor_advance(glyph)
            .map(|adv| (adv as f32 * scale).round().clamp(0.0, u16::MAX as f32) as u16)
            .unwrap_or(1000);
        let metrics = FontMetrics::from_face(&face, symbolic);

        Ok(Self {
            name,
            data,
            glyph_id: glyph.0,
            advance,
            metrics,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, FillError> {
        let data = crate::assets::read_required(path)?;
        Self::from_bytes(data, path)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn glyph_id(&self) -> u16 {
        self.glyph_id
    }

    pub fn advance(&self) -> u16 {
        self.advance
    }

    pub fn embed(&self, doc: &mut LoDocument) -> LoObjectId {
        let base_font = sanitize_font_name(&self.name);
        let metrics = &self.metrics;

        let font_file_id = doc.add_object(LoStream::new(
            dictionary! { "Length1" => self.data.len() as i64 },
            self.data.clone(),
        ));
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => base_font.as_str(),
            "Flags" => metrics.flags(),
            "FontBBox" => vec![
                (metrics.bbox.0 as i64).into(),
                (metrics.bbox.1 as i64).into(),
                (metrics.bbox.2 as i64).into(),
                (metrics.bbox.3 as i64).into(),
            ],
            "ItalicAngle" => metrics.italic_angle as i64,
            "Ascent" => metrics.ascent as i64,
            "Descent" => metrics.descent as i64,
            "CapHeight" => metrics.cap_height as i64,
            "StemV" => 80,
            "MissingWidth" => self.advance as i64,
            "FontFile2" => font_file_id,
        });
        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => base_font.as_str(),
            "CIDSystemInfo" => dictionary! {
                "Registry" => lopdf::Object::string_literal("Adobe"),
                "Ordering" => lopdf::Object::string_literal("Identity"),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor_id,
            "W" => vec![
                (self.glyph_id as i64).into(),
                vec![(self.advance as i64).into()].into(),
            ],
            "CIDToGIDMap" => "Identity",
        });

        let mut glyph_map = BTreeMap::new();
        glyph_map.insert(self.glyph_id, CHECK_MARK);
        let to_unicode_id = doc.add_object(LoStream::new(
            dictionary! {},
            to_unicode_cmap(&glyph_map).into_bytes(),
        ));

        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => base_font.as_str(),
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![cid_font_id.into()],
            "ToUnicode" => to_unicode_id,
        })
    }
}

fn select_symbol_subtable<'a>(
    face: &'a ttf_parser::Face<'a>,
) -> (bool, Option<ttf_parser::cmap::Subtable<'a>>) {
    let Some(cmap) = face.tables().cmap else {
        return (false, None);
    };
    let mut first = None;
    let mut symbol = None;
    let mut has_unicode = false;
    for subtable in cmap.subtables {
        if first.is_none() {
            first = Some(subtable);
        }
        if subtable.platform_id == ttf_parser::name::PlatformId::Windows
            && subtable.encoding_id == 0
        {
            symbol = Some(subtable);
        }
        if subtable.is_unicode() {
            has_unicode = true;
        }
    }
    if has_unicode {
        (false, None)
    } else {
        (symbol.is_some(), symbol.or(first))
    }
}

fn glyph_index_for_codepoint<'a>(
    face: &'a ttf_parser::Face<'a>,
    codepoint: u32,
    fallback: Option<ttf_parser::cmap::Subtable<'a>>,
) -> Option<ttf_parser::GlyphId> {
    if let Some(ch) = char::from_u32(codepoint) {
        if let Some(id) = face.glyph_index(ch) {
            return Some(id);
        }
    }
    if let Some(subtable) = fallback {
        if let Some(id) = subtable.glyph_index(codepoint) {
            return Some(id);
        }
        return subtable.glyph_index(codepoint + 0xF000);
    }
    None
}

fn font_name(face: &ttf_parser::Face<'_>, path: &Path) -> String {
    use ttf_parser::name::name_id;

    let mut full = None;
    let mut post = None;
    for entry in face.names() {
        let Some(name) = entry.to_string() else {
            continue;
        };
        match entry.name_id {
            name_id::POST_SCRIPT_NAME if post.is_none() => post = Some(name),
            name_id::FULL_NAME if full.is_none() => full = Some(name),
            _ => {}
        }
    }
    let stem = path
        .file_stem()
        .and_then(|v| v.to_str())
        .map(|v| v.to_string());
    post.or(full)
        .or(stem)
        .unwrap_or_else(|| "EmbeddedFont".to_string())
}

fn sanitize_font_name(name: &str) -> String {
    let mut out = String::new();
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
        } else if ch == ' ' {
            out.push('-');
        }
    }
    if out.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        out
    }
}

fn scale_i16(value: i16, scale: f32) -> i16 {
    let scaled = (value as f32 * scale).round() as i32;
    scaled.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use lopdf::Object as LoObject;

    #[test]
    fn finds_check_mark_glyph_and_scales_advance() {
        let font = CheckMarkFont::from_bytes(
            test_support::check_mark_font_bytes(),
            Path::new("DejaVuSans.ttf"),
        )
        .expect("font");
        assert_eq!(font.glyph_id(), test_support::CHECK_GLYPH_ID);
        assert_eq!(font.advance(), 800);
        assert_eq!(font.name(), "DejaVuSans");
    }

    #[test]
    fn font_without_check_mark_is_an_asset_error() {
        let err = CheckMarkFont::from_bytes(
            test_support::font_bytes_mapping('A'),
            Path::new("Plain.ttf"),
        )
        .expect_err("missing glyph");
        assert_eq!(err.code(), "AssetError");
        assert!(err.to_string().contains("U+2714"));
    }

    #[test]
    fn garbage_bytes_are_an_asset_error() {
        let err = CheckMarkFont::from_bytes(b"not a font".to_vec(), Path::new("x.ttf"))
            .expect_err("garbage");
        assert_eq!(err.code(), "AssetError");
    }

    #[test]
    fn embed_builds_type0_identity_font() {
        let font = CheckMarkFont::from_bytes(
            test_support::check_mark_font_bytes(),
            Path::new("DejaVuSans.ttf"),
        )
        .expect("font");
        let mut doc = LoDocument::with_version("1.7");
        let type0_id = font.embed(&mut doc);
        let type0 = doc
            .get_object(type0_id)
            .and_then(LoObject::as_dict)
            .expect("type0 dict");
        assert_eq!(
            type0.get(b"Subtype").and_then(LoObject::as_name).expect("subtype"),
            b"Type0"
        );
        assert_eq!(
            type0.get(b"Encoding").and_then(LoObject::as_name).expect("encoding"),
            b"Identity-H"
        );
        assert_eq!(doc.objects.len(), 5);
    }

    #[test]
    fn sanitize_font_name_keeps_pdf_name_characters() {
        assert_eq!(sanitize_font_name("DejaVu Sans"), "DejaVu-Sans");
        assert_eq!(sanitize_font_name("(#)"), "EmbeddedFont");
    }
}
