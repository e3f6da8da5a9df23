use crate::canvas::{Command, FontRef, PageCanvas};
use crate::types::Color;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct ResourceNames {
    pub helvetica: String,
    pub check_mark: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EncodedContent {
    pub bytes: Vec<u8>,
    pub replaced_chars: usize,
    pub skipped_glyphs: usize,
}

/// Serializes a page overlay into content-stream operators, reflecting every
/// top-down y against the page height.
pub fn encode_page(canvas: &PageCanvas, names: &ResourceNames) -> EncodedContent {
    let size = canvas.size();
    let mut out = String::new();
    let mut replaced_chars = 0usize;
    let mut skipped_glyphs = 0usize;
    let mut current_font: Option<(FontRef, f32)> = None;
    let mut font_stack: Vec<Option<(FontRef, f32)>> = Vec::new();

    for cmd in canvas.commands() {
        match cmd {
            Command::SaveState => {
                font_stack.push(current_font);
                out.push_str("q\n");
            }
            Command::RestoreState => {
                current_font = font_stack.pop().unwrap_or(current_font);
                out.push_str("Q\n");
            }
            Command::SetFillColor(color) => out.push_str(&color_to_pdf_fill(*color)),
            Command::SetStrokeColor(color) => out.push_str(&color_to_pdf_stroke(*color)),
            Command::SetLineWidth(width) => out.push_str(&format!("{} w\n", fmt(*width))),
            Command::SetFont { font, size } => current_font = Some((*font, *size)),
            Command::MoveTo { x, y } => {
                out.push_str(&format!("{} {} m\n", fmt(*x), fmt(size.flip_y(*y))));
            }
            Command::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                out.push_str(&format!(
                    "{} {} {} {} {} {} c\n",
                    fmt(*x1),
                    fmt(size.flip_y(*y1)),
                    fmt(*x2),
                    fmt(size.flip_y(*y2)),
                    fmt(*x),
                    fmt(size.flip_y(*y)),
                ));
            }
            Command::ClosePath => out.push_str("h\n"),
            Command::Stroke => out.push_str("S\n"),
            Command::DrawString { x, y, text } => {
                let font_size = current_font.map(|(_, s)| s).unwrap_or(12.0);
                let encoded = encode_winansi_pdf_string(text);
                replaced_chars += encoded.replaced;
                out.push_str("BT\n");
                out.push_str(&format!("/{} {} Tf\n", names.helvetica, fmt(font_size)));
                out.push_str(&format!("{} {} Td\n", fmt(*x), fmt(size.flip_y(*y))));
                out.push_str(&format!("({}) Tj\n", encoded.text));
                out.push_str("ET\n");
            }
            Command::DrawGlyph { x, y, glyph_id } => {
                let Some(resource) = names.check_mark.as_deref() else {
                    skipped_glyphs += 1;
                    continue;
                };
                let font_size = match current_font {
                    Some((FontRef::CheckMark, s)) => s,
                    _ => 12.0,
                };
                out.push_str("BT\n");
                out.push_str(&format!("/{} {} Tf\n", resource, fmt(font_size)));
                out.push_str(&format!("{} {} Td\n", fmt(*x), fmt(size.flip_y(*y))));
                out.push_str(&format!("<{:04X}> Tj\n", glyph_id));
                out.push_str("ET\n");
            }
            Command::DrawImage {
                x,
                y,
                width,
                height,
                image,
            } => {
                let Some(name) = names.images.get(*image) else {
                    continue;
                };
                let draw_y = size.flip_y(*y) - *height;
                out.push_str("q\n");
                out.push_str(&format!(
                    "{} 0 0 {} {} {} cm\n",
                    fmt(*width),
                    fmt(*height),
                    fmt(*x),
                    fmt(draw_y)
                ));
                out.push_str(&format!("/{} Do\n", name));
                out.push_str("Q\n");
            }
        }
    }

    EncodedContent {
        bytes: out.into_bytes(),
        replaced_chars,
        skipped_glyphs,
    }
}

pub(crate) struct WinAnsiEncoded {
    pub(crate) text: String,
    pub(crate) replaced: usize,
}

// Encodes into a WinAnsi literal-string body. Characters outside cp1252 become `?`.
pub(crate) fn encode_winansi_pdf_string(input: &str) -> WinAnsiEncoded {
    let mut out = String::new();
    let mut replaced = 0usize;
    for ch in input.chars() {
        let byte = match ch {
            '\u{0000}'..='\u{007F}' => ch as u8,
            '\u{00A0}'..='\u{00FF}' => ch as u8,
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            _ => {
                replaced += 1;
                b'?'
            }
        };

        match byte {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b if b < 0x20 || b >= 0x7f => out.push_str(&format!("\\{:03o}", b)),
            b => out.push(b as char),
        }
    }

    WinAnsiEncoded {
        text: out,
        replaced,
    }
}

pub(crate) fn to_unicode_cmap(glyph_map: &BTreeMap<u16, char>) -> String {
    let mut out = String::new();
    out.push_str("/CIDInit /ProcSet findresource begin\n");
    out.push_str("12 dict begin\n");
    out.push_str("begincmap\n");
    out.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (Identity) /Supplement 0 >> def\n");
    out.push_str("/CMapName /Adobe-Identity-UCS def\n");
    out.push_str("/CMapType 2 def\n");
    out.push_str("1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");

    let entries: Vec<(&u16, &char)> = glyph_map.iter().collect();
    for chunk in entries.chunks(100) {
        out.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, ch) in chunk {
            let mut units = [0u16; 2];
            let uni: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{:04X}", unit))
                .collect();
            out.push_str(&format!("<{:04X}> <{}>\n", gid, uni));
        }
        out.push_str("endbfchar\n");
    }

    out.push_str("endcmap\n");
    out.push_str("CMapName currentdict /CMap defineresource pop\n");
    out.push_str("end\nend\n");
    out
}

pub(crate) fn fmt(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let milli = (value as f64 * 1000.0).round() as i64;
    format_milli(milli)
}

fn format_milli(milli: i64) -> String {
    if milli == 0 {
        return "0".to_string();
    }
    let sign = if milli < 0 { "-" } else { "" };
    let abs = milli.abs();
    let int_part = abs / 1000;
    let frac_part = abs % 1000;
    if frac_part == 0 {
        format!("{}{}", sign, int_part)
    } else {
        let mut s = format!("{}{}.{:03}", sign, int_part, frac_part);
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        s
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

fn color_to_pdf_fill(color: Color) -> String {
    format!(
        "{} {} {} rg\n",
        fmt(clamp_unit(color.r)),
        fmt(clamp_unit(color.g)),
        fmt(clamp_unit(color.b))
    )
}

fn color_to_pdf_stroke(color: Color) -> String {
    format!(
        "{} {} {} RG\n",
        fmt(clamp_unit(color.r)),
        fmt(clamp_unit(color.g)),
        fmt(clamp_unit(color.b))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;
    use lopdf::Object as LoObject;
    use lopdf::content::Content;

    fn names() -> ResourceNames {
        ResourceNames {
            helvetica: "EsocHelv".to_string(),
            check_mark: Some("EsocCheck".to_string()),
            images: vec!["EsocSig1".to_string()],
        }
    }

    #[test]
    fn fmt_trims_trailing_zeros() {
        assert_eq!(fmt(12.0), "12");
        assert_eq!(fmt(1.5), "1.5");
        assert_eq!(fmt(0.0001), "0");
        assert_eq!(fmt(-3.25), "-3.25");
        assert_eq!(fmt(f32::NAN), "0");
    }

    #[test]
    fn winansi_replaces_unencodable_characters() {
        let encoded = encode_winansi_pdf_string("Zoë (✔) \u{4e2d}");
        assert_eq!(encoded.replaced, 2);
        assert_eq!(encoded.text, "Zo\\353 \\(?\\) ?");
    }

    #[test]
    fn draw_string_is_reflected_against_page_height() {
        let mut canvas = PageCanvas::new(0, Size::letter());
        canvas.set_font(FontRef::Helvetica, 12.0);
        canvas.draw_string(121.0, 168.0, "Jane Doe");
        let encoded = encode_page(&canvas, &names());
        let content = Content::decode(&encoded.bytes).expect("valid content");

        let td = content
            .operations
            .iter()
            .find(|op| op.operator == "Td")
            .expect("Td");
        assert_eq!(td.operands[0].as_float().expect("x"), 121.0);
        assert_eq!(td.operands[1].as_float().expect("y"), 624.0);

        let tj = content
            .operations
            .iter()
            .find(|op| op.operator == "Tj")
            .expect("Tj");
        match &tj.operands[0] {
            LoObject::String(bytes, _) => assert_eq!(bytes.as_slice(), b"Jane Doe"),
            other => panic!("unexpected operand {other:?}"),
        }
    }

    #[test]
    fn circle_path_is_reflected_against_page_height() {
        let mut canvas = PageCanvas::new(0, Size::letter());
        canvas.stroke_circle(500.0, 240.0, 14.0);
        let encoded = encode_page(&canvas, &names());
        let content = Content::decode(&encoded.bytes).expect("valid content");
        let operands = |op: &lopdf::content::Operation| -> Vec<f32> {
            op.operands
                .iter()
                .map(|value| value.as_float().expect("number"))
                .collect()
        };

        let move_to = content
            .operations
            .iter()
            .find(|op| op.operator == "m")
            .expect("m");
        assert_eq!(operands(move_to), vec![514.0, 552.0]);

        let curves: Vec<Vec<f32>> = content
            .operations
            .iter()
            .filter(|op| op.operator == "c")
            .map(operands)
            .collect();
        let endpoints: Vec<(f32, f32)> = curves.iter().map(|c| (c[4], c[5])).collect();
        assert_eq!(
            endpoints,
            vec![(500.0, 538.0), (486.0, 552.0), (500.0, 566.0), (514.0, 552.0)]
        );

        let top_down: Vec<[f32; 6]> = canvas
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                Command::CurveTo { x1, y1, x2, y2, x, y } => Some([*x1, *y1, *x2, *y2, *x, *y]),
                _ => None,
            })
            .collect();
        assert_eq!(top_down.len(), curves.len());
        for (encoded, source) in curves.iter().zip(&top_down) {
            for axis in [1, 3, 5] {
                assert!((encoded[axis] - (792.0 - source[axis])).abs() < 0.01);
            }
            for axis in [0, 2, 4] {
                assert!((encoded[axis] - source[axis]).abs() < 0.01);
            }
        }
    }

    #[test]
    fn glyph_without_embedded_font_is_skipped() {
        let mut canvas = PageCanvas::new(0, Size::letter());
        canvas.set_font(FontRef::CheckMark, 14.0);
        canvas.draw_glyph(38.0, 198.0, 7);
        let mut names = names();
        names.check_mark = None;
        let encoded = encode_page(&canvas, &names);
        assert_eq!(encoded.skipped_glyphs, 1);
        assert!(encoded.bytes.is_empty());
    }

    #[test]
    fn glyph_is_written_as_identity_hex() {
        let mut canvas = PageCanvas::new(0, Size::letter());
        canvas.set_font(FontRef::CheckMark, 14.0);
        canvas.draw_glyph(38.0, 198.0, 0x2a);
        let encoded = encode_page(&canvas, &names());
        let text = String::from_utf8(encoded.bytes).expect("utf8");
        assert!(text.contains("/EsocCheck 14 Tf"));
        assert!(text.contains("38 594 Td"));
        assert!(text.contains("<002A> Tj"));
    }

    #[test]
    fn image_footprint_hangs_below_the_anchor() {
        let mut canvas = PageCanvas::new(1, Size::letter());
        canvas.draw_image(38.0, 610.0, 120.0, 30.0, crate::test_support::tiny_signature_image());
        let encoded = encode_page(&canvas, &names());
        let text = String::from_utf8(encoded.bytes).expect("utf8");
        assert!(text.contains("120 0 0 30 38 152 cm"));
        assert!(text.contains("/EsocSig1 Do"));
    }

    #[test]
    fn to_unicode_cmap_maps_check_mark() {
        let mut map = BTreeMap::new();
        map.insert(0x2a_u16, '\u{2714}');
        let cmap = to_unicode_cmap(&map);
        assert!(cmap.contains("1 beginbfchar\n<002A> <2714>\n"));
    }
}
