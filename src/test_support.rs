use crate::signature::SignatureImage;
use base64::Engine;
use lopdf::{Document as LoDocument, Object as LoObject, Stream as LoStream, dictionary};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const CHECK_GLYPH_ID: u16 = 2;

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "esoc_fill_{}_{}_{}",
            label,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        std::fs::create_dir_all(&path).expect("mkdir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Smallest TrueType face ttf-parser accepts: cmap (format 12), head, hhea,
/// hmtx and maxp. Glyph 2 carries `ch` with an 800/1000 advance.
pub fn font_bytes_mapping(ch: char) -> Vec<u8> {
    let mut cmap = Vec::new();
    cmap.extend_from_slice(&0u16.to_be_bytes());
    cmap.extend_from_slice(&1u16.to_be_bytes());
    cmap.extend_from_slice(&3u16.to_be_bytes());
    cmap.extend_from_slice(&10u16.to_be_bytes());
    cmap.extend_from_slice(&12u32.to_be_bytes());
    cmap.extend_from_slice(&12u16.to_be_bytes());
    cmap.extend_from_slice(&0u16.to_be_bytes());
    cmap.extend_from_slice(&28u32.to_be_bytes());
    cmap.extend_from_slice(&0u32.to_be_bytes());
    cmap.extend_from_slice(&1u32.to_be_bytes());
    cmap.extend_from_slice(&(ch as u32).to_be_bytes());
    cmap.extend_from_slice(&(ch as u32).to_be_bytes());
    cmap.extend_from_slice(&(CHECK_GLYPH_ID as u32).to_be_bytes());

    let mut head = vec![0u8; 54];
    head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    head[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
    head[18..20].copy_from_slice(&1000u16.to_be_bytes());
    head[40..42].copy_from_slice(&1000i16.to_be_bytes());
    head[42..44].copy_from_slice(&800i16.to_be_bytes());

    let mut hhea = vec![0u8; 36];
    hhea[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    hhea[4..6].copy_from_slice(&800i16.to_be_bytes());
    hhea[6..8].copy_from_slice(&(-200i16).to_be_bytes());
    hhea[34..36].copy_from_slice(&3u16.to_be_bytes());

    let mut hmtx = Vec::new();
    for advance in [500u16, 600, 800] {
        hmtx.extend_from_slice(&advance.to_be_bytes());
        hmtx.extend_from_slice(&0i16.to_be_bytes());
    }

    let mut maxp = Vec::new();
    maxp.extend_from_slice(&0x0000_5000u32.to_be_bytes());
    maxp.extend_from_slice(&3u16.to_be_bytes());

    let tables: [(&[u8; 4], Vec<u8>); 5] = [
        (b"cmap", cmap),
        (b"head", head),
        (b"hhea", hhea),
        (b"hmtx", hmtx),
        (b"maxp", maxp),
    ];

    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&64u16.to_be_bytes());
    out.extend_from_slice(&2u16.to_be_bytes());
    out.extend_from_slice(&16u16.to_be_bytes());

    let mut offset = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in &tables {
        out.extend_from_slice(*tag);
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        offset = 12 + 16 * tables.len() + body.len();
    }
    out.extend_from_slice(&body);
    out
}

pub fn check_mark_font_bytes() -> Vec<u8> {
    font_bytes_mapping(crate::font::CHECK_MARK)
}

pub fn png_bytes(width: u32, height: u32, alpha: u8) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, alpha]));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .expect("encode png");
    out
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 200, 200]));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Jpeg)
        .expect("encode jpeg");
    out
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

pub fn tiny_signature_image() -> SignatureImage {
    SignatureImage::from_bytes(&png_bytes(2, 1, 255)).expect("signature image")
}

pub fn template_pdf_bytes(pages: usize, inherit_box: bool) -> Vec<u8> {
    let mut doc = LoDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let media_box =
        || LoObject::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]);

    let mut kids: Vec<LoObject> = Vec::with_capacity(pages);
    for index in 0..pages {
        let content = format!("BT /F1 10 Tf 36 756 Td (Form page {}) Tj ET", index + 1);
        let content_id = doc.add_object(LoStream::new(dictionary! {}, content.into_bytes()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        if !inherit_box {
            page.set("MediaBox", media_box());
        }
        kids.push(LoObject::Reference(doc.add_object(page)));
    }

    let mut pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
    };
    if inherit_box {
        pages_dict.set("MediaBox", media_box());
    }
    doc.objects.insert(pages_id, LoObject::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("save template");
    out
}

pub fn indirect_contents_pdf_bytes() -> Vec<u8> {
    let mut doc = LoDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
    });
    let body_id = doc.add_object(LoStream::new(
        dictionary! {},
        b"BT /F1 10 Tf 36 756 Td (TEMPLATE) Tj ET\n".to_vec(),
    ));
    let footer_id = doc.add_object(LoStream::new(
        dictionary! {},
        b"BT /F1 8 Tf 36 36 Td (FOOTER) Tj ET\n".to_vec(),
    ));
    let contents_id = doc.add_object(LoObject::Array(vec![
        LoObject::Reference(body_id),
        LoObject::Reference(footer_id),
    ]));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => contents_id,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        "MediaBox" => LoObject::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
    });
    doc.objects.insert(
        pages_id,
        LoObject::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![LoObject::Reference(page_id)],
            "Count" => 1i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("save template");
    out
}

pub struct AssetFixture {
    pub dir: TempDir,
    pub template_path: PathBuf,
    pub font_path: PathBuf,
}

impl AssetFixture {
    pub fn new(label: &str, pages: usize) -> Self {
        let dir = TempDir::new(label);
        let template_path = dir.path().join("E-SOC Paperwork.pdf");
        let font_path = dir.path().join("DejaVuSans.ttf");
        std::fs::write(&template_path, template_pdf_bytes(pages, false)).expect("write template");
        std::fs::write(&font_path, check_mark_font_bytes()).expect("write font");
        Self {
            dir,
            template_path,
            font_path,
        }
    }
}

pub fn page_operations(bytes: &[u8], page_index: usize) -> Vec<lopdf::content::Operation> {
    let doc = LoDocument::load_mem(bytes).expect("load output");
    let page_id = *doc
        .get_pages()
        .get(&(page_index as u32 + 1))
        .expect("page");
    let content = doc.get_page_content(page_id).expect("page content");
    lopdf::content::Content::decode(&content)
        .expect("decode content")
        .operations
}

pub fn shown_text(bytes: &[u8], page_index: usize) -> Vec<(f32, f32, Vec<u8>)> {
    let mut out = Vec::new();
    let mut position = (0.0f32, 0.0f32);
    for op in page_operations(bytes, page_index) {
        match op.operator.as_str() {
            "Td" if op.operands.len() == 2 => {
                let x = op.operands[0].as_float().expect("x");
                let y = op.operands[1].as_float().expect("y");
                position = (x, y);
            }
            "Tj" => {
                if let Some(LoObject::String(text, _)) = op.operands.first() {
                    out.push((position.0, position.1, text.clone()));
                }
            }
            _ => {}
        }
    }
    out
}
