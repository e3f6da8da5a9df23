use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use lopdf::{Document as LoDocument, ObjectId as LoObjectId, Stream as LoStream, dictionary};
use std::fmt;

pub const DATA_URI_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

// Browser canvases sometimes drop the trailing padding.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureFormat {
    Png,
    Jpeg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorSpace {
    Gray,
    Rgb,
}

impl ColorSpace {
    fn pdf_name(self) -> &'static str {
        match self {
            ColorSpace::Gray => "DeviceGray",
            ColorSpace::Rgb => "DeviceRGB",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureSkip {
    NotDataUri,
    Base64(String),
    UnsupportedImage,
}

impl fmt::Display for SignatureSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureSkip::NotDataUri => write!(f, "value is not an image data URI"),
            SignatureSkip::Base64(message) => write!(f, "payload is not valid base64: {}", message),
            SignatureSkip::UnsupportedImage => {
                write!(f, "unsupported image format, expected PNG or JPEG")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureImage {
    width: u32,
    height: u32,
    format: SignatureFormat,
    color_space: ColorSpace,
    data: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl SignatureImage {
    /// Decodes a `data:image/...` value. Everything after the `;base64,` marker
    /// is the payload; without a marker the whole value is tried.
    pub fn from_data_uri(value: &str) -> Result<Self, SignatureSkip> {
        let payload = data_uri_payload(value).ok_or(SignatureSkip::NotDataUri)?;
        let cleaned: String = payload.chars().filter(|ch| !ch.is_whitespace()).collect();
        let bytes = LENIENT_BASE64
            .decode(cleaned.as_bytes())
            .map_err(|err| SignatureSkip::Base64(err.to_string()))?;
        Self::from_bytes(&bytes).ok_or(SignatureSkip::UnsupportedImage)
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::from_png(bytes).or_else(|| Self::from_jpeg(bytes))
    }

    fn from_png(bytes: &[u8]) -> Option<Self> {
        let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png).ok()?;
        let (width, height) = (decoded.width(), decoded.height());
        let rgba = decoded.to_rgba8();
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        let mut alpha = Vec::with_capacity((width * height) as usize);
        let mut has_alpha = false;
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            if a != 255 {
                has_alpha = true;
            }
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }
        Some(Self {
            width,
            height,
            format: SignatureFormat::Png,
            color_space: ColorSpace::Rgb,
            data: rgb,
            alpha: has_alpha.then_some(alpha),
        })
    }

    fn from_jpeg(bytes: &[u8]) -> Option<Self> {
        let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Jpeg).ok()?;
        let color_space = match decoded.color() {
            image::ColorType::L8 | image::ColorType::La8 => ColorSpace::Gray,
            _ => ColorSpace::Rgb,
        };
        Some(Self {
            width: decoded.width(),
            height: decoded.height(),
            format: SignatureFormat::Jpeg,
            color_space,
            data: bytes.to_vec(),
            alpha: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> SignatureFormat {
        self.format
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    pub fn embed(&self, doc: &mut LoDocument) -> LoObjectId {
        let smask_id = self.alpha.as_ref().map(|alpha| {
            doc.add_object(LoStream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => self.width as i64,
                    "Height" => self.height as i64,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                alpha.clone(),
            ))
        });

        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => self.color_space.pdf_name(),
            "BitsPerComponent" => 8,
        };
        if let Some(id) = smask_id {
            dict.set("SMask", id);
        }
        let stream = match self.format {
            SignatureFormat::Png => LoStream::new(dict, self.data.clone()),
            SignatureFormat::Jpeg => {
                dict.set("Filter", "DCTDecode");
                LoStream::new(dict, self.data.clone()).with_compression(false)
            }
        };
        doc.add_object(stream)
    }
}

pub fn data_uri_payload(value: &str) -> Option<&str> {
    if !value.starts_with(DATA_URI_PREFIX) {
        return None;
    }
    Some(
        value
            .split_once(BASE64_MARKER)
            .map(|(_, payload)| payload)
            .unwrap_or(value),
    )
}
