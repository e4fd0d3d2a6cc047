//! Image XObject embedding

use std::collections::HashMap;

use crate::document::ResolvedImage;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// An image embedded in the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageXObject {
    pub id: ObjectId,
    pub width: u32,
    pub height: u32,
}

/// Decode image bytes and add them to `output` as an RGB image XObject.
///
/// Alpha is dropped. The pixel stream is left uncompressed here and flate
/// compressed with the rest of the document when it is finalized.
pub fn embed_image(output: &mut Document, bytes: &[u8]) -> Result<ImageXObject> {
    let decoded = image::load_from_memory(bytes)?.to_rgb8();
    let (width, height) = decoded.dimensions();

    let dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(width as i64)),
        ("Height", Object::Integer(height as i64)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
    ]);

    let id = output.add_object(Stream::new(dict, decoded.into_raw()));
    Ok(ImageXObject { id, width, height })
}

/// Embedded images keyed by source, so each image is stored once per document.
///
/// Sources that fail to decode are remembered too and stay blank.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, Option<ImageXObject>>,
}

impl ImageCache {
    /// Embed `image` unless it was already seen
    pub fn get_or_embed(
        &mut self,
        output: &mut Document,
        image: &ResolvedImage,
    ) -> Option<ImageXObject> {
        if let Some(cached) = self.entries.get(&image.source) {
            return *cached;
        }

        let embedded = match embed_image(output, &image.bytes) {
            Ok(xobject) => Some(xobject),
            Err(e) => {
                log::warn!("Could not decode image {}: {}", image.source, e);
                None
            }
        };
        self.entries.insert(image.source.clone(), embedded);
        embedded
    }

    pub fn embedded_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_some()).count()
    }
}
