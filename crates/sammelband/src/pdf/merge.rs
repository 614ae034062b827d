//! Ordered, lossless merging of complete PDF documents.
//!
//! Every input must parse as a structurally valid PDF; one corrupt document
//! fails the whole merge, there is no skip-and-continue. Pages are appended
//! in stream order, in sequence order, and their content is carried over
//! untouched: the output page count is the sum of the input page counts.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::pdf::error::PdfError;
use crate::{Result, SammelbandError};

/// Concatenate `documents` into one PDF.
///
/// Page order is tracked in an explicit ordered list rather than derived
/// from object numbering, so ordering holds even for inputs whose page
/// objects are numbered out of page order.
pub fn merge_documents(documents: &[Vec<u8>]) -> Result<Vec<u8>> {
    if documents.is_empty() {
        return Err(SammelbandError::validation("no documents to merge"));
    }

    let mut max_id = 1;
    let mut page_order: Vec<ObjectId> = Vec::new();
    let mut pages: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for bytes in documents {
        let mut doc = Document::load_mem(bytes).map_err(PdfError::from)?;
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        for (_, object_id) in doc.get_pages() {
            let page = doc.get_object(object_id).map_err(PdfError::from)?.to_owned();
            page_order.push(object_id);
            pages.insert(object_id, page);
        }
        objects.extend(doc.objects);
    }

    let mut merged = Document::with_version("1.5");
    let mut catalog_entry: Option<(ObjectId, Dictionary)> = None;
    let mut pages_entry: Option<(ObjectId, Dictionary)> = None;

    for (object_id, object) in objects {
        let type_name = object
            .as_dict()
            .ok()
            .and_then(|dict| dict.get(b"Type").ok())
            .and_then(|name| match name {
                Object::Name(name) => Some(name.as_slice()),
                _ => None,
            });

        match type_name {
            Some(b"Catalog") => {
                if catalog_entry.is_none()
                    && let Ok(dict) = object.as_dict()
                {
                    catalog_entry = Some((object_id, dict.clone()));
                }
            }
            Some(b"Pages") => {
                // Fold every source page-tree root into one dictionary so
                // inheritable attributes survive; the first root's entries
                // win on conflict.
                if let Ok(dict) = object.as_dict() {
                    let mut dict = dict.clone();
                    if let Some((_, existing)) = &pages_entry {
                        for (key, value) in existing.iter() {
                            dict.set(key.clone(), value.clone());
                        }
                    }
                    let id = pages_entry.as_ref().map(|(id, _)| *id).unwrap_or(object_id);
                    pages_entry = Some((id, dict));
                }
            }
            // Pages are re-inserted below under the new page-tree root.
            Some(b"Page") => {}
            // Bookmark trees reference objects we discard; drop them.
            Some(b"Outlines") | Some(b"Outline") => {}
            _ => {
                merged.objects.insert(object_id, object);
            }
        }
    }

    let (pages_id, mut pages_dict) = pages_entry.ok_or(PdfError::MissingPageTree)?;
    let (catalog_id, mut catalog_dict) = catalog_entry.ok_or(PdfError::MissingCatalog)?;

    for object_id in &page_order {
        if let Some(object) = pages.get(object_id)
            && let Ok(dict) = object.as_dict()
        {
            let mut dict = dict.clone();
            dict.set("Parent", pages_id);
            merged.objects.insert(*object_id, Object::Dictionary(dict));
        }
    }

    pages_dict.set("Count", page_order.len() as i64);
    pages_dict.set(
        "Kids",
        page_order.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
    );
    merged.objects.insert(pages_id, Object::Dictionary(pages_dict));

    catalog_dict.set("Pages", pages_id);
    catalog_dict.remove(b"Outlines");
    merged.objects.insert(catalog_id, Object::Dictionary(catalog_dict));

    merged.trailer.set("Root", catalog_id);
    merged.max_id = merged.objects.len() as u32;
    merged.renumber_objects();
    merged.compress();

    let mut bytes = Vec::new();
    merged
        .save_to(&mut bytes)
        .map_err(|err| PdfError::WriteFailed(err.to_string()))?;
    Ok(bytes)
}

/// Page count of a serialized PDF.
pub fn page_count(bytes: &[u8]) -> Result<usize> {
    let doc = Document::load_mem(bytes).map_err(PdfError::from)?;
    Ok(doc.get_pages().len())
}
