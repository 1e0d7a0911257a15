//! [`PdfEngine`] implementation on top of `lopdf`.
//!
//! All operations load documents from disk and write their results back to
//! disk; nothing is cached between calls.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tracing::{debug, instrument};

use super::PdfEngine;
use crate::error::{PdfToolError, Result};
use crate::io::{load_document, save_document};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Object types that belong to a document's page tree or outline and are
/// rebuilt rather than copied when pages move between documents.
const STRUCTURAL_TYPES: [&[u8]; 5] = [b"Catalog", b"Pages", b"Page", b"Outlines", b"Outline"];

/// Guard against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// PDF engine backed by `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfEngine;

impl LopdfEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl PdfEngine for LopdfEngine {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn page_count(&self, path: &Path) -> Result<usize> {
        let doc = load_document("page_count", path)?;
        let count = doc.get_pages().len();
        debug!(count, "Counted pages");
        Ok(count)
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn split(&self, path: &Path, out_dir: &Path) -> Result<()> {
        let doc = load_document("split", path)?;
        let fail = |reason: String| PdfToolError::engine("split", path, reason);

        let pages_id = root_pages_id(&doc).map_err(|err| fail(err.to_string()))?;
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("page");

        let pages = doc.get_pages();
        for (number, &page_id) in &pages {
            let mut single = doc.clone();
            isolate_page(&mut single, pages_id, page_id).map_err(|err| fail(err.to_string()))?;

            let target = out_dir.join(format!("{stem}_{number}.pdf"));
            save_document("split", &mut single, &target)?;
        }

        debug!(pages = pages.len(), "Split document");
        Ok(())
    }

    #[instrument(skip_all, fields(inputs = inputs.len(), output = %output.display()))]
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        if inputs.is_empty() {
            return Err(PdfToolError::engine("merge", output, "no input documents"));
        }

        let mut merged = Document::with_version("1.5");
        let mut next_id = 1;
        let mut kids: Vec<ObjectId> = Vec::new();

        for input in inputs {
            let mut doc = load_document("merge", input)?;

            // Shift object numbers so nothing collides with earlier inputs.
            doc.renumber_objects_with(next_id);
            next_id = doc.max_id + 1;

            if doc.version > merged.version {
                merged.version = doc.version.clone();
            }

            let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
            for &page_id in &page_ids {
                let mut page = doc
                    .get_dictionary(page_id)
                    .map_err(|err| PdfToolError::engine("merge", input, err))?
                    .clone();
                inherit_attributes(&doc, &mut page);
                merged.objects.insert(page_id, Object::Dictionary(page));
            }

            for (id, object) in doc.objects {
                if merged.objects.contains_key(&id) || is_structural(&object) {
                    continue;
                }
                merged.objects.insert(id, object);
            }

            kids.extend(page_ids);
        }

        merged.max_id = next_id;
        let pages_id = merged.new_object_id();

        for &page_id in &kids {
            if let Ok(page) = merged.get_dictionary_mut(page_id) {
                page.set("Parent", Object::Reference(pages_id));
            }
        }

        let kid_refs: Vec<Object> = kids.iter().map(|&id| Object::Reference(id)).collect();
        merged.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kid_refs,
                "Count" => kids.len() as i64,
            }),
        );

        let catalog_id = merged.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        merged.trailer.set("Root", catalog_id);
        merged.renumber_objects();

        debug!(pages = kids.len(), "Merged documents");
        save_document("merge", &mut merged, output)
    }

    #[instrument(skip(self), fields(input = %input.display()))]
    fn optimize(&self, input: &Path, output: &Path) -> Result<()> {
        let mut doc = load_document("optimize", input)?;

        let empty_streams = doc.delete_zero_length_streams();
        let pruned = doc.prune_objects();
        doc.renumber_objects();
        doc.compress();

        debug!(
            empty_streams = empty_streams.len(),
            pruned = pruned.len(),
            "Optimized document"
        );
        save_document("optimize", &mut doc, output)
    }

    #[instrument(skip(self), fields(base = %base.display(), top = %top.display()))]
    fn overlay(&self, base: &Path, top: &Path, output: &Path) -> Result<()> {
        let mut doc = load_document("overlay", base)?;
        let mut layer = load_document("overlay", top)?;

        let base_page = first_page(&doc, base)?;
        layer.renumber_objects_with(doc.max_id + 1);
        let layer_page = first_page(&layer, top)?;

        let mut layer_dict = layer
            .get_dictionary(layer_page)
            .map_err(|err| PdfToolError::engine("overlay", top, err))?
            .clone();
        inherit_attributes(&layer, &mut layer_dict);

        let content = layer
            .get_page_content(layer_page)
            .map_err(|err| PdfToolError::engine("overlay", top, err))?;
        let bbox = layer_dict
            .get(b"MediaBox")
            .cloned()
            .unwrap_or_else(|_| default_media_box());
        let layer_resources = layer_dict
            .get(b"Resources")
            .cloned()
            .unwrap_or_else(|_| Object::Dictionary(Dictionary::new()));

        // The layer's own content streams are replaced by the form XObject.
        let layer_contents: BTreeSet<ObjectId> = content_references(&layer, &layer_dict)
            .into_iter()
            .filter_map(|object| object.as_reference().ok())
            .collect();

        doc.max_id = doc.max_id.max(layer.max_id);
        for (id, object) in layer.objects {
            if is_structural(&object) || layer_contents.contains(&id) {
                continue;
            }
            doc.objects.insert(id, object);
        }

        let form_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => bbox,
                "Resources" => layer_resources,
            },
            content,
        ));

        let mut page = doc
            .get_dictionary(base_page)
            .map_err(|err| PdfToolError::engine("overlay", base, err))?
            .clone();
        inherit_attributes(&doc, &mut page);

        let mut resources =
            resolve_dictionary(&doc, page.get(b"Resources").ok()).unwrap_or_else(Dictionary::new);
        let mut xobjects =
            resolve_dictionary(&doc, resources.get(b"XObject").ok()).unwrap_or_else(Dictionary::new);
        let name = fresh_xobject_name(&xobjects);
        xobjects.set(name.as_bytes().to_vec(), Object::Reference(form_id));
        resources.set("XObject", xobjects);
        page.set("Resources", resources);

        // Isolate the base content in its own graphics state, then paint the layer.
        let mut contents = content_references(&doc, &page);
        let open_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        let paint_id = doc.add_object(Stream::new(
            Dictionary::new(),
            format!("\nQ\nq /{name} Do Q\n").into_bytes(),
        ));
        contents.insert(0, Object::Reference(open_id));
        contents.push(Object::Reference(paint_id));
        page.set("Contents", contents);

        doc.objects.insert(base_page, Object::Dictionary(page));

        debug!(xobject = %name, "Stamped layer onto base page");
        save_document("overlay", &mut doc, output)
    }
}

fn root_pages_id(doc: &Document) -> lopdf::Result<ObjectId> {
    doc.catalog()?.get(b"Pages")?.as_reference()
}

fn first_page(doc: &Document, path: &Path) -> Result<ObjectId> {
    doc.get_pages()
        .into_values()
        .next()
        .ok_or_else(|| PdfToolError::engine("overlay", path, "document has no pages"))
}

fn is_structural(object: &Object) -> bool {
    object
        .type_name()
        .is_ok_and(|name| STRUCTURAL_TYPES.contains(&name))
}

/// Reduce `doc` to the single page `page_id`, hung directly off the root
/// page tree node.
fn isolate_page(doc: &mut Document, pages_id: ObjectId, page_id: ObjectId) -> lopdf::Result<()> {
    let mut page = doc.get_dictionary(page_id)?.clone();
    inherit_attributes(doc, &mut page);
    page.set("Parent", Object::Reference(pages_id));
    doc.objects.insert(page_id, Object::Dictionary(page));

    let root = doc.get_dictionary_mut(pages_id)?;
    root.set("Kids", vec![Object::Reference(page_id)]);
    root.set("Count", 1_i64);

    if let Ok(catalog) = doc.catalog_mut() {
        catalog.remove(b"Outlines");
    }

    doc.prune_objects();
    Ok(())
}

/// Copy inheritable attributes from the page's ancestors onto the page
/// itself, so the page survives being re-parented.
fn inherit_attributes(doc: &Document, page: &mut Dictionary) {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(node_id) = parent {
        if depth == MAX_TREE_DEPTH {
            break;
        }
        depth += 1;

        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        for key in INHERITABLE_KEYS {
            if !page.has(key)
                && let Ok(value) = node.get(key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
}

fn resolve_dictionary(doc: &Document, object: Option<&Object>) -> Option<Dictionary> {
    match object? {
        Object::Dictionary(dict) => Some(dict.clone()),
        Object::Reference(id) => doc.get_dictionary(*id).ok().cloned(),
        _ => None,
    }
}

/// The page's `Contents` entry flattened into a list of stream references.
fn content_references(doc: &Document, page: &Dictionary) -> Vec<Object> {
    match page.get(b"Contents") {
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(items)) => items.clone(),
            _ => vec![Object::Reference(*id)],
        },
        Ok(Object::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

fn fresh_xobject_name(xobjects: &Dictionary) -> String {
    let mut n = 1;
    loop {
        let name = format!("Layer{n}");
        if !xobjects.has(name.as_bytes()) {
            return name;
        }
        n += 1;
    }
}

fn default_media_box() -> Object {
    Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()])
}
