//! Reconciliation of per-source page trees into one tree.
//!
//! After every source's object graph has been copied into the
//! destination, each copied catalog still points at its own page-tree
//! root. This module builds a single new root whose kids are those
//! per-source roots, reparented, with an aggregated page count.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::error::{MergeError, Result};

/// Build one page tree over the page trees of the given catalogs.
///
/// `catalogs` are the already-copied per-source catalog dictionaries, in
/// source order; their `Pages` entries are destination references. Each
/// per-source page-tree root becomes a kid of the new root (kid order =
/// catalog order) and has its `Parent` set to the new root; no other
/// field of it is altered. The new root's `Count` is the sum of the
/// per-source counts.
///
/// # Errors
///
/// Returns a structural error naming the offending source index if a
/// catalog has no `Pages` entry of reference kind, if the referenced
/// object is not a dictionary, or if that dictionary has no integer
/// `Count`.
pub fn merge_page_trees(dst: &mut Document, catalogs: &[Dictionary]) -> Result<ObjectId> {
    // Reserve the new root's reference first; each per-source root needs
    // it as its Parent.
    let root_id = dst.add_object(Object::Null);

    let mut kids: Vec<Object> = Vec::with_capacity(catalogs.len());
    let mut page_count: i64 = 0;

    for (index, catalog) in catalogs.iter().enumerate() {
        let pages_id = catalog
            .get(b"Pages")
            .ok()
            .and_then(|object| object.as_reference().ok())
            .ok_or_else(|| {
                MergeError::structural(index, "catalog has no Pages entry of reference kind")
            })?;
        kids.push(pages_id.into());

        let mut pages = dst
            .get_object(pages_id)
            .ok()
            .and_then(|object| object.as_dict().ok())
            .cloned()
            .ok_or_else(|| {
                MergeError::structural(index, "Pages reference does not point to a dictionary")
            })?;

        page_count += pages
            .get(b"Count")
            .ok()
            .and_then(|object| object.as_i64().ok())
            .ok_or_else(|| {
                MergeError::structural(index, "page tree root has no integer Count")
            })?;

        // The former root is a kid now, so it gets a parent. Written
        // back to the same slot, not a new allocation.
        pages.set("Parent", root_id);
        dst.objects.insert(pages_id, Object::Dictionary(pages));
    }

    dst.objects.insert(
        root_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }
        .into(),
    );

    Ok(root_id)
}
