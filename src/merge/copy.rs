//! Deep copy of object graphs between documents.
//!
//! Copies an arbitrary object reachable from a source document into the
//! destination, translating every reference it contains. A per-source
//! translation table guarantees each source object is copied at most
//! once, no matter how many paths reach it, and terminates reference
//! cycles.
//!
//! The cycle-breaking protocol: on first sight of a source reference, a
//! placeholder slot is reserved in the destination and the mapping is
//! recorded *before* recursing into the referenced object. Any path that
//! loops back to the same source reference finds the mapping and returns
//! the placeholder instead of recursing. Once the referenced object has
//! been copied, the placeholder slot is overwritten with the real
//! content under the same destination reference.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::HashMap;

use crate::error::{MergeError, Result};

/// Mapping from source references to destination references, built up
/// during one source's copy pass and discarded afterwards.
pub type TranslationTable = HashMap<ObjectId, ObjectId>;

/// Copy `object` from `src` into `dst`, translating every reference.
///
/// Returns the same-shaped object with all contained references replaced
/// by destination references. `table` is updated with every newly
/// discovered mapping; pass a fresh table per source document so that
/// distinct sources never collide on reference identity.
///
/// # Errors
///
/// Returns a store error if a source reference does not resolve.
pub fn copy_object(
    table: &mut TranslationTable,
    dst: &mut Document,
    src: &Document,
    object: &Object,
) -> Result<Object> {
    match object {
        Object::Reference(id) => {
            if let Some(&translated) = table.get(id) {
                return Ok(Object::Reference(translated));
            }

            // Reserve a destination slot and record the mapping before
            // recursing, so cycles resolve to the placeholder instead of
            // recursing forever.
            let placeholder = dst.add_object(Object::Null);
            table.insert(*id, placeholder);

            let referenced = src.get_object(*id).map_err(|e| {
                MergeError::store(format!("get source object {} {}", id.0, id.1), e)
            })?;
            let copied = copy_object(table, dst, src, referenced)?;

            // Bind the real content to the reserved reference.
            dst.objects.insert(placeholder, copied);

            Ok(Object::Reference(placeholder))
        }
        Object::Dictionary(dictionary) => Ok(Object::Dictionary(copy_dictionary(
            table, dst, src, dictionary,
        )?)),
        Object::Array(elements) => {
            let mut copied = Vec::with_capacity(elements.len());
            for element in elements {
                copied.push(copy_object(table, dst, src, element)?);
            }
            Ok(Object::Array(copied))
        }
        Object::Stream(stream) => {
            // The payload is opaque; only the stream dictionary can
            // carry references.
            let mut copied = stream.clone();
            copied.dict = copy_dictionary(table, dst, src, &stream.dict)?;
            Ok(Object::Stream(copied))
        }
        Object::Null
        | Object::Boolean(_)
        | Object::Integer(_)
        | Object::Real(_)
        | Object::Name(_)
        | Object::String(_, _) => Ok(object.clone()),
    }
}

/// Copy a dictionary entry by entry, preserving keys verbatim.
fn copy_dictionary(
    table: &mut TranslationTable,
    dst: &mut Document,
    src: &Document,
    dictionary: &Dictionary,
) -> Result<Dictionary> {
    let mut copied = Dictionary::new();
    for (key, value) in dictionary.iter() {
        copied.set(key.clone(), copy_object(table, dst, src, value)?);
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Stream;

    fn empty_documents() -> (Document, Document) {
        (
            Document::with_version("1.5"),
            Document::with_version("1.5"),
        )
    }

    fn resolve<'a>(doc: &'a Document, object: &Object) -> &'a Object {
        doc.get_object(object.as_reference().unwrap()).unwrap()
    }

    #[test]
    fn test_scalars_pass_through() {
        let (src, mut dst) = empty_documents();
        let mut table = TranslationTable::new();

        for object in [
            Object::Null,
            Object::Boolean(true),
            Object::Integer(42),
            Object::Real(2.5),
            Object::Name(b"Catalog".to_vec()),
            Object::string_literal("hello"),
        ] {
            let copied = copy_object(&mut table, &mut dst, &src, &object).unwrap();
            assert_eq!(copied, object);
        }

        assert!(table.is_empty());
        assert!(dst.objects.is_empty());
    }

    #[test]
    fn test_reference_copied_once() {
        let (mut src, mut dst) = empty_documents();
        let shared = src.add_object(dictionary! { "Kind" => "Shared" });
        let holder = src.add_object(dictionary! {
            "First" => shared,
            "Second" => shared,
        });

        let mut table = TranslationTable::new();
        let copied = copy_object(&mut table, &mut dst, &src, &Object::Reference(holder)).unwrap();

        let holder_dict = resolve(&dst, &copied).as_dict().unwrap();
        let first = holder_dict.get(b"First").unwrap().as_reference().unwrap();
        let second = holder_dict.get(b"Second").unwrap().as_reference().unwrap();

        // Both chains resolve to the same destination reference, and the
        // destination holds exactly one copy of the shared object.
        assert_eq!(first, second);
        assert_eq!(table.len(), 2);
        assert_eq!(dst.objects.len(), 2);
    }

    #[test]
    fn test_cycle_terminates_with_same_topology() {
        let (mut src, mut dst) = empty_documents();

        // pages <-> page reference cycle, as in any real page tree.
        let pages_id = src.new_object_id();
        let page_id = src.new_object_id();
        src.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }
            .into(),
        );
        src.objects.insert(
            page_id,
            dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
            }
            .into(),
        );

        let mut table = TranslationTable::new();
        let copied =
            copy_object(&mut table, &mut dst, &src, &Object::Reference(pages_id)).unwrap();

        let new_pages = copied.as_reference().unwrap();
        let pages_dict = dst.get_object(new_pages).unwrap().as_dict().unwrap();
        let kids = pages_dict.get(b"Kids").unwrap().as_array().unwrap();
        let new_page = kids[0].as_reference().unwrap();

        let page_dict = dst.get_object(new_page).unwrap().as_dict().unwrap();
        let parent = page_dict.get(b"Parent").unwrap().as_reference().unwrap();

        // The kid's Parent points back at the copied pages node.
        assert_eq!(parent, new_pages);
        assert_eq!(dst.objects.len(), 2);
    }

    #[test]
    fn test_array_order_preserved() {
        let (mut src, mut dst) = empty_documents();
        let a = src.add_object(dictionary! { "Index" => 0 });
        let b = src.add_object(dictionary! { "Index" => 1 });
        let c = src.add_object(dictionary! { "Index" => 2 });

        let mut table = TranslationTable::new();
        let copied = copy_object(
            &mut table,
            &mut dst,
            &src,
            &Object::Array(vec![a.into(), b.into(), c.into()]),
        )
        .unwrap();

        let elements = copied.as_array().unwrap();
        for (position, element) in elements.iter().enumerate() {
            let dict = resolve(&dst, element).as_dict().unwrap();
            let index = dict.get(b"Index").unwrap().as_i64().unwrap();
            assert_eq!(index as usize, position);
        }
    }

    #[test]
    fn test_stream_payload_carried_through() {
        let (mut src, mut dst) = empty_documents();
        let filter_id = src.add_object(Object::Integer(4));
        let stream = Stream::new(
            dictionary! { "DecodeParms" => filter_id },
            b"data".to_vec(),
        );
        let stream_id = src.add_object(Object::Stream(stream));

        let mut table = TranslationTable::new();
        let copied =
            copy_object(&mut table, &mut dst, &src, &Object::Reference(stream_id)).unwrap();

        match resolve(&dst, &copied) {
            Object::Stream(copied_stream) => {
                assert_eq!(copied_stream.content, b"data".to_vec());
                let parms = copied_stream.dict.get(b"DecodeParms").unwrap();
                let translated = parms.as_reference().unwrap();
                assert_ne!(translated, filter_id);
                assert_eq!(
                    dst.get_object(translated).unwrap().as_i64().unwrap(),
                    4
                );
            }
            other => panic!("expected a stream, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_reference_fails() {
        let (src, mut dst) = empty_documents();
        let mut table = TranslationTable::new();

        let result = copy_object(&mut table, &mut dst, &src, &Object::Reference((7, 0)));
        assert!(matches!(result, Err(MergeError::Store { .. })));
    }

    #[test]
    fn test_fresh_table_per_source_isolates_identity() {
        let (mut first, mut dst) = empty_documents();
        let mut second = Document::with_version("1.5");

        // Same numeric reference in two different documents must land in
        // two different destination slots.
        let first_id = first.add_object(dictionary! { "Origin" => "first" });
        let second_id = second.add_object(dictionary! { "Origin" => "second" });
        assert_eq!(first_id, second_id);

        let mut table = TranslationTable::new();
        let copied_first =
            copy_object(&mut table, &mut dst, &first, &Object::Reference(first_id)).unwrap();

        let mut table = TranslationTable::new();
        let copied_second =
            copy_object(&mut table, &mut dst, &second, &Object::Reference(second_id)).unwrap();

        assert_ne!(
            copied_first.as_reference().unwrap(),
            copied_second.as_reference().unwrap()
        );
        assert_eq!(dst.objects.len(), 2);
    }
}
