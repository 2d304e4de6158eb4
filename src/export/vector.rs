use std::collections::BTreeMap;

use anyhow::Context as _;
use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, Event},
};

use crate::foundation::error::{EmojiError, EmojiResult};

/// SVG namespace written on merged documents.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Merge SVG documents into one `size`×`size` document.
///
/// The top-level element children of every input root are copied verbatim, in input order, under
/// a new root with `viewBox="0 0 size size"`. Prefixed namespace declarations (`xmlns:xlink`, ...)
/// of the input roots are carried to the new root; other root attributes are not. A prefix bound
/// to different URIs by two inputs is an error.
pub fn merge_svg_documents<S: AsRef<str>>(docs: &[S], size: u32) -> EmojiResult<String> {
    let mut body = Writer::new(Vec::new());
    let mut namespaces = BTreeMap::<String, String>::new();
    for (i, doc) in docs.iter().enumerate() {
        let declared = copy_top_level_children(doc.as_ref(), &mut body)
            .map_err(|e| EmojiError::export(format!("svg document #{i}: {e}")))?;
        for (prefix, uri) in declared {
            if let Some(bound) = namespaces.get(&prefix)
                && *bound != uri
            {
                return Err(EmojiError::export(format!(
                    "namespace prefix '{prefix}' bound to both '{bound}' and '{uri}'"
                )));
            }
            namespaces.insert(prefix, uri);
        }
    }

    let side = size.to_string();
    let view_box = format!("0 0 {size} {size}");
    let mut root = BytesStart::new("svg").with_attributes([
        ("width", side.as_str()),
        ("height", side.as_str()),
        ("viewBox", view_box.as_str()),
        ("fill", "none"),
        ("xmlns", SVG_NS),
    ]);
    for (prefix, uri) in &namespaces {
        let key = format!("xmlns:{prefix}");
        root.push_attribute((key.as_bytes(), uri.as_bytes()));
    }

    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Start(root))
        .context("write merged svg root")?;
    writer.get_mut().extend_from_slice(&body.into_inner());
    writer
        .write_event(Event::End(BytesEnd::new("svg")))
        .context("close merged svg root")?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| EmojiError::export(format!("merged svg is not utf-8: {e}")))
}

/// Copy every element subtree directly under the `<svg>` root of `doc` into `out`.
///
/// Whitespace and comments between those children are dropped; everything inside a child is kept.
/// Returns the prefixed namespace declarations of the root as `(prefix, uri)` pairs, values raw.
pub fn copy_top_level_children(
    doc: &str,
    out: &mut Writer<Vec<u8>>,
) -> EmojiResult<Vec<(String, String)>> {
    let mut reader = Reader::from_str(doc);
    let mut depth = 0usize;
    let mut root_namespaces = None;

    loop {
        let event = reader.read_event().context("parse svg document")?;
        match event {
            Event::Eof => break,
            Event::Start(e) => {
                if depth == 0 {
                    root_namespaces = Some(read_root(&e, root_namespaces.is_some())?);
                } else {
                    out.write_event(Event::Start(e)).context("copy svg node")?;
                }
                depth += 1;
            }
            Event::End(e) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| EmojiError::export("unbalanced svg document"))?;
                if depth >= 1 {
                    out.write_event(Event::End(e)).context("copy svg node")?;
                }
            }
            Event::Empty(e) => {
                if depth == 0 {
                    root_namespaces = Some(read_root(&e, root_namespaces.is_some())?);
                } else {
                    out.write_event(Event::Empty(e)).context("copy svg node")?;
                }
            }
            other => {
                if depth >= 2 {
                    out.write_event(other).context("copy svg node")?;
                }
            }
        }
    }

    root_namespaces.ok_or_else(|| EmojiError::export("document has no <svg> root"))
}

fn read_root(e: &BytesStart<'_>, saw_root: bool) -> EmojiResult<Vec<(String, String)>> {
    if saw_root {
        return Err(EmojiError::export("document has more than one root element"));
    }
    if e.local_name().as_ref() != b"svg" {
        return Err(EmojiError::export(format!(
            "document root is <{}>, expected <svg>",
            String::from_utf8_lossy(e.name().as_ref())
        )));
    }

    let mut declared = Vec::new();
    for attr in e.attributes() {
        let attr = attr.context("read svg root attribute")?;
        if let Some(prefix) = attr.key.as_ref().strip_prefix(b"xmlns:") {
            declared.push((
                String::from_utf8_lossy(prefix).into_owned(),
                String::from_utf8_lossy(&attr.value).into_owned(),
            ));
        }
    }
    Ok(declared)
}

#[cfg(test)]
#[path = "../../tests/unit/export/vector.rs"]
mod tests;
