//! HTML diagram renderer
//!
//! Fills the askama template in `templates/diagram.html`. The node and edge
//! arrays are spliced into `JSON.parse('...')` calls, so the serialized JSON
//! is escaped for a single-quoted JavaScript string that sits inside an HTML
//! `<script>` element.
//!
//! A page headed for the minifier is rendered as a skeleton whose literals
//! hold slot names instead of data. The JS minifier requotes string literals
//! and rewrites their escapes, so the data is spliced in only afterwards with
//! [`fill_slots`].

use super::{Library, RenderOptions};
use crate::core::error::{Error, Result};
use crate::core::models::FlowDocument;
use crate::debug;
use askama::Template;

/// Distance between hierarchy levels in the initial layout.
const LEVEL_SEPARATION: u32 = 200;
/// Distance between nodes sharing a level in the initial layout.
const NODE_SPACING: u32 = 200;

/// Skeleton literal standing in for the node array.
pub const NODES_SLOT: &str = "__skyebridge_nodes__";
/// Skeleton literal standing in for the edge array.
pub const EDGES_SLOT: &str = "__skyebridge_edges__";

/// Quotes a minifier may put around a string literal.
const QUOTES: [char; 3] = ['\'', '"', '`'];

#[derive(Template)]
#[template(path = "diagram.html")]
struct DiagramTemplate<'a> {
    title: &'a str,
    cdn_url: Option<&'a str>,
    library_code: &'a str,
    nodes: &'a str,
    edges: &'a str,
    level_separation: u32,
    node_spacing: u32,
}

/// Render `doc` into a complete HTML page.
///
/// The output depends only on the arguments, so identical inputs give
/// byte-identical pages. Minification is a separate step.
///
/// # Errors
/// Returns an error if the document cannot be serialized or the template
/// fails to render.
pub fn render(doc: &FlowDocument, options: &RenderOptions, library: &Library) -> Result<String> {
    let nodes = js_string_body(&doc.nodes_json()?);
    let edges = js_string_body(&doc.edges_json()?);

    let html = render_page(&nodes, &edges, options, library)?;
    debug!(
        "Rendered {} nodes and {} edges into {} bytes",
        doc.nodes.len(),
        doc.edges.len(),
        html.len()
    );
    Ok(html)
}

/// Render the page with [`NODES_SLOT`] and [`EDGES_SLOT`] in place of the
/// data, for minification followed by [`fill_slots`].
///
/// # Errors
/// Returns an error if the template fails to render.
pub fn render_skeleton(options: &RenderOptions, library: &Library) -> Result<String> {
    render_page(NODES_SLOT, EDGES_SLOT, options, library)
}

/// Replace the slot literals of a (possibly minified) skeleton with the
/// escaped data of `doc`, each as a single-quoted literal again.
///
/// # Errors
/// Returns [`Error::Minify`] when a slot literal is missing from `page`, or
/// a serialization error.
pub fn fill_slots(page: &str, doc: &FlowDocument) -> Result<String> {
    let nodes = js_string_body(&doc.nodes_json()?);
    let edges = js_string_body(&doc.edges_json()?);

    let mut slots = [
        (slot_literal(page, NODES_SLOT)?, nodes),
        (slot_literal(page, EDGES_SLOT)?, edges),
    ];
    // Back to front, so earlier ranges stay valid.
    slots.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));

    let mut filled = page.to_string();
    for (range, body) in slots {
        filled.replace_range(range, &format!("'{body}'"));
    }
    Ok(filled)
}

/// Byte range of the quoted literal holding `slot`, quotes included.
fn slot_literal(page: &str, slot: &str) -> Result<std::ops::Range<usize>> {
    let lost = || Error::Minify(format!("embedded data slot {slot} was not preserved"));
    let start = page.find(slot).ok_or_else(lost)?;
    let end = start + slot.len();

    let open = page[..start].chars().next_back().ok_or_else(lost)?;
    let close = page[end..].chars().next().ok_or_else(lost)?;
    if open != close || !QUOTES.contains(&open) {
        return Err(lost());
    }
    Ok(start - open.len_utf8()..end + close.len_utf8())
}

fn render_page(
    nodes: &str,
    edges: &str,
    options: &RenderOptions,
    library: &Library,
) -> Result<String> {
    let cdn_url = match library {
        Library::Cdn(url) => Some(escape_attribute(url)),
        Library::Inline(_) => None,
    };
    let library_code = match library {
        Library::Inline(code) => code.as_str(),
        Library::Cdn(_) => "",
    };

    let template = DiagramTemplate {
        title: &options.title,
        cdn_url: cdn_url.as_deref(),
        library_code,
        nodes,
        edges,
        level_separation: LEVEL_SEPARATION,
        node_spacing: NODE_SPACING,
    };
    Ok(template.render()?)
}

/// Escape JSON text for the body of a single-quoted JavaScript string
/// inside an HTML script element.
///
/// Quotes and backslashes cannot end the literal, and `<`, `>`, `&` never
/// appear raw, so data such as `</script>` cannot close the element.
#[must_use]
pub fn js_string_body(json: &str) -> String {
    let mut out = String::with_capacity(json.len() + json.len() / 8);
    for c in json.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// Escape a value for a double-quoted HTML attribute.
fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
