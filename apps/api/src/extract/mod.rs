//! Document Extractor — converts an uploaded PDF into plain text with
//! hyperlinks inlined as parenthetical annotations near their anchor text,
//! so a text-only consumer (the LLM) can see where each link points.

use std::panic::AssertUnwindSafe;

use lopdf::{Document, Object};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document has no pages")]
    NoPages,

    #[error("document contains no extractable text")]
    NoText,

    #[error("could not read document: {0}")]
    Unreadable(String),
}

/// A hyperlink discovered in the document: either an embedded link annotation
/// or a plain-text URL (where the anchor is the URL itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAnnotation {
    pub anchor: String,
    pub url: String,
}

#[derive(Debug)]
pub struct ExtractedDocument {
    pub text: String,
    pub links: Vec<LinkAnnotation>,
}

/// Extracts page-ordered text and hyperlinks from raw PDF bytes.
///
/// Failure is always an error value: a zero-page document, an unreadable
/// file, or a panic inside the extraction library never escapes to the
/// caller as a crash.
pub fn extract_document(bytes: &[u8]) -> Result<ExtractedDocument, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractError::Unreadable(e.to_string()))?;

    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(ExtractError::NoPages);
    }
    debug!(pages = pages.len(), "PDF opened");

    // pdf-extract can panic on malformed content streams; contain it.
    let text = std::panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }))
    .map_err(|_| ExtractError::Unreadable("text extraction panicked".to_string()))?
    .map_err(|e| ExtractError::Unreadable(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ExtractError::NoText);
    }

    let annotations = collect_link_annotations(&doc);
    let plain_urls = find_plain_text_urls(&text);
    let links = merge_links(annotations, plain_urls);

    let embedded = embed_links(&text, &links);
    info!(
        text_len = embedded.len(),
        links = links.len(),
        "PDF extraction complete"
    );

    Ok(ExtractedDocument {
        text: embedded.trim().to_string(),
        links,
    })
}

/// Walks every page's `/Annots` array for Link annotations with URI actions.
///
/// The text extractor exposes no per-rect anchor text, so the anchor falls
/// back to the URI; links with a distinct anchor can still arrive from other
/// sources and flow through the same embedding pass.
fn collect_link_annotations(doc: &Document) -> Vec<LinkAnnotation> {
    let mut links = Vec::new();

    for (_page_num, page_id) in doc.get_pages() {
        let Ok(page) = doc.get_dictionary(page_id) else {
            continue;
        };
        let Ok(annots_obj) = page.get(b"Annots") else {
            continue;
        };
        let Object::Array(annots) = resolve(doc, annots_obj) else {
            continue;
        };

        for annot_obj in annots {
            let Object::Dictionary(annot) = resolve(doc, annot_obj) else {
                continue;
            };
            let is_link = annot
                .get(b"Subtype")
                .ok()
                .and_then(|s| s.as_name().ok())
                .map(|n| n == b"Link")
                .unwrap_or(false);
            if !is_link {
                continue;
            }
            let Some(action_obj) = annot.get(b"A").ok() else {
                continue;
            };
            let Object::Dictionary(action) = resolve(doc, action_obj) else {
                continue;
            };
            if let Ok(Object::String(uri, _)) = action.get(b"URI").map(|o| resolve(doc, o)) {
                let url = String::from_utf8_lossy(uri).trim().to_string();
                if !url.is_empty() {
                    links.push(LinkAnnotation {
                        anchor: url.clone(),
                        url,
                    });
                }
            }
        }
    }

    links
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        other => other,
    }
}

/// Finds URLs written as plain text: scheme-prefixed or `www.`-prefixed,
/// stopping at whitespace or characters outside the permissive URL set.
pub fn find_plain_text_urls(text: &str) -> Vec<String> {
    let pattern = Regex::new(r"(?:https?://|www\.)[A-Za-z0-9./?=&_\-]+").expect("valid URL regex");
    pattern
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Merges plain-text URLs into the annotation list, deduplicating by exact
/// URL string (annotations win).
pub fn merge_links(annotations: Vec<LinkAnnotation>, plain_urls: Vec<String>) -> Vec<LinkAnnotation> {
    let mut links: Vec<LinkAnnotation> = Vec::new();
    let mut seen_urls: Vec<String> = Vec::new();

    for link in annotations {
        if !seen_urls.contains(&link.url) {
            seen_urls.push(link.url.clone());
            links.push(link);
        }
    }
    for url in plain_urls {
        if !seen_urls.contains(&url) {
            seen_urls.push(url.clone());
            links.push(LinkAnnotation {
                anchor: url.clone(),
                url,
            });
        }
    }
    links
}

/// Inserts ` (url)` after the first occurrence of each link's anchor text.
///
/// Longest anchors are processed first so a longer anchor is embedded before
/// a shorter one that might be its substring. The URL is not inserted when it
/// already appears in a short window after the anchor — that happens when the
/// same link shows up in two different page elements.
pub fn embed_links(text: &str, links: &[LinkAnnotation]) -> String {
    let mut sorted: Vec<&LinkAnnotation> = links.iter().collect();
    sorted.sort_by_key(|l| std::cmp::Reverse(l.anchor.len()));

    let mut out = text.to_string();
    let mut embedded = 0usize;

    for link in sorted {
        let anchor = link.anchor.trim();
        let url = link.url.trim();
        if anchor.is_empty() || url.is_empty() || anchor == url {
            continue;
        }
        if let Some(idx) = out.find(anchor) {
            let after = idx + anchor.len();
            let window: String = out[after..].chars().take(url.chars().count() + 5).collect();
            if !window.contains(url) {
                out.insert_str(after, &format!(" ({url})"));
                embedded += 1;
            }
        }
    }

    debug!(embedded, "links embedded into extracted text");
    out
}
