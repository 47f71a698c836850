//! Thin helpers over the `scraper` DOM.
//!
//! The extractors only need a handful of questions answered per node (tag,
//! classes, children including text, following siblings, text content), so
//! they go through these functions instead of touching `ego_tree` directly.

use scraper::{ElementRef, Html, Node, Selector};
use unicode_normalization::UnicodeNormalization;

/// A direct child or following sibling: either an element or a text run.
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
}

/// Parse a fragment after NFC normalization so that composed and decomposed
/// vowels in the vendor text compare equal.
pub fn parse_fragment(html: &str) -> Html {
    let normalized: String = html.nfc().collect();
    Html::parse_fragment(&normalized)
}

/// True when the fragment holds at least one element besides the synthetic root.
pub fn has_elements(fragment: &Html) -> bool {
    fragment
        .root_element()
        .descendants()
        .skip(1)
        .any(|node| node.value().is_element())
}

/// Selector for `tag.class`. Only used with the fixed class vocabulary.
pub fn class_selector(tag: &str, class: &str) -> Selector {
    Selector::parse(&format!("{}.{}", tag, class))
        .unwrap_or_else(|_| panic!("invalid selector {}.{}", tag, class))
}

pub fn tag_selector(tag: &str) -> Selector {
    Selector::parse(tag).unwrap_or_else(|_| panic!("invalid selector {}", tag))
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn is_tag(el: ElementRef<'_>, tag: &str) -> bool {
    el.value().name() == tag
}

/// Direct children in document order, comments and doctypes dropped.
pub fn children<'a>(el: ElementRef<'a>) -> impl Iterator<Item = Child<'a>> + 'a {
    el.children().filter_map(|node| match node.value() {
        Node::Text(text) => Some(Child::Text(&**text)),
        Node::Element(_) => ElementRef::wrap(node).map(Child::Element),
        _ => None,
    })
}

/// Siblings after `el`, in document order.
pub fn following_siblings<'a>(el: ElementRef<'a>) -> impl Iterator<Item = Child<'a>> + 'a {
    el.next_siblings().filter_map(|node| match node.value() {
        Node::Text(text) => Some(Child::Text(&**text)),
        Node::Element(_) => ElementRef::wrap(node).map(Child::Element),
        _ => None,
    })
}

/// Descendant elements in document order, excluding `el` itself.
pub fn descendant_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Text runs trimmed and concatenated without separator.
pub fn stripped_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Text runs trimmed and joined with single spaces.
pub fn spaced_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full text content with internal whitespace collapsed.
pub fn plain_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed text runs under `el`, skipping every subtree for which `exclude`
/// returns true.
pub fn projected_leaves<'a, F>(el: ElementRef<'a>, exclude: &F) -> Vec<&'a str>
where
    F: Fn(ElementRef<'a>) -> bool,
{
    let mut leaves = Vec::new();
    collect_leaves(el, exclude, &mut leaves);
    leaves
}

fn collect_leaves<'a, F>(el: ElementRef<'a>, exclude: &F, leaves: &mut Vec<&'a str>)
where
    F: Fn(ElementRef<'a>) -> bool,
{
    for child in children(el) {
        match child {
            Child::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    leaves.push(text);
                }
            }
            Child::Element(child) => {
                if !exclude(child) {
                    collect_leaves(child, exclude, leaves);
                }
            }
        }
    }
}
