//! Splits an article into senses: definition, context, examples and idioms.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classes;
use crate::markup::{
    class_selector, collapse_whitespace, has_class, is_tag, plain_text, projected_leaves,
    spaced_text, stripped_text,
};

lazy_static! {
    static ref SENSE_BLOCKS: Selector = class_selector("span", classes::SENSE_BLOCK);
    static ref DEFINITION_AREA: Selector = class_selector("span", classes::DEFINITION_AREA);
    static ref DEFINITIONS: Selector = class_selector("span", classes::DEFINITION);
    static ref EXPLANATIONS: Selector = class_selector("span", classes::IDIOM_EXPLANATION);
    static ref IDIOM_BLOCKS: Selector = class_selector("span", classes::IDIOM_BLOCK);
    static ref EXAMPLES: Selector = class_selector("span", classes::EXAMPLE);
    static ref CONTEXTS: Selector = class_selector("span", classes::CONTEXT);
    static ref BRACKETS: Selector = class_selector("span", classes::BRACKET);

    static ref SPACE_BEFORE_PUNCTUATION: Regex = Regex::new(r"\s+([,.;:])").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idiom {
    pub expression: String,
    pub explanation: String,
}

/// One numbered sense of the article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
    pub definition: String,
    pub context: Option<String>,
    pub examples: Vec<String>,
    pub idioms: Vec<Idiom>,
}

/// Every sense block in document order. Blocks with neither a definition nor
/// an idiom are skipped.
pub fn extract_meanings(article: &Html) -> Vec<Meaning> {
    article
        .select(&SENSE_BLOCKS)
        .filter_map(segment_sense)
        .collect()
}

fn segment_sense(block: ElementRef<'_>) -> Option<Meaning> {
    let area = block.select(&DEFINITION_AREA).next();
    let definition = area.map(definition_text).unwrap_or_default();

    if let Some(area) = area {
        if !definition.is_empty() && !has_primary_definition(area) {
            debug!(definition = %definition, "definition taken from the bare definition area");
        }
    }

    let context = block
        .select(&CONTEXTS)
        .find(|el| is_bracketed_context(*el))
        .map(|el| spaced_text(el).trim_matches(|c| c == '[' || c == ']').trim().to_string())
        .filter(|context| !context.is_empty());

    let examples: Vec<String> = block
        .select(&EXAMPLES)
        .map(plain_text)
        .filter(|example| !example.is_empty())
        .collect();

    let idioms: Vec<Idiom> = block.select(&IDIOM_BLOCKS).filter_map(idiom).collect();

    if definition.is_empty() && idioms.is_empty() {
        return None;
    }

    Some(Meaning {
        definition,
        context,
        examples,
        idioms,
    })
}

/// Text of the definition area with examples, links, idioms and bracketed
/// context projected out.
fn definition_text(area: ElementRef<'_>) -> String {
    let leaves = projected_leaves(area, &|el: ElementRef<'_>| {
        has_class(el, classes::EXAMPLE)
            || (is_tag(el, "a") && has_class(el, classes::EXAMPLES_LINK))
            || has_class(el, classes::IDIOM_BLOCK)
            || is_bracketed_context(el)
    });
    let joined = collapse_whitespace(&leaves.join(" "));
    SPACE_BEFORE_PUNCTUATION
        .replace_all(&joined, "$1")
        .into_owned()
}

/// A context span whose bracket tokens open and close, e.g. `[informeel]`.
fn is_bracketed_context(el: ElementRef<'_>) -> bool {
    if !has_class(el, classes::CONTEXT) {
        return false;
    }
    let brackets: Vec<String> = el.select(&BRACKETS).map(stripped_text).collect();
    brackets.iter().any(|b| b == "[") && brackets.iter().any(|b| b == "]")
}

/// Whether the definition area has an `f3i` that no idiom block inside the
/// area wraps.
fn has_primary_definition(area: ElementRef<'_>) -> bool {
    area.select(&DEFINITIONS).any(|definition| {
        !definition
            .ancestors()
            .take_while(|ancestor| ancestor.id() != area.id())
            .filter_map(ElementRef::wrap)
            .any(|ancestor| {
                has_class(ancestor, classes::IDIOM_BLOCK)
                    || has_class(ancestor, classes::IDIOM_BLOCK_ALT)
            })
    })
}

fn idiom(block: ElementRef<'_>) -> Option<Idiom> {
    let expression = block
        .select(&DEFINITIONS)
        .next()
        .map(plain_text)
        .unwrap_or_default();
    let explanation = block
        .select(&EXPLANATIONS)
        .next()
        .map(plain_text)
        .unwrap_or_default();
    if expression.is_empty() && explanation.is_empty() {
        return None;
    }
    Some(Idiom {
        expression,
        explanation,
    })
}
