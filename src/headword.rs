//! Headword, syllable stress and gendered variants.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::classes::{self, STRESS_MARK, SYLLABLE_DOT};
use crate::markup::{children, class_selector, descendant_elements, has_class, is_tag, stripped_text, Child};

lazy_static! {
    static ref HEADWORD: Selector = class_selector("span", classes::HEADWORD);
    static ref VARIANT_BLOCK: Selector = class_selector("span", classes::VARIANT_BLOCK);
    static ref GENDER: Selector = class_selector("span", classes::GENDER);
    static ref NT2_MARKER: Selector = class_selector("span", classes::NT2_MARKER);
}

/// Headword as spelled, with syllable dots, and with the primary stress marked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headword {
    pub headword: String,
    pub pronunciation: String,
    pub pronunciation_with_stress: String,
}

/// A gendered spelling listed in the same article, e.g. `vriend` / `vriendin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateHeadword {
    pub headword: String,
    pub pronunciation: String,
    pub gender: Option<String>,
    pub plural: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Syllable {
    text: String,
    stressed: bool,
}

/// Splits fragments on the syllable dot while tracking stress.
#[derive(Default)]
struct SyllableBuffer {
    syllables: Vec<Syllable>,
    current: String,
    stressed: bool,
}

impl SyllableBuffer {
    fn push_fragment(&mut self, text: &str, stressed: bool) {
        for ch in text.chars() {
            if ch == SYLLABLE_DOT {
                self.close();
                continue;
            }
            self.current.push(ch);
            self.stressed |= stressed;
        }
    }

    fn close(&mut self) {
        if !self.current.is_empty() {
            self.syllables.push(Syllable {
                text: std::mem::take(&mut self.current),
                stressed: self.stressed,
            });
        }
        self.stressed = false;
    }

    fn finish(mut self) -> Vec<Syllable> {
        self.close();
        self.syllables
    }
}

/// Join syllables with dots, marking only the first stressed one.
fn stress_notation(syllables: &[Syllable]) -> String {
    let mut marked = false;
    syllables
        .iter()
        .map(|syllable| {
            if syllable.stressed && !marked {
                marked = true;
                format!("{}{}", STRESS_MARK, syllable.text)
            } else {
                syllable.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(&SYLLABLE_DOT.to_string())
}

/// Read the first headword node of the article; no node gives an empty result.
pub fn extract_headword(article: &Html) -> Headword {
    article
        .select(&HEADWORD)
        .next()
        .map(reconstruct_headword)
        .unwrap_or_default()
}

fn reconstruct_headword(node: ElementRef<'_>) -> Headword {
    let mut parts: Vec<String> = Vec::new();
    let mut buffer = SyllableBuffer::default();

    for child in children(node) {
        let (text, stressed) = match child {
            Child::Element(el) => {
                // links and value spans start the form annotations
                if is_tag(el, "a") || has_class(el, classes::VALUE) {
                    break;
                }
                if has_class(el, classes::NT2_MARKER) || has_class(el, classes::HOMOGRAPH_NUMBER) {
                    continue;
                }
                (stripped_text(el), has_class(el, classes::STRESSED))
            }
            Child::Text(text) => (text.trim().to_string(), false),
        };
        if text.is_empty() {
            continue;
        }
        buffer.push_fragment(&text, stressed);
        parts.push(text);
    }

    let pronunciation = parts.concat().trim().to_string();
    let syllables = buffer.finish();

    Headword {
        headword: pronunciation.replace(SYLLABLE_DOT, ""),
        pronunciation_with_stress: if syllables.is_empty() {
            String::new()
        } else {
            stress_notation(&syllables)
        },
        pronunciation,
    }
}

#[derive(Default)]
struct VariantBucket {
    gender: String,
    pronunciation_parts: Vec<String>,
    plural_parts: Vec<String>,
}

impl VariantBucket {
    fn into_alternate(self) -> Option<AlternateHeadword> {
        let joined = self.pronunciation_parts.concat();
        let pronunciation = joined.trim().trim_end_matches([',', ';']);
        if pronunciation.is_empty() {
            return None;
        }
        let plural = self.plural_parts.join(", ").trim().to_string();
        Some(AlternateHeadword {
            headword: pronunciation.replace(SYLLABLE_DOT, ""),
            pronunciation: pronunciation.to_string(),
            gender: Some(self.gender).filter(|g| !g.is_empty()),
            plural: Some(plural).filter(|p| !p.is_empty()),
        })
    }
}

/// Gendered variants in the headword block, in document order. The first one
/// is the primary headword.
pub fn extract_variants(article: &Html) -> Vec<AlternateHeadword> {
    let Some(block) = article.select(&VARIANT_BLOCK).next() else {
        return Vec::new();
    };

    let mut buckets: Vec<VariantBucket> = Vec::new();
    let mut current: Option<VariantBucket> = None;
    let mut collecting_plural = false;

    for el in descendant_elements(block) {
        let text = stripped_text(el);

        if has_class(el, classes::GENDER) {
            if let Some(done) = current.take() {
                if !done.pronunciation_parts.is_empty() {
                    buckets.push(done);
                }
            }
            current = Some(VariantBucket {
                gender: text,
                ..Default::default()
            });
            collecting_plural = false;
            continue;
        }

        let Some(bucket) = current.as_mut() else {
            continue;
        };

        if (has_class(el, classes::UNSTRESSED) || has_class(el, classes::STRESSED))
            && !text.is_empty()
            && text != ","
            && text != ";"
        {
            bucket.pronunciation_parts.push(text.clone());
        }

        if has_class(el, classes::LABEL) && text.to_lowercase().contains("meervoud") {
            collecting_plural = true;
            continue;
        }

        if collecting_plural && has_class(el, classes::VALUE) {
            if !text.is_empty() && !matches!(text.as_str(), ")" | "(" | ";" | "," | ":") {
                bucket.plural_parts.push(text);
            }
            continue;
        }

        if collecting_plural && has_class(el, classes::LABEL) {
            collecting_plural = false;
        }
    }

    if let Some(done) = current {
        if !done.pronunciation_parts.is_empty() {
            buckets.push(done);
        }
    }

    buckets
        .into_iter()
        .filter_map(VariantBucket::into_alternate)
        .collect()
}

/// Text of the first gender marker.
pub fn extract_gender(article: &Html) -> Option<String> {
    article
        .select(&GENDER)
        .next()
        .map(stripped_text)
        .filter(|g| !g.is_empty())
}

pub fn is_nt2_2000(article: &Html) -> bool {
    article
        .select(&NT2_MARKER)
        .next()
        .is_some_and(|marker| stripped_text(marker) == classes::NT2_BULLET)
}

/// Split `chloor[gloor]` into headword `chloor` and pronunciation `gloor`.
pub fn split_bracketed_pronunciation(headword: String, pronunciation: String) -> (String, String) {
    let Some((base, rest)) = headword.split_once('[') else {
        return (headword, pronunciation);
    };
    let Some((fragment, _)) = rest.split_once(']') else {
        return (headword, pronunciation);
    };

    let base = base.trim();
    let fragment = fragment.trim();
    let new_headword = if base.is_empty() { headword.clone() } else { base.to_string() };
    let new_pronunciation = if fragment.is_empty() {
        pronunciation
    } else {
        fragment.to_string()
    };
    (new_headword, new_pronunciation)
}
