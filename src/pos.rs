//! Grammatical category detection.
//!
//! Categories are resolved by an ordered list of independent strategies. The
//! first strategy that yields a code wins and the rest are skipped.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classes;
use crate::forms::MorphologicalForms;
use crate::lexicon::{CONJUNCTIONS, NOUN_DETERMINERS, NUMERALS, PRONOUNS};
use crate::markup::{class_selector, spaced_text, stripped_text, tag_selector};
use crate::schema::normalize_part_of_speech;

/// Closed set of category codes, serialized with the vendor's short codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    #[serde(rename = "ww")]
    Verb,
    #[serde(rename = "zn")]
    Noun,
    #[serde(rename = "bw")]
    Adverb,
    #[serde(rename = "bn")]
    Adjective,
    #[serde(rename = "vz")]
    Preposition,
    #[serde(rename = "vnw")]
    Pronoun,
    #[serde(rename = "vw")]
    Conjunction,
    #[serde(rename = "tw")]
    Numeral,
    #[serde(rename = "lidw")]
    Article,
    #[serde(rename = "afk")]
    Abbreviation,
    #[serde(rename = "vv")]
    Prefix,
    #[serde(rename = "achtervoegsel")]
    Suffix,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 12] = [
        PartOfSpeech::Verb,
        PartOfSpeech::Noun,
        PartOfSpeech::Adverb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Preposition,
        PartOfSpeech::Pronoun,
        PartOfSpeech::Conjunction,
        PartOfSpeech::Numeral,
        PartOfSpeech::Article,
        PartOfSpeech::Abbreviation,
        PartOfSpeech::Prefix,
        PartOfSpeech::Suffix,
    ];

    pub fn code(self) -> &'static str {
        match self {
            PartOfSpeech::Verb => "ww",
            PartOfSpeech::Noun => "zn",
            PartOfSpeech::Adverb => "bw",
            PartOfSpeech::Adjective => "bn",
            PartOfSpeech::Preposition => "vz",
            PartOfSpeech::Pronoun => "vnw",
            PartOfSpeech::Conjunction => "vw",
            PartOfSpeech::Numeral => "tw",
            PartOfSpeech::Article => "lidw",
            PartOfSpeech::Abbreviation => "afk",
            PartOfSpeech::Prefix => "vv",
            PartOfSpeech::Suffix => "achtervoegsel",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pos| pos.code() == code)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

lazy_static! {
    static ref PARENTHESIZED: Regex = Regex::new(r"\(([^)]+)\)").unwrap();
    // Common codes and full labels in parentheses only.
    static ref RAW_CATEGORY: Regex = Regex::new(
        r"(?i)\((ww|znw?|zn|bw|bn|vz|werkwoord|zelfstandig naamwoord|bijvoeglijk naamwoord|bijwoord|voorzetsel)\)"
    ).unwrap();
    static ref PROPER_NOUN: Regex =
        Regex::new(r"^[A-ZÁÀÂÄÅÃÆÉÈÊËÍÌÎÏÓÒÔÖÚÙÛÜÇÑ][^\s/]*$").unwrap();

    static ref ITALIC: Selector = tag_selector("i");
    static ref VALUE_SPANS: Selector = class_selector("span", classes::VALUE);
    static ref CONJUGATION_LINKS: Selector = class_selector("a", classes::CONJUGATION_LINK);
}

/// Everything the strategies may look at, gathered by the assembler.
pub struct ClassifierInput<'a> {
    pub article: &'a Html,
    pub raw_html: &'a str,
    pub headword_hint: Option<&'a Html>,
    pub headword: &'a str,
    pub gender: Option<&'a str>,
    pub forms: &'a MorphologicalForms,
}

type Strategy = fn(&ClassifierInput<'_>) -> Option<PartOfSpeech>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("headword hint", from_headword_hint),
    ("category span", from_category_span),
    ("raw markup", from_raw_markup),
    ("conjugation link", from_conjugation_link),
    ("gender", from_gender),
    ("affix hyphen", from_affix_hyphen),
    ("proper noun", from_proper_noun),
    ("comparison forms", from_comparison_forms),
    ("plural", from_plural),
    ("closed lexicon", from_closed_lexicon),
];

/// Run the strategy list and return the first category found.
pub fn classify(input: &ClassifierInput<'_>) -> Option<PartOfSpeech> {
    STRATEGIES.iter().find_map(|(name, strategy)| {
        let pos = strategy(input)?;
        debug!(headword = input.headword, strategy = *name, pos = %pos, "classified");
        Some(pos)
    })
}

/// Inner text of the first parenthesized group, or the whole text.
fn category_candidate(text: &str) -> &str {
    PARENTHESIZED
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or_else(|| text.trim())
}

fn from_headword_hint(input: &ClassifierInput<'_>) -> Option<PartOfSpeech> {
    let hint = input.headword_hint?;
    let italic = hint.select(&ITALIC).next()?;
    let text = spaced_text(italic);
    if text.is_empty() {
        return None;
    }
    normalize_part_of_speech(category_candidate(&text))
}

fn from_category_span(input: &ClassifierInput<'_>) -> Option<PartOfSpeech> {
    input.article.select(&VALUE_SPANS).find_map(|span| {
        let text = spaced_text(span);
        if text.is_empty() {
            return None;
        }
        normalize_part_of_speech(category_candidate(&text))
    })
}

fn from_raw_markup(input: &ClassifierInput<'_>) -> Option<PartOfSpeech> {
    let cap = RAW_CATEGORY.captures(input.raw_html)?;
    normalize_part_of_speech(cap[1].trim())
}

fn from_conjugation_link(input: &ClassifierInput<'_>) -> Option<PartOfSpeech> {
    input
        .article
        .select(&CONJUGATION_LINKS)
        .any(|link| stripped_text(link) == "werkwoordrijtje")
        .then_some(PartOfSpeech::Verb)
}

fn from_gender(input: &ClassifierInput<'_>) -> Option<PartOfSpeech> {
    let gender = input.gender?.to_lowercase();
    gender
        .split(|c: char| !c.is_alphabetic())
        .any(|token| NOUN_DETERMINERS.contains(token))
        .then_some(PartOfSpeech::Noun)
}

fn from_affix_hyphen(input: &ClassifierInput<'_>) -> Option<PartOfSpeech> {
    let headword = input.headword.trim();
    if headword.chars().count() <= 1 {
        return None;
    }
    if headword.ends_with('-') {
        Some(PartOfSpeech::Prefix)
    } else if headword.starts_with('-') {
        Some(PartOfSpeech::Suffix)
    } else {
        None
    }
}

fn from_proper_noun(input: &ClassifierInput<'_>) -> Option<PartOfSpeech> {
    PROPER_NOUN
        .is_match(input.headword.trim())
        .then_some(PartOfSpeech::Noun)
}

fn from_comparison_forms(input: &ClassifierInput<'_>) -> Option<PartOfSpeech> {
    let forms = input.forms;
    (forms.comparative.is_some() || forms.superlative.is_some() || forms.inflected_form.is_some())
        .then_some(PartOfSpeech::Adjective)
}

fn from_plural(input: &ClassifierInput<'_>) -> Option<PartOfSpeech> {
    input.forms.plural.as_ref().map(|_| PartOfSpeech::Noun)
}

fn from_closed_lexicon(input: &ClassifierInput<'_>) -> Option<PartOfSpeech> {
    let word = input.headword.trim().to_lowercase();
    if NUMERALS.contains(word.as_str()) {
        Some(PartOfSpeech::Numeral)
    } else if CONJUNCTIONS.contains(word.as_str()) {
        Some(PartOfSpeech::Conjunction)
    } else if PRONOUNS.contains(word.as_str()) {
        Some(PartOfSpeech::Pronoun)
    } else {
        None
    }
}
