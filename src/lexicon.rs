//! Closed word lists used by the last-resort category heuristics.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use crate::conjugation::PronounSlot;

lazy_static! {
    pub static ref NUMERALS: HashSet<&'static str> = [
        "nul", "een", "twee", "drie", "vier", "vijf", "zes", "zeven", "acht", "negen", "tien",
        "elf", "twaalf", "dertien", "veertien", "vijftien", "zestien", "zeventien", "achttien",
        "negentien", "twintig",
    ]
    .into_iter()
    .collect();

    pub static ref CONJUNCTIONS: HashSet<&'static str> =
        ["en", "of", "opdat", "doordat", "want", "maar", "dus"].into_iter().collect();

    pub static ref PRONOUNS: HashSet<&'static str> =
        ["ze", "jullie", "diens", "dele", "hij", "zij", "ik", "wij", "u", "je"].into_iter().collect();

    /// Articles that mark a gender value as a noun determiner.
    pub static ref NOUN_DETERMINERS: HashSet<&'static str> = ["de", "het"].into_iter().collect();

    /// Row labels of the conjugation table.
    pub static ref PRONOUN_LABELS: HashMap<&'static str, PronounSlot> = PronounSlot::ALL
        .iter()
        .map(|slot| (slot.label(), *slot))
        .collect();
}

/// Label substrings of the morphological form fields, in scan order.
pub const FORM_LABELS: &[(&str, FormField)] = &[
    ("meervoud:", FormField::Plural),
    ("verkleinwoord:", FormField::Diminutive),
    ("verbogen vorm:", FormField::InflectedForm),
    ("vergrotende trap:", FormField::Comparative),
    ("overtreffende trap:", FormField::Superlative),
    ("afleiding:", FormField::Derivations),
];

/// Label texts that introduce a cross-reference.
pub const REFERRAL_LABELS: &[&str] = &["zie", "see"];

/// First-cell keywords of conjugation header rows.
pub const CONJUGATION_HEADER_KEYWORDS: &[&str] = &["onvoltooid", "tegenwoordige", "verleden", "tijd"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Plural,
    Diminutive,
    InflectedForm,
    Comparative,
    Superlative,
    Derivations,
}

pub fn form_field_for_label(label: &str) -> Option<FormField> {
    FORM_LABELS
        .iter()
        .find(|(needle, _)| label.contains(needle))
        .map(|(_, field)| *field)
}
