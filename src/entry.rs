//! Assembles one dictionary entry from an article fragment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conjugation::{parse_conjugation_table, ConjugationTable};
use crate::error::ParseError;
use crate::forms::{extract_forms, verb_forms_summary};
use crate::headword::{
    extract_gender, extract_headword, extract_variants, is_nt2_2000,
    split_bracketed_pronunciation, AlternateHeadword,
};
use crate::markup::{has_elements, parse_fragment};
use crate::meanings::{extract_meanings, Meaning};
use crate::media::{audio_links, cross_reference, images, AudioLinks};
use crate::pos::{classify, ClassifierInput, PartOfSpeech};

/// A parsed dictionary entry. Every field is always serialized; absent values
/// become `null` and empty lists `[]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub headword: String,
    pub pronunciation: String,
    pub pronunciation_with_stress: String,
    pub gender: Option<String>,
    pub part_of_speech: Option<PartOfSpeech>,
    pub plural: Option<String>,
    pub diminutive: Option<String>,
    pub inflected_form: Option<String>,
    pub comparative: Option<String>,
    pub superlative: Option<String>,
    pub derivations: Option<String>,
    pub alternate_headwords: Vec<AlternateHeadword>,
    pub verb_forms: Option<String>,
    pub conjugation_table: Option<ConjugationTable>,
    pub cross_reference: Option<String>,
    pub meanings: Vec<Meaning>,
    pub audio_links: AudioLinks,
    pub images: Vec<String>,
    pub is_nt2_2000: bool,
}

/// Parse an article fragment into an [`Entry`].
///
/// `headword_html` is the separate headword snippet some sources ship next to
/// the article (e.g. `bestaan<sup>2</sup> <i>(ww)</i>`); it is only used as the
/// first hint for the grammatical category.
///
/// # Errors
///
/// [`ParseError::EmptyFragment`] for blank input, [`ParseError::NotMarkup`]
/// when the fragment holds no element, [`ParseError::MissingHeadword`] when no
/// headword can be reconstructed.
pub fn parse_entry(content: &str, headword_html: Option<&str>) -> Result<Entry, ParseError> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyFragment);
    }
    let article = parse_fragment(content);
    if !has_elements(&article) {
        return Err(ParseError::NotMarkup);
    }
    let hint = headword_html
        .filter(|h| !h.trim().is_empty())
        .map(parse_fragment);

    let is_nt2_2000 = is_nt2_2000(&article);
    let mut gender = extract_gender(&article);
    let reconstructed = extract_headword(&article);
    let mut headword = reconstructed.headword;
    let mut pronunciation = reconstructed.pronunciation;

    let mut variants = extract_variants(&article);
    let mut seed_plural = None;
    if !variants.is_empty() {
        let primary = variants.remove(0);
        headword = primary.headword;
        pronunciation = primary.pronunciation;
        if primary.gender.is_some() {
            gender = primary.gender;
        }
        seed_plural = primary.plural;
    }
    let mut alternate_headwords = variants;

    let mut forms = extract_forms(&article, seed_plural);
    if let Some(surplus) = forms.surplus_plural.take() {
        if let Some(first) = alternate_headwords.first_mut() {
            if first.plural.is_none() {
                first.plural = Some(surplus);
            }
        }
    }

    let part_of_speech = classify(&ClassifierInput {
        article: &article,
        raw_html: content,
        headword_hint: hint.as_ref(),
        headword: &headword,
        gender: gender.as_deref(),
        forms: &forms,
    });

    let cross_reference = cross_reference(&article);

    let (verb_forms, conjugation_table) = if part_of_speech == Some(PartOfSpeech::Verb) {
        (verb_forms_summary(&article), parse_conjugation_table(&article))
    } else {
        (None, None)
    };

    let meanings = extract_meanings(&article);
    let audio_links = audio_links(&article);
    let images = images(&article);

    let (headword, pronunciation) = split_bracketed_pronunciation(headword, pronunciation);
    if headword.trim().is_empty() {
        return Err(ParseError::MissingHeadword);
    }

    debug!(
        headword = %headword,
        pos = ?part_of_speech,
        meanings = meanings.len(),
        alternates = alternate_headwords.len(),
        "parsed entry"
    );

    Ok(Entry {
        headword,
        pronunciation,
        pronunciation_with_stress: reconstructed.pronunciation_with_stress,
        gender,
        part_of_speech,
        plural: forms.plural,
        diminutive: forms.diminutive,
        inflected_form: forms.inflected_form,
        comparative: forms.comparative,
        superlative: forms.superlative,
        derivations: forms.derivations,
        alternate_headwords,
        verb_forms,
        conjugation_table,
        cross_reference,
        meanings,
        audio_links,
        images,
        is_nt2_2000,
    })
}
