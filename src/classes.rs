//! Class tokens of the Van Dale article markup.
//!
//! The vendor encodes every semantic role as an opaque class name; these are
//! the ones the extractors rely on.

/// Headword node.
pub const HEADWORD: &str = "f2h";
/// Fragment carrying the stressed vowel.
pub const STRESSED: &str = "f1e";
/// Unstressed headword fragment.
pub const UNSTRESSED: &str = "f2e";
/// NT2 word-list marker (a bullet).
pub const NT2_MARKER: &str = "f3j";
/// Homograph superscript number.
pub const HOMOGRAPH_NUMBER: &str = "f1p";
/// Form value, also used for the surrounding parentheses and punctuation.
pub const VALUE: &str = "f1k";
/// Label such as `meervoud:` or `zie`.
pub const LABEL: &str = "f1v";
pub const GENDER: &str = "f2f";
/// Headword line including gendered variants.
pub const VARIANT_BLOCK: &str = "f3v";

pub const SENSE_BLOCK: &str = "f3u";
pub const DEFINITION_AREA: &str = "f1m";
/// Primary definition, and the expression inside an idiom block.
pub const DEFINITION: &str = "f3i";
pub const IDIOM_EXPLANATION: &str = "f3n";
pub const IDIOM_BLOCK: &str = "f0c";
pub const IDIOM_BLOCK_ALT: &str = "f1f";
pub const EXAMPLE: &str = "f2s";
/// "voorbeelden" link inside the definition area.
pub const EXAMPLES_LINK: &str = "f0h";
pub const CONTEXT: &str = "f0j";
/// Bracket token inside a context span.
pub const BRACKET: &str = "f1l";

/// "werkwoordrijtje" link.
pub const CONJUGATION_LINK: &str = "f3g";
pub const CONJUGATION_TABLE: &str = "Nt2FLti";
pub const AUDIO: &str = "audiofile";

/// The NT2 marker text.
pub const NT2_BULLET: &str = "•";
/// Syllable separator inside headwords.
pub const SYLLABLE_DOT: char = '·';
/// Primary stress mark prefixed to the stressed syllable.
pub const STRESS_MARK: char = 'ˈ';
