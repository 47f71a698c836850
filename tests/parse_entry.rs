use vandale_parser::{parse_entry, Idiom, ParseError, PartOfSpeech, PerfectTense, PronounSlot};

const AAN: &str = concat!(
    r#"<span class="f3v"><span class="f3j">•</span>"#,
    r#"<span class="f2h"><span class="f1e">aan</span><span class="f1p">1</span></span> "#,
    r#"<span class="f1k">(</span><span class="f1k">bijwoord</span><span class="f1k">)</span></span>"#,
    r#"<a class="audiofile" href="https://www.vandale.nl/audio/nl/aan.mp3">nl</a>"#,
    r#"<a class="audiofile" href="https://www.vandale.nl/audio/be/aan.mp3">be</a>"#,
    r#"<span class="f3u"><span class="f1m"><span class="f3i">in werking</span> "#,
    r#"<a class="f0h" href="/voorbeelden">voorbeelden</a> "#,
    r#"<span class="f2s">de radio staat   aan</span> "#,
    r#"<span class="f0c"><span class="f3i">er is niets aan</span> <span class="f3n">het is saai</span></span>"#,
    r#"</span></span>"#,
);

const AANKIJKEN: &str = concat!(
    r#"<span class="f3v"><span class="f2h"><span class="f2e">aan·</span><span class="f1e">kij</span><span class="f2e">·ken</span></span> "#,
    r#"<span class="f1k">(</span><span class="f1k">keek aan</span><span class="f1k">,</span> "#,
    r#"<span class="f1k">heeft aangekeken</span><span class="f1k">)</span></span>"#,
    r#"<a class="f3g" href="/werkwoordrijtje">werkwoordrijtje</a>"#,
    r#"<span id="ww4411" style="display:none"><table class="Nt2FLti">"#,
    r#"<tr><td></td><td>onvoltooid tegenwoordige tijd</td><td>onvoltooid verleden tijd</td></tr>"#,
    r#"<tr><td>ik</td><td>kijk aan</td><td>keek aan</td></tr>"#,
    r#"<tr><td>jij</td><td>kijkt aan</td><td>keek aan</td></tr>"#,
    r#"<tr><td>wij</td><td>kijken aan</td><td>keken aan</td></tr>"#,
    r#"<tr><td colspan="3"></td></tr>"#,
    r#"<tr><td>voltooide tijd</td><td>hulpwerkwoord</td><td>voltooid deelwoord</td></tr>"#,
    r#"<tr><td>ik</td><td>heb</td><td>aangekeken</td></tr>"#,
    r#"</table></span>"#,
    r#"<span class="f3u"><span class="f1m"><span class="f3i">je blik op iemand richten</span></span></span>"#,
);

const VRIEND: &str = concat!(
    r#"<span class="f3v">"#,
    r#"<span class="f2f">de</span> <span class="f2h"><span class="f1e">vriend</span></span> "#,
    r#"<span class="f1k">(</span><span class="f1v">meervoud:</span> <span class="f1k">vrienden</span><span class="f1k">)</span>"#,
    r#"<span class="f1k">,</span> "#,
    r#"<span class="f2f">de</span> <span class="f2h"><span class="f2e">vrien·</span><span class="f1e">din</span></span> "#,
    r#"<span class="f1k">(</span><span class="f1v">meervoud:</span> <span class="f1k">vriendinnen</span><span class="f1k">)</span>"#,
    r#"</span>"#,
    r#"<span class="f3u"><span class="f1m"><span class="f3i">iemand met wie je veel omgaat</span></span></span>"#,
);

#[test]
fn adverb_with_example_and_idiom() {
    let entry = parse_entry(AAN, Some("aan<sup>1</sup> <i>(bw)</i>")).unwrap();

    assert_eq!(entry.headword, "aan");
    assert_eq!(entry.pronunciation, "aan");
    assert_eq!(entry.pronunciation_with_stress, "ˈaan");
    assert_eq!(entry.part_of_speech, Some(PartOfSpeech::Adverb));
    assert!(entry.is_nt2_2000);
    assert_eq!(entry.conjugation_table, None);

    assert_eq!(entry.meanings.len(), 1);
    let meaning = &entry.meanings[0];
    assert_eq!(meaning.definition, "in werking");
    assert_eq!(meaning.examples, vec!["de radio staat aan"]);
    assert_eq!(
        meaning.idioms,
        vec![Idiom {
            expression: "er is niets aan".into(),
            explanation: "het is saai".into(),
        }]
    );

    assert_eq!(
        entry.audio_links.nl.as_deref(),
        Some("https://www.vandale.nl/audio/nl/aan.mp3")
    );
    assert_eq!(
        entry.audio_links.be.as_deref(),
        Some("https://www.vandale.nl/audio/be/aan.mp3")
    );
}

#[test]
fn category_label_in_article_without_hint() {
    let entry = parse_entry(AAN, None).unwrap();
    assert_eq!(entry.part_of_speech, Some(PartOfSpeech::Adverb));
}

#[test]
fn plural_suffix_makes_a_noun() {
    let html = concat!(
        r#"<span class="f2h"><span class="f1e">boek</span></span> "#,
        r#"<span class="f1k">(</span><span class="f1v">meervoud:</span> <span class="f1k">-en</span>"#,
        r#"<span class="f1k">;</span> <span class="f1v">verkleinwoord:</span> <span class="f1k">boekje</span><span class="f1k">)</span>"#,
    );
    let entry = parse_entry(html, None).unwrap();
    assert_eq!(entry.plural.as_deref(), Some("-en"));
    assert_eq!(entry.diminutive.as_deref(), Some("boekje"));
    assert_eq!(entry.part_of_speech, Some(PartOfSpeech::Noun));
}

#[test]
fn verb_with_conjugation_table() {
    let entry = parse_entry(AANKIJKEN, None).unwrap();

    assert_eq!(entry.headword, "aankijken");
    assert_eq!(entry.pronunciation, "aan·kij·ken");
    assert_eq!(entry.pronunciation_with_stress, "aan·ˈkij·ken");
    assert_eq!(entry.part_of_speech, Some(PartOfSpeech::Verb));
    assert_eq!(entry.verb_forms.as_deref(), Some("keek aan, heeft aangekeken"));

    let table = entry.conjugation_table.expect("verb has a conjugation table");
    assert_eq!(table.present.get(&PronounSlot::Jij).map(String::as_str), Some("kijkt aan"));
    assert_eq!(table.past.get(&PronounSlot::Wij).map(String::as_str), Some("keken aan"));
    assert_eq!(table.present.len(), 3);
    assert_eq!(
        table.perfect,
        Some(PerfectTense {
            auxiliary: "heb".into(),
            participle: "aangekeken".into(),
        })
    );
    assert_eq!(entry.meanings[0].definition, "je blik op iemand richten");
}

#[test]
fn gendered_variants_exclude_the_primary() {
    let entry = parse_entry(VRIEND, None).unwrap();

    assert_eq!(entry.headword, "vriend");
    assert_eq!(entry.gender.as_deref(), Some("de"));
    assert_eq!(entry.plural.as_deref(), Some("vrienden"));
    assert_eq!(entry.part_of_speech, Some(PartOfSpeech::Noun));

    assert_eq!(entry.alternate_headwords.len(), 1);
    let alternate = &entry.alternate_headwords[0];
    assert_eq!(alternate.headword, "vriendin");
    assert_eq!(alternate.pronunciation, "vrien·din");
    assert_eq!(alternate.gender.as_deref(), Some("de"));
    assert_eq!(alternate.plural.as_deref(), Some("vriendinnen"));
    assert!(entry
        .alternate_headwords
        .iter()
        .all(|alt| alt.headword != entry.headword));
}

#[test]
fn cross_reference_without_meanings() {
    let html = concat!(
        r#"<span class="f2h"><span class="f2e">aanbelanden</span></span>"#,
        r#"<span class="f3u"><span class="f1v">zie</span> <a href="/aanlanden">aanlanden</a></span>"#,
    );
    let entry = parse_entry(html, None).unwrap();
    assert_eq!(entry.cross_reference.as_deref(), Some("aanlanden"));
    assert!(entry.meanings.is_empty());
}

#[test]
fn abbreviation_definition_without_primary_span() {
    let html = concat!(
        r#"<span class="f2h"><span class="f2e">ABN</span></span> "#,
        r#"<span class="f1k">(</span><span class="f1k">afkorting</span><span class="f1k">)</span>"#,
        r#"<span class="f3u"><span class="f1m">algemeen beschaafd Nederlands <span class="f0j"><span class="f1l">[</span>taal<span class="f1l">]</span></span></span></span>"#,
    );
    let entry = parse_entry(html, None).unwrap();
    assert_eq!(entry.part_of_speech, Some(PartOfSpeech::Abbreviation));
    assert_eq!(entry.meanings[0].definition, "algemeen beschaafd Nederlands");
    assert_eq!(entry.meanings[0].context.as_deref(), Some("taal"));
}

#[test]
fn images_and_missing_audio() {
    let html = concat!(
        r#"<span class="f2h"><span class="f2e">hond</span></span><span class="f2f">de</span>"#,
        r#"<img src="https://img.vandale.nl/hond.jpg"><img src="hond-klein.jpg">"#,
    );
    let entry = parse_entry(html, None).unwrap();
    assert_eq!(entry.images, vec!["https://img.vandale.nl/hond.jpg"]);
    assert_eq!(entry.audio_links.nl, None);
    assert_eq!(entry.audio_links.be, None);
}

#[test]
fn decomposed_vowels_are_composed() {
    let html = "<span class=\"f2h\"><span class=\"f2e\">cafe\u{0301}</span></span>";
    let entry = parse_entry(html, None).unwrap();
    assert_eq!(entry.headword, "café");
}

#[test]
fn parsing_is_deterministic() {
    for html in [AAN, AANKIJKEN, VRIEND] {
        let first = parse_entry(html, None).unwrap();
        let second = parse_entry(html, None).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn contract_violations() {
    assert!(matches!(parse_entry("", None), Err(ParseError::EmptyFragment)));
    assert!(matches!(parse_entry("  \t", Some("<i>(ww)</i>")), Err(ParseError::EmptyFragment)));
    assert!(matches!(parse_entry("gewoon tekst", None), Err(ParseError::NotMarkup)));
    assert!(matches!(
        parse_entry(r#"<span class="f3u"><span class="f1m">iets</span></span>"#, None),
        Err(ParseError::MissingHeadword)
    ));
}
