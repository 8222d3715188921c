/*!
 * Property tests for the structural preservation engine
 */

use tagloom::engine::{
    ChunkCoordinator, ChunkState, ReconstructOptions, Reconstructor, ValidationOutcome, normalize,
    plan_windows, repair_markup, strip_tags, tokenize, validate_window,
};

/// Balanced markup samples used across the property tests
fn balanced_samples() -> Vec<&'static str> {
    vec![
        "<p>Hello</p>",
        "<div><p>Hi</p></div>",
        "<h1>Welcome</h1><p>Intro text.</p>",
        "<ul><li>one</li><li>two</li><li>three</li></ul>",
        "<div>Some <b>bold</b> and <i>italic</i> text<br>next line</div>",
        "<p>See <a href=\"/docs\">the docs</a> for details.</p>",
        "plain text with no markup at all",
        "<table><tr><td>cell</td></tr></table>",
    ]
}

/// Round-trip: with identity translation and matching modes the engine
/// must reproduce the input exactly.
#[test]
fn test_roundTrip_withIdentityTranslation_shouldReproduceInput() {
    let reconstructor = Reconstructor::new(
        tagloom::engine::DEFAULT_INLINE_TAGS,
        ReconstructOptions {
            rewrite_inline: false,
            repair: false,
        },
    );

    for source in balanced_samples() {
        let tokens = tokenize(source);
        assert_eq!(
            reconstructor.reconstruct(&tokens, source),
            source,
            "round trip failed for {source:?}"
        );
    }
}

/// The same round-trip holds after normalization, which is the form the
/// pipeline actually feeds the engine.
#[test]
fn test_roundTrip_withNormalizedInput_shouldReproduceNormalizedForm() {
    let reconstructor = Reconstructor::default();

    for source in balanced_samples() {
        let normalized = normalize(source);
        let tokens = tokenize(&normalized);
        assert_eq!(
            reconstructor.reconstruct(&tokens, &normalized),
            normalized,
            "normalized round trip failed for {source:?}"
        );
    }
}

#[test]
fn test_normalize_shouldBeIdempotentOverSamples() {
    for source in balanced_samples() {
        let once = normalize(source);
        assert_eq!(normalize(&once), once, "normalize not idempotent for {source:?}");
    }
}

#[test]
fn test_repair_shouldBeIdempotentOverDegenerateSamples() {
    let samples = [
        "<h2></h2><h2>Title</h2>",
        "<p><h3>Hoisted</h3></p>",
        "<i><i>doubled</i></i>",
        "<h1></h1>",
    ];
    for source in samples {
        let once = repair_markup(source);
        assert_eq!(repair_markup(&once), once, "repair not idempotent for {source:?}");
    }
}

/// A renamed leading tag must reject at relative index 0 and leave the
/// cursor untouched.
#[test]
fn test_validator_withRenamedTag_shouldRejectAtIndexZeroAndKeepCursor() {
    let original = tokenize("<p>Hello</p><b>World</b>");
    let state = ChunkState::default();

    let outcome = validate_window(&original, &state, "<div>Bonjour</div><b>Monde</b>");

    match outcome {
        ValidationOutcome::Rejected { mismatch, state } => {
            assert_eq!(mismatch.translated_range, (0, 0));
            assert_eq!(state.cursor, 0);
            assert!(state.leftover.is_empty());
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

/// Chunk continuity: a boundary falling mid-sentence must carry the exact
/// unterminated trailing text forward, and the final merge must contain
/// the wrapper exactly once.
#[test]
fn test_chunkContinuity_withMidSentenceBoundary_shouldCarryLeftoverExactly() {
    let source = "<p>This is a long sentence that spans a chunk boundary.</p>";
    let tokens = tokenize(source);

    // Split so the boundary falls inside the sentence.
    let boundary = source.find("spans").unwrap();
    let (window1, window2) = source.split_at(boundary);

    let mut coordinator = ChunkCoordinator::new(&tokens);

    assert!(coordinator.accept(window1).is_accepted());
    assert_eq!(coordinator.state().leftover, "This is a long sentence that ");
    assert_eq!(coordinator.state().cursor, 1);

    assert!(coordinator.accept(window2).is_accepted());
    assert!(coordinator.state().leftover.is_empty());

    let merged = coordinator.finish();
    assert_eq!(merged, source);
    assert_eq!(merged.matches("<p>").count(), 1);
    assert_eq!(merged.matches("</p>").count(), 1);
}

/// Inline wrapper emptiness: an icon-only wrapper whose translation came
/// back empty disappears entirely.
#[test]
fn test_inlineWrapper_withEmptyTranslation_shouldDropPairEntirely() {
    let reconstructor = Reconstructor::default();
    let tokens = tokenize("<button><img/></button>");

    let out = reconstructor.reconstruct(&tokens, "");
    assert!(!out.contains("<button>"));
    assert!(!out.contains("</button>"));
    assert_eq!(out, "");
}

/// Anchor preservation: the href survives untouched, only the inner text
/// is substituted.
#[test]
fn test_anchor_withTranslatedInnerText_shouldKeepHref() {
    let reconstructor = Reconstructor::default();
    let tokens = tokenize("<a href=\"/x\">Click here</a>");

    let out = reconstructor.reconstruct(&tokens, "Cliquez ici");
    assert_eq!(out, "<a href=\"/x\">Cliquez ici</a>");
}

/// Windows cover the content exactly and carry overlap context forward.
#[test]
fn test_planWindows_shouldPartitionPayloadAndCarryContext() {
    let content = "word ".repeat(100);
    let windows = plan_windows(&content, 120, 30);

    let rebuilt: String = windows.iter().map(|w| w.payload.as_str()).collect();
    assert_eq!(rebuilt, content);

    for pair in windows.windows(2) {
        let tail: String = pair[0]
            .payload
            .chars()
            .skip(pair[0].payload.chars().count().saturating_sub(30))
            .collect();
        assert_eq!(pair[1].context, tail);
    }
}

/// Strip mode concatenates exactly the text runs of the token sequence.
#[test]
fn test_stripTags_shouldMatchTokenizerTextRuns() {
    for source in balanced_samples() {
        let expected: String = tokenize(source)
            .iter()
            .filter(|t| !t.is_markup)
            .map(|t| t.raw.as_str())
            .collect();
        assert_eq!(strip_tags(source), expected.trim());
    }
}
