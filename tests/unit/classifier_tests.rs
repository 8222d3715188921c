/*!
 * Tests for content classification
 */

use std::str::FromStr;

use tagloom::classifier::{ContentClassification, classify};

#[test]
fn test_classify_specBoundaries_shouldMatchVocabulary() {
    assert_eq!(classify("<style>.a{}</style>"), ContentClassification::CssJs);
    assert_eq!(classify(""), ContentClassification::Empty);
    assert_eq!(classify("   "), ContentClassification::Empty);
    assert_eq!(classify("no tags here"), ContentClassification::PlainText);
}

#[test]
fn test_classify_priority_shouldPreferCssJsOverStructure() {
    let value = "<div><script>x()</script></div>";
    assert_eq!(classify(value), ContentClassification::CssJs);
}

#[test]
fn test_classify_priority_shouldPreferStructureOverInline() {
    let value = "<section><b>bold</b></section>";
    assert_eq!(classify(value), ContentClassification::FullHtml);
}

#[test]
fn test_classify_withLineBreakOnly_shouldBeRichText() {
    assert_eq!(classify("line one<br>line two"), ContentClassification::RichText);
}

#[test]
fn test_fromStr_withCsvVocabulary_shouldParse() {
    assert_eq!(
        ContentClassification::from_str("RICH_TEXT").unwrap(),
        ContentClassification::RichText
    );
    // The original corpus wrote the category with a slash.
    assert_eq!(
        ContentClassification::from_str("CSS/JS").unwrap(),
        ContentClassification::CssJs
    );
    assert!(ContentClassification::from_str("NOT_A_CLASS").is_err());
}

#[test]
fn test_routing_shouldSkipEmptyAndPlainText() {
    let routed = ["<b>x</b>", "<div>x</div>", "<style>s</style>", "<custom>x</custom>"];
    for value in routed {
        assert!(classify(value).is_routed(), "{value:?} should be routed");
    }

    let skipped = ["", "   ", "plain words"];
    for value in skipped {
        assert!(!classify(value).is_routed(), "{value:?} should be skipped");
    }
}
