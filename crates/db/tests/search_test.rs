use courtside_db::repositories::contains_pattern;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("ana", "%ana%")]
#[case("100%", "%100\\%%")]
#[case("villa_4", "%villa\\_4%")]
#[case("a\\b", "%a\\\\b%")]
#[case("Pérez", "%Pérez%")]
fn test_search_terms_match_literally(#[case] term: &str, #[case] expected: &str) {
    assert_eq!(contains_pattern(term), expected);
}
