/*!
 * Tests for ISO language code utilities
 */

use subdub::language_utils::{get_language_name, language_codes_match, normalize_to_part1};

/// Test normalization of 2- and 3-letter codes
#[test]
fn test_normalize_to_part1_withValidCodes_shouldReturnTwoLetterCode() {
    assert_eq!(normalize_to_part1("en").unwrap(), "en");
    assert_eq!(normalize_to_part1("eng").unwrap(), "en");
    assert_eq!(normalize_to_part1("ara").unwrap(), "ar");
    assert_eq!(normalize_to_part1(" AR ").unwrap(), "ar");
}

/// Test rejection of unknown codes
#[test]
fn test_normalize_to_part1_withInvalidCodes_shouldFail() {
    assert!(normalize_to_part1("zz").is_err());
    assert!(normalize_to_part1("english").is_err());
    assert!(normalize_to_part1("").is_err());
}

/// Test language code matching across code lengths
#[test]
fn test_language_codes_match_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("ar", "ara"));
    assert!(!language_codes_match("en", "ar"));
    assert!(!language_codes_match("en", "bogus"));
}

/// Test English names for codes
#[test]
fn test_get_language_name_withValidCodes_shouldReturnEnglishName() {
    assert_eq!(get_language_name("ar").unwrap(), "Arabic");
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert!(get_language_name("xx").is_err());
}
