/*!
 * Tests for language name lookup
 */

use ytscribe::language_utils::get_language_name;

#[test]
fn test_getLanguageName_withValidCodes_shouldReturnCorrectName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("eng").unwrap(), "English");
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("es").unwrap(), "Spanish");

    // Whitespace and case
    assert_eq!(get_language_name(" EN ").unwrap(), "English");
}

#[test]
fn test_getLanguageName_withRegionalVariant_shouldUseBaseCode() {
    assert_eq!(get_language_name("en-US").unwrap(), "English");
    assert_eq!(get_language_name("pt-BR").unwrap(), "Portuguese");
}

#[test]
fn test_getLanguageName_withInvalidCodes_shouldFail() {
    assert!(get_language_name("xx").is_err());
    assert!(get_language_name("xyzq").is_err());
    assert!(get_language_name("").is_err());
    assert!(get_language_name("123").is_err());
}
