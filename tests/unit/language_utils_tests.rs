/*!
 * Tests for language code utilities
 */

use termlock::language_utils::{
    LanguageCodeType, from_provider_code, get_language_name, is_provider_supported, language_codes_match,
    normalize_to_part2t, to_provider_code, validate_language_code,
};

#[test]
fn test_validateLanguageCode_shouldAcceptAllIsoForms() {
    assert_eq!(validate_language_code("ak").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code(" EN ").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("gaa").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("fre").unwrap(), LanguageCodeType::Part2B);
    assert!(validate_language_code("qqq").is_err());
    assert!(validate_language_code("english").is_err());
}

#[test]
fn test_normalizeToPart2t_shouldReturnThreeLetterCodes() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("ak").unwrap(), "aka");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert!(normalize_to_part2t("xx").is_err());
}

#[test]
fn test_toProviderCode_shouldPreferTwoLetterCodes() {
    assert_eq!(to_provider_code("eng").unwrap(), "en");
    assert_eq!(to_provider_code("aka").unwrap(), "ak");
    assert_eq!(to_provider_code("ewe").unwrap(), "ee");
    assert_eq!(to_provider_code("fr").unwrap(), "fr");
}

#[test]
fn test_toProviderCode_withoutTwoLetterEquivalent_shouldKeepThreeLetterCode() {
    assert_eq!(to_provider_code("gaa").unwrap(), "gaa");
}

#[test]
fn test_toProviderCode_withAliases_shouldMapToAkan() {
    assert_eq!(to_provider_code("twi").unwrap(), "ak");
    assert_eq!(to_provider_code("TW").unwrap(), "ak");
    assert_eq!(to_provider_code("fat").unwrap(), "ak");
    assert_eq!(to_provider_code("auto").unwrap(), "auto");
}

#[test]
fn test_fromProviderCode_shouldExpandToIso6393() {
    assert_eq!(from_provider_code("ak").unwrap(), "aka");
    assert_eq!(from_provider_code("gaa").unwrap(), "gaa");
}

#[test]
fn test_isProviderSupported() {
    assert!(is_provider_supported("twi"));
    assert!(is_provider_supported("gaa"));
    assert!(is_provider_supported("eng"));
    assert!(!is_provider_supported("qqq"));
}

#[test]
fn test_languageCodesMatch_acrossCodeForms() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("twi", "ak"));
    assert!(language_codes_match("fre", "fr"));
    assert!(!language_codes_match("en", "fr"));
    assert!(!language_codes_match("en", "qqq"));
}

#[test]
fn test_getLanguageName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("fra").unwrap(), "French");
    assert_eq!(get_language_name("twi").unwrap(), "Akan");
    assert!(get_language_name("qqq").is_err());
}
