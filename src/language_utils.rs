use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating and normalizing ISO 639-1
/// (2-letter) and ISO 639-2/3 (3-letter) codes, and for picking the code the
/// translation provider expects.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T or 639-3 (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Codes the provider accepts for automatic source detection
const AUTO_DETECT: &str = "auto";

/// Languages the web provider is known to handle, in its own code space
const PROVIDER_SUPPORTED: &[&str] = &[
    "en", "ee", "fr", "es", "de", "gaa", "zh", "ja", "ko", "ru", "ar", "hi", "pt", "it", "nl",
    "pl", "sv", "da", "fi", "el", "cs", "ro", "hu", "sk", "bg", "sl", "lt", "lv", "et", "mt",
    "ak", "ha", "ig", "yo", "zu", "sw", "am", "sn", "tn", "ts", "nso", "xh", "st", "ny", "om",
    "so", "ti", "rw", "lg", "ln",
];

/// ISO 639-2/B codes that differ from their 639-2/T form
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    let part2t = match code {
        "fre" => "fra", // French
        "ger" => "deu", // German
        "dut" => "nld", // Dutch
        "gre" => "ell", // Greek
        "chi" => "zho", // Chinese
        "cze" => "ces", // Czech
        "ice" => "isl", // Icelandic
        "alb" => "sqi", // Albanian
        "arm" => "hye", // Armenian
        "baq" => "eus", // Basque
        "bur" => "mya", // Burmese
        "per" => "fas", // Persian
        "geo" => "kat", // Georgian
        "may" => "msa", // Malay
        "mac" => "mkd", // Macedonian
        "rum" => "ron", // Romanian
        "slo" => "slk", // Slovak
        "wel" => "cym", // Welsh
        _ => return None,
    };
    Some(part2t)
}

/// Names in common use that are not ISO codes of the intended language
fn alias_to_provider(code: &str) -> Option<&'static str> {
    match code {
        "twi" | "tw" => Some("ak"), // Twi is served as Akan
        "fante" | "fat" => Some("ak"),
        _ => None,
    }
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2/3 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    // Check for ISO 639-1 (2-letter) code
    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    }
    // Check for ISO 639-2/T or 639-3 (3-letter) code
    else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2T);
        }

        if part2b_to_part2t(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2B);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    // If it's a 2-letter code, convert to 3-letter
    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    }
    // If it's already a 3-letter code, ensure it's ISO 639-2/T
    else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }

        if let Some(part2t) = part2b_to_part2t(&normalized_code) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Convert a code to the form passed to the translation provider
///
/// Two-letter codes are kept, three-letter codes become their ISO 639-1
/// equivalent when one exists and stay three-letter otherwise (`gaa`).
/// Aliases such as `twi` map to the code the provider serves them under.
pub fn to_provider_code(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code == AUTO_DETECT {
        return Ok(normalized_code);
    }
    if let Some(alias) = alias_to_provider(&normalized_code) {
        return Ok(alias.to_string());
    }

    let part2t = normalize_to_part2t(&normalized_code)?;
    let lang = Language::from_639_3(&part2t)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", part2t))?;

    Ok(lang.to_639_1().map(str::to_string).unwrap_or(part2t))
}

/// Convert a provider code back to ISO 639-3
pub fn from_provider_code(code: &str) -> Result<String> {
    normalize_to_part2t(code)
}

/// Check if the provider is known to handle a language
pub fn is_provider_supported(code: &str) -> bool {
    match to_provider_code(code) {
        Ok(provider_code) => PROVIDER_SUPPORTED.contains(&provider_code.as_str()),
        Err(_) => false,
    }
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (to_provider_code(code1), to_provider_code(code2)) {
        (Ok(normalized1), Ok(normalized2)) => normalized1 == normalized2,
        _ => false,
    }
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let provider_code = to_provider_code(code)?;
    let normalized = normalize_to_part2t(&provider_code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
