use crate::common::constants::COUNTRY_PREFIXES;
use crate::pipeline::venue::place_names::PLACE_NAMES;

/// Han ideographs and Japanese kana. Hangul is the target script and is not
/// included.
pub fn is_foreign_script(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}'      // Hiragana
        | '\u{30A0}'..='\u{30FF}'    // Katakana
        | '\u{31F0}'..='\u{31FF}'    // Katakana phonetic extensions
        | '\u{3100}'..='\u{312F}'    // Bopomofo
        | '\u{3400}'..='\u{4DBF}'    // CJK extension A
        | '\u{4E00}'..='\u{9FFF}'    // CJK unified ideographs
        | '\u{F900}'..='\u{FAFF}'    // CJK compatibility ideographs
        | '\u{FF66}'..='\u{FF9F}'    // Halfwidth katakana
        | '\u{20000}'..='\u{2A6DF}'  // CJK extension B
    )
}

pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || (('\u{00C0}'..='\u{024F}').contains(&c) && c != '\u{00D7}' && c != '\u{00F7}')
}

/// Separators that carry no meaning at either end of an address. Brackets
/// are not included: "(06164)" must survive.
fn is_stray_punctuation(c: char) -> bool {
    c.is_whitespace()
        || matches!(c, ',' | '.' | '-' | '_' | ':' | ';' | '/' | '|' | '~' | '·' | '、' | '。' | '，' | '・')
}

/// Drops a leading country name such as "Republic of Korea" or "대한민국",
/// together with the separator after it.
///
/// A bare one-word Latin prefix ("Korea") followed only by whitespace and a
/// capitalized word is the start of a name ("Korea University"), not a
/// country, and is left alone.
pub fn strip_country_prefix(raw: &str) -> &str {
    let trimmed = raw.trim_start();
    for prefix in COUNTRY_PREFIXES {
        let Some(head) = trimmed.get(..prefix.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(prefix) {
            continue;
        }
        let rest = &trimmed[prefix.len()..];
        // "Korean Art Center" is not a country prefix.
        if rest.chars().next().is_some_and(char::is_alphanumeric) {
            continue;
        }
        let after = rest.trim_start_matches(is_stray_punctuation);
        let bare_word = prefix.is_ascii() && !prefix.contains(' ');
        let only_space = rest.len() - rest.trim_start().len() == rest.len() - after.len();
        if bare_word && only_space && after.starts_with(|c: char| c.is_ascii_uppercase()) {
            continue;
        }
        return after;
    }
    trimmed
}

/// True when an address should not be shown as-is: it is empty, contains
/// Han/kana, or its first letter is Latin.
pub fn needs_localization(address: &str) -> bool {
    let address = address.trim();
    if address.is_empty() || address.chars().any(is_foreign_script) {
        return true;
    }
    address
        .chars()
        .find(|c| c.is_alphabetic())
        .map_or(false, is_latin_letter)
}

/// Collapses whitespace, drops tokens made only of punctuation, and trims
/// punctuation from both ends.
pub fn tidy(text: &str) -> String {
    text.split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(is_stray_punctuation)
        .to_string()
}

/// Best-effort Korean rendering of a foreign-script address whose country
/// prefix has already been stripped.
///
/// Known place names are substituted first; whatever foreign script or Latin
/// text is left is removed. The result may be empty.
pub fn transliterate(address: &str) -> String {
    let substituted = PLACE_NAMES.substitute(address);
    let stripped: String = substituted
        .chars()
        .filter(|&c| !is_foreign_script(c) && !is_latin_letter(c))
        .collect();
    tidy(&stripped)
}
