//! English pluralization for module name derivation
//!
//! Locale-invariant rules, applied to entity type names the way the remote
//! service derives its module names. Case of the stem is preserved; only
//! suffixes are rewritten.

/// Convert a type name to its plural form
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();

    // quiz -> quizzes
    if lower.ends_with('z') {
        return format!("{word}zes");
    }

    // address -> addresses, branch -> branches, box -> boxes
    if lower.ends_with('s') || lower.ends_with("sh") || lower.ends_with("ch") || lower.ends_with('x')
    {
        return format!("{word}es");
    }

    // opportunity -> opportunities, but key -> keys
    if lower.ends_with('y') && ends_with_consonant_before(&lower, 'y') {
        return format!("{}ies", &word[..word.len() - 1]);
    }

    // knife -> knives
    if lower.ends_with("fe") {
        return format!("{}ves", &word[..word.len() - 2]);
    }

    // leaf -> leaves
    if lower.ends_with('f') {
        return format!("{}ves", &word[..word.len() - 1]);
    }

    // hero -> heroes, but video -> videos
    if lower.ends_with('o') && ends_with_consonant_before(&lower, 'o') {
        return format!("{word}es");
    }

    format!("{word}s")
}

/// True when the character before the trailing `suffix` is a consonant
fn ends_with_consonant_before(lower: &str, suffix: char) -> bool {
    lower
        .strip_suffix(suffix)
        .and_then(|stem| stem.chars().last())
        .is_some_and(|c| c.is_ascii_alphabetic() && !"aeiou".contains(c))
}
