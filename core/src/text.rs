//! Component B — text normalizer (spec.md §4.B).
//!
//! Grounded on the free functions `Normalize`/`Equals`/`Contains`/`Cut` used
//! throughout `examples/original_source/mtgmatcher/mtgmatcher.go` and
//! `mtgdb`; here they are plain functions rather than package-level
//! helpers, since Rust has no implicit package scope to hang them on.

/// Strip accents, lowercase, drop apostrophes/punctuation, collapse whitespace.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = false;
    for ch in s.chars() {
        let base = strip_accent(ch);
        if base == '\'' || base == '\u{2019}' {
            continue;
        }
        if base.is_alphanumeric() {
            for lower in base.to_lowercase() {
                out.push(lower);
            }
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    out.trim().to_string()
}

fn strip_accent(ch: char) -> char {
    // A small, explicit transliteration table covers the accented Latin
    // letters that actually show up in Magic card names (Aether, Lim-Dûl,
    // Jötun, etc.) without pulling in a full Unicode-decomposition crate.
    match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        other => other,
    }
}

pub fn equals(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

pub fn contains(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    normalize(haystack).contains(&normalize(needle))
}

pub fn has_prefix(s: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    normalize(s).starts_with(&normalize(prefix))
}

/// First numeric (or number-with-trailing-letter, e.g. "22b") token in `s`.
pub fn extract_number(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            // allow exactly one trailing letter suffix, e.g. "22b"
            if i < chars.len() && chars[i].is_ascii_alphabetic() {
                let next_is_boundary = i + 1 >= chars.len() || !chars[i + 1].is_alphanumeric();
                if next_is_boundary {
                    i += 1;
                }
            }
            return chars[start..i].iter().collect();
        }
        i += 1;
    }
    String::new()
}

/// Split a card-name string on balanced `(...)` groups, returning
/// `[base, paren1, paren2, ...]`. Grounded on `mtgban.SplitVariants`,
/// referenced from `abugames/preprocess.go` and `channelfireball.go`.
/// Nested parentheses are flattened into their enclosing group's text.
pub fn split_variants(s: &str) -> Vec<String> {
    let mut base = String::new();
    let mut groups: Vec<String> = Vec::new();
    let mut depth: i32 = 0;
    let mut current = String::new();

    for ch in s.chars() {
        match ch {
            '(' => {
                if depth == 0 {
                    current = String::new();
                } else {
                    current.push(ch);
                }
                depth += 1;
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    groups.push(current.trim().to_string());
                } else {
                    current.push(ch);
                }
            }
            _ => {
                if depth == 0 {
                    base.push(ch);
                } else {
                    current.push(ch);
                }
            }
        }
    }

    let mut out = vec![base.trim().to_string()];
    out.extend(groups.into_iter().filter(|g| !g.is_empty()));
    out
}

/// Two-part split around the first occurrence of `sep`; if `sep` is
/// absent, the second half is empty (`Cut` in the original source).
pub fn cut(s: &str, sep: &str) -> (String, String) {
    match s.find(sep) {
        Some(idx) => (
            s[..idx].to_string(),
            s[idx + sep.len()..].to_string(),
        ),
        None => (s.to_string(), String::new()),
    }
}
