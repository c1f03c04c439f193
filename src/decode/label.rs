//! Field label normalization
//!
//! Docmail labels its response fields either in PascalCase (`MailingGUID`)
//! or as spaced words (`Max Price Ex Vat`). Both are mapped to snake_case.

/// Characters stripped from both ends of a label
const STRIP_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Normalize a raw field label into a canonical snake_case name.
///
/// ```
/// use docmail::decode::normalize_label;
///
/// assert_eq!(normalize_label("MailingGUID"), "mailing_guid");
/// assert_eq!(normalize_label("Max Price Ex Vat"), "max_price_ex_vat");
/// ```
pub fn normalize_label(label: &str) -> String {
    let joined = if label.contains(' ') {
        label.to_string()
    } else {
        split_caps(label).join("_")
    };

    joined
        .trim_matches(STRIP_CHARS)
        .replace(' ', "_")
        .to_lowercase()
}

/// Split a string into runs using capital letters as separators.
///
/// A run of capitals stays together as an acronym. When the acronym is
/// followed by a lowercase letter its last capital starts the next run, so
/// `HTTPPost` splits into `HTTP` and `Post`.
pub fn split_caps(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let run = |from: usize, to: usize| -> String { chars[from..to.max(from)].iter().collect() };

    let mut runs = Vec::new();
    let mut in_caps = false;
    let mut start = 0;

    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && ch.is_uppercase() {
            if in_caps && !is_all_caps(&chars[start..i]) {
                runs.push(run(start, i - 1));
                start = i - 1;
            }
            in_caps = true;
        } else if in_caps {
            runs.push(run(start, i - 1));
            in_caps = false;
            start = i - 1;
        }
    }

    runs.push(run(start, chars.len()));
    runs
}

/// True when the slice has at least one cased letter and none are lowercase
fn is_all_caps(chars: &[char]) -> bool {
    chars.iter().any(|c| c.is_uppercase()) && !chars.iter().any(|c| c.is_lowercase())
}
