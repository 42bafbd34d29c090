//! DMARC tag-list tokenization.
//!
//! DMARC records are a `;`-delimited list of `key=value` tags. Keys are
//! case-insensitive and whitespace around the `=` is tolerated. Working on
//! explicit tokens keeps tag lookup and rewriting exact: a rewrite touches
//! only the tag it targets and reproduces every other byte verbatim.

/// Returns the trimmed value of the first tag matching `key`.
pub fn tag_value<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    for segment in content.split(';') {
        if let Some((k, v)) = segment.split_once('=') {
            if k.trim().eq_ignore_ascii_case(key) {
                return Some(v.trim());
            }
        }
    }
    None
}

/// Returns the leading alphanumeric run of `value`, lowercased.
///
/// Tag values of interest here are plain alphanumeric labels; anything
/// after the first non-alphanumeric character is ignored.
pub fn alnum_label(value: &str) -> Option<String> {
    let label: String = value
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if label.is_empty() {
        None
    } else {
        Some(label.to_ascii_lowercase())
    }
}

/// Rewrites the value of the first tag matching `key` to `new_value`.
///
/// Only the alphanumeric value run is replaced; the key half, surrounding
/// whitespace, separators, and every other segment are reproduced
/// byte-for-byte. Returns `None` when the tag is not present.
pub fn rewrite_tag(content: &str, key: &str, new_value: &str) -> Option<String> {
    let mut out: Vec<String> = Vec::new();
    let mut rewritten = false;
    for segment in content.split(';') {
        if !rewritten {
            if let Some((k, v)) = segment.split_once('=') {
                if k.trim().eq_ignore_ascii_case(key) {
                    let lead = &v[..v.len() - v.trim_start().len()];
                    let body = v.trim_start();
                    let run = body
                        .char_indices()
                        .find(|(_, c)| !c.is_ascii_alphanumeric())
                        .map(|(i, _)| i)
                        .unwrap_or(body.len());
                    out.push(format!("{k}={lead}{new_value}{}", &body[run..]));
                    rewritten = true;
                    continue;
                }
            }
        }
        out.push(segment.to_string());
    }
    if rewritten {
        Some(out.join(";"))
    } else {
        None
    }
}
