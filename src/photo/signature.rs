//! Grouping key for photos that were uploaded in the same batch.
//!
//! Photos imported together share a filename convention, so a short key
//! derived from the filename keeps a batch contiguous in the gallery. The
//! conventions we know about are matched first; anything else falls back to
//! a digit-stripped prefix of the filename stem.

/// One filename convention: stems containing `pattern` all map to `key`.
///
/// New upload conventions are added here; the grouping algorithm never
/// changes.
#[derive(Debug, Clone, Copy)]
pub struct SignatureRule {
    pattern: &'static str,
    key: &'static str,
}

// Conventions observed in the imported photo sets. First match wins.
const SIGNATURE_RULES: &[SignatureRule] = &[
    SignatureRule {
        pattern: "i268P",
        key: "i268P",
    },
    SignatureRule {
        pattern: "iUg3s56gtAT3cfaA5U90",
        key: "iUg3s56gtAT3cfaA5U90",
    },
    SignatureRule {
        pattern: "iUG8o15s",
        key: "iUG8o15s",
    },
];

const FALLBACK_PREFIX_CHARS: usize = 8;

/// Derive the batch signature of a photo url.
///
/// Pure and total: a malformed or empty url degrades to the empty
/// signature rather than failing, so one bad photo never prevents the rest
/// of a collection from being ordered.
pub fn signature(url: &str) -> String {
    let stem = filename_stem(url);
    for rule in SIGNATURE_RULES {
        if stem.contains(rule.pattern) {
            return rule.key.to_owned();
        }
    }
    stem.chars()
        .take(FALLBACK_PREFIX_CHARS)
        .filter(|c| !c.is_ascii_digit())
        .collect()
}

// Filename without its image extension.
fn filename_stem(url: &str) -> &str {
    let filename = url.rsplit('/').next().unwrap_or_default();
    match filename.rsplit_once('.') {
        Some((stem, extension))
            if matches!(
                extension.to_ascii_lowercase().as_str(),
                "jpg" | "jpeg" | "png" | "gif"
            ) =>
        {
            stem
        }
        _ => filename,
    }
}
