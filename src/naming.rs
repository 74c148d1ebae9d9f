//! Natural ordering and display names for library entries.
//!
//! Schema folders and layer files carry numeric markers (`-1-Bone.png`,
//! `-10-Skin.png`) that must sort by magnitude, not character by character.
//! Every ordering decision in the crate goes through [`natural_cmp`].
//!
//! ## Keys
//!
//! A name is split into alternating runs of ASCII digits and everything else:
//!
//! - `"-10-Body"` → `[Text("-"), Number(10), Text("-body")]`
//! - `"Layer2b"` → `[Text("layer"), Number(2), Text("b")]`
//!
//! Text runs are lowercased. Keys compare token by token; when the tokens at a
//! position differ in kind, the number sorts first.
//!
//! ## Display Names
//!
//! Layer files are shown by their stem with underscores turned into spaces and
//! each word capitalized:
//! - `-1-femur_head.png` → "-1-Femur Head"
//! - `SKULL_base.tif` → "Skull Base"

use std::cmp::Ordering;
use std::path::Path;

/// One run of a split name.
///
/// Variant order is significant: the derived `Ord` places every `Number`
/// before every `Text`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    Number(u64),
    Text(String),
}

/// Ordering key for a name. Compares lexicographically over its tokens, so a
/// key that is a strict prefix of another sorts first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NaturalKey(Vec<Token>);

impl NaturalKey {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }
}

/// Split `name` into its natural ordering key.
///
/// Digit runs too long for a `u64` saturate to `u64::MAX`.
pub fn natural_key(name: &str) -> NaturalKey {
    let mut tokens = Vec::new();
    let mut run = String::new();
    let mut run_is_digits = false;

    for c in name.chars() {
        let is_digit = c.is_ascii_digit();
        if !run.is_empty() && is_digit != run_is_digits {
            tokens.push(finish_run(&run, run_is_digits));
            run.clear();
        }
        run_is_digits = is_digit;
        run.push(c);
    }
    if !run.is_empty() {
        tokens.push(finish_run(&run, run_is_digits));
    }

    NaturalKey(tokens)
}

fn finish_run(run: &str, digits: bool) -> Token {
    if digits {
        Token::Number(run.parse().unwrap_or(u64::MAX))
    } else {
        Token::Text(run.to_lowercase())
    }
}

/// Compare two names in natural order.
///
/// Names whose keys are equal (`"a"` and `"A"`, `"01"` and `"1"`) fall back
/// to a plain string comparison so sorting stays deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a)
        .cmp(&natural_key(b))
        .then_with(|| a.cmp(b))
}

/// Human-readable layer name derived from a file name.
pub fn display_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    title_case(&stem.replace('_', " "))
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
