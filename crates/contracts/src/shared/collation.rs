//! Vietnamese collation for name columns
//!
//! Three comparison levels, each only consulted when the previous one ties:
//! base letters in alphabet order (case and tone ignored), then tone marks
//! (unmarked, huyền, hỏi, ngã, sắc, nặng), then case (lower before upper).
//! Strings that tie on all three fall back to code point order so the result
//! is a total order.

use std::cmp::Ordering;

/// Alphabet order of base letters. Latin letters outside the Vietnamese
/// alphabet (f, j, w, z) are slotted where the Latin alphabet puts them.
const ALPHABET: &str = "aăâbcdđeêfghijklmnoôơpqrstuưvwxyz";

/// Each vowel with its five toned forms, in tone order
const TONED_VOWELS: [&str; 12] = [
    "aàảãáạ",
    "ăằẳẵắặ",
    "âầẩẫấậ",
    "eèẻẽéẹ",
    "êềểễếệ",
    "iìỉĩíị",
    "oòỏõóọ",
    "ôồổỗốộ",
    "ơờởỡớợ",
    "uùủũúụ",
    "ưừửữứự",
    "yỳỷỹýỵ",
];

/// Combining tone marks for text that arrives decomposed
const COMBINING_TONES: [(char, u8); 5] = [
    ('\u{0300}', 1),
    ('\u{0309}', 2),
    ('\u{0303}', 3),
    ('\u{0301}', 4),
    ('\u{0323}', 5),
];

const RANK_SPACE: u32 = 0;
const RANK_DIGIT: u32 = 1;
const RANK_LETTER: u32 = 100;
const RANK_OTHER: u32 = 1_000;

#[derive(Debug, Clone, Copy)]
struct Weight {
    primary: u32,
    tone: u8,
    upper: bool,
}

fn split_tone(lower: char) -> (char, u8) {
    for group in TONED_VOWELS {
        if let Some(tone) = group.chars().position(|c| c == lower) {
            if let Some(base) = group.chars().next() {
                return (base, tone as u8);
            }
        }
    }
    (lower, 0)
}

fn weight_of(c: char) -> Weight {
    let lower = c.to_lowercase().next().unwrap_or(c);
    let upper = lower != c;
    let (base, tone) = split_tone(lower);

    let primary = if base.is_whitespace() {
        RANK_SPACE
    } else if let Some(digit) = base.to_digit(10) {
        RANK_DIGIT + digit
    } else if let Some(position) = ALPHABET.chars().position(|l| l == base) {
        RANK_LETTER + position as u32
    } else {
        RANK_OTHER + base as u32
    };

    Weight {
        primary,
        tone,
        upper,
    }
}

fn weights(s: &str) -> Vec<Weight> {
    let mut out: Vec<Weight> = Vec::with_capacity(s.len());
    for c in s.chars() {
        if let Some((_, tone)) = COMBINING_TONES.iter().find(|(mark, _)| *mark == c) {
            if let Some(last) = out.last_mut() {
                last.tone = *tone;
                continue;
            }
        }
        out.push(weight_of(c));
    }
    out
}

fn compare_level<F, K>(a: &[Weight], b: &[Weight], key: F) -> Ordering
where
    F: Fn(&Weight) -> K,
    K: Ord,
{
    a.iter().map(&key).cmp(b.iter().map(&key))
}

/// Compares two strings using Vietnamese alphabet order
pub fn compare_vi(a: &str, b: &str) -> Ordering {
    let wa = weights(a);
    let wb = weights(b);

    compare_level(&wa, &wb, |w| w.primary)
        .then_with(|| compare_level(&wa, &wb, |w| w.tone))
        .then_with(|| compare_level(&wa, &wb, |w| w.upper))
        .then_with(|| a.cmp(b))
}
