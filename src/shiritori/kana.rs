// SPDX-License-Identifier: GPL-3.0-only

//! Mora helpers for chaining Japanese species names.
//!
//! Chaining works on the final mora of a reading, not on its raw last
//! character: small kana count as their full-size form, and a trailing long
//! vowel mark counts as the vowel of the syllable it extends.

/// Final mora that loses the game
pub const TERMINAL_MORA: char = 'ン';

const LONG_VOWEL_MARK: char = 'ー';

/// Small kana and their full-size equivalents
const SMALL_KANA: &[(char, char)] = &[
    ('ァ', 'ア'),
    ('ィ', 'イ'),
    ('ゥ', 'ウ'),
    ('ェ', 'エ'),
    ('ォ', 'オ'),
    ('ッ', 'ツ'),
    ('ャ', 'ヤ'),
    ('ュ', 'ユ'),
    ('ョ', 'ヨ'),
    ('ヮ', 'ワ'),
    ('ヵ', 'カ'),
    ('ヶ', 'ケ'),
];

/// Full-size katakana grouped by vowel class
const VOWEL_ROWS: &[(char, &str)] = &[
    ('ア', "アカガサザタダナハバパマヤラワヷ"),
    ('イ', "イキギシジチヂニヒビピミリヰヸ"),
    ('ウ', "ウクグスズツヅヌフブプムユルヴ"),
    ('エ', "エケゲセゼテデネヘベペメレヱヹ"),
    ('オ', "オコゴソゾトドノホボポモヨロヲヺ"),
];

/// Folds a hiragana character into katakana, leaving everything else untouched
pub fn to_katakana(c: char) -> char {
    match c {
        '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + 0x60).unwrap_or(c),
        _ => c,
    }
}

/// Folds every hiragana character of `word` into katakana and trims surrounding whitespace
pub fn fold_word(word: &str) -> String {
    word.trim().chars().map(to_katakana).collect()
}

/// Whether `c` is a katakana mora or the long vowel mark
pub fn is_kana(c: char) -> bool {
    matches!(c, '\u{30A1}'..='\u{30FA}' | LONG_VOWEL_MARK)
}

/// Maps a small kana to its full-size equivalent
pub fn normalize_mora(c: char) -> char {
    let c = to_katakana(c);
    SMALL_KANA
        .iter()
        .find(|(small, _)| *small == c)
        .map_or(c, |(_, full)| *full)
}

/// Vowel class (`ア`, `イ`, `ウ`, `エ`, `オ`) of a kana, `None` for `ン` and non-kana
pub fn vowel_of(c: char) -> Option<char> {
    let c = normalize_mora(c);
    VOWEL_ROWS
        .iter()
        .find(|(_, row)| row.contains(c))
        .map(|(vowel, _)| *vowel)
}

/// The mora the next word has to start with.
///
/// Trailing non-kana such as `♀`, `２` or `Ｚ` are skipped. A trailing long vowel
/// mark resolves to the vowel of the preceding mora.
pub fn last_mora(word: &str) -> Option<char> {
    // reversed, trailing non-kana dropped
    let kana: Vec<char> = word
        .chars()
        .rev()
        .map(to_katakana)
        .skip_while(|c| !is_kana(*c))
        .collect();

    let last = *kana.first()?;
    if last != LONG_VOWEL_MARK {
        return Some(normalize_mora(last));
    }

    let extended = kana.iter().find(|c| **c != LONG_VOWEL_MARK)?;
    Some(vowel_of(*extended).unwrap_or_else(|| normalize_mora(*extended)))
}

/// The mora a word starts with
pub fn first_mora(word: &str) -> Option<char> {
    word.chars()
        .map(to_katakana)
        .find(|c| is_kana(*c) && *c != LONG_VOWEL_MARK)
        .map(normalize_mora)
}

/// Whether playing `word` loses the game
pub fn ends_with_terminal(word: &str) -> bool {
    last_mora(word) == Some(TERMINAL_MORA)
}
