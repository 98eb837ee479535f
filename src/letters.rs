//! Byte ↔ letter conversion for the word list.
//!
//! The word list only ever holds lowercase ASCII letters plus the two separator
//! bytes, so decoding is a plain byte-to-`char` cast. Uppercasing clears bit
//! `0x20`. None of this is a general text decoder: feed it anything other than
//! `a`-`z` and the output is meaningless.

/// Byte ending a line (a group of anagrams) in the word list.
pub(crate) const LINE_SEPARATOR: u8 = b'.';
/// Byte between words on the same line.
pub(crate) const WORD_SEPARATOR: u8 = b' ';

const CASE_BIT: u8 = 0x20;

/// Case to produce when decoding word-list bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterCase {
    Lower,
    Upper,
}

/// Decode lowercase ASCII letter bytes into characters.
///
/// Only valid for bytes in `a..=z`.
#[must_use]
pub fn decode(bytes: &[u8], case: LetterCase) -> Vec<char> {
    match case {
        LetterCase::Lower => bytes.iter().map(|&b| char::from(b)).collect(),
        LetterCase::Upper => bytes.iter().map(|&b| char::from(b & !CASE_BIT)).collect(),
    }
}

/// Same as [`decode`], collected into a `String`.
#[must_use]
pub fn decode_string(bytes: &[u8], case: LetterCase) -> String {
    decode(bytes, case).into_iter().collect()
}

/// Sorted-letters key shared by every anagram of `letters`.
#[must_use]
pub fn sorted_key(letters: impl IntoIterator<Item = char>) -> String {
    let mut chars: Vec<char> = letters.into_iter().map(|c| c.to_ascii_lowercase()).collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

/// Split a stored line into its words.
pub(crate) fn words(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(|&b| b == WORD_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lower_is_passthrough() {
        assert_eq!(decode(b"cats", LetterCase::Lower), vec!['c', 'a', 't', 's']);
    }

    #[test]
    fn test_decode_upper_clears_case_bit() {
        assert_eq!(decode_string(b"computers", LetterCase::Upper), "COMPUTERS");
        for b in b'a'..=b'z' {
            assert_eq!(decode(&[b], LetterCase::Upper), vec![char::from(b).to_ascii_uppercase()]);
        }
    }

    #[test]
    fn test_sorted_key() {
        assert_eq!(sorted_key("cats".chars()), "acst");
        assert_eq!(sorted_key("acts".chars()), sorted_key("cats".chars()));
        assert_eq!(sorted_key("RTSucmope".chars()), "cemoprstu");
        assert_eq!(sorted_key(std::iter::empty()), "");
    }

    #[test]
    fn test_words_split() {
        let split: Vec<&[u8]> = words(b"acts cats scat").collect();
        assert_eq!(split, vec![&b"acts"[..], b"cats", b"scat"]);
        assert_eq!(words(b"computers").count(), 1);
    }
}
