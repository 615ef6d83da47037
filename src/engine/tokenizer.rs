use crate::engine::command::OopsBuffer;
use crate::engine::vocab::WordIndex;

/// Uppercase and split a raw input line into words.
pub fn tokenize(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .map(|w| w.to_uppercase())
        .collect()
}

/// Filler articles are stripped before item resolution but kept in the
/// word list up to that point so prompts can echo them.
pub fn strip_fillers(words: &[String]) -> Vec<String> {
    words
        .iter()
        .filter(|w| w.as_str() != "THE" && w.as_str() != "A")
        .cloned()
        .collect()
}

pub fn is_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

/// First word the grammar knows nothing about, if any. Finding one arms
/// the OOPS correction buffer: the word's position plus the command with
/// the word removed, so a correction can be spliced back in.
pub fn first_unknown(
    vocab: &WordIndex,
    words: &[String],
    allow_number: bool,
) -> Option<(usize, OopsBuffer)> {
    for (index, word) in words.iter().enumerate() {
        if !vocab.is_known(word, allow_number) {
            let rest: Vec<String> = words
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, w)| w.clone())
                .collect();
            return Some((index, OopsBuffer { index, words: rest }));
        }
    }
    None
}

/// Rebuild the previous command with the correction words inserted where
/// the unknown word sat.
pub fn splice_oops(oops: &OopsBuffer, corrections: &[String]) -> Vec<String> {
    let mut words = oops.words.clone();
    let at = oops.index.min(words.len());
    for (offset, word) in corrections.iter().enumerate() {
        words.insert(at + offset, word.clone());
    }
    words
}
