// src/drill/codegroups.rs  —  Random code groups (letters / alnum / digits)
use super::Drill;
use crate::morse::{encode, EncodedMessage};
use anyhow::Result;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const ALNUM:   &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const DIGITS:  &[u8] = b"0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind { Alpha, Alnum, Digits }

impl GroupKind {
    fn pool(self) -> &'static [u8] {
        match self {
            GroupKind::Alpha  => LETTERS,
            GroupKind::Alnum  => ALNUM,
            GroupKind::Digits => DIGITS,
        }
    }
}

/// Endless generator: every line is fresh, so there is nothing to walk
/// sequentially and `next_line` is just another random line.
pub struct CodeGroups {
    kind:      GroupKind,
    group_len: usize,
    per_line:  usize,
    rng:       SmallRng,
}

impl CodeGroups {
    pub fn new(kind: GroupKind, group_len: usize, per_line: usize, rng: SmallRng) -> Self {
        Self { kind, group_len: group_len.max(1), per_line: per_line.max(1), rng }
    }

    fn group(&mut self) -> String {
        let pool = self.kind.pool();
        (0..self.group_len)
            .filter_map(|_| pool.choose(&mut self.rng))
            .map(|&b| b as char)
            .collect()
    }

    pub fn text_line(&mut self) -> String {
        (0..self.per_line).map(|_| self.group()).collect::<Vec<_>>().join(" ")
    }
}

impl Drill for CodeGroups {
    fn random_line(&mut self) -> Result<EncodedMessage> {
        Ok(encode(&self.text_line()))
    }

    fn next_line(&mut self) -> Option<EncodedMessage> {
        Some(encode(&self.text_line()))
    }

    fn reset(&mut self) {}
    fn num_lines(&self) -> usize { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill::make_rng;

    #[test]
    fn line_shape_matches_settings() {
        let mut cg = CodeGroups::new(GroupKind::Alpha, 4, 3, make_rng(Some(11)));
        let line = cg.text_line();
        let groups: Vec<&str> = line.split(' ').collect();
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.len() == 4));
        assert!(line.chars().all(|c| c == ' ' || c.is_ascii_lowercase()));
    }

    #[test]
    fn digit_groups_are_digits_only() {
        let mut cg = CodeGroups::new(GroupKind::Digits, 5, 5, make_rng(Some(3)));
        for _ in 0..10 {
            assert!(cg.text_line().chars().all(|c| c == ' ' || c.is_ascii_digit()));
        }
    }

    #[test]
    fn alnum_draws_from_both_pools() {
        let mut cg = CodeGroups::new(GroupKind::Alnum, 5, 5, make_rng(Some(5)));
        let text: String = (0..20).map(|_| cg.text_line()).collect();
        assert!(text.chars().any(|c| c.is_ascii_digit()));
        assert!(text.chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn zero_sizes_are_clamped() {
        let mut cg = CodeGroups::new(GroupKind::Alpha, 0, 0, make_rng(Some(1)));
        assert_eq!(cg.text_line().len(), 1);
    }

    #[test]
    fn encoded_line_has_one_word_per_group() {
        let mut cg = CodeGroups::new(GroupKind::Alnum, 5, 5, make_rng(Some(9)));
        let msg = cg.random_line().unwrap();
        assert_eq!(msg.words().len(), 5);
        assert!(cg.next_line().is_some());
        assert_eq!(cg.num_lines(), 0);
    }
}
