// src/drill/textblock.rs  —  Practice lines from a text file
use super::{Drill, LineList};
use crate::morse::EncodedMessage;
use anyhow::{bail, Context, Result};
use rand::rngs::SmallRng;
use std::path::Path;

/// One practice line per non-blank line of the file
pub struct TextBlock(LineList);

impl TextBlock {
    pub fn load(path: &Path, rng: SmallRng) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading practice text {}", path.display()))?;
        let tb = Self::from_text(&text, rng)
            .with_context(|| format!("loading {}", path.display()))?;
        log::info!("[drill] {} lines from {}", tb.num_lines(), path.display());
        Ok(tb)
    }

    pub fn from_text(text: &str, rng: SmallRng) -> Result<Self> {
        let lines = LineList::new(text.lines(), rng);
        if lines.num_lines() == 0 {
            bail!("no text to practice");
        }
        Ok(Self(lines))
    }
}

impl Drill for TextBlock {
    fn random_line(&mut self) -> Result<EncodedMessage> { self.0.random_line() }
    fn next_line(&mut self) -> Option<EncodedMessage> { self.0.next_line() }
    fn reset(&mut self) { self.0.reset() }
    fn num_lines(&self) -> usize { self.0.num_lines() }
}
