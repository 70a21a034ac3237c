// src/drill/mod.rs  —  Drill trait + practice material registry
pub mod codegroups;
pub mod textblock;
pub mod wordlists;

use crate::config::{AppConfig, DrillMode};
use crate::morse::{encode, EncodedMessage};
use anyhow::{bail, Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub use codegroups::{CodeGroups, GroupKind};
pub use textblock::TextBlock;

/// Source of practice lines
pub trait Drill: Send {
    /// A line picked at random
    fn random_line(&mut self) -> Result<EncodedMessage>;
    /// The next line in order; `None` past the end
    fn next_line(&mut self) -> Option<EncodedMessage>;
    /// Back to the first line
    fn reset(&mut self);
    /// Number of fixed lines (0 for generated material)
    fn num_lines(&self) -> usize;

    /// Next line in `sequential` order (wrapping at the end) or at random
    fn line(&mut self, sequential: bool) -> Result<EncodedMessage> {
        if !sequential {
            return self.random_line();
        }
        if let Some(l) = self.next_line() {
            return Ok(l);
        }
        self.reset();
        self.next_line().context("no practice lines available")
    }
}

/// Fixed list of encoded lines, shared by word lists and text files
pub struct LineList {
    lines: Vec<EncodedMessage>,
    pos:   usize,
    rng:   SmallRng,
}

impl LineList {
    pub fn new<'a>(lines: impl IntoIterator<Item = &'a str>, rng: SmallRng) -> Self {
        let lines = lines
            .into_iter()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(encode)
            .filter(|m| !m.is_empty())
            .collect();
        Self { lines, pos: 0, rng }
    }
}

impl Drill for LineList {
    fn random_line(&mut self) -> Result<EncodedMessage> {
        if self.lines.is_empty() {
            bail!("no practice lines loaded");
        }
        let n = self.rng.gen_range(0..self.lines.len());
        self.pos = n;
        Ok(self.lines[n].clone())
    }

    fn next_line(&mut self) -> Option<EncodedMessage> {
        let line = self.lines.get(self.pos).cloned()?;
        self.pos += 1;
        Some(line)
    }

    fn reset(&mut self) { self.pos = 0; }
    fn num_lines(&self) -> usize { self.lines.len() }
}

pub fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None    => SmallRng::from_entropy(),
    }
}

/// Factory: practice material for the configured mode
pub fn create_drill(cfg: &AppConfig) -> Result<Box<dyn Drill>> {
    let rng = make_rng(cfg.seed);
    let drill: Box<dyn Drill> = match cfg.mode {
        DrillMode::CodeGroups  => Box::new(CodeGroups::new(GroupKind::Alpha,  cfg.group_len, cfg.groups_per_line, rng)),
        DrillMode::CodeAlnum   => Box::new(CodeGroups::new(GroupKind::Alnum,  cfg.group_len, cfg.groups_per_line, rng)),
        DrillMode::CodeNumbers => Box::new(CodeGroups::new(GroupKind::Digits, cfg.group_len, cfg.groups_per_line, rng)),
        DrillMode::TopWords    => Box::new(wordlists::top_words(cfg.top_word_num, rng)),
        DrillMode::Qcodes      => Box::new(wordlists::qcodes(cfg.qcode_questions, rng)),
        DrillMode::Chars       => Box::new(wordlists::chars(rng)),
        DrillMode::Text => {
            let path = cfg.text_file.as_ref()
                .context("--mode text needs a text file (--text <PATH>)")?;
            Box::new(TextBlock::load(path, rng)?)
        }
    };
    log::info!("[drill] mode {} with {} fixed lines", cfg.mode, drill.num_lines());
    Ok(drill)
}
