// src/config.rs  —  Runtime configuration (CLI + TOML)
use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The example config is embedded directly in the binary at compile time.
/// Users can write it out with:  cw-copy-trainer --write-config
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config.toml.example");

pub const APP_DIR: &str = "cw-copy-trainer";

pub const DEFAULT_WPM:         u32 = 10;
pub const DEFAULT_TONE_HZ:     u32 = 700;
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

// ── CLI ───────────────────────────────────────────────────────────────────────
#[derive(Parser, Debug, Default)]
#[command(
    name  = "cw-copy-trainer",
    about = "Morse code copy trainer: listen, type what you heard, track progress",
    version,
)]
pub struct Cli {
    /// Config file path (default: ~/.config/cw-copy-trainer/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Words per minute (default: 10)
    #[arg(short, long)]
    pub wpm: Option<u32>,

    /// Farnsworth spacing WPM.  Characters are sent at --wpm, word gaps as if
    /// sent at this speed (e.g. -w 20 -o 10).  Ignored unless slower than --wpm.
    #[arg(short = 'o', long)]
    pub farnsworth: Option<u32>,

    /// Tone frequency in Hz (default: 700)
    #[arg(short, long)]
    pub frequency: Option<u32>,

    /// Output volume 0.0 – 1.0
    #[arg(long)]
    pub volume: Option<f32>,

    /// Audio output: auto | cpal | null | wav
    #[arg(long)]
    pub output: Option<OutputKind>,

    /// WAV file written by --output wav
    #[arg(long)]
    pub wav_path: Option<PathBuf>,

    /// Practice material: text | code-groups | code-alnum | code-numbers | top-words | qcodes | chars
    /// (the unhyphenated forms such as topwords are accepted too)
    #[arg(short, long)]
    pub mode: Option<DrillMode>,

    /// Text file for --mode text
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// Send lines in order instead of at random (not used by code groups)
    #[arg(short = 'r', long, action)]
    pub sequential: bool,

    /// How many of the top words to draw from (0 = all)
    #[arg(short = 'n', long)]
    pub top_word_num: Option<usize>,

    /// Include Q codes followed by a question mark (QRS?)
    #[arg(short, long, action)]
    pub qcode_questions: bool,

    /// Seed for the random material (default: time based)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stats file (default: ~/.config/cw-copy-trainer/stats.toml)
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Print saved statistics and exit
    #[arg(short = 'P', long, action)]
    pub print_stats: bool,

    /// Play this text once and exit
    #[arg(long)]
    pub send: Option<String>,

    /// Write the built-in default config.toml to the config path and exit.
    /// Use --config <PATH> to write to a custom location.
    #[arg(long, action)]
    pub write_config: bool,

    /// Print the built-in default config.toml to stdout and exit
    #[arg(long, action)]
    pub print_config: bool,
}

// ── Enums shared across CLI + TOML ────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Sound card if available, otherwise silent
    Auto,
    /// Sound card (fails if none can be opened)
    Cpal,
    /// No sound, real-time pacing only
    Null,
    /// Render into a WAV file
    Wav,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DrillMode {
    Text,
    #[value(alias = "codegroups")]
    #[serde(alias = "codegroups")]
    CodeGroups,
    #[value(alias = "codealnum")]
    #[serde(alias = "codealnum")]
    CodeAlnum,
    #[value(alias = "codenumbers")]
    #[serde(alias = "codenumbers")]
    CodeNumbers,
    #[value(alias = "topwords")]
    #[serde(alias = "topwords")]
    TopWords,
    Qcodes,
    Chars,
}

impl std::fmt::Display for DrillMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DrillMode::Text        => "text",
            DrillMode::CodeGroups  => "code-groups",
            DrillMode::CodeAlnum   => "code-alnum",
            DrillMode::CodeNumbers => "code-numbers",
            DrillMode::TopWords    => "top-words",
            DrillMode::Qcodes      => "qcodes",
            DrillMode::Chars       => "chars",
        };
        f.write_str(s)
    }
}

// ── TOML file structure ───────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub morse: Option<MorseCfg>,
    pub audio: Option<AudioCfg>,
    pub drill: Option<DrillCfg>,
    pub stats: Option<StatsCfg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorseCfg {
    pub wpm:            Option<u32>,
    /// Farnsworth spacing WPM (0 = off)
    pub farnsworth_wpm: Option<u32>,
    pub tone_hz:        Option<u32>,
    pub volume:         Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioCfg {
    pub sample_rate: Option<u32>,
    pub output:      Option<OutputKind>,
    pub wav_path:    Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillCfg {
    pub mode:            Option<DrillMode>,
    pub text_file:       Option<PathBuf>,
    pub sequential:      Option<bool>,
    pub top_word_num:    Option<usize>,
    pub qcode_questions: Option<bool>,
    pub group_len:       Option<usize>,
    pub groups_per_line: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsCfg {
    pub save_file: Option<PathBuf>,
}

// ── Resolved / merged config ──────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub wpm:             u32,
    /// 0 when Farnsworth spacing is off
    pub farnsworth_wpm:  u32,
    pub tone_hz:         u32,
    pub volume:          f32,
    pub sample_rate:     u32,
    pub output:          OutputKind,
    pub wav_path:        PathBuf,
    pub mode:            DrillMode,
    pub text_file:       Option<PathBuf>,
    pub sequential:      bool,
    pub top_word_num:    usize,
    pub qcode_questions: bool,
    pub group_len:       usize,
    pub groups_per_line: usize,
    pub seed:            Option<u64>,
    pub stats_file:      PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wpm:             DEFAULT_WPM,
            farnsworth_wpm:  0,
            tone_hz:         DEFAULT_TONE_HZ,
            volume:          0.7,
            sample_rate:     DEFAULT_SAMPLE_RATE,
            output:          OutputKind::Auto,
            wav_path:        PathBuf::from("morse.wav"),
            mode:            DrillMode::TopWords,
            text_file:       None,
            sequential:      false,
            top_word_num:    0,
            qcode_questions: false,
            group_len:       5,
            groups_per_line: 5,
            seed:            None,
            stats_file:      default_stats_path(),
        }
    }
}

// ── Config loader ─────────────────────────────────────────────────────────────
impl AppConfig {
    /// Write the embedded default config to disk.
    /// Returns the path it was written to.
    pub fn write_default_config(cli: &Cli) -> Result<PathBuf> {
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating config directory {:?}", parent))?;
        }
        std::fs::write(&path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Writing config to {:?}", path))?;
        Ok(path)
    }

    pub fn load(cli: &Cli) -> Result<Self> {
        let mut cfg = Self::default();

        // 1. Load TOML file
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Reading config {:?}", path))?;
            let fc: FileConfig = toml::from_str(&raw)
                .with_context(|| format!("Parsing config {:?}", path))?;
            cfg.apply_file(&fc);
        } else {
            log::info!("No config file at {}; using defaults", path.display());
        }

        // 2. Apply CLI overrides
        cfg.apply_cli(cli);
        cfg.normalize();
        Ok(cfg)
    }

    fn apply_file(&mut self, fc: &FileConfig) {
        if let Some(m) = &fc.morse {
            if let Some(v) = m.wpm            { self.wpm            = v; }
            if let Some(v) = m.farnsworth_wpm { self.farnsworth_wpm = v; }
            if let Some(v) = m.tone_hz        { self.tone_hz        = v; }
            if let Some(v) = m.volume         { self.volume         = v; }
        }
        if let Some(a) = &fc.audio {
            if let Some(v) = a.sample_rate { self.sample_rate = v; }
            if let Some(v) = a.output      { self.output      = v; }
            if let Some(v) = &a.wav_path   { self.wav_path    = v.clone(); }
        }
        if let Some(d) = &fc.drill {
            if let Some(v) = d.mode            { self.mode            = v; }
            if let Some(v) = &d.text_file      { self.text_file       = Some(v.clone()); }
            if let Some(v) = d.sequential      { self.sequential      = v; }
            if let Some(v) = d.top_word_num    { self.top_word_num    = v; }
            if let Some(v) = d.qcode_questions { self.qcode_questions = v; }
            if let Some(v) = d.group_len       { self.group_len       = v; }
            if let Some(v) = d.groups_per_line { self.groups_per_line = v; }
        }
        if let Some(s) = &fc.stats {
            if let Some(v) = &s.save_file { self.stats_file = v.clone(); }
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(v) = cli.wpm          { self.wpm            = v; }
        if let Some(v) = cli.farnsworth   { self.farnsworth_wpm = v; }
        if let Some(v) = cli.frequency    { self.tone_hz        = v; }
        if let Some(v) = cli.volume       { self.volume         = v; }
        if let Some(v) = cli.output       { self.output         = v; }
        if let Some(v) = &cli.wav_path    { self.wav_path       = v.clone(); }
        if let Some(v) = cli.mode         { self.mode           = v; }
        if let Some(v) = &cli.text        { self.text_file      = Some(v.clone()); }
        if cli.sequential                 { self.sequential     = true; }
        if let Some(v) = cli.top_word_num { self.top_word_num   = v; }
        if cli.qcode_questions            { self.qcode_questions = true; }
        if let Some(v) = cli.seed         { self.seed           = Some(v); }
        if let Some(v) = &cli.save        { self.stats_file     = v.clone(); }
    }

    /// Zero means "unset" for speed and tone; Farnsworth only when slower.
    fn normalize(&mut self) {
        if self.wpm == 0     { self.wpm     = DEFAULT_WPM; }
        if self.tone_hz == 0 { self.tone_hz = DEFAULT_TONE_HZ; }
        if self.sample_rate == 0 { self.sample_rate = DEFAULT_SAMPLE_RATE; }
        if self.farnsworth_wpm >= self.wpm && self.farnsworth_wpm != 0 {
            log::warn!(
                "Farnsworth {} WPM is not slower than {} WPM; ignoring",
                self.farnsworth_wpm, self.wpm
            );
            self.farnsworth_wpm = 0;
        }
        self.volume = self.volume.clamp(0.0, 1.0);
        self.group_len = self.group_len.max(1);
        self.groups_per_line = self.groups_per_line.max(1);
    }
}

fn default_config_path() -> PathBuf {
    dirs_next().join(APP_DIR).join("config.toml")
}

fn default_stats_path() -> PathBuf {
    dirs_next().join(APP_DIR).join("stats.toml")
}

fn dirs_next() -> PathBuf {
    if let Ok(v) = std::env::var("XDG_CONFIG_HOME") { return PathBuf::from(v); }
    if let Ok(v) = std::env::var("APPDATA")          { return PathBuf::from(v); }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_default();
    PathBuf::from(home).join(".config")
}
