// src/stats.rs  —  Per-user practice summaries, persisted as TOML
use crate::compare::Averages;
use crate::config::DrillMode;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const STATS_VERSION: &str = "0.1.0";

/// One finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub date:        DateTime<Local>,
    pub mode:        DrillMode,
    /// 0..=100
    pub avg_percent: f64,
    pub avg_secs:    f64,
    pub avg_tries:   f64,
    pub count:       usize,
    pub wpm:         u32,
    pub farnsworth:  u32,
}

impl Summary {
    pub fn new(mode: DrillMode, avg: Averages, count: usize, wpm: u32, farnsworth: u32) -> Self {
        Self {
            date:        Local::now(),
            mode,
            avg_percent: avg.percent,
            avg_secs:    avg.took.as_secs_f64(),
            avg_tries:   avg.tries,
            count,
            wpm,
            farnsworth,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {}  {:<12} {:6.2}% correct  {:6.2}s avg  {:.2} tries  {} lines  {} WPM",
            self.date.format("%Y-%m-%d %H:%M"),
            self.mode.to_string(),
            self.avg_percent,
            self.avg_secs,
            self.avg_tries,
            self.count,
            self.wpm,
        )?;
        if self.farnsworth > 0 {
            write!(f, " (farnsworth {})", self.farnsworth)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub username:  String,
    pub version:   String,
    pub created:   DateTime<Local>,
    pub updated:   DateTime<Local>,
    #[serde(default)]
    pub summaries: Vec<Summary>,
    #[serde(skip)]
    path:          PathBuf,
}

impl UserStats {
    pub fn new(path: &Path) -> Self {
        let now = Local::now();
        Self {
            username:  current_user(),
            version:   STATS_VERSION.to_string(),
            created:   now,
            updated:   now,
            summaries: Vec::new(),
            path:      path.to_path_buf(),
        }
    }

    /// Read saved stats; a missing file gives a fresh record
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("[stats] no saved stats at {}; starting fresh", path.display());
            return Ok(Self::new(path));
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading stats {:?}", path))?;
        let mut stats: Self = toml::from_str(&raw)
            .with_context(|| format!("Parsing stats {:?}", path))?;
        stats.path = path.to_path_buf();
        Ok(stats)
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn add(&mut self, s: Summary) {
        self.summaries.push(s);
        self.updated = Local::now();
    }

    /// Write via a temp file in the same directory, then rename over the target
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating stats directory {:?}", parent))?;
        }
        let raw = toml::to_string_pretty(self).context("Serializing stats")?;
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, raw)
            .with_context(|| format!("Writing {:?}", tmp))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Replacing {:?}", self.path))?;
        log::info!("[stats] saved {} summaries to {}", self.summaries.len(), self.path.display());
        Ok(())
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats for {} (since {})", self.username, self.created.format("%Y-%m-%d"))?;
        if self.summaries.is_empty() {
            return writeln!(f, "  no sessions saved yet");
        }
        for s in &self.summaries {
            writeln!(f, "{s}")?;
        }
        Ok(())
    }
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cw-copy-trainer-stats-{}-{name}", std::process::id()))
            .join("stats.toml")
    }

    fn avg() -> Averages {
        Averages { percent: 87.5, took: Duration::from_millis(2500), tries: 1.25 }
    }

    #[test]
    fn missing_file_gives_fresh_stats() {
        let s = UserStats::load(&temp_path("missing")).unwrap();
        assert!(s.summaries.is_empty());
        assert_eq!(s.version, STATS_VERSION);
    }

    #[test]
    fn save_then_load_keeps_summaries() {
        let path = temp_path("roundtrip");
        let mut s = UserStats::new(&path);
        s.add(Summary::new(DrillMode::Qcodes, avg(), 8, 20, 12));
        s.add(Summary::new(DrillMode::TopWords, Averages::default(), 0, 15, 0));
        s.save().unwrap();
        assert!(!path.with_extension("toml.tmp").exists());

        let back = UserStats::load(&path).unwrap();
        assert_eq!(back.summaries.len(), 2);
        assert_eq!(back.summaries[0].mode, DrillMode::Qcodes);
        assert_eq!(back.summaries[0].count, 8);
        assert!((back.summaries[0].avg_secs - 2.5).abs() < 1e-9);
        assert_eq!(back.username, s.username);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "this is [not valid").unwrap();
        assert!(UserStats::load(&path).is_err());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn summary_display_mentions_farnsworth_only_when_set() {
        let with = Summary::new(DrillMode::Chars, avg(), 3, 20, 10).to_string();
        let without = Summary::new(DrillMode::Chars, avg(), 3, 20, 0).to_string();
        assert!(with.contains("87.50%"));
        assert!(with.contains("farnsworth 10"));
        assert!(!without.contains("farnsworth"));
    }
}
