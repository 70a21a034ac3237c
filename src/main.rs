// src/main.rs  —  cw-copy-trainer  entry point
mod audio;
mod compare;
mod config;
mod drill;
mod morse;
mod stats;

use anyhow::{Context, Result};
use audio::{AudioError, Format, Sounder, ToneSettings};
use clap::Parser;
use compare::{Answer, AnswerBatch};
use config::{AppConfig, Cli};
use drill::Drill;
use morse::encoder::{char_to_morse, ALPHABET};
use morse::EncodedMessage;
use stats::{Summary, UserStats};
use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

// ── Trainer commands (typed instead of an answer) ────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    Stats,
    Remind,
    Again,
    Unknown,
}

impl Command {
    /// `None` when the input is an answer rather than a command
    fn parse(input: &str) -> Option<Self> {
        let cmd = input.strip_prefix('`')?;
        Some(match cmd.trim().to_ascii_lowercase().as_str() {
            "quit" | "exit" => Command::Quit,
            "stats"         => Command::Stats,
            "remind"        => Command::Remind,
            "again"         => Command::Again,
            _               => Command::Unknown,
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // ── --print-config  ───────────────────────────────────────────────────────
    if cli.print_config {
        print!("{}", config::DEFAULT_CONFIG_TOML);
        return Ok(());
    }

    // ── --write-config  ───────────────────────────────────────────────────────
    if cli.write_config {
        let path = AppConfig::write_default_config(&cli)?;
        println!("Config written to: {}", path.display());
        println!("Edit it to set speed, tone, drill mode, etc.");
        return Ok(());
    }

    // ── Load config ───────────────────────────────────────────────────────────
    let cfg = AppConfig::load(&cli)?;

    // ── --print-stats  ────────────────────────────────────────────────────────
    if cli.print_stats {
        let stats = UserStats::load(&cfg.stats_file)?;
        print!("{stats}");
        return Ok(());
    }

    // ── Audio ─────────────────────────────────────────────────────────────────
    let format = Format::stereo(cfg.sample_rate);
    let output = audio::create_audio(cfg.output, format, cfg.volume, &cfg.wav_path)?;
    let mut sounder = Sounder::new(
        ToneSettings {
            sample_rate:    cfg.sample_rate,
            frequency:      cfg.tone_hz as f64,
            wpm:            cfg.wpm,
            farnsworth_wpm: cfg.farnsworth_wpm,
        },
        output,
    )?;

    // ── --send  ───────────────────────────────────────────────────────────────
    if let Some(text) = &cli.send {
        let msg = morse::encode(text);
        println!("{}", msg.dot_dash_string());
        sounder.send(&msg)?;
        sounder.close()?;
        return Ok(());
    }

    // ── Trainer ───────────────────────────────────────────────────────────────
    let mut drill = drill::create_drill(&cfg)?;
    let mut stats = UserStats::load(&cfg.stats_file)?;

    let timing = sounder.timing();
    println!(
        "cw-copy-trainer  {} WPM{}  {} Hz  mode {}  output {} @ {} Hz",
        timing.wpm,
        timing.farnsworth.map(|f| format!(" (farnsworth {f})")).unwrap_or_default(),
        cfg.tone_hz,
        cfg.mode,
        sounder.output_name(),
        sounder.format().sample_rate,
    );
    println!("Type what you hear.  Enter on an empty line replays; `again `stats `remind `quit");

    // ── Ctrl+C: report the session so far and terminate ───────────────────────
    let batch = Arc::new(Mutex::new(AnswerBatch::default()));
    let shared = Arc::clone(&batch);
    ctrlc::set_handler(move || {
        println!("\nExiting...");
        if let Ok(b) = shared.lock() {
            println!("{}", b.averages());
        }
        std::process::exit(0);
    })
    .context("installing interrupt handler")?;

    run_trainer(&mut sounder, drill.as_mut(), cfg.sequential, &stats, &batch)?;

    // ── Cleanup ───────────────────────────────────────────────────────────────
    sounder.close()?;
    println!("Saving and exiting...");
    let batch = lock(&batch)?.clone();
    let summary = Summary::new(cfg.mode, batch.averages(), batch.len(), cfg.wpm, cfg.farnsworth_wpm);
    println!("{summary}");
    stats.add(summary);
    stats.save()?;
    println!("Stats saved to {}", stats.path().display());
    println!("73!");
    Ok(())
}

/// Line after line until `quit or end of input; scored answers go into `batch`
fn run_trainer(
    sounder:    &mut Sounder,
    drill:      &mut dyn Drill,
    sequential: bool,
    saved:      &UserStats,
    batch:      &Mutex<AnswerBatch>,
) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock().lines();
    let mut n = 0usize;

    'lines: loop {
        let msg = drill.line(sequential)?;
        n += 1;
        println!("# {n}");
        let started = play(sounder, &msg)?;
        let mut tries = 1;

        loop {
            print!("> ");
            std::io::stdout().flush().context("flushing prompt")?;
            let Some(line) = input.next() else { break 'lines };
            let line = line.context("reading answer")?;
            let answer = line.trim();

            if answer.is_empty() {
                tries += 1;
                play(sounder, &msg)?;
                continue;
            }
            match Command::parse(answer) {
                Some(Command::Quit) => break 'lines,
                Some(Command::Again) => {
                    tries += 1;
                    play(sounder, &msg)?;
                }
                Some(Command::Stats) => print_stats(saved, &*lock(batch)?),
                Some(Command::Remind) => print_alphabet(),
                Some(Command::Unknown) => println!("commands: `again `stats `remind `quit"),
                None => {
                    let original = msg.raw_string();
                    let scored = Answer::score(&original, answer, started, tries);
                    println!("sent: {original}");
                    if scored.similarity < 1.0 {
                        println!("      {}", msg.dot_dash_string());
                    }
                    println!(
                        "{:.1}% in {:.1}s, {} tr{}",
                        scored.percent(),
                        scored.took.as_secs_f64(),
                        scored.tries,
                        if scored.tries == 1 { "y" } else { "ies" },
                    );
                    lock(batch)?.push(scored);
                    continue 'lines;
                }
            }
        }
    }
    println!();
    Ok(())
}

fn lock(batch: &Mutex<AnswerBatch>) -> Result<MutexGuard<'_, AnswerBatch>> {
    batch.lock().map_err(|_| anyhow::anyhow!("answer batch lock poisoned"))
}

/// Send one line and return when it finished sounding; a message the
/// sequencer rejects is skipped, device errors abort
fn play(sounder: &mut Sounder, msg: &EncodedMessage) -> Result<Instant> {
    match sounder.send(msg) {
        Ok(()) => {}
        Err(e @ AudioError::InvalidToken(_)) => log::warn!("skipping \"{msg}\": {e}"),
        Err(e) => return Err(e).context("playing line"),
    }
    Ok(Instant::now())
}

fn print_stats(saved: &UserStats, batch: &AnswerBatch) {
    print!("{saved}");
    let avg = batch.averages();
    println!(
        "this session: {} lines, {:.2}% correct, {:.2}s avg, {:.2} tries",
        batch.len(),
        avg.percent,
        avg.took.as_secs_f64(),
        avg.tries,
    );
}

/// Letters, then digits, then punctuation, four per row
fn print_alphabet() {
    let groups: [(&str, fn(&char) -> bool); 3] = [
        ("letters",     |c: &char| c.is_ascii_alphabetic()),
        ("digits",      |c: &char| c.is_ascii_digit()),
        ("punctuation", |c: &char| !c.is_ascii_alphanumeric()),
    ];
    for (title, keep) in groups {
        println!("{title}:");
        let cells: Vec<String> = ALPHABET
            .chars()
            .filter(keep)
            .filter_map(|c| char_to_morse(c).map(|m| format!("{c} {m:<8}")))
            .collect();
        for row in cells.chunks(4) {
            println!("  {}", row.join("  "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_need_backtick() {
        assert_eq!(Command::parse("quit"), None);
        assert_eq!(Command::parse("`quit"), Some(Command::Quit));
        assert_eq!(Command::parse("`EXIT"), Some(Command::Quit));
        assert_eq!(Command::parse("`stats"), Some(Command::Stats));
        assert_eq!(Command::parse("`remind"), Some(Command::Remind));
        assert_eq!(Command::parse("`again"), Some(Command::Again));
        assert_eq!(Command::parse("`bogus"), Some(Command::Unknown));
    }

    #[test]
    fn answer_clock_starts_after_playback() {
        let settings = ToneSettings { sample_rate: 48_000, frequency: 600.0, wpm: 60, farnsworth_wpm: 0 };
        let format = Format::stereo(48_000);
        let mut s = Sounder::new(settings, Box::new(audio::NullAudio::new(format, true))).unwrap();
        let msg = morse::encode("paris");
        let sounding = s.sequence(&msg).unwrap().duration();
        let last_buffer = format.duration(format.buffer_frames());

        let before = Instant::now();
        let started = play(&mut s, &msg).unwrap();
        assert!(started.duration_since(before) + last_buffer >= sounding);

        // an answer typed right away took well under the sounding time
        let scored = Answer::score("paris", "paris", started, 1);
        assert!(scored.took < sounding);
    }
}
