//! Statistics over game history files written by `sim`.
//!
//! Accepts a single `.jsonl` / `.jsonl.zst` file or a directory, searched
//! recursively. A truncated final line is skipped with a warning; any other
//! unreadable or inconsistent record makes the command fail after the report
//! is printed.

use crate::error::CliError;
use crate::history::GameRecord;
use crate::io_utils::read_text_auto;
use crate::ui;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct StatsState {
    games: u64,
    unfinished: u64,
    turns: u64,
    cards_played: u64,
    wins: BTreeMap<String, u64>,
    skipped: u64,
    corrupted: u64,
}

pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(&input);
    if !path.exists() {
        ui::write_error(err, &format!("Input not found: {}", input))?;
        return Err(CliError::InvalidInput(format!("Input not found: {}", input)));
    }

    let files = if path.is_dir() {
        collect_history_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut state = StatsState::default();
    for file in &files {
        let content = read_text_auto(file)?;
        consume(&content, file, &mut state, err)?;
    }

    writeln!(out, "Games: {}", state.games)?;
    writeln!(out, "Wins:")?;
    for (name, count) in &state.wins {
        let pct = if state.games == 0 {
            0.0
        } else {
            *count as f64 * 100.0 / state.games as f64
        };
        writeln!(out, "  {}: {} ({:.1}%)", name, count, pct)?;
    }
    if state.unfinished > 0 {
        writeln!(out, "Unfinished: {}", state.unfinished)?;
    }
    if state.games > 0 {
        writeln!(
            out,
            "Average turns: {:.1}",
            state.turns as f64 / state.games as f64
        )?;
        writeln!(
            out,
            "Average cards played: {:.1}",
            state.cards_played as f64 / state.games as f64
        )?;
    }

    if state.skipped > 0 {
        ui::display_warning(
            err,
            &format!("Skipped {} incomplete trailing record(s)", state.skipped),
        )?;
    }
    if state.corrupted > 0 {
        ui::write_error(err, &format!("{} corrupted record(s)", state.corrupted))?;
        return Err(CliError::InvalidInput(format!(
            "{} corrupted record(s)",
            state.corrupted
        )));
    }
    Ok(())
}

fn consume(
    content: &str,
    file: &Path,
    state: &mut StatsState,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let has_trailing_nl = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    for (i, line) in lines.iter().enumerate() {
        let record: GameRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(_) if i == lines.len() - 1 && !has_trailing_nl => {
                state.skipped += 1;
                continue;
            }
            Err(e) => {
                state.corrupted += 1;
                ui::write_error(
                    err,
                    &format!("{} line {}: unreadable record: {}", file.display(), i + 1, e),
                )?;
                continue;
            }
        };
        if let Err(msg) = record.validate() {
            state.corrupted += 1;
            ui::write_error(err, &format!("{}: {}", record.game_id, msg))?;
            continue;
        }

        state.games += 1;
        state.turns += u64::from(record.stats.total_turns);
        state.cards_played += u64::from(record.stats.cards_played);
        for name in &record.players {
            state.wins.entry(name.clone()).or_insert(0);
        }
        match record.winner {
            Some(name) => *state.wins.entry(name).or_insert(0) += 1,
            None => state.unfinished += 1,
        }
    }
    Ok(())
}

fn collect_history_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(d) = stack.pop() {
        for entry in std::fs::read_dir(&d)? {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            if name.ends_with(".jsonl") || name.ends_with(".jsonl.zst") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
