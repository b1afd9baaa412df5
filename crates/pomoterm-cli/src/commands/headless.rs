//! Line-oriented front end.
//!
//! Reads one command per line from stdin, feeds the same runtime loop the
//! TUI uses and prints every event as a JSON line on stdout. `status` asks
//! for a redraw, which here means printing a state snapshot.

use std::io::{BufRead, Write};

use chrono::Utc;
use clap::Args;
use pomoterm_core::runtime::{self, spawn_ticker};
use pomoterm_core::{Command, Config, Message, Session, Update};
use tokio::sync::mpsc;

use super::{build_session, SessionArgs};

#[derive(Args, Debug, Clone, Default)]
pub struct HeadlessArgs {
    /// Disable the wall clock; advance time with `tick [n]` lines instead
    #[arg(long)]
    pub manual_ticks: bool,
}

/// Translate one input line into queue messages.
pub fn parse_line(line: &str, manual_ticks: bool) -> Result<Vec<Message>, String> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(Vec::new());
    };
    let command = match word {
        "start" | "pause" | "resume" | "s" => Command::StartPause,
        "reset" | "r" => Command::Reset,
        "hard-reset" | "R" => Command::HardReset,
        "next" | "advance" | "b" => Command::Advance,
        "hint" | "h" => Command::ToggleHint,
        "quit" | "q" => Command::Quit,
        "status" => return Ok(vec![Message::Redraw]),
        "tick" if manual_ticks => {
            let count = match words.next() {
                Some(n) => n
                    .parse::<u32>()
                    .map_err(|_| format!("invalid tick count: {n}"))?,
                None => 1,
            };
            return Ok((0..count).map(|_| Message::Tick(Utc::now())).collect());
        }
        "tick" => return Err("tick requires --manual-ticks".into()),
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(vec![Message::Command(command)])
}

/// Blocking stdin reader; runs on its own thread so a pending read never
/// holds up shutdown.
fn read_commands(tx: mpsc::UnboundedSender<Message>, manual_ticks: bool) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stdin");
                break;
            }
        };
        match parse_line(&line, manual_ticks) {
            Ok(messages) => {
                for message in messages {
                    if tx.send(message).is_err() {
                        return;
                    }
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }
    // End of input ends the session.
    let _ = tx.send(Message::Command(Command::Quit));
}

pub async fn run(
    session_args: &SessionArgs,
    args: HeadlessArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let session = build_session(&config, session_args)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let ticker = (!args.manual_ticks).then(|| spawn_ticker(tx.clone()));
    let manual_ticks = args.manual_ticks;
    std::thread::spawn(move || read_commands(tx, manual_ticks));

    let mut out = std::io::stdout();
    let print = |session: &Session, update: &Update| -> Result<(), Box<dyn std::error::Error>> {
        for event in &update.events {
            writeln!(out, "{}", serde_json::to_string(event)?)?;
        }
        let redraw_only = update.redraw && update.events.is_empty() && update.progress.is_none();
        if redraw_only {
            writeln!(out, "{}", serde_json::to_string(&session.engine().snapshot_event())?)?;
        }
        out.flush()?;
        Ok(())
    };
    let result = runtime::run(session, rx, print).await;

    if let Some(ticker) = ticker {
        ticker.abort();
    }
    result.map(|_| ())
}
