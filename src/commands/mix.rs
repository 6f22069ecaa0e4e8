//! Interactive mixing session.
//!
//! Reads one command per line and edits a ledger in place. Whenever the
//! ledger reports a change the totals are printed again.

use abvcalc_core::{AbvLookup, EntryField, Ledger, LedgerEvent, VolumeUnit};
use clap::Args;
use std::io::{self, BufRead, Write};
use tokio::sync::broadcast::{self, error::TryRecvError};

use super::calc::render;
use super::{row_error, row_index};
use crate::config::Config;

const HELP: &str = "\
Commands:
  add                  add an ingredient with the default pour
  name <row> <text>    set the name (fills ABV for known ingredients)
  volume <row> <n>     set the volume in the current unit
  abv <row> <n>        set the ABV in percent
  rm <row>             remove an ingredient
  unit ml|oz           switch units, converting every volume
  toggle               switch to the other unit
  show                 list ingredients and totals
  help                 show this help
  quit                 leave
";

#[derive(Args)]
pub struct MixCommand {
    /// Unit to start in (defaults to the configured unit)
    #[arg(long, short)]
    pub unit: Option<VolumeUnit>,
}

impl MixCommand {
    pub fn run(
        &self,
        known: &impl AbvLookup,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let unit = self.unit.unwrap_or(config.unit.value);
        let mut session = MixSession::new(unit, known);
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        session.run(stdin.lock(), &mut stdout)?;
        Ok(())
    }
}

/// Outcome of one input line.
#[derive(Debug, PartialEq)]
enum Step {
    Continue,
    Quit,
}

pub struct MixSession<'a, L: AbvLookup> {
    ledger: Ledger,
    known: &'a L,
    events: broadcast::Receiver<LedgerEvent>,
}

impl<'a, L: AbvLookup> MixSession<'a, L> {
    /// Starts a session holding one blank ingredient.
    pub fn new(unit: VolumeUnit, known: &'a L) -> Self {
        let mut ledger = Ledger::new(unit);
        ledger.add_entry();
        let events = ledger.subscribe();
        Self {
            ledger,
            known,
            events,
        }
    }

    /// Processes lines from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Mixing in {}. Type 'help' for commands.\n",
            self.ledger.unit()
        )?;
        write!(out, "{}", render(&self.ledger))?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line?;

            match self.execute(&line, out) {
                Ok(Step::Quit) => break,
                Ok(Step::Continue) => {}
                Err(e) => writeln!(out, "Error: {}", e)?,
            }

            if self.drain_events() {
                writeln!(
                    out,
                    "{}",
                    self.ledger.aggregate().display_in(self.ledger.unit())
                )?;
            }
        }
        Ok(())
    }

    fn execute<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> Result<Step, Box<dyn std::error::Error>> {
        let line = line.trim();
        let (command, rest) = split_word(line);

        match command.to_lowercase().as_str() {
            "" => {}
            "add" => {
                let index = self.ledger.add_entry();
                writeln!(out, "Added row {}", index + 1)?;
            }
            "name" | "volume" | "vol" | "abv" => {
                let field: EntryField = command.parse()?;
                let (row, value) = split_word(rest);
                let index = parse_row(row)?;
                self.ledger
                    .update_field(index, field, value, self.known)
                    .map_err(row_error)?;
                if let Some(entry) = self.ledger.entries().get(index) {
                    writeln!(out, "{}. {}", index + 1, entry)?;
                }
            }
            "rm" | "remove" => {
                let index = parse_row(rest)?;
                let removed = self.ledger.remove_entry(index).map_err(row_error)?;
                writeln!(out, "Removed {}", removed)?;
            }
            "unit" => {
                let unit: VolumeUnit = rest.parse()?;
                self.ledger.set_unit(unit);
            }
            "toggle" => self.ledger.toggle_unit(),
            "show" | "ls" => write!(out, "{}", render(&self.ledger))?,
            "help" | "?" => write!(out, "{}", HELP)?,
            "quit" | "exit" | "q" => return Ok(Step::Quit),
            other => {
                return Err(format!("Unknown command: {} (type 'help')", other).into());
            }
        }
        Ok(Step::Continue)
    }

    // True when the ledger changed since the last call.
    fn drain_events(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    tracing::debug!("Ledger event: {:?}", event);
                    changed = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!("Skipped {} ledger event(s)", skipped);
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        changed
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn parse_row(raw: &str) -> Result<usize, Box<dyn std::error::Error>> {
    let row: usize = raw
        .trim()
        .parse()
        .map_err(|_| format!("Expected a row number, got '{}'", raw.trim()))?;
    Ok(row_index(row)?)
}
