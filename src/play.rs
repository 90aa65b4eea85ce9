//! Line-based terminal client.
//!
//! Each input line is a guess. `?text` lists matching names and `quit`
//! leaves; neither costs an attempt.

use std::io::Write;

use anyhow::Result;
use gridle_rules::{
    ATTRIBUTE_COUNT, DailySession, GuessResult, HintVector, MAX_ATTEMPTS, Statistics,
    SubmitOutcome, suggest,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument, warn};

use crate::client::{GameClient, GuessReply};
use crate::clock::Clock;
use crate::db::RecordStore;
use crate::player_service::PlayerService;

/// Shown when the server will not reveal the answer.
pub const UNAVAILABLE_ANSWER: &str = "Unavailable";

const SUGGESTION_LIMIT: usize = 8;

const NAME_WIDTH: usize = 24;
const CELL_WIDTH: usize = 2;
const COLUMN_LABELS: [&str; ATTRIBUTE_COUNT] = ["Nm", "Fl", "Tm", "No", "Ag", "Yr", "Wn"];

/// One parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Blank line.
    Empty,
    /// Leave the client.
    Quit,
    /// List names containing the text.
    Suggest(String),
    /// Submit a name.
    Guess(String),
}

impl Input {
    /// Parses a raw input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            Input::Empty
        } else if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            Input::Quit
        } else if let Some(query) = line.strip_prefix('?') {
            Input::Suggest(query.trim().to_string())
        } else {
            Input::Guess(line.to_string())
        }
    }
}

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop reading.
    Done,
}

/// Interactive game against a server, with local persisted state.
#[derive(Debug)]
pub struct PlayLoop<S, C> {
    client: GameClient,
    service: PlayerService<S, C>,
    names: Vec<String>,
}

impl<S: RecordStore, C: Clock> PlayLoop<S, C> {
    /// Creates the loop and fetches the autocomplete list.
    ///
    /// A failed name fetch only disables suggestions.
    #[instrument(skip_all, fields(base_url = %client.base_url()))]
    pub async fn start(client: GameClient, service: PlayerService<S, C>) -> Self {
        let names = match client.driver_names().await {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "Suggestions disabled");
                Vec::new()
            }
        };
        info!(names = names.len(), "Play loop ready");
        Self {
            client,
            service,
            names,
        }
    }

    /// Names available for suggestions.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Prints today's board so far.
    ///
    /// Returns [`Flow::Done`] if today's session is already resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if local state cannot be read or the output fails.
    #[instrument(skip_all)]
    pub async fn greet(&self, out: &mut impl Write) -> Result<Flow> {
        let session = self.service.session()?;
        writeln!(out, "Guess today's driver in {} attempts.", MAX_ATTEMPTS)?;
        writeln!(out, "Type a name, ?text for suggestions, quit to leave.")?;

        if !session.attempts().is_empty() {
            print_board(&session, out)?;
        }

        if session.is_resolved() {
            writeln!(out, "Today's puzzle is already over. Come back tomorrow.")?;
            if !session.won() {
                let answer = self.answer().await;
                writeln!(out, "The driver was {}.", answer)?;
            }
            print_statistics(&self.service.statistics()?, out)?;
            return Ok(Flow::Done);
        }

        writeln!(out, "{} guesses left.", session.remaining())?;
        Ok(Flow::Continue)
    }

    /// Handles one line of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the server or local state fails.
    #[instrument(skip(self, out))]
    pub async fn handle(&self, input: Input, out: &mut impl Write) -> Result<Flow> {
        match input {
            Input::Empty => Ok(Flow::Continue),
            Input::Quit => Ok(Flow::Done),
            Input::Suggest(query) => {
                let matches = suggest(&self.names, &query);
                if matches.is_empty() {
                    writeln!(out, "No matching drivers.")?;
                } else {
                    for name in matches.into_iter().take(SUGGESTION_LIMIT) {
                        writeln!(out, "  {}", name)?;
                    }
                }
                Ok(Flow::Continue)
            }
            Input::Guess(name) => self.guess(&name, out).await,
        }
    }

    async fn guess(&self, name: &str, out: &mut impl Write) -> Result<Flow> {
        if self.service.session()?.is_resolved() {
            writeln!(out, "Today's puzzle is already over. Come back tomorrow.")?;
            return Ok(Flow::Done);
        }

        let result = match self.client.submit_guess(name).await? {
            GuessReply::NotFound => {
                writeln!(out, "Driver not found: {}", name)?;
                return Ok(Flow::Continue);
            }
            GuessReply::Judged(result) => result,
        };

        let recorded = self.service.record_guess(&result)?;
        debug!(outcome = ?recorded.outcome(), "Guess recorded");

        match *recorded.outcome() {
            SubmitOutcome::Ignored(_) => {
                writeln!(out, "Today's puzzle is already over. Come back tomorrow.")?;
                Ok(Flow::Done)
            }
            SubmitOutcome::Continue { remaining } => {
                writeln!(out, "{}", hint_row(&result))?;
                writeln!(out, "{} guesses left.", remaining)?;
                Ok(Flow::Continue)
            }
            SubmitOutcome::Won { attempts } => {
                writeln!(out, "{}", hint_row(&result))?;
                writeln!(out, "Correct! Found in {}/{}.", attempts, MAX_ATTEMPTS)?;
                if let Some(stats) = recorded.statistics() {
                    print_statistics(stats, out)?;
                }
                Ok(Flow::Done)
            }
            SubmitOutcome::Lost => {
                writeln!(out, "{}", hint_row(&result))?;
                let answer = self.answer().await;
                writeln!(out, "Out of guesses. The driver was {}.", answer)?;
                if let Some(stats) = recorded.statistics() {
                    print_statistics(stats, out)?;
                }
                Ok(Flow::Done)
            }
        }
    }

    async fn answer(&self) -> String {
        match self.client.reveal_answer().await {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "Could not reveal answer");
                UNAVAILABLE_ANSWER.to_string()
            }
        }
    }
}

/// Runs the loop on stdin and stdout until the game ends or input closes.
///
/// # Errors
///
/// Returns an error if reading input, the server or local state fails.
#[instrument(skip_all)]
pub async fn run<S: RecordStore, C: Clock>(play: PlayLoop<S, C>) -> Result<()> {
    let mut out = std::io::stdout();
    if play.greet(&mut out).await? == Flow::Done {
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match play.handle(Input::parse(&line), &mut out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Done) => break,
            Err(e) => {
                warn!(error = %e, "Guess failed");
                writeln!(out, "Error: {}", e)?;
            }
        }
    }

    Ok(())
}

/// Pads each cell to the label width so symbols sit under their labels.
fn cells<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(|item| format!("{:<width$}", item, width = CELL_WIDTH))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

fn board_row(name: &str, hints: &HintVector) -> String {
    let symbols = hints.iter().map(|(_, hint)| hint.symbol());
    format!("{:<width$} {}", name, cells(symbols), width = NAME_WIDTH)
}

/// Column labels aligned with [`hint_row`].
pub fn board_header() -> String {
    format!("{:<width$} {}", "", cells(COLUMN_LABELS), width = NAME_WIDTH)
}

/// Formats a judged guess as `name  symbols`.
pub fn hint_row(result: &GuessResult) -> String {
    board_row(result.guess.name(), &result.hints)
}

fn print_board(session: &DailySession, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", board_header())?;
    for attempt in session.attempts() {
        writeln!(out, "{}", board_row(attempt.guess().name(), attempt.hints()))?;
    }
    Ok(())
}

/// Prints lifetime statistics.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_statistics(stats: &Statistics, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Played:     {}", stats.played())?;
    writeln!(out, "Won:        {}", stats.won())?;
    writeln!(out, "Lost:       {}", stats.lost())?;
    writeln!(out, "Win rate:   {:.0}%", stats.win_rate())?;
    writeln!(out, "Streak:     {}", stats.streak())?;
    writeln!(out, "Max streak: {}", stats.max_streak())?;
    Ok(())
}
