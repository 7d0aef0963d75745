//! Terminal front end: the interactive command loop and the one-shot
//! `species` / `calculate` commands.

use std::{io::Write, sync::Arc};

use anyhow::Context;
use clap::Args;
use feed_core::{FeedService, presentation::species_label};
use serde_json::json;
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, info, warn};

use crate::{
    dispatch::Dispatcher,
    logging,
    models::{FieldName, InputError},
    sessions::{CalculationState, CatalogState, OrderState},
    state::{AppState, SessionEvent},
    views::{Banner, OrderView, ResultView, build_status_bar, render_screen, status_bar::hints},
};

// ─── commands ────────────────────────────────────────────────────────────────

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(FieldName, String),
    Clear(FieldName),
    Show,
    Submit,
    Order,
    Species,
    Log(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("unknown field '{0}'; expected one of: {fields}", fields = field_keys())]
    UnknownField(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

fn field_keys() -> String {
    FieldName::all()
        .iter()
        .map(FieldName::key)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Command {
    /// Parses a prompt line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Result<Self, CommandError>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        let command = match word.to_ascii_lowercase().as_str() {
            "set" => Self::parse_set(rest),
            "clear" => Self::parse_field(rest, "clear <field>").map(Self::Clear),
            "show" => Ok(Self::Show),
            "submit" | "calculate" => Ok(Self::Submit),
            "order" => Ok(Self::Order),
            "species" => Ok(Self::Species),
            "log" if !rest.is_empty() => Ok(Self::Log(rest.to_string())),
            "log" => Err(CommandError::Usage("log <level>")),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        };
        Some(command)
    }

    fn parse_set(rest: &str) -> Result<Self, CommandError> {
        let (name, value) = rest
            .split_once(char::is_whitespace)
            .unwrap_or((rest, ""));
        let field = Self::parse_field(name, "set <field> <value>")?;
        Ok(Self::Set(field, value.trim().to_string()))
    }

    fn parse_field(
        name: &str,
        usage: &'static str,
    ) -> Result<FieldName, CommandError> {
        if name.is_empty() {
            return Err(CommandError::Usage(usage));
        }
        FieldName::parse(name).ok_or_else(|| CommandError::UnknownField(name.to_string()))
    }
}

// ─── interactive loop ────────────────────────────────────────────────────────

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Render,
    Message(String),
    Quit,
}

/// Owns the application state for the interactive session.
pub struct Repl {
    state: AppState,
    dispatcher: Dispatcher,
}

impl Repl {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            state: AppState::new(),
            dispatcher,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Starts the species load. Called once when the loop opens and again on
    /// the `species` command.
    pub fn load_species(&mut self) {
        self.dispatcher.load_species(&mut self.state);
    }

    pub fn handle(
        &mut self,
        command: Command,
    ) -> Reply {
        match command {
            Command::Set(field, value) => {
                self.state.set_field(field, value);
                Reply::Render
            }
            Command::Clear(field) => {
                self.state.set_field(field, "");
                Reply::Render
            }
            Command::Show => Reply::Render,
            Command::Submit => match self.dispatcher.submit(&mut self.state) {
                Ok((ticket, _)) => {
                    debug!(ticket = ticket.value(), "calculation submitted");
                    Reply::Render
                }
                Err(err @ InputError::MissingRequired(_)) => {
                    Reply::Message(Banner::error(format!("Cannot calculate: {err}")).to_string())
                }
                Err(err) => Reply::Message(Banner::error(err.to_string()).to_string()),
            },
            Command::Order => match self.dispatcher.place_order(&mut self.state) {
                Ok((ticket, _)) => {
                    debug!(ticket = ticket.value(), "order submitted");
                    Reply::Render
                }
                Err(err) => Reply::Message(Banner::error(format!("Cannot order: {err}")).to_string()),
            },
            Command::Species => {
                self.load_species();
                Reply::Render
            }
            Command::Log(level) => match logging::set_log_level(&level) {
                Ok(()) => Reply::Message(Banner::success(format!("log level set to {level}")).to_string()),
                Err(err) => Reply::Message(Banner::error(err.to_string()).to_string()),
            },
            Command::Help => Reply::Message(help_text()),
            Command::Quit => Reply::Quit,
        }
    }

    /// Applies a finished call; `true` when the screen changed.
    pub fn apply(
        &mut self,
        event: SessionEvent,
    ) -> bool {
        self.state.apply(event)
    }

    pub fn screen(&self) -> String {
        let mut out = render_screen(&self.state);
        out.push('\n');
        out.push_str(&status_line(&self.state));
        out
    }
}

fn status_line(state: &AppState) -> String {
    let mut shown = vec![hints::SET, hints::CLEAR, hints::SUBMIT];
    if state.calculation().result().is_some() && state.order().can_order() {
        shown.push(hints::ORDER);
    }
    shown.extend([hints::SHOW, hints::HELP, hints::QUIT]);
    build_status_bar(&shown)
}

fn help_text() -> String {
    let mut out = String::from("Commands:\n");
    for (usage, meaning) in [
        ("set <field> <value>", "replace one input value"),
        ("clear <field>", "empty one input value"),
        ("show", "redraw the screen"),
        ("submit", "calculate feed for the current inputs"),
        ("order", "place a simulated order for the shown result"),
        ("species", "reload the species list"),
        ("log <level>", "change the log level (error, warn, info, debug, trace)"),
        ("help", "this list"),
        ("quit", "leave"),
    ] {
        out.push_str(&format!("  {usage:<22} {meaning}\n"));
    }
    out.push_str(&format!("Fields: {}\n", field_keys()));
    out
}

/// Runs the line-based front end until `quit` or end of input.
pub async fn run_interactive(service: Arc<dyn FeedService>) -> anyhow::Result<()> {
    let (dispatcher, mut events) = Dispatcher::new(service);
    let mut repl = Repl::new(dispatcher);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    repl.load_species();
    print_screen(&mut stdout, &repl.screen())?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    info!("input closed");
                    break;
                };
                let reply = match Command::parse(&line) {
                    None => continue,
                    Some(Ok(command)) => repl.handle(command),
                    Some(Err(err)) => Reply::Message(Banner::error(err.to_string()).to_string()),
                };
                match reply {
                    Reply::Render => print_screen(&mut stdout, &repl.screen())?,
                    Reply::Message(message) => print_screen(&mut stdout, &message)?,
                    Reply::Quit => break,
                }
            }
            Some(event) = events.recv() => {
                if repl.apply(event) {
                    print_screen(&mut stdout, &repl.screen())?;
                }
            }
        }
    }
    Ok(())
}

fn print_screen(
    out: &mut impl Write,
    text: &str,
) -> anyhow::Result<()> {
    writeln!(out, "{text}").context("failed to write to stdout")?;
    out.flush().context("failed to flush stdout")
}

// ─── one-shot commands ───────────────────────────────────────────────────────

/// Inputs for a single calculation. Numbers are taken as text and go through
/// the same checks as the interactive form.
#[derive(Debug, Clone, Args)]
pub struct CalculateArgs {
    /// Number of fish in the pond.
    #[arg(long)]
    pub fish_quantity: String,

    /// Current weight per fish, in kg.
    #[arg(long)]
    pub current_weight: String,

    /// Target weight per fish, in kg.
    #[arg(long)]
    pub target_weight: String,

    /// Fish species, as offered by the service.
    #[arg(long, default_value = crate::models::DEFAULT_SPECIES)]
    pub species: String,

    /// Growth period in days.
    #[arg(long)]
    pub growth_days: Option<String>,

    /// Water temperature in °C.
    #[arg(long)]
    pub water_temp: Option<String>,

    /// Place a simulated order for the result.
    #[arg(long)]
    pub order: bool,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl CalculateArgs {
    fn fill(
        &self,
        state: &mut AppState,
    ) {
        state.set_field(FieldName::FishQuantity, self.fish_quantity.as_str());
        state.set_field(FieldName::CurrentWeightPerFish, self.current_weight.as_str());
        state.set_field(FieldName::TargetWeightPerFish, self.target_weight.as_str());
        state.set_field(FieldName::FishSpecies, self.species.as_str());
        state.set_field(
            FieldName::GrowthPeriodDays,
            self.growth_days.as_deref().unwrap_or_default(),
        );
        state.set_field(
            FieldName::WaterTemperatureCelsius,
            self.water_temp.as_deref().unwrap_or_default(),
        );
    }
}

/// Applies events until no session is waiting any more.
async fn settle(
    state: &mut AppState,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
) {
    while state.is_busy() {
        match events.recv().await {
            Some(event) => {
                state.apply(event);
            }
            None => break,
        }
    }
}

/// Loads and prints the species catalog. Returns `false` when it failed.
pub async fn run_species(
    service: Arc<dyn FeedService>,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let (dispatcher, mut events) = Dispatcher::new(service);
    let mut state = AppState::new();

    dispatcher.load_species(&mut state);
    settle(&mut state, &mut events).await;

    match state.catalog().state() {
        CatalogState::Loaded(species) => {
            for name in species {
                writeln!(out, "{}", species_label(name))?;
            }
            Ok(true)
        }
        CatalogState::Failed(message) => {
            writeln!(out, "{}", Banner::error(message.as_str()))?;
            Ok(false)
        }
        CatalogState::Idle | CatalogState::Loading => Ok(false),
    }
}

/// Runs one calculation and, when asked, one order for its result.
/// Returns `false` when either ended in an error state.
pub async fn run_calculate(
    service: Arc<dyn FeedService>,
    args: &CalculateArgs,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let (dispatcher, mut events) = Dispatcher::new(service);
    let mut state = AppState::new();
    args.fill(&mut state);

    if let Err(err) = dispatcher.submit(&mut state) {
        warn!(error = %err, "calculation not submitted");
        writeln!(out, "{}", Banner::error(format!("Cannot calculate: {err}")))?;
        return Ok(false);
    }
    settle(&mut state, &mut events).await;

    if args.order && state.calculation().result().is_some() {
        match dispatcher.place_order(&mut state) {
            Ok(_) => settle(&mut state, &mut events).await,
            Err(err) => warn!(error = %err, "order not placed"),
        }
    }

    let succeeded = matches!(state.calculation().state(), CalculationState::Success(_))
        && !matches!(state.order().state(), OrderState::Error(_));

    if args.json {
        write_json(&state, out)?;
    } else {
        write_text(&state, args.order, out)?;
    }
    Ok(succeeded)
}

fn write_text(
    state: &AppState,
    ordered: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match state.calculation().state() {
        CalculationState::Success(result) => {
            writeln!(out, "{}", ResultView::new(result))?;
            if ordered {
                writeln!(out, "{}", OrderView::new(state.order().state()))?;
            }
        }
        CalculationState::Error(message) => {
            writeln!(out, "{}", Banner::calculation_failed(message))?;
        }
        CalculationState::Idle | CalculationState::Loading => {}
    }
    Ok(())
}

fn write_json(
    state: &AppState,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let document = match state.calculation().state() {
        CalculationState::Success(result) => {
            let mut doc = json!({ "result": result });
            match state.order().state() {
                OrderState::Confirmed(confirmation) => doc["order"] = json!(confirmation),
                OrderState::Error(message) => doc["orderError"] = json!(message),
                OrderState::Idle | OrderState::Loading => {}
            }
            doc
        }
        CalculationState::Error(message) => json!({ "error": message }),
        CalculationState::Idle | CalculationState::Loading => json!({}),
    };
    serde_json::to_writer_pretty(&mut *out, &document).context("failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn set_keeps_the_rest_of_the_line_as_value() {
        assert_eq!(
            Command::parse("set fishSpecies  rainbow trout"),
            Some(Ok(Command::Set(
                FieldName::FishSpecies,
                "rainbow trout".to_string()
            )))
        );
    }

    #[test]
    fn set_without_value_empties_the_field() {
        assert_eq!(
            Command::parse("set growthperioddays"),
            Some(Ok(Command::Set(FieldName::GrowthPeriodDays, String::new())))
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn words_are_case_insensitive() {
        assert_eq!(Command::parse("SUBMIT"), Some(Ok(Command::Submit)));
        assert_eq!(
            Command::parse("Clear waterTemperatureCelsius"),
            Some(Ok(Command::Clear(FieldName::WaterTemperatureCelsius)))
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            Command::parse("feed me"),
            Some(Err(CommandError::Unknown("feed".into())))
        );
        assert_eq!(
            Command::parse("set weight 2"),
            Some(Err(CommandError::UnknownField("weight".into())))
        );
        assert_eq!(
            Command::parse("clear"),
            Some(Err(CommandError::Usage("clear <field>")))
        );
        assert_eq!(Command::parse("log"), Some(Err(CommandError::Usage("log <level>"))));
    }

    #[test]
    fn unknown_field_lists_valid_keys() {
        let message = CommandError::UnknownField("weight".into()).to_string();

        assert!(message.contains("fishQuantity"));
        assert!(message.contains("waterTemperatureCelsius"));
    }

    #[test]
    fn status_line_hides_order_without_result() {
        let line = status_line(&AppState::new());

        assert!(line.contains("submit: Calculate Feed"));
        assert!(!line.contains("order:"));
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_text();

        for word in ["set", "clear", "show", "submit", "order", "species", "log", "help", "quit"] {
            assert!(help.contains(word), "missing {word}");
        }
    }
}
