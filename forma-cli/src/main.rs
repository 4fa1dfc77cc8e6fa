use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::{LevelFilter, debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use forma::config::SessionConfig;
use forma::handoff::ExerciseSelection;
use forma::models::BaseExercise;
use forma::profile::{AppContext, UserProfile};
use forma::session::{Command, Session, WorkoutSnapshot, format_volume};
use forma::status::StatusSubscriber;

use crossterm::event::{self, KeyCode};
use ratatui::{
    DefaultTerminal,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

#[derive(Parser, Debug)]
#[command(version, about = "Forma - Workout Tracker CLI", long_about = None)]
struct Args {
    /// Override the log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Override the timer tick in milliseconds
    #[arg(long, global = true)]
    tick_ms: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive workout tracking
    Track {
        #[arg(short, long)]
        name: Option<String>,
        /// Exercise to start with, as "Name:Muscle"
        #[arg(short, long)]
        exercise: Vec<String>,
    },
    /// Apply a JSON array of commands and print the resulting workout
    Replay {
        #[arg(short, long)]
        script: PathBuf,
        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the handoff payload for a list of exercises
    Handoff {
        #[arg(short, long)]
        exercise: Vec<String>,
    },
}

fn parse_exercise(raw: &str) -> BaseExercise {
    match raw.split_once(':') {
        Some((name, muscle)) => BaseExercise::new(name.trim(), muscle.trim()),
        None => BaseExercise::new(raw.trim(), "Other"),
    }
}

const NORMAL_HELP: &str =
    "j/k: move | w/r: weight/reps | a/x: add/remove set | e: exercise | c: comment | n: name | space: timer | d: discard | q: quit";

#[derive(PartialEq)]
enum InputMode {
    Normal,
    AddingExercise,
    EditingWeight,
    EditingReps,
    Commenting,
    Renaming,
    ConfirmingDiscard,
}

struct SetRow {
    exercise: String,
    set_id: String,
    label: String,
}

struct WorkoutTracker {
    session: Arc<Session>,
    status: StatusSubscriber,
    snapshot: WorkoutSnapshot,
    rows: Vec<SetRow>,
    selected: usize,
    status_message: String,
    input_mode: InputMode,
    input_buffer: String,
}

impl WorkoutTracker {
    async fn new(session: Arc<Session>) -> Result<Self> {
        let status = session.subscribe_status();
        let snapshot = session.snapshot().await;
        let mut tracker = Self {
            session,
            status,
            snapshot,
            rows: Vec::new(),
            selected: 0,
            status_message: NORMAL_HELP.to_string(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
        };
        tracker.refresh().await;
        Ok(tracker)
    }

    async fn refresh(&mut self) {
        self.snapshot = self.session.snapshot().await;
        self.rows.clear();
        for exercise in &self.snapshot.exercises {
            for (idx, set) in exercise.sets.iter().enumerate() {
                let mut label = format!(
                    "{} ({}) #{}: {}",
                    exercise.name,
                    exercise.muscle,
                    idx + 1,
                    set
                );
                if idx == 0 {
                    if let Some(comment) = &exercise.comment {
                        label.push_str(&format!("  [{}]", comment));
                    }
                }
                self.rows.push(SetRow {
                    exercise: exercise.name.clone(),
                    set_id: set.id.clone(),
                    label,
                });
            }
        }

        if self.selected >= self.rows.len() && !self.rows.is_empty() {
            self.selected = self.rows.len() - 1;
        }
    }

    fn selected_row(&self) -> Option<&SetRow> {
        self.rows.get(self.selected)
    }

    fn scroll_down(&mut self) {
        if !self.rows.is_empty() && self.selected < self.rows.len() - 1 {
            self.selected += 1;
        }
    }

    fn scroll_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn enter_mode(&mut self, mode: InputMode, prompt: &str, prefill: String) {
        self.input_mode = mode;
        self.input_buffer = prefill;
        self.status_message = prompt.to_string();
    }

    fn back_to_normal(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    fn current_set_field(&self, weight: bool) -> String {
        let Some(row) = self.selected_row() else {
            return String::new();
        };
        self.snapshot
            .exercises
            .iter()
            .find(|e| e.name == row.exercise)
            .and_then(|e| e.find_set(&row.set_id))
            .map(|s| if weight { s.weight.clone() } else { s.reps.clone() })
            .unwrap_or_default()
    }

    async fn submit_input(&mut self) -> Result<()> {
        let input = self.input_buffer.clone();
        let row = self
            .selected_row()
            .map(|r| (r.exercise.clone(), r.set_id.clone()));

        self.status_message = match (&self.input_mode, row) {
            (InputMode::AddingExercise, _) => {
                let exercise = parse_exercise(&input);
                let name = exercise.name.clone();
                if self.session.add_exercises(vec![exercise]).await.is_empty() {
                    format!("{} is already in this workout", name)
                } else {
                    format!("Added {}", name)
                }
            }
            (InputMode::EditingWeight, Some((exercise, set_id))) => {
                self.session.set_weight(&exercise, &set_id, &input).await;
                format!("{} weight set to {}", exercise, input)
            }
            (InputMode::EditingReps, Some((exercise, set_id))) => {
                self.session.set_reps(&exercise, &set_id, &input).await;
                format!("{} reps set to {}", exercise, input)
            }
            (InputMode::Commenting, Some((exercise, _))) => {
                self.session.set_comment(&exercise, &input).await;
                format!("Comment saved for {}", exercise)
            }
            (InputMode::Renaming, _) => {
                self.session.rename(&input).await;
                format!("Workout renamed to {}", self.session.snapshot().await.name)
            }
            _ => NORMAL_HELP.to_string(),
        };
        self.back_to_normal();
        self.refresh().await;
        Ok(())
    }

    async fn add_set(&mut self) {
        let Some(exercise) = self.selected_row().map(|r| r.exercise.clone()) else {
            self.status_message = "Add an exercise first (e)".to_string();
            return;
        };
        self.session.add_set(&exercise).await;
        self.status_message = format!("Added set to {}", exercise);
        self.refresh().await;
    }

    async fn remove_set(&mut self) {
        let Some((exercise, set_id)) = self
            .selected_row()
            .map(|r| (r.exercise.clone(), r.set_id.clone()))
        else {
            return;
        };
        self.status_message = if self.session.remove_set(&exercise, &set_id).await.is_empty() {
            format!("{} needs at least one set", exercise)
        } else {
            format!("Removed set from {}", exercise)
        };
        self.refresh().await;
    }

    async fn request_discard(&mut self) {
        match self.session.request_discard().await {
            Ok(_) => {
                self.input_mode = InputMode::ConfirmingDiscard;
                self.status_message =
                    "Are you sure you want to discard the workout in progress? (y/n)".to_string();
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    async fn resolve_discard(&mut self, confirmed: bool) -> Result<()> {
        if confirmed {
            self.session.confirm_discard().await?;
            self.status_message = "Workout discarded".to_string();
        } else {
            self.session.cancel_discard().await?;
            self.status_message = NORMAL_HELP.to_string();
        }
        self.input_mode = InputMode::Normal;
        self.selected = 0;
        self.refresh().await;
        Ok(())
    }
}

async fn run_workout_tracker(mut terminal: DefaultTerminal, session: Arc<Session>) -> Result<()> {
    let mut tracker = WorkoutTracker::new(session).await?;

    loop {
        tracker.snapshot = tracker.session.snapshot().await;
        terminal.draw(|frame| {
            let chunks = Layout::vertical([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(frame.area());

            // Header
            let snapshot = &tracker.snapshot;
            let timer_mark = if snapshot.timer_running { "" } else { " (paused)" };
            let header = Paragraph::new(format!(
                "{} | {}{} | Volume {} kg | Sets {}",
                snapshot.name,
                snapshot.duration_label,
                timer_mark,
                format_volume(snapshot.total_volume),
                snapshot.total_sets
            ))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(header, chunks[0]);

            // Sets list or input prompt
            match tracker.input_mode {
                InputMode::Normal | InputMode::ConfirmingDiscard => {
                    if tracker.rows.is_empty() {
                        let empty_msg = Paragraph::new(
                            "Get started\nAdd an exercise to start your workout (press 'e')",
                        )
                        .style(Style::default().fg(Color::Gray))
                        .block(Block::default().borders(Borders::ALL).title("Sets"));
                        frame.render_widget(empty_msg, chunks[1]);
                    } else {
                        let items: Vec<ListItem> = tracker
                            .rows
                            .iter()
                            .enumerate()
                            .map(|(idx, row)| {
                                let style = if idx == tracker.selected {
                                    Style::default()
                                        .fg(Color::Black)
                                        .bg(Color::Cyan)
                                        .add_modifier(Modifier::BOLD)
                                } else {
                                    Style::default()
                                };
                                ListItem::new(row.label.as_str()).style(style)
                            })
                            .collect();

                        let list = List::new(items).block(
                            Block::default()
                                .borders(Borders::ALL)
                                .title(format!(
                                    "Sets ({} done / {} total)",
                                    snapshot.completed_sets, snapshot.total_sets
                                )),
                        );

                        let mut list_state = ListState::default();
                        list_state.select(Some(tracker.selected));

                        frame.render_stateful_widget(list, chunks[1], &mut list_state);
                    }
                }
                _ => {
                    let title = match tracker.input_mode {
                        InputMode::AddingExercise => "New Exercise (Name:Muscle)",
                        InputMode::EditingWeight => "Weight (kg)",
                        InputMode::EditingReps => "Reps",
                        InputMode::Commenting => "Comment",
                        _ => "Workout Name",
                    };
                    let input_widget = Paragraph::new(tracker.input_buffer.as_str())
                        .style(Style::default().fg(Color::Yellow))
                        .block(Block::default().borders(Borders::ALL).title(title));
                    frame.render_widget(input_widget, chunks[1]);
                }
            }

            // Footer with status
            let resume = tracker.status.current();
            let footer_title = if resume.in_progress {
                format!(
                    "Status - in progress: {}",
                    resume.display_name.unwrap_or_default()
                )
            } else {
                "Status".to_string()
            };
            let footer = Paragraph::new(tracker.status_message.as_str())
                .style(Style::default().fg(Color::White))
                .block(Block::default().borders(Borders::ALL).title(footer_title));
            frame.render_widget(footer, chunks[2]);
        })?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let event::Event::Key(key) = event::read()? {
            match tracker.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        return Ok(());
                    }
                    KeyCode::Char('j') | KeyCode::Down => tracker.scroll_down(),
                    KeyCode::Char('k') | KeyCode::Up => tracker.scroll_up(),
                    KeyCode::Char('e') => tracker.enter_mode(
                        InputMode::AddingExercise,
                        "Enter exercise as Name:Muscle (e.g. 'Leg Press:Legs'):",
                        String::new(),
                    ),
                    KeyCode::Char('w') if !tracker.rows.is_empty() => {
                        let current = tracker.current_set_field(true);
                        tracker.enter_mode(InputMode::EditingWeight, "Enter weight:", current);
                    }
                    KeyCode::Char('r') if !tracker.rows.is_empty() => {
                        let current = tracker.current_set_field(false);
                        tracker.enter_mode(InputMode::EditingReps, "Enter reps:", current);
                    }
                    KeyCode::Char('c') if !tracker.rows.is_empty() => tracker.enter_mode(
                        InputMode::Commenting,
                        "Enter your comment (empty clears it):",
                        String::new(),
                    ),
                    KeyCode::Char('n') => {
                        let current = tracker.snapshot.name.clone();
                        tracker.enter_mode(InputMode::Renaming, "Enter workout name:", current);
                    }
                    KeyCode::Char('a') => tracker.add_set().await,
                    KeyCode::Char('x') => tracker.remove_set().await,
                    KeyCode::Char(' ') => {
                        let running = tracker.session.toggle_timer().await;
                        tracker.status_message =
                            if running { "Timer running" } else { "Timer paused" }.to_string();
                    }
                    KeyCode::Char('d') | KeyCode::Char('D') => tracker.request_discard().await,
                    _ => {}
                },
                InputMode::ConfirmingDiscard => match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => tracker.resolve_discard(true).await?,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        tracker.resolve_discard(false).await?
                    }
                    _ => {}
                },
                _ => match key.code {
                    KeyCode::Enter => {
                        if let Err(e) = tracker.submit_input().await {
                            tracker.status_message = format!("Error: {}", e);
                            tracker.back_to_normal();
                        }
                    }
                    KeyCode::Esc => {
                        tracker.back_to_normal();
                        tracker.status_message = NORMAL_HELP.to_string();
                    }
                    KeyCode::Char(c) => tracker.input_buffer.push(c),
                    KeyCode::Backspace => {
                        tracker.input_buffer.pop();
                    }
                    _ => {}
                },
            }
        }
    }
}

fn print_summary(snapshot: &WorkoutSnapshot) {
    println!(
        "{} - {} - volume {} kg - {} sets ({} completed)",
        snapshot.name,
        snapshot.duration_label,
        format_volume(snapshot.total_volume),
        snapshot.total_sets,
        snapshot.completed_sets
    );
    for exercise in &snapshot.exercises {
        println!("{} ({})", exercise.name, exercise.muscle);
        if let Some(comment) = &exercise.comment {
            println!("\tnote: {}", comment);
        }
        for set in &exercise.sets {
            println!("\t{}", set);
        }
    }
}

async fn replay(session: &Session, script: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let commands: Vec<Command> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse script {}", script.display()))?;
    info!("Replaying {} commands", commands.len());

    for (idx, command) in commands.into_iter().enumerate() {
        let modifications = session
            .apply(command)
            .await
            .with_context(|| format!("Command #{} failed", idx + 1))?;
        debug!("Command #{}: {} modifications", idx + 1, modifications.len());
    }
    Ok(())
}

/// Handoff payload for `Name:Muscle` arguments. Repeated names keep the first.
fn selection_payload(raw: &[String]) -> Result<Option<String>> {
    let mut selection = ExerciseSelection::new();
    for entry in raw {
        if !selection.select(parse_exercise(entry)) {
            debug!("Not selecting {:?}", entry);
        }
    }
    selection.to_payload()
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = SessionConfig::from_env()?;
    if let Some(level) = &args.log_level {
        config
            .set_log_level(level)
            .context("Invalid --log-level")?;
    }
    if let Some(ms) = args.tick_ms {
        anyhow::ensure!(ms > 0, "--tick-ms must be greater than zero");
        config.tick_interval = Duration::from_millis(ms);
    }
    Ok(config)
}

fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    let config = load_config(&args)?;
    let log_filter = config.log_filter();
    let ctx = AppContext::new(config, UserProfile::default());

    match args.command {
        Commands::Track { name, exercise } => {
            // stderr output would tear the terminal UI
            init_logging(LevelFilter::Error);
            let session = ctx.new_session();
            if let Some(name) = name {
                session.rename(&name).await;
            }
            session
                .add_exercises(exercise.iter().map(|e| parse_exercise(e)).collect())
                .await;
            session.start_ticker();

            let terminal = ratatui::init();
            let result = run_workout_tracker(terminal, session.clone()).await;
            ratatui::restore();
            session.stop_ticker();

            let snapshot = session.snapshot().await;
            if snapshot.status.in_progress {
                print_summary(&snapshot);
            } else {
                println!("No workout in progress");
            }
            result
        }
        Commands::Replay { script, json } => {
            init_logging(log_filter);
            let session = ctx.new_session();
            replay(&session, &script).await?;
            let snapshot = session.snapshot().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_summary(&snapshot);
            }
            Ok(())
        }
        Commands::Handoff { exercise } => {
            init_logging(log_filter);
            match selection_payload(&exercise)? {
                Some(payload) => println!("{}", payload),
                None => anyhow::bail!("Select at least one exercise with --exercise"),
            }
            Ok(())
        }
    }
}
