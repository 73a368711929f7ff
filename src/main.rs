//src/main.rs
mod cli; // Keep cli module for parsing args

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::io::{self, BufRead, IsTerminal, Write};
use strum::IntoEnumIterator;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use workout_store_lib::{
    get_config_path_util, load_config_util, Config, Exercise, ExerciseId, MuscleGroup, SetField,
    StoreError, ThemeColors, Units, WorkoutSession, WorkoutStore,
};

const NAME_PLACEHOLDER: &str = "(unnamed)";

enum Flow {
    Continue,
    Quit,
}

fn main() -> Result<()> {
    let cli_args = cli::parse_args(); // Parse arguments once
    init_logging(cli_args.verbose)?;

    if let Some(cli::Commands::Completions { shell }) = cli_args.command {
        let mut cmd = cli::build_cli_command();
        let bin_name = cmd.get_name().to_string();
        eprintln!("Generating completion script for {}...", shell); // Print to stderr
        clap_complete::generate(shell, &mut cmd, bin_name, &mut io::stdout());
        return Ok(());
    }

    let config_path = match cli_args.config {
        Some(path) => path,
        None => get_config_path_util().context("Failed to determine configuration file path")?,
    };

    if let Some(cli::Commands::ConfigPath) = cli_args.command {
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = load_config_util(&config_path)
        .with_context(|| format!("Failed to load config from {config_path:?}"))?;
    let colors = config
        .theme
        .resolve()
        .with_context(|| format!("Invalid theme in {config_path:?}"))?;
    debug!(path = %config_path.display(), "Loaded configuration");

    let mut session = WorkoutSession::with_selection(cli_args.group.or(config.default_group));

    match cli_args.command {
        Some(cli::Commands::Groups) => {
            print_groups_table(session.store(), session.selected(), &colors);
            Ok(())
        }
        Some(cli::Commands::Shell) | None => run_shell(&mut session, &config, &colors),
        Some(cli::Commands::Completions { .. }) | Some(cli::Commands::ConfigPath) => {
            unreachable!("handled before the configuration is loaded")
        }
    }
}

fn init_logging(verbosity: u8) -> Result<()> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Failed to build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))
}

fn run_shell(session: &mut WorkoutSession, config: &Config, colors: &ThemeColors) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    if interactive {
        println!("Type 'help' for a list of commands, 'quit' to leave.");
        if session.selected().is_some() {
            print_session(session, config.units, colors);
        }
        print_prompt(session)?;
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let words: Vec<&str> = line.split_whitespace().collect();

        if !words.is_empty() {
            match cli::ShellLine::try_parse_from(words) {
                Ok(parsed) => {
                    let version_before = session.version();
                    match execute(session, parsed.command, config, colors) {
                        Ok(Flow::Quit) => return Ok(()),
                        Ok(Flow::Continue) => {
                            if session.version() != version_before {
                                print_session(session, config.units, colors);
                            }
                        }
                        Err(e) => eprintln!("Error: {e}"),
                    }
                }
                Err(e) => e.print().context("Failed to print command usage")?,
            }
        }

        if interactive {
            print_prompt(session)?;
        }
    }
    Ok(())
}

fn execute(
    session: &mut WorkoutSession,
    command: cli::ShellCommand,
    config: &Config,
    colors: &ThemeColors,
) -> Result<Flow, StoreError> {
    match command {
        cli::ShellCommand::Groups => print_groups_table(session.store(), session.selected(), colors),
        cli::ShellCommand::Select { group } => {
            session.select(Some(group));
            print_session(session, config.units, colors);
        }
        cli::ShellCommand::Deselect => {
            session.select(None);
            println!("No muscle group selected.");
        }
        cli::ShellCommand::Add => match session.add_exercise() {
            Some(id) => println!("Added exercise {id}. Name it with 'rename {id} <name>'."),
            None => println!("Select a muscle group first."),
        },
        cli::ShellCommand::Rename { exercise_id, name } => {
            if !session.rename_exercise(exercise_id, &name.join(" ")) {
                print_not_in_group(session, exercise_id);
            }
        }
        cli::ShellCommand::Remove { exercise_id } => {
            if session.remove_exercise(exercise_id) {
                println!("Removed exercise {exercise_id}.");
            } else {
                print_not_in_group(session, exercise_id);
            }
        }
        cli::ShellCommand::AddSet { exercise_id } => {
            let set_id = session.add_set(exercise_id)?;
            println!("Added set {set_id} to exercise {exercise_id}.");
        }
        cli::ShellCommand::Reps { exercise_id, set_id, value } => {
            session.update_set(exercise_id, set_id, SetField::Reps, value.as_deref().unwrap_or(""))?;
        }
        cli::ShellCommand::Weight { exercise_id, set_id, value } => {
            session.update_set(exercise_id, set_id, SetField::Weight, value.as_deref().unwrap_or(""))?;
        }
        cli::ShellCommand::Toggle { exercise_id, set_id } => {
            session.toggle_complete(exercise_id, set_id)?;
        }
        cli::ShellCommand::Show => print_session(session, config.units, colors),
        cli::ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn print_prompt(session: &WorkoutSession) -> Result<()> {
    let label = session
        .selected()
        .map_or_else(|| "-".to_string(), |group| group.label().to_lowercase());
    let mut stdout = io::stdout();
    write!(stdout, "[{label}]> ").context("Failed to write prompt")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn print_not_in_group(session: &WorkoutSession, exercise_id: ExerciseId) {
    match session.selected() {
        Some(group) => println!("No exercise {exercise_id} in {group}."),
        None => println!("Select a muscle group first."),
    }
}

fn print_session(session: &WorkoutSession, units: Units, colors: &ThemeColors) {
    match session.selected() {
        Some(group) => {
            println!("{group}");
            print_exercise_table(session.current_exercises(), session.last_added(), units, colors);
        }
        None => println!("No muscle group selected. Use 'select <group>'."),
    }
}

fn print_groups_table(store: &WorkoutStore, selected: Option<MuscleGroup>, colors: &ThemeColors) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(colors.header),
            Cell::new("Muscle Group").fg(colors.header),
            Cell::new("Exercises").fg(colors.header),
            Cell::new("Selected").fg(colors.header),
        ]);

    for group in MuscleGroup::iter() {
        table.add_row(vec![
            Cell::new(group.id()),
            Cell::new(group.label()),
            Cell::new(store.exercises_for(Some(group)).len()),
            Cell::new(if selected == Some(group) { "*" } else { "" }),
        ]);
    }

    println!("{table}");
}

fn print_exercise_table(
    exercises: &[Exercise],
    focus: Option<ExerciseId>,
    units: Units,
    colors: &ThemeColors,
) {
    if exercises.is_empty() {
        println!("No exercises yet. Use 'add' to create one.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(colors.header),
            Cell::new("Exercise").fg(colors.header),
            Cell::new("Set").fg(colors.header),
            Cell::new("Reps").fg(colors.header),
            Cell::new(format!("Weight ({})", units.weight_label())).fg(colors.header),
            Cell::new("Done").fg(colors.header),
        ]);

    for exercise in exercises {
        // '*' marks the exercise whose name should be filled in next
        let id_label = if focus == Some(exercise.id) {
            format!("{}*", exercise.id)
        } else {
            exercise.id.to_string()
        };
        let name = if exercise.name.is_empty() {
            NAME_PLACEHOLDER
        } else {
            exercise.name.as_str()
        };

        if exercise.sets.is_empty() {
            table.add_row(vec![
                Cell::new(&id_label),
                Cell::new(name),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ]);
            continue;
        }

        for (index, set) in exercise.sets.iter().enumerate() {
            let (marker, color) = if set.completed {
                ("✓", colors.completed)
            } else {
                ("✗", colors.pending)
            };
            let (id_cell, name_cell) = if index == 0 {
                (id_label.as_str(), name)
            } else {
                ("", "")
            };
            table.add_row(vec![
                Cell::new(id_cell),
                Cell::new(name_cell),
                Cell::new(format!("Set {}", set.id)),
                Cell::new(set.reps),
                Cell::new(set.weight),
                Cell::new(marker).fg(color),
            ]);
        }
    }

    println!("{table}");
}
