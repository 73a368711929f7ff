// src/cli.rs
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use workout_store_lib::{parse_muscle_group, ExerciseId, MuscleGroup, SetId};

#[derive(Parser, Debug)]
#[command(author, version, about = "Track exercises and sets per muscle group", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this configuration file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Muscle group to select at start-up, by name or id (overrides the config)
    #[arg(short, long, value_parser = parse_muscle_group)]
    pub group: Option<MuscleGroup>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive shell (the default)
    Shell,
    /// List the muscle groups and their ids
    Groups,
    /// Show the path to the configuration file
    ConfigPath,
    /// Generate a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// One line typed into the interactive shell. The first word is the command.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// List the muscle groups
    Groups,
    /// Select a muscle group by name or id
    Select {
        #[arg(value_parser = parse_muscle_group)]
        group: MuscleGroup,
    },
    /// Clear the muscle group selection
    Deselect,
    /// Add an unnamed exercise to the selected group
    Add,
    /// Rename an exercise in the selected group (no name clears it)
    Rename {
        exercise_id: ExerciseId,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },
    /// Remove an exercise from the selected group
    Remove { exercise_id: ExerciseId },
    /// Add a blank set to an exercise
    AddSet { exercise_id: ExerciseId },
    /// Set the reps of a set (no value means 0)
    Reps {
        exercise_id: ExerciseId,
        set_id: SetId,
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },
    /// Set the weight of a set (no value means 0)
    Weight {
        exercise_id: ExerciseId,
        set_id: SetId,
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },
    /// Mark a set done, or not done again
    Toggle { exercise_id: ExerciseId, set_id: SetId },
    /// Show the exercises of the selected group
    Show,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
