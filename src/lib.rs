//src/lib.rs
// --- Declare modules ---
mod config;
mod session;
pub mod store;

// --- Expose public types ---
pub use config::{
    get_config_path as get_config_path_util,
    load_config as load_config_util,
    parse_color,
    save_config as save_config_util,
    Config,
    Error as ConfigError,
    StandardColor,
    Theme,
    ThemeColors,
    Units,
};

pub use session::WorkoutSession;

pub use store::{
    parse_muscle_group,
    Exercise,
    ExerciseId,
    MuscleGroup,
    SetField,
    SetId,
    StoreError,
    WorkoutSet,
    WorkoutSnapshot,
    WorkoutStore,
};
