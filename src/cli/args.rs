use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::features::focus::{ActiveMode, Phase};

#[derive(Parser)]
#[command(name = "focusflow")]
#[command(about = "A Pomodoro focus timer and stopwatch for the terminal")]
#[command(long_about = "focusflow - A Pomodoro focus timer for the terminal

Cycles through focus, short break and long break phases, with an
independent stopwatch for open-ended sessions. State is kept between
invocations, so one-shot commands and the interactive timer can be mixed.

QUICK START:
  focusflow run             Open the interactive timer
  focusflow start           Start the countdown
  focusflow status          Show the current phase and time left
  focusflow stats           Show focus time for the last week

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  focusflow <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log debug output to stderr
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the timer and stopwatch state
    ///
    /// Displays the current mode, phase, round and time left, plus the
    /// stopwatch reading and today's focus totals.
    ///
    /// # Examples
    ///
    ///   focusflow status          Show status
    ///   focusflow s               Short alias
    ///   focusflow status -o json  Output as JSON
    #[command(alias = "s")]
    Status,

    /// Start the active mode
    ///
    /// In timer mode, starts the countdown for the current phase. A phase
    /// that has run out is reloaded first. In stopwatch mode, starts
    /// counting up.
    Start,

    /// Pause the active mode
    ///
    /// Pausing a stopwatch counts its session in today's stats.
    Pause,

    /// Rewind the active mode without counting anything
    ///
    /// The countdown goes back to the full phase length; the stopwatch
    /// goes back to zero.
    Reset,

    /// Stop and rewind the active mode
    ///
    /// Like reset, but a stopwatch session in progress is counted first.
    Stop,

    /// Switch between timer and stopwatch
    ///
    /// Both keep their own progress; switching only changes which one the
    /// other commands act on.
    ///
    /// # Examples
    ///
    ///   focusflow mode stopwatch
    ///   focusflow mode timer
    Mode {
        /// Mode to switch to
        #[arg(value_enum)]
        mode: ModeArg,
    },

    /// Jump to a timer phase
    ///
    /// Stops the countdown and loads the full length of the chosen phase.
    /// Jumping to focus starts a new cycle at round 1.
    ///
    /// # Examples
    ///
    ///   focusflow phase short
    ///   focusflow phase focus
    Phase {
        /// Phase to jump to
        #[arg(value_enum)]
        phase: PhaseArg,
    },

    /// Advance the clock by whole seconds
    ///
    /// Applies one-second ticks to the active mode, as if that much time had
    /// passed while it was running. Useful for scripting and testing.
    ///
    /// # Examples
    ///
    ///   focusflow tick            One second
    ///   focusflow tick -n 60      One minute
    ///   focusflow tick --for 25m  A whole focus phase
    Tick {
        /// Number of seconds to apply
        #[arg(long, short = 'n', default_value = "1")]
        count: u32,

        /// Time to apply instead of a count (e.g. 90, 5m, 1h30m)
        #[arg(long = "for", conflicts_with = "count")]
        span: Option<String>,
    },

    /// Open the interactive timer
    ///
    /// Keys:
    ///   space  start / pause
    ///   r      reset
    ///   s      stop
    ///   t      toggle timer / stopwatch
    ///   1 2 3  focus / short break / long break
    ///   q      quit
    #[command(alias = "ui")]
    Run,

    /// Manage configuration
    ///
    /// Settings live in config.yaml under the data directory
    /// (~/.focusflow, or $FOCUSFLOW_HOME).
    Config(ConfigArgs),

    /// Show daily focus statistics
    ///
    /// Lists focus time and completed sessions per day, with today last.
    ///
    /// # Examples
    ///
    ///   focusflow stats           Last 7 days
    ///   focusflow stats -d 30     Last 30 days
    Stats {
        /// Number of days to show
        #[arg(long, short = 'd', default_value = "7", value_parser = clap::value_parser!(u32).range(1..=366))]
        days: u32,
    },
}

/// Mode argument.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Pomodoro countdown
    Timer,
    /// Count-up stopwatch
    Stopwatch,
}

impl From<ModeArg> for ActiveMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Timer => Self::Timer,
            ModeArg::Stopwatch => Self::Stopwatch,
        }
    }
}

/// Phase argument.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseArg {
    /// Focus phase
    Focus,
    /// Short break
    Short,
    /// Long break
    Long,
}

impl From<PhaseArg> for Phase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::Focus => Self::Focus,
            PhaseArg::Short => Self::ShortBreak,
            PhaseArg::Long => Self::LongBreak,
        }
    }
}

/// Arguments for configuration.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current settings
    Show,

    /// Change one setting
    ///
    /// Keys: focus_minutes, short_break_minutes, long_break_minutes,
    /// rounds_until_long_break, auto_start_breaks, auto_start_focus,
    /// sound.enabled, general.default_output
    ///
    /// Examples:
    ///   focusflow config set focus_minutes 50
    ///   focusflow config set sound.enabled false
    Set {
        /// Setting key
        key: String,

        /// New value
        value: String,
    },

    /// Apply a duration preset
    ///
    /// classic (25/5/15), extended (50/10/20) or deep (90/10/30).
    Preset {
        /// Preset name
        name: String,
    },

    /// Print the config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_status() {
        let cli = Cli::try_parse_from(["focusflow", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status));
        assert!(cli.output.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_status_alias() {
        let cli = Cli::try_parse_from(["focusflow", "s"]).unwrap();
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["focusflow", "start", "-o", "json", "-v"]).unwrap();
        assert!(matches!(cli.command, Commands::Start));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_mode() {
        let cli = Cli::try_parse_from(["focusflow", "mode", "stopwatch"]).unwrap();
        if let Commands::Mode { mode } = cli.command {
            assert_eq!(ActiveMode::from(mode), ActiveMode::Stopwatch);
        } else {
            panic!("Expected Mode command");
        }
    }

    #[test]
    fn test_cli_mode_rejects_unknown() {
        assert!(Cli::try_parse_from(["focusflow", "mode", "lap"]).is_err());
    }

    #[test]
    fn test_cli_phase() {
        let cli = Cli::try_parse_from(["focusflow", "phase", "long"]).unwrap();
        if let Commands::Phase { phase } = cli.command {
            assert_eq!(Phase::from(phase), Phase::LongBreak);
        } else {
            panic!("Expected Phase command");
        }
    }

    #[test]
    fn test_cli_tick_default() {
        let cli = Cli::try_parse_from(["focusflow", "tick"]).unwrap();
        if let Commands::Tick { count, span } = cli.command {
            assert_eq!(count, 1);
            assert!(span.is_none());
        } else {
            panic!("Expected Tick command");
        }
    }

    #[test]
    fn test_cli_tick_for() {
        let cli = Cli::try_parse_from(["focusflow", "tick", "--for", "5m"]).unwrap();
        if let Commands::Tick { span, .. } = cli.command {
            assert_eq!(span, Some("5m".to_string()));
        } else {
            panic!("Expected Tick command");
        }
    }

    #[test]
    fn test_cli_tick_count_conflicts_with_for() {
        assert!(Cli::try_parse_from(["focusflow", "tick", "-n", "3", "--for", "5m"]).is_err());
    }

    #[test]
    fn test_cli_config_set() {
        let cli =
            Cli::try_parse_from(["focusflow", "config", "set", "focus_minutes", "50"]).unwrap();
        if let Commands::Config(args) = cli.command {
            if let ConfigCommands::Set { key, value } = args.command {
                assert_eq!(key, "focus_minutes");
                assert_eq!(value, "50");
            } else {
                panic!("Expected Set subcommand");
            }
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_cli_stats_default_days() {
        let cli = Cli::try_parse_from(["focusflow", "stats"]).unwrap();
        if let Commands::Stats { days } = cli.command {
            assert_eq!(days, 7);
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_cli_stats_rejects_zero_days() {
        assert!(Cli::try_parse_from(["focusflow", "stats", "-d", "0"]).is_err());
    }

    #[test]
    fn test_output_format_default() {
        assert!(matches!(OutputFormat::default(), OutputFormat::Pretty));
    }
}
