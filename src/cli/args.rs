use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::stats::MAX_SERIES_DAYS;

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "Log workouts and see where your calories went")]
#[command(long_about = "fittrack - a workout log for the terminal

Record workouts, edit or remove them, and summarize them by day,
category and recency. Data lives under ~/.fittrack (or $FITTRACK_HOME).

QUICK START:
  fittrack login demo@example.com           Start a session (password: password)
  fittrack add Running -m 30 -c 320          Log a workout
  fittrack list                              Show all workouts
  fittrack stats summary                     Today's totals
  fittrack dashboard                         Everything at a glance

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  fittrack <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log debug detail to stderr
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
    /// Log in and start a session
    ///
    /// Only the demo account is accepted.
    ///
    /// # Examples
    ///
    ///   fittrack login demo@example.com --password password
    ///   FITTRACK_PASSWORD=password fittrack login demo@example.com
    Login {
        /// Account email
        email: String,

        /// Account password
        #[arg(long, short = 'p', env = "FITTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create a local profile and log in as it
    Register {
        /// Display name
        #[arg(long, short = 'n')]
        name: String,

        /// Account email
        email: String,

        /// Account password
        #[arg(long, short = 'p', env = "FITTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Update the current profile
    ///
    /// # Examples
    ///
    ///   fittrack profile --name "Sam Doe"
    ///   fittrack profile --avatar https://example.com/me.png
    Profile(ProfileArgs),

    /// Log a workout
    ///
    /// # Examples
    ///
    ///   fittrack add Running -m 30 -c 320
    ///   fittrack add Legs -m 45 -c 350 -d "Back Squat - 5 sets x 15 reps - 30 kg - 10 min"
    ///   fittrack add Back -m 50 -c 400 --date 2025-04-14
    ///   fittrack add Cardio -m 20 -c 150 --date "2025-04-14T07:30"
    #[command(alias = "a")]
    Add(AddArgs),

    /// Change fields of an existing workout
    ///
    /// Only the fields given are changed.
    ///
    /// # Examples
    ///
    ///   fittrack edit workout-1 -c 380
    ///   fittrack edit workout-2 --type Cardio -m 25
    Edit(EditArgs),

    /// Delete a workout
    #[command(alias = "delete")]
    Rm {
        /// Workout ID
        id: String,
    },

    /// List workouts, newest first
    ///
    /// # Examples
    ///
    ///   fittrack list
    ///   fittrack list --search squat
    ///   fittrack ls -o json
    #[command(alias = "ls")]
    List {
        /// Only workouts whose type or description contains this text
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one workout in detail
    Show {
        /// Workout ID
        id: String,
    },

    /// Workout statistics
    ///
    /// Without a subcommand, shows today's summary.
    ///
    /// # Subcommands
    ///
    ///   summary   Totals for one day
    ///   tally     Workouts per category
    ///   series    Daily calories over a window
    ///   buckets   Workouts grouped by recency
    Stats(StatsArgs),

    /// Today, this week, categories and recent workouts together
    #[command(alias = "dash")]
    Dashboard,

    /// Generate shell completions
    ///
    /// Example: fittrack completions bash > ~/.bash_completion.d/fittrack
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments for `add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Workout type (e.g. Legs, Running)
    #[arg(value_name = "TYPE")]
    pub kind: String,

    /// Duration in minutes
    #[arg(long, short = 'm')]
    pub duration: u32,

    /// Calories burned
    #[arg(long, short = 'c')]
    pub calories: u32,

    /// Free-text description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// When it happened (today, yesterday, YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339)
    #[arg(long, value_parser = parse_when)]
    pub date: Option<DateTime<Utc>>,
}

/// Arguments for `edit`.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Workout ID
    pub id: String,

    /// New workout type
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub kind: Option<String>,

    /// New duration in minutes
    #[arg(long, short = 'm')]
    pub duration: Option<u32>,

    /// New calorie count
    #[arg(long, short = 'c')]
    pub calories: Option<u32>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New date (same formats as `add --date`)
    #[arg(long, value_parser = parse_when)]
    pub date: Option<DateTime<Utc>>,
}

/// Arguments for `profile`.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// New display name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New email
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// New avatar path or URL
    #[arg(long)]
    pub avatar: Option<String>,
}

/// Arguments for statistics.
#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: Option<StatsCommands>,
}

/// Statistics subcommands.
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Totals for one day
    ///
    /// Count, calories, minutes and average calories per workout.
    Summary {
        /// Day to summarize (today, yesterday or YYYY-MM-DD)
        #[arg(long, short = 'd', value_parser = parse_day)]
        date: Option<NaiveDate>,
    },

    /// Number of workouts per category
    Tally,

    /// Daily calories over a window of days
    Series {
        /// Number of days, 1 to 3660 (defaults to `stats.series_days`)
        #[arg(
            long,
            short = 'n',
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SERIES_DAYS))
        )]
        days: Option<u32>,

        /// Last day of the window (today, yesterday or YYYY-MM-DD)
        #[arg(long, short = 'e', value_parser = parse_day)]
        ending: Option<NaiveDate>,
    },

    /// Workouts grouped into today, this week, this month and older
    Buckets,
}

/// Parse a calendar day: `today`, `yesterday` or `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns a message naming the accepted formats.
pub fn parse_day(input: &str) -> Result<NaiveDate, String> {
    let today = Local::now().date_naive();
    match input.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{input}' (expected today, yesterday or YYYY-MM-DD)")),
    }
}

/// Parse a workout timestamp.
///
/// Accepts RFC 3339, a local `YYYY-MM-DDTHH:MM`, or a day (see [`parse_day`])
/// which means noon local time on that day.
///
/// # Errors
///
/// Returns a message naming the accepted formats.
pub fn parse_when(input: &str) -> Result<DateTime<Utc>, String> {
    let input = input.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Ok(at.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| parse_day(input).ok().and_then(|day| day.and_hms_opt(12, 0, 0)))
        .ok_or_else(|| {
            format!(
                "invalid date '{input}' (expected today, yesterday, YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339)"
            )
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(|| format!("'{input}' does not exist in the local time zone"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use clap::Parser;

    // ==================== parse_day / parse_when Tests ====================

    #[test]
    fn test_parse_day_today() {
        assert_eq!(parse_day("TODAY").unwrap(), Local::now().date_naive());
    }

    #[test]
    fn test_parse_day_yesterday() {
        let expected = Local::now().date_naive() - Duration::days(1);
        assert_eq!(parse_day("yesterday").unwrap(), expected);
    }

    #[test]
    fn test_parse_day_iso() {
        assert_eq!(
            parse_day("2025-04-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
        );
        assert!(parse_day("15/04/2025").is_err());
    }

    #[test]
    fn test_parse_when_rfc3339() {
        let at = parse_when("2025-04-15T18:30:00Z").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2025, 4, 15, 18, 30, 0).unwrap());

        let at = parse_when("2025-04-15T20:30:00+02:00").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2025, 4, 15, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_when_day_is_local_noon() {
        let at = parse_when("2025-04-15").unwrap().with_timezone(&Local);
        assert_eq!(at.date_naive(), NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
        assert_eq!(at.hour(), 12);
    }

    #[test]
    fn test_parse_when_local_time() {
        let at = parse_when("2025-04-15T07:45").unwrap().with_timezone(&Local);
        assert_eq!((at.hour(), at.minute()), (7, 45));
    }

    #[test]
    fn test_parse_when_rejects_garbage() {
        assert!(parse_when("next monday").is_err());
    }

    // ==================== CLI Parsing Tests ====================

    #[test]
    fn test_cli_login_command() {
        let cli =
            Cli::try_parse_from(["fittrack", "login", "demo@example.com", "-p", "password"]).unwrap();
        if let Commands::Login { email, password } = cli.command {
            assert_eq!(email, "demo@example.com");
            assert_eq!(password, "password");
        } else {
            panic!("Expected Login command");
        }
    }

    #[test]
    fn test_cli_add_command() {
        let cli = Cli::try_parse_from([
            "fittrack", "add", "Running", "-m", "30", "-c", "320", "-d", "Park loop",
        ])
        .unwrap();
        if let Commands::Add(args) = cli.command {
            assert_eq!(args.kind, "Running");
            assert_eq!(args.duration, 30);
            assert_eq!(args.calories, 320);
            assert_eq!(args.description, "Park loop");
            assert!(args.date.is_none());
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_cli_add_requires_numbers() {
        assert!(Cli::try_parse_from(["fittrack", "add", "Running", "-c", "320"]).is_err());
        assert!(Cli::try_parse_from(["fittrack", "add", "Running", "-m", "x", "-c", "320"]).is_err());
        assert!(Cli::try_parse_from(["fittrack", "add", "Running", "-m", "-5", "-c", "320"]).is_err());
    }

    #[test]
    fn test_cli_add_with_date() {
        let cli = Cli::try_parse_from([
            "fittrack", "add", "Legs", "-m", "45", "-c", "350", "--date", "2025-04-15T18:30:00Z",
        ])
        .unwrap();
        if let Commands::Add(args) = cli.command {
            assert_eq!(args.date, Some(Utc.with_ymd_and_hms(2025, 4, 15, 18, 30, 0).unwrap()));
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_cli_edit_command() {
        let cli =
            Cli::try_parse_from(["fittrack", "edit", "workout-1", "--type", "Cardio", "-c", "200"])
                .unwrap();
        if let Commands::Edit(args) = cli.command {
            assert_eq!(args.id, "workout-1");
            assert_eq!(args.kind.as_deref(), Some("Cardio"));
            assert_eq!(args.calories, Some(200));
            assert!(args.duration.is_none());
        } else {
            panic!("Expected Edit command");
        }
    }

    #[test]
    fn test_cli_rm_alias() {
        let cli = Cli::try_parse_from(["fittrack", "delete", "workout-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Rm { id } if id == "workout-1"));
    }

    #[test]
    fn test_cli_list_search() {
        let cli = Cli::try_parse_from(["fittrack", "ls", "--search", "squat"]).unwrap();
        if let Commands::List { search } = cli.command {
            assert_eq!(search.as_deref(), Some("squat"));
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_cli_output_format_default() {
        let cli = Cli::try_parse_from(["fittrack", "list"]).unwrap();
        assert!(cli.output.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_output_format_json() {
        let cli = Cli::try_parse_from(["fittrack", "list", "--output", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_output_format_short_and_verbose() {
        let cli = Cli::try_parse_from(["fittrack", "-o", "json", "-v", "dashboard"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Dashboard));
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::try_parse_from(["fittrack", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions {
                shell: clap_complete::Shell::Zsh
            }
        ));
        assert!(Cli::try_parse_from(["fittrack", "completions", "cmd.exe"]).is_err());
    }

    // ==================== Stats Subcommand Tests ====================

    #[test]
    fn test_cli_stats_default() {
        let cli = Cli::try_parse_from(["fittrack", "stats"]).unwrap();
        if let Commands::Stats(args) = cli.command {
            // No subcommand means today's summary
            assert!(args.command.is_none());
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_cli_stats_summary_with_date() {
        let cli = Cli::try_parse_from(["fittrack", "stats", "summary", "--date", "2025-04-15"]).unwrap();
        if let Commands::Stats(args) = cli.command {
            assert!(matches!(
                args.command,
                Some(StatsCommands::Summary { date: Some(d) }) if d == NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
            ));
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_cli_stats_series() {
        let cli = Cli::try_parse_from(["fittrack", "stats", "series", "--days", "14"]).unwrap();
        if let Commands::Stats(args) = cli.command {
            assert!(matches!(
                args.command,
                Some(StatsCommands::Series { days: Some(14), ending: None })
            ));
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_cli_stats_series_days_out_of_range() {
        for days in ["0", "3661", "200000000"] {
            let result = Cli::try_parse_from(["fittrack", "stats", "series", "--days", days]);
            assert!(result.is_err(), "--days {days} should be refused");
        }
        assert!(Cli::try_parse_from(["fittrack", "stats", "series", "--days", "3660"]).is_ok());
    }

    // ==================== Output Format Tests ====================

    #[test]
    fn test_output_format_default() {
        assert!(matches!(OutputFormat::default(), OutputFormat::Pretty));
    }
}
