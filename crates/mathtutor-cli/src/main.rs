//! mathtutor CLI: practice math problems and track progress.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

mod commands;
mod session;

#[derive(Parser)]
#[command(name = "mathtutor", version, about = "Practice math problems and track your progress")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file path or http(s) URL
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Directory for progress and stats
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Use this date (YYYY-MM-DD) as today
    #[arg(long, global = true, hide = true)]
    pub today: Option<chrono::NaiveDate>,
}

/// What `mark` records on a task.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MarkKind {
    /// Read the solution and understood it (counts as solved)
    Understood,
    /// Come back to this task later
    NeedsPractice,
    /// Flag the task as difficult
    Difficult,
}

/// Output format for `report`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and sample catalog
    Init,

    /// Check the task catalog for errors and warnings
    Validate,

    /// Browse categories, subcategories and tasks
    List {
        /// Category id
        category: Option<String>,

        /// Subcategory id
        subcategory: Option<String>,
    },

    /// Show a task (category/subcategory/task)
    Show {
        task: String,

        /// Also print the worked solution
        #[arg(long)]
        solution: bool,
    },

    /// Submit an answer for a task
    Answer {
        /// Task key (category/subcategory/task)
        task: String,

        /// Your answer
        #[arg(allow_hyphen_values = true)]
        answer: String,
    },

    /// Mark a task as understood, needing practice, or difficult
    Mark {
        /// Task key (category/subcategory/task)
        task: String,

        #[arg(value_enum)]
        kind: MarkKind,
    },

    /// Show streaks, totals and achievements
    Stats,

    /// Show completion per category
    Progress,

    /// Generate a progress report
    Report {
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Export progress and stats to a JSON file
    Export {
        /// Output file (default: math-tutor-progress-YYYY-MM-DD.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Replace progress and stats with an exported file
    Import { file: PathBuf },

    /// Erase all progress and stats
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mathtutor=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let global = cli.global;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate => commands::validate::execute(&global).await,
        Commands::List {
            category,
            subcategory,
        } => commands::list::execute(&global, category, subcategory).await,
        Commands::Show { task, solution } => commands::show::execute(&global, task, solution).await,
        Commands::Answer { task, answer } => commands::answer::execute(&global, task, answer).await,
        Commands::Mark { task, kind } => commands::mark::execute(&global, task, kind).await,
        Commands::Stats => commands::stats::execute(&global).await,
        Commands::Progress => commands::progress::execute(&global).await,
        Commands::Report { format, output } => {
            commands::report::execute(&global, format, output).await
        }
        Commands::Export { output } => commands::transfer::export(&global, output).await,
        Commands::Import { file } => commands::transfer::import(&global, file).await,
        Commands::Reset { yes } => commands::transfer::reset(&global, yes).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
