mod render;
mod typewriter;

use std::fmt;
use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use pathway_ai::advisory::client::{HttpRecommendationClient, TransportError};
use pathway_ai::config::{AppConfig, ConfigError};
use pathway_ai::session::{
    AdvisorSession, DegreeLevel, FundingSource, IntakeTerm, PriorityGoal, ProfileUpdate,
    ReorderError, ValidationError,
};
use pathway_ai::telemetry::{self, TelemetryError};

#[derive(Parser, Debug)]
#[command(
    name = "pathway-advisor",
    about = "Submit an academic/financial profile to the pathway recommendation service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a profile once and print the recommended pathways
    Discover(DiscoverArgs),
    /// Drive an intake session interactively (default command)
    Session,
}

#[derive(Args, Debug)]
struct DiscoverArgs {
    /// Current degree level
    #[arg(long, value_enum)]
    degree: Option<DegreeArg>,
    /// GPA on the 0-10 scale
    #[arg(long)]
    gpa: String,
    /// Major / field of interest
    #[arg(long)]
    major: String,
    /// Maximum total budget in rupees (tuition + living)
    #[arg(long, default_value_t = 2_500_000)]
    budget: u64,
    /// Absolute priority for the recommendation
    #[arg(long, value_enum, default_value_t = PriorityArg::HighRoi)]
    priority: PriorityArg,
    /// Primary funding source
    #[arg(long, value_enum)]
    funding: Option<FundingArg>,
    /// Preferred country; repeat the flag to select several
    #[arg(long = "country")]
    countries: Vec<String>,
    /// Target intake term
    #[arg(long, value_enum)]
    intake: Option<IntakeArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DegreeArg {
    #[value(name = "high-school")]
    HighSchool,
    Bachelors,
    Masters,
}

impl From<DegreeArg> for DegreeLevel {
    fn from(value: DegreeArg) -> Self {
        match value {
            DegreeArg::HighSchool => DegreeLevel::HighSchool,
            DegreeArg::Bachelors => DegreeLevel::Bachelors,
            DegreeArg::Masters => DegreeLevel::Masters,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PriorityArg {
    HighRoi,
    LowCost,
    Immigration,
}

impl From<PriorityArg> for PriorityGoal {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::HighRoi => PriorityGoal::HighRoi,
            PriorityArg::LowCost => PriorityGoal::LowCost,
            PriorityArg::Immigration => PriorityGoal::Immigration,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FundingArg {
    #[value(name = "self")]
    SelfFunded,
    #[value(name = "loan")]
    EducationLoan,
    Scholarship,
}

impl From<FundingArg> for FundingSource {
    fn from(value: FundingArg) -> Self {
        match value {
            FundingArg::SelfFunded => FundingSource::SelfFunded,
            FundingArg::EducationLoan => FundingSource::EducationLoan,
            FundingArg::Scholarship => FundingSource::Scholarship,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IntakeArg {
    Fall,
    Spring,
    Summer,
}

impl From<IntakeArg> for IntakeTerm {
    fn from(value: IntakeArg) -> Self {
        match value {
            IntakeArg::Fall => IntakeTerm::Fall,
            IntakeArg::Spring => IntakeTerm::Spring,
            IntakeArg::Summer => IntakeTerm::Summer,
        }
    }
}

#[derive(Debug)]
enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Validation(ValidationError),
    Transport(TransportError),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Validation(err) => write!(f, "validation error: {}", err),
            AppError::Transport(err) => write!(f, "transport error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Validation(err) => Some(err),
            AppError::Transport(err) => Some(err),
            AppError::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<TransportError> for AppError {
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or(Command::Session) {
        Command::Discover(args) => run_discover(args, &config),
        Command::Session => run_session(&config),
    }
}

fn run_discover(args: DiscoverArgs, config: &AppConfig) -> Result<(), AppError> {
    let client = HttpRecommendationClient::new(&config.service)?;
    let mut session = AdvisorSession::new(config.session.expansion_policy);

    if let Some(degree) = args.degree {
        session.update_profile(ProfileUpdate::Degree(degree.into()));
    }
    session.update_profile(ProfileUpdate::Gpa(args.gpa));
    session.update_profile(ProfileUpdate::Major(args.major));
    session.update_profile(ProfileUpdate::BudgetMax(args.budget));
    session.update_profile(ProfileUpdate::Priority(args.priority.into()));
    if let Some(funding) = args.funding {
        session.update_profile(ProfileUpdate::Funding(funding.into()));
    }
    for country in args.countries {
        session.update_profile(ProfileUpdate::ToggleCountry(country));
    }
    if let Some(intake) = args.intake {
        session.update_profile(ProfileUpdate::Intake(Some(intake.into())));
    }

    info!(endpoint = client.endpoint(), "submitting profile");
    session.submit(&client)?;
    render::render_outcome(&mut session);
    Ok(())
}

fn run_session(config: &AppConfig) -> Result<(), AppError> {
    let client = HttpRecommendationClient::new(&config.service)?;
    let mut session = AdvisorSession::new(config.session.expansion_policy);

    typewriter::play_banner();
    println!("Interactive intake session. Type 'help' for commands.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "profile" => render::print_profile(session.profile()),
            "show" => render::render_outcome(&mut session),
            "submit" => match session.validate_for_submit() {
                Err(err) => println!("Cannot submit: {err}"),
                Ok(_) => {
                    println!("Analyzing your profile...");
                    let _ = session.submit(&client);
                    render::render_outcome(&mut session);
                }
            },
            "promote" if !rest.is_empty() => match session.promote(rest) {
                Ok(()) => render::render_outcome(&mut session),
                Err(ReorderError::KeyNotFound(key)) => {
                    println!("'{key}' is not in the current results.");
                }
                Err(ReorderError::NotRanked) => {
                    println!("Bucketed results have no primary slot to promote into.");
                }
            },
            "promote" => println!("Usage: promote <country>"),
            "expand" if !rest.is_empty() => {
                session.toggle_detail(rest);
                let state = if session.is_expanded(rest) {
                    "expanded"
                } else {
                    "collapsed"
                };
                println!("{rest}: {state}");
            }
            "expand" => println!("Usage: expand <country>"),
            "set" => match rest.split_once(' ') {
                Some((field, value)) => {
                    if let Err(message) = apply_set(&mut session, field, value.trim()) {
                        println!("{message}");
                    }
                }
                None => println!("Usage: set <field> <value>"),
            },
            _ => println!("Unknown command '{input}'. Type 'help' for commands."),
        }
    }
    Ok(())
}

/// Applies one `set <field> <value>` edit. Parse failures come back as a
/// message for the prompt; the draft itself accepts any in-range value.
fn apply_set(session: &mut AdvisorSession, field: &str, value: &str) -> Result<(), String> {
    let update = match field {
        "degree" => {
            let degree = match value.to_ascii_lowercase().as_str() {
                "hs" | "high-school" => DegreeLevel::HighSchool,
                "bachelors" => DegreeLevel::Bachelors,
                "masters" => DegreeLevel::Masters,
                "none" => DegreeLevel::Unset,
                other => return Err(format!("Unknown degree '{other}'.")),
            };
            ProfileUpdate::Degree(degree)
        }
        "gpa" => ProfileUpdate::Gpa(value.to_string()),
        "major" => ProfileUpdate::Major(value.to_string()),
        "budget" => {
            let rupees: u64 = value
                .parse()
                .map_err(|_| format!("Budget must be a whole rupee amount, got '{value}'."))?;
            ProfileUpdate::BudgetMax(rupees)
        }
        "priority" => {
            let priority = match value.to_ascii_lowercase().as_str() {
                "high-roi" | "roi" => PriorityGoal::HighRoi,
                "low-cost" | "cost" => PriorityGoal::LowCost,
                "immigration" => PriorityGoal::Immigration,
                other => return Err(format!("Unknown priority '{other}'.")),
            };
            ProfileUpdate::Priority(priority)
        }
        "funding" => {
            let funding = match value.to_ascii_lowercase().as_str() {
                "self" => FundingSource::SelfFunded,
                "loan" | "education-loan" => FundingSource::EducationLoan,
                "scholarship" => FundingSource::Scholarship,
                "none" => FundingSource::Unset,
                other => return Err(format!("Unknown funding source '{other}'.")),
            };
            ProfileUpdate::Funding(funding)
        }
        "country" => ProfileUpdate::ToggleCountry(value.to_string()),
        "intake" => {
            let term = match value.to_ascii_lowercase().as_str() {
                "fall" => Some(IntakeTerm::Fall),
                "spring" => Some(IntakeTerm::Spring),
                "summer" => Some(IntakeTerm::Summer),
                "none" => None,
                other => return Err(format!("Unknown intake term '{other}'.")),
            };
            ProfileUpdate::Intake(term)
        }
        other => return Err(format!("Unknown field '{other}'.")),
    };
    session.update_profile(update);
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  set <field> <value>   edit the draft (degree, gpa, major, budget,");
    println!("                        priority, funding, country, intake)");
    println!("  profile               show the current draft");
    println!("  submit                send the profile to the recommendation service");
    println!("  show                  re-print the latest results");
    println!("  promote <country>     make an alternative the primary recommendation");
    println!("  expand <country>      toggle the detail view for one pathway");
    println!("  quit                  end the session");
}
