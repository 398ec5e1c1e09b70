//! rps-referee - rock-paper-scissors referee for hand-landmark trackers.
//!
//! Reads landmark lists as s-expressions and prints gestures and verdicts
//! as s-expressions. `serve` keeps a request loop open on stdin/stdout for
//! a tracker or UI process.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use rps_referee::gesture::classifier::DEFAULT_ANGLE_THRESHOLD;
use rps_referee::ipc::{self, sexp};
use rps_referee::{
    AnglePolicy, ClassifierConfig, FingerThresholds, JudgeConfig, Locale, MatchPolicy, Referee,
};

#[derive(Parser, Debug)]
#[command(name = "rps-referee", about = "Rock-paper-scissors gesture referee")]
struct Cli {
    /// Finger angle policy
    #[arg(long, value_enum, default_value_t = PolicyArg::Single)]
    policy: PolicyArg,

    /// Global extension threshold in degrees (single policy only, default 130)
    #[arg(long, conflicts_with = "finger_thresholds")]
    threshold: Option<f32>,

    /// Per-finger thresholds in degrees as T,I,M,R,P (per-finger policy only,
    /// default 120,140,140,135,130)
    #[arg(long, value_name = "T,I,M,R,P")]
    finger_thresholds: Option<FingerThresholds>,

    /// Enable fuzzy gesture matching
    #[arg(long)]
    fuzzy: bool,

    /// Print per-finger angle reports to stderr
    #[arg(long)]
    debug: bool,

    /// Message language: en or zh-tw
    #[arg(long, default_value = "en")]
    locale: Locale,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// One threshold, one joint triple per finger
    Single,
    /// Per-finger thresholds, two joint triples per finger
    PerFinger,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Judge two gesture labels
    Judge { left: String, right: String },
    /// Classify one hand: a list of 21 (x y) points, from a file or `-`
    Classify { input: PathBuf },
    /// Classify and judge two hands: (:left (...) :right (...))
    Round { input: PathBuf },
    /// Answer s-expression requests on stdin, one per line
    Serve,
}

impl Cli {
    fn classifier_config(&self) -> anyhow::Result<ClassifierConfig> {
        let angle_policy = match self.policy {
            PolicyArg::Single => {
                if self.finger_thresholds.is_some() {
                    bail!("--finger-thresholds requires --policy per-finger");
                }
                AnglePolicy::SingleThreshold {
                    threshold_deg: self.threshold.unwrap_or(DEFAULT_ANGLE_THRESHOLD),
                }
            }
            PolicyArg::PerFinger => {
                if self.threshold.is_some() {
                    bail!("--threshold requires --policy single; use --finger-thresholds");
                }
                AnglePolicy::PerFinger(self.finger_thresholds.unwrap_or_default())
            }
        };
        Ok(ClassifierConfig {
            angle_policy,
            matching: if self.fuzzy {
                MatchPolicy::Fuzzy
            } else {
                MatchPolicy::Exact
            },
            debug: self.debug,
            locale: self.locale,
        })
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))
    }
}

fn parse_input(path: &Path) -> anyhow::Result<lexpr::Value> {
    let raw = read_input(path)?;
    lexpr::from_str(&raw).with_context(|| format!("malformed s-expression in {:?}", path))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries responses only
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rps_referee=info".into()),
        )
        .init();

    let referee = Referee::new(
        cli.classifier_config()?,
        JudgeConfig { locale: cli.locale },
    );
    info!(
        "rps-referee v{} policy={} matching={}",
        env!("CARGO_PKG_VERSION"),
        referee.classifier().config().angle_policy.as_str(),
        referee.classifier().config().matching.as_str(),
    );

    match &cli.command {
        Command::Judge { left, right } => {
            println!("{}", ipc::dispatch::format_verdict(&referee, left, right));
        }
        Command::Classify { input } => {
            let value = parse_input(input)?;
            let joints = sexp::parse_landmarks(&value)?;
            let result = referee.classifier().classify(&joints)?;
            if let Some(report) = referee.classifier().debug_report(&result) {
                eprintln!("{report}");
            }
            println!("{}", sexp::classification_sexp(&result));
        }
        Command::Round { input } => {
            let value = parse_input(input)?;
            let left = sexp::get_landmarks(&value, "left")?;
            let right = sexp::get_landmarks(&value, "right")?;
            let round = referee.play(&left, &right)?;
            for side in [&round.left, &round.right] {
                if let Some(report) = referee.classifier().debug_report(side) {
                    eprintln!("{report}");
                }
            }
            println!("{}", sexp::round_sexp(&round));
        }
        Command::Serve => {
            info!("serving requests on stdin");
            let stdin = io::stdin();
            ipc::serve(&referee, stdin.lock(), io::stdout().lock())
                .context("request loop failed")?;
        }
    }

    Ok(())
}
