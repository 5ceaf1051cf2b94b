use clap::{ArgAction, Args, Parser, ValueEnum};
use std::path::PathBuf;

const AUTHORS: &str = "The virial developers";
const ABOUT: &str = "A command-line tool for computing virial coefficients of Lennard-Jones type \
                     fluids by adaptive quadrature.";
const LICENSE: &str = "Licensed under the MIT License.";
const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser)]
#[command(
    author = AUTHORS,
    version,
    about = ABOUT,
    after_help = LICENSE,
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Coefficients to compute. May be repeated.
    ///
    /// If not specified, all coefficients are computed.
    #[arg(short, long, value_enum, value_name = "KIND")]
    pub coefficient: Vec<Coefficient>,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    ///
    /// The RUST_LOG environment variable takes precedence when set.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub model: ModelOptions,

    #[command(flatten)]
    pub quadrature: QuadratureOptions,
}

/// Options for controlling the output format and destination.
#[derive(Args)]
#[command(next_help_heading = "Output Options")]
pub struct OutputOptions {
    /// Output file path.
    ///
    /// If not specified, results are written to standard output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format for the results.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Number of decimal places to display for floating-point values.
    #[arg(short, long, default_value_t = 8)]
    pub precision: usize,
}

/// Options describing the model fluid.
#[derive(Args)]
#[command(next_help_heading = "Model Options")]
pub struct ModelOptions {
    /// Custom parameters file in TOML format.
    ///
    /// If not specified, built-in default parameters are used (Lennard-Jones with
    /// epsilon = sigma = kT = 1).
    #[arg(short = 'P', long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Override the potential's energy scale.
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Override the potential's length scale.
    #[arg(long)]
    pub sigma: Option<f64>,

    /// Override the reduced temperature kT.
    #[arg(short = 'T', long)]
    pub temperature: Option<f64>,
}

/// Options for controlling the adaptive integrator.
#[derive(Args)]
#[command(next_help_heading = "Quadrature Options")]
pub struct QuadratureOptions {
    /// Requested absolute accuracy of every integration.
    #[arg(long, default_value_t = 1.49e-8)]
    pub epsabs: f64,

    /// Requested relative accuracy of every integration.
    #[arg(long, default_value_t = 1.49e-8)]
    pub epsrel: f64,

    /// Maximum number of subintervals per integration.
    ///
    /// For the double integral the limit applies to the outer integration and to each inner one.
    #[arg(long, default_value_t = 50)]
    pub limit: usize,
}

/// A coefficient the tool can compute.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Coefficient {
    /// The third-virial-like coefficient by double quadrature.
    Third,
    /// The same coefficient from the exact single radial integral.
    Reduced,
    /// The second virial coefficient B2.
    Second,
    /// The Kirkwood-Buff integral G at infinite dilution.
    KirkwoodBuff,
}

/// Output format for the calculation results.
#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed tables with the model, the coefficients, and the integration diagnostics.
    Pretty,
    /// Comma-separated values with columns: coefficient, value, integral, abs_error, warnings.
    Csv,
    /// JSON object containing the model, the options, and every result.
    Json,
}
