use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use gaussquad::configuration::{
    Configuration,
    ConfigurationError,
    ScanCase
};
use gaussquad::convergence::convergencescan::ScanSettings;
use gaussquad::convergence::integrand::{
    Integrand,
    ReferenceValue
};
use gaussquad::quadrature::legendre::legendre_rule;
use gaussquad::quadrature::quadratureerror::QuadratureError;

/// Gauss-Legendre convergence scans against a high-precision reference.
#[derive(Parser, Debug)]
#[command(name = "gaussquad", version, about)]
struct Cli {
    /// JSON file listing the scan cases to run
    #[arg(long, conflicts_with_all = ["integrand", "lower", "upper", "rule"])]
    config: Option<PathBuf>,

    /// sextic-minus-sine, sextic-plus-sine, square or polynomial:c0,c1,...
    #[arg(long, default_value = "sextic-minus-sine")]
    integrand: Integrand,

    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    lower: f64,

    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    upper: f64,

    #[arg(long, default_value_t = 1)]
    min_points: usize,

    #[arg(long, default_value_t = 20)]
    max_points: usize,

    #[arg(long, default_value_t = 1e-12)]
    tolerance: f64,

    /// "adaptive" or an exact numeric value
    #[arg(long, default_value = "adaptive", allow_negative_numbers = true)]
    reference: ReferenceValue,

    /// Print the nodes and weights of the n-point rule on [-1, 1] and exit
    #[arg(long)]
    rule: Option<usize>,
}

fn print_rule(n: usize) -> Result<(), QuadratureError> {
    let rule = legendre_rule(n)?;
    for (i, point) in rule.iter().enumerate() {
        println!("{:3}  x={:+.17}  w={:.17}", i, point.node(), point.weight());
    }
    println!("sum of weights = {:.17}", rule.weight_sum());
    Ok(())
}

fn build_configuration(cli: &Cli) -> Result<Configuration, ConfigurationError> {
    if let Some(path) = &cli.config {
        return Configuration::from_reader(path);
    }
    let settings = ScanSettings::new(cli.min_points, cli.max_points, cli.tolerance)
        .map_err(|source| ConfigurationError::InvalidCase { name: "command line".to_owned(), source })?;
    let case = ScanCase::new(
        cli.integrand.label(),
        cli.integrand.clone(),
        cli.lower,
        cli.upper,
        cli.reference,
        settings,
    )?;
    let mut configuration = Configuration::new();
    configuration.push(case);
    Ok(configuration)
}

fn run(cli: &Cli) -> Result<(), ConfigurationError> {
    let configuration = build_configuration(cli)?;
    for case in configuration.cases() {
        let report = case
            .run()
            .map_err(|source| ConfigurationError::InvalidCase { name: case.name().to_owned(), source })?;
        println!("# {}: {} over [{}, {}]", case.name(), case.integrand(), case.lower(), case.upper());
        println!("{}", report);
        println!();
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result: Result<(), Box<dyn Error>> = match cli.rule {
        Some(n) => print_rule(n).map_err(Box::from),
        None => run(&cli).map_err(Box::from),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
