use super::cli::{Cli, Coefficient};
use super::error::CliError;
use super::io::{self, Report};
use indicatif::{ProgressBar, ProgressStyle};
use virial::{Parameters, QuadratureOptions, VirialCalculator, get_default_parameters};

pub fn run(args: Cli) -> Result<(), CliError> {
    let params = load_parameters(&args)?;

    let options = QuadratureOptions {
        abs_tolerance: args.quadrature.epsabs,
        rel_tolerance: args.quadrature.epsrel,
        max_subdivisions: args.quadrature.limit,
    };
    let calculator = VirialCalculator::new(&params).with_options(options);

    let mut coefficients = if args.coefficient.is_empty() {
        vec![
            Coefficient::Third,
            Coefficient::Reduced,
            Coefficient::Second,
            Coefficient::KirkwoodBuff,
        ]
    } else {
        args.coefficient.clone()
    };
    coefficients.sort();
    coefficients.dedup();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut report = Report::new(params, options);
    for coefficient in coefficients {
        match coefficient {
            Coefficient::Third => {
                pb.set_message("Integrating the third virial double integral...");
                report.third = Some(calculator.third_coefficient()?);
            }
            Coefficient::Reduced => {
                pb.set_message("Integrating the reduced radial integral...");
                report.reduced_third = Some(calculator.reduced_third_coefficient()?);
            }
            Coefficient::Second => {
                pb.set_message("Integrating the second virial coefficient...");
                report.second = Some(calculator.second_coefficient()?);
            }
            Coefficient::KirkwoodBuff => {
                pb.set_message("Integrating the Kirkwood-Buff integral...");
                report.kirkwood_buff = Some(calculator.kirkwood_buff_integral()?);
            }
        }
    }

    pb.finish_and_clear();

    let writer = io::get_writer(&args.output.output)?;
    io::write_results(writer, &report, &args.output.format, args.output.precision)?;

    Ok(())
}

fn load_parameters(args: &Cli) -> Result<Parameters, CliError> {
    let mut params = match &args.model.params {
        Some(path) => Parameters::load_from_file(path)?,
        None => *get_default_parameters(),
    };

    if let Some(epsilon) = args.model.epsilon {
        params.potential = params.potential.with_epsilon(epsilon);
    }
    if let Some(sigma) = args.model.sigma {
        params.potential = params.potential.with_sigma(sigma);
    }
    if let Some(temperature) = args.model.temperature {
        params.temperature = temperature;
    }
    params.validate()?;

    Ok(params)
}
