use super::cli::OutputFormat;
use super::error::CliError;
use prettytable::*;
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use virial::{
    KirkwoodBuffResult, Parameters, Potential, QuadratureOptions, QuadratureWarning,
    ReducedThirdVirialResult, SecondVirialResult, ThirdVirialResult,
};

/// Everything computed in one run, in the shape written to JSON.
#[derive(Serialize)]
pub struct Report {
    pub parameters: Parameters,
    pub options: QuadratureOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third: Option<ThirdVirialResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduced_third: Option<ReducedThirdVirialResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<SecondVirialResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kirkwood_buff: Option<KirkwoodBuffResult>,
}

impl Report {
    pub fn new(parameters: Parameters, options: QuadratureOptions) -> Self {
        Self {
            parameters,
            options,
            third: None,
            reduced_third: None,
            second: None,
            kirkwood_buff: None,
        }
    }

    /// One summary line per computed coefficient: name, value, integral, error, warnings.
    fn rows(&self) -> Vec<(&'static str, f64, f64, f64, Vec<QuadratureWarning>)> {
        let mut rows = Vec::new();
        if let Some(third) = &self.third {
            rows.push((
                "third",
                third.coefficient,
                third.integral,
                third.abs_error,
                third.quadrature.warnings(),
            ));
        }
        if let Some(reduced) = &self.reduced_third {
            rows.push((
                "reduced-third",
                reduced.coefficient,
                reduced.integral,
                reduced.abs_error,
                reduced.quadrature.warning.into_iter().collect(),
            ));
        }
        if let Some(second) = &self.second {
            rows.push((
                "second",
                second.coefficient,
                second.integral,
                second.abs_error,
                second.quadrature.warning.into_iter().collect(),
            ));
        }
        if let Some(kirkwood_buff) = &self.kirkwood_buff {
            rows.push((
                "kirkwood-buff",
                kirkwood_buff.value,
                kirkwood_buff.integral,
                kirkwood_buff.abs_error,
                kirkwood_buff.quadrature.warning.into_iter().collect(),
            ));
        }
        rows
    }
}

pub fn get_writer(output_path: &Option<PathBuf>) -> Result<Box<dyn Write>, CliError> {
    match output_path {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| CliError::Io {
                path: path.clone(),
                source: e,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

pub fn write_results(
    mut writer: Box<dyn Write>,
    report: &Report,
    format: &OutputFormat,
    precision: usize,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Pretty => write_pretty_table(&mut writer, report, precision)?,
        OutputFormat::Csv => write_csv(&mut writer, report, precision)?,
        OutputFormat::Json => write_json(&mut writer, report)?,
    }
    writer.flush()?;
    Ok(())
}

fn write_pretty_table(
    writer: &mut dyn Write,
    report: &Report,
    precision: usize,
) -> Result<(), CliError> {
    let box_format = format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(
            &[format::LinePosition::Top],
            format::LineSeparator::new('─', '┬', '╭', '╮'),
        )
        .separators(
            &[format::LinePosition::Title],
            format::LineSeparator::new('═', '╪', '╞', '╡'),
        )
        .separators(
            &[format::LinePosition::Intern],
            format::LineSeparator::new('─', '┼', '├', '┤'),
        )
        .separators(
            &[format::LinePosition::Bottom],
            format::LineSeparator::new('─', '┴', '╰', '╯'),
        )
        .padding(1, 1)
        .build();

    let no_intern_format = format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(
            &[format::LinePosition::Top],
            format::LineSeparator::new('─', '┬', '╭', '╮'),
        )
        .separators(
            &[format::LinePosition::Bottom],
            format::LineSeparator::new('─', '┴', '╰', '╯'),
        )
        .padding(1, 1)
        .build();

    let params = &report.parameters;
    let options = &report.options;

    let mut title_table = Table::new();
    title_table.set_format(box_format);
    title_table.add_row(row![bc->"Virial Coefficient Results"]);
    title_table.print(writer)?;
    writeln!(writer)?;

    let mut summary_table = Table::new();
    summary_table.set_format(no_intern_format);
    summary_table.add_row(row![b->"Potential:", params.potential.name()]);
    summary_table.add_row(row![b->"Epsilon:", params.potential.epsilon()]);
    summary_table.add_row(row![b->"Sigma:", params.potential.sigma()]);
    if let Potential::Wca(wca) = params.potential {
        summary_table.add_row(row![b->"Exponents (m, n):", format!("{}, {}", wca.m, wca.n)]);
    }
    summary_table.add_row(row![b->"Temperature (kT):", params.temperature]);
    let tolerances = format!(
        "epsabs = {:.2e}, epsrel = {:.2e}",
        options.abs_tolerance, options.rel_tolerance
    );
    summary_table.add_row(row![b->"Tolerances:", tolerances]);
    summary_table.add_row(row![b->"Subdivision Limit:", options.max_subdivisions]);
    summary_table.print(writer)?;
    writeln!(writer)?;

    let mut data_table = Table::new();
    data_table.set_format(box_format);
    data_table.set_titles(
        row![bc->"Coefficient", bc->"Value", bc->"Integral", bc->"Abs. Error", bc->"Status"],
    );
    for (name, value, integral, abs_error, warnings) in report.rows() {
        let status = if warnings.is_empty() {
            "converged".to_string()
        } else {
            join_warnings(&warnings, ", ")
        };
        data_table.add_row(row![
            l->name,
            r->format!("{:.prec$}", value, prec = precision),
            r->format!("{:.prec$}", integral, prec = precision),
            r->format!("{:.3e}", abs_error),
            l->status
        ]);
    }
    data_table.print(writer)?;

    if let Some(third) = &report.third {
        let quadrature = &third.quadrature;
        writeln!(writer)?;
        let mut diagnostics = Table::new();
        diagnostics.set_format(no_intern_format);
        diagnostics.add_row(row![b->"Outer Subintervals:", quadrature.outer.subintervals]);
        diagnostics.add_row(row![b->"Inner Integrations:", quadrature.inner_integrations]);
        diagnostics.add_row(row![b->"Integrand Evaluations:", quadrature.inner_evaluations]);
        for (warning, count) in &quadrature.inner_warnings {
            diagnostics.add_row(row![b->format!("Inner '{}':", warning.as_str()), count]);
        }
        diagnostics.print(writer)?;

        for warning in quadrature.warnings() {
            writeln!(writer, "warning: {}", warning)?;
        }
    }

    Ok(())
}

fn write_csv(writer: &mut dyn Write, report: &Report, precision: usize) -> Result<(), CliError> {
    writeln!(writer, "coefficient,value,integral,abs_error,warnings")?;
    for (name, value, integral, abs_error, warnings) in report.rows() {
        writeln!(
            writer,
            "{},{:.*},{:.*},{:e},{}",
            name,
            precision,
            value,
            precision,
            integral,
            abs_error,
            join_warnings(&warnings, ";")
        )?;
    }
    Ok(())
}

fn write_json(writer: &mut dyn Write, report: &Report) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

fn join_warnings(warnings: &[QuadratureWarning], separator: &str) -> String {
    warnings
        .iter()
        .map(QuadratureWarning::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}
