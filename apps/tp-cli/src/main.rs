mod error;
mod mixture_file;

use clap::{Args, Parser, Subcommand};
use error::{CliError, CliResult};
use mixture_file::MixtureFile;
use std::path::PathBuf;
use std::process::ExitCode;
use tp_core::units::{k, pa};
use tp_fluids::{
    CoolPropOracle, Mixture, MixtureModel, Param, PathRequest, PointInput, ProcessPathResult,
    ProcessType, PropertyOracle, PropertyResult, Quantity, SampleSpacing, SaturationType, mixture, point,
    process, saturation,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tp-cli")]
#[command(about = "ThermoProp CLI - Thermophysical property calculator", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// All properties of a pure fluid at one state
    Point {
        /// Fluid name (e.g., Water, Nitrogen, R134a)
        fluid: String,
        /// First input property (T, P, D, H, S, U, Q)
        input1: Param,
        #[arg(allow_hyphen_values = true)]
        value1: f64,
        /// Unit of the first value ("" for SI)
        unit1: String,
        /// Second input property
        input2: Param,
        #[arg(allow_hyphen_values = true)]
        value2: f64,
        /// Unit of the second value ("" for SI)
        unit2: String,
    },
    /// Saturated liquid and vapor properties
    Saturation {
        fluid: String,
        /// Saturation type: T or P
        sat_type: SaturationType,
        #[arg(allow_hyphen_values = true)]
        value: f64,
        unit: String,
        /// Also sample the saturation curve around this state (N points)
        #[arg(long, num_args = 0..=1, default_missing_value = tp_fluids::DEFAULT_CURVE_POINTS.to_string())]
        curve: Option<usize>,
    },
    /// Mixture properties by mixing rules
    Mixture(MixtureArgs),
    /// Simulate a process path
    Path(PathArgs),
    /// Convert a temperature or pressure between units
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: f64,
        from: String,
        to: String,
        /// temperature or pressure
        quantity: Quantity,
    },
    /// List available fluids and predefined mixtures
    Fluids {
        /// Only show fluids matching this text
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Args)]
struct MixtureArgs {
    /// Mixing model ("Ideal Gas" or "Humid Air")
    #[arg(long)]
    model: Option<MixtureModel>,
    /// Temperature with unit, e.g. "25 C"
    #[arg(long, allow_hyphen_values = true)]
    temperature: String,
    /// Pressure with unit, e.g. "1 bar"
    #[arg(long)]
    pressure: String,
    /// Component as name=mole_fraction (repeatable)
    #[arg(long = "component", value_parser = parse_component, conflicts_with_all = ["preset", "file"])]
    components: Vec<(String, f64)>,
    /// Predefined mixture (e.g., "Air")
    #[arg(long, conflicts_with = "file")]
    preset: Option<String>,
    /// YAML mixture definition
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct PathArgs {
    fluid: String,
    process: ProcessType,
    /// Initial temperature with unit, e.g. "25 C"
    #[arg(long, allow_hyphen_values = true)]
    t0: String,
    /// Initial pressure with unit, e.g. "1 atm"
    #[arg(long)]
    p0: String,
    /// Final value of the swept variable (K for T sweeps, Pa for P sweeps)
    #[arg(long = "final", allow_hyphen_values = true)]
    final_value: f64,
    /// Unit of the final value
    #[arg(long)]
    final_unit: Option<String>,
    #[arg(long, default_value_t = tp_fluids::DEFAULT_NUM_POINTS)]
    points: usize,
    /// Polytropic exponent
    #[arg(long, default_value_t = tp_fluids::DEFAULT_POLYTROPIC_N)]
    n: f64,
    /// Logarithmic spacing of the swept variable
    #[arg(long)]
    log: bool,
    /// Evaluate samples in parallel
    #[arg(long)]
    parallel: bool,
}

fn parse_component(text: &str) -> Result<(String, f64), String> {
    let (name, fraction) = text
        .split_once('=')
        .ok_or_else(|| format!("expected name=fraction, got '{}'", text))?;
    let fraction = fraction
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid fraction '{}': {}", fraction.trim(), e))?;
    Ok((name.trim().to_string(), fraction))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let oracle = CoolPropOracle::new();
    tracing::debug!(backend = oracle.name(), "property oracle ready");

    let result = match cli.command {
        Commands::Point {
            fluid,
            input1,
            value1,
            unit1,
            input2,
            value2,
            unit2,
        } => cmd_point(
            &oracle,
            &fluid,
            PointInput::new(input1, value1, unit1),
            PointInput::new(input2, value2, unit2),
            cli.json,
        ),
        Commands::Saturation {
            fluid,
            sat_type,
            value,
            unit,
            curve,
        } => cmd_saturation(&oracle, &fluid, sat_type, value, &unit, curve, cli.json),
        Commands::Mixture(args) => cmd_mixture(&oracle, args, cli.json),
        Commands::Path(args) => cmd_path(&oracle, args, cli.json),
        Commands::Convert {
            value,
            from,
            to,
            quantity,
        } => cmd_convert(value, &from, &to, quantity, cli.json),
        Commands::Fluids { search } => cmd_fluids(&oracle, search.as_deref(), cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn cmd_point(
    oracle: &CoolPropOracle,
    fluid: &str,
    input1: PointInput,
    input2: PointInput,
    json: bool,
) -> CliResult<()> {
    let result = point::compute(oracle, fluid, &input1, &input2)?;
    if json {
        return print_json(&result);
    }
    println!(
        "{} at {}={} {}, {}={} {}",
        fluid, input1.param, input1.value, input1.unit, input2.param, input2.value, input2.unit
    );
    print_properties(&result);
    Ok(())
}

fn cmd_saturation(
    oracle: &CoolPropOracle,
    fluid: &str,
    sat_type: SaturationType,
    value: f64,
    unit: &str,
    curve_points: Option<usize>,
    json: bool,
) -> CliResult<()> {
    let result = saturation::compute(oracle, fluid, sat_type, value, unit)?;
    let curve = curve_points
        .map(|n| saturation::curve(oracle, fluid, sat_type, value, unit, n))
        .transpose()?;

    if json {
        return match &curve {
            Some(curve) => print_json(&serde_json::json!({
                "properties": result,
                "curve": curve,
            })),
            None => print_json(&result),
        };
    }
    println!("Saturation properties of {} ({}={} {})", fluid, sat_type, value, unit);
    print_properties(&result.to_property_result());
    if let Some(curve) = curve {
        println!("\nSaturation curve ({} points, {} unresolved):", curve.len(), curve.failed_points());
        println!("  {:>15}  {:>15}", "T [K]", "P [Pa]");
        for (t, p) in curve.temperature.iter().zip(&curve.pressure) {
            println!("  {:>15.6e}  {:>15.6e}", t, p);
        }
    }
    Ok(())
}

fn cmd_mixture(oracle: &CoolPropOracle, args: MixtureArgs, json: bool) -> CliResult<()> {
    let t = tp_fluids::parse_quantity(&args.temperature, Quantity::Temperature)?;
    let p = tp_fluids::parse_quantity(&args.pressure, Quantity::Pressure)?;

    let (mix, file_model) = if let Some(path) = &args.file {
        let file = MixtureFile::load(path)?;
        (file.to_mixture(oracle)?, file.model()?)
    } else if let Some(preset) = &args.preset {
        (tp_fluids::predefined_mixture(preset, oracle)?, None)
    } else if !args.components.is_empty() {
        let mut mix: Mixture = args
            .components
            .iter()
            .map(|(name, x)| tp_fluids::Component::new(name.as_str(), *x, 0.0, oracle))
            .collect();
        mix.mass_fractions_from_moles()?;
        (mix, None)
    } else {
        return Err(CliError::InvalidInput(
            "give --component, --preset or --file".to_string(),
        ));
    };
    let model = args
        .model
        .or(file_model)
        .unwrap_or(MixtureModel::IdealGasMixing);

    let outcome = mixture::compute_with_outcome(oracle, mix.components(), k(t), pa(p), model)?;

    if json {
        let value = serde_json::json!({
            "model": outcome.model.label(),
            "fallback_reason": outcome.fallback_reason,
            "composition": mix
                .iter()
                .map(|c| serde_json::json!({
                    "name": c.name,
                    "mole_fraction": c.mole_fraction,
                    "mass_fraction": c.mass_fraction,
                }))
                .collect::<Vec<_>>(),
            "properties": outcome.properties,
        });
        return print_json(&value);
    }

    println!("Composition:");
    for c in &mix {
        println!("  {}", c);
    }
    if let Some(reason) = &outcome.fallback_reason {
        println!(
            "Note: {} model failed ({}); showing {} results",
            outcome.requested, reason, outcome.model
        );
    }
    println!("Model: {}", outcome.model);
    print_properties(&outcome.properties);
    Ok(())
}

fn cmd_path(oracle: &CoolPropOracle, args: PathArgs, json: bool) -> CliResult<()> {
    let t0 = tp_fluids::parse_quantity(&args.t0, Quantity::Temperature)?;
    let p0 = tp_fluids::parse_quantity(&args.p0, Quantity::Pressure)?;
    let final_value = match &args.final_unit {
        Some(unit) => {
            let quantity = args
                .process
                .swept()
                .quantity()
                .ok_or_else(|| CliError::InvalidInput("swept variable has no unit".to_string()))?;
            tp_fluids::to_si(args.final_value, unit, quantity)?
        }
        None => args.final_value,
    };

    let spacing = if args.log {
        SampleSpacing::Logarithmic
    } else {
        SampleSpacing::Linear
    };
    let request = PathRequest::new(&args.fluid, args.process, k(t0), pa(p0), final_value)
        .with_points(args.points)
        .with_polytropic_n(args.n)
        .with_spacing(spacing);

    let path = if args.parallel {
        process::simulate_par(oracle, &request)?
    } else {
        process::simulate(oracle, &request)?
    };

    if path.failed_samples() > 0 {
        tracing::warn!(
            failed = path.failed_samples(),
            total = path.len(),
            "some path samples could not be resolved"
        );
    }
    if json {
        return print_json(&path);
    }
    println!(
        "{} {} path, {} points ({} failed)",
        request.fluid,
        request.process,
        path.len(),
        path.failed_samples()
    );
    print_path(&path);
    Ok(())
}

fn cmd_convert(value: f64, from: &str, to: &str, quantity: Quantity, json: bool) -> CliResult<()> {
    let si = tp_fluids::to_si(value, from, quantity)?;
    let converted = tp_fluids::from_si(si, to, quantity)?;
    if json {
        return print_json(&serde_json::json!({
            "quantity": quantity,
            "value": converted,
            "unit": to,
        }));
    }
    println!("{} {} = {} {}", value, from, converted, to);
    Ok(())
}

fn cmd_fluids(oracle: &CoolPropOracle, search: Option<&str>, json: bool) -> CliResult<()> {
    let fluids = match search {
        Some(query) => tp_fluids::search_fluids(query, oracle),
        None => tp_fluids::available_fluids(oracle),
    };
    let presets: Vec<&str> = tp_fluids::predefined_mixture_names().collect();

    if json {
        return print_json(&serde_json::json!({
            "fluids": fluids,
            "predefined_mixtures": presets,
        }));
    }
    if fluids.is_empty() {
        println!("No fluids found");
    } else {
        println!("Fluids:");
        for name in fluids {
            println!("  {}", name);
        }
    }
    println!("\nPredefined mixtures:");
    for name in presets {
        println!("  {}", name);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_properties(result: &PropertyResult) {
    let width = result.names().map(str::len).max().unwrap_or(0);
    for entry in result.iter() {
        println!("  {:<width$}  {} {}", entry.name, entry.value, entry.unit);
    }
}

fn print_path(path: &ProcessPathResult) {
    print!("{:>5}", "#");
    for name in ProcessPathResult::SERIES {
        print!("  {:>15}", name);
    }
    println!("  {:>12}", "Phase");

    for i in 0..path.len() {
        print!("{:>5}", i);
        for name in ProcessPathResult::SERIES {
            let value = path.series(name).and_then(|s| s.get(i)).copied().unwrap_or(f64::NAN);
            print!("  {:>15.6e}", value);
        }
        println!("  {:>12}", path.phase[i].label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn component_argument() {
        assert_eq!(
            parse_component("Nitrogen=0.79"),
            Ok(("Nitrogen".to_string(), 0.79))
        );
        assert!(parse_component("Nitrogen").is_err());
        assert!(parse_component("Nitrogen=lots").is_err());
    }

    #[test]
    fn path_arguments() {
        let cli = Cli::try_parse_from([
            "tp-cli", "path", "Water", "Isobaric", "--t0", "25 C", "--p0", "1 atm", "--final",
            "373.15", "--points", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Path(args) => {
                assert_eq!(args.process, ProcessType::Isobaric);
                assert_eq!(args.points, 10);
                assert_eq!(args.n, tp_fluids::DEFAULT_POLYTROPIC_N);
                assert!(!args.log);
            }
            _ => panic!("expected path command"),
        }
    }

    #[test]
    fn saturation_curve_flag() {
        let cli = Cli::try_parse_from(["tp-cli", "saturation", "Water", "T", "100", "C", "--curve"])
            .unwrap();
        match cli.command {
            Commands::Saturation { curve, .. } => assert_eq!(curve, Some(tp_fluids::DEFAULT_CURVE_POINTS)),
            _ => panic!("expected saturation command"),
        }

        let cli = Cli::try_parse_from(["tp-cli", "saturation", "Water", "P", "1", "bar"]).unwrap();
        match cli.command {
            Commands::Saturation { curve, .. } => assert_eq!(curve, None),
            _ => panic!("expected saturation command"),
        }
    }

    #[test]
    fn custom_process_is_rejected_by_parser() {
        let result = Cli::try_parse_from([
            "tp-cli", "path", "Water", "Custom", "--t0", "300 K", "--p0", "1 bar", "--final", "400",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn point_accepts_negative_celsius() {
        let cli = Cli::try_parse_from([
            "tp-cli", "--json", "point", "R134a", "T", "-10", "°C", "Q", "1", "",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Point { input1, value1, input2, .. } => {
                assert_eq!(input1, Param::Temperature);
                assert_eq!(value1, -10.0);
                assert_eq!(input2, Param::Quality);
            }
            _ => panic!("expected point command"),
        }
    }
}
