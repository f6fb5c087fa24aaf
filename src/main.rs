//! Ohmkit - electronics calculators on the command line
//!
//! # Usage
//!
//! ```bash
//! ohmkit series 100 220 4.7k --voltage 12
//! ohmkit ohms --v 10 --i 2
//! ohmkit rc-charge --vin 5 --r 10k --c 100u --target 3.16 --curve
//! ```

use std::io;
use std::process::ExitCode;

use clap::{Args as ClapArgs, Parser, Subcommand};
use ohmkit::{
    error::Result,
    session::RcSubMode,
    solvers::{
        color_code::parse_bands, BandCount, ChargeSolution, DividerField, OhmsField, RcField,
        ResistorList, SourceKind,
    },
    units::{format_number, format_with_unit_styled, parse_value},
    CalcConfig, CalcError, CalculationMode, Outcome, ScaledValue, Workbench,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Electronics calculators: resistor networks, dividers, Ohm's law, RC, batteries and colour codes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resistors in series
    Series(NetworkArgs),
    /// Resistors in parallel
    Parallel(NetworkArgs),
    /// Two-resistor voltage divider; give exactly three values
    Divider {
        #[arg(long, value_parser = parse_quantity)]
        vin: Option<f64>,
        #[arg(long, value_parser = parse_quantity)]
        ra: Option<f64>,
        #[arg(long, value_parser = parse_quantity)]
        rb: Option<f64>,
        #[arg(long, value_parser = parse_quantity)]
        vout: Option<f64>,
    },
    /// Ohm's law; give exactly two of voltage, current, resistance and power
    Ohms {
        #[arg(long, value_parser = parse_quantity)]
        v: Option<f64>,
        #[arg(long, value_parser = parse_quantity)]
        i: Option<f64>,
        #[arg(long, value_parser = parse_quantity)]
        r: Option<f64>,
        #[arg(long, value_parser = parse_quantity)]
        p: Option<f64>,
    },
    /// LED series resistor
    Led {
        /// Supply voltage (V)
        #[arg(long, value_parser = parse_quantity)]
        supply: f64,
        /// LED forward voltage (V)
        #[arg(long, value_parser = parse_quantity)]
        forward: f64,
        /// LED current (mA)
        #[arg(long, value_parser = parse_quantity)]
        current: f64,
    },
    /// RC filter; give exactly two of resistance, capacitance and cutoff frequency
    RcFilter {
        #[arg(long, value_parser = parse_quantity)]
        r: Option<f64>,
        #[arg(long, value_parser = parse_quantity)]
        c: Option<f64>,
        #[arg(long, value_parser = parse_quantity)]
        f: Option<f64>,
    },
    /// RC capacitor charging
    RcCharge {
        #[arg(long, value_parser = parse_quantity)]
        vin: f64,
        #[arg(long, value_parser = parse_quantity)]
        r: f64,
        #[arg(long, value_parser = parse_quantity)]
        c: f64,
        /// Threshold voltage to solve the charging time for
        #[arg(long, value_parser = parse_quantity)]
        target: Option<f64>,
        /// Elapsed time to solve the capacitor voltage for (takes precedence)
        #[arg(long, value_parser = parse_quantity)]
        time: Option<f64>,
        /// Print the sampled charging curve
        #[arg(long)]
        curve: bool,
    },
    /// Battery runtime
    Battery {
        /// Capacity (mAh)
        #[arg(long, value_parser = parse_quantity)]
        capacity: f64,
        /// Load current (mA)
        #[arg(long, value_parser = parse_quantity)]
        current: f64,
        /// Derating factor (0.5 to 1.0)
        #[arg(long, default_value_t = 0.85)]
        efficiency: f64,
    },
    /// Decode a 4- or 5-band resistor colour code
    Color {
        /// Band colours in order, e.g. `brown black red gold`
        #[arg(required = true, num_args = 4..=5)]
        bands: Vec<String>,
        /// Reject colours that do not fit their band
        #[arg(long)]
        strict: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct NetworkArgs {
    /// Resistor values in ohms (SI suffixes allowed, e.g. 4.7k)
    #[arg(required = true, value_parser = parse_quantity)]
    resistors: Vec<f64>,

    /// Source voltage (V)
    #[arg(long, value_parser = parse_quantity, conflicts_with = "current")]
    voltage: Option<f64>,

    /// Source current (A)
    #[arg(long, value_parser = parse_quantity)]
    current: Option<f64>,
}

fn parse_quantity(text: &str) -> std::result::Result<f64, String> {
    parse_value(text).ok_or_else(|| CalcError::invalid_value(text).to_string())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,ohmkit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(filter),
        )
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    let mut config = CalcConfig::new();
    let mut show_curve = false;
    if let Command::Color { strict: true, .. } = &command {
        config = config.with_strict_color_bands(true);
    }
    let mut bench = Workbench::new(config);

    match command {
        Command::Series(network) => load_network(&mut bench, CalculationMode::Series, network)?,
        Command::Parallel(network) => {
            load_network(&mut bench, CalculationMode::Parallel, network)?
        }
        Command::Divider { vin, ra, rb, vout } => {
            bench.switch_mode(CalculationMode::VoltageDivider);
            bench.divider.set(DividerField::Vin, vin);
            bench.divider.set(DividerField::Ra, ra);
            bench.divider.set(DividerField::Rb, rb);
            bench.divider.set(DividerField::Vout, vout);
        }
        Command::Ohms { v, i, r, p } => {
            bench.switch_mode(CalculationMode::OhmsLaw);
            bench.ohms_law.set(OhmsField::Voltage, v);
            bench.ohms_law.set(OhmsField::Current, i);
            bench.ohms_law.set(OhmsField::Resistance, r);
            bench.ohms_law.set(OhmsField::Power, p);
        }
        Command::Led {
            supply,
            forward,
            current,
        } => {
            bench.switch_mode(CalculationMode::Led);
            bench.led.supply_voltage = supply;
            bench.led.forward_voltage = forward;
            bench.led.current_ma = current;
        }
        Command::RcFilter { r, c, f } => {
            bench.switch_mode(CalculationMode::RcTime);
            bench.rc_sub_mode = RcSubMode::Filter;
            bench.rc_filter.set(RcField::Resistance, r.map(ScaledValue::from_base));
            bench.rc_filter.set(RcField::Capacitance, c.map(ScaledValue::from_base));
            bench.rc_filter.set(RcField::Frequency, f.map(ScaledValue::from_base));
        }
        Command::RcCharge {
            vin,
            r,
            c,
            target,
            time,
            curve,
        } => {
            bench.switch_mode(CalculationMode::RcTime);
            bench.rc_sub_mode = RcSubMode::Charging;
            bench.rc_charge.edit(|inputs| {
                inputs.supply_voltage = Some(vin);
                inputs.resistance = Some(r);
                inputs.capacitance = Some(c);
                inputs.target_voltage = target;
                inputs.elapsed_time = time;
            });
            show_curve = curve;
        }
        Command::Battery {
            capacity,
            current,
            efficiency,
        } => {
            bench.switch_mode(CalculationMode::BatteryLife);
            bench.battery.capacity_mah = Some(capacity);
            bench.battery.current_ma = Some(current);
            bench.battery.efficiency = efficiency;
        }
        Command::Color { bands, .. } => {
            bench.switch_mode(CalculationMode::ColorCode);
            let colors = parse_bands(bands.as_slice())?;
            bench.color_code.set_count(BandCount::try_from(colors.len())?);
            for (position, color) in colors.into_iter().enumerate() {
                bench.color_code.set_band(position, color)?;
            }
        }
    }

    let outcome = bench.calculate()?;
    print_outcome(&outcome, bench.config(), show_curve);
    Ok(())
}

fn load_network(bench: &mut Workbench, mode: CalculationMode, args: NetworkArgs) -> Result<()> {
    bench.switch_mode(mode);
    bench.network.resistors = ResistorList::from_ohms(&args.resistors)?;
    if let Some(volts) = args.voltage {
        bench.network.source_kind = SourceKind::Voltage;
        bench.network.source_value = volts;
    } else if let Some(amps) = args.current {
        bench.network.source_kind = SourceKind::Current;
        bench.network.source_value = amps;
    }
    Ok(())
}

fn print_outcome(outcome: &Outcome, config: &CalcConfig, show_curve: bool) {
    let unit =
        |value: f64, symbol: &str| format_with_unit_styled(value, symbol, &config.number_style);

    match outcome {
        Outcome::Network(result) => {
            println!("{} network", result.mode);
            println!("  total resistance  {}", unit(result.total_resistance, "Ω"));
            println!("  total voltage     {}", unit(result.total_voltage, "V"));
            println!("  total current     {}", unit(result.total_current, "A"));
            println!("  total power       {}", unit(result.total_power, "W"));
            for r in &result.resistors {
                println!(
                    "  {:<4} {:>10} {:>10} {:>10} {:>10} {:>7}%",
                    r.resistor.id.to_string(),
                    unit(r.actual_resistance, "Ω"),
                    unit(r.voltage_drop, "V"),
                    unit(r.current_flow, "A"),
                    unit(r.power, "W"),
                    format_number(r.share_percentage, &config.number_style),
                );
            }
        }
        Outcome::Divider(result) => {
            println!("Vin   {}", unit(result.vin, "V"));
            println!("Ra    {}", unit(result.ra, "Ω"));
            println!("Rb    {}", unit(result.rb, "Ω"));
            println!("Vout  {}", unit(result.vout, "V"));
            println!("ratio {}", format_number(result.ratio(), &config.number_style));
        }
        Outcome::OhmsLaw(result) => {
            for field in OhmsField::ALL {
                let mark = if result.derived.contains(&field) { "*" } else { " " };
                println!("{}{:<12} {}", mark, field, unit(result.get(field), field.unit()));
            }
        }
        Outcome::Led(result) => {
            println!("resistor        {}", unit(result.resistance, "Ω"));
            println!("resistor power  {}", unit(result.resistor_power, "W"));
            println!("LED power       {}", unit(result.led_power, "W"));
        }
        Outcome::RcFilter(result) => {
            println!("R    {}", unit(result.resistance, "Ω"));
            println!("C    {}", unit(result.capacitance, "F"));
            println!("fc   {}", unit(result.cutoff_frequency, "Hz"));
            println!("tau  {}", unit(result.time_constant, "s"));
        }
        Outcome::RcCharge(result) => {
            println!("tau  {}", unit(result.time_constant, "s"));
            match result.solution {
                ChargeSolution::TimeConstantOnly => {}
                ChargeSolution::TimeToTarget {
                    target_voltage,
                    time,
                } => println!("t    {} to reach {}", unit(time, "s"), unit(target_voltage, "V")),
                ChargeSolution::VoltageAtTime { time, voltage } => {
                    println!("Vc   {} after {}", unit(voltage, "V"), unit(time, "s"))
                }
            }
            if show_curve {
                for point in &result.curve {
                    println!("{:>12} {:>12}", unit(point.time, "s"), unit(point.voltage, "V"));
                }
            }
        }
        Outcome::Battery(Some(life)) => {
            println!("{} ({} h)", life, life.hours_display());
        }
        Outcome::Battery(None) => {
            println!("no estimate: capacity and a positive current are required")
        }
        Outcome::ColorCode(result) => {
            println!("{}", result);
            println!(
                "range {} to {}",
                unit(result.min(), "Ω"),
                unit(result.max(), "Ω")
            );
        }
    }
}
