use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tr_app::{AppResult, RunProgressEvent, RunRequest, RunResponse, RunStage, run_service};
use tr_sim::{ForcingKind, IntegratorType, SimConfig, StepPolicy};
use tracing::Level;

#[derive(Parser)]
#[command(name = "tr-cli")]
#[command(about = "Two-rotor torsional vibration simulator", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the assembly and export the trajectory
    Run(RunArgs),
    /// Load and check a parameter file without simulating
    Validate {
        /// Path to the parameter YAML file
        params_path: PathBuf,
        /// Skip the physical admissibility check
        #[arg(long)]
        no_admissibility_check: bool,
    },
    /// Print natural frequencies and the selected time step
    Modes {
        /// Path to the parameter YAML file
        params_path: PathBuf,
        /// Skip the physical admissibility check
        #[arg(long)]
        no_admissibility_check: bool,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Path to the parameter YAML file
    params_path: PathBuf,
    /// Time integration scheme
    #[arg(long, value_enum, default_value_t = IntegratorArg::Rk4)]
    integrator: IntegratorArg,
    /// Hold the base fixed instead of driving it harmonically
    #[arg(long)]
    unforced: bool,
    /// Fixed time step in seconds (default: chosen from the natural frequencies)
    #[arg(long)]
    dt: Option<f64>,
    /// Skip the physical admissibility check
    #[arg(long)]
    no_admissibility_check: bool,
    /// Output CSV file path
    #[arg(short, long, default_value = "simulation_results.csv")]
    output: PathBuf,
    /// Comma-separated column labels for the four state components
    #[arg(long, value_delimiter = ',')]
    labels: Option<Vec<String>>,
    /// Write a JSON run manifest to this path
    #[arg(long)]
    manifest: Option<PathBuf>,
    /// Write position/velocity charts for each rotor into DIR (default: current directory)
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    plot: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum IntegratorArg {
    Rk4,
    Euler,
}

impl From<IntegratorArg> for IntegratorType {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Rk4 => IntegratorType::RK4,
            IntegratorArg::Euler => IntegratorType::ForwardEuler,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run(args) => cmd_run(&args),
        Commands::Validate {
            params_path,
            no_admissibility_check,
        } => cmd_validate(&params_path, !no_admissibility_check),
        Commands::Modes {
            params_path,
            no_admissibility_check,
        } => cmd_modes(&params_path, !no_admissibility_check),
    };

    if let Err(err) = result {
        clear_progress_line();
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn cmd_validate(params_path: &Path, check_admissibility: bool) -> AppResult<()> {
    println!("Validating parameters: {}", params_path.display());
    let params = tr_app::validate_parameters(params_path, check_admissibility)?;
    for (key, value) in params.to_map() {
        println!("  {key:>6} = {value}");
    }
    println!("✓ Parameters are valid");
    Ok(())
}

fn cmd_modes(params_path: &Path, check_admissibility: bool) -> AppResult<()> {
    let modal = tr_app::modal_report(params_path, check_admissibility)?;
    println!("Modal analysis: {}", params_path.display());
    for (i, (lambda, omega)) in modal
        .eigenvalues
        .iter()
        .zip(modal.natural_frequencies.iter())
        .enumerate()
    {
        println!("  mode {}: lambda={lambda:.6e}  omega_n={omega:.6} rad/s", i + 1);
    }
    println!("  f_max = {:.6} Hz", modal.f_max);
    println!("  dt    = {:.6e} s", modal.dt);
    Ok(())
}

fn cmd_run(args: &RunArgs) -> AppResult<()> {
    let config = SimConfig {
        forcing: if args.unforced {
            ForcingKind::Unforced
        } else {
            ForcingKind::Driven
        },
        step: match args.dt {
            Some(dt) => StepPolicy::Fixed(dt),
            None => StepPolicy::Modal,
        },
        integrator: args.integrator.into(),
        check_admissibility: !args.no_admissibility_check,
    };

    let mut request = RunRequest::new(&args.params_path);
    request.config = config;
    request.csv_path = Some(args.output.as_path());
    request.manifest_path = args.manifest.as_deref();
    request.plot_dir = args.plot.as_deref();
    if let Some(labels) = &args.labels {
        request.labels = labels.clone();
    }

    println!("Running simulation: {}", args.params_path.display());

    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let response = run_service::run_with_progress(
        &request,
        Some(&mut |event| {
            let emit_now =
                last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    print_summary(&response);
    Ok(())
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (&event.stage, &event.integration) {
        (RunStage::Integrating, Some(p)) => {
            let width = 28usize;
            let filled = ((p.fraction_complete * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            eprint!(
                "\r[{}] {:>6.2}%  t={:.3}/{:.3}s  step={}/{}  elapsed={:.1}s",
                bar,
                p.fraction_complete * 100.0,
                p.sim_time_s,
                p.t_end_s,
                p.step,
                p.total_steps,
                event.elapsed_wall_s
            );
        }
        _ => {
            let mut line = format!("\r{}  elapsed={:.2}s", event.stage, event.elapsed_wall_s);
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            eprint!("{}", line);
        }
    }
    let _ = io::stderr().flush();
}

fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(100));
    let _ = io::stderr().flush();
}

fn print_summary(response: &RunResponse) {
    let manifest = &response.manifest;
    println!("✓ Simulation completed: {}", manifest.run_id);
    println!("  Integrator: {:?}", manifest.config.integrator);
    println!("  Forcing:    {:?}", manifest.config.forcing);
    println!("  dt:         {:.6e} s", manifest.dt);
    println!("  Steps:      {}", manifest.steps);

    if let Some((t, state)) = response.final_state {
        println!(
            "  Final state at t={:.4}s: theta1={:.6} theta2={:.6} theta1dot={:.6} theta2dot={:.6}",
            t, state[0], state[1], state[2], state[3]
        );
    }
    if let Some(path) = &response.csv_path {
        println!("  Trajectory: {}", path.display());
    }
    for path in &response.plot_paths {
        println!("  Plot:       {}", path.display());
    }
    if let Some(path) = &response.manifest_path {
        println!("  Manifest:   {}", path.display());
    }
    println!(
        "  Timing: load={:.3}s simulate={:.3}s export={:.3}s total={:.3}s",
        response.timing.load_time_s,
        response.timing.simulate_time_s,
        response.timing.export_time_s,
        response.timing.total_time_s
    );
}
