use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use rootcause::prelude::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use canvas_eagles::{
    board::ManeuverBoard,
    catalog::Catalog,
    document::{self, ImportOptions, Plane, PlaneModel},
    error::ErrorKind,
};

/// Plane documents and maneuver board tooling
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log debug output. `RUST_LOG` takes precedence when set.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every maneuver in the master catalog
    Catalog {
        /// Print the catalog as JSON
        #[clap(long)]
        json: bool,
    },
    /// Print the document of a blank plane
    Blank {
        #[clap(short, long)]
        pretty: bool,
    },
    /// Strictly import plane documents and report every problem found
    Check {
        #[clap(required = true)]
        files: Vec<PathBuf>,
    },
    /// Import a plane document and write it back out
    Normalize {
        file: PathBuf,

        /// Where to write the document. Defaults to stdout
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Reject malformed documents instead of filling in defaults
        #[clap(long)]
        strict: bool,

        #[clap(short, long)]
        pretty: bool,
    },
    /// Bind the maneuver board to a plane and print every slot
    Board { file: PathBuf },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_plane(path: &Path, options: &ImportOptions, catalog: &Catalog) -> Result<Plane, Report> {
    let file = File::open(path)
        .context(format!("Failed to open plane document: {}", path.display()))?;
    debug!("reading {}", path.display());
    Ok(document::read_plane(BufReader::new(file), options, catalog)?)
}

fn print_catalog(catalog: &Catalog, json: bool) -> Result<(), Report> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if json {
        let entries: Vec<serde_json::Value> = catalog
            .iter()
            .map(|m| {
                serde_json::json!({
                    "name": m.name,
                    "speed": m.speed(),
                    "direction": m.direction().map(|d| d.to_string()),
                    "tolerances": m.tolerances().joined(),
                    "is_restricted": m.is_restricted,
                    "is_climb_restricted": m.is_climb_restricted,
                    "causes_spin_check": m.causes_spin_check,
                })
            })
            .collect();
        serde_json::to_writer_pretty(&mut out, &entries)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{:<6} {:>5} {:>4} {:<7} flags", "name", "speed", "dir", "tol")?;
    for m in catalog.iter() {
        let mut flags = Vec::new();
        if m.is_restricted {
            flags.push("restricted");
        }
        if m.is_climb_restricted {
            flags.push("climb-restricted");
        }
        if m.causes_spin_check {
            flags.push("spin-check");
        }
        writeln!(
            out,
            "{:<6} {:>5} {:>4} {:<7} {}",
            m.name,
            m.speed().map(|s| s.to_string()).unwrap_or_default(),
            m.direction().map(|d| d.to_string()).unwrap_or_default(),
            m.tolerances().joined(),
            flags.join(",")
        )?;
    }

    Ok(())
}

fn check(files: &[PathBuf], catalog: &Catalog) -> Result<(), Report> {
    let options = ImportOptions::builder().strict(true).build();
    let mut failures = 0;

    for path in files {
        let file = File::open(path)
            .context(format!("Failed to open plane document: {}", path.display()))?;
        match document::read_plane(BufReader::new(file), &options, catalog) {
            Ok(plane) => println!(
                "{}: ok ({} maneuvers, {} crew)",
                path.display(),
                plane.maneuver_count(),
                plane.crew().count()
            ),
            Err(err) => {
                failures += 1;
                match &err.kind {
                    ErrorKind::Validation(issues) => {
                        println!("{}: {err}", path.display());
                        for issue in issues {
                            println!("  {issue}");
                        }
                    }
                    _ => println!("{}: {err}", path.display()),
                }
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} plane document(s) failed", files.len());
    }

    Ok(())
}

fn normalize(
    file: &Path,
    output: Option<&Path>,
    strict: bool,
    pretty: bool,
    catalog: &Catalog,
) -> Result<(), Report> {
    let options = ImportOptions::builder().strict(strict).build();
    let plane = load_plane(file, &options, catalog)?;

    match output {
        Some(path) => {
            let out = File::create(path)
                .context(format!("Failed to create output file: {}", path.display()))?;
            let mut out = BufWriter::new(out);
            document::write_plane(pretty, &plane, &mut out)?;
            writeln!(out)?;
            out.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            document::write_plane(pretty, &plane, &mut out)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn show_board(file: &Path, catalog: &Catalog) -> Result<(), Report> {
    let mut plane = load_plane(file, &ImportOptions::default(), catalog)?;
    plane.fill_from_catalog(catalog);

    let mut model = PlaneModel::new();
    let plane = model.push_plane(plane);

    let mut board = ManeuverBoard::new(catalog);
    board.position_maneuvers();
    let event = model
        .select_plane(plane)
        .ok_or_else(|| rootcause::report!("Plane {plane} missing from the model"))?;
    board.handle(&event, &model);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{:<6} {:>5} {:>5} {:>4} state", "name", "x", "y", "row")?;
    for graphic in board.graphics() {
        let position = graphic.position();
        writeln!(
            out,
            "{:<6} {:>5} {:>5} {:>4} {:?}",
            graphic.name().as_str(),
            position.x,
            position.y,
            graphic
                .model_index()
                .map(|index| index.row.to_string())
                .unwrap_or_else(|| "-".to_string()),
            graphic.state()
        )?;
    }

    Ok(())
}

fn main() -> Result<(), Report> {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = Catalog::master();

    match args.command {
        Commands::Catalog { json } => print_catalog(&catalog, json),
        Commands::Blank { pretty } => {
            let plane = Plane::blank(&catalog);
            println!("{}", document::plane_to_string(pretty, &plane)?);
            Ok(())
        }
        Commands::Check { files } => check(&files, &catalog),
        Commands::Normalize {
            file,
            output,
            strict,
            pretty,
        } => normalize(&file, output.as_deref(), strict, pretty, &catalog),
        Commands::Board { file } => show_board(&file, &catalog),
    }
}
