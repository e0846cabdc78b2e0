use clap::{Args, Parser, Subcommand};
use pertmap::mapping::MapRegion;
use pertmap::structure::StructureSource;
use pertmap::{InverseMethod, MapSettings, MapSettingsBuilder, ModelSetMapper, PerturbationMapper, VariableType};
use pretty_env_logger;
use std::process::ExitCode;
use std::{error::Error, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    about = "Turn inverted model perturbations into percent lists and GMT map scripts",
    long_about = None,
    version = env!("PERTMAP_VERSION")
)]
struct Cli {
    #[clap(subcommand)]
    mode: Modes,
}

#[derive(Subcommand, Debug)]
enum Modes {
    /// Map a single known parameter list
    Map(MapCliOpts),
    /// Map every {method}{k}.lst solution under a result folder
    Batch(BatchCliOpts),
}

#[derive(Args, Debug)]
struct MapCliOpts {
    /// Known parameter list (VARIABLE lat lon radius value)
    #[clap(short, long)]
    model_path: PathBuf,

    #[clap(flatten)]
    common: CommonOpts,
}

#[derive(Args, Debug)]
struct BatchCliOpts {
    /// Folder holding one subfolder of solutions per inverse method
    #[clap(short, long)]
    result_path: PathBuf,

    /// Inverse methods to look for (space-separated, e.g. "CG SVD")
    #[clap(long, value_delimiter = ' ', num_args = 1.., default_value = "CG")]
    inverse_methods: Vec<InverseMethod>,

    /// Largest basis vector count k of {method}{k}.lst
    #[clap(long, default_value = "20")]
    max_num: usize,

    #[clap(flatten)]
    common: CommonOpts,
}

#[derive(Args, Debug)]
struct CommonOpts {
    /// Working folder; outputs are created here and relative paths start here
    #[clap(short, long, default_value = ".")]
    work_path: PathBuf,

    /// Tag added to the output folder name
    #[clap(short, long)]
    tag: Option<String>,

    /// Structure file the inversion was carried out against
    #[clap(long)]
    structure_path: Option<PathBuf>,

    /// Built-in structure the inversion was carried out against (PREM, IPREM)
    #[clap(long)]
    structure_name: Option<String>,

    /// Structure file to express percentages against, if different
    #[clap(long)]
    reference_structure_path: Option<PathBuf>,

    /// Built-in structure to express percentages against, if different
    #[clap(long)]
    reference_structure_name: Option<String>,

    /// Multigrid design file used to expand fused voxels
    #[clap(long)]
    multigrid_path: Option<PathBuf>,

    /// Variables to map (space-separated, e.g. "Vs Vp")
    #[clap(long, value_delimiter = ' ', num_args = 1.., default_value = "Vs")]
    variable_types: Vec<VariableType>,

    /// Map region as lonMin/lonMax/latMin/latMax; decided from the data if absent
    #[clap(long)]
    map_region: Option<MapRegion>,

    /// Color scale bound of the maps, in percent
    #[clap(long, default_value = "3")]
    scale: f64,

    /// Grid spacing of the interpolated maps, in degrees
    #[clap(long, default_value = "0.5")]
    grid_interval: f64,
}

fn build_settings(opts: &CommonOpts) -> Result<MapSettings, Box<dyn Error>> {
    let mut builder = MapSettingsBuilder::default();
    builder.work_path(opts.work_path.clone());
    if let Some(tag) = &opts.tag {
        builder.tag(tag.clone());
    }
    builder.structure(StructureSource::from_options(
        opts.structure_path.clone(),
        opts.structure_name.clone(),
    ));
    if opts.reference_structure_path.is_some() || opts.reference_structure_name.is_some() {
        builder.reference_structure(StructureSource::from_options(
            opts.reference_structure_path.clone(),
            opts.reference_structure_name.clone(),
        ));
    }
    if let Some(multigrid_path) = &opts.multigrid_path {
        builder.multigrid_path(multigrid_path.clone());
    }
    builder.variable_types(opts.variable_types.clone());
    if let Some(map_region) = opts.map_region {
        builder.map_region(map_region);
    }
    builder.scale(opts.scale);
    builder.grid_interval(opts.grid_interval);
    Ok(builder.build()?)
}

fn entrypoint() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    match cli.mode {
        Modes::Map(opts) => {
            let settings = build_settings(&opts.common)?;
            let mapped = PerturbationMapper::new(opts.model_path, settings).run()?;
            println!(
                "Wrote {} entries on {} shells to {}",
                mapped.nentries,
                mapped.radii.len(),
                mapped.output_folder.display()
            );
        }
        Modes::Batch(opts) => {
            let settings = build_settings(&opts.common)?;
            let report = ModelSetMapper::new(
                opts.result_path,
                opts.inverse_methods,
                opts.max_num,
                settings,
            )
            .run()?;
            println!(
                "Wrote {} models to {}",
                report.produced.len(),
                report.output_folder.display()
            );
            for method in &report.skipped_methods {
                println!("Skipped {}: no results folder", method);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
