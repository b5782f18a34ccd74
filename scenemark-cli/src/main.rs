use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use scenemark_core::{Rgba, Role, SceneQuery, SceneSnapshot};
use scenemark_markers::{SceneMarkerAssembler, SceneMarkersConfig, SceneMarkersParams};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Markers(args) => run_markers(&args),
        Commands::Summary { scene } => run_summary(&scene),
    }
}

fn run_markers(args: &MarkersArgs) -> anyhow::Result<()> {
    let params = build_params(args)?;
    let assembler = SceneMarkerAssembler::new(params).context("invalid marker parameters")?;
    let scene = load_scene(&args.scene)?;

    tracing::info!(
        scene = %args.scene.display(),
        role = %assembler.role(),
        "assembling markers"
    );
    let collection = assembler.assemble(&scene);
    tracing::info!(markers = collection.len(), "assembled markers");

    match &args.output {
        Some(path) => scenemark_io::write_markers(&collection, path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => scenemark_io::write_markers_to(&collection, std::io::stdout().lock())?,
    }
    Ok(())
}

fn run_summary(path: &Path) -> anyhow::Result<()> {
    let scene = load_scene(path)?;
    tracing::info!(scene = %path.display(), "summarising scene");

    println!("time: {}", scene.time());
    println!(
        "entries: {} ({} anchored, {} dynamic)",
        scene.len(),
        scene.anchored().count(),
        scene.dynamic().count()
    );
    for role in [Role::Illustration, Role::Proximity] {
        println!("{role}: {}", scene.with_role(role).count());
        for entry in scene.with_role(role) {
            println!("  {} [{}] {}", entry.marker_namespace(), entry.id, entry.shape.kind_name());
        }
    }
    Ok(())
}

fn load_scene(path: &Path) -> anyhow::Result<SceneSnapshot> {
    scenemark_io::read_scene(path).with_context(|| format!("failed to load scene {}", path.display()))
}

/// Config file first, then command line flags on top. Whatever neither sets
/// comes from the preset of the final role.
fn build_params(args: &MarkersArgs) -> anyhow::Result<SceneMarkersParams> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<SceneMarkersConfig>(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => SceneMarkersConfig::default(),
    };

    if let Some(role) = args.role {
        config.role = Some(role.into());
    }
    if let Some(color) = args.default_color {
        config.default_color = Some(color);
    }
    if let Some(frame) = &args.world_frame {
        config.world_frame = Some(frame.clone());
    }
    if args.delete_all {
        config.include_deletion_marker = Some(true);
    }
    if args.include_invisible {
        config.include_invisible = Some(true);
    }
    Ok(config.into_params())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Translate geometry scenes into viewer markers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble the marker collection for one role of a scene.
    Markers(MarkersArgs),
    /// Print the geometry entries of a scene grouped by role.
    Summary {
        /// Scene document to inspect.
        scene: PathBuf,
    },
}

#[derive(Args, Debug)]
struct MarkersArgs {
    /// Scene document to translate.
    scene: PathBuf,
    /// Role whose geometry is translated.
    #[arg(short, long, value_enum)]
    role: Option<RoleArg>,
    /// Color for geometry without an override, as `r,g,b[,a]`.
    #[arg(long)]
    default_color: Option<Rgba>,
    /// Reference frame written into marker headers.
    #[arg(long)]
    world_frame: Option<String>,
    /// JSON file holding marker parameters.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Start the collection with a delete-all marker.
    #[arg(long)]
    delete_all: bool,
    /// Translate geometry marked invisible.
    #[arg(long)]
    include_invisible: bool,
    /// Write the collection here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RoleArg {
    Illustration,
    Proximity,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Illustration => Role::Illustration,
            RoleArg::Proximity => Role::Proximity,
        }
    }
}
