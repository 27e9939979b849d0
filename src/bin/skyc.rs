use std::{
    fmt::Write as _,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use show_format::{AssetPayload, AssetPolicy, EnvironmentType, LoadOptions, LoadedShow};

#[derive(Parser, Debug)]
#[command(name = "skyc", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Log loader diagnostics (resolved assets, missing entries) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a show and print a one-line summary.
    Validate(InputArgs),
    /// Print the cameras declared by a show as JSON.
    Cameras(InputArgs),
    /// Print the contents of a show, including its assets.
    Inspect(InputArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input show: a JSON specification or a compiled `.skyc` container.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Loader options as a JSON file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the maximum number of drones.
    #[arg(long)]
    max_drones: Option<usize>,

    /// Do not read asset payloads from the container.
    #[arg(long)]
    skip_assets: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Cameras(args) => cmd_cameras(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(args: &InputArgs) -> anyhow::Result<LoadOptions> {
    let mut opts = match &args.config {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open config '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("parse config '{}'", path.display()))?
        }
        None => LoadOptions::default(),
    };
    if let Some(n) = args.max_drones {
        opts.validation.max_drone_count = n;
    }
    if args.skip_assets {
        opts.assets = AssetPolicy::Skip;
    }
    Ok(opts)
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read show '{}'", path.display()))
}

fn load(args: &InputArgs) -> anyhow::Result<LoadedShow> {
    let opts = load_options(args)?;
    let bytes = read_input(&args.in_path)?;
    let show = show_format::load_show(&bytes, &opts)
        .with_context(|| format!("load show '{}'", args.in_path.display()))?;
    Ok(show)
}

fn cmd_validate(args: InputArgs) -> anyhow::Result<()> {
    let show = load(&args)?;
    let spec = &show.specification;
    println!(
        "ok: {} drones, {} cameras, {} assets",
        spec.drone_count(),
        spec.cameras().len(),
        show.assets.len()
    );
    Ok(())
}

fn cmd_cameras(args: InputArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.in_path)?;
    let cameras = if show_format::is_container(&bytes) {
        let opts = load_options(&args)?;
        show_format::load_compiled_show(&bytes, &opts)
            .with_context(|| format!("load show '{}'", args.in_path.display()))?
            .specification
            .cameras()
            .to_vec()
    } else {
        // Bare documents are read without full validation so cameras can be listed while the
        // rest of the show is still being authored.
        let doc: serde_json::Value =
            serde_json::from_slice(&bytes).with_context(|| "parse show JSON")?;
        show_format::get_cameras_from_show_specification(&doc)?
    };
    println!("{}", serde_json::to_string_pretty(&cameras)?);
    Ok(())
}

fn cmd_inspect(args: InputArgs) -> anyhow::Result<()> {
    let show = load(&args)?;
    let spec = &show.specification;

    println!("version:     {}", spec.version);
    if let Some(title) = spec.title() {
        println!("title:       {title}");
    }
    println!("drones:      {}", spec.drone_count());
    println!("duration:    {:.2}s", spec.duration_sec());
    let env = match spec.environment_type() {
        Some(EnvironmentType::Outdoor) => "outdoor",
        Some(EnvironmentType::Indoor) => "indoor",
        None => "-",
    };
    println!("environment: {env}");

    println!("cameras:");
    let default_cam = spec.default_camera();
    for (i, cam) in spec.cameras().iter().enumerate() {
        let marker = if default_cam.is_some_and(|d| std::ptr::eq(d, cam)) {
            " (default)"
        } else {
            ""
        };
        match cam.name() {
            Some(name) => println!("  {name}{marker}"),
            None => println!("  #{i}{marker}"),
        }
    }

    println!("assets:");
    for (name, payload) in &show.assets {
        match payload {
            AssetPayload::Loaded(bytes) => {
                println!("  {name}:");
                println!("    size:   {}", bytes.len());
                println!("    sha256: {}", sha256_hex(bytes));
            }
            AssetPayload::Placeholder(_) => println!("  {name}: placeholder"),
        }
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        let _ = write!(out, "{b:02x}");
    }
    out
}
