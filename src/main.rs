use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use xplat::platform::{FsPlatformLister, PlatformRegistry};
use xplat::probe;
use xplat::runtime::RealRuntime;

/// xplat - platform bookkeeping for cross-platform app projects
///
/// Records which native platforms (Android, iOS, ...) are installed into a
/// project and at which version, and reports what the project and host
/// environment look like.
///
/// Examples:
///   xplat list                    # Installed platforms and versions
///   xplat save android 9.0.0      # Record a platform version
#[derive(Parser, Debug)]
#[command(author, version = env!("XPLAT_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root directory (defaults to the current directory; also via XPLAT_PROJECT_ROOT)
    #[arg(
        long = "project-root",
        short = 'p',
        env = "XPLAT_PROJECT_ROOT",
        value_name = "PATH",
        default_value = ".",
        global = true
    )]
    pub project_root: PathBuf,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List installed platforms and their versions
    List(ListArgs),

    /// Record a platform version in the manifest
    Save(SaveArgs),

    /// Drop a platform from the manifest
    Remove(RemoveArgs),

    /// Report which platform folders exist and the host operating system
    Doctor(DoctorArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {}

#[derive(clap::Args, Debug)]
pub struct SaveArgs {
    /// The platform name (e.g. "android")
    #[arg(value_name = "PLATFORM")]
    pub platform: String,

    /// The version descriptor: a version number, local path or source URL
    #[arg(value_name = "VERSION")]
    pub version: String,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// The platform name (e.g. "android")
    #[arg(value_name = "PLATFORM")]
    pub platform: String,
}

#[derive(clap::Args, Debug)]
pub struct DoctorArgs {}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    match cli.command {
        Commands::List(_args) => {
            let registry = PlatformRegistry::new(&runtime, cli.project_root);
            let lister = FsPlatformLister::new(&runtime);
            for entry in registry.platform_versions(&lister).await? {
                println!("{} {}", entry.platform, entry.version);
            }
        }
        Commands::Save(args) => {
            let registry = PlatformRegistry::new(&runtime, cli.project_root);
            registry.save(&args.platform, &args.version)?;
        }
        Commands::Remove(args) => {
            let registry = PlatformRegistry::new(&runtime, cli.project_root);
            registry.remove(&args.platform)?;
        }
        Commands::Doctor(_args) => {
            let root = &cli.project_root;
            let report = |present| if present { "present" } else { "absent" };
            println!("android: {}", report(probe::check_android(&runtime, root)));
            println!("ios: {}", report(probe::check_ios(&runtime, root)));

            let host = if probe::is_on_windows() {
                "windows"
            } else if probe::is_on_mac() {
                "macos"
            } else if probe::is_on_linux() {
                "linux"
            } else {
                "unknown"
            };
            println!("host: {}", host);
        }
    }
    Ok(())
}
