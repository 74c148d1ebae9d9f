use anato_view::config::{self, LibraryConfig, Theme};
use anato_view::library::{self, LibraryIndex};
use anato_view::output;
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "anato-view")]
#[command(about = "Browse layered anatomical diagram libraries")]
#[command(long_about = "\
Browse layered anatomical diagram libraries

Your filesystem is the library. A folder holding images is a schema: its
images are layers, stacked back to front in natural filename order. A folder
holding only subfolders is a collection. Everything else is ignored.

Library structure:

  library/
  ├── -1-Upper-Limb/               # Collection (subfolders only)
  │   ├── -1-Arm/                  # Schema
  │   │   └── -1-Humerus.jpg       # Layer 1 (back)
  │   └── -2-Forearm/              # Schema
  │       ├── -1-Bone.png          # Layer 1 (back)
  │       ├── -2-Muscle.png        # Layer 2
  │       └── -10-Skin.png         # Layer 3 (front; 10 sorts after 2)
  ├── -2-Head/
  │   └── Skull/
  │       └── cranium.png
  └── notes/                       # Ignored (no images, no subfolders)
      └── readme.txt

Run 'anato-view gen-config' to generate a documented anato-view.toml.")]
#[command(version)]
struct Cli {
    /// Config file holding the library root and theme
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Library root (overrides the config file)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the schemas and collections in a folder
    Browse {
        /// Folder to list, relative to the library root (default: the root)
        path: Option<PathBuf>,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find schemas and collections anywhere below the root by name
    Search {
        query: String,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the layers of a schema
    Layers {
        /// Schema folder, relative to the library root
        schema: PathBuf,
    },
    /// Composite a schema's layers into a PNG
    Render {
        /// Schema folder, relative to the library root
        schema: PathBuf,
        /// Output PNG file
        #[arg(long, short, default_value = "scene.png")]
        output: PathBuf,
        /// Hide a layer by its 1-based position (repeatable)
        #[arg(long, value_name = "N")]
        hide: Vec<usize>,
        /// Set a layer's opacity, e.g. `--opacity 3=0.5` (repeatable)
        #[arg(long, value_name = "N=OPACITY", value_parser = parse_opacity)]
        opacity: Vec<(usize, f32)>,
    },
    /// Render card thumbnails for every entry of a folder
    Thumbnails {
        /// Folder to render, relative to the library root (default: the root)
        path: Option<PathBuf>,
        /// Directory the PNG thumbnails are written to
        #[arg(long, short, default_value = "thumbnails")]
        output: PathBuf,
    },
    /// Remember a new library root in the config file
    SetRoot { dir: PathBuf },
    /// Remember a theme in the config file (toggles when omitted)
    SetTheme { theme: Option<Theme> },
    /// Print a stock anato-view.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut library_config = config::load_config(&cli.config)?;
    if let Some(root) = &cli.root {
        library_config.root_path = root.clone();
    }

    match cli.command {
        Command::Browse { path, json } => {
            let index = open_library(library_config)?;
            let dir = resolve(index.root(), path.as_deref());
            let listing = index.browse(&dir)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                output::print_listing(&index.breadcrumb(&dir), &listing);
            }
        }
        Command::Search { query, json } => {
            let index = open_library(library_config)?;
            if !library::is_search_query(&query) {
                // A blank search goes back to the root view.
                let listing = index.browse_root()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&listing)?);
                } else {
                    output::print_listing(&[], &listing);
                }
                return Ok(());
            }
            let results = index.search(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                output::print_search(query.trim(), &results);
            }
        }
        Command::Layers { schema } => {
            let index = open_library(library_config)?;
            let dir = resolve(index.root(), Some(&schema));
            let layers = index.open_schema(&dir)?;
            output::print_layers(&title_of(&dir), &layers);
        }
        Command::Render {
            schema,
            output: out,
            hide,
            opacity,
        } => {
            let index = open_library(library_config)?;
            let dir = resolve(index.root(), Some(&schema));
            let mut layers = index.open_schema(&dir)?;
            for n in hide {
                layers.set_visible(position(n)?, false)?;
            }
            for (n, value) in opacity {
                layers.set_opacity(position(n)?, value)?;
            }
            let scene = index
                .render_scene(&layers)
                .ok_or_else(|| format!("{} has no decodable layers", dir.display()))?;
            scene.save(&out)?;
            println!(
                "{}: {}x{} -> {}",
                title_of(&dir),
                scene.width(),
                scene.height(),
                out.display()
            );
        }
        Command::Thumbnails { path, output: out } => {
            init_thread_pool(&library_config.processing);
            let index = open_library(library_config)?;
            let dir = resolve(index.root(), path.as_deref());
            let listing = index.browse(&dir)?;
            std::fs::create_dir_all(&out)?;

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_thumbnail_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let thumbs = index.thumbnails(&listing.entries, Some(tx));
            printer
                .join()
                .map_err(|_| "thumbnail printer thread panicked")?;

            let mut written = 0;
            for (entry, thumb) in listing.entries.iter().zip(thumbs) {
                if let Some(img) = thumb {
                    img.save(out.join(format!("{}.png", entry.name)))?;
                    written += 1;
                }
            }
            println!("Wrote {} thumbnails to {}", written, out.display());
        }
        Command::SetRoot { dir } => {
            if !dir.is_dir() {
                return Err(format!("{} is not a directory", dir.display()).into());
            }
            library_config.root_path = dir;
            config::save_config(&library_config, &cli.config)?;
            info!("saved {}", cli.config.display());
            println!("Library root: {}", library_config.root_path.display());
        }
        Command::SetTheme { theme } => {
            library_config.theme = theme.unwrap_or(library_config.theme.toggled());
            config::save_config(&library_config, &cli.config)?;
            info!("saved {}", cli.config.display());
            println!("Theme: {}", library_config.theme);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Build the library facade, refusing roots that do not exist.
fn open_library(config: LibraryConfig) -> Result<LibraryIndex, Box<dyn std::error::Error>> {
    if !config.root_path.is_dir() {
        return Err(format!(
            "library root {} is not a directory (see 'anato-view set-root')",
            config.root_path.display()
        )
        .into());
    }
    Ok(LibraryIndex::new(config))
}

/// Resolve a user-supplied folder against the library root.
fn resolve(root: &Path, path: Option<&Path>) -> PathBuf {
    match path {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => root.join(p),
        None => root.to_path_buf(),
    }
}

/// Convert a 1-based layer position from the command line to an index.
fn position(n: usize) -> Result<usize, String> {
    n.checked_sub(1)
        .ok_or_else(|| "layer positions start at 1".to_string())
}

fn title_of(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Parse `N=OPACITY` into a 1-based layer position and an opacity.
fn parse_opacity(s: &str) -> Result<(usize, f32), String> {
    let (n, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected N=OPACITY, got '{s}'"))?;
    let n = n
        .trim()
        .parse()
        .map_err(|_| format!("invalid layer position '{n}'"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid opacity '{value}'"))?;
    Ok((n, value))
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
