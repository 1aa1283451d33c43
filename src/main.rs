use clap::{Parser, Subcommand, ValueEnum};
use photo_tiles::config::{GalleryConfig, StyleConfig};
use photo_tiles::gallery::{self, GalleryOutput};
use photo_tiles::imaging::{ImageBackend, MagickBackend, RustBackend};
use photo_tiles::markdown::{CmarkRenderer, MarkdownRenderer, PandocRenderer};
use photo_tiles::tool::SystemRunner;
use photo_tiles::{compare, compress, logging, month, output};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "photo-tiles")]
#[command(version)]
#[command(about = "Tiled thumbnail galleries and other photo-organizing chores")]
#[command(long_about = "\
Tiled thumbnail galleries and other photo-organizing chores

'page' turns a list of images into a static HTML page:

  gallery/
  ├── index.html                 # Grid of thumbnails, optional body copy
  ├── thumbnails/
  │   └── 2016-07-04-lake.jpg    # 640x640 centre crop
  └── 2016-07-04-lake.jpg        # Symlink to the original

Re-running is cheap: thumbnails and links that already exist are reused.

Other commands:
  compress     run a compression command over every JPEG in a folder
  link-month   symlink one month's photos (YYYY-MM-DD-*.jpg) into a folder
  compare      side-by-side page of the same photos across folders
  show-config  print the effective settings as TOML")]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Diagnostic log format (stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Thumbnail producer.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    /// ImageMagick `convert`
    Magick,
    /// In-process `image` crate
    Rust,
}

/// Body copy renderer.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MarkdownKind {
    /// `pandoc -f markdown -t html`
    Pandoc,
    /// In-process CommonMark
    Builtin,
}

/// Settings that end up in [`GalleryConfig`].
#[derive(clap::Args, Clone)]
struct PageSettings {
    /// Thumbnail edge length in pixels
    #[arg(long, default_value_t = 640)]
    size: u32,

    /// Thumbnail encoding quality (1-100)
    #[arg(long, default_value_t = 60)]
    quality: u32,

    /// Page title
    #[arg(long, default_value = "Gallery")]
    title: String,
}

impl PageSettings {
    fn to_config(&self) -> GalleryConfig {
        let mut config = GalleryConfig::default();
        config.thumbnail.size = self.size;
        config.thumbnail.quality = self.quality;
        config.style.title = self.title.clone();
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Build a thumbnail gallery page from a list of images
    Page {
        /// Output directory
        #[arg(long, default_value = "./gallery/")]
        destdir: PathBuf,

        /// Markdown file rendered above the grid
        #[arg(long)]
        bodymarkdown: Option<PathBuf>,

        #[command(flatten)]
        settings: PageSettings,

        #[arg(long, value_enum, default_value_t = BackendKind::Magick)]
        backend: BackendKind,

        #[arg(long, value_enum, default_value_t = MarkdownKind::Pandoc)]
        markdown: MarkdownKind,

        /// ImageMagick executable for `--backend magick` (`magick` on ImageMagick 7)
        #[arg(long, default_value = "convert")]
        convert: String,

        /// Images to include; other files are ignored
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Run a compression command over every JPEG in a folder
    Compress {
        #[arg(long)]
        sourcedir: PathBuf,

        #[arg(long)]
        destdir: PathBuf,

        /// Command template with {input} and {output} placeholders,
        /// e.g. "convert {input} -quality 60 {output}"
        #[arg(long)]
        cmd: String,
    },
    /// Symlink the photos of one month into a folder
    LinkMonth {
        /// Month as it appears in file names, e.g. 07
        #[arg(long)]
        month: String,

        #[arg(long)]
        sourcedir: PathBuf,

        #[arg(long)]
        destdir: PathBuf,
    },
    /// Build a side-by-side page of the same photos across folders
    Compare {
        #[arg(long)]
        destdir: PathBuf,

        /// Folder to show as a column (repeatable, in column order)
        #[arg(long = "column", required = true)]
        columns: Vec<PathBuf>,

        #[arg(long)]
        bodymarkdown: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = MarkdownKind::Pandoc)]
        markdown: MarkdownKind,

        /// File names present in every column
        #[arg(required = true)]
        images: Vec<String>,
    },
    /// Print the effective settings as TOML
    ShowConfig {
        #[command(flatten)]
        settings: PageSettings,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_format == LogFormat::Json);

    match cli.command {
        Command::Page {
            destdir,
            bodymarkdown,
            settings,
            backend,
            markdown,
            convert,
            images,
        } => {
            let config = settings.to_config();
            let renderer = markdown_renderer(markdown);
            let result = match backend {
                BackendKind::Magick => run_page(
                    &images,
                    &destdir,
                    bodymarkdown.as_deref(),
                    &config,
                    &MagickBackend::new().program(convert),
                    renderer.as_ref(),
                )?,
                BackendKind::Rust => run_page(
                    &images,
                    &destdir,
                    bodymarkdown.as_deref(),
                    &config,
                    &RustBackend::new(),
                    renderer.as_ref(),
                )?,
            };
            output::print_gallery_summary(&result);
            if !result.failures.is_empty() {
                return Err(format!("{} image(s) could not be added", result.failures.len()).into());
            }
        }
        Command::Compress {
            sourcedir,
            destdir,
            cmd,
        } => {
            let report = compress::compress(&cmd, &sourcedir, &destdir, &SystemRunner)?;
            output::print_compress_report(&report);
            if !report.failures.is_empty() {
                return Err(format!("{} file(s) failed to compress", report.failures.len()).into());
            }
        }
        Command::LinkMonth {
            month,
            sourcedir,
            destdir,
        } => {
            let report = month::link_month(&month, &sourcedir, &destdir)?;
            output::print_link_month_report(&report);
        }
        Command::Compare {
            destdir,
            columns,
            bodymarkdown,
            markdown,
            images,
        } => {
            let renderer = markdown_renderer(markdown);
            let result = compare::create_compare_page(
                &images,
                &columns,
                &destdir,
                bodymarkdown.as_deref(),
                &StyleConfig::default(),
                renderer.as_ref(),
            )?;
            output::print_compare_output(&result);
        }
        Command::ShowConfig { settings } => {
            let config = settings.to_config();
            config.validate()?;
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn markdown_renderer(kind: MarkdownKind) -> Box<dyn MarkdownRenderer> {
    match kind {
        MarkdownKind::Pandoc => Box::new(PandocRenderer::new()),
        MarkdownKind::Builtin => Box::new(CmarkRenderer),
    }
}

/// Run the gallery builder with a printer thread consuming progress events.
fn run_page(
    images: &[PathBuf],
    destdir: &Path,
    bodymarkdown: Option<&Path>,
    config: &GalleryConfig,
    backend: &impl ImageBackend,
    renderer: &dyn MarkdownRenderer,
) -> Result<GalleryOutput, Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_gallery_event(&event);
        }
    });
    let result = gallery::create_page(
        images,
        destdir,
        bodymarkdown,
        config,
        backend,
        renderer,
        Some(tx),
    );
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    Ok(result?)
}
