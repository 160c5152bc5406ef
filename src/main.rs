use clap::{Args, Parser, Subcommand};
use responsive_img::builder::{
    MediaWidth, MediaWidths, Responsive, ResponsiveOptions, parse_aspect_ratio,
};
use responsive_img::imaging::{LocalEngine, ResizeEngine, ResizeRequest, RustBackend};
use responsive_img::library::JsonLibrary;
use responsive_img::responsive::AttrValue;
use responsive_img::{config, output, urls};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "responsive-img")]
#[command(about = "Responsive <img> and <picture> markup for uploaded images")]
#[command(long_about = "\
Responsive <img> and <picture> markup for uploaded images

Images live in an upload directory served under a public base URL
(see `responsive-img gen-config`). Resized variants are written next to
their source as NAME-WxH.EXT and reused on later runs.

Slots are given with -w, in order, as MEDIA=WIDTH or a bare WIDTH:

  responsive-img img https://localhost/uploads/dawn.jpg \\
      -w '(max-width: 600px)=400' -w 800 --aspect-ratio 16/9 --retina

SVG images are never resized; they get a data-is_svg marker instead.
Failures print nothing on stdout and exit non-zero; warnings go to stderr.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Media library JSON for --attachment and --post lookups
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    /// Log resize decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Origin and presentation flags shared by `img` and `picture`.
#[derive(Args)]
struct MarkupArgs {
    /// Origin image URL
    #[arg(required_unless_present_any = ["attachment", "post"])]
    url: Option<String>,

    /// Use the URL of this media library attachment
    #[arg(long, conflicts_with_all = ["url", "post"])]
    attachment: Option<u64>,

    /// Use the featured image of this post (title becomes the alt text)
    #[arg(long, conflicts_with_all = ["url", "attachment"])]
    post: Option<u64>,

    /// Slot as MEDIA=WIDTH or WIDTH (repeatable, order is kept)
    #[arg(short = 'w', long = "width", value_name = "[MEDIA=]WIDTH")]
    widths: Vec<MediaWidth>,

    /// Add a double-density variant per slot
    #[arg(long)]
    retina: bool,

    /// Crop variants to WIDTH/HEIGHT, e.g. 16/9 or 1.5
    #[arg(long, value_parser = parse_aspect_ratio)]
    aspect_ratio: Option<f64>,

    /// Alt text (HTML tags are stripped)
    #[arg(long, default_value = "")]
    alt: String,

    /// Add loading="lazy"
    #[arg(long)]
    lazy: bool,

    /// Extra attribute as NAME=VALUE, or NAME for a boolean attribute
    #[arg(long = "attr", value_name = "NAME[=VALUE]", value_parser = parse_attr)]
    attrs: Vec<(String, AttrValue)>,
}

impl MarkupArgs {
    fn options(&self) -> ResponsiveOptions {
        ResponsiveOptions {
            widths: MediaWidths::from(self.widths.clone()),
            pixel_ratio_2x: self.retina,
            aspect_ratio: self.aspect_ratio,
            alt: self.alt.clone(),
            lazy: self.lazy,
            attrs: self.attrs.clone(),
        }
    }
}

#[derive(Args)]
struct ResizeArgs {
    /// Origin image URL
    url: String,

    #[arg(long)]
    width: u32,

    /// Omit to keep the source aspect ratio
    #[arg(long)]
    height: Option<u32>,

    /// Scale to fit instead of cropping to the exact box
    #[arg(long)]
    no_crop: bool,

    /// Never produce a variant larger than the source
    #[arg(long)]
    no_upscale: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print a responsive <img>
    Img(MarkupArgs),
    /// Print a <picture> with one <source> per slot
    Picture(MarkupArgs),
    /// Resize one image and print the variant as JSON
    Resize(ResizeArgs),
    /// List the registered image sizes
    Sizes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy)]
enum MarkupKind {
    Img,
    Picture,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let site_config = config::load_config(&cli.config_dir)?;

    if let Command::Sizes { json } = cli.command {
        if json {
            println!("{}", output::format_image_sizes_json(&site_config.image_sizes)?);
        } else {
            output::print_image_sizes(&site_config.image_sizes);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let uploads = site_config.uploads.upload_dir(&cli.config_dir);
    let https = uploads.is_https();
    tracing::debug!(
        base_dir = %uploads.base_dir.display(),
        base_url = %uploads.base_url,
        "upload directory"
    );
    let engine = LocalEngine::new(uploads, RustBackend::new(), site_config.resize.quality());
    let library = cli.library.as_deref().map(JsonLibrary::load).transpose()?;

    match cli.command {
        Command::Img(args) => render(
            &engine,
            library.as_ref(),
            &site_config,
            https,
            &args,
            MarkupKind::Img,
        ),
        Command::Picture(args) => render(
            &engine,
            library.as_ref(),
            &site_config,
            https,
            &args,
            MarkupKind::Picture,
        ),
        Command::Resize(args) => {
            let url = urls::with_scheme(&args.url, https);
            let resized = engine.resize(&ResizeRequest {
                url: &url,
                width: args.width,
                height: args.height,
                crop: site_config.resize.crop && !args.no_crop,
                upscale: site_config.resize.upscale && !args.no_upscale,
            })?;
            println!("{}", output::format_resized(&resized)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Sizes { .. } | Command::GenConfig => Ok(ExitCode::SUCCESS),
    }
}

fn render(
    engine: &LocalEngine<RustBackend>,
    library: Option<&JsonLibrary>,
    site_config: &config::SiteConfig,
    https: bool,
    args: &MarkupArgs,
    kind: MarkupKind,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut responsive = Responsive::new(engine, engine)
        .with_crop(site_config.resize.crop)
        .with_upscale(site_config.resize.upscale)
        .with_https(https);
    if let Some(library) = library {
        responsive = responsive.with_library(library);
    }

    let options = args.options();
    let html = match (kind, &args.url, args.attachment, args.post) {
        (MarkupKind::Img, Some(url), _, _) => responsive.img(url, &options),
        (MarkupKind::Img, None, Some(id), _) => responsive.img_by_attachment_id(id, &options),
        (MarkupKind::Img, None, None, Some(post)) => responsive.img_for_post(post, &options),
        (MarkupKind::Picture, Some(url), _, _) => responsive.picture(url, &options),
        (MarkupKind::Picture, None, Some(id), _) => {
            responsive.picture_by_attachment_id(id, &options)
        }
        (MarkupKind::Picture, None, None, Some(post)) => {
            responsive.picture_for_post(post, &options)
        }
        (_, None, None, None) => {
            return Err("an image URL, --attachment or --post is required".into());
        }
    };

    if html.is_empty() {
        eprintln!("error: no markup produced");
        return Ok(ExitCode::FAILURE);
    }
    println!("{html}");
    Ok(ExitCode::SUCCESS)
}

/// Parse `--attr name=value` or a bare `--attr name`.
fn parse_attr(s: &str) -> Result<(String, AttrValue), String> {
    let (name, value) = match s.split_once('=') {
        Some((name, value)) => (name.trim(), AttrValue::from(value)),
        None => (s.trim(), AttrValue::Flag),
    };
    if name.is_empty() {
        return Err(format!("attribute name missing in {s:?}"));
    }
    Ok((name.to_string(), value))
}

/// Log to stderr; stdout carries only markup and JSON.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("responsive_img=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
