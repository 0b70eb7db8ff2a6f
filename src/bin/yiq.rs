//! Pack displayable images into YIQ containers and unpack them back.
//!
//! The direction is picked from the input file itself: anything starting with
//! the container signature is unpacked, everything else is handed to the
//! image decoders and packed.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use yiq_image::{is_container, ColorimetryMethod, YiqImage};

#[derive(Debug, Parser)]
#[command(name = "yiq", version, about = "Convert images to and from the YIQ container format")]
struct Args {
    /// Input file, a displayable image to pack or a YIQ container to unpack
    input: PathBuf,

    /// Output file path (packing defaults to `<input>.yiq`)
    #[arg(short, long, conflicts_with = "to")]
    output: Option<PathBuf>,

    /// Stream to stdout as this output type (`yiq` when packing, an image
    /// type such as `png` when unpacking)
    #[arg(short = 't', long, value_name = "TYPE")]
    to: Option<String>,

    /// Colorimetry method used for packing (unpacking reads it from the
    /// container header)
    #[arg(short, long, value_enum, default_value = "smpte-c")]
    method: Method,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    /// Original FCC NTSC standard from 1953
    Ntsc1953,
    /// SMPTE C, the 1987 revision with updated phosphors
    SmpteC,
}

impl From<Method> for ColorimetryMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Ntsc1953 => ColorimetryMethod::NTSC1953,
            Method::SmpteC => ColorimetryMethod::SMPTEC,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write to standard output")]
    Stdout(#[source] std::io::Error),

    #[error("packing streams `yiq` to stdout, not `{0}`")]
    NotAContainerType(String),

    #[error("unpacking needs --output or --to to know the target format")]
    MissingOutput,

    #[error(transparent)]
    Container(#[from] yiq_image::ReadError),

    #[error(transparent)]
    Pixels(#[from] yiq_image::ImageError),

    #[error(transparent)]
    ImageCodec(#[from] yiq_image::IoError),
}

fn main() -> ExitCode {
    init_tracing();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut message = err.to_string();

            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                message.push_str(": ");
                message.push_str(&cause.to_string());
                source = cause.source();
            }

            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let stderr_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("yiq=info"));

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(env_filter)
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let bytes = fs::read(&args.input).map_err(|source| CliError::ReadInput {
        path: args.input.clone(),
        source,
    })?;

    if is_container(&bytes) {
        unpack(args, &bytes)
    } else {
        pack(args, &bytes)
    }
}

fn pack(args: &Args, bytes: &[u8]) -> Result<(), CliError> {
    if let Some(ty) = &args.to {
        if !ty.eq_ignore_ascii_case("yiq") {
            return Err(CliError::NotAContainerType(ty.clone()));
        }
    }

    let format = image::guess_format(bytes)
        .map(|f| format!("{f:?}"))
        .unwrap_or_else(|_| "unknown".to_owned());

    let method = ColorimetryMethod::from(args.method);
    let (width, height, rgb) = yiq_image::decode_image(&args.input)?;

    info!(
        name = %args.input.display(),
        format,
        width,
        height,
        ?method,
        "packing"
    );

    let out = pack_pixels(method, width, height, &rgb)?.to_bytes();

    if args.to.is_some() {
        write_stdout(&out)
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_container_path(&args.input));
        write_file(&path, &out)
    }
}

fn unpack(args: &Args, bytes: &[u8]) -> Result<(), CliError> {
    let image = YiqImage::read_from(&mut &bytes[..])?;

    info!(
        name = %args.input.display(),
        width = image.width(),
        height = image.height(),
        method = ?image.method(),
        "unpacking"
    );

    let rgb = unpack_pixels(&image);

    if let Some(path) = &args.output {
        let format = yiq_image::format_for_path(path)?;
        let out = yiq_image::encode_image(image.width(), image.height(), rgb, format)?;
        write_file(path, &out)
    } else if let Some(ty) = &args.to {
        let format = yiq_image::format_for_type(ty)?;
        let out = yiq_image::encode_image(image.width(), image.height(), rgb, format)?;
        write_stdout(&out)
    } else {
        Err(CliError::MissingOutput)
    }
}

fn pack_pixels(
    method: ColorimetryMethod,
    width: u32,
    height: u32,
    rgb: &[u8],
) -> Result<YiqImage, yiq_image::ImageError> {
    #[cfg(feature = "multi-thread")]
    {
        yiq_image::from_rgb8_multi_thread(method, width, height, rgb)
    }

    #[cfg(not(feature = "multi-thread"))]
    {
        YiqImage::from_rgb8(method, width, height, rgb)
    }
}

fn unpack_pixels(image: &YiqImage) -> Vec<u8> {
    #[cfg(feature = "multi-thread")]
    {
        yiq_image::to_rgb8_multi_thread(image)
    }

    #[cfg(not(feature = "multi-thread"))]
    {
        image.to_rgb8()
    }
}

/// `photo.png` becomes `photo.png.yiq`, keeping the original name visible
fn default_container_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".yiq");
    PathBuf::from(name)
}

/// The buffer is always assembled in full before this runs, so a failure
/// here never leaves the destination with a half-written payload from us.
fn write_file(path: &Path, out: &[u8]) -> Result<(), CliError> {
    fs::write(path, out).map_err(|source| CliError::WriteOutput {
        path: path.to_owned(),
        source,
    })?;

    info!(name = %path.display(), bytes = out.len(), "wrote output");
    Ok(())
}

fn write_stdout(out: &[u8]) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out).map_err(CliError::Stdout)?;
    stdout.flush().map_err(CliError::Stdout)
}
