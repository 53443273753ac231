//! Command line tool that renders a gradient texture into a BMP or PNG image
#![deny(warnings)]

use gradtex::*;
use std::{
    env,
    fs::File,
    io::{BufReader, BufWriter, Write},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug, Clone, Copy)]
enum FileFormat {
    Png,
    Bmp,
}

/// JSON texture description accepted by `-j`
#[derive(Debug, serde::Deserialize)]
struct TextureDesc {
    #[serde(flatten)]
    params: GradientParams,
    #[serde(default)]
    color_keys: Vec<ColorKey>,
    #[serde(default)]
    alpha_keys: Vec<AlphaKey>,
}

#[derive(Debug)]
struct Args {
    params: GradientParams,
    ramp: GradientRamp,
    format: Option<FileFormat>,
    output_file: String,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            params: GradientParams::default(),
            ramp: GradientRamp::default(),
            format: None,
            output_file: String::new(),
        };
        let mut positional = 0;
        let mut args = env::args();
        let cmd = args.next().unwrap();
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    positional = 0;
                    break;
                }
                "-m" => {
                    let mode = args.next().ok_or("-m requires argument")?;
                    result.params.draw_mode = parse_mode(&mode)?;
                }
                "-r" => {
                    let resolution = args.next().ok_or("-r requires argument")?;
                    result.params.resolution = parse_resolution(&resolution)?;
                }
                "-a" => {
                    result.params.angle = args.next().ok_or("-a requires argument")?.parse()?;
                }
                "-t" => {
                    result.params.tile = args.next().ok_or("-t requires argument")?.parse()?;
                }
                "-o" => {
                    result.params.offset = args.next().ok_or("-o requires argument")?.parse()?;
                }
                "-c" => {
                    result.params.repeat = false;
                }
                "-R" => {
                    result.params.radius = args.next().ok_or("-R requires argument")?.parse()?;
                }
                "-C" => {
                    let center = args.next().ok_or("-C requires argument")?;
                    let (x, y) = center
                        .split_once(',')
                        .ok_or("-C expects center offset as <x>,<y>")?;
                    result.params.center_offset =
                        Point::new(x.trim().parse()?, y.trim().parse()?);
                }
                "-F" => {
                    result.params.radial_falloff =
                        args.next().ok_or("-F requires argument")?.parse()?;
                }
                "-g" => {
                    let keys = args.next().ok_or("-g requires argument")?;
                    result.ramp = parse_keys(&keys)?;
                }
                "-j" => {
                    let path = args.next().ok_or("-j requires argument")?;
                    let desc: TextureDesc = if path != "-" {
                        serde_json::from_reader(BufReader::new(File::open(path)?))?
                    } else {
                        serde_json::from_reader(std::io::stdin())?
                    };
                    result.params = desc.params;
                    result.ramp = GradientRamp::new(desc.color_keys, desc.alpha_keys);
                }
                "-f" => {
                    let format = args.next().ok_or("-f requires argument")?;
                    result.format = Some(match format.as_str() {
                        "png" => FileFormat::Png,
                        "bmp" => FileFormat::Bmp,
                        _ => return Err(format!("unknown format: {}", format).into()),
                    });
                }
                _ => {
                    positional += 1;
                    match positional {
                        1 => result.output_file = arg,
                        _ => return Err("unexpected positional argment".into()),
                    }
                }
            }
        }
        if positional < 1 {
            eprintln!("Render a gradient texture into a BMP or PNG image");
            eprintln!("\nUSAGE:");
            eprintln!(
                "    {} [-m <mode>] [-r <WxH>] [-a <angle>] [-t <tile>] [-o <offset>] [-c]",
                cmd
            );
            eprintln!(
                "    {:width$} [-R <radius>] [-C <x,y>] [-F <falloff>] [-g <keys>] [-j <desc.json>]",
                "",
                width = cmd.len()
            );
            eprintln!("    {:width$} [-f <format>] <output>", "", width = cmd.len());
            eprintln!("\nARGS:");
            eprintln!("    -m <mode>     draw mode: vertical, horizontal or radial (default: vertical)");
            eprintln!("    -r <WxH>      texture resolution (default: 256x256)");
            eprintln!("    -a <angle>    gradient angle in degrees");
            eprintln!("    -t <tile>     ramp repeat frequency, negative flips direction (default: 1)");
            eprintln!("    -o <offset>   shift as a fraction of the gradient span");
            eprintln!("    -c            clamp out of range ramp positions instead of repeating");
            eprintln!("    -R <radius>   radial mode gradient radius (default: 1)");
            eprintln!("    -C <x,y>      radial mode center offset, roughly [-1, 1] per axis");
            eprintln!("    -F <falloff>  radial mode per channel falloff exponent in [0, 10]");
            eprintln!(
                "    -g <keys>     ramp keys <position>:<#rrggbb(aa)>,... (default: 0:#000000,1:#ffffff)"
            );
            eprintln!("    -j <file>     JSON texture description ('-' means stdin), replaces");
            eprintln!("                  parameters and ramp gathered so far");
            eprintln!("    -f <format>   output format: png or bmp (default: by file extension)");
            eprintln!("    <output>      output image file ('-' means stdout)");
            std::process::exit(1);
        }
        Ok(result)
    }
}

fn parse_mode(text: &str) -> Result<DrawMode, Error> {
    match text {
        "vertical" => Ok(DrawMode::Axis(Axis::Vertical)),
        "horizontal" => Ok(DrawMode::Axis(Axis::Horizontal)),
        "radial" => Ok(DrawMode::Radial),
        _ => Err(format!("unknown draw mode: {}", text).into()),
    }
}

fn parse_resolution(text: &str) -> Result<Size, Error> {
    let (width, height) = text
        .split_once('x')
        .ok_or("resolution expected as <width>x<height>")?;
    Ok(Size {
        width: width.trim().parse()?,
        height: height.trim().parse()?,
    })
}

/// Parse ramp keys in the `<position>:<#rrggbb(aa)>,...` format
///
/// Every key contributes both a color and an alpha key, the alpha taken
/// from the color's hex alpha digits.
fn parse_keys(text: &str) -> Result<GradientRamp, Error> {
    let mut keys = Vec::new();
    for part in text.split(',') {
        let (position, color) = part
            .split_once(':')
            .ok_or("ramp key expected as <position>:<#rrggbb(aa)>")?;
        keys.push((
            position.trim().parse::<Scalar>()?,
            color.trim().parse::<Color>()?,
        ));
    }
    Ok(GradientRamp::from_keys(keys))
}

fn write_image(image: &PixelBuffer, w: impl Write, format: FileFormat) -> Result<(), Error> {
    match format {
        FileFormat::Png => image.write_png(w)?,
        FileFormat::Bmp => image.write_bmp(w)?,
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;

    let image = tracing::debug_span!("[render]").in_scope(|| rasterize(&args.params, &args.ramp))?;

    let format = match args.format {
        Some(format) => format,
        None if args.output_file.ends_with(".bmp") => FileFormat::Bmp,
        None => FileFormat::Png,
    };

    let save = tracing::debug_span!("[save]");
    {
        let _span = save.enter();
        if args.output_file != "-" {
            let image_file = BufWriter::new(File::create(&args.output_file)?);
            write_image(&image, image_file, format)?;
        } else {
            write_image(&image, std::io::stdout(), format)?;
        }
    }

    Ok(())
}
