use percept::{
    Lang, MapTransform, PerceptConfig, PositioningOptions, PositioningResult, Project, Viewport,
    geom,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Percept(percept::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Percept(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<percept::Error> for CliError {
    fn from(value: percept::Error) -> Self {
        Self::Percept(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Position,
    Screen,
    Hit,
    Direct,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    benchmark: Option<String>,
    configs: Vec<String>,
    lang: Option<Lang>,
    width: f64,
    height: f64,
    zoom: f64,
    pointer_x: Option<f64>,
    pointer_y: Option<f64>,
    x_attr: Option<String>,
    y_attr: Option<String>,
}

fn usage() -> &'static str {
    "percept-cli\n\
\n\
USAGE:\n\
  percept-cli [position] [--pretty] [--benchmark <name>] [--config <file.json|yaml>]... [--lang en|es] [<path>|-]\n\
  percept-cli screen [--width <w>] [--height <h>] [--zoom <z>] [<path>|-]\n\
  percept-cli hit --x <px> --y <py> [--width <w>] [--height <h>] [--zoom <z>] [<path>|-]\n\
  percept-cli direct --x-attr <id> --y-attr <id> [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the project JSON is read from stdin.\n\
  - --benchmark, --config and --lang apply to every command; repeated --config files merge.\n\
  - screen/hit use an 800x600 canvas at zoom 1 unless told otherwise.\n\
  - Set PERCEPT_LOG (e.g. PERCEPT_LOG=debug) for pipeline logs on stderr.\n\
"
}

fn next_f64<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<f64, CliError> {
    let Some(raw) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !v.is_finite() {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn next_string<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<String, CliError> {
    it.next().cloned().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Position,
        width: 800.0,
        height: 600.0,
        zoom: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "position" => args.command = Command::Position,
            "screen" => args.command = Command::Screen,
            "hit" => args.command = Command::Hit,
            "direct" => args.command = Command::Direct,
            "--pretty" => args.pretty = true,
            "--benchmark" => args.benchmark = Some(next_string(&mut it)?),
            "--config" => args.configs.push(next_string(&mut it)?),
            "--lang" => {
                let raw = next_string(&mut it)?;
                args.lang = Some(raw.parse().map_err(|_| CliError::Usage(usage()))?);
            }
            "--width" => args.width = next_f64(&mut it)?,
            "--height" => args.height = next_f64(&mut it)?,
            "--zoom" => args.zoom = next_f64(&mut it)?,
            "--x" => args.pointer_x = Some(next_f64(&mut it)?),
            "--y" => args.pointer_y = Some(next_f64(&mut it)?),
            "--x-attr" => args.x_attr = Some(next_string(&mut it)?),
            "--y-attr" => args.y_attr = Some(next_string(&mut it)?),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.width <= 0.0 || args.height <= 0.0 || args.zoom <= 0.0 {
        return Err(CliError::Usage(usage()));
    }
    match args.command {
        Command::Hit if args.pointer_x.is_none() || args.pointer_y.is_none() => {
            return Err(CliError::Usage(usage()));
        }
        Command::Direct if args.x_attr.is_none() || args.y_attr.is_none() => {
            return Err(CliError::Usage(usage()));
        }
        _ => {}
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_config(path: &str) -> Result<PerceptConfig, CliError> {
    let text = std::fs::read_to_string(path)?;
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let cfg = if is_yaml {
        PerceptConfig::from_yaml_str(&text)
    } else {
        PerceptConfig::from_json_str(&text)
    };
    cfg.map_err(|err| CliError::Percept(err.into()))
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

#[derive(Serialize)]
struct ScreenMarker<'a> {
    name: &'a str,
    x: f64,
    y: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScreenOut<'a> {
    width: f64,
    height: f64,
    zoom: f64,
    scale: f64,
    brands: Vec<ScreenMarker<'a>>,
    attributes: Vec<ScreenMarker<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HitOut<'a> {
    index: Option<usize>,
    brand: Option<&'a str>,
    map_x: f64,
    map_y: f64,
}

fn screen_markers<'a>(
    transform: &MapTransform,
    names: &'a [String],
    coords: &[percept::Point],
) -> Vec<ScreenMarker<'a>> {
    names
        .iter()
        .zip(coords)
        .map(|(name, &p)| {
            let s = transform.to_screen(p);
            ScreenMarker {
                name: name.as_str(),
                x: s.x,
                y: s.y,
            }
        })
        .collect()
}

fn run(args: Args) -> Result<(), CliError> {
    tracing::debug!(command = ?args.command, input = ?args.input, "percept-cli");
    let text = read_input(args.input.as_deref())?;
    let project = Project::from_json_str(&text).map_err(percept::Error::from)?;

    // Later files override earlier ones key by key; flags override files.
    let mut cfg = PerceptConfig::default();
    for path in &args.configs {
        cfg.deep_merge(load_config(path)?.as_value());
    }
    if let Some(lang) = args.lang {
        cfg.set_value("lang", Value::String(lang.code().to_string()));
    }

    let mut opts = PositioningOptions::from_config(&cfg);
    if let Some(name) = args.benchmark {
        opts = opts.with_benchmark(name);
    }

    let result: PositioningResult = percept::position(&project, &opts)?;
    let viewport = Viewport::new(args.width, args.height, args.zoom);
    let transform = opts.viewport.transform(&viewport);

    match args.command {
        Command::Position => write_json(&result, args.pretty),
        Command::Screen => {
            let out = ScreenOut {
                width: args.width,
                height: args.height,
                zoom: args.zoom,
                scale: transform.scale,
                brands: screen_markers(&transform, &result.brands, &result.brand_coords),
                attributes: screen_markers(
                    &transform,
                    &result.attribute_ids,
                    &result.attr_coords,
                ),
            };
            write_json(&out, args.pretty)
        }
        Command::Hit => {
            let (Some(x), Some(y)) = (args.pointer_x, args.pointer_y) else {
                return Err(CliError::Usage(usage()));
            };
            let pointer = geom::screen_point(x, y);
            let index = result.hit_brand(&transform, pointer, opts.viewport.hover_radius);
            let at = transform.to_map(pointer);
            let out = HitOut {
                index,
                brand: index.map(|i| result.brands[i].as_str()),
                map_x: at.x,
                map_y: at.y,
            };
            write_json(&out, args.pretty)
        }
        Command::Direct => {
            let (Some(x_attr), Some(y_attr)) = (args.x_attr.as_deref(), args.y_attr.as_deref())
            else {
                return Err(CliError::Usage(usage()));
            };
            let map = result.direct_map(x_attr, y_attr)?;
            write_json(&map, args.pretty)
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("PERCEPT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
