//! Tilt Field entry point
//!
//! Native builds run the field headless for a fixed number of ticks and
//! print the final snapshot as JSON. The browser build is driven from JS
//! through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, Result, bail};
    use serde::Serialize;

    use tilt_field::sim::{Bounds, ParticleField, ParticleView, TickInput, tick};
    use tilt_field::{FieldConfig, Preset};

    /// Command line options
    #[derive(Debug)]
    struct Options {
        preset: Preset,
        config_path: Option<String>,
        ticks: u64,
        seed: u64,
        bounds: Bounds,
        tilt: TickInput,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                preset: Preset::default(),
                config_path: None,
                ticks: 600,
                seed: 12345,
                bounds: Bounds::new(800.0, 600.0),
                tilt: TickInput::default(),
            }
        }
    }

    const USAGE: &str = "usage: tilt-field [--preset orchard|marbles|crowd] [--config FILE.json] \
                         [--ticks N] [--seed S] [--width W] [--height H] [--tilt FX,FY]";

    fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
        let mut opts = Options::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            if flag == "-h" || flag == "--help" {
                println!("{USAGE}");
                std::process::exit(0);
            }
            let value = args
                .next()
                .with_context(|| format!("missing value for {flag}\n{USAGE}"))?;
            match flag.as_str() {
                "--preset" => {
                    opts.preset = Preset::from_str(&value)
                        .with_context(|| format!("unknown preset '{value}'"))?;
                }
                "--config" => opts.config_path = Some(value),
                "--ticks" => opts.ticks = value.parse().context("--ticks")?,
                "--seed" => opts.seed = value.parse().context("--seed")?,
                "--width" => opts.bounds.width = value.parse().context("--width")?,
                "--height" => opts.bounds.height = value.parse().context("--height")?,
                "--tilt" => {
                    let (fx, fy) = value
                        .split_once(',')
                        .with_context(|| format!("--tilt expects FX,FY, got '{value}'"))?;
                    opts.tilt = TickInput::new(
                        fx.trim().parse().context("--tilt x")?,
                        fy.trim().parse().context("--tilt y")?,
                    );
                }
                _ => bail!("unknown argument '{flag}'\n{USAGE}"),
            }
        }

        Ok(opts)
    }

    fn load_config(opts: &Options) -> Result<FieldConfig> {
        match &opts.config_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {path}"))?;
                let config = FieldConfig::from_json(&json)
                    .with_context(|| format!("parsing config {path}"))?;
                log::info!("Loaded config from {}", path);
                Ok(config)
            }
            None => Ok(FieldConfig::from_preset(opts.preset)),
        }
    }

    #[derive(Serialize)]
    struct Report<'a> {
        seed: u64,
        ticks: u64,
        bounds: Bounds,
        config: &'a FieldConfig,
        particles: Vec<ParticleView>,
    }

    pub fn run() -> Result<()> {
        let opts = parse_args(std::env::args().skip(1))?;
        let config = load_config(&opts)?;

        let mut field = ParticleField::initialize(opts.bounds, config, opts.seed)?;
        log::info!(
            "Running {} ticks with tilt ({}, {})",
            opts.ticks,
            opts.tilt.tilt.x,
            opts.tilt.tilt.y
        );

        for _ in 0..opts.ticks {
            tick(&mut field, &opts.tilt);
        }

        let report = Report {
            seed: field.seed(),
            ticks: field.time_ticks(),
            bounds: field.bounds(),
            config: field.config(),
            particles: field.particles(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Tilt Field (native) starting...");
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
