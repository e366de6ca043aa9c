//! Glyphweave CLI - Draw character art from a prompt.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use glyphweave::config::GlyphweaveConfig;
use glyphweave::motifs::{self, Emotion};
use glyphweave::{ArtEngine, GeneratorKind, SizeClass};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "glyphweave")]
#[command(about = "Generate procedural character art from free-text prompts")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "glyphweave.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the full pipeline for a prompt
    Generate {
        /// What to draw
        #[arg(short, long)]
        prompt: String,

        /// Size class relative to the display
        #[arg(long, value_enum)]
        size: Option<SizeArg>,

        /// Seed for generation
        #[arg(short = 'S', long, conflicts_with = "stable")]
        seed: Option<u64>,

        /// Derive the seed from the prompt so it always draws the same piece
        #[arg(long)]
        stable: bool,

        /// Display width in columns
        #[arg(long)]
        columns: Option<usize>,

        /// Display height in lines
        #[arg(long)]
        lines: Option<usize>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the artwork as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a single generator and print the bare canvas
    Render {
        /// Generator name, e.g. "mandelbrot" or "flow_field"
        #[arg(short, long)]
        style: GeneratorKind,

        /// Width of the canvas
        #[arg(long, default_value = "60")]
        width: usize,

        /// Height of the canvas
        #[arg(long, default_value = "20")]
        height: usize,

        /// Seed for generation
        #[arg(short = 'S', long)]
        seed: Option<u64>,
    },

    /// Render every generator for comparison
    Showcase {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Seed for consistent results
        #[arg(short = 'S', long, default_value = "42")]
        seed: u64,
    },

    /// Print one of the fixed abstract pieces
    Abstract {
        /// Seed for choosing the piece
        #[arg(short = 'S', long)]
        seed: Option<u64>,
    },

    /// Print a small face for an emotion
    Emotion {
        #[arg(value_enum)]
        emotion: EmotionArg,
    },

    /// Restyle a line of text
    Stylize {
        text: String,

        #[arg(short, long, value_enum, default_value = "braille")]
        style: TextStyleArg,

        /// Seed for block substitution
        #[arg(short = 'S', long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum SizeArg {
    Tiny,
    Small,
    Medium,
    Large,
    Full,
}

impl SizeArg {
    fn to_class(self) -> SizeClass {
        match self {
            SizeArg::Tiny => SizeClass::Tiny,
            SizeArg::Small => SizeClass::Small,
            SizeArg::Medium => SizeClass::Medium,
            SizeArg::Large => SizeClass::Large,
            SizeArg::Full => SizeClass::Full,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum EmotionArg {
    Happy,
    Sad,
    Excited,
    Calm,
}

impl EmotionArg {
    fn to_emotion(self) -> Emotion {
        match self {
            EmotionArg::Happy => Emotion::Happy,
            EmotionArg::Sad => Emotion::Sad,
            EmotionArg::Excited => Emotion::Excited,
            EmotionArg::Calm => Emotion::Calm,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum TextStyleArg {
    /// Braille cells for a..j
    Braille,
    /// Random block glyphs
    Blocks,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("glyphweave=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = GlyphweaveConfig::load(Path::new(&cli.config))?;

    match cli.command {
        Commands::Generate {
            prompt,
            size,
            seed,
            stable,
            columns,
            lines,
            output,
            json,
        } => {
            let mut engine = ArtEngine::new(config.sizing(), config.selector());
            if columns.is_some() || lines.is_some() {
                let (width, height) = engine.sizing().available();
                engine.refresh_display_bounds(columns.unwrap_or(width), lines.unwrap_or(height));
            }

            let seed = if stable {
                ArtEngine::seed_for_prompt(&prompt)
            } else {
                seed.unwrap_or_else(rand::random)
            };
            let size = size.map(SizeArg::to_class).unwrap_or(config.output.size);
            tracing::info!(seed, %size, "generating");

            let mut rng = StdRng::seed_from_u64(seed);
            let art = engine.generate_art(&prompt, Some(size), &mut rng)?;

            let rendered = if json || config.output.json {
                serde_json::to_string_pretty(&art)?
            } else {
                art.text()
            };

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        fs::create_dir_all(parent)?;
                    }
                    fs::write(&path, &rendered)?;
                    tracing::info!(path = %path.display(), styles = ?art.styles, "saved");
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Render {
            style,
            width,
            height,
            seed,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            let mut rng = StdRng::seed_from_u64(seed);
            let canvas = style.generate(width, height, &mut rng);
            println!("{}", canvas);
        }

        Commands::Showcase { output_dir, seed } => {
            let output_dir = output_dir
                .unwrap_or_else(|| PathBuf::from(&config.output.directory).join("showcase"));
            fs::create_dir_all(&output_dir)?;

            let (width, height) = config.sizing().size_for(config.output.size);
            println!("Generating showcase with seed {} at {}x{}...", seed, width, height);

            for kind in GeneratorKind::ALL {
                let mut rng = StdRng::seed_from_u64(seed);
                let canvas = kind.generate(width, height, &mut rng);

                let filename = format!("{}.txt", kind.name());
                fs::write(output_dir.join(&filename), canvas.to_text())?;
                println!("  Created {}", filename);
            }

            println!("Done! Showcase saved to {}", output_dir.display());
        }

        Commands::Abstract { seed } => {
            let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(rand::random));
            println!("{}", ArtEngine::abstract_art(&mut rng).text());
        }

        Commands::Emotion { emotion } => {
            println!("{}", emotion.to_emotion().art());
        }

        Commands::Stylize { text, style, seed } => {
            let styled = match style {
                TextStyleArg::Braille => motifs::to_braille(&text),
                TextStyleArg::Blocks => {
                    let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(rand::random));
                    motifs::to_blocks(&text, &mut rng)
                }
            };
            println!("{}", styled);
        }
    }

    Ok(())
}
