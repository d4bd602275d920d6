// ============================================================================
// wandcut CLI — headless selection + commit via command-line arguments
// ============================================================================
//
// Usage examples:
//   wandcut --input photo.png --seed 120,80 --cut --output out.png
//   wandcut -i photo.png --seed 40,40 --tolerance 32 --paint 000000 --alpha 0.35
//   wandcut -i "shots/*.jpg" --seed 0,0 --cut --output-dir processed/
//
// No window is opened in CLI mode. Each input runs the same pipeline the GUI
// drives interactively: flood fill at the seed, border smoothing, then one
// cut or paint commit, then encode.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;

use crate::components::tools::{DEFAULT_BLUR_RADIUS, DEFAULT_TOLERANCE};
use crate::io::{encode_and_write, load_image_sync};
use crate::session::EditorSession;

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// wandcut headless image masker.
///
/// Select a contiguous color region by seed point and cut it to transparency
/// or tint it — no GUI required.
#[derive(Parser, Debug)]
#[command(
    name = "wandcut",
    about = "wandcut headless magic-wand masker",
    long_about = "Flood-fill a color region from a seed point and either cut it to\n\
                  transparency or paint it with a flat translucent color, without\n\
                  opening the GUI.\n\n\
                  Example:\n  \
                  wandcut --input photo.png --seed 120,80 --cut --output result.png\n  \
                  wandcut -i \"*.jpg\" --seed 10,10 --paint ff0000 --alpha 0.5 --output-dir out/"
)]
pub struct CliArgs {
    /// Input file(s). Glob patterns accepted (e.g. "*.png", "shots/*.jpg").
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Seed point in pixel coordinates, as "X,Y".
    #[arg(short, long, value_name = "X,Y")]
    pub seed: String,

    /// Flood-fill tolerance (1-255).
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE, value_name = "1-255")]
    pub tolerance: i32,

    /// Border smoothing radius in pixels (0 disables).
    #[arg(long, default_value_t = DEFAULT_BLUR_RADIUS, value_name = "PX")]
    pub blur_radius: u32,

    /// Cut the selection to transparency.
    #[arg(long, conflicts_with = "paint")]
    pub cut: bool,

    /// Paint the selection with this color (6 hex digits, no prefix).
    #[arg(long, value_name = "RRGGBB")]
    pub paint: Option<String>,

    /// Paint opacity in [0, 1]. Ignored with --cut.
    #[arg(long, default_value_t = 0.35, value_name = "0-1")]
    pub alpha: f32,

    /// Output file path. Only valid for single-file input.
    /// For batch input use --output-dir instead.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing. Results are written as PNG
    /// with the original file stem.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JPEG quality (1-100) when the output extension is .jpg/.jpeg.
    #[arg(short, long, default_value_t = 90, value_name = "1-100")]
    pub quality: u8,

    /// Print per-file timing and selection information.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Returns `true` when any CLI-mode flag is present in the real process
    /// arguments. Used by `main()` to route before creating a window.
    pub fn is_cli_mode() -> bool {
        std::env::args().any(|a| a == "--input" || a == "-i")
    }
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run all CLI processing and return an OS exit code:
/// `0` = all files succeeded, `1` = one or more files failed.
pub fn run(args: CliArgs) -> i32 {
    let inputs = resolve_inputs(&args.input);
    if inputs.is_empty() {
        eprintln!("error: no input files matched the given pattern(s).");
        return 1;
    }
    if inputs.len() > 1 && args.output.is_some() && args.output_dir.is_none() {
        eprintln!(
            "error: {} input files given but --output only accepts a single file path.\n\
             Use --output-dir to specify a destination directory for batch processing.",
            inputs.len()
        );
        return 1;
    }
    if !args.cut && args.paint.is_none() {
        eprintln!("error: choose an action: --cut or --paint RRGGBB.");
        return 1;
    }
    let (seed_x, seed_y) = match parse_seed(&args.seed) {
        Ok(seed) => seed,
        Err(e) => {
            eprintln!("error: {}", e);
            return 1;
        }
    };

    let mut failures = 0usize;
    for path in &inputs {
        let started = Instant::now();
        match process_one(&args, path, seed_x, seed_y) {
            Ok(out) => {
                if args.verbose {
                    println!(
                        "{} -> {} ({} ms)",
                        path.display(),
                        out.display(),
                        started.elapsed().as_millis()
                    );
                }
            }
            Err(e) => {
                eprintln!("error: {}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 { 1 } else { 0 }
}

/// Load one image, run select + commit, encode the result.
fn process_one(args: &CliArgs, path: &Path, seed_x: i32, seed_y: i32) -> Result<PathBuf, String> {
    let fb = load_image_sync(path)?;
    let mut session = EditorSession::new(fb);
    session.set_blur_radius(args.blur_radius);
    session.select(seed_x, seed_y, args.tolerance);

    let Some(mask) = session.mask() else {
        return Err(format!(
            "no region selected at seed {},{} (tolerance {})",
            seed_x, seed_y, args.tolerance
        ));
    };
    if args.verbose {
        println!(
            "{}: selected {} px at tolerance {}",
            path.display(),
            mask.included_count(),
            args.tolerance
        );
    }

    if args.cut {
        session.cut();
    } else if let Some(color) = &args.paint {
        session.paint(color, args.alpha)?;
    }

    let out = output_path(args, path);
    encode_and_write(session.framebuffer(), &out, args.quality)?;
    Ok(out)
}

/// Resolve glob patterns / literal paths into concrete files, keeping the
/// order the user gave them in.
fn resolve_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in patterns {
        let mut matched = false;
        if let Ok(entries) = glob::glob(pattern) {
            for path in entries.flatten() {
                if path.is_file() {
                    files.push(path);
                    matched = true;
                }
            }
        }
        // A literal path with glob metacharacters in its name still works.
        if !matched {
            let literal = PathBuf::from(pattern);
            if literal.is_file() {
                files.push(literal);
            }
        }
    }
    files
}

fn parse_seed(seed: &str) -> Result<(i32, i32), String> {
    let err = || format!("invalid seed '{}': expected \"X,Y\", e.g. --seed 120,80", seed);
    let (x, y) = seed.split_once(',').ok_or_else(err)?;
    Ok((
        x.trim().parse::<i32>().map_err(|_| err())?,
        y.trim().parse::<i32>().map_err(|_| err())?,
    ))
}

/// Destination for one input: explicit --output, a stem inside --output-dir,
/// or a `_out.png` sibling of the input.
fn output_path(args: &CliArgs, input: &Path) -> PathBuf {
    if let Some(dir) = &args.output_dir {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        return dir.join(format!("{}.png", stem));
    }
    if let Some(out) = &args.output {
        return out.clone();
    }
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{}_out.png", stem))
}
