use crate::reports::{self, FileReport};
use clap::Args;
use image::RgbImage;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tileswap::api::{self, CaptchaContent, SolveOutcome};
use tileswap::config::Config;
use tileswap::error::SolveResult;
use tileswap::optimizer::{SearchOptions, StepObserver, StepReport};
use tileswap::raster::{self, ImageExtension};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub config: Config,

    /// Content bundle JSON files (solved in parallel when more than one)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Write every evaluated step to this CSV file
    #[arg(long)]
    pub trace_csv: Option<PathBuf>,

    /// Save each intermediate render, encoded with the bundle's extension
    #[arg(long)]
    pub render_dir: Option<PathBuf>,

    /// Print the encoded answer for the verification call
    #[arg(long, default_value_t = false)]
    pub answer: bool,

    /// Print one JSON outcome per file instead of the table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Records the step trace and optionally dumps renders to disk.
struct TraceRecorder {
    stem: String,
    render_dir: Option<PathBuf>,
    extension: ImageExtension,
    steps: Vec<StepReport>,
}

impl StepObserver for TraceRecorder {
    fn on_step(&mut self, report: &StepReport, rendered: &RgbImage) -> SolveResult<bool> {
        if let Some(dir) = &self.render_dir {
            let path = dir.join(format!(
                "{}_step{:03}.{}",
                self.stem,
                report.step,
                self.extension.file_suffix()
            ));
            fs::write(path, raster::encode(rendered, self.extension)?)?;
        }
        self.steps.push(report.clone());
        Ok(true)
    }
}

fn solve_file(
    path: &Path,
    options: &SearchOptions,
    render_dir: Option<&Path>,
) -> SolveResult<FileReport> {
    let content = CaptchaContent::load_from_file(path)?;
    let name = path.display().to_string();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bundle".to_string());

    let mut recorder = TraceRecorder {
        stem,
        render_dir: render_dir.map(Path::to_path_buf),
        extension: content.extension,
        steps: Vec::new(),
    };
    let outcome = api::solve_with(&content, options, &mut recorder)?;
    info!("📦 {}: step count {}", name, outcome.best_step);

    Ok(FileReport {
        name,
        outcome,
        trace: recorder.steps,
    })
}

pub fn run(args: SolveArgs, config: Config) -> SolveResult<()> {
    let options = SearchOptions::from(&config);
    if let Some(dir) = &args.render_dir {
        fs::create_dir_all(dir)?;
    }

    info!(
        "🧩 Solving {} bundle(s) on a {}x{} grid (max {} steps)",
        args.files.len(),
        options.tile_count,
        options.tile_count,
        options.max_steps
    );

    let results = args
        .files
        .par_iter()
        .map(|path| solve_file(path, &options, args.render_dir.as_deref()))
        .collect::<SolveResult<Vec<_>>>()?;

    if args.json {
        for r in &results {
            let outcome = SolveOutcome::from(r.outcome.clone());
            println!("{}", serde_json::to_string(&outcome)?);
        }
    } else {
        reports::print_solve_report(&results);
    }

    if args.answer {
        for r in &results {
            println!("answer {}: {}", r.name, api::encode_answer(&r.outcome.best_swaps)?);
        }
    }

    if let Some(path) = &args.trace_csv {
        reports::write_trace_csv(path, &results)?;
        info!("📝 Trace written to {}", path.display());
    }

    Ok(())
}
