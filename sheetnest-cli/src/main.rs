use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use thousands::Separable;

use sheetnest::config::NestConfig;
use sheetnest::io::ext_repr::ExtNestingRequest;
use sheetnest::io::svg::sheet_to_svg;
use sheetnest::io::{Importer, NestingJob, export};
use sheetnest::opt::build_strategy;
use sheetnest::sched::ProductionScheduler;
use sheetnest::util::CancelToken;
use sheetnest_cli::io::cli::Cli;
use sheetnest_cli::io::output::{ProductionOutput, SingleOutput, Timing};
use sheetnest_cli::{EPOCH, io};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;
    let start = *EPOCH;

    let request: ExtNestingRequest = io::read_json(args.input_file.as_path())?;
    let mut job = Importer::default().import_request(&request)?;

    match args.config_file {
        None => {
            warn!("[MAIN] no config file provided, use --config-file for a custom config");
        }
        Some(config_file) => {
            let overrides: NestConfig = io::read_json(config_file.as_path())?;
            job.config.annealing = overrides.annealing;
            job.config.genetic = overrides.genetic;
            if overrides.prng_seed.is_some() {
                job.config.prng_seed = overrides.prng_seed;
            }
            info!("[MAIN] applied config overrides: {:?}", job.config);
        }
    }

    if !job.rejected_ids.is_empty() {
        warn!(
            "[MAIN] rejected {} part(s) at ingestion: {:?}",
            job.rejected_ids.len(),
            job.rejected_ids
        );
    }

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no stem")?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    match job.sheet_count {
        Some(sheet_count) if sheet_count > 0 => main_production(
            request,
            job,
            sheet_count,
            input_file_stem,
            args.solution_folder,
            start,
        ),
        _ => main_single(request, job, input_file_stem, args.solution_folder, start),
    }
}

fn main_single(
    request: ExtNestingRequest,
    job: NestingJob,
    input_stem: &str,
    output_folder: PathBuf,
    start: Instant,
) -> Result<()> {
    let strategy = build_strategy(job.strategy, &job.config);
    let cancel = CancelToken::new();

    let pack_start = Instant::now();
    let result = strategy.pack(&job.parts, &job.sheet, job.spacing, &cancel);
    let packing_ms = pack_start.elapsed().as_millis() as u64;

    info!(
        "[MAIN] placed {}/{} parts, utilization {:.2}%, packing took {}ms",
        result.placements.len(),
        job.parts.len(),
        result.utilization,
        packing_ms.separate_with_commas()
    );

    {
        let output = SingleOutput {
            solution: export::export_packing(&result),
            config: job.config.clone(),
            timing: Timing {
                packing_ms,
                total_ms: start.elapsed().as_millis() as u64,
            },
            request,
        };
        let solution_path = output_folder.join(format!("sol_{input_stem}.json"));
        io::write_json(&output, &solution_path)?;
    }

    {
        let svg_path = output_folder.join(format!("sol_{input_stem}.svg"));
        let document = sheet_to_svg(&job.sheet, &result.placements, &job.parts, job.spacing);
        io::write_svg(&document, &svg_path)?;
    }

    Ok(())
}

fn main_production(
    request: ExtNestingRequest,
    job: NestingJob,
    sheet_count: usize,
    input_stem: &str,
    output_folder: PathBuf,
    start: Instant,
) -> Result<()> {
    let strategy = build_strategy(job.strategy, &job.config);
    let scheduler = ProductionScheduler::new(strategy.as_ref()).pack_all_items(job.pack_all_items);
    let cancel = CancelToken::new();

    let pack_start = Instant::now();
    let result = scheduler.run(&job.parts, &job.sheet, sheet_count, job.spacing, &cancel);
    let packing_ms = pack_start.elapsed().as_millis() as u64;

    let placed_total: usize = result.quantities.values().sum();
    info!(
        "[MAIN] production run placed {} copies over {} sheets, total utilization {:.2}%, packing took {}ms",
        placed_total.separate_with_commas(),
        result.sheets.len(),
        result.total_utilization,
        packing_ms.separate_with_commas()
    );

    {
        let output = ProductionOutput {
            solution: export::export_production(&result),
            config: job.config.clone(),
            timing: Timing {
                packing_ms,
                total_ms: start.elapsed().as_millis() as u64,
            },
            request,
        };
        let solution_path = output_folder.join(format!("sol_{input_stem}.json"));
        io::write_json(&output, &solution_path)?;
    }

    for sheet_result in &result.sheets {
        let svg_path =
            output_folder.join(format!("sol_{input_stem}_{}.svg", sheet_result.sheet_index));
        let document = sheet_to_svg(
            &job.sheet,
            &sheet_result.placements,
            &job.parts,
            job.spacing,
        );
        io::write_svg(&document, &svg_path)?;
    }

    Ok(())
}
