use crate::cli::ReplayArgs;
use crate::config::{PartialRunConfig, RunSettings};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use std::io::BufWriter;
use std::path::Path;
use stepscore::core::io::csv_sink::CsvTableSink;
use stepscore::core::models::record::step_table_schema;
use stepscore::engine::error::EngineError;
use stepscore::engine::progress::ProgressReporter;
use stepscore::workflows::{self, replay::ReplayResult};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

pub fn run(args: ReplayArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialRunConfig::from_file(path)?,
        None => PartialRunConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_cli(&args)?;

    let result = execute(&settings, args.no_progress)?;

    if result.summary.events == 0 {
        warn!("The step trace contained no events.");
        println!("Warning: the step trace contained no events.");
    }
    println!(
        "✓ Step table with {} row(s) written to: {}",
        result.steps,
        settings.output.display()
    );
    println!(
        "  Cumulated energy in scoring volume over {} event(s): {:.6} MeV (rms = {:.6} MeV, mean = {:.6} MeV)",
        result.summary.events,
        result.summary.total_edep,
        result.summary.rms_edep,
        result.summary.mean_edep()
    );
    Ok(())
}

fn execute(settings: &RunSettings, no_progress: bool) -> Result<ReplayResult> {
    info!("Writing step table '{}' to {:?}", settings.replay.table_name, settings.output);
    let output_dir = match settings.output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    // Dropped, and so removed, unless the replay succeeds.
    let staging = NamedTempFile::new_in(output_dir)?;
    debug!("Staging step table in {:?}", staging.path());

    let mut sink = CsvTableSink::new();
    let table = sink
        .create_table(
            step_table_schema(&settings.replay.table_name),
            BufWriter::new(staging),
        )
        .map_err(EngineError::from)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = if no_progress {
        ProgressReporter::new()
    } else {
        ProgressReporter::with_callback(progress_handler.get_callback())
    };

    info!("Invoking the core replay workflow...");
    let result = workflows::replay::run(&settings.replay, &mut sink, table, &reporter)?;

    let writer = sink
        .into_writers()
        .map_err(EngineError::from)?
        .pop()
        .ok_or_else(|| CliError::Config("step table writer is missing".to_string()))?;
    let staging = writer.into_inner().map_err(|e| e.into_error())?;
    staging
        .persist(&settings.output)
        .map_err(|e| CliError::Io(e.error))?;

    info!(
        "Replay finished: {} step(s) in {} event(s).",
        result.steps, result.summary.events
    );
    Ok(result)
}
