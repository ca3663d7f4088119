//! The incremental build loop: record in, waves, record out.

use crate::driver::{source_inputs, Driver};
use crate::job::JobExecutor;
use drift_depgraph::{InputHandle, ModuleDepGraph};
use drift_diagnostics::{codes, Diagnostic, DiagnosticSink};
use drift_options::{Opt, ParsedOptions};
use drift_plan::{CompilationPlan, FileType, InputFile};
use drift_record::{
    admit_record, compute_options_hash, load_record, record_path, write_record, BuildRecord,
    FileTimestamp, JobResultKind, RecordError,
};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Runs an incremental build: load the previous record, seed the first
/// wave from modification times, propagate through the graph to a fixed
/// point, and persist the new record.
///
/// Every disablement path degrades to a clean build; the record is
/// still written so the next run can be incremental.
pub(crate) fn run_incremental(
    driver: &mut Driver,
    plan: &CompilationPlan,
    parsed: &ParsedOptions,
    executor: &mut dyn JobExecutor,
    sink: &DiagnosticSink,
) -> i32 {
    let show = parsed.has(Opt::DriverShowIncremental);
    let verify = parsed.has(Opt::DriverVerifyDependencyGraph);
    let version = driver.version().to_string();

    let record_file = plan
        .output_file_map
        .as_ref()
        .and_then(record_path)
        .map(Path::to_path_buf);
    let Some(record_file) = record_file else {
        sink.emit(Diagnostic::warning(
            codes::NO_BUILD_RECORD_ENTRY,
            "incremental compilation requires a build-record entry in the output file map",
        ));
        return driver.run_clean(plan, executor, sink);
    };

    let sources = source_inputs(plan);
    let options_hash = compute_options_hash(parsed);
    let build_start = FileTimestamp::from_system_time(SystemTime::now());
    let mtimes: BTreeMap<String, FileTimestamp> = sources
        .iter()
        .map(|(_, file)| {
            let ts = file
                .as_path()
                .and_then(FileTimestamp::of_file)
                .unwrap_or_default();
            (file.token(), ts)
        })
        .collect();

    let Some(previous) = load_previous(&record_file, &version, &options_hash, show, sink) else {
        return clean_and_record(
            driver,
            plan,
            executor,
            sink,
            &record_file,
            &version,
            &options_hash,
            build_start,
            mtimes,
        );
    };

    let with_paths: Vec<(InputHandle, Option<PathBuf>)> = sources
        .iter()
        .map(|(handle, file)| {
            let path = plan
                .output_file_map
                .as_ref()
                .and_then(|map| map.output_for(&file.token(), FileType::SwiftDeps))
                .map(Path::to_path_buf);
            (*handle, path)
        })
        .collect();
    let prev_inputs: BTreeSet<InputHandle> = sources
        .iter()
        .filter(|(_, file)| previous.input_mtimes.contains_key(&file.token()))
        .map(|(handle, _)| *handle)
        .collect();

    let built = match ModuleDepGraph::build_initial(&with_paths, &prev_inputs, verify, sink) {
        Ok(built) => built,
        Err(defect) => {
            sink.emit(Diagnostic::error(codes::INTERNAL_ERROR, defect.to_string()));
            return 2;
        }
    };
    let Some((mut graph, malformed)) = built else {
        return clean_and_record(
            driver,
            plan,
            executor,
            sink,
            &record_file,
            &version,
            &options_hash,
            build_start,
            mtimes,
        );
    };

    // First wave: modification-time changes, inputs whose prior summary
    // was unreadable, and everything the graph traces from the changed
    // inputs.
    let changed: BTreeSet<InputHandle> = sources
        .iter()
        .filter(|(_, file)| input_is_stale(file, &previous, &mtimes))
        .map(|(handle, _)| *handle)
        .collect();

    let mut pending: BTreeSet<InputHandle> = changed.clone();
    pending.extend(malformed.iter().copied());
    for input in &changed {
        pending.extend(graph.find_dependent_source_files(*input));
    }
    if show {
        sink.emit(Diagnostic::remark(
            codes::INCREMENTAL_STATUS,
            format!(
                "first wave: {} of {} inputs",
                pending.len(),
                sources.len()
            ),
        ));
    }

    let mut compiled: BTreeSet<InputHandle> = BTreeSet::new();
    let mut outcomes: BTreeMap<String, JobResultKind> = BTreeMap::new();
    let mut failed = false;

    while let Some(input) = pending.pop_first() {
        let file = plan.inputs[input.as_raw() as usize].clone();
        let job = driver.make_job(plan, input, &file);
        let outcome = executor.run_job(&job, plan);
        compiled.insert(input);

        if !outcome.is_success() {
            outcomes.insert(file.token(), JobResultKind::Failed);
            failed = true;
            break;
        }
        outcomes.insert(file.token(), JobResultKind::Succeeded);

        // Second wave: re-read this input's fresh summary and chase the
        // nodes it changed.
        match graph.integrate_summary_file(input) {
            Err(defect) => {
                sink.emit(Diagnostic::error(codes::INTERNAL_ERROR, defect.to_string()));
                return 2;
            }
            Ok(None) => {
                sink.emit(Diagnostic::warning(
                    codes::MALFORMED_SUMMARY_AFTER_COMPILE,
                    format!("compiled '{file}' but its dependency summary is unreadable"),
                ));
            }
            Ok(Some(changes)) => {
                graph.untrace_nodes(&changes);
                let mut next = graph.find_inputs_to_recompile_when_nodes_change(&changes);
                next.remove(&input);
                for follow_on in next {
                    if !compiled.contains(&follow_on) && pending.insert(follow_on) && show {
                        sink.emit(Diagnostic::remark(
                            codes::INCREMENTAL_STATUS,
                            format!(
                                "scheduling '{}' after '{}'",
                                plan.inputs[follow_on.as_raw() as usize], file
                            ),
                        ));
                    }
                }
            }
        }
    }

    // Inputs neither compiled nor left dangling by an abort were up to
    // date; record them as skipped so the next run can trust them.
    let mut skipped = BTreeSet::new();
    for (handle, file) in &sources {
        if compiled.contains(handle) || pending.contains(handle) {
            continue;
        }
        let token = file.token();
        outcomes.insert(token.clone(), JobResultKind::Skipped);
        skipped.insert(token);
    }

    let mut record = BuildRecord::new(version, options_hash, build_start);
    record.input_mtimes = mtimes;
    record.inputs_skipped = skipped;
    record.job_outcomes = outcomes;
    if let Err(error) = write_record(&record_file, &record) {
        sink.emit(Diagnostic::warning(
            codes::UNWRITABLE_BUILD_RECORD,
            error.to_string(),
        ));
    }

    if failed || sink.has_errors() {
        1
    } else {
        0
    }
}

/// Whether an input must recompile regardless of what the graph says:
/// its modification time moved, it is new, or the last run never got a
/// good compile out of it.
fn input_is_stale(
    file: &InputFile,
    previous: &BuildRecord,
    mtimes: &BTreeMap<String, FileTimestamp>,
) -> bool {
    let token = file.token();
    let mtime_moved = match previous.input_mtimes.get(&token) {
        None => true,
        Some(recorded) => mtimes.get(&token) != Some(recorded),
    };
    let previously_ok = match previous.job_outcomes.get(&token) {
        Some(JobResultKind::Succeeded | JobResultKind::Skipped) => true,
        Some(JobResultKind::Failed) => false,
        None => previous.inputs_skipped.contains(&token),
    };
    mtime_moved || !previously_ok
}

/// Loads and admits the previous record. `None` means incremental
/// starts cold this run.
fn load_previous(
    record_file: &Path,
    version: &str,
    options_hash: &str,
    show: bool,
    sink: &DiagnosticSink,
) -> Option<BuildRecord> {
    let record = match load_record(record_file) {
        Ok(record) => record,
        Err(RecordError::Unreadable { .. }) if !record_file.exists() => {
            // First build: nothing to admit.
            return None;
        }
        Err(error) => {
            sink.emit(Diagnostic::warning(
                codes::MALFORMED_BUILD_RECORD,
                error.to_string(),
            ));
            return None;
        }
    };
    match admit_record(&record, version, options_hash) {
        Ok(()) => Some(record),
        Err(reason) => {
            if show {
                sink.emit(Diagnostic::remark(
                    codes::INCREMENTAL_DISABLED,
                    format!("incremental compilation disabled: {reason}"),
                ));
            }
            None
        }
    }
}

/// A clean build that still writes a fresh record, so the next run has
/// a baseline.
#[allow(clippy::too_many_arguments)]
fn clean_and_record(
    driver: &mut Driver,
    plan: &CompilationPlan,
    executor: &mut dyn JobExecutor,
    sink: &DiagnosticSink,
    record_file: &Path,
    version: &str,
    options_hash: &str,
    build_start: FileTimestamp,
    mtimes: BTreeMap<String, FileTimestamp>,
) -> i32 {
    let sources: Vec<(InputHandle, InputFile)> = source_inputs(plan)
        .into_iter()
        .map(|(handle, file)| (handle, file.clone()))
        .collect();

    let mut outcomes = BTreeMap::new();
    let mut failed = false;
    for (handle, file) in &sources {
        let job = driver.make_job(plan, *handle, file);
        if executor.run_job(&job, plan).is_success() {
            outcomes.insert(file.token(), JobResultKind::Succeeded);
        } else {
            outcomes.insert(file.token(), JobResultKind::Failed);
            failed = true;
            break;
        }
    }

    let mut record = BuildRecord::new(version, options_hash.to_string(), build_start);
    record.input_mtimes = mtimes;
    record.job_outcomes = outcomes;
    if let Err(error) = write_record(record_file, &record) {
        sink.emit(Diagnostic::warning(
            codes::UNWRITABLE_BUILD_RECORD,
            error.to_string(),
        ));
    }

    if failed || sink.has_errors() {
        1
    } else {
        0
    }
}
