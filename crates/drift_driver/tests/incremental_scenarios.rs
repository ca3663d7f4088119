//! The two-wave incremental rebuild scenario, end to end.
//!
//! Five inputs: `a` defines `fA` (used by `b`), `b` defines `gB` (used
//! by `c`), `d` uses a symbol `fNew` nobody defined yet, and `e` stands
//! alone. The executor below plays the frontend: each "compile" writes
//! the input's dependency summary where the output file map says it
//! goes.

use drift_common::ContentHash;
use drift_depgraph::{DeclAspect, DependencyKey, ProvidedEntity, SourceSummary};
use drift_diagnostics::DiagnosticSink;
use drift_driver::{CompileJob, Driver, JobExecutor, JobOutcome, PrintingDelegate};
use drift_plan::{CompilationPlan, FileType, OutputFileMap, WHOLE_MODULE_ENTRY};
use drift_record::{load_record, JobResultKind};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Stands in for the frontend: "compiling" an input writes its current
/// dependency summary.
struct FrontendSim {
    summaries: HashMap<String, (PathBuf, SourceSummary)>,
    compiled: Vec<String>,
}

impl FrontendSim {
    fn new() -> Self {
        Self {
            summaries: HashMap::new(),
            compiled: Vec::new(),
        }
    }

    fn set_summary(&mut self, token: &str, deps_path: &Path, summary: SourceSummary) {
        self.summaries
            .insert(token.to_string(), (deps_path.to_path_buf(), summary));
    }
}

impl JobExecutor for FrontendSim {
    fn run_job(&mut self, job: &CompileJob, _plan: &CompilationPlan) -> JobOutcome {
        for token in &job.inputs {
            let (path, summary) = &self.summaries[token];
            summary.save(path).unwrap();
            self.compiled.push(token.clone());
        }
        JobOutcome::Succeeded
    }
}

fn provide(name: &str, body: &str) -> ProvidedEntity {
    ProvidedEntity {
        key: DependencyKey::top_level(DeclAspect::Interface, name),
        fingerprint: Some(ContentHash::from_bytes(body.as_bytes())),
    }
}

fn depend(name: &str) -> DependencyKey {
    DependencyKey::top_level(DeclAspect::Interface, name)
}

struct Project {
    dir: tempfile::TempDir,
    ofm_path: PathBuf,
    tokens: Vec<String>,
    deps_paths: Vec<PathBuf>,
    record_file: PathBuf,
}

impl Project {
    /// Lays out five source files, their build products, and the
    /// output file map (with the whole-module build-record entry).
    fn create() -> Project {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("build");
        std::fs::create_dir_all(&build).unwrap();

        let names = ["a", "b", "c", "d", "e"];
        let mut map = OutputFileMap::new();
        let mut tokens = Vec::new();
        let mut deps_paths = Vec::new();
        for name in names {
            let source = dir.path().join(format!("{name}.swift"));
            std::fs::write(&source, format!("// {name}")).unwrap();
            let token = source.to_string_lossy().into_owned();

            let object = build.join(format!("{name}.o"));
            let deps = build.join(format!("{name}.swiftdeps"));
            map.insert(token.clone(), FileType::Object, object);
            map.insert(token.clone(), FileType::SwiftDeps, deps.clone());
            tokens.push(token);
            deps_paths.push(deps);
        }

        let record_file = build.join("module.swiftdeps");
        map.insert(WHOLE_MODULE_ENTRY, FileType::SwiftDeps, record_file.clone());

        let ofm_path = dir.path().join("ofm.json");
        map.save(&ofm_path).unwrap();

        Project {
            dir,
            ofm_path,
            tokens,
            deps_paths,
            record_file,
        }
    }

    fn argv(&self) -> Vec<String> {
        let mut argv = vec![
            "swiftc".to_string(),
            "-incremental".to_string(),
            "-output-file-map".to_string(),
            self.ofm_path.to_string_lossy().into_owned(),
        ];
        argv.extend(self.tokens.iter().cloned());
        argv
    }

    /// The frontend behavior for the first build.
    fn initial_summaries(&self, sim: &mut FrontendSim) {
        let [a, b, c, d, e] = [0, 1, 2, 3, 4];
        sim.set_summary(
            &self.tokens[a],
            &self.deps_paths[a],
            SourceSummary {
                provides: vec![provide("fA", "func fA() v1")],
                depends: vec![],
            },
        );
        sim.set_summary(
            &self.tokens[b],
            &self.deps_paths[b],
            SourceSummary {
                provides: vec![provide("gB", "func gB() v1")],
                depends: vec![depend("fA")],
            },
        );
        sim.set_summary(
            &self.tokens[c],
            &self.deps_paths[c],
            SourceSummary {
                provides: vec![provide("hC", "func hC() v1")],
                depends: vec![depend("gB")],
            },
        );
        sim.set_summary(
            &self.tokens[d],
            &self.deps_paths[d],
            SourceSummary {
                provides: vec![provide("qD", "func qD() v1")],
                depends: vec![depend("fNew")],
            },
        );
        sim.set_summary(
            &self.tokens[e],
            &self.deps_paths[e],
            SourceSummary {
                provides: vec![provide("pE", "func pE() v1")],
                depends: vec![],
            },
        );
    }

    /// Marks `a` as modified by doctoring its recorded mtime, which is
    /// deterministic where touching files is not.
    fn mark_input_changed(&self, index: usize) {
        let mut record = load_record(&self.record_file).unwrap();
        let entry = record
            .input_mtimes
            .get_mut(&self.tokens[index])
            .expect("input recorded");
        entry.secs = entry.secs.wrapping_sub(1000);
        drift_record::write_record(&self.record_file, &record).unwrap();
    }
}

fn run(project: &Project, sim: &mut FrontendSim) -> (i32, DiagnosticSink) {
    let mut driver = Driver::new("0.1.0");
    let mut delegate = PrintingDelegate;
    let sink = DiagnosticSink::new();
    let code = driver.run(
        &project.argv(),
        Some(project.dir.path()),
        sim,
        &mut delegate,
        &sink,
    );
    (code, sink)
}

#[test]
fn two_wave_incremental_rebuild() {
    let project = Project::create();

    // First build: no record yet, so everything compiles clean and a
    // record is written.
    let mut sim = FrontendSim::new();
    project.initial_summaries(&mut sim);
    let (code, sink) = run(&project, &mut sim);
    assert_eq!(code, 0, "diagnostics: {:?}", sink.diagnostics());
    assert_eq!(sim.compiled.len(), 5);
    let record = load_record(&project.record_file).unwrap();
    assert_eq!(record.input_mtimes.len(), 5);
    assert!(record.inputs_skipped.is_empty());

    // Second build: `a` changed. Its new summary re-fingerprints `fA`
    // and defines the previously missing `fNew` that `d` uses.
    project.mark_input_changed(0);
    let mut sim = FrontendSim::new();
    project.initial_summaries(&mut sim);
    sim.set_summary(
        &project.tokens[0],
        &project.deps_paths[0],
        SourceSummary {
            provides: vec![provide("fA", "func fA() v2"), provide("fNew", "func fNew()")],
            depends: vec![],
        },
    );

    let (code, sink) = run(&project, &mut sim);
    assert_eq!(code, 0, "diagnostics: {:?}", sink.diagnostics());

    // First wave: a itself, plus b and (transitively) c. Second wave:
    // integrating a's fresh summary surfaces fNew, whose use drags d in.
    // e stays untouched.
    assert!(sim.compiled.contains(&project.tokens[0]));
    assert!(sim.compiled.contains(&project.tokens[1]));
    assert!(sim.compiled.contains(&project.tokens[2]));
    assert!(sim.compiled.contains(&project.tokens[3]));
    assert!(!sim.compiled.contains(&project.tokens[4]));
    assert_eq!(sim.compiled[0], project.tokens[0], "a compiles first");

    // The new record reflects the wave: four compiled, one skipped.
    let record = load_record(&project.record_file).unwrap();
    assert_eq!(
        record.job_outcomes[&project.tokens[0]],
        JobResultKind::Succeeded
    );
    assert_eq!(
        record.job_outcomes[&project.tokens[4]],
        JobResultKind::Skipped
    );
    let expected_skipped: std::collections::BTreeSet<String> =
        std::iter::once(project.tokens[4].clone()).collect();
    assert_eq!(record.inputs_skipped, expected_skipped);
}

#[test]
fn unchanged_project_skips_everything() {
    let project = Project::create();
    let mut sim = FrontendSim::new();
    project.initial_summaries(&mut sim);
    let (code, _) = run(&project, &mut sim);
    assert_eq!(code, 0);

    let mut sim = FrontendSim::new();
    project.initial_summaries(&mut sim);
    let (code, sink) = run(&project, &mut sim);
    assert_eq!(code, 0, "diagnostics: {:?}", sink.diagnostics());
    assert!(sim.compiled.is_empty(), "no changes means no jobs");

    let record = load_record(&project.record_file).unwrap();
    assert_eq!(record.inputs_skipped.len(), 5);
}

#[test]
fn changed_options_force_a_clean_rebuild() {
    let project = Project::create();
    let mut sim = FrontendSim::new();
    project.initial_summaries(&mut sim);
    let (code, _) = run(&project, &mut sim);
    assert_eq!(code, 0);

    // Same project, but now with `-g`: the options hash moves, the
    // record is rejected, and everything rebuilds.
    let mut argv = project.argv();
    argv.insert(1, "-g".to_string());
    let mut sim = FrontendSim::new();
    project.initial_summaries(&mut sim);
    let mut driver = Driver::new("0.1.0");
    let mut delegate = PrintingDelegate;
    let sink = DiagnosticSink::new();
    let code = driver.run(&argv, Some(project.dir.path()), &mut sim, &mut delegate, &sink);
    assert_eq!(code, 0, "diagnostics: {:?}", sink.diagnostics());
    assert_eq!(sim.compiled.len(), 5);
}

#[test]
fn version_change_forces_a_clean_rebuild() {
    let project = Project::create();
    let mut sim = FrontendSim::new();
    project.initial_summaries(&mut sim);
    let (code, _) = run(&project, &mut sim);
    assert_eq!(code, 0);

    let mut sim = FrontendSim::new();
    project.initial_summaries(&mut sim);
    let mut driver = Driver::new("0.2.0");
    let mut delegate = PrintingDelegate;
    let sink = DiagnosticSink::new();
    let code = driver.run(
        &project.argv(),
        Some(project.dir.path()),
        &mut sim,
        &mut delegate,
        &sink,
    );
    assert_eq!(code, 0);
    assert_eq!(sim.compiled.len(), 5, "version mismatch rejects the record");
}
