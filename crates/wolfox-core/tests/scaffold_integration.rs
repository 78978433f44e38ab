//! End-to-end scaffolding tests against the shipped templates.
//!
//! External tools are replaced by `FakeTools`, which emulates `git init`,
//! `yarn init --yes` and `yarn add` on disk.

use serde_json::{json, Map, Value};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wolfox_core::config::settings::bundled_template_root;
use wolfox_core::{
    driver, BuildOutcome, BuildStep, CommandRunner, ExternalCommand, ProjectKind, ProjectRequest,
    Prompter, RunOutcome, ScaffoldError, Settings,
};

#[derive(Default)]
struct FakeTools {
    calls: RefCell<Vec<(String, PathBuf)>>,
    fail_on: Option<&'static str>,
}

impl FakeTools {
    fn failing_on(needle: &'static str) -> Self {
        Self {
            fail_on: Some(needle),
            ..Default::default()
        }
    }

    fn lines_in(&self, dir: &Path) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|(_, cwd)| cwd == dir)
            .map(|(line, _)| line.clone())
            .collect()
    }

    fn add_packages(cwd: &Path, packages: &[String], dev: bool) {
        let path = cwd.join("package.json");
        let mut manifest: Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let key = if dev { "devDependencies" } else { "dependencies" };
        let deps = manifest
            .as_object_mut()
            .unwrap()
            .entry(key)
            .or_insert_with(|| Value::Object(Map::new()));
        for package in packages {
            deps[package.as_str()] = json!("^1.0.0");
        }
        fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();
    }
}

impl CommandRunner for FakeTools {
    async fn run(&self, command: &ExternalCommand, cwd: &Path) -> wolfox_core::Result<()> {
        let line = command.to_string();
        self.calls
            .borrow_mut()
            .push((line.clone(), cwd.to_path_buf()));

        if self.fail_on.is_some_and(|needle| line.contains(needle)) {
            return Err(ScaffoldError::Subprocess {
                command: line,
                code: Some(1),
                stderr: "error Couldn't find package".to_string(),
            });
        }

        let args = command.args_slice();
        match (command.program(), args.first().map(String::as_str)) {
            ("git", Some("init")) => {
                fs::create_dir_all(cwd.join(".git")).unwrap();
                fs::write(cwd.join(".git/HEAD"), "ref: refs/heads/master\n").unwrap();
            }
            ("yarn", Some("init")) => {
                let name = cwd.file_name().unwrap().to_string_lossy();
                let manifest = json!({
                    "name": name,
                    "version": "1.0.0",
                    "main": "index.js",
                    "author": "Test Author <test@example.com>",
                    "license": "MIT"
                });
                fs::write(
                    cwd.join("package.json"),
                    serde_json::to_string_pretty(&manifest).unwrap(),
                )
                .unwrap();
            }
            ("yarn", Some("add")) => {
                let dev = args.get(1).is_some_and(|a| a == "--dev");
                let skip = if dev { 2 } else { 1 };
                Self::add_packages(cwd, &args[skip..], dev);
            }
            other => panic!("unexpected command {:?}", other),
        }
        Ok(())
    }
}

struct ScriptedPrompter {
    answer: bool,
    questions: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            questions: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str) -> wolfox_core::Result<bool> {
        self.questions.borrow_mut().push(question.to_string());
        Ok(self.answer)
    }
}

fn settings_in(base: &TempDir) -> Settings {
    Settings {
        template_root: bundled_template_root(),
        base_dir: base.path().to_path_buf(),
        ..Default::default()
    }
}

fn request(name: &str) -> ProjectRequest {
    ProjectRequest {
        name: name.to_string(),
        ..Default::default()
    }
}

fn outcomes(outcome: RunOutcome) -> Vec<BuildOutcome> {
    match outcome {
        RunOutcome::Finished(outcomes) => outcomes,
        RunOutcome::Declined => panic!("run was declined"),
    }
}

fn read_manifest(dir: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.join("package.json")).unwrap()).unwrap()
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_default_request_creates_both_projects() {
    let base = tempfile::tempdir().unwrap();
    let settings = settings_in(&base);
    let tools = FakeTools::default();
    let prompter = ScriptedPrompter::answering(false);

    let result = driver::run(&request("demo"), &settings, &tools, &prompter)
        .await
        .unwrap();
    assert!(!result.has_failures());
    let outcomes = outcomes(result);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, BuildOutcome::Completed { .. })));
    assert!(prompter.questions.borrow().is_empty());

    let back = base.path().join("demo-back");
    let front = base.path().join("demo-front");
    assert_eq!(listing(base.path()), vec!["demo-back", "demo-front"]);

    assert_eq!(
        listing(&back),
        vec![".eslintrc.json", ".git", "package.json", "src"]
    );
    assert!(back.join("src/main.js").is_file());

    assert_eq!(
        listing(&front),
        vec![".babelrc", ".eslintrc.json", ".git", "config", "package.json", "src"]
    );
    assert!(front.join("config/webpack.common.js").is_file());
    assert!(front.join("src/styles/foundations.js").is_file());

    let template_root = bundled_template_root();
    assert_eq!(
        fs::read(front.join(".babelrc")).unwrap(),
        fs::read(template_root.join("frontend/.babelrc")).unwrap()
    );
    assert_eq!(
        fs::read(back.join(".eslintrc.json")).unwrap(),
        fs::read(template_root.join("backend/.eslintrc.json")).unwrap()
    );
}

#[tokio::test]
async fn test_generated_manifest_merges_identity_and_scripts() {
    let base = tempfile::tempdir().unwrap();
    let settings = settings_in(&base);
    let tools = FakeTools::default();

    driver::run(&request("demo"), &settings, &tools, &ScriptedPrompter::answering(false))
        .await
        .unwrap();

    let manifest = read_manifest(&base.path().join("demo-back"));
    assert_eq!(manifest["name"], "demo-back");
    assert_eq!(manifest["version"], "1.0.0");
    assert_eq!(manifest["author"], "Test Author <test@example.com>");
    assert_eq!(manifest["private"], true);
    assert_eq!(manifest["scripts"]["start"], "node src/main.js");
    assert_eq!(manifest["dependencies"]["pg"], "^1.0.0");
    assert_eq!(manifest["devDependencies"]["nodemon"], "^1.0.0");
    assert!(manifest.get("license").is_none());
    assert!(manifest.get("main").is_none());

    let manifest = read_manifest(&base.path().join("demo-front"));
    assert_eq!(manifest["private"], true);
    assert_eq!(
        manifest["scripts"]["build"],
        "webpack --config config/webpack.prod.js"
    );
    assert_eq!(manifest["dependencies"]["hyperapp"], "^1.0.0");
    assert_eq!(manifest["devDependencies"]["webpack-merge"], "^1.0.0");
}

#[tokio::test]
async fn test_commands_run_in_project_folders_in_order() {
    let base = tempfile::tempdir().unwrap();
    let settings = settings_in(&base);
    let tools = FakeTools::default();

    driver::run(&request("demo"), &settings, &tools, &ScriptedPrompter::answering(false))
        .await
        .unwrap();

    let back_lines = tools.lines_in(&base.path().join("demo-back"));
    assert_eq!(back_lines.len(), 4);
    assert_eq!(back_lines[0], "git init");
    assert_eq!(back_lines[1], "yarn init --yes");
    assert_eq!(
        back_lines[2],
        "yarn add @frenchpastries/arrange @frenchpastries/assemble @frenchpastries/millefeuille dotenv pg"
    );
    assert_eq!(back_lines[3], "yarn add --dev eslint nodemon");

    let front_lines = tools.lines_in(&base.path().join("demo-front"));
    assert_eq!(front_lines.len(), 4);
    assert_eq!(front_lines[2], "yarn add hyperapp hyperapp-style");

    // backend is fully built before the frontend starts
    let calls = tools.calls.borrow();
    let last_back = calls
        .iter()
        .rposition(|(_, cwd)| cwd.ends_with("demo-back"))
        .unwrap();
    let first_front = calls
        .iter()
        .position(|(_, cwd)| cwd.ends_with("demo-front"))
        .unwrap();
    assert!(last_back < first_front);
}

#[tokio::test]
async fn test_backend_only_leaves_frontend_absent() {
    let base = tempfile::tempdir().unwrap();
    let settings = settings_in(&base);
    let tools = FakeTools::default();
    let req = ProjectRequest {
        backend_only: true,
        ..request("demo")
    };

    let outcomes = outcomes(
        driver::run(&req, &settings, &tools, &ScriptedPrompter::answering(false))
            .await
            .unwrap(),
    );
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].kind(), ProjectKind::Backend);
    assert_eq!(listing(base.path()), vec!["demo-back"]);
}

#[tokio::test]
async fn test_frontend_only_leaves_backend_absent() {
    let base = tempfile::tempdir().unwrap();
    let settings = settings_in(&base);
    let tools = FakeTools::default();
    let req = ProjectRequest {
        frontend_only: true,
        ..request("demo")
    };

    driver::run(&req, &settings, &tools, &ScriptedPrompter::answering(false))
        .await
        .unwrap();
    assert_eq!(listing(base.path()), vec!["demo-front"]);
}

#[tokio::test]
async fn test_conflicting_flags_create_nothing() {
    let base = tempfile::tempdir().unwrap();
    let settings = settings_in(&base);
    let tools = FakeTools::default();
    let prompter = ScriptedPrompter::answering(true);
    let req = ProjectRequest {
        backend_only: true,
        frontend_only: true,
        overwrite: true,
        verbose: true,
        ..request("demo")
    };

    let err = driver::run(&req, &settings, &tools, &prompter)
        .await
        .unwrap_err();
    assert!(matches!(err, ScaffoldError::Argument(_)));
    assert!(listing(base.path()).is_empty());
    assert!(tools.calls.borrow().is_empty());
    assert!(prompter.questions.borrow().is_empty());
}

#[tokio::test]
async fn test_declined_overwrite_touches_nothing() {
    let base = tempfile::tempdir().unwrap();
    let settings = settings_in(&base);
    let stale = base.path().join("demo-back");
    fs::create_dir(&stale).unwrap();
    fs::write(stale.join("stale.txt"), "old").unwrap();

    let tools = FakeTools::default();
    let prompter = ScriptedPrompter::answering(false);
    let req = ProjectRequest {
        overwrite: true,
        ..request("demo")
    };

    let outcome = driver::run(&req, &settings, &tools, &prompter)
        .await
        .unwrap();
    assert!(matches!(outcome, RunOutcome::Declined));
    assert_eq!(prompter.questions.borrow().len(), 1);
    assert_eq!(listing(base.path()), vec!["demo-back"]);
    assert_eq!(listing(&stale), vec!["stale.txt"]);
    assert!(tools.calls.borrow().is_empty());
}

#[tokio::test]
async fn test_accepted_overwrite_replaces_stale_folder() {
    let base = tempfile::tempdir().unwrap();
    let settings = settings_in(&base);
    let stale = base.path().join("demo-back");
    fs::create_dir(&stale).unwrap();
    fs::write(stale.join("stale.txt"), "old").unwrap();

    let tools = FakeTools::default();
    let req = ProjectRequest {
        overwrite: true,
        backend_only: true,
        ..request("demo")
    };

    let outcomes = outcomes(
        driver::run(&req, &settings, &tools, &ScriptedPrompter::answering(true))
            .await
            .unwrap(),
    );
    assert!(matches!(outcomes[0], BuildOutcome::Completed { .. }));
    assert!(!stale.join("stale.txt").exists());
    assert!(stale.join("package.json").is_file());
}

#[tokio::test]
async fn test_existing_frontend_is_skipped_and_untouched() {
    let base = tempfile::tempdir().unwrap();
    let settings = settings_in(&base);
    let existing = base.path().join("demo-front");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("mine.txt"), "keep me").unwrap();

    let tools = FakeTools::default();
    let outcomes = outcomes(
        driver::run(&request("demo"), &settings, &tools, &ScriptedPrompter::answering(false))
            .await
            .unwrap(),
    );

    assert!(matches!(
        outcomes[0],
        BuildOutcome::Completed {
            kind: ProjectKind::Backend,
            ..
        }
    ));
    assert!(matches!(
        outcomes[1],
        BuildOutcome::Skipped {
            kind: ProjectKind::Frontend,
            ..
        }
    ));
    assert_eq!(listing(&existing), vec!["mine.txt"]);
    assert_eq!(
        fs::read_to_string(existing.join("mine.txt")).unwrap(),
        "keep me"
    );
    assert!(tools.lines_in(&existing).is_empty());
}

#[tokio::test]
async fn test_backend_failure_does_not_stop_frontend() {
    let base = tempfile::tempdir().unwrap();
    let settings = settings_in(&base);
    let tools = FakeTools::failing_on(" pg");

    let result = driver::run(&request("demo"), &settings, &tools, &ScriptedPrompter::answering(false))
        .await
        .unwrap();
    assert!(result.has_failures());
    let outcomes = outcomes(result);

    match &outcomes[0] {
        BuildOutcome::Failed { kind, step, error, .. } => {
            assert_eq!(*kind, ProjectKind::Backend);
            assert_eq!(*step, BuildStep::InstallDependencies);
            assert!(matches!(error, ScaffoldError::Subprocess { .. }));
        }
        other => panic!("expected backend failure, got {:?}", other),
    }
    assert!(matches!(outcomes[1], BuildOutcome::Completed { .. }));

    // no dev install and no static files after the failed step
    let back = base.path().join("demo-back");
    assert_eq!(tools.lines_in(&back).len(), 3);
    assert!(!back.join(".eslintrc.json").exists());
}

#[tokio::test]
async fn test_missing_template_root_fails_at_src_copy() {
    let base = tempfile::tempdir().unwrap();
    let empty_templates = tempfile::tempdir().unwrap();
    let settings = Settings {
        template_root: empty_templates.path().to_path_buf(),
        ..settings_in(&base)
    };
    let tools = FakeTools::default();
    let req = ProjectRequest {
        backend_only: true,
        ..request("demo")
    };

    let outcomes = outcomes(
        driver::run(&req, &settings, &tools, &ScriptedPrompter::answering(false))
            .await
            .unwrap(),
    );
    match &outcomes[0] {
        BuildOutcome::Failed { step, error, .. } => {
            assert_eq!(step.to_string(), "copying the src template");
            assert!(matches!(error, ScaffoldError::TemplateMissing { .. }));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(tools.calls.borrow().is_empty());
}
