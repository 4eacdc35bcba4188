//! Output command tests against fake state collaborators

use std::{
    cell::{Cell, RefCell},
    path::{Path, PathBuf},
};

use serde_json::{json, Value};
use stateout::{cli::setup::TerminalInfo, commands::OutputCommand};
use stateout_core::{
    state::{Backend, BackendLoader, State, StateMgr, WorkspaceResolver},
    BackendError, BufferUi, Channel, Config, OutputSet, OutputValue, WorkspaceError,
};

// ═══════════════════════════════════════════════════════════════════════════
// FAKES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct FakeLoader {
    state: Option<State>,
    fail_refresh: bool,
    loads: Cell<usize>,
    seen_path: RefCell<Option<PathBuf>>,
}

struct FakeBackend {
    state: Option<State>,
    fail_refresh: bool,
}

struct FakeMgr {
    state: Option<State>,
    fail_refresh: bool,
}

impl FakeLoader {
    fn with_outputs(outputs: OutputSet) -> Self {
        Self {
            state: Some(State::new(outputs)),
            ..Self::default()
        }
    }
}

impl FakeLoader {
    fn legacy() -> Self {
        let state = State::from_json(
            Path::new("legacy.tfstate"),
            br#"{"version": 3, "modules": [{"path": ["root"], "outputs": {"a": {"value": 1}}}]}"#,
        )
        .unwrap();
        Self {
            state: Some(state),
            ..Self::default()
        }
    }
}

impl BackendLoader for FakeLoader {
    fn load(&self, state_path: Option<&Path>) -> Result<Box<dyn Backend>, BackendError> {
        self.loads.set(self.loads.get() + 1);
        *self.seen_path.borrow_mut() = state_path.map(Path::to_path_buf);
        Ok(Box::new(FakeBackend {
            state: self.state.clone(),
            fail_refresh: self.fail_refresh,
        }))
    }
}

impl Backend for FakeBackend {
    fn state_mgr(&self, _: &str) -> Result<Box<dyn StateMgr>, BackendError> {
        Ok(Box::new(FakeMgr {
            state: self.state.clone(),
            fail_refresh: self.fail_refresh,
        }))
    }
}

impl StateMgr for FakeMgr {
    fn refresh_state(&mut self) -> Result<(), BackendError> {
        if self.fail_refresh {
            Err(BackendError::Other("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }
}

struct DefaultWorkspace;

impl WorkspaceResolver for DefaultWorkspace {
    fn current_workspace(&self) -> Result<String, WorkspaceError> {
        Ok("default".to_string())
    }
}

fn sample_outputs() -> OutputSet {
    vec![
        OutputValue::new("a", json!(1)),
        OutputValue::new("b", json!("x")),
        OutputValue::new("token", json!("abc123")).with_sensitive(true),
    ]
    .into_iter()
    .collect()
}

fn run(loader: &FakeLoader, config: Config, args: &[&str]) -> (i32, BufferUi) {
    let mut ui = BufferUi::new();
    let code = OutputCommand::new(&mut ui, config, loader, &DefaultWorkspace).run(args);
    (code, ui)
}

// ═══════════════════════════════════════════════════════════════════════════
// USAGE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_raw_and_json_never_retrieves() {
    let loader = FakeLoader::with_outputs(sample_outputs());
    let (code, ui) = run(&loader, Config::default(), &["-raw", "-json", "a"]);

    assert_eq!(code, 1);
    assert_eq!(loader.loads.get(), 0);
    let errors = ui.contents(Channel::Error);
    assert!(errors.contains("mutually-exclusive"));
    assert!(errors.contains("Usage: stateout"));
    assert!(ui.messages(Channel::Output).is_empty());
}

#[test]
fn test_raw_without_name_never_retrieves() {
    let loader = FakeLoader::with_outputs(sample_outputs());
    let (code, _) = run(&loader, Config::default(), &["-raw"]);
    assert_eq!(code, 1);
    assert_eq!(loader.loads.get(), 0);
}

#[test]
fn test_help_exits_zero() {
    let loader = FakeLoader::default();
    let (code, ui) = run(&loader, Config::default(), &["-help"]);
    assert_eq!(code, 0);
    assert_eq!(loader.loads.get(), 0);
    assert!(ui.contents(Channel::Output).starts_with("Usage: stateout"));
}

// ═══════════════════════════════════════════════════════════════════════════
// RETRIEVAL
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_refresh_failure_reports_one_error() {
    let loader = FakeLoader {
        fail_refresh: true,
        ..FakeLoader::with_outputs(sample_outputs())
    };
    let (code, ui) = run(&loader, Config::default(), &[]);

    assert_eq!(code, 1);
    let errors = ui.messages(Channel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Failed to refresh state"));
    assert!(errors[0].contains("connection refused"));
    assert!(ui.messages(Channel::Output).is_empty());
}

#[test]
fn test_state_path_flag_overrides_config() {
    let config = Config {
        state_path: Some(PathBuf::from("config.tfstate")),
        ..Config::default()
    };

    let loader = FakeLoader::default();
    let (code, _) = run(&loader, config.clone(), &["-state=flag.tfstate"]);
    assert_eq!(code, 0);
    assert_eq!(
        loader.seen_path.borrow().as_deref(),
        Some(Path::new("flag.tfstate"))
    );

    let loader = FakeLoader::default();
    let (code, _) = run(&loader, config, &[]);
    assert_eq!(code, 0);
    assert_eq!(
        loader.seen_path.borrow().as_deref(),
        Some(Path::new("config.tfstate"))
    );

    let loader = FakeLoader::default();
    let (_, _) = run(&loader, Config::default(), &[]);
    assert_eq!(loader.loads.get(), 1);
    assert_eq!(loader.seen_path.borrow().as_deref(), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// RENDERING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_text_all_outputs() {
    let loader = FakeLoader::with_outputs(sample_outputs());
    let (code, ui) = run(&loader, Config::default(), &[]);

    assert_eq!(code, 0);
    assert_eq!(
        ui.contents(Channel::Output),
        "a = 1\nb = \"x\"\ntoken = <sensitive>\n"
    );
}

#[test]
fn test_empty_state_is_informational() {
    let loader = FakeLoader::default();
    let (code, ui) = run(&loader, Config::default(), &[]);

    assert_eq!(code, 0);
    assert!(ui.messages(Channel::Error).is_empty());
    assert!(ui.messages(Channel::Warn).is_empty());
    assert!(ui.contents(Channel::Output).contains("No outputs found"));
}

#[test]
fn test_missing_name_fails() {
    let loader = FakeLoader::with_outputs(sample_outputs());
    let (code, ui) = run(&loader, Config::default(), &["nope"]);

    assert_eq!(code, 1);
    let errors = ui.messages(Channel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Output \"nope\" not found"));
}

#[test]
fn test_json_all_outputs() {
    let outputs: OutputSet = vec![
        OutputValue::new("a", json!(1)),
        OutputValue::new("b", json!("x")),
    ]
    .into_iter()
    .collect();
    let loader = FakeLoader::with_outputs(outputs);
    let (code, ui) = run(&loader, Config::default(), &["-json"]);

    assert_eq!(code, 0);
    let parsed: Value = serde_json::from_str(&ui.contents(Channel::Output)).unwrap();
    assert_eq!(
        parsed,
        json!({
            "a": {"sensitive": false, "type": "number", "value": 1},
            "b": {"sensitive": false, "type": "string", "value": "x"}
        })
    );
}

#[test]
fn test_raw_prints_sensitive_scalar() {
    let loader = FakeLoader::with_outputs(sample_outputs());
    let (code, ui) = run(&loader, Config::default(), &["-raw", "token"]);
    assert_eq!(code, 0);
    assert_eq!(ui.contents(Channel::Output), "abc123\n");
}

#[test]
fn test_retrieval_warnings_do_not_fail() {
    let loader = FakeLoader::legacy();
    let (code, ui) = run(&loader, Config::default(), &["a"]);

    assert_eq!(code, 0);
    assert_eq!(ui.messages(Channel::Output), vec!["1"]);
    assert!(ui.contents(Channel::Warn).contains("Legacy state format"));
}

#[test]
fn test_compact_warnings_from_config() {
    let loader = FakeLoader::legacy();
    let config = Config {
        compact_warnings: true,
        ..Config::default()
    };
    let (code, ui) = run(&loader, config, &[]);

    assert_eq!(code, 0);
    let warnings = ui.messages(Channel::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("- Legacy state format"));
    assert!(warnings[0].contains("run without -compact-warnings"));
}

#[test]
fn test_missing_name_keeps_retrieval_warnings() {
    let loader = FakeLoader::legacy();
    let (code, ui) = run(&loader, Config::default(), &["nope"]);

    assert_eq!(code, 1);
    assert!(ui.messages(Channel::Output).is_empty());
    let errors = ui.messages(Channel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains(r#"Output "nope" not found"#));
    assert!(ui.contents(Channel::Warn).contains("Legacy state format"));
}

#[test]
fn test_color_follows_each_stream() {
    let loader = FakeLoader::legacy();
    let mut ui = BufferUi::new();
    let terminal = TerminalInfo {
        stdout_is_terminal: true,
        stderr_is_terminal: false,
        ..TerminalInfo::default()
    };
    let code = OutputCommand::new(&mut ui, Config::default(), &loader, &DefaultWorkspace)
        .with_terminal(terminal)
        .run(&["nope"]);

    assert_eq!(code, 1);
    let errors = ui.contents(Channel::Error);
    assert!(errors.contains("Error: "));
    assert!(!errors.contains('\u{1b}'));
    assert!(!ui.contents(Channel::Warn).contains('\u{1b}'));
}
