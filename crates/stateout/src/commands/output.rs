//! The output command: parse flags, retrieve outputs, render, report.

use std::path::PathBuf;

use stateout_core::{
    state::{BackendLoader, WorkspaceResolver},
    view::DEFAULT_COLUMNS,
    Config, OutputFormat, OutputRetriever, RenderConfig, SourceLookup, Ui, View,
};

use crate::{
    cli::{build_cli, normalize_flags, setup::TerminalInfo, HELP},
    error::UsageError,
};

/// Validated command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputArgs {
    pub name: Option<String>,
    pub format: OutputFormat,
    pub state_path: Option<PathBuf>,
    pub no_color: bool,
    pub compact_warnings: bool,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(OutputArgs),
    Help,
}

impl OutputArgs {
    /// Parse and validate arguments (without the program name).
    ///
    /// # Errors
    ///
    /// Returns a [`UsageError`] for unknown flags, more than one name, `-raw`
    /// together with `-json`, or `-raw` without a name.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Invocation, UsageError> {
        let matches = build_cli().try_get_matches_from(normalize_flags(args))?;
        if matches.get_flag("help") {
            return Ok(Invocation::Help);
        }

        let mut names: Vec<String> = matches
            .get_many::<String>("name")
            .map(|names| names.cloned().collect())
            .unwrap_or_default();
        if names.len() > 1 {
            return Err(UsageError::TooManyArguments);
        }
        let name = names.pop();

        let json = matches.get_flag("json");
        let raw = matches.get_flag("raw");
        if raw && json {
            return Err(UsageError::RawAndJson);
        }
        if raw && name.is_none() {
            return Err(UsageError::RawWithoutName);
        }

        Ok(Invocation::Run(Self {
            name,
            format: OutputFormat::from_flags(json, raw),
            state_path: matches.get_one::<String>("state").map(PathBuf::from),
            no_color: matches.get_flag("no-color"),
            compact_warnings: matches.get_flag("compact-warnings"),
        }))
    }
}

/// Shows output values from the state of the current workspace.
pub struct OutputCommand<'a, U: Ui> {
    ui: U,
    config: Config,
    terminal: TerminalInfo,
    loader: &'a dyn BackendLoader,
    workspaces: &'a dyn WorkspaceResolver,
}

impl<'a, U: Ui> OutputCommand<'a, U> {
    pub fn new(
        ui: U,
        config: Config,
        loader: &'a dyn BackendLoader,
        workspaces: &'a dyn WorkspaceResolver,
    ) -> Self {
        Self {
            ui,
            config,
            terminal: TerminalInfo::default(),
            loader,
            workspaces,
        }
    }

    #[must_use]
    pub fn with_terminal(self, terminal: TerminalInfo) -> Self {
        Self { terminal, ..self }
    }

    /// Run the command and return the process exit code.
    pub fn run<S: AsRef<str>>(mut self, args: &[S]) -> i32 {
        let args = match OutputArgs::parse(args) {
            Ok(Invocation::Run(args)) => args,
            Ok(Invocation::Help) => {
                self.ui.output(HELP);
                return 0;
            }
            Err(err) => {
                tracing::debug!("Usage error: {err:?}");
                self.ui.error(&format!("{err}\n"));
                self.ui.error(HELP);
                return 1;
            }
        };
        tracing::debug!("Output command: {args:?}");

        let render_config = self.render_config(&args);
        let state_path = args.state_path.or(self.config.state_path);
        let mut view = View::new(self.ui, render_config);

        let retriever = OutputRetriever::new(self.loader, self.workspaces);
        let retrieved = match retriever.outputs(state_path.as_deref()) {
            Ok(retrieved) => retrieved,
            Err(diags) => {
                view.diagnostics(diags);
                return 1;
            }
        };

        let render_diags = args
            .format
            .render(&mut view, args.name.as_deref(), &retrieved.outputs);
        let diags = retrieved.diagnostics.append(render_diags);
        let failed = diags.has_errors();
        view.diagnostics(diags);

        i32::from(failed)
    }

    fn render_config(&self, args: &OutputArgs) -> RenderConfig {
        // Each stream is colored only if it reaches a terminal itself.
        let color = |is_terminal: bool| !args.no_color && self.config.color.resolve(is_terminal);
        let output_color = color(self.terminal.stdout_is_terminal);
        let error_color = color(self.terminal.stderr_is_terminal);
        if output_color || error_color {
            colored::control::set_override(true);
        }

        let columns = |terminal: Option<usize>| {
            self.config
                .columns
                .or(terminal)
                .unwrap_or(DEFAULT_COLUMNS)
        };

        RenderConfig::new()
            .with_channel_colors(output_color, error_color)
            .with_compact_warnings(args.compact_warnings || self.config.compact_warnings)
            .with_columns(
                columns(self.terminal.stdout_columns),
                columns(self.terminal.stderr_columns),
            )
            .with_sources(SourceLookup::filesystem())
    }
}
