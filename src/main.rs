use std::io::{self, Write};
use std::process::ExitCode;

use bikeshare_explorer::app::ExplorerApp;
use bikeshare_explorer::config::{Args, Config};
use bikeshare_explorer::error::PromptError;
use bikeshare_explorer::ui::prompt::Prompter;
use clap::Parser;

/// Exit status when the user types the exit keyword (or input closes).
const EXIT_REQUESTED: u8 = 130;

/// Map the session outcome to an exit status, reporting a fatal error once.
fn finish<E: Write>(result: anyhow::Result<()>, stderr: &mut E) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) if matches!(e.downcast_ref::<PromptError>(), Some(PromptError::ExitRequested)) => {
            log::info!("Exit requested by user");
            EXIT_REQUESTED
        }
        Err(e) => {
            log::debug!("{e:?}");
            // stderr may already be gone; the status still reports the failure
            let _ = writeln!(stderr, "Error: {e:#}");
            1
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    let config = Config::from(args);
    log::debug!("Data directory: {}", config.catalog.data_dir().display());

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    let result = ExplorerApp::new(config).run(&mut prompter);
    ExitCode::from(finish(result, &mut io::stderr()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use bikeshare_explorer::error::LoadError;

    fn outcome(result: anyhow::Result<()>) -> (u8, String) {
        let mut stderr = Vec::new();
        let code = finish(result, &mut stderr);
        (code, String::from_utf8(stderr).unwrap())
    }

    #[test]
    fn success_and_exit_request_print_nothing() {
        assert_eq!(outcome(Ok(())), (0, String::new()));
        assert_eq!(
            outcome(Err(PromptError::ExitRequested.into())),
            (EXIT_REQUESTED, String::new())
        );
    }

    #[test]
    fn fatal_error_is_reported_once() {
        let err = Err::<(), _>(LoadError::MissingFile {
            path: "chicago.csv".into(),
        })
        .context("loading chicago data");
        let (code, text) = outcome(err);
        assert_eq!(code, 1);
        assert_eq!(text, "Error: loading chicago data: Dataset not found: chicago.csv\n");
    }
}
