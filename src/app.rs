use std::io::{BufRead, Write};

use anyhow::Result;

use crate::config::Config;
use crate::data::loader::load_city;
use crate::stats;
use crate::ui::collector::collect_filters;
use crate::ui::pager::page_raw_data;
use crate::ui::prompt::Prompter;

// ---------------------------------------------------------------------------
// Session loop
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub config: Config,
}

impl ExplorerApp {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Collect filters, load, report, page; repeat while the user asks to
    /// restart.
    ///
    /// The exit keyword surfaces as a
    /// [`PromptError::ExitRequested`](crate::error::PromptError) inside the
    /// returned error.
    pub fn run<R: BufRead, W: Write>(&self, prompter: &mut Prompter<R, W>) -> Result<()> {
        let catalog = &self.config.catalog;
        loop {
            let selection = collect_filters(prompter, catalog)?;
            let table = load_city(catalog, &selection)?;
            writeln!(
                prompter.out(),
                "Exploring {} {} trips ({} schema)",
                table.len(),
                table.city,
                table.schema.label()
            )?;

            stats::report_all(&table, prompter.out())?;
            page_raw_data(prompter, &table)?;

            if !prompter.ask_yes_no("\nWould you like to restart?\n")? {
                log::info!("Session finished");
                return Ok(());
            }
        }
    }
}
