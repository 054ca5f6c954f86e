use std::io::{BufRead, Write};

use super::prompt::{Prompter, EXIT_KEYWORD, HELP_KEYWORD};
use crate::data::filter::{FilterSelection, Period};
use crate::data::model::{CityCatalog, MONTHS, WEEKDAYS};
use crate::error::PromptError;

/// Ask for city, month and day until the user confirms the selection.
///
/// Declining the confirmation starts over from the city question.
pub fn collect_filters<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    catalog: &CityCatalog,
) -> Result<FilterSelection, PromptError> {
    writeln!(
        prompter.out(),
        "Hello! Let's explore some US bikeshare data!\n\
         HINT: At any time, type:\n \
         - \"{EXIT_KEYWORD}\" to exit the program\n \
         - \"{HELP_KEYWORD}\" for possible choices"
    )?;

    let cities = catalog.choices();
    let months = Period::choices(&MONTHS);
    let days = Period::choices(&WEEKDAYS);

    loop {
        let city = prompter.ask_choice("Which city would you like to explore its data?\n", &cities)?;

        let selection = if prompter.ask_yes_no("Would you like to specify a month or/and a day?\n")? {
            FilterSelection {
                city,
                month: prompter.ask_choice("Which month would you like to explore its data?\n", &months)?,
                day: prompter.ask_choice(
                    "Which day of the week would you like to explore its data?\n",
                    &days,
                )?,
            }
        } else {
            FilterSelection::unfiltered(city)
        };

        writeln!(
            prompter.out(),
            "The filters you applied:\n City: {}\n Month: {}\n Day: {}",
            selection.city,
            selection.month,
            selection.day
        )?;

        if prompter.ask_yes_no("Are these filters correct?\n")? {
            writeln!(prompter.out(), "{}", "-".repeat(40))?;
            log::debug!("Filters confirmed: {selection:?}");
            return Ok(selection);
        }
        writeln!(prompter.out(), "\nLet's try this again!")?;
    }
}
