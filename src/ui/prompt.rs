use std::io::{BufRead, Write};

use crate::error::PromptError;

/// Typing this at any prompt ends the program.
pub const EXIT_KEYWORD: &str = "end";
/// Typing this at any prompt lists the accepted answers.
pub const HELP_KEYWORD: &str = "help";

pub const YES_NO: [&str; 2] = ["yes", "no"];

/// The value paired with `answer` in `options`.
pub fn lookup<T: Copy>(options: &[(&str, T)], answer: &str) -> Result<T, PromptError> {
    options
        .iter()
        .find(|(name, _)| *name == answer)
        .map(|&(_, value)| value)
        .ok_or_else(|| PromptError::UnknownChoice(answer.to_owned()))
}

const INVALID_INPUT: &str = "Sorry, not a valid input - Type \"help\" for possible choices";

// ---------------------------------------------------------------------------
// Response – what a single line of input meant
// ---------------------------------------------------------------------------

/// Classification of one normalised input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Accepted(String),
    HelpRequested,
    ExitRequested,
    Invalid(String),
}

impl Response {
    /// Trim and case-fold `line`, then classify it against `choices`.
    ///
    /// Reserved keywords win over the choice set.
    pub fn classify(line: &str, choices: &[&str]) -> Self {
        let answer = line.trim().to_lowercase();
        if answer == EXIT_KEYWORD {
            Response::ExitRequested
        } else if answer == HELP_KEYWORD {
            Response::HelpRequested
        } else if choices.contains(&answer.as_str()) {
            Response::Accepted(answer)
        } else {
            Response::Invalid(answer)
        }
    }
}

// ---------------------------------------------------------------------------
// Prompter – validated question/answer over any reader/writer pair
// ---------------------------------------------------------------------------

/// Line-oriented console used by every interactive step.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for report output between prompts.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `message`, read one line and classify it.
    ///
    /// End of input counts as an exit request.
    pub fn read_response(&mut self, message: &str, choices: &[&str]) -> Result<Response, PromptError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            log::debug!("Input closed while waiting for an answer");
            return Ok(Response::ExitRequested);
        }
        Ok(Response::classify(&line, choices))
    }

    /// Ask until the answer is one of `choices`.
    ///
    /// `help` prints `hint`; anything unknown prints an error and asks
    /// again. The exit keyword surfaces as [`PromptError::ExitRequested`].
    pub fn ask(&mut self, message: &str, choices: &[&str], hint: &[&str]) -> Result<String, PromptError> {
        loop {
            match self.read_response(message, choices)? {
                Response::Accepted(answer) => return Ok(answer),
                Response::ExitRequested => return Err(PromptError::ExitRequested),
                Response::HelpRequested => {
                    writeln!(self.output, "Options: {}", hint.join(", "))?;
                }
                Response::Invalid(answer) => {
                    log::debug!("Rejected answer '{answer}'");
                    writeln!(self.output, "{INVALID_INPUT}")?;
                }
            }
        }
    }

    /// Ask until the answer names one of `options`, and return its value.
    pub fn ask_choice<T: Copy>(&mut self, message: &str, options: &[(&str, T)]) -> Result<T, PromptError> {
        let names: Vec<&str> = options.iter().map(|(name, _)| *name).collect();
        let answer = self.ask(message, &names, &names)?;
        lookup(options, &answer)
    }

    /// Yes/no question; `true` on "yes".
    pub fn ask_yes_no(&mut self, message: &str) -> Result<bool, PromptError> {
        Ok(self.ask(message, &YES_NO, &YES_NO)? == "yes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn classify_normalises_and_prioritises_keywords() {
        let choices = ["chicago", "end"];
        assert_eq!(
            Response::classify("  ChiCAGO \n", &choices),
            Response::Accepted("chicago".into())
        );
        assert_eq!(Response::classify("END", &choices), Response::ExitRequested);
        assert_eq!(Response::classify("Help", &choices), Response::HelpRequested);
        assert_eq!(
            Response::classify("boston", &choices),
            Response::Invalid("boston".into())
        );
    }

    #[test]
    fn invalid_answers_are_never_returned() {
        let mut p = prompter("boston\nparis\n\nchicago\n");
        let answer = p.ask("City?\n", &["chicago", "washington"], &["chicago", "washington"]).unwrap();
        assert_eq!(answer, "chicago");

        let text = output(p);
        assert_eq!(text.matches("City?").count(), 4);
        assert_eq!(text.matches(INVALID_INPUT).count(), 3);
    }

    #[test]
    fn help_shows_hint_and_reprompts() {
        let mut p = prompter("help\nno\n");
        assert!(!p.ask_yes_no("Continue?\n").unwrap());
        let text = output(p);
        assert!(text.contains("Options: yes, no"));
        assert_eq!(text.matches("Continue?").count(), 2);
    }

    #[test]
    fn exit_keyword_wins_after_invalid_attempts() {
        let mut p = prompter("maybe\nperhaps\nEnd\nyes\n");
        let err = p.ask_yes_no("Continue?\n").unwrap_err();
        assert!(matches!(err, PromptError::ExitRequested));
        // nothing printed after the exit keyword was read
        assert!(output(p).ends_with("Continue?\n"));
    }

    #[test]
    fn closed_input_is_exit() {
        let mut p = prompter("");
        assert!(matches!(
            p.ask_yes_no("Continue?\n"),
            Err(PromptError::ExitRequested)
        ));
    }

    #[test]
    fn choice_answers_map_to_their_value() {
        let options = [("chicago", 1), ("washington", 3)];
        let mut p = prompter("boston
Washington
");
        assert_eq!(p.ask_choice("City?
", &options).unwrap(), 3);
        assert_eq!(output(p).matches(INVALID_INPUT).count(), 1);
    }

    #[test]
    fn lookup_rejects_names_outside_the_options() {
        let options = [("yes", true), ("no", false)];
        assert!(lookup(&options, "no").is_ok_and(|v| !v));
        assert!(matches!(
            lookup(&options, "maybe"),
            Err(PromptError::UnknownChoice(answer)) if answer == "maybe"
        ));
    }
}
