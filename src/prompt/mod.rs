//! User prompts
//!
//! [`Prompt`] is the interactive IO capability the orchestrators depend on.
//! [`ask_until`] wraps it in a retry loop that re-asks on invalid input and
//! turns cancellation into [`RequisiteError::PromptAborted`].

use inquire::{InquireError, Text};

use crate::error::{RequisiteError, Result};

/// Interactive question/answer capability
pub trait Prompt {
    /// Whether a user can answer questions at all
    fn is_interactive(&self) -> bool;

    /// Ask a free-text question; `None` means the user aborted (end of input)
    fn ask(&mut self, question: &str) -> Result<Option<String>>;

    /// Show a line of text to the user
    fn show(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// Ask `question` until `validate` accepts the answer
///
/// Rejected answers are reported and asked again, at most `max_attempts`
/// times in total when a bound is given.
pub fn ask_until<T>(
    prompt: &mut dyn Prompt,
    question: &str,
    validate: impl Fn(&str) -> Option<T>,
    max_attempts: Option<usize>,
) -> Result<T> {
    let mut attempts = 0;

    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            tracing::debug!(attempts, "giving up on prompt");
            return Err(aborted(question));
        }
        attempts += 1;

        let Some(answer) = prompt.ask(question)? else {
            return Err(aborted(question));
        };

        match validate(&answer) {
            Some(value) => return Ok(value),
            None => prompt.show(&format!("Invalid answer '{}'", answer.trim())),
        }
    }
}

fn aborted(question: &str) -> RequisiteError {
    RequisiteError::PromptAborted {
        prompt: question.trim().to_string(),
    }
}

/// Terminal prompt backed by `inquire`
#[derive(Debug, Clone)]
pub struct InquirePrompt {
    interactive: bool,
}

impl InquirePrompt {
    /// Interactive when a user is attended and `no_interaction` is not set
    pub fn new(no_interaction: bool) -> Self {
        Self {
            interactive: !no_interaction && console::user_attended(),
        }
    }
}

impl Prompt for InquirePrompt {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        match Text::new(question.trim()).prompt() {
            Ok(answer) => Ok(Some(answer)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn show(&mut self, line: &str) {
        eprintln!("{}", console::style(line).dim());
    }
}
