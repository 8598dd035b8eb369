//! Spinner shown while the host installer runs

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner around one installer run
///
/// Hidden when stderr is not a terminal.
pub struct InstallerSpinner {
    bar: Option<ProgressBar>,
}

impl InstallerSpinner {
    /// Start a spinner naming the whitelisted packages
    pub fn start(whitelist: &[String]) -> Self {
        if !console::Term::stderr().is_term() {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(format!("Installing {}", summarize(whitelist)));
        bar.enable_steady_tick(Duration::from_millis(120));

        Self { bar: Some(bar) }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }

    /// Abandon on failure
    pub fn abandon(self) {
        if let Some(bar) = self.bar {
            bar.abandon();
        }
    }
}

/// Short list of names for the spinner message
fn summarize(names: &[String]) -> String {
    match names {
        [] => "dependencies".to_string(),
        [one] => one.clone(),
        [first, second] => format!("{first} and {second}"),
        [first, rest @ ..] => format!("{first} and {} more", rest.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        let names = |list: &[&str]| list.iter().map(ToString::to_string).collect::<Vec<_>>();

        assert_eq!(summarize(&[]), "dependencies");
        assert_eq!(summarize(&names(&["a/a"])), "a/a");
        assert_eq!(summarize(&names(&["a/a", "b/b"])), "a/a and b/b");
        assert_eq!(summarize(&names(&["a/a", "b/b", "c/c"])), "a/a and 2 more");
    }

    #[test]
    fn test_spinner_lifecycle_without_terminal() {
        InstallerSpinner::start(&["a/a".to_string()]).finish();
        InstallerSpinner::start(&[]).abandon();
    }
}
