use crate::domain::ports::Prompter;
use crate::utils::error::{GeneratorError, Result};
use std::io::{BufRead, Write};

/// Line-oriented prompter: questions go to `output`, answers come from `input`.
///
/// Choices may be answered by number (1-based) or by label.
pub struct TerminalPrompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl TerminalPrompter<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self) -> Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GeneratorError::PromptError {
                message: "input closed before an answer was given".to_string(),
            });
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn input(&mut self, message: &str, default: &str) -> Result<String> {
        if default.is_empty() {
            write!(self.output, "? {} ", message)?;
        } else {
            write!(self.output, "? {} ({}) ", message, default)?;
        }

        let answer = self.read_answer()?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn select(&mut self, message: &str, choices: &[&str], default: usize) -> Result<usize> {
        loop {
            writeln!(self.output, "? {}", message)?;
            for (i, choice) in choices.iter().enumerate() {
                let marker = if i == default { ">" } else { " " };
                writeln!(self.output, "{} {}) {}", marker, i + 1, choice)?;
            }
            write!(self.output, "  Answer: ")?;

            let answer = self.read_answer()?;
            if answer.is_empty() {
                return Ok(default);
            }
            if let Ok(number) = answer.parse::<usize>() {
                if (1..=choices.len()).contains(&number) {
                    return Ok(number - 1);
                }
            }
            if let Some(index) = choices
                .iter()
                .position(|choice| choice.eq_ignore_ascii_case(&answer))
            {
                return Ok(index);
            }

            writeln!(self.output, "Please choose one of the listed options.")?;
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(script: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_input_uses_default_on_empty_answer() {
        let mut p = prompter("\nOrders\n");
        assert_eq!(p.input("Name?", "default").unwrap(), "default");
        assert_eq!(p.input("Name?", "default").unwrap(), "Orders");
    }

    #[test]
    fn test_select_by_number_label_and_default() {
        let mut p = prompter("2\nwcf\n\n");
        let choices = ["gRPC", "REST", "WCF", "Custom"];
        assert_eq!(p.select("Framework?", &choices, 0).unwrap(), 1);
        assert_eq!(p.select("Framework?", &choices, 0).unwrap(), 2);
        assert_eq!(p.select("Framework?", &choices, 3).unwrap(), 3);
    }

    #[test]
    fn test_select_reasks_on_invalid_answer() {
        let mut p = prompter("9\nnope\n1\n");
        assert_eq!(p.select("Pick", &["a", "b"], 1).unwrap(), 0);
        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches("Please choose").count(), 2);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut p = prompter("");
        let err = p.input("Name?", "x").unwrap_err();
        assert!(matches!(err, GeneratorError::PromptError { .. }));
    }
}
