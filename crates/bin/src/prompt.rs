//! Interactive prompts for screen parameters missing from the command line.

use std::io::{self, BufRead, Write};

const STATE_PROMPT: &str = "Enter State Abbreviation (NY, CA, etc.): ";
const SIC_PROMPT: &str = "Enter SIC Code: ";
const INCLUDE_MISSING_PROMPT: &str = "Include companies w/ out company fact data (y/n): ";

/// Prints `label` and reads one trimmed line.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before a value was entered",
        ));
    }
    Ok(line.trim().to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.trim().to_string())
    }
}

/// Asks for whichever of state and SIC code is missing until both are non-empty.
pub(crate) fn directory_query<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    state: Option<String>,
    sic: Option<String>,
) -> io::Result<(String, String)> {
    let mut state = state.and_then(non_empty);
    let mut sic = sic.and_then(non_empty);

    loop {
        if state.is_none() {
            state = non_empty(ask(input, output, STATE_PROMPT)?);
        }
        if sic.is_none() {
            sic = non_empty(ask(input, output, SIC_PROMPT)?);
        }
        if let (Some(state), Some(sic)) = (&state, &sic) {
            return Ok((state.clone(), sic.clone()));
        }
        writeln!(output, "Please enter State and SIC codes")?;
    }
}

/// Asks whether companies without growth data belong in the report.
pub(crate) fn include_missing<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    let answer = ask(input, output, INCLUDE_MISSING_PROMPT)?;
    Ok(answer.to_lowercase().starts_with('y'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn query(
        typed: &str,
        state: Option<&str>,
        sic: Option<&str>,
    ) -> (io::Result<(String, String)>, String) {
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = directory_query(
            &mut input,
            &mut output,
            state.map(str::to_string),
            sic.map(str::to_string),
        );
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_no_prompt_when_both_given() {
        let (result, shown) = query("", Some("NY"), Some("7370"));
        assert_eq!(result.unwrap(), ("NY".to_string(), "7370".to_string()));
        assert!(shown.is_empty());
    }

    #[test]
    fn test_prompts_for_missing_sic_only() {
        let (result, shown) = query("3674\n", Some("CA"), None);
        assert_eq!(result.unwrap(), ("CA".to_string(), "3674".to_string()));
        assert_eq!(shown, SIC_PROMPT);
    }

    #[test]
    fn test_reprompts_until_both_given() {
        let (result, shown) = query("  \n7370\nNY\n", None, None);
        assert_eq!(result.unwrap(), ("NY".to_string(), "7370".to_string()));
        assert_eq!(shown.matches("Please enter State and SIC codes").count(), 1);
        assert_eq!(shown.matches(STATE_PROMPT).count(), 2);
        assert_eq!(shown.matches(SIC_PROMPT).count(), 1);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let (result, _) = query("", None, Some("7370"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }

    #[rstest]
    #[case("y\n", true)]
    #[case("yes\n", true)]
    #[case("Y\n", true)]
    #[case("n\n", false)]
    #[case("\n", false)]
    fn test_include_missing_answer(#[case] typed: &str, #[case] expected: bool) {
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut output = Vec::new();
        assert_eq!(include_missing(&mut input, &mut output).unwrap(), expected);
    }
}
