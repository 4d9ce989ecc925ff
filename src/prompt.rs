use dialoguer::Input;
use owo_colors::OwoColorize;
use rollcall_core::{AttendanceRow, ConflictResolver, Resolution, RollcallError, RollcallResult};

use crate::render::Render;

/// Asks on the terminal how to settle each conflicting row.
pub struct PromptResolver;

impl ConflictResolver for PromptResolver {
    fn resolve(
        &mut self,
        candidate: &AttendanceRow,
        existing: &AttendanceRow,
    ) -> RollcallResult<Resolution> {
        println!();
        println!("{}", "This event already has a different row:".yellow());
        println!("   0  {}", candidate.render());
        println!("   1  {}", existing.render());
        println!("Select 0 to append the new row (you must manually delete the old row)");
        println!("Select 1 to keep the existing row");

        let choice: String = Input::new()
            .with_prompt("Choice")
            .validate_with(|input: &String| {
                parse_choice(input).map(|_| ()).ok_or("enter 0 or 1")
            })
            .interact_text()
            .map_err(|e| RollcallError::Prompt(e.to_string()))?;

        parse_choice(&choice)
            .ok_or_else(|| RollcallError::Prompt(format!("unexpected choice '{choice}'")))
    }
}

/// Exactly "0" or "1"; anything else, surrounding whitespace included, is rejected.
fn parse_choice(input: &str) -> Option<Resolution> {
    match input {
        "0" => Some(Resolution::AppendNew),
        "1" => Some(Resolution::KeepExisting),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("0"), Some(Resolution::AppendNew));
        assert_eq!(parse_choice("1"), Some(Resolution::KeepExisting));
        assert_eq!(parse_choice(" 0"), None);
        assert_eq!(parse_choice("1\n"), None);
        assert_eq!(parse_choice(""), None);
        assert_eq!(parse_choice("2"), None);
    }
}
