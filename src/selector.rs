/*!
 * Selection of listed entries
 */

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CombineError, Result};
use crate::types::{Listing, SelectionSet};

pub const MSG_TRACKED_ITEMS_HEADER: &str = "Git-tracked items in directory:";
pub const MSG_INPUT_PROMPT: &str =
    "Enter item numbers separated by commas, or press Ctrl+C to exit:";
pub const MSG_EMPTY_INPUT: &str = "Please enter some numbers or press Ctrl+C to exit.";

/// Whitespace, commas and semicolons are interchangeable separators
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,;]+").unwrap());

/// Parse free-form selection input against a listing
///
/// Every token must be an index in `[1, N]`; the first bad token fails the
/// whole selection. Duplicates collapse. Input without tokens yields an
/// empty selection.
pub fn parse_selection(input: &str, listing: &Listing) -> Result<SelectionSet> {
    let mut indices = BTreeSet::new();

    for token in SEPARATORS.split(input).filter(|t| !t.is_empty()) {
        let index = token
            .parse::<usize>()
            .ok()
            .filter(|&n| n >= 1 && n <= listing.len())
            .ok_or_else(|| CombineError::InvalidSelection {
                token: token.to_string(),
            })?;
        indices.insert(index);
    }

    debug!("Parsed selection {:?} from {:?}", indices, input);
    Ok(SelectionSet::from_indices(indices))
}

/// Write the numbered listing
pub fn render_listing<W: Write>(listing: &Listing, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", MSG_TRACKED_ITEMS_HEADER)?;
    for entry in &listing.entries {
        writeln!(out, "{}", entry)?;
    }
    Ok(())
}

/// Show the listing and read a selection from `input`
///
/// Blank lines re-prompt. End of input means the operator gave up and
/// yields [`CombineError::Cancelled`].
pub fn prompt_selection<R: BufRead, W: Write>(
    listing: &Listing,
    input: &mut R,
    out: &mut W,
) -> Result<SelectionSet> {
    render_listing(listing, out)?;

    loop {
        writeln!(out)?;
        writeln!(out, "{}", MSG_INPUT_PROMPT)?;
        write!(out, " > ")?;
        out.flush()?;

        // Bytes that are not UTF-8 end up in a token that fails to parse
        let mut line = Vec::new();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Err(CombineError::Cancelled);
        }

        let selection = parse_selection(&String::from_utf8_lossy(&line), listing)?;
        if selection.is_empty() {
            writeln!(out, "{}", MSG_EMPTY_INPUT)?;
            continue;
        }

        info!("Selected {} of {} entries", selection.len(), listing.len());
        return Ok(selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryKind, TrackedEntry};
    use std::io::Cursor;
    use std::path::PathBuf;

    fn listing(n: usize) -> Listing {
        Listing {
            directory: PathBuf::from("."),
            entries: (1..=n)
                .map(|i| TrackedEntry {
                    display_index: i,
                    relative_path: format!("file{}.txt", i),
                    kind: EntryKind::File,
                })
                .collect(),
        }
    }

    #[test]
    fn test_separators_are_equivalent() {
        let listing = listing(4);
        let mixed = parse_selection("1,2;3 4", &listing).unwrap();
        let spaced = parse_selection("1 2 3 4", &listing).unwrap();
        assert_eq!(mixed, spaced);
        assert_eq!(mixed.len(), 4);

        let messy = parse_selection(" ,;1;;, \t2 ,\n", &listing).unwrap();
        assert_eq!(messy, parse_selection("1 2", &listing).unwrap());
    }

    #[test]
    fn test_duplicates_collapse() {
        let listing = listing(3);
        let selection = parse_selection("2,2 2;2", &listing).unwrap();
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(2));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let listing = listing(3);
        for input in ["0", "4", "1,4", "-1"] {
            match parse_selection(input, &listing) {
                Err(CombineError::InvalidSelection { .. }) => {}
                other => panic!("{:?} should be rejected, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_non_numeric_token_named() {
        let listing = listing(3);
        match parse_selection("1, two, 3", &listing) {
            Err(CombineError::InvalidSelection { token }) => assert_eq!(token, "two"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_prompt_reprompts_on_blank_line() {
        let listing = listing(2);
        let mut input = Cursor::new("\n  \n2\n");
        let mut out = Vec::new();

        let selection = prompt_selection(&listing, &mut input, &mut out).unwrap();
        assert!(selection.contains(2));

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains(MSG_TRACKED_ITEMS_HEADER));
        assert!(shown.contains("1. file1.txt"));
        assert_eq!(shown.matches(MSG_EMPTY_INPUT).count(), 2);
    }

    #[test]
    fn test_prompt_end_of_input_cancels() {
        let listing = listing(2);
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        assert!(matches!(
            prompt_selection(&listing, &mut input, &mut out),
            Err(CombineError::Cancelled)
        ));
    }

    #[test]
    fn test_prompt_non_utf8_input_names_token() {
        let listing = listing(2);
        let mut input = Cursor::new(b"1, \xff2\n".to_vec());
        let mut out = Vec::new();

        match prompt_selection(&listing, &mut input, &mut out) {
            Err(CombineError::InvalidSelection { token }) => assert_eq!(token, "\u{FFFD}2"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_prompt_invalid_aborts() {
        let listing = listing(2);
        let mut input = Cursor::new("3\n1\n");
        let mut out = Vec::new();

        assert!(matches!(
            prompt_selection(&listing, &mut input, &mut out),
            Err(CombineError::InvalidSelection { .. })
        ));
    }
}
