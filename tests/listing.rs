use std::{error::Error, path::Path};

use test_utils::check_run_with_flags;

const SRC_PATH: &str = "./demos/listing_no_trailing_newline.rpal";

/// `-l` must echo the source verbatim and then a blank line, even when the
/// source file itself has no trailing newline.
#[test]
fn listing_adds_blank_line_when_source_has_no_trailing_newline() -> Result<(), Box<dyn Error>> {
    let expected = "let x = 1 in x\n\n";
    check_run_with_flags(&["-l"], Path::new(SRC_PATH), expected)
}

#[test]
fn listing_does_not_double_the_blank_line_when_source_already_ends_in_newline() -> Result<(), Box<dyn Error>> {
    let expected = "let x = 1 in x\n\n";
    check_run_with_flags(&["-l"], Path::new("./demos/let_simple.rpal"), expected)
}
