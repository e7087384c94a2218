use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/print_literal.rpal";
const EXPECTED: Expected = Expected {
    stdout: "HELLO\n",
    stderr: "",
};

#[test]
fn evaluate_print_literal() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
