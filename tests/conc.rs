use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/conc.rpal";
const EXPECTED: Expected = Expected {
    stdout: "foobar\n",
    stderr: "",
};

#[test]
fn evaluate_string_concatenation() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
