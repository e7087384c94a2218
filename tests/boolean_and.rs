use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/boolean_and.rpal";
const EXPECTED: Expected = Expected {
    stdout: "false\n",
    stderr: "",
};

#[test]
fn evaluate_boolean_and() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
