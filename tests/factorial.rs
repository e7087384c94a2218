use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/factorial.rpal";
const EXPECTED: Expected = Expected {
    stdout: "120\n",
    stderr: "",
};

#[test]
fn evaluate_factorial_via_rec() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
