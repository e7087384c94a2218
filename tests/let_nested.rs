use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/let_nested.rpal";
const EXPECTED: Expected = Expected {
    stdout: "1\n",
    stderr: "",
};

#[test]
fn evaluate_let_nested() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
