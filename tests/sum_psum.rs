use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/sum_psum.rpal";
const EXPECTED: Expected = Expected {
    stdout: "15\n",
    stderr: "",
};

#[test]
fn evaluate_sum_via_psum_recursion() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
