use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/tuple_index.rpal";
const EXPECTED: Expected = Expected {
    stdout: "2\n",
    stderr: "",
};

#[test]
fn evaluate_tuple_indexing() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
