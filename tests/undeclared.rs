use std::{error::Error, path::Path};

use test_utils::check_failing_run;

const SRC_PATH: &str = "./demos/undeclared.rpal";

#[test]
fn evaluate_undeclared_identifier_fails() -> Result<(), Box<dyn Error>> {
    check_failing_run(Path::new(SRC_PATH))
}
