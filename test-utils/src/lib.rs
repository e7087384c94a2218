use std::{
    error::Error,
    path::Path,
    process::{Command, Output},
    str,
};

const RPAL_PATH: &str = "./target/debug/rpal";

pub struct Expected<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
}

impl<'a> Expected<'a> {
    fn assert_matches(self, output: &Output) -> Result<(), Box<dyn Error>> {
        assert_eq!(str::from_utf8(&output.stdout)?, self.stdout);
        assert_eq!(str::from_utf8(&output.stderr)?, self.stderr);
        Ok(())
    }
}

fn run_rpal(args: &[&str]) -> Result<Output, std::io::Error> {
    Command::new(RPAL_PATH).args(args).output()
}

/// Run `rpal <src_path>` and check its stdout/stderr match exactly.
pub fn check_run(src_path: &Path, expected: Expected) -> Result<(), Box<dyn Error>> {
    let output = run_rpal(&[src_path.to_str().unwrap()])?;

    expected.assert_matches(&output)?;
    assert!(
        output.status.success(),
        "rpal exited with status {:?}",
        output.status.code()
    );

    Ok(())
}

/// Run `rpal <flags> <src_path>` and check stdout matches exactly. Used for
/// the `-l`/`-ast`/`-st` dump flags, where stderr is not interesting.
pub fn check_run_with_flags(
    flags: &[&str],
    src_path: &Path,
    expected_stdout: &str,
) -> Result<(), Box<dyn Error>> {
    let mut args: Vec<&str> = flags.to_vec();
    args.push(src_path.to_str().unwrap());

    let output = run_rpal(&args)?;

    assert_eq!(str::from_utf8(&output.stdout)?, expected_stdout);
    assert!(
        output.status.success(),
        "rpal exited with status {:?}",
        output.status.code()
    );

    Ok(())
}

/// Run `rpal <src_path>` and check it fails (non-zero exit, non-empty
/// stderr), without asserting the exact message.
pub fn check_failing_run(src_path: &Path) -> Result<(), Box<dyn Error>> {
    let output = run_rpal(&[src_path.to_str().unwrap()])?;

    assert!(
        !output.status.success(),
        "rpal should have exited with a non-zero status"
    );
    assert!(!output.stderr.is_empty(), "expected a diagnostic on stderr");

    Ok(())
}
