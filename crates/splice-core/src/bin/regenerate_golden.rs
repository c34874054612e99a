use std::fs;
use std::path::{Path, PathBuf};

use splice_core::{decode_file, render};

const GOLDEN_ROOT: &str = "tests/golden";
const INPUT_NAME: &str = "input.splice";
const EXPECTED_NAME: &str = "expected_output.txt";

fn main() -> Result<(), String> {
    let cases = golden_cases(Path::new(GOLDEN_ROOT))?;
    for case in &cases {
        let text = render_case(case)?;
        let expected = case.join(EXPECTED_NAME);
        fs::write(&expected, text)
            .map_err(|err| format!("failed to write {}: {err}", expected.display()))?;
        println!("updated {}", expected.display());
    }
    println!("{} golden case(s) regenerated", cases.len());
    Ok(())
}

/// Case directories holding an input fixture, sorted by name.
fn golden_cases(root: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(root).map_err(|err| format!("failed to read {}: {err}", root.display()))?;
    let mut cases = Vec::new();
    for entry in entries {
        let dir = entry
            .map_err(|err| format!("failed to read entry in {}: {err}", root.display()))?
            .path();
        if dir.join(INPUT_NAME).is_file() {
            cases.push(dir);
        }
    }
    cases.sort();
    Ok(cases)
}

fn render_case(case: &Path) -> Result<String, String> {
    let input = case.join(INPUT_NAME);
    let file =
        decode_file(&input).map_err(|err| format!("decode failed for {}: {err}", input.display()))?;
    Ok(render(&file))
}
