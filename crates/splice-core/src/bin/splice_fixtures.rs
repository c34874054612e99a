use std::fs;
use std::path::{Path, PathBuf};

const MAGIC: &[u8; 6] = b"SPLICE";
const HW_VERSION_LEN: usize = 32;
const PATTERN_LEN: usize = 16;

const TRAILER: &[u8] = b"SPLICE\0\0\0\0\0\0\0\x0b trailer!";

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_fixture(
        &root.join("pattern_1"),
        FixtureSpec::new("0.808-alpha", 120.0)
            .instrument(0, "kick", "|x---|x---|x---|x---|")
            .instrument(1, "snare", "|----|x---|----|x---|")
            .instrument(2, "clap", "|----|x-x-|----|----|")
            .instrument(3, "hh-open", "|--x-|--x-|x-x-|--x-|")
            .instrument(4, "hh-close", "|x---|x---|----|x--x|")
            .instrument(5, "cowbell", "|----|----|--x-|----|"),
    )?;
    write_fixture(
        &root.join("pattern_2"),
        FixtureSpec::new("0.808-alpha", 98.4)
            .instrument(0, "kick", "|x---|----|x---|----|")
            .instrument(1, "snare", "|----|x---|----|x---|")
            .instrument(3, "hh-open", "|--x-|--x-|x-x-|--x-|")
            .instrument(5, "cowbell", "|----|----|x---|----|"),
    )?;
    write_fixture(
        &root.join("pattern_3"),
        FixtureSpec::new("0.909", 118.0)
            .instrument(40, "kick", "|x---|----|x---|----|")
            .instrument(1, "clap", "|----|x---|----|x---|")
            .instrument(3, "hh-open", "|--x-|--x-|x-x-|--x-|")
            .instrument(5, "low-tom", "|----|---x|----|----|")
            .instrument(12, "mid-tom", "|----|----|x---|----|")
            .instrument(9, "hi-tom", "|----|----|-x--|----|"),
    )?;
    write_fixture(
        &root.join("pattern_4"),
        FixtureSpec::new("0.909", 240.0)
            .instrument(0, "SubKick", "|----|----|----|----|")
            .instrument(1, "Kick", "|x---|----|x---|----|")
            .instrument(99, "Maracas", "|x-x-|x-x-|x-x-|x-x-|")
            .instrument(255, "Low Conga", "|----|x---|----|x---|"),
    )?;
    write_fixture(
        &root.join("pattern_5"),
        FixtureSpec::new("0.708-alpha", 999.0)
            .instrument(1, "Kick", "|x---|----|x---|----|")
            .instrument(2, "HiHat", "|x-x-|x-x-|x-x-|x-x-|")
            .trailer(TRAILER),
    )?;
    write_fixture(&root.join("empty"), FixtureSpec::new("0.808-alpha", 120.0))?;
    Ok(())
}

struct FixtureSpec {
    hardware_string: &'static str,
    tempo: f32,
    instruments: Vec<(u8, &'static str, [u8; PATTERN_LEN])>,
    trailer: &'static [u8],
}

impl FixtureSpec {
    fn new(hardware_string: &'static str, tempo: f32) -> Self {
        Self {
            hardware_string,
            tempo,
            instruments: Vec::new(),
            trailer: &[],
        }
    }

    fn instrument(mut self, id: u8, name: &'static str, grid: &str) -> Self {
        self.instruments.push((id, name, parse_grid(grid)));
        self
    }

    fn trailer(mut self, trailer: &'static [u8]) -> Self {
        self.trailer = trailer;
        self
    }
}

/// Turn `|x---|...|` into raw step bytes.
fn parse_grid(grid: &str) -> [u8; PATTERN_LEN] {
    let mut steps = [0u8; PATTERN_LEN];
    let cells = grid.chars().filter(|c| *c != '|');
    for (idx, cell) in cells.take(PATTERN_LEN).enumerate() {
        steps[idx] = u8::from(cell == 'x');
    }
    steps
}

fn write_fixture(dir: &Path, spec: FixtureSpec) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;

    let mut payload = vec![0u8; HW_VERSION_LEN];
    payload[..spec.hardware_string.len()].copy_from_slice(spec.hardware_string.as_bytes());
    payload.extend_from_slice(&spec.tempo.to_le_bytes());
    for (id, name, steps) in &spec.instruments {
        payload.push(*id);
        payload.extend_from_slice(&(name.len() as u32).to_be_bytes());
        payload.extend_from_slice(name.as_bytes());
        payload.extend_from_slice(steps);
    }

    let mut output = MAGIC.to_vec();
    output.extend_from_slice(&(payload.len() as u64).to_be_bytes());
    output.extend_from_slice(&payload);
    output.extend_from_slice(spec.trailer);

    let path = dir.join("input.splice");
    fs::write(&path, output).map_err(|err| format!("failed to write {}: {}", path.display(), err))?;
    Ok(())
}
