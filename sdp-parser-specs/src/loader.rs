//! Fixture file loading.

use crate::SpecError;
use std::fs;
use std::path::Path;

/// Load a single `.sdp` fixture.
pub fn load_fixture(path: &Path) -> Result<String, SpecError> {
    fs::read_to_string(path).map_err(|e| SpecError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load all fixtures from a directory (glob: **/*.sdp), keyed by their path
/// relative to `dir` and sorted by it.
pub fn load_all_fixtures(dir: &Path) -> Result<Vec<(String, String)>, SpecError> {
    let mut fixtures = Vec::new();
    load_fixtures_recursive(dir, dir, &mut fixtures)?;
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fixtures)
}

fn load_fixtures_recursive(
    base: &Path,
    dir: &Path,
    fixtures: &mut Vec<(String, String)>,
) -> Result<(), SpecError> {
    if !dir.is_dir() {
        return Ok(());
    }

    let load_error = |e: std::io::Error| SpecError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    for entry in fs::read_dir(dir).map_err(load_error)? {
        let path = entry.map_err(load_error)?.path();

        if path.is_dir() {
            load_fixtures_recursive(base, &path, fixtures)?;
        } else if path.extension().map_or(false, |e| e == "sdp") {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            let content = load_fixture(&path)?;
            fixtures.push((relative.display().to_string(), content));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("audio-l24-stereo.sdp");
        let content = load_fixture(&path).unwrap();
        assert!(content.starts_with("v=0"));
    }

    #[test]
    fn test_load_missing_fixture() {
        let err = load_fixture(Path::new("/nonexistent/missing.sdp")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/missing.sdp"));
    }

    #[test]
    fn test_load_all_fixtures() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let fixtures = load_all_fixtures(&dir).unwrap();
        assert!(fixtures.len() >= 3);
        assert!(fixtures.iter().all(|(name, _)| name.ends_with(".sdp")));
    }

    #[test]
    fn test_recurses_and_skips_other_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("video")).unwrap();
        fs::write(dir.path().join("a.sdp"), "v=0\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not sdp").unwrap();
        fs::write(dir.path().join("video").join("b.sdp"), "v=0\n").unwrap();

        let fixtures = load_all_fixtures(dir.path()).unwrap();
        let names: Vec<_> = fixtures.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["a.sdp", "video/b.sdp"]);
    }
}
