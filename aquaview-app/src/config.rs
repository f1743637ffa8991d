use anyhow::{Context, Result};
use aquaview_core::scenario;
use aquaview_schemas::file_formats::ScenarioFile;
use std::{collections::BTreeMap, fs, path::Path};

/// Loads a single scenario file.
pub fn load_scenario_file(path: &Path) -> Result<ScenarioFile> {
    let path_str = path
        .to_str()
        .with_context(|| format!("Scenario path is not valid UTF-8: {:?}", path))?;
    let file = scenario::load_scenario(path_str)
        .with_context(|| format!("Failed to load scenario {:?}", path))?;
    Ok(file)
}

/// Loads every `*.yaml`/`*.yml` scenario in a directory, keyed by scenario name.
pub fn load_scenario_dir(dir_path: &Path) -> Result<BTreeMap<String, ScenarioFile>> {
    println!("Loading scenarios from '{}'...", dir_path.display());
    let scenarios = load_yaml_files_into_map(dir_path, load_scenario_file, |s: &ScenarioFile| s.name.clone())?;
    println!("Loaded {} scenario(s).", scenarios.len());
    Ok(scenarios)
}

/// Generic helper to load all YAML files in a directory into a map.
fn load_yaml_files_into_map<P, T, L, K>(dir_path: P, load: L, get_key: K) -> Result<BTreeMap<String, T>>
where
    P: AsRef<Path>,
    L: Fn(&Path) -> Result<T>, // Parses one file
    K: Fn(&T) -> String,       // A closure to get the key for the map from an item T
{
    let mut map = BTreeMap::new();
    for entry in fs::read_dir(dir_path.as_ref())
        .with_context(|| format!("Failed to read directory: {:?}", dir_path.as_ref()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            let item = load(&path)?;
            let key = get_key(&item);
            if map.insert(key.clone(), item).is_some() {
                log::warn!("Scenario name '{}' is used more than once; keeping {:?}", key, path);
            }
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_only_yaml_files_keyed_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.yaml"),
            "schema_version: \"1.0\"\nname: washout\nparams:\n  - { stage: nitrification, hrt_ratio: 0.3 }\n",
        )
        .unwrap();
        fs::write(dir.path().join("b.yml"), "schema_version: \"1.0\"\nname: design\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a scenario").unwrap();

        let scenarios = load_scenario_dir(dir.path()).unwrap();
        let names: Vec<&String> = scenarios.keys().collect();
        assert_eq!(names, vec!["design", "washout"]);
        assert_eq!(scenarios["washout"].params.len(), 1);
    }

    #[test]
    fn reports_the_failing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.yaml"), "name: [\n").unwrap();
        let err = load_scenario_dir(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.yaml"));
    }

    #[test]
    fn bundled_scenarios_load_and_validate() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");
        let scenarios = load_scenario_dir(&dir).unwrap();
        assert!(scenarios.contains_key("nitrifier-washout"));
        for file in scenarios.values() {
            scenario::scenario_params(file).unwrap();
        }
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(load_scenario_dir(Path::new("/nonexistent/aquaview/scenarios")).is_err());
    }
}
