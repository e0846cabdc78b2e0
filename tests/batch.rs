use pertmap::{InverseMethod, MapSettingsBuilder, MapperError, ModelSetMapper, VariableType};
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, text: &str) {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

#[test]
fn only_present_methods_are_mapped() {
    pertmap::_setup_pretty_env_logger_default();
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "results/CG/CG1.lst", "Vs 10.0 20.0 6000.0 0.02\n");
    write(dir.path(), "results/CG/CG2.lst", "Vs 10.0 20.0 6000.0 -0.04\n");

    let settings = MapSettingsBuilder::default()
        .work_path(dir.path())
        .tag("batch")
        .build()
        .unwrap();
    let report = ModelSetMapper::new(
        "results".into(),
        vec![InverseMethod::CG, InverseMethod::SVD],
        2,
        settings,
    )
    .run()
    .unwrap();

    assert_eq!(report.produced, vec!["CG1".to_string(), "CG2".to_string()]);
    assert_eq!(report.skipped_methods, vec![InverseMethod::SVD]);
    assert!(report.missing_results.is_empty());
    assert!(report
        .output_folder
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("modelSet_batch_"));

    for name in &report.produced {
        let folder = report.output_folder.join(name);
        for file in ["VsPercent.lst", "VsPercentGrid.sh", "VsPercentMap.sh"] {
            assert!(folder.join(file).is_file(), "{}/{} missing", name, file);
        }
    }
    assert_eq!(report.all_map_scripts.len(), 1);
    let all = fs::read_to_string(report.output_folder.join("VsPercentAllMap.sh")).unwrap();
    assert!(all.contains("for dir in CG1 CG2\n"));
}

#[test]
fn missing_solutions_are_recorded() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "results/CG/CG1.lst", "Vs 10.0 20.0 6000.0 0.02\n");

    let settings = MapSettingsBuilder::default()
        .work_path(dir.path())
        .variable_types(vec![VariableType::Vs, VariableType::Vp])
        .build()
        .unwrap();
    let report = ModelSetMapper::new("results".into(), vec![InverseMethod::CG], 3, settings)
        .run()
        .unwrap();

    assert_eq!(report.produced, vec!["CG1".to_string()]);
    assert_eq!(report.missing_results.len(), 2);
    assert!(report.missing_results[0].ends_with("CG/CG2.lst"));
    assert_eq!(report.all_map_scripts.len(), 2);
    assert!(report.output_folder.join("VpPercentAllMap.sh").is_file());
}

#[test]
fn missing_result_folder_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = MapSettingsBuilder::default()
        .work_path(dir.path())
        .build()
        .unwrap();
    let result = ModelSetMapper::new("results".into(), vec![InverseMethod::CG], 1, settings).run();
    assert!(matches!(result, Err(MapperError::Configuration(_))));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn repeated_method_is_mapped_once() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "results/CG/CG1.lst", "Vs 10.0 20.0 6000.0 0.02\n");
    let settings = MapSettingsBuilder::default()
        .work_path(dir.path())
        .build()
        .unwrap();
    let report = ModelSetMapper::new(
        "results".into(),
        vec![InverseMethod::CG, InverseMethod::CG],
        1,
        settings,
    )
    .run()
    .unwrap();
    assert_eq!(report.produced, vec!["CG1".to_string()]);
    let all = fs::read_to_string(report.output_folder.join("VsPercentAllMap.sh")).unwrap();
    assert!(all.contains("for dir in CG1\n"));
}
