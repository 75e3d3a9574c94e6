use foam_check::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../foam-check.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.discovery.control_dict_prefix, "controlDict");
    assert_eq!(cfg.discovery.excluded_segment, "mesh");
    assert_eq!(cfg.discovery.case_depth, 2);
    assert_eq!(cfg.classification.mesh_crash_threshold, 1000);
    assert!(cfg.report.remediation);
}

#[test]
fn partial_sections_keep_defaults() {
    let cfg: Config = toml::from_str("[report]\ncolor = false\n").expect("parse TOML");
    assert!(!cfg.report.color);
    assert_eq!(cfg.report.run_script, "run.bat");
    assert_eq!(cfg.logging.level, "warn");
    assert_eq!(cfg.discovery.log_file, "log");
}
