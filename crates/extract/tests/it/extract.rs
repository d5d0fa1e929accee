use crate::utils::{MY_CAR, TestProject};
use extract_bytecode::{ArtifactOutcome, ExtractConfig, Extractor};
use serde_json::json;
use similar_asserts::assert_eq;

fn extract(prj: &TestProject) -> extract_bytecode::Summary {
    Extractor::new(&ExtractConfig::with_root(prj.root())).run().unwrap()
}

#[test]
fn extracts_bytecode_and_metadata() {
    let prj = TestProject::new();
    prj.add_artifact("MyCar.sol", "MyCar.json", MY_CAR);

    let summary = extract(&prj);
    assert_eq!(summary.extracted, 1);
    assert_eq!(prj.outputs(), vec!["MyCar.bytecode", "MyCar.meta.json"]);
    assert_eq!(prj.read_output("MyCar.bytecode"), "0x608060405260");

    let mut meta = prj.read_metadata("MyCar");
    let extracted_at = meta["extractedAt"].take();
    assert_eq!(
        meta,
        json!({
            "contractName": "MyCar",
            "sourceFile": "MyCar.sol",
            "abi": [{ "type": "function", "name": "drive" }],
            "bytecodeLength": 14,
            "extractedAt": null
        })
    );
    let extracted_at = extracted_at.as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(extracted_at).is_ok(), "{extracted_at}");
    assert!(extracted_at.ends_with('Z'), "{extracted_at}");
}

#[test]
fn metadata_is_pretty_printed_in_field_order() {
    let prj = TestProject::new();
    prj.add_artifact("MyCar.sol", "MyCar.json", MY_CAR);
    extract(&prj);

    let raw = prj.read_output("MyCar.meta.json");
    let keys: Vec<_> = raw
        .lines()
        .filter(|line| line.starts_with("  \"") && !line.starts_with("   "))
        .map(|line| line.trim().split('"').nth(1).unwrap().to_string())
        .collect();
    assert_eq!(keys, ["contractName", "sourceFile", "abi", "bytecodeLength", "extractedAt"]);
    assert!(raw.starts_with("{\n  \"contractName\": \"MyCar\",\n"), "{raw}");
    assert!(raw.ends_with('}'), "{raw}");
}

#[test]
fn missing_abi_becomes_empty_list() {
    let prj = TestProject::new();
    let engine = r#"{"bytecode":{"object":"0x6080604052348015"}}"#;
    prj.add_artifact("Engine.sol", "Engine.json", engine);
    extract(&prj);

    let meta = prj.read_metadata("Engine");
    assert_eq!(meta["abi"], json!([]));
    assert_eq!(meta["bytecodeLength"], json!(18));
}

#[test]
fn skips_empty_and_missing_bytecode() {
    let prj = TestProject::new();
    prj.add_artifact("Car.sol", "ICar.json", r#"{"abi":[{"type":"function","name":"drive"}]}"#);
    prj.add_artifact("Car.sol", "Placeholder.json", r#"{"bytecode":{"object":"0x"}}"#);
    prj.add_artifact("Car.sol", "Short.json", r#"{"bytecode":{"object":"0x6080604"}}"#);
    prj.add_artifact("Car.sol", "NoObject.json", r#"{"bytecode":{"sourceMap":""}}"#);

    let summary = extract(&prj);
    assert_eq!(summary.extracted, 0);
    assert_eq!(summary.skipped_empty, 2);
    assert_eq!(summary.skipped_no_field, 2);
    assert!(prj.outputs().is_empty(), "{:?}", prj.outputs());
}

#[test]
fn malformed_artifact_does_not_stop_the_run() {
    let prj = TestProject::new();
    prj.add_artifact("A.sol", "Broken.json", "{ \"bytecode\": ");
    prj.add_artifact("A.sol", "Good.json", r#"{"bytecode":{"object":"0x6080604052"}}"#);
    prj.add_artifact("MyCar.sol", "MyCar.json", MY_CAR);

    let summary = extract(&prj);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.extracted, 2);
    assert_eq!(
        prj.outputs(),
        vec!["Good.bytecode", "Good.meta.json", "MyCar.bytecode", "MyCar.meta.json"]
    );
    assert!(matches!(summary.artifacts[0].outcome, ArtifactOutcome::Failed { .. }));
}

#[test]
fn only_selected_directories_are_scanned() {
    let prj = TestProject::new();
    prj.add_artifact("Utils", "Math.json", r#"{"bytecode":{"object":"0x6080604052"}}"#);
    prj.add_artifact("RaceCar", "Race.json", r#"{"bytecode":{"object":"0x6080604052"}}"#);
    std::fs::write(prj.root().join("out/Loose.json"), MY_CAR).unwrap();

    let summary = extract(&prj);
    assert_eq!(summary.extracted, 1);
    assert_eq!(prj.outputs(), vec!["Race.bytecode", "Race.meta.json"]);
}

#[test]
fn rerun_overwrites_with_identical_bytecode() {
    let prj = TestProject::new();
    prj.add_artifact("MyCar.sol", "MyCar.json", MY_CAR);
    std::fs::create_dir_all(prj.bytecode_dir()).unwrap();
    std::fs::write(prj.bytecode_dir().join("MyCar.bytecode"), "stale").unwrap();

    extract(&prj);
    let bytecode = prj.read_output("MyCar.bytecode");
    let mut first = prj.read_metadata("MyCar");

    extract(&prj);
    let mut second = prj.read_metadata("MyCar");

    assert_eq!(bytecode, "0x608060405260");
    assert_eq!(prj.read_output("MyCar.bytecode"), bytecode);
    first["extractedAt"].take();
    second["extractedAt"].take();
    assert_eq!(first, second);
}

#[test]
fn same_contract_name_in_two_directories_is_overwritten() {
    let prj = TestProject::new();
    prj.add_artifact("A.sol", "Car.json", r#"{"bytecode":{"object":"0xaaaaaaaaaa"}}"#);
    prj.add_artifact("B.sol", "Car.json", r#"{"bytecode":{"object":"0xbbbbbbbbbb"}}"#);

    let summary = extract(&prj);
    assert_eq!(summary.extracted, 2);
    assert_eq!(prj.read_output("Car.bytecode"), "0xbbbbbbbbbb");
    assert_eq!(prj.read_metadata("Car")["sourceFile"], json!("B.sol"));
}

#[test]
fn creates_nested_destination() {
    let prj = TestProject::new();
    prj.add_artifact("MyCar.sol", "MyCar.json", MY_CAR);
    let mut config = ExtractConfig::with_root(prj.root());
    config.bytecode = "artifacts/extracted/bytecode".into();

    let summary = Extractor::new(&config).run().unwrap();
    assert_eq!(summary.bytecode_dir, prj.root().join("artifacts/extracted/bytecode"));
    assert!(summary.bytecode_dir.join("MyCar.bytecode").is_file());
}

#[test]
fn missing_out_dir_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let err = Extractor::new(&ExtractConfig::with_root(tmp.path())).run().unwrap_err();
    assert!(err.to_string().contains("failed to read dir"), "{err}");
    // The destination is prepared before the source is listed.
    assert!(tmp.path().join("bytecode").is_dir());
}
