use drive_adapters::flows::by_name;
use drive_adapters::JsonFileStorage;
use drive_core::{FlowController, Storage};
use serde_json::json;

#[test]
fn saves_loads_and_removes_json_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = JsonFileStorage::new(dir.path().join("drafts"));

    assert_eq!(storage.load("cart").unwrap(), None);
    storage.save("cart", &json!({"items": ["alloy-wheels"]})).unwrap();
    assert_eq!(storage.load("cart").unwrap(), Some(json!({"items": ["alloy-wheels"]})));
    assert!(storage.path_for("cart").exists());

    storage.remove("cart").unwrap();
    storage.remove("cart").unwrap();
    assert_eq!(storage.load("cart").unwrap(), None);
}

#[test]
fn keys_cannot_escape_the_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = JsonFileStorage::new(dir.path());
    let path = storage.path_for("../../etc/passwd");
    assert_eq!(path.parent(), Some(dir.path()));
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("_2e_2e_2f_2e_2e_2fetc_2fpasswd.json"));
}

#[test]
fn similar_keys_use_distinct_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = JsonFileStorage::new(dir.path());
    storage.save("draft:theft", &json!({"who": "colon"})).unwrap();
    storage.save("draft_theft", &json!({"who": "underscore"})).unwrap();
    storage.save("draft_3atheft", &json!({"who": "escaped-looking"})).unwrap();

    assert_eq!(storage.load("draft:theft").unwrap(), Some(json!({"who": "colon"})));
    assert_eq!(storage.load("draft_theft").unwrap(), Some(json!({"who": "underscore"})));
    assert_eq!(storage.load("draft_3atheft").unwrap(), Some(json!({"who": "escaped-looking"})));

    storage.remove("draft_theft").unwrap();
    assert_eq!(storage.load("draft:theft").unwrap(), Some(json!({"who": "colon"})));
}

#[test]
fn draft_resumes_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut ctl = FlowController::new(by_name("upload_document").unwrap()).with_storage(JsonFileStorage::new(dir.path()),
                                                                                              "draft:upload");
        ctl.set_field("category", "documentType", json!("pollution")).unwrap();
        ctl.go_to_next().unwrap();
        ctl.save_draft().unwrap();
    }
    let ctl = FlowController::resume(by_name("upload_document").unwrap(),
                                     JsonFileStorage::new(dir.path()),
                                     "draft:upload").expect("resume");
    assert!(ctl.is_restored());
    assert_eq!(ctl.state().current_step_id(), "file");
}
