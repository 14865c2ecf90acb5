mod common;

use common::{other_keypair, test_keypair, today};
use ezlottery_license::{
    ActivationStore, LICENSE_FILE_NAME, LicenseError, LicensePolicy, encode,
};
use tempfile::tempdir;

#[test]
fn activate_caches_token() {
    let dir = tempdir().unwrap();
    let store = ActivationStore::new(dir.path().join(LICENSE_FILE_NAME));
    let (sk, vk) = test_keypair();
    let token = encode("M-1", "2030-01-01", "", &sk);

    let payload = store.activate(token.as_str(), &vk, "M1", today()).unwrap();
    assert_eq!(payload.device_id, "M1");
    assert_eq!(store.load().unwrap().as_deref(), Some(token.as_str()));
    assert!(store.is_activated(&vk, "M1", today()));
}

#[test]
fn activate_trims_pasted_token() {
    let dir = tempdir().unwrap();
    let store = ActivationStore::new(dir.path().join(LICENSE_FILE_NAME));
    let (sk, vk) = test_keypair();
    let token = encode("M1", "2030-01-01", "", &sk);

    store
        .activate(&format!("\n{token}  \n"), &vk, "M1", today())
        .unwrap();
    assert_eq!(
        std::fs::read_to_string(store.path()).unwrap(),
        token.as_str()
    );
}

#[test]
fn rejected_token_is_not_cached() {
    let dir = tempdir().unwrap();
    let store = ActivationStore::new(dir.path().join(LICENSE_FILE_NAME));
    let (sk, vk) = test_keypair();
    let token = encode("M1", "2030-01-01", "", &sk);

    let result = store.activate(token.as_str(), &vk, "M2", today());
    assert!(matches!(result, Err(LicenseError::DeviceMismatch)));
    assert!(!store.path().exists());
}

#[test]
fn missing_cache_is_not_activated() {
    let dir = tempdir().unwrap();
    let store = ActivationStore::new(dir.path().join(LICENSE_FILE_NAME));
    let (_, vk) = test_keypair();
    assert!(store.load().unwrap().is_none());
    assert!(store.check(&vk, "M1", today(), &[]).unwrap().is_none());
    assert!(!store.is_activated(&vk, "M1", today()));
}

#[test]
fn corrupted_cache_is_not_activated() {
    let dir = tempdir().unwrap();
    let store = ActivationStore::new(dir.path().join(LICENSE_FILE_NAME));
    let (_, vk) = test_keypair();
    store.save("garbage").unwrap();

    assert!(matches!(
        store.check(&vk, "M1", today(), &[]),
        Err(LicenseError::MalformedToken)
    ));
    assert!(!store.is_activated(&vk, "M1", today()));
}

#[test]
fn cache_from_other_vendor_is_not_activated() {
    let dir = tempdir().unwrap();
    let store = ActivationStore::new(dir.path().join(LICENSE_FILE_NAME));
    let (other_sk, _) = other_keypair();
    let (_, vk) = test_keypair();
    store
        .save(encode("M1", "2030-01-01", "", &other_sk).as_str())
        .unwrap();
    assert!(!store.is_activated(&vk, "M1", today()));
}

#[test]
fn expired_cache_is_not_activated() {
    let dir = tempdir().unwrap();
    let store = ActivationStore::new(dir.path().join(LICENSE_FILE_NAME));
    let (sk, vk) = test_keypair();
    store
        .save(encode("M1", "2026-03-01", "", &sk).as_str())
        .unwrap();
    assert!(matches!(
        store.check(&vk, "M1", today(), &[]),
        Err(LicenseError::Expired(_))
    ));
    assert!(!store.is_activated(&vk, "M1", today()));
}

#[test]
fn check_enforces_required_features() {
    let dir = tempdir().unwrap();
    let store = ActivationStore::new(dir.path().join(LICENSE_FILE_NAME));
    let (sk, vk) = test_keypair();
    store
        .save(encode("M1", "2030-01-01", "import", &sk).as_str())
        .unwrap();
    assert!(store.check(&vk, "M1", today(), &["import"]).unwrap().is_some());
    assert!(matches!(
        store.check(&vk, "M1", today(), &["redeem"]),
        Err(LicenseError::MissingFeature(_))
    ));
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("app").join(LICENSE_FILE_NAME);
    let store = ActivationStore::new(&path);
    store.save("token").unwrap();
    assert!(path.exists());
}

#[test]
fn clear_removes_cache_and_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = ActivationStore::new(dir.path().join(LICENSE_FILE_NAME));
    store.save("token").unwrap();
    store.clear().unwrap();
    assert!(!store.path().exists());
    store.clear().unwrap();
}

#[test]
fn store_policy_applies_to_activation() {
    let dir = tempdir().unwrap();
    let (sk, vk) = test_keypair();
    let token = encode("", "2030-01-01", "", &sk);

    let strict = ActivationStore::new(dir.path().join("strict"));
    assert!(strict.activate(token.as_str(), &vk, "", today()).is_err());

    let lenient = ActivationStore::new(dir.path().join("lenient")).with_policy(LicensePolicy {
        allow_empty_identity: true,
    });
    assert!(lenient.activate(token.as_str(), &vk, "", today()).is_ok());
}

#[test]
fn default_location_uses_license_file_name() {
    let store = ActivationStore::default_location();
    assert!(store.path().ends_with(LICENSE_FILE_NAME));
}
