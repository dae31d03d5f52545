use super::*;

fn merchant(key: &str, label: &str, url: &str) -> MerchantSource {
    MerchantSource::new(key, label, url)
}

#[test]
fn default_merchants_are_valid() {
    let registry = default_merchants();
    validate_merchants(&registry).expect("built-in merchants must validate");
    let keys: Vec<_> = registry.iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys, ["pyaterochka", "magnit"]);
}

#[test]
fn get_finds_merchant_by_key() {
    let registry = default_merchants();
    let magnit = registry.get("magnit").expect("magnit is built in");
    assert_eq!(magnit.label, "Магнит");
    assert!(registry.get("lenta").is_none());
}

#[test]
fn validate_rejects_empty_registry() {
    let registry = MerchantRegistry { merchants: vec![] };
    let err = validate_merchants(&registry).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn validate_rejects_underscore_in_key() {
    let registry = MerchantRegistry {
        merchants: vec![merchant("magnit_cosmetic", "Магнит Косметик", "https://x/")],
    };
    let err = validate_merchants(&registry).unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("'_'")),
        "unexpected error: {err}"
    );
}

#[test]
fn validate_rejects_duplicate_key() {
    let registry = MerchantRegistry {
        merchants: vec![
            merchant("magnit", "Магнит", "https://a/"),
            merchant("magnit", "Магнит 2", "https://b/"),
        ],
    };
    let err = validate_merchants(&registry).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")));
}

#[test]
fn validate_rejects_empty_label_and_url() {
    let no_label = MerchantRegistry {
        merchants: vec![merchant("magnit", " ", "https://a/")],
    };
    assert!(validate_merchants(&no_label).is_err());

    let no_url = MerchantRegistry {
        merchants: vec![merchant("magnit", "Магнит", "")],
    };
    assert!(validate_merchants(&no_url).is_err());
}

#[test]
fn parse_merchants_from_yaml() {
    let yaml = r"
merchants:
  - key: lenta
    label: Лента
    url: https://proshoper.ru/actions/lenta/krasnodar/
  - key: magnit
    label: Магнит
    url: https://proshoper.ru/actions/magnit-magazin/krasnodar/
";
    let registry = parse_merchants(yaml).expect("valid yaml");
    assert_eq!(registry.merchants.len(), 2);
    assert_eq!(registry.merchants[0].key, "lenta");
    assert_eq!(registry.merchants[0].label, "Лента");
}

#[test]
fn parse_merchants_rejects_malformed_yaml() {
    let err = parse_merchants("merchants: [ {key: ").unwrap_err();
    assert!(matches!(err, ConfigError::MerchantsFileParse(_)));
}

#[test]
fn load_merchants_reports_missing_file() {
    let err = load_merchants(Path::new("./does/not/exist.yaml")).unwrap_err();
    assert!(
        matches!(err, ConfigError::MerchantsFileIo { ref path, .. } if path.contains("exist.yaml"))
    );
}
