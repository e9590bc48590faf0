//! Property-based tests for signature text handling
//!
//! ## Properties Verified
//!
//! - Normalization is idempotent and insensitive to insignificant whitespace
//! - Parsing recovers the parameter list, and a signature feeds its prefixes
//! - Synthesized input signatures carry one descriptor per parameter
//! - Adapters compute the same result as a direct call

use proptest::prelude::*;
use sigproxy::meta::validate_type_name;
use sigproxy::{
    Adapter, ArgBundle, CanonicalNormalizer, MetaTypeRegistry, Normalizer, Signature,
    SignatureSynthesizer,
};

fn arb_base_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("int".to_string()),
        Just("unsigned int".to_string()),
        Just("QString".to_string()),
        Just("QMap<int,QString>".to_string()),
        "[A-Z][a-zA-Z0-9_]{0,8}",
    ]
}

fn arb_param() -> impl Strategy<Value = String> {
    (arb_base_type(), any::<bool>(), any::<bool>()).prop_map(|(base, is_const, is_ref)| {
        let mut param = String::new();
        if is_const {
            param.push_str("const ");
        }
        param.push_str(&base);
        if is_ref {
            param.push('&');
        }
        param
    })
}

fn arb_signature() -> impl Strategy<Value = (String, Vec<String>)> {
    ("[a-z][a-zA-Z0-9_]{0,10}", prop::collection::vec(arb_param(), 0..=5))
}

/// Pad punctuation with spaces the normalizer should drop
fn spaced(name: &str, params: &[String]) -> String {
    let padded: Vec<String> = params
        .iter()
        .map(|p| format!("  {} ", p.replace('&', " & ").replace(',', " , ")))
        .collect();
    format!(" {} ( {} ) ", name, padded.join(" , "))
}

proptest! {
    /// Property: normalizing twice is the same as normalizing once
    #[test]
    fn prop_normalize_idempotent((name, params) in arb_signature(), collapse in any::<bool>()) {
        let normalizer = CanonicalNormalizer { collapse_const_refs: collapse };
        let text = format!("{}({})", name, params.join(", "));
        let once = normalizer.normalize(&text);
        prop_assert_eq!(normalizer.normalize(&once), once.clone());
    }

    /// Property: extra whitespace never changes the canonical form
    #[test]
    fn prop_whitespace_insensitive((name, params) in arb_signature()) {
        let normalizer = CanonicalNormalizer::default();
        let tight = format!("{}({})", name, params.join(","));
        prop_assert_eq!(
            normalizer.normalize(&spaced(&name, &params)),
            normalizer.normalize(&tight)
        );
    }

    /// Property: parsing recovers every top-level parameter
    #[test]
    fn prop_parse_recovers_params((name, params) in arb_signature()) {
        let text = format!("{}({})", name, params.join(","));
        let parsed = Signature::parse(&text).unwrap();
        prop_assert_eq!(&parsed.name, &name);
        prop_assert_eq!(parsed.arity(), params.len());
        prop_assert_eq!(parsed.to_string(), text);
    }

    /// Property: a signature feeds every prefix of itself and nothing longer
    #[test]
    fn prop_feeds_prefixes((name, params) in arb_signature(), cut in 0usize..=5) {
        let full = Signature { name: name.clone(), params: params.clone() };
        let cut = cut.min(params.len());
        let prefix = Signature { name: "slot".to_string(), params: params[..cut].to_vec() };
        let feeds_prefix = full.feeds(&prefix);
        prop_assert!(feeds_prefix);

        let mut longer = params.clone();
        longer.push("int".to_string());
        let extended = Signature { name, params: longer };
        let feeds_longer = full.feeds(&extended);
        prop_assert!(!feeds_longer);
    }

    /// Property: identifier-like names are always accepted by the registry
    #[test]
    fn prop_identifier_names_valid(name in "[A-Za-z_][A-Za-z0-9_]{0,16}") {
        prop_assume!(name != "void" && name != "const");
        let const_name = format!("const {}", name);
        let ref_name = format!("{}&", name);
        let plain_ok = validate_type_name(&name).is_ok();
        let const_err = validate_type_name(&const_name).is_err();
        let ref_err = validate_type_name(&ref_name).is_err();
        prop_assert!(plain_ok);
        prop_assert!(const_err);
        prop_assert!(ref_err);
    }

    /// Property: invoking an adapter equals calling the function directly
    #[test]
    fn prop_invoke_matches_direct_call(a in any::<i32>(), b in any::<i32>(), c in any::<i16>()) {
        fn mix(a: i32, b: &i32, c: i16) -> i64 {
            a as i64 * *b as i64 + c as i64
        }

        let registry = MetaTypeRegistry::with_builtins();
        let normalizer = CanonicalNormalizer::default();
        let synth = SignatureSynthesizer::new(&registry, &normalizer);
        let adapter = Adapter::new(mix, &synth).unwrap();

        let args = ArgBundle::new().arg(&a).arg(&b).arg(&c);
        let mut result = None;
        unsafe { adapter.invoke(&mut result, &args) };
        prop_assert_eq!(result.unwrap().downcast::<i64>().unwrap(), mix(a, &b, c));
    }
}

#[test]
fn test_input_signature_has_one_descriptor_per_param() {
    let registry = MetaTypeRegistry::with_builtins();
    let normalizer = CanonicalNormalizer::verbatim();
    let synth = SignatureSynthesizer::new(&registry, &normalizer);

    let signatures = [
        Adapter::new(|| 0u8, &synth).unwrap().signature_in().to_string(),
        Adapter::new(|_: u8| 0u8, &synth).unwrap().signature_in().to_string(),
        Adapter::new(|_: u8, _: &String| 0u8, &synth).unwrap().signature_in().to_string(),
        Adapter::new(|_: u8, _: u8, _: &mut u8| 0u8, &synth)
            .unwrap()
            .signature_in()
            .to_string(),
        Adapter::new(|_: u8, _: u8, _: u8, _: u8| 0u8, &synth)
            .unwrap()
            .signature_in()
            .to_string(),
        Adapter::new(|_: u8, _: u8, _: u8, _: u8, _: u8| 0u8, &synth)
            .unwrap()
            .signature_in()
            .to_string(),
    ];

    for (arity, signature) in signatures.iter().enumerate() {
        assert_eq!(signature.matches(',').count(), arity.saturating_sub(1));
        assert_eq!(Signature::parse(signature).unwrap().arity(), arity);
    }
}
