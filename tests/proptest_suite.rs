//! Property-based tests for apperr
//!
//! These tests use proptest to generate random inputs and verify invariants hold.

use apperr::signals::Cancelled;
use apperr::{
    definitions, Boundary, BoundaryConfig, Catalog, Classifier, Code, Failure, Language, Message,
    RequestMeta, ServiceType,
};
use proptest::prelude::*;
use std::sync::Arc;

fn declared_codes() -> Vec<Code> {
    definitions::REGISTRY
        .iter()
        .flat_map(|(_, codes)| codes.iter().map(|(_, code)| *code))
        .collect()
}

fn any_code() -> impl Strategy<Value = Code> {
    prop_oneof![
        prop::sample::select(declared_codes()),
        any::<u32>().prop_map(Code::new),
    ]
}

fn any_service() -> impl Strategy<Value = ServiceType> {
    prop::sample::select(ServiceType::ALL.to_vec())
}

fn any_language() -> impl Strategy<Value = Language> {
    prop_oneof![Just(Language::En), Just(Language::Id)]
}

// ============================================================================
// COMPILE PROPERTIES
// ============================================================================

proptest! {
    /// Compile accepts any code, text, domain and language without panicking
    #[test]
    fn compile_never_panics(
        code in any_code(),
        message in "\\PC{0,500}",
        service in any_service(),
        language in any_language(),
        debug in any::<bool>(),
    ) {
        let classifier = Classifier::standard();
        let err = Failure::wrap_with_code(message.clone(), code, message);
        let (status, compiled) = classifier.compile(service, &err, language, debug);
        prop_assert_eq!(status, compiled.status());
    }

    /// Equal inputs give equal outputs
    #[test]
    fn compile_is_idempotent(
        code in any_code(),
        message in "\\PC{0,200}",
        service in any_service(),
        language in any_language(),
        debug in any::<bool>(),
    ) {
        let classifier = Classifier::standard();
        let err = Failure::with_code(code, message);
        let first = classifier.compile(service, &err, language, debug);
        let second = classifier.compile(service, &err, language, debug);
        prop_assert_eq!(first, second);
    }

    /// debug_error appears exactly when authorized, and verbatim
    #[test]
    fn debug_error_is_gated(
        code in any_code(),
        message in "\\PC{0,200}",
        debug in any::<bool>(),
    ) {
        let classifier = Classifier::standard();
        let err = Failure::with_code(code, message);
        let (_, compiled) = classifier.compile(ServiceType::Http, &err, Language::En, debug);

        if debug {
            let rendered = err.to_string();
            prop_assert_eq!(compiled.debug_error(), Some(rendered.as_str()));
        } else {
            prop_assert!(compiled.debug_error().is_none());
        }
    }

    /// Declared codes always compile to their catalog's status; anything else degrades to 500
    #[test]
    fn status_comes_from_a_catalog_or_falls_back(
        code in any_code(),
        service in any_service(),
    ) {
        let classifier = Classifier::standard();
        let err = Failure::with_code(code, "x");
        let (status, _) = classifier.compile(service, &err, Language::En, false);

        let listed = ServiceType::ALL
            .iter()
            .filter_map(|s| classifier.catalog(*s))
            .find_map(|catalog| catalog.get(code));
        match listed {
            Some(template) => prop_assert_eq!(status, template.status()),
            None => prop_assert_eq!(status, 500),
        }
    }

    /// The annotated token is the trimmed outer message
    #[test]
    fn annotation_extracts_outer_message(
        token in "[a-zA-Z0-9 ,.:;!?=<>-]{0,60}",
        cause in "\\PC{0,60}",
    ) {
        let catalog = Catalog::new([(
            definitions::VALUE_INVALID,
            Message::new(400, "Invalid value: {}", "Nilai tidak valid: {}").annotated(),
        )]).unwrap();
        let classifier = Classifier::builder().register(ServiceType::Common, catalog).build();

        let err = Failure::annotate(cause, definitions::VALUE_INVALID, &token);
        let (_, compiled) = classifier.compile(ServiceType::Internal, &err, Language::En, false);
        prop_assert_eq!(compiled.message(), format!("Invalid value: {}", token.trim()));
    }

    /// Language selection only changes the message text
    #[test]
    fn language_changes_text_only(code in prop::sample::select(declared_codes())) {
        let classifier = Classifier::standard();
        let err = Failure::with_code(code, "x");
        let (en_status, en) = classifier.compile(ServiceType::Internal, &err, Language::En, false);
        let (id_status, id) = classifier.compile(ServiceType::Internal, &err, Language::Id, false);
        prop_assert_eq!(en_status, id_status);
        prop_assert_eq!(en.code(), id.code());
    }
}

// ============================================================================
// BOUNDARY PROPERTIES
// ============================================================================

proptest! {
    /// A cancelled root cause always yields 499 with no body
    #[test]
    fn cancellation_wins_over_any_code(
        code in any_code(),
        layers in 0usize..5,
        language in any_language(),
        debug in any::<bool>(),
    ) {
        let boundary = Boundary::new(Arc::new(Classifier::standard()), BoundaryConfig::default());
        let mut err = Failure::wrap_with_code(Cancelled, code, "leaf");
        for i in 0..layers {
            err = Failure::wrap(err, format!("layer {i}"));
        }
        let reply = boundary.respond(err, &RequestMeta::new(language, debug), &[]);
        prop_assert_eq!(reply.status(), 499);
        prop_assert!(reply.to_body_bytes().unwrap().is_empty());
    }

    /// Reply bodies always serialize
    #[test]
    fn replies_always_serialize(
        code in any_code(),
        message in "\\PC{0,200}",
        details in prop::collection::vec("\\PC{0,50}", 0..4),
    ) {
        let boundary = Boundary::new(Arc::new(Classifier::standard()), BoundaryConfig::default());
        let details: Vec<&str> = details.iter().map(String::as_str).collect();
        let reply = boundary.respond(Failure::with_code(code, message), &RequestMeta::default(), &details);
        let bytes = reply.to_body_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        prop_assert_eq!(json["error"]["errors"].as_array().map_or(0, Vec::len), details.len());
    }
}

// ============================================================================
// LOG PROPERTIES
// ============================================================================

proptest! {
    /// Log output stays valid UTF-8 and bounded
    #[test]
    fn internal_log_is_bounded(s in "\\PC{0,10000}") {
        let err = Failure::wrap_with_code(s.clone(), definitions::SQL_READ, s);

        let mut buffer = String::new();
        err.internal_log().write_to(&mut buffer).unwrap();

        // Max: 1024 per field + indicators + formatting
        assert!(buffer.len() < 4096);
    }

    /// Metadata count is preserved
    #[test]
    fn metadata_count_preserved(count in 0usize..10) {
        let mut err = Failure::with_code(definitions::CACHE_READ, "details");
        for i in 0..count {
            err = err.with_metadata("key", format!("value_{i}"));
        }
        assert_eq!(err.internal_log().metadata().len(), count);
    }

    /// Display and Debug never panic
    #[test]
    fn display_never_panics(message in "\\PC{0,1000}", cause in "\\PC{0,1000}") {
        let err = Failure::wrap_with_code(cause, definitions::FILE_READ, message);
        let _ = format!("{err}");
        let _ = format!("{err:?}");
    }
}

// ============================================================================
// CONCURRENT PROPERTIES
// ============================================================================

proptest! {
    /// One classifier serves many threads
    #[test]
    fn concurrent_compilation(
        thread_count in 1usize..8,
        errors_per_thread in 1usize..50,
    ) {
        let classifier = Arc::new(Classifier::standard());
        let handles: Vec<_> = (0..thread_count)
            .map(|t| {
                let classifier = Arc::clone(&classifier);
                std::thread::spawn(move || {
                    for i in 0..errors_per_thread {
                        let err = Failure::with_code(definitions::SQL_UNIQUE_CONSTRAINT, format!("thread {t} row {i}"));
                        let (status, _) = classifier.compile(ServiceType::Sql, &err, Language::Id, false);
                        assert_eq!(status, 409);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
