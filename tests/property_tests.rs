//! Property-based tests for twitch_logging using proptest

use proptest::prelude::*;
use std::sync::Arc;
use twitch_logging::prelude::*;
use twitch_logging::{to_backend_severity, to_event_type, to_library_severity, TraceEvent};

fn any_log_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

fn any_source_level() -> impl Strategy<Value = SourceLevel> {
    prop_oneof![
        Just(SourceLevel::Off),
        Just(SourceLevel::Critical),
        Just(SourceLevel::Error),
        Just(SourceLevel::Warning),
        Just(SourceLevel::Information),
        Just(SourceLevel::Verbose),
        Just(SourceLevel::All),
        Just(SourceLevel::ActivityTracing),
    ]
}

/// Dotted names of one to five non-empty segments
fn dotted_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,7}", 1..=5).prop_map(|parts| parts.join("."))
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// LogLevel string conversions roundtrip
    #[test]
    fn test_log_level_str_roundtrip(level in any_log_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(format!("{}", level), level.to_str());
    }

    /// Parsing ignores case
    #[test]
    fn test_log_level_case_insensitive(level in any_log_level(), use_lower in any::<bool>()) {
        let input = if use_lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        let parsed: std::result::Result<LogLevel, String> = input.parse();
        prop_assert_eq!(parsed, Ok(level));
    }

    /// A threshold allows exactly the non-Off levels at or below it
    #[test]
    fn test_threshold_matches_ordering(threshold in any_log_level(), level in any_log_level()) {
        let expected = level != LogLevel::Off && (level as u8) <= (threshold as u8);
        prop_assert_eq!(threshold.allows(level), expected);
    }

    /// Library -> backend -> library is the identity
    #[test]
    fn test_severity_roundtrip(level in any_log_level()) {
        prop_assert_eq!(to_library_severity(to_backend_severity(level)), level);
    }

    /// Mapping a backend level into the library and back never widens it
    #[test]
    fn test_backend_mapping_is_stable(level in any_source_level()) {
        let library = to_library_severity(level);
        let again = to_library_severity(to_backend_severity(library));
        prop_assert_eq!(library, again);
    }

    /// A logger threshold and its backend switch agree on every emitted level
    #[test]
    fn test_switch_agrees_with_threshold(threshold in any_log_level(), level in any_log_level()) {
        prop_assume!(level != LogLevel::Off);
        let switch = to_backend_severity(threshold);
        prop_assert_eq!(switch.allows(to_event_type(level)), threshold.allows(level));
    }

    /// Source level strings roundtrip
    #[test]
    fn test_source_level_str_roundtrip(level in any_source_level()) {
        let parsed: SourceLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }
}

// ============================================================================
// Name Tests
// ============================================================================

proptest! {
    /// Ancestors are proper prefixes, nearest first, ending at the first segment
    #[test]
    fn test_ancestor_order(name in dotted_name()) {
        let logger_name = LoggerName::new(name.clone()).unwrap();
        let ancestors: Vec<&str> = logger_name.ancestors().collect();
        let segments = name.split('.').count();

        prop_assert_eq!(ancestors.len(), segments - 1);
        let mut previous = name.as_str();
        for ancestor in &ancestors {
            prop_assert!(previous.starts_with(*ancestor));
            prop_assert_eq!(&previous[ancestor.len()..ancestor.len() + 1], ".");
            prop_assert!(ancestor.len() < previous.len());
            previous = ancestor;
        }
        if let Some(last) = ancestors.last() {
            prop_assert!(!last.contains('.'));
        }
    }

    /// Child names extend the parent by exactly one segment
    #[test]
    fn test_child_name(parent in dotted_name(), label in "[A-Za-z][A-Za-z0-9]{0,7}") {
        let parent_name = LoggerName::new(parent.clone()).unwrap();
        let child = parent_name.child(&label).unwrap();

        prop_assert_eq!(child.as_str(), format!("{}.{}", parent, label));
        prop_assert_eq!(child.parent(), Some(parent.as_str()));
    }

    /// Any non-empty name resolves, and resolving again hits the cache
    #[test]
    fn test_any_name_resolves_once(name in dotted_name(), level in any_log_level()) {
        let cache = Arc::new(SourceCache::new(Arc::new(DiagnosticsConfig::default())));
        let first = TraceLogger::with_level(&cache, name.clone(), level).unwrap();
        let second = TraceLogger::with_level(&cache, name.clone(), level).unwrap();

        prop_assert!(Arc::ptr_eq(first.source(), second.source()));
        prop_assert_eq!(first.level(), level);
        prop_assert_eq!(cache.metrics().cache_misses(), 1);
        prop_assert_eq!(cache.metrics().cache_hits(), 1);
    }
}

// ============================================================================
// Event Message Sanitization Tests
// ============================================================================

proptest! {
    /// Control characters that would split a record are escaped
    #[test]
    fn test_message_sanitization(message in ".*") {
        let event = TraceEvent::new(EventType::Information, "Prop", &message);

        prop_assert!(!event.message.contains('\n'));
        prop_assert!(!event.message.contains('\r'));
        prop_assert!(!event.message.contains('\t'));
    }

    /// Injected record boundaries stay inside one message
    #[test]
    fn test_log_injection_prevention(
        prefix in "[a-zA-Z0-9 ]{0,20}",
        injected in "[a-zA-Z0-9 ]{1,20}",
    ) {
        let message = format!("{}\n[ERROR] {}", prefix, injected);
        let event = TraceEvent::new(EventType::Warning, "Prop", &message);

        prop_assert_eq!(event.message, format!("{}\\n[ERROR] {}", prefix, injected));
    }
}
