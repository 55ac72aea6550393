//! Selective exception handler
//!
//! Evaluates an ordered list of string rules against a failure's fault
//! kind. Rule grammar:
//!
//! - `all` or `*` (case-insensitive): matches every kind
//! - `some.package.*`: matches kinds whose qualified name starts with
//!   `some.package.`
//! - a fully-qualified kind name: matches that kind or any descendant,
//!   resolved through the [`FaultRegistry`]; unresolvable names never match
//! - any rule may be prefixed with `!` to invert its match
//!
//! The first rule with an opinion decides; if no rule matches, the build
//! is not halted.

use crate::{ExceptionHandler, PermissiveHandler};
use dialogforge_common::{Error, FatalError, FaultRegistry};

const ALL_FAULTS: &str = "all";
const FAULTS_WILDCARD: &str = "*";
const NEGATION_MARK: char = '!';
const PACKAGE_POSTFIX: &str = ".*";

/// Outcome of evaluating one rule against one fault kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RuleVerdict {
    /// The rule matched and demands a halt
    Halt,
    /// The rule matched and demands that generation proceed
    Proceed,
    /// The rule has no opinion on this kind
    NoOpinion,
}

impl RuleVerdict {
    fn matched(inverse: bool) -> Self {
        if inverse {
            Self::Proceed
        } else {
            Self::Halt
        }
    }
}

/// Handler that halts the build on rule-listed fault kinds and otherwise
/// behaves permissively
#[derive(Clone, Debug)]
pub struct SelectiveHandler {
    rules: Vec<String>,
    registry: FaultRegistry,
    fallback: PermissiveHandler,
}

impl SelectiveHandler {
    /// Create a handler evaluating the given rules in order
    #[must_use]
    pub fn new(rules: Vec<String>, registry: FaultRegistry) -> Self {
        Self {
            rules,
            registry,
            fallback: PermissiveHandler::new(),
        }
    }

    fn check_rule(&self, kind: &str, rule: &str, inverse: bool) -> RuleVerdict {
        if rule.eq_ignore_ascii_case(ALL_FAULTS) || rule == FAULTS_WILDCARD {
            return RuleVerdict::matched(inverse);
        }
        if rule.ends_with(PACKAGE_POSTFIX) {
            // Keep the trailing dot so "com.foo.*" does not match "com.foobar"
            let prefix = &rule[..rule.len() - 1];
            if kind.starts_with(prefix) {
                return RuleVerdict::matched(inverse);
            }
            return RuleVerdict::NoOpinion;
        }
        if self.registry.resolve(rule).is_some() && self.registry.is_assignable(kind, rule) {
            return RuleVerdict::matched(inverse);
        }
        RuleVerdict::NoOpinion
    }
}

impl ExceptionHandler for SelectiveHandler {
    fn handle(&self, message: &str, error: Error) -> Result<(), FatalError> {
        if self.halts_on(error.kind()) {
            return Err(FatalError::from(error));
        }
        self.fallback.handle(message, error)
    }

    fn halts_on(&self, kind: &str) -> bool {
        for rule in &self.rules {
            let (inverse, rule) = match rule.strip_prefix(NEGATION_MARK) {
                Some(stripped) => (true, stripped),
                None => (false, rule.as_str()),
            };
            match self.check_rule(kind, rule, inverse) {
                RuleVerdict::Halt => return true,
                RuleVerdict::Proceed => return false,
                RuleVerdict::NoOpinion => {}
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialogforge_common::error::kinds;

    fn java_registry() -> FaultRegistry {
        let mut registry = FaultRegistry::default();
        registry.register("java.lang.Exception", None);
        registry.register("java.lang.RuntimeException", Some("java.lang.Exception"));
        registry.register(
            "java.lang.NullPointerException",
            Some("java.lang.RuntimeException"),
        );
        registry.register(
            "java.lang.ArrayIndexOutOfBoundsException",
            Some("java.lang.RuntimeException"),
        );
        registry
    }

    fn handler(rules: &[&str]) -> SelectiveHandler {
        SelectiveHandler::new(
            rules.iter().map(ToString::to_string).collect(),
            java_registry(),
        )
    }

    #[test]
    fn test_negated_kind_then_all() {
        let handler = handler(&["!java.lang.NullPointerException", "all"]);
        assert!(!handler.halts_on("java.lang.NullPointerException"));
        assert!(handler.halts_on("java.lang.ArrayIndexOutOfBoundsException"));
        assert!(handler.halts_on(kinds::HANDLER));
    }

    #[test]
    fn test_negation_covers_descendants() {
        let mut registry = java_registry();
        registry.register(
            "com.acme.SpecialNullPointerException",
            Some("java.lang.NullPointerException"),
        );
        let handler = SelectiveHandler::new(
            vec![
                "!java.lang.NullPointerException".to_string(),
                "all".to_string(),
            ],
            registry,
        );
        assert!(!handler.halts_on("com.acme.SpecialNullPointerException"));
    }

    #[test]
    fn test_package_prefix_rule() {
        let handler = handler(&["com.foo.*"]);
        assert!(handler.halts_on("com.foo.BarError"));
        assert!(handler.halts_on("com.foo.baz.QuxError"));
        assert!(!handler.halts_on("com.foobar.BazError"));
        assert!(!handler.halts_on("java.lang.NullPointerException"));
    }

    #[test]
    fn test_first_decisive_rule_wins() {
        let handler = handler(&["java.lang.RuntimeException", "!all"]);
        assert!(handler.halts_on("java.lang.NullPointerException"));
        // NPE decided by rule one; IOException falls through to !all
        assert!(!handler.halts_on("java.io.IOException"));
    }

    #[test]
    fn test_unresolvable_rule_is_skipped() {
        let handler = handler(&["com.acme.NoSuchError"]);
        assert!(!handler.halts_on("java.lang.NullPointerException"));
        assert!(!handler.halts_on("com.acme.NoSuchError.Child"));
    }

    #[test]
    fn test_wildcard_spellings() {
        assert!(handler(&["*"]).halts_on("java.lang.NullPointerException"));
        assert!(handler(&["ALL"]).halts_on("java.lang.NullPointerException"));
    }

    #[test]
    fn test_handle_wraps_on_halt() {
        let handler = handler(&["dialogforge.placement.*"]);
        let result = handler.handle(
            "placement failed",
            Error::invalid_container("detached node"),
        );
        let fatal = result.unwrap_err();
        assert_eq!(fatal.cause().kind(), kinds::INVALID_CONTAINER);
    }

    #[test]
    fn test_handle_falls_back_to_permissive() {
        let handler = handler(&["dialogforge.placement.*"]);
        assert!(handler
            .handle("member skipped", Error::handler("title", "boom"))
            .is_ok());
    }
}
