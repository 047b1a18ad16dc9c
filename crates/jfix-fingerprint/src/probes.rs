//! Built-in feature probes
//!
//! Each probe is an independent pure function over a [`MaskedSource`].
//! Probes never call each other, so adding one leaves every existing count
//! untouched.

use crate::mask::MaskedSource;
use crate::probe::{FeatureProbe, ProbeTier};
use once_cell::sync::Lazy;
use regex::Regex;

/// Standalone lambda expressions: `->` at parenthesis depth zero
pub const LAMBDA_ARROW: &str = "lambda_arrow";
/// Method references: `::`
pub const METHOD_REFERENCE: &str = "method_reference";
/// Reference-typed declarations with two or more array dimensions
pub const GENERIC_ARRAY_DECL: &str = "generic_array_decl";
/// Lambdas passed inside a call's argument list
pub const LAMBDA_ARGUMENT: &str = "lambda_argument";
/// `.stream()` / `.parallelStream()` calls
pub const STREAM_PIPELINE: &str = "stream_pipeline";
/// `import` declarations
pub const IMPORT_DECL: &str = "import_decl";
/// `class`, `interface` and `enum` declarations
pub const CLASS_DECL: &str = "class_decl";
/// `implements` clauses
pub const IMPLEMENTS_CLAUSE: &str = "implements_clause";
/// Array declarations of any element type and dimension
pub const ARRAY_DECL: &str = "array_decl";
/// `static final` fields initialised in place
pub const STATIC_FINAL_CONSTANT: &str = "static_final_constant";

/// Catalog of every built-in probe, core tier first
pub(crate) const BUILTIN: &[FeatureProbe] = &[
    FeatureProbe::builtin(
        LAMBDA_ARROW,
        "lambda arrows outside any call argument list",
        ProbeTier::Core,
        lambda_arrow,
    ),
    FeatureProbe::builtin(
        METHOD_REFERENCE,
        "method reference tokens (Type::method)",
        ProbeTier::Core,
        method_reference,
    ),
    FeatureProbe::builtin(
        GENERIC_ARRAY_DECL,
        "multi-dimensional array declarations of reference types",
        ProbeTier::Core,
        generic_array_decl,
    ),
    FeatureProbe::builtin(
        LAMBDA_ARGUMENT,
        "lambda arrows inside call argument lists",
        ProbeTier::Extended,
        lambda_argument,
    ),
    FeatureProbe::builtin(
        STREAM_PIPELINE,
        "stream() and parallelStream() pipeline heads",
        ProbeTier::Extended,
        stream_pipeline,
    ),
    FeatureProbe::builtin(IMPORT_DECL, "import declarations", ProbeTier::Extended, import_decl),
    FeatureProbe::builtin(
        CLASS_DECL,
        "class, interface and enum declarations",
        ProbeTier::Extended,
        class_decl,
    ),
    FeatureProbe::builtin(
        IMPLEMENTS_CLAUSE,
        "implements clauses",
        ProbeTier::Extended,
        implements_clause,
    ),
    FeatureProbe::builtin(
        ARRAY_DECL,
        "array declarations of any element type",
        ProbeTier::Extended,
        array_decl,
    ),
    FeatureProbe::builtin(
        STATIC_FINAL_CONSTANT,
        "static final fields with an initialiser",
        ProbeTier::Extended,
        static_final_constant,
    ),
];

static GENERIC_ARRAY_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"\b[A-Z][\w$]*(?:\s*<[^;{}()=]*>)?(?:\s*\[\s*\]){2,}\s*[A-Za-z_$][\w$]*")
});

static ARRAY_RE: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"\b(?:[A-Z][\w$]*(?:\s*<[^;{}()=]*>)?|byte|short|int|long|float|double|char|boolean)(?:\s*\[\s*\])+\s*[A-Za-z_$][\w$]*",
    )
});

static STREAM_RE: Lazy<Regex> = Lazy::new(|| compile(r"\.\s*(?:parallelStream|stream)\s*\(\s*\)"));

static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?m)^\s*import\s+(?:static\s+)?[\w$]+(?:\s*\.\s*[\w$]+)*(?:\s*\.\s*\*)?\s*;"));

static CLASS_RE: Lazy<Regex> = Lazy::new(|| compile(r"\b(?:class|interface|enum)\s+[A-Za-z_$][\w$]*"));

static IMPLEMENTS_RE: Lazy<Regex> = Lazy::new(|| compile(r"\bimplements\b"));

static STATIC_FINAL_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"\b(?:static\s+final|final\s+static)\s+[\w$.<>\[\], ]+?\s+[A-Za-z_$][\w$]*\s*=")
});

static SWITCH_LABEL_RE: Lazy<Regex> = Lazy::new(|| compile(r"^\s*(?:case\b[^:]*?|default)\s*$"));

// Patterns are literals; a failure here is a programming error caught by
// the unit tests below.
#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in probe pattern must compile")
}

fn count(re: &Regex, src: &MaskedSource) -> u64 {
    re.find_iter(src.as_str()).count() as u64
}

/// Count matches that are not array allocations (`new T[][]`)
fn count_declarations(re: &Regex, src: &MaskedSource) -> u64 {
    let text = src.as_str();
    re.find_iter(text)
        .filter(|m| !text[..m.start()].trim_end().ends_with("new"))
        .count() as u64
}

/// Whether the arrow after `prefix` closes a `case ... ->` or `default ->`
/// switch label
///
/// Only the text since the last statement or block boundary on the line is
/// considered, so `case 1: r = () -> go();` and default methods still count.
fn ends_switch_label(prefix: &str) -> bool {
    let clause = prefix.rfind([';', '{', '}']).map_or(prefix, |i| &prefix[i + 1..]);
    SWITCH_LABEL_RE.is_match(clause) && !clause.contains("->")
}

/// Split `->` tokens into (top level, nested in parentheses)
///
/// Arrows of `case X ->` switch rules are not lambdas and are skipped.
fn arrows(src: &MaskedSource) -> (u64, u64) {
    let mut top = 0;
    let mut nested = 0;
    let mut depth = 0usize;

    for line in src.lines() {
        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'(' => depth += 1,
                b')' => depth = depth.saturating_sub(1),
                b'-' if bytes.get(i + 1) == Some(&b'>') => {
                    if depth > 0 {
                        nested += 1;
                    } else if !ends_switch_label(&line[..i]) {
                        top += 1;
                    }
                    i += 1;
                }
                _ => {}
            }
            i += 1;
        }
    }

    (top, nested)
}

fn lambda_arrow(src: &MaskedSource) -> u64 {
    arrows(src).0
}

fn lambda_argument(src: &MaskedSource) -> u64 {
    arrows(src).1
}

fn method_reference(src: &MaskedSource) -> u64 {
    src.as_str().matches("::").count() as u64
}

fn generic_array_decl(src: &MaskedSource) -> u64 {
    count_declarations(&GENERIC_ARRAY_RE, src)
}

fn array_decl(src: &MaskedSource) -> u64 {
    count_declarations(&ARRAY_RE, src)
}

fn stream_pipeline(src: &MaskedSource) -> u64 {
    count(&STREAM_RE, src)
}

fn import_decl(src: &MaskedSource) -> u64 {
    count(&IMPORT_RE, src)
}

fn class_decl(src: &MaskedSource) -> u64 {
    count(&CLASS_RE, src)
}

fn implements_clause(src: &MaskedSource) -> u64 {
    count(&IMPLEMENTS_RE, src)
}

fn static_final_constant(src: &MaskedSource) -> u64 {
    count(&STATIC_FINAL_RE, src)
}
