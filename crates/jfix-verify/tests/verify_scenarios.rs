use jfix_corpus::{Fixture, FixtureStore};
use jfix_fingerprint::{Extractor, Fingerprint, ProbeSet};
use jfix_test_utils::{java8_sample, sample_fixtures, simple_pojo, SampleCorpus, JAVA8_SAMPLE_ID, SIMPLE_POJO_ID};
use jfix_verify::{verify, ExpectationRegistry, FeatureDiff, TableError, Verifier};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn fp(pairs: &str) -> Fingerprint {
    pairs.parse().unwrap()
}

#[test]
fn java8_sample_passes_with_lambda_and_method_refs() {
    let mut registry = ExpectationRegistry::new();
    registry.register(JAVA8_SAMPLE_ID, fp("lambda_arrow:1 method_reference:2"));

    let results = verify(&[java8_sample()], &registry);
    assert_eq!(results.len(), 1);
    assert!(results[0].passed(), "diffs: {:?}", results[0].diffs());
    assert!(results[0].diffs().is_empty());
}

#[test]
fn simple_pojo_passes_with_generic_array() {
    let mut registry = ExpectationRegistry::new();
    registry.register(SIMPLE_POJO_ID, fp("generic_array_decl:1"));

    let results = verify(&[simple_pojo()], &registry);
    assert!(results[0].passed(), "diffs: {:?}", results[0].diffs());
}

#[test]
fn unregistered_fixture_is_reported_unchecked() {
    let registry = ExpectationRegistry::new();
    let report = Verifier::new().run(&sample_fixtures(), &registry);

    assert_eq!(
        report.render_text(),
        "Java8Sample.java FAIL\n  <none>: expected <registered>, actual <unchecked>\n\
         SimplePOJO.java FAIL\n  <none>: expected <registered>, actual <unchecked>\n"
    );
    for result in report.results() {
        assert_eq!(result.diffs(), &[FeatureDiff::unchecked()]);
    }
    assert_eq!(report.summary().unchecked, 2);
}

#[test]
fn extended_probes_flag_extra_features() {
    let mut registry = ExpectationRegistry::new();
    registry.register(JAVA8_SAMPLE_ID, fp("lambda_arrow:1 method_reference:2"));

    let verifier = Verifier::new().with_extractor(Extractor::with_probes(ProbeSet::extended()));
    let results = verifier.verify(&[java8_sample()], &registry);

    assert!(!results[0].passed());
    let features: Vec<&str> = results[0].diffs().iter().map(|d| d.feature.as_str()).collect();
    assert_eq!(
        features,
        vec![
            "array_decl",
            "class_decl",
            "implements_clause",
            "import_decl",
            "lambda_argument",
            "stream_pipeline",
        ]
    );
}

#[test]
fn reports_are_byte_identical_across_runs() {
    let mut registry = ExpectationRegistry::new();
    registry.register(JAVA8_SAMPLE_ID, fp("lambda_arrow:1 method_reference:2"));
    registry.register(SIMPLE_POJO_ID, fp("generic_array_decl:2"));
    let fixtures = sample_fixtures();

    let first = Verifier::new().run(&fixtures, &registry);
    let second = Verifier::new().with_parallel(true).run(&fixtures, &registry);

    assert_eq!(first.render_text(), second.render_text());
    assert_eq!(first.render_json().unwrap(), second.render_json().unwrap());
    assert_eq!(first.digest(), second.digest());
}

#[test]
fn end_to_end_from_disk() {
    let corpus = SampleCorpus::new();
    corpus.write("nested/Extra.java", "class Extra { Runnable r = () -> {}; }");
    let table = corpus.write(
        "expected.toml",
        r#"
[[fixture]]
id = "Java8Sample.java"
features = { lambda_arrow = 1, method_reference = 2 }

[[fixture]]
id = "SimplePOJO.java"
features = { generic_array_decl = 1 }

[[fixture]]
id = "nested/Extra.java"
features = { lambda_arrow = 1 }
"#,
    );

    let fixtures = FixtureStore::new().scan(corpus.root()).unwrap();
    let registry = ExpectationRegistry::from_files([&table]).unwrap();
    let report = Verifier::new().run(&fixtures, &registry);

    assert_eq!(
        report.render_text(),
        "Java8Sample.java PASS\nSimplePOJO.java PASS\nnested/Extra.java PASS\n"
    );
    assert!(report.passed());
}

#[test]
fn merged_tables_last_write_wins() {
    let corpus = SampleCorpus::new();
    let first = corpus.write("a.txt", "SimplePOJO.java generic_array_decl:5\n");
    let second = corpus.write("b.yaml", "fixture:\n  - id: SimplePOJO.java\n    features: {generic_array_decl: 1}\n");

    let registry = ExpectationRegistry::from_files([&first, &second]).unwrap();
    assert_eq!(registry.conflicts().len(), 1);

    let results = verify(&[simple_pojo()], &registry);
    assert!(results[0].passed());
}

#[test]
fn bad_table_is_fatal() {
    let corpus = SampleCorpus::empty();
    let good = corpus.write("good.txt", "A.java a:1\n");
    let bad = corpus.write("bad.json", "{\"fixture\": [");

    let err = ExpectationRegistry::from_files([&good, &bad]).unwrap_err();
    assert!(matches!(err, TableError::Json { .. }));

    let missing = corpus.path("missing.toml");
    let err = ExpectationRegistry::from_files([&missing]).unwrap_err();
    assert!(matches!(err, TableError::Io { .. }));
}

proptest! {
    #[test]
    fn prop_self_expectation_always_passes(text in "[a-zA-Z ();:\\[\\]<>=\\-\n]{0,200}") {
        let fixture = Fixture::from_text("P.java", text.clone());
        let mut registry = ExpectationRegistry::new();
        registry.register("P.java", Extractor::new().extract(&text));

        let results = verify(&[fixture], &registry);
        prop_assert!(results[0].passed());
        prop_assert!(results[0].diffs().is_empty());
    }

    #[test]
    fn prop_one_result_per_fixture_in_order(ids in proptest::collection::vec("[A-Z][a-z]{0,6}", 0..12)) {
        let fixtures: Vec<Fixture> = ids.iter().map(|id| Fixture::from_text(format!("{id}.java"), "")).collect();
        let mut registry = ExpectationRegistry::new();
        for id in ids.iter().step_by(2) {
            registry.register(format!("{id}.java"), Fingerprint::new());
        }

        let results = verify(&fixtures, &registry);
        prop_assert_eq!(results.len(), fixtures.len());
        for (fixture, result) in fixtures.iter().zip(&results) {
            prop_assert_eq!(fixture.identifier(), result.identifier());
            prop_assert_eq!(result.is_unchecked(), !registry.contains(fixture.identifier()));
        }
    }
}
