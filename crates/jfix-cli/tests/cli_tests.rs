use jfix_cli::{cli, resolve_config, run, Config, ConfigError, OutputFormat, EXIT_ERROR};
use jfix_test_utils::SampleCorpus;
use pretty_assertions::assert_eq;
use std::path::Path;

fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn invoke(args: &[String]) -> anyhow::Result<(u8, String)> {
    let matches = cli().try_get_matches_from(std::iter::once("jfix".to_string()).chain(args.iter().cloned()))?;
    let config = resolve_config(&matches)?;
    let mut out = Vec::new();
    let code = run(&matches, &config, &mut out)?;
    Ok((code, String::from_utf8(out)?))
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn verify_passes_with_line_table() {
    let corpus = SampleCorpus::new();
    let table = corpus.write(
        "expected.txt",
        "# samples\nJava8Sample.java lambda_arrow:1 method_reference:2\nSimplePOJO.java generic_array_decl:1\n",
    );

    let (code, out) = invoke(&[
        "verify".into(),
        arg(corpus.root()),
        "--expect".into(),
        arg(&table),
    ])
    .unwrap();

    assert_eq!(out, "Java8Sample.java PASS\nSimplePOJO.java PASS\n");
    assert_eq!(code, 0);
}

#[test]
fn verify_without_table_fails_unchecked() {
    let corpus = SampleCorpus::new();
    let (code, out) = invoke(&["verify".into(), arg(&corpus.path("SimplePOJO.java"))]).unwrap();

    assert_eq!(out, "SimplePOJO.java FAIL\n  <none>: expected <registered>, actual <unchecked>\n");
    assert_eq!(code, 1);
}

#[test]
fn verify_json_reports_mismatch() {
    let corpus = SampleCorpus::new();
    let table = corpus.write("expected.txt", "SimplePOJO.java generic_array_decl:3\nGone.java lambda_arrow:1\n");

    let (code, out) = invoke(&[
        "verify".into(),
        arg(&corpus.path("SimplePOJO.java")),
        "-e".into(),
        arg(&table),
        "--json".into(),
    ])
    .unwrap();
    assert_eq!(code, 1);

    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(doc["summary"]["failed"], 1);
    assert_eq!(doc["fixtures"][0]["identifier"], "SimplePOJO.java");
    assert_eq!(doc["fixtures"][0]["status"], "FAIL");
    assert_eq!(doc["fixtures"][0]["diffs"][0]["feature"], "generic_array_decl");
    assert_eq!(doc["fixtures"][0]["diffs"][0]["expected"], 3);
    assert_eq!(doc["fixtures"][0]["diffs"][0]["actual"], 1);
    assert_eq!(doc["orphaned"], serde_json::json!(["Gone.java"]));
}

#[test]
fn verify_missing_fixture_is_fatal() {
    let corpus = SampleCorpus::empty();
    let err = invoke(&["verify".into(), arg(&corpus.path("Nope.java"))]).unwrap_err();
    assert!(format!("{err:#}").contains("Nope.java"), "{err:#}");
}

#[test]
fn verify_without_corpus_is_fatal() {
    assert!(invoke(&args(&["verify"])).is_err());
}

#[test]
fn fingerprint_output_is_a_valid_table() {
    let corpus = SampleCorpus::new();
    let (code, out) = invoke(&["fingerprint".into(), arg(corpus.root())]).unwrap();
    assert_eq!(code, 0);
    assert_eq!(
        out,
        "Java8Sample.java lambda_arrow:1 method_reference:2\nSimplePOJO.java generic_array_decl:1\n"
    );

    let table = corpus.write("generated.txt", &out);
    let (code, _) = invoke(&["verify".into(), arg(corpus.root()), "-e".into(), arg(&table)]).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn fingerprint_with_named_probes() {
    let corpus = SampleCorpus::new();
    let (_, out) = invoke(&[
        "fingerprint".into(),
        arg(&corpus.path("Java8Sample.java")),
        "--probes".into(),
        "stream_pipeline,import_decl".into(),
    ])
    .unwrap();
    assert_eq!(out, "Java8Sample.java import_decl:2 stream_pipeline:1\n");
}

#[test]
fn unknown_probe_is_fatal() {
    let corpus = SampleCorpus::new();
    let err = invoke(&[
        "fingerprint".into(),
        arg(corpus.root()),
        "--probes".into(),
        "lambda_arow".into(),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("lambda_arow"), "{err}");
}

#[test]
fn probes_lists_catalog_with_selection() {
    let (code, out) = invoke(&args(&["probes"])).unwrap();
    assert_eq!(code, 0);

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), jfix_fingerprint::ProbeSet::catalog().len());
    assert!(lines[0].starts_with("* lambda_arrow"));
    assert!(lines.iter().any(|l| l.starts_with("  stream_pipeline") && l.contains("extended")));
}

#[test]
fn config_file_supplies_defaults() {
    let corpus = SampleCorpus::new();
    corpus.write("expected.txt", "Java8Sample.java lambda_arrow:1 method_reference:2\n");
    let config = corpus.write(
        "jfix.toml",
        "corpus = [\"Java8Sample.java\"]\nexpectations = [\"expected.txt\"]\nformat = \"json\"\n",
    );

    let matches = cli()
        .try_get_matches_from(["jfix".to_string(), "verify".into(), "--config".into(), arg(&config)])
        .unwrap();
    let resolved = resolve_config(&matches).unwrap();
    assert_eq!(resolved.format, OutputFormat::Json);
    assert_eq!(resolved.corpus, vec![corpus.path("Java8Sample.java")]);

    let (code, out) = invoke(&["verify".into(), "--config".into(), arg(&config)]).unwrap();
    assert_eq!(code, 0);
    assert!(out.trim_start().starts_with('{'));
}

#[test]
fn flags_override_config() {
    let corpus = SampleCorpus::new();
    let config = corpus.write("jfix.toml", "corpus = [\"SimplePOJO.java\"]\nformat = \"json\"\n");

    let matches = cli()
        .try_get_matches_from([
            "jfix".to_string(),
            "verify".into(),
            arg(&corpus.path("Java8Sample.java")),
            "--config".into(),
            arg(&config),
            "--parallel".into(),
        ])
        .unwrap();
    let resolved = resolve_config(&matches).unwrap();
    assert_eq!(resolved.corpus, vec![corpus.path("Java8Sample.java")]);
    assert!(resolved.parallel);
}

#[test]
fn bad_config_is_reported() {
    let corpus = SampleCorpus::empty();
    let config = corpus.write("jfix.toml", "corpus = 3\n");

    let matches = cli()
        .try_get_matches_from(["jfix".to_string(), "probes".into(), "--config".into(), arg(&config)])
        .unwrap();
    assert!(matches!(resolve_config(&matches), Err(ConfigError::Toml { .. })));
}

#[test]
fn run_without_subcommand_prints_help() {
    let matches = clap::Command::new("jfix").try_get_matches_from(["jfix"]).unwrap();
    let mut out = Vec::new();
    let code = run(&matches, &Config::default(), &mut out).unwrap();

    assert_eq!(code, EXIT_ERROR);
    let help = String::from_utf8(out).unwrap();
    assert!(help.contains("verify"), "{help}");
    assert!(help.contains("fingerprint"), "{help}");
}

#[test]
fn subcommand_is_required() {
    assert!(cli().try_get_matches_from(["jfix"]).is_err());
    cli().debug_assert();
}
