//! Subcommands run against catalogs in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use scriptloc_cli::cli::{CheckArgs, CoverageArgs, LookupArgs, UpdateArgs};
use scriptloc_cli::commands::{check, coverage, lookup, update};
use scriptloc_cli::{Config, Outcome};

const CATALAN: &str = "\
msgid \"\"
msgstr \"\"
\"Language: ca\\n\"

# Scenario name
msgid \"Clash in Shangri-La\"
msgstr \"Enfrontament a Shangri-La\"

msgid \"Back\"
msgstr \"Enrere\"

#, lua-format
msgid \"Hull: %d%% Shields: %d%%\"
msgstr \"Casc: %d%% Escuts: %d%%\"

#, lua-format
msgid \"The %s fleet has taken control of Shangri-La.\"
msgstr \"\"

msgctxt \"station\"
msgid \"Back\"
msgstr \"Tornar\"
";

const BROKEN: &str = "\
#, lua-format
msgid \"Hull: %d%% Shields: %d%%\"
msgstr \"Casc: %s\"

msgid \"Back\"
msgstr \"Enrere\"

msgid \"Back\"
msgstr \"Tornar\"
";

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn capture(f: impl FnOnce(&mut Vec<u8>) -> Outcome) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = f(&mut out);
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn lookup_translates_and_formats() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "scenario_55_shangrila.ca.po", CATALAN);

    let args = LookupArgs {
        file: file.clone(),
        text: "Hull: %d%% Shields: %d%%".into(),
        context: None,
        args: vec!["80".into(), "45".into()],
    };
    let (_, text) = capture(|out| lookup(&args, out).unwrap());
    assert_eq!(text, "Casc: 80% Escuts: 45%\n");

    let args = LookupArgs {
        file: file.clone(),
        text: "The %s fleet has taken control of Shangri-La.".into(),
        context: None,
        args: vec!["Kraylor".into()],
    };
    let (_, text) = capture(|out| lookup(&args, out).unwrap());
    assert_eq!(text, "The Kraylor fleet has taken control of Shangri-La.\n");

    let args = LookupArgs {
        file,
        text: "Back".into(),
        context: Some("station".into()),
        args: Vec::new(),
    };
    let (_, text) = capture(|out| lookup(&args, out).unwrap());
    assert_eq!(text, "Tornar\n");
}

#[test]
fn lookup_of_unknown_text_echoes_it() {
    let dir = tempfile::tempdir().unwrap();
    let args = LookupArgs {
        file: write(dir.path(), "x.ca.po", CATALAN),
        text: "Report status".into(),
        context: None,
        args: Vec::new(),
    };
    let (_, text) = capture(|out| lookup(&args, out).unwrap());
    assert_eq!(text, "Report status\n");
}

#[test]
fn check_reports_findings() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "good.ca.po", CATALAN);
    let bad = write(dir.path(), "bad.ca.po", BROKEN);
    let unreadable = write(dir.path(), "cut.ca.po", "msgid \"open\n");

    let args = CheckArgs {
        files: vec![good, bad, unreadable],
    };
    let (outcome, text) = capture(|out| check(&args, out).unwrap());
    assert_eq!(outcome, Outcome::Findings(3));
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].ends_with("good.ca.po: ok"));
    assert!(lines[1].contains("duplicate \"Back\""));
    assert!(lines[2].contains("placeholders differ"));
    assert!(lines[3].contains("cut.ca.po: line 1"));
}

#[test]
fn coverage_text_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(
        dir.path(),
        "scenario_55_shangrila.en.po",
        "msgid \"Back\"\nmsgstr \"\"\n\nmsgid \"Report status\"\nmsgstr \"\"\n",
    );
    let catalan = write(dir.path(), "scenario_55_shangrila.ca.po", CATALAN);

    let args = CoverageArgs {
        files: vec![template.clone(), catalan.clone()],
        json: false,
    };
    let (_, text) = capture(|out| coverage(&args, out).unwrap());
    assert_eq!(text, "ca\t4/6\t66.7%\nen\t0/6\t0.0%\n");

    let args = CoverageArgs {
        files: vec![template, catalan],
        json: true,
    };
    let (_, text) = capture(|out| coverage(&args, out).unwrap());
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["total_keys"], 6);
    assert_eq!(value["locales"][0]["locale"], "ca");
    assert_eq!(value["locales"][0]["translated"], 4);
    let missing: Vec<&str> = value["locales"][0]["missing"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        missing,
        vec!["Report status", "The %s fleet has taken control of Shangri-La."]
    );
}

#[test]
fn update_uses_flags_over_config() {
    let dir = tempfile::tempdir().unwrap();
    let scripts = dir.path().join("lua");
    fs::create_dir_all(&scripts).unwrap();
    fs::write(
        scripts.join("scenario_55_shangrila.lua"),
        "-- Name: Clash in Shangri-La\nsetCommsMessage(_(\"Back\"))\n",
    )
    .unwrap();

    let config = Config {
        extra_bases: Vec::new(),
        ..Config::default()
    };
    let args = UpdateArgs {
        scripts: Some(scripts.clone()),
        locale_dir: Some(dir.path().join("po")),
        also: Vec::new(),
    };
    let (outcome, text) = capture(|out| update(&args, &config, out).unwrap());
    assert_eq!(outcome, Outcome::Success);
    let written = dir.path().join("po/scenario_55_shangrila.en.po");
    assert_eq!(text, format!("wrote {}\n", written.display()));
    let body = fs::read_to_string(written).unwrap();
    assert!(body.starts_with("# Scenario name\nmsgid \"Clash in Shangri-La\"\nmsgstr \"\"\n"));
}
