use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_girdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn read(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).unwrap()
}

// -- stdin mode --

#[test]
fn stdin_mode_prints_pages() {
    let input = std::fs::read_to_string(fixture_path("regress.json")).unwrap();

    cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("<page id=\"Regress.hello\""))
        .stdout(predicate::str::contains("<page id=\"Regress.TestObj\""));
}

#[test]
fn stdin_mode_rejects_invalid_model() {
    cmd()
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load model from stdin"));
}

// -- file mode --

#[test]
fn file_mode_writes_one_page_per_entity() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    for id in [
        "Regress.hello",
        "Regress.noop",
        "Regress.printf_like",
        "Regress.TestInterface",
        "Regress.TestObj",
        "Regress.TestObj.new",
        "Regress.TestObj.skip_return_val_no_out",
        "Regress.TestObj-bare",
        "Regress.TestObj-sig-with-obj",
        "Regress.TestObj-matrix",
        "Regress.TestObj-parent_instance",
        "Regress.TestObjClass",
        "Regress.TestEnum",
    ] {
        assert!(
            dir.path().join(format!("{}.page", id)).is_file(),
            "missing page {}",
            id
        );
    }
}

#[test]
fn method_page_scenario() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    let page = read(&dir, "Regress.TestObj.skip_return_val_no_out.page");
    assert!(page.contains("<link type=\"guide\" xref=\"Regress.TestObj\" group=\"method\"/>"));
    assert!(page.contains("<api:name>regress_test_obj_skip_return_val_no_out</api:name>"));
    assert_eq!(page.matches("<api:arg>").count(), 2);
    assert!(page.contains("<api:type>RegressTestObj*</api:type>\n        <api:name>obj</api:name>"));
    assert_eq!(page.matches("<item>").count(), 3);
    assert!(page.contains("<title><em>Returns:</em></title>"));
    assert!(!page.contains("error"));
    assert!(page.contains(
        "<code mime=\"text/x-csrc\">gboolean regress_test_obj_skip_return_val_no_out (RegressTestObj* obj,\n    gint a);</code>"
    ));
}

#[test]
fn void_function_without_parameters_has_no_details() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    let page = read(&dir, "Regress.noop.page");
    assert!(!page.contains("<terms>"));
    assert!(page.contains("<link type=\"guide\" xref=\"index\" group=\"function\"/>"));
    assert!(page.contains("void regress_noop (void);"));
}

#[test]
fn varargs_marker_in_info_only() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    let page = read(&dir, "Regress.printf_like.page");
    assert!(page.contains("<api:varargs/>"));
    assert_eq!(page.matches("<api:arg>").count(), 1);
    assert_eq!(page.matches("<item>").count(), 1);
    assert!(page.contains("const char* format,\n    ...);"));
}

#[test]
fn class_page_lists_eight_sections() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    let page = read(&dir, "Regress.TestObj.page");
    assert!(page.contains("type=\"guide\""));
    assert_eq!(page.matches("<links type=\"topic\"").count(), 8);
    let titles = [
        "Constructors",
        "Methods",
        "Static Functions",
        "Properties",
        "Signals",
        "Virtual functions",
        "Fields",
        "Other",
    ];
    let positions: Vec<usize> = titles
        .iter()
        .map(|t| page.find(&format!("<title>{}</title>", t)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(page.contains("<title>Hierarchy</title>"));
    assert!(page.contains("<link xref=\"Regress.TestInterface\">Regress.TestInterface</link>"));
    assert!(page.contains("<code>GObject.Object</code>"));
    assert!(page.contains("<link xref=\"Regress.TestObj-sig-with-obj\"/>"));
}

#[test]
fn interface_page_describes_implementations() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    let page = read(&dir, "Regress.TestInterface.page");
    assert!(page.contains("<p>TestInterface requires GObject.Object</p>"));
    assert!(page.contains("<p>TestInterface is implemented by TestObj</p>"));
}

#[test]
fn property_page_shows_flags() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    let page = read(&dir, "Regress.TestObj-int.page");
    assert!(page.contains("<p>Flags: Read / Write / Construct</p>"));
    assert!(page.contains("<title>Regress.TestObj:int</title>"));
    assert!(page.contains("<link type=\"guide\" xref=\"Regress.TestObj\" group=\"property\"/>"));
}

#[test]
fn construct_only_property_keeps_access_flags() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    let page = read(&dir, "Regress.TestObj-string-name.page");
    assert!(page.contains("<p>Flags: Read / Write / Construct Only</p>"));
    assert!(page.contains("&quot;string-name&quot; gchar* : Read / Write / Construct Only"));
}

#[test]
fn enum_value_reference_links_to_enum_page() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    let page = read(&dir, "Regress.noop.page");
    assert!(page.contains("whatever <link xref=\"Regress.TestEnum\"/>.value1 says."));
}

#[test]
fn python_binding_skips_constructors_and_class_structs() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "-l", "python"])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    assert!(!dir.path().join("Regress.TestObj.new.page").exists());
    assert!(!dir.path().join("Regress.TestObjClass.page").exists());

    let page = read(&dir, "Regress.TestObj.skip_return_val_no_out.page");
    assert!(page.contains("<code mime=\"text/python\">@accepts(Regress.TestObj, int)\n@returns(bool)\ndef skip_return_val_no_out(self, a):"));
    assert!(page.contains("<title>Regress.TestObj.skip_return_val_no_out</title>"));
    assert!(page.contains("<code>True</code>"));
}

#[test]
fn gjs_binding() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "-l", "gjs"])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    assert!(!dir.path().join("Regress.TestObj-parent_instance.page").exists());
    assert!(!dir.path().join("Regress.TestObjClass.page").exists());

    let page = read(&dir, "Regress.TestObj.skip_return_val_no_out.page");
    assert!(page.contains("<title>Regress.TestObj.prototype.skip_return_val_no_out</title>"));
    assert!(page.contains(
        "<code mime=\"text/x-gjs\">function skip_return_val_no_out(a: Number(gint)): Boolean {\n    // Gjs wrapper for regress_test_obj_skip_return_val_no_out()\n}</code>"
    ));
    assert_eq!(page.matches("<api:arg>").count(), 1);
    assert!(page.contains("<code>true</code>"));

    let page = read(&dir, "Regress.TestObj-string-name.page");
    assert!(page.contains("<title>Regress.TestObj.string_name</title>"));
}

#[test]
fn signal_synopsis_is_a_handler() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    let page = read(&dir, "Regress.TestObj-sig-with-obj.page");
    assert!(page.contains(
        "void user_function (RegressTestObj* self,\n    GObject* obj,\n    gpointer user_data);"
    ));
}

#[test]
fn markdown_include_path() {
    let includes = TempDir::new().unwrap();
    std::fs::write(includes.path().join("intro.md"), "Shared notes on #TestObj.").unwrap();
    let model = r#"{"name": "Regress", "entities": [
        {"kind": "class", "name": "TestObj", "ctype": "RegressTestObj"},
        {"kind": "function", "name": "hello", "symbol": "regress_hello", "doc": "{{ intro.md }}"}
    ]}"#;

    cmd()
        .args(["-M", includes.path().to_str().unwrap()])
        .write_stdin(model)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<p>Shared notes on <link xref=\"Regress.TestObj\"/>.</p>",
        ));

    cmd()
        .write_stdin(model)
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>{{ intro.md }}</p>"));
}

#[test]
fn resolve_implicit_links_flag() {
    let model = r#"{"name": "Regress", "identifier_prefixes": ["Regress"], "entities": [
        {"kind": "class", "name": "TestObj", "ctype": "RegressTestObj"},
        {"kind": "function", "name": "hello", "symbol": "regress_hello", "doc": "Greets a RegressTestObj (once)."}
    ]}"#;

    cmd()
        .arg("-R")
        .write_stdin(model)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<p>Greets a <link xref=\"Regress.TestObj\">RegressTestObj</link> (once).</p>",
        ));

    cmd()
        .write_stdin(model)
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>Greets a RegressTestObj (once).</p>"));
}

#[test]
fn json_format() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "-f", "json"])
        .arg(fixture_path("regress.json"))
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&read(&dir, "Regress.TestObj.json")).unwrap();
    assert_eq!(value["kind"], "class");
    assert_eq!(value["parent"]["target"], "index");
    let sections = value["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 8);
    assert_eq!(sections[1]["group"], "method");
    assert_eq!(
        sections[1]["members"],
        serde_json::json!(["Regress.TestObj.skip_return_val_no_out"])
    );
}

#[test]
fn failed_pages_are_counted() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "--no-color"])
        .arg(fixture_path("broken.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 page(s) failed to render (1 written)"))
        .stderr(predicate::str::contains("unresolved type `Gtk.Widget`"))
        .stderr(predicate::str::contains("varargs parameter `...` is not last"))
        .stderr(predicate::str::contains("no page template for constant `Broken.ANSWER`"));

    assert!(dir.path().join("Broken.fine.page").is_file());
    assert!(!dir.path().join("Broken.mystery.page").exists());
}

#[test]
fn directory_input() {
    let input = TempDir::new().unwrap();
    std::fs::copy(fixture_path("regress.json"), input.path().join("regress.json")).unwrap();
    std::fs::write(input.path().join("README.md"), "ignored").unwrap();
    let out = TempDir::new().unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(input.path().to_str().unwrap())
        .assert()
        .success();

    assert!(out.path().join("Regress.hello.page").is_file());
}

#[test]
fn rejects_unknown_language() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "-l", "cobol"])
        .arg(fixture_path("regress.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported language: cobol"));
}

#[test]
fn rejects_unknown_format() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "-f", "docbook"])
        .arg(fixture_path("regress.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: docbook"));
}
