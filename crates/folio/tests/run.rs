//! Documentation runs over schema trees on disk.

use std::fs;
use std::path::Path;

use folio::atelier::{FsSink, GenerateError, MemorySink};
use folio::run::{run, RunError, RunOptions};

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn builds_a_site_with_assets() {
    let schemas = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(
        schemas.path(),
        "common/vec.fbs",
        b"namespace Game.Common;\nstruct Vec3 { x:float; y:float; z:float; }\n",
    );
    write(
        schemas.path(),
        "game/monster.fbs",
        b"include \"vec.fbs\";\nnamespace Game;\ntable Monster { pos:Common.Vec3; }\nroot_type Monster;\n",
    );
    write(schemas.path(), "notes.txt", b"not a schema");

    let options = RunOptions {
        inputs: vec![schemas.path().to_path_buf()],
        root: schemas.path().to_path_buf(),
        write_assets: true,
    };
    let outcome = run(&options, &FsSink::new(out.path())).unwrap();

    assert_eq!(outcome.files, 2);
    assert!(outcome.report.diagnostics.is_empty(), "{:?}", outcome.report.diagnostics);
    assert_eq!(outcome.report.documents, 3);

    for name in [
        "index.html",
        "style.css",
        "tree.js",
        "stickyHeader.js",
        "common/vec.html",
        "game/monster.html",
    ] {
        assert!(out.path().join(name).is_file(), "{} missing", name);
    }

    let monster = fs::read_to_string(out.path().join("game/monster.html")).unwrap();
    assert!(monster.contains("<title>game/monster.fbs</title>"));
    assert!(monster.contains("href=\"../common/vec.html#Vec3\""));
    assert!(monster.contains("href=\"../common/vec.html\""));

    let index = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains("href=\"game/monster.html#Monster\""));
    assert!(index.contains("<span class=\"caret\">Game.Common</span>"));
}

#[test]
fn decodes_bom_encoded_sources() {
    let schemas = tempfile::tempdir().unwrap();
    let mut utf16: Vec<u8> = vec![0xFF, 0xFE];
    utf16.extend(
        "namespace Wide;\ntable Text { s:string; }\n"
            .encode_utf16()
            .flat_map(u16::to_le_bytes),
    );
    write(schemas.path(), "wide.fbs", &utf16);
    write(
        schemas.path(),
        "narrow.fbs",
        b"\xEF\xBB\xBFnamespace Narrow;\ntable User { t:Wide.Text; }\n",
    );

    let sink = MemorySink::new();
    let options = RunOptions {
        inputs: vec![schemas.path().to_path_buf()],
        root: schemas.path().to_path_buf(),
        write_assets: false,
    };
    let outcome = run(&options, &sink).unwrap();

    assert!(outcome.report.diagnostics.is_empty(), "{:?}", outcome.report.diagnostics);
    assert_eq!(outcome.report.type_count, 2);
    assert!(sink
        .get("narrow.html")
        .unwrap()
        .contains("href=\"wide.html#Text\""));
    assert!(sink.get("style.css").is_none());
}

#[test]
fn empty_input_set_fails_without_output() {
    let schemas = tempfile::tempdir().unwrap();
    write(schemas.path(), "readme.md", b"# nothing here");

    let sink = MemorySink::new();
    let options = RunOptions {
        inputs: vec![schemas.path().to_path_buf()],
        root: schemas.path().to_path_buf(),
        write_assets: true,
    };

    let err = run(&options, &sink).unwrap_err();
    assert!(matches!(err, RunError::Generate(GenerateError::EmptyInputSet)));
    insta::assert_snapshot!(err.to_string(), @"no schema files found among the input paths");
    assert!(sink.is_empty());
}

#[test]
fn empty_input_set_leaves_no_output_directory() {
    let schemas = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let site = out.path().join("site");

    let options = RunOptions {
        inputs: vec![schemas.path().to_path_buf()],
        root: schemas.path().to_path_buf(),
        write_assets: true,
    };

    assert!(run(&options, &FsSink::new(&site)).is_err());
    assert!(!site.exists());

    write(schemas.path(), "a.fbs", b"table A {}\n");
    let outcome = run(&options, &FsSink::new(&site)).unwrap();
    assert_eq!(outcome.report.documents, 2);
    assert!(site.join("a.html").is_file());
}

#[test]
fn unwritable_output_root_is_a_run_failure() {
    let schemas = tempfile::tempdir().unwrap();
    write(schemas.path(), "a.fbs", b"table A {}\n");
    let out = tempfile::tempdir().unwrap();
    let blocked = out.path().join("blocked");
    std::fs::write(&blocked, "").unwrap();

    let options = RunOptions {
        inputs: vec![schemas.path().to_path_buf()],
        root: schemas.path().to_path_buf(),
        write_assets: true,
    };

    let err = run(&options, &FsSink::new(&blocked)).unwrap_err();
    assert!(matches!(err, RunError::OutputRoot(_)));
    assert!(err
        .to_string()
        .starts_with("failed to create the output directory: "));
}
