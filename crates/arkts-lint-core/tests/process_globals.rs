//! Process-wide initialization and whitelist loading from disk.

use arkts_lint_core::whitelist::ApiProblem;
use arkts_lint_core::{globals, init_globals, InitError, WhitelistError, WhitelistTables};
use std::io::Write;

const WHITELIST: &str = r#"{
    "api_list": [
        {
            "file_path": "api\\@ohos.app.d.ts",
            "import_path": ["@ohos.app"],
            "is_global": false,
            "api_info": {
                "problem": "OptionalMethod",
                "api_name": "onStart",
                "api_type": "MethodSignature",
                "parent_api": [{ "api_name": "Ability", "api_type": "InterfaceDeclaration" }]
            }
        }
    ]
}"#;

#[test]
fn init_globals_succeeds_once() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(WHITELIST.as_bytes()).unwrap();
    let tables = WhitelistTables::from_file(file.path()).unwrap();

    assert!(globals().is_none());
    assert_eq!(init_globals(tables), Ok(()));
    assert_eq!(
        init_globals(WhitelistTables::default()),
        Err(InitError::AlreadyInitialized)
    );

    let installed = globals().unwrap();
    assert_eq!(installed.len(), 1);
    let entry = &installed.entries_with_problem(&ApiProblem::OptionalMethod)[0];
    assert_eq!(entry.file_path, "api/@ohos.app.d.ts");
    assert_eq!(
        installed
            .file_entries_matching(r"C:\sdk\openharmony\ets\api\@ohos.app.d.ts")
            .len(),
        1
    );
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let err = WhitelistTables::from_file(&missing).unwrap_err();
    assert!(matches!(err, WhitelistError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = WhitelistTables::from_json("{ \"api_list\": [ }").unwrap_err();
    assert!(matches!(err, WhitelistError::Json(_)));
}
