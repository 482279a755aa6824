//! Tests for .env parsing and format-preserving conversion.

use tempfile::TempDir;

use ghostenv::core::envfile::EnvFile;
use ghostenv::core::keystore::SigningKey;
use ghostenv::core::token;
use ghostenv::error::Error;

#[test]
fn test_parse_skips_comments_and_blanks() {
    let file = EnvFile::parse("# comment\n\nAPI_KEY=secret123\n");
    let vars = file.vars();

    assert_eq!(vars.len(), 1);
    assert_eq!(vars["API_KEY"], "secret123");
}

#[test]
fn test_parse_strips_matching_quotes() {
    let file = EnvFile::parse("A=\"double\"\nB='single'\nC=bare\nD=\"unmatched\n");
    let vars = file.vars();

    assert_eq!(vars["A"], "double");
    assert_eq!(vars["B"], "single");
    assert_eq!(vars["C"], "bare");
    // Unmatched quote is part of the value.
    assert_eq!(vars["D"], "\"unmatched");
}

#[test]
fn test_load_missing_file_is_not_found_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.env");

    match EnvFile::load(&missing) {
        Err(Error::EnvFileNotFound(path)) => assert_eq!(path, missing),
        other => panic!("expected EnvFileNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_convert_preserves_comments_verbatim() {
    let key = SigningKey::generate();
    let mut file = EnvFile::parse("# comment\nKEY=value\n");

    file.map_values(|_, v| {
        if token::is_wrapped(v) {
            None
        } else {
            Some(token::wrap(v, &key))
        }
    });

    let rendered = file.render();
    let mut lines = rendered.lines();
    assert_eq!(lines.next(), Some("# comment"));

    let pair = lines.next().unwrap();
    let (name, value) = pair.split_once('=').unwrap();
    assert_eq!(name, "KEY");
    assert!(token::is_wrapped(value));
    assert_eq!(token::unwrap(value, &key).as_deref(), Some("value"));
}

#[test]
fn test_convert_preserves_quote_style() {
    let key = SigningKey::generate();
    let mut file = EnvFile::parse("KEY1=value1\nKEY2=\"value2\"\nKEY3='value3'\n");

    file.map_values(|_, v| Some(token::wrap(v, &key)));
    let rendered = file.render();

    let lines: Vec<&str> = rendered.lines().collect();
    assert!(lines[0].starts_with("KEY1=gho_env."));
    assert!(lines[1].starts_with("KEY2=\"gho_env."));
    assert!(lines[1].ends_with('"'));
    assert!(lines[2].starts_with("KEY3='gho_env."));
    assert!(lines[2].ends_with('\''));
}

#[test]
fn test_convert_roundtrip_through_disk() {
    let key = SigningKey::generate();
    let temp = TempDir::new().unwrap();
    let input = temp.path().join(".env");
    let output = temp.path().join("ghost.env");

    std::fs::write(
        &input,
        "# This is a comment\nAPI_KEY=secret123\nDATABASE_URL=postgres://localhost\n\n# Another comment\nQUOTED=\"quoted-value\"\n",
    )
    .unwrap();

    let mut file = EnvFile::load(&input).unwrap();
    let wrapped = file.map_values(|_, v| {
        if token::is_wrapped(v) {
            None
        } else {
            Some(token::wrap(v, &key))
        }
    });
    assert_eq!(wrapped, 3);
    file.write(&output).unwrap();

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.contains("# This is a comment"));
    assert!(contents.contains("# Another comment"));

    let ghost_vars = EnvFile::load(&output).unwrap().vars();
    for value in ghost_vars.values() {
        assert!(token::is_wrapped(value));
    }
    assert_eq!(
        token::unwrap(&ghost_vars["API_KEY"], &key).as_deref(),
        Some("secret123")
    );
    assert_eq!(
        token::unwrap(&ghost_vars["QUOTED"], &key).as_deref(),
        Some("quoted-value")
    );
}
