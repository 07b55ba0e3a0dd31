// tests/normalize.rs
use longwalk::normalize::normalize;
use std::env;

fn current_dir_display() -> String {
    env::current_dir().unwrap().to_string_lossy().into_owned()
}

#[test]
fn empty_input_normalizes_to_the_working_directory() {
    let normalized = normalize("").unwrap();
    assert_eq!(normalized.display_form(), current_dir_display());
}

#[test]
fn dot_input_normalizes_to_the_working_directory() {
    let normalized = normalize(".").unwrap();
    assert_eq!(normalized.display_form(), current_dir_display());
}

#[test]
fn relative_input_resolves_under_the_working_directory() {
    let normalized = normalize("some_entry").unwrap();
    let display = normalized.display_form();
    assert!(display.starts_with(&current_dir_display()), "got {}", display);
    assert!(display.ends_with("some_entry"));
}

#[test]
fn normalize_is_idempotent_against_the_live_working_directory() {
    let once = normalize(".").unwrap();
    let twice = normalize(once.as_str()).unwrap();
    assert_eq!(once, twice);
}
