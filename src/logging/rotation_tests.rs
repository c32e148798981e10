use super::*;
use std::fs;
use tempfile::tempdir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_log_file_name_format() {
    assert_eq!(log_file_name(day(5)), "05-03-2024.log");
    let new_year = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    assert_eq!(log_file_name(new_year), "31-12-2025.log");
}

#[test]
fn test_open_creates_file_for_date() {
    let dir = tempdir().unwrap();
    let file = DailyFile::open(dir.path(), day(14)).unwrap();
    assert_eq!(file.name(), "14-03-2024.log");
    assert_eq!(file.path(), dir.path().join("14-03-2024.log"));
    assert!(dir.path().join("14-03-2024.log").exists());
    assert_eq!(file.opens(), 1);
}

#[test]
fn test_open_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let err = DailyFile::open(&missing, day(1)).unwrap_err();
    assert!(matches!(err, LogError::OpenLogFile { .. }));
    assert!(!missing.exists());
}

#[test]
fn test_open_appends_to_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(log_file_name(day(2)));
    fs::write(&path, "earlier line\n").unwrap();

    let mut file = DailyFile::open(dir.path(), day(2)).unwrap();
    file.write_line(day(2), "later line");
    file.close();

    assert_eq!(lines(&path), vec!["earlier line", "later line"]);
}

#[test]
fn test_same_day_writes_never_reopen() {
    let dir = tempdir().unwrap();
    let mut file = DailyFile::open(dir.path(), day(3)).unwrap();
    for i in 0..50 {
        file.write_line(day(3), &format!("line {i}"));
    }
    assert_eq!(file.opens(), 1);
    assert_eq!(file.name(), "03-03-2024.log");
    let path = file.path();
    file.close();
    assert_eq!(lines(&path).len(), 50);
}

#[test]
fn test_day_change_rotates_and_closes_previous() {
    let dir = tempdir().unwrap();
    let mut file = DailyFile::open(dir.path(), day(9)).unwrap();
    file.write_line(day(9), "monday");
    file.write_line(day(10), "tuesday");
    file.write_line(day(10), "tuesday again");
    assert_eq!(file.opens(), 2);
    assert_eq!(file.name(), "10-03-2024.log");
    file.close();

    assert_eq!(lines(&dir.path().join("09-03-2024.log")), vec!["monday"]);
    assert_eq!(
        lines(&dir.path().join("10-03-2024.log")),
        vec!["tuesday", "tuesday again"]
    );
}

#[test]
fn test_failed_rotation_keeps_current_handle() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    let mut file = DailyFile::open(&logs, day(20)).unwrap();
    file.write_line(day(20), "before");
    file.flush();

    // Opening tomorrow's file fails once the directory is gone.
    fs::remove_dir_all(&logs).unwrap();
    file.write_line(day(21), "after");

    assert_eq!(file.name(), "20-03-2024.log");
    assert_eq!(file.opens(), 1);
    file.close();
}

#[test]
fn test_rotation_retries_after_failure() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    let mut file = DailyFile::open(&logs, day(20)).unwrap();

    fs::remove_dir_all(&logs).unwrap();
    file.write_line(day(21), "dropped into the old handle");
    assert_eq!(file.opens(), 1);

    fs::create_dir(&logs).unwrap();
    file.write_line(day(21), "recovered");
    assert_eq!(file.opens(), 2);
    file.close();

    assert_eq!(lines(&logs.join("21-03-2024.log")), vec!["recovered"]);
}
