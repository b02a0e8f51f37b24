//! End-to-end smoke tests: run the binary against a JSON review file.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new(name: &str, reviews: usize) -> Self {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create fixture dir");

        let items: Vec<String> = (0..reviews)
            .map(|i| {
                format!(
                    r#"{{"first_name":"Smoke","last_name":"{i}","rating":5,"text":"{}","created":"today","photo_urls":["p{i}.jpg","http://insecure.example.com/x.jpg"]}}"#,
                    "word ".repeat(i * 20)
                )
            })
            .collect();
        fs::write(
            dir.join("reviews.json"),
            format!(r#"{{"items":[{}],"count":{reviews}}}"#, items.join(",")),
        )
        .expect("write reviews");
        fs::write(dir.join("p0.jpg"), [1u8; 8]).expect("write photo");

        let log = dir.join("revlist.log");
        fs::write(
            dir.join("config.toml"),
            format!("page_size = 3\nlog_file_path = {:?}\n", log.to_string_lossy()),
        )
        .expect("write config");

        Self { dir }
    }

    fn run(&self, extra: &[&str]) -> Output {
        self.run_file(&self.dir.join("reviews.json"), extra)
    }

    fn run_file(&self, file: &std::path::Path, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_revlist"))
            .arg(file)
            .arg("--config")
            .arg(self.dir.join("config.toml"))
            .args(extra)
            .env_remove("REVLIST_PAGE_SIZE")
            .env_remove("REVLIST_PREFETCH_SCREENS")
            .output()
            .expect("Failed to execute binary")
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn prints_every_row_and_content_height() {
    let fixture = Fixture::new("revlist_e2e_rows", 7);
    let output = fixture.run(&["--width", "375", "--viewport", "200"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 9, "7 reviews + summary + total: {stdout}");
    assert!(lines[0].contains("Smoke 0"));
    assert!(lines[7].ends_with("7 reviews"));
    assert!(lines[8].starts_with("content height: "));
    assert!(fixture.dir.join("revlist.log").exists(), "logs go to the configured file");
}

#[test]
fn expand_marks_row_and_grows_it() {
    let fixture = Fixture::new("revlist_e2e_expand", 4);
    let collapsed = fixture.run(&[]);
    let expanded = fixture.run(&["--expand", "3"]);

    let height_of = |out: &Output| -> f64 {
        let stdout = String::from_utf8_lossy(&out.stdout).to_string();
        let line = stdout.lines().nth(3).expect("row 3").to_string();
        line.split_whitespace()
            .nth(1)
            .and_then(|h| h.parse().ok())
            .expect("height column")
    };

    let stdout = String::from_utf8_lossy(&expanded.stdout);
    assert!(stdout.lines().nth(3).is_some_and(|l| l.ends_with("[expanded]")));
    assert!(height_of(&expanded) > height_of(&collapsed));
}

#[test]
fn photos_flag_reports_outcomes() {
    let fixture = Fixture::new("revlist_e2e_photos", 2);
    let output = fixture.run(&["--photos"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let last = stdout.lines().last().expect("summary line");
    assert!(last.starts_with("photos: "), "got: {last}");
    assert!(last.contains("2 rejected"), "insecure URLs refused: {last}");
}

#[test]
fn missing_file_fails() {
    let fixture = Fixture::new("revlist_e2e_missing", 1);
    let output = fixture.run_file(&fixture.dir.join("absent.json"), &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("FileNotFound"));
}
