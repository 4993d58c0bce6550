#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Install a test logger; safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Write `content` to `name` inside `dir` and return its path.
pub fn write_fixture(dir: &TempDir, name: &str, content: &str) -> Utf8PathBuf {
    let path = Utf8Path::from_path(dir.path())
        .expect("temp dir path is not UTF-8")
        .join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// A MESA history in the standard text layout.
///
/// `rows` are `(model_number, star_age, log_dt)` triples.
pub fn history_text(rows: &[(i64, f64, f64)]) -> String {
    let mut text = String::from(
        "                 1                  2                  3\n\
         \x20  version_number    initial_mass          log_R0\n\
         \x20      \"r24.08.1\"   1.0000000000000000E+00   0.0000000000000000E+00\n\
         \n\
         \x20                1                  2                  3\n\
         \x20     model_number        star_age          log_dt\n",
    );
    for (model, age, log_dt) in rows {
        text.push_str(&format!("{model:>18} {age:>24.16E} {log_dt:>24.16E}\n"));
    }
    text
}
