use std::{env, sync::Arc, thread};

use jsonlog::{Field, Logger, SharedBuffer, Severity, Sink};
use serde_json::Value;
use serial_test::serial;

// Installs a capturing logger as the global one; the previous logger is
// restored when the guard drops.
struct Captured {
    buf: SharedBuffer,
    previous: Option<Arc<Logger>>,
}

impl Captured {
    fn install(level: Severity) -> Self {
        let buf = SharedBuffer::new();
        let previous = jsonlog::replace_global(Logger::new(level, Sink::new(buf.clone())));
        Self {
            buf,
            previous: Some(previous),
        }
    }

    fn lines(&self) -> Vec<Value> {
        self.buf
            .lines()
            .iter()
            .map(|l| serde_json::from_str(l).expect("log line is JSON"))
            .collect()
    }
}

impl Drop for Captured {
    fn drop(&mut self) {
        if let Some(prev) = self.previous.take() {
            jsonlog::replace_global(Arc::unwrap_or_clone(prev));
        }
    }
}

fn clean_env() {
    env::remove_var("LOG_LEVEL");
}

#[test]
#[serial]
fn warn_threshold_filters_debug_and_info() {
    let cap = Captured::install(Severity::Warn);

    jsonlog::debug("debug message - should not appear", &[]);
    jsonlog::info("info message - should not appear", &[]);
    jsonlog::warn("warn message - should appear", &[]);
    jsonlog::error("error message - should appear", &[]);

    let lines = cap.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["msg"], "warn message - should appear");
    assert_eq!(lines[0]["level"], "warn");
    assert_eq!(lines[1]["msg"], "error message - should appear");
    assert_eq!(lines[1]["level"], "error");
}

#[test]
#[serial]
fn debug_threshold_emits_every_level_in_order() {
    let cap = Captured::install(Severity::Debug);

    let first_line = line!() + 1;
    jsonlog::debug("debug message", &[Field::string("key", "value")]);
    jsonlog::info("info message", &[Field::int("count", 42)]);
    jsonlog::warn("warn message", &[]);
    jsonlog::error("error message", &[Field::bool("retry", false)]);

    let lines = cap.lines();
    assert_eq!(lines.len(), 4);
    let expected = [
        ("debug", "debug message"),
        ("info", "info message"),
        ("warn", "warn message"),
        ("error", "error message"),
    ];
    for (i, (line, (level, msg))) in lines.iter().zip(expected).enumerate() {
        for key in ["timestamp", "level", "caller", "msg"] {
            assert!(line.get(key).is_some(), "missing {key} in {line}");
        }
        assert_eq!(line["level"], level);
        assert_eq!(line["msg"], msg);
        assert_eq!(
            line["caller"],
            format!("tests/global_facade.rs:{}", first_line + i as u32)
        );
    }
    assert_eq!(lines[0]["key"], "value");
    assert_eq!(lines[1]["count"], 42);
    assert_eq!(lines[3]["retry"], false);
}

#[test]
#[serial]
fn set_level_accepts_aliases_and_rejects_garbage() {
    let _cap = Captured::install(Severity::Info);

    for (input, canonical) in [
        ("debug", "debug"),
        ("INFO", "info"),
        ("warn", "warn"),
        ("Warning", "warn"),
        ("error", "error"),
        ("dpanic", "dpanic"),
        ("panic", "panic"),
        ("fatal", "fatal"),
    ] {
        jsonlog::set_level(input).unwrap();
        assert_eq!(jsonlog::get_level(), canonical);
    }

    jsonlog::set_level("error").unwrap();
    let err = jsonlog::set_level("not-a-level").unwrap_err();
    assert_eq!(err.to_string(), "invalid log level string: not-a-level");
    assert_eq!(jsonlog::get_level(), "error");
    assert!(jsonlog::enabled(Severity::Fatal));
    assert!(!jsonlog::enabled(Severity::Warn));
}

#[test]
#[serial]
fn init_with_unset_env_keeps_default() {
    clean_env();
    let cap = Captured::install(Severity::Info);

    jsonlog::init();

    assert_eq!(jsonlog::get_level(), "info");
    let lines = cap.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["msg"], "Log level is not set, using default.");
}

#[test]
#[serial]
fn init_with_debug_env_lowers_threshold() {
    clean_env();
    let _cap = Captured::install(Severity::Info);
    env::set_var("LOG_LEVEL", "debug");

    jsonlog::init();
    clean_env();

    assert_eq!(jsonlog::get_level(), "debug");
}

#[test]
#[serial]
fn init_with_bogus_env_warns_and_keeps_level() {
    clean_env();
    let cap = Captured::install(Severity::Info);
    env::set_var("LOG_LEVEL", "bogus");

    jsonlog::init();
    clean_env();

    assert_eq!(jsonlog::get_level(), "info");
    let lines = cap.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "warn");
    assert_eq!(lines[0]["value"], "bogus");
}

#[test]
#[serial]
fn init_twice_rereads_environment() {
    clean_env();
    let _cap = Captured::install(Severity::Info);

    env::set_var("LOG_LEVEL", "error");
    jsonlog::init();
    assert_eq!(jsonlog::get_level(), "error");

    env::set_var("LOG_LEVEL", "warning");
    jsonlog::init();
    clean_env();
    assert_eq!(jsonlog::get_level(), "warn");
}

#[test]
#[serial]
fn concurrent_setters_and_readers_never_see_torn_levels() {
    let _cap = Captured::install(Severity::Info);
    let names: Vec<&'static str> = Severity::ALL.iter().map(|s| s.as_str()).collect();

    let setters: Vec<_> = Severity::ALL
        .iter()
        .map(|s| {
            let name = s.as_str();
            thread::spawn(move || {
                for _ in 0..500 {
                    jsonlog::set_level(name).unwrap();
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..8)
        .map(|_| {
            let names = names.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let level = jsonlog::get_level();
                    assert!(names.contains(&level), "torn level {level}");
                }
            })
        })
        .collect();

    for h in setters.into_iter().chain(readers) {
        h.join().unwrap();
    }
}

#[test]
#[serial]
fn concurrent_emitters_write_whole_lines() {
    let cap = Captured::install(Severity::Debug);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            thread::spawn(move || {
                for i in 0..50 {
                    jsonlog::info("tick", &[Field::int("thread", t), Field::int("i", i)]);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let lines = cap.lines();
    assert_eq!(lines.len(), 400);
    assert!(lines.iter().all(|l| l["msg"] == "tick"));
}
