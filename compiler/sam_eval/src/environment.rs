//! The four variable tables.
//!
//! Every table is global to one execution context. Branches get their own
//! copy through `Clone`; only the stream handles inside still point at the
//! same files.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;

use crate::interpolate::render_number;
use crate::streams::StreamHandle;

#[derive(Clone, Debug, Default)]
pub struct Environment {
    strings: FxHashMap<String, String>,
    numbers: FxHashMap<String, f64>,
    booleans: FxHashMap<String, bool>,
    streams: FxHashMap<String, StreamHandle>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    pub fn set_str(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(name.into(), value.into());
    }

    #[inline]
    pub fn get_num(&self, name: &str) -> Option<f64> {
        self.numbers.get(name).copied()
    }

    pub fn set_num(&mut self, name: impl Into<String>, value: f64) {
        self.numbers.insert(name.into(), value);
    }

    #[inline]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.booleans.get(name).copied()
    }

    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.booleans.insert(name.into(), value);
    }

    pub fn stream(&self, name: &str) -> Option<&StreamHandle> {
        self.streams.get(name)
    }

    /// Bind `name` to a handle, replacing any earlier binding.
    pub fn open_stream(&mut self, name: impl Into<String>, handle: StreamHandle) {
        self.streams.insert(name.into(), handle);
    }

    /// Unbind `name` and hand back its handle.
    pub fn remove_stream(&mut self, name: &str) -> Option<StreamHandle> {
        self.streams.remove(name)
    }

    /// Render every binding for a crash dump, one per line, grouped by
    /// table and sorted by name.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (name, value) in sorted(&self.strings) {
            let _ = writeln!(out, "${name}:{value}");
        }
        for (name, value) in sorted(&self.numbers) {
            let _ = writeln!(out, "#{name}:{}", render_number(*value));
        }
        for (name, value) in sorted(&self.booleans) {
            let _ = writeln!(out, "?{name}:{}", if *value { "TRUE" } else { "FALSE" });
        }
        for (name, _) in sorted(&self.streams) {
            let _ = writeln!(out, "OPEN {name}");
        }
        out
    }
}

fn sorted<V>(table: &FxHashMap<String, V>) -> Vec<(&String, &V)> {
    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
}
