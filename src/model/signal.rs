// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// A routing endpoint of one matrix, either a source or a target.
///
/// The display name lives in a string parameter under the matrix's `labels`
/// node; the signal only remembers that parameter's path. Targets additionally
/// track the ordered, duplicate-free set of sources connected to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    number: i32,
    label_path: Vec<i32>,
    unused: bool,
    connected_sources: Vec<i32>,
}

impl Signal {
    pub(crate) fn new(number: i32, label_path: Vec<i32>, unused: bool) -> Self {
        Self {
            number,
            label_path,
            unused,
            connected_sources: Vec::new(),
        }
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    /// Path of the string parameter holding this signal's label.
    pub fn label_path(&self) -> &[i32] {
        &self.label_path
    }

    /// Placeholder slot created to fill a gap in sparse naming.
    pub fn is_unused(&self) -> bool {
        self.unused
    }

    pub fn connected_sources(&self) -> &[i32] {
        &self.connected_sources
    }

    pub fn has_connected_sources(&self) -> bool {
        !self.connected_sources.is_empty()
    }

    pub fn is_connected_to(&self, source: i32) -> bool {
        self.connected_sources.contains(&source)
    }

    /// Connect `sources` to this target.
    ///
    /// Absolute mode replaces the connected set and skips unused placeholders.
    /// Relative mode appends every source not already connected.
    pub fn connect<'a>(&mut self, sources: impl IntoIterator<Item = &'a Signal>, is_absolute: bool) {
        if is_absolute {
            self.connected_sources.clear();
            for source in sources.into_iter().filter(|s| !s.unused) {
                self.push_unique(source.number);
            }
        } else {
            for source in sources {
                self.push_unique(source.number);
            }
        }
    }

    /// Remove each of `sources` that is currently connected.
    pub fn disconnect<'a>(&mut self, sources: impl IntoIterator<Item = &'a Signal>) {
        for source in sources {
            self.connected_sources.retain(|n| *n != source.number);
        }
    }

    /// Keep the blind source exclusive: drop it once a real source is connected,
    /// and fall back to it when nothing is connected.
    pub(crate) fn normalize_blind(&mut self, blind_source: i32) {
        if self.connected_sources.iter().any(|n| *n != blind_source) {
            self.connected_sources.retain(|n| *n != blind_source);
        } else if self.connected_sources.is_empty() {
            self.connected_sources.push(blind_source);
        }
    }

    fn push_unique(&mut self, source: i32) {
        if !self.connected_sources.contains(&source) {
            self.connected_sources.push(source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> Vec<Signal> {
        vec![
            Signal::new(0, vec![1, 1, 2, 0], false),
            Signal::new(1, vec![1, 1, 2, 1], true),
            Signal::new(2, vec![1, 1, 2, 2], false),
        ]
    }

    #[test]
    fn test_absolute_connect_skips_unused() {
        let sources = sources();
        let mut target = Signal::new(0, vec![1, 1, 1, 0], false);

        target.connect(&sources, true);

        assert_eq!(target.connected_sources(), &[0, 2]);
    }

    #[test]
    fn test_absolute_connect_replaces() {
        let sources = sources();
        let mut target = Signal::new(0, vec![], false);

        target.connect([&sources[0]], true);
        target.connect([&sources[2]], true);

        assert_eq!(target.connected_sources(), &[2]);
    }

    #[test]
    fn test_relative_connect_is_idempotent_union() {
        let sources = sources();
        let mut target = Signal::new(0, vec![], false);

        target.connect([&sources[2]], false);
        target.connect([&sources[0], &sources[2]], false);
        target.connect([&sources[0], &sources[2]], false);

        assert_eq!(target.connected_sources(), &[2, 0]);
    }

    #[test]
    fn test_disconnect_removes_only_named_sources() {
        let sources = sources();
        let mut target = Signal::new(0, vec![], false);
        target.connect([&sources[0], &sources[2]], true);

        target.disconnect([&sources[2], &sources[1]]);

        assert_eq!(target.connected_sources(), &[0]);
        assert!(!target.is_connected_to(2));
    }

    #[test]
    fn test_blind_normalization() {
        let mut target = Signal::new(0, vec![], false);

        target.normalize_blind(0);
        assert_eq!(target.connected_sources(), &[0]);

        target.connected_sources.push(3);
        target.normalize_blind(0);
        assert_eq!(target.connected_sources(), &[3]);

        target.connected_sources.clear();
        target.normalize_blind(0);
        assert_eq!(target.connected_sources(), &[0]);
    }
}
