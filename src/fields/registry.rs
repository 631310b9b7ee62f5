//! Field registry
//!
//! One registry per family group classifies every recognised wire name by
//! value shape. Names outside the registry are ignored on read, which keeps
//! the provider working against servers that add fields.

use super::value::FieldShape;

/// Recognised field names of one family group, grouped by shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRegistry {
    pub bools: &'static [&'static str],
    pub ints: &'static [&'static str],
    pub strings: &'static [&'static str],
    pub int_sets: &'static [&'static str],
    pub string_sets: &'static [&'static str],
}

impl FieldRegistry {
    pub const EMPTY: FieldRegistry = FieldRegistry {
        bools: &[],
        ints: &[],
        strings: &[],
        int_sets: &[],
        string_sets: &[],
    };

    /// Names registered under one shape
    pub fn names(&self, shape: FieldShape) -> &'static [&'static str] {
        match shape {
            FieldShape::Bool => self.bools,
            FieldShape::Int => self.ints,
            FieldShape::String => self.strings,
            FieldShape::IntSet => self.int_sets,
            FieldShape::StringSet => self.string_sets,
        }
    }

    /// Shape and interned name of a wire field name
    pub fn lookup(&self, name: &str) -> Option<(FieldShape, &'static str)> {
        self.iter().find(|(n, _)| *n == name).map(|(n, s)| (s, n))
    }

    pub fn shape_of(&self, name: &str) -> Option<FieldShape> {
        self.lookup(name).map(|(shape, _)| shape)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Every name in registry order: bools, ints, strings, int sets, string sets
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldShape)> + '_ {
        FieldShape::ALL
            .iter()
            .flat_map(move |&shape| self.names(shape).iter().map(move |&name| (name, shape)))
    }

    pub fn len(&self) -> usize {
        FieldShape::ALL.iter().map(|&s| self.names(s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names registered more than once (under one or several shapes)
    ///
    /// Empty for a well-formed registry.
    pub fn overlaps(&self) -> Vec<&'static str> {
        let mut seen: Vec<&'static str> = Vec::with_capacity(self.len());
        let mut duplicated = Vec::new();
        for (name, _) in self.iter() {
            if seen.contains(&name) {
                if !duplicated.contains(&name) {
                    duplicated.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        duplicated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST: FieldRegistry = FieldRegistry {
        bools: &["useSsl"],
        ints: &["port"],
        strings: &["host", "urlBase"],
        int_sets: &["tagIds"],
        string_sets: &["devices"],
    };

    #[test]
    fn test_lookup() {
        assert_eq!(TEST.shape_of("port"), Some(FieldShape::Int));
        assert_eq!(TEST.shape_of("devices"), Some(FieldShape::StringSet));
        assert_eq!(TEST.shape_of("no-such-name"), None);
    }

    #[test]
    fn test_iter_order() {
        let names: Vec<_> = TEST.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["useSsl", "port", "host", "urlBase", "tagIds", "devices"]);
        assert_eq!(TEST.len(), 6);
    }

    #[test]
    fn test_overlaps() {
        assert!(TEST.overlaps().is_empty());

        let broken = FieldRegistry {
            strings: &["port"],
            ..TEST
        };
        assert_eq!(broken.overlaps(), vec!["port"]);
    }
}
