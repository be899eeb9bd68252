use std::collections::HashSet;

use super::name_normalizer::{to_camel, to_identifier, to_kebab};

/// Naming convention an allocator normalizes raw names into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameConvention {
    /// Command-line argument and option names: `pet-id`.
    Kebab,
    /// Command and group names: `getPetById`.
    Camel,
    /// Identifiers in generated source: camelCase, never starting with a digit.
    Identifier,
}

impl NameConvention {
    pub fn normalize(&self, raw: &str) -> String {
        match self {
            NameConvention::Kebab => to_kebab(raw),
            NameConvention::Camel => to_camel(raw),
            NameConvention::Identifier => to_identifier(raw),
        }
    }
}

/// Hands out names that are unique within one scope.
///
/// A name colliding with a reserved word or an earlier allocation gets the
/// first free numeric suffix: `body`, `body1`, `body2`, ...
#[derive(Debug, Clone)]
pub struct UniqueNameAllocator {
    convention: NameConvention,
    taken: HashSet<String>,
}

impl UniqueNameAllocator {
    /// Reserved words are taken verbatim, without normalization.
    pub fn new<I, S>(convention: NameConvention, reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            convention,
            taken: reserved.into_iter().map(Into::into).collect(),
        }
    }

    /// Normalize `raw` and claim the first free variant of it.
    pub fn allocate(&mut self, raw: &str) -> String {
        let base = self.convention.normalize(raw);
        if self.taken.insert(base.clone()) {
            return base;
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Whether `symbol` is reserved or already allocated. Does not claim it.
    pub fn is_taken(&self, symbol: &str) -> bool {
        self.taken.contains(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes_on_collision() {
        let mut names = UniqueNameAllocator::new(NameConvention::Camel, ["help"]);
        assert_eq!(names.allocate("listPets"), "listPets");
        assert_eq!(names.allocate("list_pets"), "listPets1");
        assert_eq!(names.allocate("ListPets"), "listPets2");
        assert_eq!(names.allocate("help"), "help1");
    }

    #[test]
    fn test_suffix_skips_claimed_candidates() {
        let mut names = UniqueNameAllocator::new(NameConvention::Kebab, ["body1"]);
        assert_eq!(names.allocate("body"), "body");
        assert_eq!(names.allocate("body"), "body2");
    }

    #[test]
    fn test_is_taken_does_not_claim() {
        let mut names = UniqueNameAllocator::new(NameConvention::Kebab, ["s", "server"]);
        assert!(names.is_taken("s"));
        assert!(!names.is_taken("l"));
        assert!(!names.is_taken("l"));
        assert_eq!(names.allocate("l"), "l");
        assert!(names.is_taken("l"));
    }

    #[test]
    fn test_reserved_words_kept_verbatim() {
        let mut names = UniqueNameAllocator::new(NameConvention::Identifier, ["delete", "req"]);
        assert_eq!(names.allocate("delete"), "delete1");
        assert_eq!(names.allocate("req"), "req1");
        assert_eq!(names.allocate("pet-id"), "petId");
    }

    #[test]
    fn test_degenerate_names_still_unique() {
        let mut names = UniqueNameAllocator::new(NameConvention::Kebab, Vec::<String>::new());
        assert_eq!(names.allocate("???"), "unnamed");
        assert_eq!(names.allocate(""), "unnamed1");
    }

    #[test]
    fn test_independent_instances() {
        let mut first = UniqueNameAllocator::new(NameConvention::Kebab, ["h"]);
        let mut second = first.clone();
        assert_eq!(first.allocate("limit"), "limit");
        assert_eq!(second.allocate("limit"), "limit");
    }
}
