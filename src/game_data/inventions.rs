use super::super::parser::SaveFileObject;

/// Invention names by their 1-based number.
/// The game numbers inventions in the order they are defined, across all the
/// invention files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventions {
    names: Vec<String>,
}

impl Inventions {
    pub fn from_names(names: Vec<String>) -> Self {
        Inventions { names }
    }

    /// Appends the inventions defined in a file
    pub fn add_from_object(&mut self, base: &SaveFileObject) {
        for leaf in base.leaves() {
            if leaf.value().as_object().is_ok() {
                self.names.push(leaf.key().to_owned());
            }
        }
    }

    pub fn get_invention_name(&self, number: u32) -> Option<&str> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.names.get(index).map(|n| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::parser::parse_slice;
    use super::*;

    #[test]
    fn test_inventions() {
        let mut inventions = Inventions::default();
        inventions.add_from_object(&parse_slice(b"a = { } b = { limit = { } }").unwrap());
        inventions.add_from_object(&parse_slice(b"c = { } junk = 5").unwrap());
        assert_eq!(inventions.len(), 3);
        assert_eq!(inventions.get_invention_name(1), Some("a"));
        assert_eq!(inventions.get_invention_name(3), Some("c"));
        assert_eq!(inventions.get_invention_name(0), None);
        assert_eq!(inventions.get_invention_name(4), None);
    }
}
