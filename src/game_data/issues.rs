use super::super::parser::SaveFileObject;

/// The names of the issue options, in the order the game numbers them.
///
/// Pops refer to issue options by a 1-based index, which follows the order
/// the options appear in the issues file, across all categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Issues {
    names: Vec<String>,
}

impl Issues {
    /// Builds the table from option names already in game order
    pub fn from_names(names: Vec<String>) -> Self {
        Issues { names }
    }

    /// Reads `group = { category = { option = { ... } } }`.
    /// Non object leaves, like the `administrative = yes` flags of a category,
    /// are not options.
    pub fn from_object(base: &SaveFileObject) -> Self {
        let mut names = Vec::new();
        for group in base.leaves() {
            let Ok(group) = group.value().as_object() else {
                continue;
            };
            for category in group.leaves() {
                let Ok(category) = category.value().as_object() else {
                    continue;
                };
                for option in category.leaves() {
                    if option.value().as_object().is_ok() {
                        names.push(option.key().to_owned());
                    }
                }
            }
        }
        Issues { names }
    }

    /// Resolves a 1-based issue index
    pub fn get_issue_name(&self, index: i64) -> Option<&str> {
        let index = usize::try_from(index).ok()?.checked_sub(1)?;
        self.names.get(index).map(|n| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
