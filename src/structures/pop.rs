use log::debug;
use serde::Serialize;

use super::super::{
    game_data::Issues,
    parser::{ignore_item, Parser, ParsingError, SaveFileObject},
    types::HashMap,
};

/// Keys under which pops are stored inside a province
pub const POP_TYPES: [&str; 12] = [
    "aristocrats",
    "artisans",
    "bureaucrats",
    "capitalists",
    "clergymen",
    "clerks",
    "craftsmen",
    "farmers",
    "labourers",
    "officers",
    "slaves",
    "soldiers",
];

/// A population unit of a province.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pop {
    pop_type: String,
    size: i64,
    literacy: f64,
    militancy: f64,
    culture: Option<String>,
    religion: Option<String>,
    issues: HashMap<String, f64>,
}

impl Pop {
    pub fn pop_type(&self) -> &str {
        &self.pop_type
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn literacy(&self) -> f64 {
        self.literacy
    }

    pub fn militancy(&self) -> f64 {
        self.militancy
    }

    /// The culture of the pop. Pops store their culture as the key of an
    /// otherwise unknown leaf, like `british = protestant`.
    pub fn culture(&self) -> Option<&str> {
        self.culture.as_deref()
    }

    /// The value of the culture leaf
    pub fn religion(&self) -> Option<&str> {
        self.religion.as_deref()
    }

    /// Support for the issue, zero if the pop has no opinion on it.
    pub fn issue_support(&self, issue: &str) -> f64 {
        self.issues.get(issue).copied().unwrap_or(0.0)
    }

    pub fn issues(&self) -> &HashMap<String, f64> {
        &self.issues
    }
}

/// Builds [Pop] objects. The issue table is needed to resolve the numeric
/// issue indices pops carry in the save.
pub struct PopFactory<'a> {
    parser: Parser<'a, Pop>,
}

impl<'a> PopFactory<'a> {
    pub fn new(issues: &'a Issues) -> Self {
        let mut parser = Parser::new();
        parser.register_keyword("size", |pop: &mut Pop, _, value| {
            pop.size = value.as_integer()?;
            Ok(())
        });
        parser.register_keyword("literacy", |pop: &mut Pop, _, value| {
            pop.literacy = value.as_real()?;
            Ok(())
        });
        parser.register_keyword("mil", |pop: &mut Pop, _, value| {
            pop.militancy = value.as_real()?;
            Ok(())
        });
        parser.register_keyword("issues", move |pop: &mut Pop, _, value| {
            for leaf in value.as_object()?.leaves() {
                let index = leaf.key().trim().parse::<i64>()?;
                let support = leaf.value().as_real()?;
                match issues.get_issue_name(index) {
                    Some(name) => {
                        pop.issues.insert(name.to_owned(), support);
                    }
                    None => debug!("Pop supports unknown issue {}", index),
                }
            }
            Ok(())
        });
        parser.register_keyword("id", ignore_item);
        parser.register_keyword("con", ignore_item);
        parser.register_catch_all(|pop: &mut Pop, key, value| {
            if pop.culture.is_none() {
                pop.culture = Some(key.to_owned());
                pop.religion = value.as_string().ok().map(|r| r.to_string());
            }
            Ok(())
        });
        PopFactory { parser }
    }

    /// Builds a pop of the given type from its object
    pub fn get_pop(&self, pop_type: &str, base: &SaveFileObject) -> Result<Pop, ParsingError> {
        let mut pop = Pop {
            pop_type: pop_type.to_owned(),
            ..Default::default()
        };
        self.parser.parse_object(base, &mut pop)?;
        Ok(pop)
    }
}
