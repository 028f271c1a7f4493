use super::{super::types::HashMap, ParsingError, SaveFileObject, SaveFileValue};

/// A handler invoked for a single `key = value` leaf.
/// It receives the entity under construction, the key and the value.
pub type Handler<'a, T> =
    Box<dyn Fn(&mut T, &str, &SaveFileValue) -> Result<(), ParsingError> + 'a>;

/// A handler that does nothing. Used for keys that are known but irrelevant,
/// and as the default catch-all rule.
pub fn ignore_item<T>(_: &mut T, _: &str, _: &SaveFileValue) -> Result<(), ParsingError> {
    Ok(())
}

/// A keyword dispatch table.
///
/// Each literal key maps to a handler, and exactly one catch-all handler
/// receives every key that has no literal match. Entities are built by
/// replaying every leaf of an object through the table, in file order.
/// Unknown keys never fail on their own: by default the catch-all ignores them.
pub struct Parser<'a, T> {
    keywords: HashMap<&'static str, Handler<'a, T>>,
    catch_all: Handler<'a, T>,
}

impl<'a, T: 'a> Default for Parser<'a, T> {
    fn default() -> Self {
        Parser {
            keywords: HashMap::default(),
            catch_all: Box::new(ignore_item::<T>),
        }
    }
}

impl<'a, T: 'a> Parser<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a literal key. Registering the same key twice
    /// replaces the previous handler.
    pub fn register_keyword<F>(&mut self, key: &'static str, handler: F)
    where
        F: Fn(&mut T, &str, &SaveFileValue) -> Result<(), ParsingError> + 'a,
    {
        self.keywords.insert(key, Box::new(handler));
    }

    /// Replaces the catch-all handler.
    pub fn register_catch_all<F>(&mut self, handler: F)
    where
        F: Fn(&mut T, &str, &SaveFileValue) -> Result<(), ParsingError> + 'a,
    {
        self.catch_all = Box::new(handler);
    }

    /// Dispatches a single leaf
    pub fn handle(
        &self,
        entity: &mut T,
        key: &str,
        value: &SaveFileValue,
    ) -> Result<(), ParsingError> {
        match self.keywords.get(key) {
            Some(handler) => handler(entity, key, value),
            None => (self.catch_all)(entity, key, value),
        }
    }

    /// Replays every leaf of the object through the table
    pub fn parse_object(
        &self,
        object: &SaveFileObject,
        entity: &mut T,
    ) -> Result<(), ParsingError> {
        for leaf in object.leaves() {
            self.handle(entity, leaf.key(), leaf.value())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_slice;
    use super::*;

    #[derive(Default)]
    struct Collected {
        size: i64,
        unknown: Vec<String>,
    }

    fn parser() -> Parser<'static, Collected> {
        let mut parser = Parser::new();
        parser.register_keyword("size", |c: &mut Collected, _, value| {
            c.size = value.as_integer()?;
            Ok(())
        });
        parser.register_keyword("id", ignore_item);
        parser.register_catch_all(|c: &mut Collected, key, _| {
            c.unknown.push(key.to_owned());
            Ok(())
        });
        parser
    }

    #[test]
    fn test_dispatch() {
        let object = parse_slice(b"id=5 size=10 foo=bar baz={ 1 2 }").unwrap();
        let mut collected = Collected::default();
        parser().parse_object(&object, &mut collected).unwrap();
        assert_eq!(collected.size, 10);
        assert_eq!(collected.unknown, vec!["foo".to_owned(), "baz".to_owned()]);
    }

    #[test]
    fn test_malformed_is_fatal() {
        let object = parse_slice(b"size=ten").unwrap();
        let mut collected = Collected::default();
        assert!(parser().parse_object(&object, &mut collected).is_err());
    }

    #[test]
    fn test_default_catch_all_ignores() {
        let object = parse_slice(b"anything=1 else={ a=b }").unwrap();
        let parser: Parser<Collected> = Parser::new();
        let mut collected = Collected::default();
        parser.parse_object(&object, &mut collected).unwrap();
        assert!(collected.unknown.is_empty());
    }
}
