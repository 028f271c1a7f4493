use std::io::Read;

use encoding_rs::WINDOWS_1252;
use jomini::{
    text::{Token as TextToken, TokenReader},
    Scalar,
};
use log::warn;

use super::{ParsingError, SaveFileObject, SaveFileValue};

/// The headers preceding color values. To be ignored
const COLOR_HEADERS: [&[u8]; 2] = [b"rgb", b"hsv"];

/// Both games write their text files in Windows-1252, so anything outside of
/// ASCII is decoded through that codepage.
fn scalar_to_string(scalar: Scalar) -> String {
    if scalar.is_ascii() {
        scalar.to_string()
    } else {
        let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(scalar.as_bytes());
        decoded.into_owned()
    }
}

/// A stack entry for the tree builder.
/// Stores the name the finished object should be saved under in its parent,
/// or `None` if the object is anonymous and gets pushed as a token.
#[derive(Debug)]
struct StackEntry {
    name: Option<String>,
    object: SaveFileObject,
}

impl StackEntry {
    fn new(name: Option<String>) -> Self {
        StackEntry {
            name,
            object: SaveFileObject::new(),
        }
    }
}

/// Builds a [SaveFileObject] tree out of a [jomini] token stream.
///
/// The reader is a small state machine over three pieces of state: the stack
/// of open objects, a scalar that might turn out to be a key, and whether we
/// are past an operator. A scalar stays a potential key until the next token
/// tells us otherwise: an operator makes it a key, anything else demotes it to
/// a plain token of the enclosing object.
pub struct ObjectReader<R: Read> {
    tape: TokenReader<R>,
}

impl<'a> ObjectReader<&'a [u8]> {
    pub fn from_slice(data: &'a [u8]) -> Self {
        ObjectReader {
            tape: TokenReader::from_slice(data),
        }
    }
}

impl<R: Read> ObjectReader<R> {
    pub fn new(tape: TokenReader<R>) -> Self {
        ObjectReader { tape }
    }

    /// Reads the whole stream into the root object.
    pub fn read(mut self) -> Result<SaveFileObject, ParsingError> {
        let mut stack: Vec<StackEntry> = vec![StackEntry::new(None)];
        let mut key: Option<String> = None;
        let mut past_eq = false;

        /// Demotes a pending potential key into a token of the current object
        fn flush_key(stack: &mut [StackEntry], key: &mut Option<String>) {
            if let (Some(k), Some(entry)) = (key.take(), stack.last_mut()) {
                entry.object.push(k.into());
            }
        }

        /// Handles a scalar, which may be a value or a future key
        fn add_scalar(
            stack: &mut [StackEntry],
            key: &mut Option<String>,
            past_eq: &mut bool,
            scalar: String,
        ) {
            if *past_eq {
                *past_eq = false;
                if let (Some(k), Some(entry)) = (key.take(), stack.last_mut()) {
                    entry.object.insert(k, scalar.into());
                    return;
                }
                // an operator with nothing on its left, keep the value as a token
                if let Some(entry) = stack.last_mut() {
                    entry.object.push(scalar.into());
                }
            } else if let Some(previous) = key.replace(scalar) {
                if let Some(entry) = stack.last_mut() {
                    entry.object.push(previous.into());
                }
            }
        }

        while let Some(result) = self.tape.next().transpose() {
            match result? {
                TextToken::Open => {
                    let name = if past_eq {
                        key.take()
                    } else {
                        flush_key(&mut stack, &mut key);
                        None
                    };
                    past_eq = false;
                    stack.push(StackEntry::new(name));
                }
                TextToken::Close => {
                    flush_key(&mut stack, &mut key);
                    past_eq = false;
                    if stack.len() < 2 {
                        // stray braces are common in hand edited mod files
                        warn!(
                            "Ignoring unexpected closing brace at byte {}",
                            self.tape.position()
                        );
                        continue;
                    }
                    if let Some(last) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            match last.name {
                                Some(name) => parent.object.insert(name, last.object.into()),
                                None => parent.object.push(last.object.into()),
                            }
                        }
                    }
                }
                TextToken::Operator(_) => {
                    // we treat the comparison operators as assignments, we never evaluate them
                    past_eq = true;
                }
                TextToken::Quoted(scalar) => {
                    add_scalar(&mut stack, &mut key, &mut past_eq, scalar_to_string(scalar));
                }
                TextToken::Unquoted(scalar) => {
                    if past_eq && COLOR_HEADERS.contains(&scalar.as_bytes()) {
                        continue; // skip the header in `color = rgb { 255 255 255 }`
                    }
                    add_scalar(&mut stack, &mut key, &mut past_eq, scalar_to_string(scalar));
                }
            }
        }
        flush_key(&mut stack, &mut key);
        if stack.len() != 1 {
            return Err(ParsingError::SyntaxError(
                self.tape.position(),
                "unexpected end of input inside an object",
            ));
        }
        match stack.pop() {
            Some(root) => Ok(root.object),
            None => Ok(SaveFileObject::new()),
        }
    }
}

/// Convenience wrapper over [ObjectReader] for in memory data
pub fn parse_slice(data: &[u8]) -> Result<SaveFileObject, ParsingError> {
    ObjectReader::from_slice(data).read()
}

impl SaveFileValue {
    /// Returns the scalars of an object value, or the value itself if it is a scalar.
    /// Used for lists that may have been written with a single element and no braces.
    pub fn as_token_list(&self) -> Vec<String> {
        match self {
            SaveFileValue::String(s) => vec![s.to_string()],
            SaveFileValue::Object(o) => o.token_strings().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{GameObjectCollection, GameObjectMapping};
    use super::*;

    #[test]
    fn test_nested() -> Result<(), Box<dyn std::error::Error>> {
        let object = parse_slice(
            b"
            test={
                test2={
                    test3=1
                }
            }
        ",
        )?;
        let test2 = object.get_object("test")?.get_object("test2")?;
        assert_eq!(test2.get_integer("test3")?, 1);
        Ok(())
    }

    #[test]
    fn test_array() -> Result<(), Box<dyn std::error::Error>> {
        let object = parse_slice(
            b"
            test={
                1
                2
                3
            }
            test2={ 1 2 3}
        ",
        )?;
        let test = object.get_object("test")?.tokens();
        assert_eq!(test.len(), 3);
        assert_eq!(test.get_index(0)?.as_integer()?, 1);
        assert_eq!(test.get_index(2)?.as_integer()?, 3);
        let test2 = object.get_object("test2")?;
        assert_eq!(test2.token_strings().count(), 3);
        Ok(())
    }

    #[test]
    fn test_weird_syntax() -> Result<(), Box<dyn std::error::Error>> {
        let object = parse_slice(
            b"
        test={
            test2={1=2
                3=4}
            test3={1 2
                3}
            test5=42
        }
    ",
        )?;
        let test = object.get_object("test")?;
        let test2 = test.get_object("test2")?;
        assert_eq!(test2.get_integer("1")?, 2);
        assert_eq!(test2.get_integer("3")?, 4);
        assert_eq!(test.get_object("test3")?.tokens().len(), 3);
        assert_eq!(test.get_integer("test5")?, 42);
        Ok(())
    }

    #[test]
    fn test_multi_key() -> Result<(), Box<dyn std::error::Error>> {
        let object = parse_slice(
            b"
        test={
            a=hello
            b=middle
            a=world
        }
        ",
        )?;
        let test = object.get_object("test")?;
        let all: Vec<_> = test.get_all("a").map(|v| v.as_string().unwrap()).collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].as_ref(), "world");
        assert_eq!(test.leaves().len(), 3);
        Ok(())
    }

    #[test]
    fn test_anonymous_objects() -> Result<(), Box<dyn std::error::Error>> {
        let object = parse_slice(
            b"
        data={ {
                flag=\"ai_random_harm_cooldown\"
                tick=7818
            }
            {
                something_else=\"test\"
            }
        }
        ",
        )?;
        let data = object.get_object("data")?;
        assert_eq!(data.tokens().len(), 2);
        let first = data.tokens().get_index(0)?.as_object()?;
        assert_eq!(first.get_string("flag")?.as_ref(), "ai_random_harm_cooldown");
        Ok(())
    }

    #[test]
    fn test_quoted_list() -> Result<(), Box<dyn std::error::Error>> {
        let object = parse_slice(b"culture={ \"irish\" \"scottish\" } owner=\"ENG\"")?;
        assert_eq!(
            object.get_err("culture")?.as_token_list(),
            vec!["irish".to_string(), "scottish".to_string()]
        );
        assert_eq!(object.get_string("owner")?.as_ref(), "ENG");
        Ok(())
    }

    #[test]
    fn test_rgb() -> Result<(), Box<dyn std::error::Error>> {
        let object = parse_slice(b"color1=rgb { 220 220 220 }")?;
        assert_eq!(object.get_object("color1")?.tokens().len(), 3);
        Ok(())
    }

    #[test]
    fn test_windows_1252() -> Result<(), Box<dyn std::error::Error>> {
        // 0xE9 is an e with an acute accent in Windows-1252
        let object = parse_slice(b"name=\"Qu\xe9bec\"")?;
        assert_eq!(object.get_string("name")?.as_ref(), "Qu\u{e9}bec");
        Ok(())
    }

    #[test]
    fn test_empty() -> Result<(), Box<dyn std::error::Error>> {
        let object = parse_slice(b"test={ }")?;
        assert!(object.get_object("test")?.is_empty());
        assert!(parse_slice(b"")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_unclosed() {
        assert!(parse_slice(b"b={ c=1").is_err());
    }
}
