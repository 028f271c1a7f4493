use jomini::common::Date;
use serde::Serialize;

use super::{
    super::parser::{Parser, ParsingError, SaveFileObject},
    serialize_date,
};

/// A political party, as defined in a country file.
/// Countries refer to parties by their 1-based position in the global party list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Party {
    name: String,
    ideology: String,
    #[serde(serialize_with = "serialize_date")]
    start_date: Option<Date>,
    #[serde(serialize_with = "serialize_date")]
    end_date: Option<Date>,
    economic_policy: Option<String>,
    trade_policy: Option<String>,
    religious_policy: Option<String>,
    citizenship_policy: Option<String>,
    war_policy: Option<String>,
}

impl Party {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ideology(&self) -> &str {
        &self.ideology
    }

    pub fn start_date(&self) -> Option<Date> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// Checks whether the party exists on the given date.
    /// Missing bounds are treated as open.
    pub fn is_active_on(&self, date: Date) -> bool {
        self.start_date.map_or(true, |start| start <= date)
            && self.end_date.map_or(true, |end| date < end)
    }

    pub fn economic_policy(&self) -> Option<&str> {
        self.economic_policy.as_deref()
    }

    pub fn trade_policy(&self) -> Option<&str> {
        self.trade_policy.as_deref()
    }

    pub fn religious_policy(&self) -> Option<&str> {
        self.religious_policy.as_deref()
    }

    pub fn citizenship_policy(&self) -> Option<&str> {
        self.citizenship_policy.as_deref()
    }

    pub fn war_policy(&self) -> Option<&str> {
        self.war_policy.as_deref()
    }
}

/// Builds [Party] objects out of `party = { ... }` blocks.
pub struct PartyFactory {
    parser: Parser<'static, Party>,
}

impl Default for PartyFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PartyFactory {
    pub fn new() -> Self {
        let mut parser = Parser::new();
        parser.register_keyword("name", |party: &mut Party, _, value| {
            party.name = value.as_string()?.to_string();
            Ok(())
        });
        parser.register_keyword("ideology", |party: &mut Party, _, value| {
            party.ideology = value.as_string()?.to_string();
            Ok(())
        });
        parser.register_keyword("start_date", |party: &mut Party, _, value| {
            party.start_date = Some(value.as_date()?);
            Ok(())
        });
        parser.register_keyword("end_date", |party: &mut Party, _, value| {
            party.end_date = Some(value.as_date()?);
            Ok(())
        });
        parser.register_keyword("economic_policy", |party: &mut Party, _, value| {
            party.economic_policy = Some(value.as_string()?.to_string());
            Ok(())
        });
        parser.register_keyword("trade_policy", |party: &mut Party, _, value| {
            party.trade_policy = Some(value.as_string()?.to_string());
            Ok(())
        });
        parser.register_keyword("religious_policy", |party: &mut Party, _, value| {
            party.religious_policy = Some(value.as_string()?.to_string());
            Ok(())
        });
        parser.register_keyword("citizenship_policy", |party: &mut Party, _, value| {
            party.citizenship_policy = Some(value.as_string()?.to_string());
            Ok(())
        });
        parser.register_keyword("war_policy", |party: &mut Party, _, value| {
            party.war_policy = Some(value.as_string()?.to_string());
            Ok(())
        });
        PartyFactory { parser }
    }

    pub fn get_party(&self, base: &SaveFileObject) -> Result<Party, ParsingError> {
        let mut party = Party::default();
        self.parser.parse_object(base, &mut party)?;
        Ok(party)
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::parser::parse_slice;
    use super::*;

    #[test]
    fn test_party() {
        let base = parse_slice(
            b"name = \"ENG_conservative\"
            start_date = 1820.1.1
            end_date = 2000.1.1
            ideology = conservative
            economic_policy = interventionism
            trade_policy = protectionism
            religious_policy = moralism
            citizenship_policy = residency
            war_policy = pro_military
            leader = ignored",
        )
        .unwrap();
        let party = PartyFactory::new().get_party(&base).unwrap();
        assert_eq!(party.name(), "ENG_conservative");
        assert_eq!(party.ideology(), "conservative");
        assert_eq!(party.trade_policy(), Some("protectionism"));
        assert_eq!(party.war_policy(), Some("pro_military"));
        assert_eq!(party.start_date(), Date::from_ymd_opt(1820, 1, 1));
        assert!(party.is_active_on(Date::from_ymd_opt(1836, 1, 1).unwrap()));
        assert!(!party.is_active_on(Date::from_ymd_opt(1800, 1, 1).unwrap()));
    }

    #[test]
    fn test_bad_date() {
        let base = parse_slice(b"start_date = tomorrow").unwrap();
        assert!(PartyFactory::new().get_party(&base).is_err());
    }
}
