use super::super::{
    parser::{ParsingError, SaveFileObject},
    types::{HashMap, ProvinceId},
};

/// The mapping between source and destination provinces.
///
/// Read from `link = { vic2 = 1 vic2 = 2 hoi4 = 10 }` entries, either at the
/// top level of the file or grouped in version blocks. A link may join any
/// number of provinces on either side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvinceMapping {
    vic2_to_hoi4: HashMap<ProvinceId, Vec<ProvinceId>>,
    hoi4_to_vic2: HashMap<ProvinceId, Vec<ProvinceId>>,
}

impl ProvinceMapping {
    pub fn from_object(base: &SaveFileObject) -> Result<Self, ParsingError> {
        let mut mapping = ProvinceMapping::default();
        for leaf in base.leaves() {
            let Ok(object) = leaf.value().as_object() else {
                continue;
            };
            if leaf.key() == "link" {
                mapping.add_link(object)?;
            } else {
                for link in object.get_all("link") {
                    mapping.add_link(link.as_object()?)?;
                }
            }
        }
        Ok(mapping)
    }

    fn add_link(&mut self, link: &SaveFileObject) -> Result<(), ParsingError> {
        let mut vic2 = Vec::new();
        for province in link.get_all("vic2") {
            vic2.push(province.as_id()?);
        }
        let mut hoi4 = Vec::new();
        for province in link.get_all("hoi4") {
            hoi4.push(province.as_id()?);
        }
        for source in &vic2 {
            self.vic2_to_hoi4
                .entry(*source)
                .or_default()
                .extend(hoi4.iter().copied());
        }
        for destination in &hoi4 {
            self.hoi4_to_vic2
                .entry(*destination)
                .or_default()
                .extend(vic2.iter().copied());
        }
        Ok(())
    }

    /// The destination provinces of a source province.
    /// A source province linked to nothing is present with an empty list.
    pub fn get_hoi4_provinces(&self, vic2: ProvinceId) -> Option<&[ProvinceId]> {
        self.vic2_to_hoi4.get(&vic2).map(|p| p.as_slice())
    }

    pub fn get_vic2_provinces(&self, hoi4: ProvinceId) -> Option<&[ProvinceId]> {
        self.hoi4_to_vic2.get(&hoi4).map(|p| p.as_slice())
    }

    /// Checks whether the source province has at least one destination
    pub fn is_mapped(&self, vic2: ProvinceId) -> bool {
        self.get_hoi4_provinces(vic2)
            .is_some_and(|provinces| !provinces.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::parser::parse_slice;
    use super::*;

    #[test]
    fn test_province_mapping() {
        let base = parse_slice(
            b"0.0.0.0 = {
                link = { vic2 = 1 vic2 = 2 hoi4 = 10 }
                link = { vic2 = 3 hoi4 = 11 hoi4 = 12 }
                link = { vic2 = 4 }
            }
            link = { vic2 = 5 hoi4 = 13 }",
        )
        .unwrap();
        let mapping = ProvinceMapping::from_object(&base).unwrap();
        assert_eq!(mapping.get_hoi4_provinces(2).unwrap(), &[10]);
        assert_eq!(mapping.get_hoi4_provinces(3).unwrap(), &[11, 12]);
        assert_eq!(mapping.get_vic2_provinces(10).unwrap(), &[1, 2]);
        assert!(mapping.is_mapped(5));
        assert!(!mapping.is_mapped(4));
        assert!(!mapping.is_mapped(6));
    }
}
