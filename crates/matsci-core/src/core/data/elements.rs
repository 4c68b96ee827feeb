use super::{DataError, LookupError};
use crate::core::models::element::Element;
use once_cell::sync::OnceCell;
use serde::Deserialize;

const TABLE_NAME: &str = "elements.csv";
const ELEMENTS_CSV: &str = include_str!("elements.csv");

static ELEMENTS: OnceCell<Vec<Element>> = OnceCell::new();

#[derive(Debug, Deserialize)]
struct RawElement {
    number: u8,
    symbol: String,
    name: String,
    category: String,
    period: u8,
    group: Option<u8>,
    phase: String,
    electronegativity: Option<f64>,
    atomic_mass: f64,
    melting_point: Option<f64>,
    boiling_point: Option<f64>,
    electron_configuration: String,
    shells: String,
}

impl RawElement {
    fn into_element(self, row: usize) -> Result<Element, DataError> {
        let invalid = |message: String| DataError::InvalidRecord {
            table: TABLE_NAME,
            row,
            message,
        };
        let category = self.category.parse().map_err(|e| invalid(format!("{e}")))?;
        let phase = self.phase.parse().map_err(|e| invalid(format!("{e}")))?;
        let shells = self
            .shells
            .split_whitespace()
            .map(|s| s.parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid(format!("bad shell occupancy '{}': {e}", self.shells)))?;

        Ok(Element {
            number: self.number,
            symbol: self.symbol,
            name: self.name,
            category,
            period: self.period,
            group: self.group,
            phase,
            electronegativity: self.electronegativity,
            atomic_mass: self.atomic_mass,
            melting_point: self.melting_point,
            boiling_point: self.boiling_point,
            electron_configuration: self.electron_configuration,
            shells,
        })
    }
}

fn parse_elements(source: &str) -> Result<Vec<Element>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source.as_bytes());

    reader
        .deserialize::<RawElement>()
        .enumerate()
        .map(|(index, record)| {
            record
                .map_err(|source| DataError::Csv {
                    table: TABLE_NAME,
                    source,
                })?
                .into_element(index + 1)
        })
        .collect()
}

/// All 118 elements ordered by atomic number. Parsed on first access.
pub fn periodic_table() -> Result<&'static [Element], DataError> {
    ELEMENTS
        .get_or_try_init(|| parse_elements(ELEMENTS_CSV))
        .map(Vec::as_slice)
}

/// Looks an element up by symbol (case-insensitive) or atomic number.
pub fn find_element<'a>(elements: &'a [Element], key: &str) -> Result<&'a Element, LookupError> {
    let key = key.trim();
    let found = match key.parse::<u8>() {
        Ok(number) => elements.iter().find(|e| e.number == number),
        Err(_) => elements.iter().find(|e| {
            e.symbol.eq_ignore_ascii_case(key) || e.name.eq_ignore_ascii_case(key)
        }),
    };
    found.ok_or_else(|| LookupError::ElementNotFound(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::{ElementCategory, Phase};

    #[test]
    fn embedded_table_has_all_118_elements_in_order() {
        let table = periodic_table().unwrap();
        assert_eq!(table.len(), 118);
        for (i, e) in table.iter().enumerate() {
            assert_eq!(usize::from(e.number), i + 1);
        }
    }

    #[test]
    fn shell_occupancy_sums_to_atomic_number() {
        for e in periodic_table().unwrap() {
            assert_eq!(e.electron_count(), u32::from(e.number), "{}", e.symbol);
        }
    }

    #[test]
    fn f_block_elements_have_no_group() {
        let table = periodic_table().unwrap();
        for e in table {
            assert_eq!(e.group.is_none(), e.category.is_f_block(), "{}", e.symbol);
        }
    }

    #[test]
    fn optional_columns_parse_as_missing() {
        let table = periodic_table().unwrap();
        let he = find_element(table, "He").unwrap();
        assert_eq!(he.electronegativity, None);
        assert_eq!(he.phase, Phase::Gas);
        let og = find_element(table, "118").unwrap();
        assert_eq!(og.phase, Phase::Unknown);
        assert_eq!(og.category, ElementCategory::Unknown);
        assert_eq!(og.melting_point, None);
    }

    #[test]
    fn find_element_by_symbol_name_or_number() {
        let table = periodic_table().unwrap();
        assert_eq!(find_element(table, "fe").unwrap().number, 26);
        assert_eq!(find_element(table, "Cerium").unwrap().number, 58);
        assert_eq!(find_element(table, " 79 ").unwrap().symbol, "Au");
        assert_eq!(
            find_element(table, "Xx"),
            Err(LookupError::ElementNotFound("Xx".into()))
        );
    }

    #[test]
    fn malformed_row_reports_its_position() {
        let csv = "number,symbol,name,category,period,group,phase,electronegativity,atomic_mass,melting_point,boiling_point,electron_configuration,shells\n\
                   1,H,Hydrogen,plasma,1,1,Gas,2.2,1.008,14,20,1s1,1\n";
        match parse_elements(csv) {
            Err(DataError::InvalidRecord { row, .. }) => assert_eq!(row, 1),
            other => panic!("expected invalid record, got {other:?}"),
        }
    }
}
