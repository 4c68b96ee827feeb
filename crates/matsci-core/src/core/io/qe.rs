use phf::{Set, phf_set};
use std::fmt;
use std::io::BufRead;
use thiserror::Error;
use tracing::trace;

use crate::core::utils::format::NOT_AVAILABLE;

static CARD_NAMES: Set<&'static str> = phf_set! {
    "ATOMIC_SPECIES", "ATOMIC_POSITIONS", "K_POINTS", "ADDITIONAL_K_POINTS",
    "CELL_PARAMETERS", "OCCUPATIONS", "CONSTRAINTS", "ATOMIC_VELOCITIES",
    "ATOMIC_FORCES", "SOLVENTS", "HUBBARD",
};

#[derive(Debug, Error)]
pub enum QeParseError {
    #[error("Line {line}: namelist '&{name}' is never closed with '/'")]
    UnterminatedNamelist { name: String, line: usize },
    #[error("Line {line}: expected 'key = value', found '{content}'")]
    InvalidEntry { line: usize, content: String },
    #[error("Line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },
    #[error("Line {line}: {card} entry is missing fields")]
    MissingField { card: &'static str, line: usize },
    #[error("Line {line}: unexpected content '{content}' outside a namelist or card")]
    UnexpectedLine { line: usize, content: String },
    #[error("I/O error while reading input: {0}")]
    Io(#[from] std::io::Error),
}

/// A namelist value. Fortran `d` exponents are accepted for numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum QeValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl QeValue {
    fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let unquoted = raw
            .strip_prefix('\'')
            .and_then(|r| r.strip_suffix('\''))
            .or_else(|| raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')));
        if let Some(text) = unquoted {
            return QeValue::Text(text.to_string());
        }
        match raw.to_ascii_lowercase().as_str() {
            ".true." | ".t." => return QeValue::Bool(true),
            ".false." | ".f." => return QeValue::Bool(false),
            _ => {}
        }
        match parse_fortran_number(raw) {
            Some(n) => QeValue::Number(n),
            None => QeValue::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            QeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            QeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for QeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QeValue::Number(n) => write!(f, "{n}"),
            QeValue::Bool(b) => write!(f, "{}", if *b { ".true." } else { ".false." }),
            QeValue::Text(s) => write!(f, "'{s}'"),
        }
    }
}

fn parse_fortran_number(raw: &str) -> Option<f64> {
    raw.replace(['d', 'D'], "e").parse().ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Namelist {
    /// Upper-cased name without the leading `&`.
    pub name: String,
    /// Entries in file order; keys are lower-cased.
    pub entries: Vec<(String, QeValue)>,
}

impl Namelist {
    pub fn get(&self, key: &str) -> Option<&QeValue> {
        let key = key.to_ascii_lowercase();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub symbol: String,
    pub mass: f64,
    pub pseudopotential: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtomicPosition {
    pub symbol: String,
    pub coordinates: [f64; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub enum KPoints {
    Gamma,
    Automatic { grid: [u32; 3], shift: [u32; 3] },
    /// An explicit list (`tpiba`, `crystal`, `crystal_b`, ...). `declared` is the count
    /// from the card; `points` holds what was actually listed, at most `declared`.
    List {
        mode: String,
        declared: usize,
        points: Vec<[f64; 4]>,
    },
}

impl KPoints {
    pub fn mode(&self) -> &str {
        match self {
            KPoints::Gamma => "gamma",
            KPoints::Automatic { .. } => "automatic",
            KPoints::List { mode, .. } => mode,
        }
    }
}

/// The parts of a `pw.x` input deck the workflow screen reports on.
///
/// Namelists (`&CONTROL`, `&SYSTEM`, ...) keep every entry. Of the cards, only
/// `ATOMIC_SPECIES`, `ATOMIC_POSITIONS` and `K_POINTS` are interpreted; any other
/// recognised card is skipped up to the next header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QeInput {
    pub namelists: Vec<Namelist>,
    pub species: Vec<Species>,
    pub positions: Vec<AtomicPosition>,
    pub positions_unit: Option<String>,
    pub k_points: Option<KPoints>,
}

enum Section {
    Top,
    Namelist(Namelist, usize),
    Species,
    Positions,
    KPointsAutomatic,
    KPointsCount(String),
    KPointsList,
    Skipped,
}

impl QeInput {
    /// Reads a deck from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`QeParseError::Io`] when reading fails, and the other variants for
    /// malformed content.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, QeParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, QeParseError> {
        let mut input = QeInput::default();
        let mut section = Section::Top;

        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            if matches!(section, Section::Namelist(..)) {
                if line == "/" {
                    if let Section::Namelist(done, _) = std::mem::replace(&mut section, Section::Top)
                    {
                        trace!(namelist = %done.name, entries = done.entries.len(), "Closed namelist");
                        input.namelists.push(done);
                    }
                } else if let Section::Namelist(namelist, _) = &mut section {
                    parse_entries(line, line_no, &mut namelist.entries)?;
                }
                continue;
            }

            if let Some(name) = line.strip_prefix('&') {
                section = Section::Namelist(
                    Namelist {
                        name: name.trim().to_ascii_uppercase(),
                        entries: Vec::new(),
                    },
                    line_no,
                );
                continue;
            }

            if let Some((card, option)) = card_header(line) {
                section = match card.as_str() {
                    "ATOMIC_SPECIES" => Section::Species,
                    "ATOMIC_POSITIONS" => {
                        input.positions_unit = option;
                        Section::Positions
                    }
                    "K_POINTS" => {
                        let mode = option.unwrap_or_else(|| "tpiba".to_string());
                        match mode.as_str() {
                            "gamma" => {
                                input.k_points = Some(KPoints::Gamma);
                                Section::Skipped
                            }
                            "automatic" => Section::KPointsAutomatic,
                            _ => Section::KPointsCount(mode),
                        }
                    }
                    _ => Section::Skipped,
                };
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            match section {
                Section::Species => {
                    let [symbol, mass, pseudo, ..] = fields[..] else {
                        return Err(QeParseError::MissingField {
                            card: "ATOMIC_SPECIES",
                            line: line_no,
                        });
                    };
                    input.species.push(Species {
                        symbol: symbol.to_string(),
                        mass: number(mass, line_no)?,
                        pseudopotential: pseudo.to_string(),
                    });
                }
                Section::Positions => {
                    let [symbol, x, y, z, ..] = fields[..] else {
                        return Err(QeParseError::MissingField {
                            card: "ATOMIC_POSITIONS",
                            line: line_no,
                        });
                    };
                    input.positions.push(AtomicPosition {
                        symbol: symbol.to_string(),
                        coordinates: [number(x, line_no)?, number(y, line_no)?, number(z, line_no)?],
                    });
                }
                Section::KPointsAutomatic => {
                    if fields.len() < 6 {
                        return Err(QeParseError::MissingField {
                            card: "K_POINTS",
                            line: line_no,
                        });
                    }
                    let mut values = [0u32; 6];
                    for (slot, field) in values.iter_mut().zip(&fields) {
                        *slot = field.parse().map_err(|_| QeParseError::InvalidNumber {
                            line: line_no,
                            value: field.to_string(),
                        })?;
                    }
                    input.k_points = Some(KPoints::Automatic {
                        grid: [values[0], values[1], values[2]],
                        shift: [values[3], values[4], values[5]],
                    });
                    section = Section::Skipped;
                }
                Section::KPointsCount(mode) => {
                    let declared = fields[0].parse().map_err(|_| QeParseError::InvalidNumber {
                        line: line_no,
                        value: fields[0].to_string(),
                    })?;
                    input.k_points = Some(KPoints::List {
                        mode,
                        declared,
                        points: Vec::new(),
                    });
                    section = Section::KPointsList;
                }
                Section::KPointsList => {
                    if let Some(KPoints::List {
                        declared, points, ..
                    }) = input.k_points.as_mut()
                    {
                        if points.len() < *declared {
                            let [x, y, z, w, ..] = fields[..] else {
                                return Err(QeParseError::MissingField {
                                    card: "K_POINTS",
                                    line: line_no,
                                });
                            };
                            points.push([
                                number(x, line_no)?,
                                number(y, line_no)?,
                                number(z, line_no)?,
                                number(w, line_no)?,
                            ]);
                        }
                    }
                }
                Section::Skipped => {}
                Section::Top | Section::Namelist(..) => {
                    return Err(QeParseError::UnexpectedLine {
                        line: line_no,
                        content: line.to_string(),
                    });
                }
            }
        }

        if let Section::Namelist(namelist, line) = section {
            return Err(QeParseError::UnterminatedNamelist {
                name: namelist.name,
                line,
            });
        }
        Ok(input)
    }

    pub fn namelist(&self, name: &str) -> Option<&Namelist> {
        self.namelists
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(name))
    }

    /// First occurrence of `key` across all namelists.
    pub fn value(&self, key: &str) -> Option<&QeValue> {
        self.namelists.iter().find_map(|n| n.get(key))
    }

    pub fn calculation(&self) -> Option<&str> {
        self.value("calculation").and_then(QeValue::as_str)
    }

    pub fn prefix(&self) -> Option<&str> {
        self.value("prefix").and_then(QeValue::as_str)
    }

    pub fn ecutwfc(&self) -> Option<f64> {
        self.value("ecutwfc").and_then(QeValue::as_f64)
    }

    pub fn conv_thr(&self) -> Option<f64> {
        self.value("conv_thr").and_then(QeValue::as_f64)
    }

    pub fn summary(&self) -> QeSummary {
        QeSummary {
            // pw.x defaults to an SCF run when `calculation` is absent.
            calculation: self.calculation().unwrap_or("scf").to_string(),
            prefix: self.prefix().map(str::to_string),
            ecutwfc: self.ecutwfc(),
            conv_thr: self.conv_thr(),
            species: self.species.iter().map(|s| s.symbol.clone()).collect(),
            atom_count: self.positions.len(),
            k_points: self.k_points.as_ref().map(|k| k.mode().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QeSummary {
    pub calculation: String,
    pub prefix: Option<String>,
    pub ecutwfc: Option<f64>,
    pub conv_thr: Option<f64>,
    pub species: Vec<String>,
    pub atom_count: usize,
    pub k_points: Option<String>,
}

impl fmt::Display for QeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let na = NOT_AVAILABLE.to_string();
        writeln!(f, "Calculation:  {}", self.calculation)?;
        writeln!(f, "Prefix:       {}", self.prefix.as_ref().unwrap_or(&na))?;
        writeln!(
            f,
            "ecutwfc:      {}",
            self.ecutwfc.map(|v| format!("{v} Ry")).unwrap_or_else(|| na.clone())
        )?;
        writeln!(
            f,
            "conv_thr:     {}",
            self.conv_thr.map(|v| format!("{v:e}")).unwrap_or_else(|| na.clone())
        )?;
        writeln!(f, "Species:      {}", self.species.join(", "))?;
        writeln!(f, "Atoms:        {}", self.atom_count)?;
        write!(f, "K-points:     {}", self.k_points.as_ref().unwrap_or(&na))
    }
}

fn number(field: &str, line: usize) -> Result<f64, QeParseError> {
    parse_fortran_number(field).ok_or_else(|| QeParseError::InvalidNumber {
        line,
        value: field.to_string(),
    })
}

fn card_header(line: &str) -> Option<(String, Option<String>)> {
    let mut parts = line.split_whitespace();
    let card = parts.next()?.to_ascii_uppercase();
    if !CARD_NAMES.contains(card.as_str()) {
        return None;
    }
    let option = parts.next().map(|o| {
        o.trim_matches(|c| matches!(c, '{' | '}' | '(' | ')'))
            .to_ascii_lowercase()
    });
    Some((card, option))
}

fn strip_comment(line: &str) -> &str {
    let mut quote = None;
    for (i, c) in line.char_indices() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), _) if q == c => quote = None,
            (None, '!') => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_entries(
    line: &str,
    line_no: usize,
    entries: &mut Vec<(String, QeValue)>,
) -> Result<(), QeParseError> {
    let mut quote = None;
    let mut start = 0;
    let mut pieces = Vec::new();
    for (i, c) in line.char_indices() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), _) if q == c => quote = None,
            (None, ',') => {
                pieces.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&line[start..]);

    for piece in pieces.into_iter().map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = piece
            .split_once('=')
            .ok_or_else(|| QeParseError::InvalidEntry {
                line: line_no,
                content: piece.to_string(),
            })?;
        entries.push((key.trim().to_ascii_lowercase(), QeValue::parse(value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::templates::{BANDS_TEMPLATE, PLOT_TEMPLATE, RELAX_TEMPLATE, SCF_TEMPLATE};

    #[test]
    fn scf_template_summary_reports_core_parameters() {
        let input = QeInput::parse(SCF_TEMPLATE).unwrap();
        let summary = input.summary();
        assert_eq!(summary.calculation, "scf");
        assert_eq!(summary.prefix.as_deref(), Some("material"));
        assert_eq!(summary.ecutwfc, Some(40.0));
        assert!((summary.conv_thr.unwrap() - 1.0e-8).abs() < 1e-20);
        assert_eq!(summary.species, vec!["Si"]);
        assert_eq!(summary.atom_count, 1);
        assert_eq!(summary.k_points.as_deref(), Some("automatic"));
    }

    #[test]
    fn several_entries_on_one_line_are_split() {
        let input = QeInput::parse(SCF_TEMPLATE).unwrap();
        let system = input.namelist("system").unwrap();
        assert_eq!(system.get("ibrav"), Some(&QeValue::Number(2.0)));
        assert_eq!(system.get("celldm(1)"), Some(&QeValue::Number(10.2)));
        assert_eq!(system.get("NAT"), Some(&QeValue::Number(1.0)));
    }

    #[test]
    fn automatic_k_points_keep_grid_and_shift() {
        let input = QeInput::parse(RELAX_TEMPLATE).unwrap();
        assert_eq!(
            input.k_points,
            Some(KPoints::Automatic {
                grid: [4, 4, 4],
                shift: [1, 1, 1]
            })
        );
        assert_eq!(input.calculation(), Some("relax"));
        assert!(input.namelist("IONS").is_some());
    }

    #[test]
    fn explicit_k_point_list_tolerates_fewer_points_than_declared() {
        let input = QeInput::parse(BANDS_TEMPLATE).unwrap();
        match input.k_points.unwrap() {
            KPoints::List {
                mode,
                declared,
                points,
            } => {
                assert_eq!(mode, "crystal_b");
                assert_eq!(declared, 6);
                assert_eq!(points.len(), 3);
                assert_eq!(points[1], [0.5, 0.0, 0.0, 10.0]);
            }
            other => panic!("unexpected k-points {other:?}"),
        }
    }

    #[test]
    fn comments_and_quoted_bangs_are_handled() {
        let deck = "&control ! run type\n  title = 'hi!there', tstress = .true.\n/\n";
        let input = QeInput::parse(deck).unwrap();
        let control = input.namelist("CONTROL").unwrap();
        assert_eq!(control.get("title"), Some(&QeValue::Text("hi!there".into())));
        assert_eq!(control.get("tstress"), Some(&QeValue::Bool(true)));
    }

    #[test]
    fn missing_calculation_defaults_to_scf() {
        let input = QeInput::parse("&SYSTEM\n ecutwfc = 3.0D1\n/\n").unwrap();
        let summary = input.summary();
        assert_eq!(summary.calculation, "scf");
        assert_eq!(summary.ecutwfc, Some(30.0));
        assert_eq!(summary.k_points, None);
    }

    #[test]
    fn unterminated_namelist_is_reported_at_its_header() {
        let err = QeInput::parse("\n&CONTROL\n calculation = 'scf'\n").unwrap_err();
        assert!(matches!(
            err,
            QeParseError::UnterminatedNamelist { ref name, line: 2 } if name == "CONTROL"
        ));
    }

    #[test]
    fn entry_without_equals_is_invalid() {
        let err = QeInput::parse("&SYSTEM\n nat 1\n/\n").unwrap_err();
        assert!(matches!(err, QeParseError::InvalidEntry { line: 2, .. }));
    }

    #[test]
    fn short_species_line_is_missing_fields() {
        let err = QeInput::parse("ATOMIC_SPECIES\n Si 28.0855\n").unwrap_err();
        assert!(matches!(
            err,
            QeParseError::MissingField {
                card: "ATOMIC_SPECIES",
                line: 2
            }
        ));
    }

    #[test]
    fn positions_unit_is_read_from_braces() {
        let input =
            QeInput::parse("ATOMIC_POSITIONS {crystal}\n Si 0.00 0.00 0.00\n Si 0.25 0.25 0.25\n")
                .unwrap();
        assert_eq!(input.positions_unit.as_deref(), Some("crystal"));
        assert_eq!(input.positions[1].coordinates, [0.25, 0.25, 0.25]);
    }

    #[test]
    fn python_script_is_not_a_qe_deck() {
        let err = QeInput::parse(PLOT_TEMPLATE).unwrap_err();
        assert!(matches!(err, QeParseError::UnexpectedLine { line: 1, .. }));
    }

    #[test]
    fn read_from_buffered_reader() {
        let mut reader = std::io::Cursor::new(SCF_TEMPLATE.as_bytes());
        let input = QeInput::read_from(&mut reader).unwrap();
        assert_eq!(input.namelists.len(), 3);
    }
}
