//! Delimited text ingestion for hourly load profiles.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use thiserror::Error;
use uom::si::{f64::Power, power::kilowatt};

use super::{HourlyLoad, LoadError};

/// Column layout of an hourly profile file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOrder {
    /// Heating in the first column, cooling in the second.
    HeatingFirst,

    /// Cooling in the first column, heating in the second.
    CoolingFirst,

    /// A single signed column: positive values are cooling, negative heating.
    Signed,
}

/// How to read an hourly profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileFormat {
    pub delimiter: char,

    /// Whether the first line is a header to skip.
    pub header: bool,

    pub order: ColumnOrder,

    /// The power represented by a value of `1` in the file.
    pub unit: Power,
}

impl Default for ProfileFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            header: true,
            order: ColumnOrder::HeatingFirst,
            unit: Power::new::<kilowatt>(1.0),
        }
    }
}

/// Errors raised while reading an hourly profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile")]
    Io(#[from] std::io::Error),

    /// Line numbers are 1-based and count the header.
    #[error("line {line} has {found} columns, expected at least {expected}")]
    Columns {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column} is not a number")]
    Parse { line: usize, column: usize },

    #[error("invalid profile")]
    Load(#[from] LoadError),
}

impl HourlyLoad {
    /// Reads an hourly profile from a delimited text file.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] if the file cannot be read, a line is
    /// malformed, or the resulting series are not a valid hourly load.
    pub fn from_file<P: AsRef<Path>>(path: P, format: &ProfileFormat) -> Result<Self, ProfileError> {
        let reader = BufReader::new(File::open(path)?);
        Self::from_reader(reader, format)
    }

    /// Reads an hourly profile from any buffered reader.
    ///
    /// Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// See [`HourlyLoad::from_file`].
    ///
    /// # Example
    ///
    /// ```
    /// use twine_ghe::models::thermal::ghe::{ColumnOrder, HourlyLoad, ProfileFormat};
    ///
    /// let mut text = String::from("heating;cooling\n");
    /// for hour in 0..8760 {
    ///     text.push_str(if hour < 4380 { "12.5;0\n" } else { "0;8\n" });
    /// }
    ///
    /// let format = ProfileFormat { delimiter: ';', ..ProfileFormat::default() };
    /// let load = HourlyLoad::from_reader(text.as_bytes(), &format).unwrap();
    /// assert_eq!(load.len(), 8760);
    /// ```
    pub fn from_reader<R: BufRead>(reader: R, format: &ProfileFormat) -> Result<Self, ProfileError> {
        let expected = match format.order {
            ColumnOrder::Signed => 1,
            ColumnOrder::HeatingFirst | ColumnOrder::CoolingFirst => 2,
        };

        let mut first = Vec::new();
        let mut second = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            if (format.header && index == 0) || line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(format.delimiter).collect();
            if fields.len() < expected {
                return Err(ProfileError::Columns {
                    line: number,
                    expected,
                    found: fields.len(),
                });
            }

            let parse = |column: usize| {
                fields[column]
                    .trim()
                    .parse::<f64>()
                    .map(|value| format.unit * value)
                    .map_err(|_| ProfileError::Parse {
                        line: number,
                        column: column + 1,
                    })
            };
            first.push(parse(0)?);
            if expected == 2 {
                second.push(parse(1)?);
            }
        }

        let load = match format.order {
            ColumnOrder::HeatingFirst => HourlyLoad::new(first, second)?,
            ColumnOrder::CoolingFirst => HourlyLoad::new(second, first)?,
            ColumnOrder::Signed => HourlyLoad::from_signed(&first)?,
        };
        Ok(load)
    }
}
