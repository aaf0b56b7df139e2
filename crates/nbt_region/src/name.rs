//! Region file names

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// File extension of a region file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RegionFormat {
    /// `.mcr`
    Mcr,
    /// `.mca`
    #[default]
    Mca,
}

impl RegionFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            RegionFormat::Mcr => "mcr",
            RegionFormat::Mca => "mca",
        }
    }

    fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "mcr" => Some(RegionFormat::Mcr),
            "mca" => Some(RegionFormat::Mca),
            _ => None,
        }
    }
}

/// Parsed name of a region file
///
/// ```
/// use nbt_region::{RegionFormat, RegionName};
///
/// let name: RegionName = "r.-1.2.mca".parse()?;
/// assert_eq!(name, RegionName::Flat { x: -1, z: 2, format: RegionFormat::Mca });
/// assert_eq!(name.to_string(), "r.-1.2.mca");
/// # Ok::<(), nbt_region::error::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionName {
    /// `r.<x>.<z>.<ext>`
    Flat { x: i32, z: i32, format: RegionFormat },
    /// `r2.<x>.<y>.<z>.<ext>`
    Cubic {
        x: i32,
        y: i32,
        z: i32,
        format: RegionFormat,
    },
}

impl RegionName {
    /// Name of the flat region holding the document at world coordinates `(x, z)`
    pub fn containing(x: i32, z: i32, format: RegionFormat) -> Self {
        RegionName::Flat {
            x: x.div_euclid(32),
            z: z.div_euclid(32),
            format,
        }
    }

    pub fn format(&self) -> RegionFormat {
        match self {
            RegionName::Flat { format, .. } | RegionName::Cubic { format, .. } => *format,
        }
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionName::Flat { x, z, format } => {
                write!(f, "r.{x}.{z}.{}", format.extension())
            }
            RegionName::Cubic { x, y, z, format } => {
                write!(f, "r2.{x}.{y}.{z}.{}", format.extension())
            }
        }
    }
}

impl FromStr for RegionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidFileName(s.to_owned());
        let parts: Vec<&str> = s.split('.').collect();

        let (prefix, coords, extension) = match parts.as_slice() {
            [prefix, coords @ .., extension] => (*prefix, coords, *extension),
            _ => return Err(invalid()),
        };

        let format = RegionFormat::from_extension(extension).ok_or_else(invalid)?;
        let coords = coords
            .iter()
            .map(|c| c.parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match (prefix, coords.as_slice()) {
            ("r", [x, z]) => Ok(RegionName::Flat {
                x: *x,
                z: *z,
                format,
            }),
            ("r2", [x, y, z]) => Ok(RegionName::Cubic {
                x: *x,
                y: *y,
                z: *z,
                format,
            }),
            _ => Err(invalid()),
        }
    }
}
