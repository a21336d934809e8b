//! Address value object and the closed set of supported countries.

use super::errors::ValidationError;
use super::Searchable;
use std::cmp::Ordering;
use std::fmt;

/// Countries an [`Address`] can belong to.
///
/// This is the directory's own closed lookup table, not a general locale
/// facility: each country knows its locale code and its display name in its
/// own language, which is also the spelling used by the persisted format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Country {
    #[default]
    France,
    Germany,
    Italy,
    Japan,
    Korea,
    UnitedKingdom,
    UnitedStates,
    Canada,
}

impl Country {
    /// Locale code, used as the address ordering key.
    pub fn code(self) -> &'static str {
        match self {
            Self::France => "fr_FR",
            Self::Germany => "de_DE",
            Self::Italy => "it_IT",
            Self::Japan => "ja_JP",
            Self::Korea => "ko_KR",
            Self::UnitedKingdom => "en_GB",
            Self::UnitedStates => "en_US",
            Self::Canada => "en_CA",
        }
    }

    /// Country name in the country's own language.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::France => "France",
            Self::Germany => "Deutschland",
            Self::Italy => "Italia",
            Self::Japan => "日本",
            Self::Korea => "대한민국",
            Self::UnitedKingdom => "United Kingdom",
            Self::UnitedStates => "United States",
            Self::Canada => "Canada",
        }
    }

    /// Reverse lookup from the display name, as read from a persisted
    /// document.
    pub fn from_display_name(name: &str) -> Option<Self> {
        match name {
            "France" => Some(Self::France),
            "Deutschland" => Some(Self::Germany),
            "Italia" => Some(Self::Italy),
            "日本" => Some(Self::Japan),
            "대한민국" => Some(Self::Korea),
            "United Kingdom" => Some(Self::UnitedKingdom),
            "United States" => Some(Self::UnitedStates),
            "Canada" => Some(Self::Canada),
            _ => None,
        }
    }
}

impl Ord for Country {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(other.code())
    }
}

impl PartialOrd for Country {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A postal address.
///
/// Constructors validate strictly: way, city and zip code must be non-empty
/// and the street number, when present, strictly positive. Setters on an
/// already-built address are best-effort instead and silently ignore invalid
/// input. That asymmetry is deliberate.
///
/// Addresses sort by (country, zip code, city, way, number), an address
/// without a number coming before a numbered one on full tie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    number: Option<u32>,
    way: String,
    city: String,
    zip_code: String,
    country: Country,
}

impl Address {
    /// Build an address with a street number.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidStreetNumber`] if `number` is not strictly
    /// positive, or the matching `Empty*` variant for a blank field.
    pub fn new(
        number: i32,
        way: impl Into<String>,
        city: impl Into<String>,
        zip_code: impl Into<String>,
        country: Country,
    ) -> Result<Self, ValidationError> {
        if number <= 0 {
            return Err(ValidationError::InvalidStreetNumber(number));
        }
        let mut address = Self::without_number(way, city, zip_code, country)?;
        address.number = Some(number as u32);
        Ok(address)
    }

    /// Build an address without a street number.
    pub fn without_number(
        way: impl Into<String>,
        city: impl Into<String>,
        zip_code: impl Into<String>,
        country: Country,
    ) -> Result<Self, ValidationError> {
        let way = way.into();
        let city = city.into();
        let zip_code = zip_code.into();
        if way.is_empty() {
            return Err(ValidationError::EmptyWay);
        }
        if city.is_empty() {
            return Err(ValidationError::EmptyCity);
        }
        if zip_code.is_empty() {
            return Err(ValidationError::EmptyZipCode);
        }
        Ok(Self {
            number: None,
            way,
            city,
            zip_code,
            country,
        })
    }

    /// The street number, if any.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// The way (street, road, ...).
    pub fn way(&self) -> &str {
        &self.way
    }

    /// The city.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// The zip code.
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    /// The country.
    pub fn country(&self) -> Country {
        self.country
    }

    /// Set the street number; non-positive values are ignored.
    pub fn set_number(&mut self, number: i32) {
        if number > 0 {
            self.number = Some(number as u32);
        }
    }

    /// Set the way; empty input is ignored.
    pub fn set_way(&mut self, way: &str) {
        if !way.is_empty() {
            self.way = way.to_string();
        }
    }

    /// Set the city; empty input is ignored.
    pub fn set_city(&mut self, city: &str) {
        if !city.is_empty() {
            self.city = city.to_string();
        }
    }

    /// Set the zip code; empty input is ignored.
    pub fn set_zip_code(&mut self, zip_code: &str) {
        if !zip_code.is_empty() {
            self.zip_code = zip_code.to_string();
        }
    }

    /// Set the country.
    pub fn set_country(&mut self, country: Country) {
        self.country = country;
    }
}

/// Multi-line postal form:
/// `[<number> ]<way>` / `<zip_code> <city>` / country when not France.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(number) = self.number {
            write!(f, "{} ", number)?;
        }
        writeln!(f, "{}", self.way)?;
        write!(f, "{} {}", self.zip_code, self.city)?;
        if self.country != Country::France {
            write!(f, "\n{}", self.country.display_name())?;
        }
        Ok(())
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.country
            .cmp(&other.country)
            .then_with(|| self.zip_code.cmp(&other.zip_code))
            .then_with(|| self.city.cmp(&other.city))
            .then_with(|| self.way.cmp(&other.way))
            .then_with(|| match (self.number, other.number) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            })
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Searchable for Address {
    fn contains_text(&self, element: &str) -> bool {
        if let Some(number) = self.number {
            if number.to_string() == element {
                return true;
            }
        }
        self.way.contains(element)
            || self.city.contains(element)
            || self.zip_code.contains(element)
            || self.country.display_name().contains(element)
    }
}
