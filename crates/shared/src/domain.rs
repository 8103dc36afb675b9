use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PassengerClass {
    First,
    Second,
    Third,
}

impl PassengerClass {
    pub const ALL: [PassengerClass; 3] = [Self::First, Self::Second, Self::Third];

    pub fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::First => "1st Class",
            Self::Second => "2nd Class",
            Self::Third => "3rd Class",
        }
    }
}

impl TryFrom<u8> for PassengerClass {
    type Error = FieldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            other => Err(FieldError::UnknownOption {
                field: PassengerField::Pclass,
                expected: "1, 2 or 3",
                raw: other.to_string(),
            }),
        }
    }
}

impl From<PassengerClass> for u8 {
    fn from(value: PassengerClass) -> Self {
        value.number()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Self::Male, Self::Female];

    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl FromStr for Sex {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        if value.eq_ignore_ascii_case("male") {
            Ok(Self::Male)
        } else if value.eq_ignore_ascii_case("female") {
            Ok(Self::Female)
        } else {
            Err(FieldError::UnknownOption {
                field: PassengerField::Sex,
                expected: "male or female",
                raw: raw.to_string(),
            })
        }
    }
}

/// Port of embarkation, serialized as its single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Embarked {
    #[serde(rename = "C")]
    Cherbourg,
    #[serde(rename = "Q")]
    Queenstown,
    #[serde(rename = "S")]
    Southampton,
}

impl Embarked {
    pub const ALL: [Embarked; 3] = [Self::Cherbourg, Self::Queenstown, Self::Southampton];

    pub fn code(self) -> &'static str {
        match self {
            Self::Cherbourg => "C",
            Self::Queenstown => "Q",
            Self::Southampton => "S",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cherbourg => "Cherbourg",
            Self::Queenstown => "Queenstown",
            Self::Southampton => "Southampton",
        }
    }
}

impl FromStr for Embarked {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(Self::Cherbourg),
            "Q" => Ok(Self::Queenstown),
            "S" => Ok(Self::Southampton),
            _ => Err(FieldError::UnknownOption {
                field: PassengerField::Embarked,
                expected: "C, Q or S",
                raw: raw.to_string(),
            }),
        }
    }
}

/// Form field vocabulary; names match the wire keys of [`Passenger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassengerField {
    Pclass,
    Name,
    Sex,
    Age,
    SibSp,
    Parch,
    Fare,
    Embarked,
}

impl PassengerField {
    pub const ALL: [PassengerField; 8] = [
        Self::Pclass,
        Self::Name,
        Self::Sex,
        Self::Age,
        Self::SibSp,
        Self::Parch,
        Self::Fare,
        Self::Embarked,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Pclass => "Pclass",
            Self::Name => "Name",
            Self::Sex => "Sex",
            Self::Age => "Age",
            Self::SibSp => "SibSp",
            Self::Parch => "Parch",
            Self::Fare => "Fare",
            Self::Embarked => "Embarked",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Pclass | Self::Age | Self::SibSp | Self::Parch | Self::Fare
        )
    }
}

impl fmt::Display for PassengerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for PassengerField {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == raw)
            .ok_or_else(|| FieldError::UnknownField(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Passenger {
    pub pclass: PassengerClass,
    pub name: String,
    pub sex: Sex,
    pub age: f64,
    pub sib_sp: u32,
    pub parch: u32,
    pub fare: f64,
    pub embarked: Embarked,
}

impl Default for Passenger {
    fn default() -> Self {
        Self {
            pclass: PassengerClass::Third,
            name: String::new(),
            sex: Sex::Male,
            age: 30.0,
            sib_sp: 0,
            parch: 0,
            fare: 20.0,
            embarked: Embarked::Southampton,
        }
    }
}

impl Passenger {
    /// Parses `raw` for `field` and stores it. On error nothing is written.
    pub fn apply_field(&mut self, field: PassengerField, raw: &str) -> Result<(), FieldError> {
        match field {
            PassengerField::Pclass => {
                let number = parse_count(field, raw)?;
                self.pclass = u8::try_from(number)
                    .ok()
                    .and_then(|n| PassengerClass::try_from(n).ok())
                    .ok_or_else(|| FieldError::UnknownOption {
                        field,
                        expected: "1, 2 or 3",
                        raw: raw.to_string(),
                    })?;
            }
            PassengerField::Name => self.name = raw.to_string(),
            PassengerField::Sex => self.sex = raw.parse()?,
            PassengerField::Age => self.age = parse_amount(field, raw)?,
            PassengerField::SibSp => self.sib_sp = parse_count(field, raw)?,
            PassengerField::Parch => self.parch = parse_count(field, raw)?,
            PassengerField::Fare => self.fare = parse_amount(field, raw)?,
            PassengerField::Embarked => self.embarked = raw.parse()?,
        }
        Ok(())
    }

    /// Text shown in the form's input for `field`.
    pub fn field_text(&self, field: PassengerField) -> String {
        match field {
            PassengerField::Pclass => self.pclass.number().to_string(),
            PassengerField::Name => self.name.clone(),
            PassengerField::Sex => self.sex.wire_value().to_string(),
            PassengerField::Age => self.age.to_string(),
            PassengerField::SibSp => self.sib_sp.to_string(),
            PassengerField::Parch => self.parch.to_string(),
            PassengerField::Fare => self.fare.to_string(),
            PassengerField::Embarked => self.embarked.code().to_string(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

fn parse_amount(field: PassengerField, raw: &str) -> Result<f64, FieldError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FieldError::NotANumber {
            field,
            raw: raw.to_string(),
        })?;
    if value < 0.0 {
        return Err(FieldError::Negative { field });
    }
    // Normalizes "-0" so the payload never carries a signed zero.
    Ok(value + 0.0)
}

fn parse_count(field: PassengerField, raw: &str) -> Result<u32, FieldError> {
    let value = parse_amount(field, raw)?;
    if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(FieldError::NotWhole { field });
    }
    Ok(value as u32)
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
