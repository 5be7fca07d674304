//! Interactive user profile builder.

use crate::console::Console;
use eyre::{Context, Result};
use std::fmt;
use std::io::{BufRead, Write};

/// Token that ends hobby entry.
pub const STOP_TOKEN: &str = "stop";

/// Life stage derived from age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStage {
    Child,
    Teenager,
    Adult,
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LifeStage::Child => "Child",
            LifeStage::Teenager => "Teenager",
            LifeStage::Adult => "Adult",
        };
        f.write_str(label)
    }
}

/// Errors raised while building a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// Birth year is not an integer.
    InvalidBirthYear(String),
    /// Age falls outside 0-100.
    InvalidAge(i64),
    /// Input ended before the required answers were given.
    InputClosed,
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::InvalidBirthYear(raw) => write!(f, "invalid birth year: {:?}", raw),
            ProfileError::InvalidAge(age) => write!(f, "invalid age value: {}", age),
            ProfileError::InputClosed => write!(f, "input closed before profile was complete"),
        }
    }
}

impl std::error::Error for ProfileError {}

/// Classify an age. Only 0-100 is accepted.
pub fn life_stage(age: i64) -> Result<LifeStage, ProfileError> {
    match age {
        0..=12 => Ok(LifeStage::Child),
        13..=19 => Ok(LifeStage::Teenager),
        20..=100 => Ok(LifeStage::Adult),
        _ => Err(ProfileError::InvalidAge(age)),
    }
}

/// A completed profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub age: i64,
    pub stage: LifeStage,
    pub hobbies: Vec<String>,
}

impl Profile {
    /// Build a profile from a birth year relative to `current_year`.
    pub fn new(name: &str, birth_year: i32, current_year: i32, hobbies: Vec<String>) -> Result<Self, ProfileError> {
        // Widened so extreme years cannot overflow
        let age = i64::from(current_year) - i64::from(birth_year);
        let stage = life_stage(age)?;
        Ok(Self {
            name: name.to_string(),
            age,
            stage,
            hobbies,
        })
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f, "Profile Summary:")?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Age: {}", self.age)?;
        writeln!(f, "Life Stage: {}", self.stage)?;
        if self.hobbies.is_empty() {
            writeln!(f, "You didn't mention any hobbies")?;
        } else {
            writeln!(f, "Favorite Hobbies ({}):", self.hobbies.len())?;
            for hobby in &self.hobbies {
                writeln!(f, "- {}", hobby)?;
            }
        }
        write!(f, "---")
    }
}

/// Ask for name, birth year and hobbies, then print the summary.
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, current_year: i32) -> Result<Profile> {
    console.say("Welcome, Dear student!")?;

    let name = console
        .ask("Enter your full name: ")?
        .ok_or_else(|| eyre::eyre!(ProfileError::InputClosed))?;

    let raw_year = console
        .ask("Enter your birth year: ")?
        .ok_or_else(|| eyre::eyre!(ProfileError::InputClosed))?;
    let birth_year: i32 = raw_year
        .trim()
        .parse()
        .map_err(|_| eyre::eyre!(ProfileError::InvalidBirthYear(raw_year.clone())))?;

    let mut hobbies = Vec::new();
    while let Some(hobby) = console.ask("Enter a favorite hobby or type 'stop' to finish: ")? {
        if hobby.trim().eq_ignore_ascii_case(STOP_TOKEN) {
            break;
        }
        hobbies.push(hobby);
    }

    let profile = Profile::new(&name, birth_year, current_year, hobbies)
        .map_err(|e| eyre::eyre!(e))
        .context("Failed to build profile")?;
    log::info!("Built profile for {:?}, age {}", profile.name, profile.age);

    console.say(&profile)?;
    Ok(profile)
}
