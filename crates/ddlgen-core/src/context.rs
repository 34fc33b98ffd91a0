//! Run context: settings plus the randomness source for one generation run

use serde::{Deserialize, Serialize};

use crate::dialect::DdlOptions;
use crate::error::{Error, Result};
use crate::ident::{IdentifierGenerator, NamingMode, MIN_PASSWORD_LENGTH};

/// Which flavour of script to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Schema only
    Standard,
    /// Schema plus one user per database and AUTO_INCREMENT columns
    #[default]
    Provisioning,
}

impl Profile {
    pub fn provisions_users(&self) -> bool {
        matches!(self, Profile::Provisioning)
    }

    pub fn supports_auto_increment(&self) -> bool {
        matches!(self, Profile::Provisioning)
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "schema" => Ok(Profile::Standard),
            "provisioning" | "users" => Ok(Profile::Provisioning),
            _ => Err(format!(
                "Unknown profile: '{}'. Supported profiles: standard, provisioning.",
                s
            )),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Standard => write!(f, "standard"),
            Profile::Provisioning => write!(f, "provisioning"),
        }
    }
}

/// Settings for a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub naming: NamingMode,
    pub profile: Profile,
    pub name_length: usize,
    pub user_length: usize,
    pub password_length: usize,
    /// Fixed seed for reproducible names; entropy when absent
    pub seed: Option<u64>,
    pub ddl: DdlOptions,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            naming: NamingMode::default(),
            profile: Profile::default(),
            name_length: 8,
            user_length: 10,
            password_length: 20,
            seed: None,
            ddl: DdlOptions::default(),
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<()> {
        if self.name_length == 0 {
            return Err(Error::InvalidSetting {
                name: "name_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.user_length == 0 {
            return Err(Error::InvalidSetting {
                name: "user_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.password_length < MIN_PASSWORD_LENGTH {
            return Err(Error::InvalidSetting {
                name: "password_length",
                reason: format!(
                    "must be at least {} to fit every required character class",
                    MIN_PASSWORD_LENGTH
                ),
            });
        }
        Ok(())
    }
}

/// State owned by a single run and handed to the schema builder
#[derive(Debug)]
pub struct RunContext {
    pub settings: GeneratorSettings,
    pub names: IdentifierGenerator,
}

impl RunContext {
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        settings.validate()?;

        let names = match settings.seed {
            Some(seed) => IdentifierGenerator::seeded(settings.naming, seed),
            None => IdentifierGenerator::from_entropy(settings.naming),
        }
        .with_lengths(
            settings.name_length,
            settings.user_length,
            settings.password_length,
        );

        Ok(Self { settings, names })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RunContext::new(GeneratorSettings::default()).is_ok());
    }

    #[test]
    fn test_rejects_short_password() {
        let settings = GeneratorSettings {
            password_length: 3,
            ..Default::default()
        };
        let err = RunContext::new(settings).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSetting {
                name: "password_length",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_name_length() {
        let settings = GeneratorSettings {
            name_length: 0,
            ..Default::default()
        };
        assert!(RunContext::new(settings).is_err());
    }

    #[test]
    fn test_seeded_contexts_agree() {
        let settings = GeneratorSettings {
            seed: Some(42),
            ..Default::default()
        };
        let mut a = RunContext::new(settings.clone()).unwrap();
        let mut b = RunContext::new(settings).unwrap();
        assert_eq!(a.names.object_name("x"), b.names.object_name("x"));
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("standard".parse::<Profile>(), Ok(Profile::Standard));
        assert_eq!("Provisioning".parse::<Profile>(), Ok(Profile::Provisioning));
        assert!("full".parse::<Profile>().is_err());
    }
}
