//! CLI enum types for the ROM variant and unmapped-policy options.

use clap::ValueEnum;

use crate::convert::UnmappedPolicy;
use crate::rom::RomVariant;

/// Target character ROM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RomChoice {
    #[default]
    A,
    B,
    C,
}

impl From<RomChoice> for RomVariant {
    fn from(c: RomChoice) -> Self {
        match c {
            RomChoice::A => RomVariant::A,
            RomChoice::B => RomVariant::B,
            RomChoice::C => RomVariant::C,
        }
    }
}

/// Policy for characters with no direct or custom mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PolicyChoice {
    #[default]
    Auto,
    Replace,
    Manual,
}

impl From<PolicyChoice> for UnmappedPolicy {
    fn from(c: PolicyChoice) -> Self {
        match c {
            PolicyChoice::Auto => UnmappedPolicy::Auto,
            PolicyChoice::Replace => UnmappedPolicy::Replace,
            PolicyChoice::Manual => UnmappedPolicy::Manual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rom_choice_to_variant() {
        assert_eq!(RomVariant::from(RomChoice::A), RomVariant::A);
        assert_eq!(RomVariant::from(RomChoice::B), RomVariant::B);
        assert_eq!(RomVariant::from(RomChoice::C), RomVariant::C);
    }

    #[test]
    fn test_policy_choice_to_policy() {
        assert_eq!(UnmappedPolicy::from(PolicyChoice::Auto), UnmappedPolicy::Auto);
        assert_eq!(
            UnmappedPolicy::from(PolicyChoice::Replace),
            UnmappedPolicy::Replace
        );
        assert_eq!(
            UnmappedPolicy::from(PolicyChoice::Manual),
            UnmappedPolicy::Manual
        );
    }
}
