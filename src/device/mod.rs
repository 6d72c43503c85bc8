use std::str::FromStr;

use linked_hash_map::LinkedHashMap;
use snafu::OptionExt;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{self, Result};
use crate::sysex::{Envelope, QueryBuilder};

pub mod launchpad_mini_mk3;

pub use self::launchpad_mini_mk3::LaunchpadMiniMk3;

/// Wire constants of a device: its SysEx envelope and command opcodes by name.
#[derive(Debug)]
pub struct Dictionary {
    pub sysex: Envelope,
    pub commands: &'static LinkedHashMap<&'static str, u8>,
}

impl Dictionary {
    pub fn opcode(&self, command: &str) -> Option<u8> {
        self.commands.get(command).cloned()
    }

    pub fn command_name(&self, opcode: u8) -> Option<&'static str> {
        self.commands
            .iter()
            .find(|(_, code)| **code == opcode)
            .map(|(name, _)| *name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter, Display)]
pub enum DeviceType {
    #[strum(to_string = "launchpad-mini-mk3")]
    LaunchpadMiniMk3,
}

impl DeviceType {
    pub fn driver(&self) -> Box<dyn Driver> {
        Box::new(match self {
            DeviceType::LaunchpadMiniMk3 => LaunchpadMiniMk3::new(),
        })
    }
}

impl Default for DeviceType {
    fn default() -> Self {
        DeviceType::LaunchpadMiniMk3
    }
}

pub fn device_type(name: &str) -> Result<DeviceType> {
    DeviceType::from_str(name)
        .ok()
        .context(error::UnknownDevice { name })
}

/// A device that talks SysEx over a named pair of MIDI ports.
pub trait Driver: QueryBuilder {
    fn name(&self) -> &'static str;
    fn midi_in(&self) -> &'static str;
    fn midi_out(&self) -> &'static str;
    fn dictionary(&self) -> &Dictionary;

    fn query_builder(&self, opcode: u8, params: &[u8]) -> Vec<u8> {
        self.build_query(opcode, params)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn lookup_by_name() {
        assert_eq!(
            device_type("launchpad-mini-mk3").unwrap(),
            DeviceType::LaunchpadMiniMk3
        );
        assert!(device_type("microbrute").is_err());
    }

    #[test]
    fn every_device_has_a_driver() {
        for dev in DeviceType::iter() {
            let driver = dev.driver();
            assert!(!driver.name().is_empty());
            assert!(!driver.dictionary().commands.is_empty());
        }
    }

    #[test]
    fn dictionary_both_ways() {
        let driver = DeviceType::LaunchpadMiniMk3.driver();
        let dict = driver.dictionary();
        assert_eq!(dict.opcode("daw-clear"), Some(18));
        assert_eq!(dict.command_name(18), Some("daw-clear"));
        assert_eq!(dict.opcode("no-such-thing"), None);
        assert_eq!(dict.command_name(99), None);
    }
}
