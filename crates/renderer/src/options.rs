//! Optional drawing layers.

use bitflags::bitflags;

bitflags! {
    /// Which optional layers are drawn.
    ///
    /// Missile circles and vulnerable sectors are toggled per classification.
    /// Entities drawn without an own ship (classification `Default`) ignore
    /// the per-classification toggles.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct DisplayOptions: u32 {
        const NO_GRID                              = 0x01;
        const MY_MISSILE_CIRCLES                   = 0x02;
        const FRIENDLY_MISSILE_CIRCLES             = 0x04;
        const HOSTILE_MISSILE_CIRCLES              = 0x08;
        const MY_VULNERABLE_SECTORS                = 0x10;
        const FRIENDLY_VULNERABLE_SECTORS          = 0x20;
        const HOSTILE_VULNERABLE_SECTORS           = 0x40;
        const FRIENDLY_SECTORS_BY_MY_MISSILE_RANGE = 0x1000;
    }
}

impl DisplayOptions {
    /// Parse flag names such as `"NO_GRID"`. Unknown names are logged and skipped.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        names.iter().fold(Self::empty(), |acc, name| {
            let name = name.as_ref().trim();
            match Self::from_name(name) {
                Some(flag) => acc | flag,
                None => {
                    log::warn!("Unknown display option {:?}, ignoring", name);
                    acc
                }
            }
        })
    }
}
