//! Novation Launchpad Mini MK3.
//!
//! Every operation builds one SysEx message; nothing is sent from here.
//! Parameter values are not range checked: what goes in comes out on the wire.

use linked_hash_map::LinkedHashMap;
use serde::Deserialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::device::{Dictionary, Driver};
use crate::sysex::{bool_byte, Envelope, QueryBuilder, SYSEX_BEGIN, SYSEX_END};

// Novation 00 20 29, Launchpad family 02, Mini MK3 0d
static HEADER: &[u8] = &[SYSEX_BEGIN, 0x00, 0x20, 0x29, 0x02, 0x0d];
static FOOTER: &[u8] = &[SYSEX_END];

const PORT_NAME: &str = "LPMiniMK3 MIDI";

pub const DEFAULT_SCROLL_SPEED: u8 = 7;

#[repr(u8)]
#[derive(Debug, Display, EnumString, IntoStaticStr, EnumIter, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    #[strum(to_string = "select-layout")]
    SelectLayout = 0,
    #[strum(to_string = "led-lightning")]
    LedLightning = 3,
    #[strum(to_string = "text-scrolling")]
    TextScrolling = 7,
    #[strum(to_string = "led-brightness")]
    LedBrightness = 8,
    #[strum(to_string = "led-sleep")]
    LedSleep = 9,
    #[strum(to_string = "programmer")]
    Programmer = 14,
    #[strum(to_string = "daw")]
    Daw = 16,
    #[strum(to_string = "daw-clear")]
    DawClear = 18,
    /// Reserved, no operation emits it yet
    #[strum(to_string = "session-color")]
    SessionColor = 20,
}

lazy_static! {
    static ref COMMANDS: LinkedHashMap<&'static str, u8> = Command::iter()
        .map(|cmd| (<&'static str>::from(cmd), cmd as u8))
        .collect();
}

#[repr(u8)]
#[derive(
    Debug, Display, EnumString, IntoStaticStr, EnumIter, Clone, Copy, PartialEq, Eq, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[strum(to_string = "session")]
    Session = 0,
    #[strum(to_string = "custom1")]
    Custom1 = 4,
    #[strum(to_string = "custom2")]
    Custom2 = 5,
    #[strum(to_string = "custom3")]
    Custom3 = 6,
    #[strum(to_string = "daw-fader")]
    DawFader = 13,
    #[strum(to_string = "programmer")]
    Programmer = 127,
}

/// Lighting type, first byte of each `led_lightning` entry.
#[repr(u8)]
#[derive(Debug, Display, EnumString, EnumIter, Clone, Copy, PartialEq, Eq)]
pub enum LightingMode {
    #[strum(to_string = "static")]
    Static = 0,
    #[strum(to_string = "flashing")]
    Flashing = 1,
    #[strum(to_string = "pulsing")]
    Pulsing = 2,
    #[strum(to_string = "rgb")]
    Rgb = 3,
}

/// One pad's entry in a `led_lightning` message.
/// Colors are palette indexes, RGB components run 0 to 127.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LedColor {
    Static { pad: u8, color: u8 },
    /// Flashes between `color_a` and `color_b`, sent B first then A
    Flashing { pad: u8, color_a: u8, color_b: u8 },
    Pulsing { pad: u8, color: u8 },
    Rgb { pad: u8, r: u8, g: u8, b: u8 },
}

impl LedColor {
    pub fn mode(&self) -> LightingMode {
        match self {
            LedColor::Static { .. } => LightingMode::Static,
            LedColor::Flashing { .. } => LightingMode::Flashing,
            LedColor::Pulsing { .. } => LightingMode::Pulsing,
            LedColor::Rgb { .. } => LightingMode::Rgb,
        }
    }

    fn extend_into(&self, v: &mut Vec<u8>) {
        v.push(self.mode() as u8);
        match *self {
            LedColor::Static { pad, color } | LedColor::Pulsing { pad, color } => {
                v.extend_from_slice(&[pad, color])
            }
            LedColor::Flashing {
                pad,
                color_a,
                color_b,
            } => v.extend_from_slice(&[pad, color_b, color_a]),
            LedColor::Rgb { pad, r, g, b } => v.extend_from_slice(&[pad, r, g, b]),
        }
    }

    /// `[mode, pad, color...]` groups back to back, ready for `led_lightning`.
    pub fn flatten(colors: &[LedColor]) -> Vec<u8> {
        let mut v = Vec::with_capacity(colors.len() * 5);
        for c in colors {
            c.extend_into(&mut v);
        }
        v
    }
}

/// Which DAW layouts `daw_clear` wipes. Everything by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DawClear {
    pub session: bool,
    pub drumrack: bool,
    pub control_change: bool,
}

impl Default for DawClear {
    fn default() -> Self {
        DawClear {
            session: true,
            drumrack: true,
            control_change: true,
        }
    }
}

#[derive(Debug)]
pub struct LaunchpadMiniMk3 {
    dictionary: Dictionary,
}

impl Default for LaunchpadMiniMk3 {
    fn default() -> Self {
        LaunchpadMiniMk3::new()
    }
}

impl LaunchpadMiniMk3 {
    pub fn new() -> Self {
        LaunchpadMiniMk3 {
            dictionary: Dictionary {
                sysex: Envelope {
                    header: HEADER,
                    footer: FOOTER,
                },
                commands: &*COMMANDS,
            },
        }
    }

    fn command(&self, cmd: Command, params: &[u8]) -> Vec<u8> {
        self.query_builder(cmd as u8, params)
    }

    pub fn set_layout(&self, layout: Layout) -> Vec<u8> {
        self.command(Command::SelectLayout, &[layout as u8])
    }

    /// Scroll `text` once at the default speed.
    pub fn scroll_text(&self, color: u8, text: &str) -> Vec<u8> {
        self.text_scrolling(color, text, false, DEFAULT_SCROLL_SPEED)
    }

    pub fn text_scrolling(&self, color: u8, text: &str, should_loop: bool, speed: u8) -> Vec<u8> {
        let mut params = Vec::with_capacity(4 + text.len());
        params.extend_from_slice(&[bool_byte(should_loop), speed, 0x00, color]);
        params.extend_from_slice(text.as_bytes());
        self.command(Command::TextScrolling, &params)
    }

    /// Switch between Live and Programmer mode.
    pub fn programmer_toggle(&self, enable: bool) -> Vec<u8> {
        self.command(Command::Programmer, &[bool_byte(enable)])
    }

    pub fn daw_toggle(&self, enable: bool) -> Vec<u8> {
        self.command(Command::Daw, &[bool_byte(enable)])
    }

    pub fn daw_clear(&self, clear: DawClear) -> Vec<u8> {
        self.command(
            Command::DawClear,
            &[
                bool_byte(clear.session),
                bool_byte(clear.drumrack),
                bool_byte(clear.control_change),
            ],
        )
    }

    /// Raw pad entries, `[lighting type, pad, color...]` as in the Programmer's Reference.
    /// See `LedColor::flatten` to build them.
    pub fn led_lightning(&self, colors: &[u8]) -> Vec<u8> {
        self.command(Command::LedLightning, colors)
    }

    pub fn led_brightness(&self, brightness: u8) -> Vec<u8> {
        self.command(Command::LedBrightness, &[brightness])
    }

    /// The device flag reads "LEDs on", so `sleep = true` sends 0 and `sleep = false` sends 1.
    pub fn led_sleep(&self, sleep: bool) -> Vec<u8> {
        self.command(Command::LedSleep, &[bool_byte(!sleep)])
    }
}

impl QueryBuilder for LaunchpadMiniMk3 {
    fn envelope(&self) -> &Envelope {
        &self.dictionary.sysex
    }
}

impl Driver for LaunchpadMiniMk3 {
    fn name(&self) -> &'static str {
        "Launchpad Mini MK3"
    }

    fn midi_in(&self) -> &'static str {
        PORT_NAME
    }

    fn midi_out(&self) -> &'static str {
        PORT_NAME
    }

    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    fn wrap(body: &[u8]) -> Vec<u8> {
        let mut v = vec![0xf0, 0x00, 0x20, 0x29, 0x02, 0x0d];
        v.extend_from_slice(body);
        v.push(0xf7);
        v
    }

    #[test]
    fn opcodes() {
        let expected = [
            ("select-layout", 0),
            ("led-lightning", 3),
            ("text-scrolling", 7),
            ("led-brightness", 8),
            ("led-sleep", 9),
            ("programmer", 14),
            ("daw", 16),
            ("daw-clear", 18),
            ("session-color", 20),
        ];
        let lp = LaunchpadMiniMk3::new();
        for (name, code) in expected.iter() {
            assert_eq!(lp.dictionary().opcode(name), Some(*code), "{}", name);
            assert_eq!(Command::from_str(name).unwrap() as u8, *code);
        }
        assert_eq!(lp.dictionary().commands.len(), expected.len());
    }

    #[test]
    fn framing_is_shared() {
        let lp = LaunchpadMiniMk3::new();
        for msg in &[
            lp.set_layout(Layout::Custom2),
            lp.scroll_text(1, "x"),
            lp.led_lightning(&[]),
            lp.led_sleep(true),
        ] {
            assert!(msg.starts_with(&[0xf0, 0x00, 0x20, 0x29, 0x02, 0x0d]));
            assert_eq!(msg.last(), Some(&0xf7));
        }
        assert_eq!(lp.query_builder(42, &[1, 2]), wrap(&[42, 1, 2]));
    }

    #[test]
    fn layouts() {
        let lp = LaunchpadMiniMk3::new();
        assert_eq!(lp.set_layout(Layout::Session), wrap(&[0, 0]));
        assert_eq!(lp.set_layout(Layout::Custom1), wrap(&[0, 4]));
        assert_eq!(lp.set_layout(Layout::Custom3), wrap(&[0, 6]));
        assert_eq!(lp.set_layout(Layout::DawFader), wrap(&[0, 13]));
        assert_eq!(lp.set_layout(Layout::Programmer), wrap(&[0, 127]));
        assert_eq!(Layout::from_str("daw-fader").unwrap(), Layout::DawFader);
        assert!(Layout::from_str("custom4").is_err());
    }

    #[test]
    fn programmer_and_daw() {
        let lp = LaunchpadMiniMk3::new();
        assert_eq!(lp.programmer_toggle(true), wrap(&[14, 1]));
        assert_eq!(lp.programmer_toggle(false), wrap(&[14, 0]));
        assert_eq!(lp.daw_toggle(true), wrap(&[16, 1]));
        assert_eq!(lp.daw_toggle(false), wrap(&[16, 0]));
    }

    #[test]
    fn daw_clear_flags() {
        let lp = LaunchpadMiniMk3::new();
        assert_eq!(lp.daw_clear(DawClear::default()), wrap(&[18, 1, 1, 1]));
        assert_eq!(
            lp.daw_clear(DawClear {
                session: true,
                drumrack: false,
                control_change: true,
            }),
            wrap(&[18, 1, 0, 1])
        );
    }

    #[test]
    fn sleep_is_inverted() {
        let lp = LaunchpadMiniMk3::new();
        assert_eq!(lp.led_sleep(false), wrap(&[9, 1]));
        assert_eq!(lp.led_sleep(true), wrap(&[9, 0]));
    }

    #[test]
    fn scroll_defaults() {
        let lp = LaunchpadMiniMk3::new();
        assert_eq!(lp.scroll_text(5, "Hi"), wrap(&[7, 0, 7, 0, 5, b'H', b'i']));
        assert_eq!(
            lp.text_scrolling(21, "ok", true, 12),
            wrap(&[7, 1, 12, 0, 21, b'o', b'k'])
        );
        assert_eq!(lp.scroll_text(5, ""), wrap(&[7, 0, 7, 0, 5]));
    }

    #[test]
    fn scroll_utf8() {
        let lp = LaunchpadMiniMk3::new();
        // multi-byte chars are passed as their UTF-8 bytes, unmasked
        assert_eq!(lp.scroll_text(3, "é"), wrap(&[7, 0, 7, 0, 3, 0xc3, 0xa9]));
    }

    #[test]
    fn lightning_verbatim() {
        let lp = LaunchpadMiniMk3::new();
        assert_eq!(lp.led_lightning(&[9, 200, 0]), wrap(&[3, 9, 200, 0]));
        assert_eq!(lp.led_lightning(&[]), wrap(&[3]));
    }

    #[test]
    fn led_colors_flatten() {
        let colors = [
            LedColor::Static { pad: 11, color: 5 },
            LedColor::Flashing {
                pad: 12,
                color_a: 5,
                color_b: 9,
            },
            LedColor::Pulsing { pad: 13, color: 45 },
            LedColor::Rgb {
                pad: 14,
                r: 127,
                g: 0,
                b: 64,
            },
        ];
        assert_eq!(
            LedColor::flatten(&colors),
            vec![0, 11, 5, 1, 12, 9, 5, 2, 13, 45, 3, 14, 127, 0, 64]
        );
        assert!(LedColor::flatten(&[]).is_empty());
    }

    #[test]
    fn static_entry_is_three_bytes() {
        let lp = LaunchpadMiniMk3::new();
        let colors = LedColor::flatten(&[
            LedColor::Static { pad: 11, color: 5 },
            LedColor::Static { pad: 12, color: 6 },
        ]);
        assert_eq!(lp.led_lightning(&colors), wrap(&[3, 0, 11, 5, 0, 12, 6]));
    }

    #[test]
    fn lighting_modes() {
        assert_eq!(LightingMode::Static as u8, 0);
        assert_eq!(LightingMode::Flashing as u8, 1);
        assert_eq!(LightingMode::Pulsing as u8, 2);
        assert_eq!(LightingMode::Rgb as u8, 3);
        assert_eq!(
            LedColor::Rgb {
                pad: 1,
                r: 2,
                g: 3,
                b: 4
            }
            .mode(),
            LightingMode::Rgb
        );
    }

    #[test]
    fn driver_descriptor() {
        let lp = LaunchpadMiniMk3::new();
        assert_eq!(lp.name(), "Launchpad Mini MK3");
        assert_eq!(lp.midi_in(), "LPMiniMK3 MIDI");
        assert_eq!(lp.midi_out(), "LPMiniMK3 MIDI");
        assert_eq!(lp.dictionary().sysex.header, &[0xf0, 0x00, 0x20, 0x29, 0x02, 0x0d][..]);
        assert_eq!(lp.dictionary().sysex.footer, &[0xf7][..]);
    }

    #[test]
    fn brightness_unclamped() {
        let lp = LaunchpadMiniMk3::new();
        assert_eq!(lp.led_brightness(100), wrap(&[8, 100]));
        assert_eq!(lp.led_brightness(255), wrap(&[8, 255]));
    }

    #[test]
    fn repeatable() {
        let lp = LaunchpadMiniMk3::new();
        assert_eq!(lp.scroll_text(5, "Hi"), lp.scroll_text(5, "Hi"));
        assert_eq!(lp.daw_clear(DawClear::default()), lp.daw_clear(DawClear::default()));
        assert_eq!(
            LaunchpadMiniMk3::new().led_sleep(true),
            LaunchpadMiniMk3::default().led_sleep(true)
        );
    }
}
