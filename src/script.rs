//! Command scripts: a YAML list of steps, each one message to the device.
//!
//! ```yaml
//! device: launchpad-mini-mk3
//! steps:
//!   - programmer: true
//!   - scroll: { color: 5, text: "Hi", loop: true }
//!   - daw-clear: { drumrack: false }
//!   - sleep: false
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use snafu::ResultExt;

use crate::device::launchpad_mini_mk3::{DawClear, LedColor, Layout, DEFAULT_SCROLL_SPEED};
use crate::device::{self, DeviceType, LaunchpadMiniMk3};
use crate::error::{self, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scroll {
    pub color: u8,
    pub text: String,
    #[serde(default, rename = "loop")]
    pub should_loop: bool,
    #[serde(default = "default_speed")]
    pub speed: u8,
}

fn default_speed() -> u8 {
    DEFAULT_SCROLL_SPEED
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Layout(Layout),
    Scroll(Scroll),
    Programmer(bool),
    Daw(bool),
    DawClear(DawClear),
    /// Raw `led_lightning` bytes
    Lights(Vec<u8>),
    Leds(Vec<LedColor>),
    Brightness(u8),
    Sleep(bool),
}

impl Step {
    pub fn encode(&self, lp: &LaunchpadMiniMk3) -> Vec<u8> {
        debug!("encoding {:?}", self);
        match self {
            Step::Layout(layout) => lp.set_layout(*layout),
            Step::Scroll(s) => lp.text_scrolling(s.color, &s.text, s.should_loop, s.speed),
            Step::Programmer(enable) => lp.programmer_toggle(*enable),
            Step::Daw(enable) => lp.daw_toggle(*enable),
            Step::DawClear(clear) => lp.daw_clear(*clear),
            Step::Lights(colors) => lp.led_lightning(colors),
            Step::Leds(colors) => lp.led_lightning(&LedColor::flatten(colors)),
            Step::Brightness(b) => lp.led_brightness(*b),
            Step::Sleep(sleep) => lp.led_sleep(*sleep),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub device: Option<String>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn device_type(&self) -> Result<DeviceType> {
        match &self.device {
            Some(name) => device::device_type(name),
            None => Ok(DeviceType::default()),
        }
    }

    /// One message per step, in step order.
    pub fn encode(&self) -> Result<Vec<Vec<u8>>> {
        match self.device_type()? {
            DeviceType::LaunchpadMiniMk3 => {
                let lp = LaunchpadMiniMk3::new();
                Ok(self.steps.iter().map(|step| step.encode(&lp)).collect())
            }
        }
    }
}

pub fn parse_script(body: &str) -> Result<Script> {
    serde_yaml::from_str(body).context(error::ScriptParse)
}

pub fn load(path: &Path) -> Result<Script> {
    let body = fs::read_to_string(path).context(error::ScriptRead { path })?;
    let script = parse_script(&body)?;
    info!("Loaded {} steps from {}", script.steps.len(), path.display());
    Ok(script)
}
