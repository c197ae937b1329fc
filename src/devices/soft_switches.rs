//! Display soft switches.
//!
//! A soft switch is a single address whose *access* (read or write, any data
//! value) flips one display mode bit. The switches live in the `0xC050-0xC057`
//! block, one address per state.

/// Display mode state driven by the soft switches.
///
/// Power-on state is full-screen lo-res text on page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftSwitches {
    /// Graphics mode (`true`) or text mode (`false`)
    pub graphics: bool,

    /// Full screen (`true`) or split screen with four text lines at the bottom
    pub full_screen: bool,

    /// Display page 2 instead of page 1
    pub page_two: bool,

    /// Hi-res graphics instead of lo-res
    pub hi_res: bool,
}

impl Default for SoftSwitches {
    fn default() -> Self {
        Self {
            graphics: false,
            full_screen: true,
            page_two: false,
            hi_res: false,
        }
    }
}

/// One soft-switch address and the state it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftSwitch {
    /// GR (0xC050)
    Graphics,
    /// TEXT (0xC051)
    Text,
    /// MIXCLR (0xC052)
    FullScreen,
    /// MIXSET (0xC053)
    SplitScreen,
    /// TXTPAGE1 (0xC054)
    PageOne,
    /// TXTPAGE2 (0xC055)
    PageTwo,
    /// LORES (0xC056)
    LoRes,
    /// HIRES (0xC057)
    HiRes,
}

/// The soft-switch address table.
pub const SOFT_SWITCH_TABLE: [(u16, SoftSwitch); 8] = [
    (0xC050, SoftSwitch::Graphics),
    (0xC051, SoftSwitch::Text),
    (0xC052, SoftSwitch::FullScreen),
    (0xC053, SoftSwitch::SplitScreen),
    (0xC054, SoftSwitch::PageOne),
    (0xC055, SoftSwitch::PageTwo),
    (0xC056, SoftSwitch::LoRes),
    (0xC057, SoftSwitch::HiRes),
];

impl SoftSwitch {
    /// Looks up the switch mapped at `addr`.
    pub fn from_address(addr: u16) -> Option<SoftSwitch> {
        SOFT_SWITCH_TABLE
            .iter()
            .find(|(switch_addr, _)| *switch_addr == addr)
            .map(|(_, switch)| *switch)
    }

    /// Whether flipping this switch requires a redraw.
    ///
    /// Only the text/graphics switches do; the other switches take effect on
    /// the next redraw triggered by a video write.
    pub fn forces_redraw(self) -> bool {
        matches!(self, SoftSwitch::Graphics | SoftSwitch::Text)
    }
}

impl SoftSwitches {
    /// Applies `switch` to the display state.
    pub fn apply(&mut self, switch: SoftSwitch) {
        match switch {
            SoftSwitch::Graphics => self.graphics = true,
            SoftSwitch::Text => self.graphics = false,
            SoftSwitch::FullScreen => self.full_screen = true,
            SoftSwitch::SplitScreen => self.full_screen = false,
            SoftSwitch::PageOne => self.page_two = false,
            SoftSwitch::PageTwo => self.page_two = true,
            SoftSwitch::LoRes => self.hi_res = false,
            SoftSwitch::HiRes => self.hi_res = true,
        }
    }
}
