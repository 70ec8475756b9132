use std::fmt;

pub struct Palette;

impl Palette {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";

    pub const ACCENT: &'static str = "\x1b[34m";
    pub const INFO: &'static str = "\x1b[36m";
    pub const SUCCESS: &'static str = "\x1b[32m";
    pub const WARNING: &'static str = "\x1b[33m";
    pub const DANGER: &'static str = "\x1b[31m";

    pub fn paint(color: &str, value: impl fmt::Display) -> String {
        format!("{}{}{}", color, value, Self::RESET)
    }

    pub fn bold(value: impl fmt::Display) -> String {
        Self::paint(Self::BOLD, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_value_in_color_and_reset() {
        assert_eq!(Palette::paint(Palette::INFO, 3), "\x1b[36m3\x1b[0m");
        assert_eq!(Palette::bold("hint"), "\x1b[1mhint\x1b[0m");
    }
}
