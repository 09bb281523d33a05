//! Term layout shared by the plain and markup renderers.

/// How a factor raised to a power is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerStyle {
    /// `x**2`
    DoubleStar,
    /// `x^{2}`
    Braced,
}

/// Separators used when a polynomial is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermStyle {
    /// Placed between a coefficient and a factor, and between factors.
    pub times: &'static str,
    pub power: PowerStyle,
}

impl TermStyle {
    pub const PLAIN: TermStyle = TermStyle {
        times: "*",
        power: PowerStyle::DoubleStar,
    };

    pub const LATEX: TermStyle = TermStyle {
        times: " ",
        power: PowerStyle::Braced,
    };

    pub fn write_power(&self, base: &str, exponent: u32) -> String {
        if exponent == 1 {
            return base.to_string();
        }
        match self.power {
            PowerStyle::DoubleStar => format!("{base}**{exponent}"),
            PowerStyle::Braced => format!("{base}^{{{exponent}}}"),
        }
    }
}
