//! Atoms and their van der Waals radii.

use nalgebra::Point3;

/// Chemical elements with a known van der Waals radius.
///
/// [`Element::from_symbol`] returns `None` outside this set; callers
/// decide whether to skip such atoms or substitute a radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Element {
    /// C
    #[default]
    Carbon,
    /// H
    Hydrogen,
    /// O
    Oxygen,
    /// N
    Nitrogen,
    /// S
    Sulfur,
    /// Se
    Selenium,
    /// P
    Phosphorus,
}

impl Element {
    /// Van der Waals radius in Å.
    #[inline]
    #[must_use]
    pub const fn radius(self) -> f64 {
        match self {
            Self::Carbon => 1.70,
            Self::Hydrogen => 1.09,
            Self::Oxygen => 1.52,
            Self::Nitrogen => 1.55,
            Self::Sulfur | Self::Phosphorus => 1.80,
            Self::Selenium => 1.90,
        }
    }

    /// Parse a case-insensitive element symbol.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_molsurf::Element;
    ///
    /// assert_eq!(Element::from_symbol("se"), Some(Element::Selenium));
    /// assert_eq!(Element::from_symbol("Xe"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "C" => Some(Self::Carbon),
            "H" | "D" => Some(Self::Hydrogen),
            "O" => Some(Self::Oxygen),
            "N" => Some(Self::Nitrogen),
            "S" => Some(Self::Sulfur),
            "SE" => Some(Self::Selenium),
            "P" => Some(Self::Phosphorus),
            _ => None,
        }
    }
}

/// An atom: element and position in Å.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Atom {
    /// Element, which determines the radius.
    pub element: Element,
    /// Center position.
    pub position: Point3<f64>,
}

impl Atom {
    /// Create an atom.
    #[must_use]
    pub const fn new(element: Element, position: Point3<f64>) -> Self {
        Self { element, position }
    }

    /// Van der Waals radius of the atom.
    #[inline]
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.element.radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii_are_positive() {
        for element in [
            Element::Carbon,
            Element::Hydrogen,
            Element::Oxygen,
            Element::Nitrogen,
            Element::Sulfur,
            Element::Selenium,
            Element::Phosphorus,
        ] {
            assert!(element.radius() > 1.0);
        }
    }

    #[test]
    fn deuterium_counts_as_hydrogen() {
        assert_eq!(Element::from_symbol(" D "), Some(Element::Hydrogen));
    }
}
