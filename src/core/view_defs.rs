//! Feste Kamera-Ansichten: 6 Achsen-Ansichten und 4 isometrische Ecken.
//!
//! Die 7-Slot-Sequenz wird für das zyklische Durchschalten der Ansichten
//! (z.B. Toolbar-Button "Ansicht wechseln") verwendet.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Minimaler Abstand zum Pol für Draufsicht/Untersicht.
pub const TOP_EPS: f64 = 4e-4;

/// Benannte Kamera-Ansicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKey {
    /// Blick entlang +X
    XPos,
    /// Blick entlang -X
    XNeg,
    /// Blick entlang +Y
    YPos,
    /// Blick entlang -Y
    YNeg,
    /// Draufsicht
    ZPos,
    /// Untersicht
    ZNeg,
    /// Isometrisch Nord-Ost
    IsoNe,
    /// Isometrisch Nord-West
    IsoNw,
    /// Isometrisch Süd-West
    IsoSw,
    /// Isometrisch Süd-Ost
    IsoSe,
}

/// Winkel einer Ansicht in Polarkoordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAngles {
    /// Azimut
    pub theta: f64,
    /// Polarwinkel (0 = oben)
    pub phi: f64,
}

/// Zyklische Sequenz für `set_view_preset`.
pub const PRESET_SEQUENCE: [ViewKey; 7] = [
    ViewKey::ZPos,
    ViewKey::YPos,
    ViewKey::XPos,
    ViewKey::IsoNe,
    ViewKey::IsoNw,
    ViewKey::IsoSw,
    ViewKey::IsoSe,
];

impl ViewKey {
    /// Alle 10 Ansichten in Tabellen-Reihenfolge.
    pub const ALL: [ViewKey; 10] = [
        ViewKey::XPos,
        ViewKey::XNeg,
        ViewKey::YPos,
        ViewKey::YNeg,
        ViewKey::ZPos,
        ViewKey::ZNeg,
        ViewKey::IsoNe,
        ViewKey::IsoNw,
        ViewKey::IsoSw,
        ViewKey::IsoSe,
    ];

    /// Liefert die Winkel der Ansicht.
    pub fn angles(self) -> ViewAngles {
        let (theta, phi) = match self {
            ViewKey::XPos => (0.0, PI / 2.0),
            ViewKey::XNeg => (PI, PI / 2.0),
            ViewKey::YPos => (PI / 2.0, PI / 2.0),
            ViewKey::YNeg => (-PI / 2.0, PI / 2.0),
            ViewKey::ZPos => (0.0, TOP_EPS),
            ViewKey::ZNeg => (0.0, PI - TOP_EPS),
            ViewKey::IsoNe => (PI / 4.0, PI / 3.0),
            ViewKey::IsoNw => (3.0 * PI / 4.0, PI / 3.0),
            ViewKey::IsoSw => (-3.0 * PI / 4.0, PI / 3.0),
            ViewKey::IsoSe => (-PI / 4.0, PI / 3.0),
        };
        ViewAngles { theta, phi }
    }

    /// Kanonischer Schlüssel (`"x+"`, `"iso-ne"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ViewKey::XPos => "x+",
            ViewKey::XNeg => "x-",
            ViewKey::YPos => "y+",
            ViewKey::YNeg => "y-",
            ViewKey::ZPos => "z+",
            ViewKey::ZNeg => "z-",
            ViewKey::IsoNe => "iso-ne",
            ViewKey::IsoNw => "iso-nw",
            ViewKey::IsoSw => "iso-sw",
            ViewKey::IsoSe => "iso-se",
        }
    }

    /// Löst einen Ansichtsnamen auf: Aliase (`top`, `front`, `iso`, ...) oder
    /// direkte Schlüssel. Groß-/Kleinschreibung wird ignoriert.
    pub fn from_name(name: &str) -> Option<ViewKey> {
        let key = name.trim().to_ascii_lowercase();
        let resolved = match key.as_str() {
            "top" => "z+",
            "bottom" => "z-",
            "front" => "y+",
            "back" => "y-",
            "right" => "x+",
            "left" => "x-",
            "iso" => "iso-ne",
            other => other,
        };
        Self::ALL.into_iter().find(|view| view.as_str() == resolved)
    }

    /// Slot-Index in der Preset-Sequenz, falls die Ansicht dort vorkommt.
    pub fn preset_index(self) -> Option<usize> {
        PRESET_SEQUENCE.iter().position(|view| *view == self)
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Welt-Achse für `snap_to_axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// +X
    XPos,
    /// -X
    XNeg,
    /// +Y
    YPos,
    /// -Y
    YNeg,
    /// +Z (oben)
    ZPos,
    /// -Z (unten)
    ZNeg,
}

impl Axis {
    /// Zugehörige Ansicht.
    pub fn view(self) -> ViewKey {
        match self {
            Axis::XPos => ViewKey::XPos,
            Axis::XNeg => ViewKey::XNeg,
            Axis::YPos => ViewKey::YPos,
            Axis::YNeg => ViewKey::YNeg,
            Axis::ZPos => ViewKey::ZPos,
            Axis::ZNeg => ViewKey::ZNeg,
        }
    }
}

impl FromStr for Axis {
    type Err = anyhow::Error;

    /// Akzeptiert `x`, `+x`, `x+`, `-x`, `x-` (analog für y und z).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let axis = match s.trim().to_ascii_lowercase().as_str() {
            "x" | "+x" | "x+" => Axis::XPos,
            "-x" | "x-" => Axis::XNeg,
            "y" | "+y" | "y+" => Axis::YPos,
            "-y" | "y-" => Axis::YNeg,
            "z" | "+z" | "z+" => Axis::ZPos,
            "-z" | "z-" => Axis::ZNeg,
            other => anyhow::bail!("Unbekannte Achse: '{}'", other),
        };
        Ok(axis)
    }
}
