use serde::Serialize;

/// Basic metadata describing a chemical element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    pub name: &'static str,
}

const ELEMENTS: [Element; 100] = [
    Element::new(1, "H", "Hydrogen"),
    Element::new(2, "He", "Helium"),
    Element::new(3, "Li", "Lithium"),
    Element::new(4, "Be", "Beryllium"),
    Element::new(5, "B", "Boron"),
    Element::new(6, "C", "Carbon"),
    Element::new(7, "N", "Nitrogen"),
    Element::new(8, "O", "Oxygen"),
    Element::new(9, "F", "Fluorine"),
    Element::new(10, "Ne", "Neon"),
    Element::new(11, "Na", "Sodium"),
    Element::new(12, "Mg", "Magnesium"),
    Element::new(13, "Al", "Aluminium"),
    Element::new(14, "Si", "Silicon"),
    Element::new(15, "P", "Phosphorus"),
    Element::new(16, "S", "Sulfur"),
    Element::new(17, "Cl", "Chlorine"),
    Element::new(18, "Ar", "Argon"),
    Element::new(19, "K", "Potassium"),
    Element::new(20, "Ca", "Calcium"),
    Element::new(21, "Sc", "Scandium"),
    Element::new(22, "Ti", "Titanium"),
    Element::new(23, "V", "Vanadium"),
    Element::new(24, "Cr", "Chromium"),
    Element::new(25, "Mn", "Manganese"),
    Element::new(26, "Fe", "Iron"),
    Element::new(27, "Co", "Cobalt"),
    Element::new(28, "Ni", "Nickel"),
    Element::new(29, "Cu", "Copper"),
    Element::new(30, "Zn", "Zinc"),
    Element::new(31, "Ga", "Gallium"),
    Element::new(32, "Ge", "Germanium"),
    Element::new(33, "As", "Arsenic"),
    Element::new(34, "Se", "Selenium"),
    Element::new(35, "Br", "Bromine"),
    Element::new(36, "Kr", "Krypton"),
    Element::new(37, "Rb", "Rubidium"),
    Element::new(38, "Sr", "Strontium"),
    Element::new(39, "Y", "Yttrium"),
    Element::new(40, "Zr", "Zirconium"),
    Element::new(41, "Nb", "Niobium"),
    Element::new(42, "Mo", "Molybdenum"),
    Element::new(43, "Tc", "Technetium"),
    Element::new(44, "Ru", "Ruthenium"),
    Element::new(45, "Rh", "Rhodium"),
    Element::new(46, "Pd", "Palladium"),
    Element::new(47, "Ag", "Silver"),
    Element::new(48, "Cd", "Cadmium"),
    Element::new(49, "In", "Indium"),
    Element::new(50, "Sn", "Tin"),
    Element::new(51, "Sb", "Antimony"),
    Element::new(52, "Te", "Tellurium"),
    Element::new(53, "I", "Iodine"),
    Element::new(54, "Xe", "Xenon"),
    Element::new(55, "Cs", "Caesium"),
    Element::new(56, "Ba", "Barium"),
    Element::new(57, "La", "Lanthanum"),
    Element::new(58, "Ce", "Cerium"),
    Element::new(59, "Pr", "Praseodymium"),
    Element::new(60, "Nd", "Neodymium"),
    Element::new(61, "Pm", "Promethium"),
    Element::new(62, "Sm", "Samarium"),
    Element::new(63, "Eu", "Europium"),
    Element::new(64, "Gd", "Gadolinium"),
    Element::new(65, "Tb", "Terbium"),
    Element::new(66, "Dy", "Dysprosium"),
    Element::new(67, "Ho", "Holmium"),
    Element::new(68, "Er", "Erbium"),
    Element::new(69, "Tm", "Thulium"),
    Element::new(70, "Yb", "Ytterbium"),
    Element::new(71, "Lu", "Lutetium"),
    Element::new(72, "Hf", "Hafnium"),
    Element::new(73, "Ta", "Tantalum"),
    Element::new(74, "W", "Tungsten"),
    Element::new(75, "Re", "Rhenium"),
    Element::new(76, "Os", "Osmium"),
    Element::new(77, "Ir", "Iridium"),
    Element::new(78, "Pt", "Platinum"),
    Element::new(79, "Au", "Gold"),
    Element::new(80, "Hg", "Mercury"),
    Element::new(81, "Tl", "Thallium"),
    Element::new(82, "Pb", "Lead"),
    Element::new(83, "Bi", "Bismuth"),
    Element::new(84, "Po", "Polonium"),
    Element::new(85, "At", "Astatine"),
    Element::new(86, "Rn", "Radon"),
    Element::new(87, "Fr", "Francium"),
    Element::new(88, "Ra", "Radium"),
    Element::new(89, "Ac", "Actinium"),
    Element::new(90, "Th", "Thorium"),
    Element::new(91, "Pa", "Protactinium"),
    Element::new(92, "U", "Uranium"),
    Element::new(93, "Np", "Neptunium"),
    Element::new(94, "Pu", "Plutonium"),
    Element::new(95, "Am", "Americium"),
    Element::new(96, "Cm", "Curium"),
    Element::new(97, "Bk", "Berkelium"),
    Element::new(98, "Cf", "Californium"),
    Element::new(99, "Es", "Einsteinium"),
    Element::new(100, "Fm", "Fermium"),
];

impl Element {
    pub const fn new(atomic_number: u8, symbol: &'static str, name: &'static str) -> Self {
        Self {
            atomic_number,
            symbol,
            name,
        }
    }

    pub fn by_atomic_number(z: u32) -> Option<Self> {
        let index = usize::try_from(z).ok()?.checked_sub(1)?;
        ELEMENTS.get(index).copied()
    }

    pub fn all() -> &'static [Element] {
        &ELEMENTS
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Nuclide label such as `Au-197`, or `Z=120, A=300` outside the table.
pub fn nuclide_label(protons: u32, neutrons: u32) -> String {
    let mass_number = protons + neutrons;
    match Element::by_atomic_number(protons) {
        Some(element) => format!("{}-{}", element.symbol(), mass_number),
        None => format!("Z={}, A={}", protons, mass_number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_gold() {
        let gold = Element::by_atomic_number(79).expect("gold is in the table");
        assert_eq!(gold.symbol(), "Au");
        assert_eq!(gold.name(), "Gold");
    }

    #[test]
    fn table_is_indexed_by_atomic_number() {
        for (i, element) in Element::all().iter().enumerate() {
            assert_eq!(usize::from(element.atomic_number), i + 1);
        }
        assert!(Element::by_atomic_number(0).is_none());
        assert!(Element::by_atomic_number(101).is_none());
    }

    #[test]
    fn builds_nuclide_labels() {
        assert_eq!(nuclide_label(80, 121), "Hg-201");
        assert_eq!(nuclide_label(79, 118), "Au-197");
        assert_eq!(nuclide_label(120, 180), "Z=120, A=300");
    }
}
