//! Character classes and the closed set of active classes.

/// One of the fixed, pairwise-disjoint alphabets a password draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digits,
    Special,
}

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SPECIAL: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digits,
        CharClass::Special,
    ];

    /// The ASCII bytes belonging to this class.
    pub fn alphabet(self) -> &'static [u8] {
        match self {
            CharClass::Lowercase => LOWERCASE,
            CharClass::Uppercase => UPPERCASE,
            CharClass::Digits => DIGITS,
            CharClass::Special => SPECIAL,
        }
    }

    pub fn contains(self, c: char) -> bool {
        c.is_ascii() && self.alphabet().contains(&(c as u8))
    }

    fn bit(self) -> u8 {
        match self {
            CharClass::Lowercase => 0b0001,
            CharClass::Uppercase => 0b0010,
            CharClass::Digits => 0b0100,
            CharClass::Special => 0b1000,
        }
    }
}

/// Set of active character classes, computed once per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClassSet {
    bits: u8,
}

impl ClassSet {
    /// A set with no class at all. Generating from it fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lowercase plus every class whose flag is set.
    pub fn from_flags(upper: bool, digits: bool, special: bool) -> Self {
        let mut set = Self::empty().with(CharClass::Lowercase);
        if upper {
            set = set.with(CharClass::Uppercase);
        }
        if digits {
            set = set.with(CharClass::Digits);
        }
        if special {
            set = set.with(CharClass::Special);
        }
        set
    }

    pub fn with(self, class: CharClass) -> Self {
        Self {
            bits: self.bits | class.bit(),
        }
    }

    pub fn without(self, class: CharClass) -> Self {
        Self {
            bits: self.bits & !class.bit(),
        }
    }

    pub fn contains(&self, class: CharClass) -> bool {
        self.bits & class.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Active classes in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL.into_iter().filter(|c| self.contains(*c))
    }

    /// Concatenation of every active alphabet.
    pub fn union_alphabet(&self) -> Vec<u8> {
        self.iter().flat_map(|c| c.alphabet().iter().copied()).collect()
    }
}
