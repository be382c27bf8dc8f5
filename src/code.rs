//! Machine-checkable failure codes.
//!
//! Every predicate reports exactly one [`Code`]. Codes are stable numbers so
//! callers can branch on them without parsing messages, and no two
//! predicates share one.

use std::fmt::{self, Display};

macro_rules! codes {
    ($($variant:ident = $value:literal => $name:literal),+ $(,)?) => {
        /// A failure code identifying which predicate rejected a value.
        ///
        /// Built-in predicates use the named variants. Predicates registered
        /// on a custom source use [`Code::Custom`], whose numbers start at
        /// [`Code::CUSTOM_BASE`] and never overlap the built-in ones.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Code {
            $(
                #[doc = concat!("`", $name, "` (", stringify!($value), ")")]
                $variant,
            )+
            /// An extension code, numbered `CUSTOM_BASE + n`.
            Custom(u16),
        }

        impl Code {
            /// Every built-in code, in declaration order.
            pub const ALL: &'static [Code] = &[$(Code::$variant),+];

            /// The constant-style name of the code, e.g. `INVALID_INTEGER`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Code::$variant => $name,)+
                    Code::Custom(_) => "CUSTOM",
                }
            }

            /// The numeric value of the code.
            pub fn as_u32(self) -> u32 {
                match self {
                    $(Code::$variant => $value,)+
                    Code::Custom(n) => Code::CUSTOM_BASE + u32::from(n),
                }
            }

            /// Looks a code up by its numeric value.
            pub fn from_u32(value: u32) -> Option<Code> {
                match value {
                    $($value => Some(Code::$variant),)+
                    _ => value
                        .checked_sub(Code::CUSTOM_BASE)
                        .and_then(|n| u16::try_from(n).ok())
                        .map(Code::Custom),
                }
            }
        }
    };
}

codes! {
    InvalidFloat = 9 => "INVALID_FLOAT",
    InvalidInteger = 10 => "INVALID_INTEGER",
    InvalidDigit = 11 => "INVALID_DIGIT",
    InvalidIntegerish = 12 => "INVALID_INTEGERISH",
    InvalidBoolean = 13 => "INVALID_BOOLEAN",
    ValueEmpty = 14 => "VALUE_EMPTY",
    ValueNull = 15 => "VALUE_NULL",
    InvalidString = 16 => "INVALID_STRING",
    InvalidRegex = 17 => "INVALID_REGEX",
    InvalidMinLength = 18 => "INVALID_MIN_LENGTH",
    InvalidMaxLength = 19 => "INVALID_MAX_LENGTH",
    InvalidStringStart = 20 => "INVALID_STRING_START",
    InvalidStringContains = 21 => "INVALID_STRING_CONTAINS",
    InvalidChoice = 22 => "INVALID_CHOICE",
    InvalidNumeric = 23 => "INVALID_NUMERIC",
    InvalidArray = 24 => "INVALID_ARRAY",
    ValueNotNull = 25 => "VALUE_NOT_NULL",
    InvalidKeyExists = 26 => "INVALID_KEY_EXISTS",
    InvalidNotBlank = 27 => "INVALID_NOT_BLANK",
    InvalidRange = 30 => "INVALID_RANGE",
    InvalidAlnum = 31 => "INVALID_ALNUM",
    InvalidTrue = 32 => "INVALID_TRUE",
    InvalidEq = 33 => "INVALID_EQ",
    InvalidSame = 34 => "INVALID_SAME",
    InvalidMin = 35 => "INVALID_MIN",
    InvalidMax = 36 => "INVALID_MAX",
    InvalidLength = 37 => "INVALID_LENGTH",
    InvalidFalse = 38 => "INVALID_FALSE",
    InvalidStringEnd = 39 => "INVALID_STRING_END",
    InvalidUuid = 40 => "INVALID_UUID",
    InvalidCount = 41 => "INVALID_COUNT",
    InvalidNotEq = 42 => "INVALID_NOT_EQ",
    InvalidNotSame = 43 => "INVALID_NOT_SAME",
    InvalidTraversable = 44 => "INVALID_TRAVERSABLE",
    InvalidE164 = 48 => "INVALID_E164",
    InvalidBase64 = 49 => "INVALID_BASE64",
    InvalidNotRegex = 50 => "INVALID_NOT_REGEX",
    InvalidDirectory = 101 => "INVALID_DIRECTORY",
    InvalidFile = 102 => "INVALID_FILE",
    InvalidReadable = 103 => "INVALID_READABLE",
    InvalidWriteable = 104 => "INVALID_WRITEABLE",
    InvalidFileNotExists = 107 => "INVALID_FILE_NOT_EXISTS",
    InvalidEmail = 201 => "INVALID_EMAIL",
    InvalidUrl = 203 => "INVALID_URL",
    ValueNotEmpty = 205 => "VALUE_NOT_EMPTY",
    InvalidJsonString = 206 => "INVALID_JSON_STRING",
    InvalidObject = 207 => "INVALID_OBJECT",
    InvalidScalar = 209 => "INVALID_SCALAR",
    InvalidLess = 210 => "INVALID_LESS",
    InvalidLessOrEqual = 211 => "INVALID_LESS_OR_EQUAL",
    InvalidGreater = 212 => "INVALID_GREATER",
    InvalidGreaterOrEqual = 213 => "INVALID_GREATER_OR_EQUAL",
    InvalidKeyNotExists = 216 => "INVALID_KEY_NOT_EXISTS",
    InvalidIp = 218 => "INVALID_IP",
    InvalidBetween = 219 => "INVALID_BETWEEN",
    InvalidBetweenExclusive = 220 => "INVALID_BETWEEN_EXCLUSIVE",
    InvalidMinCount = 227 => "INVALID_MIN_COUNT",
    InvalidMaxCount = 228 => "INVALID_MAX_COUNT",
    InvalidStringNotContains = 229 => "INVALID_STRING_NOT_CONTAINS",
    InvalidUniqueValues = 230 => "INVALID_UNIQUE_VALUES",
    InvalidNotInArray = 231 => "INVALID_NOT_IN_ARRAY",
    InvalidBetweenLength = 232 => "INVALID_BETWEEN_LENGTH",
}

impl Code {
    /// First number of the extension code space.
    pub const CUSTOM_BASE: u32 = 1000;
}

impl Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u32())
    }
}
