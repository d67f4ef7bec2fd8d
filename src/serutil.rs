use {
    serde::{
        ser::{SerializeSeq, Serializer},
        Serialize,
    },
    std::{
        fmt::{Debug, Display, Formatter, Result as FmtResult},
        ops::Index,
        slice::Iter,
    },
};

/// Implement Display for a given class by formatting it as pretty-printed JSON.
#[macro_export]
macro_rules! display_json {
    ($cls:ident) => {
        impl std::fmt::Display for $cls {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                $crate::serutil::write_pretty_json(f, self)
            }
        }
    };
}

/// Implement FromStr for a given class by parsing it as JSON.
#[macro_export]
macro_rules! from_str_json {
    ($cls:ident) => {
        impl ::std::str::FromStr for $cls {
            type Err = ::serde_json::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match ::serde_json::from_str::<Self>(s) {
                    Ok(result) => Ok(result),
                    Err(e) => {
                        ::log::debug!("Failed to parse: {}: {:?}", s, e);
                        Err(e)
                    }
                }
            }
        }
    };
}

/// Write `value` to the formatter as JSON, pretty-printed with four-space indentation.
pub fn write_pretty_json<T: Serialize + ?Sized>(f: &mut Formatter, value: &T) -> FmtResult {
    let buf = Vec::new();
    let serde_formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(buf, serde_formatter);
    match value.serialize(&mut ser) {
        Ok(()) => (),
        Err(e) => {
            log::error!("Failed to serialize: {}", e);
            return Err(std::fmt::Error {});
        }
    };
    match std::str::from_utf8(&ser.into_inner()) {
        Ok(s) => write!(f, "{}", s),
        Err(e) => {
            log::error!("JSON serialization contained non-UTF-8 characters: {}", e);
            Err(std::fmt::Error {})
        }
    }
}

/// ElementList allows a JSON field to be a single element or a list of elements.
///
/// A [ElementList::Single] serializes as the bare element; a [ElementList::List] always serializes as an array.
#[derive(Clone)]
pub enum ElementList<E> {
    Single(E),
    List(Vec<E>),
}

impl<E> ElementList<E> {
    /// Build a list from a vector, using the single-element form when the vector holds exactly one element.
    pub fn collapse(mut elements: Vec<E>) -> Self {
        if elements.len() == 1 {
            if let Some(element) = elements.pop() {
                return Self::Single(element);
            }
        }

        Self::List(elements)
    }

    pub fn to_vec(&self) -> Vec<&E> {
        self.iter().collect()
    }

    pub fn iter(&self) -> Iter<'_, E> {
        self.as_slice().iter()
    }

    pub fn as_slice(&self) -> &[E] {
        match self {
            Self::Single(element) => std::slice::from_ref(element),
            Self::List(element_list) => element_list.as_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::List(element_list) => element_list.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::List(element_list) => element_list.len(),
        }
    }

    #[inline]
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }
}

impl<E: Debug> Debug for ElementList<E> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Single(v) => write!(f, "{:?}", v),
            Self::List(v) => write!(f, "{:?}", v),
        }
    }
}

impl<E: Serialize> Display for ElementList<E> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write_pretty_json(f, self)
    }
}

impl<E: PartialEq> PartialEq for ElementList<E> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<E: Eq> Eq for ElementList<E> {}

impl<E> From<E> for ElementList<E> {
    fn from(v: E) -> Self {
        Self::Single(v)
    }
}

impl<E> From<Vec<E>> for ElementList<E> {
    fn from(v: Vec<E>) -> Self {
        Self::List(v)
    }
}

impl<E> Index<usize> for ElementList<E> {
    type Output = E;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Self::Single(v) => {
                if index == 0 {
                    v
                } else {
                    panic!("index out of bounds: the len is 1 but the index is {}", index);
                }
            }
            Self::List(v) => &v[index],
        }
    }
}

impl<'a, E> IntoIterator for &'a ElementList<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Serialize> Serialize for ElementList<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(v) => v.serialize(serializer),
            Self::List(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for e in v {
                    seq.serialize_element(e)?;
                }
                seq.end()
            }
        }
    }
}

/// StringList allows a JSON field to be a string or list of strings.
pub type StringList = ElementList<String>;
