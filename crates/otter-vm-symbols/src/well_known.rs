//! Well-known symbols.
//!
//! The table is built exactly once per process and shared by every realm.
//! Its symbols are never entered into a [`SymbolRegistry`](crate::SymbolRegistry),
//! so `Symbol.keyFor(Symbol.iterator)` is `undefined`.

use std::sync::LazyLock;

use crate::symbol::Symbol;

/// `Symbol.iterator`
pub const ITERATOR: u64 = 1;
/// `Symbol.asyncIterator`
pub const ASYNC_ITERATOR: u64 = 2;
/// `Symbol.toStringTag`
pub const TO_STRING_TAG: u64 = 3;
/// `Symbol.hasInstance`
pub const HAS_INSTANCE: u64 = 4;
/// `Symbol.toPrimitive`
pub const TO_PRIMITIVE: u64 = 5;
/// `Symbol.isConcatSpreadable`
pub const IS_CONCAT_SPREADABLE: u64 = 6;
/// `Symbol.match`
pub const MATCH: u64 = 7;
/// `Symbol.matchAll`
pub const MATCH_ALL: u64 = 8;
/// `Symbol.replace`
pub const REPLACE: u64 = 9;
/// `Symbol.search`
pub const SEARCH: u64 = 10;
/// `Symbol.split`
pub const SPLIT: u64 = 11;
/// `Symbol.species`
pub const SPECIES: u64 = 12;
/// `Symbol.unscopables`
pub const UNSCOPABLES: u64 = 13;

/// Names of the engine-defined symbols
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WellKnownSymbol {
    /// `Symbol.iterator`
    Iterator,
    /// `Symbol.asyncIterator`
    AsyncIterator,
    /// `Symbol.toStringTag`
    ToStringTag,
    /// `Symbol.hasInstance`
    HasInstance,
    /// `Symbol.toPrimitive`
    ToPrimitive,
    /// `Symbol.isConcatSpreadable`
    IsConcatSpreadable,
    /// `Symbol.match`
    Match,
    /// `Symbol.matchAll`
    MatchAll,
    /// `Symbol.replace`
    Replace,
    /// `Symbol.search`
    Search,
    /// `Symbol.split`
    Split,
    /// `Symbol.species`
    Species,
    /// `Symbol.unscopables`
    Unscopables,
}

impl WellKnownSymbol {
    /// Every well-known symbol, in id order
    pub const ALL: [WellKnownSymbol; 13] = [
        Self::Iterator,
        Self::AsyncIterator,
        Self::ToStringTag,
        Self::HasInstance,
        Self::ToPrimitive,
        Self::IsConcatSpreadable,
        Self::Match,
        Self::MatchAll,
        Self::Replace,
        Self::Search,
        Self::Split,
        Self::Species,
        Self::Unscopables,
    ];

    /// Reserved symbol id
    pub const fn id(self) -> u64 {
        match self {
            Self::Iterator => ITERATOR,
            Self::AsyncIterator => ASYNC_ITERATOR,
            Self::ToStringTag => TO_STRING_TAG,
            Self::HasInstance => HAS_INSTANCE,
            Self::ToPrimitive => TO_PRIMITIVE,
            Self::IsConcatSpreadable => IS_CONCAT_SPREADABLE,
            Self::Match => MATCH,
            Self::MatchAll => MATCH_ALL,
            Self::Replace => REPLACE,
            Self::Search => SEARCH,
            Self::Split => SPLIT,
            Self::Species => SPECIES,
            Self::Unscopables => UNSCOPABLES,
        }
    }

    /// Property name on the `Symbol` constructor (`Symbol.<name>`)
    pub const fn property_name(self) -> &'static str {
        match self {
            Self::Iterator => "iterator",
            Self::AsyncIterator => "asyncIterator",
            Self::ToStringTag => "toStringTag",
            Self::HasInstance => "hasInstance",
            Self::ToPrimitive => "toPrimitive",
            Self::IsConcatSpreadable => "isConcatSpreadable",
            Self::Match => "match",
            Self::MatchAll => "matchAll",
            Self::Replace => "replace",
            Self::Search => "search",
            Self::Split => "split",
            Self::Species => "species",
            Self::Unscopables => "unscopables",
        }
    }
}

/// The process-wide well-known symbol table
pub struct WellKnownSymbols {
    symbols: Vec<Symbol>,
}

static WELL_KNOWN: LazyLock<WellKnownSymbols> = LazyLock::new(WellKnownSymbols::create);

impl WellKnownSymbols {
    fn create() -> Self {
        let symbols = WellKnownSymbol::ALL
            .iter()
            .map(|wk| Symbol::well_known(wk.id(), &format!("Symbol.{}", wk.property_name())))
            .collect();
        tracing::debug!(count = WellKnownSymbol::ALL.len(), "well-known symbol table created");
        Self { symbols }
    }

    /// The shared table. Populated on first access, read-only afterwards.
    pub fn get() -> &'static WellKnownSymbols {
        &WELL_KNOWN
    }

    /// Symbol for `which`
    pub fn symbol(&self, which: WellKnownSymbol) -> &Symbol {
        // ALL is in id order starting at 1
        &self.symbols[(which.id() - 1) as usize]
    }

    /// Iterate `(name, symbol)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (WellKnownSymbol, &Symbol)> {
        WellKnownSymbol::ALL.iter().copied().zip(self.symbols.iter())
    }

    /// Is `symbol` one of the engine-defined symbols
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }
}

/// `Symbol.toPrimitive`
pub fn to_primitive_symbol() -> Symbol {
    WellKnownSymbols::get()
        .symbol(WellKnownSymbol::ToPrimitive)
        .clone()
}

/// `Symbol.toStringTag`
pub fn to_string_tag_symbol() -> Symbol {
    WellKnownSymbols::get()
        .symbol(WellKnownSymbol::ToStringTag)
        .clone()
}

/// `Symbol.iterator`
pub fn iterator_symbol() -> Symbol {
    WellKnownSymbols::get()
        .symbol(WellKnownSymbol::Iterator)
        .clone()
}
