//! Intrinsics implementation modules
//!
//! ## Current modules:
//! - `symbol` - Symbol constructor, `Symbol.for`/`Symbol.keyFor`, prototype methods
//! - `object` - Object constructor statics and `Object.prototype` methods
//! - `globals` - String/Number/Boolean constructors, `parseFloat`, `parseInt`
//! - `json` - JSON namespace (`JSON.stringify`)

pub mod globals;
pub mod json;
pub mod object;
pub mod symbol;
