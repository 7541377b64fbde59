//! Runtime values and declared types.
//!
//! The scope model stores [`value::Value`]s and seeds them from the default
//! policy of each variable's [`value::DataType`].

pub mod value;

#[cfg(test)]
mod tests;
