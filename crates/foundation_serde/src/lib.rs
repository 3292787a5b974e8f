#![forbid(unsafe_code)]

//! First-party serialization traits.
//!
//! Data structures implement [`Serialize`] and [`Deserialize`]; data formats
//! implement [`Serializer`] and [`Deserializer`]. The two sides never see each
//! other, so any structure works with any format. The JSON codec lives in
//! `foundation_json`.
//!
//! With the `derive` feature (on by default) the `#[derive(Serialize,
//! Deserialize)]` macros are re-exported from here.

pub mod de;
pub mod ser;

#[doc(inline)]
pub use de::{Deserialize, DeserializeOwned, DeserializeSeed, Deserializer};

#[doc(inline)]
pub use ser::{Serialize, Serializer};

#[cfg(feature = "derive")]
pub use foundation_serde_derive::{Deserialize, Serialize};
